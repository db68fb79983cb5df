//! Rational duration algebra properties.

use frameprobe::algebra::{
    Tick, apparent_fps, durations_gcd, fraction_gcd, fractions_gcd, likely_int, round_half_up,
};
use num_rational::Ratio;

#[test]
fn fraction_gcd_basic() {
    let third = Ratio::new(1i64, 3);
    let half = Ratio::new(1i64, 2);
    assert_eq!(fraction_gcd(third, half), Ratio::new(1, 6));

    let a = Ratio::new(100i64, 3);
    let b = Ratio::new(200i64, 3);
    assert_eq!(fraction_gcd(a, b), Ratio::new(100, 3));
}

#[test]
fn fraction_gcd_commutative() {
    let a = Ratio::new(4i64, 3);
    let b = Ratio::new(10i64, 7);
    assert_eq!(fraction_gcd(a, b), fraction_gcd(b, a));
}

#[test]
fn fractions_gcd_is_permutation_invariant() {
    let fractions = [
        Ratio::new(40i64, 1),
        Ratio::new(120i64, 1),
        Ratio::new(100i64, 3),
    ];
    let expected = fractions_gcd(&fractions);

    let permutations: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    for order in permutations {
        let permuted: Vec<_> = order.iter().map(|&i| fractions[i]).collect();
        assert_eq!(fractions_gcd(&permuted), expected, "order {order:?}");
    }
}

#[test]
fn likely_int_truth_table() {
    assert!(likely_int(100.0));
    assert!(likely_int(33.0));
    assert!(likely_int(99.99999900000001));
    assert!(likely_int(100.00000000000001));
    assert!(!likely_int(12.345));
    assert!(!likely_int(33.333333));
}

#[test]
fn integer_durations_use_plain_gcd() {
    let tick = durations_gcd(&[120.0, 40.0, 80.0]);
    assert_eq!(tick, Tick::Exact(Ratio::from_integer(40)));
    assert_eq!(tick.as_ms(), 40.0);
}

#[test]
fn exact_multiples_recover_tick_rate() {
    // Durations that are exact multiples of a 40 ms tick must recover
    // exactly 1000/40 fps.
    let durations = [120.0, 40.0, 80.0];
    let total: f64 = 240.0;
    let fps = apparent_fps(&durations, total, 3);
    assert!((fps - 25.0).abs() < 1e-9, "fps was {fps}");
}

#[test]
fn recurring_decimals_recover_rational_tick() {
    // 1000/30 ms and 2000/30 ms serialized as repeating decimals.
    let durations = [33.333333, 66.666667];
    let tick = durations_gcd(&durations);
    match tick {
        Tick::Exact(ratio) => assert_eq!(ratio, Ratio::new(100, 3)),
        Tick::Approximate(v) => panic!("expected exact tick, got approximate {v}"),
    }

    let fps = apparent_fps(&durations, 100.0, 3);
    assert!((fps - 30.0).abs() < 1e-9, "fps was {fps}");
}

#[test]
fn recurring_denominator_six() {
    // Halves are recovered through the ×6 probe.
    let tick = durations_gcd(&[10.0, 12.5]);
    match tick {
        Tick::Exact(ratio) => assert_eq!(ratio, Ratio::new(5, 2)),
        Tick::Approximate(v) => panic!("expected exact tick, got approximate {v}"),
    }
}

#[test]
fn unrecoverable_durations_fall_back_to_minimum() {
    let tick = durations_gcd(&[12.345, 20.0]);
    assert_eq!(tick, Tick::Approximate(12.345));
}

#[test]
fn single_distinct_duration_skips_gcd_search() {
    // 5 frames at a uniform 100 ms: rate follows directly from the count.
    let fps = apparent_fps(&[100.0], 500.0, 5);
    assert!((fps - 10.0).abs() < 1e-9, "fps was {fps}");
}

#[test]
fn degenerate_inputs_yield_zero_rate() {
    assert_eq!(apparent_fps(&[], 100.0, 1), 0.0);
    assert_eq!(apparent_fps(&[100.0], 0.0, 1), 0.0);
}

#[test]
fn rounding_is_half_up() {
    assert_eq!(round_half_up(0.4), 0);
    assert_eq!(round_half_up(0.5), 1);
    assert_eq!(round_half_up(99.999999), 100);
    assert_eq!(round_half_up(440.0), 440);
}
