//! Rational duration algebra.
//!
//! Animated containers frequently store a *different* duration for every
//! frame (variable frame delay), so there is no single authoritative frame
//! rate to read. This module recovers an **apparent** frame rate from a set
//! of observed per-frame durations by computing the largest rational
//! millisecond value that evenly divides every observation — the *tick
//! duration* — using exact fraction arithmetic instead of floating-point
//! division, which would drift.
//!
//! # Example
//!
//! ```
//! use frameprobe::algebra::{durations_gcd, Tick};
//!
//! // Frames alternating between 100 ms and 150 ms share a 50 ms tick.
//! let tick = durations_gcd(&[100.0, 150.0]);
//! assert_eq!(tick.as_ms(), 50.0);
//! ```

use num_integer::{gcd, lcm};
use num_rational::Ratio;

/// Denominators probed when recovering rationals that manifest as recurring
/// decimals in milliseconds (e.g. 1000/30 ms ≈ 33.333…).
///
/// This set is a documented heuristic carried over from the upstream
/// derivation; it is not a complete rational-reconstruction algorithm and is
/// deliberately not generalized.
const RECURRING_DENOMINATORS: [i64; 6] = [3, 6, 7, 9, 11, 13];

/// The greatest common divisor of a duration sample set.
///
/// Produced by [`durations_gcd`]. A [`Tick::Exact`] value is a true
/// rational divisor of every sample; [`Tick::Approximate`] is the best-effort
/// fallback (the minimum observed duration) when no exact divisor could be
/// recovered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Exact rational tick in milliseconds.
    Exact(Ratio<i64>),
    /// Best-effort tick in milliseconds (minimum observed duration).
    Approximate(f64),
}

impl Tick {
    /// The tick value in milliseconds as a float.
    pub fn as_ms(&self) -> f64 {
        match self {
            Tick::Exact(ratio) => *ratio.numer() as f64 / *ratio.denom() as f64,
            Tick::Approximate(value) => *value,
        }
    }
}

/// Round half-up to the nearest integer.
///
/// Matches decimal "round half away from zero" behaviour for the
/// non-negative domain this crate operates in (durations and timestamps are
/// never negative).
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// GCD of two exact rationals.
///
/// Defined as `gcd(numerators) / lcm(denominators)` — the rational-number
/// generalization of the integer GCD. The operation is associative and
/// commutative, so folding a list yields the same result for any input
/// order.
///
/// # Example
///
/// ```
/// use num_rational::Ratio;
/// use frameprobe::algebra::fraction_gcd;
///
/// let third = Ratio::new(1i64, 3);
/// let half = Ratio::new(1i64, 2);
/// assert_eq!(fraction_gcd(third, half), Ratio::new(1, 6));
/// ```
pub fn fraction_gcd(x: Ratio<i64>, y: Ratio<i64>) -> Ratio<i64> {
    Ratio::new(gcd(*x.numer(), *y.numer()), lcm(*x.denom(), *y.denom()))
}

/// Left fold of [`fraction_gcd`] over a nonempty slice.
///
/// # Panics
///
/// Panics if `fractions` is empty.
pub fn fractions_gcd(fractions: &[Ratio<i64>]) -> Ratio<i64> {
    assert!(
        !fractions.is_empty(),
        "fractions_gcd requires at least one fraction"
    );
    fractions[1..]
        .iter()
        .fold(fractions[0], |acc, &f| fraction_gcd(acc, f))
}

/// First five fractional decimal digits of `value`, zero-padded.
fn five_dec_place(value: f64) -> [u8; 5] {
    let rendered = value.to_string();
    let mut digits = [b'0'; 5];
    if let Some((_, frac)) = rendered.split_once('.') {
        for (slot, ch) in digits.iter_mut().zip(frac.bytes()) {
            *slot = ch;
        }
    }
    digits
}

/// Whether a floating value should be treated as an integer.
///
/// Upstream serialization frequently rounds exact rational durations into
/// floats (a duration meant to be `100` stored as `99.999999`). A value
/// passes when its first five fractional digits are `00000` or `99999`.
///
/// # Example
///
/// ```
/// use frameprobe::algebra::likely_int;
///
/// assert!(likely_int(100.0));
/// assert!(likely_int(99.99999900000001));
/// assert!(!likely_int(12.345));
/// ```
pub fn likely_int(value: f64) -> bool {
    if value.fract() == 0.0 {
        return true;
    }
    matches!(&five_dec_place(value), b"00000" | b"99999")
}

/// Reduce a nonempty set of observed per-frame durations (milliseconds) to
/// their tick duration.
///
/// Reduction policy, in order:
///
/// 1. Every sample integral (exactly, or within [`likely_int`] rounding
///    noise) — plain integer GCD over the rounded samples.
/// 2. Probe each denominator in [`RECURRING_DENOMINATORS`]: if multiplying
///    every sample by the candidate makes all of them [`likely_int`], the
///    tick is `gcd(round(sample * denominator)) / denominator`. This
///    recovers rational frame rates that appear as repeating decimals.
/// 3. Otherwise fall back to the minimum observed duration (best-effort,
///    not an exact divisor).
///
/// # Panics
///
/// Panics if `durations` is empty.
pub fn durations_gcd(durations: &[f64]) -> Tick {
    assert!(!durations.is_empty(), "durations_gcd requires samples");

    if durations.iter().all(|d| d.fract() == 0.0)
        || durations.iter().all(|&d| likely_int(d))
    {
        let g = durations
            .iter()
            .map(|&d| round_half_up(d))
            .fold(0, gcd);
        return Tick::Exact(Ratio::from_integer(g));
    }

    for &denominator in &RECURRING_DENOMINATORS {
        if durations
            .iter()
            .all(|&d| likely_int(d * denominator as f64))
        {
            let g = durations
                .iter()
                .map(|&d| round_half_up(d * denominator as f64))
                .fold(0, gcd);
            return Tick::Exact(Ratio::new(g, denominator));
        }
    }

    Tick::Approximate(durations.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Infer an apparent frame rate from per-frame timing data.
///
/// `distinct` is the deduplicated set of nonzero durations observed,
/// `total_ms` the accumulated duration over all frames, and `frames` the
/// real frame count. When only one distinct duration was observed the GCD
/// search is skipped and the rate follows directly from `frames /
/// total_ms`; otherwise the tick duration determines how many *apparent*
/// frames the total spans.
pub fn apparent_fps(distinct: &[f64], total_ms: f64, frames: u64) -> f64 {
    if total_ms <= 0.0 || distinct.is_empty() {
        return 0.0;
    }
    if distinct.len() == 1 {
        return frames as f64 / total_ms * 1000.0;
    }
    let tick_ms = durations_gcd(distinct).as_ms();
    if tick_ms <= 0.0 {
        return 0.0;
    }
    let frames_apparent = total_ms / tick_ms;
    frames_apparent / total_ms * 1000.0
}
