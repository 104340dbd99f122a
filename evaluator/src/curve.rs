//! Stop bracketing and interpolation-factor math for `curve`.
//!
//! Stops are assumed sorted ascending (the registry's `curve` compile step
//! is responsible for checking that before ever calling [`bracket`]).
//! Finding the bracket is a binary search, not a linear scan, since a style
//! can carry dozens of stops and `curve` is evaluated per feature.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interpolation {
    Step,
    Linear,
    /// Exponential with the given base; a base of `1.0` degenerates to
    /// linear (the `b - 1` denominator term vanishes).
    Exponential(f64),
}

/// Find the pair of stop indices bracketing `input`. Clamps to the first or
/// last stop when `input` falls outside the range; returns `(i, i)` (no
/// interpolation needed) whenever `input` lands exactly on a stop or is
/// clamped.
pub fn bracket(stops: &[f64], input: f64) -> (usize, usize) {
    assert!(!stops.is_empty(), "curve must have at least one stop");
    if input <= stops[0] {
        return (0, 0);
    }
    let last = stops.len() - 1;
    if input >= stops[last] {
        return (last, last);
    }
    let mut lo = 0;
    let mut hi = last;
    while lo + 1 < hi {
        let mid = (lo + hi) / 2;
        if stops[mid] <= input {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    if stops[lo] == input { (lo, lo) } else { (lo, hi) }
}

/// The interpolation factor in `[0, 1]` between `lower` and `upper` for
/// `input`. Only meaningful when `lower != upper`; callers short-circuit on
/// an exact bracket before reaching here.
pub fn factor(kind: Interpolation, input: f64, lower: f64, upper: f64) -> f64 {
    match kind {
        Interpolation::Step => 0.0,
        Interpolation::Linear => (input - lower) / (upper - lower),
        Interpolation::Exponential(base) => {
            if (base - 1.0).abs() < f64::EPSILON {
                (input - lower) / (upper - lower)
            } else {
                (base.powf(input - lower) - 1.0) / (base.powf(upper - lower) - 1.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_below_first_and_above_last() {
        let stops = [0.0, 5.0, 10.0];
        assert_eq!(bracket(&stops, -1.0), (0, 0));
        assert_eq!(bracket(&stops, 11.0), (2, 2));
    }

    #[test]
    fn lands_exactly_on_a_stop() {
        let stops = [0.0, 5.0, 10.0];
        assert_eq!(bracket(&stops, 5.0), (1, 1));
    }

    #[test]
    fn brackets_between_two_stops() {
        let stops = [0.0, 5.0, 10.0];
        assert_eq!(bracket(&stops, 7.0), (1, 2));
    }

    #[test]
    fn brackets_many_stops_via_binary_search() {
        let stops: Vec<f64> = (0..100).map(|n| n as f64).collect();
        assert_eq!(bracket(&stops, 62.5), (62, 63));
    }

    #[test]
    fn linear_factor_is_proportional() {
        let f = factor(Interpolation::Linear, 7.5, 5.0, 10.0);
        assert!((f - 0.5).abs() < 1e-9);
    }

    #[test]
    fn exponential_factor_matches_known_value() {
        // base 2, input exactly midway in exponent-space.
        let f = factor(Interpolation::Exponential(2.0), 1.0, 0.0, 2.0);
        let expected = (2f64.powf(1.0) - 1.0) / (2f64.powf(2.0) - 1.0);
        assert!((f - expected).abs() < 1e-9);
    }

    #[test]
    fn exponential_base_one_degenerates_to_linear() {
        let a = factor(Interpolation::Exponential(1.0), 7.5, 5.0, 10.0);
        let b = factor(Interpolation::Linear, 7.5, 5.0, 10.0);
        assert!((a - b).abs() < 1e-9);
    }
}
