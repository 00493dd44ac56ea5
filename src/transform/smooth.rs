//! Causal rolling average.
//!
//! Used to smooth reporting noise in daily deltas. The window grows at the
//! start of the series instead of padding or emitting NaN, so the output
//! always has the same length as the input and `out[0] == input[0]`.

/// Average the trailing `min(i + 1, window)` values ending at each index.
///
/// No look-ahead, no padding. Negative or corrected values participate in
/// the sum as-is. An empty input yields an empty output. `window` is clamped
/// to at least 1.
pub fn rolling_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let n = (i + 1).min(window);
        // Re-sum each window rather than keeping a running total: windows are
        // tiny (7 by default) and this avoids accumulated rounding drift over
        // multi-year series.
        let sum: f64 = values[i + 1 - n..=i].iter().sum();
        out.push(sum / n as f64);
    }
    out
}

/// Round to the nearest tenth (percentage-like metrics).
pub fn round_tenths(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Round to the nearest whole number (count metrics).
pub fn round_whole(v: f64) -> f64 {
    v.round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_length_and_first_element() {
        let s = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        for w in 1..=10 {
            let out = rolling_average(&s, w);
            assert_eq!(out.len(), s.len());
            assert_eq!(out[0], s[0]);
        }
    }

    #[test]
    fn window_one_is_identity() {
        let s = [3.0, -1.0, 4.0, 0.0, 5.5];
        assert_eq!(rolling_average(&s, 1), s.to_vec());
    }

    #[test]
    fn constant_series_is_fixed_point() {
        let s = [7.0; 20];
        for w in [1, 3, 7, 30] {
            for v in rolling_average(&s, w) {
                assert!((v - 7.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn growing_window_at_start() {
        // [10, 20, 30, 40] with window 3:
        // i=0 -> 10, i=1 -> 15, i=2 -> 20, i=3 -> 30
        let out = rolling_average(&[10.0, 20.0, 30.0, 40.0], 3);
        assert_eq!(out, vec![10.0, 15.0, 20.0, 30.0]);
    }

    #[test]
    fn negative_values_participate() {
        // Data corrections show up as negative deltas; they are not filtered.
        let out = rolling_average(&[4.0, -2.0], 7);
        assert_eq!(out, vec![4.0, 1.0]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(rolling_average(&[], 7).is_empty());
    }

    #[test]
    fn no_nan_for_well_formed_input() {
        let s = [0.0, 0.0, 0.0, 1.0, -1.0];
        for v in rolling_average(&s, 7) {
            assert!(v.is_finite());
        }
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round_tenths(0.24999), 0.2);
        assert_eq!(round_tenths(0.25), 0.3);
        assert_eq!(round_whole(12.5), 13.0);
        assert_eq!(round_whole(-1.2), -1.0);
    }
}
