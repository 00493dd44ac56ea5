//! Series building: raw per-date records → plot-ready derived series.
//!
//! Cumulative mode emits one line series; daily mode emits raw bars plus a
//! smoothed line. The output also carries the value-axis floor policy so
//! renderers don't need their own metric knowledge.

use crate::domain::{AggregationMode, BuiltSeries, DerivedSeries, RawPoint, SeriesKind};
use crate::transform::labels::{
    VACCINE_COVERAGE_METRICS, Y_FLOOR_METRICS, format_metric_label,
};
use crate::transform::smooth::{rolling_average, round_tenths, round_whole};
use crate::transform::TransformError;

/// Default smoothing window for the daily series, in days.
pub const DEFAULT_WINDOW: usize = 7;

/// Build the derived series for a chart.
///
/// Fails with `UnknownMetric` for ids outside the label table and
/// `EmptySeries` for a zero-length input; never returns misaligned or
/// NaN-bearing series for well-formed input.
pub fn build_series(
    raw: &[RawPoint],
    metric_id: &str,
    mode: AggregationMode,
    window: usize,
) -> Result<BuiltSeries, TransformError> {
    // Resolve the label first so an unknown metric is reported as such even
    // for an empty input.
    let label = format_metric_label(metric_id, mode)?;
    if raw.is_empty() {
        return Err(TransformError::EmptySeries);
    }

    let y_floor = if Y_FLOOR_METRICS.contains(&metric_id) {
        // Negative counts are always reporting artifacts for these metrics.
        Some(0.0)
    } else {
        None
    };

    match mode {
        AggregationMode::Cumulative => Ok(BuiltSeries {
            primary: DerivedSeries {
                label,
                kind: SeriesKind::Cumulative,
                points: raw.iter().map(|p| (p.date, p.cumulative)).collect(),
            },
            secondary: None,
            y_floor,
        }),
        AggregationMode::Daily => {
            let daily: Vec<f64> = raw.iter().map(|p| p.daily).collect();
            let round: fn(f64) -> f64 = if VACCINE_COVERAGE_METRICS.contains(&metric_id) {
                round_tenths
            } else {
                round_whole
            };
            let smoothed: Vec<(chrono::NaiveDate, f64)> = raw
                .iter()
                .map(|p| p.date)
                .zip(rolling_average(&daily, window))
                .map(|(date, v)| (date, round(v)))
                .collect();

            Ok(BuiltSeries {
                primary: DerivedSeries {
                    label,
                    kind: SeriesKind::DailyRaw,
                    points: raw.iter().map(|p| (p.date, p.daily)).collect(),
                },
                secondary: Some(DerivedSeries {
                    label: format!("{window}-day average"),
                    kind: SeriesKind::DailySmoothed,
                    points: smoothed,
                }),
                y_floor,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn points(values: &[(f64, f64)]) -> Vec<RawPoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &(cumulative, daily))| RawPoint {
                date: start + chrono::Days::new(i as u64),
                cumulative,
                daily,
            })
            .collect()
    }

    #[test]
    fn cumulative_mode_emits_one_series() {
        let raw = points(&[(10.0, 10.0), (15.0, 5.0), (18.0, 3.0)]);
        let built = build_series(&raw, "cases", AggregationMode::Cumulative, 7).unwrap();

        assert!(built.secondary.is_none());
        assert_eq!(built.primary.kind, SeriesKind::Cumulative);
        assert_eq!(built.primary.label, "Cumulative cases");
        assert_eq!(built.primary.points.len(), raw.len());
        assert_eq!(built.primary.points[1].1, 15.0);
    }

    #[test]
    fn daily_mode_emits_raw_and_smoothed() {
        let raw = points(&[(10.0, 10.0), (15.0, 5.0), (18.0, 3.0)]);
        let built = build_series(&raw, "cases", AggregationMode::Daily, 7).unwrap();

        assert_eq!(built.primary.kind, SeriesKind::DailyRaw);
        assert_eq!(built.primary.label, "Daily cases");

        let smoothed = built.secondary.expect("daily mode emits a smoothed series");
        assert_eq!(smoothed.kind, SeriesKind::DailySmoothed);
        assert_eq!(smoothed.label, "7-day average");
        assert_eq!(smoothed.points.len(), raw.len());
        // Dates stay aligned with the raw series.
        for (a, b) in built.primary.points.iter().zip(&smoothed.points) {
            assert_eq!(a.0, b.0);
        }
        // Count metric: smoothed values are whole numbers.
        // avg(10, 5) = 7.5 rounds to 8.
        assert_eq!(smoothed.points[1].1, 8.0);
    }

    #[test]
    fn coverage_metric_smoothed_to_tenths() {
        let raw = points(&[(50.0, 0.13), (50.2, 0.21), (50.3, 0.08)]);
        let built =
            build_series(&raw, "vaccine_coverage_dose_1", AggregationMode::Daily, 7).unwrap();

        let smoothed = built.secondary.unwrap();
        for (_, v) in &smoothed.points {
            let scaled = v * 10.0;
            assert!(
                (scaled - scaled.round()).abs() < 1e-9,
                "expected multiple of 0.1, got {v}"
            );
        }
    }

    #[test]
    fn y_floor_policy() {
        let raw = points(&[(1.0, 1.0)]);
        let deaths = build_series(&raw, "deaths", AggregationMode::Daily, 7).unwrap();
        assert_eq!(deaths.y_floor, Some(0.0));

        let hosp = build_series(&raw, "hospitalizations", AggregationMode::Daily, 7).unwrap();
        assert_eq!(hosp.y_floor, None);
    }

    #[test]
    fn empty_input_is_typed_error() {
        let err = build_series(&[], "cases", AggregationMode::Daily, 7).unwrap_err();
        assert_eq!(err, TransformError::EmptySeries);
    }

    #[test]
    fn unknown_metric_reported_before_empty() {
        let err = build_series(&[], "bogus", AggregationMode::Daily, 7).unwrap_err();
        assert_eq!(err, TransformError::UnknownMetric("bogus".to_string()));
    }
}
