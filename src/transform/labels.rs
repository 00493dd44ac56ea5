//! Metric and region label formatting.
//!
//! The tables here are fixed reference data, independent of the upstream
//! metric catalog. A lookup miss is a typed error, never a raw id leaking
//! into a chart title.

use crate::domain::{AggregationMode, Region};
use crate::transform::TransformError;

/// Metric id → base display phrase.
const METRIC_NAMES: &[(&str, &str)] = &[
    ("cases", "cases"),
    ("deaths", "deaths"),
    ("hospitalizations", "hospitalizations"),
    ("icu", "ICU"),
    ("tests_completed", "tests completed"),
    ("vaccine_coverage_dose_1", "vaccine coverage (dose 1)"),
    ("vaccine_coverage_dose_2", "vaccine coverage (dose 2)"),
    ("vaccine_coverage_dose_3", "vaccine coverage (dose 3)"),
    ("vaccine_coverage_dose_4", "vaccine coverage (dose 4)"),
    (
        "vaccine_administration_total_doses",
        "vaccine administration (total doses)",
    ),
    ("vaccine_administration_dose_1", "vaccine administration (dose 1)"),
    ("vaccine_administration_dose_2", "vaccine administration (dose 2)"),
    ("vaccine_administration_dose_3", "vaccine administration (dose 3)"),
    ("vaccine_administration_dose_4", "vaccine administration (dose 4)"),
];

/// Point-in-time occupancy metrics: "active", not "cumulative".
pub const ACTIVE_METRICS: &[&str] = &["hospitalizations", "icu"];

/// Coverage is already a cumulative percentage, so its daily delta is a
/// "change", and the smoothed series is rounded to tenths.
pub const VACCINE_COVERAGE_METRICS: &[&str] = &[
    "vaccine_coverage_dose_1",
    "vaccine_coverage_dose_2",
    "vaccine_coverage_dose_3",
    "vaccine_coverage_dose_4",
];

/// Metrics whose country-level charts carry the completeness annotation.
pub const COMPLETENESS_METRICS: &[&str] = &["cases", "deaths", "tests_completed"];

/// Metrics whose daily deltas can never meaningfully go negative.
pub const Y_FLOOR_METRICS: &[&str] = &["cases", "deaths"];

/// Resolve a metric id to its base display phrase.
pub fn metric_base_name(metric_id: &str) -> Result<&'static str, TransformError> {
    METRIC_NAMES
        .iter()
        .find(|(id, _)| *id == metric_id)
        .map(|(_, name)| *name)
        .ok_or_else(|| TransformError::UnknownMetric(metric_id.to_string()))
}

/// Whether the core knows how to label (and therefore chart) this metric.
pub fn is_supported_metric(metric_id: &str) -> bool {
    METRIC_NAMES.iter().any(|(id, _)| *id == metric_id)
}

/// All supported metric ids, in dashboard display order.
pub fn supported_metric_ids() -> impl Iterator<Item = &'static str> {
    METRIC_NAMES.iter().map(|(id, _)| *id)
}

/// Format the full series/title label for a metric in a given mode.
///
/// `cases`/Cumulative → "Cumulative cases", `icu`/Daily → "Change in active
/// ICU", coverage metrics in daily mode → "Change in ...", and so on.
pub fn format_metric_label(
    metric_id: &str,
    mode: AggregationMode,
) -> Result<String, TransformError> {
    let base = metric_base_name(metric_id)?;
    let label = match mode {
        AggregationMode::Cumulative => {
            if ACTIVE_METRICS.contains(&metric_id) {
                format!("Active {base}")
            } else {
                format!("Cumulative {base}")
            }
        }
        AggregationMode::Daily => {
            if ACTIVE_METRICS.contains(&metric_id) {
                format!("Change in active {base}")
            } else if VACCINE_COVERAGE_METRICS.contains(&metric_id) {
                format!("Change in {base}")
            } else {
                format!("Daily {base}")
            }
        }
    };
    Ok(label)
}

/// Resolve a region wire code to its display name.
pub fn format_region_label(code: &str) -> Result<&'static str, TransformError> {
    Region::from_code(code)
        .map(Region::display_name)
        .ok_or_else(|| TransformError::UnknownRegion(code.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cumulative_labels() {
        assert_eq!(
            format_metric_label("cases", AggregationMode::Cumulative).unwrap(),
            "Cumulative cases"
        );
        assert_eq!(
            format_metric_label("icu", AggregationMode::Cumulative).unwrap(),
            "Active ICU"
        );
        assert_eq!(
            format_metric_label("hospitalizations", AggregationMode::Cumulative).unwrap(),
            "Active hospitalizations"
        );
    }

    #[test]
    fn daily_labels() {
        assert_eq!(
            format_metric_label("cases", AggregationMode::Daily).unwrap(),
            "Daily cases"
        );
        assert_eq!(
            format_metric_label("icu", AggregationMode::Daily).unwrap(),
            "Change in active ICU"
        );
        assert_eq!(
            format_metric_label("vaccine_coverage_dose_1", AggregationMode::Daily).unwrap(),
            "Change in vaccine coverage (dose 1)"
        );
    }

    #[test]
    fn unknown_metric_is_typed_error() {
        let err = format_metric_label("not_a_real_metric", AggregationMode::Cumulative)
            .unwrap_err();
        assert_eq!(
            err,
            TransformError::UnknownMetric("not_a_real_metric".to_string())
        );
    }

    #[test]
    fn region_labels() {
        assert_eq!(format_region_label("ON").unwrap(), "Ontario");
        assert_eq!(format_region_label("CAN").unwrap(), "Canada");
        assert_eq!(
            format_region_label("ZZ").unwrap_err(),
            TransformError::UnknownRegion("ZZ".to_string())
        );
    }
}
