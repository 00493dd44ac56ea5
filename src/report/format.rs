//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the transformation core stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use chrono::NaiveDate;

use crate::domain::{AggregationMode, BuiltSeries, Region, ShowConfig};
use crate::transform::labels::{COMPLETENESS_METRICS, format_metric_label};
use crate::transform::TransformError;

/// Chart title: "Cumulative cases in Ontario", "Change in active ICU in
/// Canada", and so on.
pub fn chart_title(
    metric_id: &str,
    region: Region,
    mode: AggregationMode,
) -> Result<String, TransformError> {
    let metric = format_metric_label(metric_id, mode)?;
    Ok(format!("{metric} in {}", region.display_name()))
}

/// Assemble the data note shown under the chart.
///
/// `last_date` is the final reporting date of the fetched series (`None` for
/// an empty series — the note must tolerate that). `completeness_date` is the
/// resolved all-provinces date, when the chart qualifies for one.
pub fn build_data_note(
    metric_id: &str,
    region: Region,
    last_date: Option<NaiveDate>,
    completeness_date: Option<NaiveDate>,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    if COMPLETENESS_METRICS.contains(&metric_id) {
        parts.push("Testing was restricted in late 2021/early 2022.".to_string());
    }

    if region.is_country() && COMPLETENESS_METRICS.contains(&metric_id) {
        match completeness_date {
            Some(date) => parts.push(format!(
                "Canadian data may be incomplete in recent weeks. \
                 All provinces last reported on {date}."
            )),
            None => parts.push(
                "Canadian data may be incomplete in recent weeks \
                 (completeness information unavailable)."
                    .to_string(),
            ),
        }
    } else {
        match last_date {
            Some(date) => parts.push(format!(
                "{} last reported on {date}.",
                region.display_name()
            )),
            None => parts.push(format!(
                "{} has not reported any data.",
                region.display_name()
            )),
        }
    }

    parts.join(" ")
}

/// Format the full run summary printed by `ctc show`.
pub fn format_run_summary(
    config: &ShowConfig,
    built: &BuiltSeries,
    title: &str,
    note: &str,
) -> String {
    let mut out = String::new();

    out.push_str("=== ctc - Canadian COVID-19 trends ===\n");
    out.push_str(&format!("{title}\n"));
    out.push_str(&format!(
        "metric: {} | region: {} | mode: {:?}\n",
        config.metric,
        config.region.code(),
        config.mode,
    ));

    let n = built.primary.points.len();
    let first = built.primary.points.first().map(|(d, _)| *d);
    let last = built.primary.points.last().map(|(d, _)| *d);
    match (first, last) {
        (Some(first), Some(last)) => {
            out.push_str(&format!("points: n={n} | dates=[{first}, {last}]\n"));
        }
        _ => out.push_str("points: n=0\n"),
    }

    for series in built.series() {
        out.push_str(&format!("- {} ({:?})\n", series.label, series.kind));
    }
    if let Some(floor) = built.y_floor {
        out.push_str(&format!("y-axis floor: {floor}\n"));
    }

    out.push_str(&format!("\n{note}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn title_combines_metric_and_region() {
        assert_eq!(
            chart_title("cases", Region::Ontario, AggregationMode::Daily).unwrap(),
            "Daily cases in Ontario"
        );
        assert!(chart_title("bogus", Region::Ontario, AggregationMode::Daily).is_err());
    }

    #[test]
    fn country_note_uses_completeness_date() {
        let note = build_data_note(
            "cases",
            Region::Canada,
            Some(date(2024, 1, 5)),
            Some(date(2024, 1, 2)),
        );
        assert!(note.contains("Testing was restricted"));
        assert!(note.contains("All provinces last reported on 2024-01-02."));
    }

    #[test]
    fn province_note_uses_last_report_date() {
        let note = build_data_note("icu", Region::Quebec, Some(date(2024, 1, 5)), None);
        assert!(!note.contains("Testing was restricted"));
        assert!(note.contains("Quebec last reported on 2024-01-05."));
    }

    #[test]
    fn note_tolerates_missing_dates() {
        let note = build_data_note("cases", Region::Canada, None, None);
        assert!(note.contains("completeness information unavailable"));

        let note = build_data_note("icu", Region::Yukon, None, None);
        assert!(note.contains("Yukon has not reported any data."));
    }
}
