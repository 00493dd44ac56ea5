//! Completeness-date resolution.
//!
//! Country-level counts are only trustworthy up to the most recent date on
//! which every province had reported. This module finds that date from the
//! per-metric completeness feed so the chart can carry a marker line.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::Region;
use crate::transform::TransformError;
use crate::transform::labels::COMPLETENESS_METRICS;

/// One completeness record: a date and the set of regions that had reported
/// by that date.
#[derive(Debug, Clone)]
pub struct CompletenessRecord {
    pub date: NaiveDate,
    pub reported: HashSet<Region>,
}

/// Find the most recent date on which every required region had reported.
///
/// `records` must be ordered by ascending date (the feed is). Fails with
/// `NoCompleteDate` when no record's region set covers `required` — an empty
/// or malformed feed is an explicit error here, never an index panic.
pub fn resolve_completeness_date(
    records: &[CompletenessRecord],
    required: &[Region],
) -> Result<NaiveDate, TransformError> {
    records
        .iter()
        .rev()
        .find(|r| required.iter().all(|region| r.reported.contains(region)))
        .map(|r| r.date)
        .ok_or(TransformError::NoCompleteDate)
}

/// Whether a chart for this (metric, region) pair carries the completeness
/// annotation: country-level counts for the reported-by-province metrics.
pub fn annotation_applies(metric_id: &str, region: Region) -> bool {
    region.is_country() && COMPLETENESS_METRICS.contains(&metric_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: (i32, u32, u32), codes: &[&str]) -> CompletenessRecord {
        CompletenessRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            reported: codes
                .iter()
                .map(|c| Region::from_code(c).unwrap())
                .collect(),
        }
    }

    const ALL_PROVINCES: [&str; 10] =
        ["AB", "BC", "MB", "NB", "NL", "NS", "ON", "PE", "QC", "SK"];

    #[test]
    fn returns_last_fully_reported_date() {
        let records = vec![
            record((2024, 1, 1), &["AB", "BC"]),
            record((2024, 1, 2), &ALL_PROVINCES),
        ];
        let date = resolve_completeness_date(&records, &Region::PROVINCES).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn superset_qualifies() {
        // Territories reporting on top of the provinces must not disqualify.
        let mut codes: Vec<&str> = ALL_PROVINCES.to_vec();
        codes.push("YT");
        let records = vec![record((2024, 3, 5), &codes)];
        let date = resolve_completeness_date(&records, &Region::PROVINCES).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn skips_later_incomplete_dates() {
        let records = vec![
            record((2024, 1, 1), &ALL_PROVINCES),
            record((2024, 1, 2), &["AB", "BC", "ON"]),
        ];
        let date = resolve_completeness_date(&records, &Region::PROVINCES).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn no_qualifying_date_is_typed_error() {
        let records = vec![record((2024, 1, 1), &["AB", "BC"])];
        assert_eq!(
            resolve_completeness_date(&records, &Region::PROVINCES).unwrap_err(),
            TransformError::NoCompleteDate
        );
        assert_eq!(
            resolve_completeness_date(&[], &Region::PROVINCES).unwrap_err(),
            TransformError::NoCompleteDate
        );
    }

    #[test]
    fn annotation_scope() {
        assert!(annotation_applies("cases", Region::Canada));
        assert!(annotation_applies("tests_completed", Region::Canada));
        assert!(!annotation_applies("cases", Region::Ontario));
        assert!(!annotation_applies("icu", Region::Canada));
    }
}
