//! Completeness feed parsing.
//!
//! The feed is a JSON object keyed by ISO date, each value listing the
//! regions (`pt` codes) that had reported by that date. Parsing yields the
//! ordered records consumed by `transform::resolve_completeness_date`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::Region;
use crate::error::AppError;
use crate::transform::CompletenessRecord;

#[derive(Debug, Deserialize)]
struct WireEntry {
    pt: Vec<String>,
}

/// Parse a `{metric}_can_completeness.json` body into date-ordered records.
///
/// Unrecognized region codes are skipped: the resolver only cares about the
/// required provinces, and a new upstream code must not poison the chart.
pub fn parse_completeness(body: &str) -> Result<Vec<CompletenessRecord>, AppError> {
    // BTreeMap keyed by parsed date gives ascending order regardless of the
    // feed's own key ordering.
    let entries: BTreeMap<String, WireEntry> = serde_json::from_str(body)
        .map_err(|e| AppError::new(4, format!("Invalid completeness JSON: {e}")))?;

    let mut ordered: BTreeMap<NaiveDate, WireEntry> = BTreeMap::new();
    for (date, entry) in entries {
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| AppError::new(4, format!("Invalid completeness date '{date}': {e}")))?;
        ordered.insert(date, entry);
    }

    Ok(ordered
        .into_iter()
        .map(|(date, entry)| CompletenessRecord {
            date,
            reported: entry
                .pt
                .iter()
                .filter_map(|code| Region::from_code(code))
                .collect(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::resolve_completeness_date;

    #[test]
    fn parses_feed_in_date_order() {
        let raw = r#"{
            "2024-01-02": {"pt": ["AB", "BC", "MB", "NB", "NL", "NS", "ON", "PE", "QC", "SK"]},
            "2024-01-01": {"pt": ["AB", "BC"]}
        }"#;
        let records = parse_completeness(raw).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(records[0].reported.len(), 2);

        let date = resolve_completeness_date(&records, &Region::PROVINCES).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn unknown_codes_are_skipped() {
        let raw = r#"{"2024-01-01": {"pt": ["AB", "ZZ"]}}"#;
        let records = parse_completeness(raw).unwrap();
        assert_eq!(records[0].reported.len(), 1);
        assert!(records[0].reported.contains(&Region::Alberta));
    }

    #[test]
    fn malformed_feed_is_an_error() {
        assert!(parse_completeness("[]").is_err());
        assert!(parse_completeness(r#"{"not-a-date": {"pt": []}}"#).is_err());
    }
}
