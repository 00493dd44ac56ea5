//! Metric catalog parsing.
//!
//! The catalog (`values.json`) maps metric ids to metadata; we only need the
//! long display name for the selector. Ids the dashboard cannot chart are
//! dropped here so the selector never offers an unlabelable metric.

use serde_json::Value;

use crate::domain::MetricDescriptor;
use crate::error::AppError;
use crate::transform::labels::supported_metric_ids;

/// Parse `values.json` into the selector list, in dashboard display order.
///
/// Catalog ids outside the label table (e.g. `hosp_admissions`,
/// `icu_admissions`) are dropped: the dashboard cannot chart them.
pub fn parse_metric_catalog(body: &str) -> Result<Vec<MetricDescriptor>, AppError> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| AppError::new(4, format!("Invalid metric catalog JSON: {e}")))?;
    let entries = root
        .as_object()
        .ok_or_else(|| AppError::new(4, "Metric catalog is not a JSON object."))?;

    let mut out = Vec::new();
    for id in supported_metric_ids() {
        let Some(entry) = entries.get(id) else {
            continue;
        };
        let display_name = entry
            .get("name_long")
            .and_then(Value::as_str)
            .unwrap_or(id)
            .to_string();
        out.push(MetricDescriptor {
            id: id.to_string(),
            display_name,
        });
    }

    if out.is_empty() {
        return Err(AppError::new(
            4,
            "Metric catalog contains no supported metrics.",
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_filters_catalog() {
        let raw = r#"{
            "cases": {"name_long": "Cases", "name_short": "Cases"},
            "deaths": {"name_long": "Deaths"},
            "hosp_admissions": {"name_long": "Hospital admissions"},
            "some_future_metric": {"name_long": "Future"}
        }"#;
        let catalog = parse_metric_catalog(raw).unwrap();

        let ids: Vec<&str> = catalog.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["cases", "deaths"]);
        assert_eq!(catalog[0].display_name, "Cases");
    }

    #[test]
    fn empty_catalog_is_an_error() {
        assert!(parse_metric_catalog("{}").is_err());
        assert!(parse_metric_catalog("[]").is_err());
        assert!(parse_metric_catalog("not json").is_err());
    }
}
