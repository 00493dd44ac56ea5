//! OpenCovid / CovidTimelineCanada integration.
//!
//! Time series come from the OpenCovid REST API; the metric catalog and the
//! completeness feed are static JSON files in the CovidTimelineCanada
//! repository. All requests are blocking and issued from the calling thread;
//! retry policy is deliberately out of scope.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::HashMap;

use crate::data::{catalog, completeness};
use crate::domain::{MetricDescriptor, RawPoint, Region};
use crate::error::AppError;
use crate::transform::CompletenessRecord;

const TIMESERIES_URL: &str = "https://api.opencovid.ca/timeseries";
const DATA_REPO_URL: &str =
    "https://raw.githubusercontent.com/ccodwg/CovidTimelineCanada/main";

/// Blocking client for all upstream endpoints.
pub struct CovidDataClient {
    client: Client,
}

impl Default for CovidDataClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CovidDataClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetch the raw time series for a (metric, region) pair, ordered by
    /// ascending date.
    pub fn fetch_timeseries(
        &self,
        metric: &str,
        region: Region,
    ) -> Result<Vec<RawPoint>, AppError> {
        let mut req = self
            .client
            .get(TIMESERIES_URL)
            .query(&[("stat", metric)]);

        // Country-level data lives under a different geo level than the
        // provinces/territories.
        req = if region.is_country() {
            req.query(&[("geo", "can")])
        } else {
            req.query(&[("geo", "pt"), ("loc", region.code())])
        };

        let resp = req
            .send()
            .map_err(|e| AppError::new(4, format!("Timeseries request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("Timeseries request failed with status {}.", resp.status()),
            ));
        }

        let body: TimeseriesResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse timeseries response: {e}")))?;

        parse_timeseries(body, metric)
    }

    /// Fetch the metric catalog used to populate the metric selector.
    pub fn fetch_metric_catalog(&self) -> Result<Vec<MetricDescriptor>, AppError> {
        let url = format!("{DATA_REPO_URL}/docs/values/values.json");
        let body = self.fetch_text(&url, "metric catalog")?;
        catalog::parse_metric_catalog(&body)
    }

    /// Fetch the completeness feed for a metric, ordered by ascending date.
    pub fn fetch_completeness(
        &self,
        metric: &str,
    ) -> Result<Vec<CompletenessRecord>, AppError> {
        let url = format!("{DATA_REPO_URL}/data/can/{metric}_can_completeness.json");
        let body = self.fetch_text(&url, "completeness feed")?;
        completeness::parse_completeness(&body)
    }

    fn fetch_text(&self, url: &str, what: &str) -> Result<String, AppError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::new(4, format!("Failed to fetch {what}: {e}")))?;
        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("Failed to fetch {what}: status {}.", resp.status()),
            ));
        }
        resp.text()
            .map_err(|e| AppError::new(4, format!("Failed to read {what}: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    data: HashMap<String, Vec<Observation>>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    value: f64,
    value_daily: f64,
}

fn parse_timeseries(
    mut body: TimeseriesResponse,
    metric: &str,
) -> Result<Vec<RawPoint>, AppError> {
    let observations = body
        .data
        .remove(metric)
        .ok_or_else(|| AppError::new(4, format!("No '{metric}' data in timeseries response.")))?;

    let mut points = Vec::with_capacity(observations.len());
    for obs in observations {
        let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d")
            .map_err(|e| AppError::new(4, format!("Invalid timeseries date '{}': {e}", obs.date)))?;
        points.push(RawPoint {
            date,
            cumulative: obs.value,
            daily: obs.value_daily,
        });
    }

    // The API serves ascending dates; sort anyway so the invariant holds even
    // if the upstream ordering changes.
    points.sort_by_key(|p| p.date);
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_timeseries_payload() {
        let raw = r#"{
            "data": {
                "cases": [
                    {"date": "2024-01-02", "value": 15, "value_daily": 5, "name": "cases", "region": "ON"},
                    {"date": "2024-01-01", "value": 10, "value_daily": 10, "name": "cases", "region": "ON"}
                ]
            }
        }"#;
        let body: TimeseriesResponse = serde_json::from_str(raw).unwrap();
        let points = parse_timeseries(body, "cases").unwrap();

        assert_eq!(points.len(), 2);
        // Sorted ascending regardless of payload order.
        assert_eq!(
            points[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(points[0].cumulative, 10.0);
        assert_eq!(points[1].daily, 5.0);
    }

    #[test]
    fn missing_metric_key_is_an_error() {
        let raw = r#"{"data": {"deaths": []}}"#;
        let body: TimeseriesResponse = serde_json::from_str(raw).unwrap();
        assert!(parse_timeseries(body, "cases").is_err());
    }

    #[test]
    fn malformed_date_is_an_error() {
        let raw = r#"{"data": {"cases": [{"date": "01/02/2024", "value": 1, "value_daily": 1}]}}"#;
        let body: TimeseriesResponse = serde_json::from_str(raw).unwrap();
        assert!(parse_timeseries(body, "cases").is_err());
    }
}
