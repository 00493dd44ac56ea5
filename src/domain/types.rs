//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during series building
//! - exported to JSON/CSV
//! - rendered by either the ASCII plot or the TUI chart

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Canada or one of its thirteen provinces/territories.
///
/// The wire code (e.g. `ON`) is what the upstream API and the completeness
/// feed use; `display_name()` is what charts and notes show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Region {
    #[value(name = "CAN")]
    #[serde(rename = "CAN")]
    Canada,
    #[value(name = "AB")]
    #[serde(rename = "AB")]
    Alberta,
    #[value(name = "BC")]
    #[serde(rename = "BC")]
    BritishColumbia,
    #[value(name = "MB")]
    #[serde(rename = "MB")]
    Manitoba,
    #[value(name = "NB")]
    #[serde(rename = "NB")]
    NewBrunswick,
    #[value(name = "NL")]
    #[serde(rename = "NL")]
    NewfoundlandAndLabrador,
    #[value(name = "NS")]
    #[serde(rename = "NS")]
    NovaScotia,
    #[value(name = "NT")]
    #[serde(rename = "NT")]
    NorthwestTerritories,
    #[value(name = "NU")]
    #[serde(rename = "NU")]
    Nunavut,
    #[value(name = "ON")]
    #[serde(rename = "ON")]
    Ontario,
    #[value(name = "PE")]
    #[serde(rename = "PE")]
    PrinceEdwardIsland,
    #[value(name = "QC")]
    #[serde(rename = "QC")]
    Quebec,
    #[value(name = "SK")]
    #[serde(rename = "SK")]
    Saskatchewan,
    #[value(name = "YT")]
    #[serde(rename = "YT")]
    Yukon,
}

impl Region {
    /// Every region, in the order the dashboard lists them.
    pub const ALL: [Region; 14] = [
        Region::Canada,
        Region::Alberta,
        Region::BritishColumbia,
        Region::Manitoba,
        Region::NewBrunswick,
        Region::NewfoundlandAndLabrador,
        Region::NovaScotia,
        Region::NorthwestTerritories,
        Region::Nunavut,
        Region::Ontario,
        Region::PrinceEdwardIsland,
        Region::Quebec,
        Region::Saskatchewan,
        Region::Yukon,
    ];

    /// The ten provinces (territories excluded) whose reports gate the
    /// country-level completeness annotation.
    pub const PROVINCES: [Region; 10] = [
        Region::Alberta,
        Region::BritishColumbia,
        Region::Manitoba,
        Region::NewBrunswick,
        Region::NewfoundlandAndLabrador,
        Region::NovaScotia,
        Region::Ontario,
        Region::PrinceEdwardIsland,
        Region::Quebec,
        Region::Saskatchewan,
    ];

    /// Two/three-letter wire code used by the upstream API.
    pub fn code(self) -> &'static str {
        match self {
            Region::Canada => "CAN",
            Region::Alberta => "AB",
            Region::BritishColumbia => "BC",
            Region::Manitoba => "MB",
            Region::NewBrunswick => "NB",
            Region::NewfoundlandAndLabrador => "NL",
            Region::NovaScotia => "NS",
            Region::NorthwestTerritories => "NT",
            Region::Nunavut => "NU",
            Region::Ontario => "ON",
            Region::PrinceEdwardIsland => "PE",
            Region::Quebec => "QC",
            Region::Saskatchewan => "SK",
            Region::Yukon => "YT",
        }
    }

    /// Human-readable name for titles and notes.
    pub fn display_name(self) -> &'static str {
        match self {
            Region::Canada => "Canada",
            Region::Alberta => "Alberta",
            Region::BritishColumbia => "British Columbia",
            Region::Manitoba => "Manitoba",
            Region::NewBrunswick => "New Brunswick",
            Region::NewfoundlandAndLabrador => "Newfoundland and Labrador",
            Region::NovaScotia => "Nova Scotia",
            Region::NorthwestTerritories => "Northwest Territories",
            Region::Nunavut => "Nunavut",
            Region::Ontario => "Ontario",
            Region::PrinceEdwardIsland => "Prince Edward Island",
            Region::Quebec => "Quebec",
            Region::Saskatchewan => "Saskatchewan",
            Region::Yukon => "Yukon",
        }
    }

    /// Resolve a wire code (`"ON"`, `"CAN"`, ...) to a region.
    pub fn from_code(code: &str) -> Option<Region> {
        Region::ALL.into_iter().find(|r| r.code() == code)
    }

    pub fn is_country(self) -> bool {
        self == Region::Canada
    }

    /// Next region in display order (wraps around). Used by the TUI selector.
    pub fn next(self) -> Region {
        let i = Region::ALL.iter().position(|&r| r == self).unwrap_or(0);
        Region::ALL[(i + 1) % Region::ALL.len()]
    }

    /// Previous region in display order (wraps around).
    pub fn prev(self) -> Region {
        let i = Region::ALL.iter().position(|&r| r == self).unwrap_or(0);
        Region::ALL[(i + Region::ALL.len() - 1) % Region::ALL.len()]
    }
}

/// Which derived series to emit for a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    /// Running totals (one line series).
    Cumulative,
    /// Day-over-day deltas (bar series) plus a smoothed line series.
    Daily,
}

impl AggregationMode {
    pub fn toggle(self) -> AggregationMode {
        match self {
            AggregationMode::Cumulative => AggregationMode::Daily,
            AggregationMode::Daily => AggregationMode::Cumulative,
        }
    }
}

/// One reporting day for a given (metric, region) pair.
///
/// Produced by the data layer, ordered by ascending date, immutable once
/// fetched. `daily` is the day-over-day delta of `cumulative` as reported
/// upstream (it can be negative on data corrections).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPoint {
    pub date: NaiveDate,
    pub cumulative: f64,
    pub daily: f64,
}

/// What a derived series represents (and how a renderer should draw it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// Running total; rendered as a line.
    Cumulative,
    /// Raw day-over-day deltas; rendered as bars.
    DailyRaw,
    /// Rolling average of the deltas; rendered as a line.
    DailySmoothed,
}

impl SeriesKind {
    /// Stable lowercase name used in CSV exports.
    pub fn as_str(self) -> &'static str {
        match self {
            SeriesKind::Cumulative => "cumulative",
            SeriesKind::DailyRaw => "daily_raw",
            SeriesKind::DailySmoothed => "daily_smoothed",
        }
    }
}

/// A named numeric series ready for plotting.
///
/// Invariant: `points` has the same length and date alignment as the raw
/// input sequence it was derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedSeries {
    pub label: String,
    pub kind: SeriesKind,
    pub points: Vec<(NaiveDate, f64)>,
}

/// A single vertical reference line on the chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationMarker {
    pub date: NaiveDate,
    pub label: String,
}

/// Output of the series builder: one or two series plus axis policy.
#[derive(Debug, Clone)]
pub struct BuiltSeries {
    /// Cumulative line, or raw daily bars in daily mode.
    pub primary: DerivedSeries,
    /// Smoothed daily line (daily mode only).
    pub secondary: Option<DerivedSeries>,
    /// Lower clamp for the value axis, when negative values are meaningless
    /// for the metric. `None` leaves the axis free.
    pub y_floor: Option<f64>,
}

impl BuiltSeries {
    /// All emitted series, primary first.
    pub fn series(&self) -> impl Iterator<Item = &DerivedSeries> {
        std::iter::once(&self.primary).chain(self.secondary.as_ref())
    }
}

/// A metric as advertised by the upstream catalog.
///
/// Only used to populate selection lists; the label tables in
/// `transform::labels` are self-contained and do not consult the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDescriptor {
    pub id: String,
    pub display_name: String,
}

/// A full chart request as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults) or from the TUI selectors.
#[derive(Debug, Clone)]
pub struct ShowConfig {
    pub metric: String,
    pub region: Region,
    pub mode: AggregationMode,
    /// Rolling-average window in days for the smoothed daily series.
    pub window: usize,

    pub plot_width: usize,
    pub plot_height: usize,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,

    /// Keep the previous annotation marker when a redraw yields none.
    pub preserve_annotation: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_codes_round_trip() {
        for region in Region::ALL {
            assert_eq!(Region::from_code(region.code()), Some(region));
        }
        assert_eq!(Region::from_code("XX"), None);
    }

    #[test]
    fn provinces_exclude_territories() {
        for t in [
            Region::NorthwestTerritories,
            Region::Nunavut,
            Region::Yukon,
        ] {
            assert!(!Region::PROVINCES.contains(&t));
        }
        assert_eq!(Region::PROVINCES.len(), 10);
    }

    #[test]
    fn region_cycle_wraps() {
        assert_eq!(Region::Yukon.next(), Region::Canada);
        assert_eq!(Region::Canada.prev(), Region::Yukon);
    }
}
