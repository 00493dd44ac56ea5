//! Export derived series to CSV and JSON.
//!
//! The CSV is meant to be easy to consume in spreadsheets or downstream
//! scripts; the JSON document is the "portable" representation of a built
//! chart (series + metadata + optional annotation).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{AggregationMode, AnnotationMarker, BuiltSeries, DerivedSeries, Region, ShowConfig};
use crate::error::AppError;

/// A portable JSON document describing one built chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesFile {
    pub tool: String,
    pub metric: String,
    pub region: Region,
    pub mode: AggregationMode,
    pub window: usize,
    pub y_floor: Option<f64>,
    pub annotation: Option<AnnotationMarker>,
    pub series: Vec<DerivedSeries>,
}

/// Write every derived series as long-format CSV rows.
pub fn write_series_csv(
    path: &Path,
    built: &BuiltSeries,
    config: &ShowConfig,
) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "date,metric,region,series,kind,value")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for series in built.series() {
        for &(date, value) in &series.points {
            writeln!(
                file,
                "{date},{},{},{},{},{value}",
                config.metric,
                config.region.code(),
                series.label,
                series.kind.as_str(),
            )
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
        }
    }

    Ok(())
}

/// Write the built chart as a JSON document.
pub fn write_series_json(
    path: &Path,
    built: &BuiltSeries,
    annotation: Option<&AnnotationMarker>,
    config: &ShowConfig,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    let doc = SeriesFile {
        tool: "ctc".to_string(),
        metric: config.metric.clone(),
        region: config.region,
        mode: config.mode,
        window: config.window,
        y_floor: built.y_floor,
        annotation: annotation.cloned(),
        series: built.series().cloned().collect(),
    };

    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;

    Ok(())
}
