//! Shared "chart pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> build series -> resolve annotation -> format note/title
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::data::CovidDataClient;
use crate::domain::{AnnotationMarker, BuiltSeries, RawPoint, Region, ShowConfig};
use crate::error::AppError;
use crate::transform::{annotation_applies, build_series, resolve_completeness_date};

/// Label on the completeness marker line, mirroring the chart annotation
/// wording of the public dashboard.
pub const COMPLETENESS_MARKER_LABEL: &str = "All provinces\nlast reported";

/// All computed outputs of a single chart request.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub raw: Vec<RawPoint>,
    pub built: BuiltSeries,
    pub title: String,
    pub annotation: Option<AnnotationMarker>,
    pub note: String,
}

/// Execute the full pipeline: fetch the series, then transform it.
pub fn run_show(client: &CovidDataClient, config: &ShowConfig) -> Result<RunOutput, AppError> {
    let raw = client.fetch_timeseries(&config.metric, config.region)?;
    run_show_with_raw(client, config, raw)
}

/// Execute the pipeline with a pre-fetched raw series.
///
/// This is useful for the TUI where a mode toggle must not re-fetch.
pub fn run_show_with_raw(
    client: &CovidDataClient,
    config: &ShowConfig,
    raw: Vec<RawPoint>,
) -> Result<RunOutput, AppError> {
    let built = build_series(&raw, &config.metric, config.mode, config.window)?;
    let title = crate::report::chart_title(&config.metric, config.region, config.mode)?;

    // The completeness annotation only applies to country-level counts, and
    // it must never take the chart down with it: a feed problem degrades to
    // a note, not a failure.
    let annotation = if annotation_applies(&config.metric, config.region) {
        resolve_annotation(client, &config.metric)
    } else {
        None
    };

    let last_date = raw.last().map(|p| p.date);
    let note = crate::report::build_data_note(
        &config.metric,
        config.region,
        last_date,
        annotation.as_ref().map(|a| a.date),
    );

    Ok(RunOutput {
        raw,
        built,
        title,
        annotation,
        note,
    })
}

fn resolve_annotation(client: &CovidDataClient, metric: &str) -> Option<AnnotationMarker> {
    let records = client.fetch_completeness(metric).ok()?;
    let date = resolve_completeness_date(&records, &Region::PROVINCES).ok()?;
    Some(AnnotationMarker {
        date,
        label: COMPLETENESS_MARKER_LABEL.to_string(),
    })
}
