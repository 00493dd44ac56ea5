//! Command-line parsing for the COVID trends dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the transformation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{AggregationMode, Region};
use crate::transform::DEFAULT_WINDOW;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ctc", version, about = "Canadian COVID-19 trends in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one (metric, region) series and print a chart plus data note.
    Show(ShowArgs),
    /// Launch the interactive dashboard.
    ///
    /// This uses the same underlying pipeline as `ctc show`, but renders
    /// charts in a terminal UI using Ratatui and lets you switch metric,
    /// region, and mode without re-running the program.
    Tui(ShowArgs),
}

/// Common options for one chart.
#[derive(Debug, Parser, Clone)]
pub struct ShowArgs {
    /// Metric id (cases, deaths, hospitalizations, icu, tests_completed,
    /// vaccine_coverage_dose_N, vaccine_administration_dose_N, ...).
    #[arg(short = 'm', long, default_value = "cases")]
    pub metric: String,

    /// Region code (CAN or a province/territory code such as ON, QC, YT).
    #[arg(short = 'r', long, value_enum, default_value_t = Region::Canada)]
    pub region: Region,

    /// Cumulative totals or daily deltas.
    #[arg(long, value_enum, default_value_t = AggregationMode::Cumulative)]
    pub mode: AggregationMode,

    /// Rolling-average window (days) for the smoothed daily series.
    #[arg(long, default_value_t = DEFAULT_WINDOW)]
    pub window: usize,

    /// Chart width in characters.
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Chart height in characters.
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Write the derived series to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    /// Write the derived series to a JSON file.
    #[arg(long, value_name = "PATH")]
    pub export_json: Option<PathBuf>,

    /// Keep the previous completeness marker when a redraw yields none
    /// (TUI only; one-shot charts always resolve fresh).
    #[arg(long, default_value_t = false)]
    pub keep_annotation: bool,
}
