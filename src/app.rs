//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - fetches upstream data
//! - runs the transformation pipeline
//! - prints the chart/note or hands off to the TUI
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, ShowArgs};
use crate::data::CovidDataClient;
use crate::domain::ShowConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `ctc` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `ctc` (and `ctc -m cases`) to behave like `ctc tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let config = show_config_from_args(&args);
    let client = CovidDataClient::new();
    let run = pipeline::run_show(&client, &config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&config, &run.built, &run.title, &run.note)
    );
    println!(
        "{}",
        crate::plot::render_ascii_plot(
            &run.built,
            run.annotation.as_ref(),
            config.plot_width,
            config.plot_height,
        )
    );

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::write_series_csv(path, &run.built, &config)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::write_series_json(path, &run.built, run.annotation.as_ref(), &config)?;
    }

    Ok(())
}

fn handle_tui(args: ShowArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

pub fn show_config_from_args(args: &ShowArgs) -> ShowConfig {
    ShowConfig {
        metric: args.metric.clone(),
        region: args.region,
        mode: args.mode,
        window: args.window.max(1),
        plot_width: args.width,
        plot_height: args.height,
        export_csv: args.export_csv.clone(),
        export_json: args.export_json.clone(),
        preserve_annotation: args.keep_annotation,
    }
}

/// Insert the default `tui` subcommand when none was given.
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    const SUBCOMMANDS: &[&str] = &["show", "tui", "help"];

    let first_real = argv.get(1).map(String::as_str);
    let needs_default = match first_real {
        None => true,
        Some(arg) => {
            !SUBCOMMANDS.contains(&arg)
                && arg != "-h"
                && arg != "--help"
                && arg != "-V"
                && arg != "--version"
        }
    };

    if needs_default {
        argv.insert(1, "tui".to_string());
    }
    argv
}
