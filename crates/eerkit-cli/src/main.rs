//! eerkit CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use eerkit::EerError;
use eerkit_cli::{Args, error_adapter::to_reportables};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting eerkit");
    debug!(args:?; "Parsed arguments");

    let failures = match eerkit_cli::run(&args) {
        Ok(failures) => failures,
        Err(err) => {
            report(&err);
            process::exit(1);
        }
    };

    if !failures.is_empty() {
        for failure in &failures {
            error!(path = failure.path.display().to_string(); "Failed to process schema");
            report(&failure.error);
        }
        process::exit(1);
    }

    info!("Completed successfully");
}

/// Render each diagnostic of `err` independently.
fn report(err: &EerError) {
    let reporter = miette::GraphicalReportHandler::new();

    for reportable in to_reportables(err) {
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &reportable)
            .expect("Writing to String buffer is infallible");

        error!("{writer}");
    }
}
