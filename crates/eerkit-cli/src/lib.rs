//! CLI logic for the eerkit schema tool.
//!
//! Every input schema is loaded, validated, written out as a Graphviz DOT
//! file and, unless DOT is the requested format, rendered to an image. Files
//! are processed independently: a failure is recorded and the batch moves on.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};

use eerkit::{
    EerError, SchemaProcessor,
    render::OutputFormat,
    validate::{RuleSet, ValidationReport},
};
use eerkit_loader::{EXTENSION, change_extension};

/// A schema that could not be processed.
#[derive(Debug)]
pub struct Failure {
    pub path: PathBuf,
    pub error: EerError,
}

/// Run the eerkit CLI application
///
/// Returns the files that failed to load or render, in input order.
///
/// # Errors
///
/// Returns `EerError` only for problems that affect the whole batch, such as
/// an unreadable or invalid configuration file.
pub fn run(args: &Args) -> Result<Vec<Failure>, EerError> {
    let mut app_config = config::load_config(args.config.as_deref())?;
    if let Some(engine) = args.engine {
        app_config.render_mut().set_engine(engine);
    }
    if let Some(format) = args.format {
        app_config.render_mut().set_format(format);
    }

    let processor = SchemaProcessor::new(app_config);
    let out_dir = args.out_dir.as_ref().map(PathBuf::from);

    let mut failures = Vec::new();
    for input in &args.inputs {
        let path = change_extension(input, EXTENSION);
        info!(path = path.display().to_string(); "Processing schema");

        if let Err(error) = process_file(&processor, &path, args.mode, out_dir.as_deref()) {
            warn!(path = path.display().to_string(); "Schema failed");
            failures.push(Failure { path, error });
        }
    }

    info!(
        processed = args.inputs.len(),
        failed = failures.len();
        "Batch finished",
    );
    Ok(failures)
}

/// Load, validate, emit and render one schema.
///
/// Validation problems are reported but do not fail the file.
fn process_file(
    processor: &SchemaProcessor,
    path: &Path,
    mode: RuleSet,
    out_dir: Option<&Path>,
) -> Result<(), EerError> {
    let source = fs::read_to_string(path)?;
    let model = processor.load(&source)?;

    let report = processor.validate(&model, mode)?;
    print_report(path, &report);

    let dot = processor.emit(&model);
    let dot_path = output_path(path, out_dir, OutputFormat::Dot.extension());
    fs::write(&dot_path, &dot)?;
    info!(output_file = dot_path.display().to_string(); "DOT file written");

    let format = processor.config().render().format();
    if format != OutputFormat::Dot {
        let image = processor.render(&dot)?;
        let image_path = output_path(path, out_dir, format.extension());
        fs::write(&image_path, image)?;
        info!(output_file = image_path.display().to_string(); "Diagram rendered");
    }

    Ok(())
}

fn print_report(path: &Path, report: &ValidationReport) {
    if !report.is_success() {
        eprintln!("{}:\n{report}", path.display());
    }
    println!(
        "{}: {} passed, {} failed, {} total",
        path.display(),
        report.passed(),
        report.failed(),
        report.total()
    );
}

/// `<out_dir or input dir>/<input stem>.<extension>`
fn output_path(input: &Path, out_dir: Option<&Path>, extension: &str) -> PathBuf {
    let file = change_extension(input.file_name().unwrap_or(input.as_os_str()), extension);
    match out_dir {
        Some(dir) => dir.join(file),
        None => input.with_file_name(file),
    }
}
