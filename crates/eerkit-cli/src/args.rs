//! Command-line argument definitions for the eerkit CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input schemas, the Graphviz engine
//! and output format, the validation mode, configuration file and logging
//! verbosity.

use clap::Parser;

use eerkit::{
    render::{LayoutEngine, OutputFormat},
    validate::RuleSet,
};

/// Validate EER schema descriptions and draw them with Graphviz
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Schema descriptions to process; the .dbcs extension may be omitted
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Graphviz layout engine (dot, neato, fdp, sfdp, circo, twopi)
    #[arg(short, long)]
    pub engine: Option<LayoutEngine>,

    /// Output format (dot, png, svg, pdf)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Set of validation rules to run (basic, strict)
    #[arg(short, long, default_value = "basic")]
    pub mode: RuleSet,

    /// Directory for the generated files, defaults to each input's directory
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["eerkit", "university"]).unwrap();

        assert_eq!(args.inputs, vec!["university"]);
        assert_eq!(args.engine, None);
        assert_eq!(args.format, None);
        assert_eq!(args.mode, RuleSet::Basic);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "eerkit", "-e", "dot", "-f", "svg", "-m", "strict", "-o", "out", "-c",
            "eerkit.toml", "a.dbcs", "b",
        ])
        .unwrap();

        assert_eq!(args.inputs, vec!["a.dbcs", "b"]);
        assert_eq!(args.engine, Some(LayoutEngine::Dot));
        assert_eq!(args.format, Some(OutputFormat::Svg));
        assert_eq!(args.mode, RuleSet::Strict);
        assert_eq!(args.out_dir.as_deref(), Some("out"));
        assert_eq!(args.config.as_deref(), Some("eerkit.toml"));
    }

    #[test]
    fn test_inputs_are_required() {
        assert!(Args::try_parse_from(["eerkit"]).is_err());
    }

    #[test]
    fn test_unknown_engine_is_rejected() {
        assert!(Args::try_parse_from(["eerkit", "-e", "spring", "a"]).is_err());
    }
}
