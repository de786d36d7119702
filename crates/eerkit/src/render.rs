//! Rendering DOT text to images with Graphviz.
//!
//! The [`OutputFormat::Dot`] format needs no renderer and is always
//! available. Image formats are produced by the Graphviz executables through
//! `graphviz-rust`, which requires the `graphviz` feature.

use std::{fmt, str::FromStr};

use log::info;
use serde::Deserialize;
use thiserror::Error;

/// The Graphviz program used to lay out the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutEngine {
    /// Hierarchical layout.
    Dot,
    /// Spring model layout.
    #[default]
    Neato,
    /// Force-directed layout.
    Fdp,
    /// Force-directed layout for large graphs.
    Sfdp,
    /// Circular layout.
    Circo,
    /// Radial layout.
    Twopi,
}

impl FromStr for LayoutEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" => Ok(LayoutEngine::Dot),
            "neato" => Ok(LayoutEngine::Neato),
            "fdp" => Ok(LayoutEngine::Fdp),
            "sfdp" => Ok(LayoutEngine::Sfdp),
            "circo" => Ok(LayoutEngine::Circo),
            "twopi" => Ok(LayoutEngine::Twopi),
            _ => Err(format!(
                "Unknown engine: {}. Valid options: dot, neato, fdp, sfdp, circo, twopi",
                s
            )),
        }
    }
}

impl fmt::Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutEngine::Dot => write!(f, "dot"),
            LayoutEngine::Neato => write!(f, "neato"),
            LayoutEngine::Fdp => write!(f, "fdp"),
            LayoutEngine::Sfdp => write!(f, "sfdp"),
            LayoutEngine::Circo => write!(f, "circo"),
            LayoutEngine::Twopi => write!(f, "twopi"),
        }
    }
}

/// The output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The DOT text itself, without running Graphviz.
    Dot,
    #[default]
    Png,
    Svg,
    Pdf,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "gv" => Ok(OutputFormat::Dot),
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            _ => Err(format!(
                "Unknown format: {}. Valid options: dot, png, svg, pdf",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl OutputFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Dot => "dot",
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
        }
    }
}

/// A failure to produce an image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Graphviz `{engine}` failed: {source}")]
    Graphviz {
        engine: LayoutEngine,
        #[source]
        source: std::io::Error,
    },

    #[error("Rendering to {0} requires the `graphviz` feature")]
    Unsupported(OutputFormat),
}

/// Lays out `dot` with `engine` and renders it as `format`.
///
/// For [`OutputFormat::Dot`] the input is returned unchanged.
///
/// # Errors
///
/// Returns [`RenderError::Graphviz`] if Graphviz cannot be run or rejects the
/// input, and [`RenderError::Unsupported`] for image formats when built
/// without the `graphviz` feature.
pub fn render(
    dot: &str,
    engine: LayoutEngine,
    format: OutputFormat,
) -> Result<Vec<u8>, RenderError> {
    if format == OutputFormat::Dot {
        return Ok(dot.as_bytes().to_vec());
    }

    info!(engine:?, format:?; "Running Graphviz");
    let bytes = run_graphviz(dot, engine, format)?;
    info!(bytes = bytes.len(); "Diagram rendered");
    Ok(bytes)
}

#[cfg(feature = "graphviz")]
fn run_graphviz(
    dot: &str,
    engine: LayoutEngine,
    format: OutputFormat,
) -> Result<Vec<u8>, RenderError> {
    use graphviz_rust::cmd::{CommandArg, Format, Layout};

    let layout = match engine {
        LayoutEngine::Dot => Layout::Dot,
        LayoutEngine::Neato => Layout::Neato,
        LayoutEngine::Fdp => Layout::Fdp,
        LayoutEngine::Sfdp => Layout::Sfdp,
        LayoutEngine::Circo => Layout::Circo,
        LayoutEngine::Twopi => Layout::Twopi,
    };
    let format = match format {
        OutputFormat::Png => Format::Png,
        OutputFormat::Svg => Format::Svg,
        OutputFormat::Pdf => Format::Pdf,
        OutputFormat::Dot => Format::Dot,
    };

    graphviz_rust::exec_dot(
        dot.to_string(),
        vec![CommandArg::Layout(layout), CommandArg::Format(format)],
    )
    .map_err(|source| RenderError::Graphviz { engine, source })
}

#[cfg(not(feature = "graphviz"))]
fn run_graphviz(
    _dot: &str,
    _engine: LayoutEngine,
    format: OutputFormat,
) -> Result<Vec<u8>, RenderError> {
    Err(RenderError::Unsupported(format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_round_trips_through_text() {
        for engine in [
            LayoutEngine::Dot,
            LayoutEngine::Neato,
            LayoutEngine::Fdp,
            LayoutEngine::Sfdp,
            LayoutEngine::Circo,
            LayoutEngine::Twopi,
        ] {
            assert_eq!(engine.to_string().parse::<LayoutEngine>(), Ok(engine));
        }
        assert!("spring".parse::<LayoutEngine>().is_err());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("SVG".parse::<OutputFormat>(), Ok(OutputFormat::Svg));
        assert_eq!("gv".parse::<OutputFormat>(), Ok(OutputFormat::Dot));
        assert_eq!(OutputFormat::default().extension(), "png");
        assert!("jpeg".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_dot_format_passes_through() {
        let dot = "graph ER\n{\n}\n";
        let bytes = render(dot, LayoutEngine::Neato, OutputFormat::Dot).unwrap();
        assert_eq!(bytes, dot.as_bytes());
    }

    #[cfg(not(feature = "graphviz"))]
    #[test]
    fn test_images_need_graphviz_feature() {
        let err = render("graph ER {}", LayoutEngine::Dot, OutputFormat::Png).unwrap_err();
        assert!(matches!(err, RenderError::Unsupported(OutputFormat::Png)));
    }
}
