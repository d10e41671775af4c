//! Output formats
//!
//! Every format except `source` is built on [`AstSnapshot`](crate::jinx::ast::AstSnapshot).
//! `source` is the canonical surface syntax from the `Display` impls.

pub mod json;
pub mod treeviz;

use crate::jinx::ast::{
    render_nodes, snapshot_from_document, snapshot_from_template, Node, Phase, Template,
};
use std::fmt;
use std::str::FromStr;

pub use json::to_json_str;
pub use treeviz::to_treeviz_str;

/// All format names accepted by [`OutputFormat::from_str`].
pub const AVAILABLE_FORMATS: &[&str] = &["ast-treeviz", "ast-json", "source"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per node with tree connectors
    AstTreeviz,
    /// Snapshot serialized as pretty JSON
    AstJson,
    /// Canonical template source
    Source,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::AstTreeviz => "ast-treeviz",
            OutputFormat::AstJson => "ast-json",
            OutputFormat::Source => "source",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OutputFormat::AstTreeviz => "Visual tree representation with Unicode icons",
            OutputFormat::AstJson => "Node snapshot as JSON",
            OutputFormat::Source => "Canonical template source",
        }
    }

    pub fn all() -> [OutputFormat; 3] {
        [
            OutputFormat::AstTreeviz,
            OutputFormat::AstJson,
            OutputFormat::Source,
        ]
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::all()
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| {
                FormatError(format!(
                    "unknown format '{}' (available: {})",
                    s,
                    AVAILABLE_FORMATS.join(", ")
                ))
            })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Formatting failed or the format name is unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError(pub String);

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for FormatError {}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError(format!("JSON serialization failed: {}", err))
    }
}

/// Serialize a flattened template.
pub fn format_template(template: &Template, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::AstTreeviz => Ok(to_treeviz_str(&snapshot_from_template(template))),
        OutputFormat::AstJson => to_json_str(&snapshot_from_template(template)),
        OutputFormat::Source => Ok(template.to_string()),
    }
}

/// Serialize a node sequence of either phase.
pub fn format_nodes<P: Phase>(
    nodes: &[Node<P>],
    format: OutputFormat,
) -> Result<String, FormatError> {
    match format {
        OutputFormat::AstTreeviz => Ok(to_treeviz_str(&snapshot_from_document(nodes))),
        OutputFormat::AstJson => to_json_str(&snapshot_from_document(nodes)),
        OutputFormat::Source => Ok(render_nodes(nodes)),
    }
}
