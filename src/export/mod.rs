//! Export functionality for query results.
//!
//! This module renders resolver answers for the command-line driver, either
//! as plain text for people and shell pipelines or as JSON for tools.

pub mod json;
pub mod text;

use crate::graph::CycleInfo;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Plain text, one package per line
    #[default]
    Text,
    /// JSON format - machine-readable
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: text, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// The answer to a single query, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// An ordered list of packages to install.
    Order {
        /// What was asked, e.g. `order A` or `to-install A B`
        query: String,
        /// Packages in installation order
        packages: Vec<String>,
    },
    /// The package with the most transitive dependencies.
    MaxDependencies {
        /// `None` when there are no packages at all
        package: Option<String>,
        /// Number of distinct transitive dependencies
        count: usize,
    },
    /// Every known package, sorted.
    Packages(Vec<String>),
    /// Cycles found anywhere in the graph.
    Cycles(Vec<CycleInfo>),
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the report to the given writer.
    fn export<W: Write>(&self, report: &Report, writer: &mut W) -> io::Result<()>;
}

/// Export a report in the specified format.
pub fn export<W: Write>(format: ExportFormat, report: &Report, writer: &mut W) -> io::Result<()> {
    match format {
        ExportFormat::Text => text::TextExporter.export(report, writer),
        ExportFormat::Json => json::JsonExporter.export(report, writer),
    }
}

/// Export a report to a string.
pub fn export_to_string(format: ExportFormat, report: &Report) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, report, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
