//! JSON export implementation.
//!
//! Exports query results in JSON format for machine-readable output.

use super::{Exporter, Report};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable cycle info for JSON output.
#[derive(Serialize)]
struct JsonCycle<'a> {
    packages: &'a [String],
    path: String,
}

/// Root JSON export structure, one shape per report kind.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum JsonExport<'a> {
    Order {
        query: &'a str,
        count: usize,
        packages: &'a [String],
    },
    MaxDependencies {
        package: Option<&'a str>,
        dependencies: usize,
    },
    Packages {
        count: usize,
        packages: &'a [String],
    },
    Cycles {
        count: usize,
        cycles: Vec<JsonCycle<'a>>,
    },
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, report: &Report, writer: &mut W) -> io::Result<()> {
        let export = match report {
            Report::Order { query, packages } => JsonExport::Order {
                query,
                count: packages.len(),
                packages,
            },
            Report::MaxDependencies { package, count } => JsonExport::MaxDependencies {
                package: package.as_deref(),
                dependencies: *count,
            },
            Report::Packages(packages) => JsonExport::Packages {
                count: packages.len(),
                packages,
            },
            Report::Cycles(cycles) => JsonExport::Cycles {
                count: cycles.len(),
                cycles: cycles
                    .iter()
                    .map(|c| JsonCycle {
                        packages: &c.nodes,
                        path: c.cycle_path(),
                    })
                    .collect(),
            },
        };

        serde_json::to_writer_pretty(&mut *writer, &export)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        writeln!(writer)?;
        Ok(())
    }
}
