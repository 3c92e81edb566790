//! Plain-text export implementation.
//!
//! Lists go one entry per line so the output can be piped straight into
//! other tools.

use super::{Exporter, Report};
use std::io::{self, Write};

/// Plain-text exporter implementation.
pub struct TextExporter;

impl Exporter for TextExporter {
    fn export<W: Write>(&self, report: &Report, writer: &mut W) -> io::Result<()> {
        match report {
            Report::Order { packages, .. } | Report::Packages(packages) => {
                for name in packages {
                    writeln!(writer, "{}", name)?;
                }
            }
            Report::MaxDependencies { package, count } => match package {
                Some(name) => writeln!(writer, "{} ({} dependencies)", name, count)?,
                None => writeln!(writer, "no packages")?,
            },
            Report::Cycles(cycles) => {
                if cycles.is_empty() {
                    writeln!(writer, "no cycles")?;
                }
                for cycle in cycles {
                    writeln!(writer, "{}", cycle.cycle_path())?;
                }
            }
        }
        Ok(())
    }
}
