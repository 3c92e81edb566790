//! pkgorder CLI binary.
//!
//! Initializes logging via `tracing`, parses arguments with `clap`, loads the
//! packages file and prints the answer to one resolver query.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use pkgorder::export::{self, ExportFormat, Report};
use pkgorder::parser;
use pkgorder::resolver::Resolver;

#[derive(Parser)]
#[command(name = "pkgorder")]
#[command(version)]
#[command(about = "Resolve package installation order from a dependency file", long_about = None)]
struct Cli {
    /// Packages file to load
    #[arg(short, long, env = "PKGORDER_FILE", default_value = "packages.json", global = true)]
    file: PathBuf,

    /// Output format (text, json)
    #[arg(long, default_value_t = ExportFormat::Text, global = true)]
    format: ExportFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Installation order for one package, ending with the package itself
    Order {
        /// Package to install
        package: String,
    },
    /// Packages newly needed for NEW when INSTALLED is already installed
    ToInstall {
        /// Package to install
        new: String,
        /// Package already installed
        installed: String,
    },
    /// Installation order for every package
    OrderAll,
    /// Package with the most transitive dependencies
    MaxDeps,
    /// List every known package
    Packages,
    /// Report every dependency cycle in the file
    Cycles,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let records = parser::load_records(&cli.file)
        .with_context(|| format!("failed to load packages from {}", cli.file.display()))?;
    debug!(packages = records.len(), "loaded package records");
    let resolver = Resolver::new(records);

    let report = run(&resolver, &cli.command)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    export::export(cli.format, &report, &mut out).context("failed to write output")?;
    out.flush()?;
    Ok(())
}

fn run(resolver: &Resolver, command: &Commands) -> Result<Report> {
    let report = match command {
        Commands::Order { package } => Report::Order {
            query: format!("order {}", package),
            packages: resolver
                .installation_order(package)
                .with_context(|| format!("cannot resolve '{}'", package))?,
        },
        Commands::ToInstall { new, installed } => Report::Order {
            query: format!("to-install {} {}", new, installed),
            packages: resolver
                .to_install(new, installed)
                .with_context(|| format!("cannot resolve '{}' over '{}'", new, installed))?,
        },
        Commands::OrderAll => Report::Order {
            query: "order-all".to_string(),
            packages: resolver
                .installation_order_for_all()
                .context("cannot order all packages")?,
        },
        Commands::MaxDeps => {
            let package = resolver.package_with_max_dependencies()?;
            let count = match &package {
                Some(name) => resolver.dependency_count(name)?,
                None => 0,
            };
            Report::MaxDependencies { package, count }
        }
        Commands::Packages => Report::Packages(
            resolver
                .all_packages()
                .into_iter()
                .map(String::from)
                .collect(),
        ),
        Commands::Cycles => Report::Cycles(resolver.graph().detect_cycles()),
    };
    Ok(report)
}
