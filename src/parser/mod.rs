//! Parser module for pkgorder.
//!
//! Loads package definitions from disk into [`PackageRecord`]s. This is the
//! only place that touches the filesystem; the graph and resolver work on
//! already-loaded records.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pkgorder::parser::load_records;
//!
//! let records = load_records(Path::new("packages.json")).unwrap();
//! println!("Found {} packages", records.len());
//! ```

pub mod packages_json;
pub mod types;

pub use packages_json::{load_records, parse_file, parse_str, validate, ParseError, ParseResult};

pub use types::{PackageRecord, PackagesFile};
