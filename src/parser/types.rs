//! Shared types for package definitions.
//!
//! This module defines the records produced by the packages-file loader and
//! consumed read-only by the resolver.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the structure of a packages file.
///
/// # Example
///
/// ```
/// use pkgorder::parser::types::PackagesFile;
///
/// let json = r#"{"packages": [{"name": "A", "dependencies": ["B"]}]}"#;
/// let file: PackagesFile = serde_json::from_str(json).unwrap();
/// assert_eq!(file.packages.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackagesFile {
    /// Every package declared in the file, in file order.
    #[serde(default)]
    pub packages: Vec<PackageRecord>,
}

impl PackagesFile {
    /// Returns true if no packages are declared.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Consumes the file, yielding its records.
    pub fn into_records(self) -> Vec<PackageRecord> {
        self.packages
    }
}

/// A single package and the names of the packages it directly depends on.
///
/// Only the name identifies a package; there is no version information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// The package name (e.g., "A", "libssl").
    pub name: String,

    /// Direct dependencies, in declaration order.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl PackageRecord {
    /// Creates a new PackageRecord instance.
    pub fn new<I, S>(name: impl Into<String>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a record with no dependencies.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependencies: Vec::new(),
        }
    }

    /// Returns true if this package depends on nothing.
    pub fn is_leaf(&self) -> bool {
        self.dependencies.is_empty()
    }
}

impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> [{}]", self.name, self.dependencies.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new() {
        let record = PackageRecord::new("A", ["B", "C"]);
        assert_eq!(record.name, "A");
        assert_eq!(record.dependencies, vec!["B", "C"]);
        assert!(!record.is_leaf());
    }

    #[test]
    fn test_record_leaf() {
        let record = PackageRecord::leaf("D");
        assert!(record.is_leaf());
    }

    #[test]
    fn test_record_display() {
        let record = PackageRecord::new("A", ["B", "C"]);
        assert_eq!(format!("{}", record), "A -> [B, C]");
        assert_eq!(format!("{}", PackageRecord::leaf("D")), "D -> []");
    }

    #[test]
    fn test_missing_dependencies_defaults_to_empty() {
        let record: PackageRecord = serde_json::from_str(r#"{"name": "solo"}"#).unwrap();
        assert!(record.is_leaf());
    }

    #[test]
    fn test_packages_file_default() {
        let file = PackagesFile::default();
        assert!(file.is_empty());
        assert!(file.into_records().is_empty());
    }
}
