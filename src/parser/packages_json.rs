//! Parser for packages files.
//!
//! This module reads the JSON packages file and hands back a list of
//! [`PackageRecord`]s for the resolver.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::types::{PackageRecord, PackagesFile};

/// Errors that can occur while loading a packages file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The packages file is structurally valid JSON but not a usable definition.
    #[error("Invalid packages file: {0}")]
    InvalidPackage(String),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a packages file from a file path.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use pkgorder::parser::packages_json::parse_file;
///
/// let file = parse_file(Path::new("packages.json")).unwrap();
/// println!("{} packages", file.packages.len());
/// ```
pub fn parse_file(path: &Path) -> ParseResult<PackagesFile> {
    debug!(path = %path.display(), "reading packages file");
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a packages file from a string.
///
/// # Example
///
/// ```
/// use pkgorder::parser::packages_json::parse_str;
///
/// let json = r#"{"packages": [{"name": "A", "dependencies": ["B"]}, {"name": "B"}]}"#;
/// let file = parse_str(json).unwrap();
/// assert_eq!(file.packages[0].dependencies, vec!["B"]);
/// ```
pub fn parse_str(content: &str) -> ParseResult<PackagesFile> {
    let file: PackagesFile = serde_json::from_str(content)?;
    debug!(packages = file.packages.len(), "parsed packages file");
    Ok(file)
}

/// Validates a parsed packages file.
///
/// Rejects blank package names, blank dependency names and a package listing
/// the same dependency twice. Missing dependency records are allowed; such
/// packages are treated as having no dependencies.
pub fn validate(file: &PackagesFile) -> ParseResult<()> {
    for (position, record) in file.packages.iter().enumerate() {
        if record.name.trim().is_empty() {
            return Err(ParseError::InvalidPackage(format!(
                "package #{} has an empty name",
                position + 1
            )));
        }

        let mut seen = HashSet::new();
        for dep in &record.dependencies {
            if dep.trim().is_empty() {
                return Err(ParseError::InvalidPackage(format!(
                    "package '{}' lists an empty dependency name",
                    record.name
                )));
            }
            if !seen.insert(dep.as_str()) {
                return Err(ParseError::InvalidPackage(format!(
                    "package '{}' lists dependency '{}' more than once",
                    record.name, dep
                )));
            }
        }
    }
    Ok(())
}

/// Reads, parses and validates a packages file in one step.
pub fn load_records(path: &Path) -> ParseResult<Vec<PackageRecord>> {
    let file = parse_file(path)?;
    validate(&file)?;
    Ok(file.into_records())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PACKAGES_JSON: &str = r#"{
        "packages": [
            {"name": "A", "dependencies": ["B", "C"]},
            {"name": "B", "dependencies": ["C"]},
            {"name": "C", "dependencies": ["D"]},
            {"name": "D", "dependencies": []}
        ]
    }"#;

    #[test]
    fn test_parse_str_valid() {
        let file = parse_str(SAMPLE_PACKAGES_JSON).unwrap();

        assert_eq!(file.packages.len(), 4);
        assert_eq!(file.packages[0], PackageRecord::new("A", ["B", "C"]));
        assert!(file.packages[3].is_leaf());
    }

    #[test]
    fn test_parse_str_empty_object() {
        let file = parse_str("{}").unwrap();
        assert!(file.is_empty());
    }

    #[test]
    fn test_parse_str_invalid_json() {
        let result = parse_str("{ invalid json }");

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ParseError::JsonError(_)));
    }

    #[test]
    fn test_parse_str_missing_name() {
        let result = parse_str(r#"{"packages": [{"dependencies": ["B"]}]}"#);
        assert!(matches!(result.unwrap_err(), ParseError::JsonError(_)));
    }

    #[test]
    fn test_parse_str_with_extra_fields() {
        let json = r#"{
            "version": 2,
            "packages": [{"name": "A", "dependencies": [], "homepage": "https://example.com"}]
        }"#;

        let file = parse_str(json).unwrap();
        assert_eq!(file.packages.len(), 1);
    }

    #[test]
    fn test_validate_valid_file() {
        let file = parse_str(SAMPLE_PACKAGES_JSON).unwrap();
        assert!(validate(&file).is_ok());
    }

    #[test]
    fn test_validate_empty_name() {
        let file = parse_str(r#"{"packages": [{"name": "  "}]}"#).unwrap();
        let result = validate(&file);

        assert!(matches!(result.unwrap_err(), ParseError::InvalidPackage(_)));
    }

    #[test]
    fn test_validate_empty_dependency_name() {
        let file = parse_str(r#"{"packages": [{"name": "A", "dependencies": [""]}]}"#).unwrap();
        assert!(validate(&file).is_err());
    }

    #[test]
    fn test_validate_duplicate_dependency() {
        let file =
            parse_str(r#"{"packages": [{"name": "A", "dependencies": ["B", "B"]}]}"#).unwrap();
        let err = validate(&file).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_load_records_missing_file() {
        let result = load_records(Path::new("definitely/not/here.json"));
        assert!(matches!(result.unwrap_err(), ParseError::IoError(_)));
    }

    #[test]
    fn test_parse_error_display() {
        let io_err = ParseError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        assert!(io_err.to_string().contains("Failed to read file"));

        let invalid_err = ParseError::InvalidPackage("missing name".to_string());
        assert!(invalid_err.to_string().contains("Invalid packages file"));
    }
}
