//! Resolver module for installation-order queries.
//!
//! [`Resolver`] wraps a [`crate::graph::DependencyGraph`] built from
//! [`crate::parser::PackageRecord`]s and answers:
//!
//! - the installation order for one package, with cycle detection scoped to
//!   what that package actually needs
//! - which packages are newly needed given one already installed
//! - a global installation order for every package
//! - which package has the most transitive dependencies
//!
//! # Example
//!
//! ```rust
//! use pkgorder::parser::PackageRecord;
//! use pkgorder::resolver::{ResolveError, Resolver};
//!
//! let resolver = Resolver::new(vec![
//!     PackageRecord::new("A", ["B"]),
//!     PackageRecord::new("B", ["A"]),
//! ]);
//!
//! let err = resolver.installation_order("A").unwrap_err();
//! assert!(matches!(err, ResolveError::CycleDetected(_)));
//! ```

mod error;
mod install_order;

pub use error::{ResolveError, ResolveResult};
pub use install_order::Resolver;
