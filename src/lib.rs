//! pkgorder - package installation order resolver
//!
//! This crate computes the order in which packages must be installed so that
//! every package comes after everything it depends on, with cycle detection
//! limited to the packages a query actually needs.

pub mod export;
pub mod graph;
pub mod parser;
pub mod resolver;
