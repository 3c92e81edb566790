//! Graph module for dependency relationship modeling.
//!
//! This module provides the [`DependencyGraph`] struct, a directed and
//! unweighted graph over package names. It knows nothing about installation
//! or resolution; see [`crate::resolver`] for that.
//!
//! # Example
//!
//! ```rust
//! use pkgorder::graph::DependencyGraph;
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_vertex("react");
//! graph.add_edge("react", "react-dom");
//!
//! assert_eq!(graph.vertex_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

mod dependency_graph;

pub use dependency_graph::{CycleInfo, DependencyGraph};
