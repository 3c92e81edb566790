//! Installation-order queries over a package dependency graph.
//!
//! All traversals run on an explicit heap stack of frames, each holding a
//! package and an iterator over the neighbours still to visit, so deep
//! dependency chains cannot exhaust the call stack.

use std::collections::{HashMap, HashSet};
use std::slice;
use std::vec;

use tracing::{debug, trace};

use super::error::{ResolveError, ResolveResult};
use crate::graph::{CycleInfo, DependencyGraph};
use crate::parser::PackageRecord;

/// Answers installation-order questions for a fixed set of packages.
///
/// The resolver owns a [`DependencyGraph`] with edges pointing from a
/// dependency to its dependent, plus an immutable lookup of each package's
/// declared dependencies. It is built once and only read afterwards.
///
/// # Example
///
/// ```rust
/// use pkgorder::parser::PackageRecord;
/// use pkgorder::resolver::Resolver;
///
/// let resolver = Resolver::new(vec![
///     PackageRecord::new("A", ["B", "C"]),
///     PackageRecord::new("B", ["C"]),
///     PackageRecord::new("C", ["D"]),
///     PackageRecord::leaf("D"),
/// ]);
///
/// assert_eq!(resolver.installation_order("A").unwrap(), vec!["D", "C", "B", "A"]);
/// assert_eq!(resolver.package_with_max_dependencies().unwrap().as_deref(), Some("A"));
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    graph: DependencyGraph,
    /// Declared direct dependencies per package name
    declared: HashMap<String, Vec<String>>,
}

/// A pending visit: the package and the neighbours not yet looked at.
struct Frame<'a, I> {
    node: &'a str,
    pending: I,
}

impl<'a, I> Frame<'a, I> {
    fn new(node: &'a str, pending: I) -> Self {
        Self { node, pending }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Active,
    Done,
}

impl Resolver {
    /// Builds a resolver from parsed package records.
    ///
    /// Records that share a name have their dependency lists concatenated
    /// in input order.
    pub fn new(records: Vec<PackageRecord>) -> Self {
        let graph = build_graph(&records);

        let mut declared: HashMap<String, Vec<String>> = HashMap::with_capacity(records.len());
        for record in records {
            declared
                .entry(record.name)
                .or_default()
                .extend(record.dependencies);
        }

        Self { graph, declared }
    }

    /// Returns the underlying dependency graph.
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Returns every known package name, sorted.
    pub fn all_packages(&self) -> Vec<&str> {
        self.graph.all_vertices().into_iter().collect()
    }

    /// Returns the declared direct dependencies of a package.
    ///
    /// A package without a record and a package with no dependencies look
    /// the same here: both yield an empty slice.
    pub fn predecessors_of(&self, name: &str) -> &[String] {
        self.declared.get(name).map_or(&[], Vec::as_slice)
    }

    /// Returns an order in which `pkg` and everything it transitively
    /// depends on can be installed, ending with `pkg` itself.
    ///
    /// Dependencies are visited in declaration order. Only cycles reachable
    /// from `pkg` are reported; cycles elsewhere in the graph are ignored.
    ///
    /// # Errors
    ///
    /// * [`ResolveError::PackageNotFound`] if `pkg` is not in the graph.
    /// * [`ResolveError::CycleDetected`] if installing `pkg` requires a cycle.
    pub fn installation_order(&self, pkg: &str) -> ResolveResult<Vec<String>> {
        debug!(package = pkg, "computing installation order");
        let order = self.dependency_closure(pkg)?;
        Ok(order.into_iter().map(String::from).collect())
    }

    /// Returns how many distinct packages `pkg` transitively depends on.
    pub fn dependency_count(&self, pkg: &str) -> ResolveResult<usize> {
        Ok(self.dependency_closure(pkg)?.len().saturating_sub(1))
    }

    /// Post-order DFS over declared dependencies, rooted at `pkg`.
    fn dependency_closure<'a>(&'a self, pkg: &'a str) -> ResolveResult<Vec<&'a str>> {
        if !self.graph.contains(pkg) {
            return Err(ResolveError::PackageNotFound(pkg.to_string()));
        }

        let mut order: Vec<&str> = Vec::new();
        let mut emitted: HashSet<&str> = HashSet::new();
        let mut on_path: HashSet<&str> = HashSet::new();
        let mut stack: Vec<Frame<'a, slice::Iter<'a, String>>> =
            vec![Frame::new(pkg, self.predecessors_of(pkg).iter())];
        on_path.insert(pkg);

        while let Some(frame) = stack.last_mut() {
            match frame.pending.next() {
                Some(dep) => {
                    let dep = dep.as_str();
                    if emitted.contains(dep) {
                        continue;
                    }
                    if on_path.contains(dep) {
                        let cycle = path_from(&stack, dep);
                        debug!(package = pkg, cycle = %cycle, "cycle on installation path");
                        return Err(ResolveError::CycleDetected(cycle));
                    }
                    trace!(package = frame.node, dependency = dep, "visiting dependency");
                    on_path.insert(dep);
                    stack.push(Frame::new(dep, self.predecessors_of(dep).iter()));
                }
                None => {
                    let node = frame.node;
                    stack.pop();
                    on_path.remove(node);
                    emitted.insert(node);
                    order.push(node);
                }
            }
        }

        Ok(order)
    }

    /// Returns the packages that still need installing to bring `new_pkg`
    /// online when `installed_pkg` and its own dependencies are present.
    ///
    /// The result keeps the relative order of `installation_order(new_pkg)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pkgorder::parser::PackageRecord;
    /// use pkgorder::resolver::Resolver;
    ///
    /// let resolver = Resolver::new(vec![
    ///     PackageRecord::new("A", ["B", "C"]),
    ///     PackageRecord::new("B", ["D"]),
    ///     PackageRecord::new("C", ["D"]),
    ///     PackageRecord::leaf("D"),
    /// ]);
    ///
    /// assert_eq!(resolver.to_install("A", "B").unwrap(), vec!["C", "A"]);
    /// ```
    pub fn to_install(&self, new_pkg: &str, installed_pkg: &str) -> ResolveResult<Vec<String>> {
        debug!(new = new_pkg, installed = installed_pkg, "computing packages to install");
        let installed: HashSet<&str> = self
            .dependency_closure(installed_pkg)?
            .into_iter()
            .collect();
        let needed = self.dependency_closure(new_pkg)?;

        Ok(needed
            .into_iter()
            .filter(|name| !installed.contains(name))
            .map(String::from)
            .collect())
    }

    /// Returns a global installation order covering every package once.
    ///
    /// Vertices are seeded in sorted order and successors followed in
    /// adjacency order, so the result is deterministic.
    ///
    /// # Errors
    ///
    /// [`ResolveError::CycleDetected`] if the graph contains any cycle, since
    /// no complete order exists then.
    pub fn installation_order_for_all(&self) -> ResolveResult<Vec<String>> {
        let total = self.graph.vertex_count();
        debug!(packages = total, "computing global installation order");

        let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(total);
        let mut finished: Vec<&str> = Vec::with_capacity(total);

        for root in self.graph.all_vertices() {
            if marks.contains_key(root) {
                continue;
            }
            marks.insert(root, Mark::Active);
            let mut stack = vec![Frame::new(root, self.successors(root))];

            while let Some(frame) = stack.last_mut() {
                match frame.pending.next() {
                    Some(next) => match marks.get(next).copied() {
                        Some(Mark::Done) => {}
                        Some(Mark::Active) => {
                            // Stack runs dependency -> dependent; report it the other way round
                            let mut cycle = path_from(&stack, next);
                            cycle.nodes.reverse();
                            debug!(cycle = %cycle, "cycle in global order");
                            return Err(ResolveError::CycleDetected(cycle));
                        }
                        None => {
                            trace!(package = frame.node, dependent = next, "visiting dependent");
                            marks.insert(next, Mark::Active);
                            stack.push(Frame::new(next, self.successors(next)));
                        }
                    },
                    None => {
                        let node = frame.node;
                        stack.pop();
                        marks.insert(node, Mark::Done);
                        finished.push(node);
                    }
                }
            }
        }

        Ok(finished.into_iter().rev().map(String::from).collect())
    }

    fn successors(&self, name: &str) -> vec::IntoIter<&str> {
        self.graph
            .adjacent_vertices_of(name)
            .unwrap_or_default()
            .into_iter()
    }

    /// Returns the package with the most transitive dependencies.
    ///
    /// Shared dependencies are counted once. Ties go to the lexicographically
    /// smallest name. Returns `None` only for an empty graph.
    ///
    /// # Errors
    ///
    /// A candidate that raises [`ResolveError::PackageNotFound`] is skipped,
    /// but [`ResolveError::CycleDetected`] from any candidate aborts the
    /// whole query.
    pub fn package_with_max_dependencies(&self) -> ResolveResult<Option<String>> {
        let mut best: Option<(&str, usize)> = None;

        for pkg in self.graph.all_vertices() {
            let count = match self.dependency_count(pkg) {
                Ok(count) => count,
                Err(ResolveError::PackageNotFound(_)) => continue,
                Err(err) => return Err(err),
            };
            if best.map_or(true, |(_, max)| count > max) {
                best = Some((pkg, count));
            }
        }

        if let Some((name, count)) = best {
            debug!(package = name, dependencies = count, "package with most dependencies");
        }
        Ok(best.map(|(name, _)| name.to_string()))
    }
}

/// Builds the graph with one edge from each dependency to its dependent.
///
/// Every name is added as a vertex before any edge, so packages and
/// dependencies without a record of their own are present too.
fn build_graph(records: &[PackageRecord]) -> DependencyGraph {
    let edges = records.iter().map(|r| r.dependencies.len()).sum();
    let mut graph = DependencyGraph::with_capacity(records.len(), edges);

    for record in records {
        graph.add_vertex(&record.name);
        for dep in &record.dependencies {
            graph.add_vertex(dep);
        }
    }

    for record in records {
        for dep in &record.dependencies {
            graph.add_edge(dep, &record.name);
        }
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "built dependency graph"
    );
    graph
}

/// Collects the frames from `start` to the top of the stack as a cycle.
fn path_from<I>(stack: &[Frame<'_, I>], start: &str) -> CycleInfo {
    let from = stack
        .iter()
        .position(|frame| frame.node == start)
        .unwrap_or(0);
    CycleInfo::new(stack[from..].iter().map(|f| f.node.to_string()).collect())
}
