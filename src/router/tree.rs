//! Segment trie for path-pattern route matching
//!
//! This module provides the route tree: an ordered forest where every node
//! stands for one `/`-delimited path segment. Patterns are inserted segment by
//! segment, sharing prefixes with previously registered patterns, and the
//! route value is attached to the node holding the final segment.
//!
//! ## Node kinds
//!
//! - **Literal** segments (e.g. `users`) match exactly
//! - **Parameter** segments (e.g. `:id`) match any non-empty segment and
//!   capture it under the parameter name
//!
//! The default route `/` is a root-level node of its own and is only reached
//! when the incoming path is exactly `/`.
//!
//! ## Matching
//!
//! Matching is a breadth-first walk. Every node that matches the current
//! segment stays viable and contributes its children to the next level, so a
//! literal and a parameter sibling are explored in parallel. When the path is
//! exhausted, the first surviving node (in registration order) that carries a
//! route wins. Registration order is the only tie-break; literals are not
//! preferred over parameters.
//!
//! ## Storage
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. The parent
//! link is a plain index, so the tree owns every node exactly once.
//!
//! ## Example
//!
//! ```rust
//! use fluroute::router::RouteTree;
//!
//! let mut tree = RouteTree::new();
//! tree.add_route("/users/:id", "get_user").unwrap();
//!
//! let m = tree.match_route("/users/42?tab=profile").unwrap();
//! assert_eq!(*m.route, "get_user");
//! assert_eq!(m.parameters.get("id"), Some("42"));
//! assert_eq!(m.parameters.get("tab"), Some("profile"));
//! ```

use std::fmt;

use super::params::Parameters;
use super::query::parse_query;
use crate::error::RouteError;

/// Pattern reserved for the application's initial route
pub const DEFAULT_ROUTE: &str = "/";

/// Prefix that turns a pattern segment into a named parameter
pub const PARAMETER_SIGIL: char = ':';

/// How empty segments (from `//` or a trailing `/`) are treated
///
/// The same policy applies to patterns at registration and to paths at match
/// time, so `/a/` registered under `Preserve` is only reached by `/a/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySegmentPolicy {
    /// Keep empty segments as literal empty-string segments
    #[default]
    Preserve,
    /// Drop empty segments, so `/a//b/` behaves like `/a/b`
    Collapse,
}

impl EmptySegmentPolicy {
    /// Parse a policy name, defaulting to `Preserve`
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "collapse" => EmptySegmentPolicy::Collapse,
            _ => EmptySegmentPolicy::Preserve,
        }
    }
}

/// What to do when a second, differently named parameter segment is
/// registered under the same parent (`/users/:id` then `/users/:name`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SiblingParamPolicy {
    /// Accept it; the first-registered parameter node is explored first
    #[default]
    FirstWins,
    /// Refuse the registration with [`RouteError::ConflictingParameter`]
    Reject,
}

impl SiblingParamPolicy {
    /// Parse a policy name, defaulting to `FirstWins`
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "reject" => SiblingParamPolicy::Reject,
            _ => SiblingParamPolicy::FirstWins,
        }
    }
}

/// Handle of a node inside a [`RouteTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Whether a node matches its segment literally or captures it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Literal,
    Parameter,
}

impl NodeKind {
    fn classify(segment: &str) -> Self {
        if segment.starts_with(PARAMETER_SIGIL) {
            NodeKind::Parameter
        } else {
            NodeKind::Literal
        }
    }
}

/// One path segment in the tree
#[derive(Debug, Clone)]
pub struct TreeNode<R> {
    segment: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    routes: Vec<R>,
}

impl<R> TreeNode<R> {
    fn new(segment: &str, parent: Option<NodeId>) -> Self {
        Self {
            segment: segment.to_string(),
            kind: NodeKind::classify(segment),
            parent,
            children: Vec::new(),
            routes: Vec::new(),
        }
    }

    /// The raw pattern segment, sigil included for parameters
    #[must_use]
    pub fn segment(&self) -> &str {
        &self.segment
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[must_use]
    pub fn is_parameter(&self) -> bool {
        self.kind == NodeKind::Parameter
    }

    /// Parameter name without the sigil, `None` for literal nodes
    #[must_use]
    pub fn parameter_name(&self) -> Option<&str> {
        if self.is_parameter() {
            self.segment.strip_prefix(PARAMETER_SIGIL)
        } else {
            None
        }
    }

    /// Parent node, `None` for roots
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in registration order
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Routes terminating at this node, in registration order
    #[must_use]
    pub fn routes(&self) -> &[R] {
        &self.routes
    }

    fn accepts(&self, path_part: &str) -> bool {
        match self.kind {
            NodeKind::Literal => self.segment == path_part,
            NodeKind::Parameter => !path_part.is_empty(),
        }
    }
}

/// A successful tree lookup
#[derive(Debug, Clone, PartialEq)]
pub struct TreeMatch<'a, R> {
    /// First route registered on the matched node
    pub route: &'a R,
    /// Node the path ended on
    pub node: NodeId,
    /// Captured path parameters merged with query parameters
    pub parameters: Parameters,
}

/// Ordered forest of path segments with routes attached to terminal nodes
#[derive(Debug, Clone)]
pub struct RouteTree<R> {
    nodes: Vec<TreeNode<R>>,
    roots: Vec<NodeId>,
    has_default_route: bool,
    empty_segments: EmptySegmentPolicy,
    sibling_params: SiblingParamPolicy,
}

impl<R> Default for RouteTree<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RouteTree<R> {
    /// Create an empty tree with the default policies
    #[must_use]
    pub fn new() -> Self {
        Self::with_policies(EmptySegmentPolicy::default(), SiblingParamPolicy::default())
    }

    /// Create an empty tree with explicit segment policies
    #[must_use]
    pub fn with_policies(
        empty_segments: EmptySegmentPolicy,
        sibling_params: SiblingParamPolicy,
    ) -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            has_default_route: false,
            empty_segments,
            sibling_params,
        }
    }

    /// Insert `route` under `pattern`
    ///
    /// Returns the node the route was attached to. On error the tree is left
    /// exactly as it was before the call.
    ///
    /// # Errors
    ///
    /// - [`RouteError::DuplicateDefaultRoute`] if `pattern` is `/` and a
    ///   default route already exists
    /// - [`RouteError::ConflictingParameter`] under
    ///   [`SiblingParamPolicy::Reject`] when the pattern would add a second
    ///   parameter child to an existing node
    pub fn add_route(&mut self, pattern: &str, route: R) -> Result<NodeId, RouteError> {
        // Queries never shape the tree; `/a?x=1` registers as `/a`.
        let full_pattern = pattern;
        let pattern = pattern.split_once('?').map_or(pattern, |(path, _)| path);

        if pattern == DEFAULT_ROUTE {
            if self.has_default_route {
                return Err(RouteError::DuplicateDefaultRoute);
            }
            let id = self.push_node(DEFAULT_ROUTE, None);
            self.nodes[id.0].routes.push(route);
            self.has_default_route = true;
            return Ok(id);
        }

        let segments = self.split(pattern);

        // Walk the shared prefix first so every check happens before the tree changes.
        let mut parent = None;
        let mut reused = 0;
        for segment in &segments {
            match self.find_child(parent, segment) {
                Some(id) => {
                    parent = Some(id);
                    reused += 1;
                }
                None => break,
            }
        }

        if let Some(segment) = segments.get(reused) {
            self.check_sibling_parameter(parent, segment, full_pattern)?;
        }

        for segment in &segments[reused..] {
            parent = Some(self.push_node(segment, parent));
        }

        let Some(terminal) = parent else {
            return Err(RouteError::InvalidPattern {
                pattern: full_pattern.to_string(),
                reason: "pattern has no segments".to_string(),
            });
        };
        self.nodes[terminal.0].routes.push(route);
        Ok(terminal)
    }

    /// Resolve a concrete path
    ///
    /// Returns `None` when some segment matches no node, or when every node
    /// reached by the full path is a pure prefix without routes.
    #[must_use]
    pub fn match_route(&self, path: &str) -> Option<TreeMatch<'_, R>> {
        let segments = if path == DEFAULT_ROUTE {
            vec![DEFAULT_ROUTE]
        } else {
            self.split(path)
        };

        // Matched nodes of the previous level with the parameters collected so far.
        let mut matches: Vec<(NodeId, Parameters)> = Vec::new();

        for (depth, segment) in segments.iter().enumerate() {
            let (path_part, query) = match segment.split_once('?') {
                Some((part, raw)) => (part, Some(parse_query(raw))),
                None => (*segment, None),
            };

            // (candidate, index of the parent's entry in `matches`)
            let candidates: Vec<(NodeId, Option<usize>)> = if depth == 0 {
                self.roots.iter().map(|&id| (id, None)).collect()
            } else {
                matches
                    .iter()
                    .enumerate()
                    .flat_map(|(i, (id, _))| {
                        self.nodes[id.0].children.iter().map(move |&c| (c, Some(i)))
                    })
                    .collect()
            };

            let mut current = Vec::new();
            for (id, parent_idx) in candidates {
                let node = &self.nodes[id.0];
                if !node.accepts(path_part) {
                    continue;
                }
                let mut params = parent_idx
                    .map(|i| matches[i].1.clone())
                    .unwrap_or_default();
                if let Some(name) = node.parameter_name() {
                    params.set(name, path_part);
                }
                if let Some(query) = &query {
                    params.merge(query);
                }
                current.push((id, params));
            }

            if current.is_empty() {
                return None;
            }
            matches = current;
        }

        matches.into_iter().find_map(|(id, parameters)| {
            self.nodes[id.0].routes.first().map(|route| TreeMatch {
                route,
                node: id,
                parameters,
            })
        })
    }

    /// Look up a node by handle
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&TreeNode<R>> {
        self.nodes.get(id.0)
    }

    /// Root-level nodes in registration order
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Total number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of registered routes
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.nodes.iter().map(|n| n.routes.len()).sum()
    }

    #[must_use]
    pub fn has_default_route(&self) -> bool {
        self.has_default_route
    }

    #[must_use]
    pub fn empty_segments(&self) -> EmptySegmentPolicy {
        self.empty_segments
    }

    #[must_use]
    pub fn sibling_params(&self) -> SiblingParamPolicy {
        self.sibling_params
    }

    fn split<'p>(&self, path: &'p str) -> Vec<&'p str> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let mut segments: Vec<&str> = match self.empty_segments {
            EmptySegmentPolicy::Preserve => path.split('/').collect(),
            EmptySegmentPolicy::Collapse => path.split('/').filter(|s| !s.is_empty()).collect(),
        };
        if segments.is_empty() {
            segments.push("");
        }
        segments
    }

    fn siblings(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            Some(id) => &self.nodes[id.0].children,
            None => &self.roots,
        }
    }

    fn find_child(&self, parent: Option<NodeId>, segment: &str) -> Option<NodeId> {
        self.siblings(parent)
            .iter()
            .copied()
            .find(|id| self.nodes[id.0].segment == segment)
    }

    fn check_sibling_parameter(
        &self,
        parent: Option<NodeId>,
        segment: &str,
        pattern: &str,
    ) -> Result<(), RouteError> {
        if self.sibling_params != SiblingParamPolicy::Reject
            || NodeKind::classify(segment) != NodeKind::Parameter
        {
            return Ok(());
        }
        let existing = self
            .siblings(parent)
            .iter()
            .find_map(|id| self.nodes[id.0].parameter_name());
        match existing {
            Some(existing) => Err(RouteError::ConflictingParameter {
                pattern: pattern.to_string(),
                name: segment.trim_start_matches(PARAMETER_SIGIL).to_string(),
                existing: existing.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn push_node(&mut self, segment: &str, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode::new(segment, parent));
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    fn fmt_level(&self, f: &mut fmt::Formatter<'_>, ids: &[NodeId], level: usize) -> fmt::Result {
        for id in ids {
            let node = &self.nodes[id.0];
            writeln!(
                f,
                "{:indent$}{}: total routes={}",
                "",
                node.segment,
                node.routes.len(),
                indent = level * 4
            )?;
            self.fmt_level(f, &node.children, level + 1)?;
        }
        Ok(())
    }
}

impl<R> fmt::Display for RouteTree<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_level(f, &self.roots, 0)
    }
}
