//! Registration and configuration errors.
//!
//! Matching never fails with an error: a path that resolves to nothing is
//! reported as [`RouteMatch::NoMatch`](crate::router::RouteMatch::NoMatch).
//! Everything here is raised while the route table is being built.

use thiserror::Error;

/// Errors raised while building a route table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The default route (`/`) was registered more than once
    ///
    /// The tree is left exactly as it was after the first registration.
    #[error("default route was already defined")]
    DuplicateDefaultRoute,

    /// A second, differently named parameter segment was registered under the
    /// same parent while [`SiblingParamPolicy::Reject`](crate::router::SiblingParamPolicy::Reject)
    /// is active
    #[error(
        "pattern '{pattern}' declares parameter ':{name}' next to existing parameter ':{existing}'"
    )]
    ConflictingParameter {
        /// The pattern being registered
        pattern: String,
        /// Parameter name the new pattern tried to introduce
        name: String,
        /// Parameter name already present at that position
        existing: String,
    },

    /// A pattern that cannot be decomposed into segments
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Why it was refused
        reason: String,
    },

    /// A route asked for a custom transition without supplying a builder
    #[error("pattern '{pattern}' uses a custom transition but no transition builder was given")]
    MissingTransitionBuilder {
        /// The pattern being registered
        pattern: String,
    },

    /// A manifest referenced a handler name that is not in the registry
    #[error("no handler named '{handler}' is registered (referenced by '{pattern}')")]
    UnknownHandler {
        /// Handler name from the manifest
        handler: String,
        /// Pattern that referenced it (or `<not-found>`)
        pattern: String,
    },

    /// A manifest referenced a transition builder name that is not in the registry
    #[error("no transition builder named '{builder}' is registered (referenced by '{pattern}')")]
    UnknownTransition {
        /// Builder name from the manifest
        builder: String,
        /// Pattern that referenced it
        pattern: String,
    },
}
