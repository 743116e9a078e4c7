//! # Router Module
//!
//! The router module registers path patterns and resolves concrete paths to
//! the handler bound to them, together with the parameters captured from the
//! path and the values parsed from its query string.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Decomposing patterns such as `/user/:id` into a segment trie
//! - Matching incoming paths against the trie, breadth first, in registration order
//! - Collecting path parameters and query values into a multi-valued [`Parameters`] map
//! - Classifying the outcome as [`RouteMatch::Visual`], [`RouteMatch::NonVisual`]
//!   or [`RouteMatch::NoMatch`]
//!
//! ## Architecture
//!
//! - [`RouteTree`] is the trie. It is generic over the stored route value and
//!   knows nothing about handlers or transitions.
//! - [`Router`] stores [`AppRoute`]s in a `RouteTree`, applies transition
//!   defaults, invokes function handlers and falls back to the not-found
//!   handler.
//! - [`SharedRouter`] publishes copy-on-write snapshots of a `Router` so it can
//!   be read from many threads while routes are still being added.
//!
//! ## Example
//!
//! ```rust
//! use fluroute::router::{RouteMatchType, Router};
//! use fluroute::{Handler, TransitionConfig};
//!
//! let mut router: Router<(), String> = Router::new();
//! router
//!     .define("/settings", Handler::route(|_, _| Some("settings".into())), TransitionConfig::new())
//!     .unwrap();
//! router
//!     .define("/logout", Handler::function(|_, _| None), TransitionConfig::new())
//!     .unwrap();
//!
//! assert_eq!(router.match_route(&(), "/settings").match_type(), RouteMatchType::Visual);
//! assert_eq!(router.match_route(&(), "/logout").match_type(), RouteMatchType::NonVisual);
//! assert_eq!(router.match_route(&(), "/nope").match_type(), RouteMatchType::NoMatch);
//! ```
//!
//! ## Performance
//!
//! Lookups cost O(segments × branching factor) and allocate only for the
//! parameter maps of surviving candidates. Matches slower than
//! [`RouterConfig::slow_match_threshold`](crate::runtime_config::RouterConfig::slow_match_threshold)
//! are logged at `warn`.

mod core;
mod params;
mod query;
mod shared;
mod tree;
#[cfg(test)]
mod tests;

pub use core::{
    AppRoute, AppRouteMatch, MatchOptions, RouteMatch, RouteMatchType, RouteSettings, Router,
    VisualMatch, NO_MATCH_MESSAGE,
};
pub use params::{Parameters, MAX_INLINE_PARAMS};
pub use query::parse_query;
pub use shared::SharedRouter;
pub use tree::{
    EmptySegmentPolicy, NodeId, NodeKind, RouteTree, SiblingParamPolicy, TreeMatch, TreeNode,
    DEFAULT_ROUTE, PARAMETER_SIGIL,
};
