//! # fluroute
//!
//! **fluroute** is a path-pattern route registry. Applications register
//! patterns such as `/user/:id` bound to handlers and later resolve concrete
//! paths (`/user/42?tab=profile`) to the bound handler, the captured path
//! parameters and the parsed query values.
//!
//! ## Overview
//!
//! Resolution produces one of three outcomes:
//! - **Visual**: a handler that renders something, handed back together with
//!   its resolved transition settings for an external renderer
//! - **NonVisual**: a side-effecting function handler, invoked during matching
//! - **NoMatch**: nothing matched and no not-found handler is set
//!
//! Rendering, animation and navigation stacks are left to the caller; the
//! crate only decides *what* a path resolves to.
//!
//! ## Architecture
//!
//! - **[`router`]** - The segment trie ([`RouteTree`]), the [`Router`] facade,
//!   query parsing and the thread-shareable [`SharedRouter`]
//! - **[`handlers`]** - Visual and function handlers and the name-based
//!   [`HandlerRegistry`]
//! - **[`transition`]** - Transition metadata and its default resolution
//! - **[`manifest`]** - Route tables declared in YAML, JSON or TOML
//! - **[`hot_reload`]** - Rebuild a [`SharedRouter`] when a manifest changes
//! - **[`runtime_config`]** - Environment-driven router settings
//! - **[`logging`]** - Structured `tracing` subscriber setup
//! - **[`cli`]** - The `fluroute` command-line tool
//!
//! ## Quick Start
//!
//! ```rust
//! use fluroute::{Handler, RouteMatch, Router, TransitionConfig, TransitionType};
//!
//! let mut router: Router<(), String> = Router::new();
//! router.define_default(Handler::route(|_, _| Some("home".into())), TransitionConfig::new())?;
//! router.define(
//!     "/user/:id",
//!     Handler::route(|_, p| Some(format!("user {}", p.get("id")?))),
//!     TransitionConfig::new().kind(TransitionType::InFromRight),
//! )?;
//! router.define("/logout", Handler::function(|_, _| None), TransitionConfig::new())?;
//!
//! if let RouteMatch::Visual(m) = router.match_route(&(), "/user/42?tab=profile") {
//!     assert_eq!(m.parameters.get("id"), Some("42"));
//!     assert_eq!(m.parameters.get("tab"), Some("profile"));
//!     assert_eq!(m.transition.kind, TransitionType::InFromRight);
//!     assert_eq!(m.build(&()).as_deref(), Some("user 42"));
//! }
//! # Ok::<(), fluroute::RouteError>(())
//! ```
//!
//! ## Matching Rules
//!
//! - Patterns and paths are split on `/`; one leading `/` is optional
//! - `:name` segments match any non-empty segment and capture it
//! - `/` alone is the default route and may be registered once
//! - Candidates are explored breadth first in registration order; the first
//!   node reached by the whole path that has a route wins
//! - A `?query` suffix is parsed into the parameters and never affects which
//!   route matches
//!
//! ## Configuration
//!
//! [`RouterConfig::from_env`](runtime_config::RouterConfig::from_env) reads
//! `FLUROUTE_DEFAULT_TRANSITION_MS`, `FLUROUTE_EMPTY_SEGMENTS`,
//! `FLUROUTE_SIBLING_PARAMS` and `FLUROUTE_SLOW_MATCH_US`;
//! [`LogConfig::from_env`](logging::LogConfig::from_env) reads the
//! `FLUROUTE_LOG_*` variables.

pub mod cli;
pub mod echo;
pub mod error;
pub mod handlers;
pub mod hot_reload;
pub mod logging;
pub mod manifest;
pub mod router;
pub mod runtime_config;
pub mod transition;

pub use error::RouteError;
pub use handlers::{Handler, HandlerRegistry, HandlerType};
pub use manifest::{load_manifest, RouteManifest};
pub use router::{
    parse_query, MatchOptions, Parameters, RouteMatch, RouteMatchType, RouteSettings, RouteTree,
    Router, SharedRouter, VisualMatch,
};
pub use runtime_config::RouterConfig;
pub use transition::{
    ResolvedTransition, TransitionBuilder, TransitionConfig, TransitionProgress, TransitionType,
    DEFAULT_TRANSITION_DURATION,
};
