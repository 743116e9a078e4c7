use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::params::Parameters;
use super::tree::{RouteTree, DEFAULT_ROUTE};
use crate::error::RouteError;
use crate::handlers::{Handler, HandlerType};
use crate::runtime_config::RouterConfig;
use crate::transition::{
    ResolvedTransition, TransitionConfig, TransitionProgress, TransitionType,
};

/// Diagnostic reported when nothing matches and no not-found handler is set
pub const NO_MATCH_MESSAGE: &str = "No matching route was found";

/// A registered route: pattern, handler and transition settings
///
/// Immutable once registered. The router stores routes behind an `Arc`, so
/// matches hand out shared references rather than copies.
pub struct AppRoute<C, W> {
    pub pattern: String,
    pub handler: Handler<C, W>,
    pub transition: TransitionConfig<C, W>,
}

impl<C, W> AppRoute<C, W> {
    #[must_use]
    pub fn new(
        pattern: impl Into<String>,
        handler: Handler<C, W>,
        transition: TransitionConfig<C, W>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            handler,
            transition,
        }
    }
}

impl<C, W> Clone for AppRoute<C, W> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            handler: self.handler.clone(),
            transition: self.transition.clone(),
        }
    }
}

impl<C, W> PartialEq for AppRoute<C, W> {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
            && self.handler == other.handler
            && self.transition == other.transition
    }
}

impl<C, W> fmt::Debug for AppRoute<C, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppRoute")
            .field("pattern", &self.pattern)
            .field("handler", &self.handler)
            .field("transition", &self.transition)
            .finish()
    }
}

/// Raw lookup result: the matched route plus collected parameters
///
/// Returned by [`Router::resolve`], which never invokes a handler.
pub struct AppRouteMatch<C, W> {
    pub route: Arc<AppRoute<C, W>>,
    pub parameters: Parameters,
}

impl<C, W> Clone for AppRouteMatch<C, W> {
    fn clone(&self) -> Self {
        Self {
            route: Arc::clone(&self.route),
            parameters: self.parameters.clone(),
        }
    }
}

impl<C, W> PartialEq for AppRouteMatch<C, W> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.route, &other.route) && self.parameters == other.parameters
    }
}

impl<C, W> fmt::Debug for AppRouteMatch<C, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppRouteMatch")
            .field("pattern", &self.route.pattern)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Outcome category of [`Router::match_route`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMatchType {
    /// A renderable route was resolved
    Visual,
    /// A function handler was invoked; nothing to render
    NonVisual,
    /// Nothing matched and no not-found handler is set
    NoMatch,
}

impl fmt::Display for RouteMatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteMatchType::Visual => write!(f, "visual"),
            RouteMatchType::NonVisual => write!(f, "non_visual"),
            RouteMatchType::NoMatch => write!(f, "no_match"),
        }
    }
}

/// Settings handed to the renderer along with a visual match
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteSettings {
    /// Route name; defaults to the requested path
    pub name: String,
}

impl RouteSettings {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Per-call options for [`Router::match_route_with`]
pub struct MatchOptions<C, W> {
    /// Overrides applied on top of the route's own transition settings
    pub transition: TransitionConfig<C, W>,
    /// Whether the renderer should keep the route's state alive (default: `true`)
    pub maintain_state: bool,
    /// Settings for the renderer; `None` names the route after the path
    pub settings: Option<RouteSettings>,
}

impl<C, W> Default for MatchOptions<C, W> {
    fn default() -> Self {
        Self {
            transition: TransitionConfig::new(),
            maintain_state: true,
            settings: None,
        }
    }
}

impl<C, W> Clone for MatchOptions<C, W> {
    fn clone(&self) -> Self {
        Self {
            transition: self.transition.clone(),
            maintain_state: self.maintain_state,
            settings: self.settings.clone(),
        }
    }
}

impl<C, W> fmt::Debug for MatchOptions<C, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchOptions")
            .field("transition", &self.transition)
            .field("maintain_state", &self.maintain_state)
            .field("settings", &self.settings)
            .finish()
    }
}

/// Everything the renderer needs to show a resolved route
pub struct VisualMatch<C, W> {
    /// Matched pattern; `None` when the not-found handler was substituted
    pub pattern: Option<String>,
    pub handler: Handler<C, W>,
    pub transition: ResolvedTransition<C, W>,
    pub parameters: Parameters,
    pub settings: RouteSettings,
    pub maintain_state: bool,
}

impl<C, W> VisualMatch<C, W> {
    /// Run the handler against the collected parameters
    pub fn build(&self, ctx: &C) -> Option<W> {
        self.handler.call(ctx, &self.parameters)
    }

    /// Run the handler and wrap its result in the custom transition, if any
    pub fn build_with_transition(&self, ctx: &C, progress: &TransitionProgress) -> Option<W> {
        let child = self.build(ctx)?;
        Some(match &self.transition.builder {
            Some(builder) => builder.apply(ctx, progress, child),
            None => child,
        })
    }

    /// Whether this match came from the not-found handler
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.pattern.is_none()
    }

    #[must_use]
    pub fn fullscreen_dialog(&self) -> bool {
        self.transition.kind.is_fullscreen_dialog()
    }
}

impl<C, W> Clone for VisualMatch<C, W> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            handler: self.handler.clone(),
            transition: self.transition.clone(),
            parameters: self.parameters.clone(),
            settings: self.settings.clone(),
            maintain_state: self.maintain_state,
        }
    }
}

impl<C, W> PartialEq for VisualMatch<C, W> {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
            && self.handler == other.handler
            && self.transition == other.transition
            && self.parameters == other.parameters
            && self.settings == other.settings
            && self.maintain_state == other.maintain_state
    }
}

impl<C, W> fmt::Debug for VisualMatch<C, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisualMatch")
            .field("pattern", &self.pattern)
            .field("handler", &self.handler)
            .field("transition", &self.transition)
            .field("parameters", &self.parameters)
            .field("settings", &self.settings)
            .field("maintain_state", &self.maintain_state)
            .finish()
    }
}

/// Result of [`Router::match_route`]
///
/// Matching never fails with an error; every outcome is one of these.
pub enum RouteMatch<C, W> {
    /// Render this
    Visual(VisualMatch<C, W>),
    /// A function handler already ran
    NonVisual {
        /// Matched pattern; `None` when the not-found handler ran
        pattern: Option<String>,
        parameters: Parameters,
    },
    /// Nothing matched
    NoMatch {
        /// Diagnostic for the caller
        message: String,
    },
}

impl<C, W> RouteMatch<C, W> {
    #[must_use]
    pub fn match_type(&self) -> RouteMatchType {
        match self {
            RouteMatch::Visual(_) => RouteMatchType::Visual,
            RouteMatch::NonVisual { .. } => RouteMatchType::NonVisual,
            RouteMatch::NoMatch { .. } => RouteMatchType::NoMatch,
        }
    }

    #[must_use]
    pub fn was_successful(&self) -> bool {
        !matches!(self, RouteMatch::NoMatch { .. })
    }

    /// Collected parameters; `None` for [`RouteMatch::NoMatch`]
    #[must_use]
    pub fn parameters(&self) -> Option<&Parameters> {
        match self {
            RouteMatch::Visual(v) => Some(&v.parameters),
            RouteMatch::NonVisual { parameters, .. } => Some(parameters),
            RouteMatch::NoMatch { .. } => None,
        }
    }

    /// Matched pattern, if a registered route (not the fallback) was hit
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        match self {
            RouteMatch::Visual(v) => v.pattern.as_deref(),
            RouteMatch::NonVisual { pattern, .. } => pattern.as_deref(),
            RouteMatch::NoMatch { .. } => None,
        }
    }

    #[must_use]
    pub fn as_visual(&self) -> Option<&VisualMatch<C, W>> {
        match self {
            RouteMatch::Visual(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            RouteMatch::NoMatch { message } => Some(message),
            _ => None,
        }
    }
}

impl<C, W> Clone for RouteMatch<C, W> {
    fn clone(&self) -> Self {
        match self {
            RouteMatch::Visual(v) => RouteMatch::Visual(v.clone()),
            RouteMatch::NonVisual {
                pattern,
                parameters,
            } => RouteMatch::NonVisual {
                pattern: pattern.clone(),
                parameters: parameters.clone(),
            },
            RouteMatch::NoMatch { message } => RouteMatch::NoMatch {
                message: message.clone(),
            },
        }
    }
}

impl<C, W> PartialEq for RouteMatch<C, W> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RouteMatch::Visual(a), RouteMatch::Visual(b)) => a == b,
            (
                RouteMatch::NonVisual {
                    pattern: pa,
                    parameters: a,
                },
                RouteMatch::NonVisual {
                    pattern: pb,
                    parameters: b,
                },
            ) => pa == pb && a == b,
            (RouteMatch::NoMatch { message: a }, RouteMatch::NoMatch { message: b }) => a == b,
            _ => false,
        }
    }
}

impl<C, W> fmt::Debug for RouteMatch<C, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteMatch::Visual(v) => f.debug_tuple("Visual").field(v).finish(),
            RouteMatch::NonVisual {
                pattern,
                parameters,
            } => f
                .debug_struct("NonVisual")
                .field("pattern", pattern)
                .field("parameters", parameters)
                .finish(),
            RouteMatch::NoMatch { message } => {
                f.debug_struct("NoMatch").field("message", message).finish()
            }
        }
    }
}

/// Route registry over a single [`RouteTree`]
///
/// `C` is the context the renderer passes to handlers and `W` what visual
/// handlers produce. The router is an ordinary owned value; wrap it in a
/// [`SharedRouter`](super::SharedRouter) to register routes after it has been
/// shared between threads.
///
/// # Example
///
/// ```rust
/// use fluroute::{Handler, RouteMatch, Router, TransitionConfig};
///
/// let mut router: Router<(), String> = Router::new();
/// router
///     .define(
///         "/user/:id",
///         Handler::route(|_, p| p.get("id").map(|id| format!("user {id}"))),
///         TransitionConfig::new(),
///     )
///     .unwrap();
///
/// match router.match_route(&(), "/user/42?tab=profile") {
///     RouteMatch::Visual(m) => {
///         assert_eq!(m.parameters.get("tab"), Some("profile"));
///         assert_eq!(m.build(&()), Some("user 42".to_string()));
///     }
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub struct Router<C, W> {
    tree: RouteTree<Arc<AppRoute<C, W>>>,
    not_found: Option<Handler<C, W>>,
    config: RouterConfig,
    patterns: Vec<String>,
}

impl<C, W> Default for Router<C, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, W> Clone for Router<C, W> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            not_found: self.not_found.clone(),
            config: self.config,
            patterns: self.patterns.clone(),
        }
    }
}

impl<C, W> fmt::Debug for Router<C, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("patterns", &self.patterns)
            .field("not_found", &self.not_found)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<C, W> Router<C, W> {
    /// Create an empty router with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Create an empty router with explicit configuration
    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            tree: RouteTree::with_policies(config.empty_segments, config.sibling_params),
            not_found: None,
            config,
            patterns: Vec::new(),
        }
    }

    /// Register `handler` under `pattern`
    ///
    /// An unset transition duration is filled with the configured default.
    ///
    /// # Errors
    ///
    /// - [`RouteError::MissingTransitionBuilder`] for a custom transition
    ///   without a builder
    /// - any error from [`RouteTree::add_route`]; the router is unchanged
    pub fn define(
        &mut self,
        pattern: &str,
        handler: Handler<C, W>,
        transition: TransitionConfig<C, W>,
    ) -> Result<(), RouteError> {
        if transition.kind == Some(TransitionType::Custom) && transition.builder.is_none() {
            return Err(RouteError::MissingTransitionBuilder {
                pattern: pattern.to_string(),
            });
        }

        let transition = transition.with_default_duration(self.config.default_transition_duration);
        let handler_type = handler.handler_type();
        let route = Arc::new(AppRoute::new(pattern, handler, transition));
        let node = self.tree.add_route(pattern, route)?;
        self.patterns.push(pattern.to_string());

        debug!(
            pattern = %pattern,
            handler_type = %handler_type,
            node = node.index(),
            total_routes = self.patterns.len(),
            "Route registered"
        );
        Ok(())
    }

    /// Register the application's initial route (`/`)
    ///
    /// # Errors
    ///
    /// [`RouteError::DuplicateDefaultRoute`] if one is already registered.
    pub fn define_default(
        &mut self,
        handler: Handler<C, W>,
        transition: TransitionConfig<C, W>,
    ) -> Result<(), RouteError> {
        self.define(DEFAULT_ROUTE, handler, transition)
    }

    /// Set the handler used when nothing matches
    pub fn set_not_found_handler(&mut self, handler: Handler<C, W>) {
        debug!(handler_type = %handler.handler_type(), "Not-found handler set");
        self.not_found = Some(handler);
    }

    #[must_use]
    pub fn not_found_handler(&self) -> Option<&Handler<C, W>> {
        self.not_found.as_ref()
    }

    /// Look up `path` without invoking anything
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<AppRouteMatch<C, W>> {
        self.tree.match_route(path).map(|m| AppRouteMatch {
            route: Arc::clone(m.route),
            parameters: m.parameters,
        })
    }

    /// Resolve `path` and classify the outcome
    ///
    /// Function handlers (including a function-typed not-found handler) are
    /// invoked here with the collected parameters.
    pub fn match_route(&self, ctx: &C, path: &str) -> RouteMatch<C, W> {
        self.match_route_with(ctx, path, &MatchOptions::default())
    }

    /// [`Router::match_route`] with per-call transition overrides and settings
    pub fn match_route_with(
        &self,
        ctx: &C,
        path: &str,
        options: &MatchOptions<C, W>,
    ) -> RouteMatch<C, W> {
        debug!(path = %path, algorithm = "segment_trie", "Route match attempt");

        let match_start = Instant::now();
        let found = self.resolve(path);
        let match_duration = match_start.elapsed();

        if match_duration > self.config.slow_match_threshold {
            warn!(
                path = %path,
                duration_us = match_duration.as_micros(),
                threshold_us = self.config.slow_match_threshold.as_micros(),
                "Slow route matching detected"
            );
        }

        if let Some(AppRouteMatch { route, parameters }) = found {
            info!(
                path = %path,
                pattern = %route.pattern,
                handler_type = %route.handler.handler_type(),
                param_count = parameters.len(),
                duration_us = match_duration.as_micros(),
                "Route matched"
            );
            return self.classify(
                ctx,
                path,
                Some(route.pattern.as_str()),
                &route.handler,
                &route.transition,
                parameters,
                options,
            );
        }

        warn!(
            path = %path,
            duration_us = match_duration.as_micros(),
            has_not_found_handler = self.not_found.is_some(),
            "No route matched"
        );

        match &self.not_found {
            Some(handler) => self.classify(
                ctx,
                path,
                None,
                handler,
                &TransitionConfig::new(),
                Parameters::new(),
                options,
            ),
            None => RouteMatch::NoMatch {
                message: format!("{NO_MATCH_MESSAGE} for '{path}'"),
            },
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn classify(
        &self,
        ctx: &C,
        path: &str,
        pattern: Option<&str>,
        handler: &Handler<C, W>,
        transition: &TransitionConfig<C, W>,
        parameters: Parameters,
        options: &MatchOptions<C, W>,
    ) -> RouteMatch<C, W> {
        match handler.handler_type() {
            HandlerType::Function => {
                handler.call(ctx, &parameters);
                RouteMatch::NonVisual {
                    pattern: pattern.map(str::to_string),
                    parameters,
                }
            }
            HandlerType::Route => RouteMatch::Visual(VisualMatch {
                pattern: pattern.map(str::to_string),
                handler: handler.clone(),
                transition: ResolvedTransition::resolve(
                    transition,
                    &options.transition,
                    self.config.default_transition_duration,
                ),
                parameters,
                settings: options
                    .settings
                    .clone()
                    .unwrap_or_else(|| RouteSettings::named(path)),
                maintain_state: options.maintain_state,
            }),
        }
    }

    /// The underlying route tree
    #[must_use]
    pub fn tree(&self) -> &RouteTree<Arc<AppRoute<C, W>>> {
        &self.tree
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Registered patterns in registration order
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    #[must_use]
    pub fn route_count(&self) -> usize {
        self.patterns.len()
    }

    /// Write a summary line followed by the indented route tree
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn dump_tree(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            "[routes] count={} default_route={}",
            self.route_count(),
            self.tree.has_default_route()
        )?;
        write!(out, "{}", self.tree)
    }
}
