//! # Runtime Configuration Module
//!
//! Environment-driven settings for building a [`Router`](crate::router::Router).
//!
//! ## Environment Variables
//!
//! ### `FLUROUTE_DEFAULT_TRANSITION_MS`
//!
//! Transition duration (milliseconds) given to routes that do not set one.
//!
//! Default: `250`
//!
//! ### `FLUROUTE_EMPTY_SEGMENTS`
//!
//! `preserve` keeps empty segments (`/a//b`, trailing `/`) as literal
//! empty-string segments; `collapse` drops them.
//!
//! Default: `preserve`
//!
//! ### `FLUROUTE_SIBLING_PARAMS`
//!
//! `first-wins` allows several parameter segments under the same parent and
//! lets the first registered one win; `reject` refuses the second one at
//! registration time.
//!
//! Default: `first-wins`
//!
//! ### `FLUROUTE_SLOW_MATCH_US`
//!
//! Matches slower than this many microseconds are logged at `warn`.
//!
//! Default: `1000`
//!
//! ## Usage
//!
//! ```rust
//! use fluroute::runtime_config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! println!("default transition: {:?}", config.default_transition_duration);
//! ```

use std::env;
use std::time::Duration;

use crate::router::{EmptySegmentPolicy, SiblingParamPolicy};
use crate::transition::DEFAULT_TRANSITION_DURATION;

const DEFAULT_SLOW_MATCH: Duration = Duration::from_millis(1);

/// Router configuration loaded from environment variables.
///
/// Load this at startup using [`RouterConfig::from_env()`] or start from
/// [`RouterConfig::default()`] and adjust fields directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// Duration applied to routes without an explicit one (default: 250 ms)
    pub default_transition_duration: Duration,
    /// Treatment of empty path segments
    pub empty_segments: EmptySegmentPolicy,
    /// Treatment of several parameter segments under one parent
    pub sibling_params: SiblingParamPolicy,
    /// Matches slower than this are logged as slow (default: 1 ms)
    pub slow_match_threshold: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_transition_duration: DEFAULT_TRANSITION_DURATION,
            empty_segments: EmptySegmentPolicy::default(),
            sibling_params: SiblingParamPolicy::default(),
            slow_match_threshold: DEFAULT_SLOW_MATCH,
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_transition_duration = lookup("FLUROUTE_DEFAULT_TRANSITION_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map_or(defaults.default_transition_duration, Duration::from_millis);

        let empty_segments = lookup("FLUROUTE_EMPTY_SEGMENTS")
            .map_or(defaults.empty_segments, |v| EmptySegmentPolicy::parse(&v));

        let sibling_params = lookup("FLUROUTE_SIBLING_PARAMS")
            .map_or(defaults.sibling_params, |v| SiblingParamPolicy::parse(&v));

        let slow_match_threshold = lookup("FLUROUTE_SLOW_MATCH_US")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map_or(defaults.slow_match_threshold, Duration::from_micros);

        RouterConfig {
            default_transition_duration,
            empty_segments,
            sibling_params,
            slow_match_threshold,
        }
    }
}
