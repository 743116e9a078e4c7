//! Transition metadata carried by routes.
//!
//! The router never animates anything. It stores what a route asked for,
//! fills in defaults and hands the resolved values to the renderer together
//! with the matched handler.
//!
//! Resolution rules when a route is matched:
//!
//! | Field    | Rule                                                          |
//! |----------|---------------------------------------------------------------|
//! | kind     | match override, else route value, else [`TransitionType::Native`] |
//! | duration | zero for [`TransitionType::None`], else override, else route, else default |
//! | builder  | only for [`TransitionType::Custom`]: override, else route builder |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Duration applied when neither the route nor the caller specifies one
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(250);

/// Visual transition requested for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionType {
    /// Platform default page transition
    #[default]
    Native,
    /// Platform default modal presentation
    NativeModal,
    InFromLeft,
    InFromTop,
    InFromRight,
    InFromBottom,
    FadeIn,
    /// Rendered by a caller supplied [`TransitionBuilder`]
    Custom,
    Material,
    MaterialFullScreenDialog,
    Cupertino,
    CupertinoFullScreenDialog,
    /// No animation; the resolved duration is always zero
    None,
}

impl TransitionType {
    /// Every variant, in declaration order
    pub const ALL: [TransitionType; 13] = [
        TransitionType::Native,
        TransitionType::NativeModal,
        TransitionType::InFromLeft,
        TransitionType::InFromTop,
        TransitionType::InFromRight,
        TransitionType::InFromBottom,
        TransitionType::FadeIn,
        TransitionType::Custom,
        TransitionType::Material,
        TransitionType::MaterialFullScreenDialog,
        TransitionType::Cupertino,
        TransitionType::CupertinoFullScreenDialog,
        TransitionType::None,
    ];

    /// Name used in manifests and logs
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TransitionType::Native => "native",
            TransitionType::NativeModal => "nativeModal",
            TransitionType::InFromLeft => "inFromLeft",
            TransitionType::InFromTop => "inFromTop",
            TransitionType::InFromRight => "inFromRight",
            TransitionType::InFromBottom => "inFromBottom",
            TransitionType::FadeIn => "fadeIn",
            TransitionType::Custom => "custom",
            TransitionType::Material => "material",
            TransitionType::MaterialFullScreenDialog => "materialFullScreenDialog",
            TransitionType::Cupertino => "cupertino",
            TransitionType::CupertinoFullScreenDialog => "cupertinoFullScreenDialog",
            TransitionType::None => "none",
        }
    }

    /// Whether the renderer should present the route as a full screen dialog
    #[must_use]
    pub fn is_fullscreen_dialog(self) -> bool {
        matches!(
            self,
            TransitionType::NativeModal
                | TransitionType::MaterialFullScreenDialog
                | TransitionType::CupertinoFullScreenDialog
        )
    }
}

impl fmt::Display for TransitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Animation progress handed to a custom transition builder
///
/// Both values run from `0.0` to `1.0`. `secondary_animation` tracks the
/// route being covered by the next one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransitionProgress {
    pub animation: f64,
    pub secondary_animation: f64,
}

/// Caller supplied function that wraps a rendered child in a transition
///
/// Called synchronously by the renderer with its context, the current
/// animation progress and the child produced by the route handler.
pub struct TransitionBuilder<C, W>(Arc<dyn Fn(&C, &TransitionProgress, W) -> W + Send + Sync>);

impl<C, W> TransitionBuilder<C, W> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&C, &TransitionProgress, W) -> W + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Wrap `child` for the given progress
    pub fn apply(&self, ctx: &C, progress: &TransitionProgress, child: W) -> W {
        (self.0)(ctx, progress, child)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<C, W> Clone for TransitionBuilder<C, W> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<C, W> PartialEq for TransitionBuilder<C, W> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<C, W> fmt::Debug for TransitionBuilder<C, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TransitionBuilder(..)")
    }
}

/// Optional transition settings attached to a route or to a single match
///
/// Every field is optional; see the module docs for how absent fields are
/// filled in.
pub struct TransitionConfig<C, W> {
    pub kind: Option<TransitionType>,
    pub duration: Option<Duration>,
    pub builder: Option<TransitionBuilder<C, W>>,
}

impl<C, W> TransitionConfig<C, W> {
    /// Empty configuration: everything falls back to defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            kind: None,
            duration: None,
            builder: None,
        }
    }

    #[must_use]
    pub fn kind(mut self, kind: TransitionType) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Attach a builder; also sets the kind to [`TransitionType::Custom`]
    #[must_use]
    pub fn custom(mut self, builder: TransitionBuilder<C, W>) -> Self {
        self.kind = Some(TransitionType::Custom);
        self.builder = Some(builder);
        self
    }

    /// Fill an unset duration with `default`
    #[must_use]
    pub fn with_default_duration(mut self, default: Duration) -> Self {
        if self.duration.is_none() {
            self.duration = Some(default);
        }
        self
    }
}

impl<C, W> Default for TransitionConfig<C, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, W> Clone for TransitionConfig<C, W> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            duration: self.duration,
            builder: self.builder.clone(),
        }
    }
}

impl<C, W> PartialEq for TransitionConfig<C, W> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.duration == other.duration && self.builder == other.builder
    }
}

impl<C, W> fmt::Debug for TransitionConfig<C, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionConfig")
            .field("kind", &self.kind)
            .field("duration", &self.duration)
            .field("builder", &self.builder.is_some())
            .finish()
    }
}

/// Transition values after defaults and overrides have been applied
pub struct ResolvedTransition<C, W> {
    pub kind: TransitionType,
    pub duration: Duration,
    /// Present only when `kind` is [`TransitionType::Custom`]
    pub builder: Option<TransitionBuilder<C, W>>,
}

impl<C, W> ResolvedTransition<C, W> {
    /// Combine a route's configuration with per-match overrides
    pub fn resolve(
        route: &TransitionConfig<C, W>,
        overrides: &TransitionConfig<C, W>,
        default_duration: Duration,
    ) -> Self {
        let kind = overrides.kind.or(route.kind).unwrap_or_default();
        let duration = if kind == TransitionType::None {
            Duration::ZERO
        } else {
            overrides
                .duration
                .or(route.duration)
                .unwrap_or(default_duration)
        };
        let builder = if kind == TransitionType::Custom {
            overrides
                .builder
                .as_ref()
                .or(route.builder.as_ref())
                .cloned()
        } else {
            None
        };
        Self {
            kind,
            duration,
            builder,
        }
    }
}

impl<C, W> Clone for ResolvedTransition<C, W> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            duration: self.duration,
            builder: self.builder.clone(),
        }
    }
}

impl<C, W> PartialEq for ResolvedTransition<C, W> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.duration == other.duration && self.builder == other.builder
    }
}

impl<C, W> fmt::Debug for ResolvedTransition<C, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedTransition")
            .field("kind", &self.kind)
            .field("duration", &self.duration)
            .field("builder", &self.builder.is_some())
            .finish()
    }
}
