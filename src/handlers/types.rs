use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::router::Parameters;

/// Function shared by both handler kinds
///
/// Receives the caller's context and the parameters collected for the match.
/// Visual handlers return the renderable result; function handlers usually
/// return `None` and act through side effects.
pub type HandlerFunc<C, W> = Arc<dyn Fn(&C, &Parameters) -> Option<W> + Send + Sync>;

/// Whether a handler produces something to show or only runs for its effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerType {
    /// Builds a renderable result for the external renderer
    #[default]
    Route,
    /// Invoked immediately at match time; nothing is rendered
    Function,
}

impl fmt::Display for HandlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerType::Route => write!(f, "route"),
            HandlerType::Function => write!(f, "function"),
        }
    }
}

/// A handler bound to a route pattern
///
/// `C` is the caller's context (whatever the rendering layer passes down) and
/// `W` is the renderable result. Cloning shares the underlying function.
pub enum Handler<C, W> {
    /// Visual handler: resolved into a [`VisualMatch`](crate::router::VisualMatch)
    Route(HandlerFunc<C, W>),
    /// Side-effecting handler: invoked by the router during matching
    Function(HandlerFunc<C, W>),
}

impl<C, W> Handler<C, W> {
    /// Create a visual handler
    pub fn route<F>(f: F) -> Self
    where
        F: Fn(&C, &Parameters) -> Option<W> + Send + Sync + 'static,
    {
        Handler::Route(Arc::new(f))
    }

    /// Create a function handler
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&C, &Parameters) -> Option<W> + Send + Sync + 'static,
    {
        Handler::Function(Arc::new(f))
    }

    #[must_use]
    pub fn handler_type(&self) -> HandlerType {
        match self {
            Handler::Route(_) => HandlerType::Route,
            Handler::Function(_) => HandlerType::Function,
        }
    }

    /// Run the handler
    pub fn call(&self, ctx: &C, parameters: &Parameters) -> Option<W> {
        self.func()(ctx, parameters)
    }

    fn func(&self) -> &HandlerFunc<C, W> {
        match self {
            Handler::Route(f) | Handler::Function(f) => f,
        }
    }
}

impl<C, W> Clone for Handler<C, W> {
    fn clone(&self) -> Self {
        match self {
            Handler::Route(f) => Handler::Route(Arc::clone(f)),
            Handler::Function(f) => Handler::Function(Arc::clone(f)),
        }
    }
}

/// Handlers compare by identity: same kind and same shared function.
impl<C, W> PartialEq for Handler<C, W> {
    fn eq(&self, other: &Self) -> bool {
        self.handler_type() == other.handler_type() && Arc::ptr_eq(self.func(), other.func())
    }
}

impl<C, W> fmt::Debug for Handler<C, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("type", &self.handler_type())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_handler_type_tags() {
        let visual: Handler<(), String> = Handler::route(|_, _| Some("page".to_string()));
        let func: Handler<(), String> = Handler::function(|_, _| None);
        assert_eq!(visual.handler_type(), HandlerType::Route);
        assert_eq!(func.handler_type(), HandlerType::Function);
    }

    #[test]
    fn test_call_passes_parameters() {
        let handler: Handler<u32, String> = Handler::route(|ctx, params| {
            Some(format!("{ctx}:{}", params.get("id").unwrap_or("-")))
        });
        let params: Parameters = [("id", "7")].into_iter().collect();
        assert_eq!(handler.call(&3, &params), Some("3:7".to_string()));
    }

    #[test]
    fn test_function_handler_runs_side_effect() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let handler: Handler<(), ()> = Handler::function(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            None
        });
        assert!(handler.call(&(), &Parameters::new()).is_none());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clone_shares_identity() {
        let a: Handler<(), ()> = Handler::route(|_, _| None);
        let b = a.clone();
        let c: Handler<(), ()> = Handler::route(|_, _| None);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_handler_type_serde_names() {
        let t: HandlerType = serde_json::from_str("\"function\"").unwrap();
        assert_eq!(t, HandlerType::Function);
        assert_eq!(HandlerType::Route.to_string(), "route");
    }
}
