use std::collections::HashMap;
use std::fmt;

use tracing::{info, warn};

use super::types::Handler;
use crate::transition::TransitionBuilder;

/// Name-to-handler table used when routes are declared in a manifest
///
/// Manifests can only reference handlers by name, so the application
/// registers its handlers (and any custom transition builders) here before
/// building a [`Router`](crate::router::Router) from the manifest.
pub struct HandlerRegistry<C, W> {
    handlers: HashMap<String, Handler<C, W>>,
    transitions: HashMap<String, TransitionBuilder<C, W>>,
}

impl<C, W> HandlerRegistry<C, W> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            transitions: HashMap::new(),
        }
    }

    /// Register `handler` under `name`, replacing any previous handler
    pub fn register_handler(&mut self, name: &str, handler: Handler<C, W>) {
        let handler_type = handler.handler_type();
        if self.handlers.insert(name.to_string(), handler).is_some() {
            warn!(
                handler_name = %name,
                total_handlers = self.handlers.len(),
                "Replaced existing handler"
            );
        } else {
            info!(
                handler_name = %name,
                handler_type = %handler_type,
                total_handlers = self.handlers.len(),
                "Handler registered successfully"
            );
        }
    }

    /// Register a named custom transition builder
    pub fn register_transition(&mut self, name: &str, builder: TransitionBuilder<C, W>) {
        if self.transitions.insert(name.to_string(), builder).is_some() {
            warn!(transition_name = %name, "Replaced existing transition builder");
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Handler<C, W>> {
        self.handlers.get(name)
    }

    #[must_use]
    pub fn transition(&self, name: &str) -> Option<&TransitionBuilder<C, W>> {
        self.transitions.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered handler names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<C, W> Default for HandlerRegistry<C, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, W> Clone for HandlerRegistry<C, W> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
            transitions: self.transitions.clone(),
        }
    }
}

impl<C, W> fmt::Debug for HandlerRegistry<C, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .field("transitions", &self.transitions.len())
            .finish()
    }
}
