use serde_json::{json, Value};

use crate::handlers::{Handler, HandlerRegistry};
use crate::manifest::RouteManifest;

/// Visual handler that renders its own name and the collected parameters
pub fn echo_handler(name: &str) -> Handler<(), Value> {
    let name = name.to_string();
    Handler::route(move |_, params| {
        Some(json!({
            "handler": name,
            "params": params,
        }))
    })
}

/// Registry with an echo handler for every name a manifest references
///
/// Lets a manifest be explored (e.g. from the command line) without the
/// application's real handlers.
#[must_use]
pub fn echo_registry(manifest: &RouteManifest) -> HandlerRegistry<(), Value> {
    let mut registry = HandlerRegistry::new();
    let names = manifest
        .routes
        .iter()
        .map(|r| r.handler.as_str())
        .chain(manifest.not_found.as_deref());
    for name in names {
        if !registry.contains(name) {
            registry.register_handler(name, echo_handler(name));
        }
    }
    registry
}
