//! Route manifests: route tables declared in YAML, JSON or TOML
//!
//! A manifest binds patterns to handler *names*. Handlers themselves are code,
//! so they are looked up in a [`HandlerRegistry`] when the router is built.
//!
//! ```yaml
//! not_found: missing
//! routes:
//!   - pattern: /
//!     handler: home
//!   - pattern: /user/:id
//!     handler: user
//!     transition: inFromRight
//!     transition_duration_ms: 200
//!   - pattern: /logout
//!     handler: logout
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RouteError;
use crate::handlers::HandlerRegistry;
use crate::router::Router;
use crate::runtime_config::RouterConfig;
use crate::transition::{TransitionConfig, TransitionType};

/// Handler name used in errors for the not-found binding
const NOT_FOUND_BINDING: &str = "<not-found>";

/// A declared route table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteManifest {
    /// Handler used when nothing matches
    #[serde(default)]
    pub not_found: Option<String>,
    /// Routes in registration order
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

impl RouteManifest {
    /// No routes and no not-found handler, e.g. a file caught mid-write
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty() && self.not_found.is_none()
    }
}

/// One route of a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub pattern: String,
    /// Name of a handler in the registry
    pub handler: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_duration_ms: Option<u64>,
    /// Name of a transition builder in the registry (for `custom`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_builder: Option<String>,
}

/// Serialization format of a manifest file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
    Toml,
}

impl ManifestFormat {
    /// Pick the format from the file extension; anything unknown is JSON
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => ManifestFormat::Yaml,
            Some("toml") => ManifestFormat::Toml,
            _ => ManifestFormat::Json,
        }
    }
}

/// Parse manifest text in the given format
///
/// # Errors
///
/// Returns the deserializer's error for malformed input.
pub fn parse_manifest(content: &str, format: ManifestFormat) -> anyhow::Result<RouteManifest> {
    let manifest = match format {
        ManifestFormat::Yaml => serde_yaml::from_str(content)?,
        ManifestFormat::Json => serde_json::from_str(content)?,
        ManifestFormat::Toml => toml::from_str(content)?,
    };
    Ok(manifest)
}

/// Read and parse a manifest file
///
/// # Errors
///
/// Fails if the file cannot be read or does not parse; the error names the file.
pub fn load_manifest(path: impl AsRef<Path>) -> anyhow::Result<RouteManifest> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    parse_manifest(&content, ManifestFormat::from_path(path))
        .with_context(|| format!("failed to parse manifest {}", path.display()))
}

impl<C, W> Router<C, W> {
    /// Build a router from a manifest, resolving names through `registry`
    ///
    /// # Errors
    ///
    /// - [`RouteError::UnknownHandler`] / [`RouteError::UnknownTransition`]
    ///   for names missing from the registry
    /// - any error from [`Router::define`]
    pub fn from_manifest(
        manifest: &RouteManifest,
        registry: &HandlerRegistry<C, W>,
        config: RouterConfig,
    ) -> Result<Self, RouteError> {
        let mut router = Router::with_config(config);

        for entry in &manifest.routes {
            let handler = registry
                .get(&entry.handler)
                .ok_or_else(|| RouteError::UnknownHandler {
                    handler: entry.handler.clone(),
                    pattern: entry.pattern.clone(),
                })?
                .clone();
            let transition = entry_transition(entry, registry)?;
            router.define(&entry.pattern, handler, transition)?;
        }

        if let Some(name) = &manifest.not_found {
            let handler = registry
                .get(name)
                .ok_or_else(|| RouteError::UnknownHandler {
                    handler: name.clone(),
                    pattern: NOT_FOUND_BINDING.to_string(),
                })?
                .clone();
            router.set_not_found_handler(handler);
        }

        info!(
            routes_count = router.route_count(),
            has_not_found = router.not_found_handler().is_some(),
            "Routing table loaded"
        );
        Ok(router)
    }
}

fn entry_transition<C, W>(
    entry: &RouteEntry,
    registry: &HandlerRegistry<C, W>,
) -> Result<TransitionConfig<C, W>, RouteError> {
    let mut transition = TransitionConfig::new();
    transition.kind = entry.transition;
    transition.duration = entry.transition_duration_ms.map(Duration::from_millis);
    if let Some(name) = &entry.transition_builder {
        let builder = registry
            .transition(name)
            .ok_or_else(|| RouteError::UnknownTransition {
                builder: name.clone(),
                pattern: entry.pattern.clone(),
            })?;
        transition = transition.custom(builder.clone());
    }
    Ok(transition)
}
