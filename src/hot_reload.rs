//! # Hot Reload Module
//!
//! Live reloading of route manifests without restarting the application.
//!
//! ## Overview
//!
//! [`watch_manifest`] watches a manifest file and, whenever it is modified or
//! recreated:
//! - Reloads and parses the manifest
//! - Builds a new [`Router`] against the same [`HandlerRegistry`]
//! - Publishes it through [`SharedRouter::replace`]
//! - Calls the reload hook with the published router
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fluroute::echo::echo_registry;
//! use fluroute::hot_reload::watch_manifest;
//! use fluroute::manifest::load_manifest;
//! use fluroute::runtime_config::RouterConfig;
//! use fluroute::{Router, SharedRouter};
//!
//! # fn main() -> anyhow::Result<()> {
//! let manifest = load_manifest("routes.yaml")?;
//! let registry = echo_registry(&manifest);
//! let config = RouterConfig::from_env();
//! let router = Arc::new(SharedRouter::new(Router::from_manifest(&manifest, &registry, config)?));
//!
//! let _watcher = watch_manifest("routes.yaml", registry, config, Arc::clone(&router), |r| {
//!     println!("Reloaded {} routes", r.route_count());
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! If the new manifest fails to load or references unknown handlers, the
//! error is logged and the previous router stays active. A manifest with no
//! routes and no not-found handler (such as a file truncated by a save in
//! progress) is ignored the same way.

use crate::handlers::HandlerRegistry;
use crate::manifest::load_manifest;
use crate::router::{Router, SharedRouter};
use crate::runtime_config::RouterConfig;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Watch a manifest file and republish the router when it changes.
///
/// The returned watcher stops watching when dropped.
///
/// # Errors
///
/// Fails if the watcher cannot be created or the path cannot be watched.
pub fn watch_manifest<P, C, W, F>(
    manifest_path: P,
    registry: HandlerRegistry<C, W>,
    config: RouterConfig,
    router: Arc<SharedRouter<C, W>>,
    mut on_reload: F,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    C: 'static,
    W: 'static,
    F: FnMut(&Router<C, W>) + Send + 'static,
{
    let path: PathBuf = manifest_path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    return;
                }
                let manifest = match load_manifest(&watch_path) {
                    Ok(manifest) => manifest,
                    Err(e) => {
                        warn!(path = %watch_path.display(), error = %format!("{e:#}"), "hot-reload: manifest rejected");
                        return;
                    }
                };
                if manifest.is_empty() {
                    warn!(path = %watch_path.display(), "hot-reload: empty manifest ignored");
                    return;
                }
                match Router::from_manifest(&manifest, &registry, config) {
                    Ok(new_router) => {
                        info!(
                            path = %watch_path.display(),
                            routes_count = new_router.route_count(),
                            "hot-reload: applying route updates"
                        );
                        router.replace(new_router);
                        on_reload(&router.load());
                    }
                    Err(e) => {
                        warn!(path = %watch_path.display(), error = %e, "hot-reload: router rebuild failed");
                    }
                }
            }
            Err(e) => error!(error = ?e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
