use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tracing::info;

use super::core::{MatchOptions, RouteMatch, Router};
use crate::error::RouteError;
use crate::handlers::Handler;
use crate::transition::TransitionConfig;

/// A [`Router`] that can be shared between threads and still accept routes
///
/// Readers load the current snapshot without locking. Writers are
/// serialized, clone the current router, apply their change and publish the
/// result; a snapshot already loaded by a reader is never modified.
pub struct SharedRouter<C, W> {
    current: ArcSwap<Router<C, W>>,
    writer: Mutex<()>,
}

impl<C, W> SharedRouter<C, W> {
    #[must_use]
    pub fn new(router: Router<C, W>) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
            writer: Mutex::new(()),
        }
    }

    /// Current snapshot
    #[must_use]
    pub fn load(&self) -> Arc<Router<C, W>> {
        self.current.load_full()
    }

    /// Register a route on a new snapshot
    ///
    /// # Errors
    ///
    /// Same as [`Router::define`]; on error nothing is published.
    pub fn define(
        &self,
        pattern: &str,
        handler: Handler<C, W>,
        transition: TransitionConfig<C, W>,
    ) -> Result<(), RouteError> {
        self.update(|router| router.define(pattern, handler, transition))
    }

    pub fn set_not_found_handler(&self, handler: Handler<C, W>) {
        let _guard = self.writer.lock();
        let mut next = Router::clone(&self.current.load());
        next.set_not_found_handler(handler);
        self.current.store(Arc::new(next));
    }

    /// Publish a completely new router, e.g. after reloading a manifest
    pub fn replace(&self, router: Router<C, W>) {
        let _guard = self.writer.lock();
        let route_count = router.route_count();
        self.current.store(Arc::new(router));
        info!(route_count, "Router replaced");
    }

    /// Match against the current snapshot
    pub fn match_route(&self, ctx: &C, path: &str) -> RouteMatch<C, W> {
        self.current.load().match_route(ctx, path)
    }

    pub fn match_route_with(
        &self,
        ctx: &C,
        path: &str,
        options: &MatchOptions<C, W>,
    ) -> RouteMatch<C, W> {
        self.current.load().match_route_with(ctx, path, options)
    }

    fn update<F>(&self, change: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Router<C, W>) -> Result<(), RouteError>,
    {
        let _guard = self.writer.lock();
        let mut next = Router::clone(&self.current.load());
        change(&mut next)?;
        self.current.store(Arc::new(next));
        Ok(())
    }
}

impl<C, W> From<Router<C, W>> for SharedRouter<C, W> {
    fn from(router: Router<C, W>) -> Self {
        Self::new(router)
    }
}

impl<C, W> fmt::Debug for SharedRouter<C, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRouter")
            .field("current", &self.current.load())
            .finish_non_exhaustive()
    }
}
