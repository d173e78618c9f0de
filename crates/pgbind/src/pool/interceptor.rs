//! Interceptor hooks around the connection lifecycle.
//!
//! Interceptors observe (and, for acquisition, redirect) the
//! checkout-execute-release cycle without the caller knowing they are
//! installed. Hooks run strictly in registration order, one at a time;
//! the first failure in a phase short-circuits the rest of that phase.

use super::source::ConnectionSource;
use crate::error::BindResult;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONNECT_ID: AtomicU64 = AtomicU64::new(1);

/// Per-call context handed to every hook of one lifecycle cycle.
#[derive(Debug, Clone)]
pub struct ConnectContext {
    pool_id: u64,
    connect_id: u64,
}

impl ConnectContext {
    pub(crate) fn new(pool_id: u64) -> Self {
        Self {
            pool_id,
            connect_id: NEXT_CONNECT_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Serial id of the bound pool serving this call.
    pub fn pool_id(&self) -> u64 {
        self.pool_id
    }

    /// Serial id of this checkout cycle.
    pub fn connect_id(&self) -> u64 {
        self.connect_id
    }
}

/// Outcome of a before-acquire hook: keep the current acquisition
/// target, or substitute another one for this call only.
#[derive(Clone)]
pub enum Redirect {
    /// Keep acquiring from the currently selected source.
    Keep,
    /// Acquire from this source instead.
    To(Arc<dyn ConnectionSource>),
}

/// Hooks around connection acquisition and release.
///
/// All methods default to no-ops; implement only what you need. Any
/// hook may fail, and the binder guarantees the connection is still
/// released before the failure reaches the caller (unless acquisition
/// never happened).
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Runs before acquisition. Returning [`Redirect::To`] delegates
    /// this call's acquisition to the given source; [`Redirect::Keep`]
    /// leaves the current target in place. When several interceptors
    /// redirect, the last one wins.
    async fn before_acquire(&self, _ctx: &ConnectContext) -> BindResult<Redirect> {
        Ok(Redirect::Keep)
    }

    /// Runs after a connection has been acquired, before the handler.
    async fn after_acquire(&self, _ctx: &ConnectContext) -> BindResult<()> {
        Ok(())
    }

    /// Runs after the handler settles, before the connection is released.
    async fn before_release(&self, _ctx: &ConnectContext) -> BindResult<()> {
        Ok(())
    }
}

/// Configuration for a bound pool.
#[derive(Clone, Default)]
pub struct BindConfig {
    pub(crate) interceptors: Vec<Arc<dyn Interceptor>>,
}

impl BindConfig {
    /// Create an empty configuration (no interceptors).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor. Hooks run in the order they were added.
    pub fn with_interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Append a shared interceptor.
    pub fn with_interceptor_arc(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }
}
