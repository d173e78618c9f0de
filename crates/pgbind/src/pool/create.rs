//! Construction helpers for the deadpool-backed connection source.
//!
//! These build a plain `deadpool_postgres::Pool`; hand the result to
//! [`BoundPool::bind`](super::BoundPool::bind) to attach interceptors
//! and the release guarantee. Sizing, backoff, and recycling policy
//! stay the pool's concern — tune them through the builder hook in
//! [`create_pool_with_manager_config`].

use crate::error::{BindError, BindResult};
use deadpool_postgres::{Manager, ManagerConfig, Pool, PoolBuilder, RecyclingMethod};
use tokio_postgres::tls::{MakeTlsConnect, TlsConnect};
use tokio_postgres::{NoTls, Socket};

/// Build a pool from a database URL with `NoTls` and small defaults,
/// suitable for local development. Production setups should prefer
/// [`create_pool_with_tls`] or [`create_pool_with_manager_config`].
pub fn create_pool(database_url: &str) -> BindResult<Pool> {
    create_pool_with_config(database_url, 16)
}

/// Build a `NoTls` pool with an explicit maximum size.
pub fn create_pool_with_config(database_url: &str, max_size: usize) -> BindResult<Pool> {
    create_pool_with_manager_config(database_url, NoTls, default_manager_config(), |builder| {
        builder.max_size(max_size)
    })
}

/// Build a pool using a custom TLS connector.
pub fn create_pool_with_tls<T>(database_url: &str, tls: T) -> BindResult<Pool>
where
    T: MakeTlsConnect<Socket> + Clone + Sync + Send + 'static,
    T::Stream: Sync + Send,
    T::TlsConnect: Sync + Send,
    <T::TlsConnect as TlsConnect<Socket>>::Future: Send,
{
    create_pool_with_manager_config(database_url, tls, default_manager_config(), |builder| {
        builder.max_size(16)
    })
}

/// Build a pool with injected manager configuration and builder tuning.
pub fn create_pool_with_manager_config<T>(
    database_url: &str,
    tls: T,
    manager_config: ManagerConfig,
    configure_pool: impl FnOnce(PoolBuilder) -> PoolBuilder,
) -> BindResult<Pool>
where
    T: MakeTlsConnect<Socket> + Clone + Sync + Send + 'static,
    T::Stream: Sync + Send,
    T::TlsConnect: Sync + Send,
    <T::TlsConnect as TlsConnect<Socket>>::Future: Send,
{
    let pg_config: tokio_postgres::Config = database_url
        .parse()
        .map_err(|e: tokio_postgres::Error| BindError::connection(e.to_string()))?;

    let manager = Manager::from_config(pg_config, tls, manager_config);
    configure_pool(Pool::builder(manager))
        .build()
        .map_err(|e| BindError::Pool(e.to_string()))
}

fn default_manager_config() -> ManagerConfig {
    ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    }
}
