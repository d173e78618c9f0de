//! Driver-facing collaborator traits.
//!
//! [`ConnectionSource`] and [`RawConnection`] are the seam between the
//! lifecycle binder and whatever actually owns connections. The crate
//! ships an implementation for `deadpool_postgres::Pool`; tests (and
//! exotic deployments) implement the traits directly.

use crate::error::BindResult;
use async_trait::async_trait;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A checked-out connection handle.
///
/// The handle is exclusively owned by the lifecycle cycle that acquired
/// it. [`release`](RawConnection::release) consumes the handle, so it
/// can be returned to its source at most once.
#[async_trait]
pub trait RawConnection: Send {
    /// Execute a statement and return all rows.
    async fn query(&mut self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BindResult<Vec<Row>>;

    /// Execute a statement and return the number of affected rows.
    async fn execute(&mut self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> BindResult<u64>;

    /// Return the connection to its source.
    async fn release(self: Box<Self>) -> BindResult<()>;
}

/// Something connections can be acquired from.
#[async_trait]
pub trait ConnectionSource: Send + Sync {
    /// Check out one connection. Failures surface as
    /// [`BindError::Pool`](crate::BindError::Pool) or whatever error the
    /// source reports; nothing is leaked on failure.
    async fn acquire(&self) -> BindResult<Box<dyn RawConnection>>;
}

#[cfg(feature = "pool")]
mod deadpool {
    use super::*;
    use crate::error::BindError;

    #[async_trait]
    impl ConnectionSource for deadpool_postgres::Pool {
        async fn acquire(&self) -> BindResult<Box<dyn RawConnection>> {
            let client = self.get().await?;
            Ok(Box::new(PooledClient { client }))
        }
    }

    struct PooledClient {
        client: deadpool_postgres::Client,
    }

    #[async_trait]
    impl RawConnection for PooledClient {
        async fn query(
            &mut self,
            sql: &str,
            params: &[&(dyn ToSql + Sync)],
        ) -> BindResult<Vec<Row>> {
            self.client.query(sql, params).await.map_err(BindError::from)
        }

        async fn execute(
            &mut self,
            sql: &str,
            params: &[&(dyn ToSql + Sync)],
        ) -> BindResult<u64> {
            self.client
                .execute(sql, params)
                .await
                .map_err(BindError::from)
        }

        async fn release(self: Box<Self>) -> BindResult<()> {
            // deadpool recycles the wrapped client when it is dropped.
            drop(self);
            Ok(())
        }
    }
}
