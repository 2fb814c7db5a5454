use bb8::{CustomizeConnection, Pool};
use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, PoolError};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use crate::error::AcquireError;

#[derive(Clone)]
pub struct PgPool {
    name: &'static str,
    inner: Pool<AsyncDieselConnectionManager<AsyncPgConnection>>,
}

impl PgPool {
    #[tracing::instrument(skip_all)]
    #[must_use]
    pub fn build(
        name: &'static str,
        global: &quill_config::DatabasePools,
        pool: &quill_config::DatabasePool,
    ) -> Self {
        let manager =
            AsyncDieselConnectionManager::<AsyncPgConnection>::new(pool.url.as_str());

        let inner = Pool::builder()
            .connection_timeout(global.connection_timeout())
            .min_idle(Some(pool.min_connections))
            .max_size(pool.max_connections)
            .idle_timeout(Some(global.idle_timeout()))
            .connection_customizer(Box::new(SessionSetup {
                readonly_mode: pool.readonly_mode,
                statement_timeout: global.statement_timeout(),
            }))
            .build_unchecked(manager);

        Self { name, inner }
    }

    /// Attempts to acquire a connection from the pool.
    pub async fn acquire(&self) -> Result<PgConnection, AcquireError> {
        let conn = self.inner.get_owned().await?;
        Ok(PgConnection(conn))
    }

    #[must_use]
    pub fn connections(&self) -> u32 {
        self.inner.state().connections
    }

    #[must_use]
    pub fn idle_connections(&self) -> u32 {
        self.inner.state().idle_connections
    }
}

impl std::fmt::Debug for PgPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgPool")
            .field("name", &self.name)
            .field("connections", &self.connections())
            .field("idle_connections", &self.idle_connections())
            .finish_non_exhaustive()
    }
}

/// A pooled PostgreSQL connection. Derefs to the raw
/// [`AsyncPgConnection`] the query layer works with.
pub struct PgConnection(PooledConnection<'static, AsyncPgConnection>);

impl Deref for PgConnection {
    type Target = AsyncPgConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PgConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Applies the session parameters from the configuration whenever a
/// fresh connection joins the pool.
#[derive(Debug)]
struct SessionSetup {
    readonly_mode: bool,
    statement_timeout: Duration,
}

#[async_trait::async_trait]
impl CustomizeConnection<AsyncPgConnection, PoolError> for SessionSetup {
    async fn on_acquire(
        &self,
        conn: &mut AsyncPgConnection,
    ) -> Result<(), PoolError> {
        diesel::sql_query("SET application_name = 'quill'")
            .execute(conn)
            .await
            .map_err(PoolError::QueryError)?;

        let timeout = self.statement_timeout.as_millis();
        diesel::sql_query(format!("SET statement_timeout = {timeout}"))
            .execute(conn)
            .await
            .map_err(PoolError::QueryError)?;

        if self.readonly_mode {
            diesel::sql_query("SET default_transaction_read_only = 'on'")
                .execute(conn)
                .await
                .map_err(PoolError::QueryError)?;
        }

        Ok(())
    }
}
