use axum::extract::{FromRequestParts, State};
use jsonwebtoken::{DecodingKey, EncodingKey};
use quill_postgres::error::AcquireError;
use quill_postgres::{PgConnection, PgPool};
use std::fmt::Debug;
use std::ops::Deref;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone, FromRequestParts)]
#[from_request(via(State))]
#[must_use]
pub struct App(Arc<AppInner>);

impl App {
    /// Creates a new [`App`] from a given [configuration](quill_config::Server).
    pub fn new(config: quill_config::Server) -> Self {
        let primary_db = PgPool::build("primary", &config.database, &config.database.primary);
        let replica_db = config
            .database
            .replica
            .as_ref()
            .map(|replica| PgPool::build("replica", &config.database, replica));

        let secret = config.auth.jwt_secret.as_str().as_bytes();
        let jwt_encode_key = EncodingKey::from_secret(secret);
        let jwt_decode_key = DecodingKey::from_secret(secret);

        Self(Arc::new(AppInner {
            config: Arc::new(config),
            primary_db,
            replica_db,
            jwt_encode_key,
            jwt_decode_key,
        }))
    }

    /// Creates a new [`App`] for unit tests. Database pools are built
    /// lazily, so this never touches a real server.
    #[must_use]
    pub fn for_tests() -> Self {
        Self::new(quill_config::Server::for_tests())
    }
}

impl App {
    /// Obtains a read/write database connection from the primary pool.
    #[tracing::instrument(skip_all, name = "app.db_write")]
    pub async fn db_write(&self) -> Result<PgConnection, AcquireError> {
        self.primary_db.acquire().await
    }

    /// Obtains a readonly database connection from the replica pool,
    /// falling back to the primary pool when no replica is available.
    #[tracing::instrument(skip_all, name = "app.db_read")]
    pub async fn db_read(&self) -> Result<PgConnection, AcquireError> {
        let Some(replica_pool) = self.replica_db.as_ref() else {
            return self.primary_db.acquire().await;
        };

        match replica_pool.acquire().await {
            Ok(connection) => Ok(connection),
            Err(error) => {
                warn!(%error, "Replica database is not available, falling back to primary");
                self.primary_db.acquire().await
            }
        }
    }
}

impl Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("primary_db", &self.primary_db)
            .field("replica_db", &self.replica_db)
            .finish_non_exhaustive()
    }
}

impl Deref for App {
    type Target = AppInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Inner type of the [`App`] object.
pub struct AppInner {
    pub config: Arc<quill_config::Server>,
    pub primary_db: PgPool,
    pub replica_db: Option<PgPool>,
    pub jwt_encode_key: EncodingKey,
    pub jwt_decode_key: DecodingKey,
}
