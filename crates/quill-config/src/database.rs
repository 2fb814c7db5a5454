use serde::Deserialize;
use std::time::Duration;

use quill_api_types::Sensitive;

/// Connection pool settings shared by the primary pool and the
/// optional read replica.
#[derive(Debug, Deserialize)]
pub struct DatabasePools {
    pub primary: DatabasePool,
    pub replica: Option<DatabasePool>,

    #[serde(default = "DatabasePools::default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,

    #[serde(default = "DatabasePools::default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    #[serde(default = "DatabasePools::default_statement_timeout_secs")]
    pub statement_timeout_secs: u64,
}

impl DatabasePools {
    #[must_use]
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }

    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    #[must_use]
    pub fn statement_timeout(&self) -> Duration {
        Duration::from_secs(self.statement_timeout_secs)
    }

    fn default_connection_timeout_secs() -> u64 {
        5
    }

    fn default_idle_timeout_secs() -> u64 {
        600
    }

    fn default_statement_timeout_secs() -> u64 {
        30
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabasePool {
    /// Connection URLs embed credentials, keep them out of logs.
    pub url: Sensitive<String>,

    #[serde(default = "DatabasePool::default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "DatabasePool::default_max_connections")]
    pub max_connections: u32,

    /// Marks every connection from this pool as `READ ONLY`.
    #[serde(default)]
    pub readonly_mode: bool,
}

impl DatabasePool {
    fn default_min_connections() -> u32 {
        0
    }

    fn default_max_connections() -> u32 {
        10
    }
}
