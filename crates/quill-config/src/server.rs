use error_stack::{Result, ResultExt};
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::auth::Auth;
use crate::database::DatabasePools;
use crate::logging::Logging;
use crate::LoadError;

#[derive(Debug, Deserialize)]
pub struct Server {
    #[serde(default)]
    pub logging: Logging,

    /// `database` may also be spelled `db` in config files.
    #[serde(alias = "db")]
    pub database: DatabasePools,

    pub auth: Auth,

    #[serde(default = "Server::default_ip")]
    pub ip: IpAddr,

    #[serde(default = "Server::default_port")]
    pub port: u16,

    #[serde(skip)]
    pub file_location: Option<PathBuf>,
}

impl Server {
    /// Loads the server configuration from the process environment
    /// and the config file, if one is found.
    pub fn from_env() -> Result<Self, LoadError> {
        dotenvy::dotenv().ok();

        if let Some(path) = Self::find_config_file()? {
            Self::from_file(&path)
        } else {
            let config = Self::figment()
                .extract::<Self>()
                .change_context(LoadError)?;

            Ok(config)
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let mut config = Self::figment()
            .join(Toml::file_exact(path))
            .extract::<Self>()
            .change_context(LoadError)
            .attach_printable_lazy(|| format!("config file: {}", path.display()))?;

        config.file_location = Some(path.to_path_buf());
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::new().merge(Env::prefixed("QUILL_").split("__"))
    }

    fn find_config_file() -> Result<Option<PathBuf>, LoadError> {
        match dotenvy::var("QUILL_CONFIG_FILE") {
            Ok(path) => return Ok(Some(PathBuf::from(path))),
            Err(dotenvy::Error::Io(error)) => {
                return Err(error).change_context(LoadError);
            }
            Err(..) => {}
        }

        let default = PathBuf::from("quill.toml");
        if default.is_file() {
            Ok(Some(default))
        } else {
            Ok(None)
        }
    }

    /// Fixed configuration for unit tests. Nothing here points at a
    /// live service.
    #[must_use]
    pub fn for_tests() -> Self {
        use crate::database::{DatabasePool, DatabasePools};
        use quill_api_types::Sensitive;

        Self {
            logging: Logging::default(),
            database: DatabasePools {
                primary: DatabasePool {
                    url: Sensitive::new("postgres://quill@localhost/quill_test".into()),
                    min_connections: 0,
                    max_connections: 2,
                    readonly_mode: false,
                },
                replica: None,
                connection_timeout_secs: 5,
                idle_timeout_secs: 600,
                statement_timeout_secs: 30,
            },
            auth: Auth {
                jwt_secret: Sensitive::new("quill-test-secret".into()),
                token_expiry_secs: 86_400,
            },
            ip: Self::default_ip(),
            port: 0,
            file_location: None,
        }
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }

    fn default_ip() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    fn default_port() -> u16 {
        8080
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_toml_with_env_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "quill.toml",
                r#"
                [database.primary]
                url = "postgres://quill@localhost/quill"

                [auth]
                jwt_secret = "from-file"
                "#,
            )?;
            jail.set_env("QUILL_PORT", "9090");
            jail.set_env("QUILL_AUTH__JWT_SECRET", "from-env");

            let config = Server::from_file(Path::new("quill.toml"))
                .map_err(|error| figment::Error::from(error.to_string()))?;

            assert_eq!(config.port, 9090);
            assert_eq!(config.ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
            assert_eq!(config.auth.jwt_secret.as_str(), "from-env");
            assert_eq!(
                config.database.primary.url.as_str(),
                "postgres://quill@localhost/quill"
            );
            Ok(())
        });
    }

    #[test]
    fn db_alias_is_accepted() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "quill.toml",
                r#"
                [db.primary]
                url = "postgres://quill@localhost/quill"

                [auth]
                jwt_secret = "secret"
                "#,
            )?;

            let config = Server::from_file(Path::new("quill.toml"))
                .map_err(|error| figment::Error::from(error.to_string()))?;

            assert!(config.database.replica.is_none());
            assert_eq!(config.port, 8080);
            Ok(())
        });
    }
}
