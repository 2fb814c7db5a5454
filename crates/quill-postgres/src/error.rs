use diesel_async::pooled_connection::PoolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("Timed out acquiring a database connection")]
    TimedOut,
    #[error("Could not acquire a database connection")]
    Pool(#[source] PoolError),
}

impl From<bb8::RunError<PoolError>> for AcquireError {
    fn from(value: bb8::RunError<PoolError>) -> Self {
        match value {
            bb8::RunError::TimedOut => Self::TimedOut,
            bb8::RunError::User(error) => Self::Pool(error),
        }
    }
}
