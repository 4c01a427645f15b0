use crate::{Connection, Result, SqlWriter};
use std::future::Future;

/// Parameters handed to [`Driver::connect`]: the dialect picked from the URI and the full connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    pub dialect: String,
    pub connection: String,
}

impl ConnectOptions {
    pub fn new(dialect: impl Into<String>, connection: impl Into<String>) -> Self {
        Self {
            dialect: dialect.into(),
            connection: connection.into(),
        }
    }
}

pub trait Driver: Send + Sync {
    type Connection: Connection<Driver = Self>;
    type SqlWriter: SqlWriter;

    const NAME: &'static str;
    /// Dialects accepted in the scheme of a connection URI.
    const DIALECTS: &'static [&'static str] = &[Self::NAME];

    fn sql_writer(&self) -> Self::SqlWriter;

    fn supports(&self, dialect: &str) -> bool {
        Self::DIALECTS.contains(&dialect)
    }

    /// Create a connection pool with at least one connection established.
    fn connect(
        &self,
        options: ConnectOptions,
    ) -> impl Future<Output = Result<Self::Connection>> + Send;
}
