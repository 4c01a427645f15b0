use thiserror::Error;

/// Failures raised by the connection manager itself, as opposed to the ones bubbling up from a driver.
///
/// They travel inside [`crate::Error`] without any context attached, so `to_string()` yields exactly the message
/// below and `downcast_ref::<DatabaseError>()` recovers the kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatabaseError {
    /// The connection URI does not have the `dialect://host/schema` shape.
    #[error("Invalid database type in database URI")]
    InvalidUri,
    /// The URI is well formed but the driver cannot open connections for its dialect.
    #[error("Invalid database type in database URI")]
    UnsupportedDialect { dialect: String },
    /// No table discovery strategy is registered for the dialect.
    #[error("Listing tables is not supported for database type {dialect}")]
    UnsupportedListTables { dialect: String },
    #[error("The database must be connected to get a table object")]
    NotConnected,
}

impl DatabaseError {
    pub fn unsupported_dialect(dialect: impl Into<String>) -> Self {
        Self::UnsupportedDialect {
            dialect: dialect.into(),
        }
    }

    pub fn unsupported_list_tables(dialect: impl Into<String>) -> Self {
        Self::UnsupportedListTables {
            dialect: dialect.into(),
        }
    }
}
