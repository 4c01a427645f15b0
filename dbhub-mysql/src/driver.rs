use crate::{MySQLConnection, MySQLSqlWriter};
use dbhub_core::{ConnectOptions, Driver, Result, redact_password};
use mysql_async::{Opts, Pool};

#[derive(Clone, Copy, Default)]
pub struct MySQLDriver;
impl MySQLDriver {
    pub const fn new() -> Self {
        Self
    }
}

impl Driver for MySQLDriver {
    type Connection = MySQLConnection;
    type SqlWriter = MySQLSqlWriter;

    const NAME: &'static str = "mysql";

    fn sql_writer(&self) -> Self::SqlWriter {
        MySQLSqlWriter::default()
    }

    async fn connect(&self, options: ConnectOptions) -> Result<MySQLConnection> {
        // The caller adds the connection context and logs the failure
        let opts = Opts::from_url(&options.connection)?;
        let pool = Pool::new(opts);
        // Fail early on unreachable servers, the connection goes back to the pool
        drop(pool.get_conn().await?);
        log::debug!(
            "MySQL pool ready for `{}`",
            redact_password(&options.connection)
        );
        Ok(MySQLConnection { pool })
    }
}
