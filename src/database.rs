use dbhub_core::{
    Connection, ConnectOptions, ConnectionUri, Context, DatabaseError, Driver, Error,
    ListTables, ListTablesRegistry, QueryTableFactory, Result, TableFactory,
};
use std::{collections::HashMap, env, sync::OnceLock};

/// Environment variable read by [`Database::connect_env`].
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Owns at most one live connection and exposes the tables discovered in its schema.
///
/// Discovered tables are reachable through [`Database::table`], which builds the query object on first access and
/// hands out the same one afterwards. [`Database::from`] builds a fresh query object for any table name.
pub struct Database<D: Driver, F: TableFactory<D::Connection> = QueryTableFactory> {
    driver: D,
    factory: F,
    list_tables: ListTablesRegistry<D::Connection>,
    state: Option<Connected<D::Connection, F::Table>>,
}

struct Connected<C, T> {
    connection: C,
    uri: ConnectionUri,
    tables: Vec<String>,
    cache: HashMap<String, OnceLock<T>>,
}

impl<C, T> Connected<C, T> {
    fn bind_tables(&mut self, tables: Vec<String>) {
        self.cache = tables
            .iter()
            .map(|name| (name.clone(), OnceLock::new()))
            .collect();
        self.tables = tables;
    }
}

impl<D: Driver> Database<D> {
    pub fn new(driver: D) -> Self {
        Self::with_factory(driver, QueryTableFactory)
    }
}

impl<D: Driver + Default> Default for Database<D> {
    fn default() -> Self {
        Self::new(D::default())
    }
}

impl<D: Driver, F: TableFactory<D::Connection>> Database<D, F> {
    pub fn with_factory(driver: D, factory: F) -> Self {
        Self {
            driver,
            factory,
            list_tables: Default::default(),
            state: None,
        }
    }

    /// Replace the table discovery strategies.
    pub fn with_list_tables(mut self, list_tables: ListTablesRegistry<D::Connection>) -> Self {
        self.list_tables = list_tables;
        self
    }

    pub fn list_tables(&self) -> &ListTablesRegistry<D::Connection> {
        &self.list_tables
    }

    pub fn list_tables_mut(&mut self) -> &mut ListTablesRegistry<D::Connection> {
        &mut self.list_tables
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_some()
    }

    pub fn dialect(&self) -> Option<&str> {
        self.state.as_ref().map(|v| v.uri.dialect())
    }

    pub fn schema(&self) -> Option<&str> {
        self.state.as_ref().map(|v| v.uri.schema())
    }

    /// Open the connection and bind the tables found in the schema named by the URI.
    ///
    /// Does nothing when already connected. If the discovery fails after the connection is open, the database stays
    /// connected with no tables and the error is returned.
    pub async fn connect(&mut self, uri: &str) -> Result<()> {
        if let Some(state) = &self.state {
            log::debug!(
                "Already connected to `{}`, ignoring the connect request",
                state.uri
            );
            return Ok(());
        }
        let uri = ConnectionUri::parse(uri).map_err(log_error)?;
        if !self.driver.supports(uri.dialect()) {
            return Err(log_error(DatabaseError::unsupported_dialect(uri.dialect())));
        }
        let Some(list_tables) = self.list_tables.get(uri.dialect()) else {
            return Err(log_error(DatabaseError::unsupported_list_tables(
                uri.dialect(),
            )));
        };
        let connection = self
            .driver
            .connect(ConnectOptions::new(uri.dialect(), uri.as_str()))
            .await
            .with_context(|| format!("While trying to connect to `{}`", uri))
            .map_err(log_error)?;
        log::info!("Connected to `{}`", uri);
        self.state = Some(Connected {
            connection,
            uri,
            tables: Vec::new(),
            cache: HashMap::new(),
        });
        self.discover(list_tables).await
    }

    /// Connect using the URI found in the `DATABASE_URL` environment variable.
    pub async fn connect_env(&mut self) -> Result<()> {
        let uri = env::var(DATABASE_URL_ENV)
            .with_context(|| format!("Environment variable `{}` is not usable", DATABASE_URL_ENV))
            .map_err(log_error)?;
        self.connect(&uri).await
    }

    /// Run the discovery again on the live connection, replacing the bound tables.
    ///
    /// Previously built query objects are dropped. On failure the current tables are kept.
    pub async fn refresh_tables(&mut self) -> Result<()> {
        let dialect = self.state()?.uri.dialect();
        let Some(list_tables) = self.list_tables.get(dialect) else {
            return Err(log_error(DatabaseError::unsupported_list_tables(dialect)));
        };
        self.discover(list_tables).await
    }

    async fn discover(&mut self, list_tables: ListTables<D::Connection>) -> Result<()> {
        let state = self.state.as_mut().ok_or(DatabaseError::NotConnected)?;
        let tables = list_tables(&state.connection, state.uri.schema())
            .await
            .with_context(|| {
                format!(
                    "While listing the tables of schema `{}`",
                    state.uri.schema()
                )
            })
            .map_err(log_error)?;
        log::debug!(
            "Discovered {} tables in schema `{}`: {:?}",
            tables.len(),
            state.uri.schema(),
            tables
        );
        state.bind_tables(tables);
        Ok(())
    }

    /// Release the connection and unbind every table. Does nothing when not connected.
    pub fn disconnect(&mut self) {
        let Some(state) = self.state.take() else {
            log::debug!("Not connected, ignoring the disconnect request");
            return;
        };
        state.connection.destroy();
        log::info!("Disconnected from `{}`", state.uri);
    }

    pub fn get_connection(&self) -> Result<&D::Connection> {
        Ok(&self.state()?.connection)
    }

    /// Names of the discovered tables, in discovery order. Empty when not connected.
    pub fn tables(&self) -> &[String] {
        self.state.as_ref().map(|v| v.tables.as_slice()).unwrap_or_default()
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.state
            .as_ref()
            .is_some_and(|v| v.cache.contains_key(name))
    }

    /// Query object of a discovered table, built on first access and reused afterwards.
    ///
    /// `None` when not connected or when the table was not discovered.
    pub fn table(&self, name: &str) -> Option<&F::Table> {
        let state = self.state.as_ref()?;
        let cell = state.cache.get(name)?;
        Some(cell.get_or_init(|| {
            log::trace!("Creating the query object of table `{}`", name);
            self.factory.make_table(name, &state.connection)
        }))
    }

    /// New query object for any table, discovered or not.
    pub fn from(&self, name: &str) -> Result<F::Table> {
        let state = self.state()?;
        Ok(self.factory.make_table(name, &state.connection))
    }

    fn state(&self) -> Result<&Connected<D::Connection, F::Table>> {
        self.state
            .as_ref()
            .ok_or_else(|| log_error(DatabaseError::NotConnected))
    }
}

impl<D: Driver, F: TableFactory<D::Connection>> Drop for Database<D, F> {
    fn drop(&mut self) {
        if self.state.is_some() {
            self.disconnect();
        }
    }
}

fn log_error(error: impl Into<Error>) -> Error {
    let error = error.into();
    log::error!("{:#}", error);
    error
}
