use dbhub_core::{
    ConnectOptions, Connection, Driver, Error, GenericSqlWriter, Query, Result, RowLabeled,
    RowNames, Value,
    stream::{self, Stream},
};
use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

#[derive(Default, Debug)]
struct MockState {
    connects: Mutex<Vec<ConnectOptions>>,
    destroys: AtomicUsize,
    queries: Mutex<Vec<Query>>,
    schema: Mutex<String>,
    tables: Mutex<Vec<String>>,
    rows: Mutex<Vec<RowLabeled>>,
    fail_connect: AtomicBool,
    fail_discovery: AtomicBool,
    discovery_label: Mutex<Option<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// In-memory `mysql` driver recording connects, destroys and queries.
///
/// Clones share the same recordings, keep one in the test and give the other to the database.
#[derive(Clone, Default, Debug)]
pub struct MockDriver {
    state: Arc<MockState>,
}

impl MockDriver {
    pub fn new() -> Self {
        Default::default()
    }

    /// Tables reported by the discovery query when it targets `schema`.
    pub fn with_tables<I, S>(self, schema: &str, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_tables(schema, tables);
        self
    }

    pub fn set_tables<I, S>(&self, schema: &str, tables: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *lock(&self.state.schema) = schema.to_owned();
        *lock(&self.state.tables) = tables.into_iter().map(Into::into).collect();
    }

    /// Rows returned by every query other than the discovery one.
    pub fn set_rows(&self, rows: Vec<RowLabeled>) {
        *lock(&self.state.rows) = rows;
    }

    /// Label of the discovery rows, `None` labels them after the selected column.
    pub fn set_discovery_label(&self, label: Option<&str>) {
        *lock(&self.state.discovery_label) = label.map(ToOwned::to_owned);
    }

    pub fn fail_connect(&self, fail: bool) {
        self.state.fail_connect.store(fail, Ordering::Relaxed);
    }

    pub fn fail_discovery(&self, fail: bool) {
        self.state.fail_discovery.store(fail, Ordering::Relaxed);
    }

    pub fn connect_calls(&self) -> usize {
        lock(&self.state.connects).len()
    }

    pub fn connect_options(&self) -> Vec<ConnectOptions> {
        lock(&self.state.connects).clone()
    }

    pub fn destroy_calls(&self) -> usize {
        self.state.destroys.load(Ordering::Relaxed)
    }

    pub fn queries(&self) -> Vec<Query> {
        lock(&self.state.queries).clone()
    }
}

impl Driver for MockDriver {
    type Connection = MockConnection;
    type SqlWriter = GenericSqlWriter;

    const NAME: &'static str = "mysql";

    fn sql_writer(&self) -> Self::SqlWriter {
        GenericSqlWriter::new()
    }

    async fn connect(&self, options: ConnectOptions) -> Result<MockConnection> {
        lock(&self.state.connects).push(options.clone());
        if self.state.fail_connect.load(Ordering::Relaxed) {
            return Err(Error::msg("Connection refused"));
        }
        Ok(MockConnection {
            driver: self.clone(),
            dialect: options.dialect,
        })
    }
}

#[derive(Clone, Debug)]
pub struct MockConnection {
    driver: MockDriver,
    dialect: String,
}

impl MockConnection {
    fn discovery_rows(&self, query: &Query) -> Vec<Result<RowLabeled>> {
        let state = &self.driver.state;
        if state.fail_discovery.load(Ordering::Relaxed) {
            return vec![Err(Error::msg("Table discovery failed"))];
        }
        if query.params.first() != Some(&Value::from(lock(&state.schema).as_str())) {
            return Vec::new();
        }
        let label = lock(&state.discovery_label)
            .clone()
            .unwrap_or_else(|| selected_column(&query.sql).to_owned());
        let labels: RowNames = [label].into();
        lock(&state.tables)
            .iter()
            .map(|v| {
                Ok(RowLabeled::new(
                    labels.clone(),
                    [Value::from(v.as_str())].into(),
                ))
            })
            .collect()
    }
}

/// Column named between `SELECT` and `FROM`.
fn selected_column(sql: &str) -> &str {
    sql.strip_prefix("SELECT ")
        .and_then(|v| v.split_once(" FROM"))
        .map(|(column, _)| column.trim())
        .unwrap_or("TABLE_NAME")
}

impl Connection for MockConnection {
    type Driver = MockDriver;

    fn driver(&self) -> &Self::Driver {
        &self.driver
    }

    fn dialect(&self) -> &str {
        &self.dialect
    }

    fn fetch(&self, query: Query) -> impl Stream<Item = Result<RowLabeled>> + Send {
        log::trace!("Mock fetch:\n{}", query);
        let rows = if query.sql.contains("information_schema.tables") {
            self.discovery_rows(&query)
        } else {
            lock(&self.driver.state.rows)
                .iter()
                .cloned()
                .map(Ok)
                .collect()
        };
        lock(&self.driver.state.queries).push(query);
        stream::iter(rows)
    }

    fn destroy(&self) {
        self.driver.state.destroys.fetch_add(1, Ordering::Relaxed);
    }
}
