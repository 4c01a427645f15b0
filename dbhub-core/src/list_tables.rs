use crate::{
    Connection, Error, Query, Result, RowLabeled,
    future::{BoxFuture, FutureExt},
    stream::TryStreamExt,
};
use std::collections::BTreeMap;

/// Discovers the table names of a schema through a live connection.
pub type ListTables<C> = for<'a> fn(&'a C, &'a str) -> BoxFuture<'a, Result<Vec<String>>>;

/// Table discovery strategies, one per dialect.
///
/// `Default` registers the built in strategies, `new()` starts empty.
#[derive(Clone)]
pub struct ListTablesRegistry<C: Connection> {
    strategies: BTreeMap<String, ListTables<C>>,
}

impl<C: Connection> ListTablesRegistry<C> {
    pub fn new() -> Self {
        Self {
            strategies: BTreeMap::new(),
        }
    }

    /// Register the strategy for the dialect, returns the one it replaces.
    pub fn insert(
        &mut self,
        dialect: impl Into<String>,
        strategy: ListTables<C>,
    ) -> Option<ListTables<C>> {
        self.strategies.insert(dialect.into(), strategy)
    }

    pub fn remove(&mut self, dialect: &str) -> Option<ListTables<C>> {
        self.strategies.remove(dialect)
    }

    pub fn get(&self, dialect: &str) -> Option<ListTables<C>> {
        self.strategies.get(dialect).copied()
    }

    pub fn contains(&self, dialect: &str) -> bool {
        self.strategies.contains_key(dialect)
    }

    pub fn dialects(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(String::as_str)
    }
}

impl<C: Connection> Default for ListTablesRegistry<C> {
    fn default() -> Self {
        let mut result = Self::new();
        result.insert("mysql", list_tables_mysql::<C>);
        result.insert("postgres", list_tables_postgres::<C>);
        result
    }
}

pub fn list_tables_mysql<'a, C: Connection>(
    connection: &'a C,
    schema: &'a str,
) -> BoxFuture<'a, Result<Vec<String>>> {
    let query = Query::new(
        "SELECT TABLE_NAME FROM information_schema.tables WHERE TABLE_SCHEMA = ? ORDER BY TABLE_NAME",
    )
    .bind(schema);
    collect_names(connection, query, "TABLE_NAME").boxed()
}

pub fn list_tables_postgres<'a, C: Connection>(
    connection: &'a C,
    schema: &'a str,
) -> BoxFuture<'a, Result<Vec<String>>> {
    let query = Query::new(
        "SELECT table_name FROM information_schema.tables WHERE table_catalog = $1 AND table_schema = current_schema() ORDER BY table_name",
    )
    .bind(schema);
    collect_names(connection, query, "table_name").boxed()
}

async fn collect_names<C: Connection>(
    connection: &C,
    query: Query,
    column: &'static str,
) -> Result<Vec<String>> {
    connection
        .fetch(query)
        .and_then(|row| async move { table_name(&row, column) })
        .try_collect()
        .await
}

/// Text of `column`, rows without that label are rejected.
fn table_name(row: &RowLabeled, column: &str) -> Result<String> {
    row.get_column(column)
        .and_then(|v| v.as_str())
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            Error::msg(format!(
                "Expected a table name in column `{}`, found columns {:?} with values {:?}",
                column,
                row.names(),
                row.values()
            ))
        })
}
