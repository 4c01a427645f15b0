use crate::{
    Connection, Driver, Query, Result, RowLabeled, SqlWriter, Value, stream::Stream,
};
use std::fmt::{self, Debug, Formatter};

/// Builds the query object handed out for a table.
///
/// Any `Fn(&str, &C) -> T` closure is a factory.
pub trait TableFactory<C: Connection> {
    type Table;
    fn make_table(&self, name: &str, connection: &C) -> Self::Table;
}

impl<C, T, F> TableFactory<C> for F
where
    C: Connection,
    F: Fn(&str, &C) -> T,
{
    type Table = T;
    fn make_table(&self, name: &str, connection: &C) -> T {
        self(name, connection)
    }
}

/// Factory producing [`Table`] query objects.
#[derive(Default, Debug, Clone, Copy)]
pub struct QueryTableFactory;

impl<C: Connection> TableFactory<C> for QueryTableFactory {
    type Table = Table<C>;
    fn make_table(&self, name: &str, connection: &C) -> Table<C> {
        Table::new(name, connection.clone())
    }
}

/// Query object bound to a single table of a live connection.
#[derive(Clone)]
pub struct Table<C: Connection> {
    name: String,
    connection: C,
}

impl<C: Connection> Table<C> {
    pub fn new(name: impl Into<String>, connection: C) -> Self {
        Self {
            name: name.into(),
            connection,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Start a select over the given columns, all of them when empty.
    pub fn select<I, S>(&self, columns: I) -> Select<'_, C>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Select {
            table: self,
            statement: SelectStatement {
                table: self.name.clone(),
                columns: columns.into_iter().map(Into::into).collect(),
                ..Default::default()
            },
            params: Vec::new(),
        }
    }

    /// Every row of the table.
    pub fn fetch_all(&self) -> impl Stream<Item = Result<RowLabeled>> + Send {
        self.select::<_, String>([]).fetch()
    }
}

impl<C: Connection> Debug for Table<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("dialect", &self.connection.dialect())
            .finish()
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    #[default]
    ASC,
    DESC,
}

/// Driver independent description of a select, rendered by [`SqlWriter::write_select`].
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct SelectStatement {
    pub table: String,
    pub columns: Vec<String>,
    /// Columns compared for equality against the bound parameters, in order.
    pub filters: Vec<String>,
    pub order_by: Vec<(String, Order)>,
    pub limit: Option<u32>,
}

pub struct Select<'t, C: Connection> {
    table: &'t Table<C>,
    statement: SelectStatement,
    params: Vec<Value>,
}

impl<'t, C: Connection> Select<'t, C> {
    pub fn where_eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.statement.filters.push(column.into());
        self.params.push(value.into());
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, order: Order) -> Self {
        self.statement.order_by.push((column.into(), order));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.statement.limit = Some(limit);
        self
    }

    pub fn statement(&self) -> &SelectStatement {
        &self.statement
    }

    pub fn build(&self) -> Query {
        let mut sql = String::new();
        self.table
            .connection
            .driver()
            .sql_writer()
            .write_select(&mut sql, &self.statement);
        Query {
            sql,
            params: self.params.clone(),
        }
    }

    pub fn fetch(self) -> impl Stream<Item = Result<RowLabeled>> + Send + 't {
        let query = self.build();
        self.table.connection.fetch(query)
    }
}
