use crate::{Driver, Query, Result, RowLabeled, stream::Stream};

/// Live handle to a database, cheap to clone (clones share the same pool).
pub trait Connection: Clone + Send + Sync + 'static {
    type Driver: Driver<Connection = Self>;

    fn driver(&self) -> &Self::Driver;

    /// Dialect this handle was opened for.
    fn dialect(&self) -> &str;

    /// Execute the query and returns the rows.
    fn fetch(&self, query: Query) -> impl Stream<Item = Result<RowLabeled>> + Send;

    /// Release every resource held by the handle, the clones included.
    fn destroy(&self);
}
