use crate::{MySQLDriver, RowWrap, ValueWrap};
use async_stream::try_stream;
use dbhub_core::{
    Connection, Driver, Error, Query, Result, RowLabeled,
    stream::{Stream, StreamExt, TryStreamExt},
};
use mysql_async::{Params, Pool, prelude::Queryable};
use std::sync::Arc;
use tokio::runtime::Handle;

/// Handle over a `mysql_async` pool, clones share the pool.
#[derive(Clone)]
pub struct MySQLConnection {
    pub(crate) pool: Pool,
}

impl MySQLConnection {
    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}

impl Connection for MySQLConnection {
    type Driver = MySQLDriver;

    fn driver(&self) -> &Self::Driver {
        &MySQLDriver {}
    }

    fn dialect(&self) -> &str {
        <Self::Driver as Driver>::NAME
    }

    fn fetch(&self, query: Query) -> impl Stream<Item = Result<RowLabeled>> + Send {
        let pool = self.pool.clone();
        let context = Arc::new(format!("While running the query:\n{}", query));
        log::trace!("Running the query:\n{}", query);
        try_stream! {
            let mut connection = pool.get_conn().await?;
            let params = if query.params.is_empty() {
                Params::Empty
            } else {
                Params::Positional(
                    query
                        .params
                        .into_iter()
                        .map(|v| ValueWrap(v).into())
                        .collect(),
                )
            };
            let mut result = connection.exec_iter(query.sql, params).await?;
            while let Some(mut stream) = result.stream::<RowWrap>().await? {
                while let Some(row) = stream.next().await.transpose()? {
                    yield row.0
                }
            }
        }
        .map_err(move |e: Error| e.context(context.clone()))
    }

    fn destroy(&self) {
        let pool = self.pool.clone();
        match Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    if let Err(e) = pool.disconnect().await {
                        log::error!("Error while disconnecting the MySQL pool: {:#}", e);
                    }
                });
            }
            Err(..) => log::warn!(
                "No tokio runtime available to disconnect the MySQL pool, its connections are closed when dropped"
            ),
        }
    }
}
