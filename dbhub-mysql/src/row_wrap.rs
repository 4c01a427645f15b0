use crate::ValueWrap;
use dbhub_core::{Row, RowLabeled, RowNames};
use mysql_async::FromRowError;

pub(crate) struct RowWrap(pub(crate) RowLabeled);

impl mysql_async::prelude::FromRow for RowWrap {
    fn from_row_opt(mut row: mysql_async::Row) -> Result<Self, FromRowError>
    where
        Self: Sized,
    {
        let names: RowNames = row
            .columns()
            .iter()
            .map(|v| v.name_str().into_owned())
            .collect();
        let values: Row = (0..row.len())
            .map(|i| row.take_opt::<ValueWrap, _>(i).map(|v| v.map(|v| v.0)))
            .map(|v| v.unwrap_or(Ok(Default::default())))
            .collect::<Result<_, _>>()
            .map_err(|_| FromRowError(row))?;
        Ok(RowWrap(RowLabeled::new(names, values)))
    }
}
