mod connection;
mod driver;
mod error;
mod list_tables;
mod query;
mod sql_writer;
mod table;
mod uri;
mod util;
mod value;

pub use ::anyhow::Context;
pub use connection::*;
pub use driver::*;
pub use error::*;
pub use list_tables::*;
pub use query::*;
pub use sql_writer::*;
pub use table::*;
pub use uri::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
