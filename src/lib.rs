mod database;

pub use database::*;
pub use dbhub_core::*;
