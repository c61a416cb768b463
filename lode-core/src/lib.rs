mod error;
mod sql_writer;
mod transaction;
mod util;

pub use ::anyhow::Context;
pub use error::*;
pub use sql_writer::*;
pub use transaction::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
