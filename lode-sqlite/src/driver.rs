use crate::{Connection, SqliteSqlWriter};
use lode_core::Result;

#[derive(Default, Debug, Clone, Copy)]
pub struct SqliteDriver {}

impl SqliteDriver {
    /// Scheme of the connection urls, see [`Connection::connect`].
    pub const NAME: &'static str = "sqlite";

    pub const fn new() -> Self {
        Self {}
    }

    pub fn sql_writer(&self) -> SqliteSqlWriter {
        SqliteSqlWriter {}
    }

    pub fn connect(&self, url: impl AsRef<str>) -> Result<Connection> {
        Connection::connect(url)
    }
}
