use lode_core::SqlWriter;

/// SQLite accepts the default transaction statements as they are.
#[derive(Default, Debug, Clone, Copy)]
pub struct SqliteSqlWriter {}

impl SqlWriter for SqliteSqlWriter {}
