use crate::{
    CBox, OpenFlags, Params, PrepareFlags, SqliteDriver, Statement, Transaction, engine_error,
    raise,
};
use libsqlite3_sys::*;
use lode_core::{Result, SqlWriter, TransactionType, usage_error};
use std::{
    ffi::{CStr, CString, c_int},
    ptr,
    time::Duration,
};

// Not exposed by the bundled `libsqlite3-sys` bindings, the symbol is in the library.
unsafe extern "C" {
    fn sqlite3_close_v2(db: *mut sqlite3) -> c_int;
}

/// An open database.
///
/// Statements borrow the connection they were prepared on, the native handle is
/// closed once the connection and every statement are gone. A connection is driven by
/// one caller at a time: it can move across threads but it is not `Sync`.
pub struct Connection {
    pub(crate) connection: CBox<sqlite3>,
}

impl Connection {
    /// Opens (and creates if missing) the database at `path`.
    pub fn open(path: impl AsRef<str>) -> Result<Self> {
        Self::open_with_flags(path, OpenFlags::default())
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open_with_flags(":memory:", OpenFlags::default() | OpenFlags::MEMORY)
    }

    pub fn open_with_flags(path: impl AsRef<str>, flags: OpenFlags) -> Result<Self> {
        let path = path.as_ref();
        let Ok(filename) = CString::new(path) else {
            return Err(usage_error(format!(
                "Cannot open `{}`, the path contains a nul byte",
                path.escape_debug()
            )));
        };
        let mut connection = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_close_v2(p);
        });
        let rc = unsafe {
            sqlite3_open_v2(
                filename.as_ptr(),
                &mut *connection,
                flags.bits(),
                ptr::null(),
            )
        };
        if rc != SQLITE_OK {
            // The handle, if any, is closed when `connection` drops
            return Err(raise(
                engine_error(*connection, rc),
                format!("Cannot open the database `{}` with flags {:?}", path, flags),
            ));
        }
        log::debug!("Opened the database `{}` with flags {:?}", path, flags);
        Ok(Self { connection })
    }

    /// Opens a database from an url like `sqlite://path/to/file.sqlite?mode=rwc`.
    ///
    /// The part after the scheme is handed to the engine as an `file:` URI, its query
    /// parameters are described in <https://www.sqlite.org/uri.html>.
    pub fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();
        let prefix = format!("{}://", SqliteDriver::NAME);
        let Some(location) = url.strip_prefix(&prefix) else {
            return Err(usage_error(format!(
                "Expected sqlite connection url to start with `{}`, got `{}`",
                prefix, url
            )));
        };
        Self::open_with_flags(
            format!("file:{}", location),
            OpenFlags::default() | OpenFlags::URI,
        )
    }

    /// Compiles a single statement.
    pub fn prepare(&self, sql: impl AsRef<str>) -> Result<Statement<'_>> {
        Statement::new(self, sql.as_ref(), PrepareFlags::default())
    }

    pub fn prepare_with_flags(
        &self,
        sql: impl AsRef<str>,
        flags: PrepareFlags,
    ) -> Result<Statement<'_>> {
        Statement::new(self, sql.as_ref(), flags)
    }

    /// Compiles `sql` and executes it with `params`.
    ///
    /// The statement is returned positioned on its first row (if any), ready to be fetched.
    pub fn execute<P: Params>(&self, sql: impl AsRef<str>, params: P) -> Result<Statement<'_>> {
        let mut statement = self.prepare(sql)?;
        statement.execute(params)?;
        Ok(statement)
    }

    /// Runs every statement in `sql` to completion, discarding any row produced.
    pub fn execute_batch(&self, sql: impl AsRef<str>) -> Result<()> {
        let mut remaining = sql.as_ref();
        while !remaining.trim().is_empty() {
            let (statement, rest) = Statement::compile(self, remaining, PrepareFlags::default())?;
            if let Some(mut statement) = statement {
                while statement.step()? {}
            }
            if rest.len() == remaining.len() {
                break;
            }
            remaining = rest;
        }
        Ok(())
    }

    pub fn begin_transaction(&self, kind: TransactionType) -> Result<()> {
        let mut sql = String::new();
        SqliteDriver::new()
            .sql_writer()
            .write_transaction_begin(&mut sql, kind);
        self.execute(sql, ())?;
        Ok(())
    }

    pub fn commit(&self) -> Result<()> {
        let mut sql = String::new();
        SqliteDriver::new()
            .sql_writer()
            .write_transaction_commit(&mut sql);
        self.execute(sql, ())?;
        Ok(())
    }

    pub fn rollback(&self) -> Result<()> {
        let mut sql = String::new();
        SqliteDriver::new()
            .sql_writer()
            .write_transaction_rollback(&mut sql);
        self.execute(sql, ())?;
        Ok(())
    }

    /// Begins a transaction that rolls back unless committed.
    pub fn transaction(&self, kind: TransactionType) -> Result<Transaction<'_>> {
        Transaction::new(self, kind)
    }

    /// True outside of an explicit transaction.
    pub fn is_autocommit(&self) -> bool {
        unsafe { sqlite3_get_autocommit(*self.connection) != 0 }
    }

    /// How long a locked database is retried before a step fails with `SQLITE_BUSY`.
    pub fn busy_timeout(&self, timeout: Duration) -> Result<()> {
        let ms = c_int::try_from(timeout.as_millis()).unwrap_or(c_int::MAX);
        let rc = unsafe { sqlite3_busy_timeout(*self.connection, ms) };
        if rc != SQLITE_OK {
            return Err(raise(
                engine_error(*self.connection, rc),
                format!("Cannot set the busy timeout to {:?}", timeout),
            ));
        }
        Ok(())
    }

    /// Rows modified by the most recent INSERT, UPDATE or DELETE.
    pub fn changes(&self) -> u64 {
        unsafe { sqlite3_changes64(*self.connection) as u64 }
    }

    pub fn last_insert_rowid(&self) -> i64 {
        unsafe { sqlite3_last_insert_rowid(*self.connection) }
    }

    pub fn handle(&self) -> *mut sqlite3 {
        *self.connection
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.handle() == other.handle()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if !self.connection.is_null() {
            log::debug!("Closing the database `{}`", db_filename(*self.connection));
        }
    }
}

fn db_filename(connection: *mut sqlite3) -> String {
    unsafe {
        let name = sqlite3_db_filename(connection, c"main".as_ptr());
        if name.is_null() {
            return String::new();
        }
        CStr::from_ptr(name).to_string_lossy().into_owned()
    }
}
