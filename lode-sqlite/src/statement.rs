use crate::{
    CBox, Columns, Connection, Params, PrepareFlags, Row, StatementHandle, engine_error, raise,
};
use libsqlite3_sys::*;
use lode_core::{Result, truncate_long, usage_error};
use std::{
    borrow::Cow,
    ffi::{c_char, c_int},
    fmt::{self, Display},
    marker::PhantomData,
    ptr,
};

/// A compiled query, reusable across invocations.
///
/// The statement starts unpositioned. [`Statement::step`] moves the cursor, a step
/// that lands on a row makes it available to exactly one fetch. The usual pattern is
/// [`Statement::execute`] followed by [`Statement::fetch_into`] until it returns
/// false:
/// ```rust
/// # use lode_sqlite::Connection;
/// # fn main() -> lode_core::Result<()> {
/// let connection = Connection::open_in_memory()?;
/// let mut statement = connection.prepare(
///     "WITH RECURSIVE s(v) AS (SELECT 1 UNION ALL SELECT v + 1 FROM s WHERE v < ?) SELECT v FROM s",
/// )?;
/// statement.execute((3,))?;
/// let mut value = 0i64;
/// let mut total = 0;
/// while statement.fetch_into(&mut value)? {
///     total += value;
/// }
/// assert_eq!(total, 6);
/// # Ok(())
/// # }
/// ```
///
/// Once a step reports the end of the rows, fetching keeps returning false until the
/// statement is reset or executed again, an explicit [`Statement::step`] restarts it.
///
/// The native handle is released when the statement is dropped.
pub struct Statement<'c> {
    handle: StatementHandle,
    can_fetch: bool,
    exhausted: bool,
    connection: PhantomData<&'c Connection>,
}

impl<'c> Statement<'c> {
    /// Compiles the first statement in `sql`, returning it along with the uncompiled tail.
    ///
    /// The statement is `None` when `sql` starts with nothing but whitespace or comments.
    pub(crate) fn compile<'s>(
        connection: &'c Connection,
        sql: &'s str,
        flags: PrepareFlags,
    ) -> Result<(Option<Self>, &'s str)> {
        let db = connection.handle();
        let Ok(len) = c_int::try_from(sql.len()) else {
            return Err(usage_error(format!(
                "Cannot prepare a query of {} bytes:\n{}",
                sql.len(),
                truncate_long!(sql)
            )));
        };
        let mut statement = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_finalize(p);
        });
        let mut tail: *const c_char = ptr::null();
        let rc = unsafe {
            sqlite3_prepare_v3(
                db,
                sql.as_ptr() as *const c_char,
                len,
                flags.bits(),
                &mut *statement,
                &mut tail,
            )
        };
        if rc != SQLITE_OK {
            return Err(raise(
                engine_error(db, rc),
                format!("While preparing the query:\n{}", truncate_long!(sql)),
            ));
        }
        let consumed = if tail.is_null() {
            sql.len()
        } else {
            tail as usize - sql.as_ptr() as usize
        };
        let rest = &sql[consumed..];
        if statement.is_null() {
            return Ok((None, rest));
        }
        log::debug!("Prepared query:\n{}", truncate_long!(sql[..consumed]));
        Ok((
            Some(Self {
                handle: StatementHandle::new(statement),
                can_fetch: false,
                exhausted: false,
                connection: PhantomData,
            }),
            rest,
        ))
    }

    pub(crate) fn new(connection: &'c Connection, sql: &str, flags: PrepareFlags) -> Result<Self> {
        let (statement, rest) = Self::compile(connection, sql, flags)?;
        let Some(statement) = statement else {
            return Err(usage_error(format!(
                "Cannot prepare an empty query:\n{}",
                truncate_long!(sql)
            )));
        };
        if !rest.trim_matches(|c: char| c.is_whitespace() || c == ';').is_empty() {
            return Err(usage_error(format!(
                "Cannot prepare more than one statement at a time, use `execute_batch` instead:\n{}",
                truncate_long!(sql)
            )));
        }
        Ok(statement)
    }

    /// Rewinds the cursor to the start, the bound parameters stay in place.
    ///
    /// If the last step failed the engine reports that failure again here, the
    /// statement is rewound anyway.
    pub fn reset(&mut self) -> Result<()> {
        self.can_fetch = false;
        self.exhausted = false;
        let rc = self.handle.reset();
        if rc != SQLITE_OK {
            return Err(self.handle.raise(rc, "Cannot reset the statement"));
        }
        Ok(())
    }

    /// Sets every parameter slot back to NULL.
    pub fn unbind(&mut self) -> Result<()> {
        let rc = self.handle.clear_bindings();
        if rc != SQLITE_OK {
            return Err(self.handle.raise(rc, "Cannot clear the bindings"));
        }
        Ok(())
    }

    /// Binds `params` to the slots 1, 2, ... in order, stopping at the first failure.
    ///
    /// Slots past the end of `params` keep their previous value. A failed bind leaves
    /// the cursor where it was.
    pub fn bind<P: Params>(&mut self, params: P) -> Result<()> {
        log::trace!("Binding {} parameters to {}", params.len(), self);
        params.bind_params(&mut self.handle)?;
        self.can_fetch = false;
        self.exhausted = false;
        Ok(())
    }

    /// Advances the cursor, returns whether it landed on a row.
    pub fn step(&mut self) -> Result<bool> {
        self.can_fetch = false;
        self.exhausted = false;
        match self.handle.step() {
            SQLITE_ROW => {
                log::trace!("Statement {} has a row available", self);
                self.can_fetch = true;
                Ok(true)
            }
            SQLITE_DONE => {
                log::trace!("Statement {} is done", self);
                self.exhausted = true;
                Ok(false)
            }
            rc => {
                self.exhausted = true;
                Err(self.handle.raise(rc, "Cannot step the statement"))
            }
        }
    }

    /// Runs the statement from scratch with `params`: reset, unbind, bind, step.
    ///
    /// Nothing from a previous invocation survives. Rows produced are then read with
    /// [`Statement::fetch_into`], [`Statement::fetch`] or [`Statement::rows`].
    pub fn execute<P: Params>(&mut self, params: P) -> Result<()> {
        self.reset()?;
        self.unbind()?;
        self.bind(params)?;
        self.step()?;
        Ok(())
    }

    /// Reads the current row into `outputs`, returns whether there was one.
    ///
    /// Steps first when no unread row is available and the end was not reached yet. A
    /// row is consumed by exactly one fetch. When it returns false `outputs` are left
    /// untouched.
    pub fn fetch_into<C: Columns>(&mut self, outputs: C) -> Result<bool> {
        if !self.prepare_fetch(Some(outputs.width()))? {
            return Ok(false);
        }
        outputs.read_columns(&self.handle);
        self.can_fetch = false;
        Ok(true)
    }

    /// Like [`Statement::fetch_into`], returning the row as owned values.
    pub fn fetch<R: Row>(&mut self) -> Result<Option<R>> {
        if !self.prepare_fetch(R::width())? {
            return Ok(None);
        }
        let row = R::read_row(&self.handle);
        self.can_fetch = false;
        Ok(Some(row))
    }

    /// Iterates the remaining rows, stopping after the first error.
    pub fn rows<R: Row>(&mut self) -> Rows<'_, 'c, R> {
        Rows {
            statement: self,
            done: false,
            row: PhantomData,
        }
    }

    fn prepare_fetch(&mut self, width: Option<usize>) -> Result<bool> {
        if !self.can_fetch && !self.exhausted {
            self.step()?;
        }
        if !self.can_fetch {
            return Ok(false);
        }
        if let Some(width) = width {
            let count = self.handle.column_count();
            if width > count {
                return Err(usage_error(format!(
                    "Cannot read {} columns from a query returning {}:\n{}",
                    width,
                    count,
                    truncate_long!(self.sql())
                )));
            }
        }
        Ok(true)
    }

    /// True when a row is available and was not fetched yet.
    pub fn can_fetch(&self) -> bool {
        self.can_fetch
    }

    pub fn sql(&self) -> Cow<'_, str> {
        self.handle.sql()
    }

    pub fn parameter_count(&self) -> usize {
        self.handle.parameter_count()
    }

    pub fn column_count(&self) -> usize {
        self.handle.column_count()
    }

    pub fn column_name(&self, column: usize) -> Option<String> {
        self.handle.column_name(c_int::try_from(column).ok()?)
    }

    pub fn handle(&self) -> *mut sqlite3_stmt {
        self.handle.as_ptr()
    }
}

impl PartialEq for Statement<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.handle() == other.handle()
    }
}

impl Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", self.handle())
    }
}

/// Iterator over the rows of a [`Statement`], see [`Statement::rows`].
pub struct Rows<'s, 'c, R> {
    statement: &'s mut Statement<'c>,
    done: bool,
    row: PhantomData<R>,
}

impl<R: Row> Iterator for Rows<'_, '_, R> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.statement.fetch::<R>() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}
