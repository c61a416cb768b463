use crate::{CBox, engine_error, raise};
use libsqlite3_sys::*;
use lode_core::{EngineError, Error};
use std::{
    borrow::Cow,
    ffi::{CStr, c_char, c_int, c_void},
    fmt::Display,
    slice,
};

/// A compiled statement, exposing the by-position primitives of the engine.
///
/// Parameter slots are numbered from 1, result columns from 0. Every `bind_*` method
/// returns the native result code untouched, it is up to the caller to turn it into an
/// error. Every `column_*` method always produces a value, following the conversion
/// rules of <https://www.sqlite.org/c3ref/column_blob.html>.
///
/// Instances only exist inside a [`crate::Statement`], so the handle is always live.
#[derive(Debug)]
pub struct StatementHandle {
    statement: CBox<sqlite3_stmt>,
}

impl StatementHandle {
    pub(crate) fn new(statement: CBox<sqlite3_stmt>) -> Self {
        Self { statement }
    }

    pub fn as_ptr(&self) -> *mut sqlite3_stmt {
        *self.statement
    }

    /// The connection the statement was compiled on.
    pub fn connection(&self) -> *mut sqlite3 {
        unsafe { sqlite3_db_handle(*self.statement) }
    }

    pub fn bind_null(&mut self, index: c_int) -> c_int {
        unsafe { sqlite3_bind_null(*self.statement, index) }
    }

    pub fn bind_int(&mut self, index: c_int, value: c_int) -> c_int {
        unsafe { sqlite3_bind_int(*self.statement, index, value) }
    }

    pub fn bind_int64(&mut self, index: c_int, value: i64) -> c_int {
        unsafe { sqlite3_bind_int64(*self.statement, index, value) }
    }

    pub fn bind_double(&mut self, index: c_int, value: f64) -> c_int {
        unsafe { sqlite3_bind_double(*self.statement, index, value) }
    }

    /// Binds UTF-8 text, the engine copies the bytes before returning.
    pub fn bind_text(&mut self, index: c_int, value: &[u8]) -> c_int {
        let Ok(len) = c_int::try_from(value.len()) else {
            return SQLITE_TOOBIG;
        };
        unsafe {
            sqlite3_bind_text(
                *self.statement,
                index,
                value.as_ptr() as *const c_char,
                len,
                SQLITE_TRANSIENT(),
            )
        }
    }

    /// Binds a blob, the engine copies the bytes before returning.
    pub fn bind_blob(&mut self, index: c_int, value: &[u8]) -> c_int {
        let Ok(len) = c_int::try_from(value.len()) else {
            return SQLITE_TOOBIG;
        };
        unsafe {
            sqlite3_bind_blob(
                *self.statement,
                index,
                value.as_ptr() as *const c_void,
                len,
                SQLITE_TRANSIENT(),
            )
        }
    }

    /// Storage class of the value currently in `column`: one of `SQLITE_INTEGER`,
    /// `SQLITE_FLOAT`, `SQLITE_TEXT`, `SQLITE_BLOB`, `SQLITE_NULL`.
    pub fn column_type(&self, column: c_int) -> c_int {
        unsafe { sqlite3_column_type(*self.statement, column) }
    }

    pub fn column_int(&self, column: c_int) -> c_int {
        unsafe { sqlite3_column_int(*self.statement, column) }
    }

    pub fn column_int64(&self, column: c_int) -> i64 {
        unsafe { sqlite3_column_int64(*self.statement, column) }
    }

    pub fn column_double(&self, column: c_int) -> f64 {
        unsafe { sqlite3_column_double(*self.statement, column) }
    }

    /// Copies out the text of `column`, sized by the byte length the engine reports.
    ///
    /// Invalid UTF-8 is replaced, NULL reads as the empty string.
    pub fn column_text(&self, column: c_int) -> String {
        unsafe {
            let ptr = sqlite3_column_text(*self.statement, column);
            let len = sqlite3_column_bytes(*self.statement, column) as usize;
            if ptr.is_null() {
                return String::new();
            }
            String::from_utf8_lossy(slice::from_raw_parts(ptr, len)).into_owned()
        }
    }

    /// Copies out the bytes of `column`, NULL and zero length blobs read as empty.
    pub fn column_blob(&self, column: c_int) -> Vec<u8> {
        unsafe {
            let ptr = sqlite3_column_blob(*self.statement, column) as *const u8;
            let len = sqlite3_column_bytes(*self.statement, column) as usize;
            if ptr.is_null() {
                return Vec::new();
            }
            slice::from_raw_parts(ptr, len).to_vec()
        }
    }

    pub fn parameter_count(&self) -> usize {
        unsafe { sqlite3_bind_parameter_count(*self.statement) as usize }
    }

    pub fn column_count(&self) -> usize {
        unsafe { sqlite3_column_count(*self.statement) as usize }
    }

    pub fn column_name(&self, column: c_int) -> Option<String> {
        unsafe {
            let name = sqlite3_column_name(*self.statement, column);
            if name.is_null() {
                return None;
            }
            Some(CStr::from_ptr(name).to_string_lossy().into_owned())
        }
    }

    /// The SQL text the statement was compiled from.
    pub fn sql(&self) -> Cow<'_, str> {
        unsafe {
            let sql = sqlite3_sql(*self.statement);
            if sql.is_null() {
                return Cow::Borrowed("");
            }
            CStr::from_ptr(sql).to_string_lossy()
        }
    }

    pub(crate) fn step(&mut self) -> c_int {
        unsafe { sqlite3_step(*self.statement) }
    }

    pub(crate) fn reset(&mut self) -> c_int {
        unsafe { sqlite3_reset(*self.statement) }
    }

    pub(crate) fn clear_bindings(&mut self) -> c_int {
        unsafe { sqlite3_clear_bindings(*self.statement) }
    }

    pub(crate) fn engine_error(&self, rc: c_int) -> EngineError {
        engine_error(self.connection(), rc)
    }

    /// Builds the error for a failed primitive, tagging it with `context` and the query.
    pub(crate) fn raise(&self, rc: c_int, context: impl Display) -> Error {
        raise(
            self.engine_error(rc),
            format!(
                "{} in query:\n{}",
                context,
                lode_core::truncate_long!(self.sql())
            ),
        )
    }
}
