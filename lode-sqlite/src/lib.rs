//! Typed access to the native SQLite statement API.
//!
//! Host values are written into positional parameters through [`Bind`] and read back
//! from result columns through [`Column`]. Tuples of such values form the variadic
//! argument lists accepted by [`Statement::execute`] and [`Statement::fetch_into`].
//!
//! ```rust
//! use lode_sqlite::Connection;
//! # fn main() -> lode_core::Result<()> {
//! let connection = Connection::open_in_memory()?;
//! connection.execute_batch("CREATE TABLE t(id INTEGER, name TEXT, score REAL);")?;
//! let mut insert = connection.prepare("INSERT INTO t VALUES (?, ?, ?)")?;
//! insert.execute((7, "abc", None::<f64>))?;
//! insert.execute((8, "xyz", Some(1.5)))?;
//! let mut select = connection.prepare("SELECT id, name, score FROM t ORDER BY id")?;
//! select.execute(())?;
//! let (mut id, mut name, mut score) = (0i32, String::new(), None::<f64>);
//! let mut rows = Vec::new();
//! while select.fetch_into((&mut id, &mut name, &mut score))? {
//!     rows.push((id, name.clone(), score));
//! }
//! assert_eq!(
//!     rows,
//!     vec![(7, String::from("abc"), None), (8, String::from("xyz"), Some(1.5))]
//! );
//! # Ok(())
//! # }
//! ```
mod binding;
mod cbox;
mod connection;
mod driver;
mod flags;
mod handle;
mod sequence;
mod sql_writer;
mod statement;
mod transaction;
mod value;

pub(crate) use cbox::*;
pub use binding::*;
pub use connection::*;
pub use driver::*;
pub use flags::*;
pub use handle::*;
pub use sequence::*;
pub use sql_writer::*;
pub use statement::*;
pub use transaction::*;
pub use value::*;

use libsqlite3_sys::{
    sqlite3, sqlite3_errcode, sqlite3_errmsg, sqlite3_errstr, sqlite3_extended_errcode,
};
use lode_core::{EngineError, Error};
use std::{
    ffi::{CStr, c_char, c_int},
    fmt::Display,
};

pub(crate) fn error_message_from_ptr(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return "Unknown error (could not extract the error message)".into();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Collects the diagnostic of the last failure reported on `connection`.
///
/// When the connection does not record `rc` (a failure detected before reaching the
/// engine) the generic description of `rc` is used instead.
pub(crate) fn engine_error(connection: *mut sqlite3, rc: c_int) -> EngineError {
    unsafe {
        let code = sqlite3_errcode(connection);
        let extended_code = sqlite3_extended_errcode(connection);
        if code == rc & 0xff || extended_code == rc {
            EngineError::new(
                error_message_from_ptr(sqlite3_errmsg(connection)),
                code,
                extended_code,
            )
        } else {
            EngineError::new(error_message_from_ptr(sqlite3_errstr(rc)), rc & 0xff, rc)
        }
    }
}

/// Wraps the engine diagnostic into an [`Error`] with `context` and logs it.
pub(crate) fn raise(error: EngineError, context: impl Display + Send + Sync + 'static) -> Error {
    let error = Error::new(error).context(context);
    log::error!("{:#}", error);
    error
}
