use crate::StatementHandle;
use libsqlite3_sys::SQLITE_NULL;
use std::{
    borrow::Cow,
    ffi::{CStr, CString, c_char, c_int},
    rc::Rc,
    sync::Arc,
};

/// Writes a host value into a positional parameter slot (numbered from 1).
///
/// Returns the native result code, `SQLITE_OK` on success. Types without an
/// implementation are rejected at compile time:
/// ```compile_fail
/// use lode_sqlite::Connection;
/// let connection = Connection::open_in_memory().unwrap();
/// let mut statement = connection.prepare("SELECT ?").unwrap();
/// statement.execute((std::time::Duration::ZERO,)).unwrap();
/// ```
///
/// Narrow integers go through the 32 bits primitive (`u32` values above `i32::MAX`
/// wrap around), `u64` reuses the bit pattern of `i64`. Text and blobs are copied by
/// the engine during the call.
pub trait Bind {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int;
}

/// Reads a result column (numbered from 0) into a host value.
///
/// Always succeeds: the value is converted from whatever storage class the column
/// holds, NULL included. Use `Option<T>` to tell NULL apart.
pub trait Column: Sized {
    fn column(handle: &StatementHandle, column: c_int) -> Self;
}

/// Write only NULL marker.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Null;

impl Bind for Null {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
        handle.bind_null(index)
    }
}

macro_rules! impl_integer {
    ($bind:ident, $column:ident, $wire:ty => $($source:ty),+ $(,)?) => {
        $(
            impl Bind for $source {
                fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
                    handle.$bind(index, *self as $wire)
                }
            }

            impl Column for $source {
                fn column(handle: &StatementHandle, column: c_int) -> Self {
                    handle.$column(column) as $source
                }
            }
        )+
    };
}

impl_integer!(bind_int, column_int, c_int => i8, u8, i16, u16, i32, u32);
impl_integer!(bind_int64, column_int64, i64 => i64, u64, isize, usize);

impl Bind for bool {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
        handle.bind_int(index, *self as c_int)
    }
}

impl Column for bool {
    fn column(handle: &StatementHandle, column: c_int) -> Self {
        handle.column_int(column) != 0
    }
}

impl Bind for f64 {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
        handle.bind_double(index, *self)
    }
}

impl Column for f64 {
    fn column(handle: &StatementHandle, column: c_int) -> Self {
        handle.column_double(column)
    }
}

impl Bind for f32 {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
        (*self as f64).bind(handle, index)
    }
}

impl Column for f32 {
    fn column(handle: &StatementHandle, column: c_int) -> Self {
        f64::column(handle, column) as f32
    }
}

impl Bind for str {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
        handle.bind_text(index, self.as_bytes())
    }
}

impl Bind for String {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
        self.as_str().bind(handle, index)
    }
}

impl Column for String {
    fn column(handle: &StatementHandle, column: c_int) -> Self {
        handle.column_text(column)
    }
}

impl Bind for Cow<'_, str> {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
        self.as_ref().bind(handle, index)
    }
}

impl Bind for CStr {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
        handle.bind_text(index, self.to_bytes())
    }
}

impl Bind for CString {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
        self.as_c_str().bind(handle, index)
    }
}

/// A C character buffer: the last element is the terminator and is not bound.
impl<const N: usize> Bind for [c_char; N] {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
        let text: Vec<u8> = self[..N.saturating_sub(1)]
            .iter()
            .map(|c| *c as u8)
            .collect();
        handle.bind_text(index, &text)
    }
}

impl Bind for [u8] {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
        handle.bind_blob(index, self)
    }
}

impl Bind for Vec<u8> {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
        self.as_slice().bind(handle, index)
    }
}

impl Column for Vec<u8> {
    fn column(handle: &StatementHandle, column: c_int) -> Self {
        handle.column_blob(column)
    }
}

impl<T: Bind> Bind for Option<T> {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
        match self {
            Some(value) => value.bind(handle, index),
            None => Null.bind(handle, index),
        }
    }
}

impl<T: Column> Column for Option<T> {
    fn column(handle: &StatementHandle, column: c_int) -> Self {
        if handle.column_type(column) == SQLITE_NULL {
            None
        } else {
            Some(T::column(handle, column))
        }
    }
}

macro_rules! impl_deref_bind {
    ($($wrapper:ident),+) => {
        $(
            impl<T: Bind + ?Sized> Bind for $wrapper<T> {
                fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
                    (**self).bind(handle, index)
                }
            }
        )+
    };
}

impl_deref_bind!(Box, Rc, Arc);

impl<T: Bind + ?Sized> Bind for &T {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
        (**self).bind(handle, index)
    }
}

impl<T: Bind + ?Sized> Bind for &mut T {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
        (**self).bind(handle, index)
    }
}
