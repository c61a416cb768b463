use crate::{Bind, Column, StatementHandle};
use libsqlite3_sys::*;
use std::ffi::c_int;

/// A dynamically typed value, one variant for each storage class of the engine.
///
/// Reading a `Value` keeps the storage class the column reports, this makes it the
/// target of choice when the shape of the result is not known beforehand.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Bind for Value {
    fn bind(&self, handle: &mut StatementHandle, index: c_int) -> c_int {
        match self {
            Value::Null => handle.bind_null(index),
            Value::Integer(v) => handle.bind_int64(index, *v),
            Value::Real(v) => handle.bind_double(index, *v),
            Value::Text(v) => handle.bind_text(index, v.as_bytes()),
            Value::Blob(v) => handle.bind_blob(index, v),
        }
    }
}

impl Column for Value {
    fn column(handle: &StatementHandle, column: c_int) -> Self {
        match handle.column_type(column) {
            SQLITE_INTEGER => Value::Integer(handle.column_int64(column)),
            SQLITE_FLOAT => Value::Real(handle.column_double(column)),
            SQLITE_TEXT => Value::Text(handle.column_text(column)),
            SQLITE_BLOB => Value::Blob(handle.column_blob(column)),
            _ => Value::Null,
        }
    }
}

macro_rules! impl_from {
    ($variant:ident, $wire:ty => $($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Value::$variant(value as $wire)
                }
            }
        )+
    };
}

impl_from!(Integer, i64 => i8, u8, i16, u16, i32, u32, i64);
impl_from!(Real, f64 => f32, f64);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Blob(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
