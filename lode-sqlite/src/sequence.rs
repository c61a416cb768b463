use crate::{Bind, Column, StatementHandle, Value};
use libsqlite3_sys::SQLITE_OK;
use lode_core::{Result, usage_error};
use std::ffi::c_int;

/// An ordered list of values bound to consecutive parameter slots, starting from 1.
///
/// Implemented for tuples of [`Bind`] values (up to 16 elements), the unit `()` for
/// statements without parameters, and arrays, slices or vectors of a single [`Bind`]
/// type (`&[&dyn Bind]` for a runtime sized heterogeneous list).
///
/// Binding stops at the first slot the engine rejects, later slots are left alone.
pub trait Params {
    /// How many slots the list fills.
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn bind_params(&self, handle: &mut StatementHandle) -> Result<()>;
}

/// Caller owned outputs filled from consecutive result columns, starting from 0.
///
/// Implemented for a single `&mut T` and tuples of `&mut T` where `T: Column`.
pub trait Columns {
    /// How many columns are read.
    fn width(&self) -> usize;
    fn read_columns(self, handle: &StatementHandle);
}

/// An owned row built from consecutive result columns, starting from 0.
///
/// Implemented for tuples of [`Column`] types and for `Vec<Value>`, which takes every
/// column the statement returns.
pub trait Row: Sized {
    /// How many columns are read, `None` when it follows the statement.
    fn width() -> Option<usize>;
    fn read_row(handle: &StatementHandle) -> Self;
}

fn bind_at<B: Bind + ?Sized>(handle: &mut StatementHandle, index: c_int, value: &B) -> Result<()> {
    let rc = value.bind(handle, index);
    if rc != SQLITE_OK {
        return Err(handle.raise(rc, format_args!("Cannot bind parameter {}", index)));
    }
    Ok(())
}

fn bind_sequence<'a, B: Bind + 'a>(
    handle: &mut StatementHandle,
    values: impl ExactSizeIterator<Item = &'a B>,
) -> Result<()> {
    if c_int::try_from(values.len()).is_err() {
        return Err(usage_error(format!(
            "Cannot bind {} parameters, the engine limit is much lower",
            values.len()
        )));
    }
    for (index, value) in (1..).zip(values) {
        bind_at(handle, index, value)?;
    }
    Ok(())
}

impl Params for () {
    fn len(&self) -> usize {
        0
    }
    fn bind_params(&self, _handle: &mut StatementHandle) -> Result<()> {
        Ok(())
    }
}

impl<B: Bind> Params for [B] {
    fn len(&self) -> usize {
        <[B]>::len(self)
    }
    fn bind_params(&self, handle: &mut StatementHandle) -> Result<()> {
        bind_sequence(handle, self.iter())
    }
}

impl<B: Bind, const N: usize> Params for [B; N] {
    fn len(&self) -> usize {
        N
    }
    fn bind_params(&self, handle: &mut StatementHandle) -> Result<()> {
        bind_sequence(handle, self.iter())
    }
}

impl<B: Bind> Params for Vec<B> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
    fn bind_params(&self, handle: &mut StatementHandle) -> Result<()> {
        bind_sequence(handle, self.iter())
    }
}

impl<P: Params + ?Sized> Params for &P {
    fn len(&self) -> usize {
        (**self).len()
    }
    fn bind_params(&self, handle: &mut StatementHandle) -> Result<()> {
        (**self).bind_params(handle)
    }
}

impl Columns for () {
    fn width(&self) -> usize {
        0
    }
    fn read_columns(self, _handle: &StatementHandle) {}
}

impl<T: Column> Columns for &mut T {
    fn width(&self) -> usize {
        1
    }
    fn read_columns(self, handle: &StatementHandle) {
        *self = T::column(handle, 0);
    }
}

impl Row for () {
    fn width() -> Option<usize> {
        Some(0)
    }
    fn read_row(_handle: &StatementHandle) -> Self {}
}

impl Row for Vec<Value> {
    fn width() -> Option<usize> {
        None
    }
    fn read_row(handle: &StatementHandle) -> Self {
        (0..handle.column_count() as c_int)
            .map(|column| Value::column(handle, column))
            .collect()
    }
}

macro_rules! count {
    () => { 0usize };
    ($head:tt $($tail:tt)*) => { 1usize + count!($($tail)*) };
}

macro_rules! impl_tuples {
    ($(($($name:ident $index:tt),+))+) => {
        $(
            impl<$($name: Bind),+> Params for ($($name,)+) {
                fn len(&self) -> usize {
                    count!($($name)+)
                }
                fn bind_params(&self, handle: &mut StatementHandle) -> Result<()> {
                    $(bind_at(handle, $index + 1, &self.$index)?;)+
                    Ok(())
                }
            }

            impl<$($name: Column),+> Columns for ($(&mut $name,)+) {
                fn width(&self) -> usize {
                    count!($($name)+)
                }
                fn read_columns(self, handle: &StatementHandle) {
                    $(*self.$index = $name::column(handle, $index);)+
                }
            }

            impl<$($name: Column),+> Row for ($($name,)+) {
                fn width() -> Option<usize> {
                    Some(count!($($name)+))
                }
                fn read_row(handle: &StatementHandle) -> Self {
                    ($($name::column(handle, $index),)+)
                }
            }
        )+
    };
}

impl_tuples! {
    (A 0)
    (A 0, B 1)
    (A 0, B 1, C 2)
    (A 0, B 1, C 2, D 3)
    (A 0, B 1, C 2, D 3, E 4)
    (A 0, B 1, C 2, D 3, E 4, F 5)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13, O 14)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13, O 14, P 15)
}
