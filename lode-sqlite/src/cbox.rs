use std::{
    fmt::{self, Debug},
    ops::{Deref, DerefMut},
};

/// Sole owner of a `*mut T` handed out by the engine.
///
/// `release` runs once when the box drops, a null handle is never released.
pub(crate) struct CBox<T> {
    handle: *mut T,
    release: fn(*mut T),
}

impl<T> CBox<T> {
    pub(crate) fn new(handle: *mut T, release: fn(*mut T)) -> Self {
        Self { handle, release }
    }
}

impl<T> Drop for CBox<T> {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            (self.release)(self.handle);
        }
    }
}

impl<T> Deref for CBox<T> {
    type Target = *mut T;

    fn deref(&self) -> &*mut T {
        &self.handle
    }
}

/// Out parameter of the native constructors (`sqlite3_open_v2`, `sqlite3_prepare_v3`).
impl<T> DerefMut for CBox<T> {
    fn deref_mut(&mut self) -> &mut *mut T {
        &mut self.handle
    }
}

impl<T> Debug for CBox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CBox({:p})", self.handle)
    }
}

// Connections are opened in serialized or multi-thread mode, a handle can move to
// another thread. It is never shared, hence no Sync.
unsafe impl<T> Send for CBox<T> {}

#[cfg(test)]
mod tests {
    use super::CBox;
    use std::{
        ptr,
        sync::atomic::{AtomicUsize, Ordering},
    };

    #[test]
    fn null_is_not_released() {
        static RELEASED: AtomicUsize = AtomicUsize::new(0);
        {
            let handle = CBox::new(ptr::null_mut::<i32>(), |_| {
                RELEASED.fetch_add(1, Ordering::Relaxed);
            });
            assert!(handle.is_null());
        }
        assert_eq!(RELEASED.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn filled_by_out_parameter() {
        static RELEASED: AtomicUsize = AtomicUsize::new(0);
        let mut value = 7;
        let mut handle = CBox::new(ptr::null_mut::<i32>(), |p| {
            assert_eq!(unsafe { *p }, 8);
            RELEASED.fetch_add(1, Ordering::Relaxed);
        });
        let out: &mut *mut i32 = &mut handle;
        *out = &mut value;
        unsafe { **handle += 1 };
        let moved = handle;
        assert_eq!(RELEASED.load(Ordering::Relaxed), 0);
        drop(moved);
        assert_eq!(RELEASED.load(Ordering::Relaxed), 1);
    }
}
