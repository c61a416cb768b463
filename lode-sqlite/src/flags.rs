use libsqlite3_sys::*;
use std::{
    ffi::{c_int, c_uint},
    fmt::{self, Debug},
    ops::{BitOr, BitOrAssign},
};

macro_rules! impl_flags {
    ($name:ident, $bits:ty, [$($flag:ident = $value:expr),+ $(,)?]) => {
        impl $name {
            $(pub const $flag: Self = Self($value as $bits);)+

            pub const fn empty() -> Self {
                Self(0)
            }
            pub const fn bits(&self) -> $bits {
                self.0
            }
            pub const fn contains(&self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }
        }

        impl BitOr for $name {
            type Output = Self;
            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut set = f.debug_set();
                $(
                    if self.contains(Self::$flag) && Self::$flag.0 != 0 {
                        set.entry(&format_args!(stringify!($flag)));
                    }
                )+
                set.finish()
            }
        }
    };
}

/// Flags passed to `sqlite3_open_v2`, see <https://www.sqlite.org/c3ref/open.html>.
///
/// Exactly one of `READ_ONLY`, `READ_WRITE` or `READ_WRITE | CREATE` must be present.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpenFlags(c_int);

impl_flags!(
    OpenFlags,
    c_int,
    [
        READ_ONLY = SQLITE_OPEN_READONLY,
        READ_WRITE = SQLITE_OPEN_READWRITE,
        CREATE = SQLITE_OPEN_CREATE,
        URI = SQLITE_OPEN_URI,
        MEMORY = SQLITE_OPEN_MEMORY,
        NO_MUTEX = SQLITE_OPEN_NOMUTEX,
        FULL_MUTEX = SQLITE_OPEN_FULLMUTEX,
        SHARED_CACHE = SQLITE_OPEN_SHAREDCACHE,
        PRIVATE_CACHE = SQLITE_OPEN_PRIVATECACHE,
        NO_FOLLOW = SQLITE_OPEN_NOFOLLOW,
    ]
);

impl Default for OpenFlags {
    fn default() -> Self {
        OpenFlags::READ_WRITE | OpenFlags::CREATE
    }
}

/// Flags passed to `sqlite3_prepare_v3`, see <https://www.sqlite.org/c3ref/c_prepare_normalize.html>.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrepareFlags(c_uint);

impl_flags!(
    PrepareFlags,
    c_uint,
    [
        PERSISTENT = SQLITE_PREPARE_PERSISTENT,
        NO_VTAB = SQLITE_PREPARE_NO_VTAB,
    ]
);

#[cfg(test)]
mod tests {
    use super::{OpenFlags, PrepareFlags};
    use libsqlite3_sys::*;

    #[test]
    fn open_flags_default() {
        let flags = OpenFlags::default();
        assert_eq!(flags.bits(), SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE);
        assert!(flags.contains(OpenFlags::CREATE));
        assert!(!flags.contains(OpenFlags::READ_ONLY));
        assert_eq!(format!("{:?}", flags), "{READ_WRITE, CREATE}");
    }

    #[test]
    fn open_flags_combine() {
        let mut flags = OpenFlags::READ_ONLY;
        flags |= OpenFlags::URI;
        assert_eq!(flags.bits(), SQLITE_OPEN_READONLY | SQLITE_OPEN_URI);
        assert!(flags.contains(OpenFlags::READ_ONLY | OpenFlags::URI));
    }

    #[test]
    fn prepare_flags() {
        assert_eq!(PrepareFlags::default(), PrepareFlags::empty());
        assert_eq!(format!("{:?}", PrepareFlags::empty()), "{}");
        let flags = PrepareFlags::PERSISTENT | PrepareFlags::NO_VTAB;
        assert_eq!(
            flags.bits(),
            (SQLITE_PREPARE_PERSISTENT | SQLITE_PREPARE_NO_VTAB) as u32
        );
    }
}
