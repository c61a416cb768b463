use lode::{Bind, Column, Connection, Null};
use std::{
    borrow::Cow,
    ffi::{CString, c_char},
    fmt::Debug,
};

fn echo<I: Bind, O: Column>(connection: &Connection, value: I) -> O {
    let mut statement = connection
        .execute("SELECT ?", (value,))
        .expect("Failed to execute SELECT ?");
    let (result,) = statement
        .fetch::<(O,)>()
        .expect("Failed to fetch the echoed value")
        .expect("SELECT ? did not return a row");
    result
}

fn roundtrip<T: Bind + Column + PartialEq + Debug + Clone>(connection: &Connection, value: T) {
    let result: T = echo(connection, value.clone());
    assert_eq!(result, value);
}

pub fn types(connection: &Connection) {
    // Integers
    roundtrip(connection, i8::MIN);
    roundtrip(connection, u8::MAX);
    roundtrip(connection, i16::MIN);
    roundtrip(connection, u16::MAX);
    roundtrip(connection, i32::MIN);
    roundtrip(connection, i32::MAX);
    roundtrip(connection, i64::MIN);
    roundtrip(connection, i64::MAX);
    roundtrip(connection, u64::MAX);
    roundtrip(connection, usize::MAX);
    roundtrip(connection, -9876543210isize);

    // Narrow integers are truncated through the 32 bits primitive
    assert_eq!(echo::<i32, i8>(connection, 300), 44);
    assert_eq!(echo::<i32, u8>(connection, -1), 255);
    assert_eq!(echo::<i32, i16>(connection, 70000), 4464);
    assert_eq!(echo::<i64, i32>(connection, 1 << 32 | 5), 5);
    assert_eq!(echo::<u32, i64>(connection, u32::MAX), -1);
    assert_eq!(echo::<u32, u32>(connection, u32::MAX), u32::MAX);
    assert_eq!(echo::<u64, i64>(connection, u64::MAX), -1);
    assert_eq!(echo::<i64, u64>(connection, -2), u64::MAX - 1);

    // Floating point
    roundtrip(connection, std::f64::consts::PI);
    roundtrip(connection, f64::MIN_POSITIVE);
    roundtrip(connection, 0.1f32);
    assert_eq!(echo::<f32, f64>(connection, 0.1), 0.1f32 as f64);
    assert_eq!(echo::<f64, f32>(connection, 1.0 / 3.0), (1.0f64 / 3.0) as f32);
    assert_eq!(echo::<f64, i64>(connection, 2.75), 2);

    // Boolean
    roundtrip(connection, true);
    roundtrip(connection, false);
    assert_eq!(echo::<bool, i32>(connection, true), 1);
    assert!(echo::<i32, bool>(connection, 42));
    assert!(echo::<i32, bool>(connection, -1));
    assert!(!echo::<i32, bool>(connection, 0));

    // Text
    roundtrip(connection, String::from("Hello world!"));
    roundtrip(connection, String::new());
    roundtrip(connection, String::from("ünïcödé ✓"));
    roundtrip(connection, String::from("a\0b"));
    assert_eq!(echo::<&str, String>(connection, "borrowed"), "borrowed");
    assert_eq!(
        echo::<Cow<'_, str>, String>(connection, Cow::Borrowed("cow")),
        "cow"
    );
    assert_eq!(
        echo::<Box<str>, String>(connection, "boxed".into()),
        "boxed"
    );
    assert_eq!(
        echo::<CString, String>(connection, CString::new("c string").unwrap()),
        "c string"
    );
    assert_eq!(echo::<_, String>(connection, c"literal"), "literal");
    let buffer: [c_char; 4] = [b'a' as c_char, b'b' as c_char, b'c' as c_char, 0];
    assert_eq!(echo::<_, String>(connection, buffer), "abc");
    assert_eq!(echo::<&str, i64>(connection, "123"), 123);
    assert_eq!(echo::<i64, String>(connection, 123), "123");

    // Blob
    roundtrip(connection, vec![0u8, 1, 2, 254, 255]);
    roundtrip(connection, Vec::<u8>::new());
    assert_eq!(
        echo::<&[u8], Vec<u8>>(connection, b"\x00bytes".as_slice()),
        b"\x00bytes".to_vec()
    );

    // NULL
    roundtrip(connection, None::<i32>);
    roundtrip(connection, Some(77i32));
    roundtrip(connection, None::<String>);
    roundtrip(connection, Some(String::from("present")));
    roundtrip(connection, Some(1.5f64));
    roundtrip(connection, Some(Vec::<u8>::new()));
    assert_eq!(echo::<Null, Option<String>>(connection, Null), None);
    assert_eq!(echo::<Null, i64>(connection, Null), 0);
    assert_eq!(echo::<Null, f64>(connection, Null), 0.0);
    assert_eq!(echo::<Null, String>(connection, Null), "");
    assert_eq!(echo::<Null, Vec<u8>>(connection, Null), Vec::<u8>::new());
    assert_eq!(echo::<Option<i32>, i32>(connection, None), 0);
    assert_eq!(echo::<Option<Option<i32>>, Option<i32>>(connection, Some(None)), None);
}
