use lode::Connection;

type Widest = (
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    isize,
    usize,
    f32,
    f64,
    bool,
    String,
    Option<i32>,
    Vec<u8>,
);

pub fn ordering(connection: &Connection) {
    // Values land in slots 1, 2, 3 and are read from columns 0, 1, 2
    let mut statement = connection
        .prepare("SELECT ?3, ?1, ?2")
        .expect("Failed to prepare the numbered parameters query");
    assert_eq!(statement.parameter_count(), 3);
    assert_eq!(statement.column_count(), 3);
    statement
        .execute(("a", "b", "c"))
        .expect("Failed to execute with (a, b, c)");
    let (mut x, mut y, mut z) = (String::new(), String::new(), String::new());
    assert!(
        statement
            .fetch_into((&mut x, &mut y, &mut z))
            .expect("Failed to fetch the reordered row")
    );
    assert_eq!((x.as_str(), y.as_str(), z.as_str()), ("c", "a", "b"));

    // Reordering the arguments moves the values, nothing is renumbered
    statement
        .execute(("c", "a", "b"))
        .expect("Failed to execute with (c, a, b)");
    assert!(
        statement
            .fetch_into((&mut x, &mut y, &mut z))
            .expect("Failed to fetch the second reordered row")
    );
    assert_eq!((x.as_str(), y.as_str(), z.as_str()), ("b", "c", "a"));

    // Outputs are read left to right, each from its own column
    let mut statement = connection
        .execute("SELECT ?, ?, ?, ?", (1u8, "two", 3.5f64, Some(true)))
        .expect("Failed to execute the mixed query");
    let (mut a, mut b, mut c, mut d) = (0u8, String::new(), 0.0f64, None::<bool>);
    assert!(
        statement
            .fetch_into((&mut a, &mut b, &mut c, &mut d))
            .expect("Failed to fetch the mixed row")
    );
    assert_eq!(a, 1);
    assert_eq!(b, "two");
    assert_eq!(c, 3.5);
    assert_eq!(d, Some(true));

    // Outputs may cover only a prefix of the columns
    statement
        .execute((9u8, "ten", 11.0f64, None::<bool>))
        .expect("Failed to execute the mixed query again");
    let row = statement
        .fetch::<(i32, String)>()
        .expect("Failed to fetch the prefix")
        .expect("The prefix row is missing");
    assert_eq!(row, (9, String::from("ten")));

    // Sixteen values, the widest tuple
    let mut statement = connection
        .execute(
            "SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?",
            (0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15),
        )
        .expect("Failed to execute the widest query");
    let row = statement
        .fetch::<Widest>()
        .expect("Failed to fetch the widest row")
        .expect("The widest row is missing");
    assert_eq!(row.0, 0);
    assert_eq!(row.5, 5);
    assert_eq!(row.9, 9);
    assert_eq!(row.11, 11.0);
    assert!(row.12);
    assert_eq!(row.13, "13");
    assert_eq!(row.14, Some(14));
    assert_eq!(row.15, b"15".to_vec());
}
