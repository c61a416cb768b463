use lode::Connection;

pub fn lifecycle(connection: &Connection) {
    connection
        .execute_batch(
            "DROP TABLE IF EXISTS lifecycle_numbers;
            CREATE TABLE lifecycle_numbers(n INTEGER NOT NULL);",
        )
        .expect("Failed to create the lifecycle_numbers table");
    let mut insert = connection
        .prepare("INSERT INTO lifecycle_numbers(n) VALUES (?)")
        .expect("Failed to prepare the insert");
    for n in 1..=5 {
        insert
            .execute((n,))
            .expect("Failed to insert into lifecycle_numbers");
        assert_eq!(connection.changes(), 1);
        assert!(!insert.can_fetch());
    }
    assert!(
        !insert
            .fetch_into(())
            .expect("Failed to fetch from the insert")
    );

    // Exactly one successful fetch per row, the one after leaves the outputs alone
    let mut select = connection
        .prepare("SELECT n FROM lifecycle_numbers ORDER BY n")
        .expect("Failed to prepare the select");
    assert!(!select.can_fetch());
    select.execute(()).expect("Failed to execute the select");
    assert!(select.can_fetch());
    let mut n = 0i64;
    let mut fetched = Vec::new();
    while select.fetch_into(&mut n).expect("Failed to fetch a number") {
        assert!(!select.can_fetch());
        fetched.push(n);
    }
    assert_eq!(fetched, [1, 2, 3, 4, 5]);
    n = -1;
    select.reset().expect("Failed to reset the select");
    select.execute(()).expect("Failed to execute the select again");
    assert_eq!(
        select
            .rows::<(i64,)>()
            .map(|row| row.expect("Failed to fetch a row").0)
            .sum::<i64>(),
        15
    );
    assert!(
        !select
            .fetch_into(&mut n)
            .expect("Failed to fetch after the last row")
    );
    assert_eq!(n, -1);

    // Reset rewinds the cursor
    select.execute(()).expect("Failed to execute the select");
    assert!(select.fetch_into(&mut n).expect("Failed to fetch 1"));
    assert!(select.fetch_into(&mut n).expect("Failed to fetch 2"));
    assert_eq!(n, 2);
    select.reset().expect("Failed to reset the select");
    assert!(!select.can_fetch());
    assert!(select.fetch_into(&mut n).expect("Failed to fetch after reset"));
    assert_eq!(n, 1);

    // Empty result set
    let mut empty = connection
        .execute("SELECT n FROM lifecycle_numbers WHERE n > ?", (100,))
        .expect("Failed to execute the empty select");
    assert!(!empty.can_fetch());
    n = 42;
    assert!(!empty.fetch_into(&mut n).expect("Failed to fetch nothing"));
    assert_eq!(n, 42);

    // Fetching a statement never executed steps it
    let mut constant = connection
        .prepare("SELECT 1")
        .expect("Failed to prepare SELECT 1");
    assert!(constant.fetch_into(&mut n).expect("Failed to fetch SELECT 1"));
    assert_eq!(n, 1);
    assert!(!constant.fetch_into(&mut n).expect("Failed to finish SELECT 1"));

    // Execute isolates invocations: the second slot goes back to NULL
    let mut pair = connection
        .prepare("SELECT ?1, ?2")
        .expect("Failed to prepare the pair");
    pair.execute((1, 2)).expect("Failed to execute the pair");
    let row = pair
        .fetch::<(i32, Option<i32>)>()
        .expect("Failed to fetch the pair")
        .expect("The pair row is missing");
    assert_eq!(row, (1, Some(2)));
    pair.execute([5]).expect("Failed to execute the single value");
    let row = pair
        .fetch::<(i32, Option<i32>)>()
        .expect("Failed to fetch the single value")
        .expect("The single value row is missing");
    assert_eq!(row, (5, None));

    // Reset keeps the bindings, rebinding without unbind only replaces the given slots
    pair.execute((3, 4)).expect("Failed to execute the pair again");
    pair.reset().expect("Failed to reset the pair");
    pair.bind((9,)).expect("Failed to bind the first slot");
    assert!(pair.step().expect("Failed to step the pair"));
    let row = pair
        .fetch::<(i32, Option<i32>)>()
        .expect("Failed to fetch the rebound pair")
        .expect("The rebound pair row is missing");
    assert_eq!(row, (9, Some(4)));

    // Unbind sets every slot to NULL
    pair.reset().expect("Failed to reset the pair");
    pair.unbind().expect("Failed to unbind the pair");
    assert!(pair.step().expect("Failed to step the unbound pair"));
    let row = pair
        .fetch::<(Option<i32>, Option<i32>)>()
        .expect("Failed to fetch the unbound pair")
        .expect("The unbound pair row is missing");
    assert_eq!(row, (None, None));

    // Same for statements that write
    connection
        .execute("DELETE FROM lifecycle_numbers WHERE n > ?", (3,))
        .expect("Failed to delete");
    assert_eq!(connection.changes(), 2);
    let mut count = connection
        .execute("SELECT COUNT(*) FROM lifecycle_numbers", ())
        .expect("Failed to count");
    let mut total = 0u32;
    assert!(count.fetch_into(&mut total).expect("Failed to fetch the count"));
    assert_eq!(total, 3);
    assert!(format!("{}", count).starts_with("0x"));
    assert!(count != constant);
    assert_eq!(count.column_name(0).as_deref(), Some("COUNT(*)"));
    assert_eq!(count.sql(), "SELECT COUNT(*) FROM lifecycle_numbers");
}
