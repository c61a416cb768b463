use lode::Connection;

pub fn scores(connection: &Connection) {
    connection
        .execute_batch(
            "DROP TABLE IF EXISTS scores;
            CREATE TABLE scores(id INTEGER PRIMARY KEY, name TEXT NOT NULL, score REAL);",
        )
        .expect("Failed to create the scores table");

    let mut insert = connection
        .prepare("INSERT INTO scores(id, name, score) VALUES (?, ?, ?)")
        .expect("Failed to prepare the insert");
    insert
        .execute((7, "abc", None::<f64>))
        .expect("Failed to insert the first score");
    assert_eq!(connection.last_insert_rowid(), 7);
    insert
        .execute((8, String::from("xyz"), Some(1.5)))
        .expect("Failed to insert the second score");
    assert_eq!(connection.last_insert_rowid(), 8);

    let mut select = connection
        .prepare("SELECT id, name, score FROM scores ORDER BY id")
        .expect("Failed to prepare the select");
    select.execute(()).expect("Failed to execute the select");
    let mut id = 0i32;
    let mut name = String::new();
    let mut score = None::<f64>;
    let mut rows = Vec::new();
    while select
        .fetch_into((&mut id, &mut name, &mut score))
        .expect("Failed to fetch a score")
    {
        rows.push((id, name.clone(), score));
    }
    assert_eq!(
        rows,
        vec![(7, String::from("abc"), None), (8, String::from("xyz"), Some(1.5))]
    );

    // The same rows through the owned interface
    select.execute(()).expect("Failed to execute the select again");
    let owned = select
        .rows::<(i32, String, Option<f64>)>()
        .collect::<lode::Result<Vec<_>>>()
        .expect("Failed to collect the scores");
    assert_eq!(owned, rows);
}
