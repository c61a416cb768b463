use lode::{Connection, TransactionType};

fn count(connection: &Connection) -> i64 {
    connection
        .execute("SELECT COUNT(*) FROM transaction1", ())
        .expect("Failed to count the rows")
        .fetch::<(i64,)>()
        .expect("Failed to fetch the count")
        .expect("The count row is missing")
        .0
}

pub fn transaction1(connection: &Connection) {
    connection
        .execute_batch(
            "DROP TABLE IF EXISTS transaction1;
            CREATE TABLE transaction1(value TEXT);",
        )
        .expect("Failed to create the transaction1 table");
    assert!(connection.is_autocommit());

    // Rolled back
    connection
        .begin_transaction(TransactionType::Deferred)
        .expect("Failed to begin the transaction");
    assert!(!connection.is_autocommit());
    connection
        .execute("INSERT INTO transaction1 VALUES (?)", ("discarded",))
        .expect("Failed to insert inside the transaction");
    assert_eq!(count(connection), 1);
    connection.rollback().expect("Failed to rollback");
    assert!(connection.is_autocommit());
    assert_eq!(count(connection), 0);

    // Committed
    connection
        .begin_transaction(TransactionType::Immediate)
        .expect("Failed to begin the immediate transaction");
    connection
        .execute("INSERT INTO transaction1 VALUES (?)", ("kept",))
        .expect("Failed to insert inside the immediate transaction");
    connection.commit().expect("Failed to commit");
    assert_eq!(count(connection), 1);

    // Guard
    let transaction = connection
        .transaction(TransactionType::Exclusive)
        .expect("Failed to begin the exclusive transaction");
    transaction
        .execute("INSERT INTO transaction1 VALUES (?)", ("guarded",))
        .expect("Failed to insert through the guard");
    transaction.commit().expect("Failed to commit the guard");
    assert_eq!(count(connection), 2);

    let transaction = connection
        .transaction(TransactionType::default())
        .expect("Failed to begin the transaction");
    transaction
        .execute("INSERT INTO transaction1 VALUES (?)", ("rolled back",))
        .expect("Failed to insert through the guard");
    transaction.rollback().expect("Failed to rollback the guard");
    assert_eq!(count(connection), 2);

    crate::silent_logs! {
        {
            let transaction = connection
                .transaction(TransactionType::default())
                .expect("Failed to begin the transaction");
            transaction
                .execute("INSERT INTO transaction1 VALUES (?)", ("dropped",))
                .expect("Failed to insert through the guard");
        }
    }
    assert!(connection.is_autocommit());
    assert_eq!(count(connection), 2);

    // A failed commit still rolls back when the guard goes away
    connection
        .execute_batch(
            "PRAGMA foreign_keys = ON;
            DROP TABLE IF EXISTS transaction1_child;
            DROP TABLE IF EXISTS transaction1_parent;
            CREATE TABLE transaction1_parent(id INTEGER PRIMARY KEY);
            CREATE TABLE transaction1_child(
                parent INTEGER REFERENCES transaction1_parent(id) DEFERRABLE INITIALLY DEFERRED
            );",
        )
        .expect("Failed to create the deferred foreign key tables");
    crate::silent_logs! {
        let transaction = connection
            .transaction(TransactionType::default())
            .expect("Failed to begin the transaction");
        transaction
            .execute("INSERT INTO transaction1_child VALUES (?)", (42,))
            .expect("A deferred foreign key is only checked on commit");
        transaction
            .commit()
            .expect_err("Committing a dangling foreign key should fail");
    }
    assert!(connection.is_autocommit());
    let children = connection
        .execute("SELECT COUNT(*) FROM transaction1_child", ())
        .expect("Failed to count the children")
        .fetch::<(i64,)>()
        .expect("Failed to fetch the children count");
    assert_eq!(children, Some((0,)));
    connection
        .execute_batch("PRAGMA foreign_keys = OFF;")
        .expect("Failed to disable the foreign keys");
}
