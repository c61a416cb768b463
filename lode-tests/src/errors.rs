use libsqlite3_sys::SQLITE_MISUSE;
use lode::{
    Bind, Connection, EngineError, StatementHandle, TransactionType, is_engine_error,
    is_usage_error,
};
use std::ffi::c_int;

/// Rejected without reaching the engine.
struct Refused;

impl Bind for Refused {
    fn bind(&self, _handle: &mut StatementHandle, _index: c_int) -> c_int {
        SQLITE_MISUSE
    }
}

pub fn errors(connection: &Connection) {
    crate::silent_logs! {
        // Malformed SQL fails before anything can be bound
        let error = connection
            .prepare("SELEC 1")
            .err()
            .expect("Preparing malformed SQL should fail");
        let engine = error
            .downcast_ref::<EngineError>()
            .expect("Malformed SQL should raise an engine error");
        assert_eq!(engine.code(), 1);
        assert!(engine.message().contains("syntax error"), "{}", engine);
        assert!(format!("{:#}", error).contains("SELEC 1"));

        let error = connection
            .execute("SELECT * FROM missing_table", ())
            .err()
            .expect("Selecting from a missing table should fail");
        assert!(is_engine_error(&error));
        assert!(format!("{:#}", error).contains("no such table"));

        // Misuse detected without involving the engine
        let error = connection.prepare("").err().expect("Empty SQL should fail");
        assert!(is_usage_error(&error));
        let error = connection
            .prepare("  -- only a comment")
            .err()
            .expect("Comment only SQL should fail");
        assert!(is_usage_error(&error));
        let error = connection
            .prepare("SELECT 1; SELECT 2;")
            .err()
            .expect("Two statements should fail");
        assert!(is_usage_error(&error));
        connection
            .prepare("SELECT 1;  ")
            .expect("A trailing semicolon is fine");
        let error = "sometimes"
            .parse::<TransactionType>()
            .expect_err("An unknown transaction type should fail");
        assert!(is_usage_error(&error));

        // More outputs than columns: nothing is read and the row stays available
        let mut statement = connection
            .execute("SELECT 5", ())
            .expect("Failed to execute SELECT 5");
        let (mut a, mut b) = (0i32, 0i32);
        let error = statement
            .fetch_into((&mut a, &mut b))
            .expect_err("Reading two columns out of one should fail");
        assert!(is_usage_error(&error));
        assert_eq!((a, b), (0, 0));
        assert!(statement.can_fetch());
        assert!(statement.fetch_into(&mut a).expect("Failed to fetch SELECT 5"));
        assert_eq!(a, 5);

        // Too many parameters: the engine rejects the first extra slot
        let mut statement = connection.prepare("SELECT ?").expect("Failed to prepare SELECT ?");
        let error = statement
            .execute((1, 2))
            .expect_err("Binding two values to one slot should fail");
        let engine = error
            .downcast_ref::<EngineError>()
            .expect("Binding out of range should raise an engine error");
        assert_eq!(engine.code(), 25);
        assert!(format!("{:#}", error).contains("Cannot bind parameter 2"));
        statement.execute((3,)).expect("The statement should be reusable after a bind failure");
        assert_eq!(
            statement.fetch::<(i32,)>().expect("Failed to fetch after the bind failure"),
            Some((3,))
        );

        // Binding stops at the first failure, later slots are left alone
        let mut statement = connection
            .prepare("SELECT ?, ?, ?")
            .expect("Failed to prepare SELECT ?, ?, ?");
        let error = statement
            .execute((1, Refused, 3))
            .expect_err("A refused value should stop the binding");
        assert!(is_engine_error(&error));
        assert_eq!(error.downcast_ref::<EngineError>().map(EngineError::code), Some(21));
        assert!(format!("{:#}", error).contains("Cannot bind parameter 2"));
        statement.reset().expect("Failed to reset after the bind failure");
        assert!(statement.step().expect("Failed to step after the bind failure"));
        assert_eq!(
            statement
                .fetch::<(Option<i32>, Option<i32>, Option<i32>)>()
                .expect("Failed to fetch the partially bound row"),
            Some((Some(1), None, None))
        );
        let params: [&dyn Bind; 3] = [&4, &Refused, &6];
        let error = statement
            .execute(&params[..])
            .expect_err("A refused value should stop the binding");
        assert!(format!("{:#}", error).contains("Cannot bind parameter 2"));
        statement.reset().expect("Failed to reset after the bind failure");
        assert!(statement.step().expect("Failed to step after the bind failure"));
        assert_eq!(
            statement
                .fetch::<(Option<i32>, Option<i32>, Option<i32>)>()
                .expect("Failed to fetch the partially bound row"),
            Some((Some(4), None, None))
        );

        // Binding a running statement is refused and keeps the unread row
        let mut statement = connection
            .prepare("SELECT ? UNION ALL SELECT 2")
            .expect("Failed to prepare the union");
        statement.execute((1,)).expect("Failed to execute the union");
        assert!(statement.can_fetch());
        let error = statement
            .bind((9,))
            .expect_err("Binding while the cursor is on a row should fail");
        assert!(is_engine_error(&error));
        assert!(statement.can_fetch());
        let mut value = 0i32;
        assert!(statement.fetch_into(&mut value).expect("Failed to fetch the first row"));
        assert_eq!(value, 1);
        assert!(statement.fetch_into(&mut value).expect("Failed to fetch the second row"));
        assert_eq!(value, 2);
        assert!(!statement.fetch_into(&mut value).expect("Failed to reach the end"));

        // Constraint violation while stepping
        connection
            .execute_batch(
                "DROP TABLE IF EXISTS unique_names;
                CREATE TABLE unique_names(name TEXT NOT NULL UNIQUE);",
            )
            .expect("Failed to create the unique_names table");
        let mut insert = connection
            .prepare("INSERT INTO unique_names VALUES (?)")
            .expect("Failed to prepare the insert");
        insert.execute(("first",)).expect("Failed to insert the first name");
        let error = insert
            .execute(("first",))
            .expect_err("A duplicate name should fail");
        let engine = error
            .downcast_ref::<EngineError>()
            .expect("A constraint violation should raise an engine error");
        assert_eq!(engine.code(), 19);
        assert_eq!(engine.extended_code() & 0xff, 19);
        assert!(!insert.can_fetch());
        assert!(
            !insert
                .fetch_into(())
                .expect("Fetching a failed statement should not step it again")
        );
        let error = insert
            .reset()
            .expect_err("Resetting reports the failure of the last step");
        assert_eq!(error.downcast_ref::<EngineError>().map(EngineError::code), Some(19));
        insert
            .execute(("again",))
            .expect("The statement should be reusable once reset");
        assert_eq!(connection.changes(), 1);
        let error = connection
            .execute("INSERT INTO unique_names VALUES (?)", (None::<String>,))
            .err()
            .expect("A NULL name should fail");
        assert_eq!(error.downcast_ref::<EngineError>().map(EngineError::code), Some(19));

        // No transaction to commit
        let error = connection.commit().expect_err("Committing nothing should fail");
        assert!(is_engine_error(&error));
        assert!(connection.is_autocommit());

        // Batches stop at the first failing statement
        let error = connection
            .execute_batch(
                "INSERT INTO unique_names VALUES ('second');
                INSERT INTO unique_names VALUES ('first');
                INSERT INTO unique_names VALUES ('third');",
            )
            .expect_err("The batch should fail on the duplicate");
        assert!(is_engine_error(&error));
        let names = connection
            .execute("SELECT name FROM unique_names ORDER BY name", ())
            .expect("Failed to select the names")
            .rows::<(String,)>()
            .map(|row| row.expect("Failed to fetch a name").0)
            .collect::<Vec<_>>();
        assert_eq!(names, ["again", "first", "second"]);
    }
}
