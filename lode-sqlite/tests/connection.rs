#[cfg(test)]
mod tests {
    use lode_core::{EngineError, is_engine_error, is_usage_error};
    use lode_sqlite::{Connection, OpenFlags, PrepareFlags};
    use lode_tests::{init_logs, silent_logs};
    use std::{fs, path::Path, sync::Mutex, time::Duration};

    static MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn create_database() {
        init_logs();
        const DB_PATH: &str = "../target/debug/creation.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH)
                .expect(format!("Failed to remove test database file {}", DB_PATH).as_str());
        }
        assert!(
            !Path::new(DB_PATH).exists(),
            "Database file should not exist before test"
        );
        Connection::connect(format!("sqlite://{}?mode=rwc", DB_PATH))
            .expect("Could not open the database");
        assert!(
            Path::new(DB_PATH).exists(),
            "Database file should be created after connection"
        );
        let connection = Connection::connect(format!("sqlite://{}?mode=ro", DB_PATH))
            .expect("Could not open the database");
        silent_logs! {
            let error = connection
                .execute_batch("CREATE TABLE t(a);")
                .expect_err("Should not be able to write a read only database");
            assert_eq!(
                error.downcast_ref::<EngineError>().map(EngineError::code),
                Some(8)
            );
        }
        drop(connection);
        fs::remove_file(DB_PATH)
            .expect(format!("Failed to remove existing test database file {}", DB_PATH).as_str());
        silent_logs! {
            let error = Connection::connect(format!("sqlite://{}?mode=ro", DB_PATH))
                .err()
                .expect("Should not be able to open in read only unexisting database");
            assert!(is_engine_error(&error));
        }
    }

    #[test]
    fn open_with_flags() {
        init_logs();
        const DB_PATH: &str = "../target/debug/flags.sqlite";
        let _guard = MUTEX.lock().unwrap();
        let _ = fs::remove_file(DB_PATH);
        silent_logs! {
            let error = Connection::open_with_flags(DB_PATH, OpenFlags::READ_WRITE)
                .err()
                .expect("Should not create the database without the CREATE flag");
            let engine = error
                .downcast_ref::<EngineError>()
                .expect("Expected an engine error");
            assert_eq!(engine.code(), 14);
        }
        {
            let connection = Connection::open(DB_PATH).expect("Could not create the database");
            connection
                .execute_batch("CREATE TABLE kept(value INTEGER); INSERT INTO kept VALUES (1);")
                .expect("Could not populate the database");
        }
        let connection = Connection::open_with_flags(DB_PATH, OpenFlags::READ_ONLY)
            .expect("Could not open the database read only");
        let mut select = connection
            .prepare_with_flags("SELECT value FROM kept", PrepareFlags::PERSISTENT)
            .expect("Could not prepare the persistent statement");
        assert_eq!(
            select.fetch::<(i64,)>().expect("Could not fetch the value"),
            Some((1,))
        );
        drop(select);
        drop(connection);
        fs::remove_file(DB_PATH).expect("Failed to remove the flags database");
    }

    #[test]
    fn wrong_url() {
        silent_logs! {
            let error = Connection::connect("duckdb://some_value")
                .err()
                .expect("A foreign scheme should be refused");
            assert!(is_usage_error(&error));
        };
    }

    #[test]
    fn nul_in_path() {
        silent_logs! {
            let error = Connection::open("bad\0path.sqlite")
                .err()
                .expect("A path with a nul byte should be refused");
            assert!(is_usage_error(&error));
        };
    }

    #[test]
    fn memory_url() {
        init_logs();
        let first = Connection::connect("sqlite://memory_url?mode=memory&cache=shared")
            .expect("Could not open the shared memory database");
        let second = Connection::connect("sqlite://memory_url?mode=memory&cache=shared")
            .expect("Could not open the shared memory database again");
        assert!(first != second);
        first
            .execute_batch("CREATE TABLE shared(value TEXT); INSERT INTO shared VALUES ('seen');")
            .expect("Could not write the shared database");
        let value = second
            .execute("SELECT value FROM shared", ())
            .expect("Could not read the shared database")
            .fetch::<(String,)>()
            .expect("Could not fetch the shared value");
        assert_eq!(value, Some((String::from("seen"),)));
    }

    #[test]
    fn busy_timeout() {
        init_logs();
        let connection = Connection::open_in_memory().expect("Could not open the database");
        connection
            .busy_timeout(Duration::from_millis(250))
            .expect("Could not set the busy timeout");
        connection
            .busy_timeout(Duration::from_secs(u64::MAX))
            .expect("Could not set a huge busy timeout");
        assert!(!connection.handle().is_null());
    }
}
