use lode::{Bind, Connection, Value};

pub fn values(connection: &Connection) {
    connection
        .execute_batch(
            "DROP TABLE IF EXISTS dynamic_values;
            CREATE TABLE dynamic_values(a, b, c, d, e);",
        )
        .expect("Failed to create the dynamic_values table");

    let row = vec![
        Value::Null,
        Value::Integer(-17),
        Value::Real(2.5),
        Value::Text("text".into()),
        Value::Blob(vec![1, 2, 3]),
    ];
    connection
        .execute("INSERT INTO dynamic_values VALUES (?, ?, ?, ?, ?)", &row)
        .expect("Failed to insert the dynamic values");

    // Values keep the storage class of the column
    let mut select = connection
        .execute("SELECT a, b, c, d, e FROM dynamic_values", ())
        .expect("Failed to select the dynamic values");
    let fetched = select
        .fetch::<Vec<Value>>()
        .expect("Failed to fetch the dynamic values")
        .expect("The dynamic values row is missing");
    assert_eq!(fetched, row);
    assert!(fetched[0].is_null());
    assert!(
        select
            .fetch::<Vec<Value>>()
            .expect("Failed to fetch past the last row")
            .is_none()
    );

    // Heterogeneous list sized at runtime
    let text = String::from("runtime");
    let flag = Value::from(true);
    let params: Vec<&dyn Bind> = vec![&1i64, &text, &None::<f64>, &2.0f32, &flag];
    connection
        .execute("INSERT INTO dynamic_values VALUES (?, ?, ?, ?, ?)", params.as_slice())
        .expect("Failed to insert the runtime sized row");
    let mut select = connection
        .execute(
            "SELECT a, b, c, d, e FROM dynamic_values WHERE a IS NOT NULL",
            (),
        )
        .expect("Failed to select the runtime sized row");
    let fetched = select
        .fetch::<(Value, Value, Value, Value, Value)>()
        .expect("Failed to fetch the runtime sized row")
        .expect("The runtime sized row is missing");
    assert_eq!(
        fetched,
        (
            Value::Integer(1),
            Value::Text("runtime".into()),
            Value::Null,
            Value::Real(2.0),
            Value::Integer(1),
        )
    );

    assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    assert_eq!(Value::from(None::<i32>), Value::Null);
    assert_eq!(Value::from(7u8), Value::Integer(7));
}
