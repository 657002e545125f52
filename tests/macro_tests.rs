use toml_doc::{toml, Dialect, Document, Table, Value};

#[test]
fn scalars() {
    assert_eq!(toml!(true), Value::Boolean(true));
    assert_eq!(toml!(1), Value::Integer(1));
    assert_eq!(toml!(2.5), Value::Float(2.5));
    assert_eq!(toml!("text"), Value::string("text"));
}

#[test]
fn arrays() {
    assert_eq!(toml!([]), Value::Array(toml_doc::Array::new()));

    let arr = toml!([1, 2, 3]);
    let arr = arr.as_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr.get(1), Some(&Value::Integer(2)));
}

#[test]
fn tables() {
    assert_eq!(toml!({}), Value::Table(Table::new()));

    let value = toml!({
        "name": "demo",
        "features": ["a", "b"],
        "limits": { "max": 10 }
    });
    let table = value.as_table().unwrap();
    assert_eq!(
        table.get_value("name").and_then(Value::as_str),
        Some("demo")
    );
    assert_eq!(
        table
            .get_value("features")
            .and_then(Value::as_array)
            .map(|a| a.len()),
        Some(2)
    );
    assert_eq!(
        table
            .get_value("limits")
            .and_then(Value::as_table)
            .and_then(|t| t.get_value("max"))
            .and_then(Value::as_integer),
        Some(10)
    );
}

#[test]
fn built_values_serialize() {
    let value = toml!({
        "title": "built",
        "port": 8080
    });
    let table = match value {
        Value::Table(t) => t,
        other => panic!("expected table, got {other:?}"),
    };
    let doc = Document::from_table(table);
    assert_eq!(
        doc.to_string(Dialect::V04).unwrap(),
        "title = \"built\"\nport = 8080\n"
    );
}

#[test]
#[should_panic(expected = "mixed value kinds")]
fn mixed_macro_arrays_panic() {
    let _ = toml!([1, "two"]);
}
