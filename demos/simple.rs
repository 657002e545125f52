//! Parse a document and read values out of the tree.
//!
//! Run with: `cargo run --example simple`

use toml_doc::{Dialect, Document, Value};

fn main() {
    let text = r#"
# service manifest
title = "demo"

[server]
host = "localhost"
port = 8080

[[backends]]
name = "alpha"
weight = 3

[[backends]]
name = "beta"
weight = 1
"#;

    let doc = Document::parse(text, Dialect::V04).expect("valid TOML");

    let title = doc.root().get_value("title").and_then(Value::as_str);
    println!("title: {title:?}");

    let server = doc
        .root()
        .get_value("server")
        .and_then(Value::as_table)
        .expect("server table");
    println!(
        "server: {}:{}",
        server.get_value("host").and_then(Value::as_str).unwrap_or("?"),
        server
            .get_value("port")
            .and_then(Value::as_integer)
            .unwrap_or(0)
    );

    let backends = doc
        .root()
        .get_value("backends")
        .and_then(Value::as_array_of_tables)
        .expect("backends");
    for node in backends {
        let table = node.as_table().expect("backend table");
        println!(
            "backend {} (weight {})",
            table.get_value("name").and_then(Value::as_str).unwrap_or("?"),
            table
                .get_value("weight")
                .and_then(Value::as_integer)
                .unwrap_or(0)
        );
    }
}
