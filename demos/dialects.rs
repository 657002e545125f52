//! The observable differences between TOML v0.3 and v0.4.
//!
//! Run with: `cargo run --example dialects`

use toml_doc::{Dialect, Document};

fn show(label: &str, text: &str, dialect: Dialect) {
    match Document::parse(text, dialect) {
        Ok(_) => println!("{label} under {dialect}: ok"),
        Err(e) => println!("{label} under {dialect}: {e}"),
    }
}

fn main() {
    let grouped = "n = 1_000_000";
    show("digit grouping", grouped, Dialect::V04);
    show("digit grouping", grouped, Dialect::V03);

    let inline = "point = { x = 1, y = 2 }";
    show("inline table", inline, Dialect::V04);
    show("inline table", inline, Dialect::V03);

    let solidus = r#"path = "a\/b""#;
    show("escaped solidus", solidus, Dialect::V03);
    show("escaped solidus", solidus, Dialect::V04);

    // the same document writes differently per dialect
    let doc = Document::parse("\"odd key\" = 1", Dialect::V04).expect("valid v0.4");
    println!("v0.4 write: {:?}", doc.to_string(Dialect::V04));
    println!("v0.3 write: {:?}", doc.to_string(Dialect::V03));
}
