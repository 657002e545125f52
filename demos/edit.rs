//! Edit a parsed document in place, keeping its comments.
//!
//! Run with: `cargo run --example edit`

use toml_doc::{Dialect, Document, Value};

fn main() {
    let text = "\
# tuning knobs
workers = 4 # per core
queue = \"default\"
";
    let mut doc = Document::parse(text, Dialect::V04).expect("valid TOML");

    // bump a value; its comments stay put
    doc.root_mut()
        .get_mut("workers")
        .expect("workers key")
        .set_value(Value::from(8));

    // drop one key, add another
    doc.root_mut().remove("queue");
    doc.root_mut().insert("retries", Value::from(3));

    print!("{}", doc.to_string(Dialect::V04).expect("writable"));
}
