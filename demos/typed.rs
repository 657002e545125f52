//! Serde round trip: derived structs to TOML text and back.
//!
//! Run with: `cargo run --example typed`

use serde::{Deserialize, Serialize};
use toml_doc::{from_str, to_string, Dialect};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Database {
    server: String,
    ports: Vec<u16>,
    enabled: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Config {
    title: String,
    database: Database,
}

fn main() {
    let config = Config {
        title: "example".to_string(),
        database: Database {
            server: "192.168.1.1".to_string(),
            ports: vec![8001, 8001, 8002],
            enabled: true,
        },
    };

    let toml = to_string(&config, Dialect::V04).expect("serializable");
    println!("serialized:\n{toml}");

    let back: Config = from_str(&toml, Dialect::V04).expect("parseable");
    assert_eq!(config, back);
    println!("round trip ok");
}
