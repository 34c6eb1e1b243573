//! Generate JSON Schemas for the control DSL and the session configuration
//!
//! Hosts use the DSL schema to validate control payloads before attaching
//! them to records.
//!
//! Usage:
//!   cargo run --features dev-bins --bin generate_schema -- dsl > dsl-schema.json
//!   cargo run --features dev-bins --bin generate_schema -- config > config-schema.json

use easel::config::SessionConfig;
use easel::settings::ConfigDsl;
use schemars::schema_for;

fn main() {
    let target = std::env::args().nth(1).unwrap_or_else(|| "dsl".to_string());
    let schema = match target.as_str() {
        "dsl" => schema_for!(ConfigDsl),
        "config" => schema_for!(SessionConfig),
        other => {
            eprintln!("Unknown schema '{}', expected 'dsl' or 'config'", other);
            std::process::exit(2);
        }
    };

    let output = serde_json::to_string_pretty(&schema).expect("Failed to serialize schema");
    println!("{}", output);
}
