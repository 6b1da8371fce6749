//! Parse an SCL config, read some values and write it back.
//!
//! Run with: cargo run --example simple

use serde_scl::{dumps, loads, Value};
use std::error::Error;

const CONFIG: &str = r#"
name :: str { billing }
port :: num { 8080 }
debug :: bool { no }
ratio :: fl { 0.75 }
hosts :: list(str) { "a.internal", "b.internal" }
db :: class {
    user :: str { "svc" }
    pool :: num { 16 }
}
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let mut map = loads(CONFIG)?;

    println!("Parameters:");
    for (key, value) in &map {
        println!("  {} :: {} = {}", key, value.type_tag(), value);
    }

    if let Some(db) = map.get("db").and_then(Value::as_object) {
        let pool = db.get("pool").and_then(Value::as_i64).unwrap_or(0);
        println!("\nDatabase pool size: {}", pool);
    }

    map.insert("debug".to_string(), Value::Bool(true));
    map.insert(
        "motd".to_string(),
        Value::from("Welcome!\nMaintenance on Sundays."),
    );

    let text = dumps(&map)?;
    println!("\nSCL output:\n{}", text);

    assert_eq!(loads(&text)?, map);
    println!("✓ Round-trip successful");

    Ok(())
}
