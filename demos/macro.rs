//! Using the scl! macro to build values.
//!
//! Run with: cargo run --example macro

use serde_scl::{dumps, scl, SclMap, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("Scalars:");
    for value in [scl!(true), scl!(42), scl!(2.5), scl!("Hello, SCL!")] {
        println!("  {:<14} -> {}", value.to_string(), value.type_tag());
    }

    let grid = scl!([[1, 2], [3, 4], []]);
    println!("\nNested list: {} -> {}", grid, grid.type_tag());

    let config = scl!({
        "app": {
            "name": "MyApp",
            "version": "1.0.0"
        },
        "database": {
            "host": "localhost",
            "port": 5432
        },
        "features": ["auth", "logging", "metrics"],
        "grid": [[1, 2], [3, 4], []],
        "debug": true
    });

    let items: Vec<Value> = (1..=3)
        .map(|id| scl!({ "id": id, "status": "active" }))
        .collect();

    let mut map: SclMap = match config {
        Value::Object(map) => map,
        _ => SclMap::new(),
    };
    map.insert("items".to_string(), Value::List(items));

    println!("\nSCL output:\n{}", dumps(&map)?);

    if let Some(name) = map
        .get("app")
        .and_then(Value::as_object)
        .and_then(|app| app.get("name"))
        .and_then(Value::as_str)
    {
        println!("App name: {}", name);
    }

    Ok(())
}
