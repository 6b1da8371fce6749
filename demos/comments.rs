//! Keep comments while editing a config file.
//!
//! Run with: cargo run --example comments

use serde_scl::{dumps_document, loads_with_comments, Value};
use std::error::Error;

const CONFIG: &str = "\
[ billing service ]

[ public listener ]
port :: num { 8080 }  [ http only ]
host :: str { \"0.0.0.0\" }

[ connection pool ]
db :: class {
    user :: str { \"svc\" }
    size :: num { 16 }
}  [ tuned for prod ]
";

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = loads_with_comments(CONFIG)?;

    println!("Header: {:?}", doc.header_comment());
    for key in doc.keys() {
        println!(
            "  {:<6} leading={:?} trailing={:?}",
            key,
            doc.leading_comment(key),
            doc.trailing_comment(key)
        );
    }

    doc.insert("port", Value::from(8443));
    doc.set_trailing_comment("port", "https");
    doc.insert_with_comments("workers", Value::from(4), Some("scaled by cpu count"), None);

    let text = dumps_document(&doc)?;
    println!("\nEdited file:\n{}", text);

    assert_eq!(loads_with_comments(&text)?, doc);
    println!("✓ Comments survived the round-trip");

    Ok(())
}
