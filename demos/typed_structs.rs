//! Serde structs and enums as SCL.
//!
//! Run with: cargo run --example typed_structs

use serde::{Deserialize, Serialize};
use serde_scl::{from_str, to_string, to_string_with_options, SclOptions};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
enum Backoff {
    None,
    Fixed(u64),
    Exponential { base_ms: u64, factor: f64 },
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Upstream {
    host: String,
    weight: f64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Proxy {
    listen: u16,
    tls: bool,
    banner: Option<String>,
    upstreams: Vec<Upstream>,
    backoff: Backoff,
}

fn main() -> Result<(), Box<dyn Error>> {
    let proxy = Proxy {
        listen: 443,
        tls: true,
        banner: None,
        upstreams: vec![
            Upstream {
                host: "10.0.0.1".to_string(),
                weight: 1.0,
            },
            Upstream {
                host: "10.0.0.2".to_string(),
                weight: 0.5,
            },
        ],
        backoff: Backoff::Exponential {
            base_ms: 100,
            factor: 2.0,
        },
    };

    let text = to_string(&proxy)?;
    println!("Default options:\n{}", text);

    let compact = to_string_with_options(&proxy, SclOptions::compact())?;
    println!("Compact options:\n{}", compact);

    let back: Proxy = from_str(&text)?;
    assert_eq!(back, proxy);
    println!("✓ Round-trip successful");

    let handwritten = r#"
listen :: num { 8080 }
tls :: bool { no }
banner :: ml { 'Welcome
to the proxy' }
upstreams :: list(class) { }
backoff :: str { None }
"#;
    let parsed: Proxy = from_str(handwritten)?;
    println!("\nHandwritten config: {:?}", parsed);

    Ok(())
}
