use serde::{Deserialize, Serialize};
use serde_scl::{from_str, from_value, loads, to_string, to_value, Error, Value};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
    note: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Backoff {
    None,
    Fixed(u64),
    Exponential { base_ms: u64, factor: f64 },
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Retry {
    attempts: u8,
    backoff: Backoff,
}

fn order() -> Order {
    Order {
        order_id: 7,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "developer".to_string()],
        },
        items: vec![
            Product {
                sku: "A-1".to_string(),
                price: 9.5,
                quantity: 2,
            },
            Product {
                sku: "B-2".to_string(),
                price: 20.0,
                quantity: 1,
            },
        ],
        total: 39.0,
        note: None,
    }
}

#[test]
fn test_nested_struct_roundtrip() {
    let text = to_string(&order()).unwrap();
    println!("Order SCL:\n{}", text);
    assert!(text.contains("customer :: class {"));
    assert!(text.contains("items :: list(class) {"));
    assert!(!text.contains("note"));

    let back: Order = from_str(&text).unwrap();
    assert_eq!(back, order());
}

#[test]
fn test_enum_roundtrip() {
    for backoff in [
        Backoff::None,
        Backoff::Fixed(250),
        Backoff::Exponential {
            base_ms: 100,
            factor: 2.0,
        },
    ] {
        let retry = Retry {
            attempts: 3,
            backoff,
        };
        let text = to_string(&retry).unwrap();
        let back: Retry = from_str(&text).unwrap();
        assert_eq!(back, retry);
    }
}

#[test]
fn test_unit_variant_is_a_string() {
    let retry = Retry {
        attempts: 1,
        backoff: Backoff::None,
    };
    assert_eq!(
        to_string(&retry).unwrap(),
        "attempts :: num { 1 }\nbackoff :: str { \"None\" }\n"
    );
}

#[test]
fn test_struct_from_handwritten_scl() {
    let text = r#"
[ plain strings and synonyms work for typed structs too ]
id :: num { 5 }
name :: str { Bob }
active :: bool { no }
tags :: list[str] { }
"#;
    let user: User = from_str(text).unwrap();
    assert_eq!(
        user,
        User {
            id: 5,
            name: "Bob".to_string(),
            active: false,
            tags: vec![],
        }
    );
}

#[test]
fn test_missing_field_is_custom_error() {
    let err = from_str::<User>("id :: num { 5 }").unwrap_err();
    assert!(matches!(err, Error::Custom(_)));
    assert!(err.to_string().contains("missing field"));
}

#[test]
fn test_value_matches_json_shape() {
    let value = to_value(&order()).unwrap();
    let via_scl = serde_json::to_value(&value).unwrap();
    let direct = serde_json::to_value(order()).unwrap();

    // `note: None` is absent in SCL but null in JSON
    let mut direct = direct;
    if let Some(obj) = direct.as_object_mut() {
        obj.remove("note");
    }
    assert_eq!(via_scl, direct);
}

#[test]
fn test_value_from_json() {
    let json = r#"{"name": "svc", "ports": [80, 443], "tls": {"on": true, "ratio": 0.5}}"#;
    let value: Value = serde_json::from_str(json).unwrap();
    let obj = value.as_object().unwrap();

    let keys: Vec<_> = obj.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["name", "ports", "tls"]);

    let map = match value.clone() {
        Value::Object(map) => map,
        _ => unreachable!(),
    };
    let text = serde_scl::dumps(&map).unwrap();
    assert_eq!(loads(&text).unwrap(), map);
}

#[test]
fn test_json_null_is_rejected() {
    let err = serde_json::from_str::<Value>(r#"{"a": null}"#).unwrap_err();
    assert!(err.to_string().contains("null"));
}

#[test]
fn test_maps_with_string_keys() {
    let mut limits = BTreeMap::new();
    limits.insert("cpu".to_string(), 2);
    limits.insert("mem".to_string(), 512);

    let text = to_string(&limits).unwrap();
    assert_eq!(text, "cpu :: num { 2 }\nmem :: num { 512 }\n");
    let back: BTreeMap<String, i32> = from_str(&text).unwrap();
    assert_eq!(back, limits);
}

#[test]
fn test_from_value_widens_integers() {
    let ratio: f64 = from_value(Value::Integer(2)).unwrap();
    assert_eq!(ratio, 2.0);
}

#[test]
fn test_unrepresentable_values() {
    assert!(matches!(to_string(&42), Err(Error::Structural(_))));
    assert!(to_value(&u64::MAX).is_err());

    #[derive(Serialize)]
    struct Holes {
        values: Vec<Option<i32>>,
    }
    assert!(to_string(&Holes {
        values: vec![Some(1), None]
    })
    .is_err());
}
