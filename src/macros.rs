/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Objects keep their keys in the order written. Lists and object values may
/// be nested literals, negative numbers or single token trees; anything else
/// goes through `Value::from`. Wrap longer expressions in parentheses.
///
/// ```rust
/// use serde_scl::{scl, Value};
///
/// let server = scl!({
///     "host": "localhost",
///     "ports": [80, 443],
///     "offsets": [-1, 0, 2.5],
///     "tls": { "enabled": true, "retries": -1 }
/// });
///
/// let obj = server.as_object().unwrap();
/// assert_eq!(obj.get("host"), Some(&Value::from("localhost")));
/// ```
#[macro_export]
macro_rules! scl {
    // Lists: elements accumulate in `[...]` until the input runs out.
    (@list [$($done:expr,)*]) => {
        $crate::Value::List(vec![$($done),*])
    };

    (@list [$($done:expr,)*] - $num:literal $(, $($rest:tt)*)?) => {
        $crate::scl!(@list [$($done,)* $crate::Value::from(-$num),] $($($rest)*)?)
    };

    (@list [$($done:expr,)*] $elem:tt $(, $($rest:tt)*)?) => {
        $crate::scl!(@list [$($done,)* $crate::scl!($elem),] $($($rest)*)?)
    };

    // Objects: one `key: value` pair is inserted per step.
    (@object $object:ident ()) => {};

    (@object $object:ident ($key:literal : - $num:literal $(, $($rest:tt)*)?)) => {
        $object.insert($key.to_string(), $crate::Value::from(-$num));
        $crate::scl!(@object $object ($($($rest)*)?));
    };

    (@object $object:ident ($key:literal : $value:tt $(, $($rest:tt)*)?)) => {
        $object.insert($key.to_string(), $crate::scl!($value));
        $crate::scl!(@object $object ($($($rest)*)?));
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::List(vec![])
    };

    ([ $($tt:tt)+ ]) => {
        $crate::scl!(@list [] $($tt)+)
    };

    ({}) => {
        $crate::Value::Object($crate::SclMap::new())
    };

    ({ $($tt:tt)+ }) => {{
        let mut object = $crate::SclMap::new();
        $crate::scl!(@object object ($($tt)+));
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
