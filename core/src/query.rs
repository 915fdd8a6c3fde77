//! Query-string normalization.
//!
//! Query values end up in a URL, where booleans have no native spelling.
//! Every value is turned into a string before it reaches a transport so the
//! API always sees `true`/`false` rather than `1`/`0`.

use serde_json::{Map, Value};
use url::form_urlencoded;

/// Normalized query parameters, in caller order.
pub type Query = Vec<(String, String)>;

/// Convert a JSON query object into string pairs.
///
/// `null` entries are dropped. Arrays and objects are flattened into
/// bracketed keys (`ids[0]`, `opt[w]`), nesting as deep as the value does.
pub fn normalize_query_values(query: &Map<String, Value>) -> Query {
    let mut pairs = Query::new();
    for (key, value) in query {
        flatten(key.clone(), value, &mut pairs);
    }
    pairs
}

fn flatten(key: String, value: &Value, pairs: &mut Query) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => pairs.push((key, flag.to_string())),
        Value::Number(number) => pairs.push((key, number.to_string())),
        Value::String(text) => pairs.push((key, text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(format!("{key}[{index}]"), item, pairs);
            }
        }
        Value::Object(fields) => {
            for (name, item) in fields {
                flatten(format!("{key}[{name}]"), item, pairs);
            }
        }
    }
}

/// Encode normalized pairs as `application/x-www-form-urlencoded`.
pub fn build_query_string(query: &Query) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query.iter())
        .finish()
}
