use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

/// Recursively sort object keys so two deeply-equal values always serialize
/// to the same text. Arrays keep their element order: position is meaningful
/// in JSON arrays, only object key order is not.
fn normalize(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by_key(|(k, _)| *k);
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), normalize(v)))
                    .collect(),
            )
        }
        Value::Array(arr) => Value::Array(arr.iter().map(normalize).collect()),
        _ => v.clone(),
    }
}

/// Canonical display form: keys sorted, 4-space indent.
///
/// Used only for the diff; two values are deeply equal exactly when their
/// canonical texts are identical.
pub fn to_canonical_pretty(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    normalize(value)
        .serialize(&mut ser)
        .expect("serializing a Value into memory");
    String::from_utf8(buf).expect("serde_json emits UTF-8")
}
