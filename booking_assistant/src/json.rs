use serde_json::Value;

// Reads a string attribute, treating an empty string the same as a missing
// one.
pub fn attribute_from_value(value: &Value, attribute: &str) -> Option<String> {
    let element = value[attribute].as_str()?;
    if element.is_empty() {
        return None;
    }
    Some(String::from(element))
}

// Reads an identifier that may have been sent as either a string or a
// number.
pub fn id_from_value(value: &Value, attribute: &str) -> Option<String> {
    match &value[attribute] {
        Value::Number(n) => Some(n.to_string()),
        Value::String(_) => attribute_from_value(value, attribute),
        _ => None,
    }
}
