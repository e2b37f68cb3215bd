use serde_json::{Map, Value};

use crate::analytics::error::{invalid_argument, AnalyticsError, AnalyticsResult};

/// Positional arguments of a single bridge invocation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BridgeArgs {
    values: Vec<Value>,
}

impl BridgeArgs {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Decodes the wire form, a JSON array. An empty string stands for no arguments.
    pub fn from_json(input: &str) -> AnalyticsResult<Self> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        match serde_json::from_str::<Value>(input) {
            Ok(Value::Array(values)) => Ok(Self::new(values)),
            Ok(other) => Err(invalid_argument(format!(
                "bridge arguments must be a JSON array, got {}",
                kind_name(&other)
            ))),
            Err(err) => Err(invalid_argument(format!("malformed bridge arguments: {err}"))),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reads the argument as text. Non-string values are read through their JSON text, so `30`
    /// reads as `"30"` and `null` as `"null"`.
    pub fn get_string(&self, index: usize) -> AnalyticsResult<String> {
        match self.require(index)? {
            Value::String(text) => Ok(text.clone()),
            other => Ok(other.to_string()),
        }
    }

    /// Reads a boolean, also accepting the strings `"true"` and `"false"` in any case.
    pub fn get_bool(&self, index: usize) -> AnalyticsResult<bool> {
        match self.require(index)? {
            Value::Bool(flag) => Ok(*flag),
            Value::String(text) if text.eq_ignore_ascii_case("true") => Ok(true),
            Value::String(text) if text.eq_ignore_ascii_case("false") => Ok(false),
            other => Err(mismatch(index, "a boolean", other)),
        }
    }

    pub fn get_object(&self, index: usize) -> AnalyticsResult<&Map<String, Value>> {
        match self.require(index)? {
            Value::Object(object) => Ok(object),
            other => Err(mismatch(index, "an object", other)),
        }
    }

    /// Like [`get_object`](Self::get_object) but an absent or `null` argument reads as `{}`.
    pub fn opt_object(&self, index: usize) -> AnalyticsResult<Map<String, Value>> {
        match self.values.get(index) {
            None | Some(Value::Null) => Ok(Map::new()),
            Some(Value::Object(object)) => Ok(object.clone()),
            Some(other) => Err(mismatch(index, "an object", other)),
        }
    }

    fn require(&self, index: usize) -> AnalyticsResult<&Value> {
        self.values
            .get(index)
            .ok_or_else(|| invalid_argument(format!("missing argument at index {index}")))
    }
}

impl From<Vec<Value>> for BridgeArgs {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

fn mismatch(index: usize, expected: &str, found: &Value) -> AnalyticsError {
    invalid_argument(format!(
        "argument at index {index} must be {expected}, got {}",
        kind_name(found)
    ))
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_positional_values() {
        let args = BridgeArgs::from_json(r#"["my_event", {"param1": "value1"}, true]"#).unwrap();
        assert_eq!(args.len(), 3);
        assert_eq!(args.get_string(0).unwrap(), "my_event");
        assert_eq!(args.get_object(1).unwrap().get("param1"), Some(&json!("value1")));
        assert!(args.get_bool(2).unwrap());
    }

    #[test]
    fn wrong_kind_names_the_index() {
        let args = BridgeArgs::new(vec![json!(12), json!("yes")]);
        let err = args.get_bool(0).unwrap_err();
        assert_eq!(err.message(), "argument at index 0 must be a boolean, got number");
        let err = args.get_bool(1).unwrap_err();
        assert_eq!(err.message(), "argument at index 1 must be a boolean, got string");
    }

    #[test]
    fn strings_are_read_through_json_text() {
        let args = BridgeArgs::new(vec![json!(30), json!(12345), Value::Null, json!(true), json!(1.5)]);
        assert_eq!(args.get_string(0).unwrap(), "30");
        assert_eq!(args.get_string(1).unwrap(), "12345");
        assert_eq!(args.get_string(2).unwrap(), "null");
        assert_eq!(args.get_string(3).unwrap(), "true");
        assert_eq!(args.get_string(4).unwrap(), "1.5");
    }

    #[test]
    fn booleans_accept_textual_forms() {
        let args = BridgeArgs::new(vec![json!("true"), json!("FALSE"), json!("True")]);
        assert!(args.get_bool(0).unwrap());
        assert!(!args.get_bool(1).unwrap());
        assert!(args.get_bool(2).unwrap());
    }

    #[test]
    fn missing_argument_is_reported() {
        let args = BridgeArgs::default();
        let err = args.get_bool(0).unwrap_err();
        assert_eq!(err.message(), "missing argument at index 0");
    }

    #[test]
    fn optional_object_defaults_to_empty() {
        let args = BridgeArgs::new(vec![json!("name"), Value::Null]);
        assert!(args.opt_object(1).unwrap().is_empty());
        assert!(args.opt_object(5).unwrap().is_empty());
        assert!(args.opt_object(0).is_err());
    }

    #[test]
    fn wire_form_must_be_an_array() {
        assert!(BridgeArgs::from_json("").unwrap().is_empty());
        let err = BridgeArgs::from_json(r#"{"a": 1}"#).unwrap_err();
        assert_eq!(err.message(), "bridge arguments must be a JSON array, got object");
        assert!(BridgeArgs::from_json("[").is_err());
    }
}
