//! Conversion of untyped JSON parameter maps into [`ParameterBundle`]s.
//!
//! The bridge hands event parameters over as JSON objects. The native SDK only understands
//! strings, 32/64-bit integers, doubles and lists of nested bundles, so every value is inspected
//! once here. Values of any other kind are skipped with a warning; they never fail the call.

use serde_json::{Map, Number, Value};

use crate::analytics::constants::DEFAULT_MAX_PARAMETER_DEPTH;
use crate::analytics::params::{ParameterBundle, ParameterValue};

/// Untyped parameter map as decoded from the bridge.
pub type ParameterMap = Map<String, Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParameterMarshaler {
    max_depth: usize,
}

impl Default for ParameterMarshaler {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_PARAMETER_DEPTH,
        }
    }
}

impl ParameterMarshaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits how many levels of nested bundle lists are accepted. A value of `1` only admits
    /// scalars at the top level.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn marshal(&self, input: &ParameterMap) -> ParameterBundle {
        self.marshal_at(input, 1)
    }

    fn marshal_at(&self, input: &ParameterMap, depth: usize) -> ParameterBundle {
        let mut bundle = ParameterBundle::new();
        for (key, value) in input {
            match self.convert(value, depth) {
                Some(converted) => bundle.insert(key.as_str(), converted),
                None => log::warn!("Value for key {key} is not supported"),
            }
        }
        bundle
    }

    fn convert(&self, value: &Value, depth: usize) -> Option<ParameterValue> {
        match value {
            Value::String(text) => Some(ParameterValue::String(text.clone())),
            Value::Number(number) => Some(convert_number(number)),
            Value::Array(items) => {
                if depth >= self.max_depth {
                    log::debug!("nested parameter list exceeds depth {}", self.max_depth);
                    return None;
                }
                items
                    .iter()
                    .map(|item| {
                        item.as_object()
                            .map(|object| self.marshal_at(object, depth + 1))
                    })
                    .collect::<Option<Vec<_>>>()
                    .map(ParameterValue::Bundles)
            }
            Value::Null | Value::Bool(_) | Value::Object(_) => None,
        }
    }
}

fn convert_number(number: &Number) -> ParameterValue {
    if let Some(value) = number.as_i64() {
        return match i32::try_from(value) {
            Ok(small) => ParameterValue::Int(small),
            Err(_) => ParameterValue::Long(value),
        };
    }
    // Floats, and unsigned literals too large for a long, are read as doubles.
    ParameterValue::Double(number.as_f64().unwrap_or(f64::NAN))
}

/// Marshals `input` with the default depth limit.
pub fn marshal(input: &ParameterMap) -> ParameterBundle {
    ParameterMarshaler::default().marshal(input)
}
