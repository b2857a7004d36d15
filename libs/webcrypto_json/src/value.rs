// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::collections::BTreeMap;

use crate::escape::escape_json_string;

/// Object members are kept sorted by key, so serialization is deterministic.
pub type JsonObject = BTreeMap<String, JsonValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(JsonObject),
}

impl JsonValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(value) => Some(value.as_slice()),
            _ => None,
        }
    }

    pub fn to_json_string(&self) -> String {
        let mut result = String::with_capacity(64);
        self.write(&mut result);
        result
    }

    pub fn write(&self, result: &mut String) {
        match self {
            JsonValue::Null => result.push_str("null"),
            JsonValue::Bool(true) => result.push_str("true"),
            JsonValue::Bool(false) => result.push_str("false"),
            JsonValue::Number(value) => write_number(result, *value),
            JsonValue::String(value) => write_string(result, value),
            JsonValue::Array(values) => {
                result.push('[');
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        result.push(',');
                    }
                    value.write(result);
                }
                result.push(']');
            },
            JsonValue::Object(members) => write_object(result, members),
        }
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Bool(value)
    }
}

pub fn write_object(result: &mut String, members: &JsonObject) {
    result.push('{');
    for (i, (key, value)) in members.iter().enumerate() {
        if i > 0 {
            result.push(',');
        }
        write_string(result, key);
        result.push(':');
        value.write(result);
    }
    result.push('}');
}

#[inline]
fn write_string(result: &mut String, value: &str) {
    result.push('"');
    escape_json_string(result, value);
    result.push('"');
}

fn write_number(result: &mut String, value: f64) {
    if !value.is_finite() {
        result.push_str("null");
    } else if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        let mut itoa = itoa::Buffer::new();
        result.push_str(itoa.format(value as i64));
    } else {
        let mut ryu = ryu::Buffer::new();
        result.push_str(ryu.format_finite(value));
    }
}
