// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::fmt;

use simd_json::{Node, StaticNode};

use crate::value::{JsonObject, JsonValue};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Syntax {
        index: usize,
        character: Option<char>,
    },
    NotObject,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax { index, character } => {
                let mut itoa = itoa::Buffer::new();
                f.write_str("not valid JSON at index ")?;
                f.write_str(itoa.format(*index))?;
                if let Some(char) = character {
                    write!(f, " ('{}')", char)?;
                }
                Ok(())
            },
            ParseError::NotObject => f.write_str("JSON value is not an object"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses `json` and requires the top level value to be an object.
///
/// The input is copied since the parser works in place.
pub fn parse_object(json: &[u8]) -> Result<JsonObject, ParseError> {
    match parse(json)? {
        JsonValue::Object(object) => Ok(object),
        _ => Err(ParseError::NotObject),
    }
}

pub fn parse(json: &[u8]) -> Result<JsonValue, ParseError> {
    let mut json = json.to_vec();
    let tape = simd_json::to_tape(&mut json).map_err(|err| ParseError::Syntax {
        index: err.index(),
        character: err.character(),
    })?;
    let tape = tape.0;

    if tape.is_empty() {
        return Err(ParseError::Syntax {
            index: 0,
            character: None,
        });
    }

    Ok(parse_node(&tape, 0).0)
}

#[inline(always)]
fn static_node_to_value(node: StaticNode) -> JsonValue {
    match node {
        StaticNode::I64(value) => JsonValue::Number(value as f64),
        StaticNode::U64(value) => JsonValue::Number(value as f64),
        StaticNode::F64(value) => JsonValue::Number(value),
        StaticNode::Bool(value) => JsonValue::Bool(value),
        StaticNode::Null => JsonValue::Null,
    }
}

fn parse_node(tape: &[Node], index: usize) -> (JsonValue, usize) {
    match tape[index] {
        Node::String(value) => (JsonValue::String(value.to_string()), index + 1),
        Node::Static(node) => (static_node_to_value(node), index + 1),
        Node::Object { len, .. } => {
            let mut object = JsonObject::new();
            let mut current_index = index + 1;

            for _ in 0..len {
                if let Node::String(key) = tape[current_index] {
                    current_index += 1;
                    let (value, new_index) = parse_node(tape, current_index);
                    current_index = new_index;
                    // Later duplicates replace earlier ones.
                    object.insert(key.to_string(), value);
                }
            }

            (JsonValue::Object(object), current_index)
        },
        Node::Array { len, .. } => {
            let mut array = Vec::with_capacity(len);
            let mut current_index = index + 1;

            for _ in 0..len {
                let (value, new_index) = parse_node(tape, current_index);
                current_index = new_index;
                array.push(value);
            }

            (JsonValue::Array(array), current_index)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nested_object() {
        let object =
            parse_object(br#"{"kty":"oct","ext":true,"key_ops":["sign","verify"],"n":{"a":1}}"#)
                .unwrap();
        assert_eq!(object.get("kty"), Some(&JsonValue::String("oct".into())));
        assert_eq!(object.get("ext"), Some(&JsonValue::Bool(true)));
        assert_eq!(
            object.get("key_ops"),
            Some(&JsonValue::Array(vec![
                JsonValue::String("sign".into()),
                JsonValue::String("verify".into())
            ]))
        );
        assert!(matches!(object.get("n"), Some(JsonValue::Object(_))));
    }

    #[test]
    fn parse_duplicate_member_keeps_last() {
        let object = parse_object(br#"{"alg":"A128CBC","alg":"A256CBC"}"#).unwrap();
        assert_eq!(object.get("alg"), Some(&JsonValue::String("A256CBC".into())));
    }

    #[test]
    fn parse_rejects_non_object() {
        assert_eq!(parse_object(b"[1,2]"), Err(ParseError::NotObject));
        assert_eq!(parse_object(b"\"str\""), Err(ParseError::NotObject));
    }

    #[test]
    fn parse_rejects_invalid_json() {
        assert!(matches!(
            parse_object(b"{\"kty\": "),
            Err(ParseError::Syntax { .. })
        ));
        assert!(matches!(parse_object(b""), Err(ParseError::Syntax { .. })));
        assert!(matches!(
            parse_object(b"\xff\xfe"),
            Err(ParseError::Syntax { .. })
        ));
    }
}
