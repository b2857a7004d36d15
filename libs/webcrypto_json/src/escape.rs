// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

// Index into JSON_ESCAPE_QUOTES, or NO_ESCAPE for bytes copied as-is.
const NO_ESCAPE: u8 = u8::MAX;

static JSON_ESCAPE_CHARS: [u8; 256] = {
    let mut table = [NO_ESCAPE; 256];
    let mut i = 0;
    while i < 32 {
        table[i] = i as u8;
        i += 1;
    }
    table[b'"' as usize] = 32;
    table[b'\\' as usize] = 33;
    table
};

static JSON_ESCAPE_QUOTES: [&str; 34usize] = [
    "\\u0000", "\\u0001", "\\u0002", "\\u0003", "\\u0004", "\\u0005", "\\u0006", "\\u0007", "\\b",
    "\\t", "\\n", "\\u000b", "\\f", "\\r", "\\u000e", "\\u000f", "\\u0010", "\\u0011", "\\u0012",
    "\\u0013", "\\u0014", "\\u0015", "\\u0016", "\\u0017", "\\u0018", "\\u0019", "\\u001a",
    "\\u001b", "\\u001c", "\\u001d", "\\u001e", "\\u001f", "\\\"", "\\\\",
];

pub fn escape_json(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    escape_json_string(&mut result, value);
    result
}

/// Appends `value` to `result` with JSON string escaping applied (without surrounding quotes).
pub fn escape_json_string(result: &mut String, value: &str) {
    let bytes = value.as_bytes();
    let mut start = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        let c = JSON_ESCAPE_CHARS[byte as usize];
        if c == NO_ESCAPE {
            continue;
        }
        // Escapable bytes are all ASCII so `i` is always a char boundary.
        if start < i {
            result.push_str(&value[start..i]);
        }
        result.push_str(JSON_ESCAPE_QUOTES[c as usize]);
        start = i + 1;
    }

    if start < bytes.len() {
        result.push_str(&value[start..]);
    }
}
