// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use webcrypto_encoding::bytes_to_b64_url_string;
use webcrypto_json::{JsonObject, JsonValue};

use crate::usage::Usages;

/// Builds a JWK. Members come out in sorted order.
pub struct JwkWriter {
    dict: JsonObject,
}

impl JwkWriter {
    /// `alg` may be empty, in which case no `alg` member is written.
    pub fn new(alg: &str, extractable: bool, usages: Usages, kty: &str) -> Self {
        let mut dict = JsonObject::new();
        dict.insert("kty".into(), kty.into());
        if !alg.is_empty() {
            dict.insert("alg".into(), alg.into());
        }
        dict.insert("ext".into(), extractable.into());
        dict.insert(
            "key_ops".into(),
            JsonValue::Array(usages.iter().map(|usage| usage.as_str().into()).collect()),
        );
        Self { dict }
    }

    pub fn set_string(&mut self, member: &str, value: &str) {
        self.dict.insert(member.into(), value.into());
    }

    /// Writes `value` base64url encoded.
    pub fn set_bytes(&mut self, member: &str, value: &[u8]) {
        self.dict
            .insert(member.into(), bytes_to_b64_url_string(value).into());
    }

    pub fn to_json(&self) -> Vec<u8> {
        let mut result = String::with_capacity(128);
        webcrypto_json::value::write_object(&mut result, &self.dict);
        result.into_bytes()
    }
}
