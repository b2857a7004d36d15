// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use tracing::debug;
use webcrypto_encoding::bytes_from_b64_url;
use webcrypto_json::{parse_object, JsonObject, JsonValue};

use crate::{
    error::{Error, Result},
    usage::{KeyUsage, Usages},
};

use super::{is_recognized_algorithm, is_recognized_kty};

/// A parsed JWK whose metadata has been checked against what the caller asked for.
pub struct JwkReader {
    dict: JsonObject,
}

impl JwkReader {
    /// Parses `key_data` and checks `kty`, `alg`, `ext`, `key_ops` and `use` against the caller's
    /// request. `expected_alg` of `None` skips the `alg` comparison for callers that only know the
    /// name once the key material has been read.
    pub fn new(
        key_data: &[u8],
        expected_extractable: bool,
        expected_usages: Usages,
        expected_kty: &'static str,
        expected_alg: Option<&str>,
    ) -> Result<Self> {
        if key_data.is_empty() {
            return Err(Error::ImportEmptyKeyData);
        }

        let dict = parse_object(key_data).map_err(|err| {
            debug!("JWK rejected: {}", err);
            Error::JwkNotDictionary
        })?;
        let reader = Self { dict };

        let kty = reader.get_string("kty")?;
        if kty != expected_kty {
            if !is_recognized_kty(kty) {
                return Err(Error::JwkUnrecognizedKty);
            }
            return Err(Error::JwkUnexpectedKty(expected_kty));
        }

        if let Some(expected_alg) = expected_alg {
            reader.verify_alg(expected_alg)?;
        } else if let Some(alg) = reader.alg()? {
            if !is_recognized_algorithm(alg) {
                return Err(Error::JwkUnrecognizedAlgorithm);
            }
        }

        if let Some(ext) = reader.get_optional_bool("ext")? {
            if !ext && expected_extractable {
                return Err(Error::JwkExtInconsistent);
            }
        }

        let key_ops = reader.key_ops_usages()?;
        if let Some(key_ops) = key_ops {
            if !expected_usages.is_subset_of(key_ops) {
                return Err(Error::JwkKeyopsInconsistent);
            }
        }

        if let Some(jwk_use) = reader.get_optional_string("use")? {
            let use_usages = Usages::for_jwk_use(jwk_use).ok_or(Error::JwkUnrecognizedUse)?;
            if !expected_usages.is_subset_of(use_usages) {
                return Err(Error::JwkUseInconsistent);
            }
            if let Some(key_ops) = key_ops {
                if !use_usages.is_subset_of(key_ops) {
                    return Err(Error::JwkUseAndKeyopsInconsistent);
                }
            }
        }

        Ok(reader)
    }

    /// Fails unless `alg` is absent or equal to `expected_alg`.
    pub fn verify_alg(&self, expected_alg: &str) -> Result<()> {
        match self.alg()? {
            Some(alg) if alg != expected_alg => {
                if is_recognized_algorithm(alg) {
                    Err(Error::JwkAlgorithmInconsistent)
                } else {
                    Err(Error::JwkUnrecognizedAlgorithm)
                }
            },
            _ => Ok(()),
        }
    }

    pub fn alg(&self) -> Result<Option<&str>> {
        self.get_optional_string("alg")
    }

    pub fn has_member(&self, member: &str) -> bool {
        self.dict.contains_key(member)
    }

    pub fn get_string(&self, member: &str) -> Result<&str> {
        self.get_optional_string(member)?
            .ok_or_else(|| Error::JwkMemberMissing(member.into()))
    }

    pub fn get_optional_string(&self, member: &str) -> Result<Option<&str>> {
        match self.dict.get(member) {
            None => Ok(None),
            Some(JsonValue::String(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(wrong_type(member, "string")),
        }
    }

    pub fn get_optional_bool(&self, member: &str) -> Result<Option<bool>> {
        match self.dict.get(member) {
            None => Ok(None),
            Some(JsonValue::Bool(value)) => Ok(Some(*value)),
            Some(_) => Err(wrong_type(member, "boolean")),
        }
    }

    /// Reads a base64url encoded member.
    pub fn get_bytes(&self, member: &str) -> Result<Vec<u8>> {
        let value = self.get_string(member)?;
        bytes_from_b64_url(value.as_bytes()).map_err(|_| Error::JwkBase64Decode(member.into()))
    }

    /// Reads a base64url encoded unsigned big-endian integer, which must be non-empty and minimal.
    pub fn get_big_integer(&self, member: &str) -> Result<Vec<u8>> {
        let bytes = self.get_bytes(member)?;
        if bytes.is_empty() {
            return Err(Error::JwkEmptyBigInteger(member.into()));
        }
        if bytes.len() > 1 && bytes[0] == 0 {
            return Err(Error::JwkBigIntegerHasLeadingZero(member.into()));
        }
        Ok(bytes)
    }

    /// Usages listed by `key_ops`. Names that are not WebCrypto usages are skipped.
    fn key_ops_usages(&self) -> Result<Option<Usages>> {
        let values = match self.dict.get("key_ops") {
            None => return Ok(None),
            Some(JsonValue::Array(values)) => values,
            Some(_) => return Err(wrong_type("key_ops", "list")),
        };

        let mut usages = Usages::EMPTY;
        for (i, value) in values.iter().enumerate() {
            let name = value.as_str().ok_or_else(|| {
                let mut itoa = itoa::Buffer::new();
                wrong_type(&["key_ops[", itoa.format(i), "]"].concat(), "string")
            })?;
            if let Ok(usage) = KeyUsage::try_from(name) {
                usages = usages.with(usage);
            }
        }
        Ok(Some(usages))
    }
}

fn wrong_type(member: &str, expected: &'static str) -> Error {
    Error::JwkMemberWrongType {
        member: member.into(),
        expected,
    }
}
