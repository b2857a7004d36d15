// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
mod reader;
mod writer;

use std::collections::HashSet;

use once_cell::sync::Lazy;

pub use reader::JwkReader;
pub use writer::JwkWriter;

use crate::{error::Result, sha_hash::ShaAlgorithm, usage::Usages};

pub const KTY_OCT: &str = "oct";
pub const KTY_RSA: &str = "RSA";
pub const KTY_EC: &str = "EC";

const AES_SUFFIXES: [&str; 4] = ["CBC", "GCM", "KW", "CTR"];

/// Every `alg` name some family understands. A name outside this set is unrecognized, a name
/// inside it that differs from the expected one is inconsistent.
static RECOGNIZED_ALGORITHMS: Lazy<HashSet<String>> = Lazy::new(|| {
    let mut names = HashSet::new();
    for suffix in AES_SUFFIXES {
        for key_len_bytes in [16, 24, 32] {
            if let Some(name) = aes_alg_name(suffix, key_len_bytes) {
                names.insert(name);
            }
        }
    }
    for hash in [
        ShaAlgorithm::SHA1,
        ShaAlgorithm::SHA256,
        ShaAlgorithm::SHA384,
        ShaAlgorithm::SHA512,
    ] {
        names.insert(["HS", hash.as_numeric_str()].concat());
        names.insert(["RS", hash.as_numeric_str()].concat());
        names.insert(rsa_oaep_alg_name(hash).to_string());
    }
    for name in ["ES256", "ES384", "ES512"] {
        names.insert(name.to_string());
    }
    names
});

pub fn is_recognized_algorithm(alg: &str) -> bool {
    RECOGNIZED_ALGORITHMS.contains(alg)
}

pub fn is_recognized_kty(kty: &str) -> bool {
    matches!(kty, KTY_OCT | KTY_RSA | KTY_EC)
}

/// `A128CBC`, `A256KW` and so on. `None` for key lengths AES does not have.
pub fn aes_alg_name(suffix: &str, key_len_bytes: usize) -> Option<String> {
    let bits = match key_len_bytes {
        16 => "128",
        24 => "192",
        32 => "256",
        _ => return None,
    };
    Some(["A", bits, suffix].concat())
}

pub fn hmac_alg_name(hash: ShaAlgorithm) -> String {
    ["HS", hash.as_numeric_str()].concat()
}

pub fn rsa_ssa_alg_name(hash: ShaAlgorithm) -> String {
    ["RS", hash.as_numeric_str()].concat()
}

pub fn rsa_oaep_alg_name(hash: ShaAlgorithm) -> &'static str {
    match hash {
        ShaAlgorithm::SHA1 => "RSA-OAEP",
        ShaAlgorithm::SHA256 => "RSA-OAEP-256",
        ShaAlgorithm::SHA384 => "RSA-OAEP-384",
        ShaAlgorithm::SHA512 => "RSA-OAEP-512",
    }
}

/// Reads an `oct` JWK and returns the `k` bytes together with the reader, for callers that check
/// `alg` themselves.
pub fn read_secret_key_jwk(
    key_data: &[u8],
    expected_alg: Option<&str>,
    extractable: bool,
    usages: Usages,
) -> Result<(Vec<u8>, JwkReader)> {
    let reader = JwkReader::new(key_data, extractable, usages, KTY_OCT, expected_alg)?;
    let raw = reader.get_bytes("k")?;
    Ok((raw, reader))
}

pub fn write_secret_key_jwk(
    raw_key_data: &[u8],
    alg: &str,
    extractable: bool,
    usages: Usages,
) -> Vec<u8> {
    let mut writer = JwkWriter::new(alg, extractable, usages, KTY_OCT);
    writer.set_bytes("k", raw_key_data);
    writer.to_json()
}
