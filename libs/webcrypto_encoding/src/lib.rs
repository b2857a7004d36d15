// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::borrow::Cow;

use base64_simd::{STANDARD, URL_SAFE_NO_PAD};
use hex_simd::AsciiCase;

pub fn bytes_to_hex(bytes: &[u8]) -> Vec<u8> {
    hex_simd::encode_type(bytes, AsciiCase::Lower)
}

pub fn bytes_to_hex_string(bytes: &[u8]) -> String {
    hex_simd::encode_to_string(bytes, AsciiCase::Lower)
}

pub fn bytes_from_hex<'a, T: Into<Cow<'a, [u8]>>>(hex_bytes: T) -> Result<Vec<u8>, String> {
    hex_simd::decode_to_vec(hex_bytes.into()).map_err(|err| err.to_string())
}

/// Encodes with the URL and filename safe alphabet and no trailing `=`, the form used by JWK
/// members.
pub fn bytes_to_b64_url_string(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode_to_string(bytes)
}

/// Decodes a JWK base64url value.
///
/// `-` and `_` are mapped back onto `+` and `/`, the input is padded with `=` up to a multiple
/// of four and the result goes through the standard decoder. Padding already present in the
/// input is tolerated, whitespace is not.
pub fn bytes_from_b64_url<'a, T: Into<Cow<'a, [u8]>>>(base64_bytes: T) -> Result<Vec<u8>, String> {
    let bytes: Cow<'a, [u8]> = base64_bytes.into();

    let url_safe_byte_positions: Vec<usize> = memchr::memchr2_iter(b'-', b'_', &bytes).collect();
    let missing_padding = (4 - bytes.len() % 4) % 4;

    if url_safe_byte_positions.is_empty() && missing_padding == 0 {
        return STANDARD.decode_to_vec(&bytes).map_err(|e| e.to_string());
    }

    let mut bytes = bytes.into_owned();
    for pos in url_safe_byte_positions {
        bytes[pos] = match bytes[pos] {
            b'-' => b'+',
            _ => b'/',
        };
    }
    bytes.resize(bytes.len() + missing_padding, b'=');

    STANDARD.decode_to_vec(&bytes).map_err(|e| e.to_string())
}
