// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use tracing::trace;

use crate::{
    algorithm::{Algorithm, AlgorithmId, KeyFormat},
    algorithms::get_implementation,
    error::Result,
    key::Key,
    usage::{KeyUsage, Usages},
};

use super::{
    check_key_algorithm, check_key_usage, decrypt::decrypt_dont_check_usage,
    encrypt::encrypt_dont_check_usage, export_key, import_key,
};

const AES_KW_BLOCK_LEN: usize = 8;

/// Exports `key` in `format` and encrypts the result with `wrapping_key`.
pub fn wrap_key(
    format: KeyFormat,
    key: &Key,
    wrapping_key: &Key,
    wrapping_algorithm: &Algorithm,
) -> Result<Vec<u8>> {
    check_key_usage(wrapping_key, KeyUsage::WrapKey)?;
    check_key_algorithm(wrapping_key, wrapping_algorithm.id)?;

    let mut exported = export_key(format, key)?;

    // AES-KW only takes whole blocks. Trailing whitespace is still valid JSON.
    if format == KeyFormat::Jwk && wrapping_algorithm.id == AlgorithmId::AesKw {
        let padded_len = exported.len().next_multiple_of(AES_KW_BLOCK_LEN);
        exported.resize(padded_len, b' ');
    }

    trace!(
        "wrap {} key as {} with {}",
        key.algorithm().id(),
        format,
        wrapping_algorithm.id
    );
    encrypt_dont_check_usage(wrapping_algorithm, wrapping_key, &exported)
}

/// Decrypts `wrapped_key` and imports the result. The usages are checked against the target
/// algorithm before anything is decrypted.
pub fn unwrap_key(
    format: KeyFormat,
    wrapped_key: &[u8],
    unwrapping_key: &Key,
    unwrapping_algorithm: &Algorithm,
    algorithm: &Algorithm,
    extractable: bool,
    usages: Usages,
) -> Result<Key> {
    check_key_usage(unwrapping_key, KeyUsage::UnwrapKey)?;
    check_key_algorithm(unwrapping_key, unwrapping_algorithm.id)?;

    get_implementation(algorithm.id)?.verify_key_usages_before_import_key(format, usages)?;

    trace!(
        "unwrap {} key from {} with {}",
        algorithm.id,
        format,
        unwrapping_algorithm.id
    );
    let key_data = decrypt_dont_check_usage(unwrapping_algorithm, unwrapping_key, wrapped_key)?;
    import_key(format, &key_data, algorithm, extractable, usages)
}
