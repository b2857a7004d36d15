// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use tracing::{debug, trace};

use crate::{
    algorithm::{Algorithm, KeyFormat},
    algorithms::get_implementation,
    error::{Error, Result},
    key::Key,
    usage::{KeyUsage, Usages},
};

use super::{check_key_algorithm, check_key_usage};

/// Derives `length_bits` bits from `base_key`. Whether a missing length is allowed depends on
/// the algorithm.
pub fn derive_bits(
    algorithm: &Algorithm,
    base_key: &Key,
    length_bits: Option<u32>,
) -> Result<Vec<u8>> {
    check_key_usage(base_key, KeyUsage::DeriveBits)?;
    check_key_algorithm(base_key, algorithm.id)?;
    trace!("derive {:?} bits with {}", length_bits, algorithm.id);
    get_implementation(algorithm.id)?.derive_bits(algorithm, base_key, length_bits)
}

/// Derives the bytes of a new secret key and imports them as `raw` for `import_algorithm`.
///
/// The number of bits derived is the key length of `key_length_algorithm`, which must name the
/// same algorithm as `import_algorithm`.
pub fn derive_key(
    algorithm: &Algorithm,
    base_key: &Key,
    import_algorithm: &Algorithm,
    key_length_algorithm: &Algorithm,
    extractable: bool,
    usages: Usages,
) -> Result<Key> {
    check_key_usage(base_key, KeyUsage::DeriveKey)?;
    check_key_algorithm(base_key, algorithm.id)?;
    if import_algorithm.id != key_length_algorithm.id {
        debug!(
            "Deriving a {} key with the length of {}",
            import_algorithm.id, key_length_algorithm.id
        );
        return Err(Error::Unexpected);
    }

    let import_implementation = get_implementation(import_algorithm.id)?;
    import_implementation.verify_key_usages_before_import_key(KeyFormat::Raw, usages)?;

    let length_bits = import_implementation.get_key_length(key_length_algorithm)?;

    trace!(
        "derive {} key of {:?} bits with {}",
        import_algorithm.id,
        length_bits,
        algorithm.id
    );
    let derived = get_implementation(algorithm.id)?.derive_bits(algorithm, base_key, length_bits)?;

    import_implementation.import_key(
        KeyFormat::Raw,
        &derived,
        import_algorithm,
        extractable,
        usages,
    )
}
