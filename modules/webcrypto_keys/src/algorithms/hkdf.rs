// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use crate::{
    algorithm::{Algorithm, AlgorithmId, AlgorithmParams, KeyFormat},
    error::{Error, Result},
    key::{Key, KeyAlgorithm, KeyType},
    provider::CryptoProvider,
    usage::{KeyUsageAlgorithm, Usages},
    CRYPTO_PROVIDER,
};

use super::{check_secret_key_creation_usages, require_key_type, AlgorithmImplementation};

const ALL_USAGES: Usages = KeyUsageAlgorithm::Derive.public_usages();

/// HKDF base keys. They can only be imported as raw bytes and never leave the crate again.
pub struct HkdfImplementation;

impl AlgorithmImplementation for HkdfImplementation {
    fn derive_bits(
        &self,
        algorithm: &Algorithm,
        base_key: &Key,
        length_bits: Option<u32>,
    ) -> Result<Vec<u8>> {
        require_key_type(base_key, KeyType::Secret)?;
        let (hash, salt, info) = match &algorithm.params {
            AlgorithmParams::Hkdf { hash, salt, info } => (*hash, salt, info),
            _ => return Err(Error::Unexpected),
        };

        let length_bits = length_bits.ok_or(Error::HkdfDeriveBitsLengthNotSpecified)?;
        if length_bits % 8 != 0 {
            return Err(Error::DeriveLengthNotWholeByte);
        }
        let length = (length_bits / 8) as usize;
        if length == 0 {
            return Ok(Vec::new());
        }
        if length > 255 * hash.digest_len() {
            return Err(Error::HkdfLengthTooLong);
        }

        CRYPTO_PROVIDER
            .hkdf_derive_key(base_key.handle(), salt, info, length, hash)
            .map_err(|_| Error::Operation)
    }

    /// HKDF can produce any length, so a key derived for it needs an explicit one.
    fn get_key_length(&self, _algorithm: &Algorithm) -> Result<Option<u32>> {
        Ok(None)
    }

    fn verify_key_usages_before_import_key(&self, format: KeyFormat, usages: Usages) -> Result<()> {
        match format {
            KeyFormat::Raw => check_secret_key_creation_usages(ALL_USAGES, usages),
            _ => Err(Error::UnsupportedImportKeyFormat),
        }
    }

    fn import_key_raw(
        &self,
        key_data: &[u8],
        _algorithm: &Algorithm,
        extractable: bool,
        usages: Usages,
    ) -> Result<Key> {
        check_secret_key_creation_usages(ALL_USAGES, usages)?;
        if extractable {
            return Err(Error::ImportExtractableKdfKey);
        }

        Ok(Key::new(
            KeyType::Secret,
            false,
            KeyAlgorithm::NoParams {
                id: AlgorithmId::Hkdf,
            },
            usages,
            key_data,
        ))
    }
}
