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

pub struct Pbkdf2Implementation;

impl AlgorithmImplementation for Pbkdf2Implementation {
    fn derive_bits(
        &self,
        algorithm: &Algorithm,
        base_key: &Key,
        length_bits: Option<u32>,
    ) -> Result<Vec<u8>> {
        require_key_type(base_key, KeyType::Secret)?;
        let (hash, salt, iterations) = match &algorithm.params {
            AlgorithmParams::Pbkdf2 {
                hash,
                salt,
                iterations,
            } => (*hash, salt, *iterations),
            _ => return Err(Error::Unexpected),
        };

        let length_bits = length_bits.ok_or(Error::Pbkdf2DeriveBitsLengthNotSpecified)?;
        if length_bits % 8 != 0 {
            return Err(Error::DeriveLengthNotWholeByte);
        }
        if iterations == 0 {
            return Err(Error::Pbkdf2Iterations0);
        }
        if length_bits == 0 {
            return Err(Error::Pbkdf2DeriveBitsLengthZero);
        }

        CRYPTO_PROVIDER
            .pbkdf2_derive_key(
                base_key.handle(),
                salt,
                iterations,
                (length_bits / 8) as usize,
                hash,
            )
            .map_err(|_| Error::Operation)
    }

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
                id: AlgorithmId::Pbkdf2,
            },
            usages,
            key_data,
        ))
    }
}

#[cfg(test)]
mod tests {
    use webcrypto_encoding::bytes_to_hex_string;

    use super::*;
    use crate::{sha_hash::ShaAlgorithm, usage::KeyUsage};

    fn import(password: &[u8]) -> Key {
        Pbkdf2Implementation
            .import_key_raw(
                password,
                &Algorithm::new(AlgorithmId::Pbkdf2),
                false,
                KeyUsage::DeriveBits.into(),
            )
            .unwrap()
    }

    // RFC 6070
    #[test]
    fn known_answers() {
        let key = import(b"password");
        let derive = |iterations| {
            let bits = Pbkdf2Implementation
                .derive_bits(
                    &Algorithm::pbkdf2(ShaAlgorithm::SHA1, b"salt", iterations),
                    &key,
                    Some(160),
                )
                .unwrap();
            bytes_to_hex_string(&bits)
        };
        assert_eq!(derive(1), "0c60c80f961f0e71f3a9b524af6012062fe037a6");
        assert_eq!(derive(2), "ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957");
    }

    #[test]
    fn parameter_checks() {
        let key = import(b"password");
        let derive = |iterations, length_bits| {
            Pbkdf2Implementation.derive_bits(
                &Algorithm::pbkdf2(ShaAlgorithm::SHA256, b"salt", iterations),
                &key,
                length_bits,
            )
        };

        assert_eq!(
            derive(1, None).err(),
            Some(Error::Pbkdf2DeriveBitsLengthNotSpecified)
        );
        assert_eq!(derive(1, Some(7)).err(), Some(Error::DeriveLengthNotWholeByte));
        assert_eq!(derive(0, Some(256)).err(), Some(Error::Pbkdf2Iterations0));
        assert_eq!(derive(1, Some(0)).err(), Some(Error::Pbkdf2DeriveBitsLengthZero));
        assert_eq!(derive(1, Some(1024)).unwrap().len(), 128);
    }

    #[test]
    fn keys_are_never_extractable() {
        assert_eq!(
            Pbkdf2Implementation
                .import_key_raw(
                    b"password",
                    &Algorithm::new(AlgorithmId::Pbkdf2),
                    true,
                    KeyUsage::DeriveBits.into(),
                )
                .err(),
            Some(Error::ImportExtractableKdfKey)
        );
        assert!(!import(b"password").extractable());
    }
}
