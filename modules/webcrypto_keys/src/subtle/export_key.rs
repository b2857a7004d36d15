// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use tracing::trace;

use crate::{
    algorithm::KeyFormat,
    algorithms::get_implementation,
    error::{Error, Result},
    key::Key,
};

pub fn export_key(format: KeyFormat, key: &Key) -> Result<Vec<u8>> {
    if !key.extractable() {
        return Err(Error::KeyNotExtractable);
    }
    trace!("export {} key as {}", key.algorithm().id(), format);
    get_implementation(key.algorithm().id())?.export_key(format, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algorithm::{Algorithm, AlgorithmId},
        sha_hash::ShaAlgorithm,
        subtle::import_key,
        test_utils::{hex, RSA_PUBLIC_KEY_SPKI_HEX},
        usage::{KeyUsage, Usages},
    };

    #[test]
    fn non_extractable_keys_stay_inside() {
        let key = import_key(
            KeyFormat::Raw,
            &[7; 16],
            &Algorithm::new(AlgorithmId::AesKw),
            false,
            KeyUsage::WrapKey.into(),
        )
        .unwrap();
        for format in [KeyFormat::Raw, KeyFormat::Jwk, KeyFormat::Spki] {
            assert_eq!(export_key(format, &key).err(), Some(Error::KeyNotExtractable));
        }
    }

    #[test]
    fn formats_must_fit_the_key_type() {
        let key = import_key(
            KeyFormat::Raw,
            &[7; 16],
            &Algorithm::hmac_import(ShaAlgorithm::SHA256, None),
            true,
            Usages::of(&[KeyUsage::Sign]),
        )
        .unwrap();
        assert_eq!(export_key(KeyFormat::Raw, &key).unwrap(), vec![7; 16]);
        assert_eq!(
            export_key(KeyFormat::Spki, &key).err(),
            Some(Error::UnsupportedExportKeyFormat)
        );

        let public_key = import_key(
            KeyFormat::Spki,
            &hex(RSA_PUBLIC_KEY_SPKI_HEX),
            &Algorithm::rsa_hashed_import(AlgorithmId::RsaSsaPkcs1v1_5, ShaAlgorithm::SHA256),
            true,
            KeyUsage::Verify.into(),
        )
        .unwrap();
        assert_eq!(
            export_key(KeyFormat::Spki, &public_key).unwrap(),
            hex(RSA_PUBLIC_KEY_SPKI_HEX)
        );
        assert_eq!(
            export_key(KeyFormat::Pkcs8, &public_key).err(),
            Some(Error::UnexpectedKeyType)
        );
        assert_eq!(
            export_key(KeyFormat::Raw, &public_key).err(),
            Some(Error::UnsupportedExportKeyFormat)
        );
    }
}
