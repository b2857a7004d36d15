// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use tracing::trace;

use crate::{
    algorithm::{Algorithm, KeyFormat},
    algorithms::get_implementation,
    error::Result,
    key::Key,
    usage::Usages,
};

/// Imports `key_data` in `format`. Usages that can never be valid for the format are rejected
/// before the key data is read.
pub fn import_key(
    format: KeyFormat,
    key_data: &[u8],
    algorithm: &Algorithm,
    extractable: bool,
    usages: Usages,
) -> Result<Key> {
    trace!("import {} key from {}", algorithm.id, format);
    let implementation = get_implementation(algorithm.id)?;
    implementation.verify_key_usages_before_import_key(format, usages)?;
    implementation.import_key(format, key_data, algorithm, extractable, usages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algorithm::{AlgorithmId, EllipticCurve},
        error::Error,
        sha_hash::ShaAlgorithm,
        test_utils::{hex, RSA_PUBLIC_KEY_SPKI_HEX},
        usage::KeyUsage,
    };

    #[test]
    fn usages_are_checked_before_key_data() {
        // Garbage key data never gets looked at
        assert_eq!(
            import_key(
                KeyFormat::Spki,
                b"garbage",
                &Algorithm::ec_key(AlgorithmId::Ecdsa, EllipticCurve::P256),
                true,
                KeyUsage::Sign.into(),
            )
            .err(),
            Some(Error::CreateKeyBadUsages)
        );
        assert_eq!(
            import_key(
                KeyFormat::Pkcs8,
                b"garbage",
                &Algorithm::ec_key(AlgorithmId::Ecdsa, EllipticCurve::P256),
                true,
                Usages::EMPTY,
            )
            .err(),
            Some(Error::CreateKeyEmptyUsages)
        );
        assert_eq!(
            import_key(
                KeyFormat::Raw,
                b"garbage",
                &Algorithm::ec_key(AlgorithmId::Ecdsa, EllipticCurve::P256),
                true,
                KeyUsage::Verify.into(),
            )
            .err(),
            Some(Error::UnsupportedImportKeyFormat)
        );
        assert_eq!(
            import_key(
                KeyFormat::Spki,
                b"garbage",
                &Algorithm::new(AlgorithmId::AesGcm),
                true,
                KeyUsage::Encrypt.into(),
            )
            .err(),
            Some(Error::UnsupportedImportKeyFormat)
        );
        assert_eq!(
            import_key(
                KeyFormat::Spki,
                b"garbage",
                &Algorithm::ec_key(AlgorithmId::Ecdsa, EllipticCurve::P256),
                true,
                KeyUsage::Verify.into(),
            )
            .err(),
            Some(Error::Data)
        );
    }

    #[test]
    fn spki_public_key_may_have_no_usages() {
        let key = import_key(
            KeyFormat::Spki,
            &hex(RSA_PUBLIC_KEY_SPKI_HEX),
            &Algorithm::rsa_hashed_import(AlgorithmId::RsaOaep, ShaAlgorithm::SHA256),
            true,
            Usages::EMPTY,
        )
        .unwrap();
        assert!(key.usages().is_empty());
    }

    #[test]
    fn aes_192_is_rejected_from_raw_and_jwk() {
        assert_eq!(
            import_key(
                KeyFormat::Raw,
                &[0; 24],
                &Algorithm::new(AlgorithmId::AesCtr),
                true,
                KeyUsage::Encrypt.into(),
            )
            .err(),
            Some(Error::Aes192BitUnsupported)
        );
        assert_eq!(
            import_key(
                KeyFormat::Jwk,
                br#"{"kty":"oct","k":"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"}"#,
                &Algorithm::new(AlgorithmId::AesCtr),
                true,
                KeyUsage::Encrypt.into(),
            )
            .err(),
            Some(Error::Aes192BitUnsupported)
        );
    }

    #[test]
    fn empty_jwk() {
        assert_eq!(
            import_key(
                KeyFormat::Jwk,
                b"",
                &Algorithm::hmac_import(ShaAlgorithm::SHA1, None),
                true,
                KeyUsage::Sign.into(),
            )
            .err(),
            Some(Error::ImportEmptyKeyData)
        );
        assert_eq!(
            import_key(
                KeyFormat::Jwk,
                b"[1, 2]",
                &Algorithm::hmac_import(ShaAlgorithm::SHA1, None),
                true,
                KeyUsage::Sign.into(),
            )
            .err(),
            Some(Error::JwkNotDictionary)
        );
    }
}
