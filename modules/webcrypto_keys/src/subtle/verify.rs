// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use tracing::trace;

use crate::{
    algorithm::Algorithm, algorithms::get_implementation, error::Result, key::Key,
    usage::KeyUsage,
};

use super::{check_key_algorithm, check_key_usage};

/// `Ok(false)` when the signature does not match.
pub fn verify(algorithm: &Algorithm, key: &Key, signature: &[u8], data: &[u8]) -> Result<bool> {
    check_key_usage(key, KeyUsage::Verify)?;
    check_key_algorithm(key, algorithm.id)?;
    trace!("verify {} bytes with {}", data.len(), algorithm.id);
    get_implementation(algorithm.id)?.verify(algorithm, key, signature, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algorithm::{AlgorithmId, KeyFormat},
        error::Error,
        sha_hash::ShaAlgorithm,
        subtle::{import_key, sign},
        test_utils::{hex, RSA_PRIVATE_KEY_PKCS8_HEX, RSA_PUBLIC_KEY_SPKI_HEX},
        usage::Usages,
    };

    #[test]
    fn hmac_sign_verify() {
        let key = import_key(
            KeyFormat::Raw,
            b"key",
            &Algorithm::hmac_import(ShaAlgorithm::SHA256, None),
            false,
            Usages::of(&[KeyUsage::Sign, KeyUsage::Verify]),
        )
        .unwrap();
        let algorithm = Algorithm::new(AlgorithmId::Hmac);

        let signature = sign(&algorithm, &key, b"data").unwrap();
        assert!(verify(&algorithm, &key, &signature, b"data").unwrap());
        assert!(!verify(&algorithm, &key, &signature, b"other").unwrap());
    }

    #[test]
    fn rsa_sign_verify() {
        let algorithm =
            Algorithm::rsa_hashed_import(AlgorithmId::RsaSsaPkcs1v1_5, ShaAlgorithm::SHA1);
        let private_key = import_key(
            KeyFormat::Pkcs8,
            &hex(RSA_PRIVATE_KEY_PKCS8_HEX),
            &algorithm,
            false,
            KeyUsage::Sign.into(),
        )
        .unwrap();
        let public_key = import_key(
            KeyFormat::Spki,
            &hex(RSA_PUBLIC_KEY_SPKI_HEX),
            &algorithm,
            true,
            KeyUsage::Verify.into(),
        )
        .unwrap();

        let algorithm = Algorithm::new(AlgorithmId::RsaSsaPkcs1v1_5);
        let signature = sign(&algorithm, &private_key, b"data").unwrap();
        assert!(verify(&algorithm, &public_key, &signature, b"data").unwrap());

        assert_eq!(
            verify(&algorithm, &private_key, &signature, b"data").err(),
            Some(Error::Unexpected)
        );
        assert_eq!(
            sign(&algorithm, &public_key, b"data").err(),
            Some(Error::Unexpected)
        );
    }
}
