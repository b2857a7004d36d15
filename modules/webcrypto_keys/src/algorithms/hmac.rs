// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use crate::{
    algorithm::{Algorithm, AlgorithmParams, KeyFormat},
    error::{Error, Result},
    jwk::{hmac_alg_name, read_secret_key_jwk, write_secret_key_jwk},
    key::{GenerateKeyResult, Key, KeyAlgorithm, KeyType},
    provider::{CryptoProvider, HmacProvider},
    sha_hash::ShaAlgorithm,
    usage::{KeyUsageAlgorithm, Usages},
    CRYPTO_PROVIDER,
};

use super::{
    check_secret_key_creation_usages, constant_time_eq, require_key_type,
    truncate_to_bit_length, verify_usages_before_import_secret_key, AlgorithmImplementation,
};

const ALL_USAGES: Usages = KeyUsageAlgorithm::Hmac.public_usages();

pub struct HmacImplementation;

fn import_params(algorithm: &Algorithm) -> Result<(ShaAlgorithm, Option<u32>)> {
    match &algorithm.params {
        AlgorithmParams::HmacImport { hash, length_bits }
        | AlgorithmParams::HmacKeyGen { hash, length_bits } => Ok((*hash, *length_bits)),
        _ => Err(Error::Unexpected),
    }
}

/// Key length in bits for `key_len_bytes` of key data. An explicit length may drop up to 7 of
/// the trailing bits but must use the last byte.
fn get_import_key_length_bits(length_bits: Option<u32>, key_len_bytes: usize) -> Result<u32> {
    let data_length_bits = u32::try_from(key_len_bytes)
        .ok()
        .and_then(|len| len.checked_mul(8))
        .ok_or(Error::DataTooLarge)?;

    match length_bits {
        None => Ok(data_length_bits),
        Some(length_bits) if length_bits.div_ceil(8) as usize == key_len_bytes => Ok(length_bits),
        Some(_) => Err(Error::HmacImportBadLength),
    }
}

fn mac(key: &Key, data: &[u8]) -> Result<Vec<u8>> {
    require_key_type(key, KeyType::Secret)?;
    let hash = key.algorithm().hash().ok_or(Error::Unexpected)?;

    let mut hmac = CRYPTO_PROVIDER.hmac(hash, key.handle())?;
    hmac.update(data);
    Ok(hmac.finalize()?)
}

impl AlgorithmImplementation for HmacImplementation {
    fn sign(&self, _algorithm: &Algorithm, key: &Key, data: &[u8]) -> Result<Vec<u8>> {
        mac(key, data)
    }

    fn verify(
        &self,
        _algorithm: &Algorithm,
        key: &Key,
        signature: &[u8],
        data: &[u8],
    ) -> Result<bool> {
        let expected = mac(key, data)?;
        Ok(constant_time_eq(&expected, signature))
    }

    fn generate_key(
        &self,
        algorithm: &Algorithm,
        extractable: bool,
        usages: Usages,
    ) -> Result<GenerateKeyResult> {
        check_secret_key_creation_usages(ALL_USAGES, usages)?;
        let (hash, length_bits) = import_params(algorithm)?;

        let length_bits = length_bits.unwrap_or_else(|| hash.block_len_bits());
        if length_bits == 0 {
            return Err(Error::GenerateHmacKeyLengthZero);
        }

        let mut raw = CRYPTO_PROVIDER.generate_hmac_key(length_bits)?;
        truncate_to_bit_length(length_bits, &mut raw);

        Ok(GenerateKeyResult::Secret(Key::new(
            KeyType::Secret,
            extractable,
            KeyAlgorithm::Hmac { hash, length_bits },
            usages,
            raw,
        )))
    }

    fn get_key_length(&self, algorithm: &Algorithm) -> Result<Option<u32>> {
        let (hash, length_bits) = import_params(algorithm)?;
        match length_bits {
            Some(0) => Err(Error::GenerateHmacKeyLengthZero),
            Some(length_bits) => Ok(Some(length_bits)),
            None => Ok(Some(hash.block_len_bits())),
        }
    }

    fn verify_key_usages_before_import_key(&self, format: KeyFormat, usages: Usages) -> Result<()> {
        verify_usages_before_import_secret_key(format, ALL_USAGES, usages)
    }

    fn import_key_raw(
        &self,
        key_data: &[u8],
        algorithm: &Algorithm,
        extractable: bool,
        usages: Usages,
    ) -> Result<Key> {
        check_secret_key_creation_usages(ALL_USAGES, usages)?;
        let (hash, length_bits) = import_params(algorithm)?;
        let length_bits = get_import_key_length_bits(length_bits, key_data.len())?;
        let mut raw = key_data.to_vec();
        truncate_to_bit_length(length_bits, &mut raw);

        Ok(Key::new(
            KeyType::Secret,
            extractable,
            KeyAlgorithm::Hmac { hash, length_bits },
            usages,
            raw,
        ))
    }

    fn import_key_jwk(
        &self,
        key_data: &[u8],
        algorithm: &Algorithm,
        extractable: bool,
        usages: Usages,
    ) -> Result<Key> {
        check_secret_key_creation_usages(ALL_USAGES, usages)?;
        let (hash, _) = import_params(algorithm)?;

        let (raw, _) =
            read_secret_key_jwk(key_data, Some(&hmac_alg_name(hash)), extractable, usages)?;
        self.import_key_raw(&raw, algorithm, extractable, usages)
    }

    fn export_key_raw(&self, key: &Key) -> Result<Vec<u8>> {
        require_key_type(key, KeyType::Secret)?;
        Ok(key.handle().to_vec())
    }

    fn export_key_jwk(&self, key: &Key) -> Result<Vec<u8>> {
        require_key_type(key, KeyType::Secret)?;
        let hash = key.algorithm().hash().ok_or(Error::Unexpected)?;
        Ok(write_secret_key_jwk(
            key.handle(),
            &hmac_alg_name(hash),
            key.extractable(),
            key.usages(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use webcrypto_encoding::bytes_to_hex_string;

    use super::*;
    use crate::usage::KeyUsage;

    fn sign_verify() -> Usages {
        Usages::of(&[KeyUsage::Sign, KeyUsage::Verify])
    }

    fn import(raw: &[u8], hash: ShaAlgorithm, length_bits: Option<u32>) -> Result<Key> {
        HmacImplementation.import_key_raw(
            raw,
            &Algorithm::hmac_import(hash, length_bits),
            true,
            sign_verify(),
        )
    }

    #[test]
    fn sign_and_verify() {
        let raw: Vec<u8> = (0..32).collect();
        let key = import(&raw, ShaAlgorithm::SHA256, None).unwrap();
        assert_eq!(
            key.algorithm(),
            &KeyAlgorithm::Hmac {
                hash: ShaAlgorithm::SHA256,
                length_bits: 256
            }
        );

        let algorithm = Algorithm::new(crate::algorithm::AlgorithmId::Hmac);
        let signature = HmacImplementation.sign(&algorithm, &key, b"").unwrap();
        assert_eq!(signature.len(), 32);
        assert!(HmacImplementation
            .verify(&algorithm, &key, &signature, b"")
            .unwrap());

        let mut flipped = signature.clone();
        flipped[31] ^= 1;
        assert!(!HmacImplementation
            .verify(&algorithm, &key, &flipped, b"")
            .unwrap());
        assert!(!HmacImplementation
            .verify(&algorithm, &key, &signature[..31], b"")
            .unwrap());
    }

    // RFC 4231 test case 2
    #[test]
    fn known_answer() {
        let key = import(b"Jefe", ShaAlgorithm::SHA256, None).unwrap();
        let signature = HmacImplementation
            .sign(
                &Algorithm::new(crate::algorithm::AlgorithmId::Hmac),
                &key,
                b"what do ya want for nothing?",
            )
            .unwrap();
        assert_eq!(
            bytes_to_hex_string(&signature),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn import_lengths() {
        assert!(import(&[], ShaAlgorithm::SHA1, None).is_ok());
        assert_eq!(
            import(&[1, 2], ShaAlgorithm::SHA1, Some(9))
                .unwrap()
                .algorithm(),
            &KeyAlgorithm::Hmac {
                hash: ShaAlgorithm::SHA1,
                length_bits: 9
            }
        );
        assert_eq!(
            import(&[1, 2], ShaAlgorithm::SHA1, Some(8)).err(),
            Some(Error::HmacImportBadLength)
        );
        assert_eq!(
            import(&[1, 2], ShaAlgorithm::SHA1, Some(17)).err(),
            Some(Error::HmacImportBadLength)
        );
    }

    #[test]
    fn import_masks_trailing_bits() {
        let key = import(&[0xff; 32], ShaAlgorithm::SHA256, Some(250)).unwrap();
        let raw = HmacImplementation.export_key_raw(&key).unwrap();
        assert_eq!(raw.len(), 32);
        assert!(raw[..31].iter().all(|b| *b == 0xff));
        assert_eq!(raw[31], 0xc0);

        // k is 32 bytes of 0xff
        let jwk = br#"{"kty": "oct", "k": "__________________________________________8"}"#;
        let key = HmacImplementation
            .import_key_jwk(
                jwk,
                &Algorithm::hmac_import(ShaAlgorithm::SHA256, Some(250)),
                true,
                sign_verify(),
            )
            .unwrap();
        assert_eq!(HmacImplementation.export_key_raw(&key).unwrap(), raw);
    }

    #[test]
    fn generate() {
        let key = HmacImplementation
            .generate_key(
                &Algorithm::hmac_key_gen(ShaAlgorithm::SHA384, None),
                false,
                sign_verify(),
            )
            .unwrap()
            .into_secret()
            .unwrap();
        assert_eq!(key.handle().len(), 128);

        let key = HmacImplementation
            .generate_key(
                &Algorithm::hmac_key_gen(ShaAlgorithm::SHA256, Some(13)),
                false,
                sign_verify(),
            )
            .unwrap()
            .into_secret()
            .unwrap();
        assert_eq!(key.handle().len(), 2);
        assert_eq!(key.handle()[1] & 0x07, 0);

        assert_eq!(
            HmacImplementation
                .generate_key(
                    &Algorithm::hmac_key_gen(ShaAlgorithm::SHA256, Some(0)),
                    false,
                    sign_verify()
                )
                .err(),
            Some(Error::GenerateHmacKeyLengthZero)
        );
        assert_eq!(
            HmacImplementation
                .generate_key(
                    &Algorithm::hmac_key_gen(ShaAlgorithm::SHA256, None),
                    false,
                    KeyUsage::Encrypt.into()
                )
                .err(),
            Some(Error::CreateKeyBadUsages)
        );
    }

    #[test]
    fn jwk_round_trip() {
        let key = import(&[0xaa; 20], ShaAlgorithm::SHA1, None).unwrap();
        let jwk = HmacImplementation.export_key_jwk(&key).unwrap();
        let json = String::from_utf8(jwk.clone()).unwrap();
        assert!(json.contains(r#""alg":"HS1""#));

        let imported = HmacImplementation
            .import_key_jwk(
                &jwk,
                &Algorithm::hmac_import(ShaAlgorithm::SHA1, None),
                true,
                KeyUsage::Verify.into(),
            )
            .unwrap();
        assert_eq!(imported.handle(), key.handle());

        assert_eq!(
            HmacImplementation
                .import_key_jwk(
                    &jwk,
                    &Algorithm::hmac_import(ShaAlgorithm::SHA256, None),
                    true,
                    KeyUsage::Verify.into(),
                )
                .err(),
            Some(Error::JwkAlgorithmInconsistent)
        );
    }

    #[test]
    fn key_length_for_derivation() {
        assert_eq!(
            HmacImplementation
                .get_key_length(&Algorithm::hmac_import(ShaAlgorithm::SHA512, None))
                .unwrap(),
            Some(1024)
        );
        assert_eq!(
            HmacImplementation
                .get_key_length(&Algorithm::hmac_import(ShaAlgorithm::SHA512, Some(100)))
                .unwrap(),
            Some(100)
        );
    }
}
