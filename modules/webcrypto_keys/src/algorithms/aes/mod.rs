// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
mod cbc;
mod ctr;
mod gcm;
mod kw;

use tracing::debug;

use crate::{
    algorithm::{Algorithm, AlgorithmId, AlgorithmParams, KeyFormat},
    error::{Error, Result},
    jwk::{aes_alg_name, read_secret_key_jwk, write_secret_key_jwk},
    key::{GenerateKeyResult, Key, KeyAlgorithm, KeyType},
    provider::CryptoProvider,
    usage::{KeyUsageAlgorithm, Usages},
    CRYPTO_PROVIDER,
};

use super::{
    check_secret_key_creation_usages, require_key_type, verify_usages_before_import_secret_key,
    AlgorithmImplementation,
};

/// AES-CBC, AES-CTR, AES-GCM and AES-KW. They share key handling and differ in the cipher mode,
/// which is picked by `id`.
pub struct AesImplementation {
    id: AlgorithmId,
    jwk_suffix: &'static str,
    all_usages: Usages,
}

impl AesImplementation {
    pub const fn new(id: AlgorithmId, jwk_suffix: &'static str, usages: KeyUsageAlgorithm) -> Self {
        Self {
            id,
            jwk_suffix,
            all_usages: usages.public_usages(),
        }
    }

    fn jwk_alg_name(&self, key_len_bytes: usize) -> Result<String> {
        aes_alg_name(self.jwk_suffix, key_len_bytes).ok_or(Error::ImportAesKeyLength)
    }

    fn raw_key<'a>(&self, key: &'a Key) -> Result<&'a [u8]> {
        require_key_type(key, KeyType::Secret)?;
        Ok(key.handle())
    }
}

/// Only 128 and 256 bit keys are accepted. 192 bits is rejected even where the backend has it.
fn verify_key_length_for_import(key_len_bytes: usize) -> Result<()> {
    match key_len_bytes {
        16 | 32 => Ok(()),
        24 => Err(Error::Aes192BitUnsupported),
        _ => Err(Error::ImportAesKeyLength),
    }
}

fn get_key_gen_length_bits(algorithm: &Algorithm) -> Result<u32> {
    let length_bits = match &algorithm.params {
        AlgorithmParams::AesKeyGen { length_bits } => *length_bits,
        _ => return Err(Error::Unexpected),
    };
    match length_bits {
        128 | 256 => Ok(length_bits),
        192 => Err(Error::Aes192BitUnsupported),
        _ => Err(Error::GenerateAesKeyLength),
    }
}

impl AlgorithmImplementation for AesImplementation {
    fn encrypt(&self, algorithm: &Algorithm, key: &Key, data: &[u8]) -> Result<Vec<u8>> {
        let raw_key = self.raw_key(key)?;
        match self.id {
            AlgorithmId::AesCbc => cbc::encrypt(algorithm, raw_key, data),
            AlgorithmId::AesCtr => ctr::encrypt(algorithm, raw_key, data),
            AlgorithmId::AesGcm => gcm::encrypt(algorithm, raw_key, data),
            AlgorithmId::AesKw => kw::encrypt(raw_key, data),
            _ => Err(Error::Unexpected),
        }
    }

    fn decrypt(&self, algorithm: &Algorithm, key: &Key, data: &[u8]) -> Result<Vec<u8>> {
        let raw_key = self.raw_key(key)?;
        match self.id {
            AlgorithmId::AesCbc => cbc::decrypt(algorithm, raw_key, data),
            AlgorithmId::AesCtr => ctr::decrypt(algorithm, raw_key, data),
            AlgorithmId::AesGcm => gcm::decrypt(algorithm, raw_key, data),
            AlgorithmId::AesKw => kw::decrypt(raw_key, data),
            _ => Err(Error::Unexpected),
        }
    }

    fn generate_key(
        &self,
        algorithm: &Algorithm,
        extractable: bool,
        usages: Usages,
    ) -> Result<GenerateKeyResult> {
        check_secret_key_creation_usages(self.all_usages, usages)?;
        let length_bits = get_key_gen_length_bits(algorithm)?;

        let raw = CRYPTO_PROVIDER.generate_aes_key(length_bits as u16)?;
        Ok(GenerateKeyResult::Secret(Key::new(
            KeyType::Secret,
            extractable,
            KeyAlgorithm::Aes {
                id: self.id,
                length_bits,
            },
            usages,
            raw,
        )))
    }

    fn get_key_length(&self, algorithm: &Algorithm) -> Result<Option<u32>> {
        get_key_gen_length_bits(algorithm).map(Some)
    }

    fn verify_key_usages_before_import_key(&self, format: KeyFormat, usages: Usages) -> Result<()> {
        verify_usages_before_import_secret_key(format, self.all_usages, usages)
    }

    fn import_key_raw(
        &self,
        key_data: &[u8],
        _algorithm: &Algorithm,
        extractable: bool,
        usages: Usages,
    ) -> Result<Key> {
        check_secret_key_creation_usages(self.all_usages, usages)?;
        verify_key_length_for_import(key_data.len())?;

        Ok(Key::new(
            KeyType::Secret,
            extractable,
            KeyAlgorithm::Aes {
                id: self.id,
                length_bits: key_data.len() as u32 * 8,
            },
            usages,
            key_data,
        ))
    }

    fn import_key_jwk(
        &self,
        key_data: &[u8],
        algorithm: &Algorithm,
        extractable: bool,
        usages: Usages,
    ) -> Result<Key> {
        check_secret_key_creation_usages(self.all_usages, usages)?;

        // The expected "alg" depends on the length of "k", so it is checked once that is known.
        let (raw, reader) = read_secret_key_jwk(key_data, None, extractable, usages)?;
        match raw.len() {
            16 | 32 => reader.verify_alg(&self.jwk_alg_name(raw.len())?)?,
            24 => return Err(Error::Aes192BitUnsupported),
            len => {
                debug!("AES JWK has a {} byte key", len);
                return Err(Error::JwkIncorrectKeyLength);
            },
        }

        self.import_key_raw(&raw, algorithm, extractable, usages)
    }

    fn export_key_raw(&self, key: &Key) -> Result<Vec<u8>> {
        Ok(self.raw_key(key)?.to_vec())
    }

    fn export_key_jwk(&self, key: &Key) -> Result<Vec<u8>> {
        let raw = self.raw_key(key)?;
        Ok(write_secret_key_jwk(
            raw,
            &self.jwk_alg_name(raw.len())?,
            key.extractable(),
            key.usages(),
        ))
    }
}
