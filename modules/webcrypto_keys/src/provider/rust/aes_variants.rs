// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! AES-GCM instantiations for every key and tag length pair the pure Rust backend supports.

use aes::{Aes128, Aes256};
use aes_gcm::{
    aead::{
        consts::{U12, U13, U14, U15, U16},
        Aead, Payload,
    },
    AesGcm, KeyInit, Nonce,
};

use crate::provider::CryptoError;

pub enum AesGcmVariant {
    Aes128Gcm96(AesGcm<Aes128, U12, U12>),
    Aes256Gcm96(AesGcm<Aes256, U12, U12>),
    Aes128Gcm104(AesGcm<Aes128, U12, U13>),
    Aes256Gcm104(AesGcm<Aes256, U12, U13>),
    Aes128Gcm112(AesGcm<Aes128, U12, U14>),
    Aes256Gcm112(AesGcm<Aes256, U12, U14>),
    Aes128Gcm120(AesGcm<Aes128, U12, U15>),
    Aes256Gcm120(AesGcm<Aes256, U12, U15>),
    Aes128Gcm128(AesGcm<Aes128, U12, U16>),
    Aes256Gcm128(AesGcm<Aes256, U12, U16>),
}

impl AesGcmVariant {
    pub fn new(key: &[u8], tag_length: u8) -> Result<Self, CryptoError> {
        let variant = match (key.len(), tag_length) {
            (16, 96) => Self::Aes128Gcm96(AesGcm::new_from_slice(key)?),
            (32, 96) => Self::Aes256Gcm96(AesGcm::new_from_slice(key)?),
            (16, 104) => Self::Aes128Gcm104(AesGcm::new_from_slice(key)?),
            (32, 104) => Self::Aes256Gcm104(AesGcm::new_from_slice(key)?),
            (16, 112) => Self::Aes128Gcm112(AesGcm::new_from_slice(key)?),
            (32, 112) => Self::Aes256Gcm112(AesGcm::new_from_slice(key)?),
            (16, 120) => Self::Aes128Gcm120(AesGcm::new_from_slice(key)?),
            (32, 120) => Self::Aes256Gcm120(AesGcm::new_from_slice(key)?),
            (16, 128) => Self::Aes128Gcm128(AesGcm::new_from_slice(key)?),
            (32, 128) => Self::Aes256Gcm128(AesGcm::new_from_slice(key)?),
            (16 | 32, _) => {
                return Err(CryptoError::UnsupportedAlgorithm(Some(
                    "AES-GCM tag length".into(),
                )))
            },
            _ => return Err(CryptoError::InvalidKey(None)),
        };
        Ok(variant)
    }

    /// Returns `ciphertext || tag`. Only 96-bit IVs are accepted.
    pub fn encrypt(&self, iv: &[u8], msg: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let nonce = nonce(iv)?;
        let payload = Payload { msg, aad };
        match self {
            Self::Aes128Gcm96(v) => v.encrypt(nonce, payload),
            Self::Aes256Gcm96(v) => v.encrypt(nonce, payload),
            Self::Aes128Gcm104(v) => v.encrypt(nonce, payload),
            Self::Aes256Gcm104(v) => v.encrypt(nonce, payload),
            Self::Aes128Gcm112(v) => v.encrypt(nonce, payload),
            Self::Aes256Gcm112(v) => v.encrypt(nonce, payload),
            Self::Aes128Gcm120(v) => v.encrypt(nonce, payload),
            Self::Aes256Gcm120(v) => v.encrypt(nonce, payload),
            Self::Aes128Gcm128(v) => v.encrypt(nonce, payload),
            Self::Aes256Gcm128(v) => v.encrypt(nonce, payload),
        }
        .map_err(|_| CryptoError::EncryptionFailed(None))
    }

    pub fn decrypt(&self, iv: &[u8], msg: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let nonce = nonce(iv)?;
        let payload = Payload { msg, aad };
        match self {
            Self::Aes128Gcm96(v) => v.decrypt(nonce, payload),
            Self::Aes256Gcm96(v) => v.decrypt(nonce, payload),
            Self::Aes128Gcm104(v) => v.decrypt(nonce, payload),
            Self::Aes256Gcm104(v) => v.decrypt(nonce, payload),
            Self::Aes128Gcm112(v) => v.decrypt(nonce, payload),
            Self::Aes256Gcm112(v) => v.decrypt(nonce, payload),
            Self::Aes128Gcm120(v) => v.decrypt(nonce, payload),
            Self::Aes256Gcm120(v) => v.decrypt(nonce, payload),
            Self::Aes128Gcm128(v) => v.decrypt(nonce, payload),
            Self::Aes256Gcm128(v) => v.decrypt(nonce, payload),
        }
        .map_err(|_| CryptoError::DecryptionFailed(None))
    }
}

fn nonce(iv: &[u8]) -> Result<&Nonce<U12>, CryptoError> {
    if iv.len() != 12 {
        return Err(CryptoError::UnsupportedAlgorithm(Some(
            "AES-GCM IV must be 96 bits".into(),
        )));
    }
    Ok(Nonce::<U12>::from_slice(iv))
}
