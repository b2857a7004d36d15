// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use crate::{
    algorithm::{Algorithm, AlgorithmParams},
    error::{Error, Result},
    provider::{AesMode, CryptoProvider},
    CRYPTO_PROVIDER,
};

const BLOCK_SIZE: usize = 16;

fn get_iv(algorithm: &Algorithm) -> Result<&[u8]> {
    let iv = match &algorithm.params {
        AlgorithmParams::AesCbc { iv } => iv,
        _ => return Err(Error::Unexpected),
    };
    if iv.len() != BLOCK_SIZE {
        return Err(Error::IncorrectSizeAesCbcIv);
    }
    Ok(iv)
}

/// PKCS#7 padded. The output is always a whole number of blocks, one longer for aligned input.
pub fn encrypt(algorithm: &Algorithm, raw_key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let iv = get_iv(algorithm)?;
    // The padded length has to fit the backend's signed int lengths
    if data.len() > i32::MAX as usize - BLOCK_SIZE {
        return Err(Error::DataTooLarge);
    }
    Ok(CRYPTO_PROVIDER.aes_encrypt(AesMode::Cbc, raw_key, iv, data, None)?)
}

pub fn decrypt(algorithm: &Algorithm, raw_key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let iv = get_iv(algorithm)?;
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(Error::Operation);
    }
    CRYPTO_PROVIDER
        .aes_decrypt(AesMode::Cbc, raw_key, iv, data, None)
        .map_err(|_| Error::Operation)
}
