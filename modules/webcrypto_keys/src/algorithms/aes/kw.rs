// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use crate::{
    error::{Error, Result},
    provider::CryptoProvider,
    CRYPTO_PROVIDER,
};

pub fn encrypt(raw_key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < 16 {
        return Err(Error::DataTooSmall);
    }
    if data.len() % 8 != 0 {
        return Err(Error::InvalidAesKwDataLength);
    }
    Ok(CRYPTO_PROVIDER.aes_kw_wrap(raw_key, data)?)
}

/// A failed integrity check is an [`Error::Operation`] like any other failure.
pub fn decrypt(raw_key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < 24 {
        return Err(Error::DataTooSmall);
    }
    if data.len() % 8 != 0 {
        return Err(Error::InvalidAesKwDataLength);
    }
    CRYPTO_PROVIDER
        .aes_kw_unwrap(raw_key, data)
        .map_err(|_| Error::Operation)
}
