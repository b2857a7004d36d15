// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use crate::{
    algorithm::{Algorithm, AlgorithmParams},
    algorithms::require_key_type,
    error::{Error, Result},
    key::{Key, KeyType},
    provider::CryptoProvider,
    CRYPTO_PROVIDER,
};

fn get_label(algorithm: &Algorithm) -> Result<Option<&[u8]>> {
    match &algorithm.params {
        AlgorithmParams::RsaOaep { label } => Ok(label.as_deref()),
        _ => Err(Error::Unexpected),
    }
}

pub fn encrypt(algorithm: &Algorithm, key: &Key, data: &[u8]) -> Result<Vec<u8>> {
    require_key_type(key, KeyType::Public)?;
    let label = get_label(algorithm)?;
    let hash = key.algorithm().hash().ok_or(Error::Unexpected)?;

    Ok(CRYPTO_PROVIDER.rsa_oaep_encrypt(key.handle(), data, hash, label)?)
}

pub fn decrypt(algorithm: &Algorithm, key: &Key, data: &[u8]) -> Result<Vec<u8>> {
    require_key_type(key, KeyType::Private)?;
    let label = get_label(algorithm)?;
    let hash = key.algorithm().hash().ok_or(Error::Unexpected)?;

    CRYPTO_PROVIDER
        .rsa_oaep_decrypt(key.handle(), data, hash, label)
        .map_err(|_| Error::Operation)
}
