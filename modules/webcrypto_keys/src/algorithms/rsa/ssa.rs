// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use crate::{
    algorithms::{require_key_type, sha::digest},
    error::{Error, Result},
    key::{Key, KeyType},
    provider::CryptoProvider,
    CRYPTO_PROVIDER,
};

pub fn sign(key: &Key, data: &[u8]) -> Result<Vec<u8>> {
    require_key_type(key, KeyType::Private)?;
    let hash = key.algorithm().hash().ok_or(Error::Unexpected)?;

    let digest = digest(hash, data);
    Ok(CRYPTO_PROVIDER.rsa_pkcs1v15_sign(key.handle(), &digest, hash)?)
}

pub fn verify(key: &Key, signature: &[u8], data: &[u8]) -> Result<bool> {
    require_key_type(key, KeyType::Public)?;
    let hash = key.algorithm().hash().ok_or(Error::Unexpected)?;

    let digest = digest(hash, data);
    Ok(CRYPTO_PROVIDER.rsa_pkcs1v15_verify(key.handle(), signature, &digest, hash)?)
}
