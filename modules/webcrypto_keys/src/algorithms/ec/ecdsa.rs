// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use crate::{
    algorithm::{Algorithm, AlgorithmParams},
    algorithms::{require_key_type, sha::digest},
    error::{Error, Result},
    key::{Key, KeyType},
    provider::CryptoProvider,
    sha_hash::ShaAlgorithm,
    CRYPTO_PROVIDER,
};

fn get_hash(algorithm: &Algorithm) -> Result<ShaAlgorithm> {
    match &algorithm.params {
        AlgorithmParams::Ecdsa { hash } => Ok(*hash),
        _ => Err(Error::Unexpected),
    }
}

/// Signs the digest of `data`. The signature is `r || s`, each padded to the curve's
/// coordinate length.
pub fn sign(algorithm: &Algorithm, key: &Key, data: &[u8]) -> Result<Vec<u8>> {
    require_key_type(key, KeyType::Private)?;
    let hash = get_hash(algorithm)?;
    let curve = key.algorithm().named_curve().ok_or(Error::Unexpected)?;

    let digest = digest(hash, data);
    Ok(CRYPTO_PROVIDER.ecdsa_sign(curve, key.handle(), &digest)?)
}

pub fn verify(algorithm: &Algorithm, key: &Key, signature: &[u8], data: &[u8]) -> Result<bool> {
    require_key_type(key, KeyType::Public)?;
    let hash = get_hash(algorithm)?;
    let curve = key.algorithm().named_curve().ok_or(Error::Unexpected)?;

    if signature.len() != curve.coordinate_len() * 2 {
        return Ok(false);
    }

    let digest = digest(hash, data);
    Ok(CRYPTO_PROVIDER.ecdsa_verify(curve, key.handle(), signature, &digest)?)
}
