// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use tracing::debug;

use crate::{
    algorithm::{Algorithm, AlgorithmId, AlgorithmParams},
    algorithms::{require_key_type, truncate_to_bit_length},
    error::{Error, Result},
    key::{Key, KeyType},
    provider::CryptoProvider,
    CRYPTO_PROVIDER,
};

/// Computes the shared secret of `base_key` and the public key in `algorithm`. Without a length
/// the whole x coordinate of the shared point is returned.
pub fn derive_bits(
    algorithm: &Algorithm,
    base_key: &Key,
    length_bits: Option<u32>,
) -> Result<Vec<u8>> {
    require_key_type(base_key, KeyType::Private)?;

    let public_key = match &algorithm.params {
        AlgorithmParams::EcdhKeyDerive { public_key } => public_key,
        _ => return Err(Error::Unexpected),
    };
    if public_key.key_type() != KeyType::Public {
        return Err(Error::EcdhPublicKeyWrongType);
    }
    if public_key.algorithm().id() != AlgorithmId::Ecdh {
        return Err(Error::EcdhPublicKeyWrongAlgorithm);
    }

    let curve = base_key.algorithm().named_curve().ok_or(Error::Unexpected)?;
    let public_curve = public_key
        .algorithm()
        .named_curve()
        .ok_or(Error::Unexpected)?;
    if curve != public_curve {
        debug!("ECDH between {} and {}", curve, public_curve);
        return Err(Error::EcdhCurveMismatch);
    }

    let field_bits = curve.coordinate_len() as u32 * 8;
    let length_bits = length_bits.unwrap_or(field_bits);
    if length_bits == 0 {
        return Ok(Vec::new());
    }
    if length_bits > field_bits {
        return Err(Error::EcdhLengthTooBig(field_bits));
    }

    let mut secret =
        CRYPTO_PROVIDER.ecdh_derive_bits(curve, base_key.handle(), public_key.handle())?;
    truncate_to_bit_length(length_bits, &mut secret);
    Ok(secret)
}
