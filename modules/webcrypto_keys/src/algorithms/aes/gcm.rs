// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use tracing::debug;

use crate::{
    algorithm::{Algorithm, AlgorithmParams},
    error::{Error, Result},
    provider::{AesMode, CryptoProvider},
    CAPABILITIES, CRYPTO_PROVIDER,
};

struct GcmParams<'a> {
    iv: &'a [u8],
    additional_data: Option<&'a [u8]>,
    tag_length_bits: u8,
}

fn get_params(algorithm: &Algorithm) -> Result<GcmParams<'_>> {
    let (iv, additional_data, tag_length_bits) = match &algorithm.params {
        AlgorithmParams::AesGcm {
            iv,
            additional_data,
            tag_length_bits,
        } => (iv, additional_data, tag_length_bits.unwrap_or(128)),
        _ => return Err(Error::Unexpected),
    };

    let tag_length_bits = match tag_length_bits {
        32 | 64 | 96 | 104 | 112 | 120 | 128 => tag_length_bits as u8,
        _ => return Err(Error::InvalidAesGcmTagLength),
    };
    if iv.is_empty() {
        return Err(Error::EmptyAesGcmIv);
    }

    let capabilities = &*CAPABILITIES;
    if tag_length_bits < 96 && !capabilities.short_gcm_tags {
        debug!("{}-bit AES-GCM tags are not supported", tag_length_bits);
        return Err(Error::Unsupported);
    }
    if iv.len() != 12 && !capabilities.any_gcm_iv_length {
        debug!("{}-byte AES-GCM IVs are not supported", iv.len());
        return Err(Error::Unsupported);
    }

    Ok(GcmParams {
        iv,
        additional_data: additional_data.as_deref(),
        tag_length_bits,
    })
}

/// Returns `ciphertext || tag`.
pub fn encrypt(algorithm: &Algorithm, raw_key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let params = get_params(algorithm)?;
    let tag_len = params.tag_length_bits as usize / 8;
    if data.len() > i32::MAX as usize - tag_len {
        return Err(Error::DataTooLarge);
    }
    Ok(CRYPTO_PROVIDER.aes_encrypt(
        AesMode::Gcm {
            tag_length: params.tag_length_bits,
        },
        raw_key,
        params.iv,
        data,
        params.additional_data,
    )?)
}

/// Takes `ciphertext || tag`. Any authentication failure is a bare operation error.
pub fn decrypt(algorithm: &Algorithm, raw_key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let params = get_params(algorithm)?;
    if data.len() < params.tag_length_bits as usize / 8 {
        return Err(Error::Operation);
    }
    CRYPTO_PROVIDER
        .aes_decrypt(
            AesMode::Gcm {
                tag_length: params.tag_length_bits,
            },
            raw_key,
            params.iv,
            data,
            params.additional_data,
        )
        .map_err(|_| Error::Operation)
}
