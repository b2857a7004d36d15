// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use tracing::debug;

use crate::{
    algorithm::{Algorithm, AlgorithmParams},
    error::{Error, Result},
    provider::{AesMode, CryptoProvider},
    CRYPTO_PROVIDER,
};

const BLOCK_SIZE: usize = 16;

#[derive(Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

pub fn encrypt(algorithm: &Algorithm, raw_key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    encrypt_decrypt(Direction::Encrypt, algorithm, raw_key, data)
}

pub fn decrypt(algorithm: &Algorithm, raw_key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    encrypt_decrypt(Direction::Decrypt, algorithm, raw_key, data)
}

fn run(direction: Direction, raw_key: &[u8], counter: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let provider = &*CRYPTO_PROVIDER;
    let result = match direction {
        Direction::Encrypt => provider.aes_encrypt(AesMode::Ctr, raw_key, counter, data, None),
        Direction::Decrypt => provider.aes_decrypt(AesMode::Ctr, raw_key, counter, data, None),
    };
    Ok(result?)
}

/// Only the low `length` bits of the counter block count. The backend always increments all 128
/// bits, so input that makes the counter wrap is processed in two parts, the second one starting
/// from the counter with its low `length` bits cleared.
fn encrypt_decrypt(
    direction: Direction,
    algorithm: &Algorithm,
    raw_key: &[u8],
    data: &[u8],
) -> Result<Vec<u8>> {
    let (counter, length) = match &algorithm.params {
        AlgorithmParams::AesCtr { counter, length } => (counter, *length),
        _ => return Err(Error::Unexpected),
    };
    let counter: [u8; BLOCK_SIZE] = counter
        .as_slice()
        .try_into()
        .map_err(|_| Error::IncorrectSizeAesCtrCounter)?;
    if length == 0 || length > 128 {
        return Err(Error::InvalidAesCtrCounterLength);
    }
    if data.len() > i32::MAX as usize {
        return Err(Error::DataTooLarge);
    }

    let mask = if length == 128 {
        u128::MAX
    } else {
        (1u128 << length) - 1
    };
    let num_blocks = data.len().div_ceil(BLOCK_SIZE) as u128;

    // There are 2^length distinct counter values
    if length < 128 && num_blocks > mask + 1 {
        debug!("AES-CTR input of {} blocks repeats the counter", num_blocks);
        return Err(Error::AesCtrInputTooLongCounterRepeated);
    }

    let counter_value = u128::from_be_bytes(counter);
    let current = counter_value & mask;
    // None when the full 128-bit counter starts at zero and can never wrap for this input
    let blocks_until_wrap = (mask - current).checked_add(1);

    match blocks_until_wrap {
        Some(remaining) if remaining < num_blocks => {
            let split = (remaining as usize) * BLOCK_SIZE;
            let mut output = run(direction, raw_key, &counter, &data[..split])?;
            let wrapped_counter = (counter_value & !mask).to_be_bytes();
            output.extend(run(direction, raw_key, &wrapped_counter, &data[split..])?);
            Ok(output)
        },
        _ => run(direction, raw_key, &counter, data),
    }
}
