// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use tracing::trace;

use crate::{
    algorithm::Algorithm, algorithms::get_implementation, error::Result, key::Key,
    usage::KeyUsage,
};

use super::{check_key_algorithm, check_key_usage};

pub fn encrypt(algorithm: &Algorithm, key: &Key, data: &[u8]) -> Result<Vec<u8>> {
    check_key_usage(key, KeyUsage::Encrypt)?;
    encrypt_dont_check_usage(algorithm, key, data)
}

/// Encrypts with a key whose usages were checked by the caller, as wrapping does.
pub(super) fn encrypt_dont_check_usage(
    algorithm: &Algorithm,
    key: &Key,
    data: &[u8],
) -> Result<Vec<u8>> {
    check_key_algorithm(key, algorithm.id)?;
    trace!("encrypt {} bytes with {}", data.len(), algorithm.id);
    get_implementation(algorithm.id)?.encrypt(algorithm, key, data)
}
