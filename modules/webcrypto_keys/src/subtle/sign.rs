// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use tracing::trace;

use crate::{
    algorithm::Algorithm, algorithms::get_implementation, error::Result, key::Key,
    usage::KeyUsage,
};

use super::{check_key_algorithm, check_key_usage};

pub fn sign(algorithm: &Algorithm, key: &Key, data: &[u8]) -> Result<Vec<u8>> {
    check_key_usage(key, KeyUsage::Sign)?;
    check_key_algorithm(key, algorithm.id)?;
    trace!("sign {} bytes with {}", data.len(), algorithm.id);
    get_implementation(algorithm.id)?.sign(algorithm, key, data)
}
