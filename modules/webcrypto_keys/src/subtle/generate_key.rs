// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use tracing::trace;

use crate::{
    algorithm::Algorithm, algorithms::get_implementation, error::Result, key::GenerateKeyResult,
    usage::Usages,
};

/// Generates a secret key or a key pair. The public half of a pair is always extractable.
pub fn generate_key(
    algorithm: &Algorithm,
    extractable: bool,
    usages: Usages,
) -> Result<GenerateKeyResult> {
    trace!("generate {} key with usages {:?}", algorithm.id, usages);
    get_implementation(algorithm.id)?.generate_key(algorithm, extractable, usages)
}
