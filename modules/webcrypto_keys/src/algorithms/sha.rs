// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use crate::{
    algorithm::{Algorithm, KeyFormat},
    error::{Error, Result},
    provider::{CryptoProvider, SimpleDigest},
    sha_hash::ShaAlgorithm,
    usage::Usages,
    CRYPTO_PROVIDER,
};

use super::AlgorithmImplementation;

pub struct ShaImplementation;

pub fn digest(hash: ShaAlgorithm, data: &[u8]) -> Vec<u8> {
    let mut digest = CRYPTO_PROVIDER.digest(hash);
    digest.update(data);
    digest.finalize()
}

impl AlgorithmImplementation for ShaImplementation {
    fn digest(&self, algorithm: &Algorithm, data: &[u8]) -> Result<Vec<u8>> {
        let hash = ShaAlgorithm::from_algorithm_id(algorithm.id).ok_or(Error::Unexpected)?;
        Ok(digest(hash, data))
    }

    fn verify_key_usages_before_import_key(
        &self,
        _format: KeyFormat,
        _usages: Usages,
    ) -> Result<()> {
        Err(Error::UnsupportedImportKeyFormat)
    }
}
