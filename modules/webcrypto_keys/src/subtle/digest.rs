// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use tracing::{debug, trace};

use crate::{
    algorithm::{Algorithm, AlgorithmId},
    algorithms::get_implementation,
    error::{Error, Result},
    provider::{CryptoProvider, DefaultProvider, SimpleDigest},
    sha_hash::ShaAlgorithm,
    CRYPTO_PROVIDER,
};

pub fn digest(algorithm: &Algorithm, data: &[u8]) -> Result<Vec<u8>> {
    trace!("digest {} bytes with {}", data.len(), algorithm.id);
    get_implementation(algorithm.id)?.digest(algorithm, data)
}

/// A digest computed over data handed in piece by piece.
pub struct Digestor {
    inner: <DefaultProvider as CryptoProvider>::Digest,
}

impl Digestor {
    pub fn consume(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    pub fn finish(self) -> Vec<u8> {
        self.inner.finalize()
    }
}

pub fn create_digestor(id: AlgorithmId) -> Result<Digestor> {
    let Some(hash) = ShaAlgorithm::from_algorithm_id(id) else {
        debug!("{} is not a digest algorithm", id);
        return Err(Error::Unsupported);
    };
    Ok(Digestor {
        inner: CRYPTO_PROVIDER.digest(hash),
    })
}
