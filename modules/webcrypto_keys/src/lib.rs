// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

// Compile-time checks for conflicting crypto features
#[cfg(all(feature = "crypto-rust", feature = "crypto-openssl"))]
compile_error!("Features `crypto-rust` and `crypto-openssl` are mutually exclusive");

#[cfg(not(any(feature = "crypto-rust", feature = "crypto-openssl")))]
compile_error!("One of the features `crypto-rust` or `crypto-openssl` must be enabled");

mod macros;

pub mod algorithm;
mod algorithms;
pub mod error;
pub mod jwk;
pub mod key;
pub mod provider;
pub mod sha_hash;
mod subtle;
pub mod usage;

#[cfg(test)]
mod test_utils;

use once_cell::sync::Lazy;
use rand::Rng;

use provider::{Capabilities, CryptoProvider, DefaultProvider};

pub use algorithm::{Algorithm, AlgorithmId, AlgorithmParams, EllipticCurve, KeyFormat};
pub use error::{Error, ErrorType, Result};
pub use key::{GenerateKeyResult, Key, KeyAlgorithm, KeyPair, KeyType};
pub use sha_hash::ShaAlgorithm;
pub use subtle::{
    create_digestor, decrypt, derive_bits, derive_key, deserialize_key_for_clone, digest, encrypt,
    export_key, generate_key, import_key, serialize_key_for_clone, sign, unwrap_key, verify,
    wrap_key, Digestor,
};
pub use usage::{KeyUsage, Usages};

pub(crate) static CRYPTO_PROVIDER: Lazy<DefaultProvider> = Lazy::new(|| {
    let provider = DefaultProvider {};
    provider.init();
    provider
});

/// What the compiled backend supports. Algorithms it lacks fail with [`Error::Unsupported`].
pub static CAPABILITIES: Lazy<Capabilities> = Lazy::new(|| CRYPTO_PROVIDER.capabilities());

/// Loads the backend. Optional, the first operation does it otherwise.
pub fn init() {
    Lazy::force(&CAPABILITIES);
}

#[inline]
pub fn random_byte_array(length: usize) -> Vec<u8> {
    let mut vec = vec![0u8; length];
    rand::thread_rng().fill(&mut vec[..]);
    vec
}
