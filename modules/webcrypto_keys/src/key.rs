// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::{fmt, sync::Arc};

use crate::{
    algorithm::{Algorithm, AlgorithmId, EllipticCurve},
    sha_hash::ShaAlgorithm,
    str_enum,
    usage::{KeyUsage, Usages},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Secret,
    Public,
    Private,
}

str_enum!(KeyType, Secret => "secret", Public => "public", Private => "private");

/// The algorithm a key was created for, with the parameters it keeps for its whole life.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Aes {
        id: AlgorithmId,
        length_bits: u32,
    },
    Hmac {
        hash: ShaAlgorithm,
        length_bits: u32,
    },
    RsaHashed {
        id: AlgorithmId,
        modulus_length_bits: u32,
        public_exponent: Vec<u8>,
        hash: ShaAlgorithm,
    },
    Ec {
        id: AlgorithmId,
        named_curve: EllipticCurve,
    },
    /// HKDF and PBKDF2 keys
    NoParams {
        id: AlgorithmId,
    },
}

impl KeyAlgorithm {
    pub fn id(&self) -> AlgorithmId {
        match self {
            KeyAlgorithm::Aes { id, .. }
            | KeyAlgorithm::RsaHashed { id, .. }
            | KeyAlgorithm::Ec { id, .. }
            | KeyAlgorithm::NoParams { id } => *id,
            KeyAlgorithm::Hmac { .. } => AlgorithmId::Hmac,
        }
    }

    pub fn hash(&self) -> Option<ShaAlgorithm> {
        match self {
            KeyAlgorithm::Hmac { hash, .. } | KeyAlgorithm::RsaHashed { hash, .. } => Some(*hash),
            _ => None,
        }
    }

    pub fn named_curve(&self) -> Option<EllipticCurve> {
        match self {
            KeyAlgorithm::Ec { named_curve, .. } => Some(*named_curve),
            _ => None,
        }
    }

    /// The descriptor that imports key material back into a key with this algorithm.
    pub fn to_import_algorithm(&self) -> Algorithm {
        match self {
            KeyAlgorithm::Aes { id, .. } | KeyAlgorithm::NoParams { id } => Algorithm::new(*id),
            KeyAlgorithm::Hmac { hash, length_bits } => {
                Algorithm::hmac_import(*hash, Some(*length_bits))
            },
            KeyAlgorithm::RsaHashed { id, hash, .. } => Algorithm::rsa_hashed_import(*id, *hash),
            KeyAlgorithm::Ec { id, named_curve } => Algorithm::ec_key(*id, *named_curve),
        }
    }
}

/// An immutable WebCrypto key.
///
/// `handle` holds the canonical serialization of the key material: the raw bytes of a secret key,
/// SPKI DER of a public key or PKCS8 DER of a private key. The backend parses it on every use, so a
/// key can be cloned and read from any thread without touching the backend.
#[derive(Clone)]
pub struct Key {
    key_type: KeyType,
    extractable: bool,
    algorithm: KeyAlgorithm,
    usages: Usages,
    handle: Arc<[u8]>,
}

impl Key {
    pub(crate) fn new(
        key_type: KeyType,
        extractable: bool,
        algorithm: KeyAlgorithm,
        usages: Usages,
        handle: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            key_type,
            extractable,
            algorithm,
            usages,
            handle: handle.into(),
        }
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn extractable(&self) -> bool {
        self.extractable
    }

    pub fn algorithm(&self) -> &KeyAlgorithm {
        &self.algorithm
    }

    pub fn usages(&self) -> Usages {
        self.usages
    }

    pub fn has_usage(&self, usage: KeyUsage) -> bool {
        self.usages.contains(usage)
    }

    pub(crate) fn handle(&self) -> &[u8] {
        &self.handle
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("key_type", &self.key_type)
            .field("extractable", &self.extractable)
            .field("algorithm", &self.algorithm)
            .field("usages", &self.usages)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct KeyPair {
    pub public_key: Key,
    pub private_key: Key,
}

#[derive(Debug, Clone)]
pub enum GenerateKeyResult {
    Secret(Key),
    Pair(KeyPair),
}

impl GenerateKeyResult {
    pub fn into_secret(self) -> Option<Key> {
        match self {
            GenerateKeyResult::Secret(key) => Some(key),
            GenerateKeyResult::Pair(_) => None,
        }
    }

    pub fn into_pair(self) -> Option<KeyPair> {
        match self {
            GenerateKeyResult::Pair(pair) => Some(pair),
            GenerateKeyResult::Secret(_) => None,
        }
    }
}
