// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use crate::algorithm::AlgorithmId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaAlgorithm {
    SHA1,
    SHA256,
    SHA384,
    SHA512,
}

impl ShaAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShaAlgorithm::SHA1 => "SHA-1",
            ShaAlgorithm::SHA256 => "SHA-256",
            ShaAlgorithm::SHA384 => "SHA-384",
            ShaAlgorithm::SHA512 => "SHA-512",
        }
    }

    /// Suffix used by JWK `alg` names, e.g. the `256` of `HS256`.
    pub fn as_numeric_str(&self) -> &'static str {
        match self {
            ShaAlgorithm::SHA1 => "1",
            ShaAlgorithm::SHA256 => "256",
            ShaAlgorithm::SHA384 => "384",
            ShaAlgorithm::SHA512 => "512",
        }
    }

    pub fn digest_len(&self) -> usize {
        match self {
            ShaAlgorithm::SHA1 => 20,
            ShaAlgorithm::SHA256 => 32,
            ShaAlgorithm::SHA384 => 48,
            ShaAlgorithm::SHA512 => 64,
        }
    }

    /// Internal block size, the default length of a generated HMAC key.
    pub fn block_len_bits(&self) -> u32 {
        match self {
            ShaAlgorithm::SHA1 | ShaAlgorithm::SHA256 => 512,
            ShaAlgorithm::SHA384 | ShaAlgorithm::SHA512 => 1024,
        }
    }

    pub fn algorithm_id(&self) -> AlgorithmId {
        match self {
            ShaAlgorithm::SHA1 => AlgorithmId::Sha1,
            ShaAlgorithm::SHA256 => AlgorithmId::Sha256,
            ShaAlgorithm::SHA384 => AlgorithmId::Sha384,
            ShaAlgorithm::SHA512 => AlgorithmId::Sha512,
        }
    }

    pub fn from_algorithm_id(id: AlgorithmId) -> Option<Self> {
        match id {
            AlgorithmId::Sha1 => Some(ShaAlgorithm::SHA1),
            AlgorithmId::Sha256 => Some(ShaAlgorithm::SHA256),
            AlgorithmId::Sha384 => Some(ShaAlgorithm::SHA384),
            AlgorithmId::Sha512 => Some(ShaAlgorithm::SHA512),
            _ => None,
        }
    }
}

impl TryFrom<&str> for ShaAlgorithm {
    type Error = String;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "SHA1" | "SHA-1" => ShaAlgorithm::SHA1,
            "SHA256" | "SHA-256" => ShaAlgorithm::SHA256,
            "SHA384" | "SHA-384" => ShaAlgorithm::SHA384,
            "SHA512" | "SHA-512" => ShaAlgorithm::SHA512,
            _ => return Err(["'", s, "' not available"].concat()),
        })
    }
}
