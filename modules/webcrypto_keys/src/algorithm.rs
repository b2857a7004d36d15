// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use crate::{
    error::{Error, Result},
    key::Key,
    sha_hash::ShaAlgorithm,
    str_enum,
};

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    AesCbc,
    AesCtr,
    AesGcm,
    AesKw,
    Hmac,
    RsaSsaPkcs1v1_5,
    RsaOaep,
    Ecdsa,
    Ecdh,
    Hkdf,
    Pbkdf2,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

str_enum!(
    AlgorithmId,
    AesCbc => "AES-CBC",
    AesCtr => "AES-CTR",
    AesGcm => "AES-GCM",
    AesKw => "AES-KW",
    Hmac => "HMAC",
    RsaSsaPkcs1v1_5 => "RSASSA-PKCS1-v1_5",
    RsaOaep => "RSA-OAEP",
    Ecdsa => "ECDSA",
    Ecdh => "ECDH",
    Hkdf => "HKDF",
    Pbkdf2 => "PBKDF2",
    Sha1 => "SHA-1",
    Sha256 => "SHA-256",
    Sha384 => "SHA-384",
    Sha512 => "SHA-512"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EllipticCurve {
    P256,
    P384,
    P521,
}

str_enum!(EllipticCurve, P256 => "P-256", P384 => "P-384", P521 => "P-521");

impl EllipticCurve {
    /// Byte length of a field element (and of the group order), the width of JWK `x`, `y` and `d`
    /// and of each half of an ECDSA signature.
    pub fn coordinate_len(&self) -> usize {
        match self {
            EllipticCurve::P256 => 32,
            EllipticCurve::P384 => 48,
            EllipticCurve::P521 => 66,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    Raw,
    Spki,
    Pkcs8,
    Jwk,
}

str_enum!(KeyFormat, Raw => "raw", Spki => "spki", Pkcs8 => "pkcs8", Jwk => "jwk");

/// Per-operation parameters of an [`Algorithm`].
#[derive(Debug, Clone)]
pub enum AlgorithmParams {
    None,
    AesCbc {
        iv: Vec<u8>,
    },
    AesCtr {
        counter: Vec<u8>,
        length: u32,
    },
    AesGcm {
        iv: Vec<u8>,
        additional_data: Option<Vec<u8>>,
        tag_length_bits: Option<u32>,
    },
    AesKeyGen {
        length_bits: u32,
    },
    HmacImport {
        hash: ShaAlgorithm,
        length_bits: Option<u32>,
    },
    HmacKeyGen {
        hash: ShaAlgorithm,
        length_bits: Option<u32>,
    },
    RsaHashedImport {
        hash: ShaAlgorithm,
    },
    RsaHashedKeyGen {
        modulus_length_bits: u32,
        public_exponent: Vec<u8>,
        hash: ShaAlgorithm,
    },
    RsaOaep {
        label: Option<Vec<u8>>,
    },
    EcKey {
        named_curve: EllipticCurve,
    },
    Ecdsa {
        hash: ShaAlgorithm,
    },
    EcdhKeyDerive {
        public_key: Key,
    },
    Hkdf {
        hash: ShaAlgorithm,
        salt: Vec<u8>,
        info: Vec<u8>,
    },
    Pbkdf2 {
        hash: ShaAlgorithm,
        salt: Vec<u8>,
        iterations: u32,
    },
}

/// An algorithm descriptor as passed to an operation: the id plus whatever that operation needs.
#[derive(Debug, Clone)]
pub struct Algorithm {
    pub id: AlgorithmId,
    pub params: AlgorithmParams,
}

impl Algorithm {
    pub fn new(id: AlgorithmId) -> Self {
        Self {
            id,
            params: AlgorithmParams::None,
        }
    }

    pub fn digest(hash: ShaAlgorithm) -> Self {
        Self::new(hash.algorithm_id())
    }

    pub fn aes_cbc(iv: &[u8]) -> Self {
        Self {
            id: AlgorithmId::AesCbc,
            params: AlgorithmParams::AesCbc { iv: iv.to_vec() },
        }
    }

    pub fn aes_ctr(counter: &[u8], length: u32) -> Self {
        Self {
            id: AlgorithmId::AesCtr,
            params: AlgorithmParams::AesCtr {
                counter: counter.to_vec(),
                length,
            },
        }
    }

    pub fn aes_gcm(
        iv: &[u8],
        additional_data: Option<&[u8]>,
        tag_length_bits: Option<u32>,
    ) -> Self {
        Self {
            id: AlgorithmId::AesGcm,
            params: AlgorithmParams::AesGcm {
                iv: iv.to_vec(),
                additional_data: additional_data.map(|data| data.to_vec()),
                tag_length_bits,
            },
        }
    }

    pub fn aes_key_gen(id: AlgorithmId, length_bits: u32) -> Self {
        Self {
            id,
            params: AlgorithmParams::AesKeyGen { length_bits },
        }
    }

    pub fn hmac_import(hash: ShaAlgorithm, length_bits: Option<u32>) -> Self {
        Self {
            id: AlgorithmId::Hmac,
            params: AlgorithmParams::HmacImport { hash, length_bits },
        }
    }

    pub fn hmac_key_gen(hash: ShaAlgorithm, length_bits: Option<u32>) -> Self {
        Self {
            id: AlgorithmId::Hmac,
            params: AlgorithmParams::HmacKeyGen { hash, length_bits },
        }
    }

    pub fn rsa_hashed_import(id: AlgorithmId, hash: ShaAlgorithm) -> Self {
        Self {
            id,
            params: AlgorithmParams::RsaHashedImport { hash },
        }
    }

    pub fn rsa_hashed_key_gen(
        id: AlgorithmId,
        modulus_length_bits: u32,
        public_exponent: &[u8],
        hash: ShaAlgorithm,
    ) -> Self {
        Self {
            id,
            params: AlgorithmParams::RsaHashedKeyGen {
                modulus_length_bits,
                public_exponent: public_exponent.to_vec(),
                hash,
            },
        }
    }

    pub fn rsa_oaep(label: Option<&[u8]>) -> Self {
        Self {
            id: AlgorithmId::RsaOaep,
            params: AlgorithmParams::RsaOaep {
                label: label.map(|label| label.to_vec()),
            },
        }
    }

    pub fn ec_key(id: AlgorithmId, named_curve: EllipticCurve) -> Self {
        Self {
            id,
            params: AlgorithmParams::EcKey { named_curve },
        }
    }

    pub fn ecdsa(hash: ShaAlgorithm) -> Self {
        Self {
            id: AlgorithmId::Ecdsa,
            params: AlgorithmParams::Ecdsa { hash },
        }
    }

    pub fn ecdh(public_key: Key) -> Self {
        Self {
            id: AlgorithmId::Ecdh,
            params: AlgorithmParams::EcdhKeyDerive { public_key },
        }
    }

    pub fn hkdf(hash: ShaAlgorithm, salt: &[u8], info: &[u8]) -> Self {
        Self {
            id: AlgorithmId::Hkdf,
            params: AlgorithmParams::Hkdf {
                hash,
                salt: salt.to_vec(),
                info: info.to_vec(),
            },
        }
    }

    pub fn pbkdf2(hash: ShaAlgorithm, salt: &[u8], iterations: u32) -> Self {
        Self {
            id: AlgorithmId::Pbkdf2,
            params: AlgorithmParams::Pbkdf2 {
                hash,
                salt: salt.to_vec(),
                iterations,
            },
        }
    }

    /// Hash carried by the parameters, for the variants that have one.
    pub fn hash(&self) -> Option<ShaAlgorithm> {
        match &self.params {
            AlgorithmParams::HmacImport { hash, .. }
            | AlgorithmParams::HmacKeyGen { hash, .. }
            | AlgorithmParams::RsaHashedImport { hash }
            | AlgorithmParams::RsaHashedKeyGen { hash, .. }
            | AlgorithmParams::Ecdsa { hash }
            | AlgorithmParams::Hkdf { hash, .. }
            | AlgorithmParams::Pbkdf2 { hash, .. } => Some(*hash),
            _ => None,
        }
    }

    pub fn named_curve(&self) -> Result<EllipticCurve> {
        match &self.params {
            AlgorithmParams::EcKey { named_curve } => Ok(*named_curve),
            _ => Err(Error::Unexpected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_names() {
        assert_eq!(AlgorithmId::RsaSsaPkcs1v1_5.as_str(), "RSASSA-PKCS1-v1_5");
        assert_eq!(
            AlgorithmId::try_from("rsassa-pkcs1-v1_5"),
            Ok(AlgorithmId::RsaSsaPkcs1v1_5)
        );
        assert_eq!(AlgorithmId::try_from("aes-gcm"), Ok(AlgorithmId::AesGcm));
        assert!(AlgorithmId::try_from("AES-XTS").is_err());
        assert_eq!(EllipticCurve::try_from("p-384"), Ok(EllipticCurve::P384));
        assert_eq!(KeyFormat::Pkcs8.to_string(), "pkcs8");
    }

    #[test]
    fn params_accessors() {
        assert_eq!(
            Algorithm::hmac_import(ShaAlgorithm::SHA384, None).hash(),
            Some(ShaAlgorithm::SHA384)
        );
        assert_eq!(Algorithm::aes_cbc(&[0; 16]).hash(), None);
        assert_eq!(
            Algorithm::ec_key(AlgorithmId::Ecdsa, EllipticCurve::P521).named_curve(),
            Ok(EllipticCurve::P521)
        );
        assert_eq!(
            Algorithm::new(AlgorithmId::Ecdsa).named_curve(),
            Err(Error::Unexpected)
        );
        assert_eq!(EllipticCurve::P521.coordinate_len(), 66);
    }
}
