// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
mod ecdh;
mod ecdsa;

use const_oid::{
    db::rfc5912::{ID_EC_PUBLIC_KEY, SECP_256_R_1, SECP_384_R_1, SECP_521_R_1},
    ObjectIdentifier,
};
use tracing::debug;

use crate::{
    algorithm::{Algorithm, AlgorithmId, EllipticCurve, KeyFormat},
    error::{Error, Result},
    jwk::{JwkReader, JwkWriter, KTY_EC},
    key::{GenerateKeyResult, Key, KeyAlgorithm, KeyPair, KeyType},
    provider::{CryptoProvider, EcJwkImport},
    usage::{get_usages_for_generate_asymmetric_key, KeyUsageAlgorithm, Usages},
    CRYPTO_PROVIDER,
};

use super::{
    check_private_key_creation_usages, check_public_key_creation_usages, pkcs8_algorithm_oids,
    require_key_type, spki_algorithm_oids, verify_usages_before_import_asymmetric_key,
    AlgorithmImplementation,
};

/// ECDSA and ECDH over the NIST prime curves.
pub struct EcImplementation {
    id: AlgorithmId,
    usage_algorithm: KeyUsageAlgorithm,
}

fn curve_oid(curve: EllipticCurve) -> ObjectIdentifier {
    match curve {
        EllipticCurve::P256 => SECP_256_R_1,
        EllipticCurve::P384 => SECP_384_R_1,
        EllipticCurve::P521 => SECP_521_R_1,
    }
}

/// Checks the algorithm and curve OIDs read from SPKI or PKCS8 against the requested curve.
fn verify_oids(
    (algorithm_oid, curve): (ObjectIdentifier, Option<ObjectIdentifier>),
    expected_curve: EllipticCurve,
) -> Result<()> {
    if algorithm_oid != ID_EC_PUBLIC_KEY {
        debug!("Key algorithm {} is not id-ecPublicKey", algorithm_oid);
        return Err(Error::Data);
    }
    match curve {
        Some(curve) if curve == curve_oid(expected_curve) => Ok(()),
        Some(curve) if [SECP_256_R_1, SECP_384_R_1, SECP_521_R_1].contains(&curve) => {
            Err(Error::ImportedEcKeyIncorrectCurve)
        },
        _ => Err(Error::Data),
    }
}

/// Reads a fixed-width JWK coordinate.
fn get_octet_string(reader: &JwkReader, member: &str, expected: usize) -> Result<Vec<u8>> {
    let bytes = reader.get_bytes(member)?;
    if bytes.len() != expected {
        return Err(Error::JwkOctetStringWrongLength {
            member: member.into(),
            expected,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

impl EcImplementation {
    pub const fn new(id: AlgorithmId, usage_algorithm: KeyUsageAlgorithm) -> Self {
        Self {
            id,
            usage_algorithm,
        }
    }

    /// ECDH keys have no JWK `alg`.
    fn jwk_alg_name(&self, curve: EllipticCurve) -> Option<&'static str> {
        if self.id != AlgorithmId::Ecdsa {
            return None;
        }
        Some(match curve {
            EllipticCurve::P256 => "ES256",
            EllipticCurve::P384 => "ES384",
            EllipticCurve::P521 => "ES512",
        })
    }

    fn create_key(
        &self,
        key_type: KeyType,
        curve: EllipticCurve,
        extractable: bool,
        usages: Usages,
        key_data: Vec<u8>,
    ) -> Key {
        Key::new(
            key_type,
            extractable,
            KeyAlgorithm::Ec {
                id: self.id,
                named_curve: curve,
            },
            usages,
            key_data,
        )
    }
}

impl AlgorithmImplementation for EcImplementation {
    fn sign(&self, algorithm: &Algorithm, key: &Key, data: &[u8]) -> Result<Vec<u8>> {
        match self.id {
            AlgorithmId::Ecdsa => ecdsa::sign(algorithm, key, data),
            _ => Err(Error::Unsupported),
        }
    }

    fn verify(
        &self,
        algorithm: &Algorithm,
        key: &Key,
        signature: &[u8],
        data: &[u8],
    ) -> Result<bool> {
        match self.id {
            AlgorithmId::Ecdsa => ecdsa::verify(algorithm, key, signature, data),
            _ => Err(Error::Unsupported),
        }
    }

    fn derive_bits(
        &self,
        algorithm: &Algorithm,
        base_key: &Key,
        length_bits: Option<u32>,
    ) -> Result<Vec<u8>> {
        match self.id {
            AlgorithmId::Ecdh => ecdh::derive_bits(algorithm, base_key, length_bits),
            _ => Err(Error::Unsupported),
        }
    }

    fn generate_key(
        &self,
        algorithm: &Algorithm,
        extractable: bool,
        usages: Usages,
    ) -> Result<GenerateKeyResult> {
        let (public_usages, private_usages) = get_usages_for_generate_asymmetric_key(
            usages,
            self.usage_algorithm.public_usages(),
            self.usage_algorithm.private_usages(),
        )?;
        let curve = algorithm.named_curve()?;

        let (private_der, public_der) = CRYPTO_PROVIDER.generate_ec_key(curve)?;

        Ok(GenerateKeyResult::Pair(KeyPair {
            public_key: self.create_key(KeyType::Public, curve, true, public_usages, public_der),
            private_key: self.create_key(
                KeyType::Private,
                curve,
                extractable,
                private_usages,
                private_der,
            ),
        }))
    }

    fn verify_key_usages_before_import_key(&self, format: KeyFormat, usages: Usages) -> Result<()> {
        verify_usages_before_import_asymmetric_key(format, self.usage_algorithm, usages)
    }

    fn import_key_spki(
        &self,
        key_data: &[u8],
        algorithm: &Algorithm,
        extractable: bool,
        usages: Usages,
    ) -> Result<Key> {
        check_public_key_creation_usages(self.usage_algorithm.public_usages(), usages)?;
        let curve = algorithm.named_curve()?;
        verify_oids(spki_algorithm_oids(key_data)?, curve)?;

        let der = CRYPTO_PROVIDER.import_ec_public_key_spki(key_data, curve)?;
        Ok(self.create_key(KeyType::Public, curve, extractable, usages, der))
    }

    fn import_key_pkcs8(
        &self,
        key_data: &[u8],
        algorithm: &Algorithm,
        extractable: bool,
        usages: Usages,
    ) -> Result<Key> {
        check_private_key_creation_usages(self.usage_algorithm.private_usages(), usages)?;
        let curve = algorithm.named_curve()?;
        verify_oids(pkcs8_algorithm_oids(key_data)?, curve)?;

        let der = CRYPTO_PROVIDER.import_ec_private_key_pkcs8(key_data, curve)?;
        Ok(self.create_key(KeyType::Private, curve, extractable, usages, der))
    }

    fn import_key_jwk(
        &self,
        key_data: &[u8],
        algorithm: &Algorithm,
        extractable: bool,
        usages: Usages,
    ) -> Result<Key> {
        let curve = algorithm.named_curve()?;
        let reader = JwkReader::new(
            key_data,
            extractable,
            usages,
            KTY_EC,
            self.jwk_alg_name(curve),
        )?;

        if reader.get_string("crv")? != curve.as_str() {
            return Err(Error::JwkIncorrectCrv);
        }

        // Only private keys have "d"
        let is_private = reader.has_member("d");
        if is_private {
            check_private_key_creation_usages(self.usage_algorithm.private_usages(), usages)?;
        } else {
            check_public_key_creation_usages(self.usage_algorithm.public_usages(), usages)?;
        }

        let coordinate_len = curve.coordinate_len();
        let x = get_octet_string(&reader, "x", coordinate_len)?;
        let y = get_octet_string(&reader, "y", coordinate_len)?;
        let d = if is_private {
            Some(get_octet_string(&reader, "d", coordinate_len)?)
        } else {
            None
        };

        let imported = CRYPTO_PROVIDER.import_ec_jwk(
            EcJwkImport {
                x: &x,
                y: &y,
                d: d.as_deref(),
            },
            curve,
        )?;
        let key_type = if imported.is_private {
            KeyType::Private
        } else {
            KeyType::Public
        };
        Ok(self.create_key(key_type, curve, extractable, usages, imported.key_data))
    }

    fn export_key_spki(&self, key: &Key) -> Result<Vec<u8>> {
        require_key_type(key, KeyType::Public)?;
        Ok(key.handle().to_vec())
    }

    fn export_key_pkcs8(&self, key: &Key) -> Result<Vec<u8>> {
        require_key_type(key, KeyType::Private)?;
        Ok(key.handle().to_vec())
    }

    fn export_key_jwk(&self, key: &Key) -> Result<Vec<u8>> {
        let is_private = match key.key_type() {
            KeyType::Public => false,
            KeyType::Private => true,
            KeyType::Secret => return Err(Error::UnexpectedKeyType),
        };
        let curve = key.algorithm().named_curve().ok_or(Error::Unexpected)?;

        let exported = CRYPTO_PROVIDER.export_ec_jwk(key.handle(), curve, is_private)?;

        let mut writer = JwkWriter::new(
            self.jwk_alg_name(curve).unwrap_or_default(),
            key.extractable(),
            key.usages(),
            KTY_EC,
        );
        writer.set_string("crv", curve.as_str());
        writer.set_bytes("x", &exported.x);
        writer.set_bytes("y", &exported.y);
        if let Some(d) = &exported.d {
            writer.set_bytes("d", d);
        }
        Ok(writer.to_json())
    }
}
