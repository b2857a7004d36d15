// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
mod aes;
mod ec;
mod hkdf;
mod hmac;
mod pbkdf2;
mod rsa;
mod sha;

use const_oid::ObjectIdentifier;
use tracing::debug;

use crate::{
    algorithm::{Algorithm, AlgorithmId, KeyFormat},
    error::{Error, Result},
    key::{GenerateKeyResult, Key, KeyAlgorithm, KeyType},
    usage::{check_key_usages, EmptyUsages, KeyUsageAlgorithm, Usages},
    CAPABILITIES,
};

use self::{
    aes::AesImplementation, ec::EcImplementation, hkdf::HkdfImplementation,
    hmac::HmacImplementation, pbkdf2::Pbkdf2Implementation, rsa::RsaImplementation,
    sha::ShaImplementation,
};

/// The operations one algorithm family supports. Everything defaults to failing, so a family only
/// implements what it has.
///
/// Usage and algorithm id checks against the key are done by the caller; implementations check
/// key types and their own parameters.
pub trait AlgorithmImplementation: Sync {
    fn encrypt(&self, _algorithm: &Algorithm, _key: &Key, _data: &[u8]) -> Result<Vec<u8>> {
        Err(Error::Unsupported)
    }

    fn decrypt(&self, _algorithm: &Algorithm, _key: &Key, _data: &[u8]) -> Result<Vec<u8>> {
        Err(Error::Unsupported)
    }

    fn sign(&self, _algorithm: &Algorithm, _key: &Key, _data: &[u8]) -> Result<Vec<u8>> {
        Err(Error::Unsupported)
    }

    /// A signature that does not match is `Ok(false)`, not an error.
    fn verify(
        &self,
        _algorithm: &Algorithm,
        _key: &Key,
        _signature: &[u8],
        _data: &[u8],
    ) -> Result<bool> {
        Err(Error::Unsupported)
    }

    fn digest(&self, _algorithm: &Algorithm, _data: &[u8]) -> Result<Vec<u8>> {
        Err(Error::Unsupported)
    }

    fn generate_key(
        &self,
        _algorithm: &Algorithm,
        _extractable: bool,
        _usages: Usages,
    ) -> Result<GenerateKeyResult> {
        Err(Error::Unsupported)
    }

    fn derive_bits(
        &self,
        _algorithm: &Algorithm,
        _base_key: &Key,
        _length_bits: Option<u32>,
    ) -> Result<Vec<u8>> {
        Err(Error::Unsupported)
    }

    /// Length in bits of a key derived for this algorithm. `None` when the algorithm has no
    /// natural length and the derivation must supply one.
    fn get_key_length(&self, _algorithm: &Algorithm) -> Result<Option<u32>> {
        Err(Error::GetKeyLengthUnsupported)
    }

    /// Fails early when `usages` can never be valid for a key imported in `format`, before any
    /// key material is looked at.
    fn verify_key_usages_before_import_key(&self, format: KeyFormat, usages: Usages)
        -> Result<()>;

    fn import_key(
        &self,
        format: KeyFormat,
        key_data: &[u8],
        algorithm: &Algorithm,
        extractable: bool,
        usages: Usages,
    ) -> Result<Key> {
        match format {
            KeyFormat::Raw => self.import_key_raw(key_data, algorithm, extractable, usages),
            KeyFormat::Spki => self.import_key_spki(key_data, algorithm, extractable, usages),
            KeyFormat::Pkcs8 => self.import_key_pkcs8(key_data, algorithm, extractable, usages),
            KeyFormat::Jwk => self.import_key_jwk(key_data, algorithm, extractable, usages),
        }
    }

    fn import_key_raw(
        &self,
        _key_data: &[u8],
        _algorithm: &Algorithm,
        _extractable: bool,
        _usages: Usages,
    ) -> Result<Key> {
        Err(Error::UnsupportedImportKeyFormat)
    }

    fn import_key_spki(
        &self,
        _key_data: &[u8],
        _algorithm: &Algorithm,
        _extractable: bool,
        _usages: Usages,
    ) -> Result<Key> {
        Err(Error::UnsupportedImportKeyFormat)
    }

    fn import_key_pkcs8(
        &self,
        _key_data: &[u8],
        _algorithm: &Algorithm,
        _extractable: bool,
        _usages: Usages,
    ) -> Result<Key> {
        Err(Error::UnsupportedImportKeyFormat)
    }

    fn import_key_jwk(
        &self,
        _key_data: &[u8],
        _algorithm: &Algorithm,
        _extractable: bool,
        _usages: Usages,
    ) -> Result<Key> {
        Err(Error::UnsupportedImportKeyFormat)
    }

    fn export_key(&self, format: KeyFormat, key: &Key) -> Result<Vec<u8>> {
        match format {
            KeyFormat::Raw => self.export_key_raw(key),
            KeyFormat::Spki => self.export_key_spki(key),
            KeyFormat::Pkcs8 => self.export_key_pkcs8(key),
            KeyFormat::Jwk => self.export_key_jwk(key),
        }
    }

    fn export_key_raw(&self, _key: &Key) -> Result<Vec<u8>> {
        Err(Error::UnsupportedExportKeyFormat)
    }

    fn export_key_spki(&self, _key: &Key) -> Result<Vec<u8>> {
        Err(Error::UnsupportedExportKeyFormat)
    }

    fn export_key_pkcs8(&self, _key: &Key) -> Result<Vec<u8>> {
        Err(Error::UnsupportedExportKeyFormat)
    }

    fn export_key_jwk(&self, _key: &Key) -> Result<Vec<u8>> {
        Err(Error::UnsupportedExportKeyFormat)
    }

    /// Rebuilds a key from the bytes of [`Key::handle`] by importing them again in the format
    /// matching `key_type`. The result must reproduce `algorithm` exactly.
    fn deserialize_key_for_clone(
        &self,
        algorithm: &KeyAlgorithm,
        key_type: KeyType,
        extractable: bool,
        usages: Usages,
        key_data: &[u8],
    ) -> Result<Key> {
        let format = match key_type {
            KeyType::Secret => KeyFormat::Raw,
            KeyType::Public => KeyFormat::Spki,
            KeyType::Private => KeyFormat::Pkcs8,
        };
        let key = self.import_key(
            format,
            key_data,
            &algorithm.to_import_algorithm(),
            extractable,
            usages,
        )?;
        if key.key_type() != key_type || key.algorithm() != algorithm {
            debug!("Deserialized key does not match {:?}", algorithm);
            return Err(Error::Unexpected);
        }
        Ok(key)
    }
}

static AES_CBC: AesImplementation =
    AesImplementation::new(AlgorithmId::AesCbc, "CBC", KeyUsageAlgorithm::Symmetric);
static AES_CTR: AesImplementation =
    AesImplementation::new(AlgorithmId::AesCtr, "CTR", KeyUsageAlgorithm::Symmetric);
static AES_GCM: AesImplementation =
    AesImplementation::new(AlgorithmId::AesGcm, "GCM", KeyUsageAlgorithm::Symmetric);
static AES_KW: AesImplementation =
    AesImplementation::new(AlgorithmId::AesKw, "KW", KeyUsageAlgorithm::AesKw);
static HMAC: HmacImplementation = HmacImplementation;
static RSA_SSA: RsaImplementation =
    RsaImplementation::new(AlgorithmId::RsaSsaPkcs1v1_5, KeyUsageAlgorithm::Sign);
static RSA_OAEP: RsaImplementation =
    RsaImplementation::new(AlgorithmId::RsaOaep, KeyUsageAlgorithm::RsaOaep);
static ECDSA: EcImplementation = EcImplementation::new(AlgorithmId::Ecdsa, KeyUsageAlgorithm::Sign);
static ECDH: EcImplementation = EcImplementation::new(AlgorithmId::Ecdh, KeyUsageAlgorithm::Ecdh);
static HKDF: HkdfImplementation = HkdfImplementation;
static PBKDF2: Pbkdf2Implementation = Pbkdf2Implementation;
static SHA: ShaImplementation = ShaImplementation;

/// Looks up the implementation of `id`. Algorithms the loaded backend cannot run are unsupported.
pub fn get_implementation(id: AlgorithmId) -> Result<&'static dyn AlgorithmImplementation> {
    let capabilities = &*CAPABILITIES;
    let implementation: &'static dyn AlgorithmImplementation = match id {
        AlgorithmId::AesCbc => &AES_CBC,
        AlgorithmId::AesCtr if capabilities.aes_ctr => &AES_CTR,
        AlgorithmId::AesGcm if capabilities.aes_gcm => &AES_GCM,
        AlgorithmId::AesKw => &AES_KW,
        AlgorithmId::Hmac => &HMAC,
        AlgorithmId::RsaSsaPkcs1v1_5 => &RSA_SSA,
        AlgorithmId::RsaOaep if capabilities.rsa_oaep => &RSA_OAEP,
        AlgorithmId::Ecdsa => &ECDSA,
        AlgorithmId::Ecdh if capabilities.ecdh => &ECDH,
        AlgorithmId::Hkdf => &HKDF,
        AlgorithmId::Pbkdf2 => &PBKDF2,
        AlgorithmId::Sha1 | AlgorithmId::Sha256 | AlgorithmId::Sha384 | AlgorithmId::Sha512 => {
            &SHA
        },
        _ => {
            debug!("{} is not supported by the crypto backend", id);
            return Err(Error::Unsupported);
        },
    };
    Ok(implementation)
}

pub fn check_secret_key_creation_usages(all_possible: Usages, actual: Usages) -> Result<()> {
    check_key_usages(all_possible, actual, EmptyUsages::Reject)
}

pub fn check_public_key_creation_usages(all_possible: Usages, actual: Usages) -> Result<()> {
    check_key_usages(all_possible, actual, EmptyUsages::Allow)
}

pub fn check_private_key_creation_usages(all_possible: Usages, actual: Usages) -> Result<()> {
    check_key_usages(all_possible, actual, EmptyUsages::Reject)
}

/// Usage pre-check shared by the symmetric families, which import from `raw` and `jwk` only.
pub fn verify_usages_before_import_secret_key(
    format: KeyFormat,
    all_possible: Usages,
    usages: Usages,
) -> Result<()> {
    match format {
        KeyFormat::Raw | KeyFormat::Jwk => check_secret_key_creation_usages(all_possible, usages),
        KeyFormat::Spki | KeyFormat::Pkcs8 => Err(Error::UnsupportedImportKeyFormat),
    }
}

/// Usage pre-check shared by the asymmetric families. A JWK can hold either half of the pair, so
/// its usages only have to make sense for one of them here; the exact check happens once the JWK
/// has been read.
pub fn verify_usages_before_import_asymmetric_key(
    format: KeyFormat,
    usage_algorithm: KeyUsageAlgorithm,
    usages: Usages,
) -> Result<()> {
    let all_public = usage_algorithm.public_usages();
    let all_private = usage_algorithm.private_usages();
    match format {
        KeyFormat::Spki => check_public_key_creation_usages(all_public, usages),
        KeyFormat::Pkcs8 => check_private_key_creation_usages(all_private, usages),
        KeyFormat::Jwk => {
            if check_public_key_creation_usages(all_public, usages).is_err()
                && check_private_key_creation_usages(all_private, usages).is_err()
            {
                return Err(Error::CreateKeyBadUsages);
            }
            Ok(())
        },
        KeyFormat::Raw => Err(Error::UnsupportedImportKeyFormat),
    }
}

pub fn require_key_type(key: &Key, key_type: KeyType) -> Result<()> {
    if key.key_type() != key_type {
        debug!(
            "Expected a {} key, found {}",
            key_type.as_str(),
            key.key_type().as_str()
        );
        return Err(Error::UnexpectedKeyType);
    }
    Ok(())
}

/// Shortens `bytes` to `length_bits`, clearing the unused low bits of the last byte.
pub fn truncate_to_bit_length(length_bits: u32, bytes: &mut Vec<u8>) {
    bytes.truncate(length_bits.div_ceil(8) as usize);
    let remainder = length_bits % 8;
    if remainder != 0 {
        if let Some(last) = bytes.last_mut() {
            *last &= !(0xFF >> remainder);
        }
    }
}

/// Reads a big-endian unsigned integer of at most 32 significant bits.
pub fn big_integer_to_u32(bytes: &[u8]) -> Option<u32> {
    let first = bytes.iter().position(|byte| *byte != 0).unwrap_or(bytes.len());
    let significant = &bytes[first..];
    if significant.len() > 4 {
        return None;
    }
    Some(
        significant
            .iter()
            .fold(0u32, |value, byte| (value << 8) | *byte as u32),
    )
}

/// Compares without exiting early on the first differing byte.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}

/// Algorithm OID and, when present, the named curve OID of a DER SubjectPublicKeyInfo.
pub fn spki_algorithm_oids(der: &[u8]) -> Result<(ObjectIdentifier, Option<ObjectIdentifier>)> {
    let info = spki::SubjectPublicKeyInfoRef::try_from(der).map_err(|err| {
        debug!("Invalid SPKI: {}", err);
        Error::Data
    })?;
    let parameters = info.algorithm.parameters_oid().ok();
    Ok((info.algorithm.oid, parameters))
}

/// Algorithm OID and, when present, the named curve OID of a DER PKCS8 PrivateKeyInfo.
pub fn pkcs8_algorithm_oids(der: &[u8]) -> Result<(ObjectIdentifier, Option<ObjectIdentifier>)> {
    let info = pkcs8::PrivateKeyInfo::try_from(der).map_err(|err| {
        debug!("Invalid PKCS8: {}", err);
        Error::Data
    })?;
    let parameters = info.algorithm.parameters_oid().ok();
    Ok((info.algorithm.oid, parameters))
}
