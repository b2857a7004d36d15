// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
mod oaep;
mod ssa;

use const_oid::db::rfc5912::RSA_ENCRYPTION;
use tracing::debug;

use crate::{
    algorithm::{Algorithm, AlgorithmId, AlgorithmParams, KeyFormat},
    error::{Error, Result},
    jwk::{rsa_oaep_alg_name, rsa_ssa_alg_name, JwkReader, JwkWriter, KTY_RSA},
    key::{GenerateKeyResult, Key, KeyAlgorithm, KeyPair, KeyType},
    provider::{CryptoProvider, RsaImportResult, RsaJwkImport},
    sha_hash::ShaAlgorithm,
    usage::{get_usages_for_generate_asymmetric_key, KeyUsageAlgorithm, Usages},
    CRYPTO_PROVIDER,
};

use super::{
    big_integer_to_u32, check_private_key_creation_usages, check_public_key_creation_usages,
    pkcs8_algorithm_oids, require_key_type, spki_algorithm_oids,
    verify_usages_before_import_asymmetric_key, AlgorithmImplementation,
};

const MIN_MODULUS_LENGTH_BITS: u32 = 256;
const MAX_MODULUS_LENGTH_BITS: u32 = 16384;

/// RSASSA-PKCS1-v1_5 and RSA-OAEP. Both bind a hash to the key at creation time.
pub struct RsaImplementation {
    id: AlgorithmId,
    usage_algorithm: KeyUsageAlgorithm,
}

impl RsaImplementation {
    pub const fn new(id: AlgorithmId, usage_algorithm: KeyUsageAlgorithm) -> Self {
        Self {
            id,
            usage_algorithm,
        }
    }

    fn jwk_alg_name(&self, hash: ShaAlgorithm) -> String {
        match self.id {
            AlgorithmId::RsaOaep => rsa_oaep_alg_name(hash).to_string(),
            _ => rsa_ssa_alg_name(hash),
        }
    }

    fn create_key(
        &self,
        imported: RsaImportResult,
        hash: ShaAlgorithm,
        extractable: bool,
        usages: Usages,
    ) -> Key {
        let key_type = if imported.is_private {
            KeyType::Private
        } else {
            KeyType::Public
        };
        Key::new(
            key_type,
            extractable,
            KeyAlgorithm::RsaHashed {
                id: self.id,
                modulus_length_bits: imported.modulus_length,
                public_exponent: imported.public_exponent,
                hash,
            },
            usages,
            imported.key_data,
        )
    }
}

fn get_hash(algorithm: &Algorithm) -> Result<ShaAlgorithm> {
    match &algorithm.params {
        AlgorithmParams::RsaHashedImport { hash }
        | AlgorithmParams::RsaHashedKeyGen { hash, .. } => Ok(*hash),
        _ => Err(Error::Unexpected),
    }
}

/// Returns (modulus length, public exponent). Only the exponents 3 and 65537 are accepted.
fn get_key_gen_parameters(algorithm: &Algorithm) -> Result<(u32, u32)> {
    let (modulus_length_bits, public_exponent) = match &algorithm.params {
        AlgorithmParams::RsaHashedKeyGen {
            modulus_length_bits,
            public_exponent,
            ..
        } => (*modulus_length_bits, public_exponent),
        _ => return Err(Error::Unexpected),
    };

    if !(MIN_MODULUS_LENGTH_BITS..=MAX_MODULUS_LENGTH_BITS).contains(&modulus_length_bits)
        || modulus_length_bits % 8 != 0
    {
        return Err(Error::GenerateRsaUnsupportedModulus);
    }

    match big_integer_to_u32(public_exponent) {
        Some(exponent @ (3 | 65537)) => Ok((modulus_length_bits, exponent)),
        _ => Err(Error::GenerateKeyPublicExponent),
    }
}

fn minimal_big_endian(value: u32) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let first = bytes.iter().position(|byte| *byte != 0).unwrap_or(3);
    bytes[first..].to_vec()
}

impl AlgorithmImplementation for RsaImplementation {
    fn encrypt(&self, algorithm: &Algorithm, key: &Key, data: &[u8]) -> Result<Vec<u8>> {
        match self.id {
            AlgorithmId::RsaOaep => oaep::encrypt(algorithm, key, data),
            _ => Err(Error::Unsupported),
        }
    }

    fn decrypt(&self, algorithm: &Algorithm, key: &Key, data: &[u8]) -> Result<Vec<u8>> {
        match self.id {
            AlgorithmId::RsaOaep => oaep::decrypt(algorithm, key, data),
            _ => Err(Error::Unsupported),
        }
    }

    fn sign(&self, _algorithm: &Algorithm, key: &Key, data: &[u8]) -> Result<Vec<u8>> {
        match self.id {
            AlgorithmId::RsaSsaPkcs1v1_5 => ssa::sign(key, data),
            _ => Err(Error::Unsupported),
        }
    }

    fn verify(
        &self,
        _algorithm: &Algorithm,
        key: &Key,
        signature: &[u8],
        data: &[u8],
    ) -> Result<bool> {
        match self.id {
            AlgorithmId::RsaSsaPkcs1v1_5 => ssa::verify(key, signature, data),
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
        let hash = get_hash(algorithm)?;
        let (modulus_length_bits, public_exponent) = get_key_gen_parameters(algorithm)?;

        let (private_der, public_der) =
            CRYPTO_PROVIDER.generate_rsa_key(modulus_length_bits, public_exponent)?;

        let key_algorithm = KeyAlgorithm::RsaHashed {
            id: self.id,
            modulus_length_bits,
            public_exponent: minimal_big_endian(public_exponent),
            hash,
        };
        // The public half is always extractable
        Ok(GenerateKeyResult::Pair(KeyPair {
            public_key: Key::new(
                KeyType::Public,
                true,
                key_algorithm.clone(),
                public_usages,
                public_der,
            ),
            private_key: Key::new(
                KeyType::Private,
                extractable,
                key_algorithm,
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
        let hash = get_hash(algorithm)?;

        let (oid, _) = spki_algorithm_oids(key_data)?;
        if oid != RSA_ENCRYPTION {
            debug!("SPKI algorithm {} is not rsaEncryption", oid);
            return Err(Error::Data);
        }

        let imported = CRYPTO_PROVIDER.import_rsa_public_key_spki(key_data)?;
        Ok(self.create_key(imported, hash, extractable, usages))
    }

    fn import_key_pkcs8(
        &self,
        key_data: &[u8],
        algorithm: &Algorithm,
        extractable: bool,
        usages: Usages,
    ) -> Result<Key> {
        check_private_key_creation_usages(self.usage_algorithm.private_usages(), usages)?;
        let hash = get_hash(algorithm)?;

        let (oid, _) = pkcs8_algorithm_oids(key_data)?;
        if oid != RSA_ENCRYPTION {
            debug!("PKCS8 algorithm {} is not rsaEncryption", oid);
            return Err(Error::Data);
        }

        let imported = CRYPTO_PROVIDER.import_rsa_private_key_pkcs8(key_data)?;
        Ok(self.create_key(imported, hash, extractable, usages))
    }

    fn import_key_jwk(
        &self,
        key_data: &[u8],
        algorithm: &Algorithm,
        extractable: bool,
        usages: Usages,
    ) -> Result<Key> {
        let hash = get_hash(algorithm)?;
        let reader = JwkReader::new(
            key_data,
            extractable,
            usages,
            KTY_RSA,
            Some(&self.jwk_alg_name(hash)),
        )?;

        // Only private keys have "d"
        let is_private = reader.has_member("d");
        if is_private {
            check_private_key_creation_usages(self.usage_algorithm.private_usages(), usages)?;
        } else {
            check_public_key_creation_usages(self.usage_algorithm.public_usages(), usages)?;
        }

        let n = reader.get_big_integer("n")?;
        let e = reader.get_big_integer("e")?;
        if !is_private {
            let imported = CRYPTO_PROVIDER.import_rsa_jwk(RsaJwkImport {
                n: &n,
                e: &e,
                d: None,
                p: None,
                q: None,
                dp: None,
                dq: None,
                qi: None,
            })?;
            return Ok(self.create_key(imported, hash, extractable, usages));
        }

        let d = reader.get_big_integer("d")?;

        // The CRT parameters are optional in a JWK but are required here, all of them at once.
        let optional = ["p", "q", "dp", "dq", "qi"];
        if !optional.iter().all(|member| reader.has_member(member)) {
            return Err(Error::JwkIncompleteOptionalRsaPrivateKey);
        }
        let p = reader.get_big_integer("p")?;
        let q = reader.get_big_integer("q")?;
        let dp = reader.get_big_integer("dp")?;
        let dq = reader.get_big_integer("dq")?;
        let qi = reader.get_big_integer("qi")?;

        let imported = CRYPTO_PROVIDER.import_rsa_jwk(RsaJwkImport {
            n: &n,
            e: &e,
            d: Some(&d),
            p: Some(&p),
            q: Some(&q),
            dp: Some(&dp),
            dq: Some(&dq),
            qi: Some(&qi),
        })?;
        Ok(self.create_key(imported, hash, extractable, usages))
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
        let hash = key.algorithm().hash().ok_or(Error::Unexpected)?;

        let exported = CRYPTO_PROVIDER.export_rsa_jwk(key.handle(), is_private)?;

        let mut writer = JwkWriter::new(
            &self.jwk_alg_name(hash),
            key.extractable(),
            key.usages(),
            KTY_RSA,
        );
        writer.set_bytes("n", &exported.n);
        writer.set_bytes("e", &exported.e);
        for (member, value) in [
            ("d", &exported.d),
            ("p", &exported.p),
            ("q", &exported.q),
            ("dp", &exported.dp),
            ("dq", &exported.dq),
            ("qi", &exported.qi),
        ] {
            if let Some(value) = value {
                writer.set_bytes(member, value);
            }
        }
        Ok(writer.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_utils::{hex, rsa_fixture_modulus, RSA_PRIVATE_KEY_PKCS8_HEX, RSA_PUBLIC_KEY_SPKI_HEX},
        usage::KeyUsage,
    };

    static RSA_SSA_TEST: RsaImplementation =
        RsaImplementation::new(AlgorithmId::RsaSsaPkcs1v1_5, KeyUsageAlgorithm::Sign);
    static RSA_OAEP_TEST: RsaImplementation =
        RsaImplementation::new(AlgorithmId::RsaOaep, KeyUsageAlgorithm::RsaOaep);

    fn ssa_import(hash: ShaAlgorithm) -> Algorithm {
        Algorithm::rsa_hashed_import(AlgorithmId::RsaSsaPkcs1v1_5, hash)
    }

    fn import_fixture_pair(hash: ShaAlgorithm) -> (Key, Key) {
        let public_key = RSA_SSA_TEST
            .import_key_spki(
                &hex(RSA_PUBLIC_KEY_SPKI_HEX),
                &ssa_import(hash),
                true,
                KeyUsage::Verify.into(),
            )
            .unwrap();
        let private_key = RSA_SSA_TEST
            .import_key_pkcs8(
                &hex(RSA_PRIVATE_KEY_PKCS8_HEX),
                &ssa_import(hash),
                true,
                KeyUsage::Sign.into(),
            )
            .unwrap();
        (public_key, private_key)
    }

    #[test]
    fn fixture_import() {
        let (public_key, private_key) = import_fixture_pair(ShaAlgorithm::SHA1);
        assert_eq!(public_key.key_type(), KeyType::Public);
        assert_eq!(private_key.key_type(), KeyType::Private);
        assert_eq!(
            public_key.algorithm(),
            &KeyAlgorithm::RsaHashed {
                id: AlgorithmId::RsaSsaPkcs1v1_5,
                modulus_length_bits: 1024,
                public_exponent: vec![0x01, 0x00, 0x01],
                hash: ShaAlgorithm::SHA1,
            }
        );
        assert_eq!(
            RSA_SSA_TEST.export_key_spki(&public_key).unwrap(),
            hex(RSA_PUBLIC_KEY_SPKI_HEX)
        );
        assert_eq!(
            RSA_SSA_TEST.export_key_pkcs8(&private_key).unwrap(),
            hex(RSA_PRIVATE_KEY_PKCS8_HEX)
        );
        assert_eq!(
            RSA_SSA_TEST.export_key_spki(&private_key).err(),
            Some(Error::UnexpectedKeyType)
        );
        assert_eq!(
            RSA_SSA_TEST.export_key_raw(&private_key).err(),
            Some(Error::UnsupportedExportKeyFormat)
        );
    }

    #[test]
    fn rejects_wrong_key_data() {
        assert_eq!(
            RSA_SSA_TEST
                .import_key_spki(
                    &hex(RSA_PRIVATE_KEY_PKCS8_HEX),
                    &ssa_import(ShaAlgorithm::SHA1),
                    true,
                    KeyUsage::Verify.into(),
                )
                .err(),
            Some(Error::Data)
        );
        assert_eq!(
            RSA_SSA_TEST
                .import_key_pkcs8(
                    &[0x30, 0x03, 0x02, 0x01, 0x00],
                    &ssa_import(ShaAlgorithm::SHA1),
                    true,
                    KeyUsage::Sign.into(),
                )
                .err(),
            Some(Error::Data)
        );
        assert_eq!(
            RSA_SSA_TEST
                .import_key_spki(
                    &hex(RSA_PUBLIC_KEY_SPKI_HEX),
                    &ssa_import(ShaAlgorithm::SHA1),
                    true,
                    KeyUsage::Sign.into(),
                )
                .err(),
            Some(Error::CreateKeyBadUsages)
        );
    }

    #[test]
    fn jwk_round_trip() {
        let (public_key, private_key) = import_fixture_pair(ShaAlgorithm::SHA256);

        let jwk = RSA_SSA_TEST.export_key_jwk(&public_key).unwrap();
        let json = String::from_utf8(jwk.clone()).unwrap();
        assert!(json.contains(r#""alg":"RS256""#));
        assert!(json.contains(r#""e":"AQAB""#));
        assert!(!json.contains(r#""d":"#));

        let imported = RSA_SSA_TEST
            .import_key_jwk(
                &jwk,
                &ssa_import(ShaAlgorithm::SHA256),
                true,
                KeyUsage::Verify.into(),
            )
            .unwrap();
        assert_eq!(imported.handle(), public_key.handle());
        assert_eq!(imported.algorithm(), public_key.algorithm());

        let jwk = RSA_SSA_TEST.export_key_jwk(&private_key).unwrap();
        let imported = RSA_SSA_TEST
            .import_key_jwk(
                &jwk,
                &ssa_import(ShaAlgorithm::SHA256),
                true,
                KeyUsage::Sign.into(),
            )
            .unwrap();
        assert_eq!(imported.key_type(), KeyType::Private);
        assert_eq!(imported.handle(), private_key.handle());

        assert_eq!(
            RSA_SSA_TEST
                .import_key_jwk(
                    &jwk,
                    &ssa_import(ShaAlgorithm::SHA384),
                    true,
                    KeyUsage::Sign.into(),
                )
                .err(),
            Some(Error::JwkAlgorithmInconsistent)
        );
        assert_eq!(
            RSA_SSA_TEST
                .import_key_jwk(
                    &jwk,
                    &ssa_import(ShaAlgorithm::SHA256),
                    true,
                    KeyUsage::Verify.into(),
                )
                .err(),
            Some(Error::JwkKeyopsInconsistent)
        );

        let mut dict = webcrypto_json::parse_object(&jwk).unwrap();
        dict.remove("key_ops");
        let mut json = String::new();
        webcrypto_json::value::write_object(&mut json, &dict);
        assert_eq!(
            RSA_SSA_TEST
                .import_key_jwk(
                    json.as_bytes(),
                    &ssa_import(ShaAlgorithm::SHA256),
                    true,
                    KeyUsage::Verify.into(),
                )
                .err(),
            Some(Error::CreateKeyBadUsages)
        );
    }

    #[test]
    fn jwk_private_key_needs_all_or_none_of_the_crt_members() {
        let (_, private_key) = import_fixture_pair(ShaAlgorithm::SHA1);
        let jwk = RSA_SSA_TEST.export_key_jwk(&private_key).unwrap();
        let full = webcrypto_json::parse_object(&jwk).unwrap();

        let mut partial = full.clone();
        for member in ["q", "dp", "dq", "qi"] {
            partial.remove(member);
        }
        let mut json = String::new();
        webcrypto_json::value::write_object(&mut json, &partial);
        assert_eq!(
            RSA_SSA_TEST
                .import_key_jwk(
                    json.as_bytes(),
                    &ssa_import(ShaAlgorithm::SHA1),
                    true,
                    KeyUsage::Sign.into(),
                )
                .err(),
            Some(Error::JwkIncompleteOptionalRsaPrivateKey)
        );

        let mut bare = full.clone();
        for member in ["p", "q", "dp", "dq", "qi"] {
            bare.remove(member);
        }
        let mut json = String::new();
        webcrypto_json::value::write_object(&mut json, &bare);
        assert_eq!(
            RSA_SSA_TEST
                .import_key_jwk(
                    json.as_bytes(),
                    &ssa_import(ShaAlgorithm::SHA1),
                    true,
                    KeyUsage::Sign.into(),
                )
                .err(),
            Some(Error::JwkIncompleteOptionalRsaPrivateKey)
        );

        assert!(RSA_SSA_TEST
            .import_key_jwk(
                &jwk,
                &ssa_import(ShaAlgorithm::SHA1),
                true,
                KeyUsage::Sign.into(),
            )
            .is_ok());
    }

    #[test]
    fn jwk_big_integers_are_validated() {
        let modulus = rsa_fixture_modulus();
        let n = webcrypto_encoding::bytes_to_b64_url_string(&modulus);
        let import = |json: String| {
            RSA_OAEP_TEST.import_key_jwk(
                json.as_bytes(),
                &Algorithm::rsa_hashed_import(AlgorithmId::RsaOaep, ShaAlgorithm::SHA1),
                true,
                KeyUsage::Encrypt.into(),
            )
        };

        let key = import(format!(
            r#"{{"kty":"RSA","alg":"RSA-OAEP","n":"{}","e":"AQAB"}}"#,
            n
        ))
        .unwrap();
        assert_eq!(key.handle(), &hex(RSA_PUBLIC_KEY_SPKI_HEX)[..]);

        assert_eq!(
            import(format!(r#"{{"kty":"RSA","n":"{}","e":""}}"#, n)).err(),
            Some(Error::JwkEmptyBigInteger("e".into()))
        );
        assert_eq!(
            import(format!(r#"{{"kty":"RSA","n":"{}","e":"AAEAAQ"}}"#, n)).err(),
            Some(Error::JwkBigIntegerHasLeadingZero("e".into()))
        );
        assert_eq!(
            import(r#"{"kty":"RSA","e":"AQAB"}"#.to_string()).err(),
            Some(Error::JwkMemberMissing("n".into()))
        );
        assert_eq!(
            import(format!(
                r#"{{"kty":"RSA","alg":"RSA-OAEP-256","n":"{}","e":"AQAB"}}"#,
                n
            ))
            .err(),
            Some(Error::JwkAlgorithmInconsistent)
        );
    }

    #[test]
    fn key_generation_parameters() {
        let generate = |modulus_length_bits: u32, exponent: &[u8]| {
            RSA_SSA_TEST.generate_key(
                &Algorithm::rsa_hashed_key_gen(
                    AlgorithmId::RsaSsaPkcs1v1_5,
                    modulus_length_bits,
                    exponent,
                    ShaAlgorithm::SHA256,
                ),
                false,
                Usages::of(&[KeyUsage::Sign, KeyUsage::Verify]),
            )
        };

        assert_eq!(
            generate(1028, &[1, 0, 1]).err(),
            Some(Error::GenerateRsaUnsupportedModulus)
        );
        assert_eq!(
            generate(128, &[1, 0, 1]).err(),
            Some(Error::GenerateRsaUnsupportedModulus)
        );
        assert_eq!(
            generate(16392, &[1, 0, 1]).err(),
            Some(Error::GenerateRsaUnsupportedModulus)
        );
        assert_eq!(
            generate(1024, &[1, 0, 0]).err(),
            Some(Error::GenerateKeyPublicExponent)
        );
        assert_eq!(
            generate(1024, &[1, 0, 0, 0, 0, 1]).err(),
            Some(Error::GenerateKeyPublicExponent)
        );

        let pair = generate(1024, &[0, 1, 0, 1]).unwrap().into_pair().unwrap();
        assert!(pair.public_key.extractable());
        assert!(!pair.private_key.extractable());
        assert_eq!(pair.public_key.usages(), KeyUsage::Verify.into());
        assert_eq!(pair.private_key.usages(), KeyUsage::Sign.into());
        assert_eq!(
            pair.private_key.algorithm(),
            &KeyAlgorithm::RsaHashed {
                id: AlgorithmId::RsaSsaPkcs1v1_5,
                modulus_length_bits: 1024,
                public_exponent: vec![1, 0, 1],
                hash: ShaAlgorithm::SHA256,
            }
        );

        // Reimporting reproduces the same algorithm
        let reimported = RSA_SSA_TEST
            .deserialize_key_for_clone(
                pair.private_key.algorithm(),
                KeyType::Private,
                false,
                KeyUsage::Sign.into(),
                pair.private_key.handle(),
            )
            .unwrap();
        assert_eq!(reimported.algorithm(), pair.private_key.algorithm());
    }

    #[test]
    fn minimal_exponent_bytes() {
        assert_eq!(minimal_big_endian(3), vec![3]);
        assert_eq!(minimal_big_endian(65537), vec![1, 0, 1]);
        assert_eq!(minimal_big_endian(0), vec![0]);
    }
}
