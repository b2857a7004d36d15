// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

mod aes_variants;

use std::num::NonZeroU32;

use aes::cipher::{
    block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher,
    StreamCipherError,
};
use aes_kw::{KekAes128, KekAes256};
use cbc::{Decryptor, Encryptor};
use ctr::Ctr128BE;
use der::{asn1::UintRef, Decode};
use ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use elliptic_curve::sec1::ToEncodedPoint;
use hmac::{Hmac as HmacImpl, Mac};
use pkcs8::{DecodePrivateKey, EncodePrivateKey};
use ring::pbkdf2;
use rsa::{
    sha2::{Digest, Sha256, Sha384, Sha512},
    traits::{PrivateKeyParts, PublicKeyParts},
    BigUint, Oaep, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey,
};
use sha1::Sha1;
use spki::{DecodePublicKey, EncodePublicKey};

use self::aes_variants::AesGcmVariant;
use super::{
    AesMode, Capabilities, CryptoError, CryptoProvider, EcImportResult, EcJwkExport,
    EcJwkImport, HmacProvider, RsaImportResult, RsaJwkExport, RsaJwkImport, SimpleDigest,
};
use crate::{algorithm::EllipticCurve, random_byte_array, sha_hash::ShaAlgorithm};

const MAX_RSA_MODULUS_BITS: u32 = 4096;

impl From<aes::cipher::InvalidLength> for CryptoError {
    fn from(_: aes::cipher::InvalidLength) -> Self {
        CryptoError::InvalidLength
    }
}

impl From<StreamCipherError> for CryptoError {
    fn from(_: StreamCipherError) -> Self {
        CryptoError::OperationFailed(Some("AES-CTR keystream exhausted".into()))
    }
}

/// Runs `$body` with `$c` bound to the RustCrypto crate implementing `$curve`.
macro_rules! with_curve {
    ($curve:expr, $c:ident => $body:expr) => {
        match $curve {
            EllipticCurve::P256 => {
                use ::p256 as $c;
                $body
            },
            EllipticCurve::P384 => {
                use ::p384 as $c;
                $body
            },
            EllipticCurve::P521 => {
                use ::p521 as $c;
                $body
            },
        }
    };
}

fn invalid_key<E>(_: E) -> CryptoError {
    CryptoError::InvalidKey(None)
}

// Digest implementation using sha1/sha2 crates
pub enum RustDigest {
    Sha1(Sha1),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
}

impl SimpleDigest for RustDigest {
    fn update(&mut self, data: &[u8]) {
        match self {
            RustDigest::Sha1(h) => Digest::update(h, data),
            RustDigest::Sha256(h) => Digest::update(h, data),
            RustDigest::Sha384(h) => Digest::update(h, data),
            RustDigest::Sha512(h) => Digest::update(h, data),
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            RustDigest::Sha1(h) => h.finalize().to_vec(),
            RustDigest::Sha256(h) => h.finalize().to_vec(),
            RustDigest::Sha384(h) => h.finalize().to_vec(),
            RustDigest::Sha512(h) => h.finalize().to_vec(),
        }
    }
}

// HMAC implementation using hmac crate
pub enum RustHmac {
    Sha1(HmacImpl<Sha1>),
    Sha256(HmacImpl<Sha256>),
    Sha384(HmacImpl<Sha384>),
    Sha512(HmacImpl<Sha512>),
}

impl HmacProvider for RustHmac {
    fn update(&mut self, data: &[u8]) {
        match self {
            RustHmac::Sha1(h) => Mac::update(h, data),
            RustHmac::Sha256(h) => Mac::update(h, data),
            RustHmac::Sha384(h) => Mac::update(h, data),
            RustHmac::Sha512(h) => Mac::update(h, data),
        }
    }

    fn finalize(self) -> Result<Vec<u8>, CryptoError> {
        Ok(match self {
            RustHmac::Sha1(h) => h.finalize().into_bytes().to_vec(),
            RustHmac::Sha256(h) => h.finalize().into_bytes().to_vec(),
            RustHmac::Sha384(h) => h.finalize().into_bytes().to_vec(),
            RustHmac::Sha512(h) => h.finalize().into_bytes().to_vec(),
        })
    }
}

/// ECDSA rejects digests shorter than half the field. Leading zeros leave the integer the
/// signature covers unchanged.
fn pad_prehash(curve: EllipticCurve, digest: &[u8]) -> Vec<u8> {
    let len = curve.coordinate_len();
    if digest.len() >= len {
        return digest.to_vec();
    }
    let mut padded = vec![0u8; len - digest.len()];
    padded.extend_from_slice(digest);
    padded
}

fn oaep_padding(hash_alg: ShaAlgorithm, label: Option<&[u8]>) -> Result<Oaep, CryptoError> {
    let label = match label {
        Some(label) if !label.is_empty() => Some(
            String::from_utf8(label.to_vec()).map_err(|_| {
                CryptoError::UnsupportedAlgorithm(Some("non UTF-8 OAEP label".into()))
            })?,
        ),
        _ => None,
    };
    Ok(match (hash_alg, label) {
        (ShaAlgorithm::SHA1, None) => Oaep::new::<Sha1>(),
        (ShaAlgorithm::SHA256, None) => Oaep::new::<Sha256>(),
        (ShaAlgorithm::SHA384, None) => Oaep::new::<Sha384>(),
        (ShaAlgorithm::SHA512, None) => Oaep::new::<Sha512>(),
        (ShaAlgorithm::SHA1, Some(label)) => Oaep::new_with_label::<Sha1, _>(label),
        (ShaAlgorithm::SHA256, Some(label)) => Oaep::new_with_label::<Sha256, _>(label),
        (ShaAlgorithm::SHA384, Some(label)) => Oaep::new_with_label::<Sha384, _>(label),
        (ShaAlgorithm::SHA512, Some(label)) => Oaep::new_with_label::<Sha512, _>(label),
    })
}

fn pkcs1v15_padding(hash_alg: ShaAlgorithm) -> Pkcs1v15Sign {
    match hash_alg {
        ShaAlgorithm::SHA1 => Pkcs1v15Sign::new::<Sha1>(),
        ShaAlgorithm::SHA256 => Pkcs1v15Sign::new::<Sha256>(),
        ShaAlgorithm::SHA384 => Pkcs1v15Sign::new::<Sha384>(),
        ShaAlgorithm::SHA512 => Pkcs1v15Sign::new::<Sha512>(),
    }
}

fn rsa_public_result(key: &RsaPublicKey) -> Result<RsaImportResult, CryptoError> {
    Ok(RsaImportResult {
        key_data: key.to_public_key_der().map_err(invalid_key)?.into_vec(),
        modulus_length: key.n().bits() as u32,
        public_exponent: key.e().to_bytes_be(),
        is_private: false,
    })
}

fn rsa_private_result(key: &RsaPrivateKey) -> Result<RsaImportResult, CryptoError> {
    key.validate()
        .map_err(|e| CryptoError::InvalidKey(Some(e.to_string().into())))?;
    Ok(RsaImportResult {
        key_data: key.to_pkcs8_der().map_err(invalid_key)?.as_bytes().to_vec(),
        modulus_length: key.n().bits() as u32,
        public_exponent: key.e().to_bytes_be(),
        is_private: true,
    })
}

fn uint_bytes(value: UintRef<'_>) -> Vec<u8> {
    value.as_bytes().to_vec()
}

#[derive(Default)]
pub struct RustCryptoProvider;

impl CryptoProvider for RustCryptoProvider {
    type Digest = RustDigest;
    type Hmac = RustHmac;

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            aes_gcm: true,
            aes_ctr: true,
            rsa_oaep: true,
            ecdh: true,
            short_gcm_tags: false,
            any_gcm_iv_length: false,
            max_rsa_modulus_bits: MAX_RSA_MODULUS_BITS,
        }
    }

    fn digest(&self, algorithm: ShaAlgorithm) -> Self::Digest {
        match algorithm {
            ShaAlgorithm::SHA1 => RustDigest::Sha1(Sha1::new()),
            ShaAlgorithm::SHA256 => RustDigest::Sha256(Sha256::new()),
            ShaAlgorithm::SHA384 => RustDigest::Sha384(Sha384::new()),
            ShaAlgorithm::SHA512 => RustDigest::Sha512(Sha512::new()),
        }
    }

    fn hmac(&self, algorithm: ShaAlgorithm, key: &[u8]) -> Result<Self::Hmac, CryptoError> {
        Ok(match algorithm {
            ShaAlgorithm::SHA1 => {
                RustHmac::Sha1(<HmacImpl<Sha1> as Mac>::new_from_slice(key)?)
            },
            ShaAlgorithm::SHA256 => {
                RustHmac::Sha256(<HmacImpl<Sha256> as Mac>::new_from_slice(key)?)
            },
            ShaAlgorithm::SHA384 => {
                RustHmac::Sha384(<HmacImpl<Sha384> as Mac>::new_from_slice(key)?)
            },
            ShaAlgorithm::SHA512 => {
                RustHmac::Sha512(<HmacImpl<Sha512> as Mac>::new_from_slice(key)?)
            },
        })
    }

    fn ecdsa_sign(
        &self,
        curve: EllipticCurve,
        private_key_pkcs8: &[u8],
        digest: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let prehash = pad_prehash(curve, digest);
        with_curve!(curve, c => {
            let secret_key = c::SecretKey::from_pkcs8_der(private_key_pkcs8).map_err(invalid_key)?;
            let signing_key =
                c::ecdsa::SigningKey::from_slice(&secret_key.to_bytes()).map_err(invalid_key)?;
            let signature: c::ecdsa::Signature = signing_key
                .sign_prehash_with_rng(&mut rand::thread_rng(), &prehash)
                .map_err(|e| CryptoError::SigningFailed(Some(e.to_string().into())))?;
            Ok(signature.to_bytes().to_vec())
        })
    }

    fn ecdsa_verify(
        &self,
        curve: EllipticCurve,
        public_key_spki: &[u8],
        signature: &[u8],
        digest: &[u8],
    ) -> Result<bool, CryptoError> {
        let prehash = pad_prehash(curve, digest);
        with_curve!(curve, c => {
            let public_key =
                c::PublicKey::from_public_key_der(public_key_spki).map_err(invalid_key)?;
            let verifying_key = c::ecdsa::VerifyingKey::from_sec1_bytes(
                public_key.to_encoded_point(false).as_bytes(),
            )
            .map_err(invalid_key)?;
            let Ok(signature) = c::ecdsa::Signature::from_slice(signature) else {
                return Ok(false);
            };
            Ok(verifying_key.verify_prehash(&prehash, &signature).is_ok())
        })
    }

    fn rsa_pkcs1v15_sign(
        &self,
        private_key_pkcs8: &[u8],
        digest: &[u8],
        hash_alg: ShaAlgorithm,
    ) -> Result<Vec<u8>, CryptoError> {
        let private_key = RsaPrivateKey::from_pkcs8_der(private_key_pkcs8).map_err(invalid_key)?;
        private_key
            .sign(pkcs1v15_padding(hash_alg), digest)
            .map_err(|e| CryptoError::SigningFailed(Some(e.to_string().into())))
    }

    fn rsa_pkcs1v15_verify(
        &self,
        public_key_spki: &[u8],
        signature: &[u8],
        digest: &[u8],
        hash_alg: ShaAlgorithm,
    ) -> Result<bool, CryptoError> {
        let public_key = RsaPublicKey::from_public_key_der(public_key_spki).map_err(invalid_key)?;
        Ok(public_key
            .verify(pkcs1v15_padding(hash_alg), digest, signature)
            .is_ok())
    }

    fn rsa_oaep_encrypt(
        &self,
        public_key_spki: &[u8],
        data: &[u8],
        hash_alg: ShaAlgorithm,
        label: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError> {
        let public_key = RsaPublicKey::from_public_key_der(public_key_spki).map_err(invalid_key)?;
        let padding = oaep_padding(hash_alg, label)?;
        public_key
            .encrypt(&mut rand::thread_rng(), padding, data)
            .map_err(|e| CryptoError::EncryptionFailed(Some(e.to_string().into())))
    }

    fn rsa_oaep_decrypt(
        &self,
        private_key_pkcs8: &[u8],
        data: &[u8],
        hash_alg: ShaAlgorithm,
        label: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError> {
        let private_key = RsaPrivateKey::from_pkcs8_der(private_key_pkcs8).map_err(invalid_key)?;
        let padding = oaep_padding(hash_alg, label)?;
        private_key
            .decrypt(padding, data)
            .map_err(|_| CryptoError::DecryptionFailed(None))
    }

    fn ecdh_derive_bits(
        &self,
        curve: EllipticCurve,
        private_key_pkcs8: &[u8],
        public_key_spki: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        with_curve!(curve, c => {
            let secret_key = c::SecretKey::from_pkcs8_der(private_key_pkcs8).map_err(invalid_key)?;
            let public_key =
                c::PublicKey::from_public_key_der(public_key_spki).map_err(invalid_key)?;
            let shared_secret = c::elliptic_curve::ecdh::diffie_hellman(
                secret_key.to_nonzero_scalar(),
                public_key.as_affine(),
            );
            Ok(shared_secret.raw_secret_bytes().to_vec())
        })
    }

    fn aes_encrypt(
        &self,
        mode: AesMode,
        key: &[u8],
        iv: &[u8],
        data: &[u8],
        additional_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError> {
        match mode {
            AesMode::Cbc => match key.len() {
                16 => {
                    let encryptor = Encryptor::<aes::Aes128>::new_from_slices(key, iv)?;
                    Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(data))
                },
                32 => {
                    let encryptor = Encryptor::<aes::Aes256>::new_from_slices(key, iv)?;
                    Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(data))
                },
                _ => Err(CryptoError::InvalidKey(None)),
            },
            AesMode::Ctr => {
                let mut output = data.to_vec();
                match key.len() {
                    16 => Ctr128BE::<aes::Aes128>::new_from_slices(key, iv)?
                        .try_apply_keystream(&mut output)?,
                    32 => Ctr128BE::<aes::Aes256>::new_from_slices(key, iv)?
                        .try_apply_keystream(&mut output)?,
                    _ => return Err(CryptoError::InvalidKey(None)),
                }
                Ok(output)
            },
            AesMode::Gcm { tag_length } => AesGcmVariant::new(key, tag_length)?.encrypt(
                iv,
                data,
                additional_data.unwrap_or_default(),
            ),
        }
    }

    fn aes_decrypt(
        &self,
        mode: AesMode,
        key: &[u8],
        iv: &[u8],
        data: &[u8],
        additional_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError> {
        match mode {
            AesMode::Cbc => match key.len() {
                16 => Decryptor::<aes::Aes128>::new_from_slices(key, iv)?
                    .decrypt_padded_vec_mut::<Pkcs7>(data)
                    .map_err(|_| CryptoError::DecryptionFailed(None)),
                32 => Decryptor::<aes::Aes256>::new_from_slices(key, iv)?
                    .decrypt_padded_vec_mut::<Pkcs7>(data)
                    .map_err(|_| CryptoError::DecryptionFailed(None)),
                _ => Err(CryptoError::InvalidKey(None)),
            },
            // CTR decryption is the same as encryption
            AesMode::Ctr => self.aes_encrypt(mode, key, iv, data, additional_data),
            AesMode::Gcm { tag_length } => AesGcmVariant::new(key, tag_length)?.decrypt(
                iv,
                data,
                additional_data.unwrap_or_default(),
            ),
        }
    }

    fn aes_kw_wrap(&self, kek: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let wrapped = match kek.len() {
            16 => KekAes128::try_from(kek).map_err(invalid_key)?.wrap_vec(key),
            32 => KekAes256::try_from(kek).map_err(invalid_key)?.wrap_vec(key),
            _ => return Err(CryptoError::InvalidKey(None)),
        };
        wrapped.map_err(|e| CryptoError::OperationFailed(Some(e.to_string().into())))
    }

    fn aes_kw_unwrap(&self, kek: &[u8], wrapped_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let unwrapped = match kek.len() {
            16 => KekAes128::try_from(kek)
                .map_err(invalid_key)?
                .unwrap_vec(wrapped_key),
            32 => KekAes256::try_from(kek)
                .map_err(invalid_key)?
                .unwrap_vec(wrapped_key),
            _ => return Err(CryptoError::InvalidKey(None)),
        };
        unwrapped.map_err(|_| CryptoError::DecryptionFailed(None))
    }

    fn hkdf_derive_key(
        &self,
        key: &[u8],
        salt: &[u8],
        info: &[u8],
        length: usize,
        hash_alg: ShaAlgorithm,
    ) -> Result<Vec<u8>, CryptoError> {
        use ring::hkdf;

        let algorithm = match hash_alg {
            ShaAlgorithm::SHA1 => hkdf::HKDF_SHA1_FOR_LEGACY_USE_ONLY,
            ShaAlgorithm::SHA256 => hkdf::HKDF_SHA256,
            ShaAlgorithm::SHA384 => hkdf::HKDF_SHA384,
            ShaAlgorithm::SHA512 => hkdf::HKDF_SHA512,
        };

        let salt = hkdf::Salt::new(algorithm, salt);
        let prk = salt.extract(key);
        let info = &[info];
        let okm = prk
            .expand(info, HkdfOutput(length))
            .map_err(|_| CryptoError::DerivationFailed(None))?;

        let mut out = vec![0u8; length];
        okm.fill(&mut out)
            .map_err(|_| CryptoError::DerivationFailed(None))?;
        Ok(out)
    }

    fn pbkdf2_derive_key(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        length: usize,
        hash_alg: ShaAlgorithm,
    ) -> Result<Vec<u8>, CryptoError> {
        let algorithm = match hash_alg {
            ShaAlgorithm::SHA1 => pbkdf2::PBKDF2_HMAC_SHA1,
            ShaAlgorithm::SHA256 => pbkdf2::PBKDF2_HMAC_SHA256,
            ShaAlgorithm::SHA384 => pbkdf2::PBKDF2_HMAC_SHA384,
            ShaAlgorithm::SHA512 => pbkdf2::PBKDF2_HMAC_SHA512,
        };

        let mut out = vec![0; length];
        let iterations = NonZeroU32::new(iterations).ok_or(CryptoError::InvalidData(None))?;
        pbkdf2::derive(algorithm, iterations, salt, password, &mut out);
        Ok(out)
    }

    fn generate_aes_key(&self, length_bits: u16) -> Result<Vec<u8>, CryptoError> {
        if !matches!(length_bits, 128 | 256) {
            return Err(CryptoError::InvalidLength);
        }
        Ok(random_byte_array(length_bits as usize / 8))
    }

    fn generate_hmac_key(&self, length_bits: u32) -> Result<Vec<u8>, CryptoError> {
        Ok(random_byte_array(length_bits.div_ceil(8) as usize))
    }

    fn generate_ec_key(&self, curve: EllipticCurve) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
        with_curve!(curve, c => {
            let secret_key = c::SecretKey::random(&mut rand::thread_rng());
            let private_key = secret_key
                .to_pkcs8_der()
                .map_err(|_| CryptoError::OperationFailed(None))?;
            let public_key = secret_key
                .public_key()
                .to_public_key_der()
                .map_err(|_| CryptoError::OperationFailed(None))?;
            Ok((private_key.as_bytes().to_vec(), public_key.into_vec()))
        })
    }

    fn generate_rsa_key(
        &self,
        modulus_length: u32,
        public_exponent: u32,
    ) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
        if modulus_length > MAX_RSA_MODULUS_BITS {
            return Err(CryptoError::UnsupportedAlgorithm(Some(
                "RSA modulus larger than 4096 bits".into(),
            )));
        }
        let exponent = BigUint::from(public_exponent);
        let private_key =
            RsaPrivateKey::new_with_exp(&mut rand::thread_rng(), modulus_length as usize, &exponent)
                .map_err(|e| CryptoError::OperationFailed(Some(e.to_string().into())))?;

        let public_key = private_key
            .to_public_key()
            .to_public_key_der()
            .map_err(|_| CryptoError::OperationFailed(None))?;
        let private_key = private_key
            .to_pkcs8_der()
            .map_err(|_| CryptoError::OperationFailed(None))?;

        Ok((private_key.as_bytes().to_vec(), public_key.into_vec()))
    }

    fn import_rsa_public_key_spki(&self, der: &[u8]) -> Result<RsaImportResult, CryptoError> {
        let public_key = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| CryptoError::InvalidKey(Some(e.to_string().into())))?;
        rsa_public_result(&public_key)
    }

    fn import_rsa_private_key_pkcs8(&self, der: &[u8]) -> Result<RsaImportResult, CryptoError> {
        let private_key = RsaPrivateKey::from_pkcs8_der(der)
            .map_err(|e| CryptoError::InvalidKey(Some(e.to_string().into())))?;
        rsa_private_result(&private_key)
    }

    fn import_rsa_jwk(&self, jwk: RsaJwkImport<'_>) -> Result<RsaImportResult, CryptoError> {
        let n = BigUint::from_bytes_be(jwk.n);
        let e = BigUint::from_bytes_be(jwk.e);

        let Some(d) = jwk.d else {
            let public_key = RsaPublicKey::new(n, e)
                .map_err(|e| CryptoError::InvalidKey(Some(e.to_string().into())))?;
            return rsa_public_result(&public_key);
        };

        let (Some(p), Some(q), Some(dp), Some(dq), Some(qi)) =
            (jwk.p, jwk.q, jwk.dp, jwk.dq, jwk.qi)
        else {
            return Err(CryptoError::InvalidKey(Some(
                "RSA private key is missing CRT parameters".into(),
            )));
        };
        let p = BigUint::from_bytes_be(p);
        let q = BigUint::from_bytes_be(q);
        let private_key = RsaPrivateKey::from_components(
            n,
            e,
            BigUint::from_bytes_be(d),
            vec![p.clone(), q.clone()],
        )
        .map_err(|e| CryptoError::InvalidKey(Some(e.to_string().into())))?;

        let dp_matches = private_key.dp() == Some(&BigUint::from_bytes_be(dp));
        let dq_matches = private_key.dq() == Some(&BigUint::from_bytes_be(dq));
        let qi_matches = (BigUint::from_bytes_be(qi) * &q) % &p == BigUint::from(1u8);
        if !(dp_matches && dq_matches && qi_matches) {
            return Err(CryptoError::InvalidKey(Some(
                "RSA CRT parameters are inconsistent".into(),
            )));
        }
        rsa_private_result(&private_key)
    }

    fn export_rsa_jwk(
        &self,
        key_data: &[u8],
        is_private: bool,
    ) -> Result<RsaJwkExport, CryptoError> {
        if is_private {
            let pk_info = pkcs8::PrivateKeyInfo::try_from(key_data).map_err(invalid_key)?;
            let key =
                rsa::pkcs1::RsaPrivateKey::from_der(pk_info.private_key).map_err(invalid_key)?;
            Ok(RsaJwkExport {
                n: uint_bytes(key.modulus),
                e: uint_bytes(key.public_exponent),
                d: Some(uint_bytes(key.private_exponent)),
                p: Some(uint_bytes(key.prime1)),
                q: Some(uint_bytes(key.prime2)),
                dp: Some(uint_bytes(key.exponent1)),
                dq: Some(uint_bytes(key.exponent2)),
                qi: Some(uint_bytes(key.coefficient)),
            })
        } else {
            let spki = spki::SubjectPublicKeyInfoRef::try_from(key_data).map_err(invalid_key)?;
            let key = rsa::pkcs1::RsaPublicKey::from_der(spki.subject_public_key.raw_bytes())
                .map_err(invalid_key)?;
            Ok(RsaJwkExport {
                n: uint_bytes(key.modulus),
                e: uint_bytes(key.public_exponent),
                d: None,
                p: None,
                q: None,
                dp: None,
                dq: None,
                qi: None,
            })
        }
    }

    fn import_ec_public_key_spki(
        &self,
        der: &[u8],
        curve: EllipticCurve,
    ) -> Result<Vec<u8>, CryptoError> {
        with_curve!(curve, c => {
            let public_key = c::PublicKey::from_public_key_der(der)
                .map_err(|e| CryptoError::InvalidKey(Some(e.to_string().into())))?;
            Ok(public_key.to_public_key_der().map_err(invalid_key)?.into_vec())
        })
    }

    fn import_ec_private_key_pkcs8(
        &self,
        der: &[u8],
        curve: EllipticCurve,
    ) -> Result<Vec<u8>, CryptoError> {
        with_curve!(curve, c => {
            let secret_key = c::SecretKey::from_pkcs8_der(der)
                .map_err(|e| CryptoError::InvalidKey(Some(e.to_string().into())))?;
            Ok(secret_key.to_pkcs8_der().map_err(invalid_key)?.as_bytes().to_vec())
        })
    }

    fn import_ec_jwk(
        &self,
        jwk: EcJwkImport<'_>,
        curve: EllipticCurve,
    ) -> Result<EcImportResult, CryptoError> {
        let mut point = Vec::with_capacity(1 + jwk.x.len() + jwk.y.len());
        point.push(0x04);
        point.extend_from_slice(jwk.x);
        point.extend_from_slice(jwk.y);

        with_curve!(curve, c => {
            let public_key = c::PublicKey::from_sec1_bytes(&point).map_err(|_| {
                CryptoError::InvalidKey(Some("point is not on the curve".into()))
            })?;
            match jwk.d {
                Some(d) => {
                    let secret_key = c::SecretKey::from_slice(d).map_err(invalid_key)?;
                    if secret_key.public_key() != public_key {
                        return Err(CryptoError::InvalidKey(Some(
                            "private key does not match public point".into(),
                        )));
                    }
                    Ok(EcImportResult {
                        key_data: secret_key
                            .to_pkcs8_der()
                            .map_err(invalid_key)?
                            .as_bytes()
                            .to_vec(),
                        is_private: true,
                    })
                },
                None => Ok(EcImportResult {
                    key_data: public_key.to_public_key_der().map_err(invalid_key)?.into_vec(),
                    is_private: false,
                }),
            }
        })
    }

    fn export_ec_jwk(
        &self,
        key_data: &[u8],
        curve: EllipticCurve,
        is_private: bool,
    ) -> Result<EcJwkExport, CryptoError> {
        with_curve!(curve, c => {
            let (public_key, d) = if is_private {
                let secret_key = c::SecretKey::from_pkcs8_der(key_data).map_err(invalid_key)?;
                (secret_key.public_key(), Some(secret_key.to_bytes().to_vec()))
            } else {
                (c::PublicKey::from_public_key_der(key_data).map_err(invalid_key)?, None)
            };
            let point = public_key.to_encoded_point(false);
            let x = point.x().ok_or(CryptoError::InvalidKey(None))?.to_vec();
            let y = point.y().ok_or(CryptoError::InvalidKey(None))?.to_vec();
            Ok(EcJwkExport { x, y, d })
        })
    }
}

// Helper struct for HKDF output length
struct HkdfOutput(usize);

impl ring::hkdf::KeyType for HkdfOutput {
    fn len(&self) -> usize {
        self.0
    }
}
