// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
#[cfg(feature = "crypto-openssl")]
mod openssl;
#[cfg(feature = "crypto-rust")]
mod rust;

use std::borrow::Cow;

use crate::{algorithm::EllipticCurve, sha_hash::ShaAlgorithm};

pub trait SimpleDigest {
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Vec<u8>;
}

pub trait HmacProvider {
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Result<Vec<u8>, CryptoError>;
}

/// Block cipher mode for [`CryptoProvider::aes_encrypt`] and [`CryptoProvider::aes_decrypt`].
///
/// `Ctr` always runs a full 128-bit big-endian counter; callers split the input where a shorter
/// counter would wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AesMode {
    Cbc,
    Ctr,
    /// `tag_length` in bits. Output is `ciphertext || tag`.
    Gcm { tag_length: u8 },
}

/// What the loaded backend can do. Read once through [`crate::CAPABILITIES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub aes_gcm: bool,
    pub aes_ctr: bool,
    pub rsa_oaep: bool,
    pub ecdh: bool,
    /// GCM tags of 32 and 64 bits.
    pub short_gcm_tags: bool,
    /// GCM IVs other than 96 bits.
    pub any_gcm_iv_length: bool,
    /// Largest RSA modulus the backend accepts, in bits.
    pub max_rsa_modulus_bits: u32,
}

#[derive(Debug)]
pub struct RsaImportResult {
    /// SPKI DER for a public key, PKCS8 DER for a private key
    pub key_data: Vec<u8>,
    pub modulus_length: u32,
    pub public_exponent: Vec<u8>,
    pub is_private: bool,
}

/// Big-endian integers read from an RSA JWK.
#[derive(Debug, Clone, Copy)]
pub struct RsaJwkImport<'a> {
    pub n: &'a [u8],
    pub e: &'a [u8],
    pub d: Option<&'a [u8]>,
    pub p: Option<&'a [u8]>,
    pub q: Option<&'a [u8]>,
    pub dp: Option<&'a [u8]>,
    pub dq: Option<&'a [u8]>,
    pub qi: Option<&'a [u8]>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RsaJwkExport {
    pub n: Vec<u8>,
    pub e: Vec<u8>,
    pub d: Option<Vec<u8>>,
    pub p: Option<Vec<u8>>,
    pub q: Option<Vec<u8>>,
    pub dp: Option<Vec<u8>>,
    pub dq: Option<Vec<u8>>,
    pub qi: Option<Vec<u8>>,
}

/// Fixed-width coordinates read from an EC JWK.
#[derive(Debug, Clone, Copy)]
pub struct EcJwkImport<'a> {
    pub x: &'a [u8],
    pub y: &'a [u8],
    pub d: Option<&'a [u8]>,
}

#[derive(Debug)]
pub struct EcImportResult {
    pub key_data: Vec<u8>,
    pub is_private: bool,
}

/// Coordinates zero-padded to the curve's field length.
#[derive(Debug, PartialEq, Eq)]
pub struct EcJwkExport {
    pub x: Vec<u8>,
    pub y: Vec<u8>,
    pub d: Option<Vec<u8>>,
}

/// A cryptographic backend.
///
/// Public keys go in and come out as SPKI DER and private keys as PKCS8 DER. Signing and
/// verification take a digest the caller computed with [`CryptoProvider::digest`].
pub trait CryptoProvider {
    type Digest: SimpleDigest;
    type Hmac: HmacProvider;

    /// One-time library setup. Safe to call more than once.
    fn init(&self) {}

    fn capabilities(&self) -> Capabilities;

    // Digest operations
    fn digest(&self, algorithm: ShaAlgorithm) -> Self::Digest;

    // HMAC operations
    fn hmac(&self, algorithm: ShaAlgorithm, key: &[u8]) -> Result<Self::Hmac, CryptoError>;

    // ECDSA operations, signatures are r || s
    fn ecdsa_sign(
        &self,
        curve: EllipticCurve,
        private_key_pkcs8: &[u8],
        digest: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;
    fn ecdsa_verify(
        &self,
        curve: EllipticCurve,
        public_key_spki: &[u8],
        signature: &[u8],
        digest: &[u8],
    ) -> Result<bool, CryptoError>;

    // RSA operations
    fn rsa_pkcs1v15_sign(
        &self,
        private_key_pkcs8: &[u8],
        digest: &[u8],
        hash_alg: ShaAlgorithm,
    ) -> Result<Vec<u8>, CryptoError>;
    fn rsa_pkcs1v15_verify(
        &self,
        public_key_spki: &[u8],
        signature: &[u8],
        digest: &[u8],
        hash_alg: ShaAlgorithm,
    ) -> Result<bool, CryptoError>;
    fn rsa_oaep_encrypt(
        &self,
        public_key_spki: &[u8],
        data: &[u8],
        hash_alg: ShaAlgorithm,
        label: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError>;
    fn rsa_oaep_decrypt(
        &self,
        private_key_pkcs8: &[u8],
        data: &[u8],
        hash_alg: ShaAlgorithm,
        label: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError>;

    // ECDH operations, returns the full x coordinate of the shared point
    fn ecdh_derive_bits(
        &self,
        curve: EllipticCurve,
        private_key_pkcs8: &[u8],
        public_key_spki: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    // AES operations
    fn aes_encrypt(
        &self,
        mode: AesMode,
        key: &[u8],
        iv: &[u8],
        data: &[u8],
        additional_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError>;
    fn aes_decrypt(
        &self,
        mode: AesMode,
        key: &[u8],
        iv: &[u8],
        data: &[u8],
        additional_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError>;

    // AES-KW operations (RFC 3394, default IV)
    fn aes_kw_wrap(&self, kek: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError>;
    fn aes_kw_unwrap(&self, kek: &[u8], wrapped_key: &[u8]) -> Result<Vec<u8>, CryptoError>;

    // KDF operations
    fn hkdf_derive_key(
        &self,
        key: &[u8],
        salt: &[u8],
        info: &[u8],
        length: usize,
        hash_alg: ShaAlgorithm,
    ) -> Result<Vec<u8>, CryptoError>;
    fn pbkdf2_derive_key(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        length: usize,
        hash_alg: ShaAlgorithm,
    ) -> Result<Vec<u8>, CryptoError>;

    // Key generation, pairs are returned as (private PKCS8, public SPKI)
    fn generate_aes_key(&self, length_bits: u16) -> Result<Vec<u8>, CryptoError>;
    /// Random bytes for `length_bits` rounded up to whole bytes.
    fn generate_hmac_key(&self, length_bits: u32) -> Result<Vec<u8>, CryptoError>;
    fn generate_ec_key(&self, curve: EllipticCurve) -> Result<(Vec<u8>, Vec<u8>), CryptoError>;
    fn generate_rsa_key(
        &self,
        modulus_length: u32,
        public_exponent: u32,
    ) -> Result<(Vec<u8>, Vec<u8>), CryptoError>;

    // RSA import/export. Imported keys are validated and re-encoded.
    fn import_rsa_public_key_spki(&self, der: &[u8]) -> Result<RsaImportResult, CryptoError>;
    fn import_rsa_private_key_pkcs8(&self, der: &[u8]) -> Result<RsaImportResult, CryptoError>;
    fn import_rsa_jwk(&self, jwk: RsaJwkImport<'_>) -> Result<RsaImportResult, CryptoError>;
    fn export_rsa_jwk(&self, key_data: &[u8], is_private: bool)
        -> Result<RsaJwkExport, CryptoError>;

    // EC import/export. The caller has already matched the curve OID.
    fn import_ec_public_key_spki(
        &self,
        der: &[u8],
        curve: EllipticCurve,
    ) -> Result<Vec<u8>, CryptoError>;
    fn import_ec_private_key_pkcs8(
        &self,
        der: &[u8],
        curve: EllipticCurve,
    ) -> Result<Vec<u8>, CryptoError>;
    fn import_ec_jwk(
        &self,
        jwk: EcJwkImport<'_>,
        curve: EllipticCurve,
    ) -> Result<EcImportResult, CryptoError>;
    fn export_ec_jwk(
        &self,
        key_data: &[u8],
        curve: EllipticCurve,
        is_private: bool,
    ) -> Result<EcJwkExport, CryptoError>;
}

#[derive(Debug)]
pub enum CryptoError {
    InvalidKey(Option<Cow<'static, str>>),
    InvalidData(Option<Cow<'static, str>>),
    InvalidSignature(Option<Cow<'static, str>>),
    InvalidLength,
    SigningFailed(Option<Cow<'static, str>>),
    VerificationFailed(Option<Cow<'static, str>>),
    OperationFailed(Option<Cow<'static, str>>),
    UnsupportedAlgorithm(Option<Cow<'static, str>>),
    DerivationFailed(Option<Cow<'static, str>>),
    EncryptionFailed(Option<Cow<'static, str>>),
    DecryptionFailed(Option<Cow<'static, str>>),
}

impl std::fmt::Display for CryptoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (name, detail) = match self {
            CryptoError::InvalidKey(detail) => ("Invalid key", detail),
            CryptoError::InvalidData(detail) => ("Invalid data", detail),
            CryptoError::InvalidSignature(detail) => ("Invalid signature", detail),
            CryptoError::InvalidLength => return f.write_str("Invalid length"),
            CryptoError::SigningFailed(detail) => ("Signing failed", detail),
            CryptoError::VerificationFailed(detail) => ("Verification failed", detail),
            CryptoError::OperationFailed(detail) => ("Operation failed", detail),
            CryptoError::UnsupportedAlgorithm(detail) => ("Unsupported algorithm", detail),
            CryptoError::DerivationFailed(detail) => ("Derivation failed", detail),
            CryptoError::EncryptionFailed(detail) => ("Encryption failed", detail),
            CryptoError::DecryptionFailed(detail) => ("Decryption failed", detail),
        };
        match detail {
            Some(detail) => write!(f, "{}: {}", name, detail),
            None => f.write_str(name),
        }
    }
}

impl std::error::Error for CryptoError {}

#[cfg(feature = "crypto-openssl")]
pub type DefaultProvider = openssl::OpenSslProvider;

#[cfg(feature = "crypto-rust")]
pub type DefaultProvider = rust::RustCryptoProvider;

#[cfg(test)]
mod tests {
    use webcrypto_encoding::{bytes_from_hex, bytes_to_hex_string};

    use super::*;
    use crate::test_utils::{RSA_PRIVATE_KEY_PKCS8_HEX, RSA_PUBLIC_KEY_SPKI_HEX};

    fn provider() -> impl CryptoProvider {
        #[cfg(feature = "crypto-rust")]
        return rust::RustCryptoProvider;
        #[cfg(feature = "crypto-openssl")]
        return openssl::OpenSslProvider;
    }

    fn to_hex(bytes: &[u8]) -> String {
        bytes_to_hex_string(bytes)
    }

    fn hex(s: &str) -> Vec<u8> {
        bytes_from_hex(s.as_bytes()).unwrap()
    }

    #[test]
    fn test_sha_digests() {
        let p = provider();
        let mut digest = p.digest(ShaAlgorithm::SHA256);
        digest.update(b"hello ");
        digest.update(b"world");
        assert_eq!(
            to_hex(&digest.finalize()),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );

        let mut digest = p.digest(ShaAlgorithm::SHA1);
        digest.update(b"abc");
        assert_eq!(
            to_hex(&digest.finalize()),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );

        for (hash, len) in [(ShaAlgorithm::SHA384, 48), (ShaAlgorithm::SHA512, 64)] {
            let mut digest = p.digest(hash);
            digest.update(b"hello world");
            assert_eq!(digest.finalize().len(), len);
        }
    }

    // RFC 4231 test case 2
    #[test]
    fn test_hmac_sha256() {
        let p = provider();
        let mut hmac = p.hmac(ShaAlgorithm::SHA256, b"Jefe").unwrap();
        hmac.update(b"what do ya want ");
        hmac.update(b"for nothing?");
        assert_eq!(
            to_hex(&hmac.finalize().unwrap()),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_aes_gcm_roundtrip_with_aad() {
        let p = provider();
        let key = [7u8; 32];
        let iv = [1u8; 12];
        let plaintext = b"hello world";
        let aad = b"additional data";

        let ciphertext = p
            .aes_encrypt(
                AesMode::Gcm { tag_length: 128 },
                &key,
                &iv,
                plaintext,
                Some(aad),
            )
            .unwrap();
        assert_eq!(ciphertext.len(), plaintext.len() + 16);

        let decrypted = p
            .aes_decrypt(
                AesMode::Gcm { tag_length: 128 },
                &key,
                &iv,
                &ciphertext,
                Some(aad),
            )
            .unwrap();
        assert_eq!(decrypted, plaintext);

        assert!(p
            .aes_decrypt(
                AesMode::Gcm { tag_length: 128 },
                &key,
                &iv,
                &ciphertext,
                None,
            )
            .is_err());
    }

    #[test]
    fn test_aes_gcm_short_tag() {
        let p = provider();
        let key = [0u8; 16];
        let iv = [0u8; 12];
        let ciphertext = p
            .aes_encrypt(AesMode::Gcm { tag_length: 96 }, &key, &iv, b"data", None)
            .unwrap();
        assert_eq!(ciphertext.len(), 4 + 12);

        let mut tampered = ciphertext.clone();
        tampered[0] ^= 1;
        assert!(p
            .aes_decrypt(AesMode::Gcm { tag_length: 96 }, &key, &iv, &tampered, None)
            .is_err());
    }

    #[test]
    fn test_aes_cbc_roundtrip() {
        let p = provider();
        let key = hex("2b7e151628aed2a6abf7158809cf4f3c");
        let iv = [0u8; 16];
        let plaintext = [0u8; 32];

        let ciphertext = p
            .aes_encrypt(AesMode::Cbc, &key, &iv, &plaintext, None)
            .unwrap();
        assert_eq!(ciphertext.len(), 48);

        let decrypted = p
            .aes_decrypt(AesMode::Cbc, &key, &iv, &ciphertext, None)
            .unwrap();
        assert_eq!(decrypted, plaintext);

        assert!(p
            .aes_decrypt(AesMode::Cbc, &key, &iv, &ciphertext[..47], None)
            .is_err());
    }

    // NIST SP 800-38A F.5.1
    #[test]
    fn test_aes_ctr_known_answer() {
        let p = provider();
        let key = hex("2b7e151628aed2a6abf7158809cf4f3c");
        let counter = hex("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");
        let plaintext = hex("6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51");

        let ciphertext = p
            .aes_encrypt(AesMode::Ctr, &key, &counter, &plaintext, None)
            .unwrap();
        assert_eq!(
            to_hex(&ciphertext),
            "874d6191b620e3261bef6864990db6ce9806f66b7970fdff8617187bb9fffdff"
        );
        let decrypted = p
            .aes_decrypt(AesMode::Ctr, &key, &counter, &ciphertext, None)
            .unwrap();
        assert_eq!(decrypted, plaintext);
    }

    // RFC 3394 section 4.1
    #[test]
    fn test_aes_kw_known_answer() {
        let p = provider();
        let kek = hex("000102030405060708090a0b0c0d0e0f");
        let key = hex("00112233445566778899aabbccddeeff");

        let wrapped = p.aes_kw_wrap(&kek, &key).unwrap();
        assert_eq!(
            to_hex(&wrapped),
            "1fa68b0a8112b447aef34bd8fb5a7b829d3e862371d2cfe5"
        );
        assert_eq!(p.aes_kw_unwrap(&kek, &wrapped).unwrap(), key);

        let mut corrupted = wrapped.clone();
        corrupted[5] ^= 0x80;
        assert!(p.aes_kw_unwrap(&kek, &corrupted).is_err());
    }

    // RFC 5869 test case 1
    #[test]
    fn test_hkdf_known_answer() {
        let p = provider();
        let derived = p
            .hkdf_derive_key(
                &[0x0b; 22],
                &hex("000102030405060708090a0b0c"),
                &hex("f0f1f2f3f4f5f6f7f8f9"),
                42,
                ShaAlgorithm::SHA256,
            )
            .unwrap();
        assert_eq!(
            to_hex(&derived),
            "3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf34007208d5b887185865"
        );
    }

    // RFC 6070
    #[test]
    fn test_pbkdf2_known_answer() {
        let p = provider();
        let derived = p
            .pbkdf2_derive_key(b"password", b"salt", 2, 20, ShaAlgorithm::SHA1)
            .unwrap();
        assert_eq!(
            to_hex(&derived),
            "ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957"
        );
    }

    #[test]
    fn test_generate_secret_keys() {
        let p = provider();
        assert_eq!(p.generate_aes_key(128).unwrap().len(), 16);
        assert_eq!(p.generate_aes_key(256).unwrap().len(), 32);
        assert_eq!(p.generate_hmac_key(512).unwrap().len(), 64);
        assert_eq!(p.generate_hmac_key(7).unwrap().len(), 1);
    }

    #[test]
    fn test_ecdsa_sign_verify() {
        let p = provider();
        for curve in [EllipticCurve::P256, EllipticCurve::P384, EllipticCurve::P521] {
            let (private_key, public_key) = p.generate_ec_key(curve).unwrap();
            let mut digest = p.digest(ShaAlgorithm::SHA1);
            digest.update(b"message");
            let digest = digest.finalize();

            let signature = p.ecdsa_sign(curve, &private_key, &digest).unwrap();
            assert_eq!(signature.len(), curve.coordinate_len() * 2);
            assert!(p
                .ecdsa_verify(curve, &public_key, &signature, &digest)
                .unwrap());

            let mut bad = signature.clone();
            bad[3] ^= 1;
            assert!(!p.ecdsa_verify(curve, &public_key, &bad, &digest).unwrap());
            assert!(!p
                .ecdsa_verify(curve, &public_key, &signature[1..], &digest)
                .unwrap());
        }
    }

    #[test]
    fn test_ecdh_agreement() {
        let p = provider();
        let (private_a, public_a) = p.generate_ec_key(EllipticCurve::P256).unwrap();
        let (private_b, public_b) = p.generate_ec_key(EllipticCurve::P256).unwrap();
        let ab = p
            .ecdh_derive_bits(EllipticCurve::P256, &private_a, &public_b)
            .unwrap();
        let ba = p
            .ecdh_derive_bits(EllipticCurve::P256, &private_b, &public_a)
            .unwrap();
        assert_eq!(ab.len(), 32);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_ec_jwk_roundtrip() {
        let p = provider();
        let curve = EllipticCurve::P384;
        let (private_key, public_key) = p.generate_ec_key(curve).unwrap();

        let exported = p.export_ec_jwk(&private_key, curve, true).unwrap();
        assert_eq!(exported.x.len(), 48);
        assert_eq!(exported.d.as_ref().map(|d| d.len()), Some(48));

        let imported = p
            .import_ec_jwk(
                EcJwkImport {
                    x: &exported.x,
                    y: &exported.y,
                    d: exported.d.as_deref(),
                },
                curve,
            )
            .unwrap();
        assert!(imported.is_private);
        assert_eq!(
            p.export_ec_jwk(&imported.key_data, curve, true).unwrap(),
            exported
        );

        let public = p.export_ec_jwk(&public_key, curve, false).unwrap();
        assert_eq!(public.x, exported.x);
        assert_eq!(public.d, None);

        let mut wrong_y = exported.y.clone();
        wrong_y[10] ^= 1;
        assert!(p
            .import_ec_jwk(
                EcJwkImport {
                    x: &exported.x,
                    y: &wrong_y,
                    d: None,
                },
                curve,
            )
            .is_err());
    }

    #[test]
    fn test_rsa_fixture_import_and_sign() {
        let p = provider();
        let private = p
            .import_rsa_private_key_pkcs8(&hex(RSA_PRIVATE_KEY_PKCS8_HEX))
            .unwrap();
        let public = p
            .import_rsa_public_key_spki(&hex(RSA_PUBLIC_KEY_SPKI_HEX))
            .unwrap();
        assert_eq!(private.modulus_length, 1024);
        assert_eq!(public.public_exponent, vec![0x01, 0x00, 0x01]);
        assert!(private.is_private);
        assert!(!public.is_private);

        let mut digest = p.digest(ShaAlgorithm::SHA256);
        digest.update(b"message");
        let digest = digest.finalize();
        let signature = p
            .rsa_pkcs1v15_sign(&private.key_data, &digest, ShaAlgorithm::SHA256)
            .unwrap();
        assert_eq!(signature.len(), 128);
        assert!(p
            .rsa_pkcs1v15_verify(&public.key_data, &signature, &digest, ShaAlgorithm::SHA256)
            .unwrap());
        let mut bad = signature.clone();
        bad[0] ^= 1;
        assert!(!p
            .rsa_pkcs1v15_verify(&public.key_data, &bad, &digest, ShaAlgorithm::SHA256)
            .unwrap());
    }

    #[test]
    fn test_rsa_oaep_roundtrip() {
        let p = provider();
        let private = hex(RSA_PRIVATE_KEY_PKCS8_HEX);
        let public = hex(RSA_PUBLIC_KEY_SPKI_HEX);
        let label = Some(b"label".as_slice());
        let ciphertext = p
            .rsa_oaep_encrypt(&public, b"secret", ShaAlgorithm::SHA1, label)
            .unwrap();
        assert_eq!(
            p.rsa_oaep_decrypt(&private, &ciphertext, ShaAlgorithm::SHA1, label)
                .unwrap(),
            b"secret"
        );
        assert!(p
            .rsa_oaep_decrypt(&private, &ciphertext, ShaAlgorithm::SHA1, None)
            .is_err());
    }

    #[test]
    fn test_rsa_jwk_roundtrip() {
        let p = provider();
        let private = hex(RSA_PRIVATE_KEY_PKCS8_HEX);
        let exported = p.export_rsa_jwk(&private, true).unwrap();
        assert_eq!(exported.e, vec![0x01, 0x00, 0x01]);
        assert_eq!(exported.n.len(), 128);

        let imported = p
            .import_rsa_jwk(RsaJwkImport {
                n: &exported.n,
                e: &exported.e,
                d: exported.d.as_deref(),
                p: exported.p.as_deref(),
                q: exported.q.as_deref(),
                dp: exported.dp.as_deref(),
                dq: exported.dq.as_deref(),
                qi: exported.qi.as_deref(),
            })
            .unwrap();
        assert!(imported.is_private);
        assert_eq!(p.export_rsa_jwk(&imported.key_data, true).unwrap(), exported);

        let mut bad_dp = exported.dp.clone().unwrap();
        bad_dp[4] ^= 1;
        assert!(p
            .import_rsa_jwk(RsaJwkImport {
                n: &exported.n,
                e: &exported.e,
                d: exported.d.as_deref(),
                p: exported.p.as_deref(),
                q: exported.q.as_deref(),
                dp: Some(&bad_dp),
                dq: exported.dq.as_deref(),
                qi: exported.qi.as_deref(),
            })
            .is_err());

        let public = p
            .import_rsa_jwk(RsaJwkImport {
                n: &exported.n,
                e: &exported.e,
                d: None,
                p: None,
                q: None,
                dp: None,
                dq: None,
                qi: None,
            })
            .unwrap();
        assert!(!public.is_private);
        assert_eq!(public.key_data, hex(RSA_PUBLIC_KEY_SPKI_HEX));
    }

    #[test]
    fn test_crypto_error_display() {
        assert_eq!(CryptoError::InvalidLength.to_string(), "Invalid length");
        assert_eq!(
            CryptoError::InvalidKey(Some("bad point".into())).to_string(),
            "Invalid key: bad point"
        );
        assert_eq!(
            CryptoError::DecryptionFailed(None).to_string(),
            "Decryption failed"
        );
    }
}
