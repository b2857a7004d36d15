// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! OpenSSL crypto provider - uses OpenSSL for cryptographic operations.

use openssl::bn::{BigNum, BigNumContext};
use openssl::derive::Deriver;
use openssl::ec::{EcGroup, EcKey};
use openssl::ecdsa::EcdsaSig;
use openssl::error::ErrorStack;
use openssl::hash::MessageDigest;
use openssl::md::Md;
use openssl::nid::Nid;
use openssl::pkey::{Id, PKey, Private, Public};
use openssl::pkey_ctx::PkeyCtx;
use openssl::rand::rand_bytes;
use openssl::rsa::{Padding, Rsa};
use openssl::sha;
use openssl::sign::Signer;
use openssl::symm::{self, Cipher};

use super::{
    AesMode, Capabilities, CryptoError, CryptoProvider, EcImportResult, EcJwkExport,
    EcJwkImport, HmacProvider, RsaImportResult, RsaJwkExport, RsaJwkImport, SimpleDigest,
};
use crate::{algorithm::EllipticCurve, sha_hash::ShaAlgorithm};

const MAX_RSA_MODULUS_BITS: u32 = 16384;

fn invalid_key(e: ErrorStack) -> CryptoError {
    CryptoError::InvalidKey(Some(e.to_string().into()))
}

fn operation_failed(e: ErrorStack) -> CryptoError {
    CryptoError::OperationFailed(Some(e.to_string().into()))
}

pub struct OpenSslProvider;

pub enum OpenSslDigest {
    Sha1(sha::Sha1),
    Sha256(sha::Sha256),
    Sha384(sha::Sha384),
    Sha512(sha::Sha512),
}

impl SimpleDigest for OpenSslDigest {
    fn update(&mut self, data: &[u8]) {
        match self {
            OpenSslDigest::Sha1(h) => h.update(data),
            OpenSslDigest::Sha256(h) => h.update(data),
            OpenSslDigest::Sha384(h) => h.update(data),
            OpenSslDigest::Sha512(h) => h.update(data),
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            OpenSslDigest::Sha1(h) => h.finish().to_vec(),
            OpenSslDigest::Sha256(h) => h.finish().to_vec(),
            OpenSslDigest::Sha384(h) => h.finish().to_vec(),
            OpenSslDigest::Sha512(h) => h.finish().to_vec(),
        }
    }
}

/// Buffers the message so the signer never outlives the key it borrows.
pub struct OpenSslHmac {
    md: MessageDigest,
    key: PKey<Private>,
    data: Vec<u8>,
}

impl HmacProvider for OpenSslHmac {
    fn update(&mut self, data: &[u8]) {
        self.data.extend_from_slice(data);
    }

    fn finalize(self) -> Result<Vec<u8>, CryptoError> {
        let mut signer = Signer::new(self.md, &self.key).map_err(operation_failed)?;
        signer.update(&self.data).map_err(operation_failed)?;
        signer.sign_to_vec().map_err(operation_failed)
    }
}

fn get_message_digest(alg: ShaAlgorithm) -> MessageDigest {
    match alg {
        ShaAlgorithm::SHA1 => MessageDigest::sha1(),
        ShaAlgorithm::SHA256 => MessageDigest::sha256(),
        ShaAlgorithm::SHA384 => MessageDigest::sha384(),
        ShaAlgorithm::SHA512 => MessageDigest::sha512(),
    }
}

fn get_md(alg: ShaAlgorithm) -> &'static openssl::md::MdRef {
    match alg {
        ShaAlgorithm::SHA1 => Md::sha1(),
        ShaAlgorithm::SHA256 => Md::sha256(),
        ShaAlgorithm::SHA384 => Md::sha384(),
        ShaAlgorithm::SHA512 => Md::sha512(),
    }
}

fn curve_to_nid(curve: EllipticCurve) -> Nid {
    match curve {
        EllipticCurve::P256 => Nid::X9_62_PRIME256V1,
        EllipticCurve::P384 => Nid::SECP384R1,
        EllipticCurve::P521 => Nid::SECP521R1,
    }
}

fn get_ec_group(curve: EllipticCurve) -> Result<EcGroup, CryptoError> {
    EcGroup::from_curve_name(curve_to_nid(curve)).map_err(operation_failed)
}

fn aes_cipher(mode: AesMode, key: &[u8]) -> Result<Cipher, CryptoError> {
    let cipher = match (mode, key.len()) {
        (AesMode::Cbc, 16) => Cipher::aes_128_cbc(),
        (AesMode::Cbc, 32) => Cipher::aes_256_cbc(),
        (AesMode::Ctr, 16) => Cipher::aes_128_ctr(),
        (AesMode::Ctr, 32) => Cipher::aes_256_ctr(),
        (AesMode::Gcm { .. }, 16) => Cipher::aes_128_gcm(),
        (AesMode::Gcm { .. }, 32) => Cipher::aes_256_gcm(),
        _ => {
            return Err(CryptoError::InvalidKey(Some(
                "Invalid AES key length".into(),
            )))
        },
    };
    Ok(cipher)
}

fn check_curve<T>(ec_key: &EcKey<T>, curve: EllipticCurve) -> Result<(), CryptoError> {
    if ec_key.group().curve_name() != Some(curve_to_nid(curve)) {
        return Err(CryptoError::InvalidKey(Some(
            "EC key is on a different curve".into(),
        )));
    }
    ec_key.check_key().map_err(invalid_key)
}

fn parse_ec_public(spki: &[u8]) -> Result<PKey<Public>, CryptoError> {
    let pkey = PKey::public_key_from_der(spki).map_err(invalid_key)?;
    if pkey.id() != Id::EC {
        return Err(CryptoError::InvalidKey(Some("not an EC key".into())));
    }
    Ok(pkey)
}

fn parse_private(pkcs8: &[u8], id: Id) -> Result<PKey<Private>, CryptoError> {
    let pkey = PKey::private_key_from_pkcs8(pkcs8).map_err(invalid_key)?;
    if pkey.id() != id {
        return Err(CryptoError::InvalidKey(Some("unexpected key type".into())));
    }
    Ok(pkey)
}

fn parse_rsa_public(spki: &[u8]) -> Result<PKey<Public>, CryptoError> {
    let pkey = PKey::public_key_from_der(spki).map_err(invalid_key)?;
    if pkey.id() != Id::RSA {
        return Err(CryptoError::InvalidKey(Some("not an RSA key".into())));
    }
    Ok(pkey)
}

fn rsa_import_result<T: openssl::pkey::HasPublic>(
    rsa: &Rsa<T>,
    key_data: Vec<u8>,
    is_private: bool,
) -> RsaImportResult {
    RsaImportResult {
        key_data,
        modulus_length: rsa.n().num_bits() as u32,
        public_exponent: rsa.e().to_vec(),
        is_private,
    }
}

fn check_rsa_private(rsa: &Rsa<Private>) -> Result<(), CryptoError> {
    match rsa.check_key() {
        Ok(true) => Ok(()),
        Ok(false) => Err(CryptoError::InvalidKey(Some(
            "RSA key is inconsistent".into(),
        ))),
        Err(e) => Err(invalid_key(e)),
    }
}

fn padded(value: &openssl::bn::BigNumRef, len: usize) -> Result<Vec<u8>, CryptoError> {
    value.to_vec_padded(len as i32).map_err(invalid_key)
}

impl CryptoProvider for OpenSslProvider {
    type Digest = OpenSslDigest;
    type Hmac = OpenSslHmac;

    fn init(&self) {
        openssl::init();
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            aes_gcm: true,
            aes_ctr: true,
            rsa_oaep: true,
            ecdh: true,
            short_gcm_tags: true,
            any_gcm_iv_length: true,
            max_rsa_modulus_bits: MAX_RSA_MODULUS_BITS,
        }
    }

    fn digest(&self, algorithm: ShaAlgorithm) -> Self::Digest {
        match algorithm {
            ShaAlgorithm::SHA1 => OpenSslDigest::Sha1(sha::Sha1::new()),
            ShaAlgorithm::SHA256 => OpenSslDigest::Sha256(sha::Sha256::new()),
            ShaAlgorithm::SHA384 => OpenSslDigest::Sha384(sha::Sha384::new()),
            ShaAlgorithm::SHA512 => OpenSslDigest::Sha512(sha::Sha512::new()),
        }
    }

    fn hmac(&self, algorithm: ShaAlgorithm, key: &[u8]) -> Result<Self::Hmac, CryptoError> {
        Ok(OpenSslHmac {
            md: get_message_digest(algorithm),
            key: PKey::hmac(key).map_err(invalid_key)?,
            data: Vec::new(),
        })
    }

    fn ecdsa_sign(
        &self,
        curve: EllipticCurve,
        private_key_pkcs8: &[u8],
        digest: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let ec_key = parse_private(private_key_pkcs8, Id::EC)?
            .ec_key()
            .map_err(invalid_key)?;
        let sig = EcdsaSig::sign(digest, &ec_key)
            .map_err(|e| CryptoError::SigningFailed(Some(e.to_string().into())))?;
        let coord_len = curve.coordinate_len();
        let mut result = padded(sig.r(), coord_len)?;
        result.extend(padded(sig.s(), coord_len)?);
        Ok(result)
    }

    fn ecdsa_verify(
        &self,
        curve: EllipticCurve,
        public_key_spki: &[u8],
        signature: &[u8],
        digest: &[u8],
    ) -> Result<bool, CryptoError> {
        let ec_key = parse_ec_public(public_key_spki)?
            .ec_key()
            .map_err(invalid_key)?;
        let coord_len = curve.coordinate_len();
        if signature.len() != coord_len * 2 {
            return Ok(false);
        }
        let r = BigNum::from_slice(&signature[..coord_len])
            .map_err(|e| CryptoError::InvalidSignature(Some(e.to_string().into())))?;
        let s = BigNum::from_slice(&signature[coord_len..])
            .map_err(|e| CryptoError::InvalidSignature(Some(e.to_string().into())))?;
        let sig = EcdsaSig::from_private_components(r, s)
            .map_err(|e| CryptoError::InvalidSignature(Some(e.to_string().into())))?;
        Ok(sig.verify(digest, &ec_key).unwrap_or(false))
    }

    fn rsa_pkcs1v15_sign(
        &self,
        private_key_pkcs8: &[u8],
        digest: &[u8],
        hash_alg: ShaAlgorithm,
    ) -> Result<Vec<u8>, CryptoError> {
        let pkey = parse_private(private_key_pkcs8, Id::RSA)?;
        let signing_failed =
            |e: ErrorStack| CryptoError::SigningFailed(Some(e.to_string().into()));
        let mut ctx = PkeyCtx::new(&pkey).map_err(signing_failed)?;
        ctx.sign_init().map_err(signing_failed)?;
        ctx.set_rsa_padding(Padding::PKCS1).map_err(signing_failed)?;
        ctx.set_signature_md(get_md(hash_alg))
            .map_err(signing_failed)?;
        let mut signature = Vec::new();
        ctx.sign_to_vec(digest, &mut signature)
            .map_err(signing_failed)?;
        Ok(signature)
    }

    fn rsa_pkcs1v15_verify(
        &self,
        public_key_spki: &[u8],
        signature: &[u8],
        digest: &[u8],
        hash_alg: ShaAlgorithm,
    ) -> Result<bool, CryptoError> {
        let pkey = parse_rsa_public(public_key_spki)?;
        let mut ctx = PkeyCtx::new(&pkey).map_err(operation_failed)?;
        ctx.verify_init().map_err(operation_failed)?;
        ctx.set_rsa_padding(Padding::PKCS1)
            .map_err(operation_failed)?;
        ctx.set_signature_md(get_md(hash_alg))
            .map_err(operation_failed)?;
        Ok(ctx.verify(digest, signature).unwrap_or(false))
    }

    fn rsa_oaep_encrypt(
        &self,
        public_key_spki: &[u8],
        data: &[u8],
        hash_alg: ShaAlgorithm,
        label: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError> {
        let pkey = parse_rsa_public(public_key_spki)?;
        let mut ctx = PkeyCtx::new(&pkey).map_err(operation_failed)?;
        ctx.encrypt_init().map_err(operation_failed)?;
        ctx.set_rsa_padding(Padding::PKCS1_OAEP)
            .map_err(operation_failed)?;
        ctx.set_rsa_oaep_md(get_md(hash_alg))
            .map_err(operation_failed)?;
        ctx.set_rsa_mgf1_md(get_md(hash_alg))
            .map_err(operation_failed)?;
        if let Some(lbl) = label.filter(|lbl| !lbl.is_empty()) {
            ctx.set_rsa_oaep_label(lbl).map_err(operation_failed)?;
        }
        let mut out = vec![0u8; pkey.size()];
        let len = ctx
            .encrypt(data, Some(&mut out))
            .map_err(|e| CryptoError::EncryptionFailed(Some(e.to_string().into())))?;
        out.truncate(len);
        Ok(out)
    }

    fn rsa_oaep_decrypt(
        &self,
        private_key_pkcs8: &[u8],
        data: &[u8],
        hash_alg: ShaAlgorithm,
        label: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError> {
        let pkey = parse_private(private_key_pkcs8, Id::RSA)?;
        let mut ctx = PkeyCtx::new(&pkey).map_err(operation_failed)?;
        ctx.decrypt_init().map_err(operation_failed)?;
        ctx.set_rsa_padding(Padding::PKCS1_OAEP)
            .map_err(operation_failed)?;
        ctx.set_rsa_oaep_md(get_md(hash_alg))
            .map_err(operation_failed)?;
        ctx.set_rsa_mgf1_md(get_md(hash_alg))
            .map_err(operation_failed)?;
        if let Some(lbl) = label.filter(|lbl| !lbl.is_empty()) {
            ctx.set_rsa_oaep_label(lbl).map_err(operation_failed)?;
        }
        let mut out = vec![0u8; pkey.size()];
        let len = ctx
            .decrypt(data, Some(&mut out))
            .map_err(|_| CryptoError::DecryptionFailed(None))?;
        out.truncate(len);
        Ok(out)
    }

    fn ecdh_derive_bits(
        &self,
        curve: EllipticCurve,
        private_key_pkcs8: &[u8],
        public_key_spki: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let private_pkey = parse_private(private_key_pkcs8, Id::EC)?;
        let public_pkey = parse_ec_public(public_key_spki)?;
        check_curve(&public_pkey.ec_key().map_err(invalid_key)?, curve)?;
        let mut deriver = Deriver::new(&private_pkey).map_err(operation_failed)?;
        deriver.set_peer(&public_pkey).map_err(operation_failed)?;
        deriver.derive_to_vec().map_err(operation_failed)
    }

    fn aes_encrypt(
        &self,
        mode: AesMode,
        key: &[u8],
        iv: &[u8],
        data: &[u8],
        additional_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, CryptoError> {
        let cipher = aes_cipher(mode, key)?;
        let encryption_failed =
            |e: ErrorStack| CryptoError::EncryptionFailed(Some(e.to_string().into()));
        match mode {
            AesMode::Cbc | AesMode::Ctr => {
                symm::encrypt(cipher, key, Some(iv), data).map_err(encryption_failed)
            },
            AesMode::Gcm { tag_length } => {
                let mut tag = vec![0u8; (tag_length / 8) as usize];
                let mut result = symm::encrypt_aead(
                    cipher,
                    key,
                    Some(iv),
                    additional_data.unwrap_or_default(),
                    data,
                    &mut tag,
                )
                .map_err(encryption_failed)?;
                result.extend_from_slice(&tag);
                Ok(result)
            },
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
        let cipher = aes_cipher(mode, key)?;
        match mode {
            AesMode::Cbc | AesMode::Ctr => symm::decrypt(cipher, key, Some(iv), data)
                .map_err(|_| CryptoError::DecryptionFailed(None)),
            AesMode::Gcm { tag_length } => {
                let tag_len = (tag_length / 8) as usize;
                if data.len() < tag_len {
                    return Err(CryptoError::DecryptionFailed(None));
                }
                let (ciphertext, tag) = data.split_at(data.len() - tag_len);
                symm::decrypt_aead(
                    cipher,
                    key,
                    Some(iv),
                    additional_data.unwrap_or_default(),
                    ciphertext,
                    tag,
                )
                .map_err(|_| CryptoError::DecryptionFailed(None))
            },
        }
    }

    fn aes_kw_wrap(&self, kek: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        use openssl::aes::{wrap_key, AesKey};
        if key.len() < 16 || key.len() % 8 != 0 {
            return Err(CryptoError::InvalidData(None));
        }
        let aes_key = AesKey::new_encrypt(kek).map_err(|_| CryptoError::InvalidKey(None))?;
        let mut out = vec![0u8; key.len() + 8];
        wrap_key(&aes_key, None, &mut out, key).map_err(|_| CryptoError::OperationFailed(None))?;
        Ok(out)
    }

    fn aes_kw_unwrap(&self, kek: &[u8], wrapped_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        use openssl::aes::{unwrap_key, AesKey};
        if wrapped_key.len() < 24 || wrapped_key.len() % 8 != 0 {
            return Err(CryptoError::InvalidData(None));
        }
        let aes_key = AesKey::new_decrypt(kek).map_err(|_| CryptoError::InvalidKey(None))?;
        let mut out = vec![0u8; wrapped_key.len() - 8];
        unwrap_key(&aes_key, None, &mut out, wrapped_key)
            .map_err(|_| CryptoError::DecryptionFailed(None))?;
        Ok(out)
    }

    fn hkdf_derive_key(
        &self,
        key: &[u8],
        salt: &[u8],
        info: &[u8],
        length: usize,
        hash_alg: ShaAlgorithm,
    ) -> Result<Vec<u8>, CryptoError> {
        use openssl::pkey_ctx::HkdfMode;
        if length == 0 {
            return Ok(Vec::new());
        }
        let derivation_failed =
            |e: ErrorStack| CryptoError::DerivationFailed(Some(e.to_string().into()));
        let mut ctx = PkeyCtx::new_id(Id::HKDF).map_err(derivation_failed)?;
        ctx.derive_init().map_err(derivation_failed)?;
        ctx.set_hkdf_md(get_md(hash_alg))
            .map_err(derivation_failed)?;
        ctx.set_hkdf_mode(HkdfMode::EXTRACT_THEN_EXPAND)
            .map_err(derivation_failed)?;
        ctx.set_hkdf_key(key).map_err(derivation_failed)?;
        if !salt.is_empty() {
            ctx.set_hkdf_salt(salt).map_err(derivation_failed)?;
        }
        if !info.is_empty() {
            ctx.add_hkdf_info(info).map_err(derivation_failed)?;
        }
        let mut out = vec![0u8; length];
        ctx.derive(Some(&mut out)).map_err(derivation_failed)?;
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
        if iterations == 0 {
            return Err(CryptoError::InvalidData(None));
        }
        let mut out = vec![0u8; length];
        openssl::pkcs5::pbkdf2_hmac(
            password,
            salt,
            iterations as usize,
            get_message_digest(hash_alg),
            &mut out,
        )
        .map_err(|e| CryptoError::DerivationFailed(Some(e.to_string().into())))?;
        Ok(out)
    }

    fn generate_aes_key(&self, length_bits: u16) -> Result<Vec<u8>, CryptoError> {
        if !matches!(length_bits, 128 | 256) {
            return Err(CryptoError::InvalidLength);
        }
        let mut key = vec![0u8; length_bits as usize / 8];
        rand_bytes(&mut key).map_err(operation_failed)?;
        Ok(key)
    }

    fn generate_hmac_key(&self, length_bits: u32) -> Result<Vec<u8>, CryptoError> {
        let mut key = vec![0u8; length_bits.div_ceil(8) as usize];
        rand_bytes(&mut key).map_err(operation_failed)?;
        Ok(key)
    }

    fn generate_ec_key(&self, curve: EllipticCurve) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
        let group = get_ec_group(curve)?;
        let ec_key = EcKey::generate(&group).map_err(operation_failed)?;
        let pkey = PKey::from_ec_key(ec_key).map_err(operation_failed)?;
        let private_der = pkey.private_key_to_pkcs8().map_err(operation_failed)?;
        let public_der = pkey.public_key_to_der().map_err(operation_failed)?;
        Ok((private_der, public_der))
    }

    fn generate_rsa_key(
        &self,
        modulus_length: u32,
        public_exponent: u32,
    ) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
        let exp = BigNum::from_u32(public_exponent).map_err(operation_failed)?;
        let rsa = Rsa::generate_with_e(modulus_length, &exp).map_err(operation_failed)?;
        let pkey = PKey::from_rsa(rsa).map_err(operation_failed)?;
        let private_der = pkey.private_key_to_pkcs8().map_err(operation_failed)?;
        let public_der = pkey.public_key_to_der().map_err(operation_failed)?;
        Ok((private_der, public_der))
    }

    fn import_rsa_public_key_spki(&self, der: &[u8]) -> Result<RsaImportResult, CryptoError> {
        let pkey = parse_rsa_public(der)?;
        let rsa = pkey.rsa().map_err(invalid_key)?;
        let key_data = pkey.public_key_to_der().map_err(invalid_key)?;
        Ok(rsa_import_result(&rsa, key_data, false))
    }

    fn import_rsa_private_key_pkcs8(&self, der: &[u8]) -> Result<RsaImportResult, CryptoError> {
        let pkey = parse_private(der, Id::RSA)?;
        let rsa = pkey.rsa().map_err(invalid_key)?;
        check_rsa_private(&rsa)?;
        let key_data = pkey.private_key_to_pkcs8().map_err(invalid_key)?;
        Ok(rsa_import_result(&rsa, key_data, true))
    }

    fn import_rsa_jwk(&self, jwk: RsaJwkImport<'_>) -> Result<RsaImportResult, CryptoError> {
        let n = BigNum::from_slice(jwk.n).map_err(invalid_key)?;
        let e = BigNum::from_slice(jwk.e).map_err(invalid_key)?;

        let Some(d) = jwk.d else {
            let rsa = Rsa::from_public_components(n, e).map_err(invalid_key)?;
            let pkey = PKey::from_rsa(rsa).map_err(invalid_key)?;
            let key_data = pkey.public_key_to_der().map_err(invalid_key)?;
            return Ok(rsa_import_result(
                &pkey.rsa().map_err(invalid_key)?,
                key_data,
                false,
            ));
        };

        let (Some(p), Some(q), Some(dp), Some(dq), Some(qi)) =
            (jwk.p, jwk.q, jwk.dp, jwk.dq, jwk.qi)
        else {
            return Err(CryptoError::InvalidKey(Some(
                "RSA private key is missing CRT parameters".into(),
            )));
        };
        let rsa = Rsa::from_private_components(
            n,
            e,
            BigNum::from_slice(d).map_err(invalid_key)?,
            BigNum::from_slice(p).map_err(invalid_key)?,
            BigNum::from_slice(q).map_err(invalid_key)?,
            BigNum::from_slice(dp).map_err(invalid_key)?,
            BigNum::from_slice(dq).map_err(invalid_key)?,
            BigNum::from_slice(qi).map_err(invalid_key)?,
        )
        .map_err(invalid_key)?;
        check_rsa_private(&rsa)?;
        let pkey = PKey::from_rsa(rsa).map_err(invalid_key)?;
        let key_data = pkey.private_key_to_pkcs8().map_err(invalid_key)?;
        Ok(rsa_import_result(
            &pkey.rsa().map_err(invalid_key)?,
            key_data,
            true,
        ))
    }

    fn export_rsa_jwk(
        &self,
        key_data: &[u8],
        is_private: bool,
    ) -> Result<RsaJwkExport, CryptoError> {
        if is_private {
            let rsa = parse_private(key_data, Id::RSA)?
                .rsa()
                .map_err(invalid_key)?;
            Ok(RsaJwkExport {
                n: rsa.n().to_vec(),
                e: rsa.e().to_vec(),
                d: Some(rsa.d().to_vec()),
                p: rsa.p().map(|v| v.to_vec()),
                q: rsa.q().map(|v| v.to_vec()),
                dp: rsa.dmp1().map(|v| v.to_vec()),
                dq: rsa.dmq1().map(|v| v.to_vec()),
                qi: rsa.iqmp().map(|v| v.to_vec()),
            })
        } else {
            let rsa = parse_rsa_public(key_data)?.rsa().map_err(invalid_key)?;
            Ok(RsaJwkExport {
                n: rsa.n().to_vec(),
                e: rsa.e().to_vec(),
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
        let pkey = parse_ec_public(der)?;
        check_curve(&pkey.ec_key().map_err(invalid_key)?, curve)?;
        pkey.public_key_to_der().map_err(invalid_key)
    }

    fn import_ec_private_key_pkcs8(
        &self,
        der: &[u8],
        curve: EllipticCurve,
    ) -> Result<Vec<u8>, CryptoError> {
        let pkey = parse_private(der, Id::EC)?;
        check_curve(&pkey.ec_key().map_err(invalid_key)?, curve)?;
        pkey.private_key_to_pkcs8().map_err(invalid_key)
    }

    fn import_ec_jwk(
        &self,
        jwk: EcJwkImport<'_>,
        curve: EllipticCurve,
    ) -> Result<EcImportResult, CryptoError> {
        let group = get_ec_group(curve)?;
        let x = BigNum::from_slice(jwk.x).map_err(invalid_key)?;
        let y = BigNum::from_slice(jwk.y).map_err(invalid_key)?;
        let public_key =
            EcKey::from_public_key_affine_coordinates(&group, &x, &y).map_err(invalid_key)?;

        match jwk.d {
            Some(d) => {
                let d = BigNum::from_slice(d).map_err(invalid_key)?;
                let private_key =
                    EcKey::from_private_components(&group, &d, public_key.public_key())
                        .map_err(invalid_key)?;
                private_key.check_key().map_err(invalid_key)?;
                let pkey = PKey::from_ec_key(private_key).map_err(invalid_key)?;
                Ok(EcImportResult {
                    key_data: pkey.private_key_to_pkcs8().map_err(invalid_key)?,
                    is_private: true,
                })
            },
            None => {
                public_key.check_key().map_err(invalid_key)?;
                let pkey = PKey::from_ec_key(public_key).map_err(invalid_key)?;
                Ok(EcImportResult {
                    key_data: pkey.public_key_to_der().map_err(invalid_key)?,
                    is_private: false,
                })
            },
        }
    }

    fn export_ec_jwk(
        &self,
        key_data: &[u8],
        curve: EllipticCurve,
        is_private: bool,
    ) -> Result<EcJwkExport, CryptoError> {
        let group = get_ec_group(curve)?;
        let mut ctx = BigNumContext::new().map_err(invalid_key)?;
        let mut x = BigNum::new().map_err(invalid_key)?;
        let mut y = BigNum::new().map_err(invalid_key)?;
        let coord_len = curve.coordinate_len();

        let d = if is_private {
            let ec_key = parse_private(key_data, Id::EC)?
                .ec_key()
                .map_err(invalid_key)?;
            ec_key
                .public_key()
                .affine_coordinates(&group, &mut x, &mut y, &mut ctx)
                .map_err(invalid_key)?;
            Some(padded(ec_key.private_key(), coord_len)?)
        } else {
            let ec_key = parse_ec_public(key_data)?.ec_key().map_err(invalid_key)?;
            ec_key
                .public_key()
                .affine_coordinates(&group, &mut x, &mut y, &mut ctx)
                .map_err(invalid_key)?;
            None
        };

        Ok(EcJwkExport {
            x: padded(&x, coord_len)?,
            y: padded(&y, coord_len)?,
            d,
        })
    }
}
