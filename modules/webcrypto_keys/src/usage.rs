// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::{
    fmt,
    ops::{BitAnd, BitOr},
};

use tracing::debug;

use crate::error::{Error, Result};

/// Key usages in WebCrypto canonical order. The discriminant is the bit position in [`Usages`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyUsage {
    Encrypt,
    Decrypt,
    Sign,
    Verify,
    DeriveKey,
    DeriveBits,
    WrapKey,
    UnwrapKey,
}

impl KeyUsage {
    pub const ALL: [KeyUsage; 8] = [
        KeyUsage::Encrypt,
        KeyUsage::Decrypt,
        KeyUsage::Sign,
        KeyUsage::Verify,
        KeyUsage::DeriveKey,
        KeyUsage::DeriveBits,
        KeyUsage::WrapKey,
        KeyUsage::UnwrapKey,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyUsage::Encrypt => "encrypt",
            KeyUsage::Decrypt => "decrypt",
            KeyUsage::Sign => "sign",
            KeyUsage::Verify => "verify",
            KeyUsage::DeriveKey => "deriveKey",
            KeyUsage::DeriveBits => "deriveBits",
            KeyUsage::WrapKey => "wrapKey",
            KeyUsage::UnwrapKey => "unwrapKey",
        }
    }

    const fn mask(self) -> u8 {
        1 << self as u8
    }
}

impl TryFrom<&str> for KeyUsage {
    type Error = String;

    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        Ok(match s {
            "encrypt" => KeyUsage::Encrypt,
            "decrypt" => KeyUsage::Decrypt,
            "sign" => KeyUsage::Sign,
            "verify" => KeyUsage::Verify,
            "deriveKey" => KeyUsage::DeriveKey,
            "deriveBits" => KeyUsage::DeriveBits,
            "wrapKey" => KeyUsage::WrapKey,
            "unwrapKey" => KeyUsage::UnwrapKey,
            _ => return Err(["Invalid key usage: ", s].concat()),
        })
    }
}

/// A set of [`KeyUsage`]s.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Usages(u8);

impl Usages {
    pub const EMPTY: Usages = Usages(0);

    pub const fn from_bits(bits: u8) -> Self {
        Usages(bits)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn of(usages: &[KeyUsage]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < usages.len() {
            bits |= usages[i].mask();
            i += 1;
        }
        Usages(bits)
    }

    pub const fn contains(&self, usage: KeyUsage) -> bool {
        self.0 & usage.mask() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_subset_of(&self, other: Usages) -> bool {
        self.0 & !other.0 == 0
    }

    pub const fn with(self, usage: KeyUsage) -> Self {
        Usages(self.0 | usage.mask())
    }

    /// Iterates in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = KeyUsage> + '_ {
        KeyUsage::ALL
            .iter()
            .copied()
            .filter(move |usage| self.contains(*usage))
    }

    /// Usages implied by a JWK `use` value.
    pub fn for_jwk_use(value: &str) -> Option<Self> {
        match value {
            "sig" => Some(Usages::of(&[KeyUsage::Sign, KeyUsage::Verify])),
            "enc" => Some(Usages::of(&[
                KeyUsage::Encrypt,
                KeyUsage::Decrypt,
                KeyUsage::WrapKey,
                KeyUsage::UnwrapKey,
                KeyUsage::DeriveKey,
                KeyUsage::DeriveBits,
            ])),
            _ => None,
        }
    }
}

impl BitOr for Usages {
    type Output = Usages;

    fn bitor(self, rhs: Self) -> Self::Output {
        Usages(self.0 | rhs.0)
    }
}

impl BitAnd for Usages {
    type Output = Usages;

    fn bitand(self, rhs: Self) -> Self::Output {
        Usages(self.0 & rhs.0)
    }
}

impl From<KeyUsage> for Usages {
    fn from(usage: KeyUsage) -> Self {
        Usages(usage.mask())
    }
}

impl FromIterator<KeyUsage> for Usages {
    fn from_iter<T: IntoIterator<Item = KeyUsage>>(iter: T) -> Self {
        iter.into_iter().fold(Usages::EMPTY, Usages::with)
    }
}

impl fmt::Debug for Usages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|usage| usage.as_str()))
            .finish()
    }
}

/// Legal usages per algorithm family, packed as (private << 8) | public.
/// Symmetric families only use the low byte.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyUsageAlgorithm {
    AesKw = (KeyUsage::WrapKey.mask() | KeyUsage::UnwrapKey.mask()) as u16,
    //all non-KW AES
    Symmetric = (KeyUsage::Encrypt.mask()
        | KeyUsage::Decrypt.mask()
        | KeyUsage::WrapKey.mask()
        | KeyUsage::UnwrapKey.mask()) as u16,
    Hmac = (KeyUsage::Sign.mask() | KeyUsage::Verify.mask()) as u16,
    //HKDF, PBKDF2
    Derive = (KeyUsage::DeriveKey.mask() | KeyUsage::DeriveBits.mask()) as u16,
    RsaOaep = (((KeyUsage::Decrypt.mask() | KeyUsage::UnwrapKey.mask()) as u16) << 8) //private
        | (KeyUsage::Encrypt.mask() | KeyUsage::WrapKey.mask()) as u16, //public
    //ECDSA, RSASSA-PKCS1-v1_5
    Sign = ((KeyUsage::Sign.mask() as u16) << 8) //private
        | KeyUsage::Verify.mask() as u16, //public
    Ecdh = ((KeyUsage::DeriveKey.mask() | KeyUsage::DeriveBits.mask()) as u16) << 8,
}

impl KeyUsageAlgorithm {
    /// Usages legal for a secret key, or for a public key of an asymmetric family.
    pub const fn public_usages(&self) -> Usages {
        Usages((*self as u16 & 0xFF) as u8)
    }

    pub const fn private_usages(&self) -> Usages {
        Usages((*self as u16 >> 8) as u8)
    }

    pub const fn all_usages(&self) -> Usages {
        Usages(self.public_usages().0 | self.private_usages().0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyUsages {
    Allow,
    Reject,
}

/// Fails unless `actual` is a subset of `all_possible`, and non-empty when `empty` is
/// [`EmptyUsages::Reject`].
pub fn check_key_usages(all_possible: Usages, actual: Usages, empty: EmptyUsages) -> Result<()> {
    if !actual.is_subset_of(all_possible) {
        debug!(
            "Rejected key usages {:?}, allowed {:?}",
            actual, all_possible
        );
        return Err(Error::CreateKeyBadUsages);
    }
    if actual.is_empty() && empty == EmptyUsages::Reject {
        return Err(Error::CreateKeyEmptyUsages);
    }
    Ok(())
}

/// Splits the usages requested for a key pair into (public, private) halves.
pub fn get_usages_for_generate_asymmetric_key(
    combined: Usages,
    all_public: Usages,
    all_private: Usages,
) -> Result<(Usages, Usages)> {
    check_key_usages(all_public | all_private, combined, EmptyUsages::Allow)?;

    let public_usages = combined & all_public;
    let private_usages = combined & all_private;

    check_key_usages(all_private, private_usages, EmptyUsages::Reject)?;

    Ok((public_usages, private_usages))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_iteration_order() {
        let usages: Usages = [KeyUsage::UnwrapKey, KeyUsage::Sign, KeyUsage::Encrypt]
            .into_iter()
            .collect();
        let names: Vec<_> = usages.iter().map(|usage| usage.as_str()).collect();
        assert_eq!(names, vec!["encrypt", "sign", "unwrapKey"]);
    }

    #[test]
    fn usage_names_are_case_sensitive() {
        assert_eq!(KeyUsage::try_from("deriveBits"), Ok(KeyUsage::DeriveBits));
        assert!(KeyUsage::try_from("Encrypt").is_err());
    }

    #[test]
    fn subset_checks() {
        let all = KeyUsageAlgorithm::Symmetric.all_usages();
        assert!(check_key_usages(all, KeyUsage::Encrypt.into(), EmptyUsages::Reject).is_ok());
        assert_eq!(
            check_key_usages(all, KeyUsage::Sign.into(), EmptyUsages::Reject),
            Err(Error::CreateKeyBadUsages)
        );
        assert_eq!(
            check_key_usages(all, Usages::EMPTY, EmptyUsages::Reject),
            Err(Error::CreateKeyEmptyUsages)
        );
        assert!(check_key_usages(all, Usages::EMPTY, EmptyUsages::Allow).is_ok());
    }

    #[test]
    fn policy_masks() {
        let oaep = KeyUsageAlgorithm::RsaOaep;
        assert_eq!(
            oaep.public_usages(),
            Usages::of(&[KeyUsage::Encrypt, KeyUsage::WrapKey])
        );
        assert_eq!(
            oaep.private_usages(),
            Usages::of(&[KeyUsage::Decrypt, KeyUsage::UnwrapKey])
        );
        assert_eq!(KeyUsageAlgorithm::Ecdh.public_usages(), Usages::EMPTY);
        assert_eq!(KeyUsageAlgorithm::Hmac.private_usages(), Usages::EMPTY);
    }

    #[test]
    fn key_pair_usage_split() {
        let sign = KeyUsageAlgorithm::Sign;
        let (public, private) = get_usages_for_generate_asymmetric_key(
            Usages::of(&[KeyUsage::Sign, KeyUsage::Verify]),
            sign.public_usages(),
            sign.private_usages(),
        )
        .unwrap();
        assert_eq!(public, KeyUsage::Verify.into());
        assert_eq!(private, KeyUsage::Sign.into());

        let (public, _) = get_usages_for_generate_asymmetric_key(
            KeyUsage::Sign.into(),
            sign.public_usages(),
            sign.private_usages(),
        )
        .unwrap();
        assert!(public.is_empty());

        assert_eq!(
            get_usages_for_generate_asymmetric_key(
                KeyUsage::Verify.into(),
                sign.public_usages(),
                sign.private_usages(),
            ),
            Err(Error::CreateKeyEmptyUsages)
        );
        assert_eq!(
            get_usages_for_generate_asymmetric_key(
                KeyUsage::Encrypt.into(),
                sign.public_usages(),
                sign.private_usages(),
            ),
            Err(Error::CreateKeyBadUsages)
        );
    }

    #[test]
    fn jwk_use_values() {
        assert_eq!(
            Usages::for_jwk_use("sig"),
            Some(Usages::of(&[KeyUsage::Sign, KeyUsage::Verify]))
        );
        assert!(Usages::for_jwk_use("enc")
            .unwrap()
            .contains(KeyUsage::DeriveBits));
        assert_eq!(Usages::for_jwk_use("foo"), None);
    }
}
