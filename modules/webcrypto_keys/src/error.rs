// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::fmt;

use crate::provider::CryptoError;

pub type Result<T> = std::result::Result<T, Error>;

/// The DOMException category an [`Error`] is reported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    Type,
    NotSupported,
    Syntax,
    InvalidAccess,
    Data,
    Operation,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Type => "TypeError",
            ErrorType::NotSupported => "NotSupportedError",
            ErrorType::Syntax => "SyntaxError",
            ErrorType::InvalidAccess => "InvalidAccessError",
            ErrorType::Data => "DataError",
            ErrorType::Operation => "OperationError",
        }
    }
}

/// Every way a key management or crypto operation can fail.
///
/// Two errors compare equal when they are the same kind with the same detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Generic operation failure. Carries no detail so that failures of integrity checks and
    /// similar cannot be told apart.
    Operation,
    /// Generic malformed key data.
    Data,
    Unsupported,
    Unexpected,

    JwkNotDictionary,
    JwkMemberMissing(String),
    JwkMemberWrongType {
        member: String,
        expected: &'static str,
    },
    JwkBase64Decode(String),
    JwkExtInconsistent,
    JwkUnrecognizedAlgorithm,
    JwkAlgorithmInconsistent,
    JwkUnrecognizedUse,
    JwkUseInconsistent,
    JwkKeyopsInconsistent,
    JwkUseAndKeyopsInconsistent,
    JwkUnrecognizedKty,
    JwkUnexpectedKty(&'static str),
    JwkIncorrectKeyLength,
    JwkEmptyBigInteger(String),
    JwkBigIntegerHasLeadingZero(String),
    JwkIncompleteOptionalRsaPrivateKey,
    JwkIncorrectCrv,
    JwkOctetStringWrongLength {
        member: String,
        expected: usize,
        actual: usize,
    },

    ImportEmptyKeyData,
    ImportAesKeyLength,
    Aes192BitUnsupported,
    ImportExtractableKdfKey,
    ImportedEcKeyIncorrectCurve,
    HmacImportBadLength,
    UnsupportedImportKeyFormat,
    UnsupportedExportKeyFormat,
    KeyNotExtractable,
    UnexpectedKeyType,
    CreateKeyBadUsages,
    CreateKeyEmptyUsages,

    IncorrectSizeAesCbcIv,
    IncorrectSizeAesCtrCounter,
    InvalidAesCtrCounterLength,
    AesCtrInputTooLongCounterRepeated,
    InvalidAesGcmTagLength,
    EmptyAesGcmIv,
    DataTooLarge,
    DataTooSmall,
    InvalidAesKwDataLength,

    GenerateAesKeyLength,
    GenerateHmacKeyLengthZero,
    GenerateRsaUnsupportedModulus,
    GenerateKeyPublicExponent,

    EcdhPublicKeyWrongType,
    EcdhPublicKeyWrongAlgorithm,
    EcdhCurveMismatch,
    EcdhLengthTooBig(u32),

    DeriveLengthNotWholeByte,
    HkdfDeriveBitsLengthNotSpecified,
    HkdfLengthTooLong,
    Pbkdf2DeriveBitsLengthNotSpecified,
    Pbkdf2DeriveBitsLengthZero,
    Pbkdf2Iterations0,
    GetKeyLengthUnsupported,
}

impl Error {
    pub fn error_type(&self) -> ErrorType {
        match self {
            Error::Operation
            | Error::AesCtrInputTooLongCounterRepeated
            | Error::DataTooLarge
            | Error::DataTooSmall
            | Error::EcdhLengthTooBig(_)
            | Error::DeriveLengthNotWholeByte
            | Error::HkdfDeriveBitsLengthNotSpecified
            | Error::HkdfLengthTooLong
            | Error::Pbkdf2DeriveBitsLengthNotSpecified
            | Error::Pbkdf2DeriveBitsLengthZero
            | Error::GenerateRsaUnsupportedModulus
            | Error::GenerateKeyPublicExponent
            | Error::InvalidAesGcmTagLength
            | Error::InvalidAesCtrCounterLength
            | Error::IncorrectSizeAesCbcIv
            | Error::IncorrectSizeAesCtrCounter
            | Error::EmptyAesGcmIv
            | Error::InvalidAesKwDataLength => ErrorType::Operation,
            Error::Unsupported
            | Error::Aes192BitUnsupported
            | Error::UnsupportedImportKeyFormat
            | Error::UnsupportedExportKeyFormat => ErrorType::NotSupported,
            Error::Unexpected
            | Error::KeyNotExtractable
            | Error::UnexpectedKeyType
            | Error::EcdhPublicKeyWrongType
            | Error::EcdhPublicKeyWrongAlgorithm
            | Error::EcdhCurveMismatch => ErrorType::InvalidAccess,
            Error::CreateKeyBadUsages
            | Error::CreateKeyEmptyUsages
            | Error::ImportExtractableKdfKey => ErrorType::Syntax,
            Error::GenerateAesKeyLength
            | Error::GenerateHmacKeyLengthZero
            | Error::Pbkdf2Iterations0
            | Error::GetKeyLengthUnsupported => ErrorType::Type,
            _ => ErrorType::Data,
        }
    }

    pub fn is_error_type(&self, error_type: ErrorType) -> bool {
        self.error_type() == error_type
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Operation | Error::Data => Ok(()),
            Error::Unsupported => f.write_str("The requested operation is unsupported"),
            Error::Unexpected => f.write_str("Something unexpected happened"),
            Error::JwkNotDictionary => f.write_str("Failed to parse the JWK as a JSON dictionary"),
            Error::JwkMemberMissing(member) => {
                write!(f, "The required JWK property \"{}\" was missing", member)
            },
            Error::JwkMemberWrongType { member, expected } => {
                write!(f, "The JWK property \"{}\" must be a {}", member, expected)
            },
            Error::JwkBase64Decode(member) => {
                write!(f, "The JWK property \"{}\" could not be base64 decoded", member)
            },
            Error::JwkExtInconsistent => f.write_str(
                "The \"ext\" property of the JWK dictionary is inconsistent with that specified by the Web Crypto call",
            ),
            Error::JwkUnrecognizedAlgorithm => {
                f.write_str("The JWK \"alg\" property was not recognized")
            },
            Error::JwkAlgorithmInconsistent => f.write_str(
                "The JWK \"alg\" property was inconsistent with that specified by the Web Crypto call",
            ),
            Error::JwkUnrecognizedUse => {
                f.write_str("The JWK \"use\" property could not be parsed")
            },
            Error::JwkUseInconsistent => f.write_str(
                "The JWK \"use\" property was inconsistent with that specified by the Web Crypto call. The JWK usage must be a superset of those requested",
            ),
            Error::JwkKeyopsInconsistent => f.write_str(
                "The JWK \"key_ops\" property was inconsistent with that specified by the Web Crypto call. The JWK usage must be a superset of those requested",
            ),
            Error::JwkUseAndKeyopsInconsistent => f.write_str(
                "The JWK \"use\" and \"key_ops\" properties were both found but are inconsistent with each other.",
            ),
            Error::JwkUnrecognizedKty => {
                f.write_str("The JWK \"kty\" property was not recognized")
            },
            Error::JwkUnexpectedKty(expected) => {
                write!(f, "The JWK \"kty\" property was not \"{}\"", expected)
            },
            Error::JwkIncorrectKeyLength => f.write_str(
                "The JWK \"k\" property did not include the right length of key data for the given algorithm.",
            ),
            Error::JwkEmptyBigInteger(member) => {
                write!(f, "The JWK \"{}\" property was empty.", member)
            },
            Error::JwkBigIntegerHasLeadingZero(member) => {
                write!(f, "The JWK \"{}\" property contained a leading zero.", member)
            },
            Error::JwkIncompleteOptionalRsaPrivateKey => f.write_str(
                "The optional JWK properties p, q, dp, dq, qi must either all be provided, or none provided",
            ),
            Error::JwkIncorrectCrv => f.write_str(
                "The JWK's \"crv\" member specified a different curve than requested",
            ),
            Error::JwkOctetStringWrongLength {
                member,
                expected,
                actual,
            } => write!(
                f,
                "The JWK's \"{}\" member defines an octet string of length {} bytes but should be {}",
                member, actual, expected
            ),
            Error::ImportEmptyKeyData => f.write_str("No key data was provided"),
            Error::ImportAesKeyLength => f.write_str("AES key data must be 128 or 256 bits"),
            Error::Aes192BitUnsupported => f.write_str("192-bit AES keys are not supported"),
            Error::ImportExtractableKdfKey => {
                f.write_str("KDF keys can only be imported as non-extractable")
            },
            Error::ImportedEcKeyIncorrectCurve => {
                f.write_str("The imported EC key specifies a different curve than requested")
            },
            Error::HmacImportBadLength => f.write_str(
                "The optional HMAC key length must be shorter than the key data, and by no more than 7 bits.",
            ),
            Error::UnsupportedImportKeyFormat => {
                f.write_str("Unsupported import key format for algorithm")
            },
            Error::UnsupportedExportKeyFormat => {
                f.write_str("Unsupported export key format for algorithm")
            },
            Error::KeyNotExtractable => f.write_str("The key is not extractable"),
            Error::UnexpectedKeyType => {
                f.write_str("The key is not of the expected type")
            },
            Error::CreateKeyBadUsages => {
                f.write_str("Cannot create a key using the specified key usages.")
            },
            Error::CreateKeyEmptyUsages => {
                f.write_str("Usages cannot be empty when creating a key.")
            },
            Error::IncorrectSizeAesCbcIv => {
                f.write_str("The \"iv\" has an unexpected length -- must be 16 bytes")
            },
            Error::IncorrectSizeAesCtrCounter => {
                f.write_str("The \"counter\" has an unexpected length -- must be 16 bytes")
            },
            Error::InvalidAesCtrCounterLength => {
                f.write_str("The \"length\" property must be >= 1 and <= 128")
            },
            Error::AesCtrInputTooLongCounterRepeated => {
                f.write_str("The input is too large for the counter length.")
            },
            Error::InvalidAesGcmTagLength => f.write_str(
                "The tag length is invalid: Must be 32, 64, 96, 104, 112, 120, or 128 bits",
            ),
            Error::EmptyAesGcmIv => f.write_str("The \"iv\" must not be empty"),
            Error::DataTooLarge => f.write_str("The provided data is too large"),
            Error::DataTooSmall => f.write_str("The provided data is too small"),
            Error::InvalidAesKwDataLength => {
                f.write_str("The AES-KW input data length is invalid: not a multiple of 8 bytes")
            },
            Error::GenerateAesKeyLength => {
                f.write_str("AES key length must be 128 or 256 bits")
            },
            Error::GenerateHmacKeyLengthZero => {
                f.write_str("HMAC key length must not be zero")
            },
            Error::GenerateRsaUnsupportedModulus => f.write_str(
                "The modulus length must be a multiple of 8 bits and >= 256 and <= 16384",
            ),
            Error::GenerateKeyPublicExponent => {
                f.write_str("The \"publicExponent\" must be either 3 or 65537")
            },
            Error::EcdhPublicKeyWrongType => {
                f.write_str("The public parameter for ECDH key derivation is not a public EC key")
            },
            Error::EcdhPublicKeyWrongAlgorithm => f.write_str(
                "The public parameter for ECDH key derivation must be for ECDH",
            ),
            Error::EcdhCurveMismatch => f.write_str(
                "The public parameter for ECDH key derivation is for a different named curve",
            ),
            Error::EcdhLengthTooBig(max_length_bits) => write!(
                f,
                "Length specified for ECDH key derivation is too large. Maximum allowed is {} bits",
                max_length_bits
            ),
            Error::DeriveLengthNotWholeByte => {
                f.write_str("The length provided must be a multiple of 8")
            },
            Error::HkdfDeriveBitsLengthNotSpecified => {
                f.write_str("No length was specified for the HKDF Derive Bits operation.")
            },
            Error::HkdfLengthTooLong => {
                f.write_str("The length provided for HKDF is too large.")
            },
            Error::Pbkdf2DeriveBitsLengthNotSpecified => {
                f.write_str("No length was specified for the PBKDF2 Derive Bits operation.")
            },
            Error::Pbkdf2DeriveBitsLengthZero => {
                f.write_str("A length of 0 was specified for PBKDF2's Derive Bits operation.")
            },
            Error::Pbkdf2Iterations0 => f.write_str("PBKDF2 requires iterations > 0"),
            Error::GetKeyLengthUnsupported => {
                f.write_str("The derived key algorithm does not define a key length")
            },
        }
    }
}

impl std::error::Error for Error {}

impl From<CryptoError> for Error {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidKey(_)
            | CryptoError::InvalidData(_)
            | CryptoError::InvalidLength => Error::Data,
            CryptoError::UnsupportedAlgorithm(_) => Error::Unsupported,
            _ => Error::Operation,
        }
    }
}
