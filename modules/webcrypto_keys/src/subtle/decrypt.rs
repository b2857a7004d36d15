// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use tracing::trace;

use crate::{
    algorithm::Algorithm, algorithms::get_implementation, error::Result, key::Key,
    usage::KeyUsage,
};

use super::{check_key_algorithm, check_key_usage};

pub fn decrypt(algorithm: &Algorithm, key: &Key, data: &[u8]) -> Result<Vec<u8>> {
    check_key_usage(key, KeyUsage::Decrypt)?;
    decrypt_dont_check_usage(algorithm, key, data)
}

pub(super) fn decrypt_dont_check_usage(
    algorithm: &Algorithm,
    key: &Key,
    data: &[u8],
) -> Result<Vec<u8>> {
    check_key_algorithm(key, algorithm.id)?;
    trace!("decrypt {} bytes with {}", data.len(), algorithm.id);
    get_implementation(algorithm.id)?.decrypt(algorithm, key, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algorithm::{AlgorithmId, KeyFormat},
        error::{Error, ErrorType},
        subtle::import_key,
    };

    #[test]
    fn failures_are_operation_errors() {
        let key = import_key(
            KeyFormat::Raw,
            &[2; 16],
            &Algorithm::new(AlgorithmId::AesCbc),
            false,
            KeyUsage::Decrypt.into(),
        )
        .unwrap();
        let err = decrypt(&Algorithm::aes_cbc(&[0; 16]), &key, &[0; 15]).unwrap_err();
        assert!(err.is_error_type(ErrorType::Operation));

        assert_eq!(
            decrypt(&Algorithm::aes_cbc(&[0; 8]), &key, &[0; 16]).err(),
            Some(Error::IncorrectSizeAesCbcIv)
        );
    }
}
