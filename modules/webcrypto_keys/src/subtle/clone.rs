// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use tracing::trace;

use crate::{
    algorithms::get_implementation,
    error::Result,
    key::{Key, KeyAlgorithm, KeyType},
    usage::Usages,
};

/// The bytes a key is rebuilt from: raw for secret keys, SPKI for public keys and PKCS8 for
/// private keys. Together with the key's metadata this is everything
/// [`deserialize_key_for_clone`] needs.
pub fn serialize_key_for_clone(key: &Key) -> &[u8] {
    key.handle()
}

pub fn deserialize_key_for_clone(
    algorithm: &KeyAlgorithm,
    key_type: KeyType,
    extractable: bool,
    usages: Usages,
    key_data: &[u8],
) -> Result<Key> {
    trace!("deserialize {} {} key", key_type, algorithm.id());
    get_implementation(algorithm.id())?.deserialize_key_for_clone(
        algorithm,
        key_type,
        extractable,
        usages,
        key_data,
    )
}
