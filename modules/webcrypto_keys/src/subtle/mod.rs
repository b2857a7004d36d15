// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
mod clone;
mod decrypt;
mod derive;
mod digest;
mod encrypt;
mod export_key;
mod generate_key;
mod import_key;
mod sign;
mod verify;
mod wrapping;

pub use clone::{deserialize_key_for_clone, serialize_key_for_clone};
pub use decrypt::decrypt;
pub use derive::{derive_bits, derive_key};
pub use digest::{create_digestor, digest, Digestor};
pub use encrypt::encrypt;
pub use export_key::export_key;
pub use generate_key::generate_key;
pub use import_key::import_key;
pub use sign::sign;
pub use verify::verify;
pub use wrapping::{unwrap_key, wrap_key};

use tracing::debug;

use crate::{
    algorithm::AlgorithmId,
    error::{Error, Result},
    key::Key,
    usage::KeyUsage,
};

/// A key may only be used for an operation it was created for, with the algorithm it was
/// created for.
fn check_key_usage(key: &Key, usage: KeyUsage) -> Result<()> {
    if !key.has_usage(usage) {
        debug!("Key usages {:?} do not allow {}", key.usages(), usage.as_str());
        return Err(Error::Unexpected);
    }
    Ok(())
}

fn check_key_algorithm(key: &Key, id: AlgorithmId) -> Result<()> {
    if key.algorithm().id() != id {
        debug!("{} key used with {}", key.algorithm().id(), id);
        return Err(Error::Unexpected);
    }
    Ok(())
}
