// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::{Deserialize, Serialize};

use crate::types::Address;

/// A signature over arbitrary bytes. The scheme is opaque to this crate;
/// ticket and randomness derivation only require that signing the same bytes
/// with the same key is deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    #[serde(with = "fvm_ipld_encoding::strict_bytes")]
    bytes: Vec<u8>,
}

impl Signature {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Signer is a trait which allows a key implementation to sign data for an
/// address.
pub trait Signer {
    /// Signs any arbitrary data with the key backing `address`.
    fn sign_bytes(&self, data: &[u8], address: &Address) -> Result<Signature, anyhow::Error>;
}
