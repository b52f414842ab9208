// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::{Deserialize, Serialize};

use crate::utils::encoding::blake2b_256;

/// The output from running a VRF proof.
#[derive(Clone, Debug, PartialEq, Eq, Ord, PartialOrd, Default, Serialize, Deserialize, Hash)]
pub struct VRFProof(#[serde(with = "fvm_ipld_encoding::strict_bytes")] pub Vec<u8>);

impl VRFProof {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns reference to underlying proof bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Compute the `BLAKE2b256` digest of the proof.
    pub fn digest(&self) -> [u8; 32] {
        blake2b_256(&self.0)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for VRFProof {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self::new(Vec::arbitrary(g))
    }
}
