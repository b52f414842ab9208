// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;

use integer_encoding::VarInt;
use serde::{Deserialize, Serialize};

/// Address protocol identifier for ID-addressed actors.
const ID_PROTOCOL: u8 = 0;

/// The address of an on-chain actor. Only ID addresses flow through this
/// core; key-hash protocols are resolved to IDs by the state view before
/// they reach us.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Address(u64);

impl Address {
    /// Creates an address for the actor with the given ID.
    pub const fn new_id(id: u64) -> Self {
        Self(id)
    }

    /// Returns the actor ID this address refers to.
    pub fn id(&self) -> u64 {
        self.0
    }

    /// Byte representation used as signing input: the protocol byte followed
    /// by the varint-encoded actor ID.
    pub fn to_bytes(self) -> Vec<u8> {
        let mut bytes = vec![ID_PROTOCOL];
        bytes.extend(self.0.encode_var_vec());
        bytes
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t0{}", self.0)
    }
}
