// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod address;
mod sector;

pub use address::Address;
pub use sector::{PoStRandomness, Randomness, SectorInfo, SectorNumber, SectorSize};

/// A chain height. Heights along a chain strictly increase but may skip
/// values where no block was produced (null rounds). Negative values denote
/// epochs before genesis.
pub type ChainEpoch = i64;

/// Total storage committed to the network, in bytes. Kept as a big integer
/// since network totals overflow `u64` at scale.
pub type StoragePower = num_bigint::BigInt;
