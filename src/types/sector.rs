// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use cid::Cid;
use serde::{Deserialize, Serialize};

/// Numeric identifier for a sector, unique per miner.
pub type SectorNumber = u64;

/// Size of a sector in bytes.
pub type SectorSize = u64;

/// Opaque randomness drawn for a proof or an election.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Randomness(#[serde(with = "fvm_ipld_encoding::strict_bytes")] pub Vec<u8>);

impl Randomness {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Randomness type used for generating PoSt proof randomness.
pub type PoStRandomness = Randomness;

/// Metadata of one proven sector, as the proof engine needs it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorInfo {
    pub sector_number: SectorNumber,
    pub sealed_cid: Cid,
}

impl SectorInfo {
    pub fn new(sector_number: SectorNumber, sealed_cid: Cid) -> Self {
        Self {
            sector_number,
            sealed_cid,
        }
    }
}
