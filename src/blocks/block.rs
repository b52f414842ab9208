// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use cid::Cid;
use fvm_ipld_encoding::tuple::*;
use fvm_ipld_encoding::DAG_CBOR;
use multihash_codetable::{Code, MultihashDigest};

use crate::blocks::{Error, Ticket, TipsetKey};
use crate::types::{Address, ChainEpoch, PoStRandomness, SectorNumber};

/// A tentative per-sector storage-proof result, produced by the proof engine
/// and discarded after win evaluation unless it wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct EPostCandidate {
    pub sector_number: SectorNumber,
    #[serde(with = "fvm_ipld_encoding::strict_bytes")]
    pub partial_ticket: Vec<u8>,
    pub challenge_index: u64,
}

impl EPostCandidate {
    pub fn new(sector_number: SectorNumber, partial_ticket: Vec<u8>, challenge_index: u64) -> Self {
        Self {
            sector_number,
            partial_ticket,
            challenge_index,
        }
    }
}

/// The election-proof payload of a winning block: the aggregate proof over
/// the winning candidates, the randomness it was generated against, and the
/// winners themselves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct EPostInfo {
    #[serde(with = "fvm_ipld_encoding::strict_bytes")]
    pub proof: Vec<u8>,
    pub post_randomness: PoStRandomness,
    pub candidates: Vec<EPostCandidate>,
}

impl EPostInfo {
    pub fn new(
        proof: Vec<u8>,
        post_randomness: PoStRandomness,
        candidates: Vec<EPostCandidate>,
    ) -> Self {
        Self {
            proof,
            post_randomness,
            candidates,
        }
    }
}

/// A block assembled by a winning mining attempt, ready for propagation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct Block {
    pub miner: Address,
    pub ticket: Ticket,
    pub parents: TipsetKey,
    pub height: ChainEpoch,
    pub timestamp: u64,
    pub epost_info: EPostInfo,
}

impl Block {
    /// Content id of the serialized block.
    pub fn cid(&self) -> Result<Cid, Error> {
        let data = fvm_ipld_encoding::to_vec(self)?;
        Ok(Cid::new_v1(DAG_CBOR, Code::Blake2b256.digest(&data)))
    }
}
