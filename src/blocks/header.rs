// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use cid::Cid;
use fvm_ipld_encoding::tuple::*;
use fvm_ipld_encoding::DAG_CBOR;
use multihash_codetable::{Code, MultihashDigest};

use crate::blocks::{Error, Ticket, TipsetKey};
use crate::types::{Address, ChainEpoch};

/// Header of a block in the chain, carrying the fields this core reads and
/// produces. Headers are tuple-encoded as DAG-CBOR; a header's identity is
/// the Blake2b-256 content id of that encoding.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize_tuple, Deserialize_tuple)]
pub struct BlockHeader {
    /// Address of the miner that produced the block.
    pub miner: Address,
    /// Randomness commitment chained from the parent tipset's smallest
    /// ticket.
    pub ticket: Ticket,
    /// Key of the parent tipset. Empty for the genesis block.
    pub parents: TipsetKey,
    /// Epoch this block was mined at.
    pub epoch: ChainEpoch,
    /// Unix timestamp of block creation.
    pub timestamp: u64,
}

impl BlockHeader {
    /// Content id of the serialized header.
    pub fn cid(&self) -> Result<Cid, Error> {
        let data = fvm_ipld_encoding::to_vec(self)?;
        Ok(Cid::new_v1(DAG_CBOR, Code::Blake2b256.digest(&data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::VRFProof;

    fn header(ticket: &str, epoch: ChainEpoch) -> BlockHeader {
        BlockHeader {
            miner: Address::new_id(1000),
            ticket: Ticket::new(VRFProof::new(ticket.into())),
            parents: TipsetKey::default(),
            epoch,
            timestamp: 0,
        }
    }

    #[test]
    fn cid_is_deterministic() {
        assert_eq!(header("a", 1).cid().unwrap(), header("a", 1).cid().unwrap());
    }

    #[test]
    fn cid_depends_on_contents() {
        assert_ne!(header("a", 1).cid().unwrap(), header("b", 1).cid().unwrap());
        assert_ne!(header("a", 1).cid().unwrap(), header("a", 2).cid().unwrap());
    }
}
