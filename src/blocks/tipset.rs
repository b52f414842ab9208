// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;
use std::sync::LazyLock;

use cid::Cid;
use serde::{Deserialize, Serialize};

use crate::blocks::{BlockHeader, Error, Ticket};
use crate::types::ChainEpoch;

static EMPTY_KEY: LazyLock<TipsetKey> = LazyLock::new(TipsetKey::default);

/// An immutable set of block CIDs forming a unique key for a tipset.
///
/// Keys are order-independent: the CIDs are kept sorted, so equal sets
/// compare equal regardless of the order blocks were supplied in. The empty
/// key is distinguished and denotes "no chain yet".
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TipsetKey {
    cids: Vec<Cid>,
}

impl TipsetKey {
    /// Builds a key from a collection of block CIDs. Duplicates are dropped.
    pub fn new(mut cids: Vec<Cid>) -> Self {
        cids.sort();
        cids.dedup();
        Self { cids }
    }

    pub fn cids(&self) -> &[Cid] {
        &self.cids
    }

    /// True for the distinguished empty key.
    pub fn is_empty(&self) -> bool {
        self.cids.is_empty()
    }

    /// The distinguished empty key.
    pub fn empty() -> &'static TipsetKey {
        &EMPTY_KEY
    }
}

impl fmt::Display for TipsetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, cid) in self.cids.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{cid}")?;
        }
        write!(f, "}}")
    }
}

/// An immutable set of blocks at the same height with the same parent set.
///
/// Blocks are kept in canonical order (by ticket, ties broken by CID), so
/// the first block always carries the tipset's smallest ticket. The default
/// value is the undefined tipset, which has no blocks; mining rejects it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tipset {
    blocks: Vec<BlockHeader>,
    key: TipsetKey,
}

impl Tipset {
    /// Builds a new tipset from a collection of blocks. The blocks must be
    /// non-empty, share one epoch and one parent set.
    pub fn new(blocks: Vec<BlockHeader>) -> Result<Self, Error> {
        verify_blocks(&blocks)?;

        let mut pairs = blocks
            .into_iter()
            .map(|b| Ok((b.cid()?, b)))
            .collect::<Result<Vec<(Cid, BlockHeader)>, Error>>()?;
        pairs.sort_by(|(ca, a), (cb, b)| a.ticket.cmp(&b.ticket).then_with(|| ca.cmp(cb)));

        let key = TipsetKey::new(pairs.iter().map(|(c, _)| *c).collect());
        let blocks = pairs.into_iter().map(|(_, b)| b).collect();
        Ok(Self { blocks, key })
    }

    /// The blocks of the tipset, in canonical (ticket) order.
    pub fn blocks(&self) -> &[BlockHeader] {
        &self.blocks
    }

    /// Epoch of the tipset. Zero for the undefined tipset.
    pub fn epoch(&self) -> ChainEpoch {
        self.blocks.first().map_or(0, |b| b.epoch)
    }

    /// The order-independent key identifying this tipset.
    pub fn key(&self) -> &TipsetKey {
        &self.key
    }

    /// Key of the parent tipset; empty at genesis (and for the undefined
    /// tipset).
    pub fn parents(&self) -> &TipsetKey {
        self.blocks
            .first()
            .map_or(TipsetKey::empty(), |b| &b.parents)
    }

    /// The smallest ticket among the tipset's blocks, the tipset's canonical
    /// randomness anchor. `None` only for the undefined tipset.
    pub fn min_ticket(&self) -> Option<&Ticket> {
        self.blocks.first().map(|b| &b.ticket)
    }
}

impl fmt::Display for Tipset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.key, self.epoch())
    }
}

fn verify_blocks(blocks: &[BlockHeader]) -> Result<(), Error> {
    let first = blocks.first().ok_or(Error::NoBlocks)?;
    for block in &blocks[1..] {
        if block.epoch != first.epoch {
            return Err(Error::InvalidTipset("epochs are not equal".to_string()));
        }
        if block.parents != first.parents {
            return Err(Error::InvalidTipset(
                "parent cids are not equal".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::VRFProof;
    use crate::types::Address;

    fn header(ticket: &str, epoch: ChainEpoch, parents: TipsetKey) -> BlockHeader {
        BlockHeader {
            miner: Address::new_id(1000),
            ticket: Ticket::new(VRFProof::new(ticket.into())),
            parents,
            epoch,
            timestamp: 0,
        }
    }

    #[test]
    fn rejects_empty_block_set() {
        assert_eq!(Tipset::new(vec![]), Err(Error::NoBlocks));
    }

    #[test]
    fn rejects_mismatched_epochs() {
        let blocks = vec![
            header("a", 1, TipsetKey::default()),
            header("b", 2, TipsetKey::default()),
        ];
        assert!(matches!(Tipset::new(blocks), Err(Error::InvalidTipset(_))));
    }

    #[test]
    fn rejects_mismatched_parents() {
        let other = TipsetKey::new(vec![header("x", 0, TipsetKey::default()).cid().unwrap()]);
        let blocks = vec![
            header("a", 1, TipsetKey::default()),
            header("b", 1, other),
        ];
        assert!(matches!(Tipset::new(blocks), Err(Error::InvalidTipset(_))));
    }

    #[test]
    fn key_is_order_independent() {
        let a = header("a", 3, TipsetKey::default());
        let b = header("b", 3, TipsetKey::default());
        let ts1 = Tipset::new(vec![a.clone(), b.clone()]).unwrap();
        let ts2 = Tipset::new(vec![b, a]).unwrap();
        assert_eq!(ts1.key(), ts2.key());
        assert_eq!(ts1, ts2);
    }

    #[test]
    fn undefined_tipset_has_no_ticket() {
        let ts = Tipset::default();
        assert!(ts.min_ticket().is_none());
        assert!(ts.key().is_empty());
        assert!(ts.parents().is_empty());
    }

    #[quickcheck_macros::quickcheck]
    fn min_ticket_is_smallest(t1: Ticket, t2: Ticket, t3: Ticket) -> bool {
        let tickets = [t1, t2, t3];
        let blocks = tickets
            .iter()
            .map(|t| BlockHeader {
                miner: Address::new_id(1000),
                ticket: t.clone(),
                parents: TipsetKey::default(),
                epoch: 5,
                timestamp: 0,
            })
            .collect();
        let ts = Tipset::new(blocks).unwrap();
        ts.min_ticket() == tickets.iter().min()
    }
}
