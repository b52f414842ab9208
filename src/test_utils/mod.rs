// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! In-memory collaborator doubles shared by the unit tests. Everything here
//! is deterministic so expected tickets, seeds and randomness can be
//! recomputed independently inside assertions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use cid::Cid;
use fvm_ipld_encoding::DAG_CBOR;
use multihash_codetable::{Code, MultihashDigest};

use crate::blocks::{Block, BlockHeader, EPostCandidate, EPostInfo, Ticket, Tipset, TipsetKey, VRFProof};
use crate::chain::{Error as ChainError, TipsetStore};
use crate::crypto::{Signature, Signer};
use crate::mining::{BlockAssembler, PoStGenerator, PowerView, PowerViewError};
use crate::types::{Address, ChainEpoch, PoStRandomness, SectorInfo, SectorSize, StoragePower};

/// Tipset storage backed by a map.
#[derive(Default)]
pub struct MemoryStore {
    tipsets: HashMap<TipsetKey, Arc<Tipset>>,
}

impl MemoryStore {
    pub fn put(&mut self, tipset: Tipset) -> Arc<Tipset> {
        let tipset = Arc::new(tipset);
        self.tipsets.insert(tipset.key().clone(), tipset.clone());
        tipset
    }

    pub fn remove(&mut self, key: &TipsetKey) {
        self.tipsets.remove(key);
    }
}

#[async_trait]
impl TipsetStore for MemoryStore {
    async fn tipset(&self, key: &TipsetKey) -> Result<Arc<Tipset>, ChainError> {
        self.tipsets
            .get(key)
            .cloned()
            .ok_or_else(|| ChainError::NotFound(key.to_string()))
    }
}

pub fn make_header(epoch: ChainEpoch, parents: TipsetKey, ticket: &str) -> BlockHeader {
    BlockHeader {
        miner: Address::new_id(1000),
        ticket: Ticket::new(VRFProof::new(ticket.as_bytes().to_vec())),
        parents,
        epoch,
        timestamp: epoch as u64,
    }
}

/// Builds a chain of single-block tipsets at heights `0..length`, each
/// block's ticket its stringified height. Returns the store and the tipsets
/// in descending height order, head first.
pub fn make_chain(length: usize) -> (MemoryStore, Vec<Arc<Tipset>>) {
    let mut store = MemoryStore::default();
    let mut chain = Vec::with_capacity(length);
    let mut parents = TipsetKey::default();
    for epoch in 0..length as ChainEpoch {
        let header = make_header(epoch, parents.clone(), &epoch.to_string());
        let tipset = store.put(Tipset::new(vec![header]).expect("valid test tipset"));
        parents = tipset.key().clone();
        chain.push(tipset);
    }
    chain.reverse();
    (store, chain)
}

/// Appends a single-block tipset at `epoch` on top of `parent`, leaving a
/// null-round gap if `epoch` is more than one past the parent.
pub fn extend_chain(
    store: &mut MemoryStore,
    parent: &Tipset,
    epoch: ChainEpoch,
    ticket: &str,
) -> Arc<Tipset> {
    let header = make_header(epoch, parent.key().clone(), ticket);
    store.put(Tipset::new(vec![header]).expect("valid test tipset"))
}

/// Sector metadata with a synthetic sealed CID.
pub fn sector(number: u64) -> SectorInfo {
    let sealed = Cid::new_v1(DAG_CBOR, Code::Blake2b256.digest(&number.to_be_bytes()));
    SectorInfo::new(number, sealed)
}

/// Deterministic signer: the "signature" is the address's byte form followed
/// by the input data.
pub struct MockSigner;

impl Signer for MockSigner {
    fn sign_bytes(&self, data: &[u8], address: &Address) -> Result<Signature, anyhow::Error> {
        let mut bytes = address.to_bytes();
        bytes.extend_from_slice(data);
        Ok(Signature::new(bytes))
    }
}

/// Fixed power state for one miner.
pub struct MemoryPowerView {
    /// Worker address lookups fail when `None`.
    pub worker: Option<Address>,
    pub sectors: Vec<SectorInfo>,
    pub sector_size: SectorSize,
    pub network_power: StoragePower,
}

#[async_trait]
impl PowerView for MemoryPowerView {
    async fn miner_worker_address(
        &self,
        _base: &TipsetKey,
        miner: &Address,
    ) -> Result<Address, PowerViewError> {
        self.worker
            .ok_or_else(|| PowerViewError::MinerNotFound(miner.to_string()))
    }

    async fn miner_sector_infos(
        &self,
        _base: &TipsetKey,
        _miner: &Address,
    ) -> Result<Vec<SectorInfo>, PowerViewError> {
        Ok(self.sectors.clone())
    }

    async fn miner_sector_count(
        &self,
        _base: &TipsetKey,
        _miner: &Address,
    ) -> Result<u64, PowerViewError> {
        Ok(self.sectors.len() as u64)
    }

    async fn miner_sector_size(
        &self,
        _base: &TipsetKey,
        _miner: &Address,
    ) -> Result<SectorSize, PowerViewError> {
        Ok(self.sector_size)
    }

    async fn network_power(&self, _base: &TipsetKey) -> Result<StoragePower, PowerViewError> {
        Ok(self.network_power.clone())
    }
}

/// How a mocked proof-engine call resolves.
pub enum Behavior<T> {
    Return(T),
    Fail(String),
    /// Never resolves; lets cancellation win the race.
    Hang,
}

impl<T: Default> Default for Behavior<T> {
    fn default() -> Self {
        Behavior::Return(T::default())
    }
}

impl<T: Clone> Behavior<T> {
    async fn resolve(&self) -> anyhow::Result<T> {
        match self {
            Behavior::Return(value) => Ok(value.clone()),
            Behavior::Fail(msg) => Err(anyhow::anyhow!("{msg}")),
            Behavior::Hang => futures::future::pending().await,
        }
    }
}

/// Proof engine double with scripted outcomes per phase.
#[derive(Default)]
pub struct MockPoster {
    pub candidates: Behavior<Vec<EPostCandidate>>,
    pub post: Behavior<Vec<u8>>,
}

#[async_trait]
impl PoStGenerator for MockPoster {
    async fn generate_candidates(
        &self,
        _randomness: &PoStRandomness,
        _sectors: &[SectorInfo],
    ) -> anyhow::Result<Vec<EPostCandidate>> {
        self.candidates.resolve().await
    }

    async fn generate_post(
        &self,
        _sectors: &[SectorInfo],
        _randomness: &PoStRandomness,
        _winners: &[EPostCandidate],
    ) -> anyhow::Result<Vec<u8>> {
        self.post.resolve().await
    }
}

/// Assembles blocks straight from the attempt's parts, with a fixed
/// timestamp.
pub struct MockAssembler {
    pub miner: Address,
}

#[async_trait]
impl BlockAssembler for MockAssembler {
    async fn assemble(
        &self,
        base: &Tipset,
        ticket: Ticket,
        null_rounds: u64,
        post_info: EPostInfo,
    ) -> anyhow::Result<Block> {
        Ok(Block {
            miner: self.miner,
            ticket,
            parents: base.key().clone(),
            height: base.epoch() + null_rounds as ChainEpoch + 1,
            timestamp: 0,
            epost_info: post_info,
        })
    }
}
