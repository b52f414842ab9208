// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use async_trait::async_trait;
use thiserror::Error;

use crate::blocks::TipsetKey;
use crate::types::{Address, SectorInfo, SectorSize, StoragePower};

/// Power view error
#[derive(Debug, PartialEq, Eq, Error)]
pub enum PowerViewError {
    /// Miner actor not found in the state keyed by the given tipset
    #[error("miner {0} does not exist")]
    MinerNotFound(String),
    /// Error originating from state
    #[error("{0}")]
    State(String),
    /// Other power view error
    #[error("{0}")]
    Other(String),
}

/// Read-only view of miner and network power state, keyed by the tipset the
/// state was computed at. All answers are snapshots valid for one mining
/// attempt only.
#[async_trait]
pub trait PowerView {
    /// The miner's current control (worker) address.
    async fn miner_worker_address(
        &self,
        base: &TipsetKey,
        miner: &Address,
    ) -> Result<Address, PowerViewError>;

    /// The miner's proving sector set.
    async fn miner_sector_infos(
        &self,
        base: &TipsetKey,
        miner: &Address,
    ) -> Result<Vec<SectorInfo>, PowerViewError>;

    /// Number of sectors in the miner's proving set.
    async fn miner_sector_count(
        &self,
        base: &TipsetKey,
        miner: &Address,
    ) -> Result<u64, PowerViewError>;

    /// The miner's sector size.
    async fn miner_sector_size(
        &self,
        base: &TipsetKey,
        miner: &Address,
    ) -> Result<SectorSize, PowerViewError>;

    /// Total power committed to the network.
    async fn network_power(&self, base: &TipsetKey) -> Result<StoragePower, PowerViewError>;
}
