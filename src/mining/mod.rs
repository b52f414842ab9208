// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use async_trait::async_trait;
use thiserror::Error;

use crate::blocks::{Block, EPostCandidate, EPostInfo, Ticket, Tipset};
use crate::types::{PoStRandomness, SectorInfo};

pub mod election;
mod power;
mod worker;

pub use power::{PowerView, PowerViewError};
pub use worker::Worker;

/// The result of a single mining run, delivered at most once per attempt on
/// the caller-supplied channel. A cancelled run delivers nothing.
pub type Output = Result<Block, Error>;

/// Mining error
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The base tipset handed to the worker has no blocks
    #[error("bad input tipset with no blocks sent to mine")]
    InvalidBase,
    /// Resolving or traversing the chain failed
    #[error("chain read failed: {0}")]
    ChainRead(#[from] crate::chain::Error),
    /// Reading the power state snapshot failed
    #[error("power view read failed: {0}")]
    PowerView(#[from] PowerViewError),
    /// Deriving the next ticket failed
    #[error("ticket generation failed: {0}")]
    TicketGeneration(String),
    /// Deriving proof randomness failed
    #[error("generating proof randomness failed: {0}")]
    Randomness(String),
    /// The external proof engine failed
    #[error("proof generation failed: {0}")]
    ProofEngine(String),
    /// Assembling the won block failed
    #[error("block assembly failed: {0}")]
    BlockAssembly(String),
}

/// The external storage-proof engine. Both calls are potentially
/// long-running; the worker invokes each exactly once per attempt, on its
/// own task.
#[async_trait]
pub trait PoStGenerator {
    /// Generates candidate proofs for the given sectors against `randomness`.
    async fn generate_candidates(
        &self,
        randomness: &PoStRandomness,
        sectors: &[SectorInfo],
    ) -> anyhow::Result<Vec<EPostCandidate>>;

    /// Generates the aggregate proof over the winning candidates.
    async fn generate_post(
        &self,
        sectors: &[SectorInfo],
        randomness: &PoStRandomness,
        winners: &[EPostCandidate],
    ) -> anyhow::Result<Vec<u8>>;
}

/// Builds a full block out of the parts a winning attempt produced. Message
/// selection, state computation and signing happen behind this boundary.
#[async_trait]
pub trait BlockAssembler {
    async fn assemble(
        &self,
        base: &Tipset,
        ticket: Ticket,
        null_rounds: u64,
        post_info: EPostInfo,
    ) -> anyhow::Result<Block>;
}
