// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! The mining worker. One call to [`Worker::mine`] is one leader-election
//! attempt on a base tipset: derive the next ticket, fix election randomness
//! via the lookback, generate proof candidates, test them against the
//! network's win condition and, on a win, prove and assemble a block.
//!
//! Scheduling attempts — when to start one, whether to retry a failed one —
//! is the caller's job; the worker never retries and imposes no ordering
//! across attempts.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::blocks::{Block, EPostInfo, Ticket, Tipset};
use crate::chain::{Sampler, TipsetStore};
use crate::crypto::Signer;
use crate::mining::{election, BlockAssembler, Error, Output, PoStGenerator, PowerView};
use crate::types::{Address, ChainEpoch};

/// Runs mining attempts against a chain view. All collaborators are injected
/// at construction; the worker itself holds no mutable state and may be
/// shared across attempts.
pub struct Worker<S> {
    sampler: Sampler<Arc<S>>,
    power: Arc<dyn PowerView + Send + Sync>,
    signer: Arc<dyn Signer + Send + Sync>,
    poster: Arc<dyn PoStGenerator + Send + Sync>,
    assembler: Arc<dyn BlockAssembler + Send + Sync>,
    miner_addr: Address,
}

impl<S: TipsetStore + Send + Sync> Worker<S> {
    pub fn new(
        chain: Arc<S>,
        power: Arc<dyn PowerView + Send + Sync>,
        signer: Arc<dyn Signer + Send + Sync>,
        poster: Arc<dyn PoStGenerator + Send + Sync>,
        assembler: Arc<dyn BlockAssembler + Send + Sync>,
        miner_addr: Address,
    ) -> Self {
        Self {
            sampler: Sampler::new(chain),
            power,
            signer,
            poster,
            assembler,
            miner_addr,
        }
    }

    /// Runs one mining attempt on `base`, mining the epoch `null_rounds + 1`
    /// past it. At most one [`Output`] is delivered on `out`: a block on a
    /// win, an error on failure, and nothing at all when the attempt loses
    /// the election or `cancel` fires first. Returns whether a block was
    /// mined.
    pub async fn mine(
        &self,
        cancel: CancellationToken,
        base: Arc<Tipset>,
        null_rounds: u64,
        out: flume::Sender<Output>,
    ) -> bool {
        debug!(%base, null_rounds, "mining on tipset");

        let Some(prev_ticket) = base.min_ticket().cloned() else {
            warn!("mine called with an empty base tipset");
            deliver(&out, Err(Error::InvalidBase));
            return false;
        };
        if cancel.is_cancelled() {
            warn!("mining run cancelled before start");
            return false;
        }

        match self.attempt(&cancel, &base, prev_ticket, null_rounds).await {
            Ok(Some(block)) => {
                deliver(&out, Ok(block));
                true
            }
            // Lost the election, or cancelled mid-flight: silence.
            Ok(None) => false,
            Err(e) => {
                deliver(&out, Err(e));
                false
            }
        }
    }

    async fn attempt(
        &self,
        cancel: &CancellationToken,
        base: &Arc<Tipset>,
        prev_ticket: Ticket,
        null_rounds: u64,
    ) -> Result<Option<Block>, Error> {
        let base_key = base.key();

        let worker_addr = self
            .power
            .miner_worker_address(base_key, &self.miner_addr)
            .await?;

        let next_ticket = election::next_ticket(&prev_ticket, &worker_addr, self.signer.as_ref())
            .map_err(|e| Error::TicketGeneration(e.to_string()))?;

        // Election randomness is fixed a constant number of epochs behind
        // the epoch being mined, not at the base ticket itself.
        let mining_epoch = base.epoch() + null_rounds as ChainEpoch + 1;
        let lookback = self
            .sampler
            .tipset_at_epoch(base.clone(), mining_epoch - election::ELECTION_LOOKBACK)
            .await?;
        let election_ticket = lookback.min_ticket().ok_or(crate::chain::Error::NoBlocks)?;

        let post_randomness = election::generate_post_randomness(
            election_ticket,
            &worker_addr,
            self.signer.as_ref(),
            null_rounds,
        )
        .map_err(|e| Error::Randomness(e.to_string()))?;

        // Snapshot the power state for this attempt.
        let sector_infos = self
            .power
            .miner_sector_infos(base_key, &self.miner_addr)
            .await?;
        let sector_count = self
            .power
            .miner_sector_count(base_key, &self.miner_addr)
            .await?;
        let network_power = self.power.network_power(base_key).await?;
        let sector_size = self
            .power
            .miner_sector_size(base_key, &self.miner_addr)
            .await?;

        // Candidate generation runs on its own task and races cancellation.
        let generate = {
            let poster = Arc::clone(&self.poster);
            let randomness = post_randomness.clone();
            let sectors = sector_infos.clone();
            tokio::spawn(async move { poster.generate_candidates(&randomness, &sectors).await })
        };
        let candidates = match race_cancellation(cancel, generate).await {
            None => {
                info!(%base, null_rounds, "mining run on tipset cancelled");
                return Ok(None);
            }
            Some(Err(e)) => return Err(Error::ProofEngine(e.to_string())),
            Some(Ok(candidates)) => candidates,
        };

        let mut winners = Vec::new();
        for candidate in candidates {
            let challenge = election::candidate_challenge(&candidate.partial_ticket);
            // TODO: plumb the real fault count out of the power view; faults
            // are counted as zero here.
            if election::candidate_wins(&challenge, sector_count, 0, &network_power, sector_size) {
                winners.push(candidate);
            }
        }
        if winners.is_empty() {
            debug!(%base, "no winning candidates on tipset");
            return Ok(None);
        }

        // Same race for the aggregate proof over the winners.
        let prove = {
            let poster = Arc::clone(&self.poster);
            let randomness = post_randomness.clone();
            let sectors = sector_infos;
            let winners = winners.clone();
            tokio::spawn(async move { poster.generate_post(&sectors, &randomness, &winners).await })
        };
        let proof = match race_cancellation(cancel, prove).await {
            None => {
                info!(%base, null_rounds, "mining run on tipset cancelled");
                return Ok(None);
            }
            Some(Err(e)) => return Err(Error::ProofEngine(e.to_string())),
            Some(Ok(proof)) => proof,
        };

        let post_info = EPostInfo::new(proof, post_randomness, winners);
        let block = self
            .assembler
            .assemble(base, next_ticket, null_rounds, post_info)
            .await
            .map_err(|e| Error::BlockAssembly(e.to_string()))?;
        if let Ok(cid) = block.cid() {
            debug!(%cid, "mined a new winning block");
        }
        Ok(Some(block))
    }
}

/// Waits for a spawned proof task unless `cancel` fires first.
///
/// Returns `None` on cancellation. The task is abandoned, not aborted: it
/// runs to its natural completion and its result is dropped.
async fn race_cancellation<T>(
    cancel: &CancellationToken,
    task: JoinHandle<anyhow::Result<T>>,
) -> Option<anyhow::Result<T>> {
    tokio::select! {
        _ = cancel.cancelled() => None,
        joined = task => {
            Some(joined.unwrap_or_else(|e| Err(anyhow::anyhow!("proof task died: {e}"))))
        }
    }
}

fn deliver(out: &flume::Sender<Output>, output: Output) {
    if out.send(output).is_err() {
        warn!("mining output receiver dropped before delivery");
    }
}
