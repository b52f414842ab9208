// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::io::Write;
use std::sync::Arc;

use byteorder::{BigEndian, WriteBytesExt};

use crate::blocks::{Tipset, TipsetKey};
use crate::chain::{Ancestors, Error, TipsetStore};
use crate::types::ChainEpoch;
use crate::utils::encoding::blake2b_256;

/// A 32 byte randomness seed drawn from the chain.
pub type RandomnessSeed = [u8; 32];

/// A sampler draws randomness seeds from the chain. The seed is computed
/// from the minimum ticket of the tipset at or before the requested epoch,
/// mixed with the epoch itself, and is thus unique per epoch even across a
/// run of null rounds sharing one underlying tipset.
///
/// Sampling the same (head, epoch) pair always reproduces the same seed.
pub struct Sampler<S> {
    store: S,
}

impl<S: TipsetStore> Sampler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Draws a randomness seed from the chain identified by `head` and the
    /// highest tipset with height at or below `epoch`.
    ///
    /// `head` being the empty key means no chain exists yet (the genesis
    /// case); the seed is then derived from an empty ticket proof. An epoch
    /// beyond the head falls back to the head, a negative epoch to genesis;
    /// neither is an error. Only chain-read failures propagate.
    pub async fn sample(
        &self,
        head: &TipsetKey,
        epoch: ChainEpoch,
    ) -> Result<RandomnessSeed, Error> {
        let ticket_proof = if head.is_empty() {
            Vec::new()
        } else {
            let start = self.store.tipset(head).await?;
            let tip = self.tipset_at_epoch(start, epoch).await?;
            tip.min_ticket()
                .ok_or(Error::NoBlocks)?
                .vrfproof
                .as_bytes()
                .to_vec()
        };

        draw_seed(&ticket_proof, epoch)
    }

    /// Finds the highest tipset with height at or below `epoch` by walking
    /// backward from `start`. Returns the genesis tipset when the walk
    /// completes without finding one.
    pub async fn tipset_at_epoch(
        &self,
        start: Arc<Tipset>,
        epoch: ChainEpoch,
    ) -> Result<Arc<Tipset>, Error> {
        let mut last = start.clone();
        let mut walk = Ancestors::new(&self.store, start);
        while let Some(tip) = walk.next().await? {
            if tip.epoch() <= epoch {
                return Ok(tip);
            }
            last = tip;
        }
        // The walk completed: `last` is the genesis tipset.
        Ok(last)
    }
}

/// Mixes a ticket proof digest with the requested epoch, big-endian, and
/// hashes the result into the final seed.
fn draw_seed(vrf_proof: &[u8], epoch: ChainEpoch) -> Result<RandomnessSeed, Error> {
    let mut state = blake2b_simd::Params::new().hash_length(32).to_state();
    state.write_all(&blake2b_256(vrf_proof))?;
    state.write_i64::<BigEndian>(epoch)?;

    let mut ret = [0u8; 32];
    ret.clone_from_slice(state.finalize().as_bytes());
    Ok(ret)
}

/// A chain sampler bound to a specific head tipset key, for callers drawing
/// many samples against one stable chain view.
pub struct SamplerAtHead<S> {
    sampler: Sampler<S>,
    head: TipsetKey,
}

impl<S: TipsetStore> SamplerAtHead<S> {
    pub fn new(store: S, head: TipsetKey) -> Self {
        Self {
            sampler: Sampler::new(store),
            head,
        }
    }

    pub async fn sample(&self, epoch: ChainEpoch) -> Result<RandomnessSeed, Error> {
        self.sampler.sample(&self.head, epoch).await
    }
}
