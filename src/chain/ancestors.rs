// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::Arc;

use crate::blocks::{Tipset, TipsetKey};
use crate::chain::{Error, TipsetStore};

enum State {
    Yield(Arc<Tipset>),
    Load(TipsetKey),
    Done,
}

/// A lazy, single-pass walk over a tipset's ancestry, in strictly decreasing
/// height order, ending at the genesis tipset.
///
/// Each step re-reads the backing store; nothing is cached. Repeated walks
/// over the same chain pay the full traversal each time — a cache indexed
/// directly by epoch could speed up repeated samples from the same chain.
pub struct Ancestors<'a, S> {
    store: &'a S,
    state: State,
}

impl<'a, S: TipsetStore> Ancestors<'a, S> {
    /// Starts a walk at `start`, which is yielded first.
    pub fn new(store: &'a S, start: Arc<Tipset>) -> Self {
        Self {
            store,
            state: State::Yield(start),
        }
    }

    /// Yields the next tipset in the walk, or `None` once the genesis tipset
    /// has been returned. Fails if a parent key cannot be resolved; a failed
    /// walk stays exhausted.
    pub async fn next(&mut self) -> Result<Option<Arc<Tipset>>, Error> {
        let ts = match std::mem::replace(&mut self.state, State::Done) {
            State::Done => return Ok(None),
            State::Yield(ts) => ts,
            State::Load(key) => self.store.tipset(&key).await?,
        };
        if !ts.parents().is_empty() {
            self.state = State::Load(ts.parents().clone());
        }
        Ok(Some(ts))
    }
}
