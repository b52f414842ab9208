// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::blocks::{Tipset, TipsetKey};

mod ancestors;
mod sampler;

pub use ancestors::Ancestors;
pub use sampler::{RandomnessSeed, Sampler, SamplerAtHead};

/// Chain reading error
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Tipset was not found in the store
    #[error("Tipset not found for key {0}")]
    NotFound(String),
    /// The given tipset has no blocks
    #[error("No blocks for tipset")]
    NoBlocks,
    /// Other chain error
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Other(e.to_string())
    }
}

/// Read access to persisted tipsets, resolved by key. Implemented by chain
/// storage; this crate only ever reads through it.
#[async_trait]
pub trait TipsetStore {
    /// Resolves `key` to its tipset.
    async fn tipset(&self, key: &TipsetKey) -> Result<Arc<Tipset>, Error>;
}

#[async_trait]
impl<T: TipsetStore + Send + Sync + ?Sized> TipsetStore for Arc<T> {
    async fn tipset(&self, key: &TipsetKey) -> Result<Arc<Tipset>, Error> {
        (**self).tipset(key).await
    }
}

#[async_trait]
impl<T: TipsetStore + Send + Sync + ?Sized> TipsetStore for &T {
    async fn tipset(&self, key: &TipsetKey) -> Result<Arc<Tipset>, Error> {
        (**self).tipset(key).await
    }
}
