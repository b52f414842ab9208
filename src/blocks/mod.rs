// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

mod block;
mod header;
mod ticket;
mod tipset;
mod vrf_proof;

pub use block::{Block, EPostCandidate, EPostInfo};
pub use header::BlockHeader;
pub use ticket::Ticket;
pub use tipset::{Tipset, TipsetKey};
pub use vrf_proof::VRFProof;

/// Blockchain blocks error
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Tipset contains invalid data, as described by the string parameter.
    #[error("Invalid tipset: {0}")]
    InvalidTipset(String),
    /// The given tipset has no blocks
    #[error("No blocks for tipset")]
    NoBlocks,
    /// Serialization of a block failed
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl From<fvm_ipld_encoding::Error> for Error {
    fn from(e: fvm_ipld_encoding::Error) -> Self {
        Error::Encoding(e.to_string())
    }
}
