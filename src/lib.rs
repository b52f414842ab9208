// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Chain-randomness sampling and storage-proof leader election for a
//! proof-of-spacetime blockchain node.
//!
//! The crate has two entry points: [`chain::Sampler`], which derives a
//! deterministic randomness seed for any epoch by walking tipset ancestry,
//! and [`mining::Worker`], which runs one cancellable leader-election
//! attempt against a base tipset and, on a win, assembles a new block.
//!
//! Chain storage, state/power lookups, signing, proof generation and block
//! construction are all consumed through traits; the crate holds no mutable
//! state of its own.

pub mod blocks;
pub mod chain;
pub mod crypto;
pub mod mining;
pub mod types;
pub mod utils;

#[cfg(test)]
pub mod test_utils;
