// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Deterministic election math: ticket chaining, proof randomness and the
//! power-weighted win test. Every function here must stay bit-exact with the
//! other implementations of the protocol — divergence forks the network.

use integer_encoding::VarInt;
use num_bigint::{BigInt, Sign};

use crate::blocks::{Ticket, VRFProof};
use crate::crypto::Signer;
use crate::types::{Address, ChainEpoch, PoStRandomness, Randomness, SectorSize, StoragePower};
use crate::utils::encoding::blake2b_256;

/// Number of epochs to look back from the mining epoch when fixing election
/// randomness, so a miner cannot bias its own odds through the ticket it
/// submits in the same epoch.
pub const ELECTION_LOOKBACK: ChainEpoch = 1;

/// Expected number of election winners per epoch across the whole network.
const EXPECTED_LEADERS_PER_EPOCH: u64 = 5;

/// Width in bits of the challenge ticket digest.
const CHALLENGE_BITS: u32 = 256;

/// One challenge is issued per this many (non-faulty) sectors.
const CHALLENGE_RATIO_DIVISOR: u64 = 25;

/// Derives the ticket that would extend the chain past `parent` if this
/// mining attempt wins: a VRF over the parent ticket's digest, keyed by the
/// miner's worker address.
pub fn next_ticket(
    parent: &Ticket,
    worker_addr: &Address,
    signer: &dyn Signer,
) -> anyhow::Result<Ticket> {
    let input = parent.vrfproof.digest();
    let proof = signer.sign_bytes(&input, worker_addr)?;
    Ok(Ticket::new(VRFProof::new(proof.into_bytes())))
}

/// Derives the randomness seeding proof-of-spacetime generation from the
/// election ticket. The null-round count perturbs the input so that distinct
/// null-run lengths yield distinct, unpredictable seeds.
pub fn generate_post_randomness(
    election_ticket: &Ticket,
    worker_addr: &Address,
    signer: &dyn Signer,
    null_rounds: u64,
) -> anyhow::Result<PoStRandomness> {
    let mut input = election_ticket.vrfproof.as_bytes().to_vec();
    input.extend(null_rounds.encode_var_vec());
    let proof = signer.sign_bytes(&input, worker_addr)?;
    Ok(Randomness::new(proof.into_bytes()))
}

/// Challenge ticket derived from a candidate's partial ticket.
pub fn candidate_challenge(partial_ticket: &[u8]) -> [u8; 32] {
    blake2b_256(partial_ticket)
}

/// Number of election challenges issued over a proving set.
pub fn post_challenge_count(sectors: u64, faults: u64) -> u64 {
    let challenged = sectors.saturating_sub(faults);
    if challenged == 0 {
        0
    } else {
        (challenged - 1) / CHALLENGE_RATIO_DIVISOR + 1
    }
}

/// The network's win test: a candidate wins iff its challenge ticket,
/// scaled by total network power and the challenge count, falls below the
/// miner's share of the expected leader slots. Exact integer arithmetic;
/// the challenge is read as a big-endian unsigned integer.
pub fn candidate_wins(
    challenge: &[u8],
    sector_count: u64,
    fault_count: u64,
    network_power: &StoragePower,
    sector_size: SectorSize,
) -> bool {
    let challenge_count = post_challenge_count(sector_count, fault_count);

    let lhs = BigInt::from_bytes_be(Sign::Plus, challenge) * network_power * challenge_count;
    let rhs =
        (BigInt::from(sector_size) << CHALLENGE_BITS) * sector_count * EXPECTED_LEADERS_PER_EPOCH;
    lhs < rhs
}
