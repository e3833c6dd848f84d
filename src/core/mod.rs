//! Core types: player identity, allegiances and policies, RNG.
//!
//! This module contains the fundamental building blocks shared by the deck,
//! the history chain, and the engine.

pub mod player;
pub mod rng;
pub mod types;

pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use types::{
    party_membership, Allegiance, Policy, FASCIST_POLICIES_TO_WIN, FASCIST_POLICY_COUNT,
    LIBERAL_POLICIES_TO_WIN, LIBERAL_POLICY_COUNT,
};
