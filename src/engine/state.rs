//! Mutable engine-side state, distinct from the append-only history.
//!
//! Everything in [`GameState`] is derivable from the round chain; the engine
//! keeps this forward copy so the hot loop never walks the chain.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::core::PlayerId;

/// A president/chancellor pair that won an election.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Government {
    pub president: PlayerId,
    pub chancellor: PlayerId,
}

/// The hidden role layout fixed at setup.
///
/// `liberals` and `fascists` must partition the seats, and `hitler` must
/// appear in `fascists`. [`Game::new`](crate::engine::Game::new) validates
/// all of this and refuses to construct a game otherwise.
#[derive(Clone, Debug)]
pub struct RoleAssignment {
    pub liberals: FxHashSet<PlayerId>,
    pub fascists: FxHashSet<PlayerId>,
    pub hitler: PlayerId,
}

/// Forward-state the engine mutates as rounds resolve.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Rotation of living presidents. The front seat presides next; executed
    /// players are removed outright.
    pub(crate) presidential_order: VecDeque<PlayerId>,
    pub(crate) executed: FxHashSet<PlayerId>,
    /// Set by a special election; consumed (not rotated) by the next round.
    pub(crate) special_election_next_president: Option<PlayerId>,
    pub(crate) previous_government: Option<Government>,
    pub(crate) anarchy_streak: u8,
    pub(crate) liberal_policies_passed: u8,
    pub(crate) fascist_policies_passed: u8,
    pub(crate) shot_hitler: bool,
    pub(crate) elected_hitler: bool,
}

impl GameState {
    pub(crate) fn new(presidential_order: Vec<PlayerId>) -> Self {
        GameState {
            presidential_order: presidential_order.into(),
            executed: FxHashSet::default(),
            special_election_next_president: None,
            previous_government: None,
            anarchy_streak: 0,
            liberal_policies_passed: 0,
            fascist_policies_passed: 0,
            shot_hitler: false,
            elected_hitler: false,
        }
    }
}
