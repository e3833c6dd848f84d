//! An honest, trusting liberal strategy.
//!
//! Votes yes on everything, always discards fascist policies, tells the
//! truth in every claim, and picks targets uniformly at random.

use crate::agents::{pending_policy, Player};
use crate::core::{Allegiance, GameRng, PlayerId, Policy};
use crate::view::PlayerView;

/// Honest baseline liberal.
#[derive(Debug)]
pub struct NaiveLiberal {
    rng: GameRng,
}

impl NaiveLiberal {
    /// Create a strategy with its own seeded pick stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed).for_context("naive liberal"),
        }
    }

    fn pick(&mut self, candidates: &[PlayerId]) -> PlayerId {
        *self
            .rng
            .choose(candidates)
            .expect("no candidate to pick from")
    }

    fn living_others(&self, state: &PlayerView) -> Vec<PlayerId> {
        state
            .living_players()
            .into_iter()
            .filter(|&p| Some(p) != state.current().your_player_id)
            .collect()
    }
}

impl Player for NaiveLiberal {
    fn select_chancellor(&mut self, state: &PlayerView) -> PlayerId {
        let candidates = state.eligible_chancellor_candidates();
        self.pick(&candidates)
    }

    fn intent_to_vote_on_government(&mut self, state: &PlayerView) -> Option<bool> {
        // Always says how it will vote.
        Some(self.vote_on_government(state))
    }

    fn vote_on_government(&mut self, _state: &PlayerView) -> bool {
        true
    }

    fn select_policy_to_discard_as_president(&mut self, _state: &PlayerView) -> Policy {
        Policy::Fascist
    }

    fn select_policy_to_discard_as_chancellor(&mut self, _state: &PlayerView) -> Policy {
        Policy::Fascist
    }

    fn veto_legislation(&mut self, state: &PlayerView) -> bool {
        pending_policy(state) == Some(Policy::Fascist)
    }

    fn claimed_policy_to_discard_as_president(&mut self, state: &PlayerView) -> (u8, Policy) {
        // The truth, straight from the record.
        let record = state.current();
        (
            record
                .num_fascist_policies_for_president
                .expect("claim is made after the session"),
            record
                .policy_discarded_by_president
                .expect("claim is made after the session"),
        )
    }

    fn claimed_policy_to_discard_as_chancellor(&mut self, state: &PlayerView) -> Policy {
        state
            .current()
            .policy_discarded_by_chancellor
            .expect("claim is made after the session")
    }

    fn select_player_to_investigate(&mut self, state: &PlayerView) -> PlayerId {
        let candidates = self.living_others(state);
        self.pick(&candidates)
    }

    fn claimed_player_investigation_result(&mut self, state: &PlayerView) -> Allegiance {
        state
            .current()
            .investigated_player_allegiance
            .expect("claim is made after the investigation")
    }

    fn select_special_election_president(&mut self, state: &PlayerView) -> PlayerId {
        let candidates = self.living_others(state);
        self.pick(&candidates)
    }

    fn select_player_to_execute(&mut self, state: &PlayerView) -> PlayerId {
        let candidates = state.living_players();
        self.pick(&candidates)
    }
}
