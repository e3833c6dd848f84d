//! The player capability interface and reference strategies.
//!
//! Every method is called synchronously with the agent's perceived state
//! (a prefix of the round history) and must return a plain domain value.
//! The engine validates returns against the rules; a panic or an
//! out-of-domain value is captured at the fault boundary and ends the game
//! with the offender's team losing. One chance per decision, no retry.
//!
//! The set of strategies is open: anything implementing [`Player`] can sit
//! at the table. Methods take `&mut self` so a strategy may own a seeded
//! RNG; beyond that the interface is state-in, value-out.

pub mod aggro_fascist;
pub mod naive_liberal;

pub use aggro_fascist::AggroFascist;
pub use naive_liberal::NaiveLiberal;

use crate::core::{Allegiance, PlayerId, Policy};
use crate::view::PlayerView;

/// A decision-making agent occupying one seat.
pub trait Player {
    // === Forming government ===

    /// Select the chancellor nominee for the proposed government.
    ///
    /// Only called while this seat is president. Must return an eligible
    /// living seat.
    fn select_chancellor(&mut self, state: &PlayerView) -> PlayerId;

    /// Publicly declare how this seat intends to vote on the proposed
    /// government: ja (`Some(true)`), nein (`Some(false)`), or no
    /// declaration (`None`). Advisory only; has no rule effect.
    fn intent_to_vote_on_government(&mut self, state: &PlayerView) -> Option<bool>;

    /// Cast the binding vote on the proposed government.
    fn vote_on_government(&mut self, state: &PlayerView) -> bool;

    // === Legislative session ===

    /// The policy to discard as president, when the drawn hand leaves a
    /// choice.
    fn select_policy_to_discard_as_president(&mut self, state: &PlayerView) -> Policy;

    /// The policy to discard as chancellor, when the passed pair leaves a
    /// choice.
    fn select_policy_to_discard_as_chancellor(&mut self, state: &PlayerView) -> Policy;

    /// Whether to veto the legislation. Asked of the chancellor first and,
    /// if the chancellor vetoes, of the president. Only reachable once five
    /// fascist policies have passed.
    fn veto_legislation(&mut self, state: &PlayerView) -> bool;

    // === Legislative session claims (this is where you lie) ===

    /// The publicly claimed number of fascist cards drawn (0..=3) and the
    /// publicly claimed discard, as president. Independent of the truth.
    fn claimed_policy_to_discard_as_president(&mut self, state: &PlayerView) -> (u8, Policy);

    /// The publicly claimed discard as chancellor. Independent of the truth.
    fn claimed_policy_to_discard_as_chancellor(&mut self, state: &PlayerView) -> Policy;

    // === Executive actions ===

    /// The living, non-self seat to investigate (after the 1st or 2nd
    /// fascist policy).
    fn select_player_to_investigate(&mut self, state: &PlayerView) -> PlayerId;

    /// The publicly claimed result of the investigation, truthful or not.
    fn claimed_player_investigation_result(&mut self, state: &PlayerView) -> Allegiance;

    /// The living, non-self seat to preside over the next round's special
    /// election (after the 3rd fascist policy).
    fn select_special_election_president(&mut self, state: &PlayerView) -> PlayerId;

    /// The living seat to execute (after the 4th or 5th fascist policy).
    fn select_player_to_execute(&mut self, state: &PlayerView) -> PlayerId;
}

/// The policy left standing after the chancellor's discard, reconstructed
/// from the current record. `None` before the chancellor's discard is known.
///
/// Shared by strategies deciding on a veto: at that point the enacted policy
/// is not yet recorded, but both offices can derive it.
#[must_use]
pub fn pending_policy(state: &PlayerView) -> Option<Policy> {
    let record = state.current();
    let fascists_left = record.num_fascist_policies_for_chancellor?;
    match fascists_left {
        0 => Some(Policy::Liberal),
        1 => Some(record.policy_discarded_by_chancellor?.other()),
        2 => Some(Policy::Fascist),
        _ => None,
    }
}
