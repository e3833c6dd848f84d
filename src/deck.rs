//! The policy deck.
//!
//! Owns the ordered sequence of policy cards and a dedicated RNG stream for
//! reshuffles. The stream is kept as a [`GameRngState`] snapshot and only
//! materialized around a shuffle: the snapshot is restored before the shuffle
//! and saved again after it, so randomness consumed anywhere else in the
//! process (agents included) cannot alter deck order, and re-runs with the
//! same seed reproduce identical decks.

use crate::core::{
    GameRng, GameRngState, Policy, FASCIST_POLICY_COUNT, LIBERAL_POLICY_COUNT,
};
use serde::{Deserialize, Serialize};

/// Minimum cards required before a legislative session; below this the deck
/// is rebuilt.
pub const RESHUFFLE_THRESHOLD: usize = 3;

/// The deck of policy cards to be drawn. The front of `cards` is the top.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolicyDeck {
    cards: Vec<Policy>,
    rng_state: GameRngState,
}

impl PolicyDeck {
    /// Create a deck from pre-arranged cards.
    ///
    /// The caller controls the initial order (the construction contract asks
    /// for a pre-shuffled deck); `rng` seeds the stream used for rebuilds.
    #[must_use]
    pub fn new(cards: Vec<Policy>, rng: &GameRng) -> Self {
        Self {
            cards,
            rng_state: rng.for_context("policy deck").state(),
        }
    }

    /// Create a standard 17-card deck (11 fascist, 6 liberal), shuffled with
    /// the deck's own stream.
    #[must_use]
    pub fn shuffled(seed: u64) -> Self {
        let mut rng = GameRng::new(seed).for_context("policy deck");
        let mut cards = Self::unpassed_cards(0, 0);
        rng.shuffle(&mut cards);
        Self {
            cards,
            rng_state: rng.state(),
        }
    }

    /// Number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether the deck has too few cards for a legislative session.
    #[must_use]
    pub fn needs_reshuffle(&self) -> bool {
        self.cards.len() < RESHUFFLE_THRESHOLD
    }

    /// Draw the top card.
    ///
    /// The engine reshuffles before every round, so an empty deck here is an
    /// engine defect, not a game state.
    pub fn draw(&mut self) -> Policy {
        assert!(!self.cards.is_empty(), "drew from an empty policy deck");
        self.cards.remove(0)
    }

    /// Draw the top three cards for a legislative session.
    pub fn draw_hand(&mut self) -> [Policy; 3] {
        [self.draw(), self.draw(), self.draw()]
    }

    /// Rebuild the deck from the cards not yet passed and reshuffle it.
    ///
    /// After the rebuild the deck holds `11 - fascist_passed` fascist and
    /// `6 - liberal_passed` liberal cards. The dedicated stream snapshot is
    /// restored before the shuffle and saved after it.
    pub fn rebuild(&mut self, liberal_passed: u8, fascist_passed: u8) {
        let mut rng = GameRng::from_state(&self.rng_state);
        self.cards = Self::unpassed_cards(liberal_passed, fascist_passed);
        rng.shuffle(&mut self.cards);
        self.rng_state = rng.state();
    }

    fn unpassed_cards(liberal_passed: u8, fascist_passed: u8) -> Vec<Policy> {
        let fascist = FASCIST_POLICY_COUNT.saturating_sub(fascist_passed) as usize;
        let liberal = LIBERAL_POLICY_COUNT.saturating_sub(liberal_passed) as usize;
        let mut cards = vec![Policy::Fascist; fascist];
        cards.extend(std::iter::repeat(Policy::Liberal).take(liberal));
        cards
    }

    fn count(&self, kind: Policy) -> usize {
        self.cards.iter().filter(|&&c| c == kind).count()
    }

    /// Fascist cards remaining in the deck.
    #[must_use]
    pub fn fascist_cards(&self) -> usize {
        self.count(Policy::Fascist)
    }

    /// Liberal cards remaining in the deck.
    #[must_use]
    pub fn liberal_cards(&self) -> usize {
        self.count(Policy::Liberal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_deck_composition() {
        let deck = PolicyDeck::shuffled(42);

        assert_eq!(deck.len(), 17);
        assert_eq!(deck.fascist_cards(), 11);
        assert_eq!(deck.liberal_cards(), 6);
        assert!(!deck.needs_reshuffle());
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let mut a = PolicyDeck::shuffled(7);
        let mut b = PolicyDeck::shuffled(7);

        for _ in 0..17 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_draw_removes_from_front() {
        let rng = GameRng::new(0);
        let mut deck = PolicyDeck::new(
            vec![Policy::Liberal, Policy::Fascist, Policy::Fascist],
            &rng,
        );

        assert_eq!(deck.draw(), Policy::Liberal);
        assert_eq!(deck.len(), 2);
        assert!(deck.needs_reshuffle());
    }

    #[test]
    fn test_rebuild_preserves_unpassed_counts() {
        let rng = GameRng::new(3);
        let mut deck = PolicyDeck::new(vec![Policy::Fascist, Policy::Liberal], &rng);

        deck.rebuild(2, 4);

        assert_eq!(deck.fascist_cards(), 11 - 4);
        assert_eq!(deck.liberal_cards(), 6 - 2);
        assert_eq!(deck.len(), 11);
    }

    #[test]
    fn test_rebuild_stream_isolated_from_foreign_randomness() {
        // Two identically seeded decks must rebuild to the same order even
        // when unrelated randomness is consumed between rebuilds of one.
        let mut control = PolicyDeck::shuffled(99);
        let mut interfered = PolicyDeck::shuffled(99);

        for _ in 0..6 {
            control.draw();
            interfered.draw();
        }

        // Simulated agent randomness: a different stream entirely.
        let mut agent_rng = GameRng::new(1234);
        for _ in 0..50 {
            agent_rng.gen_range(0..100);
        }

        control.rebuild(1, 2);
        interfered.rebuild(1, 2);

        while !control.is_empty() {
            assert_eq!(control.draw(), interfered.draw());
        }
    }

    #[test]
    fn test_consecutive_rebuilds_advance_the_stream() {
        let mut deck = PolicyDeck::shuffled(5);
        deck.rebuild(0, 0);
        let first: Vec<_> = deck.cards.clone();
        deck.rebuild(0, 0);
        let second: Vec<_> = deck.cards.clone();

        // Same composition, but the stream moved on.
        assert_eq!(first.len(), second.len());
        assert_ne!(first, second);
    }

    #[test]
    #[should_panic(expected = "empty policy deck")]
    fn test_draw_from_empty_deck_panics() {
        let rng = GameRng::new(0);
        let mut deck = PolicyDeck::new(vec![], &rng);
        deck.draw();
    }
}
