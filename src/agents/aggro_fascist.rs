//! An aggressive fascist strategy.
//!
//! Pushes fascists (Hitler once the tally allows) into the chancellorship,
//! only backs fascist governments, discards liberal policies, lies about
//! investigations, and shoots liberals.

use crate::agents::{pending_policy, Player};
use crate::core::{Allegiance, GameRng, PlayerId, Policy};
use crate::view::PlayerView;

/// Deceptive baseline fascist.
#[derive(Debug)]
pub struct AggroFascist {
    rng: GameRng,
}

impl AggroFascist {
    /// Create a strategy with its own seeded pick stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed).for_context("aggro fascist"),
        }
    }

    fn pick(&mut self, candidates: &[PlayerId]) -> PlayerId {
        *self
            .rng
            .choose(candidates)
            .expect("no candidate to pick from")
    }

    fn is_fascist(state: &PlayerView, player: PlayerId) -> bool {
        state.current().fascists.contains(&player)
    }
}

impl Player for AggroFascist {
    fn select_chancellor(&mut self, state: &PlayerView) -> PlayerId {
        let record = state.current();
        let candidates = state.eligible_chancellor_candidates();

        // Past three fascist policies an elected Hitler ends the game.
        if state.history().fascist_policies_passed() > 3
            && candidates.contains(&record.hitler)
        {
            return record.hitler;
        }

        let fascist_candidates: Vec<PlayerId> = candidates
            .iter()
            .copied()
            .filter(|&p| Self::is_fascist(state, p))
            .collect();
        if fascist_candidates.is_empty() {
            self.pick(&candidates)
        } else {
            self.pick(&fascist_candidates)
        }
    }

    fn intent_to_vote_on_government(&mut self, state: &PlayerView) -> Option<bool> {
        Some(self.vote_on_government(state))
    }

    fn vote_on_government(&mut self, state: &PlayerView) -> bool {
        let record = state.current();
        let fascist_office = |office: Option<PlayerId>| {
            office.is_some_and(|p| Self::is_fascist(state, p))
        };
        fascist_office(record.president) || fascist_office(record.chancellor)
    }

    fn select_policy_to_discard_as_president(&mut self, _state: &PlayerView) -> Policy {
        Policy::Liberal
    }

    fn select_policy_to_discard_as_chancellor(&mut self, _state: &PlayerView) -> Policy {
        Policy::Liberal
    }

    fn veto_legislation(&mut self, state: &PlayerView) -> bool {
        pending_policy(state) == Some(Policy::Liberal)
    }

    fn claimed_policy_to_discard_as_president(&mut self, state: &PlayerView) -> (u8, Policy) {
        let record = state.current();
        match record.selected_policy {
            // No enactment means a veto went through: claim it was forced.
            None => (3, Policy::Fascist),
            Some(Policy::Liberal) => {
                // Pretend the liberal policy was a generous choice.
                (2, Policy::Fascist)
            }
            Some(Policy::Fascist) => {
                if record.chancellor.is_some_and(|c| Self::is_fascist(state, c)) {
                    // Cover a fascist chancellor: there was no option.
                    (3, Policy::Fascist)
                } else {
                    // Blame the liberal chancellor: they had a choice.
                    (2, Policy::Fascist)
                }
            }
        }
    }

    fn claimed_policy_to_discard_as_chancellor(&mut self, state: &PlayerView) -> Policy {
        let record = state.current();
        match record.selected_policy {
            None => Policy::Fascist,
            Some(Policy::Liberal) => {
                if record.president.is_some_and(|p| Self::is_fascist(state, p)) {
                    // Hopefully the president also pretends it was a choice.
                    Policy::Fascist
                } else {
                    record
                        .policy_discarded_by_chancellor
                        .unwrap_or(Policy::Fascist)
                }
            }
            // Passed fascist: insist the hand was forced.
            Some(Policy::Fascist) => Policy::Fascist,
        }
    }

    fn select_player_to_investigate(&mut self, state: &PlayerView) -> PlayerId {
        let candidates: Vec<PlayerId> = state
            .living_players()
            .into_iter()
            .filter(|&p| Some(p) != state.current().your_player_id)
            .collect();
        self.pick(&candidates)
    }

    fn claimed_player_investigation_result(&mut self, state: &PlayerView) -> Allegiance {
        // Always lie.
        match state.current().investigated_player_allegiance {
            Some(truth) => truth.opponent(),
            None => Allegiance::Fascist,
        }
    }

    fn select_special_election_president(&mut self, state: &PlayerView) -> PlayerId {
        let record = state.current();
        let living_others: Vec<PlayerId> = state
            .living_players()
            .into_iter()
            .filter(|&p| Some(p) != record.your_player_id)
            .collect();

        // A fascist president, but keep Hitler out of the spotlight.
        let fascist_candidates: Vec<PlayerId> = living_others
            .iter()
            .copied()
            .filter(|&p| Self::is_fascist(state, p) && p != record.hitler)
            .collect();
        if !fascist_candidates.is_empty() {
            return self.pick(&fascist_candidates);
        }

        let fallback: Vec<PlayerId> = living_others
            .iter()
            .copied()
            .filter(|&p| p != record.hitler)
            .collect();
        if fallback.is_empty() {
            self.pick(&living_others)
        } else {
            self.pick(&fallback)
        }
    }

    fn select_player_to_execute(&mut self, state: &PlayerView) -> PlayerId {
        let living = state.living_players();
        let liberals: Vec<PlayerId> = living
            .iter()
            .copied()
            .filter(|&p| !Self::is_fascist(state, p))
            .collect();
        if liberals.is_empty() {
            self.pick(&living)
        } else {
            self.pick(&liberals)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{RoundHistory, RoundRecord};
    use smallvec::smallvec;

    fn record() -> RoundRecord {
        RoundRecord::new(
            7,
            smallvec![PlayerId::new(4), PlayerId::new(5), PlayerId::new(6)],
            PlayerId::new(6),
        )
    }

    fn view_with(record: RoundRecord, you: PlayerId) -> PlayerView {
        let mut history = RoundHistory::new();
        history.open_round(record);
        PlayerView::project(&history, you)
    }

    #[test]
    fn test_votes_only_for_fascist_governments() {
        let mut bot = AggroFascist::new(1);

        let mut liberal_gov = record();
        liberal_gov.president = Some(PlayerId::new(0));
        liberal_gov.chancellor = Some(PlayerId::new(1));
        assert!(!bot.vote_on_government(&view_with(liberal_gov, PlayerId::new(4))));

        let mut fascist_gov = record();
        fascist_gov.president = Some(PlayerId::new(0));
        fascist_gov.chancellor = Some(PlayerId::new(5));
        assert!(bot.vote_on_government(&view_with(fascist_gov, PlayerId::new(4))));
    }

    #[test]
    fn test_prefers_fascist_chancellors() {
        let mut bot = AggroFascist::new(1);
        let mut r = record();
        r.president = Some(PlayerId::new(0));
        let state = view_with(r, PlayerId::new(4));

        for _ in 0..20 {
            let pick = bot.select_chancellor(&state);
            assert!(state.current().fascists.contains(&pick));
        }
    }

    #[test]
    fn test_pushes_hitler_after_three_policies() {
        let mut bot = AggroFascist::new(1);

        let mut history = RoundHistory::new();
        for _ in 0..4 {
            let mut r = record();
            r.selected_policy = Some(Policy::Fascist);
            history.open_round(r);
        }
        let mut open = record();
        open.president = Some(PlayerId::new(0));
        history.open_round(open);
        let state = PlayerView::project(&history, PlayerId::new(4));

        assert_eq!(bot.select_chancellor(&state), PlayerId::new(6));
    }

    #[test]
    fn test_lies_about_investigations() {
        let mut bot = AggroFascist::new(1);
        let mut r = record();
        r.investigated_player_allegiance = Some(Allegiance::Fascist);
        let state = view_with(r, PlayerId::new(4));

        assert_eq!(
            bot.claimed_player_investigation_result(&state),
            Allegiance::Liberal
        );
    }

    #[test]
    fn test_special_election_avoids_hitler_and_self() {
        let mut bot = AggroFascist::new(1);
        let mut r = record();
        r.president = Some(PlayerId::new(4));
        let state = view_with(r, PlayerId::new(4));

        for _ in 0..20 {
            let pick = bot.select_special_election_president(&state);
            assert_ne!(pick, PlayerId::new(6));
            assert_ne!(pick, PlayerId::new(4));
        }
    }

    #[test]
    fn test_executes_liberals() {
        let mut bot = AggroFascist::new(1);
        let state = view_with(record(), PlayerId::new(4));

        for _ in 0..20 {
            let pick = bot.select_player_to_execute(&state);
            assert!(!state.current().fascists.contains(&pick));
        }
    }
}
