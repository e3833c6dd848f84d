//! The append-only chain of round records and its derived aggregates.

use crate::core::{
    Allegiance, PlayerId, FASCIST_POLICIES_TO_WIN, LIBERAL_POLICIES_TO_WIN,
};
use crate::history::record::RoundRecord;
use im::Vector;
use serde::{Deserialize, Serialize};

/// Reason string for each terminal outcome, in termination priority order.
pub const REASON_FIVE_LIBERAL: &str = "Passed 5 Liberal Policies";
pub const REASON_SHOT_HITLER: &str = "Shot Hitler";
pub const REASON_SIX_FASCIST: &str = "Passed 6 Fascist Policies";
pub const REASON_ELECTED_HITLER: &str = "Elected Hitler";

/// The append-only sequence of round records, newest last.
///
/// Backed by a persistent vector so player-view prefixes clone in O(1).
/// All aggregates are derived on read by walking backward from the queried
/// round, so they always reflect the authoritative state at the moment of
/// the read no matter how far the open round has progressed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundHistory {
    rounds: Vector<RoundRecord>,
}

impl RoundHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rounds opened so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// Whether no round has been opened yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Append a freshly opened round record.
    pub fn open_round(&mut self, record: RoundRecord) {
        self.rounds.push_back(record);
    }

    /// The record at a given round index.
    #[must_use]
    pub fn get(&self, round: usize) -> Option<&RoundRecord> {
        self.rounds.get(round)
    }

    /// The current (most recent) round record.
    ///
    /// Panics if no round has been opened; the engine always opens a record
    /// before running any phase.
    #[must_use]
    pub fn current(&self) -> &RoundRecord {
        self.rounds.back().expect("no round has been opened")
    }

    /// Mutable access to the current round record; used by the engine to
    /// fill fields in as phases resolve.
    pub(crate) fn current_mut(&mut self) -> &mut RoundRecord {
        self.rounds.back_mut().expect("no round has been opened")
    }

    /// Iterate over the records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RoundRecord> {
        self.rounds.iter()
    }

    // === Derived aggregates ===

    /// Cumulative liberal policies passed through `round`.
    #[must_use]
    pub fn liberal_policies_passed_at(&self, round: usize) -> u8 {
        let passed = u8::from(self.rounds[round].passed_liberal_policy());
        match round.checked_sub(1) {
            Some(prev) => self.liberal_policies_passed_at(prev) + passed,
            None => passed,
        }
    }

    /// Cumulative fascist policies passed through `round`.
    #[must_use]
    pub fn fascist_policies_passed_at(&self, round: usize) -> u8 {
        let passed = u8::from(self.rounds[round].passed_fascist_policy());
        match round.checked_sub(1) {
            Some(prev) => self.fascist_policies_passed_at(prev) + passed,
            None => passed,
        }
    }

    /// Cumulative liberal policies passed through the current round.
    #[must_use]
    pub fn liberal_policies_passed(&self) -> u8 {
        match self.rounds.len() {
            0 => 0,
            n => self.liberal_policies_passed_at(n - 1),
        }
    }

    /// Cumulative fascist policies passed through the current round.
    #[must_use]
    pub fn fascist_policies_passed(&self) -> u8 {
        match self.rounds.len() {
            0 => 0,
            n => self.fascist_policies_passed_at(n - 1),
        }
    }

    /// Consecutive failed elections as of `round`.
    ///
    /// Inherited unchanged while the round's election outcome is unknown;
    /// zero after a success; predecessor plus one after a failure.
    #[must_use]
    pub fn anarchy_streak_at(&self, round: usize) -> u8 {
        match self.rounds[round].successful_election {
            None => match round.checked_sub(1) {
                Some(prev) => self.anarchy_streak_at(prev),
                None => 0,
            },
            Some(true) => 0,
            Some(false) => match round.checked_sub(1) {
                Some(prev) => self.anarchy_streak_at(prev) + 1,
                None => 1,
            },
        }
    }

    /// Consecutive failed elections as of the current round.
    #[must_use]
    pub fn anarchy_streak(&self) -> u8 {
        match self.rounds.len() {
            0 => 0,
            n => self.anarchy_streak_at(n - 1),
        }
    }

    /// Every player executed through `round`, in execution order.
    #[must_use]
    pub fn executed_players_at(&self, round: usize) -> Vec<PlayerId> {
        let mut executed = match round.checked_sub(1) {
            Some(prev) => self.executed_players_at(prev),
            None => Vec::new(),
        };
        if let Some(player) = self.rounds[round].executed_player {
            executed.push(player);
        }
        executed
    }

    /// Every player executed through the current round.
    #[must_use]
    pub fn executed_players(&self) -> Vec<PlayerId> {
        match self.rounds.len() {
            0 => Vec::new(),
            n => self.executed_players_at(n - 1),
        }
    }

    /// Seats barred from the chancellorship as of `round`.
    ///
    /// Empty for the first round. With five or fewer players alive only the
    /// executed are barred; otherwise a successful predecessor election adds
    /// its chancellor on top of the executed, and a failed one carries the
    /// predecessor's bar set forward unchanged.
    #[must_use]
    pub fn ineligible_for_chancellorship_at(&self, round: usize) -> Vec<PlayerId> {
        let Some(prev) = round.checked_sub(1) else {
            return Vec::new();
        };

        let record = &self.rounds[round];
        let living = record.number_of_players - self.executed_players_at(round).len();
        if living <= 5 {
            return self.executed_players_at(prev);
        }

        let previous = &self.rounds[prev];
        if previous.successful_election == Some(true) {
            let mut barred = self.executed_players_at(prev);
            if let Some(chancellor) = previous.chancellor {
                barred.push(chancellor);
            }
            barred
        } else {
            self.ineligible_for_chancellorship_at(prev)
        }
    }

    /// Seats barred from the chancellorship as of the current round.
    #[must_use]
    pub fn ineligible_for_chancellorship(&self) -> Vec<PlayerId> {
        match self.rounds.len() {
            0 => Vec::new(),
            n => self.ineligible_for_chancellorship_at(n - 1),
        }
    }

    /// The most recent successfully elected government, `(president,
    /// chancellor)`, if any. Strategies use this to mirror the engine's
    /// term-limit rule.
    #[must_use]
    pub fn last_successful_government(&self) -> Option<(PlayerId, PlayerId)> {
        self.rounds.iter().rev().find_map(|record| {
            if record.successful_election == Some(true) {
                Some((record.president?, record.chancellor?))
            } else {
                None
            }
        })
    }

    // === Termination replay ===

    /// Re-derive the terminal `(winner, reason)` from the recorded chain, in
    /// termination priority order. Returns `None` if the chain does not end
    /// in a rule-based terminal state (e.g. the game died to an agent fault).
    #[must_use]
    pub fn verdict(&self) -> Option<(Allegiance, &'static str)> {
        let last = self.rounds.back()?;

        if self.liberal_policies_passed() == LIBERAL_POLICIES_TO_WIN {
            return Some((Allegiance::Liberal, REASON_FIVE_LIBERAL));
        }
        if self.executed_players().contains(&last.hitler) {
            return Some((Allegiance::Liberal, REASON_SHOT_HITLER));
        }
        if self.fascist_policies_passed() == FASCIST_POLICIES_TO_WIN {
            return Some((Allegiance::Fascist, REASON_SIX_FASCIST));
        }
        // Hitler elected chancellor at a fascist tally of three or more: the
        // round ends before any legislative fields are recorded.
        if last.successful_election == Some(true)
            && last.chancellor == Some(last.hitler)
            && last.num_fascist_policies_for_president.is_none()
            && self.fascist_policies_passed() >= 3
        {
            return Some((Allegiance::Fascist, REASON_ELECTED_HITLER));
        }
        None
    }
}
