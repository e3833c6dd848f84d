//! The per-round snapshot.

use crate::core::{Allegiance, PlayerId, Policy};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Declared voting intentions: chancellor candidate -> voter -> intent.
///
/// `None` inside the inner map means the voter declined to declare.
pub type DeclaredIntents = BTreeMap<PlayerId, BTreeMap<PlayerId, Option<bool>>>;

/// One round's snapshot.
///
/// The constant fields are fixed at creation; everything else is filled in
/// as the round's phases resolve and never rewritten once the round closes.
/// The ground-truth discard fields and the claimed fields are deliberately
/// distinct: claims are public statements that may diverge from the truth.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    // === Constants ===
    /// Seats at the table, fixed at game start (executions do not shrink it).
    pub number_of_players: usize,
    /// Ground-truth fascist seats (Hitler included), in seat order.
    pub fascists: SmallVec<[PlayerId; 4]>,
    /// Ground-truth Hitler seat.
    pub hitler: PlayerId,

    // === Phase results ===
    pub president: Option<PlayerId>,
    pub declared_election_intent: Option<DeclaredIntents>,
    pub chancellor: Option<PlayerId>,
    pub election_results: Option<BTreeMap<PlayerId, bool>>,
    pub successful_election: Option<bool>,
    pub num_fascist_policies_for_president: Option<u8>,
    pub policy_discarded_by_president: Option<Policy>,
    pub num_fascist_policies_for_chancellor: Option<u8>,
    pub policy_discarded_by_chancellor: Option<Policy>,
    pub chancellor_veto: Option<bool>,
    pub president_veto: Option<bool>,
    pub president_claimed_fascist_draws: Option<u8>,
    pub president_claimed_discard: Option<Policy>,
    pub chancellor_claimed_discard: Option<Policy>,
    /// The enacted policy. Stays `None` on a veto.
    pub selected_policy: Option<Policy>,
    pub investigated_player: Option<PlayerId>,
    pub investigated_player_allegiance: Option<Allegiance>,
    pub claimed_investigation_result: Option<Allegiance>,
    pub special_election_president: Option<PlayerId>,
    pub executed_player: Option<PlayerId>,
    /// Policy force-drawn after three failed elections.
    pub anarchy_result: Option<Policy>,

    // === View-only ===
    /// Stamped onto every record of a [`crate::view::PlayerView`]; always
    /// `None` on the engine's own copy.
    pub your_player_id: Option<PlayerId>,
}

impl RoundRecord {
    /// Open a fresh record with only the constants set.
    #[must_use]
    pub fn new(
        number_of_players: usize,
        fascists: SmallVec<[PlayerId; 4]>,
        hitler: PlayerId,
    ) -> Self {
        Self {
            number_of_players,
            fascists,
            hitler,
            president: None,
            declared_election_intent: None,
            chancellor: None,
            election_results: None,
            successful_election: None,
            num_fascist_policies_for_president: None,
            policy_discarded_by_president: None,
            num_fascist_policies_for_chancellor: None,
            policy_discarded_by_chancellor: None,
            chancellor_veto: None,
            president_veto: None,
            president_claimed_fascist_draws: None,
            president_claimed_discard: None,
            chancellor_claimed_discard: None,
            selected_policy: None,
            investigated_player: None,
            investigated_player_allegiance: None,
            claimed_investigation_result: None,
            special_election_president: None,
            executed_player: None,
            anarchy_result: None,
            your_player_id: None,
        }
    }

    /// Whether this round passed a liberal policy (enactment or anarchy).
    #[must_use]
    pub fn passed_liberal_policy(&self) -> bool {
        self.selected_policy == Some(Policy::Liberal)
            || self.anarchy_result == Some(Policy::Liberal)
    }

    /// Whether this round passed a fascist policy (enactment or anarchy).
    #[must_use]
    pub fn passed_fascist_policy(&self) -> bool {
        self.selected_policy == Some(Policy::Fascist)
            || self.anarchy_result == Some(Policy::Fascist)
    }

    /// Project every field to `(name, value)` pairs for the game report.
    ///
    /// `None` entries are fields that never resolved this round; the report
    /// writer skips them.
    #[must_use]
    pub fn report_fields(&self) -> Vec<(&'static str, Option<String>)> {
        fn fmt<T: std::fmt::Display>(value: &Option<T>) -> Option<String> {
            value.as_ref().map(ToString::to_string)
        }

        let fascists = self
            .fascists
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        vec![
            (
                "number_of_players",
                Some(self.number_of_players.to_string()),
            ),
            ("fascists", Some(fascists)),
            ("hitler", Some(self.hitler.to_string())),
            ("president", fmt(&self.president)),
            (
                "declared_election_intent",
                self.declared_election_intent
                    .as_ref()
                    .map(|intents| format!("{intents:?}")),
            ),
            ("chancellor", fmt(&self.chancellor)),
            (
                "election_results",
                self.election_results
                    .as_ref()
                    .map(|votes| format!("{votes:?}")),
            ),
            ("successful_election", fmt(&self.successful_election)),
            (
                "num_fascist_policies_for_president",
                fmt(&self.num_fascist_policies_for_president),
            ),
            (
                "policy_discarded_by_president",
                fmt(&self.policy_discarded_by_president),
            ),
            (
                "num_fascist_policies_for_chancellor",
                fmt(&self.num_fascist_policies_for_chancellor),
            ),
            (
                "policy_discarded_by_chancellor",
                fmt(&self.policy_discarded_by_chancellor),
            ),
            ("chancellor_veto", fmt(&self.chancellor_veto)),
            ("president_veto", fmt(&self.president_veto)),
            (
                "president_claimed_fascist_draws",
                fmt(&self.president_claimed_fascist_draws),
            ),
            (
                "president_claimed_discard",
                fmt(&self.president_claimed_discard),
            ),
            (
                "chancellor_claimed_discard",
                fmt(&self.chancellor_claimed_discard),
            ),
            ("selected_policy", fmt(&self.selected_policy)),
            ("investigated_player", fmt(&self.investigated_player)),
            (
                "investigated_player_allegiance",
                fmt(&self.investigated_player_allegiance),
            ),
            (
                "claimed_investigation_result",
                fmt(&self.claimed_investigation_result),
            ),
            (
                "special_election_president",
                fmt(&self.special_election_president),
            ),
            ("executed_player", fmt(&self.executed_player)),
            ("anarchy_result", fmt(&self.anarchy_result)),
            ("your_player_id", fmt(&self.your_player_id)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn record() -> RoundRecord {
        RoundRecord::new(5, smallvec![PlayerId::new(3), PlayerId::new(4)], PlayerId::new(4))
    }

    #[test]
    fn test_new_record_has_only_constants() {
        let r = record();

        assert_eq!(r.number_of_players, 5);
        assert_eq!(r.hitler, PlayerId::new(4));
        assert_eq!(r.president, None);
        assert_eq!(r.selected_policy, None);
        assert_eq!(r.your_player_id, None);
    }

    #[test]
    fn test_passed_policy_covers_anarchy() {
        let mut r = record();
        assert!(!r.passed_liberal_policy());

        r.anarchy_result = Some(Policy::Liberal);
        assert!(r.passed_liberal_policy());
        assert!(!r.passed_fascist_policy());

        let mut r = record();
        r.selected_policy = Some(Policy::Fascist);
        assert!(r.passed_fascist_policy());
    }

    #[test]
    fn test_report_fields_skip_unset() {
        let mut r = record();
        r.president = Some(PlayerId::new(1));

        let fields = r.report_fields();
        let set: Vec<_> = fields
            .iter()
            .filter(|(_, v)| v.is_some())
            .map(|(name, _)| *name)
            .collect();

        assert_eq!(
            set,
            vec!["number_of_players", "fascists", "hitler", "president"]
        );
    }

    #[test]
    fn test_record_serde_round_trip() {
        let mut r = record();
        r.president = Some(PlayerId::new(0));
        r.election_results = Some(
            [(PlayerId::new(0), true), (PlayerId::new(1), false)]
                .into_iter()
                .collect(),
        );

        let json = serde_json::to_string(&r).unwrap();
        let back: RoundRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
