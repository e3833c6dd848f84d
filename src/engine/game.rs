//! The game itself: setup validation and the round state machine.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::agents::Player;
use crate::core::{party_membership, Allegiance, PlayerId, PlayerMap, Policy};
use crate::deck::PolicyDeck;
use crate::engine::state::{GameState, Government, RoleAssignment};
use crate::fault::{guard, AgentFault, SetupError};
use crate::history::{
    DeclaredIntents, RoundHistory, RoundRecord, REASON_ELECTED_HITLER,
    REASON_FIVE_LIBERAL, REASON_SHOT_HITLER, REASON_SIX_FASCIST,
};
use crate::view::PlayerView;

/// A single game: the seated agents, the hidden roles, the deck, the forward
/// state, and the authoritative round history.
///
/// Construction validates the configuration exhaustively; from then on the
/// only error surface is [`AgentFault`]. Engine invariant violations panic.
pub struct Game {
    agents: PlayerMap<Box<dyn Player>>,
    liberals: FxHashSet<PlayerId>,
    fascists: FxHashSet<PlayerId>,
    /// `fascists` in seat order, for stamping onto round records.
    fascist_seats: SmallVec<[PlayerId; 4]>,
    hitler: PlayerId,
    deck: PolicyDeck,
    state: GameState,
    history: RoundHistory,
}

impl Game {
    /// Validate a configuration and seat the table.
    ///
    /// `presidential_order` fixes both the seat count and the rotation; it
    /// must be a permutation of all seats. `roles` must partition the seats
    /// into the correct team sizes for that count, with Hitler among the
    /// fascists. `deck` arrives pre-arranged; composition is the caller's
    /// contract.
    pub fn new(
        agents: Vec<Box<dyn Player>>,
        roles: RoleAssignment,
        presidential_order: Vec<PlayerId>,
        deck: PolicyDeck,
    ) -> Result<Self, SetupError> {
        let players = presidential_order.len();
        let Some((expected_liberals, expected_fascists)) = party_membership(players)
        else {
            return Err(SetupError::UnsupportedPlayerCount(players));
        };
        if agents.len() != players {
            return Err(SetupError::AgentCountMismatch {
                expected: players,
                actual: agents.len(),
            });
        }

        let RoleAssignment {
            liberals,
            fascists,
            hitler,
        } = roles;
        for player in PlayerId::all(players) {
            match (liberals.contains(&player), fascists.contains(&player)) {
                (false, false) => return Err(SetupError::MissingRole(player)),
                (true, true) => return Err(SetupError::OverlappingRoles(player)),
                _ => {}
            }
        }
        if liberals.len() != expected_liberals {
            return Err(SetupError::WrongLiberalCount {
                players,
                expected: expected_liberals,
                actual: liberals.len(),
            });
        }
        if fascists.len() != expected_fascists {
            return Err(SetupError::WrongFascistCount {
                players,
                expected: expected_fascists,
                actual: fascists.len(),
            });
        }
        if !fascists.contains(&hitler) {
            return Err(SetupError::HitlerNotFascist(hitler));
        }
        if !presidential_order.contains(&hitler) {
            return Err(SetupError::HitlerNotSeated(hitler));
        }
        let mut seen = FxHashSet::default();
        let permutation = presidential_order
            .iter()
            .all(|p| p.index() < players && seen.insert(*p));
        if !permutation {
            return Err(SetupError::InvalidPresidentialOrder);
        }

        let mut fascist_seats: SmallVec<[PlayerId; 4]> =
            fascists.iter().copied().collect();
        fascist_seats.sort_unstable();

        info!(players, %hitler, "game configured");

        Ok(Game {
            agents: PlayerMap::from_vec(agents),
            liberals,
            fascists,
            fascist_seats,
            hitler,
            deck,
            state: GameState::new(presidential_order),
            history: RoundHistory::new(),
        })
    }

    // === Public surface ===

    /// Seats at the table (fixed; executions do not shrink it).
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.agents.player_count()
    }

    /// The authoritative round history.
    #[must_use]
    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    /// Living seats, in seat order.
    #[must_use]
    pub fn living_players(&self) -> Vec<PlayerId> {
        PlayerId::all(self.player_count())
            .filter(|p| !self.state.executed.contains(p))
            .collect()
    }

    /// The ground-truth team of a seat.
    #[must_use]
    pub fn allegiance_of(&self, player: PlayerId) -> Allegiance {
        if self.liberals.contains(&player) {
            Allegiance::Liberal
        } else {
            Allegiance::Fascist
        }
    }

    /// The terminal outcome, checked in priority order, or `None` while the
    /// game is still live.
    #[must_use]
    pub fn winner(&self) -> Option<(Allegiance, &'static str)> {
        if self.state.liberal_policies_passed
            == crate::core::LIBERAL_POLICIES_TO_WIN
        {
            Some((Allegiance::Liberal, REASON_FIVE_LIBERAL))
        } else if self.state.shot_hitler {
            Some((Allegiance::Liberal, REASON_SHOT_HITLER))
        } else if self.state.fascist_policies_passed
            == crate::core::FASCIST_POLICIES_TO_WIN
        {
            Some((Allegiance::Fascist, REASON_SIX_FASCIST))
        } else if self.state.elected_hitler {
            Some((Allegiance::Fascist, REASON_ELECTED_HITLER))
        } else {
            None
        }
    }

    /// Play rounds until a terminal state or an agent fault.
    ///
    /// A fault ends the game immediately with the offender's team losing and
    /// the fault's reason as the outcome string.
    pub fn play_game(&mut self) -> (Allegiance, String) {
        loop {
            if let Some((winner, reason)) = self.winner() {
                info!(%winner, reason, rounds = self.history.len(), "game over");
                return (winner, reason.to_string());
            }
            if let Err(fault) = self.play_round() {
                let winner = self.allegiance_of(fault.player).opponent();
                info!(%winner, offender = %fault.player, "game ended on an agent fault");
                return (winner, fault.reason());
            }
        }
    }

    /// Play one full round.
    ///
    /// Opens a fresh record, runs the phases in order, and returns at the
    /// first agent fault. A terminal state reached mid-round (Hitler elected)
    /// returns `Ok`; the caller's winner check picks it up.
    pub fn play_round(&mut self) -> Result<(), AgentFault> {
        if self.deck.needs_reshuffle() {
            self.deck.rebuild(
                self.state.liberal_policies_passed,
                self.state.fascist_policies_passed,
            );
            debug!(cards = self.deck.len(), "deck rebuilt");
        }

        self.history.open_round(RoundRecord::new(
            self.player_count(),
            self.fascist_seats.clone(),
            self.hitler,
        ));

        let president = self.next_president();
        debug!(round = self.history.len(), %president, "round opened");

        self.solicit_intents(president)?;
        let chancellor = self.select_chancellor(president)?;

        if self.hold_election()? {
            self.state.anarchy_streak = 0;
            self.state.previous_government = Some(Government {
                president,
                chancellor,
            });

            if self.state.fascist_policies_passed >= 3 && chancellor == self.hitler {
                self.state.elected_hitler = true;
                return Ok(());
            }

            let enacted = self.hold_legislative_session(president, chancellor)?;
            if enacted == Some(Policy::Fascist) {
                self.executive_action(president)?;
            }
        } else {
            self.state.anarchy_streak += 1;
            if self.state.anarchy_streak == 3 {
                self.enact_anarchy();
                self.state.anarchy_streak = 0;
            }
        }
        Ok(())
    }

    /// One round's history as seen from a seat, for inspection or replay.
    #[must_use]
    pub fn perceive(&self, player: PlayerId) -> PlayerView {
        PlayerView::project(&self.history, player)
    }

    /// Render the full history as human-readable report lines, one block per
    /// round with the resolved fields aligned.
    #[must_use]
    pub fn write_game_report(&self) -> Vec<String> {
        let mut report = Vec::new();
        for (round, record) in self.history.iter().enumerate() {
            report.push(format!("Round #{}", round + 1));
            let fields = record.report_fields();
            // Align on the full field-name set so sparse rounds render in
            // the same columns as busy ones.
            let width = fields
                .iter()
                .map(|(name, _)| name.len())
                .max()
                .unwrap_or(0);
            for (name, value) in fields {
                if let Some(value) = value {
                    report.push(format!("    {name:<width$}: {value}"));
                }
            }
        }
        report
    }

    // === Round phases ===

    /// The next president: a pending special election override, or the front
    /// of the rotation (which then rotates to the back).
    fn next_president(&mut self) -> PlayerId {
        let president = match self.state.special_election_next_president.take() {
            Some(special) => special,
            None => {
                let front = self
                    .state
                    .presidential_order
                    .pop_front()
                    .expect("presidential rotation is empty");
                self.state.presidential_order.push_back(front);
                front
            }
        };
        self.history.current_mut().president = Some(president);
        president
    }

    /// Seats that may stand for chancellor under `president`: living,
    /// not the president, and (while more than five players live) not part
    /// of the last successfully elected government.
    fn eligible_chancellors(&self, president: PlayerId) -> Vec<PlayerId> {
        let living = self.living_players();
        let term_limits = living.len() > 5;
        living
            .into_iter()
            .filter(|&seat| {
                if seat == president {
                    return false;
                }
                if term_limits {
                    if let Some(government) = &self.state.previous_government {
                        if seat == government.president || seat == government.chancellor
                        {
                            return false;
                        }
                    }
                }
                true
            })
            .collect()
    }

    /// Ask every living player, per eligible candidate, to optionally
    /// declare a voting intention. Advisory; recorded verbatim.
    fn solicit_intents(&mut self, president: PlayerId) -> Result<(), AgentFault> {
        let mut intents = DeclaredIntents::new();
        let living = self.living_players();
        for candidate in self.eligible_chancellors(president) {
            for &voter in &living {
                let view = self.perceive(voter);
                let agent = &mut self.agents[voter];
                let intent = guard(voter, "declaring a voting intention", || {
                    agent.intent_to_vote_on_government(&view)
                })?;
                intents.entry(candidate).or_default().insert(voter, intent);
            }
        }
        self.history.current_mut().declared_election_intent = Some(intents);
        Ok(())
    }

    fn select_chancellor(&mut self, president: PlayerId) -> Result<PlayerId, AgentFault> {
        let eligible = self.eligible_chancellors(president);
        let view = self.perceive(president);
        let agent = &mut self.agents[president];
        let nominee = guard(president, "selecting a chancellor", || {
            agent.select_chancellor(&view)
        })?;

        if nominee.index() >= self.player_count() {
            return Err(AgentFault::new(
                president,
                format!("{president} nominated an unknown seat ({nominee}) for chancellor"),
            ));
        }
        if !eligible.contains(&nominee) {
            return Err(AgentFault::new(
                president,
                format!("{president} nominated an ineligible chancellor ({nominee})"),
            ));
        }
        self.history.current_mut().chancellor = Some(nominee);
        Ok(nominee)
    }

    /// Collect binding votes from every living player. Success requires
    /// strictly more than half of all seated players, dead seats included.
    fn hold_election(&mut self) -> Result<bool, AgentFault> {
        let mut votes = BTreeMap::new();
        for voter in self.living_players() {
            let view = self.perceive(voter);
            let agent = &mut self.agents[voter];
            let vote = guard(voter, "voting on the government", || {
                agent.vote_on_government(&view)
            })?;
            votes.insert(voter, vote);
        }

        let yes = votes.values().filter(|&&vote| vote).count();
        let successful = yes * 2 > self.player_count();
        debug!(yes, seated = self.player_count(), successful, "election held");

        let record = self.history.current_mut();
        record.election_results = Some(votes);
        record.successful_election = Some(successful);
        Ok(successful)
    }

    /// Draw three, discard twice, enact the survivor; with five fascist
    /// policies already passed, the government may veto instead. Both
    /// offices then make their public claims against views snapshotted
    /// before either claim, so neither sees the other's.
    ///
    /// Returns the enacted policy, or `None` on a veto.
    fn hold_legislative_session(
        &mut self,
        president: PlayerId,
        chancellor: PlayerId,
    ) -> Result<Option<Policy>, AgentFault> {
        let hand = self.deck.draw_hand();
        let fascist_draws =
            hand.iter().filter(|&&card| card == Policy::Fascist).count() as u8;
        self.history.current_mut().num_fascist_policies_for_president =
            Some(fascist_draws);

        // The president only chooses with a mixed hand.
        let president_discard = match fascist_draws {
            0 => Policy::Liberal,
            1 | 2 => {
                let view = self.perceive(president);
                let agent = &mut self.agents[president];
                guard(president, "discarding a policy as president", || {
                    agent.select_policy_to_discard_as_president(&view)
                })?
            }
            3 => Policy::Fascist,
            n => unreachable!("{n} fascist cards in a three-card hand"),
        };
        let fascists_for_chancellor = match president_discard {
            Policy::Liberal => fascist_draws,
            Policy::Fascist => fascist_draws - 1,
        };
        {
            let record = self.history.current_mut();
            record.policy_discarded_by_president = Some(president_discard);
            record.num_fascist_policies_for_chancellor = Some(fascists_for_chancellor);
        }

        let (chancellor_discard, survivor) = match fascists_for_chancellor {
            0 => (Policy::Liberal, Policy::Liberal),
            1 => {
                let view = self.perceive(chancellor);
                let agent = &mut self.agents[chancellor];
                let discard =
                    guard(chancellor, "discarding a policy as chancellor", || {
                        agent.select_policy_to_discard_as_chancellor(&view)
                    })?;
                (discard, discard.other())
            }
            2 => (Policy::Fascist, Policy::Fascist),
            n => unreachable!("{n} fascist cards in a two-card pair"),
        };
        self.history.current_mut().policy_discarded_by_chancellor =
            Some(chancellor_discard);

        let vetoed = if self.state.fascist_policies_passed >= 5 {
            let view = self.perceive(chancellor);
            let agent = &mut self.agents[chancellor];
            let chancellor_veto = guard(chancellor, "deciding on a veto", || {
                agent.veto_legislation(&view)
            })?;
            self.history.current_mut().chancellor_veto = Some(chancellor_veto);

            if chancellor_veto {
                let view = self.perceive(president);
                let agent = &mut self.agents[president];
                let president_veto = guard(president, "deciding on a veto", || {
                    agent.veto_legislation(&view)
                })?;
                self.history.current_mut().president_veto = Some(president_veto);
                president_veto
            } else {
                false
            }
        } else {
            false
        };

        if !vetoed {
            match survivor {
                Policy::Liberal => self.state.liberal_policies_passed += 1,
                Policy::Fascist => self.state.fascist_policies_passed += 1,
            }
            self.history.current_mut().selected_policy = Some(survivor);
            debug!(%survivor, "policy enacted");
        } else {
            debug!("legislation vetoed");
        }

        let president_view = self.perceive(president);
        let chancellor_view = self.perceive(chancellor);

        let agent = &mut self.agents[president];
        let (claimed_draws, claimed_discard) =
            guard(president, "making the presidential claim", || {
                agent.claimed_policy_to_discard_as_president(&president_view)
            })?;
        if claimed_draws > 3 {
            return Err(AgentFault::new(
                president,
                format!("{president} claimed an impossible hand of {claimed_draws} fascist cards"),
            ));
        }
        let agent = &mut self.agents[chancellor];
        let chancellor_claim =
            guard(chancellor, "making the chancellor's claim", || {
                agent.claimed_policy_to_discard_as_chancellor(&chancellor_view)
            })?;

        {
            let record = self.history.current_mut();
            record.president_claimed_fascist_draws = Some(claimed_draws);
            record.president_claimed_discard = Some(claimed_discard);
            record.chancellor_claimed_discard = Some(chancellor_claim);
        }

        Ok(if vetoed { None } else { Some(survivor) })
    }

    /// Dispatch the unlocked executive action for the current fascist tally.
    /// Only reached when a fascist policy was enacted this round.
    fn executive_action(&mut self, president: PlayerId) -> Result<(), AgentFault> {
        match self.state.fascist_policies_passed {
            1 | 2 => self.investigate_player(president),
            3 => self.declare_special_election(president),
            4 | 5 => self.execute_player(president),
            6 => Ok(()), // the tally win preempts any action
            tally => panic!("fascist tally reached {tally}"),
        }
    }

    fn investigate_player(&mut self, president: PlayerId) -> Result<(), AgentFault> {
        let view = self.perceive(president);
        let agent = &mut self.agents[president];
        let target = guard(president, "selecting a player to investigate", || {
            agent.select_player_to_investigate(&view)
        })?;

        if target.index() >= self.player_count() {
            return Err(AgentFault::new(
                president,
                format!("{president} investigated an unknown seat ({target})"),
            ));
        }
        if target == president {
            return Err(AgentFault::new(
                president,
                format!("{president} tried to investigate themselves"),
            ));
        }
        if self.state.executed.contains(&target) {
            return Err(AgentFault::new(
                president,
                format!("{president} selected a corpse ({target}) to investigate"),
            ));
        }

        let truth = self.allegiance_of(target);
        {
            let record = self.history.current_mut();
            record.investigated_player = Some(target);
            record.investigated_player_allegiance = Some(truth);
        }
        debug!(%target, %truth, "investigation resolved");

        // Rebuilt view: the claim is made knowing the result.
        let view = self.perceive(president);
        let agent = &mut self.agents[president];
        let claim = guard(president, "claiming an investigation result", || {
            agent.claimed_player_investigation_result(&view)
        })?;
        self.history.current_mut().claimed_investigation_result = Some(claim);
        Ok(())
    }

    fn declare_special_election(&mut self, president: PlayerId) -> Result<(), AgentFault> {
        let view = self.perceive(president);
        let agent = &mut self.agents[president];
        let successor = guard(president, "selecting a special election president", || {
            agent.select_special_election_president(&view)
        })?;

        if successor.index() >= self.player_count() {
            return Err(AgentFault::new(
                president,
                format!("{president} handed the special election to an unknown seat ({successor})"),
            ));
        }
        if successor == president {
            return Err(AgentFault::new(
                president,
                format!("{president} selected themselves for the special election"),
            ));
        }
        if self.state.executed.contains(&successor) {
            return Err(AgentFault::new(
                president,
                format!("{president} selected a corpse ({successor}) for the special election"),
            ));
        }

        self.state.special_election_next_president = Some(successor);
        self.history.current_mut().special_election_president = Some(successor);
        debug!(%successor, "special election declared");
        Ok(())
    }

    fn execute_player(&mut self, president: PlayerId) -> Result<(), AgentFault> {
        let view = self.perceive(president);
        let agent = &mut self.agents[president];
        let target = guard(president, "selecting a player to execute", || {
            agent.select_player_to_execute(&view)
        })?;

        if target.index() >= self.player_count() {
            return Err(AgentFault::new(
                president,
                format!("{president} executed an unknown seat ({target})"),
            ));
        }
        // Self-execution is legal, if inadvisable. Corpses are not.
        if self.state.executed.contains(&target) {
            return Err(AgentFault::new(
                president,
                format!("{president} selected a corpse ({target}) for execution"),
            ));
        }

        self.state.executed.insert(target);
        self.state.presidential_order.retain(|&seat| seat != target);
        if target == self.hitler {
            self.state.shot_hitler = true;
        }
        self.history.current_mut().executed_player = Some(target);
        debug!(%target, "player executed");
        Ok(())
    }

    /// Three failed elections in a row: the top card is enacted with no
    /// government and no executive action. Term limits stay in force until
    /// the next successful election.
    fn enact_anarchy(&mut self) {
        let policy = self.deck.draw();
        match policy {
            Policy::Liberal => self.state.liberal_policies_passed += 1,
            Policy::Fascist => self.state.fascist_policies_passed += 1,
        }
        self.history.current_mut().anarchy_result = Some(policy);
        debug!(%policy, "anarchy draw enacted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;

    /// Minimal cooperative agent: nominates the first eligible seat, always
    /// votes yes, discards fascist policies, never vetoes, claims the truth
    /// poorly, and targets the lowest living non-self seat.
    struct Cooperative;

    impl Cooperative {
        fn other_living(view: &PlayerView) -> PlayerId {
            view.living_players()
                .into_iter()
                .find(|&p| p != view.you())
                .unwrap()
        }
    }

    impl Player for Cooperative {
        fn select_chancellor(&mut self, state: &PlayerView) -> PlayerId {
            state.eligible_chancellor_candidates()[0]
        }
        fn intent_to_vote_on_government(&mut self, _: &PlayerView) -> Option<bool> {
            None
        }
        fn vote_on_government(&mut self, _: &PlayerView) -> bool {
            true
        }
        fn select_policy_to_discard_as_president(&mut self, _: &PlayerView) -> Policy {
            Policy::Fascist
        }
        fn select_policy_to_discard_as_chancellor(&mut self, _: &PlayerView) -> Policy {
            Policy::Fascist
        }
        fn veto_legislation(&mut self, _: &PlayerView) -> bool {
            false
        }
        fn claimed_policy_to_discard_as_president(
            &mut self,
            _: &PlayerView,
        ) -> (u8, Policy) {
            (1, Policy::Fascist)
        }
        fn claimed_policy_to_discard_as_chancellor(&mut self, _: &PlayerView) -> Policy {
            Policy::Fascist
        }
        fn select_player_to_investigate(&mut self, state: &PlayerView) -> PlayerId {
            Self::other_living(state)
        }
        fn claimed_player_investigation_result(
            &mut self,
            _: &PlayerView,
        ) -> Allegiance {
            Allegiance::Liberal
        }
        fn select_special_election_president(&mut self, state: &PlayerView) -> PlayerId {
            Self::other_living(state)
        }
        fn select_player_to_execute(&mut self, state: &PlayerView) -> PlayerId {
            Self::other_living(state)
        }
    }

    fn agents(n: usize) -> Vec<Box<dyn Player>> {
        (0..n).map(|_| Box::new(Cooperative) as Box<dyn Player>).collect()
    }

    fn roles_for_five() -> RoleAssignment {
        RoleAssignment {
            liberals: [0, 1, 2].map(PlayerId::new).into_iter().collect(),
            fascists: [3, 4].map(PlayerId::new).into_iter().collect(),
            hitler: PlayerId::new(4),
        }
    }

    fn seats(n: usize) -> Vec<PlayerId> {
        PlayerId::all(n).collect()
    }

    fn liberal_deck() -> PolicyDeck {
        PolicyDeck::new(vec![Policy::Liberal; 17], &GameRng::new(0))
    }

    fn five_player_game(deck: PolicyDeck) -> Game {
        Game::new(agents(5), roles_for_five(), seats(5), deck).unwrap()
    }

    #[test]
    fn test_setup_rejects_unsupported_count() {
        let err = Game::new(agents(4), roles_for_five(), seats(4), liberal_deck())
            .err()
            .unwrap();
        assert_eq!(err, SetupError::UnsupportedPlayerCount(4));
    }

    #[test]
    fn test_setup_rejects_agent_mismatch() {
        let err = Game::new(agents(4), roles_for_five(), seats(5), liberal_deck())
            .err()
            .unwrap();
        assert_eq!(
            err,
            SetupError::AgentCountMismatch {
                expected: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn test_setup_rejects_missing_and_overlapping_roles() {
        let mut roles = roles_for_five();
        roles.liberals.remove(&PlayerId::new(2));
        let err = Game::new(agents(5), roles, seats(5), liberal_deck())
            .err()
            .unwrap();
        assert_eq!(err, SetupError::MissingRole(PlayerId::new(2)));

        let mut roles = roles_for_five();
        roles.fascists.insert(PlayerId::new(0));
        let err = Game::new(agents(5), roles, seats(5), liberal_deck())
            .err()
            .unwrap();
        assert_eq!(err, SetupError::OverlappingRoles(PlayerId::new(0)));
    }

    #[test]
    fn test_setup_rejects_wrong_team_sizes() {
        // Swap one seat between teams: partition still holds, sizes do not.
        let mut roles = roles_for_five();
        roles.liberals.remove(&PlayerId::new(2));
        roles.fascists.insert(PlayerId::new(2));
        let err = Game::new(agents(5), roles, seats(5), liberal_deck())
            .err()
            .unwrap();
        assert_eq!(
            err,
            SetupError::WrongLiberalCount {
                players: 5,
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_setup_rejects_liberal_hitler() {
        let mut roles = roles_for_five();
        roles.hitler = PlayerId::new(0);
        let err = Game::new(agents(5), roles, seats(5), liberal_deck())
            .err()
            .unwrap();
        assert_eq!(err, SetupError::HitlerNotFascist(PlayerId::new(0)));
    }

    #[test]
    fn test_setup_rejects_non_permutation_order() {
        let mut order = seats(5);
        order[0] = PlayerId::new(4); // seat 4 twice, seat 0 never
        let err = Game::new(agents(5), roles_for_five(), order, liberal_deck())
            .err()
            .unwrap();
        assert_eq!(err, SetupError::InvalidPresidentialOrder);
    }

    #[test]
    fn test_presidency_rotates_in_seat_order() {
        let mut game = five_player_game(liberal_deck());

        game.play_round().unwrap();
        assert_eq!(game.history().get(0).unwrap().president, Some(PlayerId::new(0)));

        game.play_round().unwrap();
        assert_eq!(game.history().get(1).unwrap().president, Some(PlayerId::new(1)));
    }

    #[test]
    fn test_round_fills_phase_fields() {
        let mut game = five_player_game(liberal_deck());
        game.play_round().unwrap();

        let record = game.history().current();
        assert_eq!(record.president, Some(PlayerId::new(0)));
        assert_eq!(record.chancellor, Some(PlayerId::new(1)));
        assert_eq!(record.successful_election, Some(true));
        assert_eq!(record.num_fascist_policies_for_president, Some(0));
        assert_eq!(record.selected_policy, Some(Policy::Liberal));
        assert!(record.declared_election_intent.is_some());
        assert!(record.president_claimed_fascist_draws.is_some());
        // All-liberal enactment unlocks nothing.
        assert_eq!(record.investigated_player, None);
        assert_eq!(record.executed_player, None);
    }

    #[test]
    fn test_all_liberal_deck_ends_in_liberal_tally_win() {
        let mut game = five_player_game(liberal_deck());
        let (winner, reason) = game.play_game();

        assert_eq!(winner, Allegiance::Liberal);
        assert_eq!(reason, REASON_FIVE_LIBERAL);
        assert_eq!(game.history().len(), 5);
        assert_eq!(game.history().verdict(), Some((winner, REASON_FIVE_LIBERAL)));
    }

    #[test]
    fn test_winner_priority_order() {
        let mut game = five_player_game(liberal_deck());
        game.state.liberal_policies_passed = 5;
        game.state.shot_hitler = true;
        assert_eq!(game.winner(), Some((Allegiance::Liberal, REASON_FIVE_LIBERAL)));

        game.state.liberal_policies_passed = 0;
        assert_eq!(game.winner(), Some((Allegiance::Liberal, REASON_SHOT_HITLER)));

        game.state.shot_hitler = false;
        game.state.fascist_policies_passed = 6;
        assert_eq!(game.winner(), Some((Allegiance::Fascist, REASON_SIX_FASCIST)));

        game.state.fascist_policies_passed = 0;
        game.state.elected_hitler = true;
        assert_eq!(game.winner(), Some((Allegiance::Fascist, REASON_ELECTED_HITLER)));
    }

    #[test]
    fn test_fascist_enactment_triggers_investigation() {
        // One fascist policy on top; the rest liberal.
        let mut cards = vec![Policy::Fascist; 3];
        cards.extend(vec![Policy::Liberal; 14]);
        let mut game = five_player_game(PolicyDeck::new(cards, &GameRng::new(0)));

        game.play_round().unwrap();

        let record = game.history().current();
        assert_eq!(record.selected_policy, Some(Policy::Fascist));
        assert_eq!(record.investigated_player, Some(PlayerId::new(1)));
        assert_eq!(
            record.investigated_player_allegiance,
            Some(Allegiance::Liberal)
        );
        assert_eq!(
            record.claimed_investigation_result,
            Some(Allegiance::Liberal)
        );
    }

    #[test]
    fn test_nominating_ineligible_chancellor_is_a_fault() {
        struct BadNominee;
        impl Player for BadNominee {
            fn select_chancellor(&mut self, state: &PlayerView) -> PlayerId {
                state.you() // the president themselves: never eligible
            }
            fn intent_to_vote_on_government(&mut self, _: &PlayerView) -> Option<bool> {
                None
            }
            fn vote_on_government(&mut self, _: &PlayerView) -> bool {
                true
            }
            fn select_policy_to_discard_as_president(&mut self, _: &PlayerView) -> Policy {
                Policy::Fascist
            }
            fn select_policy_to_discard_as_chancellor(&mut self, _: &PlayerView) -> Policy {
                Policy::Fascist
            }
            fn veto_legislation(&mut self, _: &PlayerView) -> bool {
                false
            }
            fn claimed_policy_to_discard_as_president(
                &mut self,
                _: &PlayerView,
            ) -> (u8, Policy) {
                (0, Policy::Liberal)
            }
            fn claimed_policy_to_discard_as_chancellor(
                &mut self,
                _: &PlayerView,
            ) -> Policy {
                Policy::Liberal
            }
            fn select_player_to_investigate(&mut self, state: &PlayerView) -> PlayerId {
                state.you()
            }
            fn claimed_player_investigation_result(
                &mut self,
                _: &PlayerView,
            ) -> Allegiance {
                Allegiance::Liberal
            }
            fn select_special_election_president(
                &mut self,
                state: &PlayerView,
            ) -> PlayerId {
                state.you()
            }
            fn select_player_to_execute(&mut self, state: &PlayerView) -> PlayerId {
                state.you()
            }
        }

        let mut players: Vec<Box<dyn Player>> = vec![Box::new(BadNominee)];
        players.extend(agents(4));
        let mut game =
            Game::new(players, roles_for_five(), seats(5), liberal_deck()).unwrap();

        let fault = game.play_round().unwrap_err();
        assert_eq!(fault.player, PlayerId::new(0));
        assert!(fault.message.contains("ineligible chancellor"));
    }

    #[test]
    fn test_fault_loses_the_game_for_the_offending_team() {
        struct Panicker;
        impl Player for Panicker {
            fn select_chancellor(&mut self, _: &PlayerView) -> PlayerId {
                panic!("unimplemented strategy branch")
            }
            fn intent_to_vote_on_government(&mut self, _: &PlayerView) -> Option<bool> {
                panic!("unimplemented strategy branch")
            }
            fn vote_on_government(&mut self, _: &PlayerView) -> bool {
                panic!("unimplemented strategy branch")
            }
            fn select_policy_to_discard_as_president(&mut self, _: &PlayerView) -> Policy {
                panic!("unimplemented strategy branch")
            }
            fn select_policy_to_discard_as_chancellor(&mut self, _: &PlayerView) -> Policy {
                panic!("unimplemented strategy branch")
            }
            fn veto_legislation(&mut self, _: &PlayerView) -> bool {
                panic!("unimplemented strategy branch")
            }
            fn claimed_policy_to_discard_as_president(
                &mut self,
                _: &PlayerView,
            ) -> (u8, Policy) {
                panic!("unimplemented strategy branch")
            }
            fn claimed_policy_to_discard_as_chancellor(
                &mut self,
                _: &PlayerView,
            ) -> Policy {
                panic!("unimplemented strategy branch")
            }
            fn select_player_to_investigate(&mut self, _: &PlayerView) -> PlayerId {
                panic!("unimplemented strategy branch")
            }
            fn claimed_player_investigation_result(
                &mut self,
                _: &PlayerView,
            ) -> Allegiance {
                panic!("unimplemented strategy branch")
            }
            fn select_special_election_president(&mut self, _: &PlayerView) -> PlayerId {
                panic!("unimplemented strategy branch")
            }
            fn select_player_to_execute(&mut self, _: &PlayerView) -> PlayerId {
                panic!("unimplemented strategy branch")
            }
        }

        // Seat 3 is a fascist; its panic hands the liberals the win.
        let mut players: Vec<Box<dyn Player>> = agents(3);
        players.push(Box::new(Panicker));
        players.extend(agents(1));
        let mut game =
            Game::new(players, roles_for_five(), seats(5), liberal_deck()).unwrap();

        let (winner, reason) = game.play_game();
        assert_eq!(winner, Allegiance::Liberal);
        assert!(reason.contains("Player 3"));
        assert!(reason.contains("unimplemented strategy branch"));
    }

    #[test]
    fn test_game_report_lists_each_round() {
        let mut game = five_player_game(liberal_deck());
        game.play_round().unwrap();
        game.play_round().unwrap();

        let report = game.write_game_report();
        assert_eq!(report[0], "Round #1");
        assert!(report.iter().any(|line| line == "Round #2"));
        assert!(report
            .iter()
            .any(|line| line.trim_start().starts_with("president ") && line.contains("Player 0")));
        // Unresolved fields never appear.
        assert!(!report.iter().any(|line| line.contains("anarchy_result")));
    }

    #[test]
    fn test_report_columns_align_across_rounds() {
        let mut game = five_player_game(liberal_deck());
        game.play_round().unwrap();

        // A round that died at a failed election resolves far fewer fields;
        // its column width must not shrink.
        let mut sparse = RoundRecord::new(5, game.fascist_seats.clone(), game.hitler);
        sparse.president = Some(PlayerId::new(1));
        sparse.successful_election = Some(false);
        game.history.open_round(sparse);

        let report = game.write_game_report();
        let columns: std::collections::HashSet<usize> = report
            .iter()
            .filter(|line| line.starts_with("    "))
            .map(|line| line.find(':').unwrap())
            .collect();
        assert_eq!(columns.len(), 1);
    }
}
