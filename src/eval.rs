//! Batch evaluation of strategy matchups.
//!
//! Plays many independently seeded games and aggregates outcomes by winning
//! team and by reason. Useful for comparing strategies head to head; the
//! per-game seeds derive from the batch seed, so a whole evaluation replays
//! exactly.

use rustc_hash::FxHashMap;
use tracing::info;

use crate::agents::{AggroFascist, NaiveLiberal, Player};
use crate::core::{party_membership, Allegiance, GameRng, PlayerId};
use crate::deck::PolicyDeck;
use crate::engine::{Game, RoleAssignment};
use crate::fault::SetupError;

/// Aggregated outcomes of a batch of games.
#[derive(Clone, Debug, Default)]
pub struct Evaluation {
    pub games: usize,
    pub liberal_wins: usize,
    pub fascist_wins: usize,
    /// Outcome reason -> count. Fault reasons land here verbatim, so a
    /// misbehaving strategy shows up in the tally.
    pub reasons: FxHashMap<String, usize>,
}

impl Evaluation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, winner: Allegiance, reason: String) {
        self.games += 1;
        match winner {
            Allegiance::Liberal => self.liberal_wins += 1,
            Allegiance::Fascist => self.fascist_wins += 1,
        }
        *self.reasons.entry(reason).or_insert(0) += 1;
    }

    /// Fraction of games the liberals won.
    #[must_use]
    pub fn liberal_win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.liberal_wins as f64 / self.games as f64
        }
    }
}

/// Play `games` games built by `build`, one derived seed per game.
pub fn evaluate_matchup<F>(
    games: usize,
    seed: u64,
    mut build: F,
) -> Result<Evaluation, SetupError>
where
    F: FnMut(u64) -> Result<Game, SetupError>,
{
    let mut evaluation = Evaluation::new();
    for index in 0..games {
        let mut game = build(seed.wrapping_add(index as u64))?;
        let (winner, reason) = game.play_game();
        evaluation.record(winner, reason);
    }
    info!(
        games = evaluation.games,
        liberal_wins = evaluation.liberal_wins,
        fascist_wins = evaluation.fascist_wins,
        "matchup evaluated"
    );
    Ok(evaluation)
}

/// A randomized standard setup: shuffled seating, randomly drawn teams, and
/// a shuffled 17-card deck, all from streams derived from `seed`.
pub fn standard_setup(
    players: usize,
    seed: u64,
) -> Result<(RoleAssignment, Vec<PlayerId>, PolicyDeck), SetupError> {
    let Some((_, fascist_count)) = party_membership(players) else {
        return Err(SetupError::UnsupportedPlayerCount(players));
    };

    let mut rng = GameRng::new(seed).for_context("setup");
    let mut presidential_order: Vec<PlayerId> = PlayerId::all(players).collect();
    rng.shuffle(&mut presidential_order);

    let mut pool: Vec<PlayerId> = PlayerId::all(players).collect();
    rng.shuffle(&mut pool);
    let hitler = pool[0];
    let fascists = pool[..fascist_count].iter().copied().collect();
    let liberals = pool[fascist_count..].iter().copied().collect();

    Ok((
        RoleAssignment {
            liberals,
            fascists,
            hitler,
        },
        presidential_order,
        PolicyDeck::shuffled(seed),
    ))
}

/// The reference matchup: [`NaiveLiberal`] in every liberal seat,
/// [`AggroFascist`] in every fascist seat, over a [`standard_setup`].
pub fn reference_game(players: usize, seed: u64) -> Result<Game, SetupError> {
    let (roles, presidential_order, deck) = standard_setup(players, seed)?;
    let agents = PlayerId::all(players)
        .map(|seat| {
            let agent_seed = seed.wrapping_add(seat.index() as u64 + 1);
            if roles.fascists.contains(&seat) {
                Box::new(AggroFascist::new(agent_seed)) as Box<dyn Player>
            } else {
                Box::new(NaiveLiberal::new(agent_seed)) as Box<dyn Player>
            }
        })
        .collect();
    Game::new(agents, roles, presidential_order, deck)
}
