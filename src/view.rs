//! The perceived-state projection handed to agents.
//!
//! Every decision point receives a [`PlayerView`]: an independently owned
//! copy of the round history up to and including the current round, with the
//! requesting seat stamped on every record. Agents hold `&PlayerView` and
//! own nothing of the engine, so nothing they do can reach shared state, and
//! they cannot see past the current round.
//!
//! Ground-truth role membership (`fascists`, `hitler`) is present on every
//! record and therefore visible to every agent regardless of its own
//! allegiance. That transparency is a property of the simulated game, kept
//! deliberately; see DESIGN.md.

use crate::core::PlayerId;
use crate::history::{RoundHistory, RoundRecord};

/// One agent's perception of the game: the history prefix plus its own seat.
#[derive(Clone, Debug)]
pub struct PlayerView {
    history: RoundHistory,
    you: PlayerId,
}

impl PlayerView {
    /// Project `history` for the requesting seat.
    ///
    /// Every record in the copy carries `your_player_id = you`.
    #[must_use]
    pub(crate) fn project(history: &RoundHistory, you: PlayerId) -> Self {
        let mut projected = RoundHistory::new();
        for record in history.iter() {
            let mut record = record.clone();
            record.your_player_id = Some(you);
            projected.open_round(record);
        }
        Self {
            history: projected,
            you,
        }
    }

    /// The requesting seat.
    #[must_use]
    pub fn you(&self) -> PlayerId {
        self.you
    }

    /// The full perceived history, derived accessors included.
    #[must_use]
    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    /// The current round's record.
    #[must_use]
    pub fn current(&self) -> &RoundRecord {
        self.history.current()
    }

    /// Seats still alive, in seat order.
    #[must_use]
    pub fn living_players(&self) -> Vec<PlayerId> {
        let executed = self.history.executed_players();
        PlayerId::all(self.current().number_of_players)
            .filter(|p| !executed.contains(p))
            .collect()
    }

    /// Seats the sitting president may nominate for chancellor, mirroring
    /// the engine's eligibility rule: alive, not the president, and not a
    /// member of the most recent successfully elected government while more
    /// than five players live.
    #[must_use]
    pub fn eligible_chancellor_candidates(&self) -> Vec<PlayerId> {
        let president = self.current().president;
        let living = self.living_players();
        let term_limited = if living.len() > 5 {
            self.history.last_successful_government()
        } else {
            None
        };

        living
            .into_iter()
            .filter(|&p| {
                if Some(p) == president {
                    return false;
                }
                match term_limited {
                    Some((prev_president, prev_chancellor)) => {
                        p != prev_president && p != prev_chancellor
                    }
                    None => true,
                }
            })
            .collect()
    }
}
