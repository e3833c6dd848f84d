//! A deterministic engine for the social deduction game Secret Hitler.
//!
//! The engine runs complete games between programmatic players: it rotates
//! the presidency, holds elections, runs legislative sessions and executive
//! actions, and records everything in an append-only round history from
//! which all aggregate state is derived. Player strategies implement the
//! [`agents::Player`] trait and only ever see a [`view::PlayerView`], a
//! projection of the history with their own seat stamped in; hidden roles
//! stay hidden by what strategies choose to read, while the engine keeps
//! ground truth.
//!
//! Agent code runs behind a fault boundary: a panic or an out-of-domain
//! return ends the game with the offender's team losing, never the process.
//! Given the same seed and the same strategies, a game replays move for
//! move; the deck keeps its own RNG stream so agent randomness cannot
//! perturb card order.
//!
//! ```
//! use secret_hitler_sim::eval::reference_game;
//!
//! let mut game = reference_game(7, 42).unwrap();
//! let (winner, reason) = game.play_game();
//! println!("{winner} won: {reason}");
//! ```

pub mod agents;
pub mod core;
pub mod deck;
pub mod engine;
pub mod eval;
pub mod fault;
pub mod history;
pub mod view;

pub use crate::agents::Player;
pub use crate::core::{Allegiance, PlayerId, Policy};
pub use crate::engine::{Game, RoleAssignment};
pub use crate::fault::{AgentFault, SetupError};
pub use crate::history::{RoundHistory, RoundRecord};
pub use crate::view::PlayerView;
