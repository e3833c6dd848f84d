//! The game engine: construction validation and the round state machine.
//!
//! [`Game`] drives one round at a time: deck check, record open, president
//! rotation, intent solicitation, chancellor nomination, election,
//! legislative session (with veto window), claims, executive action, anarchy,
//! and the termination check before every round.

pub mod game;
pub mod state;

pub use game::Game;
pub use state::{GameState, Government, RoleAssignment};
