//! Fault types and the boundary around untrusted agent code.
//!
//! Three disjoint classes:
//!
//! - [`SetupError`]: caller-attributable construction validation, raised
//!   before play starts.
//! - [`AgentFault`]: attributable to one participating agent. Produced by
//!   [`guard`] when agent code panics, or by the engine when a returned
//!   value is out of domain. Ends the game immediately; the offender's team
//!   loses.
//! - Engine invariant violations are *not* represented here: they are
//!   `panic!`s and propagate, since masking them would hide an engine bug.

use crate::core::PlayerId;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// Construction-time validation failure. A game must not be played from an
/// invalid configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("{0} players is not a supported player count (5-10)")]
    UnsupportedPlayerCount(usize),

    #[error("{0} does not have an assigned role")]
    MissingRole(PlayerId),

    #[error("{0} is assigned to both teams")]
    OverlappingRoles(PlayerId),

    #[error("invalid number of liberals for a {players} player game: expected {expected}, got {actual}")]
    WrongLiberalCount {
        players: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid number of fascists for a {players} player game: expected {expected}, got {actual}")]
    WrongFascistCount {
        players: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Hitler ({0}) is not in the fascist set")]
    HitlerNotFascist(PlayerId),

    #[error("Hitler ({0}) is not in the presidential order")]
    HitlerNotSeated(PlayerId),

    #[error("presidential order is not a permutation of all seats")]
    InvalidPresidentialOrder,

    #[error("expected {expected} agents, got {actual}")]
    AgentCountMismatch { expected: usize, actual: usize },
}

/// A fault attributable to one agent: a panic out of its code or an
/// out-of-domain return value.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AgentFault {
    /// The offending seat.
    pub player: PlayerId,
    /// Human-readable description of what went wrong.
    pub message: String,
    /// The underlying cause (panic payload), when there is one.
    pub cause: Option<String>,
}

impl AgentFault {
    /// A domain violation: the agent returned, but the value is invalid.
    #[must_use]
    pub fn new(player: PlayerId, message: impl Into<String>) -> Self {
        Self {
            player,
            message: message.into(),
            cause: None,
        }
    }

    /// The full human-readable reason, cause included.
    #[must_use]
    pub fn reason(&self) -> String {
        match &self.cause {
            Some(cause) => format!("{}: {}", self.message, cause),
            None => self.message.clone(),
        }
    }
}

/// Call into agent-supplied code, converting a panic into an [`AgentFault`]
/// attributed to `player`.
///
/// `context` describes the decision being made ("selecting a chancellor")
/// and lands in the fault message. Domain validation of the returned value
/// stays with the caller; this boundary only isolates uncontrolled faults.
pub fn guard<T>(
    player: PlayerId,
    context: &str,
    call: impl FnOnce() -> T,
) -> Result<T, AgentFault> {
    panic::catch_unwind(AssertUnwindSafe(call)).map_err(|payload| AgentFault {
        player,
        message: format!("panic from {player} while {context}"),
        cause: Some(panic_message(payload.as_ref())),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
