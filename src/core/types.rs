//! Allegiances, policy cards, and the party-membership table.

use serde::{Deserialize, Serialize};

/// A player's team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Allegiance {
    Liberal,
    Fascist,
}

impl Allegiance {
    /// The opposing team.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Allegiance::Liberal => Allegiance::Fascist,
            Allegiance::Fascist => Allegiance::Liberal,
        }
    }
}

impl std::fmt::Display for Allegiance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Allegiance::Liberal => write!(f, "LIBERAL"),
            Allegiance::Fascist => write!(f, "FASCIST"),
        }
    }
}

/// A policy card, and the outcome of a legislative session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Policy {
    Liberal,
    Fascist,
}

impl Policy {
    /// The other policy kind. A two-card legislative hand with one card of
    /// each kind passes the opposite of whatever was discarded.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Policy::Liberal => Policy::Fascist,
            Policy::Fascist => Policy::Liberal,
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Policy::Liberal => write!(f, "LIBERAL"),
            Policy::Fascist => write!(f, "FASCIST"),
        }
    }
}

/// Liberal policies in a fresh deck.
pub const LIBERAL_POLICY_COUNT: u8 = 6;
/// Fascist policies in a fresh deck.
pub const FASCIST_POLICY_COUNT: u8 = 11;
/// Liberal tally that ends the game.
pub const LIBERAL_POLICIES_TO_WIN: u8 = 5;
/// Fascist tally that ends the game.
pub const FASCIST_POLICIES_TO_WIN: u8 = 6;

/// Role-set sizes `(liberals, fascists)` for a supported player count.
///
/// Fascist counts include Hitler. Returns `None` for unsupported counts.
#[must_use]
pub const fn party_membership(player_count: usize) -> Option<(usize, usize)> {
    match player_count {
        5 => Some((3, 2)),
        6 => Some((4, 2)),
        7 => Some((4, 3)),
        8 => Some((5, 3)),
        9 => Some((5, 4)),
        10 => Some((6, 4)),
        _ => None,
    }
}
