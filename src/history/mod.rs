//! Round history: per-round snapshots and the append-only chain.
//!
//! - [`RoundRecord`]: one immutable-after-the-round snapshot, filled in
//!   progressively as phases resolve.
//! - [`RoundHistory`]: the append-only chain with derived aggregates
//!   (cumulative tallies, anarchy streak, executed players, chancellor
//!   ineligibility) computed on read by walking backward, never cached.

pub mod chain;
pub mod record;

pub use chain::{
    RoundHistory, REASON_ELECTED_HITLER, REASON_FIVE_LIBERAL, REASON_SHOT_HITLER,
    REASON_SIX_FASCIST,
};
pub use record::{DeclaredIntents, RoundRecord};
