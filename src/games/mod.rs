//! Wager mini-games
//!
//! Small house games sharing the duel's dice seam and the ledger's escrow
//! primitives: stake up front, payout on the result, nothing held between
//! rounds.

pub mod coinflip;
pub mod slots;

use crate::core::error::{ArenaError, Result};
use crate::core::types::Chips;

/// Reject the zero/absent stakes the games cannot accept
pub(crate) fn require_positive_wager(wager: Chips) -> Result<()> {
    if wager == 0 {
        return Err(ArenaError::InvalidWager("wager must be positive".into()));
    }
    Ok(())
}
