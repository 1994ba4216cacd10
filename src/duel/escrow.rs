//! Wager escrow on top of ledger primitives
//!
//! Only the challenger stakes at creation; the opponent never does, even when
//! bound to a live actor. The stake is held conceptually as the match pot
//! until settlement refunds or pays it out.

use crate::core::error::Result;
use crate::core::types::{ActorId, Chips};
use crate::ledger::Ledger;

/// Debit the challenger's stake; a zero wager holds nothing
pub fn hold_stake(ledger: &dyn Ledger, challenger: &ActorId, wager: Chips) -> Result<()> {
    if wager > 0 {
        ledger.debit(challenger, wager)?;
    }
    Ok(())
}

/// Return the original stake to the challenger (draw or abandoned match)
pub fn refund_stake(ledger: &dyn Ledger, challenger: &ActorId, wager: Chips) -> Result<()> {
    if wager > 0 {
        ledger.credit(challenger, wager)?;
    }
    Ok(())
}

/// Pay the doubled pot to the winner
///
/// The pot equals the challenger's stake, so the house funds the other half.
pub fn pay_out(ledger: &dyn Ledger, winner: &ActorId, pot: Chips) -> Result<Chips> {
    ledger.credit(winner, pot * 2)
}
