//! Economy service layer
//!
//! Thin operations over the ledger that the command layer calls directly:
//! daily grants, transfers, leaderboards, faction alignment. No duel state
//! lives here; the ledger serializes the actual balance mutations.

use crate::core::config::ArenaConfig;
use crate::core::error::{ArenaError, Result};
use crate::core::types::{ActorId, Chips, TimestampMs};
use crate::ledger::{Ledger, Progress};

/// Result of a daily claim attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyOutcome {
    Granted { amount: Chips, balance: Chips },
    /// Claimed too soon; try again after the remaining time
    Cooldown { remaining_ms: u64, balance: Chips },
}

/// Grant the daily stipend at most once per cooldown window
///
/// The caller supplies the clock so the command layer and tests agree on time.
pub fn claim_daily(
    ledger: &dyn Ledger,
    actor: &ActorId,
    config: &ArenaConfig,
    now_ms: TimestampMs,
) -> Result<DailyOutcome> {
    let cooldown_ms = config.daily_cooldown().as_millis() as u64;
    if let Some(last) = ledger.last_daily(actor)? {
        let elapsed = now_ms.saturating_sub(last);
        if elapsed < cooldown_ms {
            return Ok(DailyOutcome::Cooldown {
                remaining_ms: cooldown_ms - elapsed,
                balance: ledger.balance(actor)?,
            });
        }
    }
    let balance = ledger.credit(actor, config.daily_amount)?;
    ledger.mark_daily(actor, now_ms)?;
    Ok(DailyOutcome::Granted {
        amount: config.daily_amount,
        balance,
    })
}

/// Move chips between actors; fails without mutation if the sender is short
pub fn transfer(
    ledger: &dyn Ledger,
    from: &ActorId,
    to: &ActorId,
    amount: Chips,
) -> Result<(Chips, Chips)> {
    if amount == 0 {
        return Err(ArenaError::InvalidWager("transfer amount must be positive".into()));
    }
    let from_balance = ledger.debit(from, amount)?;
    let to_balance = ledger.credit(to, amount)?;
    Ok((from_balance, to_balance))
}

/// Richest wallets, descending
pub fn leaderboard(ledger: &dyn Ledger, limit: usize) -> Result<Vec<(ActorId, Chips)>> {
    ledger.top_balances(limit)
}

/// Current XP and level
pub fn progress(ledger: &dyn Ledger, actor: &ActorId) -> Result<Progress> {
    ledger.progress(actor)
}

/// Swear allegiance to a faction
pub fn align_faction(ledger: &dyn Ledger, actor: &ActorId, faction: &str) -> Result<()> {
    ledger.set_faction(actor, faction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::memory::MemoryLedger;

    const DAY_MS: u64 = 24 * 60 * 60 * 1000;

    #[test]
    fn test_daily_grants_then_cools_down() {
        let ledger = MemoryLedger::new(5000, 100);
        let config = ArenaConfig::default();
        let actor = ActorId::from("1");

        let first = claim_daily(&ledger, &actor, &config, 1_000_000).unwrap();
        assert_eq!(
            first,
            DailyOutcome::Granted { amount: 1000, balance: 6000 }
        );

        let second = claim_daily(&ledger, &actor, &config, 1_000_000 + DAY_MS / 2).unwrap();
        assert!(matches!(second, DailyOutcome::Cooldown { .. }));
        assert_eq!(ledger.balance(&actor).unwrap(), 6000);

        let third = claim_daily(&ledger, &actor, &config, 1_000_000 + DAY_MS).unwrap();
        assert!(matches!(third, DailyOutcome::Granted { .. }));
    }

    #[test]
    fn test_transfer_moves_exact_amount() {
        let ledger = MemoryLedger::new(5000, 100);
        let (from, to) = (ActorId::from("1"), ActorId::from("2"));

        let (from_balance, to_balance) = transfer(&ledger, &from, &to, 1200).unwrap();
        assert_eq!(from_balance, 3800);
        assert_eq!(to_balance, 6200);
    }

    #[test]
    fn test_transfer_rejects_zero_and_overdraft() {
        let ledger = MemoryLedger::new(100, 100);
        let (from, to) = (ActorId::from("1"), ActorId::from("2"));

        assert!(matches!(
            transfer(&ledger, &from, &to, 0),
            Err(ArenaError::InvalidWager(_))
        ));
        assert!(matches!(
            transfer(&ledger, &from, &to, 500),
            Err(ArenaError::InsufficientFunds { .. })
        ));
        assert_eq!(ledger.balance(&to).unwrap(), 100);
    }

    #[test]
    fn test_faction_alignment_sticks() {
        let ledger = MemoryLedger::new(5000, 100);
        let actor = ActorId::from("1");

        align_faction(&ledger, &actor, "Shadow Syndicate").unwrap();
        assert_eq!(
            ledger.faction(&actor).unwrap().as_deref(),
            Some("Shadow Syndicate")
        );
    }
}
