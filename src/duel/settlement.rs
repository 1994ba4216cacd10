//! Terminal payout and history recording
//!
//! Runs at most once per match; the arena flips the match's `resolved` flag
//! under its registry lock before calling in here, so the natural-terminal
//! path and the deadline path cannot both settle. Ledger failures are logged
//! and swallowed: turn state is never rolled back and the match still closes
//! (at-most-once payout, by contract).

use crate::core::config::ArenaConfig;
use crate::core::error::ArenaError;
use crate::core::types::{Chips, MatchId};
use crate::duel::escrow;
use crate::duel::state::{DuelMatch, Outcome};
use crate::ledger::Ledger;

/// What settlement did, for the terminal event and the caller
#[derive(Debug, Clone)]
pub struct SettlementReport {
    pub outcome: Outcome,
    pub description: String,
    /// Chips credited to the winner (zero for draws and policy winners)
    pub payout: Chips,
    /// Stake returned to the challenger (zero unless draw/abandoned)
    pub refunded: Chips,
}

/// Record a ledger failure during settlement without aborting it
fn log_failure(match_id: MatchId, what: &str, cause: &ArenaError) {
    let failure = ArenaError::SettlementFailure(format!("{}: {}", what, cause));
    tracing::warn!("match {}: {}", match_id, failure);
}

/// Settle a concluded match against the ledger
pub fn settle(
    duel: &DuelMatch,
    outcome: Outcome,
    ledger: &dyn Ledger,
    config: &ArenaConfig,
) -> SettlementReport {
    match duel.winner(outcome) {
        None => {
            // Draw or abandoned: only the original staker gets anything back
            let mut refunded = 0;
            if duel.wager > 0 {
                if let Some(challenger) = &duel.challenger.actor {
                    match escrow::refund_stake(ledger, challenger, duel.wager) {
                        Ok(()) => refunded = duel.wager,
                        Err(e) => log_failure(duel.id, "stake refund", &e),
                    }
                }
            }
            let description = match outcome {
                Outcome::Abandoned => "The duel expires with no blows exchanged.".to_string(),
                _ => "The duel ends in a stalemate.".to_string(),
            };
            SettlementReport {
                outcome,
                description,
                payout: 0,
                refunded,
            }
        }
        Some(winner) => {
            let mut payout = 0;
            if duel.wager > 0 {
                // A policy-controlled winner pays out into the void
                if let Some(actor) = &winner.actor {
                    match escrow::pay_out(ledger, actor, duel.pot) {
                        Ok(_) => payout = duel.pot * 2,
                        Err(e) => log_failure(duel.id, "pot payout", &e),
                    }
                }
            }

            if let Some(actor) = &winner.actor {
                if let Err(e) = ledger.grant_xp(actor, config.winner_xp) {
                    log_failure(duel.id, "winner XP grant", &e);
                }
            }
            if let Some(loser) = duel.loser(outcome) {
                if let Some(actor) = &loser.actor {
                    if let Err(e) = ledger.grant_xp(actor, config.loser_xp) {
                        log_failure(duel.id, "loser XP grant", &e);
                    }
                }
            }

            if let Err(e) = ledger.append_duel_record(
                &duel.challenger.display_name,
                &duel.opponent.display_name,
                &winner.display_name,
                duel.wager,
            ) {
                log_failure(duel.id, "duel record write", &e);
            }

            SettlementReport {
                outcome,
                description: format!("{} claims victory!", winner.display_name),
                payout,
                refunded: 0,
            }
        }
    }
}
