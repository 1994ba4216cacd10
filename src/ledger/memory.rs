//! In-memory ledger implementation
//!
//! Backs tests and the demo binary. A single mutex serializes all record
//! mutations, which satisfies the per-actor atomicity the core assumes.
//! Wallets open lazily with the configured starting balance, matching the
//! economy store's first-touch behavior. The whole ledger round-trips
//! through JSON for saves between demo sessions.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::core::error::{ArenaError, Result};
use crate::core::types::{ActorId, Chips, TimestampMs, Xp};
use crate::ledger::{DuelRecord, ItemStack, Ledger, Progress};

/// One actor's ledger row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Wallet {
    balance: Chips,
    xp: Xp,
    level: u32,
    last_daily: Option<TimestampMs>,
    faction: Option<String>,
    #[serde(default)]
    inventory: HashMap<String, u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerState {
    wallets: HashMap<ActorId, Wallet>,
    history: Vec<DuelRecord>,
}

/// Mutex-guarded in-memory ledger
#[derive(Debug)]
pub struct MemoryLedger {
    state: Mutex<LedgerState>,
    starting_cash: Chips,
    xp_per_level: Xp,
}

impl MemoryLedger {
    pub fn new(starting_cash: Chips, xp_per_level: Xp) -> Self {
        Self {
            state: Mutex::new(LedgerState::default()),
            starting_cash,
            xp_per_level,
        }
    }

    /// Serialize every wallet and the duel history
    pub fn to_json(&self) -> Result<String> {
        let state = self.lock();
        Ok(serde_json::to_string_pretty(&*state)?)
    }

    /// Rebuild a ledger from a `to_json` dump
    pub fn from_json(json: &str, starting_cash: Chips, xp_per_level: Xp) -> Result<Self> {
        let state: LedgerState = serde_json::from_str(json)?;
        Ok(Self {
            state: Mutex::new(state),
            starting_cash,
            xp_per_level,
        })
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        // A poisoned lock means a panic mid-mutation elsewhere; the wallet map
        // is still usable, so recover the guard rather than propagate.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wallet_mut<'a>(&self, state: &'a mut LedgerState, actor: &ActorId) -> &'a mut Wallet {
        state.wallets.entry(actor.clone()).or_insert_with(|| Wallet {
            balance: self.starting_cash,
            level: 1,
            ..Wallet::default()
        })
    }

    fn now_ms() -> TimestampMs {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as TimestampMs)
            .unwrap_or(0)
    }
}

impl Ledger for MemoryLedger {
    fn balance(&self, actor: &ActorId) -> Result<Chips> {
        let mut state = self.lock();
        Ok(self.wallet_mut(&mut state, actor).balance)
    }

    fn credit(&self, actor: &ActorId, amount: Chips) -> Result<Chips> {
        let mut state = self.lock();
        let wallet = self.wallet_mut(&mut state, actor);
        wallet.balance = wallet.balance.saturating_add(amount);
        Ok(wallet.balance)
    }

    fn debit(&self, actor: &ActorId, amount: Chips) -> Result<Chips> {
        let mut state = self.lock();
        let wallet = self.wallet_mut(&mut state, actor);
        if wallet.balance < amount {
            return Err(ArenaError::InsufficientFunds {
                needed: amount,
                held: wallet.balance,
            });
        }
        wallet.balance -= amount;
        Ok(wallet.balance)
    }

    fn grant_xp(&self, actor: &ActorId, amount: Xp) -> Result<Progress> {
        let mut state = self.lock();
        let per_level = self.xp_per_level;
        let wallet = self.wallet_mut(&mut state, actor);
        wallet.xp = wallet.xp.saturating_add(amount);
        wallet.level = (wallet.xp / per_level) as u32 + 1;
        Ok(Progress {
            xp: wallet.xp,
            level: wallet.level,
        })
    }

    fn progress(&self, actor: &ActorId) -> Result<Progress> {
        let mut state = self.lock();
        let wallet = self.wallet_mut(&mut state, actor);
        Ok(Progress {
            xp: wallet.xp,
            level: wallet.level,
        })
    }

    fn add_item(&self, actor: &ActorId, item: &str, quantity: u32) -> Result<()> {
        let mut state = self.lock();
        let wallet = self.wallet_mut(&mut state, actor);
        *wallet.inventory.entry(item.to_string()).or_insert(0) += quantity;
        Ok(())
    }

    fn inventory(&self, actor: &ActorId) -> Result<Vec<ItemStack>> {
        let mut state = self.lock();
        let wallet = self.wallet_mut(&mut state, actor);
        let mut stacks: Vec<ItemStack> = wallet
            .inventory
            .iter()
            .map(|(item, quantity)| ItemStack {
                item: item.clone(),
                quantity: *quantity,
            })
            .collect();
        stacks.sort_by(|a, b| a.item.cmp(&b.item));
        Ok(stacks)
    }

    fn set_faction(&self, actor: &ActorId, faction: &str) -> Result<()> {
        let mut state = self.lock();
        self.wallet_mut(&mut state, actor).faction = Some(faction.to_string());
        Ok(())
    }

    fn faction(&self, actor: &ActorId) -> Result<Option<String>> {
        let mut state = self.lock();
        Ok(self.wallet_mut(&mut state, actor).faction.clone())
    }

    fn last_daily(&self, actor: &ActorId) -> Result<Option<TimestampMs>> {
        let mut state = self.lock();
        Ok(self.wallet_mut(&mut state, actor).last_daily)
    }

    fn mark_daily(&self, actor: &ActorId, now_ms: TimestampMs) -> Result<()> {
        let mut state = self.lock();
        self.wallet_mut(&mut state, actor).last_daily = Some(now_ms);
        Ok(())
    }

    fn top_balances(&self, limit: usize) -> Result<Vec<(ActorId, Chips)>> {
        let state = self.lock();
        let mut rows: Vec<(ActorId, Chips)> = state
            .wallets
            .iter()
            .map(|(actor, wallet)| (actor.clone(), wallet.balance))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows.truncate(limit);
        Ok(rows)
    }

    fn append_duel_record(
        &self,
        challenger_name: &str,
        opponent_name: &str,
        winner_name: &str,
        wager: Chips,
    ) -> Result<()> {
        let mut state = self.lock();
        state.history.push(DuelRecord {
            challenger_name: challenger_name.to_string(),
            opponent_name: opponent_name.to_string(),
            winner_name: winner_name.to_string(),
            wager,
            timestamp_ms: Self::now_ms(),
        });
        Ok(())
    }

    fn duel_history(&self, limit: usize) -> Result<Vec<DuelRecord>> {
        let state = self.lock();
        Ok(state.history.iter().rev().take(limit).cloned().collect())
    }
}
