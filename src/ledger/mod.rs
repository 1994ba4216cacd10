//! Economy ledger interface
//!
//! The ledger is the only resource shared across concurrent matches. The core
//! calls it through this narrow trait; the storage engine behind it owns
//! durability and serializes balance mutations per actor. `memory::MemoryLedger`
//! is the in-process reference implementation used by tests and the demo binary.

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{ActorId, Chips, TimestampMs, Xp};

/// XP and derived level for one actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub xp: Xp,
    pub level: u32,
}

/// A named item stack in an actor's inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: String,
    pub quantity: u32,
}

/// One concluded duel, as recorded in history
///
/// Append-only; written exactly once per concluded match with a winner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuelRecord {
    pub challenger_name: String,
    pub opponent_name: String,
    pub winner_name: String,
    pub wager: Chips,
    pub timestamp_ms: TimestampMs,
}

/// Narrow interface the combat core consumes
///
/// Every mutation is atomic at the single-record level: credit/debit are
/// increment/decrement operations, never read-then-write with a stale read.
pub trait Ledger: Send + Sync {
    /// Current balance, opening the wallet if this actor is new
    fn balance(&self, actor: &ActorId) -> Result<Chips>;

    /// Add chips; returns the new balance
    fn credit(&self, actor: &ActorId, amount: Chips) -> Result<Chips>;

    /// Remove chips; fails with `InsufficientFunds` if balance < amount
    fn debit(&self, actor: &ActorId, amount: Chips) -> Result<Chips>;

    /// Add XP and recompute the level
    fn grant_xp(&self, actor: &ActorId, amount: Xp) -> Result<Progress>;

    /// Current XP/level without mutating
    fn progress(&self, actor: &ActorId) -> Result<Progress>;

    /// Add items to this actor's satchel
    fn add_item(&self, actor: &ActorId, item: &str, quantity: u32) -> Result<()>;

    /// Item stacks held, sorted by name
    fn inventory(&self, actor: &ActorId) -> Result<Vec<ItemStack>>;

    /// Declare this actor's faction allegiance
    fn set_faction(&self, actor: &ActorId, faction: &str) -> Result<()>;

    /// Current faction allegiance, if any
    fn faction(&self, actor: &ActorId) -> Result<Option<String>>;

    /// Timestamp of the last daily claim, if any
    fn last_daily(&self, actor: &ActorId) -> Result<Option<TimestampMs>>;

    /// Record a daily claim at the given time
    fn mark_daily(&self, actor: &ActorId, now_ms: TimestampMs) -> Result<()>;

    /// Richest wallets, descending by balance
    fn top_balances(&self, limit: usize) -> Result<Vec<(ActorId, Chips)>>;

    /// Append one concluded duel to history
    fn append_duel_record(
        &self,
        challenger_name: &str,
        opponent_name: &str,
        winner_name: &str,
        wager: Chips,
    ) -> Result<()>;

    /// Most recent duels, newest first
    fn duel_history(&self, limit: usize) -> Result<Vec<DuelRecord>>;
}
