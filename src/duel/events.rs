//! Snapshot events emitted to the presentation layer
//!
//! Each match carries a broadcast stream: one snapshot per accepted turn and
//! a final terminal snapshot with the outcome description. The core never
//! renders; subscribers turn these into embeds, prompts, or logs.

use serde::{Deserialize, Serialize};

use crate::core::types::{Chips, MatchId};
use crate::duel::participant::Participant;
use crate::duel::state::{DuelMatch, Outcome, Side};

/// Immutable view of a match at one instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub id: MatchId,
    pub challenger: Participant,
    pub opponent: Participant,
    pub wager: Chips,
    pub pot: Chips,
    pub turn: Side,
    pub outcome: Option<Outcome>,
    pub turns_taken: u32,
}

impl MatchSnapshot {
    pub fn of(duel: &DuelMatch) -> Self {
        Self {
            id: duel.id,
            challenger: duel.challenger.clone(),
            opponent: duel.opponent.clone(),
            wager: duel.wager,
            pot: duel.pot,
            turn: duel.turn,
            outcome: duel.outcome,
            turns_taken: duel.turns_taken,
        }
    }

    /// Name of the participant owning the turn
    pub fn turn_owner_name(&self) -> &str {
        match self.turn {
            Side::Challenger => &self.challenger.display_name,
            Side::Opponent => &self.opponent.display_name,
        }
    }
}

/// Events published on a match's broadcast stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DuelEvent {
    /// Match created and stake escrowed
    Opened { snapshot: MatchSnapshot },
    /// One action accepted and resolved
    TurnResolved { snapshot: MatchSnapshot, log: String },
    /// Terminal state reached and settlement finished
    Concluded {
        snapshot: MatchSnapshot,
        outcome: Outcome,
        description: String,
    },
}
