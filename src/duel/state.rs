//! Duel match state machine
//!
//! One `DuelMatch` owns the participant state, turn order, and terminal
//! outcome for a single match. Transitions:
//! stake escrowed -> Active(turn) -> Terminal(outcome).
//! `terminal` is monotonic: once an outcome is set it never reverts, and the
//! `resolved` flag separately guards settlement so the natural-terminal path
//! and the timeout path cannot both pay out.

use serde::{Deserialize, Serialize};

use crate::core::types::{ActorId, Chips, MatchId};
use crate::duel::participant::Participant;

/// Which participant owns the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Challenger,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Challenger => Side::Opponent,
            Side::Opponent => Side::Challenger,
        }
    }
}

/// A turn action, from a live actor or the opponent controller
///
/// Not persisted beyond the turn that consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Strike,
    Guard,
    Recover,
}

/// Terminal outcome of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    ChallengerWins,
    OpponentWins,
    /// Both at equal HP at the end (including 0-0)
    Draw,
    /// Deadline elapsed before any action was collected
    Abandoned,
}

/// State of one active or concluded match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuelMatch {
    pub id: MatchId,
    pub challenger: Participant,
    pub opponent: Participant,
    /// Fixed at creation, never mutated mid-match
    pub wager: Chips,
    /// Equals the wager; paid out doubled to the winner
    pub pot: Chips,
    pub turn: Side,
    /// Terminal outcome; `None` while the match is active
    pub outcome: Option<Outcome>,
    /// Set once by the first settlement path to enter
    pub resolved: bool,
    /// Accepted actions so far; zero at the deadline means Abandoned
    pub turns_taken: u32,
}

impl DuelMatch {
    pub fn new(challenger: Participant, opponent: Participant, wager: Chips) -> Self {
        Self {
            id: MatchId::new(),
            challenger,
            opponent,
            wager,
            pot: wager,
            turn: Side::Challenger,
            outcome: None,
            resolved: false,
            turns_taken: 0,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Set the terminal outcome; a no-op if one is already set
    pub fn conclude(&mut self, outcome: Outcome) {
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
        }
    }

    pub fn participant(&self, side: Side) -> &Participant {
        match side {
            Side::Challenger => &self.challenger,
            Side::Opponent => &self.opponent,
        }
    }

    /// The acting participant and their defender, mutably
    pub fn combatants_mut(&mut self, side: Side) -> (&mut Participant, &mut Participant) {
        match side {
            Side::Challenger => (&mut self.challenger, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.challenger),
        }
    }

    /// Which side a submitting actor is bound to, if a party to this match
    pub fn side_of(&self, actor: &ActorId) -> Option<Side> {
        if self.challenger.actor.as_ref() == Some(actor) {
            Some(Side::Challenger)
        } else if self.opponent.actor.as_ref() == Some(actor) {
            Some(Side::Opponent)
        } else {
            None
        }
    }

    /// Tie-break used at the deadline: higher remaining HP wins, equal is a
    /// draw, and a match nobody ever acted in is abandoned
    pub fn outcome_by_hp(&self) -> Outcome {
        if self.turns_taken == 0 {
            return Outcome::Abandoned;
        }
        match self.challenger.hit_points.cmp(&self.opponent.hit_points) {
            std::cmp::Ordering::Greater => Outcome::ChallengerWins,
            std::cmp::Ordering::Less => Outcome::OpponentWins,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Winning participant for a decided outcome; `None` for draw/abandoned
    pub fn winner(&self, outcome: Outcome) -> Option<&Participant> {
        match outcome {
            Outcome::ChallengerWins => Some(&self.challenger),
            Outcome::OpponentWins => Some(&self.opponent),
            Outcome::Draw | Outcome::Abandoned => None,
        }
    }

    /// Losing participant for a decided outcome
    pub fn loser(&self, outcome: Outcome) -> Option<&Participant> {
        match outcome {
            Outcome::ChallengerWins => Some(&self.opponent),
            Outcome::OpponentWins => Some(&self.challenger),
            Outcome::Draw | Outcome::Abandoned => None,
        }
    }
}
