//! Duel resolution subsystem
//!
//! The combat core: per-match state machines, the turn resolver, the scripted
//! opponent, and the orchestrator that drives matches from creation through
//! settlement against the economy ledger.

pub mod arena;
pub mod dice;
pub mod directory;
pub mod escrow;
pub mod events;
pub mod participant;
pub mod policy;
pub mod resolver;
pub mod settlement;
pub mod state;

pub use arena::{DuelArena, MatchHandle, TurnOutcome};
pub use dice::{Dice, ScriptedDice, SeededDice};
pub use directory::{ActorDirectory, ActorProfile, EmptyDirectory, StaticDirectory};
pub use events::{DuelEvent, MatchSnapshot};
pub use participant::{Participant, MAX_HP};
pub use state::{Action, DuelMatch, Outcome, Side};
