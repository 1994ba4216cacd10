//! Match orchestrator
//!
//! `DuelArena` bridges duel state machines to their action sources: human
//! submissions arriving as async calls, the opponent controller firing on a
//! fixed delay, and the per-match deadline. Each arena owns its registry,
//! ledger handle, directory, and dice, so tests construct isolated arenas.
//!
//! Both timers are spawned tasks that re-check match state under the registry
//! lock when they fire; a stale policy move or a deadline that lost the race
//! to a knockout drops out without touching the match. The `resolved` flag on
//! the match makes settlement at-most-once no matter which path gets there
//! first. Calls must run inside a tokio runtime.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use crate::core::config::ArenaConfig;
use crate::core::error::{ArenaError, Result};
use crate::core::types::{ActorId, Chips, MatchId};
use crate::duel::dice::Dice;
use crate::duel::directory::ActorDirectory;
use crate::duel::escrow;
use crate::duel::events::{DuelEvent, MatchSnapshot};
use crate::duel::participant::Participant;
use crate::duel::policy;
use crate::duel::resolver;
use crate::duel::settlement::{self, SettlementReport};
use crate::duel::state::{Action, DuelMatch, Outcome, Side};
use crate::ledger::Ledger;

/// Buffered events per match stream; slow subscribers lag, never block
const EVENT_CAPACITY: usize = 64;

/// What the caller gets back from a newly created match
#[derive(Debug)]
pub struct MatchHandle {
    pub id: MatchId,
    pub snapshot: MatchSnapshot,
    /// Per-turn snapshots and the final terminal snapshot
    pub events: broadcast::Receiver<DuelEvent>,
}

/// Result of one accepted action
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub snapshot: MatchSnapshot,
    pub log: String,
    /// Set when this turn ended the match
    pub outcome: Option<Outcome>,
}

struct MatchSlot {
    duel: DuelMatch,
    events: broadcast::Sender<DuelEvent>,
}

struct ArenaInner {
    config: ArenaConfig,
    ledger: Arc<dyn Ledger>,
    directory: Arc<dyn ActorDirectory>,
    matches: Mutex<HashMap<MatchId, MatchSlot>>,
    dice: Mutex<Box<dyn Dice>>,
}

/// The match orchestrator; cheap to clone, shares one registry
#[derive(Clone)]
pub struct DuelArena {
    inner: Arc<ArenaInner>,
}

impl DuelArena {
    pub fn new(
        config: ArenaConfig,
        ledger: Arc<dyn Ledger>,
        directory: Arc<dyn ActorDirectory>,
        dice: Box<dyn Dice>,
    ) -> Self {
        Self {
            inner: Arc::new(ArenaInner {
                config,
                ledger,
                directory,
                matches: Mutex::new(HashMap::new()),
                dice: Mutex::new(dice),
            }),
        }
    }

    /// Open a match between a live challenger and a named opponent
    ///
    /// The opponent name is resolved through the directory; no live actor
    /// means the slot is policy-controlled. A positive wager is escrowed from
    /// the challenger before the match exists; the opponent never stakes.
    pub fn create_match(
        &self,
        challenger: &ActorId,
        challenger_name: &str,
        opponent_name: &str,
        wager: Chips,
    ) -> Result<MatchHandle> {
        let opponent = match self.inner.directory.resolve(opponent_name) {
            Some(profile) => Participant::bound(profile.id, profile.display_name),
            None => Participant::policy(opponent_name),
        };

        // Escrow first: if the stake bounces, no match is created
        escrow::hold_stake(&*self.inner.ledger, challenger, wager)?;

        let duel = DuelMatch::new(
            Participant::bound(challenger.clone(), challenger_name),
            opponent,
            wager,
        );
        let id = duel.id;
        let snapshot = MatchSnapshot::of(&duel);
        let (tx, rx) = broadcast::channel(EVENT_CAPACITY);

        {
            let mut matches = self.lock_matches();
            matches.insert(id, MatchSlot { duel, events: tx.clone() });
        }

        tracing::info!(
            "match {} opened: {} vs {} (wager {})",
            id,
            snapshot.challenger.display_name,
            snapshot.opponent.display_name,
            wager
        );
        let _ = tx.send(DuelEvent::Opened { snapshot: snapshot.clone() });
        self.spawn_deadline(id);

        Ok(MatchHandle { id, snapshot, events: rx })
    }

    /// Submit an action for the actor owning the current turn
    pub fn submit_action(
        &self,
        match_id: MatchId,
        actor: &ActorId,
        action: Action,
    ) -> Result<TurnOutcome> {
        let (snapshot, log, ended, schedule_policy) = {
            let mut matches = self.lock_matches();
            let slot = matches
                .get_mut(&match_id)
                .ok_or(ArenaError::UnknownMatch(match_id))?;
            if slot.duel.is_terminal() {
                return Err(ArenaError::UnknownMatch(match_id));
            }

            let side = slot.duel.turn;
            match slot.duel.participant(side).actor.as_ref() {
                Some(owner) if owner == actor => {}
                _ => return Err(ArenaError::NotYourTurn),
            }

            let (snapshot, log, ended) = self.apply_turn(slot, side, action);
            let schedule_policy =
                ended.is_none() && slot.duel.participant(slot.duel.turn).policy_controlled();
            (snapshot, log, ended, schedule_policy)
        };

        if let Some(outcome) = ended {
            self.settle_and_close(match_id, outcome);
        } else if schedule_policy {
            self.spawn_policy_move(match_id);
        }

        Ok(TurnOutcome { snapshot, log, outcome: ended })
    }

    /// Current state of an active match
    pub fn snapshot(&self, match_id: MatchId) -> Option<MatchSnapshot> {
        let matches = self.lock_matches();
        matches.get(&match_id).map(|slot| MatchSnapshot::of(&slot.duel))
    }

    /// Subscribe to an active match's event stream
    pub fn subscribe(&self, match_id: MatchId) -> Result<broadcast::Receiver<DuelEvent>> {
        let matches = self.lock_matches();
        matches
            .get(&match_id)
            .map(|slot| slot.events.subscribe())
            .ok_or(ArenaError::UnknownMatch(match_id))
    }

    /// Number of matches still in the registry
    pub fn active_matches(&self) -> usize {
        self.lock_matches().len()
    }

    /// Resolve one turn and publish its snapshot; concludes on knockout
    fn apply_turn(
        &self,
        slot: &mut MatchSlot,
        side: Side,
        action: Action,
    ) -> (MatchSnapshot, String, Option<Outcome>) {
        let report = {
            let mut dice = self.lock_dice();
            resolver::resolve_turn(&mut slot.duel, side, action, &self.inner.config, dice.as_mut())
        };

        let ended = if report.knockout {
            let outcome = slot.duel.outcome_by_hp();
            slot.duel.conclude(outcome);
            Some(outcome)
        } else {
            None
        };

        let snapshot = MatchSnapshot::of(&slot.duel);
        let _ = slot.events.send(DuelEvent::TurnResolved {
            snapshot: snapshot.clone(),
            log: report.log.clone(),
        });
        (snapshot, report.log, ended)
    }

    /// Arm the opponent controller after a fixed delay
    fn spawn_policy_move(&self, match_id: MatchId) {
        let arena = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(arena.inner.config.policy_move_delay()).await;
            arena.run_policy_move(match_id);
        });
    }

    /// Execute a due policy move unless it went stale while sleeping
    fn run_policy_move(&self, match_id: MatchId) {
        let ended = {
            let mut matches = self.lock_matches();
            let Some(slot) = matches.get_mut(&match_id) else {
                return;
            };
            if slot.duel.is_terminal()
                || slot.duel.turn != Side::Opponent
                || !slot.duel.opponent.policy_controlled()
            {
                return;
            }

            let action = {
                let mut dice = self.lock_dice();
                policy::choose_action(dice.as_mut())
            };
            let (_, _, ended) = self.apply_turn(slot, Side::Opponent, action);
            ended
        };

        if let Some(outcome) = ended {
            self.settle_and_close(match_id, outcome);
        }
    }

    /// Arm the match deadline
    fn spawn_deadline(&self, match_id: MatchId) {
        let arena = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(arena.inner.config.match_deadline()).await;
            arena.expire(match_id);
        });
    }

    /// Force the higher-HP tie-break once the action window closes
    fn expire(&self, match_id: MatchId) {
        let outcome = {
            let matches = self.lock_matches();
            let Some(slot) = matches.get(&match_id) else {
                return;
            };
            if slot.duel.is_terminal() {
                return;
            }
            slot.duel.outcome_by_hp()
        };

        tracing::info!("match {} hit the action deadline", match_id);
        self.settle_and_close(match_id, outcome);
    }

    /// Settle at most once, emit the terminal event, drop the match
    fn settle_and_close(&self, match_id: MatchId, outcome: Outcome) -> Option<SettlementReport> {
        let (duel, tx) = {
            let mut matches = self.lock_matches();
            let slot = matches.get_mut(&match_id)?;
            if slot.duel.resolved {
                return None;
            }
            slot.duel.resolved = true;
            slot.duel.conclude(outcome);
            (slot.duel.clone(), slot.events.clone())
        };

        let outcome = duel.outcome.unwrap_or(outcome);
        let report = settlement::settle(&duel, outcome, &*self.inner.ledger, &self.inner.config);

        {
            let mut matches = self.lock_matches();
            matches.remove(&match_id);
        }

        tracing::info!("match {} settled: {:?}", match_id, outcome);
        let _ = tx.send(DuelEvent::Concluded {
            snapshot: MatchSnapshot::of(&duel),
            outcome,
            description: report.description.clone(),
        });
        Some(report)
    }

    fn lock_matches(&self) -> MutexGuard<'_, HashMap<MatchId, MatchSlot>> {
        self.inner.matches.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_dice(&self) -> MutexGuard<'_, Box<dyn Dice>> {
        self.inner.dice.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel::dice::ScriptedDice;
    use crate::duel::directory::{ActorProfile, EmptyDirectory, StaticDirectory};
    use crate::ledger::memory::MemoryLedger;

    fn arena_with(dice: ScriptedDice, directory: Arc<dyn ActorDirectory>) -> (DuelArena, Arc<MemoryLedger>) {
        let ledger = Arc::new(MemoryLedger::new(5000, 100));
        let arena = DuelArena::new(
            ArenaConfig::default(),
            ledger.clone(),
            directory,
            Box::new(dice),
        );
        (arena, ledger)
    }

    #[tokio::test]
    async fn test_create_escrows_stake() {
        let (arena, ledger) = arena_with(ScriptedDice::default(), Arc::new(EmptyDirectory));
        let challenger = ActorId::from("1");

        let handle = arena
            .create_match(&challenger, "Marcus", "Rogue Helix", 300)
            .unwrap();

        assert_eq!(ledger.balance(&challenger).unwrap(), 4700);
        assert!(handle.snapshot.opponent.policy_controlled());
        assert_eq!(arena.active_matches(), 1);
    }

    #[tokio::test]
    async fn test_insufficient_stake_creates_nothing() {
        let (arena, ledger) = arena_with(ScriptedDice::default(), Arc::new(EmptyDirectory));
        let challenger = ActorId::from("1");

        let err = arena
            .create_match(&challenger, "Marcus", "Rogue Helix", 9000)
            .unwrap_err();

        assert!(matches!(err, ArenaError::InsufficientFunds { .. }));
        assert_eq!(ledger.balance(&challenger).unwrap(), 5000);
        assert_eq!(arena.active_matches(), 0);
    }

    #[tokio::test]
    async fn test_opponent_binds_when_directory_resolves() {
        let directory = StaticDirectory::new(vec![ActorProfile {
            id: ActorId::from("2"),
            username: "elena_v".into(),
            display_name: "Elena".into(),
        }]);
        let (arena, ledger) = arena_with(ScriptedDice::default(), Arc::new(directory));

        let handle = arena
            .create_match(&ActorId::from("1"), "Marcus", "elena", 100)
            .unwrap();

        assert_eq!(handle.snapshot.opponent.actor, Some(ActorId::from("2")));
        assert_eq!(handle.snapshot.opponent.display_name, "Elena");
        // Only the challenger staked
        assert_eq!(ledger.balance(&ActorId::from("2")).unwrap(), 5000);
    }

    #[tokio::test]
    async fn test_out_of_turn_action_rejected_without_mutation() {
        let directory = StaticDirectory::new(vec![ActorProfile {
            id: ActorId::from("2"),
            username: "elena_v".into(),
            display_name: "Elena".into(),
        }]);
        let (arena, _) = arena_with(ScriptedDice::new([20]), Arc::new(directory));
        let handle = arena
            .create_match(&ActorId::from("1"), "Marcus", "Elena", 0)
            .unwrap();

        // The opponent tries to move on the challenger's turn
        let err = arena
            .submit_action(handle.id, &ActorId::from("2"), Action::Strike)
            .unwrap_err();
        assert!(matches!(err, ArenaError::NotYourTurn));

        // A stranger is rejected the same way
        let err = arena
            .submit_action(handle.id, &ActorId::from("99"), Action::Strike)
            .unwrap_err();
        assert!(matches!(err, ArenaError::NotYourTurn));

        let snapshot = arena.snapshot(handle.id).unwrap();
        assert_eq!(snapshot.challenger.hit_points, 100);
        assert_eq!(snapshot.opponent.hit_points, 100);
        assert_eq!(snapshot.turns_taken, 0);
    }

    #[tokio::test]
    async fn test_unknown_match_rejected() {
        let (arena, _) = arena_with(ScriptedDice::default(), Arc::new(EmptyDirectory));
        let err = arena
            .submit_action(MatchId::new(), &ActorId::from("1"), Action::Guard)
            .unwrap_err();
        assert!(matches!(err, ArenaError::UnknownMatch(_)));
    }
}
