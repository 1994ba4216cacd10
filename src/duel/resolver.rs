//! Turn resolution per the combat rule table
//!
//! Pure in-memory mutation: the ledger is never touched here. Strike damage
//! and recovery amounts are uniform rolls whose ranges depend on whether the
//! actor is human- or policy-controlled (the human ranges are more generous).
//! A guard halves the next incoming strike (floor, minimum 1) and clears
//! regardless; every strike lands, there is no miss chance.

use crate::core::config::ArenaConfig;
use crate::duel::dice::Dice;
use crate::duel::state::{Action, DuelMatch, Side};

/// What one accepted action did to the match
#[derive(Debug, Clone)]
pub struct TurnReport {
    /// Human-readable line for the presentation layer
    pub log: String,
    /// Did either side's HP reach zero
    pub knockout: bool,
}

/// Apply `action` for the side owning the turn, advance the turn, and report
pub fn resolve_turn(
    duel: &mut DuelMatch,
    side: Side,
    action: Action,
    config: &ArenaConfig,
    dice: &mut dyn Dice,
) -> TurnReport {
    let (actor, defender) = duel.combatants_mut(side);
    let scripted = actor.policy_controlled();

    let log = match action {
        Action::Strike => {
            let (lo, hi) = if scripted {
                (config.policy_strike_min, config.policy_strike_max)
            } else {
                (config.human_strike_min, config.human_strike_max)
            };
            let roll = dice.roll(lo, hi);
            let damage = if defender.guarding {
                (roll / 2).max(1)
            } else {
                roll
            };
            defender.take_damage(damage);
            // Guard absorbs exactly one strike
            defender.guarding = false;
            if scripted {
                format!("{} unleashes a shadow strike for {} damage!", actor.display_name, damage)
            } else {
                format!("{} strikes for {} damage!", actor.display_name, damage)
            }
        }
        Action::Guard => {
            actor.guarding = true;
            format!("{} braces for impact.", actor.display_name)
        }
        Action::Recover => {
            let (lo, hi) = if scripted {
                (config.policy_recover_min, config.policy_recover_max)
            } else {
                (config.human_recover_min, config.human_recover_max)
            };
            let roll = dice.roll(lo, hi);
            actor.heal(roll);
            actor.guarding = false;
            if scripted {
                format!("{} draws on shadow and restores {} vitality.", actor.display_name, roll)
            } else {
                format!("{} channels fate and restores {} vitality.", actor.display_name, roll)
            }
        }
    };

    let knockout = duel.challenger.defeated() || duel.opponent.defeated();
    duel.turns_taken += 1;
    duel.turn = side.other();

    TurnReport { log, knockout }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ActorId;
    use crate::duel::dice::ScriptedDice;
    use crate::duel::participant::{Participant, MAX_HP};

    fn duel() -> DuelMatch {
        DuelMatch::new(
            Participant::bound(ActorId::from("1"), "Marcus"),
            Participant::policy("Rogue Helix"),
            100,
        )
    }

    #[test]
    fn test_strike_unguarded_full_damage() {
        let mut duel = duel();
        let config = ArenaConfig::default();
        let mut dice = ScriptedDice::new([20]);

        let report = resolve_turn(&mut duel, Side::Challenger, Action::Strike, &config, &mut dice);

        assert_eq!(duel.opponent.hit_points, 80);
        assert_eq!(duel.turn, Side::Opponent);
        assert!(!report.knockout);
        assert!(report.log.contains("20 damage"));
    }

    #[test]
    fn test_guard_halves_one_strike_then_clears() {
        let mut duel = duel();
        let config = ArenaConfig::default();
        let mut dice = ScriptedDice::new([20]);

        duel.opponent.guarding = true;
        resolve_turn(&mut duel, Side::Challenger, Action::Strike, &config, &mut dice);

        // floor(20 * 0.5) = 10, and the guard is spent
        assert_eq!(duel.opponent.hit_points, 90);
        assert!(!duel.opponent.guarding);
    }

    #[test]
    fn test_guarded_strike_deals_at_least_one() {
        let mut duel = duel();
        let mut config = ArenaConfig::default();
        config.human_strike_min = 1;
        let mut dice = ScriptedDice::new([1]);

        duel.opponent.guarding = true;
        resolve_turn(&mut duel, Side::Challenger, Action::Strike, &config, &mut dice);

        assert_eq!(duel.opponent.hit_points, 99);
    }

    #[test]
    fn test_guard_sets_flag_without_damage() {
        let mut duel = duel();
        let config = ArenaConfig::default();
        let mut dice = ScriptedDice::default();

        resolve_turn(&mut duel, Side::Challenger, Action::Guard, &config, &mut dice);

        assert!(duel.challenger.guarding);
        assert_eq!(duel.challenger.hit_points, MAX_HP);
        assert_eq!(duel.opponent.hit_points, MAX_HP);
    }

    #[test]
    fn test_recover_heals_and_drops_own_guard() {
        let mut duel = duel();
        let config = ArenaConfig::default();
        let mut dice = ScriptedDice::new([12]);

        duel.challenger.hit_points = 50;
        duel.challenger.guarding = true;
        resolve_turn(&mut duel, Side::Challenger, Action::Recover, &config, &mut dice);

        assert_eq!(duel.challenger.hit_points, 62);
        assert!(!duel.challenger.guarding);
    }

    #[test]
    fn test_recover_clamps_at_ceiling() {
        let mut duel = duel();
        let config = ArenaConfig::default();
        let mut dice = ScriptedDice::new([16]);

        duel.challenger.hit_points = 95;
        resolve_turn(&mut duel, Side::Challenger, Action::Recover, &config, &mut dice);

        assert_eq!(duel.challenger.hit_points, MAX_HP);
    }

    #[test]
    fn test_knockout_signals_terminal() {
        let mut duel = duel();
        let config = ArenaConfig::default();
        let mut dice = ScriptedDice::new([14]);

        duel.challenger.hit_points = 10;
        let report = resolve_turn(&mut duel, Side::Opponent, Action::Strike, &config, &mut dice);

        assert_eq!(duel.challenger.hit_points, 0);
        assert!(report.knockout);
    }

    #[test]
    fn test_policy_strike_uses_narrower_range() {
        let mut duel = duel();
        let config = ArenaConfig::default();
        // Script asks for 24; the policy range caps at 20
        let mut dice = ScriptedDice::new([24]);

        resolve_turn(&mut duel, Side::Opponent, Action::Strike, &config, &mut dice);

        assert_eq!(duel.challenger.hit_points, 80);
    }
}
