//! Duel participant state

use serde::{Deserialize, Serialize};

use crate::core::types::ActorId;

/// Hit points every participant starts with; also the healing ceiling
pub const MAX_HP: i32 = 100;

/// One side of a duel
///
/// A participant is either bound to a live actor (who submits actions and
/// receives ledger credits) or policy-controlled (moves generated by the
/// opponent controller, no ledger presence).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Bound external identity; `None` for a policy-controlled slot
    pub actor: Option<ActorId>,
    pub display_name: String,
    /// Clamped to [0, MAX_HP] after every mutation
    pub hit_points: i32,
    /// Halves the next incoming strike, then clears
    pub guarding: bool,
}

impl Participant {
    /// Participant bound to a live actor
    pub fn bound(actor: ActorId, display_name: impl Into<String>) -> Self {
        Self {
            actor: Some(actor),
            display_name: display_name.into(),
            hit_points: MAX_HP,
            guarding: false,
        }
    }

    /// Policy-controlled participant (no live actor found)
    pub fn policy(display_name: impl Into<String>) -> Self {
        Self {
            actor: None,
            display_name: display_name.into(),
            hit_points: MAX_HP,
            guarding: false,
        }
    }

    /// True iff no bound external actor exists
    pub fn policy_controlled(&self) -> bool {
        self.actor.is_none()
    }

    pub fn defeated(&self) -> bool {
        self.hit_points == 0
    }

    /// Apply incoming damage, clamped at zero
    pub fn take_damage(&mut self, amount: i32) {
        self.hit_points = (self.hit_points - amount).clamp(0, MAX_HP);
    }

    /// Restore hit points, clamped at the ceiling
    pub fn heal(&mut self, amount: i32) {
        self.hit_points = (self.hit_points + amount).clamp(0, MAX_HP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut p = Participant::policy("Rogue Helix");
        p.take_damage(250);
        assert_eq!(p.hit_points, 0);
        assert!(p.defeated());
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut p = Participant::bound(ActorId::from("1"), "Marcus");
        p.take_damage(10);
        p.heal(500);
        assert_eq!(p.hit_points, MAX_HP);
    }

    #[test]
    fn test_policy_controlled_iff_unbound() {
        assert!(Participant::policy("ghost").policy_controlled());
        assert!(!Participant::bound(ActorId::from("1"), "Marcus").policy_controlled());
    }
}
