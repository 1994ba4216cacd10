//! Scripted opponent behavior
//!
//! When the opponent slot has no bound actor, its moves come from this
//! weighted-random policy: strike twice as often as guard or recover.

use crate::duel::dice::Dice;
use crate::duel::state::Action;

/// Four equally weighted slots; strike fills two of them
const SLOTS: [Action; 4] = [Action::Strike, Action::Strike, Action::Guard, Action::Recover];

/// Choose the policy opponent's next action
pub fn choose_action(dice: &mut dyn Dice) -> Action {
    SLOTS[dice.pick(SLOTS.len())]
}
