//! Even-money coinflip

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{ActorId, Chips};
use crate::duel::dice::Dice;
use crate::games::require_positive_wager;
use crate::ledger::Ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinSide {
    Heads,
    Tails,
}

#[derive(Debug, Clone, Copy)]
pub struct FlipResult {
    pub landed: CoinSide,
    pub won: bool,
    /// Chips credited back (2x the wager on a win, zero otherwise)
    pub payout: Chips,
}

/// Stake the wager, flip a fair coin, pay double on a correct call
pub fn play(
    ledger: &dyn Ledger,
    actor: &ActorId,
    wager: Chips,
    pick: CoinSide,
    dice: &mut dyn Dice,
) -> Result<FlipResult> {
    require_positive_wager(wager)?;
    ledger.debit(actor, wager)?;

    let landed = if dice.pick(2) == 0 {
        CoinSide::Heads
    } else {
        CoinSide::Tails
    };
    let won = landed == pick;
    let payout = if won { wager * 2 } else { 0 };
    if payout > 0 {
        ledger.credit(actor, payout)?;
    }

    Ok(FlipResult { landed, won, payout })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ArenaError;
    use crate::duel::dice::ScriptedDice;
    use crate::ledger::memory::MemoryLedger;

    #[test]
    fn test_correct_call_pays_double() {
        let ledger = MemoryLedger::new(5000, 100);
        let actor = ActorId::from("1");
        let mut dice = ScriptedDice::new([0]);

        let result = play(&ledger, &actor, 500, CoinSide::Heads, &mut dice).unwrap();

        assert!(result.won);
        assert_eq!(result.payout, 1000);
        assert_eq!(ledger.balance(&actor).unwrap(), 5500);
    }

    #[test]
    fn test_wrong_call_loses_stake() {
        let ledger = MemoryLedger::new(5000, 100);
        let actor = ActorId::from("1");
        let mut dice = ScriptedDice::new([1]);

        let result = play(&ledger, &actor, 500, CoinSide::Heads, &mut dice).unwrap();

        assert!(!result.won);
        assert_eq!(result.landed, CoinSide::Tails);
        assert_eq!(ledger.balance(&actor).unwrap(), 4500);
    }

    #[test]
    fn test_zero_wager_rejected() {
        let ledger = MemoryLedger::new(5000, 100);
        let actor = ActorId::from("1");
        let mut dice = ScriptedDice::default();

        assert!(matches!(
            play(&ledger, &actor, 0, CoinSide::Tails, &mut dice),
            Err(ArenaError::InvalidWager(_))
        ));
        assert_eq!(ledger.balance(&actor).unwrap(), 5000);
    }
}
