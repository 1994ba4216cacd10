//! Three-reel weighted slot machine

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{ActorId, Chips};
use crate::duel::dice::Dice;
use crate::games::require_positive_wager;
use crate::ledger::Ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    Cherry,
    Lemon,
    Bell,
    Star,
    Seven,
}

impl Symbol {
    pub fn glyph(self) -> &'static str {
        match self {
            Symbol::Cherry => "cherry",
            Symbol::Lemon => "lemon",
            Symbol::Bell => "bell",
            Symbol::Star => "star",
            Symbol::Seven => "seven",
        }
    }
}

/// Per-symbol weights out of 100; Seven is the rarest
const WEIGHTS: [(Symbol, i32); 5] = [
    (Symbol::Cherry, 30),
    (Symbol::Lemon, 30),
    (Symbol::Bell, 20),
    (Symbol::Star, 15),
    (Symbol::Seven, 5),
];

/// Relics handed out on big wins
const RELICS: [&str; 5] = [
    "Auric Token",
    "Starlit Die",
    "Chrono Shard",
    "Vault Sigil",
    "Echo Compass",
];

#[derive(Debug, Clone, Copy)]
pub struct SpinResult {
    pub reels: [Symbol; 3],
    pub payout: Chips,
    /// Bonus item granted when the payout reaches four times the wager
    pub relic: Option<&'static str>,
}

fn spin_one(dice: &mut dyn Dice) -> Symbol {
    let roll = dice.roll(1, 100);
    let mut cumulative = 0;
    for (symbol, weight) in WEIGHTS {
        cumulative += weight;
        if roll <= cumulative {
            return symbol;
        }
    }
    Symbol::Seven
}

/// Payout multiple applied to the wager for a spin
///
/// Triple sevens 15x, any other triple 5x, any pair 1.5x (rounded).
fn payout_for(reels: [Symbol; 3], wager: Chips) -> Chips {
    let [a, b, c] = reels;
    if a == b && b == c {
        if a == Symbol::Seven {
            wager * 15
        } else {
            wager * 5
        }
    } else if a == b || b == c || a == c {
        (wager * 3).div_ceil(2)
    } else {
        0
    }
}

/// Stake the wager, spin three weighted reels, credit any payout
pub fn play(
    ledger: &dyn Ledger,
    actor: &ActorId,
    wager: Chips,
    dice: &mut dyn Dice,
) -> Result<SpinResult> {
    require_positive_wager(wager)?;
    ledger.debit(actor, wager)?;

    let reels = [spin_one(dice), spin_one(dice), spin_one(dice)];
    let payout = payout_for(reels, wager);
    if payout > 0 {
        ledger.credit(actor, payout)?;
    }

    let relic = if payout >= wager * 4 {
        let relic = RELICS[dice.pick(RELICS.len())];
        ledger.add_item(actor, relic, 1)?;
        Some(relic)
    } else {
        None
    };

    Ok(SpinResult { reels, payout, relic })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel::dice::{ScriptedDice, SeededDice};
    use crate::ledger::memory::MemoryLedger;

    #[test]
    fn test_triple_seven_jackpot() {
        let ledger = MemoryLedger::new(5000, 100);
        let actor = ActorId::from("1");
        // 96-100 lands on Seven; the last value picks the relic slot
        let mut dice = ScriptedDice::new([100, 100, 100, 2]);

        let result = play(&ledger, &actor, 100, &mut dice).unwrap();

        assert_eq!(result.reels, [Symbol::Seven; 3]);
        assert_eq!(result.payout, 1500);
        assert_eq!(ledger.balance(&actor).unwrap(), 6400);
        // A 15x win also drops a relic into the satchel
        assert_eq!(result.relic, Some("Chrono Shard"));
        assert_eq!(ledger.inventory(&actor).unwrap()[0].item, "Chrono Shard");
    }

    #[test]
    fn test_ordinary_triple_pays_five_times() {
        let ledger = MemoryLedger::new(5000, 100);
        let actor = ActorId::from("1");
        let mut dice = ScriptedDice::new([10, 10, 10]);

        let result = play(&ledger, &actor, 100, &mut dice).unwrap();

        assert_eq!(result.reels, [Symbol::Cherry; 3]);
        assert_eq!(result.payout, 500);
    }

    #[test]
    fn test_pair_pays_one_and_a_half() {
        let ledger = MemoryLedger::new(5000, 100);
        let actor = ActorId::from("1");
        // Cherry, Cherry, Bell
        let mut dice = ScriptedDice::new([10, 10, 70]);

        let result = play(&ledger, &actor, 101, &mut dice).unwrap();

        // 101 * 1.5 rounds up to 152; too small a win for a relic
        assert_eq!(result.payout, 152);
        assert_eq!(result.relic, None);
    }

    #[test]
    fn test_miss_keeps_the_stake() {
        let ledger = MemoryLedger::new(5000, 100);
        let actor = ActorId::from("1");
        // Cherry, Bell, Seven
        let mut dice = ScriptedDice::new([10, 70, 100]);

        let result = play(&ledger, &actor, 100, &mut dice).unwrap();

        assert_eq!(result.payout, 0);
        assert_eq!(ledger.balance(&actor).unwrap(), 4900);
    }

    #[test]
    fn test_weighted_reel_distribution() {
        let mut dice = SeededDice::with_seed(7);
        let sevens = (0..10_000)
            .filter(|_| spin_one(&mut dice) == Symbol::Seven)
            .count();
        // Expected 500 of 10000 at a 5% weight
        assert!((300..=700).contains(&sevens), "sevens = {}", sevens);
    }
}
