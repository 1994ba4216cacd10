//! Arena configuration with documented constants
//!
//! All tuning numbers are collected here with explanations of their purpose
//! and how they interact with each other. Each `DuelArena` owns its config so
//! tests can construct isolated arenas with their own pacing.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::types::{Chips, Xp};

/// Configuration for the duel arena and economy
///
/// These values reproduce the live bot's pacing and payouts. Changing them
/// shifts duel length and the economy's inflation rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    // === COMBAT ROLLS ===
    /// Minimum strike damage rolled for a human-controlled participant
    ///
    /// The human range [14,24] is intentionally more generous than the
    /// policy range, so a live player at even HP is favored.
    pub human_strike_min: i32,
    /// Maximum strike damage rolled for a human-controlled participant
    pub human_strike_max: i32,

    /// Minimum strike damage rolled for a policy-controlled participant
    pub policy_strike_min: i32,
    /// Maximum strike damage rolled for a policy-controlled participant
    pub policy_strike_max: i32,

    /// Recovery roll range for a human-controlled participant
    pub human_recover_min: i32,
    pub human_recover_max: i32,

    /// Recovery roll range for a policy-controlled participant
    pub policy_recover_min: i32,
    pub policy_recover_max: i32,

    // === PACING ===
    /// Total action-collection window for one match, in seconds
    ///
    /// This is the lifetime of the whole collector, not a per-turn clock.
    /// When it elapses with the match still active, the arena forces the
    /// higher-HP tie-break and settles.
    pub match_deadline_secs: u64,

    /// Delay before a scheduled policy move fires, in milliseconds
    ///
    /// Keeps the scripted opponent from answering instantly; at 1200 ms the
    /// exchange reads like a turn, not an echo.
    pub policy_move_delay_ms: u64,

    // === SETTLEMENT ===
    /// XP granted to the winner of a concluded duel
    pub winner_xp: Xp,
    /// XP granted to the loser of a concluded duel
    pub loser_xp: Xp,

    // === ECONOMY ===
    /// Balance a wallet opens with on first touch
    pub starting_cash: Chips,
    /// Amount granted by a daily claim
    pub daily_amount: Chips,
    /// Cooldown between daily claims, in seconds
    pub daily_cooldown_secs: u64,
    /// XP required per level; level = xp / xp_per_level + 1
    pub xp_per_level: Xp,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            // Combat rolls (human ranges deliberately wider at the top)
            human_strike_min: 14,
            human_strike_max: 24,
            policy_strike_min: 12,
            policy_strike_max: 20,
            human_recover_min: 8,
            human_recover_max: 16,
            policy_recover_min: 6,
            policy_recover_max: 14,

            // Pacing
            match_deadline_secs: 60,
            policy_move_delay_ms: 1200,

            // Settlement
            winner_xp: 60,
            loser_xp: 25,

            // Economy
            starting_cash: 5000,
            daily_amount: 1000,
            daily_cooldown_secs: 24 * 60 * 60,
            xp_per_level: 100,
        }
    }
}

impl ArenaConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let config: ArenaConfig =
            toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        // Roll ranges must be ordered and positive
        for (label, min, max) in [
            ("human_strike", self.human_strike_min, self.human_strike_max),
            ("policy_strike", self.policy_strike_min, self.policy_strike_max),
            ("human_recover", self.human_recover_min, self.human_recover_max),
            ("policy_recover", self.policy_recover_min, self.policy_recover_max),
        ] {
            if min <= 0 || max < min {
                return Err(format!("{} range [{}, {}] is not a positive ordered range", label, min, max));
            }
        }

        if self.match_deadline_secs == 0 {
            return Err("match_deadline_secs must be positive".into());
        }

        // A policy move that fires after the deadline would never act
        if self.policy_move_delay_ms >= self.match_deadline_secs * 1000 {
            return Err(format!(
                "policy_move_delay_ms ({}) must be shorter than the match deadline ({} s)",
                self.policy_move_delay_ms, self.match_deadline_secs
            ));
        }

        if self.xp_per_level == 0 {
            return Err("xp_per_level must be positive".into());
        }

        Ok(())
    }

    /// Action-collection deadline for one match
    pub fn match_deadline(&self) -> Duration {
        Duration::from_secs(self.match_deadline_secs)
    }

    /// Delay before a scheduled policy move fires
    pub fn policy_move_delay(&self) -> Duration {
        Duration::from_millis(self.policy_move_delay_ms)
    }

    /// Cooldown between daily claims
    pub fn daily_cooldown(&self) -> Duration {
        Duration::from_secs(self.daily_cooldown_secs)
    }
}
