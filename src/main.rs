//! Vault Arena - Demo Entry Point
//!
//! Stands in for the chat-platform layer: a terminal prompt that opens duels
//! against a policy-controlled opponent, forwards your actions into the
//! arena, and renders the snapshot stream the way a bot would render embeds.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;
use tokio::runtime::Runtime;

use vault_arena::core::config::ArenaConfig;
use vault_arena::core::error::{ArenaError, Result};
use vault_arena::core::types::ActorId;
use vault_arena::duel::{
    Action, DuelArena, DuelEvent, EmptyDirectory, MatchSnapshot, SeededDice,
};
use vault_arena::economy::{self, DailyOutcome};
use vault_arena::games::{coinflip, slots};
use vault_arena::ledger::memory::MemoryLedger;
use vault_arena::ledger::Ledger;

#[derive(Parser, Debug)]
#[command(name = "vault-arena", about = "Wagered duel engine demo")]
struct Args {
    /// Display name for the local player
    #[arg(long, default_value = "Traveler")]
    name: String,

    /// RNG seed for damage, healing, and policy rolls
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// TOML config overriding the default tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ledger save file, restored on start and written on quit
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("vault_arena=info")
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ArenaConfig::load(path).map_err(ArenaError::ConfigError)?,
        None => ArenaConfig::default(),
    };

    // Timers and policy moves need a live runtime; the prompt itself stays
    // on the main thread
    let rt = Runtime::new()?;
    let _guard = rt.enter();

    let ledger: Arc<MemoryLedger> = match &args.save {
        Some(path) if path.exists() => {
            let json = std::fs::read_to_string(path)?;
            let restored = MemoryLedger::from_json(&json, config.starting_cash, config.xp_per_level)?;
            tracing::info!("ledger restored from {}", path.display());
            Arc::new(restored)
        }
        _ => Arc::new(MemoryLedger::new(config.starting_cash, config.xp_per_level)),
    };
    let arena = DuelArena::new(
        config.clone(),
        ledger.clone(),
        Arc::new(EmptyDirectory),
        Box::new(SeededDice::with_seed(args.seed)),
    );
    // House games roll from their own stream so duel replays stay stable
    let mut table_dice = SeededDice::with_seed(args.seed.wrapping_add(1));

    let player = ActorId::from("local-player");
    tracing::info!("arena ready for {}", args.name);

    println!("\n=== VAULT ARENA ===");
    println!("Commands:");
    println!("  duel <opponent> [wager]     - Open a duel (unknown names fight as scripted NPCs)");
    println!("  balance / b                 - Show chips, XP, and level");
    println!("  daily                       - Claim the daily stipend");
    println!("  flip <amount> <heads|tails> - Coinflip");
    println!("  slots <amount>              - Spin the reels");
    println!("  inventory / inv             - List relics won");
    println!("  top                         - Leaderboard");
    println!("  history                     - Recent duels");
    println!("  quit / q                    - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default();
        match command {
            "duel" => {
                let Some(opponent) = parts.next() else {
                    println!("Usage: duel <opponent> [wager]");
                    continue;
                };
                let wager = parts.next().and_then(|w| w.parse().ok()).unwrap_or(0);
                run_duel(&arena, &config, &player, &args.name, opponent, wager);
            }
            "balance" | "b" => {
                let balance = ledger.balance(&player)?;
                let progress = economy::progress(&*ledger, &player)?;
                println!(
                    "{}: {} chips, {} XP (level {})",
                    args.name, balance, progress.xp, progress.level
                );
            }
            "daily" => match economy::claim_daily(&*ledger, &player, &config, now_ms())? {
                DailyOutcome::Granted { amount, balance } => {
                    println!("Claimed {} chips. New balance: {}", amount, balance);
                }
                DailyOutcome::Cooldown { remaining_ms, .. } => {
                    println!(
                        "Daily already claimed. Return in ~{} min.",
                        remaining_ms / 60_000 + 1
                    );
                }
            },
            "flip" => {
                let amount = parts.next().and_then(|w| w.parse().ok()).unwrap_or(0);
                let pick = match parts.next() {
                    Some("heads") => coinflip::CoinSide::Heads,
                    Some("tails") => coinflip::CoinSide::Tails,
                    _ => {
                        println!("Usage: flip <amount> <heads|tails>");
                        continue;
                    }
                };
                match coinflip::play(&*ledger, &player, amount, pick, &mut table_dice) {
                    Ok(result) => println!(
                        "The coin lands {:?} - you {}.",
                        result.landed,
                        if result.won { "WIN" } else { "lose" }
                    ),
                    Err(e) => println!("{}", e),
                }
            }
            "slots" => {
                let amount = parts.next().and_then(|w| w.parse().ok()).unwrap_or(0);
                match slots::play(&*ledger, &player, amount, &mut table_dice) {
                    Ok(result) => {
                        let reels: Vec<&str> =
                            result.reels.iter().map(|s| s.glyph()).collect();
                        if result.payout > 0 {
                            println!("{} - WIN {} chips!", reels.join(" | "), result.payout);
                        } else {
                            println!("{} - the house wins.", reels.join(" | "));
                        }
                        if let Some(relic) = result.relic {
                            println!("Relic bonus: {}", relic);
                        }
                    }
                    Err(e) => println!("{}", e),
                }
            }
            "inventory" | "inv" => {
                let stacks = ledger.inventory(&player)?;
                if stacks.is_empty() {
                    println!("Empty pockets.");
                }
                for stack in stacks {
                    println!("  {} x{}", stack.item, stack.quantity);
                }
            }
            "top" => {
                for (index, (actor, balance)) in
                    economy::leaderboard(&*ledger, 10)?.iter().enumerate()
                {
                    println!("{}. {} - {} chips", index + 1, actor, balance);
                }
            }
            "history" => {
                for record in ledger.duel_history(10)? {
                    println!(
                        "{} vs {} - {} won (wager {})",
                        record.challenger_name,
                        record.opponent_name,
                        record.winner_name,
                        record.wager
                    );
                }
            }
            _ => println!(
                "Unknown command. Try: duel, balance, daily, flip, slots, top, history, quit"
            ),
        }
    }

    if let Some(path) = &args.save {
        std::fs::write(path, ledger.to_json()?)?;
        tracing::info!("ledger saved to {}", path.display());
    }
    println!("Goodbye!");
    Ok(())
}

/// Drive one duel to its terminal state from the prompt
fn run_duel(
    arena: &DuelArena,
    config: &ArenaConfig,
    player: &ActorId,
    player_name: &str,
    opponent: &str,
    wager: u64,
) {
    let handle = match arena.create_match(player, player_name, opponent, wager) {
        Ok(handle) => handle,
        Err(e) => {
            println!("Could not open the duel: {}", e);
            return;
        }
    };
    let match_id = handle.id;

    // Render the snapshot stream the way the bot edits its embed
    let mut events = handle.events;
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            render_event(&event);
        }
    });

    let policy_wait = config.policy_move_delay() + Duration::from_millis(300);
    loop {
        if arena.snapshot(match_id).is_none() {
            // Settled: give the terminal event a beat to print
            std::thread::sleep(Duration::from_millis(100));
            return;
        }

        print!("[strike/guard/recover] > ");
        if io::stdout().flush().is_err() {
            return;
        }
        let mut input = String::new();
        if io::stdin().read_line(&mut input).unwrap_or(0) == 0 {
            return;
        }
        let action = match input.trim() {
            "strike" | "s" => Action::Strike,
            "guard" | "g" => Action::Guard,
            "recover" | "r" => Action::Recover,
            "" => continue,
            other => {
                println!("No such move: {}", other);
                continue;
            }
        };

        match arena.submit_action(match_id, player, action) {
            Ok(outcome) => {
                if outcome.outcome.is_none() {
                    // Let the scripted opponent answer before prompting again
                    std::thread::sleep(policy_wait);
                }
            }
            Err(e) => println!("{}", e),
        }
    }
}

fn render_event(event: &DuelEvent) {
    match event {
        DuelEvent::Opened { snapshot } => {
            println!(
                "\nDuel open: {} vs {} (wager {})",
                snapshot.challenger.display_name, snapshot.opponent.display_name, snapshot.wager
            );
            render_snapshot(snapshot);
        }
        DuelEvent::TurnResolved { snapshot, log } => {
            println!("\n{}", log);
            render_snapshot(snapshot);
        }
        DuelEvent::Concluded { description, .. } => {
            println!("\n{}", description);
        }
    }
}

fn render_snapshot(snapshot: &MatchSnapshot) {
    for participant in [&snapshot.challenger, &snapshot.opponent] {
        println!(
            "  {:<16} {:>3}/100 {}{}",
            participant.display_name,
            participant.hit_points,
            hp_bar(participant.hit_points),
            if participant.guarding { "  [guarded]" } else { "" }
        );
    }
    if snapshot.outcome.is_none() {
        println!("  Turn: {}", snapshot.turn_owner_name());
    }
}

fn hp_bar(hp: i32) -> String {
    let total: usize = 10;
    let filled = ((hp.clamp(0, 100) as usize) * total / 100).min(total);
    format!("{}{}", "#".repeat(filled), ".".repeat(total - filled))
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
