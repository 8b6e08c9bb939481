use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use poker_table::config::EngineConfig;
use poker_table::domain::Phase;
use poker_table::engine::{Session, TickOutcome};
use poker_table::time_ctrl::ManualClock;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Variant {
    Holdem,
    Stud,
}

/// Симуляция стола из одних ботов на ручных часах.
#[derive(Debug, Parser)]
#[command(name = "poker_table_sim", version)]
struct Args {
    /// Вариант игры (игнорируется, если задан --config).
    #[arg(long, value_enum, default_value_t = Variant::Holdem)]
    variant: Variant,

    /// Сколько ботов посадить.
    #[arg(long, default_value_t = 4)]
    bots: u8,

    /// Сколько раздач сыграть.
    #[arg(long, default_value_t = 10)]
    hands: u64,

    /// Seed для воспроизводимой симуляции.
    #[arg(long, env = "POKER_SIM_SEED")]
    seed: Option<u64>,

    /// JSON-конфиг стола.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => {
            let mut cfg = match args.variant {
                Variant::Holdem => EngineConfig::texas_holdem(),
                Variant::Stud => EngineConfig::five_card_stud(),
            };
            cfg.bots.count = args.bots;
            cfg
        }
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;

    let clock = Arc::new(ManualClock::new());
    let mut session = Session::from_config(1, "SIM TABLE", &config, clock.clone())?;

    println!(
        "poker_table_sim: {} ботов, {} раздач",
        session.table().seated_count(),
        args.hands
    );

    // Бот думает 3 с, пауза после раздачи 12 с: секундного шага хватает.
    let max_ticks = args.hands.saturating_mul(10_000);
    let mut ticks = 0u64;
    let mut was_complete = false;
    while ticks < max_ticks {
        let outcome = session.tick();
        ticks += 1;

        if outcome == TickOutcome::WaitingForPlayers {
            println!("За столом меньше двух игроков, остановка.");
            break;
        }

        let complete = session.table().phase == Phase::HandComplete;
        if complete && !was_complete {
            let table = session.table();
            println!("#{:>4}  {}", table.hands_played, table.last_result);
            if table.hands_played >= args.hands {
                break;
            }
        }
        was_complete = complete;

        clock.advance_secs(1);
    }

    let table = session.table();
    for seat in &table.seats {
        info!(name = %seat.name, purse = seat.purse.0, "final purse");
    }
    println!("Сыграно раздач: {}, тиков: {}", table.hands_played, ticks);
    Ok(())
}
