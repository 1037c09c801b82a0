mod commands;
mod render;

use anyhow::Context;
use clap::Parser;
use commands::{Command, CommandError, HELP};
use game_core::{Arcade, ArcadeConfig, ArcadeEvent};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing_subscriber::EnvFilter;

/// How often the virtual clock catches up with wall time.
const CLOCK_RESOLUTION_MS: u64 = 50;

#[derive(Debug, Parser)]
#[command(name = "arcade", version, about = "Coin matching game with a live price feed")]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the board shuffle and price feed
    #[arg(long)]
    seed: Option<u64>,
}

fn load_config(args: &Args) -> anyhow::Result<ArcadeConfig> {
    let mut config = match &args.config {
        Some(path) => ArcadeConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ArcadeConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn print_events(arcade: &mut Arcade) {
    let mut redraw = false;
    for event in arcade.drain_events() {
        tracing::debug!(event = event.label(), "Arcade event");
        if matches!(event, ArcadeEvent::Updated) {
            redraw = true;
        }
        if let Some(line) = render::event(&event) {
            println!("{line}");
        }
    }
    if redraw {
        println!("{}", render::board(arcade.game()));
    }
}

/// Apply one command. Returns false when the player quits.
fn handle(arcade: &mut Arcade, command: Command) -> bool {
    match command {
        Command::Flip(index) => {
            let outcome = arcade.reveal(index);
            if let Some(message) = render::ignored(&outcome) {
                println!("{message}");
            }
        }
        Command::NewGame => arcade.start_session(),
        Command::Prices => println!("{}", render::prices(&arcade.price_snapshot())),
        Command::Wallet => println!("{}", render::wallet(arcade.wallet())),
        Command::MarketStart => {
            if !arcade.start_market() {
                println!("Market is already open.");
            }
        }
        Command::MarketStop => {
            if !arcade.stop_market() {
                println!("Market is already closed.");
            }
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => return false,
    }
    true
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Logs go to stderr so they do not interleave with the board
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut arcade = Arcade::new(config).context("starting arcade")?;

    tracing::info!(seed = ?arcade.config().seed, "Starting arcade");
    println!("{HELP}\n");
    arcade.start_session();
    print_events(&mut arcade);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut clock = tokio::time::interval(Duration::from_millis(CLOCK_RESOLUTION_MS));
    let started = Instant::now();

    loop {
        tokio::select! {
            _ = clock.tick() => {
                let wall_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                let behind = wall_ms.saturating_sub(arcade.now_ms());
                if behind > 0 {
                    arcade.advance(behind);
                    print_events(&mut arcade);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match Command::parse(&line) {
                    Ok(Some(command)) => {
                        if !handle(&mut arcade, command) {
                            break;
                        }
                        print_events(&mut arcade);
                    }
                    Ok(None) => {}
                    Err(err @ CommandError::Unknown(_)) => println!("{err}. Type `help` for commands."),
                    Err(err) => println!("{err}"),
                }
            }
        }
    }

    tracing::info!(
        games_played = arcade.game().games_played(),
        total_value = %arcade.total_value(),
        "Leaving arcade"
    );
    println!("{}", render::wallet(arcade.wallet()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Arcade {
        Arcade::new(ArcadeConfig {
            seed: Some(17),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_quit_stops_loop() {
        let mut arcade = seeded();
        assert!(!handle(&mut arcade, Command::Quit));
        assert!(handle(&mut arcade, Command::Prices));
    }

    #[test]
    fn test_market_commands_toggle() {
        let mut arcade = seeded();
        assert!(arcade.market().is_running());
        handle(&mut arcade, Command::MarketStop);
        assert!(!arcade.market().is_running());
        handle(&mut arcade, Command::MarketStart);
        assert!(arcade.market().is_running());
    }

    #[test]
    fn test_seed_flag_overrides_config() {
        let args = Args::parse_from(["arcade", "--seed", "42"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.seed, Some(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_drives_market() {
        let mut arcade = seeded();
        arcade.start_session();
        arcade.drain_events();

        let started = Instant::now();
        tokio::time::advance(Duration::from_millis(5_000)).await;
        let wall_ms = started.elapsed().as_millis() as u64;
        arcade.advance(wall_ms.saturating_sub(arcade.now_ms()));

        let ticks = arcade
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, ArcadeEvent::PricesUpdated { .. }))
            .count();
        assert_eq!(ticks, 1);
    }
}
