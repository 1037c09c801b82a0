//! Plain-text rendering of the board, wallet, prices and events.

use game_core::game::{Game, IgnoreReason, RevealOutcome};
use game_core::market::{PriceQuote, Trend};
use game_core::wallet::{holding_value, Wallet};
use game_core::ArcadeEvent;
use rust_decimal::Decimal;
use std::fmt::Write;
use types::coin::{Coin, Visibility};
use types::numeric::round_display;

const CARDS_PER_ROW: usize = 6;

fn card(index: usize, coin: &Coin) -> String {
    let face = match coin.visibility {
        Visibility::Hidden => "  ??  ".to_string(),
        Visibility::Revealed => format!(" {:<5}", coin.symbol.as_str().to_uppercase()),
        Visibility::Matched => format!("({:^4})", coin.symbol.as_str().to_uppercase()),
    };
    format!("{index:>2}[{face}]")
}

pub fn board(game: &Game) -> String {
    let mut out = String::new();
    for (row, cards) in game.board().chunks(CARDS_PER_ROW).enumerate() {
        let line: Vec<String> = cards
            .iter()
            .enumerate()
            .map(|(i, coin)| card(row * CARDS_PER_ROW + i, coin))
            .collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    let _ = write!(
        out,
        "Game #{}  tries {}  matches {}/{}  accuracy {}%",
        game.games_played(),
        game.tries(),
        game.matches(),
        game.max_matches(),
        game.accuracy()
    );
    out
}

fn money(value: Decimal) -> String {
    format!("${}", round_display(value))
}

pub fn wallet(wallet: &Wallet) -> String {
    let mut out = String::new();
    for coin in wallet.holdings_by_name() {
        let value = holding_value(coin).unwrap_or(Decimal::MAX);
        let _ = writeln!(
            out,
            "{:<10} {:>5} x {:>12} = {:>14}",
            coin.name,
            coin.quantity,
            money(coin.price.as_decimal()),
            money(value)
        );
    }
    let _ = write!(out, "Total value: {}", money(wallet.total_value()));
    out
}

fn arrow(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "^",
        Trend::Down => "v",
        Trend::Flat => "=",
    }
}

pub fn prices(quotes: &[PriceQuote]) -> String {
    quotes
        .iter()
        .map(|q| {
            format!(
                "{:<5} {:<10} {:>12} {}",
                q.symbol.as_str().to_uppercase(),
                q.name,
                money(q.price.as_decimal()),
                arrow(q.trend)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Message for a click that changed nothing.
pub fn ignored(outcome: &RevealOutcome) -> Option<&'static str> {
    match outcome {
        RevealOutcome::Ignored(IgnoreReason::Locked) => Some("Wait for the cards to flip back."),
        RevealOutcome::Ignored(IgnoreReason::OutOfRange) => Some("No card at that position."),
        RevealOutcome::Ignored(IgnoreReason::NotHidden) => Some("That card is already face up."),
        _ => None,
    }
}

/// One-line announcement for an event. `Updated` has none; the caller redraws the board.
pub fn event(event: &ArcadeEvent) -> Option<String> {
    match event {
        ArcadeEvent::SessionStarted { games_played } => {
            Some(format!("New board dealt (game #{games_played})."))
        }
        ArcadeEvent::Updated => None,
        ArcadeEvent::Matched {
            symbol,
            total_value,
            ..
        } => Some(format!(
            "Match! +1 {}. Wallet: {}",
            symbol.as_str().to_uppercase(),
            money(*total_value)
        )),
        ArcadeEvent::Mismatched { indices } => {
            Some(format!("No match ({} / {}).", indices[0], indices[1]))
        }
        ArcadeEvent::SessionComplete {
            games_played,
            tries,
            accuracy,
        } => Some(format!(
            "Board cleared! Game #{games_played} in {tries} tries, accuracy {accuracy}%. Type `new` to play again."
        )),
        ArcadeEvent::PricesUpdated { moves, total_value } => {
            let up = moves.iter().filter(|m| m.trend == Trend::Up).count();
            let down = moves.iter().filter(|m| m.trend == Trend::Down).count();
            Some(format!(
                "Market: {up} up, {down} down. Wallet: {}",
                money(*total_value)
            ))
        }
        ArcadeEvent::MarketStarted { interval_ms } => {
            Some(format!("Market open, prices move every {interval_ms} ms."))
        }
        ArcadeEvent::MarketStopped => Some("Market closed.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::scheduler::{Timer, TimerQueue};
    use types::coin::default_coin_set;

    fn dealt_game() -> (Game, Wallet) {
        let specs = default_coin_set();
        let wallet = Wallet::new(&specs).unwrap();
        let coins: Vec<Coin> = wallet.coins().cloned().collect();
        let mut game = Game::new(1_000, 4);
        let mut timers: TimerQueue<Timer> = TimerQueue::new();
        game.start_session(&coins, &mut timers);
        (game, wallet)
    }

    #[test]
    fn test_board_hides_fresh_cards() {
        let (game, _) = dealt_game();
        let text = board(&game);
        assert_eq!(text.matches("??").count(), 18);
        assert!(text.contains(" 0["));
        assert!(text.contains("17["));
        assert!(text.ends_with("Game #1  tries 0  matches 0/9  accuracy 0.00%"));
    }

    #[test]
    fn test_board_shows_revealed_symbol() {
        let (mut game, mut wallet) = dealt_game();
        let mut timers: TimerQueue<Timer> = TimerQueue::new();
        game.reveal(0, &mut wallet, &mut timers);
        let symbol = game.board()[0].symbol.as_str().to_uppercase();
        let text = board(&game);
        assert!(text.contains(&symbol));
        assert_eq!(text.matches("??").count(), 17);
    }

    #[test]
    fn test_wallet_total_line() {
        let holdings = Wallet::new(&default_coin_set()).unwrap();
        let text = wallet(&holdings);
        assert!(text.ends_with("Total value: $0.00"));
        assert!(text.starts_with("Binance"));
        assert_eq!(text.lines().count(), 10);
    }

    #[test]
    fn test_wallet_with_saturated_holding() {
        let mut holdings = Wallet::new(&default_coin_set()).unwrap();
        let btc = types::ids::Symbol::new("btc");
        holdings.credit(&btc, 2);
        holdings.update_prices(|_| types::numeric::Price::MAX);

        let text = wallet(&holdings);
        assert_eq!(holdings.total_value(), Decimal::MAX);
        assert!(text.ends_with(&format!("Total value: {}", money(Decimal::MAX))));
    }

    #[test]
    fn test_event_messages() {
        assert_eq!(event(&ArcadeEvent::Updated), None);
        assert_eq!(
            event(&ArcadeEvent::Mismatched { indices: [2, 9] }).as_deref(),
            Some("No match (2 / 9).")
        );
        assert_eq!(
            ignored(&RevealOutcome::Ignored(IgnoreReason::Locked)),
            Some("Wait for the cards to flip back.")
        );
        assert_eq!(ignored(&RevealOutcome::Revealed { index: 1 }), None);
    }
}
