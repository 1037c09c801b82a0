//! Session runner
//!
//! Plays whole sessions against an `Arcade` on its virtual clock: one click
//! per think interval, and when the board is locked the clock jumps straight
//! to the next timer so mismatches resolve without busy-waiting.

use crate::bots::Player;
use crate::metrics::SimMetrics;
use game_core::{Arcade, ArcadeEvent, SessionState};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Configuration for the session runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Virtual time between clicks
    pub think_time_ms: u64,
    /// Give up on a session after this many clicks
    pub max_clicks: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            think_time_ms: 750,
            max_clicks: 10_000,
        }
    }
}

/// Outcome of one played session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub player: String,
    pub games_played: u64,
    pub completed: bool,
    pub tries: u64,
    pub matches: u64,
    pub misses: u64,
    pub accuracy: Decimal,
    pub clicks: usize,
    pub ignored_clicks: usize,
    pub elapsed_ms: u64,
    pub price_ticks: u64,
    pub wallet_value: Decimal,
}

/// Deal a new board and let `player` clear it.
pub fn run_session<P: Player>(
    arcade: &mut Arcade,
    player: &mut P,
    config: &RunnerConfig,
    metrics: &mut SimMetrics,
) -> SessionReport {
    arcade.start_session();
    player.reset();
    let started_at = arcade.now_ms();
    let mut clicks = 0;
    let mut ignored_clicks = 0;
    let mut price_ticks = 0;

    while arcade.game().session_state() != SessionState::Complete && clicks < config.max_clicks {
        if arcade.game().is_locked() {
            let wait = arcade.next_timer_in().unwrap_or(1).max(1);
            arcade.advance(wait);
        } else {
            let index = match player.choose(arcade.game().board()) {
                Some(index) => index,
                None => break,
            };
            clicks += 1;
            if arcade.reveal(index).is_ignored() {
                ignored_clicks += 1;
            }
            player.observe(arcade.game().board());
            arcade.advance(config.think_time_ms);
        }

        for event in arcade.drain_events() {
            if matches!(event, ArcadeEvent::PricesUpdated { .. }) {
                price_ticks += 1;
            }
            metrics.record_event(&event);
        }
    }

    let game = arcade.game();
    let report = SessionReport {
        player: player.name().to_string(),
        games_played: game.games_played(),
        completed: game.session_state() == SessionState::Complete,
        tries: game.tries(),
        matches: game.matches(),
        misses: game.misses(),
        accuracy: game.accuracy(),
        clicks,
        ignored_clicks,
        elapsed_ms: arcade.now_ms() - started_at,
        price_ticks,
        wallet_value: arcade.total_value(),
    };

    if report.completed {
        info!(
            player = %report.player,
            tries = report.tries,
            accuracy = %report.accuracy,
            elapsed_ms = report.elapsed_ms,
            "Session cleared"
        );
    } else {
        debug!(player = %report.player, clicks, "Session abandoned");
    }
    metrics.record_session(&report);
    report
}

/// Play `sessions` back-to-back sessions on the same arcade.
pub fn run_sessions<P: Player>(
    arcade: &mut Arcade,
    player: &mut P,
    config: &RunnerConfig,
    sessions: usize,
) -> (Vec<SessionReport>, SimMetrics) {
    let mut metrics = SimMetrics::new();
    let reports = (0..sessions)
        .map(|_| run_session(arcade, player, config, &mut metrics))
        .collect();
    (reports, metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bots::perfect_memory::PerfectMemoryPlayer;
    use crate::bots::random_clicker::RandomClicker;
    use game_core::ArcadeConfig;

    fn arcade(seed: u64) -> Arcade {
        Arcade::new(ArcadeConfig {
            seed: Some(seed),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_perfect_memory_clears_board() {
        let mut arcade = arcade(1);
        let mut player = PerfectMemoryPlayer::new();
        let mut metrics = SimMetrics::new();

        let report = run_session(&mut arcade, &mut player, &RunnerConfig::default(), &mut metrics);

        assert!(report.completed);
        assert_eq!(report.matches, 9);
        assert_eq!(report.ignored_clicks, 0);
        // Each card is turned at most twice by a perfect memory player
        assert!(report.tries <= 18);
        assert_eq!(report.wallet_value, arcade.total_value());
        assert_eq!(metrics.sessions, 1);
    }

    #[test]
    fn test_random_clicker_clears_board() {
        let mut arcade = arcade(2);
        let mut player = RandomClicker::new(5);
        let mut metrics = SimMetrics::new();

        let report = run_session(&mut arcade, &mut player, &RunnerConfig::default(), &mut metrics);

        assert!(report.completed);
        assert!(report.tries >= 9);
        assert_eq!(report.misses, report.tries - 9);
    }

    #[test]
    fn test_click_budget_abandons_session() {
        let mut arcade = arcade(3);
        let mut player = RandomClicker::new(5);
        let mut metrics = SimMetrics::new();
        let config = RunnerConfig {
            max_clicks: 3,
            ..Default::default()
        };

        let report = run_session(&mut arcade, &mut player, &config, &mut metrics);
        assert!(!report.completed);
        assert_eq!(report.clicks, 3);
        assert_eq!(metrics.completed_sessions, 0);
    }

    #[test]
    fn test_market_ticks_during_long_session() {
        let mut arcade = arcade(4);
        let mut player = RandomClicker::new(9);
        let config = RunnerConfig {
            think_time_ms: 2_000,
            ..Default::default()
        };
        let (reports, metrics) = run_sessions(&mut arcade, &mut player, &config, 2);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].games_played, 2);
        assert!(reports.iter().all(|r| r.price_ticks > 0));
        assert_eq!(
            metrics.price_ticks,
            reports.iter().map(|r| r.price_ticks).sum::<u64>()
        );
    }
}
