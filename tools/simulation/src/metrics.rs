//! Aggregated play metrics
//!
//! Tracks sessions, tries, matches, market activity and wallet growth.

use crate::runner::SessionReport;
use game_core::ArcadeEvent;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::numeric::round_display;

/// Aggregated simulation metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimMetrics {
    pub sessions: u64,
    pub completed_sessions: u64,
    pub total_tries: u64,
    pub total_matches: u64,
    pub total_clicks: u64,
    pub ignored_clicks: u64,
    pub mismatches: u64,
    pub price_ticks: u64,
    pub floored_moves: u64,
    pub best_accuracy: Decimal,
    pub final_wallet_value: Decimal,
}

impl SimMetrics {
    /// Create empty metrics.
    pub fn new() -> Self {
        Self {
            sessions: 0,
            completed_sessions: 0,
            total_tries: 0,
            total_matches: 0,
            total_clicks: 0,
            ignored_clicks: 0,
            mismatches: 0,
            price_ticks: 0,
            floored_moves: 0,
            best_accuracy: Decimal::ZERO,
            final_wallet_value: Decimal::ZERO,
        }
    }

    /// Record a single arcade event into metrics.
    pub fn record_event(&mut self, event: &ArcadeEvent) {
        match event {
            ArcadeEvent::Mismatched { .. } => {
                self.mismatches += 1;
            }
            ArcadeEvent::PricesUpdated { moves, .. } => {
                self.price_ticks += 1;
                self.floored_moves += moves.iter().filter(|m| m.floored).count() as u64;
            }
            _ => {}
        }
    }

    /// Fold a finished session into the totals.
    pub fn record_session(&mut self, report: &SessionReport) {
        self.sessions += 1;
        if report.completed {
            self.completed_sessions += 1;
            if report.accuracy > self.best_accuracy {
                self.best_accuracy = report.accuracy;
            }
        }
        self.total_tries += report.tries;
        self.total_matches += report.matches;
        self.total_clicks += report.clicks as u64;
        self.ignored_clicks += report.ignored_clicks as u64;
        self.final_wallet_value = report.wallet_value;
    }

    /// Accuracy over every try of every session, two places.
    pub fn overall_accuracy(&self) -> Decimal {
        if self.total_tries == 0 {
            return round_display(Decimal::ZERO);
        }
        round_display(Decimal::from(self.total_matches * 100) / Decimal::from(self.total_tries))
    }

    /// Build a summary string.
    pub fn summary(&self) -> String {
        format!(
            "Sessions: {} ({} cleared) | Tries: {} | Matches: {} | Accuracy: {}% | Ticks: {} | Wallet: ${}",
            self.sessions,
            self.completed_sessions,
            self.total_tries,
            self.total_matches,
            self.overall_accuracy(),
            self.price_ticks,
            round_display(self.final_wallet_value),
        )
    }
}

impl Default for SimMetrics {
    fn default() -> Self {
        Self::new()
    }
}
