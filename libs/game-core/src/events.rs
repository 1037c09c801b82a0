//! Notifications for the presenter
//!
//! The arcade buffers these in the order they happen; the presenter drains
//! and renders them after each click or clock advance.

use crate::market::PriceMove;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::Symbol;

/// Something the presenter should redraw or announce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArcadeEvent {
    /// A new board was dealt
    SessionStarted { games_played: u64 },
    /// Board state changed; redraw cards
    Updated,
    /// Two cards matched and the wallet was credited
    Matched {
        indices: [usize; 2],
        symbol: Symbol,
        total_value: Decimal,
    },
    /// Two cards did not match; they flip back after the delay
    Mismatched { indices: [usize; 2] },
    /// Every pair on the board has been matched
    SessionComplete {
        games_played: u64,
        tries: u64,
        accuracy: Decimal,
    },
    /// The market ticked
    PricesUpdated {
        moves: Vec<PriceMove>,
        total_value: Decimal,
    },
    MarketStarted { interval_ms: u64 },
    MarketStopped,
}

impl ArcadeEvent {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            ArcadeEvent::SessionStarted { .. } => "session_started",
            ArcadeEvent::Updated => "updated",
            ArcadeEvent::Matched { .. } => "matched",
            ArcadeEvent::Mismatched { .. } => "mismatched",
            ArcadeEvent::SessionComplete { .. } => "session_complete",
            ArcadeEvent::PricesUpdated { .. } => "prices_updated",
            ArcadeEvent::MarketStarted { .. } => "market_started",
            ArcadeEvent::MarketStopped => "market_stopped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = ArcadeEvent::Mismatched { indices: [1, 4] };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"mismatched","indices":[1,4]}"#);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ArcadeEvent::Updated.label(), "updated");
        assert_eq!(ArcadeEvent::MarketStopped.label(), "market_stopped");
    }
}
