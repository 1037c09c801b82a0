//! Autoplay Simulation Framework
//!
//! Plays the coin matching game with scripted players on the arcade's
//! virtual clock, for balancing the market and checking the game end to end
//! with deterministic, seeded behavior.
//!
//! # Modules
//! - `bots`: Perfect-memory and random players
//! - `runner`: Session driver on the virtual clock
//! - `metrics`: Aggregated tries, accuracy, market activity
//! - `export`: Metrics and report JSON export

pub mod bots;
pub mod runner;
pub mod metrics;
pub mod export;

/// Crate version constant
pub const VERSION: &str = "1.0.0";
