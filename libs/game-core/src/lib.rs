//! Game Core: match state machine, market price process and wallet ledger
//!
//! The UI layer is an external collaborator: it feeds clicks and elapsed
//! time into an `Arcade` and renders the events that come back.
//!
//! # Modules
//! - `wallet`: price ledger and holdings, exact decimal totals
//! - `market`: periodic Box–Muller (or delta-table) price walk
//! - `game`: board dealing, reveal/try resolution, accuracy
//! - `scheduler`: virtual-clock queue of cancellable timers
//! - `events`: notifications buffered for the presenter
//! - `config`: arcade configuration with defaults and validation
//! - `arcade`: context object wiring the above together
//!
//! # Determinism
//! Time only moves when the caller advances it and every random draw comes
//! from a seeded `ChaCha8Rng`, so a seed plus a click script replays exactly.

pub mod wallet;
pub mod market;
pub mod game;
pub mod scheduler;
pub mod events;
pub mod config;
pub mod arcade;

pub use arcade::Arcade;
pub use config::ArcadeConfig;
pub use events::ArcadeEvent;
pub use game::{IgnoreReason, RevealOutcome, SessionState};

/// Crate version constant
pub const GAME_CORE_VERSION: &str = "1.0.0";
