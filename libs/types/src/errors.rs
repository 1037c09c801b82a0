//! Error types for the coin matching game
//!
//! Error taxonomy using thiserror. Rejected clicks are not errors: the game
//! reports them as ignored outcomes instead.

use crate::coin::Visibility;
use thiserror::Error;

/// Top-level game error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArcadeError {
    #[error("Coin error: {0}")]
    Coin(#[from] CoinError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Card state errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoinError {
    #[error("Invalid visibility transition for {symbol}: {from} -> {to}")]
    InvalidTransition {
        symbol: String,
        from: Visibility,
        to: Visibility,
    },
}

/// Wallet ledger errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalletError {
    #[error("Coin not found: {symbol}")]
    NotFound { symbol: String },

    #[error("Duplicate coin symbol: {symbol}")]
    DuplicateSymbol { symbol: String },

    #[error("Wallet requires at least one coin")]
    Empty,
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to read config {path}: {reason}")]
    Io { path: String, reason: String },
}
