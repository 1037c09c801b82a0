//! Arcade configuration
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Prices are decimal strings (`"0.01"`) to stay exact.

use crate::game::DEFAULT_MISMATCH_DELAY_MS;
use crate::market::{MarketConfig, PriceModel, DEFAULT_INTERVAL_MS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use types::coin::{default_coin_set, CoinSpec};
use types::errors::ConfigError;
use types::numeric::Price;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Coin universe, in presentation order
    pub coins: Vec<CoinSpec>,
    pub market_interval_ms: u64,
    pub mismatch_delay_ms: u64,
    pub volatility: f64,
    pub min_price: Price,
    pub price_model: PriceModel,
    /// RNG seed; random when absent
    pub seed: Option<u64>,
    /// Start the market as soon as the arcade is built
    pub autostart_market: bool,
    /// Stop the market when a session completes and restart it on the next deal
    pub halt_market_on_completion: bool,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        let market = MarketConfig::default();
        Self {
            coins: default_coin_set(),
            market_interval_ms: DEFAULT_INTERVAL_MS,
            mismatch_delay_ms: DEFAULT_MISMATCH_DELAY_MS,
            volatility: market.volatility,
            min_price: market.min_price,
            price_model: market.model,
            seed: None,
            autostart_market: true,
            halt_market_on_completion: false,
        }
    }
}

impl ArcadeConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.coins.is_empty() {
            return Err(invalid("coins", "at least one coin is required"));
        }
        let mut seen = BTreeSet::new();
        for coin in &self.coins {
            if !seen.insert(&coin.symbol) {
                return Err(invalid("coins", format!("duplicate symbol {}", coin.symbol)));
            }
        }
        if self.market_interval_ms == 0 {
            return Err(invalid("market_interval_ms", "must be positive"));
        }
        if self.mismatch_delay_ms == 0 {
            return Err(invalid("mismatch_delay_ms", "must be positive"));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(invalid("volatility", "must be finite and non-negative"));
        }
        Ok(())
    }

    pub fn market_config(&self) -> MarketConfig {
        MarketConfig {
            volatility: self.volatility,
            min_price: self.min_price,
            model: self.price_model,
        }
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}
