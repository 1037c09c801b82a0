//! Coin value types
//!
//! A `Coin` is both the wallet's master record for a tradable asset and,
//! cloned, a card instance on the board. Only board copies ever leave
//! `Visibility::Hidden`.

use crate::errors::CoinError;
use crate::ids::Symbol;
use crate::numeric::Price;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Face state of a card.
///
/// Legal transitions: Hidden → Revealed → Matched, and Revealed → Hidden on
/// a mismatch. Matched is terminal for the board it lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Hidden,
    Revealed,
    Matched,
}

impl Visibility {
    /// Check if a transition to `to` is permitted
    pub fn can_transition_to(&self, to: Visibility) -> bool {
        matches!(
            (self, to),
            (Visibility::Hidden, Visibility::Revealed)
                | (Visibility::Revealed, Visibility::Matched)
                | (Visibility::Revealed, Visibility::Hidden)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Visibility::Matched)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Visibility::Hidden => "hidden",
            Visibility::Revealed => "revealed",
            Visibility::Matched => "matched",
        };
        f.write_str(label)
    }
}

/// Static description of a coin, supplied by the presenter at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinSpec {
    pub name: String,
    pub symbol: Symbol,
    /// Opaque handle the presenter uses to draw the coin face
    pub image_ref: String,
    pub initial_price: Price,
}

impl CoinSpec {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<Symbol>,
        image_ref: impl Into<String>,
        initial_price: Price,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            image_ref: image_ref.into(),
            initial_price,
        }
    }
}

/// A coin with live price, held quantity and face state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub name: String,
    pub symbol: Symbol,
    pub image_ref: String,
    pub price: Price,
    pub quantity: u64,
    pub visibility: Visibility,
}

impl Coin {
    /// Create a hidden, unheld coin from its spec
    pub fn from_spec(spec: &CoinSpec) -> Self {
        Self {
            name: spec.name.clone(),
            symbol: spec.symbol.clone(),
            image_ref: spec.image_ref.clone(),
            price: spec.initial_price,
            quantity: 0,
            visibility: Visibility::Hidden,
        }
    }

    /// Snapshot used as a board card: price and identity are copied, the
    /// holding is not.
    pub fn card_copy(&self) -> Self {
        Self {
            quantity: 0,
            visibility: Visibility::Hidden,
            ..self.clone()
        }
    }

    /// Move to a new face state, rejecting illegal transitions
    pub fn transition(&mut self, to: Visibility) -> Result<(), CoinError> {
        if !self.visibility.can_transition_to(to) {
            return Err(CoinError::InvalidTransition {
                symbol: self.symbol.to_string(),
                from: self.visibility,
                to,
            });
        }
        self.visibility = to;
        Ok(())
    }

    pub fn is_hidden(&self) -> bool {
        self.visibility == Visibility::Hidden
    }

    pub fn is_revealed(&self) -> bool {
        self.visibility == Visibility::Revealed
    }

    pub fn is_matched(&self) -> bool {
        self.visibility == Visibility::Matched
    }
}

/// The nine-coin universe the game ships with.
pub fn default_coin_set() -> Vec<CoinSpec> {
    let table: [(&str, &str, &str); 9] = [
        ("Cardano", "ada", "0.03"),
        ("Binance", "bnb", "5.72"),
        ("BitCoin", "btc", "3977.10"),
        ("Dash", "dash", "86.43"),
        ("Ethereum", "eth", "111.44"),
        ("LiteCoin", "ltc", "31.67"),
        ("Stellar", "xlm", "0.15"),
        ("Ripple", "xrp", "0.35"),
        ("Monero", "xmr", "57.25"),
    ];

    table
        .iter()
        .filter_map(|(name, symbol, price)| {
            Price::from_str_exact(price)
                .map(|p| CoinSpec::new(*name, *symbol, format!("images/{symbol}.png"), p))
        })
        .collect()
}
