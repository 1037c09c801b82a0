//! Wallet: price ledger and holdings
//!
//! The wallet is the single source of truth for coin prices and held
//! quantities. Uses `BTreeMap` keyed by symbol for sorted iteration.
//!
//! Invariant: `total_value == Σ price(symbol) × quantity(symbol)`. The total
//! is refolded from scratch after every mutation, never adjusted by deltas.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};
use types::coin::{Coin, CoinSpec};
use types::errors::WalletError;
use types::ids::Symbol;
use types::numeric::Price;

/// Master coin records plus the cached total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    coins: BTreeMap<Symbol, Coin>,
    total_value: Decimal,
}

impl Wallet {
    /// Build a wallet with zero holdings from the coin universe.
    pub fn new(specs: &[CoinSpec]) -> Result<Self, WalletError> {
        if specs.is_empty() {
            return Err(WalletError::Empty);
        }

        let mut coins = BTreeMap::new();
        for spec in specs {
            if coins.contains_key(&spec.symbol) {
                return Err(WalletError::DuplicateSymbol {
                    symbol: spec.symbol.to_string(),
                });
            }
            coins.insert(spec.symbol.clone(), Coin::from_spec(spec));
        }

        let mut wallet = Self {
            coins,
            total_value: Decimal::ZERO,
        };
        wallet.recompute_total();
        Ok(wallet)
    }

    // -- lookups -----------------------------------------------------------

    pub fn quantity_of(&self, symbol: &Symbol) -> Result<u64, WalletError> {
        self.lookup(symbol).map(|c| c.quantity)
    }

    pub fn price_of(&self, symbol: &Symbol) -> Result<Price, WalletError> {
        self.lookup(symbol).map(|c| c.price)
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&Coin> {
        self.coins.get(symbol)
    }

    fn lookup(&self, symbol: &Symbol) -> Result<&Coin, WalletError> {
        self.coins.get(symbol).ok_or_else(|| WalletError::NotFound {
            symbol: symbol.to_string(),
        })
    }

    /// All coins in symbol order.
    pub fn coins(&self) -> impl Iterator<Item = &Coin> {
        self.coins.values()
    }

    /// Holdings ordered by display name, the order the wallet panel lists them.
    pub fn holdings_by_name(&self) -> Vec<&Coin> {
        let mut coins: Vec<&Coin> = self.coins.values().collect();
        coins.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.symbol.cmp(&b.symbol)));
        coins
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    // -- mutators ----------------------------------------------------------

    /// Add `amount` units of `symbol` to the holdings and refold the total.
    ///
    /// # Panics
    /// Panics if `symbol` is not part of the wallet. The coin universe is
    /// fixed at construction, so an unknown symbol is a programming error.
    pub fn credit(&mut self, symbol: &Symbol, amount: u64) {
        let coin = match self.coins.get_mut(symbol) {
            Some(coin) => coin,
            None => panic!("credit to unknown coin {symbol}"),
        };
        coin.quantity = coin.quantity.saturating_add(amount);
        debug!(%symbol, amount, quantity = coin.quantity, "Wallet credited");
        self.recompute_total();
    }

    /// Reprice every coin with `reprice(&coin)` and refold the total once.
    pub fn update_prices<F>(&mut self, mut reprice: F)
    where
        F: FnMut(&Coin) -> Price,
    {
        for coin in self.coins.values_mut() {
            coin.price = reprice(coin);
        }
        self.recompute_total();
    }

    /// Refold `Σ price × quantity` over every holding.
    ///
    /// Saturates at `Decimal::MAX` when the sum leaves the decimal range.
    pub fn recompute_total(&mut self) -> Decimal {
        self.total_value = match checked_total(self.coins.values()) {
            Some(total) => total,
            None => {
                warn!("Wallet total overflowed; saturating");
                Decimal::MAX
            }
        };
        self.total_value
    }

    pub fn total_value(&self) -> Decimal {
        self.total_value
    }
}

/// Value of one holding, None when it leaves the decimal range.
pub fn holding_value(coin: &Coin) -> Option<Decimal> {
    coin.price.as_decimal().checked_mul(Decimal::from(coin.quantity))
}

/// `Σ price × quantity`, None on overflow.
pub fn checked_total<'a>(coins: impl IntoIterator<Item = &'a Coin>) -> Option<Decimal> {
    coins
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, coin| acc.checked_add(holding_value(coin)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::coin::default_coin_set;

    fn sym(s: &str) -> Symbol {
        Symbol::new(s)
    }

    fn test_wallet() -> Wallet {
        Wallet::new(&default_coin_set()).unwrap()
    }

    #[test]
    fn test_new_wallet_is_empty_valued() {
        let wallet = test_wallet();
        assert_eq!(wallet.len(), 9);
        assert_eq!(wallet.total_value(), Decimal::ZERO);
        assert_eq!(wallet.quantity_of(&sym("btc")).unwrap(), 0);
    }

    #[test]
    fn test_rejects_empty_and_duplicates() {
        assert_eq!(Wallet::new(&[]).unwrap_err(), WalletError::Empty);

        let mut specs = default_coin_set();
        specs.push(specs[0].clone());
        assert!(matches!(
            Wallet::new(&specs).unwrap_err(),
            WalletError::DuplicateSymbol { .. }
        ));
    }

    #[test]
    fn test_unknown_symbol_lookup() {
        let wallet = test_wallet();
        let err = wallet.price_of(&sym("doge")).unwrap_err();
        assert_eq!(
            err,
            WalletError::NotFound {
                symbol: "doge".to_string()
            }
        );
        assert!(wallet.quantity_of(&sym("doge")).is_err());
    }

    #[test]
    fn test_credit_updates_total() {
        let mut wallet = test_wallet();
        wallet.credit(&sym("eth"), 1);
        wallet.credit(&sym("eth"), 1);
        wallet.credit(&sym("dash"), 3);

        assert_eq!(wallet.quantity_of(&sym("eth")).unwrap(), 2);
        // 2 × 111.44 + 3 × 86.43
        assert_eq!(
            wallet.total_value(),
            Decimal::from_str_exact("482.17").unwrap()
        );
    }

    #[test]
    fn test_credit_zero_is_allowed() {
        let mut wallet = test_wallet();
        wallet.credit(&sym("ada"), 0);
        assert_eq!(wallet.quantity_of(&sym("ada")).unwrap(), 0);
    }

    #[test]
    #[should_panic(expected = "credit to unknown coin doge")]
    fn test_credit_unknown_panics() {
        let mut wallet = test_wallet();
        wallet.credit(&sym("doge"), 1);
    }

    #[test]
    fn test_update_prices_refolds_total() {
        let mut wallet = test_wallet();
        wallet.credit(&sym("btc"), 2);

        let doubled = |coin: &Coin| Price::new(coin.price.as_decimal() * Decimal::from(2));
        wallet.update_prices(doubled);

        assert_eq!(
            wallet.price_of(&sym("btc")).unwrap(),
            Price::from_str_exact("7954.20").unwrap()
        );
        assert_eq!(
            wallet.total_value(),
            Decimal::from_str_exact("15908.40").unwrap()
        );
    }

    #[test]
    fn test_total_saturates_on_overflow() {
        let mut wallet = test_wallet();
        wallet.credit(&sym("btc"), 2);
        wallet.credit(&sym("eth"), 1);

        wallet.update_prices(|_| Price::MAX);

        assert_eq!(wallet.total_value(), Decimal::MAX);
        assert_eq!(checked_total(wallet.coins()), None);
        assert_eq!(
            holding_value(wallet.get(&sym("eth")).unwrap()),
            Some(Decimal::MAX)
        );
    }

    #[test]
    fn test_holdings_by_name() {
        let wallet = test_wallet();
        let names: Vec<&str> = wallet
            .holdings_by_name()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names.first(), Some(&"Binance"));
        assert_eq!(names.last(), Some(&"Stellar"));
    }
}
