//! Market: periodic price process over the wallet's live coin records
//!
//! Each tick perturbs every price multiplicatively:
//!
//! ```text
//! z         = sqrt(-2 ln u1) · cos(2π u2)      (Box–Muller, u1 ∈ (0,1))
//! new_price = max(min_price, old_price · (1 + z · volatility))
//! ```
//!
//! The delta-table model draws the percentage move from a fixed empirical
//! table instead. Both run on a seeded `ChaCha8Rng`.

use crate::scheduler::{TaskHandle, Timer, TimerQueue};
use crate::wallet::Wallet;
use rand::distributions::Open01;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::PI;
use tracing::{debug, info, warn};
use types::coin::Coin;
use types::ids::Symbol;
use types::numeric::Price;

/// Default tick period.
pub const DEFAULT_INTERVAL_MS: u64 = 5_000;

/// Empirical per-tick percentage moves used by `PriceModel::DeltaTable`.
pub const EMPIRICAL_DELTAS: [f64; 41] = [
    0.0911, 0.0800, 0.0614, 0.0520, 0.0500, 0.0468, 0.0461, 0.0411, 0.0379, 0.0333, 0.0310,
    0.0290, 0.0250, 0.0212, 0.0199, 0.0111, 0.0102, 0.0100, 0.0078, 0.0033, 0.0000, -0.0020,
    -0.0078, -0.0102, -0.0107, -0.0111, -0.0129, -0.0190, -0.0210, -0.0221, -0.0236, -0.0287,
    -0.0341, -0.0356, -0.0391, -0.0420, -0.0578, -0.0611, -0.0711, -0.0829, -0.0899,
];

/// How a tick draws each coin's move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceModel {
    /// Gaussian multiplicative walk scaled by `volatility`
    #[default]
    Gaussian,
    /// Uniform draw from `EMPIRICAL_DELTAS`; `volatility` is ignored
    DeltaTable,
}

/// Direction of the last price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Flat,
}

impl Trend {
    pub fn between(old: Price, new: Price) -> Self {
        match new.cmp(&old) {
            std::cmp::Ordering::Greater => Trend::Up,
            std::cmp::Ordering::Less => Trend::Down,
            std::cmp::Ordering::Equal => Trend::Flat,
        }
    }
}

/// One coin's repricing during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceMove {
    pub symbol: Symbol,
    pub old_price: Price,
    pub new_price: Price,
    pub trend: Trend,
    /// True when the move was clamped to the price floor
    pub floored: bool,
}

/// Read-only price view for the presenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub symbol: Symbol,
    pub name: String,
    pub price: Price,
    pub trend: Trend,
}

/// Market process parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Standard deviation of the per-tick relative move
    pub volatility: f64,
    /// No price ever drops below this floor
    pub min_price: Price,
    pub model: PriceModel,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            volatility: 0.03,
            min_price: Price::new(Decimal::new(1, 2)),
            model: PriceModel::Gaussian,
        }
    }
}

/// Periodic price updater.
///
/// Holds at most one live tick timer: `start` while running is a no-op, so
/// overlapping intervals can never be scheduled.
#[derive(Debug, Clone)]
pub struct Market {
    config: MarketConfig,
    rng: ChaCha8Rng,
    timer: Option<TaskHandle>,
    interval_ms: u64,
    ticks: u64,
    trends: BTreeMap<Symbol, Trend>,
}

impl Market {
    /// Create a stopped market with a deterministic seed.
    pub fn new(config: MarketConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            timer: None,
            interval_ms: DEFAULT_INTERVAL_MS,
            ticks: 0,
            trends: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Ticks run since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // -- lifecycle ---------------------------------------------------------

    /// Begin ticking every `interval_ms`. Returns false if already running.
    pub fn start(&mut self, timers: &mut TimerQueue<Timer>, interval_ms: u64) -> bool {
        if self.timer.is_some() {
            debug!(interval_ms = self.interval_ms, "Market already running");
            return false;
        }
        let interval_ms = interval_ms.max(1);
        self.interval_ms = interval_ms;
        self.timer = Some(timers.schedule(interval_ms, Timer::MarketTick));
        info!(interval_ms, "Market started");
        true
    }

    /// Cancel the tick timer. Returns false if the market was not running.
    pub fn stop(&mut self, timers: &mut TimerQueue<Timer>) -> bool {
        match self.timer.take() {
            Some(handle) => {
                timers.cancel(handle);
                info!(ticks = self.ticks, "Market stopped");
                true
            }
            None => false,
        }
    }

    /// Handle a fired `Timer::MarketTick`: tick and schedule the next one.
    ///
    /// Returns None for a handle that is not the live timer.
    pub fn on_timer(
        &mut self,
        handle: TaskHandle,
        timers: &mut TimerQueue<Timer>,
        wallet: &mut Wallet,
    ) -> Option<Vec<PriceMove>> {
        if self.timer != Some(handle) {
            warn!(handle = handle.id(), "Ignoring stale market timer");
            return None;
        }
        let moves = self.tick(wallet);
        self.timer = Some(timers.schedule(self.interval_ms, Timer::MarketTick));
        Some(moves)
    }

    // -- price process -----------------------------------------------------

    /// Reprice every coin in the wallet and refold its total.
    pub fn tick(&mut self, wallet: &mut Wallet) -> Vec<PriceMove> {
        let mut moves = Vec::with_capacity(wallet.len());
        let config = &self.config;
        let rng = &mut self.rng;

        wallet.update_prices(|coin: &Coin| {
            let factor = match config.model {
                PriceModel::Gaussian => 1.0 + standard_normal(&mut *rng) * config.volatility,
                PriceModel::DeltaTable => {
                    1.0 + EMPIRICAL_DELTAS[rng.gen_range(0..EMPIRICAL_DELTAS.len())]
                }
            };
            let (new_price, floored) = next_price(coin.price, factor, config.min_price);
            if floored {
                warn!(symbol = %coin.symbol, old = %coin.price, "Price clamped to floor");
            }
            moves.push(PriceMove {
                symbol: coin.symbol.clone(),
                old_price: coin.price,
                new_price,
                trend: Trend::between(coin.price, new_price),
                floored,
            });
            new_price
        });

        for mv in &moves {
            self.trends.insert(mv.symbol.clone(), mv.trend);
        }
        self.ticks += 1;
        debug!(
            tick = self.ticks,
            coins = moves.len(),
            total_value = %wallet.total_value(),
            "Market tick"
        );
        moves
    }

    /// Current prices in symbol order with their last trend.
    pub fn snapshot(&self, wallet: &Wallet) -> Vec<PriceQuote> {
        wallet
            .coins()
            .map(|coin| PriceQuote {
                symbol: coin.symbol.clone(),
                name: coin.name.clone(),
                price: coin.price,
                trend: self.trends.get(&coin.symbol).copied().unwrap_or_default(),
            })
            .collect()
    }
}

/// Standard-normal deviate via Box–Muller.
///
/// `u1` comes from the open interval (0,1) so `ln(u1)` is always finite.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1: f64 = rng.sample(Open01);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Apply a multiplicative move and clamp at `floor`.
///
/// Returns the new price and whether the floor was hit. Non-finite or
/// non-positive results land on the floor; finite results above the decimal
/// range are capped at `Price::MAX`.
pub fn next_price(old: Price, factor: f64, floor: Price) -> (Price, bool) {
    if factor == 1.0 {
        return (old.floored_at(floor), old < floor);
    }
    let raw = old.to_f64() * factor;
    match Price::from_f64(raw) {
        Some(p) if p >= floor => (p, false),
        None if raw.is_finite() && raw >= 1.0 => (Price::MAX, false),
        _ => (floor, true),
    }
}
