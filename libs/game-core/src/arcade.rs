//! Arcade: the context object that owns one game, one market and one wallet
//!
//! Built once per process and handed by reference to whatever drives the
//! event loop. All mutation funnels through here on a single thread:
//! clicks arrive through `reveal`, time arrives through `advance`, and the
//! resulting notifications pile up in an event buffer for the presenter.

use crate::config::ArcadeConfig;
use crate::events::ArcadeEvent;
use crate::game::{Game, RevealOutcome};
use crate::market::{Market, PriceQuote};
use crate::scheduler::{Timer, TimerQueue};
use crate::wallet::Wallet;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use tracing::{debug, info};
use types::coin::Coin;
use types::errors::ArcadeError;

#[derive(Debug)]
pub struct Arcade {
    config: ArcadeConfig,
    wallet: Wallet,
    market: Market,
    game: Game,
    timers: TimerQueue<Timer>,
    events: Vec<ArcadeEvent>,
    halted_by_completion: bool,
}

impl Arcade {
    /// Validate `config`, build the wallet and seed the game and market RNGs.
    ///
    /// No board is dealt until `start_session`.
    pub fn new(config: ArcadeConfig) -> Result<Self, ArcadeError> {
        config.validate()?;
        let wallet = Wallet::new(&config.coins)?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut seeder = ChaCha8Rng::seed_from_u64(seed);
        let game = Game::new(config.mismatch_delay_ms, seeder.gen());
        let market = Market::new(config.market_config(), seeder.gen());

        info!(
            seed,
            coins = wallet.len(),
            model = ?config.price_model,
            "Arcade initialized"
        );

        let mut arcade = Self {
            config,
            wallet,
            market,
            game,
            timers: TimerQueue::new(),
            events: Vec::new(),
            halted_by_completion: false,
        };
        if arcade.config.autostart_market {
            arcade.start_market();
        }
        Ok(arcade)
    }

    /// Build with `ArcadeConfig::default()`.
    pub fn with_defaults() -> Result<Self, ArcadeError> {
        Self::new(ArcadeConfig::default())
    }

    // -- game ----------------------------------------------------------------

    /// Deal a new board from the wallet's current prices.
    ///
    /// The market keeps ticking across sessions; it is only restarted here if
    /// a completed session halted it.
    pub fn start_session(&mut self) {
        if self.halted_by_completion {
            self.halted_by_completion = false;
            self.start_market();
        }
        let coins: Vec<Coin> = self.wallet.coins().cloned().collect();
        self.game.start_session(&coins, &mut self.timers);
        self.events.push(ArcadeEvent::SessionStarted {
            games_played: self.game.games_played(),
        });
        self.events.push(ArcadeEvent::Updated);
    }

    /// Forward a click on card `index`.
    pub fn reveal(&mut self, index: usize) -> RevealOutcome {
        let outcome = self.game.reveal(index, &mut self.wallet, &mut self.timers);

        match &outcome {
            RevealOutcome::Ignored(_) => {}
            RevealOutcome::Revealed { .. } => self.events.push(ArcadeEvent::Updated),
            RevealOutcome::Matched {
                indices,
                symbol,
                session_complete,
            } => {
                self.events.push(ArcadeEvent::Updated);
                self.events.push(ArcadeEvent::Matched {
                    indices: *indices,
                    symbol: symbol.clone(),
                    total_value: self.wallet.total_value(),
                });
                if *session_complete {
                    self.events.push(ArcadeEvent::SessionComplete {
                        games_played: self.game.games_played(),
                        tries: self.game.tries(),
                        accuracy: self.game.accuracy(),
                    });
                    if self.config.halt_market_on_completion && self.stop_market() {
                        self.halted_by_completion = true;
                    }
                }
            }
            RevealOutcome::Mismatched { indices } => {
                self.events.push(ArcadeEvent::Updated);
                self.events.push(ArcadeEvent::Mismatched { indices: *indices });
            }
        }
        outcome
    }

    // -- clock ---------------------------------------------------------------

    /// Move the virtual clock forward by `elapsed_ms`, firing every timer that
    /// falls due in deadline order. Returns the number of timers handled.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        let until = self.timers.now_ms().saturating_add(elapsed_ms);
        let mut handled = 0;

        while let Some(fired) = self.timers.pop_due(until) {
            match fired.task {
                Timer::MarketTick => {
                    if let Some(moves) =
                        self.market
                            .on_timer(fired.handle, &mut self.timers, &mut self.wallet)
                    {
                        self.events.push(ArcadeEvent::PricesUpdated {
                            moves,
                            total_value: self.wallet.total_value(),
                        });
                        handled += 1;
                    }
                }
                Timer::MismatchRevert { generation } => {
                    if self.game.on_revert_timer(fired.handle, generation).is_some() {
                        self.events.push(ArcadeEvent::Updated);
                        handled += 1;
                    }
                }
            }
        }
        self.timers.advance_to(until);

        if handled > 0 {
            debug!(now_ms = until, handled, "Timers fired");
        }
        handled
    }

    /// Milliseconds until the next pending timer, if any.
    pub fn next_timer_in(&self) -> Option<u64> {
        self.timers
            .next_deadline()
            .map(|d| d.saturating_sub(self.timers.now_ms()))
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    // -- market --------------------------------------------------------------

    /// Start the market at the configured interval. False if already running.
    pub fn start_market(&mut self) -> bool {
        let started = self
            .market
            .start(&mut self.timers, self.config.market_interval_ms);
        if started {
            self.events.push(ArcadeEvent::MarketStarted {
                interval_ms: self.market.interval_ms(),
            });
        }
        started
    }

    /// Stop the market. False if it was not running.
    pub fn stop_market(&mut self) -> bool {
        let stopped = self.market.stop(&mut self.timers);
        if stopped {
            self.halted_by_completion = false;
            self.events.push(ArcadeEvent::MarketStopped);
        }
        stopped
    }

    pub fn price_snapshot(&self) -> Vec<PriceQuote> {
        self.market.snapshot(&self.wallet)
    }

    // -- presenter view ------------------------------------------------------

    /// Take every buffered event, oldest first.
    pub fn drain_events(&mut self) -> Vec<ArcadeEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn accuracy(&self) -> Decimal {
        self.game.accuracy()
    }

    pub fn total_value(&self) -> Decimal {
        self.wallet.total_value()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn config(&self) -> &ArcadeConfig {
        &self.config
    }
}
