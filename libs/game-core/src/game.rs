//! Game: the match state machine
//!
//! Per-card states: Hidden → Revealed → Matched (terminal), or
//! Revealed → Hidden when a pair mismatches.
//! Session states: Idle → InProgress → Complete.
//!
//! Every reveal rebuilds the set of face-up cards from the whole board
//! rather than tracking "first" and "second" click pointers. Two face-up
//! cards make one try, decided synchronously inside the reveal that turned
//! the second card. A mismatch locks the board until a one-shot revert
//! timer fires; the timer carries the session generation so a timer left
//! over from an abandoned session can never touch the new board.

use crate::scheduler::{TaskHandle, Timer, TimerQueue};
use crate::wallet::Wallet;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use types::coin::{Coin, Visibility};
use types::ids::Symbol;
use types::numeric::round_display;

/// Default delay before a mismatched pair flips back.
pub const DEFAULT_MISMATCH_DELAY_MS: u64 = 1_000;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    InProgress,
    Complete,
}

/// Why a reveal was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// A mismatch is still waiting to flip back
    Locked,
    OutOfRange,
    /// The card is already face up or matched
    NotHidden,
}

/// Result of a single reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// Nothing changed
    Ignored(IgnoreReason),
    /// The card turned face up and waits for a partner
    Revealed { index: usize },
    /// Second card matched the first; the wallet was credited
    Matched {
        indices: [usize; 2],
        symbol: Symbol,
        session_complete: bool,
    },
    /// Second card did not match; both flip back after the mismatch delay
    Mismatched { indices: [usize; 2] },
}

impl RevealOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, RevealOutcome::Ignored(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingRevert {
    handle: TaskHandle,
    indices: [usize; 2],
}

/// Board plus session counters.
#[derive(Debug, Clone)]
pub struct Game {
    board: Vec<Coin>,
    games_played: u64,
    tries: u64,
    matches: u64,
    max_matches: u64,
    locked: bool,
    completed: bool,
    pending_revert: Option<PendingRevert>,
    mismatch_delay_ms: u64,
    rng: ChaCha8Rng,
}

impl Game {
    /// Create an idle game with a deterministic shuffle seed.
    pub fn new(mismatch_delay_ms: u64, seed: u64) -> Self {
        Self {
            board: Vec::new(),
            games_played: 0,
            tries: 0,
            matches: 0,
            max_matches: 0,
            locked: false,
            completed: false,
            pending_revert: None,
            mismatch_delay_ms,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    // -- session lifecycle ---------------------------------------------------

    /// Deal a fresh board of two snapshots per coin, abandoning any session
    /// in flight.
    ///
    /// A pending mismatch revert is cancelled; `games_played` survives.
    pub fn start_session(&mut self, coins: &[Coin], timers: &mut TimerQueue<Timer>) {
        if let Some(pending) = self.pending_revert.take() {
            timers.cancel(pending.handle);
            debug!(handle = pending.handle.id(), "Cancelled pending mismatch revert");
        }

        self.games_played += 1;
        self.tries = 0;
        self.matches = 0;
        self.max_matches = coins.len() as u64;
        self.locked = false;
        self.completed = false;

        self.board = coins
            .iter()
            .chain(coins.iter())
            .map(Coin::card_copy)
            .collect();
        shuffle(&mut self.board, &mut self.rng);

        info!(
            games_played = self.games_played,
            cards = self.board.len(),
            "Session started"
        );
    }

    // -- reveal --------------------------------------------------------------

    /// Turn the card at `index` face up and resolve a try if two cards are
    /// now showing.
    ///
    /// Locked boards, out-of-range indices and cards that are not hidden are
    /// ignored without touching any state.
    pub fn reveal(
        &mut self,
        index: usize,
        wallet: &mut Wallet,
        timers: &mut TimerQueue<Timer>,
    ) -> RevealOutcome {
        if self.locked {
            debug!(index, "Reveal ignored: board locked");
            return RevealOutcome::Ignored(IgnoreReason::Locked);
        }
        let card = match self.board.get_mut(index) {
            Some(card) => card,
            None => {
                debug!(index, cards = self.board.len(), "Reveal ignored: out of range");
                return RevealOutcome::Ignored(IgnoreReason::OutOfRange);
            }
        };
        if card.transition(Visibility::Revealed).is_err() {
            debug!(index, visibility = %card.visibility, "Reveal ignored: card not hidden");
            return RevealOutcome::Ignored(IgnoreReason::NotHidden);
        }

        let revealed = self.revealed_indices();
        let [a, b] = match revealed.as_slice() {
            [a, b] => [*a, *b],
            _ => return RevealOutcome::Revealed { index },
        };

        self.tries += 1;
        self.locked = true;

        if self.board[a].symbol == self.board[b].symbol {
            self.resolve_match([a, b], wallet)
        } else {
            let handle = timers.schedule(
                self.mismatch_delay_ms,
                Timer::MismatchRevert {
                    generation: self.games_played,
                },
            );
            self.pending_revert = Some(PendingRevert {
                handle,
                indices: [a, b],
            });
            debug!(a, b, tries = self.tries, "Mismatch");
            RevealOutcome::Mismatched { indices: [a, b] }
        }
    }

    fn resolve_match(&mut self, indices: [usize; 2], wallet: &mut Wallet) -> RevealOutcome {
        for &i in &indices {
            if let Err(err) = self.board[i].transition(Visibility::Matched) {
                warn!(index = i, %err, "Unexpected card state during match");
            }
        }
        let symbol = self.board[indices[0]].symbol.clone();

        self.matches += 1;
        wallet.credit(&symbol, 1);
        self.locked = false;

        let session_complete = !self.completed && self.matches == self.max_matches;
        if session_complete {
            self.completed = true;
            info!(
                games_played = self.games_played,
                tries = self.tries,
                accuracy = %self.accuracy(),
                "Session complete"
            );
        }
        debug!(%symbol, matches = self.matches, tries = self.tries, "Match");

        RevealOutcome::Matched {
            indices,
            symbol,
            session_complete,
        }
    }

    /// Handle a fired `Timer::MismatchRevert`: flip the pair back and unlock.
    ///
    /// Returns the flipped indices, or None when the timer belongs to an
    /// earlier session or is not the pending revert.
    pub fn on_revert_timer(&mut self, handle: TaskHandle, generation: u64) -> Option<[usize; 2]> {
        if generation != self.games_played {
            warn!(
                generation,
                current = self.games_played,
                "Ignoring revert timer from an abandoned session"
            );
            return None;
        }
        let pending = match self.pending_revert {
            Some(p) if p.handle == handle => p,
            _ => {
                warn!(handle = handle.id(), "Ignoring unknown revert timer");
                return None;
            }
        };
        self.pending_revert = None;

        for &i in &pending.indices {
            if let Err(err) = self.board[i].transition(Visibility::Hidden) {
                warn!(index = i, %err, "Unexpected card state during revert");
            }
        }
        self.locked = false;
        debug!(indices = ?pending.indices, "Mismatch reverted");
        Some(pending.indices)
    }

    // -- queries -------------------------------------------------------------

    /// `matches / tries × 100` rounded to two places; zero before any try.
    pub fn accuracy(&self) -> Decimal {
        if self.tries == 0 {
            return round_display(Decimal::ZERO);
        }
        round_display(Decimal::from(self.matches * 100) / Decimal::from(self.tries))
    }

    fn revealed_indices(&self) -> Vec<usize> {
        self.board
            .iter()
            .enumerate()
            .filter(|(_, card)| card.is_revealed())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn session_state(&self) -> SessionState {
        if self.board.is_empty() {
            SessionState::Idle
        } else if self.completed {
            SessionState::Complete
        } else {
            SessionState::InProgress
        }
    }

    pub fn board(&self) -> &[Coin] {
        &self.board
    }

    pub fn games_played(&self) -> u64 {
        self.games_played
    }

    pub fn tries(&self) -> u64 {
        self.tries
    }

    pub fn matches(&self) -> u64 {
        self.matches
    }

    pub fn misses(&self) -> u64 {
        self.tries - self.matches
    }

    pub fn max_matches(&self) -> u64 {
        self.max_matches
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn mismatch_delay_ms(&self) -> u64 {
        self.mismatch_delay_ms
    }
}

/// Fisher–Yates: for i from the last index down to 1, swap with a uniform
/// index in [0, i].
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
