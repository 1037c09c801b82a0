//! Perfect-memory player
//!
//! Remembers every face it has seen and clicks a known pair whenever one
//! is available; otherwise it explores the lowest-index unseen card.
//! Deterministic: no RNG involved.

use super::{hidden_indices, Player};
use std::collections::BTreeMap;
use types::coin::Coin;
use types::ids::Symbol;

#[derive(Debug, Clone, Default)]
pub struct PerfectMemoryPlayer {
    seen: BTreeMap<usize, Symbol>,
}

impl PerfectMemoryPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of board positions whose face is known.
    pub fn known(&self) -> usize {
        self.seen.len()
    }

    fn partner_of(&self, index: usize, board: &[Coin]) -> Option<usize> {
        let symbol = self.seen.get(&index)?;
        self.seen
            .iter()
            .find(|(i, s)| **i != index && *s == symbol && board[**i].is_hidden())
            .map(|(i, _)| *i)
    }

    fn known_hidden_pair(&self, board: &[Coin]) -> Option<usize> {
        self.seen
            .keys()
            .copied()
            .filter(|i| board[*i].is_hidden())
            .find(|i| self.partner_of(*i, board).is_some())
    }

    fn first_unseen(&self, board: &[Coin]) -> Option<usize> {
        hidden_indices(board)
            .into_iter()
            .find(|i| !self.seen.contains_key(i))
    }
}

impl Player for PerfectMemoryPlayer {
    fn name(&self) -> &'static str {
        "perfect_memory"
    }

    fn reset(&mut self) {
        self.seen.clear();
    }

    fn choose(&mut self, board: &[Coin]) -> Option<usize> {
        let face_up = board.iter().position(Coin::is_revealed);

        let pick = match face_up {
            Some(first) => self
                .partner_of(first, board)
                .or_else(|| self.first_unseen(board)),
            None => self
                .known_hidden_pair(board)
                .or_else(|| self.first_unseen(board)),
        };
        pick.or_else(|| hidden_indices(board).into_iter().next())
    }

    fn observe(&mut self, board: &[Coin]) {
        for (i, card) in board.iter().enumerate() {
            if !card.is_hidden() {
                self.seen.insert(i, card.symbol.clone());
            }
        }
    }
}
