//! Autoplay players
//!
//! A player only learns a card's symbol once it has been turned face up;
//! hidden cards are opaque to it even though the board slice carries them.

pub mod perfect_memory;
pub mod random_clicker;

use types::coin::Coin;

/// Something that picks cards to click.
pub trait Player {
    /// Short name used in reports.
    fn name(&self) -> &'static str;

    /// Forget everything learned about the previous board.
    fn reset(&mut self);

    /// Pick the next card to click, or None if no hidden card remains.
    fn choose(&mut self, board: &[Coin]) -> Option<usize>;

    /// Look at the board after a click.
    fn observe(&mut self, _board: &[Coin]) {}
}

/// Indices of face-down cards.
pub(crate) fn hidden_indices(board: &[Coin]) -> Vec<usize> {
    board
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_hidden())
        .map(|(i, _)| i)
        .collect()
}
