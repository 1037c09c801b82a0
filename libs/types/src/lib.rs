//! Types library for the coin matching game
//!
//! Core type definitions shared by the game core, the simulation harness and
//! the terminal front end.
//!
//! # Modules
//! - `ids`: Coin ticker symbols
//! - `numeric`: Fixed-point price type and display rounding
//! - `coin`: Coin records, card visibility, and the default coin universe
//! - `errors`: Error taxonomy

pub mod ids;
pub mod numeric;
pub mod coin;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::coin::*;
    pub use crate::errors::*;
}
