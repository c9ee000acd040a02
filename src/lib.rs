//! A depth-limited minimax agent for playing the board game 'Connect 4'
//!
//! Positions are scored with a static line-counting heuristic and the
//! game tree is searched to a fixed number of plies, either exhaustively
//! or with alpha-beta pruning. Both searches return the same value.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{board::Board, selector::MoveSelector};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // x has three stacked in the first column
//! let board = Board::from_moves("121217")?;
//! let best_move = MoveSelector::default().select_move(&board);
//!
//! assert_eq!(best_move, Some(0));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod state;

pub mod board;

pub mod heuristic;

pub mod search;

pub mod selector;

mod test;

pub use board::Board;
pub use heuristic::{evaluate, Score};
pub use search::{alpha_beta, minimax, Backend, Searcher};
pub use selector::{select_move, MoveSelector, Options};
pub use state::{Cell, Player, State};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of tiles in a row needed to win
pub const CONNECT: usize = 4;

// a winning line has to fit on the board in some orientation
const_assert!(CONNECT <= WIDTH || CONNECT <= HEIGHT);
const_assert!(CONNECT >= 2);
