//! The view of a game position that the heuristic and the searches work through

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};

use crate::{HEIGHT, WIDTH};

/// One of the two players. `X` always moves first.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Returns the opponent of this player
    pub fn other(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// The cell marker used for this player's tiles
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::X => write!(f, "x"),
            Player::O => write!(f, "o"),
        }
    }
}

impl FromStr for Player {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x" => Ok(Player::X),
            "o" => Ok(Player::O),
            other => Err(anyhow!("unknown player '{}', expected 'x' or 'o'", other)),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    X,
    O,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The owner of the tile in this cell, if any
    pub fn player(&self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// Row-major grid of cells
pub type Grid = [[Cell; WIDTH]; HEIGHT];

/// An immutable game position
///
/// Applying a move never changes the receiver, it produces a new state.
/// Every branch of a search therefore owns its own position and no board is
/// shared mutably between them.
pub trait State: Sized {
    /// The player who places the next tile
    fn next_move_player(&self) -> Player;

    /// The columns a tile can currently be dropped into, left to right.
    /// Empty once the game is over.
    fn legal_moves(&self) -> Vec<usize>;

    /// Returns the position after the player to move drops a tile in `column`
    ///
    /// `column` must be one of [`State::legal_moves`]
    fn play(&self, column: usize) -> Self;

    /// The successor of every legal move, in the order of [`State::legal_moves`]
    fn next_states(&self) -> Vec<Self> {
        self.legal_moves()
            .into_iter()
            .map(|column| self.play(column))
            .collect()
    }

    /// Counts the maximal runs of `player`'s tiles of the given length in all
    /// four orientations
    fn num_lines(&self, length: usize, player: Player) -> usize;

    /// Read-only access to the cells
    fn board(&self) -> &Grid;
}
