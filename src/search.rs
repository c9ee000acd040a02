//! Fixed-depth game tree search

use anyhow::{anyhow, Error};
use static_assertions::*;

use std::fmt;
use std::str::FromStr;

use crate::heuristic::{evaluate, Score, MAX_EVALUATION};
use crate::state::{Player, State};

/// Stands in for infinity in the alpha-beta window
pub const SCORE_SENTINEL: Score = 1_000_000_000_000;

// no real evaluation may reach the window bounds
const_assert!(SCORE_SENTINEL > MAX_EVALUATION);

/// The search algorithm used to score a position
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Backend {
    /// Visits every node up to the depth limit
    Minimax,
    /// Skips branches that cannot change the result
    AlphaBeta,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Backend::Minimax => write!(f, "minimax"),
            Backend::AlphaBeta => write!(f, "alpha-beta"),
        }
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minimax" => Ok(Backend::Minimax),
            "alpha-beta" | "alphabeta" | "ab" => Ok(Backend::AlphaBeta),
            other => Err(anyhow!(
                "unknown search backend '{}', expected 'minimax' or 'alpha-beta'",
                other
            )),
        }
    }
}

/// Searches the game tree on behalf of one player
///
/// # Notes
/// The maximizing player is fixed when the `Searcher` is created and stays
/// the same at every ply. A node maximizes when its player to move is the
/// maximizing player and minimizes otherwise.
///
/// Depth counts plies. A node at depth 0, or one without successors, is
/// scored with [`evaluate`].
#[derive(Clone, Debug)]
pub struct Searcher {
    maximizing_player: Player,

    /// The number of nodes searched by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl Searcher {
    pub fn new(maximizing_player: Player) -> Self {
        Self {
            maximizing_player,
            node_count: 0,
        }
    }

    pub fn maximizing_player(&self) -> Player {
        self.maximizing_player
    }

    /// Scores `state` with the given backend
    pub fn search<S: State>(&mut self, backend: Backend, state: &S, depth: usize) -> Score {
        match backend {
            Backend::Minimax => self.minimax(state, depth),
            Backend::AlphaBeta => self.alpha_beta(state, depth),
        }
    }

    /// Plain minimax, every node within `depth` plies is visited
    pub fn minimax<S: State>(&mut self, state: &S, depth: usize) -> Score {
        self.node_count += 1;

        if depth == 0 {
            return evaluate(state, self.maximizing_player);
        }
        let next_states = state.next_states();
        if next_states.is_empty() {
            return evaluate(state, self.maximizing_player);
        }

        let values = next_states
            .iter()
            .map(|next| self.minimax(next, depth - 1))
            .collect::<Vec<_>>();

        // next_states is non-empty, so both folds see at least one value
        if state.next_move_player() == self.maximizing_player {
            values.into_iter().fold(-SCORE_SENTINEL, Score::max)
        } else {
            values.into_iter().fold(SCORE_SENTINEL, Score::min)
        }
    }

    /// Alpha-beta search over the full window
    pub fn alpha_beta<S: State>(&mut self, state: &S, depth: usize) -> Score {
        self.minimax_ab(state, depth, -SCORE_SENTINEL, SCORE_SENTINEL)
    }

    /// Minimax with alpha-beta pruning
    ///
    /// `alpha` is the best score the maximizing player is already guaranteed
    /// along this path, `beta` the best score the minimizing player is
    /// guaranteed. Siblings are skipped once `alpha > beta`; a tie does not
    /// cut.
    ///
    /// Over the full window this returns exactly what [`Searcher::minimax`]
    /// returns.
    pub fn minimax_ab<S: State>(
        &mut self,
        state: &S,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        self.node_count += 1;

        if depth == 0 {
            return evaluate(state, self.maximizing_player);
        }
        let next_states = state.next_states();
        if next_states.is_empty() {
            return evaluate(state, self.maximizing_player);
        }

        if state.next_move_player() == self.maximizing_player {
            let mut best = -SCORE_SENTINEL;
            for next in next_states.iter() {
                let value = self.minimax_ab(next, depth - 1, alpha, beta);
                alpha = alpha.max(value);
                best = best.max(value);
                // the minimizing player will avoid this branch
                if alpha > beta {
                    return best;
                }
            }
            best
        } else {
            let mut best = SCORE_SENTINEL;
            for next in next_states.iter() {
                let value = self.minimax_ab(next, depth - 1, alpha, beta);
                beta = beta.min(value);
                best = best.min(value);
                // the maximizing player will avoid this branch
                if alpha > beta {
                    return best;
                }
            }
            best
        }
    }
}

/// Scores `state` for `maximizing_player` with plain minimax
pub fn minimax<S: State>(state: &S, depth: usize, maximizing_player: Player) -> Score {
    Searcher::new(maximizing_player).minimax(state, depth)
}

/// Scores `state` for `maximizing_player` with alpha-beta pruning
pub fn alpha_beta<S: State>(state: &S, depth: usize, maximizing_player: Player) -> Score {
    Searcher::new(maximizing_player).alpha_beta(state, depth)
}
