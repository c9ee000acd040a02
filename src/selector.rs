//! Picks a move by searching every legal move from the root

use log::{debug, info};
use rayon::prelude::*;

use crate::heuristic::Score;
use crate::search::{Backend, Searcher};
use crate::state::State;

/// Search depth in plies below each candidate move
pub const DEFAULT_DEPTH: usize = 4;

/// Settings for a [`MoveSelector`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Options {
    pub depth: usize,
    pub backend: Backend,
    /// Score the root moves on the rayon thread pool
    pub parallel: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            backend: Backend::Minimax,
            parallel: false,
        }
    }
}

/// Chooses moves for the player to move
///
/// # Notes
/// Every legal move is played and the resulting position scored with a
/// [`Searcher`] for the player to move. The move with the highest score
/// wins; among equal scores the leftmost column is kept.
#[derive(Clone, Debug, Default)]
pub struct MoveSelector {
    options: Options,

    /// The number of nodes searched by this `MoveSelector` so far (for diagnostics only)
    pub node_count: usize,
}

impl MoveSelector {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            node_count: 0,
        }
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Scores every legal move of `state`, returned as `(column, score)` in
    /// legal-move order
    pub fn score_moves<S: State + Sync>(&mut self, state: &S) -> Vec<(usize, Score)> {
        let player = state.next_move_player();
        let Options {
            depth,
            backend,
            parallel,
        } = self.options;

        let score_move = |column: usize| {
            let mut searcher = Searcher::new(player);
            let score = searcher.search(backend, &state.play(column), depth);
            (column, score, searcher.node_count)
        };

        let legal_moves = state.legal_moves();
        // collecting keeps legal-move order in both cases
        let scored: Vec<(usize, Score, usize)> = if parallel {
            legal_moves.par_iter().map(|&column| score_move(column)).collect()
        } else {
            legal_moves.iter().map(|&column| score_move(column)).collect()
        };

        scored
            .into_iter()
            .map(|(column, score, nodes)| {
                debug!("{} column {}: score {} ({} nodes)", player, column + 1, score, nodes);
                self.node_count += nodes;
                (column, score)
            })
            .collect()
    }

    /// Returns the best column for the player to move, or `None` if the game is over
    pub fn select_move<S: State + Sync>(&mut self, state: &S) -> Option<usize> {
        let nodes_before = self.node_count;

        let mut best: Option<(usize, Score)> = None;
        for (column, score) in self.score_moves(state) {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((column, score)),
            }
        }

        if let Some((column, score)) = best {
            info!(
                "{} plays column {} (score {}, {} search, depth {}, {} nodes)",
                state.next_move_player(),
                column + 1,
                score,
                self.options.backend,
                self.options.depth,
                self.node_count - nodes_before
            );
        }
        best.map(|(column, _)| column)
    }
}

/// Chooses a column for the player to move with the default [`Options`]
pub fn select_move<S: State + Sync>(state: &S) -> Option<usize> {
    MoveSelector::default().select_move(state)
}
