//! Static evaluation of a position

use crate::state::{Player, State};
use crate::{CONNECT, HEIGHT, WIDTH};

use static_assertions::*;

/// The value of a position. Positive numbers favour the maximizing player.
pub type Score = i64;

/// Each extra tile in a line multiplies its worth by this factor
pub const LINE_WEIGHT_BASE: Score = 200;

/// The shortest line that is worth anything
pub const MIN_LINE_LENGTH: usize = 2;

/// Bonus for every tile in a column, centre columns are worth the most
pub const COLUMN_WEIGHTS: [Score; 8] = [0, 1, 2, 3, 3, 2, 1, 0];

const_assert!(WIDTH <= COLUMN_WEIGHTS.len());

/// The worth of a single line of `length` tiles, `200^(length - 1)`
///
/// A length of 0 is weighted like a single tile.
pub const fn line_weight(length: usize) -> Score {
    LINE_WEIGHT_BASE.pow(length.saturating_sub(1) as u32)
}

/// An upper bound on the magnitude of [`evaluate`]
///
/// Every tile starts at most one line in each of the four orientations and
/// collects at most the largest column bonus.
pub const MAX_EVALUATION: Score =
    (WIDTH * HEIGHT) as Score * (4 * line_weight(CONNECT) + COLUMN_WEIGHTS[3]);

/// Scores `state` from the point of view of `maximizing_player`
///
/// Both players are scored the same way and the opponent's total is
/// subtracted, so `evaluate(s, p) == -evaluate(s, p.other())`.
///
/// ```
/// use connect4_minimax::{evaluate, Board, Player};
///
/// assert_eq!(evaluate(&Board::new(), Player::X), 0);
/// ```
pub fn evaluate<S: State>(state: &S, maximizing_player: Player) -> Score {
    player_total(state, maximizing_player) - player_total(state, maximizing_player.other())
}

fn player_total<S: State>(state: &S, player: Player) -> Score {
    line_score(state, player) + position_score(state, player)
}

fn line_score<S: State>(state: &S, player: Player) -> Score {
    (MIN_LINE_LENGTH..=CONNECT)
        .map(|length| state.num_lines(length, player) as Score * line_weight(length))
        .sum()
}

fn position_score<S: State>(state: &S, player: Player) -> Score {
    let cell = player.to_cell();
    state
        .board()
        .iter()
        .flat_map(|row| row.iter().enumerate())
        .filter(|&(_, &c)| c == cell)
        .map(|(column, _)| COLUMN_WEIGHTS[column])
        .sum()
}
