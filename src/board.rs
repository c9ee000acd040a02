//! A plain grid implementation of [`State`]

use anyhow::{anyhow, bail, Context, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::fmt;
use std::io::{stdout, Write};

use crate::state::{Cell, Grid, Player, State};
use crate::{CONNECT, HEIGHT, WIDTH};

/// Row and column steps for the horizontal, vertical and both diagonal orientations
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Playing,
    Win(Player),
    Draw,
}

/// A Connect 4 position
///
/// `Board` is `Copy`: [`State::play`] hands out a fresh board and leaves the
/// original untouched.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: Grid, // rows are stored bottom-to-top, cells left-to-right
    heights: [usize; WIDTH],
    player: Player,
    num_moves: usize,
    winner: Option<Player>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
            heights: [0; WIDTH],
            player: Player::X,
            num_moves: 0,
            winner: None,
        }
    }

    /// Replays a game given as a string of 1-indexed column digits, e.g. `"4453"`
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();

        for (i, column_char) in moves.as_ref().chars().enumerate() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    board = board
                        .play_checked(column - 1)
                        .with_context(|| format!("move {} of '{}'", i + 1, moves.as_ref()))?
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Builds a position from a picture of the board, top row first
    ///
    /// Tiles are written as `x` and `o`, empty cells as `.`. The player to
    /// move is derived from the number of tiles each side has placed.
    ///
    /// ```
    /// use connect4_minimax::{board::Board, Player, State};
    ///
    ///# fn main() -> anyhow::Result<()> {
    /// let board = Board::from_rows(&[
    ///     ".......",
    ///     ".......",
    ///     ".......",
    ///     ".......",
    ///     "...o...",
    ///     "..xxo..",
    /// ])?;
    /// assert_eq!(board.next_move_player(), Player::X);
    ///# Ok(())
    ///# }
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        if rows.len() != HEIGHT {
            bail!("expected {} rows, found {}", HEIGHT, rows.len());
        }

        let mut board = Self::new();
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref().trim();
            if row.chars().count() != WIDTH {
                bail!("row {} must have {} cells: '{}'", i + 1, WIDTH, row);
            }
            for (column, cell_char) in row.chars().enumerate() {
                board.cells[HEIGHT - 1 - i][column] = match cell_char {
                    'x' | 'X' => Cell::X,
                    'o' | 'O' => Cell::O,
                    '.' => Cell::Empty,
                    _ => bail!("could not parse '{}' as a cell", cell_char),
                };
            }
        }

        // tiles have to rest on top of each other
        for column in 0..WIDTH {
            let height = (0..HEIGHT)
                .take_while(|&row| !board.cells[row][column].is_empty())
                .count();
            if (height..HEIGHT).any(|row| !board.cells[row][column].is_empty()) {
                bail!("Invalid position, floating tile in column {}", column + 1);
            }
            board.heights[column] = height;
        }

        let count = |cell: Cell| board.cells.iter().flatten().filter(|&&c| c == cell).count();
        let (x_tiles, o_tiles) = (count(Cell::X), count(Cell::O));
        board.player = if x_tiles == o_tiles {
            Player::X
        } else if x_tiles == o_tiles + 1 {
            Player::O
        } else {
            bail!(
                "Invalid position, {} x tiles and {} o tiles cannot occur in a game",
                x_tiles,
                o_tiles
            )
        };
        board.num_moves = x_tiles + o_tiles;

        let x_won = board.num_lines(CONNECT, Player::X) > 0;
        let o_won = board.num_lines(CONNECT, Player::O) > 0;
        board.winner = match (x_won, o_won) {
            (true, true) => bail!("Invalid position, both players have won"),
            (true, false) => Some(Player::X),
            (false, true) => Some(Player::O),
            (false, false) => None,
        };
        // the winner placed the last tile, so it must be the opponent's turn
        if board.winner == Some(board.player) {
            bail!("Invalid position, play continued after {} won", board.player);
        }

        Ok(board)
    }

    /// Drops a tile for the current player in a 0-indexed column
    ///
    /// Error messages name the column 1-indexed, matching the rendered board.
    pub fn play_checked(&self, column: usize) -> Result<Self> {
        if self.winner.is_some() {
            bail!("Invalid move, game is over");
        }
        if column >= WIDTH {
            bail!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column + 1,
                WIDTH
            );
        }
        if !self.playable(column) {
            bail!("Invalid move, column {} full", column + 1);
        }
        Ok(self.play(column))
    }

    pub fn playable(&self, column: usize) -> bool {
        self.heights[column] < HEIGHT
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_full(&self) -> bool {
        self.num_moves == WIDTH * HEIGHT
    }

    pub fn outcome(&self) -> Outcome {
        match self.winner {
            Some(player) => Outcome::Win(player),
            None if self.is_full() => Outcome::Draw,
            None => Outcome::Playing,
        }
    }

    fn cell_at(&self, row: isize, column: isize) -> Option<Cell> {
        if row < 0 || column < 0 || row >= HEIGHT as isize || column >= WIDTH as isize {
            None
        } else {
            Some(self.cells[row as usize][column as usize])
        }
    }

    // number of consecutive `cell`s starting at (row, column) and stepping by (d_row, d_column)
    fn run_length(
        &self,
        mut row: isize,
        mut column: isize,
        d_row: isize,
        d_column: isize,
        cell: Cell,
    ) -> usize {
        let mut run = 0;
        while self.cell_at(row, column) == Some(cell) {
            run += 1;
            row += d_row;
            column += d_column;
        }
        run
    }

    // does the tile at (row, column) belong to a winning alignment?
    fn connects(&self, row: usize, column: usize) -> bool {
        let cell = self.cells[row][column];
        let (row, column) = (row as isize, column as isize);
        DIRECTIONS.iter().any(|&(d_row, d_column)| {
            let forward = self.run_length(row + d_row, column + d_column, d_row, d_column, cell);
            let backward = self.run_length(row - d_row, column - d_column, -d_row, -d_column, cell);
            forward + 1 + backward >= CONNECT
        })
    }

    /// Draws the board to the terminal
    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;

        for row in self.cells.iter().rev() {
            for cell in row.iter() {
                stdout.queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match cell {
                            Cell::X => Color::Red,
                            Cell::O => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
            }
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;
        Ok(())
    }
}

impl State for Board {
    fn next_move_player(&self) -> Player {
        self.player
    }

    fn legal_moves(&self) -> Vec<usize> {
        if self.winner.is_some() {
            return Vec::new();
        }
        (0..WIDTH).filter(|&column| self.playable(column)).collect()
    }

    fn play(&self, column: usize) -> Self {
        let mut next = *self;
        let row = next.heights[column];
        next.cells[row][column] = self.player.to_cell();
        next.heights[column] += 1;
        next.num_moves += 1;
        if next.connects(row, column) {
            next.winner = Some(self.player);
        }
        next.player = self.player.other();
        next
    }

    /// Runs longer than [`CONNECT`] are counted as a single winning line
    fn num_lines(&self, length: usize, player: Player) -> usize {
        let cell = player.to_cell();
        let mut count = 0;
        for &(d_row, d_column) in DIRECTIONS.iter() {
            for row in 0..HEIGHT as isize {
                for column in 0..WIDTH as isize {
                    // only measure a run from its first tile
                    if self.cell_at(row, column) != Some(cell)
                        || self.cell_at(row - d_row, column - d_column) == Some(cell)
                    {
                        continue;
                    }
                    let run = self.run_length(row, column, d_row, d_column, cell);
                    if run == length || (length == CONNECT && run > CONNECT) {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    fn board(&self) -> &Grid {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for column in 1..=WIDTH {
            write!(f, "{}", column)?;
        }
        writeln!(f)?;
        for row in self.cells.iter().rev() {
            for cell in row.iter() {
                let c = match cell {
                    Cell::X => 'x',
                    Cell::O => 'o',
                    Cell::Empty => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
