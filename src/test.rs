#[cfg(test)]
pub mod test {
    use anyhow::Result;

    use crate::board::{Board, Outcome};
    use crate::heuristic::{line_weight, COLUMN_WEIGHTS};
    use crate::search::{alpha_beta, minimax, Backend, Searcher};
    use crate::selector::{MoveSelector, Options};
    use crate::{evaluate, Player, State, WIDTH};

    const PLAYERS: [Player; 2] = [Player::X, Player::O];

    // every game of `length` moves, written as 1-indexed column strings
    fn all_games(length: usize) -> Vec<String> {
        let mut games = vec![String::new()];
        for _ in 0..length {
            games = games
                .iter()
                .flat_map(|game| (1..=WIDTH).map(move |column| format!("{}{}", game, column)))
                .collect();
        }
        games
    }

    fn sample_positions() -> Result<Vec<Board>> {
        let mut boards = Vec::new();
        for moves in &["", "4", "44", "4453", "121217", "7151316", "3344556", "1122334"] {
            boards.push(Board::from_moves(moves)?);
        }
        Ok(boards)
    }

    fn drawn_board() -> Result<Board> {
        Board::from_rows(&[
            "oxoxoxo",
            "xoxoxox",
            "oxoxoxo",
            "oxoxoxo",
            "xoxoxox",
            "xoxoxox",
        ])
    }

    fn selector(depth: usize, backend: Backend) -> MoveSelector {
        MoveSelector::new(Options {
            depth,
            backend,
            parallel: false,
        })
    }

    #[test]
    pub fn empty_board_is_even() {
        let board = Board::new();
        assert_eq!(evaluate(&board, Player::X), 0);
        assert_eq!(evaluate(&board, Player::O), 0);
    }

    #[test]
    pub fn evaluation_is_antisymmetric() -> Result<()> {
        for moves in all_games(3) {
            let board = Board::from_moves(&moves)?;
            assert_eq!(
                evaluate(&board, Player::X),
                -evaluate(&board, Player::O),
                "position {}",
                moves
            );
        }
        for board in sample_positions()? {
            assert_eq!(evaluate(&board, Player::X), -evaluate(&board, Player::O));
        }
        Ok(())
    }

    #[test]
    pub fn completing_a_line_of_four_raises_the_score() -> Result<()> {
        let three = Board::from_rows(&[
            ".......",
            ".......",
            ".......",
            ".......",
            ".ooo...",
            ".xxx...",
        ])?;
        let four = Board::from_rows(&[
            ".......",
            ".......",
            ".......",
            ".......",
            ".ooo...",
            ".xxxx..",
        ])?;
        assert_eq!(four.winner(), Some(Player::X));

        let gain = evaluate(&four, Player::X) - evaluate(&three, Player::X);
        assert!(gain > 0);
        assert_eq!(gain, line_weight(4) - line_weight(3) + COLUMN_WEIGHTS[4]);
        Ok(())
    }

    #[test]
    pub fn depth_zero_is_the_heuristic() -> Result<()> {
        for board in sample_positions()? {
            for &player in PLAYERS.iter() {
                assert_eq!(minimax(&board, 0, player), evaluate(&board, player));
                assert_eq!(alpha_beta(&board, 0, player), evaluate(&board, player));
            }
        }
        Ok(())
    }

    #[test]
    pub fn terminal_positions_are_evaluated_at_any_depth() -> Result<()> {
        let won = Board::from_moves("1212121")?;
        let drawn = drawn_board()?;
        assert_eq!(drawn.outcome(), Outcome::Draw);
        assert!(drawn.legal_moves().is_empty());

        for board in [won, drawn].iter() {
            for &player in PLAYERS.iter() {
                for depth in 0..=4 {
                    assert_eq!(minimax(board, depth, player), evaluate(board, player));
                    assert_eq!(alpha_beta(board, depth, player), evaluate(board, player));
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn one_ply_takes_the_best_successor() -> Result<()> {
        let board = Board::from_moves("4453")?;
        let best = board
            .next_states()
            .iter()
            .map(|next| evaluate(next, Player::X))
            .max();
        assert_eq!(Some(minimax(&board, 1, Player::X)), best);

        // the same position scored for the player not to move takes the minimum
        let worst = board
            .next_states()
            .iter()
            .map(|next| evaluate(next, Player::O))
            .min();
        assert_eq!(Some(minimax(&board, 1, Player::O)), worst);
        Ok(())
    }

    #[test]
    pub fn alpha_beta_matches_minimax() -> Result<()> {
        for moves in all_games(3) {
            let board = Board::from_moves(&moves)?;
            for &player in PLAYERS.iter() {
                assert_eq!(
                    minimax(&board, 2, player),
                    alpha_beta(&board, 2, player),
                    "position {}",
                    moves
                );
            }
        }
        for board in sample_positions()? {
            for &player in PLAYERS.iter() {
                for depth in 0..=4 {
                    assert_eq!(
                        minimax(&board, depth, player),
                        alpha_beta(&board, depth, player),
                        "position\n{}depth {}",
                        board,
                        depth
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn alpha_beta_never_visits_more_nodes() -> Result<()> {
        let mut pruned_somewhere = false;
        for board in sample_positions()? {
            let mut plain = Searcher::new(board.next_move_player());
            let mut pruned = Searcher::new(board.next_move_player());
            assert_eq!(plain.minimax(&board, 4), pruned.alpha_beta(&board, 4));
            assert!(pruned.node_count <= plain.node_count);
            pruned_somewhere |= pruned.node_count < plain.node_count;
        }
        assert!(pruned_somewhere);
        Ok(())
    }

    #[test]
    pub fn alpha_beta_does_not_cut_on_a_tied_window() -> Result<()> {
        let board = Board::from_moves("44")?;
        let mut plain = Searcher::new(Player::X);
        let mut pruned = Searcher::new(Player::X);

        assert_eq!(plain.minimax(&board, 2), pruned.alpha_beta(&board, 2));
        assert_eq!(plain.node_count, 57);
        // cutting at alpha == beta as well would skip one more node
        assert_eq!(pruned.node_count, 45);
        Ok(())
    }

    #[test]
    pub fn depth_zero_scores_each_move_statically() -> Result<()> {
        let board = Board::from_moves("4453")?;
        let player = board.next_move_player();
        let expected: Vec<_> = board
            .legal_moves()
            .into_iter()
            .map(|column| (column, evaluate(&board.play(column), player)))
            .collect();

        for &backend in [Backend::Minimax, Backend::AlphaBeta].iter() {
            let mut selector = selector(0, backend);
            assert_eq!(selector.score_moves(&board), expected);
            assert_eq!(selector.node_count, expected.len());
        }
        Ok(())
    }

    #[test]
    pub fn selection_follows_the_root_scores() -> Result<()> {
        for &backend in [Backend::Minimax, Backend::AlphaBeta].iter() {
            let board = Board::new();
            let mut selector = selector(4, backend);
            let scores = selector.score_moves(&board);
            assert_eq!(scores.len(), WIDTH);

            let best_score = scores.iter().map(|&(_, score)| score).max();
            let first_best = scores
                .iter()
                .find(|&&(_, score)| Some(score) == best_score)
                .map(|&(column, _)| column);

            assert_eq!(selector.select_move(&board), first_best);
            assert!(selector.node_count > 0);
        }
        Ok(())
    }

    #[test]
    pub fn backends_choose_the_same_move() -> Result<()> {
        for board in sample_positions()? {
            if board.legal_moves().is_empty() {
                continue;
            }
            let plain = selector(3, Backend::Minimax).select_move(&board);
            let pruned = selector(3, Backend::AlphaBeta).select_move(&board);
            assert_eq!(plain, pruned, "position\n{}", board);
        }
        Ok(())
    }

    #[test]
    pub fn selected_move_is_legal() -> Result<()> {
        // columns 1 and 2 are full
        let board = Board::from_moves("121212212121")?;
        assert!(!board.legal_moves().contains(&0));
        assert!(!board.legal_moves().contains(&1));

        let mut boards = sample_positions()?;
        boards.push(board);
        for board in boards.iter().filter(|board| !board.legal_moves().is_empty()) {
            let chosen = selector(2, Backend::AlphaBeta).select_move(board);
            assert!(matches!(chosen, Some(column) if board.legal_moves().contains(&column)));
        }
        Ok(())
    }

    #[test]
    pub fn takes_an_immediate_win() -> Result<()> {
        // x has three stacked in the first column
        let board = Board::from_moves("121217")?;
        for depth in 1..=4 {
            for &backend in [Backend::Minimax, Backend::AlphaBeta].iter() {
                assert_eq!(selector(depth, backend).select_move(&board), Some(0));
            }
        }

        // x can finish a row even though o threatens the first column
        let board = Board::from_moves("716151")?;
        assert_eq!(selector(2, Backend::AlphaBeta).select_move(&board), Some(3));
        Ok(())
    }

    #[test]
    pub fn blocks_an_immediate_loss() -> Result<()> {
        // o has three stacked in the first column, x has no win of its own
        let board = Board::from_moves("715131")?;
        assert_eq!(board.next_move_player(), Player::X);
        for depth in 1..=3 {
            for &backend in [Backend::Minimax, Backend::AlphaBeta].iter() {
                assert_eq!(selector(depth, backend).select_move(&board), Some(0));
            }
        }
        Ok(())
    }

    #[test]
    pub fn parallel_selection_matches_sequential() -> Result<()> {
        for board in sample_positions()? {
            let options = Options {
                depth: 3,
                backend: Backend::AlphaBeta,
                parallel: false,
            };
            let mut sequential = MoveSelector::new(options);
            let mut parallel = MoveSelector::new(Options {
                parallel: true,
                ..options
            });

            assert_eq!(sequential.score_moves(&board), parallel.score_moves(&board));
            assert_eq!(sequential.node_count, parallel.node_count);
            assert_eq!(sequential.select_move(&board), parallel.select_move(&board));
        }
        Ok(())
    }

    #[test]
    pub fn no_move_when_the_game_is_over() -> Result<()> {
        assert_eq!(MoveSelector::default().select_move(&Board::from_moves("1212121")?), None);
        assert_eq!(MoveSelector::default().select_move(&drawn_board()?), None);
        Ok(())
    }

    #[test]
    pub fn backend_names() -> Result<()> {
        assert_eq!("minimax".parse::<Backend>()?, Backend::Minimax);
        assert_eq!("Alpha-Beta".parse::<Backend>()?, Backend::AlphaBeta);
        assert_eq!("alphabeta".parse::<Backend>()?, Backend::AlphaBeta);
        assert!("negamax".parse::<Backend>().is_err());
        assert_eq!(Backend::AlphaBeta.to_string().parse::<Backend>()?, Backend::AlphaBeta);
        assert_eq!("o".parse::<Player>()?, Player::O);
        assert!("z".parse::<Player>().is_err());
        Ok(())
    }
}
