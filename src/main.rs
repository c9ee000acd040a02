use anyhow::{bail, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use std::io::{stdin, stdout, Stdin, Write};

use connect4_minimax::board::{Board, Outcome};
use connect4_minimax::selector::DEFAULT_DEPTH;
use connect4_minimax::*;

/// Play Connect 4 against a depth-limited minimax agent
#[derive(Parser)]
#[command(name = "connect4", about = "Play Connect 4 against a minimax agent")]
struct Cli {
    /// Search depth in plies below each candidate move, 0 scores each move statically
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: usize,

    /// Search backend: minimax or alpha-beta
    #[arg(long, default_value = "alpha-beta")]
    backend: String,

    /// Score the candidate moves on all cores
    #[arg(long)]
    parallel: bool,

    /// Log the score of every candidate move
    #[arg(long)]
    verbose: bool,
}

fn ask_yes_no(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush()?;
        if stdin.read_line(&mut buffer)? == 0 {
            bail!("input closed before an answer was given");
        }
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let options = Options {
        depth: cli.depth,
        backend: cli.backend.parse()?,
        parallel: cli.parallel,
    };
    let mut selector = MoveSelector::new(options);

    let stdin = stdin();

    println!("Welcome to Connect 4\n");
    println!(
        "AI searches {} plies below each move using {}\n",
        options.depth, options.backend
    );

    // choose AI control of each player
    let ai_x = ask_yes_no(&stdin, "Is player x AI controlled?")?;
    let ai_o = ask_yes_no(&stdin, "Is player o AI controlled?")?;
    let is_ai = |player: Player| match player {
        Player::X => ai_x,
        Player::O => ai_o,
    };

    let mut board = Board::new();

    // game loop
    loop {
        board.display()?;

        match board.outcome() {
            Outcome::Playing => {
                let player = board.next_move_player();
                let column = if is_ai(player) {
                    // slow down play if both players are AI
                    if ai_x && ai_o {
                        std::thread::sleep(std::time::Duration::new(1, 0));
                    }

                    let spinner = ProgressBar::new_spinner();
                    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}"));
                    spinner.set_message(&format!("AI ({}) is thinking...", player));
                    spinner.enable_steady_tick(100);

                    let nodes_before = selector.node_count;
                    let best_move = selector.select_move(&board);
                    spinner.finish_and_clear();

                    match best_move {
                        Some(column) => {
                            println!(
                                "Best move: {} ({} positions searched)",
                                column + 1,
                                selector.node_count - nodes_before
                            );
                            column
                        }
                        None => bail!("no legal moves left for {}", player),
                    }

                // human player
                } else {
                    print!("Move input for {} > ", player);
                    stdout().flush()?;
                    let mut input_str = String::new();
                    if stdin.read_line(&mut input_str)? == 0 {
                        bail!("input closed during the game");
                    }

                    match input_str.trim().parse::<usize>() {
                        Ok(column @ 1..=WIDTH) => column - 1,
                        _ => {
                            println!(
                                "Invalid move: '{}', enter a column between 1 and {}",
                                input_str.trim(),
                                WIDTH
                            );
                            continue;
                        }
                    }
                };

                match board.play_checked(column) {
                    Ok(next) => board = next,
                    Err(err) => {
                        println!("{}", err);
                        // try the move again
                        continue;
                    }
                }
            }

            // end states
            Outcome::Win(player) => {
                println!("Player {} wins!", player);
                break;
            }
            Outcome::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
