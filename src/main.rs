use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, BufRead, Write};

use othello_ai::{
    arena::Arena, game_state::GameState, random_mover::RandomMover, solver::MinimaxSearch,
    Player, Policy, Position, DEFAULT_SEARCH_DEPTH,
};

mod display;
use display::*;

/// Play Othello in the terminal against a minimax or random opponent
#[derive(Parser, Debug)]
#[command(name = "othello")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Who plays Black
    #[arg(long, value_enum, default_value = "human")]
    black: Controller,

    /// Who plays White
    #[arg(long, value_enum, default_value = "minimax")]
    white: Controller,

    /// Search depth of minimax players
    #[arg(short, long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: usize,

    /// Seed for random players, drawn from the OS when not given
    #[arg(long)]
    seed: Option<u64>,

    /// Log search diagnostics (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play many games of minimax against a random player and report the results
    Arena {
        /// Number of games to play
        #[arg(short, long, default_value_t = 100)]
        games: usize,

        /// Search depth of the minimax player
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_DEPTH)]
        depth: usize,

        /// Base seed of the random player
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Controller {
    Human,
    Minimax,
    Random,
}

fn build_policy(
    controller: Controller,
    player: Player,
    depth: usize,
    seed: Option<u64>,
) -> Option<Box<dyn Policy>> {
    match controller {
        Controller::Human => None,
        Controller::Minimax => Some(Box::new(MinimaxSearch::new(player).with_depth(depth))),
        Controller::Random => Some(match seed {
            Some(seed) => Box::new(RandomMover::seeded(player, seed)) as Box<dyn Policy>,
            None => Box::new(RandomMover::new(player, rand::rng())),
        }),
    }
}

fn read_human_move<R: BufRead>(input: &mut R, state: &GameState) -> Result<Option<Position>> {
    print!("Move input > ");
    stdout().flush()?;
    let mut input_str = String::new();
    if input.read_line(&mut input_str)? == 0 {
        return Err(anyhow!("input closed before the game finished"));
    }

    match input_str.trim().parse::<Position>() {
        Err(err) => {
            println!("{}", err);
            Ok(None)
        }
        Ok(position) if !state.is_legal(position) => {
            let moves: Vec<String> = state
                .available_moves()
                .iter()
                .map(|(position, _)| position.to_string())
                .collect();
            println!(
                "Invalid move, {} is not available. Choose one of: {}",
                position,
                moves.join(" ")
            );
            Ok(None)
        }
        Ok(position) => Ok(Some(position)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Some(Command::Arena { games, depth, seed }) = cli.command {
        let report = Arena::new(seed)
            .with_depth(depth)
            .with_progress(true)
            .run(games)?;
        println!(
            "Minimax won {} of {} games ({} as Black, {} as White), random won {}, {} drawn",
            report.minimax_wins,
            report.games,
            report.minimax_wins_by_colour.0,
            report.minimax_wins_by_colour.1,
            report.random_wins,
            report.draws
        );
        return Ok(());
    }

    let mut black = build_policy(cli.black, Player::Black, cli.depth, cli.seed);
    // offset the seed so two random players do not mirror each other
    let mut white = build_policy(
        cli.white,
        Player::White,
        cli.depth,
        cli.seed.map(|seed| seed.wrapping_add(1)),
    );
    let ai_players = (black.is_some(), white.is_some());

    println!("Welcome to Othello\n");
    let mut state = GameState::new();

    // game loop
    while !state.game_over() {
        display(&state)?;

        let mover = state.current_player();
        let policy = if mover == Player::Black {
            black.as_mut()
        } else {
            white.as_mut()
        };

        let next_move = match policy {
            // AI player
            Some(policy) => {
                println!("AI is thinking...");
                stdout().flush()?;

                // slow down play if both players are AI
                if ai_players == (true, true) {
                    std::thread::sleep(std::time::Duration::from_millis(500));
                }

                match policy.choose_move(&state) {
                    Some(position) => position,
                    None => {
                        println!("{} could not find a move", mover);
                        break;
                    }
                }
            }
            // human player
            None => match read_human_move(&mut stdin().lock(), &state)? {
                Some(position) => position,
                // try the move again
                None => continue,
            },
        };

        let info = match state.make_move(next_move) {
            Ok(info) => info,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };
        println!(
            "{} played {}, flipping {}",
            info.player,
            info.position,
            info.out_flanked.len()
        );
        if state.current_player() == info.player {
            println!("{} has no moves and must pass", info.player.opponent());
        }
    }

    // end state
    display(&state)?;
    info!(
        "final score {} - {}",
        state.disk_count(Player::Black),
        state.disk_count(Player::White)
    );
    match state.winner() {
        Player::None if state.game_over() => println!("Draw!"),
        Player::None => {}
        winner => println!("{} wins!", winner),
    }
    Ok(())
}
