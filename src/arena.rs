//! Playing full games between two policies

use anyhow::{anyhow, Result};
use indicatif::*;
use rayon::prelude::*;
use tracing::{debug, info};

use std::time::Instant;

use crate::{
    game_state::GameState, random_mover::RandomMover, solver::MinimaxSearch, Player, Policy,
    DEFAULT_SEARCH_DEPTH,
};

/// The result of a finished game
#[derive(Clone, Debug)]
pub struct GameOutcome {
    pub final_state: GameState,
    pub num_moves: usize,
    /// Number of times a player had no move and the turn came straight back
    pub passes: usize,
}

impl GameOutcome {
    pub fn winner(&self) -> Player {
        self.final_state.winner()
    }
}

/// Plays a game from the opening position to the end
///
/// Fails if a policy is asked to move for the wrong colour, returns no move
/// while moves are available, or returns an illegal move.
pub fn play_game(black: &mut dyn Policy, white: &mut dyn Policy) -> Result<GameOutcome> {
    if black.player() != Player::Black || white.player() != Player::White {
        return Err(anyhow!(
            "policies are bound to {} and {}, expected Black and White",
            black.player(),
            white.player()
        ));
    }

    let mut state = GameState::new();
    let mut num_moves = 0;
    let mut passes = 0;

    while !state.game_over() {
        let mover = state.current_player();
        let choice = if mover == Player::Black {
            black.choose_move(&state)
        } else {
            white.choose_move(&state)
        };
        let position =
            choice.ok_or_else(|| anyhow!("{} returned no move with moves available", mover))?;
        let info = state.make_move(position)?;
        num_moves += 1;

        if state.current_player() == info.player {
            passes += 1;
            debug!("{} has no move and passes", info.player.opponent());
        }
    }

    debug!(
        "game over after {} moves, {} {} - {} {}",
        num_moves,
        Player::Black,
        state.disk_count(Player::Black),
        state.disk_count(Player::White),
        Player::White
    );
    Ok(GameOutcome {
        final_state: state,
        num_moves,
        passes,
    })
}

/// Tally of an arena run, from the minimax agent's point of view
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct ArenaReport {
    pub games: usize,
    pub minimax_wins: usize,
    pub random_wins: usize,
    pub draws: usize,
    /// Minimax wins when playing Black, then when playing White
    pub minimax_wins_by_colour: (usize, usize),
}

impl ArenaReport {
    fn record(&mut self, minimax_colour: Player, winner: Player) {
        self.games += 1;
        if winner == Player::None {
            self.draws += 1;
        } else if winner == minimax_colour {
            self.minimax_wins += 1;
            match minimax_colour {
                Player::Black => self.minimax_wins_by_colour.0 += 1,
                _ => self.minimax_wins_by_colour.1 += 1,
            }
        } else {
            self.random_wins += 1;
        }
    }
}

/// Plays many independent games of `MinimaxSearch` against `RandomMover`
///
/// Games run in parallel, but every game owns its own position and agents,
/// so each search is still single threaded. The minimax agent plays Black in
/// even-numbered games and White in odd-numbered ones, and game `i` seeds its
/// random agent with `seed + i` (wrapping), so a run is reproducible.
pub struct Arena {
    depth: usize,
    seed: u64,
    show_progress: bool,
}

impl Arena {
    pub fn new(seed: u64) -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
            seed,
            show_progress: false,
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Draws a progress bar on stderr while games are running
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn play_one(&self, game: usize) -> Result<(Player, Player)> {
        let minimax_colour = if game % 2 == 0 {
            Player::Black
        } else {
            Player::White
        };
        let mut search = MinimaxSearch::new(minimax_colour).with_depth(self.depth);
        let mut random = RandomMover::seeded(
            minimax_colour.opponent(),
            self.seed.wrapping_add(game as u64),
        );

        let outcome = if minimax_colour == Player::Black {
            play_game(&mut search, &mut random)?
        } else {
            play_game(&mut random, &mut search)?
        };
        Ok((minimax_colour, outcome.winner()))
    }

    pub fn run(&self, games: usize) -> Result<ArenaReport> {
        let start = Instant::now();

        let progress = if self.show_progress {
            ProgressBar::new(games as u64)
        } else {
            ProgressBar::hidden()
        };
        progress.set_style(
            ProgressStyle::default_bar()
                .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
                .progress_chars("█▓▒░  "),
        );

        let results = (0..games)
            .into_par_iter()
            .map(|game| {
                let result = self.play_one(game);
                progress.inc(1);
                result
            })
            .collect::<Result<Vec<_>>>()?;
        progress.finish();

        let mut report = ArenaReport::default();
        for (minimax_colour, winner) in results {
            report.record(minimax_colour, winner);
        }

        info!(
            "{} games played in {}: minimax {} / random {} / drawn {}",
            report.games,
            HumanDuration(Instant::now() - start),
            report.minimax_wins,
            report.random_wins,
            report.draws
        );
        Ok(report)
    }
}
