//! A computer opponent for the board game 'Othello' (also known as 'Reversi')
//!
//! The crate contains the full rules engine for the standard 8x8 game
//! (legal-move discovery, disk flipping, passing and game end) and a
//! depth-limited minimax agent with alpha-beta pruning over a weighted
//! positional heuristic.
//!
//! # Basic Usage
//!
//! ```
//! use othello_ai::{game_state::GameState, solver::MinimaxSearch, Policy, Player};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut state = GameState::new();
//! let mut search = MinimaxSearch::new(Player::Black);
//!
//! let best_move = search.choose_move(&state).expect("the opening always has moves");
//! let info = state.make_move(best_move)?;
//!
//! assert_eq!(info.out_flanked.len(), 1);
//! assert_eq!(state.current_player(), Player::White);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod position;

pub mod game_state;

pub mod evaluator;

pub mod solver;

pub mod random_mover;

pub mod arena;


pub use position::{Player, Position};
pub use solver::Policy;

/// The number of rows on the game board
pub const ROWS: usize = 8;

/// The number of columns on the game board
pub const COLUMNS: usize = 8;

/// The search depth used by `MinimaxSearch` unless configured otherwise
pub const DEFAULT_SEARCH_DEPTH: usize = 3;

// the position codec packs a cell into a single byte
const_assert!(ROWS * COLUMNS <= u8::MAX as usize);
// the standard opening needs a centre of four cells
const_assert!(ROWS % 2 == 0 && COLUMNS % 2 == 0 && ROWS >= 4 && COLUMNS >= 4);
