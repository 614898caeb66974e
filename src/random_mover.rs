//! An agent that plays uniformly random legal moves

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::{game_state::GameState, solver::Policy, Player, Position};

/// An agent that picks uniformly among the available moves
///
/// # Notes
/// The random source is injected, so a seeded generator gives a reproducible
/// sequence of choices. The agent holds no other state.
pub struct RandomMover<R: Rng = StdRng> {
    player: Player,
    rng: R,
}

impl<R: Rng> RandomMover<R> {
    /// Creates a `RandomMover` for `player` drawing from `rng`
    pub fn new(player: Player, rng: R) -> Self {
        Self { player, rng }
    }
}

impl RandomMover<StdRng> {
    /// Creates a `RandomMover` with a reproducible random source
    pub fn seeded(player: Player, seed: u64) -> Self {
        Self::new(player, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Policy for RandomMover<R> {
    fn player(&self) -> Player {
        self.player
    }

    fn choose_move(&mut self, state: &GameState) -> Option<Position> {
        let moves = state.available_moves();
        if moves.is_empty() {
            return None;
        }
        let (position, _) = &moves[self.rng.random_range(0..moves.len())];
        debug!("{} picked {} at random", self.player, position);
        Some(*position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::collections::HashSet;

    #[test]
    fn only_legal_moves_are_picked() -> Result<()> {
        let state = GameState::from_moves("d3c5")?;
        let mut mover = RandomMover::seeded(state.current_player(), 7);
        for _ in 0..50 {
            let position = mover.choose_move(&state).expect("moves are available");
            assert!(state.is_legal(position));
        }
        Ok(())
    }

    #[test]
    fn every_move_is_reachable() {
        let state = GameState::new();
        let mut mover = RandomMover::seeded(Player::Black, 1);
        let picked: HashSet<Position> = (0..200).filter_map(|_| mover.choose_move(&state)).collect();
        assert_eq!(picked.len(), state.available_moves().len());
    }

    #[test]
    fn same_seed_same_choices() {
        let state = GameState::new();
        let mut first = RandomMover::seeded(Player::Black, 42);
        let mut second = RandomMover::seeded(Player::Black, 42);
        for _ in 0..20 {
            assert_eq!(first.choose_move(&state), second.choose_move(&state));
        }
    }
}
