//! A minimax agent to play Othello

use tracing::debug;

use crate::{evaluator, game_state::GameState, Player, Position, DEFAULT_SEARCH_DEPTH};

/// Anything that can pick a move for one side of the board
pub trait Policy {
    /// The side this policy plays
    fn player(&self) -> Player;

    /// Picks one of the available moves of `state`, or `None` if there are none
    fn choose_move(&mut self, state: &GameState) -> Option<Position>;
}

/// A depth-limited minimax agent with alpha-beta pruning
///
/// # Notes
/// Each candidate move is played on a clone of the position, so sibling
/// branches never share state. The search always runs to its configured
/// depth or to the end of the game; any time limit belongs to the caller.
///
/// # Position Scoring
/// Leaves are scored with [`evaluator::score`] from the point of view of
/// whoever is to move in that leaf, not of the searching player. A side left
/// without moves inside the tree (only possible for positions that were not
/// reached through `make_move`, as passing is resolved there) yields the
/// unevaluated `i32::MIN`/`i32::MAX` starting value of its node.
#[derive(Clone, Debug)]
pub struct MinimaxSearch {
    player: Player,
    max_depth: usize,

    /// The number of nodes searched by this `MinimaxSearch` so far (for diagnostics only)
    pub node_count: usize,
}

impl MinimaxSearch {
    /// Creates a new `MinimaxSearch` for `player` with the default depth
    pub fn new(player: Player) -> Self {
        Self {
            player,
            max_depth: DEFAULT_SEARCH_DEPTH,
            node_count: 0,
        }
    }

    /// Sets the number of plies searched below each candidate move
    pub fn with_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Scores every available move of `state` in table order
    pub fn move_scores(&mut self, state: &GameState) -> Vec<(Position, i32)> {
        (0..state.available_moves().len())
            .map(|index| {
                let mut next = state.clone();
                let info = next.play(index);
                // the mover has already acted, so the search continues on the opponent's ply
                let score = self.minimax(&next, 0, i32::MIN, i32::MAX, false);
                (info.position, score)
            })
            .collect()
    }

    /// Performs game tree search
    ///
    /// Returns the evaluation of the best line below `state`, as seen from
    /// the player to move at the leaf it ends on.
    pub fn minimax(
        &mut self,
        state: &GameState,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.node_count += 1;

        if depth == self.max_depth || state.game_over() {
            return evaluator::score(state);
        }

        if maximizing {
            let mut best = i32::MIN;
            for index in 0..state.available_moves().len() {
                let mut next = state.clone();
                next.play(index);

                let value = self.minimax(&next, depth + 1, alpha, beta, false);
                best = best.max(value);
                alpha = alpha.max(best);
                // beta cutoff
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for index in 0..state.available_moves().len() {
                let mut next = state.clone();
                next.play(index);

                let value = self.minimax(&next, depth + 1, alpha, beta, true);
                best = best.min(value);
                beta = beta.min(best);
                // alpha cutoff
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

impl Policy for MinimaxSearch {
    fn player(&self) -> Player {
        self.player
    }

    /// Returns the first move, in row-major order, with the highest score
    fn choose_move(&mut self, state: &GameState) -> Option<Position> {
        let start_count = self.node_count;
        let mut highest_score = i32::MIN;
        let mut best_move = None;

        for (position, score) in self.move_scores(state) {
            if score > highest_score {
                highest_score = score;
                best_move = Some(position);
            }
        }

        match best_move {
            Some(position) => debug!(
                "{} chose {} with score {} after {} nodes",
                self.player,
                position,
                highest_score,
                self.node_count - start_count
            ),
            None => debug!("{} found no move to play", self.player),
        }
        best_move
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn depth_zero_is_the_evaluation() -> Result<()> {
        let state = GameState::from_moves("d3c5")?;
        let mut search = MinimaxSearch::new(Player::Black).with_depth(0);
        let expected = evaluator::score(&state);

        assert_eq!(search.minimax(&state, 0, i32::MIN, i32::MAX, true), expected);
        assert_eq!(search.minimax(&state, 0, i32::MIN, i32::MAX, false), expected);
        assert_eq!(search.node_count, 2);
        Ok(())
    }

    #[test]
    fn depth_one_picks_the_best_reply() -> Result<()> {
        let state = GameState::from_moves("d3")?;
        let mut search = MinimaxSearch::new(Player::White).with_depth(1);

        let children: Vec<i32> = (0..state.available_moves().len())
            .map(|index| {
                let mut next = state.clone();
                next.play(index);
                evaluator::score(&next)
            })
            .collect();

        let max = search.minimax(&state, 0, i32::MIN, i32::MAX, true);
        let min = search.minimax(&state, 0, i32::MIN, i32::MAX, false);
        assert_eq!(Some(&max), children.iter().max());
        assert_eq!(Some(&min), children.iter().min());
        Ok(())
    }

    #[test]
    fn choose_move_prefers_first_of_equal_scores() -> Result<()> {
        // the opening is symmetric, so all four replies score the same
        let state = GameState::new();
        let mut search = MinimaxSearch::new(Player::Black);
        let scores = search.move_scores(&state);
        assert_eq!(scores.len(), 4);
        assert!(scores.iter().all(|&(_, score)| score == scores[0].1));

        assert_eq!(search.choose_move(&state), Some(Position::new(2, 3)));
        Ok(())
    }

    #[test]
    fn choose_move_matches_best_score() -> Result<()> {
        let state = GameState::from_moves("d3c5f6f5")?;
        let mut search = MinimaxSearch::new(state.current_player());
        let scores = search.move_scores(&state);
        let best = scores.iter().map(|&(_, score)| score).max();
        let first_best = scores
            .iter()
            .find(|&&(_, score)| Some(score) == best)
            .map(|&(position, _)| position);

        assert_eq!(search.choose_move(&state), first_best);
        Ok(())
    }

    #[test]
    fn search_does_not_touch_the_position() -> Result<()> {
        let state = GameState::from_moves("d3c5f6")?;
        let before = state.clone();
        let mut search = MinimaxSearch::new(state.current_player());
        search.choose_move(&state);
        assert_eq!(state, before);
        assert!(search.node_count > 0);
        Ok(())
    }
}
