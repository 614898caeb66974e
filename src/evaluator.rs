//! Static evaluation of a position
//!
//! Every term is scored from the point of view of the player whose turn it
//! is in the evaluated state, against the other colour.

use crate::{game_state::GameState, Player, Position};

pub const MOBILITY_WEIGHT: i32 = 3;
pub const COIN_PARITY_WEIGHT: i32 = 2;
pub const CORNERS_WEIGHT: i32 = 10;
pub const STABILITY_WEIGHT: i32 = 10;

/// Weighted sum of mobility, coin parity, corners and stability
pub fn score(state: &GameState) -> i32 {
    MOBILITY_WEIGHT * mobility(state)
        + COIN_PARITY_WEIGHT * coin_parity(state)
        + CORNERS_WEIGHT * corners(state)
        + STABILITY_WEIGHT * stability(state)
}

// The side being scored against. A finished game has `Player::None` to
// move and is scored against Black.
fn rival(player: Player) -> Player {
    if player == Player::Black {
        Player::White
    } else {
        Player::Black
    }
}

/// Difference in the number of legal moves
pub fn mobility(state: &GameState) -> i32 {
    let own = state.available_moves().len() as i32;
    let other = state
        .legal_moves_for(state.current_player().opponent())
        .len() as i32;
    own - other
}

/// Difference in the number of disks
pub fn coin_parity(state: &GameState) -> i32 {
    let player = state.current_player();
    state.disk_count(player) as i32 - state.disk_count(rival(player)) as i32
}

/// Difference in the number of corners held
pub fn corners(state: &GameState) -> i32 {
    let player = state.current_player();
    count_corners(state, player) - count_corners(state, rival(player))
}

fn count_corners(state: &GameState, player: Player) -> i32 {
    Position::CORNERS
        .iter()
        .filter(|&&corner| state.cell(corner) == player)
        .count() as i32
}

/// Positional stability of the current player's disks only
///
/// Each disk is worth 1, an edge disk 2 and a corner disk 5. The opponent's
/// disks are not subtracted.
pub fn stability(state: &GameState) -> i32 {
    let player = state.current_player();
    state
        .occupied_positions()
        .filter(|&position| state.cell(position) == player)
        .map(|position| {
            let mut value = 1;
            if position.is_edge() {
                value += 1;
            }
            if position.is_corner() {
                value += 3;
            }
            value
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn opening_position() {
        let state = GameState::new();
        assert_eq!(mobility(&state), 0);
        assert_eq!(coin_parity(&state), 0);
        assert_eq!(corners(&state), 0);
        assert_eq!(stability(&state), 2);
        assert_eq!(score(&state), 20);
    }

    #[test]
    fn after_first_move() -> Result<()> {
        // black d3 flips d4, white is to move with 1 disk against 4
        let state = GameState::from_moves("d3")?;
        assert_eq!(state.current_player(), Player::White);
        assert_eq!(coin_parity(&state), -3);
        assert_eq!(stability(&state), 1);
        assert_eq!(corners(&state), 0);
        // c3, e3, c5 against f5, e6, f6
        assert_eq!(mobility(&state), 0);
        assert_eq!(score(&state), 2 * -3 + 10 * 1);
        Ok(())
    }

    #[test]
    fn evaluation_leaves_the_state_alone() {
        let state = GameState::new();
        let before = state.clone();
        let _ = score(&state);
        assert_eq!(state, before);
    }
}
