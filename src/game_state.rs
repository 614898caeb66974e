//! The rules engine: board, disk counts, turn order and legal moves

use anyhow::{anyhow, Result};
use tracing::trace;

use crate::{Player, Position, COLUMNS, ROWS};

/// The 8 compass directions as (row, column) steps
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub type Board = [[Player; COLUMNS]; ROWS];

/// Legal moves of one player in row-major order, each with the disks it out-flanks
pub type MoveTable = Vec<(Position, Vec<Position>)>;

/// What a single move did to the board
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MovementInfo {
    pub player: Player,
    pub position: Position,
    pub out_flanked: Vec<Position>,
}

/// A complete game position
///
/// # Notes
/// The table of available moves always belongs to the current player and is
/// rebuilt from scratch on every change of turn. Cloning performs a deep copy,
/// so a clone can be played forward without touching the original.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GameState {
    board: Board,
    // indexed by `Player::index`, the `None` slot stays at zero
    disk_count: [usize; 3],
    current_player: Player,
    available_moves: MoveTable,
    game_over: bool,
    winner: Player,
}

impl GameState {
    /// Creates the standard opening position with Black to move
    pub fn new() -> Self {
        let mut board = [[Player::None; COLUMNS]; ROWS];
        let (r, c) = (ROWS / 2 - 1, COLUMNS / 2 - 1);
        board[r][c] = Player::White;
        board[r][c + 1] = Player::Black;
        board[r + 1][c] = Player::Black;
        board[r + 1][c + 1] = Player::White;

        let mut state = Self {
            board,
            disk_count: [0, 2, 2],
            current_player: Player::Black,
            available_moves: Vec::new(),
            game_over: false,
            winner: Player::None,
        };
        state.available_moves = state.legal_moves_for(Player::Black);
        state
    }

    /// Sets up an arbitrary position with `to_move` to play
    ///
    /// Disk counts and the available moves are derived from the board. Passing
    /// and the end of the game are only detected when the next move is made,
    /// so a position where `to_move` is stuck is accepted as it is.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let mut disk_count = [0; 3];
        for cell in board.iter().flatten() {
            if *cell != Player::None {
                disk_count[cell.index()] += 1;
            }
        }
        let mut state = Self {
            board,
            disk_count,
            current_player: to_move,
            available_moves: Vec::new(),
            game_over: false,
            winner: Player::None,
        };
        state.available_moves = state.legal_moves_for(to_move);
        state
    }

    /// Plays a sequence of moves in algebraic notation from the opening, e.g. "d3c5"
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut state = Self::new();
        let moves = moves.as_ref();
        let chars: Vec<char> = moves.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() % 2 != 0 {
            return Err(anyhow!("could not parse '{}' as a list of moves", moves));
        }
        for pair in chars.chunks(2) {
            let token: String = pair.iter().collect();
            let position = token.parse::<Position>()?;
            state.make_move(position)?;
        }
        Ok(state)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, position: Position) -> Player {
        self.board[position.row()][position.col()]
    }

    pub fn disk_count(&self, player: Player) -> usize {
        self.disk_count[player.index()]
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// The legal moves of the current player, in row-major order
    pub fn available_moves(&self) -> &[(Position, Vec<Position>)] {
        &self.available_moves
    }

    /// The disks a move at `position` would flip, if it is legal
    pub fn flanked(&self, position: Position) -> Option<&[Position]> {
        self.available_moves
            .iter()
            .find(|(candidate, _)| *candidate == position)
            .map(|(_, flanked)| flanked.as_slice())
    }

    pub fn is_legal(&self, position: Position) -> bool {
        self.flanked(position).is_some()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// The player with more disks once the game is over, `Player::None` for a
    /// draw or an unfinished game
    pub fn winner(&self) -> Player {
        self.winner
    }

    /// Plays a move for the current player
    ///
    /// Returns what the move did, or an error without modifying the state if
    /// the position is not one of the available moves.
    pub fn make_move(&mut self, position: Position) -> Result<MovementInfo> {
        match self
            .available_moves
            .iter()
            .position(|(candidate, _)| *candidate == position)
        {
            Some(index) => Ok(self.play(index)),
            None => Err(anyhow!(
                "Invalid move, {} is not available to {}",
                position,
                self.current_player
            )),
        }
    }

    /// Plays the move at `index` of the available moves table
    ///
    /// The index must be in range. The search uses this on clones, whose
    /// tables are identical to their parent's.
    pub(crate) fn play(&mut self, index: usize) -> MovementInfo {
        let mover = self.current_player;
        // the table is rebuilt when the turn passes, so take it apart here
        let mut table = std::mem::take(&mut self.available_moves);
        let (position, out_flanked) = table.swap_remove(index);

        self.board[position.row()][position.col()] = mover;
        for flipped in out_flanked.iter() {
            self.board[flipped.row()][flipped.col()] = mover;
        }
        self.disk_count[mover.index()] += out_flanked.len() + 1;
        self.disk_count[mover.opponent().index()] -= out_flanked.len();

        trace!("{} played {}, flipping {}", mover, position, out_flanked.len());
        self.pass_turn();

        MovementInfo {
            player: mover,
            position,
            out_flanked,
        }
    }

    /// Hands the turn to the other player and rebuilds the available moves
    pub fn change_player(&mut self) {
        self.current_player = self.current_player.opponent();
        self.available_moves = self.legal_moves_for(self.current_player);
    }

    fn pass_turn(&mut self) {
        self.change_player();
        if !self.available_moves.is_empty() {
            return;
        }

        // the opponent has to pass
        self.change_player();
        if self.available_moves.is_empty() {
            self.current_player = Player::None;
            self.game_over = true;
            self.winner = self.find_winner();
        }
    }

    fn find_winner(&self) -> Player {
        let black = self.disk_count(Player::Black);
        let white = self.disk_count(Player::White);
        if black > white {
            Player::Black
        } else if white > black {
            Player::White
        } else {
            Player::None
        }
    }

    /// Iterates over every occupied cell in row-major order
    pub fn occupied_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(move |&position| self.cell(position) != Player::None)
    }

    /// Builds the table of legal moves `player` would have on the current board
    pub fn legal_moves_for(&self, player: Player) -> MoveTable {
        Position::all()
            .filter_map(|position| {
                self.out_flanked(position, player)
                    .map(|out_flanked| (position, out_flanked))
            })
            .collect()
    }

    /// Returns the disks out-flanked by `player` playing at `position`, or
    /// `None` if that is not a legal move
    fn out_flanked(&self, position: Position, player: Player) -> Option<Vec<Position>> {
        if player == Player::None || self.cell(position) != Player::None {
            return None;
        }
        let mut out_flanked = Vec::new();
        for &(dr, dc) in DIRECTIONS.iter() {
            self.out_flanked_directed(position, player, dr, dc, &mut out_flanked);
        }
        if out_flanked.is_empty() {
            None
        } else {
            Some(out_flanked)
        }
    }

    // appends the run of opponent disks in one direction, only if it is
    // closed off by one of the player's own disks
    fn out_flanked_directed(
        &self,
        position: Position,
        player: Player,
        dr: isize,
        dc: isize,
        out_flanked: &mut Vec<Position>,
    ) {
        let start = out_flanked.len();
        let opponent = player.opponent();
        let mut row = position.row() as isize + dr;
        let mut col = position.col() as isize + dc;

        while let Some(next) = Position::try_new(row, col) {
            let cell = self.cell(next);
            if cell == opponent {
                out_flanked.push(next);
                row += dr;
                col += dc;
            } else {
                if cell != player {
                    break;
                }
                return;
            }
        }
        out_flanked.truncate(start);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_position() {
        let state = GameState::new();
        assert_eq!(state.disk_count(Player::Black), 2);
        assert_eq!(state.disk_count(Player::White), 2);
        assert_eq!(state.disk_count(Player::None), 0);
        assert_eq!(state.current_player(), Player::Black);
        assert_eq!(state.cell(Position::new(3, 3)), Player::White);
        assert_eq!(state.cell(Position::new(3, 4)), Player::Black);
        assert_eq!(state.cell(Position::new(4, 3)), Player::Black);
        assert_eq!(state.cell(Position::new(4, 4)), Player::White);
        assert!(!state.game_over());

        let moves: Vec<Position> = state.available_moves().iter().map(|(p, _)| *p).collect();
        assert_eq!(
            moves,
            vec![
                Position::new(2, 3),
                Position::new(3, 2),
                Position::new(4, 5),
                Position::new(5, 4)
            ]
        );
        assert_eq!(state.flanked(Position::new(2, 3)), Some(&[Position::new(3, 3)][..]));
    }

    #[test]
    fn run_ending_at_the_edge_flips_nothing() {
        let mut board = [[Player::None; COLUMNS]; ROWS];
        board[0][1] = Player::White;
        board[0][2] = Player::White;
        let state = GameState::from_board(board, Player::Black);
        assert!(state.legal_moves_for(Player::Black).is_empty());
    }

    #[test]
    fn multiple_directions_are_combined() {
        let mut board = [[Player::None; COLUMNS]; ROWS];
        // a single black corner brackets three white neighbours
        board[0][0] = Player::Black;
        board[0][1] = Player::White;
        board[1][0] = Player::White;
        board[1][1] = Player::White;
        let state = GameState::from_board(board, Player::Black);
        let table = state.legal_moves_for(Player::Black);
        let moves: Vec<Position> = table.iter().map(|(p, _)| *p).collect();
        assert_eq!(
            moves,
            vec![Position::new(0, 2), Position::new(2, 0), Position::new(2, 2)]
        );
        assert_eq!(
            state.out_flanked(Position::new(2, 2), Player::Black),
            Some(vec![Position::new(1, 1)])
        );
    }

    #[test]
    fn run_blocked_by_a_gap_flips_nothing() {
        let mut board = [[Player::None; COLUMNS]; ROWS];
        board[3][0] = Player::Black;
        board[3][2] = Player::White;
        let state = GameState::from_board(board, Player::Black);
        assert_eq!(state.out_flanked(Position::new(3, 3), Player::Black), None);
        assert_eq!(state.out_flanked(Position::new(3, 1), Player::Black), None);
    }

    #[test]
    fn occupied_cells_are_not_moves() {
        let state = GameState::new();
        assert_eq!(state.out_flanked(Position::new(3, 3), Player::Black), None);
        assert_eq!(state.occupied_positions().count(), 4);
    }
}
