use serde::{Deserialize, Serialize};
use std::fmt;

pub mod protocol;

pub use protocol::{
    decode_intent, decode_state, encode_intent, encode_state, Intent, ProtocolError,
};

pub const BOARD_SIZE: usize = 9;
pub const BOARD_WIDTH: usize = 3;

/// Rows, columns, then diagonals. Scanned in order; the first uniform line wins.
pub const LINE_PATTERNS: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// A single square: empty, or claimed by one mark.
pub type Cell = Option<Mark>;

pub type Board = [Cell; BOARD_SIZE];

/// The complete shared game, exactly as it travels over the wire.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Board,
    pub current_player: Mark,
    pub winner: Option<Mark>,
    pub game_over: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: [None; BOARD_SIZE],
            current_player: Mark::X,
            winner: None,
            game_over: false,
        }
    }

    pub fn is_valid_move(&self, index: usize) -> bool {
        !self.game_over && matches!(self.board.get(index), Some(None))
    }

    /// Places the current mark at `index`.
    ///
    /// Returns false and leaves the state untouched when the game is over,
    /// the cell is taken, or the index is off the board.
    pub fn apply_move(&mut self, index: usize) -> bool {
        if !self.is_valid_move(index) {
            return false;
        }

        self.board[index] = Some(self.current_player);
        self.winner = check_winner(&self.board);
        self.game_over = self.winner.is_some() || is_board_full(&self.board);
        self.current_player = self.current_player.opponent();

        true
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_draw(&self) -> bool {
        self.game_over && self.winner.is_none()
    }

    pub fn empty_cells(&self) -> usize {
        self.board.iter().filter(|cell| cell.is_none()).count()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn check_winner(board: &Board) -> Option<Mark> {
    LINE_PATTERNS.iter().find_map(|&[a, b, c]| match board[a] {
        Some(mark) if board[b] == Some(mark) && board[c] == Some(mark) => Some(mark),
        _ => None,
    })
}

pub fn is_board_full(board: &Board) -> bool {
    board.iter().all(|cell| cell.is_some())
}
