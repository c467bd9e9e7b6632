// Pitch geometry for the soccer board.

/// Index of the last row; the pitch spans rows `0..=BOARD_HEIGHT`.
pub const BOARD_HEIGHT: usize = 12;
/// Index of the last column; the pitch spans columns `0..=BOARD_WIDTH`.
pub const BOARD_WIDTH: usize = 10;
/// Width of each goal mouth, in cells.
pub const GATE_WIDTH: usize = 2;

pub const BOARD_ROWS: usize = BOARD_HEIGHT + 1;
pub const BOARD_COLS: usize = BOARD_WIDTH + 1;

// round(H / 2), round(W / 2), round(GATE_WIDTH / 2) for even sizes
pub const MID_ROW: usize = (BOARD_HEIGHT + 1) / 2;
pub const MID_COL: usize = (BOARD_WIDTH + 1) / 2;
pub const GATE_HALF_WIDTH: usize = (GATE_WIDTH + 1) / 2;

/// Number of compass directions a node can link to.
pub const LINK_COUNT: usize = 8;

// Tic-tac-toe board sizes
pub const TICTACTOE_SIZE: usize = 3;
pub const TICTACTOE_EXTENDED_SIZE: usize = 14;

/// Token value of an unmarked tic-tac-toe field.
pub const BLANK_FIELD: u8 = 0;
/// Stored for a marked field when the server omits the player token.
pub const UNKNOWN_TOKEN: u8 = u8::MAX;
