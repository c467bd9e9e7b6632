// Move selection policies used to walk the movement tree.

use super::board::SoccerBoard;
use super::config::{BOARD_HEIGHT, MID_COL};

/// Picks the next cell for the ball among the board's available moves.
///
/// Implementations must return one of `board.available_moves()`; the
/// movement tree has a subtree for each of them and nothing else. Callers
/// only ask when at least one move is available.
pub trait SoccerStrategy {
    fn select_move(&self, board: &SoccerBoard) -> (usize, usize);
}

/// Drives the ball straight at the southern goal.
///
/// Candidates are ranked by distance to the far goal line, then distance
/// from the central column, then by how many links the candidate cell
/// already has. Fewer links leave more options open for later bounces.
#[derive(Debug, Clone, Copy, Default)]
pub struct PushingStrategy;

impl PushingStrategy {
    fn rank(board: &SoccerBoard, (row, col): (usize, usize)) -> (usize, usize, usize) {
        (
            BOARD_HEIGHT - row,
            MID_COL.abs_diff(col),
            board.node(row, col).link_count(),
        )
    }
}

impl SoccerStrategy for PushingStrategy {
    fn select_move(&self, board: &SoccerBoard) -> (usize, usize) {
        let available = board.available_moves();
        debug_assert!(!available.is_empty(), "no available moves from {:?}", board.current());
        // min_by_key keeps the first of equal candidates, i.e. compass order
        available
            .into_iter()
            .min_by_key(|&cell| Self::rank(board, cell))
            .unwrap_or_else(|| board.current())
    }
}
