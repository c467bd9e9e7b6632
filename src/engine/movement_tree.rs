// Lookahead over the ball's own bounces within a single turn.
//
// Each tree node owns a private copy of the board. Expanding a node adds one
// subtree per available move; a subtree is expanded further only when its
// move was safe and the ball can keep bouncing from there. The opponent's
// replies are never explored. Planning uses `search`, which only follows the
// branch the strategy picks; full expansion is exponential on crowded boards.

use crate::error::EngineError;

use super::board::SoccerBoard;
use super::config::LINK_COUNT;
use super::strategy::SoccerStrategy;

pub struct MovementTree {
    board: SoccerBoard,
    safe_moves: Vec<(usize, usize)>,
    subtrees: Vec<MovementTree>,
}

impl MovementTree {
    /// Wrap a board without exploring it.
    pub fn new(board: SoccerBoard) -> Self {
        let safe_moves = Self::safe_moves_of(&board);
        MovementTree {
            board,
            safe_moves,
            subtrees: Vec::new(),
        }
    }

    /// Wrap a board and explore every bounce chain reachable from it.
    pub fn build(board: SoccerBoard) -> Self {
        let mut tree = Self::new(board);
        tree.expand();
        tree
    }

    /// A move is safe when the destination keeps at least one free link after
    /// the ball arrives and does not lie on the outer rows or columns.
    pub fn is_safe_move(board: &SoccerBoard, (row, col): (usize, usize)) -> bool {
        !SoccerBoard::is_on_border(row, col) && board.node(row, col).link_count() + 1 < LINK_COUNT
    }

    /// Available moves from the board's ball position that are safe.
    pub fn safe_moves_of(board: &SoccerBoard) -> Vec<(usize, usize)> {
        board
            .available_moves()
            .into_iter()
            .filter(|&cell| Self::is_safe_move(board, cell))
            .collect()
    }

    /// Add a subtree for every available move and recurse into the ones
    /// that continue the turn.
    pub fn expand(&mut self) {
        for (row, col) in self.board.available_moves() {
            let mut board = self.board.clone();
            let Ok(true) = board.apply_move(row, col) else {
                continue;
            };

            let mut subtree = MovementTree::new(board);
            if Self::continues(Self::is_safe_move(&self.board, (row, col)), &subtree.board) {
                subtree.expand();
            }
            self.subtrees.push(subtree);
        }
    }

    /// Whether the ball keeps bouncing after a move that landed on `board`.
    fn continues(was_safe: bool, board: &SoccerBoard) -> bool {
        was_safe
            && !Self::safe_moves_of(board).is_empty()
            // Entering a cell through its only link ends the turn
            && board.current_node().link_count() != 1
    }

    /// Walk the strategy's path from `board` without building the rest of
    /// the tree.
    ///
    /// Gives the same moves as `build` followed by `walk`, but only the
    /// nodes on the chosen path are ever created.
    pub fn search(
        board: &SoccerBoard,
        strategy: &dyn SoccerStrategy,
    ) -> Result<Vec<(usize, usize)>, EngineError> {
        let mut board = board.clone();
        let mut moves = Vec::new();
        loop {
            let available = board.available_moves();
            if available.is_empty() {
                break;
            }
            let (row, col) = strategy.select_move(&board);
            if !available.contains(&(row, col)) {
                return Err(EngineError::InternalInconsistency { row, col });
            }

            let was_safe = Self::is_safe_move(&board, (row, col));
            board.apply_move(row, col)?;
            moves.push((row, col));
            if !Self::continues(was_safe, &board) {
                break;
            }
        }
        Ok(moves)
    }

    pub fn board(&self) -> &SoccerBoard {
        &self.board
    }

    pub fn safe_moves(&self) -> &[(usize, usize)] {
        &self.safe_moves
    }

    pub fn subtrees(&self) -> &[MovementTree] {
        &self.subtrees
    }

    pub fn is_leaf(&self) -> bool {
        self.subtrees.is_empty()
    }

    /// Total number of nodes in the tree, including the root.
    pub fn size(&self) -> usize {
        1 + self.subtrees.iter().map(MovementTree::size).sum::<usize>()
    }

    /// Length of the longest bounce chain in the tree.
    pub fn depth(&self) -> usize {
        self.subtrees
            .iter()
            .map(|s| s.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Follow the strategy's choices from the root down to a leaf and return
    /// the cells visited, in order.
    pub fn walk(&self, strategy: &dyn SoccerStrategy) -> Result<Vec<(usize, usize)>, EngineError> {
        let mut node = self;
        let mut moves = Vec::new();
        while !node.is_leaf() {
            let (row, col) = strategy.select_move(&node.board);
            node = node
                .subtrees
                .iter()
                .find(|subtree| subtree.board.current() == (row, col))
                .ok_or(EngineError::InternalInconsistency { row, col })?;
            moves.push((row, col));
        }
        Ok(moves)
    }
}
