use crate::error::EngineError;

use super::config::*;
use super::link::{Link, LinkSet};

/// A single point of the pitch grid and the links already drawn from it.
#[derive(Clone, Debug, Default)]
pub struct Node {
    links: LinkSet,
}

impl Node {
    pub fn has_link(&self, link: Link) -> bool {
        self.links.contains(link)
    }

    pub fn links(&self) -> LinkSet {
        self.links
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn has_any_free_link(&self) -> bool {
        !self.links.is_full()
    }
}

/// The paper-soccer pitch: a grid of nodes joined by drawn links, plus the
/// ball position.
///
/// Cells are addressed as `(row, col)` with `row` in `0..=BOARD_HEIGHT` and
/// `col` in `0..=BOARD_WIDTH`. Row 0 holds the northern goal mouth and row
/// `BOARD_HEIGHT` the southern one. Cloning a board deep-copies every node,
/// so a clone can be explored without touching the original.
#[derive(Clone, Debug)]
pub struct SoccerBoard {
    /// Flat array of nodes, indexed by row * BOARD_COLS + col.
    nodes: Vec<Node>,
    current: (usize, usize),
}

impl SoccerBoard {
    /// Create a pitch with its outline and goal mouths drawn and the ball on
    /// the centre spot.
    pub fn new() -> Self {
        let mut board = SoccerBoard {
            nodes: vec![Node::default(); BOARD_ROWS * BOARD_COLS],
            current: (MID_ROW, MID_COL),
        };
        board.draw_boundary();
        board
    }

    fn draw_boundary(&mut self) {
        use Link::*;

        let (h, w, mid, gate) = (BOARD_HEIGHT, BOARD_WIDTH, MID_COL, GATE_HALF_WIDTH);

        // Rear of each goal
        for i in 0..gate {
            for row in [0, h] {
                self.draw_link(row, mid - i, West);
                self.draw_link(row, mid + i, East);
            }
        }

        // Skews from the posts into the goal line
        self.draw_link(1, mid - gate, NorthWest);
        self.draw_link(1, mid + gate, NorthEast);
        self.draw_link(h - 1, mid - gate, SouthWest);
        self.draw_link(h - 1, mid + gate, SouthEast);

        // Goal sides
        self.draw_link(0, mid - 1, South);
        self.draw_link(0, mid + 1, South);
        self.draw_link(h, mid - 1, North);
        self.draw_link(h, mid + 1, North);

        // Touchlines
        for row in 1..h {
            for link in [North, NorthWest, West, SouthWest, South] {
                self.draw_link(row, 1, link);
            }
            for link in [North, NorthEast, East, SouthEast, South] {
                self.draw_link(row, w - 1, link);
            }
        }

        // End lines on both sides of each goal
        for i in 1..mid - gate {
            for link in [West, NorthWest, North, NorthEast, East] {
                self.draw_link(1, i, link);
                self.draw_link(1, w - i, link);
            }
            for link in [West, SouthWest, South, SouthEast, East] {
                self.draw_link(h - 1, i, link);
                self.draw_link(h - 1, w - i, link);
            }
        }
    }

    /// Current ball position as `(row, col)`.
    pub fn current(&self) -> (usize, usize) {
        self.current
    }

    /// Node at the given cell. Panics if the cell is off the grid.
    pub fn node(&self, row: usize, col: usize) -> &Node {
        &self.nodes[row * BOARD_COLS + col]
    }

    pub fn current_node(&self) -> &Node {
        self.node(self.current.0, self.current.1)
    }

    /// Check if a (possibly negative) cell index lies on the grid.
    pub fn is_on_board(row: i64, col: i64) -> bool {
        (0..=BOARD_HEIGHT as i64).contains(&row) && (0..=BOARD_WIDTH as i64).contains(&col)
    }

    /// Check if a cell lies on the outermost rows or columns of the grid.
    /// Reaching one of these ends the turn: it is either a goal or off the pitch.
    pub fn is_on_border(row: usize, col: usize) -> bool {
        row == 0 || row == BOARD_HEIGHT || col == 0 || col == BOARD_WIDTH
    }

    /// Neighbor of a cell in the given direction, if it lies on the grid.
    fn neighbor(row: usize, col: usize, link: Link) -> Option<(usize, usize)> {
        let (d_row, d_col) = link.delta();
        let (n_row, n_col) = (row as i64 + d_row, col as i64 + d_col);
        if Self::is_on_board(n_row, n_col) {
            Some((n_row as usize, n_col as usize))
        } else {
            None
        }
    }

    /// Draw a link from a cell and the opposite link from its neighbor.
    /// Returns false, leaving both nodes untouched, if the link already
    /// exists or the neighbor is off the grid.
    fn draw_link(&mut self, row: usize, col: usize, link: Link) -> bool {
        let Some((n_row, n_col)) = Self::neighbor(row, col, link) else {
            return false;
        };
        if !self.nodes[row * BOARD_COLS + col].links.insert(link) {
            return false;
        }
        self.nodes[n_row * BOARD_COLS + n_col]
            .links
            .insert(link.opposite());
        true
    }

    /// Cells the ball can move to from its current position, in canonical
    /// compass order (N, NE, E, SE, S, SW, W, NW).
    pub fn available_moves(&self) -> Vec<(usize, usize)> {
        let (row, col) = self.current;
        let node = self.current_node();
        Link::ALL
            .into_iter()
            .filter(|link| !node.has_link(*link))
            .filter_map(|link| Self::neighbor(row, col, link))
            .collect()
    }

    /// Move the ball to an adjacent cell, drawing the link between them.
    ///
    /// Returns `Ok(true)` if the ball moved and `Ok(false)` if that link was
    /// already drawn, in which case nothing changes. Targets that are not one
    /// of the 8 neighbors on the grid are rejected.
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<bool, EngineError> {
        let (cur_row, cur_col) = self.current;
        let invalid = EngineError::InvalidMove {
            from_row: cur_row,
            from_col: cur_col,
            to_row: row,
            to_col: col,
        };

        if !Self::is_on_board(row as i64, col as i64) {
            return Err(invalid);
        }
        let link = Link::from_delta(row as i64 - cur_row as i64, col as i64 - cur_col as i64)
            .ok_or(invalid)?;

        if !self.draw_link(cur_row, cur_col, link) {
            return Ok(false);
        }
        self.current = (row, col);
        Ok(true)
    }

    /// Whether the ball still has at least one undrawn direction.
    pub fn has_free_neighbor(&self) -> bool {
        self.current_node().has_any_free_link()
    }

    /// Iterate over all cells with their nodes, row by row.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| ((i / BOARD_COLS, i % BOARD_COLS), node))
    }
}

impl Default for SoccerBoard {
    fn default() -> Self {
        Self::new()
    }
}
