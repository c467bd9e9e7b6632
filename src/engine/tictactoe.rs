use rand::seq::SliceRandom;

use crate::error::EngineError;

use super::config::BLANK_FIELD;

/// A square tic-tac-toe board. Each field holds `BLANK_FIELD` or the token of
/// the player who marked it.
#[derive(Clone, Debug)]
pub struct TicTacToeBoard {
    pub size: usize,
    fields: Vec<u8>,
}

impl TicTacToeBoard {
    pub fn new(size: usize) -> Self {
        TicTacToeBoard {
            size,
            fields: vec![BLANK_FIELD; size * size],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.size && col < self.size {
            Some(self.fields[row * self.size + col])
        } else {
            None
        }
    }

    /// Store a player's token in a field. Marking an already marked field
    /// overwrites it; the game server is authoritative.
    pub fn mark(&mut self, row: usize, col: usize, token: u8) -> Result<(), EngineError> {
        if row >= self.size || col >= self.size {
            return Err(EngineError::FieldOutOfBoard {
                row,
                col,
                size: self.size,
            });
        }
        self.fields[row * self.size + col] = token;
        Ok(())
    }

    /// Blank fields as `(row, col)`, row by row.
    pub fn free_fields(&self) -> Vec<(usize, usize)> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, &token)| token == BLANK_FIELD)
            .map(|(i, _)| (i / self.size, i % self.size))
            .collect()
    }

    /// A uniformly random blank field, or None if the board is full.
    pub fn random_free_field(&self) -> Option<(usize, usize)> {
        self.free_fields().choose(&mut rand::thread_rng()).copied()
    }
}
