// Game sessions: one websocket client per game the AI is asked to join.

pub mod agent;
pub mod handler;
pub mod registry;
pub mod runner;

use serde::Serialize;

/// The games the AI can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameKind {
    #[serde(rename = "tictactoe")]
    TicTacToe,
    #[serde(rename = "tictactoe_extended")]
    TicTacToeExtended,
    #[serde(rename = "soccer")]
    Soccer,
}

impl GameKind {
    /// Path segment of the game server endpoint, `/games/{segment}`.
    pub fn endpoint(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "tictactoe",
            GameKind::TicTacToeExtended => "tictactoenfields",
            GameKind::Soccer => "soccer",
        }
    }

    /// Label used in logs and metrics.
    pub fn label(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "tictactoe",
            GameKind::TicTacToeExtended => "tictactoe_extended",
            GameKind::Soccer => "soccer",
        }
    }
}
