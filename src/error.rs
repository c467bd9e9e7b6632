// Error types for the board engine and game sessions.

use thiserror::Error;

/// Failures raised by the board model and the move search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid move from ({from_row}, {from_col}) to ({to_row}, {to_col})")]
    InvalidMove {
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    },

    #[error("field ({row}, {col}) is outside a {size}x{size} board")]
    FieldOutOfBoard { row: usize, col: usize, size: usize },

    #[error("no subtree ends at ({row}, {col})")]
    InternalInconsistency { row: usize, col: usize },
}

/// Failures raised while running a game session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("invalid game server url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("turn computation failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("timed out connecting to {url}")]
    ConnectTimeout { url: String },

    #[error("malformed event: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error("invalid field index '{value}'")]
    InvalidIndex { value: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}
