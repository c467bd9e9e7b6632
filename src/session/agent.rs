// Per-game playing state: the local board mirror and how the next move is chosen.

use std::collections::VecDeque;

use crate::engine::board::SoccerBoard;
use crate::engine::config::{TICTACTOE_EXTENDED_SIZE, TICTACTOE_SIZE, UNKNOWN_TOKEN};
use crate::engine::planner::plan_turn;
use crate::engine::strategy::{PushingStrategy, SoccerStrategy};
use crate::engine::tictactoe::TicTacToeBoard;
use crate::error::EngineError;
use crate::protocol::MarkedField;

use super::GameKind;

/// Tic-tac-toe player: marks a random blank field.
#[derive(Debug)]
pub struct TicTacToeAgent {
    board: TicTacToeBoard,
}

impl TicTacToeAgent {
    pub fn new(size: usize) -> Self {
        TicTacToeAgent {
            board: TicTacToeBoard::new(size),
        }
    }

    pub fn board(&self) -> &TicTacToeBoard {
        &self.board
    }

    pub fn record_move(&mut self, field: &MarkedField) -> Result<(), EngineError> {
        let token = field.token.unwrap_or(UNKNOWN_TOKEN);
        self.board.mark(field.row, field.col, token)
    }

    pub fn next_move(&mut self) -> Option<(usize, usize)> {
        self.board.random_free_field()
    }
}

/// Soccer player.
///
/// A turn may take several moves while the ball bounces. The whole turn is
/// planned when it starts and handed out one move per `current_player`
/// event. Each move the server reports is applied to the local board; the
/// remaining plan survives only while the reported moves are the ones this
/// agent sent.
pub struct SoccerAgent {
    board: SoccerBoard,
    strategy: Box<dyn SoccerStrategy + Send>,
    plan: VecDeque<(usize, usize)>,
    pending: Option<(usize, usize)>,
}

impl SoccerAgent {
    pub fn new() -> Self {
        Self::with_strategy(Box::new(PushingStrategy))
    }

    pub fn with_strategy(strategy: Box<dyn SoccerStrategy + Send>) -> Self {
        SoccerAgent {
            board: SoccerBoard::new(),
            strategy,
            plan: VecDeque::new(),
            pending: None,
        }
    }

    pub fn board(&self) -> &SoccerBoard {
        &self.board
    }

    /// Moves still queued for the current turn.
    pub fn planned(&self) -> impl Iterator<Item = &(usize, usize)> {
        self.plan.iter()
    }

    pub fn record_move(&mut self, field: &MarkedField) -> Result<(), EngineError> {
        let cell = (field.row, field.col);
        let result = self.board.apply_move(cell.0, cell.1);

        match self.pending.take() {
            Some(sent) if sent == cell && result.is_ok() => {}
            _ => {
                if !self.plan.is_empty() {
                    tracing::debug!("Dropping {} planned move(s) after {:?}", self.plan.len(), cell);
                    self.plan.clear();
                }
            }
        }
        result.map(|_| ())
    }

    pub fn next_move(&mut self) -> Option<(usize, usize)> {
        let available = self.board.available_moves();
        if self.plan.front().is_some_and(|m| !available.contains(m)) {
            tracing::debug!("Planned move {:?} is gone, replanning", self.plan.front());
            self.plan.clear();
        }
        if self.plan.is_empty() {
            self.plan = plan_turn(&self.board, self.strategy.as_ref()).into();
        }

        let next = self.plan.pop_front()?;
        self.pending = Some(next);
        Some(next)
    }
}

impl Default for SoccerAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// The agent matching a session's game kind.
pub enum GameAgent {
    TicTacToe(TicTacToeAgent),
    Soccer(SoccerAgent),
}

impl GameAgent {
    pub fn for_kind(kind: GameKind) -> Self {
        match kind {
            GameKind::TicTacToe => GameAgent::TicTacToe(TicTacToeAgent::new(TICTACTOE_SIZE)),
            GameKind::TicTacToeExtended => {
                GameAgent::TicTacToe(TicTacToeAgent::new(TICTACTOE_EXTENDED_SIZE))
            }
            GameKind::Soccer => GameAgent::Soccer(SoccerAgent::new()),
        }
    }

    /// Apply a move reported by the server to the local board.
    pub fn record_move(&mut self, field: &MarkedField) -> Result<(), EngineError> {
        match self {
            GameAgent::TicTacToe(agent) => agent.record_move(field),
            GameAgent::Soccer(agent) => agent.record_move(field),
        }
    }

    /// The cell to send when it is our turn, or None if there is nothing to play.
    pub fn next_move(&mut self) -> Option<(usize, usize)> {
        match self {
            GameAgent::TicTacToe(agent) => agent.next_move(),
            GameAgent::Soccer(agent) => agent.next_move(),
        }
    }
}
