// Dispatch of server events to a game agent.

use crate::metrics;
use crate::protocol::{MakeMove, ServerEvent};

use super::agent::GameAgent;
use super::GameKind;

/// State of one game session, independent of the transport.
pub struct GameSession {
    kind: GameKind,
    game_id: String,
    client_id: Option<String>,
    agent: GameAgent,
}

impl GameSession {
    pub fn new(kind: GameKind, game_id: impl Into<String>) -> Self {
        Self::with_agent(kind, game_id, GameAgent::for_kind(kind))
    }

    pub fn with_agent(kind: GameKind, game_id: impl Into<String>, agent: GameAgent) -> Self {
        GameSession {
            kind,
            game_id: game_id.into(),
            client_id: None,
            agent,
        }
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    /// Identifier the server assigned to this client, once received.
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn agent(&self) -> &GameAgent {
        &self.agent
    }

    /// React to one event. Returns the move to send, if it is our turn.
    ///
    /// Moves the local board rejects are logged and skipped; the session
    /// keeps running.
    pub fn handle_event(&mut self, event: ServerEvent) -> Option<MakeMove> {
        match event {
            ServerEvent::GameId(id) => {
                if id != self.game_id {
                    tracing::warn!("Game {}: server reports game id {id}", self.game_id);
                    self.game_id = id;
                }
                None
            }
            ServerEvent::ClientId(id) => {
                tracing::info!("Game {}: playing as client {id}", self.game_id);
                self.client_id = Some(id);
                None
            }
            ServerEvent::NewMove(field) => {
                if let Err(e) = self.agent.record_move(&field) {
                    metrics::INVALID_MOVES_TOTAL.inc();
                    tracing::warn!("Game {}: {e}", self.game_id);
                }
                None
            }
            ServerEvent::CurrentPlayer(id) => {
                let Some(client_id) = self.client_id.as_deref() else {
                    tracing::warn!("Game {}: turn event before client id", self.game_id);
                    return None;
                };
                if id != client_id {
                    return None;
                }
                match self.agent.next_move() {
                    Some(cell) => Some(MakeMove::new(&self.game_id, cell)),
                    None => {
                        tracing::warn!("Game {}: no move to play", self.game_id);
                        None
                    }
                }
            }
            ServerEvent::Other {
                event_type,
                message,
            } => {
                tracing::debug!("Game {}: {event_type}: {message}", self.game_id);
                None
            }
        }
    }
}
