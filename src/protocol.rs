// Wire format of the game server's websocket events.
//
// Every frame is a JSON envelope `{"eventType": ..., "eventMessage": ...}`.
// Inbound messages are usually plain strings; a marked field arrives as a
// JSON object encoded inside that string. Outbound moves carry their indices
// as decimal strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SessionError;

/// A field marked by either player, as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedField {
    pub row: usize,
    pub col: usize,
    /// Player token, sent for tic-tac-toe only.
    pub token: Option<u8>,
}

/// Events received from the game server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    GameId(String),
    ClientId(String),
    NewMove(MarkedField),
    /// Identifier of the player who moves next.
    CurrentPlayer(String),
    Other { event_type: String, message: String },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InboundEnvelope {
    event_type: String,
    #[serde(default)]
    event_message: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    row_index: RawIndex,
    col_index: RawIndex,
    field_token: Option<RawIndex>,
}

/// Indices show up both as JSON numbers and as decimal strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIndex {
    Number(u64),
    Text(String),
}

impl RawIndex {
    fn value<T: TryFrom<u64>>(&self) -> Result<T, SessionError> {
        let invalid = || SessionError::InvalidIndex {
            value: match self {
                RawIndex::Number(n) => n.to_string(),
                RawIndex::Text(s) => s.clone(),
            },
        };
        let n = match self {
            RawIndex::Number(n) => *n,
            RawIndex::Text(s) => s.trim().parse::<u64>().map_err(|_| invalid())?,
        };
        T::try_from(n).map_err(|_| invalid())
    }
}

impl ServerEvent {
    /// Decode one websocket text frame.
    pub fn parse(text: &str) -> Result<Self, SessionError> {
        let envelope: InboundEnvelope = serde_json::from_str(text)?;
        let message = envelope.event_message;

        let event = match envelope.event_type.as_str() {
            "game_id" => ServerEvent::GameId(message_text(message)),
            "client_id" => ServerEvent::ClientId(message_text(message)),
            "current_player" => ServerEvent::CurrentPlayer(message_text(message)),
            "new_move_to_mark" => {
                let raw: RawField = match message {
                    Value::String(s) => serde_json::from_str(&s)?,
                    other => serde_json::from_value(other)?,
                };
                ServerEvent::NewMove(MarkedField {
                    row: raw.row_index.value()?,
                    col: raw.col_index.value()?,
                    token: raw.field_token.map(|t| t.value()).transpose()?,
                })
            }
            _ => ServerEvent::Other {
                event_type: envelope.event_type,
                message: message_text(message),
            },
        };
        Ok(event)
    }
}

fn message_text(message: Value) -> String {
    match message {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Payload of a `make_move` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeMove {
    pub game_id: String,
    pub row_index: String,
    pub col_index: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutboundEnvelope<'a> {
    event_type: &'static str,
    event_message: &'a MakeMove,
}

impl MakeMove {
    pub fn new(game_id: &str, (row, col): (usize, usize)) -> Self {
        MakeMove {
            game_id: game_id.to_string(),
            row_index: row.to_string(),
            col_index: col.to_string(),
        }
    }

    /// Encode as a complete outbound envelope.
    pub fn to_json(&self) -> Result<String, SessionError> {
        let envelope = OutboundEnvelope {
            event_type: "make_move",
            event_message: self,
        };
        Ok(serde_json::to_string(&envelope)?)
    }
}
