// Websocket client task driving one game session.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use url::Url;
use uuid::Uuid;

use crate::config::Config;
use crate::error::SessionError;
use crate::metrics;
use crate::protocol::ServerEvent;

use super::handler::GameSession;
use super::registry::{SessionInfo, SessionRegistry};
use super::GameKind;

/// What the API was asked to join.
#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub kind: GameKind,
    pub game_type: String,
    pub game_id: String,
}

impl SessionRequest {
    /// Websocket URL of the game on the server at `base`.
    pub fn url(&self, base: &str) -> Result<Url, SessionError> {
        let mut url = Url::parse(&format!(
            "{}/games/{}",
            base.trim_end_matches('/'),
            self.kind.endpoint()
        ))?;
        url.query_pairs_mut()
            .append_pair("gameType", &self.game_type)
            .append_pair("gameId", &self.game_id);
        Ok(url)
    }
}

/// Register a session and run it on its own task. Returns the session id.
pub fn spawn_session(
    config: Arc<Config>,
    registry: SessionRegistry,
    request: SessionRequest,
) -> Uuid {
    let info = SessionInfo::new(request.kind, &request.game_type, &request.game_id);
    let session_id = info.session_id;
    registry.register(info);

    let label = request.kind.label();
    metrics::SESSIONS_STARTED_TOTAL
        .with_label_values(&[label])
        .inc();

    tokio::spawn(async move {
        let outcome = match run_session(&config, &request).await {
            Ok(()) => "closed",
            Err(e) => {
                tracing::error!("Game {}: session failed: {e}", request.game_id);
                "error"
            }
        };
        registry.remove(session_id);
        metrics::SESSIONS_ENDED_TOTAL
            .with_label_values(&[label, outcome])
            .inc();
        tracing::info!("Game {}: session {session_id} ended ({outcome})", request.game_id);
    });

    session_id
}

/// Connect to the game server and play until the connection closes.
pub async fn run_session(config: &Config, request: &SessionRequest) -> Result<(), SessionError> {
    let session = GameSession::new(request.kind, request.game_id.clone());
    run_game(config, request, session).await
}

/// Like `run_session`, with a prepared session state.
///
/// Turn events are handled on the blocking pool; planning a soccer turn is
/// CPU-bound and must not stall the other sessions on this runtime.
pub async fn run_game(
    config: &Config,
    request: &SessionRequest,
    mut session: GameSession,
) -> Result<(), SessionError> {
    tokio::time::sleep(config.connect_delay).await;

    let url = request.url(&config.game_server_url)?;
    let (socket, _) = tokio::time::timeout(config.connect_timeout, connect_async(url.as_str()))
        .await
        .map_err(|_| SessionError::ConnectTimeout {
            url: url.to_string(),
        })??;
    tracing::info!("Game {}: connected to {url}", request.game_id);

    let (mut sink, mut stream) = socket.split();

    while let Some(message) = stream.next().await {
        let text = match message? {
            Message::Text(text) => text,
            Message::Close(frame) => {
                tracing::info!("Game {}: server closed the connection: {frame:?}", session.game_id());
                break;
            }
            _ => continue,
        };

        let event = match ServerEvent::parse(text.as_str()) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Game {}: ignoring event: {e}", session.game_id());
                continue;
            }
        };

        let reply = if matches!(event, ServerEvent::CurrentPlayer(_)) {
            let (returned, reply) = tokio::task::spawn_blocking(move || {
                let reply = session.handle_event(event);
                (session, reply)
            })
            .await?;
            session = returned;
            reply
        } else {
            session.handle_event(event)
        };

        if let Some(make_move) = reply {
            let json = make_move.to_json()?;
            tracing::debug!("Game {}: sending {json}", session.game_id());
            sink.send(Message::Text(json.into())).await?;
            metrics::MOVES_SENT_TOTAL
                .with_label_values(&[request.kind.label()])
                .inc();
        }
    }

    Ok(())
}
