// End-to-end session tests against a scripted in-process game server.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use aimachine::config::Config;
use aimachine::engine::board::SoccerBoard;
use aimachine::engine::strategy::{PushingStrategy, SoccerStrategy};
use aimachine::session::agent::{GameAgent, SoccerAgent};
use aimachine::session::handler::GameSession;
use aimachine::session::runner::{run_game, run_session, SessionRequest};
use aimachine::session::GameKind;

#[derive(Clone)]
struct Script {
    events: Vec<String>,
    seen: mpsc::UnboundedSender<String>,
}

fn envelope(event_type: &str, message: &str) -> String {
    json!({ "eventType": event_type, "eventMessage": message }).to_string()
}

fn marked(row: usize, col: usize, token: Option<u8>) -> String {
    let mut field = json!({ "rowIndex": row, "colIndex": col });
    if let Some(token) = token {
        field["fieldToken"] = json!(token);
    }
    envelope("new_move_to_mark", &field.to_string())
}

async fn game_socket(
    ws: WebSocketUpgrade,
    Path(game): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    State(script): State<Script>,
) -> impl IntoResponse {
    let _ = script.seen.send(format!(
        "connect {game} {} {}",
        query.get("gameType").cloned().unwrap_or_default(),
        query.get("gameId").cloned().unwrap_or_default()
    ));
    ws.on_upgrade(move |socket| play(socket, script))
}

/// Send the scripted events, report the first reply, echo it back as a
/// marked field and close.
async fn play(mut socket: WebSocket, script: Script) {
    for event in &script.events {
        if socket.send(Message::Text(event.clone().into())).await.is_err() {
            return;
        }
    }
    while let Some(Ok(message)) = socket.recv().await {
        if let Message::Text(text) = message {
            let _ = script.seen.send(text.to_string());
            let reply: Value = serde_json::from_str(text.as_str()).unwrap();
            let row: usize = reply["eventMessage"]["rowIndex"].as_str().unwrap().parse().unwrap();
            let col: usize = reply["eventMessage"]["colIndex"].as_str().unwrap().parse().unwrap();
            let _ = socket.send(Message::Text(marked(row, col, None).into())).await;
            let _ = socket.send(Message::Close(None)).await;
            break;
        }
    }
}

async fn start_server(events: Vec<String>) -> (String, mpsc::UnboundedReceiver<String>) {
    let (seen, rx) = mpsc::unbounded_channel();
    let app = Router::new()
        .route("/games/{game}", get(game_socket))
        .with_state(Script { events, seen });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("ws://{addr}"), rx)
}

fn config(url: String) -> Config {
    Config {
        game_server_url: url,
        connect_delay: Duration::ZERO,
        connect_timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_soccer_session_kicks_off() {
    let (url, mut seen) = start_server(vec![
        envelope("game_id", "g1"),
        envelope("client_id", "ai"),
        envelope("current_player", "human"),
        envelope("current_player", "ai"),
    ])
    .await;
    let request = SessionRequest {
        kind: GameKind::Soccer,
        game_type: "HUMAN_VS_AI".into(),
        game_id: "g1".into(),
    };

    tokio::time::timeout(Duration::from_secs(10), run_session(&config(url), &request))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(seen.recv().await.unwrap(), "connect soccer HUMAN_VS_AI g1");
    let reply: Value = serde_json::from_str(&seen.recv().await.unwrap()).unwrap();
    assert_eq!(
        reply,
        json!({
            "eventType": "make_move",
            "eventMessage": { "gameId": "g1", "rowIndex": "7", "colIndex": "5" }
        })
    );
    assert!(seen.try_recv().is_err(), "only one move per turn");
}

#[tokio::test]
async fn test_tictactoe_session_takes_last_blank_field() {
    let mut events = vec![envelope("game_id", "t1"), envelope("client_id", "ai")];
    for (i, (row, col)) in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1)]
        .into_iter()
        .enumerate()
    {
        events.push(marked(row, col, Some(1 + (i % 2) as u8)));
    }
    // Noise the session must skip over
    events.push(envelope("server_message", "hello"));
    events.push("not json".to_string());
    events.push(envelope("current_player", "ai"));

    let (url, mut seen) = start_server(events).await;
    let request = SessionRequest {
        kind: GameKind::TicTacToe,
        game_type: "AI_VS_HUMAN".into(),
        game_id: "t1".into(),
    };

    tokio::time::timeout(Duration::from_secs(10), run_session(&config(url), &request))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(seen.recv().await.unwrap(), "connect tictactoe AI_VS_HUMAN t1");
    let reply: Value = serde_json::from_str(&seen.recv().await.unwrap()).unwrap();
    assert_eq!(reply["eventMessage"]["rowIndex"], "2");
    assert_eq!(reply["eventMessage"]["colIndex"], "2");
}

#[tokio::test]
async fn test_extended_tictactoe_uses_nfields_endpoint() {
    let (url, mut seen) = start_server(vec![
        envelope("client_id", "ai"),
        envelope("current_player", "ai"),
    ])
    .await;
    let request = SessionRequest {
        kind: GameKind::TicTacToeExtended,
        game_type: "AI_VS_AI".into(),
        game_id: "x".into(),
    };

    tokio::time::timeout(Duration::from_secs(10), run_session(&config(url), &request))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(seen.recv().await.unwrap(), "connect tictactoenfields AI_VS_AI x");
    let reply: Value = serde_json::from_str(&seen.recv().await.unwrap()).unwrap();
    let row: usize = reply["eventMessage"]["rowIndex"].as_str().unwrap().parse().unwrap();
    let col: usize = reply["eventMessage"]["colIndex"].as_str().unwrap().parse().unwrap();
    assert!(row < 14 && col < 14);
}

/// Pushing strategy that holds its thread for a while on every choice.
struct SlowPushing {
    thinking: Arc<AtomicBool>,
}

impl SoccerStrategy for SlowPushing {
    fn select_move(&self, board: &SoccerBoard) -> (usize, usize) {
        self.thinking.store(true, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(300));
        self.thinking.store(false, Ordering::SeqCst);
        PushingStrategy.select_move(board)
    }
}

// Single-threaded runtime: a turn computed on the runtime thread would stop
// every other task until it finished.
#[tokio::test]
async fn test_turn_planning_leaves_runtime_responsive() {
    let (url, mut seen) = start_server(vec![
        envelope("client_id", "ai"),
        envelope("current_player", "ai"),
    ])
    .await;

    let thinking = Arc::new(AtomicBool::new(false));
    let ticks_while_thinking = Arc::new(AtomicUsize::new(0));
    let ticker = {
        let thinking = thinking.clone();
        let ticks = ticks_while_thinking.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_millis(10)).await;
                if thinking.load(Ordering::SeqCst) {
                    ticks.fetch_add(1, Ordering::SeqCst);
                }
            }
        })
    };

    let request = SessionRequest {
        kind: GameKind::Soccer,
        game_type: "HUMAN_VS_AI".into(),
        game_id: "slow".into(),
    };
    let agent = SoccerAgent::with_strategy(Box::new(SlowPushing {
        thinking: thinking.clone(),
    }));
    let session = GameSession::with_agent(GameKind::Soccer, "slow", GameAgent::Soccer(agent));

    tokio::time::timeout(
        Duration::from_secs(10),
        run_game(&config(url), &request, session),
    )
    .await
    .unwrap()
    .unwrap();
    ticker.abort();

    assert_eq!(seen.recv().await.unwrap(), "connect soccer HUMAN_VS_AI slow");
    let reply: Value = serde_json::from_str(&seen.recv().await.unwrap()).unwrap();
    assert_eq!(reply["eventMessage"]["rowIndex"], "7");
    assert!(
        ticks_while_thinking.load(Ordering::SeqCst) >= 5,
        "other tasks stalled while the turn was planned"
    );
}
