use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tokio::{
    sync::{
        broadcast::{self, error::RecvError},
        mpsc,
    },
    task::JoinHandle,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    config::GeneratorConfig,
    data::{ClientMessage, GenerateRequest, ServerMessage},
    generator::{OsRandomSource, Range, Snapshot, Spin, SpinFrame},
    state::SharedState,
};

pub type ClientSender = mpsc::UnboundedSender<ServerMessage>;

/// Tags one socket in the logs.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ==============================================================================
// === Websocket Handlers
// =============================================================================

#[instrument(skip(ws, state))]
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    let connection_id = ConnectionId::new();
    tracing::info!(connection_id = %connection_id, "WebSocket upgrade requested.");
    ws.on_upgrade(move |socket| handle_socket(socket, connection_id, state))
}

/// Orchestrates the WebSocket lifecycle: Connect -> Initial state -> Loop -> Disconnect
async fn handle_socket(socket: WebSocket, connection_id: ConnectionId, state: SharedState) {
    tracing::info!(connection_id = %connection_id, "WebSocket connected.");

    // Subscribe before the first snapshot so no update falls in between
    let updates = state.updates.subscribe();
    let (sender_tx, mut sender_rx) = mpsc::unbounded_channel::<ServerMessage>();
    let _ = sender_tx.send(ServerMessage::State(state.snapshot().await));

    // Split Socket
    let (mut ws_sender, mut ws_receiver) = socket.split();

    // Spawn Write Task (Server -> Client)
    let send_task = tokio::spawn(async move {
        while let Some(msg) = sender_rx.recv().await {
            let json_str = match serde_json::to_string(&msg) {
                Ok(json_str) => json_str,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to encode server message");
                    continue;
                }
            };
            if ws_sender.send(Message::Text(json_str.into())).await.is_err() {
                break;
            }
        }
    });

    let forward_task = forward_updates(updates, sender_tx.clone());
    let mut spin_task: Option<JoinHandle<()>> = None;

    // Read Loop (Client -> Server)
    while let Some(Ok(msg)) = ws_receiver.next().await {
        if let Message::Text(text) = msg {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => {
                    process_client_message(client_msg, connection_id, &state, &sender_tx, &mut spin_task).await;
                }
                Err(e) => {
                    tracing::warn!(connection_id = %connection_id, error = %e, "Unreadable client message");
                    let _ = sender_tx.send(ServerMessage::Error { message: "Unrecognised message".to_string() });
                }
            }
        }
    }

    // Cleanup on Disconnect
    tracing::info!(connection_id = %connection_id, "WebSocket disconnected.");
    if let Some(task) = spin_task {
        task.abort();
    }
    forward_task.abort();
    send_task.abort();
}

/// Relays snapshots published by any connection to this socket.
fn forward_updates(mut updates: broadcast::Receiver<Snapshot>, sender: ClientSender) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(snapshot) => {
                    if sender.send(ServerMessage::State(snapshot)).is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Socket fell behind on state updates");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Route incoming messages to logic
async fn process_client_message(
    msg: ClientMessage,
    connection_id: ConnectionId,
    state: &SharedState,
    sender: &ClientSender,
    spin_task: &mut Option<JoinHandle<()>>,
) {
    match msg {
        ClientMessage::Generate(GenerateRequest { min, max }) => {
            if spin_task.as_ref().is_some_and(|task| !task.is_finished()) {
                tracing::debug!(connection_id = %connection_id, "Generate ignored while spinning");
                let _ = sender.send(ServerMessage::Error { message: "A spin is already running".to_string() });
                return;
            }

            let range = match Range::new(min, max) {
                Ok(range) => range,
                Err(e) => {
                    tracing::warn!(connection_id = %connection_id, error = %e, "Rejected range");
                    let _ = sender.send(ServerMessage::Error { message: e.to_string() });
                    return;
                }
            };

            match state.generate(range).await {
                Ok((value, _)) => {
                    *spin_task = Some(spawn_spin(range, value, &state.config.generator, sender.clone()));
                }
                Err(e) => {
                    tracing::error!(connection_id = %connection_id, error = %e, "Generation failed");
                    let _ = sender.send(ServerMessage::Error { message: e.to_string() });
                }
            }
        }
        ClientMessage::Clear => {
            state.clear().await;
        }
    }
}

/// Streams the reveal frames; the interval is dropped with the task once the
/// settled frame is out.
fn spawn_spin(range: Range, value: i64, config: &GeneratorConfig, sender: ClientSender) -> JoinHandle<()> {
    let mut spin = Spin::new(range, value, config.spin_steps);
    let period = config.spin_interval();

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // the first tick of an interval completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let frame = match spin.tick(&mut OsRandomSource) {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Spin frame draw failed, settling early");
                    SpinFrame::Settled(value)
                }
            };

            let settled = matches!(frame, SpinFrame::Settled(_));
            if sender.send(frame.into()).is_err() || settled {
                break;
            }
        }
    })
}
