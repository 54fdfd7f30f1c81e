use serde::{Deserialize, Serialize};

use crate::generator::{Snapshot, SpinFrame};

// --- DTOs (Data Transfer Objects) ---
/// Bounds as typed by the user; validated into a `Range` by the handler.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub value: i64,
    pub snapshot: Snapshot,
}

// --- WebSocket messages ---
#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    Generate(GenerateRequest),
    Clear,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    State(Snapshot),
    SpinFrame { value: i64 },
    SpinSettled { value: i64 },
    Error { message: String },
}

impl From<SpinFrame> for ServerMessage {
    fn from(frame: SpinFrame) -> Self {
        match frame {
            SpinFrame::Rolling(value) => ServerMessage::SpinFrame { value },
            SpinFrame::Settled(value) => ServerMessage::SpinSettled { value },
        }
    }
}
