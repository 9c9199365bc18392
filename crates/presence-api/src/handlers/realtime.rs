//! WebSocket stream of presence events
//!
//! Each observer gets its own receiver on the local hub. The stream is
//! one-way; client text frames are ignored.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use presence_core::{DomainEvent, UserId};
use tokio::sync::broadcast::{error::RecvError, Receiver};
use tracing::{debug, info, warn};

use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /presence/ws
pub async fn presence_stream(
    State(state): State<AppState>,
    auth: AuthUser,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    // Subscribe before the upgrade so nothing published after the 101 is missed
    let events = state.hub().subscribe();
    ws.on_upgrade(move |socket| forward_events(socket, events, auth.user_id))
}

async fn forward_events(socket: WebSocket, mut events: Receiver<DomainEvent>, observer: UserId) {
    info!(%observer, "Presence observer connected");
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let json = match serde_json::to_string(&event) {
                        Ok(json) => json,
                        Err(e) => {
                            warn!(error = %e, "Failed to encode presence event");
                            continue;
                        }
                    };
                    if sink.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(%observer, skipped, "Presence observer lagging");
                }
                Err(RecvError::Closed) => break,
            },
            frame = stream.next() => match frame {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(%observer, error = %e, "WebSocket error");
                    break;
                }
            },
        }
    }

    let _ = sink.close().await;
    info!(%observer, "Presence observer disconnected");
}
