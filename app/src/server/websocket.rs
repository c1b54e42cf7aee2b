use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};

use crate::app::SharedState;

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: SharedState) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.subscribe_ws();
    let (reply_tx, mut reply_rx) = mpsc::channel::<String>(16);

    // Send connection confirmation
    let client_id = uuid::Uuid::new_v4().to_string();
    let welcome = serde_json::json!({
        "type": "connected",
        "data": {
            "clientId": client_id,
            "hasCard": state.latest_card().is_some(),
        }
    });
    if sender
        .send(Message::Text(welcome.to_string().into()))
        .await
        .is_err()
    {
        return;
    }

    tracing::info!("WebSocket client connected: {}", client_id);

    // Forward broadcast events and direct replies to this client
    let mut send_task = tokio::spawn(async move {
        loop {
            let msg = tokio::select! {
                event = rx.recv() => match event {
                    Ok(msg) => msg,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "WebSocket client lagging, events dropped");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                reply = reply_rx.recv() => match reply {
                    Some(msg) => msg,
                    None => break,
                },
            };
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Receive messages from this client
    let cid = client_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    if let Some(reply) = handle_client_message(&text) {
                        if reply_tx.send(reply).await.is_err() {
                            break;
                        }
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
        tracing::info!("WebSocket client disconnected: {}", cid);
    });

    // Wait for either task to finish
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
}

/// Reply to a client message, if it needs one.
fn handle_client_message(text: &str) -> Option<String> {
    let msg = serde_json::from_str::<serde_json::Value>(text).ok()?;
    match msg.get("type").and_then(|t| t.as_str()) {
        Some("ping") => Some(serde_json::json!({ "type": "pong" }).to_string()),
        other => {
            tracing::debug!(msg_type = ?other, "Ignoring WebSocket message");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_gets_a_pong() {
        let reply = handle_client_message(r#"{"type":"ping"}"#).unwrap();
        assert_eq!(reply, r#"{"type":"pong"}"#);
    }

    #[test]
    fn other_messages_are_ignored() {
        assert!(handle_client_message(r#"{"type":"hello"}"#).is_none());
        assert!(handle_client_message("not json").is_none());
    }
}
