//! Websocket transport: one [`CommandSession`] per connection.
//!
//! On upgrade the handler pushes the catalog `definitions`, then treats
//! every inbound text frame as one command and writes the resulting events
//! back in order. Unparseable frames are logged and skipped -- a broken
//! client message never takes the session down.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use crate::schema::{ClientCommand, ServerEvent};
use crate::session::CommandSession;
use crate::state::AppState;

/// `GET /ws` -- upgrades to the command protocol.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let session_id = Uuid::new_v4();
    tracing::info!(%session_id, "websocket connected");

    let mut session = CommandSession::new(state.catalog.clone());
    if send_event(&mut socket, &session.definitions()).await.is_err() {
        return;
    }

    'outer: while let Some(message) = socket.recv().await {
        let message = match message {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(%session_id, %err, "websocket receive error");
                break;
            }
        };
        match message {
            Message::Text(text) => match serde_json::from_str::<ClientCommand>(text.as_str()) {
                Ok(command) => {
                    for event in session.dispatch(command) {
                        if send_event(&mut socket, &event).await.is_err() {
                            break 'outer;
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(%session_id, %err, "unparseable command frame");
                }
            },
            Message::Close(_) => break,
            _ => {}
        }
    }
    tracing::info!(%session_id, "websocket closed");
}

async fn send_event(socket: &mut WebSocket, event: &ServerEvent) -> Result<(), axum::Error> {
    let text = serde_json::to_string(event).map_err(axum::Error::new)?;
    socket.send(Message::Text(text.into())).await
}
