//! WebSocket chat sessions.
//!
//! One session per connection, moving through three states:
//!
//! - **unregistered**: the stream is open but the identity is unknown. The
//!   first frame's `client_id` is registered and a JOIN notice goes out.
//! - **active**: inbound frames are routed; a separate pusher task drains the
//!   session's mailbox onto the stream whenever mail arrives.
//! - **terminated**: the stream ended (close, fault, malformed frame or failed
//!   write). The client is unregistered and a LEAVE notice goes out.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use thiserror::Error;

use crate::{
    domain::{ClientId, ClientRegistry, Envelope, MailboxHandle},
    infrastructure::dto::{ConversionError, websocket::ChatMessage},
    ui::state::AppState,
    usecase::{DispatchOutcome, JoinError},
};

/// Why a session left the active state abnormally
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("stream fault: {0}")]
    StreamFault(String),

    #[error("malformed message: {0}")]
    MalformedMessage(String),
}

pub async fn chat_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Read the next chat frame.
///
/// `Ok(None)` means the peer closed the stream cleanly.
async fn read_inbound(
    receiver: &mut SplitStream<WebSocket>,
) -> Result<Option<ChatMessage>, SessionError> {
    while let Some(msg) = receiver.next().await {
        let msg = msg.map_err(|e| SessionError::StreamFault(e.to_string()))?;

        match msg {
            Message::Text(text) => {
                return serde_json::from_str::<ChatMessage>(&text)
                    .map(Some)
                    .map_err(|e| SessionError::MalformedMessage(e.to_string()));
            }
            Message::Binary(data) => {
                return Err(SessionError::MalformedMessage(format!(
                    "unexpected binary frame ({} bytes)",
                    data.len()
                )));
            }
            Message::Close(_) => return Ok(None),
            // Ping/pong is handled automatically by the WebSocket protocol
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }

    Ok(None)
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // unregistered: the first frame announces who this is
    let handshake = match read_inbound(&mut receiver).await {
        Ok(Some(msg)) => msg,
        Ok(None) => {
            tracing::debug!("Stream closed before handshake");
            return;
        }
        Err(e) => {
            tracing::warn!("Session ended before handshake: {}", e);
            return;
        }
    };

    let mailbox = match join(&state, &handshake).await {
        Ok(mailbox) => mailbox,
        Err(e) => {
            tracing::warn!(
                "Rejecting session announced as '{}': {}",
                handshake.client_id,
                e
            );
            reject(&state, &mut sender, &e).await;
            return;
        }
    };
    let client_id = mailbox.client_id().clone();
    tracing::info!("Client '{}' connected and registered", client_id);

    // active
    let mut send_task = pusher_loop(state.registry.clone(), mailbox, sender);

    let state_clone = state.clone();
    let client_id_clone = client_id.clone();
    let mut recv_task = tokio::spawn(async move {
        if !handshake.message.is_empty() {
            relay(&state_clone, &client_id_clone, handshake).await;
        }

        loop {
            match read_inbound(&mut receiver).await {
                Ok(Some(msg)) => relay(&state_clone, &client_id_clone, msg).await,
                Ok(None) => {
                    tracing::info!("Client '{}' closed the stream", client_id_clone);
                    break;
                }
                Err(e) => {
                    tracing::warn!("Session '{}' terminated: {}", client_id_clone, e);
                    break;
                }
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // terminated
    match state.leave_session_usecase.execute(client_id.clone()).await {
        Ok(DispatchOutcome::Delivered { recipients }) => {
            tracing::info!(
                "Client '{}' disconnected, notified {} client(s)",
                client_id,
                recipients
            );
        }
        Ok(outcome) => {
            tracing::info!("Client '{}' disconnected ({:?})", client_id, outcome);
        }
        Err(e) => {
            tracing::warn!("Failed to disconnect '{}': {}", client_id, e);
        }
    }
}

async fn join(state: &AppState, handshake: &ChatMessage) -> Result<MailboxHandle, JoinError> {
    let client_id = ClientId::try_from(handshake.client_id.clone())?;
    state.join_session_usecase.execute(client_id).await
}

/// Tell a rejected peer why, then close with a policy violation.
async fn reject(state: &AppState, sender: &mut SplitSink<WebSocket, Message>, err: &JoinError) {
    let notice: ChatMessage = Envelope::server_notice(err.to_string(), state.router.now()).into();
    match serde_json::to_string(&notice) {
        Ok(json) => {
            if let Err(e) = sender.send(Message::Text(json.into())).await {
                tracing::debug!("Failed to send rejection notice: {}", e);
                return;
            }
        }
        Err(e) => tracing::warn!("Failed to serialize rejection notice: {}", e),
    }

    let frame = CloseFrame {
        code: close_code::POLICY,
        reason: err.to_string().into(),
    };
    if let Err(e) = sender.send(Message::Close(Some(frame))).await {
        tracing::debug!("Failed to send close frame: {}", e);
    }
}

/// Route one inbound frame under the session's identity.
async fn relay(state: &AppState, client_id: &ClientId, msg: ChatMessage) {
    if msg.client_id != client_id.as_str() {
        tracing::debug!(
            "Frame claims '{}' on session '{}', relaying as '{}'",
            msg.client_id,
            client_id,
            client_id
        );
    }

    match msg.into_envelope(client_id.clone(), state.router.now()) {
        Ok(envelope) => {
            state.router.dispatch(envelope).await;
        }
        Err(e @ (ConversionError::MissingTarget | ConversionError::InvalidTarget(_))) => {
            tracing::debug!("Bad private message from '{}': {}", client_id, e);
            state.router.notify(client_id, e.to_string()).await;
        }
        Err(e @ ConversionError::NoticeFromClient(_)) => {
            tracing::warn!("Ignoring frame from '{}': {}", client_id, e);
        }
    }
}

/// Spawns a task that drains this session's mailbox onto the WebSocket sink
/// every time mail arrives.
///
/// Ends when the client is unregistered or the sink fails.
fn pusher_loop(
    registry: Arc<dyn ClientRegistry>,
    mailbox: MailboxHandle,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            mailbox.notified().await;

            let Some(batch) = registry.drain(mailbox.client_id()).await else {
                break;
            };

            for envelope in batch {
                let dto: ChatMessage = envelope.into();
                let json = match serde_json::to_string(&dto) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::warn!("Failed to serialize envelope: {}", e);
                        continue;
                    }
                };

                if let Err(e) = sender.send(Message::Text(json.into())).await {
                    tracing::debug!(
                        "Failed to push to '{}': {}",
                        mailbox.client_id(),
                        e
                    );
                    return;
                }
            }
        }
    })
}
