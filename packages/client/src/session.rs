//! One WebSocket connection to the relay.

use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use chat_relay_server::infrastructure::dto::websocket::ChatMessage;
use chat_relay_shared::time::now_millis;

use crate::{
    domain::classify_close,
    error::ClientError,
    formatter::MessageFormatter,
    input::Command,
    ui::redisplay_prompt,
};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Run one session until the user quits (`Ok`) or the connection ends (`Err`).
pub async fn run_client_session(
    url: &str,
    client_id: &str,
    input: &mut mpsc::UnboundedReceiver<Command>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    let (mut write, read) = ws_stream.split();

    send(&mut write, &ChatMessage::handshake(client_id.to_string(), now_millis())).await?;

    tracing::info!("Connected to chat relay!");
    print!("{}", MessageFormatter::format_welcome(client_id));
    redisplay_prompt(client_id);

    let mut read_task = tokio::spawn(read_loop(read, client_id.to_string()));

    loop {
        tokio::select! {
            result = &mut read_task => {
                return match result {
                    Ok(result) => result,
                    Err(e) => Err(ClientError::ConnectionError(e.to_string())),
                };
            }
            command = input.recv() => {
                let msg = match command {
                    None | Some(Command::Quit) => {
                        read_task.abort();
                        if let Err(e) = write.send(Message::Close(None)).await {
                            tracing::debug!("Failed to send close frame: {}", e);
                        }
                        return Ok(());
                    }
                    Some(Command::Empty) => continue,
                    Some(Command::Usage(usage)) => {
                        print!("{}", MessageFormatter::format_usage(usage));
                        redisplay_prompt(client_id);
                        continue;
                    }
                    Some(Command::Broadcast(message)) => {
                        ChatMessage::broadcast(client_id.to_string(), message, now_millis())
                    }
                    Some(Command::Private { target, message }) => {
                        ChatMessage::private(client_id.to_string(), target, message, now_millis())
                    }
                };

                if let Err(e) = send(&mut write, &msg).await {
                    read_task.abort();
                    return Err(e);
                }
            }
        }
    }
}

async fn send(
    write: &mut SplitSink<WsStream, Message>,
    msg: &ChatMessage,
) -> Result<(), ClientError> {
    let json =
        serde_json::to_string(msg).map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}

/// Print inbound frames until the relay closes the stream.
async fn read_loop(mut read: SplitStream<WsStream>, client_id: String) -> Result<(), ClientError> {
    while let Some(frame) = read.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                let formatted = match serde_json::from_str::<ChatMessage>(text.as_str()) {
                    Ok(msg) => MessageFormatter::format_message(&msg),
                    Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                };
                print!("{}", formatted);
                redisplay_prompt(&client_id);
            }
            Ok(Message::Binary(data)) => {
                print!("{}", MessageFormatter::format_binary_message(data.len()));
                redisplay_prompt(&client_id);
            }
            Ok(Message::Close(frame)) => {
                let error = match frame {
                    Some(frame) => classify_close(Some(u16::from(frame.code)), frame.reason.as_str()),
                    None => classify_close(None, ""),
                };
                tracing::info!("Server closed the connection: {}", error);
                return Err(error);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("WebSocket read error: {}", e);
                return Err(ClientError::ConnectionError(e.to_string()));
            }
        }
    }

    Err(ClientError::ConnectionError("Connection lost".to_string()))
}
