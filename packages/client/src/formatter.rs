//! Message formatting for console display.

use chat_relay_server::{
    domain::SERVER_CLIENT_ID,
    infrastructure::dto::websocket::{ChatMessage, MessageType},
};
use chat_relay_shared::time::timestamp_to_rfc3339;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Banner printed once a session is established
    pub fn format_welcome(client_id: &str) -> String {
        format!(
            "\nYou are '{}'. Type a message and press Enter to broadcast.\n\
             /private <client_id> <message> sends privately, /quit exits.\n\n",
            client_id
        )
    }

    /// Format one inbound chat message by kind
    pub fn format_message(msg: &ChatMessage) -> String {
        let at = timestamp_to_rfc3339(msg.timestamp);

        if msg.client_id == SERVER_CLIENT_ID {
            return format!("\n[SERVER] {} ({})\n", msg.message, at);
        }

        match msg.r#type {
            MessageType::Private => {
                format!("\n[PRIVATE from {}] {} ({})\n", msg.client_id, msg.message, at)
            }
            MessageType::Join => format!("\n+ {} joined at {}\n", msg.client_id, at),
            MessageType::Leave => format!("\n- {} left at {}\n", msg.client_id, at),
            MessageType::Broadcast => format!("\n[{}] {} ({})\n", msg.client_id, msg.message, at),
        }
    }

    /// Text frame that is not a chat message
    pub fn format_raw_message(text: &str) -> String {
        format!("\n{}\n", text)
    }

    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\nReceived binary data: {} bytes\n", byte_count)
    }

    pub fn format_usage(usage: &str) -> String {
        format!("{}\n", usage)
    }
}
