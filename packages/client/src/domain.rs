//! Pure decision logic for the client: reconnection policy, close handling
//! and id generation.

use uuid::Uuid;

use crate::error::ClientError;

/// WebSocket close code the relay uses to refuse a session
pub const POLICY_VIOLATION: u16 = 1008;

/// Map a close frame received from the relay to the error that ends the session.
///
/// `code` is `None` when the relay closed without a frame body.
pub fn classify_close(code: Option<u16>, reason: &str) -> ClientError {
    match code {
        Some(POLICY_VIOLATION) => ClientError::Rejected(reason.to_string()),
        Some(code) => ClientError::ConnectionError(format!(
            "Server closed the connection (code {})",
            code
        )),
        None => ClientError::ConnectionError("Server closed the connection".to_string()),
    }
}

/// A rejection will be repeated on every retry, so it ends the client.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::Rejected(_))
}

/// A rejection right after a reconnect may mean the relay has not yet noticed
/// that our previous connection died and still holds the id. That case gets
/// one more attempt per process; any other rejection is final.
pub fn is_stale_rejection(error: &ClientError, retries: u32, stale_retry_used: bool) -> bool {
    should_exit_immediately(error) && retries > 0 && !stale_retry_used
}

/// `retries` is the number of reconnections already made.
pub fn should_attempt_reconnect(error: &ClientError, retries: u32, max_retries: u32) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    retries < max_retries
}

/// `client_` followed by 8 hex characters of a v4 UUID
pub fn generate_client_id() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("client_{}", &uuid[..8])
}
