//! Client execution logic with reconnection support.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::{
    domain::{is_stale_rejection, should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    input::{Command, spawn_input_reader},
    session::run_client_session,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the chat client, reconnecting after connection loss.
///
/// Returns `Ok` when the user quits and the last error once reconnection is
/// given up. A rejection on the first connection ends the client at once.
/// A rejection right after a reconnect is retried once, since the relay may
/// still hold the connection that was just lost. If the relay takes longer
/// than two reconnect intervals to notice, the id stays refused and the
/// client exits.
pub async fn run_client(url: String, client_id: String) -> Result<(), ClientError> {
    let mut input = spawn_input_reader(client_id.clone());
    run_with_reconnect(
        &url,
        &client_id,
        &mut input,
        Duration::from_secs(RECONNECT_INTERVAL_SECS),
    )
    .await
}

async fn run_with_reconnect(
    url: &str,
    client_id: &str,
    input: &mut mpsc::UnboundedReceiver<Command>,
    interval: Duration,
) -> Result<(), ClientError> {
    let mut retries = 0;
    let mut stale_retry_used = false;

    loop {
        tracing::info!("Connecting to {} as '{}'", url, client_id);

        match run_client_session(url, client_id, input).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) if is_stale_rejection(&e, retries, stale_retry_used) => {
                tracing::warn!(
                    "{}; the relay may still hold the previous connection, retrying once in {:?}",
                    e,
                    interval
                );
                stale_retry_used = true;
                tokio::time::sleep(interval).await;
            }
            Err(e) if should_exit_immediately(&e) => {
                tracing::error!("Cannot join as '{}'. Exiting.", client_id);
                return Err(e);
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);

                if !should_attempt_reconnect(&e, retries, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }
                retries += 1;

                tracing::info!(
                    "Reconnecting in {:?}... (attempt {}/{})",
                    interval,
                    retries,
                    MAX_RECONNECT_ATTEMPTS
                );
                tokio::time::sleep(interval).await;
            }
        }
    }
}
