//! Logging setup for the chat relay binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Both the workspace crates and the binary itself log at `default_log_level`
/// unless `RUST_LOG` says otherwise.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "chat-relay-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use chat_relay_shared::logger::setup_logger;
///
/// setup_logger("chat-relay-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the filter directive used when `RUST_LOG` is not set.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let mut directives: Vec<String> = ["chat_relay_shared", "chat_relay_server", "chat_relay_client"]
        .iter()
        .map(|krate| format!("{}={}", krate, default_log_level))
        .collect();
    directives.push(format!(
        "{}={}",
        binary_name.replace('-', "_"),
        default_log_level
    ));
    directives.push(format!("tower_http={}", default_log_level));
    directives.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_workspace_crates_and_binary() {
        // テスト項目: RUST_LOG 未設定時のフィルタがワークスペースの各クレートとバイナリを含む
        // given (前提条件):
        let binary_name = "chat-relay-server";

        // when (操作):
        let filter = default_filter(binary_name, "debug");

        // then (期待する結果):
        assert!(filter.contains("chat_relay_server=debug"));
        assert!(filter.contains("chat_relay_client=debug"));
        assert!(filter.contains("tower_http=debug"));
        assert!(filter.ends_with("tower_http=debug"));
    }

    #[test]
    fn test_default_filter_is_a_valid_env_filter() {
        // テスト項目: デフォルトのフィルタ文字列が EnvFilter としてパースできる
        // given (前提条件):
        let filter = default_filter("chat-relay-client", "info");

        // when (操作):
        let parsed = tracing_subscriber::EnvFilter::try_new(&filter);

        // then (期待する結果):
        assert!(parsed.is_ok());
    }
}
