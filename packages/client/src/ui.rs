//! Terminal helpers.

use std::io::Write;

/// Redisplay the prompt after output interrupted it
pub fn redisplay_prompt(client_id: &str) {
    print!("{}", prompt(client_id));
    std::io::stdout().flush().ok();
}

pub fn prompt(client_id: &str) -> String {
    format!("{}> ", client_id)
}
