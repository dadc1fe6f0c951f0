//! Console input: line parsing and the blocking readline producer.

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::ui::prompt;

pub const PRIVATE_USAGE: &str = "Usage: /private <client_id> <message>";

/// What one line of user input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Broadcast(String),
    Private { target: String, message: String },
    Quit,
    /// Malformed command; print the usage text
    Usage(&'static str),
    Empty,
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    if line == "/quit" {
        return Command::Quit;
    }

    if let Some(rest) = line.strip_prefix("/private")
        && (rest.is_empty() || rest.starts_with(char::is_whitespace))
    {
        return match rest.trim_start().split_once(char::is_whitespace) {
            Some((target, message)) if !message.trim().is_empty() => Command::Private {
                target: target.to_string(),
                message: message.trim().to_string(),
            },
            _ => Command::Usage(PRIVATE_USAGE),
        };
    }

    Command::Broadcast(line.to_string())
}

/// Read stdin on a dedicated thread and forward parsed commands.
///
/// The channel closes after `/quit`, Ctrl+C or Ctrl+D. The thread outlives
/// individual connections so a reconnect keeps the same input.
pub fn spawn_input_reader(client_id: String) -> mpsc::UnboundedReceiver<Command> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<Command>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = prompt(&client_id);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let command = parse_line(&line);
                    if command == Command::Empty {
                        continue;
                    }
                    rl.add_history_entry(line.trim()).ok();

                    let quit = command == Command::Quit;
                    if input_tx.send(command).is_err() || quit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
