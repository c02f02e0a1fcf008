//! Operator console
//!
//! Reads commands from stdin on its own task and runs moderation and
//! inspection operations against the shared state. Output goes to
//! stdout for the operator, not through the logging layer.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::state::SharedState;

const PROMPT: &str = "Admin Command > ";

const CONSOLE_HELP: &str = "Available commands:\n\
  list-clients   - List all connected clients\n\
  list-rooms     - List all chat rooms and their members\n\
  stats          - Show server statistics\n\
  kick <address> - Kick a client from its room\n\
  ban <address>  - Ban an address and kick it\n\
  help           - Show this help message";

/// Run the console loop until stdin closes
pub async fn run(state: SharedState) {
    info!("Operator console started");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{PROMPT}");
        let _ = std::io::stdout().flush();

        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                println!("{}", execute(&state, line).await);
            }
            _ => break,
        }
    }

    info!("Operator console stdin closed");
}

/// Run one console command and return the text to print
async fn execute(state: &SharedState, line: &str) -> String {
    let (cmd, arg) = line
        .split_once(' ')
        .map(|(c, a)| (c, a.trim()))
        .unwrap_or((line, ""));

    match cmd {
        "list-clients" => list_clients(state).await,
        "list-rooms" => list_rooms(state).await,
        "stats" => stats(state).await,
        "kick" => kick(state, arg).await,
        "ban" => ban(state, arg).await,
        "help" => CONSOLE_HELP.to_string(),
        _ => "Unknown command. Type help for a list of commands.".to_string(),
    }
}

async fn list_clients(state: &SharedState) -> String {
    let sessions = state.lock().await.list_sessions();
    if sessions.is_empty() {
        return "No clients connected.".to_string();
    }

    let mut out = String::from("Connected clients:");
    for s in sessions {
        let room = s.room.map(|r| r.0).unwrap_or_default();
        out.push_str(&format!("\nClient: {}, Room: {}", s.addr, room));
    }
    out
}

async fn list_rooms(state: &SharedState) -> String {
    let rooms = state.lock().await.list_rooms();
    if rooms.is_empty() {
        return "No active rooms.".to_string();
    }

    let mut out = String::from("Active rooms:");
    for room in rooms {
        out.push_str(&format!("\nRoom: {}, Members: {}", room.name, room.members.len()));
        for addr in room.members {
            out.push_str(&format!("\n - {addr}"));
        }
    }
    out
}

async fn stats(state: &SharedState) -> String {
    let stats = state.lock().await.stats();
    format!(
        "Server Stats:\nTotal clients connected: {}\nTotal rooms: {}\nTotal banned addresses: {}",
        stats.clients, stats.rooms, stats.banned
    )
}

async fn kick(state: &SharedState, addr: &str) -> String {
    if addr.is_empty() {
        return "Usage: kick <address>".to_string();
    }
    if state.lock().await.kick(addr) {
        format!("Client {addr} has been kicked from the chat.")
    } else {
        format!("No connected client with address {addr}.")
    }
}

async fn ban(state: &SharedState, addr: &str) -> String {
    if addr.is_empty() {
        return "Usage: ban <address>".to_string();
    }
    if state.lock().await.ban(addr) {
        format!("Client {addr} has been banned from the chat.")
    } else {
        format!("Address {addr} banned (no connected client).")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Router;
    use crate::session::Session;
    use crate::state::ChatState;
    use crate::types::{RoomName, SessionId};
    use tokio::sync::mpsc;

    async fn state_with_client(
        addr: &str,
    ) -> (SharedState, SessionId, mpsc::UnboundedReceiver<String>) {
        let (router, _queue) = Router::channel();
        let state = ChatState::shared(router);
        let (tx, rx) = mpsc::unbounded_channel();
        let id = SessionId::new();
        state
            .lock()
            .await
            .admit(Session::new(id, addr.to_string(), tx))
            .unwrap();
        (state, id, rx)
    }

    #[tokio::test]
    async fn test_stats_output() {
        let (state, id, _rx) = state_with_client("127.0.0.1:9000").await;
        state
            .lock()
            .await
            .create_room(id, RoomName::new("x"))
            .unwrap();

        let out = execute(&state, "stats").await;
        assert!(out.contains("Total clients connected: 1"));
        assert!(out.contains("Total rooms: 1"));
        assert!(out.contains("Total banned addresses: 0"));
    }

    #[tokio::test]
    async fn test_list_clients_and_rooms() {
        let (state, id, _rx) = state_with_client("127.0.0.1:9000").await;
        state
            .lock()
            .await
            .create_room(id, RoomName::new("x"))
            .unwrap();

        let clients = execute(&state, "list-clients").await;
        assert!(clients.contains("Client: 127.0.0.1:9000, Room: x"));

        let rooms = execute(&state, "list-rooms").await;
        assert!(rooms.contains("Room: x, Members: 1"));
        assert!(rooms.contains(" - 127.0.0.1:9000"));
    }

    #[tokio::test]
    async fn test_empty_state_listings() {
        let (router, _queue) = Router::channel();
        let state = ChatState::shared(router);

        assert_eq!(execute(&state, "list-clients").await, "No clients connected.");
        assert_eq!(execute(&state, "list-rooms").await, "No active rooms.");
    }

    #[tokio::test]
    async fn test_kick_command() {
        let (state, _id, mut rx) = state_with_client("127.0.0.1:9000").await;

        assert_eq!(
            execute(&state, "kick 127.0.0.1:9000").await,
            "Client 127.0.0.1:9000 has been kicked from the chat."
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            "You have been kicked from the chat.\n"
        );

        assert_eq!(
            execute(&state, "kick 10.0.0.1:1").await,
            "No connected client with address 10.0.0.1:1."
        );
        assert_eq!(execute(&state, "kick").await, "Usage: kick <address>");
    }

    #[tokio::test]
    async fn test_ban_command() {
        let (state, _id, _rx) = state_with_client("127.0.0.1:9000").await;

        assert_eq!(
            execute(&state, "ban 127.0.0.1:9000").await,
            "Client 127.0.0.1:9000 has been banned from the chat."
        );
        assert_eq!(
            execute(&state, "ban 10.0.0.1:1").await,
            "Address 10.0.0.1:1 banned (no connected client)."
        );
        assert_eq!(state.lock().await.stats().banned, 2);
        assert_eq!(execute(&state, "ban").await, "Usage: ban <address>");
    }

    #[tokio::test]
    async fn test_help_and_unknown() {
        let (router, _queue) = Router::channel();
        let state = ChatState::shared(router);

        let help = execute(&state, "help").await;
        for cmd in ["list-clients", "list-rooms", "stats", "kick", "ban"] {
            assert!(help.contains(cmd));
        }

        assert_eq!(
            execute(&state, "frobnicate").await,
            "Unknown command. Type help for a list of commands."
        );
    }
}
