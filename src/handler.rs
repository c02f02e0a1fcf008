//! Connection handler
//!
//! One handler task per accepted connection. Generic over the byte
//! stream so an encrypted transport can be layered in front of the
//! relay without touching the core; the peer address arrives as a
//! string and is the identifier moderation targets.

use tokio::io::{self, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::command::Command;
use crate::error::ChatError;
use crate::message;
use crate::session::Session;
use crate::state::SharedState;
use crate::types::{RoomName, SessionId};

/// Drive one connection until it closes
///
/// Splits the stream, spawns a write task draining the session outbox,
/// then reads one line at a time and dispatches it. A banned address is
/// told so and dropped before registration. Read EOF or failure
/// triggers the ordinary disconnect cleanup.
pub async fn handle_connection<S>(
    stream: S,
    addr: String,
    state: SharedState,
) -> Result<(), ChatError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (read_half, mut write_half) = io::split(stream);
    let (outbox_tx, mut outbox_rx) = mpsc::unbounded_channel::<String>();
    let id = SessionId::new();

    let admitted = {
        let mut st = state.lock().await;
        st.admit(Session::new(id, addr.clone(), outbox_tx.clone()))
    };
    if let Err(e) = admitted {
        write_half.write_all(format!("{e}\n").as_bytes()).await?;
        return Ok(());
    }

    // Write task: the only place this connection's socket is written,
    // so fan-out never does I/O under the state lock
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = outbox_rx.recv().await {
            if write_half.write_all(line.as_bytes()).await.is_err() {
                debug!("Write failed, ending write task");
                break;
            }
        }
        debug!("Write task ended");
    });

    // Read task: one trimmed line at a time through the interpreter
    let state_read = state.clone();
    let mut read_task = tokio::spawn(async move {
        let mut reader = BufReader::new(read_half);
        let mut line = String::new();

        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    debug!("Read error for session {}: {}", id, e);
                    break;
                }
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            handle_line(trimmed, id, &outbox_tx, &state_read).await;
        }
        debug!("Read task ended for session {}", id);
    });

    // The session ends when either side ends: read EOF/error is a
    // disconnect, and a dead write task means the peer is unreachable
    tokio::select! {
        _ = &mut read_task => {}
        _ = &mut write_task => {
            debug!("Write task ended first for session {}", id);
        }
    }

    state.lock().await.disconnect(id);

    // Drop whichever half is still alive so the stream closes
    read_task.abort();
    write_task.abort();

    info!("Handler finished for {}", addr);
    Ok(())
}

/// Dispatch one trimmed input line
async fn handle_line(
    line: &str,
    id: SessionId,
    outbox: &mpsc::UnboundedSender<String>,
    state: &SharedState,
) {
    let result = if line.starts_with('/') {
        match Command::parse(line) {
            Ok(Command::Join { room }) => state.lock().await.join_room(id, RoomName::new(room)),
            Ok(Command::Create { room }) => {
                state.lock().await.create_room(id, RoomName::new(room))
            }
            Ok(Command::Help) => {
                // Static summary, no shared state touched
                let _ = outbox.send(message::help_text());
                Ok(())
            }
            Err(e) => Err(e),
        }
    } else {
        state.lock().await.chat(id, line)
    };

    // Error and usage replies go point-to-point, never through the router
    if let Err(e) = result {
        let _ = outbox.send(format!("{e}\n"));
    }
}
