use crate::events::AppEvent;
use async_channel::Sender;
use reel_core::protocol::ControlCommand;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

/// Turns one protocol line into an event. Blank lines are skipped quietly,
/// anything unparseable is logged and dropped.
pub fn parse_line(line: &str) -> Option<AppEvent> {
    if line.trim().is_empty() {
        return None;
    }
    match line.parse::<ControlCommand>() {
        Ok(command) => Some(AppEvent::from(command)),
        Err(e) => {
            log::warn!("Ignoring control line '{}': {}", line.trim(), e);
            None
        }
    }
}

async fn handle_client(stream: UnixStream, tx: Sender<AppEvent>) {
    let mut lines = BufReader::new(stream).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(event) = parse_line(&line)
                    && tx.send(event).await.is_err()
                {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                log::warn!("Control connection dropped: {}", e);
                break;
            }
        }
    }
}

pub async fn run_server(socket_path: PathBuf, tx: Sender<AppEvent>) {
    // stale socket from a previous run
    if fs_err::metadata(&socket_path).is_ok() {
        let _ = fs_err::remove_file(&socket_path);
    }

    let listener = match UnixListener::bind(&socket_path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", socket_path.display(), e);
            return;
        }
    };
    log::info!("Listening on {}", socket_path.display());

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(handle_client(stream, tx.clone()));
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
