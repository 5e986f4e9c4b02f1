//! WebSocket client session.

use futures_util::{SinkExt, StreamExt};
use hiroba_shared::time::get_jst_timestamp;
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    error::ClientError,
    formatter::MessageFormatter,
    ui::{PROMPT, redisplay_prompt},
};

/// Run one chat session until the user exits or the connection ends.
///
/// There is no reconnection: the hub treats a broken connection as the end
/// of that client, so a new session is a new member.
pub async fn run_client_session(url: &str) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url).await.map_err(|e| ClientError::Connect {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    tracing::info!("Connected to hub at {}", url);
    print!("{}", MessageFormatter::format_connected(url));

    let (mut write, mut read) = ws_stream.split();

    // Spawn a task to print incoming messages
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    print!(
                        "{}",
                        MessageFormatter::format_text_message(text.as_str(), get_jst_timestamp())
                    );
                    redisplay_prompt();
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt();
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionLost("closed by server".to_string()));
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionLost(e.to_string()));
                }
            }
        }
        Err(ClientError::ConnectionLost("stream ended".to_string()))
    });

    // rustyline is synchronous, so it gets its own thread
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let (init_tx, init_rx) = tokio::sync::oneshot::channel::<Result<(), ClientError>>();
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => {
                let _ = init_tx.send(Ok(()));
                rl
            }
            Err(e) => {
                let _ = init_tx.send(Err(ClientError::Readline(e.to_string())));
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line).ok();
                    if input_tx.send(line.to_string()).is_err() {
                        // Session is over
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    tracing::info!("Input closed");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });
    if let Ok(Err(e)) = init_rx.await {
        read_task.abort();
        return Err(e);
    }

    // Forward typed lines as text frames
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            if let Err(e) = write.send(Message::text(line)).await {
                tracing::warn!("Failed to send message: {}", e);
                return Err(ClientError::ConnectionLost(e.to_string()));
            }
        }
        // User exited; say goodbye properly
        write.close().await.ok();
        Ok(())
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            read_result.unwrap_or_else(|e| Err(ClientError::ConnectionLost(e.to_string())))
        }
        write_result = &mut write_task => {
            read_task.abort();
            write_result.unwrap_or_else(|e| Err(ClientError::ConnectionLost(e.to_string())))
        }
    }
}
