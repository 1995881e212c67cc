//! WebSocket client session management.

use futures_util::{Sink, SinkExt, StreamExt};
use hiroba_server::infrastructure::dto::websocket::{
    ChatMessage, ClientFrame, MessageType, ServerFrame,
};
use hiroba_shared::time::get_jst_timestamp;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use super::{error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt};

/// Run the WebSocket client session
///
/// Connects, checks the initial user list for `name`, joins, and then relays
/// stdin lines as chat messages until the user exits or the connection drops.
pub async fn run_client_session(url: &str, name: &str) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");

    let (mut write, mut read) = ws_stream.split();

    // The server pushes the current user list first
    let initial_users = loop {
        match read.next().await {
            Some(Ok(Message::Text(text))) => {
                if let Ok(ServerFrame::Users(users)) =
                    serde_json::from_str::<ServerFrame>(text.as_str())
                {
                    break users;
                }
            }
            Some(Ok(Message::Close(_))) | None => {
                return Err(ClientError::ConnectionError(
                    "Connection closed before user list".to_string(),
                ));
            }
            Some(Err(e)) => return Err(ClientError::ConnectionError(e.to_string())),
            Some(Ok(_)) => {}
        }
    };

    if initial_users.iter().any(|user| user == name) {
        return Err(ClientError::DuplicateName(name.to_string()));
    }

    let join = ClientFrame::AddUser(ChatMessage {
        r#type: MessageType::Join,
        sender: name.to_string(),
        content: String::new(),
    });
    send_frame(&mut write, &join).await?;

    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        name
    );

    // Clone name for read task
    let name_for_read = name.to_string();

    // Spawn a task to handle incoming frames
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerFrame>(text.as_str()) {
                        Ok(ServerFrame::Public(message)) => {
                            MessageFormatter::format_public(&message, get_jst_timestamp())
                        }
                        Ok(ServerFrame::Users(users)) => {
                            MessageFormatter::format_users(&users, &name_for_read)
                        }
                        Ok(ServerFrame::Error(payload)) => {
                            MessageFormatter::format_error(&payload.message)
                        }
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&name_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    let name = name.to_string();
    let name_for_prompt = name.clone();

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", name_for_prompt);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
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

    // Spawn a task to send stdin lines as chat messages
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            let frame = ClientFrame::SendMessage(ChatMessage {
                r#type: MessageType::Chat,
                sender: name.clone(),
                content: line,
            });

            if let Err(e) = send_frame(&mut write, &frame).await {
                tracing::warn!("Failed to send message: {}", e);
                return true;
            }
        }

        false
    });

    // If any one of the tasks completes, abort the other
    let connection_lost = tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            read_result.unwrap_or(false)
        }
        write_result = &mut write_task => {
            read_task.abort();
            write_result.unwrap_or(false)
        }
    };

    if connection_lost {
        return Err(ClientError::ConnectionError("Connection lost".to_string()));
    }

    Ok(())
}

async fn send_frame<S>(write: &mut S, frame: &ClientFrame) -> Result<(), ClientError>
where
    S: Sink<Message> + Unpin,
    <S as Sink<Message>>::Error: std::fmt::Display,
{
    let json = serde_json::to_string(frame)
        .map_err(|e| ClientError::ConnectionError(format!("Failed to serialize frame: {}", e)))?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}
