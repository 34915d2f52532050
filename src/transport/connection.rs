//! The client side of a connection.
//!
//! One task per player pumps frames both ways: queued [`ClientMessage`]s from the
//! session's outbox are encoded and sent, and received frames are decoded and fed to the
//! session. Frames that fail to decode are logged and dropped. When the link goes away
//! the session is told it is disconnected; when the session is closed the link is
//! closed.

use crate::clients::SessionClient;
use crate::protocol::{decode, encode, ClientMessage, Frame, ServerMessage};
use crate::session_actor::SessionError;
use crate::transport::Transport;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

enum Exit {
    /// The session was closed; nobody is left to notify.
    SessionClosed,
    LinkLost,
}

/// Marks the session connected, then spawns the frame pump.
///
/// The session is connected before this returns, so commands issued right after are
/// not refused for lack of a connection.
pub async fn connect<T: Transport>(
    transport: T,
    outbox: mpsc::UnboundedReceiver<ClientMessage>,
    session: SessionClient,
) -> Result<JoinHandle<()>, SessionError> {
    session.connected().await?;
    Ok(tokio::spawn(connection_loop(transport, outbox, session)))
}

async fn connection_loop<T: Transport>(
    mut transport: T,
    mut outbox: mpsc::UnboundedReceiver<ClientMessage>,
    session: SessionClient,
) {
    let id = session.id();
    info!(session = %id, "Connection started");

    let exit = loop {
        tokio::select! {
            queued = outbox.recv() => {
                let Some(message) = queued else {
                    let _ = transport.close().await;
                    break Exit::SessionClosed;
                };
                let frame = match encode(&message) {
                    Ok(frame) => frame,
                    Err(e) => {
                        error!(session = %id, error = %e, "Dropping unencodable frame");
                        continue;
                    }
                };
                debug!(session = %id, event = message.event(), "Frame out");
                if let Err(e) = transport.send(frame).await {
                    warn!(session = %id, error = %e, "Send failed");
                    break Exit::LinkLost;
                }
            }
            incoming = transport.recv() => {
                match incoming {
                    Some(Ok(text)) => {
                        let message = match decode::<ServerMessage>(&text) {
                            Ok(message) => message,
                            Err(e) => {
                                warn!(session = %id, error = %e, raw = %text, "Dropping malformed frame");
                                continue;
                            }
                        };
                        debug!(session = %id, event = message.event(), "Frame in");
                        match session.receive(message).await {
                            Ok(_) => {}
                            Err(SessionError::NotFound(_)) => break Exit::SessionClosed,
                            Err(e) => warn!(session = %id, error = %e, "Session refused frame"),
                        }
                    }
                    Some(Err(e)) => {
                        warn!(session = %id, error = %e, "Receive failed");
                        break Exit::LinkLost;
                    }
                    None => break Exit::LinkLost,
                }
            }
        }
    };

    match exit {
        Exit::SessionClosed => info!(session = %id, "Session closed, connection ended"),
        Exit::LinkLost => {
            info!(session = %id, "Connection lost");
            let _ = transport.close().await;
            if let Err(e) = session.disconnected().await {
                debug!(session = %id, error = %e, "Could not report disconnect");
            }
        }
    }
}
