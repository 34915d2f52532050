use crate::clients::RoomClient;
use crate::protocol::{decode, encode, ClientMessage, Frame, MatchAck, Role, ServerMessage};
use crate::room_actor::{PeerLink, RoomCreate, RoomError, RoomNumber, RoomReply, RoomRules};
use crate::transport::{ChannelTransport, Transport};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Accepts player connections and seats them in rooms.
#[derive(Clone)]
pub struct Relay {
    rooms: RoomClient,
    rules: RoomRules,
}

/// Where one connection sits, once it has created or joined a match.
type Seat = Option<(RoomNumber, Role)>;

impl Relay {
    pub fn new(rooms: RoomClient, rules: RoomRules) -> Self {
        Self { rooms, rules }
    }

    /// Serves one already established connection until it closes.
    pub fn serve<T: Transport>(&self, transport: T) -> JoinHandle<()> {
        tokio::spawn(serve_connection(transport, self.rooms.clone(), self.rules))
    }

    /// Opens an in-memory connection and returns the player's end.
    pub fn connect(&self) -> (ChannelTransport, JoinHandle<()>) {
        let (player_end, relay_end) = ChannelTransport::pair();
        (player_end, self.serve(relay_end))
    }
}

async fn serve_connection<T: Transport>(mut transport: T, rooms: RoomClient, rules: RoomRules) {
    let (link, mut inbox) = mpsc::unbounded_channel::<ServerMessage>();
    let mut seat: Seat = None;
    debug!("Relay connection opened");

    loop {
        tokio::select! {
            pushed = inbox.recv() => {
                // `link` lives as long as this loop, so the inbox never closes here.
                let Some(message) = pushed else { break };
                if matches!(message, ServerMessage::GameOver(_)) {
                    seat = None;
                }
                let frame = match encode(&message) {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!(error = %e, "Dropping unencodable frame");
                        continue;
                    }
                };
                if transport.send(frame).await.is_err() {
                    break;
                }
            }
            incoming = transport.recv() => {
                match incoming {
                    Some(Ok(text)) => match decode::<ClientMessage>(&text) {
                        Ok(message) => on_frame(&rooms, rules, &link, &mut seat, message).await,
                        Err(e) => warn!(error = %e, raw = %text, "Dropping malformed frame"),
                    },
                    Some(Err(e)) => {
                        warn!(error = %e, "Receive failed");
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    leave(&rooms, &mut seat).await;
    let _ = transport.close().await;
    debug!("Relay connection closed");
}

async fn on_frame(
    rooms: &RoomClient,
    rules: RoomRules,
    link: &PeerLink,
    seat: &mut Seat,
    message: ClientMessage,
) {
    debug!(event = message.event(), "Frame in");
    let result = match message {
        ClientMessage::CreateMatch(_) => {
            leave(rooms, seat).await;
            // The room acknowledges the host itself once it exists.
            match rooms.open(RoomCreate { host: link.clone(), rules }).await {
                Ok(number) => {
                    info!(room = %number, "Match created");
                    *seat = Some((number, Role::Player1));
                }
                Err(e) => refuse(link, ServerMessage::CreateMatchAck, &e),
            }
            return;
        }
        ClientMessage::JoinMatch(request) => {
            leave(rooms, seat).await;
            match rooms.join(&request.invite_code, link.clone()).await {
                Ok((number, role)) => {
                    info!(room = %number, %role, "Match joined");
                    *seat = Some((number, role));
                }
                Err(e) => refuse(link, ServerMessage::JoinMatchAck, &e),
            }
            return;
        }
        other => {
            let Some((number, role)) = *seat else {
                debug!(event = other.event(), "Frame outside a match");
                return;
            };
            match other {
                ClientMessage::CreateOrder => rooms.create_order(number, role).await,
                ClientMessage::OrderProgress(update) => rooms.progress(number, role, update).await,
                ClientMessage::ServeDish(update) => rooms.serve(number, role, update).await,
                ClientMessage::CompleteOrder(verdict) => rooms.complete(number, role, verdict).await,
                ClientMessage::CreateMatch(_) | ClientMessage::JoinMatch(_) => return,
            }
        }
    };

    match result {
        Ok(RoomReply::Ignored(reason)) => debug!(reason, "Room ignored frame"),
        Ok(_) => {}
        Err(e) => warn!(error = %e, "Room action failed"),
    }
}

fn refuse(link: &PeerLink, ack: fn(MatchAck) -> ServerMessage, error: &RoomError) {
    let message = match error {
        RoomError::NotFound(_) | RoomError::BadInviteCode(_) => "Match not found".to_string(),
        RoomError::Full(_) => "Match is full".to_string(),
        other => other.to_string(),
    };
    warn!(%error, "Match request refused");
    let _ = link.send(ack(MatchAck::refused(message)));
}

async fn leave(rooms: &RoomClient, seat: &mut Seat) {
    if let Some((number, role)) = seat.take() {
        match rooms.leave(number, role).await {
            Ok(_) => info!(room = %number, %role, "Left match"),
            // The room may already have finished.
            Err(e) => debug!(room = %number, error = %e, "Leave skipped"),
        }
    }
}
