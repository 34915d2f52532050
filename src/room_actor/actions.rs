//! Requests a connection can make of its room.
//!
//! Every action names the seat it comes from, so the room can refuse actions from the
//! wrong station without trusting the frame's content.

use crate::protocol::{CompleteOrder, OrderUpdate, Role, ServerMessage};
use tokio::sync::mpsc;

/// Sending half of a connection's inbound queue.
pub type PeerLink = mpsc::UnboundedSender<ServerMessage>;

#[derive(Debug, Clone)]
pub enum RoomAction {
    /// Seats a second player.
    Join(PeerLink),
    /// Asks for the open ticket, issuing one if there is none.
    CreateOrder(Role),
    Progress(Role, OrderUpdate),
    Serve(Role, OrderUpdate),
    Complete(Role, CompleteOrder),
    /// The peer in this seat disconnected.
    Leave(Role),
}

/// Results from RoomActions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomReply {
    /// The joining connection's seat.
    Joined(Role),
    Accepted,
    /// The action did not apply, with the reason.
    Ignored(&'static str),
}
