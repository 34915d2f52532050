//! Matches hosted by the loopback coordinator.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::*;
pub use error::*;

use crate::clients::RoomClient;
use crate::framework::ResourceActor;

/// Creates the room actor and its client.
pub fn new(mailbox_capacity: usize) -> (ResourceActor<Room>, RoomClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_capacity);
    (actor, RoomClient::new(generic_client))
}
