//! The wire contract between a player and the match coordinator.

pub mod codec;
pub mod ids;
pub mod messages;

pub use codec::{decode, encode, ProtocolError};
pub use ids::*;
pub use messages::*;
