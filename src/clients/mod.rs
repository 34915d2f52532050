//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod room_client;
pub mod session_client;

pub use room_client::*;
pub use session_client::*;
