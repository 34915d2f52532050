//! In-process loopback coordinator.
//!
//! Speaks the same frames as a production match server, over any [`Transport`]. Each
//! connection gets a task that decodes its frames and turns them into actions on the
//! room actor; rooms push their frames back through each connection's peer link.
//!
//! [`Transport`]: crate::transport::Transport

mod server;

pub use server::Relay;
