//! # System Lifecycle
//!
//! Starting, wiring and stopping the actors.
//!
//! [`GameSystem`] creates the session actor and the room actor first, then runs them with
//! their contexts, then connects players through the loopback [`Relay`](crate::relay::Relay).
//! Nothing holds a request path from one actor back to another: rooms and sessions emit
//! frames through unbounded queues that connection tasks drain.

pub mod config;
pub mod game_system;
pub mod tracing;

pub use config::{ClientConfig, ConfigError};
pub use game_system::{GameSystem, SystemError};
pub use self::tracing::setup_tracing;
