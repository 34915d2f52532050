//! Generic actor runtime used by both halves of the game.
//!
//! The client keeps every local player [`Session`](crate::session_actor::Session) inside one
//! [`ResourceActor`], and the loopback coordinator keeps every running
//! [`Room`](crate::room_actor::Room) inside another. Both are the same loop: requests arrive
//! on an `mpsc` mailbox, are processed one at a time, and are answered on a `oneshot`.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that hosted types implement (create, action, delete hooks)
//! - [`ResourceActor`] - The message loop that owns the entity store
//! - [`ResourceClient`] - Cloneable handle that sends requests to the loop
//! - [`ActorClient`] - Trait for domain clients that wrap a `ResourceClient`
//! - [`FrameworkError`] - Mailbox and lookup failures
//!
//! # Testing
//!
//! See [`mock`] for expectation-based clients that answer requests without an actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
