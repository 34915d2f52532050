//! Player sessions hosted by a [`ResourceActor`].

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};

/// Creates the session actor and its generic client.
///
/// Sessions need no context; the actor is run with `()`.
pub fn new(mailbox_capacity: usize) -> (ResourceActor<Session>, ResourceClient<Session>) {
    ResourceActor::new(mailbox_capacity)
}
