//! # ActorEntity Trait
//!
//! The contract every hosted type implements so that one generic
//! [`ResourceActor`](crate::framework::ResourceActor) loop can drive it.
//!
//! Associated types keep each actor's traffic typed: a `Session` only ever receives
//! `SessionAction`s and answers with `SessionOutcome`s, a `Room` only `RoomAction`s.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::is_finished`]
//!
//! The defaults do nothing, so most entities only implement `from_create_params` and
//! `handle_action`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any entity must implement to be hosted by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are `#[async_trait]`. The `Context` is handed to `run()` rather than `new()`,
/// so two actors can be created first and wired to each other afterwards.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier of an entity inside its actor. Generated from a `u32` sequence.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Input fed to the entity's state machine.
    type Action: Send + Sync + Debug;

    /// What one action reports back to the caller.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum per entity rather than one per action.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the entity from its generated id and the creation payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called once after construction, before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle one action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Called immediately before the entity is removed by a `Delete` request.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Checked after every action; a finished entity is dropped from the store.
    fn is_finished(&self) -> bool {
        false
    }
}
