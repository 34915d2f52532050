//! # Generic Messages
//!
//! Requests travelling from a [`ResourceClient`](crate::framework::ResourceClient) to its
//! [`ResourceActor`](crate::framework::ResourceActor).

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// Hosted entities are long-lived state machines (a player's session, a running match),
/// so the surface is deliberately small:
///
/// - **Create**: start a new entity from [`ActorEntity::Create`].
/// - **Get**: read a snapshot (a clone) of the entity.
/// - **Action**: feed one [`ActorEntity::Action`] through the entity's state machine.
/// - **Delete**: retire the entity.
///
/// Every variant carries its own typed `respond_to`, so a session action can never be
/// answered with a room result.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
