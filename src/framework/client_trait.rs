//! # ActorClient Trait
//!
//! Shared plumbing for domain clients: how to reach the inner [`ResourceClient`] and how
//! to turn a [`FrameworkError`] into the domain's own error type.

use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for domain-specific clients that wrap a `ResourceClient`.
///
/// Implementors get `fetch` and `remove` for free; everything domain-specific
/// (`place_fish`, `complete_order`, ...) lives on the wrapper itself.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The domain error type.
    type Error: From<FrameworkError> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the domain error type.
    fn map_error(e: FrameworkError) -> Self::Error {
        Self::Error::from(e)
    }

    /// Fetch a snapshot of an entity by id.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Remove an entity by id.
    #[tracing::instrument(skip(self))]
    async fn remove(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
