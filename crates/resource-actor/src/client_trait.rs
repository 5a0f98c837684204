//! # ActorClient Trait
//!
//! Gives resource-specific clients default `get`, `list` and `delete` methods
//! built on top of a generic `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard read and delete
/// operations.
///
/// Implementors supply the inner client and a mapping from
/// [`FrameworkError`] into their own error type.
///
/// # Example
///
/// ```rust
/// use resource_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Room { id: u32 }
/// #[derive(Debug)] struct RoomCreate;
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct RoomError(String);
///
/// #[async_trait]
/// impl ActorEntity for Room {
///     type Id = u32;
///     type Create = RoomCreate;
///     type Update = RoomCreate;
///     type Context = ();
///     type Error = RoomError;
///
///     fn from_create_params(id: u32, _: RoomCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id })
///     }
///     async fn on_update(&mut self, _: RoomCreate, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct RoomClient {
///     inner: ResourceClient<Room>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Room> for RoomClient {
///     type Error = RoomError;
///
///     fn inner(&self) -> &ResourceClient<Room> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         RoomError(e.to_string())
///     }
/// }
///
/// async fn usage(client: RoomClient) {
///     // get(), list() and delete() are provided automatically
///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity in id order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
