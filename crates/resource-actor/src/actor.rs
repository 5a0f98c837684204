//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the single writer that owns a
//! collection of entities. It processes messages sequentially, so the store
//! needs no locking.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// ## ResourceActor
///
/// The *server* side of the framework. It owns the store for an entity type
/// `T: ActorEntity` and handles every `ResourceRequest<T>` in arrival order
/// inside its own Tokio task.
///
/// * **Concurrency model** – one message at a time, so check-then-insert
///   sequences (such as uniqueness checks) are atomic.
/// * **Context injection** – the `Context` passed to `run()` reaches every hook.
/// * **Ordered store** – entities live in a `BTreeMap`, so listing and
///   searching follow id order.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2.  **Wire**: pass dependencies into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop on a Tokio task.
///
/// ```rust
/// use resource_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Room { id: u32, beds: u8 }
/// #[derive(Debug)] struct RoomCreate { beds: u8 }
/// #[derive(Debug, thiserror::Error)] #[error("room error")] struct RoomError;
///
/// #[async_trait]
/// impl ActorEntity for Room {
///     type Id = u32;
///     type Create = RoomCreate;
///     type Update = RoomCreate;
///     type Context = ();
///     type Error = RoomError;
///
///     fn from_create_params(id: u32, params: RoomCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, beds: params.beds })
///     }
///     async fn on_update(&mut self, update: RoomCreate, _: &()) -> Result<(), Self::Error> {
///         self.beds = update.beds;
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Room>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let room = client.create(RoomCreate { beds: 2 }).await.unwrap();
///     assert_eq!(room.id, 1);
/// }
/// ```
///
/// # Id Generation
///
/// Ids come from a `u32` counter that starts at 1 and only moves forward, so
/// an id is never handed out twice, even after the entity holding the highest
/// id is deleted. Once the counter reaches `u32::MAX`, creates fail with
/// [`FrameworkError::IdsExhausted`].
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the mpsc channel. When it is full,
    /// client calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client
    /// has been dropped.
    pub async fn run(mut self, context: T::Context) {
        // "User" instead of "user_api::model::user::User"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Find { filter, respond_to } => {
                    let item = self.store.values().find(|item| filter(item)).cloned();
                    debug!(entity_type, found = item.is_some(), "Find");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        // Hooks work on a copy so a rejected update leaves the stored entity intact.
                        let mut candidate = item.clone();
                        if let Err(e) = candidate.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        *item = candidate.clone();
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(candidate));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(&mut self, params: T::Create, context: &T::Context) -> Result<T, FrameworkError> {
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or(FrameworkError::IdsExhausted)?;
        let id = T::Id::from(self.next_id);
        let mut item = T::from_create_params(id.clone(), params)
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        if let Some((existing_id, _)) = self
            .store
            .iter()
            .find(|(_, existing)| item.conflicts_with(existing))
        {
            return Err(FrameworkError::Conflict(existing_id.to_string()));
        }

        item.on_create(context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        // Rejected creates do not consume an id.
        self.next_id = next_id;
        self.store.insert(id, item.clone());
        Ok(item)
    }
}
