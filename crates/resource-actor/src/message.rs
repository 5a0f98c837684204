//! # Generic Messages
//!
//! The request type sent from a `ResourceClient` to its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Predicate evaluated inside the actor for [`ResourceRequest::Find`].
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Internal message type sent to the actor to request operations.
///
/// # The CRUD Pattern
/// The variants map to the lifecycle operations that apply to almost any
/// stored resource:
///
/// - **Create**: builds a new entity from [`ActorEntity::Create`] and returns it with its id.
/// - **Get**: fetches one entity by id.
/// - **List**: returns every entity in id order.
/// - **Find**: returns the first entity (in id order) accepted by a predicate.
/// - **Update**: hands an [`ActorEntity::Update`] to the entity's `on_update` hook.
/// - **Delete**: removes the entity.
///
/// Every variant is generic over `T: ActorEntity`, so a payload for one
/// resource type can never be sent to an actor for another.
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Find {
        filter: Filter<T>,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
