//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract a resource must implement to be
//! owned by a [`ResourceActor`](crate::ResourceActor). It names the id, the
//! create and replace payloads, the runtime context and the error type, and
//! provides lifecycle hooks (`on_create`, `on_update`, `on_delete`).
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::conflicts_with`]
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! You only implement these when you want to customize behavior. The defaults
//! accept everything.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// The hooks are `#[async_trait]` so they can await other clients. The `Context`
/// associated type is injected into every hook when the actor starts running,
/// which lets dependencies be wired after construction.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Ids are ordered (the store iterates in id order) and generated from a
    /// `u32` counter.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type returned by the hooks.
    ///
    /// One error type per entity rather than per operation: clients match on a
    /// single enum for every request they send.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the generated id and the payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Returns true when `self` may not be stored next to `existing`.
    ///
    /// Only consulted on create. A conflict rejects the create with
    /// [`FrameworkError::Conflict`](crate::FrameworkError::Conflict).
    fn conflicts_with(&self, _existing: &Self) -> bool {
        false
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
