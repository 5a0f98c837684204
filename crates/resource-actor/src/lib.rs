//! # Resource Actor
//!
//! Building blocks for owning a collection of resources inside a single-writer
//! Tokio task. A resource type implements [`ActorEntity`]; a [`ResourceActor`]
//! stores instances of it and serves CRUD requests sent through a cloneable
//! [`ResourceClient`].
//!
//! ## Why an actor?
//!
//! - **Isolated state**: the store belongs to one task, so it needs no `Mutex`.
//! - **Sequential processing**: requests are handled one at a time, which makes
//!   check-then-act sequences (duplicate checks before an insert) atomic.
//! - **Uniform API**: every resource gets the same Create / Get / List / Find /
//!   Update / Delete surface.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - your domain model and its hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing and storage
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed requests
//!
//! ## Example
//!
//! ```rust
//! use resource_actor::{ActorEntity, FrameworkError, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Guest {
//!     id: u32,
//!     name: String,
//! }
//!
//! #[derive(Debug)]
//! struct GuestCreate {
//!     name: String,
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("guest name must not be empty")]
//! struct EmptyName;
//!
//! #[async_trait]
//! impl ActorEntity for Guest {
//!     type Id = u32;
//!     type Create = GuestCreate;
//!     type Update = GuestCreate;
//!     type Context = ();
//!     type Error = EmptyName;
//!
//!     fn from_create_params(id: u32, params: GuestCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, name: params.name })
//!     }
//!
//!     fn conflicts_with(&self, existing: &Self) -> bool {
//!         self.name.eq_ignore_ascii_case(&existing.name)
//!     }
//!
//!     async fn on_update(&mut self, update: GuestCreate, _ctx: &()) -> Result<(), Self::Error> {
//!         if update.name.is_empty() {
//!             return Err(EmptyName);
//!         }
//!         self.name = update.name;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Guest>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let alice = client.create(GuestCreate { name: "Alice".into() }).await.unwrap();
//!     assert_eq!(alice.id, 1);
//!
//!     let again = client.create(GuestCreate { name: "ALICE".into() }).await;
//!     assert!(matches!(again, Err(FrameworkError::Conflict(_))));
//!
//!     let found = client.find(|g: &Guest| g.name == "Alice").await.unwrap();
//!     assert_eq!(found.map(|g| g.id), Some(1));
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers client requests from queued expectations, so
//! code that wraps a client can be tested without a running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
