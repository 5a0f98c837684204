//! # User Actor
//!
//! The in-memory user store: a [`ResourceActor`] owning every [`User`].
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`User`]
//! - [`new()`] - Factory function that creates the actor and its client
//!
//! ## Usage
//!
//! ```rust
//! use user_api::model::User;
//! use user_api::store::UserStore;
//! use user_api::user_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = user_actor::new(32);
//!
//!     // No dependencies, so the context is ()
//!     tokio::spawn(actor.run(()));
//!
//!     let alice = client.insert(User::new("Alice")).await?;
//!     assert_eq!(alice.id.0, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Key Features
//!
//! - **No dependencies**: `Context = ()`
//! - **Sequential ids**: the actor's counter starts at 1 and never reuses an id
//! - **Atomic duplicate check**: names are compared inside the actor loop on create

pub mod entity;

use crate::clients::UserClient;
use crate::model::User;
use resource_actor::ResourceActor;

/// Creates a new User actor and its client.
///
/// `buffer_size` bounds the number of requests queued for the actor.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    let client = UserClient::new(generic_client);

    (actor, client)
}
