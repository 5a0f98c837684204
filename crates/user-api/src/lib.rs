//! # User API
//!
//! A CRUD REST service for a single `User` resource.
//!
//! ## Core Components
//!
//! - **[model]**: the [`User`](model::User) record, its validation rules and
//!   the [`PatchDocument`](model::PatchDocument) applier
//! - **[store]**: the [`UserStore`](store::UserStore) seam and its SQLite implementation
//! - **[user_actor]** and **[clients]**: the in-memory store, a
//!   [`ResourceActor`](resource_actor::ResourceActor) behind a
//!   [`UserClient`](clients::UserClient)
//! - **[api]**: actix-web handlers mounted at `/api/UserApi`
//! - **[lifecycle]**: builds the configured store and shuts it down
//! - **[config]**: command-line and environment settings
//!
//! ## Testing
//!
//! See [`resource_actor::mock`] for testing clients without spawning an actor.

pub mod api;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod store;
pub mod user_actor;
