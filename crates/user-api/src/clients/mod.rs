//! Domain-specific clients wrapping generic resource clients.

pub mod user_client;

pub use user_client::UserClient;
