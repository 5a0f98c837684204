//! Data types shared by the stores and the HTTP layer.

pub mod patch;
pub mod user;
pub mod validation;

pub use patch::PatchDocument;
pub use user::{same_name, User, UserId, MAX_NAME_LEN};
pub use validation::ValidationErrors;
