use crate::model::ValidationErrors;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted user name, in characters.
pub const MAX_NAME_LEN: usize = 30;

/// Store-assigned identifier of a [`User`]. Zero means "not assigned".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// True for the reserved id 0.
    pub fn is_unspecified(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(i64::from(id))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user record, and its wire representation.
///
/// Every field is optional on input: a missing `id` means "unassigned" and a
/// missing `name` is caught by [`User::validate`]. The legacy field name
/// `sqft` is accepted for `area`.
///
/// # Actor Framework
/// `User` implements [`ActorEntity`](resource_actor::ActorEntity) so the
/// in-memory store can keep it in a [`ResourceActor`](resource_actor::ResourceActor).
/// See [`crate::user_actor`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub rate: f64,
    #[serde(alias = "sqft")]
    pub area: i32,
    pub occupancy: i32,
    pub amenity: String,
    pub image_url: String,
    pub details: String,
}

impl User {
    /// Creates an unsaved user with the given name and every other field empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns a copy carrying `id`.
    pub fn with_id(self, id: UserId) -> Self {
        Self { id, ..self }
    }

    /// True when `other` would collide with this user's name.
    ///
    /// Names are compared case-insensitively (full Unicode lowercasing).
    pub fn has_same_name(&self, other: &str) -> bool {
        same_name(&self.name, other)
    }

    /// Checks the field rules shared by create, replace and patch.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "The Name field is required.");
        } else if self.name.chars().count() > MAX_NAME_LEN {
            errors.add(
                "name",
                format!("The field Name must be a string with a maximum length of {MAX_NAME_LEN}."),
            );
        }
        errors.into_result()
    }
}

/// Case-insensitive name equality used for duplicate detection.
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
