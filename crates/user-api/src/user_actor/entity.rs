//! Entity trait implementation for the User domain type.
//!
//! Lets [`User`] be owned by the generic [`ResourceActor`](resource_actor::ResourceActor).
//! Both the create and the update payload are a full `User`; its `id` is
//! ignored in favour of the actor-assigned one.

use crate::model::{User, UserId, ValidationErrors};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = User;
    type Update = User;
    type Context = ();
    type Error = ValidationErrors;

    fn from_create_params(id: UserId, params: User) -> Result<Self, Self::Error> {
        Ok(params.with_id(id))
    }

    /// Two users conflict when their names match case-insensitively.
    fn conflicts_with(&self, existing: &Self) -> bool {
        existing.has_same_name(&self.name)
    }

    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        self.validate()
    }

    /// Replaces every field but the id.
    async fn on_update(&mut self, update: User, _ctx: &Self::Context) -> Result<(), Self::Error> {
        update.validate()?;
        *self = update.with_id(self.id);
        Ok(())
    }
}
