//! # User Client
//!
//! The in-memory [`UserStore`]: a thin wrapper over `ResourceClient<User>`
//! that talks to the user actor.
use crate::model::{same_name, User, UserId, ValidationErrors};
use crate::store::{StoreError, UserStore};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = StoreError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => StoreError::NotFound(id),
            FrameworkError::Conflict(id) => StoreError::DuplicateName(id),
            FrameworkError::EntityError(e) => match e.downcast::<ValidationErrors>() {
                Ok(errors) => StoreError::Invalid(*errors),
                Err(e) => StoreError::Unavailable(e.to_string()),
            },
            e @ (FrameworkError::ActorClosed
            | FrameworkError::ActorDropped
            | FrameworkError::IdsExhausted) => {
                StoreError::Unavailable(e.to_string())
            }
        }
    }
}

#[async_trait]
impl UserStore for UserClient {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        ActorClient::list(self).await
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, StoreError> {
        ActorClient::get(self, id).await
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, StoreError> {
        debug!("Sending request");
        let name = name.to_string();
        self.inner
            .find(move |user: &User| same_name(&user.name, &name))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self), fields(name = %user.name))]
    async fn insert(&self, user: User) -> Result<User, StoreError> {
        debug!("Sending request");
        let name = user.name.clone();
        self.inner.create(user).await.map_err(|e| match e {
            FrameworkError::Conflict(_) => StoreError::DuplicateName(name),
            e => Self::map_error(e),
        })
    }

    #[instrument(skip(self), fields(id = %user.id))]
    async fn replace(&self, user: User) -> Result<User, StoreError> {
        debug!("Sending request");
        self.inner
            .update(user.id, user)
            .await
            .map_err(Self::map_error)
    }

    async fn delete(&self, id: UserId) -> Result<bool, StoreError> {
        match ActorClient::delete(self, id).await {
            Ok(()) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
