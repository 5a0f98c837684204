//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are
//! answered from a queue of expectations instead of a running actor. Use it to
//! test code that sits *around* a client (error mapping, orchestration)
//! without real state.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None (expectations) | Real state management |
//! | **Use Case** | Logic around the client | The actor itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Testing Failure Scenarios
//!
//! ```rust
//! use resource_actor::mock::MockClient;
//! use resource_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Room { id: u32 }
//! #[derive(Debug)] struct RoomCreate;
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct RoomError;
//!
//! #[async_trait]
//! impl ActorEntity for Room {
//!     type Id = u32; type Create = RoomCreate; type Update = RoomCreate;
//!     type Context = (); type Error = RoomError;
//!     fn from_create_params(id: u32, _: RoomCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: RoomCreate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Room>::new();
//!     let client = mock.client();
//!
//!     // Simulate a stopped actor
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!
//!     let result = client.get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For hand-driven tests, [`create_mock_client`] returns the client together
//! with the raw request receiver.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// An expected request and the response to send back.
enum Expectation<T: ActorEntity> {
    Create {
        response: Result<T, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Find {
        response: Result<Option<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Requests must arrive in the order the expectations were queued; a request
/// that does not match the next expectation (kind or id) panics the
/// background task, which surfaces in the test as
/// [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queued = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queued.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Find { respond_to, .. },
                        Some(Expectation::Find { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations.lock().unwrap().push_back(expectation);
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, |response| Expectation::Create { response })
    }

    /// Expects a `get` operation for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, move |response| Expectation::Get { id, response })
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, |response| Expectation::List { response })
    }

    /// Expects a `find` operation. The predicate is not evaluated.
    pub fn expect_find(&mut self) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, |response| Expectation::Find { response })
    }

    /// Expects an `update` operation for `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, move |response| Expectation::Update { id, response })
    }

    /// Expects a `delete` operation for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, ()> {
        ExpectationBuilder::new(self, move |response| Expectation::Delete { id, response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder returned by the `expect_*` methods; finish it with
/// [`return_ok`](Self::return_ok) or [`return_err`](Self::return_err).
pub struct ExpectationBuilder<'a, T: ActorEntity, R> {
    mock: &'a MockClient<T>,
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a>,
}

impl<'a, T: ActorEntity, R> ExpectationBuilder<'a, T, R> {
    fn new(
        mock: &'a MockClient<T>,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a,
    ) -> Self {
        Self {
            mock,
            make: Box::new(make),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.mock.push((self.make)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.make)(Err(error)));
    }
}

/// Creates a client and the receiver its requests arrive on.
///
/// Lets a test play the actor by hand: receive each request, assert on it,
/// and answer through its `respond_to` channel.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Room {
        id: u32,
        name: String,
    }

    #[derive(Debug)]
    struct RoomCreate {
        name: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Room error")]
    struct RoomError;

    #[async_trait]
    impl ActorEntity for Room {
        type Id = u32;
        type Create = RoomCreate;
        type Update = RoomCreate;
        type Context = ();
        type Error = RoomError;

        fn from_create_params(id: u32, params: RoomCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                name: params.name,
            })
        }

        async fn on_update(
            &mut self,
            update: RoomCreate,
            _ctx: &Self::Context,
        ) -> Result<(), Self::Error> {
            self.name = update.name;
            Ok(())
        }
    }

    fn room(id: u32, name: &str) -> Room {
        Room {
            id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_client_by_hand() {
        let (client, mut receiver) = create_mock_client::<Room>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(RoomCreate {
                    name: "Suite".to_string(),
                })
                .await
        });

        match receiver.recv().await {
            Some(ResourceRequest::Create { params, respond_to }) => {
                assert_eq!(params.name, "Suite");
                respond_to.send(Ok(room(1, "Suite"))).unwrap();
            }
            _ => panic!("Expected Create request"),
        }

        let created = create_task.await.unwrap().unwrap();
        assert_eq!(created, room(1, "Suite"));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Room>::new();

        mock.expect_create().return_ok(room(1, "Suite"));
        mock.expect_get(1).return_ok(Some(room(1, "Suite")));
        mock.expect_list().return_ok(vec![room(1, "Suite")]);
        mock.expect_update(1)
            .return_err(FrameworkError::NotFound("1".to_string()));
        mock.expect_delete(1).return_ok(());

        let client = mock.client();

        let created = client
            .create(RoomCreate {
                name: "Suite".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let fetched = client.get(1).await.unwrap();
        assert_eq!(fetched, Some(room(1, "Suite")));

        assert_eq!(client.list().await.unwrap().len(), 1);

        let updated = client
            .update(
                1,
                RoomCreate {
                    name: "Loft".to_string(),
                },
            )
            .await;
        assert!(matches!(updated, Err(FrameworkError::NotFound(_))));

        client.delete(1).await.unwrap();

        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_request_drops_response() {
        let mut mock = MockClient::<Room>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
