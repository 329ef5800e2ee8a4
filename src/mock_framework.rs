//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Rather than spinning up a full `CollectionActor` to test client logic
//! (e.g. the `OrderClient` orchestration), tests create a "mock client"
//! whose requests land on a channel the test controls. The test inspects
//! each request, asserts it is the expected one, and answers through its
//! oneshot channel, simulating success, failure, or delay
//! deterministically.

use tokio::sync::{mpsc, oneshot};

use crate::collection::{CollectionClient, CollectionRequest, Document};

/// Creates a mock client and the receiver its requests arrive on.
pub fn create_mock_client<T: Document>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<CollectionRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request.
pub async fn expect_create<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::CreateParams, oneshot::Sender<Result<T::Id, T::Error>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request.
pub async fn expect_get<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, T::Error>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Find request.
pub async fn expect_find<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Filter, usize, usize, oneshot::Sender<Result<Vec<T>, T::Error>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Find { filter, skip, limit, respond_to }) => {
            Some((filter, skip, limit, respond_to))
        }
        _ => None,
    }
}

/// Helper to verify that the next message is a Count request.
pub async fn expect_count<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Filter, oneshot::Sender<Result<usize, T::Error>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Count { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request.
pub async fn expect_delete<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<(), T::Error>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request.
pub async fn expect_action<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Id, T::Action, oneshot::Sender<Result<T::ActionResult, T::Error>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entity::ProductCreate;
    use crate::domain::Product;

    #[tokio::test]
    async fn mock_client_round_trips_a_create() {
        let (client, mut receiver) = create_mock_client::<Product>(10);

        let create_task = tokio::spawn(async move {
            let params = ProductCreate {
                name: "Test".to_string(),
                description: "Test product".to_string(),
                price: 10.0,
                stock: 3,
                category: "general".to_string(),
                images: Vec::new(),
                created_by: "user_1".to_string(),
            };
            client.create(params).await
        });

        let (params, responder) =
            expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params.name, "Test");
        responder.send(Ok("product_1".to_string())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok("product_1".to_string()));
    }
}
