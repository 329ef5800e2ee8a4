use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// 1. THE ABSTRACTION (Document trait)
// =============================================================================

/// Trait that any domain aggregate must implement to be managed by a
/// [`CollectionActor`].
///
/// A collection actor owns every document of one type and serializes all
/// access to them, so patch and action handlers run without interleaving.
/// Domain mutations that would otherwise be read-modify-write races (review
/// aggregation, stock adjustment) are expressed as [`Document::Action`]s and
/// executed inside the actor.
pub trait Document: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    /// Predicate used by `Find`/`Count` requests.
    type Filter: Clone + Send + Sync + Debug;

    /// Domain-specific mutations executed inside the actor.
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Typed error surfaced by every operation on this collection.
    type Error: std::error::Error + Send + Sync + Debug + 'static;

    /// Construct the full document from the generated id and the payload.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    /// Apply a partial update in place.
    fn apply_patch(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;

    /// Whether this document satisfies the filter.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Handle a custom domain-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;

    /// Gate executed before a document is removed. Runs inside the actor, so
    /// the check cannot race with a concurrent mutation.
    fn before_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Error raised when a requested id is absent from the collection.
    fn not_found(id: &Self::Id) -> Self::Error;

    /// Error raised when the actor channel is closed or dropped.
    fn store_unavailable(context: &str) -> Self::Error;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<O, E> = oneshot::Sender<Result<O, E>>;

/// Request variants cover the six store primitives the core needs:
/// find-by-id, find-with-filter (with skip/limit bounds), count,
/// create/save, update, delete -- plus `Action` for in-actor domain
/// mutations.
#[derive(Debug)]
pub enum CollectionRequest<T: Document> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    Find {
        filter: T::Filter,
        skip: usize,
        limit: usize,
        respond_to: Response<Vec<T>, T::Error>,
    },
    Count {
        filter: T::Filter,
        respond_to: Response<usize, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR
// =============================================================================

pub struct CollectionActor<T: Document> {
    receiver: mpsc::Receiver<CollectionRequest<T>>,
    documents: HashMap<T::Id, T>,
    // Insertion log so Find/Count iterate in a stable, creation order.
    insertion: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Document> CollectionActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            documents: HashMap::new(),
            insertion: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = CollectionClient { sender };
        (actor, client)
    }

    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CollectionRequest::Create { params, respond_to } => {
                    let id = (self.next_id_fn)();
                    match T::from_create_params(id.clone(), params) {
                        Ok(item) => {
                            self.documents.insert(id.clone(), item);
                            self.insertion.push(id.clone());
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                CollectionRequest::Get { id, respond_to } => {
                    let item = self.documents.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                CollectionRequest::Find { filter, skip, limit, respond_to } => {
                    let items = self
                        .in_order()
                        .filter(|item| item.matches(&filter))
                        .skip(skip)
                        .take(limit)
                        .cloned()
                        .collect();
                    let _ = respond_to.send(Ok(items));
                }
                CollectionRequest::Count { filter, respond_to } => {
                    let count = self.in_order().filter(|item| item.matches(&filter)).count();
                    let _ = respond_to.send(Ok(count));
                }
                CollectionRequest::Update { id, patch, respond_to } => {
                    if let Some(item) = self.documents.get_mut(&id) {
                        match item.apply_patch(patch) {
                            Ok(()) => {
                                let _ = respond_to.send(Ok(item.clone()));
                            }
                            Err(e) => {
                                let _ = respond_to.send(Err(e));
                            }
                        }
                    } else {
                        let _ = respond_to.send(Err(T::not_found(&id)));
                    }
                }
                CollectionRequest::Delete { id, respond_to } => {
                    if let Some(item) = self.documents.get(&id) {
                        if let Err(e) = item.before_delete() {
                            let _ = respond_to.send(Err(e));
                            continue;
                        }
                        self.documents.remove(&id);
                        self.insertion.retain(|kept| kept != &id);
                        let _ = respond_to.send(Ok(()));
                    } else {
                        let _ = respond_to.send(Err(T::not_found(&id)));
                    }
                }
                CollectionRequest::Action { id, action, respond_to } => {
                    if let Some(item) = self.documents.get_mut(&id) {
                        let result = item.handle_action(action);
                        let _ = respond_to.send(result);
                    } else {
                        let _ = respond_to.send(Err(T::not_found(&id)));
                    }
                }
            }
        }
    }

    fn in_order(&self) -> impl Iterator<Item = &T> {
        self.insertion.iter().filter_map(|id| self.documents.get(id))
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct CollectionClient<T: Document> {
    sender: mpsc::Sender<CollectionRequest<T>>,
}

impl<T: Document> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<CollectionRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.send(CollectionRequest::Create { params, respond_to }).await?;
        Self::receive(response).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.send(CollectionRequest::Get { id, respond_to }).await?;
        Self::receive(response).await
    }

    pub async fn find(
        &self,
        filter: T::Filter,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<T>, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.send(CollectionRequest::Find { filter, skip, limit, respond_to }).await?;
        Self::receive(response).await
    }

    pub async fn count(&self, filter: T::Filter) -> Result<usize, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.send(CollectionRequest::Count { filter, respond_to }).await?;
        Self::receive(response).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.send(CollectionRequest::Update { id, patch, respond_to }).await?;
        Self::receive(response).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.send(CollectionRequest::Delete { id, respond_to }).await?;
        Self::receive(response).await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.send(CollectionRequest::Action { id, action, respond_to }).await?;
        Self::receive(response).await
    }

    async fn send(&self, request: CollectionRequest<T>) -> Result<(), T::Error> {
        self.sender
            .send(request)
            .await
            .map_err(|_| T::store_unavailable("collection actor closed"))
    }

    async fn receive<O>(response: oneshot::Receiver<Result<O, T::Error>>) -> Result<O, T::Error> {
        response
            .await
            .map_err(|_| T::store_unavailable("collection actor dropped the request"))?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
