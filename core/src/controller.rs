//! Sync Controller: performs the four remote operations and reconciles
//! their results into the `ViewModelStore`.
//!
//! # Design
//! Every remote operation follows one template:
//! 1. raise the loading flag and clear any previous error,
//! 2. build the request, execute it, parse the response,
//! 3. on success apply the server's answer to the store,
//! 4. on failure log the cause and show the operation's fixed message,
//!    leaving the list untouched,
//! 5. lower the loading flag.
//!
//! Operations take `&self`, so one controller behind an `Arc` can serve
//! intents that are dispatched concurrently. Toggle and delete hold a
//! per-id lock for their whole duration: two toggles of the same todo run
//! one after the other, and the second flips the state confirmed by the
//! first. Different ids never wait on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, SyncError};
use crate::store::ViewModelStore;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{validate_title, Todo, TodoId, TodoPayload};

pub struct SyncController<T = ReqwestTransport> {
    client: TodoClient,
    transport: T,
    store: ViewModelStore,
    id_locks: Mutex<HashMap<TodoId, Arc<AsyncMutex<()>>>>,
}

impl SyncController<ReqwestTransport> {
    /// Build a controller talking to `config.base_url` over HTTP.
    pub fn connect(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> SyncController<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        Self {
            client: TodoClient::new(&config.base_url),
            transport,
            store: ViewModelStore::new(config.error_display),
            id_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Read handle on the view state this controller maintains.
    pub fn store(&self) -> &ViewModelStore {
        &self.store
    }

    /// Fetch the full list and overwrite the local one.
    pub async fn load_all(&self) -> Result<(), SyncError> {
        self.begin();
        let result = match self.fetch_all().await {
            Ok(todos) => {
                debug!(count = todos.len(), "loaded todos");
                self.forget_missing_locks(&todos);
                self.store.replace_all(todos);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load todos");
                Err(e)
            }
        };
        self.settle(result, SyncError::LoadFailure)
    }

    /// Create a todo from `title` and append the server's record.
    ///
    /// The title is trimmed first. Titles that are empty after trimming or
    /// too long are rejected without any request or store change.
    pub async fn create(&self, title: &str) -> Result<Todo, SyncError> {
        let title = validate_title(title)?;
        let payload = TodoPayload {
            title,
            completed: false,
        };

        self.begin();
        let result = self.send_create(&payload).await;
        match result {
            Ok(ref todo) => {
                debug!(id = %todo.id, "created todo");
                self.store.append(todo.clone());
            }
            Err(ref e) => warn!(error = %e, "failed to add todo"),
        }
        self.settle(result, SyncError::CreateFailure)
    }

    /// Flip `completed` on the todo with `id`.
    ///
    /// Returns `Ok(None)` without any request when the store holds no such
    /// todo. On success the stored record becomes exactly what the server
    /// returned.
    pub async fn toggle(&self, id: &TodoId) -> Result<Option<Todo>, SyncError> {
        let _guard = self.lock_id(id).await;
        let Some(current) = self.store.find(id) else {
            debug!(%id, "toggle on unknown todo ignored");
            return Ok(None);
        };
        let payload = TodoPayload {
            title: current.title,
            completed: !current.completed,
        };

        self.begin();
        let result = self.send_update(id, &payload).await;
        match result {
            Ok(ref todo) => {
                debug!(%id, completed = todo.completed, "updated todo");
                self.store.replace_by_id(id, todo.clone());
            }
            Err(ref e) => warn!(%id, error = %e, "failed to update todo"),
        }
        self.settle(result, SyncError::UpdateFailure).map(Some)
    }

    /// Delete the todo with `id` and drop it from the list.
    pub async fn delete(&self, id: &TodoId) -> Result<(), SyncError> {
        let _guard = self.lock_id(id).await;

        self.begin();
        let result = self.send_delete(id).await;
        match result {
            Ok(()) => {
                debug!(%id, "deleted todo");
                self.store.remove_by_id(id);
                self.forget_lock(id);
            }
            Err(ref e) => warn!(%id, error = %e, "failed to delete todo"),
        }
        self.settle(result, SyncError::DeleteFailure)
    }

    fn begin(&self) {
        self.store.set_loading(true);
        self.store.set_error(None);
    }

    fn settle<R>(&self, result: Result<R, ApiError>, failure: SyncError) -> Result<R, SyncError> {
        if result.is_err() {
            self.store.set_error(Some(failure.to_string()));
        }
        self.store.set_loading(false);
        result.map_err(|_| failure)
    }

    async fn fetch_all(&self) -> Result<Vec<Todo>, ApiError> {
        let request = self.client.build_list_todos();
        let response = self.transport.execute(request).await?;
        self.client.parse_list_todos(response)
    }

    async fn send_create(&self, payload: &TodoPayload) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(payload)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_todo(response)
    }

    async fn send_update(&self, id: &TodoId, payload: &TodoPayload) -> Result<Todo, ApiError> {
        let request = self.client.build_update_todo(id, payload)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_todo(response)
    }

    async fn send_delete(&self, id: &TodoId) -> Result<(), ApiError> {
        let request = self.client.build_delete_todo(id);
        let response = self.transport.execute(request).await?;
        self.client.parse_delete_todo(response)
    }

    async fn lock_id(&self, id: &TodoId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.id_locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(id.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    fn forget_lock(&self, id: &TodoId) {
        let mut locks = self.id_locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.remove(id);
    }

    fn forget_missing_locks(&self, todos: &[Todo]) {
        let mut locks = self.id_locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.retain(|id, _| todos.iter().any(|t| &t.id == id));
    }
}
