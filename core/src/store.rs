//! View Model Store: the client-local reflection of server-confirmed state.
//!
//! # Design
//! `ViewModelStore` is a cheap, clonable handle to one shared `ViewState`.
//! The state lives inside a `tokio::sync::watch` channel so the presentation
//! layer can await changes and re-render, while reads stay synchronous.
//!
//! Reads are public. The mutation entry points are crate-private and are
//! only called by `SyncController` after a confirmed server response, so the
//! list never holds speculative records.
//!
//! The error message has its own small lifecycle. Setting a message starts a
//! countdown task; setting another one aborts that task and starts a fresh
//! countdown. Each countdown also carries a generation number and only
//! clears the message it was started for, so an expiry that already woke up
//! when a newer error arrived cannot clear the newer one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::types::{Todo, TodoId};

/// Read model rendered by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Server order; only changed by confirmed responses.
    pub todos: Vec<Todo>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ViewModelStore {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    state: watch::Sender<ViewState>,
    error_display: Duration,
    timer: Mutex<ErrorTimer>,
}

#[derive(Debug, Default)]
struct ErrorTimer {
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl ErrorTimer {
    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        lock(&self.timer).cancel();
    }
}

fn lock(timer: &Mutex<ErrorTimer>) -> MutexGuard<'_, ErrorTimer> {
    timer.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ViewModelStore {
    pub fn new(error_display: Duration) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            shared: Arc::new(Shared {
                state,
                error_display,
                timer: Mutex::new(ErrorTimer::default()),
            }),
        }
    }

    pub fn snapshot(&self) -> ViewState {
        self.shared.state.borrow().clone()
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.shared.state.borrow().todos.clone()
    }

    pub fn find(&self, id: &TodoId) -> Option<Todo> {
        self.shared
            .state
            .borrow()
            .todos
            .iter()
            .find(|t| &t.id == id)
            .cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.shared.state.borrow().error.clone()
    }

    /// Receiver that is notified after every change to the view state.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.shared.state.subscribe()
    }

    /// Cancel any pending error countdown and clear the message.
    pub fn teardown(&self) {
        self.set_error(None);
    }

    pub(crate) fn replace_all(&self, todos: Vec<Todo>) {
        self.shared.state.send_modify(|state| state.todos = todos);
    }

    pub(crate) fn append(&self, todo: Todo) {
        self.shared.state.send_modify(|state| state.todos.push(todo));
    }

    /// No-op if no record carries `id`.
    pub(crate) fn replace_by_id(&self, id: &TodoId, todo: Todo) {
        self.shared.state.send_if_modified(|state| {
            match state.todos.iter_mut().find(|t| &t.id == id) {
                Some(slot) => {
                    *slot = todo;
                    true
                }
                None => false,
            }
        });
    }

    pub(crate) fn remove_by_id(&self, id: &TodoId) {
        self.shared.state.send_if_modified(|state| {
            let before = state.todos.len();
            state.todos.retain(|t| &t.id != id);
            state.todos.len() != before
        });
    }

    pub(crate) fn set_loading(&self, loading: bool) {
        self.shared.state.send_if_modified(|state| {
            let changed = state.loading != loading;
            state.loading = loading;
            changed
        });
    }

    /// Show `message`, restarting the auto-clear countdown, or clear the
    /// current message and cancel its countdown.
    pub(crate) fn set_error(&self, message: Option<String>) {
        let mut timer = lock(&self.shared.timer);
        timer.cancel();
        timer.generation += 1;

        if message.is_some() {
            timer.pending = self.schedule_clear(timer.generation);
        }

        self.shared.state.send_if_modified(|state| {
            let changed = state.error != message;
            state.error = message;
            changed
        });
    }

    fn schedule_clear(&self, generation: u64) -> Option<JoinHandle<()>> {
        let Ok(runtime) = Handle::try_current() else {
            warn!("no async runtime; error message will not auto-clear");
            return None;
        };
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        let delay = self.shared.error_display;

        Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(shared) = shared.upgrade() else {
                return;
            };
            let mut timer = lock(&shared.timer);
            if timer.generation != generation {
                return;
            }
            // Dropping our own handle detaches it; nothing to abort.
            timer.pending = None;
            debug!("error message expired");
            shared.state.send_if_modified(|state| state.error.take().is_some());
        }))
    }
}
