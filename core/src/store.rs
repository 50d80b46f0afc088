//! In-memory view of the remote todo collection plus busy tokens.
//!
//! # Design
//! `TodoStore` owns a `TodoState` and keeps it in sync with a
//! `TodoCollection` by re-reading the whole list after every successful
//! mutation. There is no local patching: items are replaced wholesale.
//!
//! All work happens on one logical thread. State lives in a `RefCell` and no
//! borrow is ever held across an `.await`, so mutators invoked concurrently
//! (e.g. under `tokio::join!`) interleave at their network calls. The store
//! does not serialize them: whichever resync finishes last overwrites the
//! items, and busy tokens are cleared unconditionally when an invocation
//! ends. Callers are expected to consult [`TodoStore::is_busy`] before
//! dispatching.
//!
//! Errors never escape. Each failure lands in `last_error` as the rendered
//! `ApiError` message.

use std::cell::{Cell, RefCell};

use tracing::{debug, warn};

use crate::collection::TodoCollection;
use crate::error::OperationResult;
use crate::types::TodoItem;

/// Snapshot of everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoState {
    pub items: Vec<TodoItem>,
    pub loading: bool,
    pub adding: bool,
    pub updating_id: Option<String>,
    pub deleting_id: Option<String>,
    pub last_error: Option<String>,
}

/// The kinds of in-flight work tracked by a busy token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Load,
    Add,
    Update,
    Delete,
}

/// State container synchronized against a remote todo collection.
pub struct TodoStore<C> {
    collection: C,
    state: RefCell<TodoState>,
    mounted: Cell<bool>,
}

impl<C: TodoCollection> TodoStore<C> {
    /// Creates a store that has not fetched anything yet. `loading` starts
    /// out set; call [`TodoStore::load`] to perform the initial fetch.
    pub fn new(collection: C) -> Self {
        Self {
            collection,
            state: RefCell::new(TodoState {
                loading: true,
                ..TodoState::default()
            }),
            mounted: Cell::new(true),
        }
    }

    /// Creates a store and runs the initial load to completion.
    pub async fn mount(collection: C) -> Self {
        let store = Self::new(collection);
        store.load().await;
        store
    }

    /// Initial load. If [`TodoStore::unmount`] is called while the fetch is
    /// pending, the result is dropped and the state is left untouched.
    pub async fn load(&self) {
        self.update(|s| {
            s.loading = true;
            s.last_error = None;
        });
        let fetched = self.collection.list().await;
        if !self.mounted.get() {
            debug!("store unmounted, discarding initial load");
            return;
        }
        self.apply_fetch(fetched);
        self.update(|s| s.loading = false);
    }

    /// Marks the store as torn down. Only a pending initial load honours it.
    pub fn unmount(&self) {
        self.mounted.set(false);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    /// Re-reads the collection on demand.
    pub async fn refresh(&self) {
        self.update(|s| {
            s.loading = true;
            s.last_error = None;
        });
        let fetched = self.collection.list().await;
        self.apply_fetch(fetched);
        self.update(|s| s.loading = false);
    }

    /// Creates a todo and resyncs.
    ///
    /// No validation happens here: an empty description is submitted as-is.
    pub async fn add_todo(&self, description: &str) {
        debug!(description, "adding todo");
        self.update(|s| {
            s.adding = true;
            s.last_error = None;
        });
        let result = self.collection.create(description).await.map(drop);
        self.settle(result).await;
        self.update(|s| s.adding = false);
    }

    /// Deletes a todo and resyncs.
    pub async fn remove_todo(&self, id: &str) {
        debug!(id, "removing todo");
        self.update(|s| {
            s.deleting_id = Some(id.to_string());
            s.last_error = None;
        });
        let result = self.collection.remove(id).await;
        self.settle(result).await;
        self.update(|s| s.deleting_id = None);
    }

    /// Sets the completion flag server-side and resyncs.
    pub async fn toggle_todo_completed(&self, id: &str, completed: bool) {
        debug!(id, completed, "updating todo completion");
        self.update(|s| {
            s.updating_id = Some(id.to_string());
            s.last_error = None;
        });
        let result = self.collection.set_completed(id, completed).await.map(drop);
        self.settle(result).await;
        self.update(|s| s.updating_id = None);
    }

    pub fn snapshot(&self) -> TodoState {
        self.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<TodoItem> {
        self.state.borrow().items.clone()
    }

    pub fn item(&self, id: &str) -> Option<TodoItem> {
        self.state.borrow().items.iter().find(|t| t.id == id).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn is_adding(&self) -> bool {
        self.state.borrow().adding
    }

    pub fn updating_id(&self) -> Option<String> {
        self.state.borrow().updating_id.clone()
    }

    pub fn deleting_id(&self) -> Option<String> {
        self.state.borrow().deleting_id.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    /// Whether an operation of `kind` is currently in flight.
    pub fn is_busy(&self, kind: OperationKind) -> bool {
        let s = self.state.borrow();
        match kind {
            OperationKind::Load => s.loading,
            OperationKind::Add => s.adding,
            OperationKind::Update => s.updating_id.is_some(),
            OperationKind::Delete => s.deleting_id.is_some(),
        }
    }

    pub fn any_busy(&self) -> bool {
        [
            OperationKind::Load,
            OperationKind::Add,
            OperationKind::Update,
            OperationKind::Delete,
        ]
        .into_iter()
        .any(|kind| self.is_busy(kind))
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// Resync after a successful mutation, or record the failure and leave
    /// the items alone.
    async fn settle(&self, result: OperationResult<()>) {
        match result {
            Ok(()) => {
                let fetched = self.collection.list().await;
                self.apply_fetch(fetched);
            }
            Err(e) => {
                warn!(error = %e, "todo mutation failed");
                self.update(|s| s.last_error = Some(e.to_string()));
            }
        }
    }

    /// A failed fetch blanks the list along with recording the error.
    fn apply_fetch(&self, fetched: OperationResult<Vec<TodoItem>>) {
        match fetched {
            Ok(items) => {
                debug!(count = items.len(), "replacing todo items");
                self.update(|s| {
                    s.items = items;
                    s.last_error = None;
                });
            }
            Err(e) => {
                warn!(error = %e, "todo list fetch failed");
                self.update(|s| {
                    s.items.clear();
                    s.last_error = Some(e.to_string());
                });
            }
        }
    }

    fn update(&self, f: impl FnOnce(&mut TodoState)) {
        f(&mut *self.state.borrow_mut());
    }
}
