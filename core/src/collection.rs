//! The remote todo collection: four operations, one failure shape.
//!
//! # Design
//! `RemoteCollection` pairs the stateless `TodoClient` with a `Transport`.
//! Every outcome, whether a 4xx/5xx, a refused connection, or a body that
//! does not decode, comes back as an `ApiError` inside the returned
//! `OperationResult`; nothing panics or escapes past this boundary.

use std::future::Future;

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::OperationResult;
use crate::transport::Transport;
use crate::types::TodoItem;

/// A remote todo collection as seen by the store.
pub trait TodoCollection {
    fn list(&self) -> impl Future<Output = OperationResult<Vec<TodoItem>>>;

    fn create(&self, description: &str) -> impl Future<Output = OperationResult<TodoItem>>;

    fn remove(&self, id: &str) -> impl Future<Output = OperationResult<()>>;

    fn set_completed(
        &self,
        id: &str,
        completed: bool,
    ) -> impl Future<Output = OperationResult<TodoItem>>;
}

/// `TodoCollection` backed by the REST API.
#[derive(Debug, Clone)]
pub struct RemoteCollection<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> RemoteCollection<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: TodoClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> TodoCollection for RemoteCollection<T> {
    async fn list(&self) -> OperationResult<Vec<TodoItem>> {
        let req = self.client.build_list_todos();
        let result = match self.transport.execute(req).await {
            Ok(resp) => self.client.parse_list_todos(resp),
            Err(e) => Err(e),
        };
        log_outcome("list", &result);
        result
    }

    async fn create(&self, description: &str) -> OperationResult<TodoItem> {
        let result = async {
            let req = self.client.build_create_todo(description)?;
            let resp = self.transport.execute(req).await?;
            self.client.parse_create_todo(resp)
        }
        .await;
        log_outcome("create", &result);
        result
    }

    async fn remove(&self, id: &str) -> OperationResult<()> {
        let req = self.client.build_delete_todo(id);
        let result = match self.transport.execute(req).await {
            Ok(resp) => self.client.parse_delete_todo(resp),
            Err(e) => Err(e),
        };
        log_outcome("remove", &result);
        result
    }

    async fn set_completed(&self, id: &str, completed: bool) -> OperationResult<TodoItem> {
        let result = async {
            let req = self.client.build_set_completed(id, completed)?;
            let resp = self.transport.execute(req).await?;
            self.client.parse_set_completed(resp)
        }
        .await;
        log_outcome("set_completed", &result);
        result
    }
}

fn log_outcome<T>(operation: &'static str, result: &OperationResult<T>) {
    match result {
        Ok(_) => debug!(operation, "collection operation succeeded"),
        Err(e) => warn!(operation, status = ?e.status(), error = %e, "collection operation failed"),
    }
}
