//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Any 2xx status counts as success; every other status is reported as
//! `ApiError::Http` with the raw body text.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, OperationResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CompletionPatch, NewTodo, TodoItem};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_todo(&self, description: &str) -> OperationResult<HttpRequest> {
        let input = NewTodo {
            description: description.to_string(),
        };
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/todos/", self.base_url),
            headers: json_headers(),
            body: Some(to_json(&input)?),
        })
    }

    pub fn build_delete_todo(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/todos/{id}/", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_set_completed(&self, id: &str, completed: bool) -> OperationResult<HttpRequest> {
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            path: format!("{}/todos/{id}/", self.base_url),
            headers: json_headers(),
            body: Some(to_json(&CompletionPatch { completed })?),
        })
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> OperationResult<Vec<TodoItem>> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> OperationResult<TodoItem> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> OperationResult<()> {
        check_status(&response)
    }

    pub fn parse_set_completed(&self, response: HttpResponse) -> OperationResult<TodoItem> {
        check_status(&response)?;
        from_json(&response.body)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json<T: Serialize>(value: &T) -> OperationResult<String> {
    serde_json::to_string(value).map_err(|e| ApiError::transport(e.to_string()))
}

/// Undecodable success bodies are reported like any other pre-response
/// failure: the decoder's message, no status.
fn from_json<T: DeserializeOwned>(body: &str) -> OperationResult<T> {
    serde_json::from_str(body).map_err(|e| ApiError::transport(e.to_string()))
}

fn check_status(response: &HttpResponse) -> OperationResult<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
