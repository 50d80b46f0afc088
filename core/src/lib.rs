//! Client core for the todo service.
//!
//! # Overview
//! Two layers. The remote collection turns list / create / remove /
//! set-completed into HTTP round-trips and folds every failure into an
//! `ApiError`. The store keeps an in-memory copy of the collection, resyncs
//! it wholesale after each mutation, and exposes busy tokens and the last
//! error for a presentation layer to render.
//!
//! # Design
//! - `TodoClient` is stateless: `build_*` produces a request, `parse_*`
//!   consumes a response, and no I/O happens in between.
//! - `Transport` is the I/O seam; `UreqTransport` is the production one.
//! - `TodoStore` is single-threaded and never holds a borrow across an
//!   await, so concurrent mutators interleave instead of blocking.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod collection;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;

pub use client::TodoClient;
pub use collection::{RemoteCollection, TodoCollection};
pub use config::ClientConfig;
pub use error::{ApiError, OperationResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{OperationKind, TodoState, TodoStore};
pub use transport::{Transport, UreqTransport};
pub use types::{CompletionPatch, NewTodo, TodoItem};
