//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! The `Transport` trait is the only place I/O happens. Implementations must
//! return every HTTP status as data (the client interprets it) and report
//! failures that produced no response as `ApiError::Transport`.
//!
//! Futures are not required to be `Send`: the store drives everything from a
//! single logical thread, so a transport may hold `Rc` state.

use std::future::Future;

use tracing::debug;

use crate::error::{ApiError, OperationResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> impl Future<Output = OperationResult<HttpResponse>>;
}

/// `ureq`-backed transport.
///
/// ureq is blocking, so each request runs on tokio's blocking pool; calling
/// `execute` therefore requires a tokio runtime (current-thread is enough).
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Statuses are data here, never errors.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> OperationResult<HttpResponse> {
        let agent = self.agent.clone();
        debug!(method = %request.method, path = %request.path, "sending request");
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?
            .map_err(|e| ApiError::transport(e.to_string()))
    }
}

fn execute_blocking(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, ureq::Error> {
    let mut response = match req.method {
        HttpMethod::Get => {
            let mut builder = agent.get(&req.path);
            for (key, value) in &req.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            builder.call()?
        }
        HttpMethod::Delete => {
            let mut builder = agent.delete(&req.path);
            for (key, value) in &req.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            builder.call()?
        }
        HttpMethod::Post | HttpMethod::Patch => {
            let mut builder = if req.method == HttpMethod::Post {
                agent.post(&req.path)
            } else {
                agent.patch(&req.path)
            };
            for (key, value) in &req.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            match req.body {
                Some(body) => builder.send(body.as_bytes())?,
                None => builder.send_empty()?,
            }
        }
    };

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
        .collect();
    let body = response.body_mut().read_to_string()?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
