//! Remote todo endpoint: payload types, the `TodoApi` trait, and the
//! production HTTP client.

use crate::types::{Todo, TodoId};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Path of the todo list resource below the configured base URL.
const TODOS_PATH: &str = "/users/1/todos";

/// Errors that can occur when reading from the remote endpoint.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body was not the expected JSON array.
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Endpoint returned a non-success status.
    #[error("API error (status {status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },
}

/// A todo record as the remote endpoint serves it.
///
/// Only `id`, `title`, and `completed` are carried; unknown payload fields
/// are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RemoteTodo {
    /// Identifier assigned by the remote source, passed through verbatim.
    pub id: i64,
    /// Title of the todo.
    pub title: String,
    /// Completed flag.
    pub completed: bool,
}

impl RemoteTodo {
    /// Maps a remote record into a [`Todo`], forcing `in_progress` false.
    #[must_use]
    pub fn into_todo(self) -> Todo {
        Todo {
            id: TodoId::from_millis(self.id),
            title: self.title,
            completed: self.completed,
            in_progress: false,
        }
    }
}

/// Remote read abstraction, substituted in tests.
///
/// Uses an explicit `Pin<Box<dyn Future>>` return instead of `async fn` so
/// the trait stays dyn-compatible; the environment holds `Arc<dyn TodoApi>`
/// and reducers create effects that capture it.
pub trait TodoApi: Send + Sync {
    /// Fetch the full remote todo list.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for network failures, non-success statuses, or
    /// bodies that are not the expected JSON array.
    fn fetch_todos(&self)
    -> Pin<Box<dyn Future<Output = Result<Vec<RemoteTodo>, ApiError>> + Send + '_>>;
}

/// Production [`TodoApi`] backed by `reqwest`.
#[derive(Clone)]
pub struct HttpTodoApi {
    client: Client,
    base_url: String,
}

impl HttpTodoApi {
    /// Create a new client against the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl TodoApi for HttpTodoApi {
    fn fetch_todos(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RemoteTodo>, ApiError>> + Send + '_>> {
        Box::pin(async move {
            let url = format!("{}{TODOS_PATH}", self.base_url.trim_end_matches('/'));

            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

            match response.status() {
                StatusCode::OK => response
                    .json::<Vec<RemoteTodo>>()
                    .await
                    .map_err(|e| ApiError::ResponseParseFailed(e.to_string())),
                status => {
                    let body = response.text().await.unwrap_or_default();
                    Err(ApiError::Status {
                        status: status.as_u16(),
                        message: body,
                    })
                }
            }
        })
    }
}
