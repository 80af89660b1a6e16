//! Article repository port
//!
//! The article API is owned by an external backend. The core only depends on
//! this trait; the binary crate provides the HTTP implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::article::{Article, ArticleId, ArticlePayload};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("API error [{status}]: {}", .message.as_deref().unwrap_or("no error message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("Article not found: {0}")]
    NotFound(ArticleId),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl RepositoryError {
    /// The `error` text reported by the API, when it sent one
    pub fn reported_message(&self) -> Option<&str> {
        match self {
            RepositoryError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

/// `GET /health` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// `GET /` response: API name, version and the endpoint table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInfo {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub endpoints: BTreeMap<String, String>,
}

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// `GET /article/list/{limit}/{offset}`
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<Article>, RepositoryError>;

    /// `GET /article/{id}`
    async fn get(&self, id: ArticleId) -> Result<Article, RepositoryError>;

    /// `POST /article/`. The backend may answer with an empty object.
    async fn create(&self, payload: &ArticlePayload) -> Result<Option<Article>, RepositoryError>;

    /// `PUT /article/{id}`. The backend may answer with an empty object.
    async fn update(
        &self,
        id: ArticleId,
        payload: &ArticlePayload,
    ) -> Result<Option<Article>, RepositoryError>;

    /// `DELETE /article/{id}`
    async fn delete(&self, id: ArticleId) -> Result<(), RepositoryError>;

    /// `GET /health`
    async fn health(&self) -> Result<HealthStatus, RepositoryError>;

    /// `GET /`
    async fn info(&self) -> Result<ApiInfo, RepositoryError>;
}
