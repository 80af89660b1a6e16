//! HTTP adapter for the article API

use async_trait::async_trait;
use blogdesk_core::article::{Article, ArticleId, ArticlePayload};
use blogdesk_core::repository::{ApiInfo, ArticleRepository, HealthStatus, RepositoryError};
use serde::Deserialize;
use std::time::Duration;

use crate::prelude::{eprintln, *};

/// API base URL used when neither `--api-url` nor `BLOGDESK_API_URL` is set
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Article API configuration resolved from the global CLI options
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn from_global(global: &crate::Global) -> Result<Self> {
        let base_url = global.api_url.trim_end_matches('/').to_string();

        reqwest::Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("invalid API URL '{}': {}", global.api_url, e)))?;

        if global.timeout == 0 {
            return Err(Error::Config("timeout must be at least 1 second".to_string()).into());
        }

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(global.timeout),
        })
    }
}

/// Create an HTTP client that speaks JSON to the article API
pub fn create_api_client(config: &ApiConfig) -> Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Error body sent by the article API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
}

/// Extract the `error` field from an error response body, if any
fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|message| !message.trim().is_empty())
}

/// Parse the body of a create/update response
///
/// The backend answers with `{}` after a successful write, so an article is
/// only returned when the body actually is one.
fn parse_echoed_article(body: &str) -> Option<Article> {
    serde_json::from_str::<Article>(body).ok()
}

/// Parse a list response. The backend encodes an empty page as `null`.
fn parse_article_list(body: &str) -> Result<Vec<Article>, RepositoryError> {
    serde_json::from_str::<Option<Vec<Article>>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| RepositoryError::Decode(e.to_string()))
}

/// [`ArticleRepository`] backed by the REST article API
#[derive(Debug, Clone)]
pub struct HttpArticleRepository {
    client: reqwest::Client,
    base_url: String,
}

impl HttpArticleRepository {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: create_api_client(config)?,
            base_url: config.base_url.clone(),
        })
    }

    pub fn from_global(global: &crate::Global) -> Result<Self> {
        let config = ApiConfig::from_global(global)?;
        if global.verbose {
            eprintln!("Article API: {}", config.base_url);
        }
        Self::new(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the body of a successful response
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, RepositoryError> {
        let response = request
            .send()
            .await
            .map_err(|e| RepositoryError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RepositoryError::Transport(e.to_string()))?;

        log::debug!("Article API responded {} ({} bytes)", status, body.len());

        if !status.is_success() {
            return Err(RepositoryError::Api {
                status: status.as_u16(),
                message: parse_error_message(&body),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl ArticleRepository for HttpArticleRepository {
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<Article>, RepositoryError> {
        let url = self.url(&format!("/article/list/{limit}/{offset}"));
        log::debug!("GET {url}");

        let body = self.send(self.client.get(&url)).await?;
        parse_article_list(&body)
    }

    async fn get(&self, id: ArticleId) -> Result<Article, RepositoryError> {
        let url = self.url(&format!("/article/{id}"));
        log::debug!("GET {url}");

        let body = match self.send(self.client.get(&url)).await {
            Ok(body) => body,
            Err(RepositoryError::Api { status: 404, .. }) => {
                return Err(RepositoryError::NotFound(id));
            }
            Err(err) => return Err(err),
        };

        serde_json::from_str(&body).map_err(|e| RepositoryError::Decode(e.to_string()))
    }

    async fn create(&self, payload: &ArticlePayload) -> Result<Option<Article>, RepositoryError> {
        let url = self.url("/article/");
        log::debug!("POST {url}");

        let body = self.send(self.client.post(&url).json(payload)).await?;
        Ok(parse_echoed_article(&body))
    }

    async fn update(
        &self,
        id: ArticleId,
        payload: &ArticlePayload,
    ) -> Result<Option<Article>, RepositoryError> {
        let url = self.url(&format!("/article/{id}"));
        log::debug!("PUT {url} (status: {})", payload.status);

        let body = self.send(self.client.put(&url).json(payload)).await?;
        Ok(parse_echoed_article(&body))
    }

    async fn delete(&self, id: ArticleId) -> Result<(), RepositoryError> {
        let url = self.url(&format!("/article/{id}"));
        log::debug!("DELETE {url}");

        self.send(self.client.delete(&url)).await.map(|_| ())
    }

    async fn health(&self) -> Result<HealthStatus, RepositoryError> {
        let url = self.url("/health");
        log::debug!("GET {url}");

        let body = self.send(self.client.get(&url)).await?;
        serde_json::from_str(&body).map_err(|e| RepositoryError::Decode(e.to_string()))
    }

    async fn info(&self) -> Result<ApiInfo, RepositoryError> {
        let url = self.url("/");
        log::debug!("GET {url}");

        let body = self.send(self.client.get(&url)).await?;
        serde_json::from_str(&body).map_err(|e| RepositoryError::Decode(e.to_string()))
    }
}
