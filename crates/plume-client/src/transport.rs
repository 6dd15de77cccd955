//! Timeboxed HTTP transport for the posts API.
//!
//! Every remote operation is a single attempt with a bounded deadline.
//! Non-2xx responses become [`ClientError::RequestFailed`] carrying the
//! operation name; response bodies of failures are logged, never parsed.

use std::time::Duration;

use async_trait::async_trait;
use plume_api_types::{DeletePostResponse, Post, PostInput};
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::error::ClientError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Remote operations the sync coordinator and CLI depend on. Implemented
/// by [`HttpPostsApi`] and by scripted fakes in tests.
#[async_trait]
pub trait PostsApi: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, ClientError>;

    async fn get_post(&self, id: Uuid) -> Result<Post, ClientError>;

    async fn search_posts(&self, term: &str) -> Result<Vec<Post>, ClientError>;

    async fn create_post(&self, input: &PostInput) -> Result<Post, ClientError>;

    async fn update_post(&self, id: Uuid, input: &PostInput) -> Result<Post, ClientError>;

    async fn delete_post(&self, id: Uuid) -> Result<DeletePostResponse, ClientError>;
}

#[derive(Clone, Debug)]
pub struct HttpPostsApi {
    client: Client,
    base: Url,
}

impl HttpPostsApi {
    pub fn new(site: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base = Url::parse(site)?.join("/")?;
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::Network {
                operation: "client-init",
                message: err.to_string(),
            })?;
        Ok(Self { client, base })
    }

    pub fn with_default_timeout(site: &str) -> Result<Self, ClientError> {
        Self::new(site, DEFAULT_TIMEOUT)
    }

    pub fn user_agent() -> &'static str {
        concat!("plume-client/", env!("CARGO_PKG_VERSION"))
    }

    fn url(&self, operation: &'static str, path: &str) -> Result<Url, ClientError> {
        self.base.join(path).map_err(|err| ClientError::Network {
            operation,
            message: format!("invalid request path: {err}"),
        })
    }

    async fn request<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        query: Option<&[(&str, &str)]>,
        body: Option<&PostInput>,
    ) -> Result<T, ClientError> {
        let mut url = self.url(operation, path)?;
        if let Some(q) = query {
            url.set_query(None);
            let mut qp = url.query_pairs_mut();
            for (k, v) in q {
                qp.append_pair(k, v);
            }
        }

        let mut req = self.client.request(method, url);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await.map_err(|err| {
            if err.is_timeout() {
                ClientError::Timeout { operation }
            } else {
                ClientError::Network {
                    operation,
                    message: err.to_string(),
                }
            }
        })?;

        Self::handle(operation, resp).await
    }

    async fn handle<T: DeserializeOwned>(
        operation: &'static str,
        resp: Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            debug!(
                target = "plume_client::transport",
                operation,
                status = status.as_u16(),
                body = %body,
                "request rejected"
            );
            return Err(ClientError::RequestFailed { operation, status });
        }

        let bytes = resp.bytes().await.map_err(|err| ClientError::Network {
            operation,
            message: err.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|err| ClientError::Decode {
            operation,
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl PostsApi for HttpPostsApi {
    async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        self.request("list", Method::GET, "api/posts", None, None)
            .await
    }

    async fn get_post(&self, id: Uuid) -> Result<Post, ClientError> {
        self.request("get", Method::GET, &format!("api/posts/{id}"), None, None)
            .await
    }

    async fn search_posts(&self, term: &str) -> Result<Vec<Post>, ClientError> {
        self.request(
            "search",
            Method::GET,
            "api/posts/search/query",
            Some(&[("q", term)]),
            None,
        )
        .await
    }

    async fn create_post(&self, input: &PostInput) -> Result<Post, ClientError> {
        self.request("create", Method::POST, "api/posts", None, Some(input))
            .await
    }

    async fn update_post(&self, id: Uuid, input: &PostInput) -> Result<Post, ClientError> {
        self.request(
            "update",
            Method::PUT,
            &format!("api/posts/{id}"),
            None,
            Some(input),
        )
        .await
    }

    async fn delete_post(&self, id: Uuid) -> Result<DeletePostResponse, ClientError> {
        self.request(
            "delete",
            Method::DELETE,
            &format!("api/posts/{id}"),
            None,
            None,
        )
        .await
    }
}
