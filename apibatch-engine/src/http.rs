//! A JSON-over-HTTP entity, modeled on a blog-post resource.
//!
//! `post` creates the resource (`POST {base}/posts`) and records the id the
//! API assigns; `sync` fetches it back (`GET {base}/posts/{id}`) and
//! refreshes the local fields. Works against any placeholder-style JSON
//! API; real providers implement [`ApiEntity`] the same way for their own
//! resources.

use crate::entity::ApiEntity;
use apibatch_types::EntityError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct NewPost<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostRecord {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
}

/// A post pushed to a JSON API.
pub struct HttpPost {
    client: Client,
    base_url: String,
    title: String,
    body: String,
    remote_id: Option<u64>,
}

impl HttpPost {
    /// Creates a post targeting `base_url` with its own HTTP client.
    pub fn new(
        base_url: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create HTTP client");
        Self::with_client(client, base_url, title, body)
    }

    /// Creates a post reusing an existing client (connection pooling across
    /// a batch).
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            title: title.into(),
            body: body.into(),
            remote_id: None,
        }
    }

    /// The id assigned by the API, once posted.
    pub fn remote_id(&self) -> Option<u64> {
        self.remote_id
    }

    /// The post title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The post body.
    pub fn body(&self) -> &str {
        &self.body
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, EntityError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(EntityError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

fn network(e: reqwest::Error) -> EntityError {
    EntityError::Network(e.to_string())
}

#[async_trait]
impl ApiEntity for HttpPost {
    fn label(&self) -> String {
        self.title.clone()
    }

    async fn post(&mut self) -> Result<(), EntityError> {
        let payload = NewPost {
            title: &self.title,
            body: &self.body,
        };
        let response = self
            .client
            .post(format!("{}/posts", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(network)?;
        let response = Self::check_status(response).await?;
        let record: PostRecord = response.json().await.map_err(network)?;
        self.remote_id = Some(record.id);
        Ok(())
    }

    async fn sync(&mut self) -> Result<(), EntityError> {
        let id = self.remote_id.ok_or(EntityError::MissingRemoteId)?;
        let response = self
            .client
            .get(format!("{}/posts/{id}", self.base_url))
            .send()
            .await
            .map_err(network)?;
        let response = Self::check_status(response).await?;
        let record: PostRecord = response.json().await.map_err(network)?;
        self.title = record.title;
        self.body = record.body;
        Ok(())
    }
}
