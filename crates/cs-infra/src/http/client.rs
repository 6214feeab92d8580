use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use cs_core::content::{ContentItem, ItemUpdate};
use cs_core::ids::RemoteId;
use cs_core::ports::{AddItemRequest, RemoteContentPort, RemoteError};
use reqwest::{Client, RequestBuilder};
use tracing::{debug, warn};
use url::Url;

use super::dto::{Envelope, UpdateBody};
use super::error::{from_reqwest, from_response};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3457";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const API_PREFIX: [&str; 2] = ["api", "content-inbox"];

#[derive(Debug, Clone)]
pub struct HttpServiceConfig {
    pub base_url: String,
    /// Applies to every request, including reading the body.
    pub timeout: Duration,
}

impl Default for HttpServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// [`RemoteContentPort`] over the inbox REST API.
pub struct HttpContentService {
    client: Client,
    base: Url,
}

impl HttpContentService {
    pub fn new(config: HttpServiceConfig) -> anyhow::Result<Self> {
        let base = Url::parse(&config.base_url)
            .with_context(|| format!("invalid api base url: {}", config.base_url))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            bail!("api base url must be http(s): {}", config.base_url);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("build http client failed")?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(API_PREFIX.iter().chain(segments));
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Envelope, RemoteError> {
        self.dispatch(request, false).await
    }

    /// Like `send`, but a 2xx reply with `success: false` reads as an empty list.
    async fn fetch_list(&self, request: RequestBuilder) -> Result<Envelope, RemoteError> {
        self.dispatch(request, true).await
    }

    async fn dispatch(
        &self,
        request: RequestBuilder,
        empty_on_unsuccessful: bool,
    ) -> Result<Envelope, RemoteError> {
        let response = request.send().await.map_err(from_reqwest)?;
        let status = response.status();
        let body = response.text().await.map_err(from_reqwest)?;

        if status.is_success() && body.trim().is_empty() {
            return Ok(Envelope::success());
        }

        let envelope = match serde_json::from_str::<Envelope>(&body) {
            Ok(envelope) => envelope,
            Err(err) if status.is_success() => return Err(RemoteError::Decode(err.to_string())),
            // Non-JSON error page: fall back to the status line.
            Err(_) => Envelope::default(),
        };

        if status.is_success() && envelope.success {
            return Ok(envelope);
        }
        if status.is_success() && empty_on_unsuccessful {
            debug!(error = ?envelope.error_message(), "list request unsuccessful, treating as empty");
            return Ok(Envelope::default());
        }

        let error = from_response(status, &envelope);
        warn!(status = status.as_u16(), error = %error, "inbox request failed");
        Err(error)
    }
}

#[async_trait]
impl RemoteContentPort for HttpContentService {
    async fn list_items(&self) -> Result<Vec<ContentItem>, RemoteError> {
        let url = self.endpoint(&["items"]);
        debug!(%url, "GET items");
        let envelope = self.fetch_list(self.client.get(url)).await?;
        Ok(envelope
            .items
            .unwrap_or_default()
            .into_iter()
            .map(ContentItem::from)
            .collect())
    }

    async fn add_item(&self, request: &AddItemRequest) -> Result<ContentItem, RemoteError> {
        let url = self.endpoint(&["add"]);
        debug!(%url, method = request.method.as_str(), force = request.force, "POST add");
        let envelope = self.send(self.client.post(url).json(request)).await?;
        envelope
            .item
            .map(ContentItem::from)
            .ok_or_else(|| RemoteError::Decode("add response carried no item".into()))
    }

    async fn update_item(&self, id: &RemoteId, update: &ItemUpdate) -> Result<(), RemoteError> {
        let url = self.endpoint(&["item", id.as_str()]);
        debug!(%url, "PUT item");
        self.send(self.client.put(url).json(&UpdateBody::from(update)))
            .await?;
        Ok(())
    }

    async fn delete_item(&self, id: &RemoteId) -> Result<(), RemoteError> {
        let url = self.endpoint(&["item", id.as_str()]);
        debug!(%url, "DELETE item");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn search_items(&self, query: &str) -> Result<Vec<ContentItem>, RemoteError> {
        let mut url = self.endpoint(&["search"]);
        url.query_pairs_mut().append_pair("q", query);
        debug!(%url, "GET search");
        let envelope = self.fetch_list(self.client.get(url)).await?;
        Ok(envelope
            .results
            .unwrap_or_default()
            .into_iter()
            .map(ContentItem::from)
            .collect())
    }
}
