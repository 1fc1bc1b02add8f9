use crate::error::{Result, ScanError};
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use url::Url;

pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

const DEFAULT_USER_AGENT: &str = "Wordbender/0.1 (https://github.com/trapdoorsec/wordbender)";

/// Fetches a batch of pages concurrently. One task per URL; the first
/// transport failure aborts the rest of the batch.
pub struct Fetcher {
    client: Client,
    progress_callback: Option<ProgressCallback>,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            progress_callback: None,
        })
    }

    /// Called with the input position and URL of every page as it arrives.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Returns the body of every page, aligned with `urls`.
    ///
    /// Error statuses still yield their body; only transport errors fail.
    pub async fn fetch_all(&self, urls: &[String]) -> Result<Vec<String>> {
        for url in urls {
            Url::parse(url).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", url, e)))?;
        }

        info!("Fetching {} pages", urls.len());
        let start = Instant::now();

        // Dropping the set on an early return aborts whatever is still in flight.
        let mut tasks = JoinSet::new();
        for (idx, url) in urls.iter().enumerate() {
            let client = self.client.clone();
            let url = url.clone();
            tasks.spawn(async move {
                let body = Self::fetch_page(&client, &url).await;
                (idx, url, body)
            });
        }

        let mut bodies: Vec<Option<String>> = vec![None; urls.len()];
        while let Some(joined) = tasks.join_next().await {
            let (idx, url, body) = joined?;
            let body = body?;

            if let Some(ref callback) = self.progress_callback {
                callback(idx, url);
            }
            bodies[idx] = Some(body);
        }

        info!(
            "Fetched {} pages in {:.2}s",
            urls.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(bodies.into_iter().flatten().collect())
    }

    async fn fetch_page(client: &Client, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("HTTP {} from {}", status.as_u16(), url);
        }

        Ok(response.text().await?)
    }
}
