/// Catalog client — the only code that talks to the external jobs API.
///
/// The catalog is fetched fresh on every call; nothing is cached, so catalog
/// indices are only valid within the `Vec` returned by one `fetch`.
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::job::{normalize_catalog, CatalogResponse, JobPosting};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog API returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Catalog payload could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    url: String,
}

impl CatalogClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, CatalogError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url,
        })
    }

    /// Fetches the catalog and returns the normalized postings.
    /// Postings without open positions are already removed.
    pub async fn fetch(&self) -> Result<Vec<JobPosting>, CatalogError> {
        let response = self
            .client
            .get(&self.url)
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Catalog API returned {}: {}", status, body);
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let payload: CatalogResponse = serde_json::from_str(&body)?;
        let fetched = payload.job_listings.len();
        let postings = normalize_catalog(payload.job_listings);

        debug!(
            fetched,
            open = postings.len(),
            "Catalog fetched and normalized"
        );

        Ok(postings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_normalizes_and_drops_closed_postings() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/jobs")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"job_listings": [
                    {"title": "Closed", "numberOfOpenings": 0},
                    {"title": "Open", "numberOfOpenings": 2, "yearsOfExperienceRequired": 3}
                ]}"#,
            )
            .create_async()
            .await;

        let client =
            CatalogClient::new(format!("{}/jobs", server.url()), Duration::from_secs(5)).unwrap();
        let postings = client.fetch().await.unwrap();

        mock.assert_async().await;
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].title, "Open");
        assert_eq!(postings[0].years_of_experience.map(|y| y.max), Some(3));
    }

    #[tokio::test]
    async fn test_fetch_surfaces_upstream_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/jobs")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let client =
            CatalogClient::new(format!("{}/jobs", server.url()), Duration::from_secs(5)).unwrap();
        match client.fetch().await {
            Err(CatalogError::Status { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_rejects_malformed_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/jobs")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client =
            CatalogClient::new(format!("{}/jobs", server.url()), Duration::from_secs(5)).unwrap();
        assert!(matches!(client.fetch().await, Err(CatalogError::Parse(_))));
    }
}
