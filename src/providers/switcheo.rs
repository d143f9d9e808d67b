use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::core::catalog::{Catalog, CatalogProvider, PriceRecord};
use crate::providers::util::with_retry;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the price catalog from the Switcheo price feed.
pub struct SwitcheoProvider {
    base_url: String,
    client: reqwest::Client,
}

impl SwitcheoProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("swapx/0.1")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(SwitcheoProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl CatalogProvider for SwitcheoProvider {
    #[instrument(name = "CatalogFetch", skip(self))]
    async fn fetch_catalog(&self) -> Result<Catalog> {
        let url = format!("{}/prices.json", self.base_url);
        debug!("Requesting price catalog from {}", url);

        let response = with_retry(|| async { self.client.get(&url).send().await }, 3, 500)
            .await
            .with_context(|| format!("Failed to fetch price catalog from {url}"))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} while fetching price catalog from {}",
                response.status(),
                url
            ));
        }

        let response_text = response
            .text()
            .await
            .context("Failed to read price catalog response")?;

        // Check for empty or non-JSON responses before parsing
        if response_text.trim().is_empty() {
            return Err(anyhow!("Received empty price catalog from {}", url));
        }

        let records: Vec<PriceRecord> = serde_json::from_str(&response_text)
            .with_context(|| format!("Failed to parse price catalog from {url}"))?;
        debug!("Fetched {} price records", records.len());

        let usable = records.into_iter().filter(|record| {
            if record.price.is_finite() && record.price > 0.0 {
                true
            } else {
                warn!(
                    "Skipping quote for {} with unusable price {}",
                    record.currency, record.price
                );
                false
            }
        });

        Ok(Catalog::from_records(usable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(mock_response: &str, status_code: u16) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/prices.json"))
            .respond_with(ResponseTemplate::new(status_code).set_body_string(mock_response))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_successful_catalog_fetch() {
        let mock_response = r#"[
            {"currency": "BTC", "date": "2023-08-29T09:10:52.000Z", "price": 26002.82},
            {"currency": "ETH", "date": "2023-08-29T09:10:52.000Z", "price": 1645.93},
            {"currency": "BTC", "date": "2023-08-29T09:11:24.000Z", "price": 26004.10}
        ]"#;
        let mock_server = create_mock_server(mock_response, 200).await;

        let provider = SwitcheoProvider::new(&mock_server.uri()).unwrap();
        let catalog = provider.fetch_catalog().await.unwrap();

        assert_eq!(catalog.len(), 2);
        // last quote wins, first-seen position is kept
        assert_eq!(catalog.unit_price("BTC"), Some(26004.10));
        assert_eq!(catalog.codes().collect::<Vec<_>>(), vec!["BTC", "ETH"]);
        assert_eq!(
            catalog.get("ETH").map(|r| r.date.as_str()),
            Some("2023-08-29T09:10:52.000Z")
        );
    }

    #[tokio::test]
    async fn test_unusable_prices_are_skipped() {
        let mock_response = r#"[
            {"currency": "BTC", "date": "2023-08-29T09:10:52.000Z", "price": 26002.82},
            {"currency": "RATL", "date": "2023-08-29T09:10:52.000Z", "price": 0.0},
            {"currency": "NEG", "date": "2023-08-29T09:10:52.000Z", "price": -2.5}
        ]"#;
        let mock_server = create_mock_server(mock_response, 200).await;

        let provider = SwitcheoProvider::new(&mock_server.uri()).unwrap();
        let catalog = provider.fetch_catalog().await.unwrap();

        assert_eq!(catalog.codes().collect::<Vec<_>>(), vec!["BTC"]);
    }

    #[tokio::test]
    async fn test_empty_feed_yields_empty_catalog() {
        let mock_server = create_mock_server("[]", 200).await;

        let provider = SwitcheoProvider::new(&mock_server.uri()).unwrap();
        let catalog = provider.fetch_catalog().await.unwrap();

        assert!(catalog.is_empty());
        assert_eq!(catalog.default_pair(), None);
    }

    #[tokio::test]
    async fn test_server_error_response() {
        let mock_server = create_mock_server("Server Error", 500).await;

        let provider = SwitcheoProvider::new(&mock_server.uri()).unwrap();
        let result = provider.fetch_catalog().await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().starts_with("HTTP error: 500"));
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_response = r#"{"not": "an array"}"#;
        let mock_server = create_mock_server(mock_response, 200).await;

        let provider = SwitcheoProvider::new(&mock_server.uri()).unwrap();
        let result = provider.fetch_catalog().await;

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse price catalog")
        );
    }

    #[tokio::test]
    async fn test_blank_response() {
        let mock_server = create_mock_server("  ", 200).await;

        let provider = SwitcheoProvider::new(&mock_server.uri()).unwrap();
        let result = provider.fetch_catalog().await;

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Received empty price catalog")
        );
    }
}
