//! HTTP box-office provider.
//!
//! Queries `GET {base_url}?title=<title>&apikey=<key>` and expects a JSON body:
//!
//! ```json
//! {
//!   "title": "Dune",
//!   "distributor": "Warner Bros.",
//!   "budget": 165000000,
//!   "mpa_rating": "PG-13",
//!   "revenue": { "worldwide": 402027830, "opening_weekend_usa": 41010000 }
//! }
//! ```

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::errors::BoxOfficeError;
use crate::models::BoxOfficeData;
use crate::provider::BoxOfficeProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "BOX_OFFICE_API";

/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct BoxOfficeResponse {
    #[serde(default)]
    title: String,
    #[serde(default)]
    distributor: Option<String>,
    #[serde(default)]
    budget: Option<i64>,
    #[serde(default)]
    mpa_rating: Option<String>,
    #[serde(default)]
    revenue: RevenueResponse,
}

#[derive(Debug, Default, Deserialize)]
struct RevenueResponse {
    #[serde(default)]
    worldwide: i64,
    #[serde(default)]
    opening_weekend_usa: Option<i64>,
}

impl BoxOfficeResponse {
    fn into_data(self, requested_title: &str) -> BoxOfficeData {
        let title = if self.title.trim().is_empty() {
            requested_title.to_string()
        } else {
            self.title
        };
        BoxOfficeData {
            title,
            distributor: non_empty(self.distributor),
            budget: self.budget.filter(|b| *b > 0),
            mpa_rating: non_empty(self.mpa_rating),
            worldwide_revenue: self.revenue.worldwide,
            opening_weekend_usa: self.revenue.opening_weekend_usa.filter(|v| *v > 0),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Box-office provider backed by an HTTP API authenticated with an API key.
///
/// # Example
///
/// ```ignore
/// use reelrate_box_office::BoxOfficeApiProvider;
///
/// let provider = BoxOfficeApiProvider::new(
///     "https://boxoffice.example.com/v1/movies".to_string(),
///     "your_api_key".to_string(),
/// );
/// ```
pub struct BoxOfficeApiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl BoxOfficeApiProvider {
    /// Create a provider using the default request timeout.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self::with_timeout(base_url, api_key, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a provider with an explicit request timeout.
    pub fn with_timeout(base_url: String, api_key: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn build_url(&self, title: &str) -> Result<Url, BoxOfficeError> {
        Url::parse_with_params(
            &self.base_url,
            &[("title", title), ("apikey", self.api_key.as_str())],
        )
        .map_err(|e| BoxOfficeError::InvalidUrl(e.to_string()))
    }
}

#[async_trait]
impl BoxOfficeProvider for BoxOfficeApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_box_office(&self, title: &str) -> Result<BoxOfficeData, BoxOfficeError> {
        let url = self.build_url(title)?;
        debug!("Fetching box-office data for '{}' from {}", title, PROVIDER_ID);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                BoxOfficeError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                BoxOfficeError::Network(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BoxOfficeError::UnexpectedStatus {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                BoxOfficeError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                BoxOfficeError::Network(e)
            }
        })?;

        let parsed: BoxOfficeResponse =
            serde_json::from_slice(&body).map_err(|e| BoxOfficeError::InvalidResponse {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        Ok(parsed.into_data(title))
    }
}
