use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use reelrate_box_office::BoxOfficeProvider;
use std::sync::Arc;
use std::time::Duration;

use super::box_office_model::BoxOfficeEnrichment;
use super::box_office_traits::BoxOfficeServiceTrait;

/// Best-effort enrichment on top of a box-office provider.
///
/// Bounds every lookup with `timeout` and turns all provider failures into
/// "no data". Failures are logged, never returned.
pub struct BoxOfficeService {
    provider: Arc<dyn BoxOfficeProvider>,
    timeout: Duration,
}

impl BoxOfficeService {
    pub fn new(provider: Arc<dyn BoxOfficeProvider>, timeout: Duration) -> Self {
        BoxOfficeService { provider, timeout }
    }
}

#[async_trait]
impl BoxOfficeServiceTrait for BoxOfficeService {
    async fn get_box_office_data(&self, movie_title: &str) -> Option<BoxOfficeEnrichment> {
        let lookup = self.provider.fetch_box_office(movie_title);
        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(data)) => {
                debug!(
                    "Box-office data for '{}' received from {}",
                    movie_title,
                    self.provider.id()
                );
                Some(BoxOfficeEnrichment::from_provider_data(data, Utc::now()))
            }
            Ok(Err(e)) if e.is_transport() => {
                warn!(
                    "Box-office provider {} unreachable for '{}': {}",
                    self.provider.id(),
                    movie_title,
                    e
                );
                None
            }
            Ok(Err(e)) => {
                warn!(
                    "Box-office provider {} returned no usable data for '{}': {}",
                    self.provider.id(),
                    movie_title,
                    e
                );
                None
            }
            Err(_) => {
                warn!(
                    "Box-office lookup for '{}' via {} timed out after {:?}",
                    movie_title,
                    self.provider.id(),
                    self.timeout
                );
                None
            }
        }
    }
}
