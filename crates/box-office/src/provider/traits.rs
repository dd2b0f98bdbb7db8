//! Box-office provider trait definition.

use async_trait::async_trait;

use crate::errors::BoxOfficeError;
use crate::models::BoxOfficeData;

/// Trait for box-office data sources.
///
/// Implementations perform a single lookup per call and report every failure
/// as a [`BoxOfficeError`]. Swallowing failures is the caller's decision.
#[async_trait]
pub trait BoxOfficeProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs.
    fn id(&self) -> &'static str;

    /// Fetch box-office figures for a movie title.
    async fn fetch_box_office(&self, title: &str) -> Result<BoxOfficeData, BoxOfficeError>;
}
