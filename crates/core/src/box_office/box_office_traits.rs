use async_trait::async_trait;

use super::box_office_model::BoxOfficeEnrichment;

/// Trait for best-effort box-office enrichment.
///
/// Implementations never fail: any provider problem resolves to `None`.
#[async_trait]
pub trait BoxOfficeServiceTrait: Send + Sync {
    async fn get_box_office_data(&self, movie_title: &str) -> Option<BoxOfficeEnrichment>;
}
