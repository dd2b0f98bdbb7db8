//! Box-office data returned by providers.

use serde::{Deserialize, Serialize};

/// Revenue and production figures for a single title.
///
/// Empty strings and zero amounts reported by a provider are normalized to
/// `None`, so a `Some` value always carries information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxOfficeData {
    pub title: String,
    pub distributor: Option<String>,
    pub budget: Option<i64>,
    pub mpa_rating: Option<String>,
    pub worldwide_revenue: i64,
    pub opening_weekend_usa: Option<i64>,
}
