//! Box-office domain models.

use chrono::{DateTime, Utc};
use reelrate_box_office::BoxOfficeData;
use serde::{Deserialize, Serialize};

use crate::constants::{BOX_OFFICE_CURRENCY, BOX_OFFICE_SOURCE};

/// Revenue figures reported by the enrichment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revenue {
    pub worldwide: i64,
    #[serde(
        rename = "openingWeekendUSA",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub opening_weekend_usa: Option<i64>,
}

/// Revenue snapshot attached to a movie, stamped when it was fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxOffice {
    pub revenue: Revenue,
    pub currency: String,
    pub source: String,
    pub last_updated: DateTime<Utc>,
}

/// Everything a successful enrichment lookup yields.
///
/// `distributor`, `budget` and `mpa_rating` are candidates only: the movie
/// service adopts them for fields the user left unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxOfficeEnrichment {
    pub distributor: Option<String>,
    pub budget: Option<i64>,
    pub mpa_rating: Option<String>,
    pub box_office: BoxOffice,
}

impl BoxOfficeEnrichment {
    pub fn from_provider_data(data: BoxOfficeData, fetched_at: DateTime<Utc>) -> Self {
        Self {
            distributor: data.distributor,
            budget: data.budget,
            mpa_rating: data.mpa_rating,
            box_office: BoxOffice {
                revenue: Revenue {
                    worldwide: data.worldwide_revenue,
                    opening_weekend_usa: data.opening_weekend_usa,
                },
                currency: BOX_OFFICE_CURRENCY.to_string(),
                source: BOX_OFFICE_SOURCE.to_string(),
                last_updated: fetched_at,
            },
        }
    }
}
