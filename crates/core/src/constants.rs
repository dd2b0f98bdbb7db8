/// Page size used when a listing request does not ask for one
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on a single listing page
pub const MAX_PAGE_SIZE: i64 = 100;

/// Calendar format accepted for release dates
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Lowest accepted rating score (inclusive)
pub const MIN_RATING_SCORE: f64 = 0.0;

/// Highest accepted rating score (inclusive)
pub const MAX_RATING_SCORE: f64 = 5.0;

/// Scores must be a multiple of this step
pub const RATING_SCORE_STEP: f64 = 0.5;

/// Currency stamped on enrichment snapshots
pub const BOX_OFFICE_CURRENCY: &str = "USD";

/// Source label stamped on enrichment snapshots
pub const BOX_OFFICE_SOURCE: &str = "BoxOfficeAPI";
