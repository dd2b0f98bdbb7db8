//! Database models for ratings.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use reelrate_core::ratings::Rating;

/// Database model for ratings
#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::ratings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RatingDB {
    pub movie_title: String,
    pub rater_id: String,
    pub rating: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl RatingDB {
    pub fn from_domain(domain: Rating, now: NaiveDateTime) -> Self {
        Self {
            movie_title: domain.movie_title,
            rater_id: domain.rater_id,
            rating: domain.rating,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<RatingDB> for Rating {
    fn from(db: RatingDB) -> Self {
        Self {
            movie_title: db.movie_title,
            rater_id: db.rater_id,
            rating: db.rating,
        }
    }
}
