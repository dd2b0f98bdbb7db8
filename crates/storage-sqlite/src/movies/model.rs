//! Database models for movies.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use log::warn;
use reelrate_core::box_office::BoxOffice;
use reelrate_core::movies::Movie;

/// Database model for movies
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::movies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MovieDB {
    pub id: String,
    pub title: String,
    pub release_date: NaiveDate,
    pub genre: String,
    pub distributor: Option<String>,
    pub budget: Option<i64>,
    pub mpa_rating: Option<String>,
    /// `BoxOffice` snapshot serialized as JSON.
    pub box_office: Option<String>,
    pub created_at: NaiveDateTime,
}

/// The mutable columns of a movie.
///
/// `None` writes NULL: the service always sends the full merged state.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::movies)]
#[diesel(treat_none_as_null = true)]
pub struct MovieChangesetDB {
    pub distributor: Option<String>,
    pub budget: Option<i64>,
    pub mpa_rating: Option<String>,
    pub box_office: Option<String>,
}

fn encode_box_office(box_office: Option<&BoxOffice>) -> Option<String> {
    box_office.and_then(|bo| match serde_json::to_string(bo) {
        Ok(json) => Some(json),
        Err(e) => {
            warn!("Failed to serialize box office snapshot: {}", e);
            None
        }
    })
}

fn decode_box_office(title: &str, raw: Option<String>) -> Option<BoxOffice> {
    raw.and_then(|json| match serde_json::from_str(&json) {
        Ok(bo) => Some(bo),
        Err(e) => {
            warn!("Ignoring unreadable box office data for '{}': {}", title, e);
            None
        }
    })
}

// Conversion to domain models
impl From<MovieDB> for Movie {
    fn from(db: MovieDB) -> Self {
        let box_office = decode_box_office(&db.title, db.box_office);
        Self {
            id: db.id,
            title: db.title,
            release_date: db.release_date,
            genre: db.genre,
            distributor: db.distributor,
            budget: db.budget,
            mpa_rating: db.mpa_rating,
            box_office,
        }
    }
}

impl From<Movie> for MovieDB {
    fn from(domain: Movie) -> Self {
        Self {
            box_office: encode_box_office(domain.box_office.as_ref()),
            id: domain.id,
            title: domain.title,
            release_date: domain.release_date,
            genre: domain.genre,
            distributor: domain.distributor,
            budget: domain.budget,
            mpa_rating: domain.mpa_rating,
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl From<&Movie> for MovieChangesetDB {
    fn from(domain: &Movie) -> Self {
        Self {
            distributor: domain.distributor.clone(),
            budget: domain.budget,
            mpa_rating: domain.mpa_rating.clone(),
            box_office: encode_box_office(domain.box_office.as_ref()),
        }
    }
}
