use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::{avg, count_star};
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel::SqliteConnection;
use std::sync::Arc;

use reelrate_core::ratings::{Rating, RatingAggregate, RatingRepositoryTrait};
use reelrate_core::Result;

use super::model::RatingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::ratings;

pub struct RatingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl RatingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        RatingRepository { pool, writer }
    }
}

#[async_trait]
impl RatingRepositoryTrait for RatingRepository {
    async fn upsert(&self, rating: Rating) -> Result<Rating> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Rating> {
                let now = Utc::now().naive_utc();
                let rating_db = RatingDB::from_domain(rating, now);
                let result_db = diesel::insert_into(ratings::table)
                    .values(&rating_db)
                    .on_conflict((ratings::movie_title, ratings::rater_id))
                    .do_update()
                    .set((
                        ratings::rating.eq(excluded(ratings::rating)),
                        ratings::updated_at.eq(now),
                    ))
                    .returning(RatingDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Rating::from(result_db))
            })
            .await
    }

    fn get_by_movie_and_rater(
        &self,
        movie_title: &str,
        rater_id: &str,
    ) -> Result<Option<Rating>> {
        let mut conn = get_connection(&self.pool)?;
        let rating_db = ratings::table
            .find((movie_title, rater_id))
            .select(RatingDB::as_select())
            .first::<RatingDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(rating_db.map(Rating::from))
    }

    fn get_aggregate_by_movie(&self, movie_title: &str) -> Result<RatingAggregate> {
        let mut conn = get_connection(&self.pool)?;
        let (mean, count) = ratings::table
            .filter(ratings::movie_title.eq(movie_title))
            .select((avg(ratings::rating), count_star()))
            .first::<(Option<f64>, i64)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(RatingAggregate::new(mean, count))
    }
}
