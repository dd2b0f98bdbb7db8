use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use reelrate_core::errors::{Error, ValidationError};
use reelrate_core::movies::{Movie, MovieCursor, MovieFilter, MoviePage, MovieRepositoryTrait};
use reelrate_core::Result;

use super::model::{MovieChangesetDB, MovieDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::movies;

/// Escapes `LIKE` wildcards so user text is matched literally.
fn contains_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate)> {
    match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) {
        (Some(first), Some(last)) => Ok((first, last)),
        _ => Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Year {} is out of range",
            year
        )))),
    }
}

pub struct MovieRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MovieRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        MovieRepository { pool, writer }
    }

    fn list_impl(
        &self,
        filter: &MovieFilter,
        limit: i64,
        cursor: Option<&MovieCursor>,
    ) -> Result<MoviePage> {
        let mut query = movies::table.select(MovieDB::as_select()).into_boxed();

        if let Some(q) = MovieFilter::text(&filter.q) {
            query = query.filter(movies::title.like(contains_pattern(q)).escape('\\'));
        }
        if let Some(year) = filter.year {
            let (first, last) = year_bounds(year)?;
            query = query.filter(movies::release_date.between(first, last));
        }
        if let Some(genre) = MovieFilter::text(&filter.genre) {
            query = query.filter(movies::genre.like(contains_pattern(genre)).escape('\\'));
        }
        if let Some(distributor) = MovieFilter::text(&filter.distributor) {
            query = query.filter(
                movies::distributor
                    .like(contains_pattern(distributor))
                    .escape('\\'),
            );
        }
        if let Some(max_budget) = filter.budget {
            query = query.filter(movies::budget.le(max_budget));
        }
        if let Some(mpa_rating) = MovieFilter::text(&filter.mpa_rating) {
            query = query.filter(movies::mpa_rating.eq(mpa_rating.to_string()));
        }
        if let Some(cursor) = cursor {
            query = query.filter(
                movies::release_date.lt(cursor.release_date).or(movies::release_date
                    .eq(cursor.release_date)
                    .and(movies::title.gt(cursor.title.clone()))),
            );
        }

        let mut conn = get_connection(&self.pool)?;
        let rows = query
            .order((movies::release_date.desc(), movies::title.asc()))
            .limit(limit + 1)
            .load::<MovieDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(MoviePage::from_overfetched(
            rows.into_iter().map(Movie::from).collect(),
            limit,
        ))
    }
}

#[async_trait]
impl MovieRepositoryTrait for MovieRepository {
    async fn create(&self, movie: Movie) -> Result<Movie> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Movie> {
                let movie_db: MovieDB = movie.into();
                let result_db = diesel::insert_into(movies::table)
                    .values(&movie_db)
                    .returning(MovieDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Movie::from(result_db))
            })
            .await
    }

    fn get_by_title(&self, title: &str) -> Result<Option<Movie>> {
        let mut conn = get_connection(&self.pool)?;
        let movie_db = movies::table
            .filter(movies::title.eq(title))
            .select(MovieDB::as_select())
            .first::<MovieDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(movie_db.map(Movie::from))
    }

    fn list(
        &self,
        filter: &MovieFilter,
        limit: i64,
        cursor: Option<&MovieCursor>,
    ) -> Result<MoviePage> {
        self.list_impl(filter, limit, cursor)
    }

    async fn update(&self, movie: Movie) -> Result<Movie> {
        let changeset = MovieChangesetDB::from(&movie);
        let title = movie.title;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Movie> {
                let target = movies::table.filter(movies::title.eq(title.as_str()));
                let result_db = diesel::update(target)
                    .set(&changeset)
                    .returning(MovieDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?;
                result_db
                    .map(Movie::from)
                    .ok_or_else(|| Error::NotFound(format!("Movie '{}' not found", title)))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, write_actor::spawn_writer};
    use chrono::{TimeZone, Utc};
    use reelrate_core::box_office::{BoxOffice, Revenue};
    use reelrate_core::movies::{MovieService, MovieServiceTrait, NewMovie};
    use tempfile::tempdir;

    async fn create_test_repository() -> (MovieRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        (MovieRepository::new(Arc::clone(&pool), writer), temp_dir)
    }

    fn movie(title: &str, date: &str, genre: &str) -> Movie {
        Movie {
            id: format!("m_{}", title.to_lowercase().replace(' ', "_")),
            title: title.to_string(),
            release_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            genre: genre.to_string(),
            distributor: None,
            budget: None,
            mpa_rating: None,
            box_office: None,
        }
    }

    async fn seed(repo: &MovieRepository) {
        let mut dune = movie("Dune", "2021-10-22", "Sci-Fi");
        dune.distributor = Some("Warner Bros.".to_string());
        dune.budget = Some(165_000_000);
        dune.mpa_rating = Some("PG-13".to_string());

        let mut arrival = movie("Arrival", "2016-11-11", "Sci-Fi Drama");
        arrival.distributor = Some("Paramount".to_string());
        arrival.budget = Some(47_000_000);
        arrival.mpa_rating = Some("PG-13".to_string());

        let mut tenet = movie("Tenet", "2020-08-26", "Action");
        tenet.distributor = Some("Warner Bros.".to_string());
        tenet.budget = Some(205_000_000);

        let mut eternals = movie("Eternals", "2021-10-22", "Action");
        eternals.mpa_rating = Some("PG-13".to_string());

        for m in [dune, arrival, tenet, eternals] {
            repo.create(m).await.expect("seed insert");
        }
    }

    fn titles(page: &MoviePage) -> Vec<&str> {
        page.items.iter().map(|m| m.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let (repo, _temp_dir) = create_test_repository().await;
        let mut dune = movie("Dune", "2021-10-22", "Sci-Fi");
        dune.box_office = Some(BoxOffice {
            revenue: Revenue {
                worldwide: 402_027_830,
                opening_weekend_usa: Some(41_010_000),
            },
            currency: "USD".to_string(),
            source: "BoxOfficeAPI".to_string(),
            last_updated: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        });

        let created = repo.create(dune.clone()).await.unwrap();
        assert_eq!(created, dune);
        assert_eq!(repo.get_by_title("Dune").unwrap(), Some(dune));
        assert_eq!(repo.get_by_title("dune").unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_title_is_unique_violation() {
        let (repo, _temp_dir) = create_test_repository().await;
        repo.create(movie("Dune", "2021-10-22", "Sci-Fi"))
            .await
            .unwrap();

        let mut again = movie("Dune", "1984-12-14", "Sci-Fi");
        again.id = "m_other".to_string();
        let err = repo.create(again).await.unwrap_err();

        assert!(err.is_unique_violation());
        let page = repo.list(&MovieFilter::default(), 10, None).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].release_date.to_string(), "2021-10-22");
    }

    #[tokio::test]
    async fn test_list_orders_and_pages() {
        let (repo, _temp_dir) = create_test_repository().await;
        seed(&repo).await;

        let first = repo.list(&MovieFilter::default(), 3, None).unwrap();
        assert_eq!(titles(&first), vec!["Dune", "Eternals", "Tenet"]);
        let token = first.next_cursor.clone().expect("cursor expected");

        let cursor = MovieCursor::decode(&token).unwrap();
        let second = repo
            .list(&MovieFilter::default(), 3, Some(&cursor))
            .unwrap();
        assert_eq!(titles(&second), vec!["Arrival"]);
        assert!(second.next_cursor.is_none());

        let all = repo.list(&MovieFilter::default(), 10, None).unwrap();
        assert_eq!(all.items.len(), 4);
        assert!(all.next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_cursor_splits_release_date_ties() {
        let (repo, _temp_dir) = create_test_repository().await;
        seed(&repo).await;

        let first = repo.list(&MovieFilter::default(), 1, None).unwrap();
        assert_eq!(titles(&first), vec!["Dune"]);
        let cursor = MovieCursor::decode(first.next_cursor.as_deref().unwrap()).unwrap();

        let second = repo
            .list(&MovieFilter::default(), 1, Some(&cursor))
            .unwrap();
        assert_eq!(titles(&second), vec!["Eternals"]);
    }

    #[tokio::test]
    async fn test_filters_combine_with_and() {
        let (repo, _temp_dir) = create_test_repository().await;
        seed(&repo).await;

        let by_title = MovieFilter {
            q: Some("un".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&repo.list(&by_title, 10, None).unwrap()), vec!["Dune"]);

        let by_year = MovieFilter {
            year: Some(2021),
            ..Default::default()
        };
        assert_eq!(
            titles(&repo.list(&by_year, 10, None).unwrap()),
            vec!["Dune", "Eternals"]
        );

        let by_genre = MovieFilter {
            genre: Some("sci-fi".to_string()),
            ..Default::default()
        };
        assert_eq!(
            titles(&repo.list(&by_genre, 10, None).unwrap()),
            vec!["Dune", "Arrival"]
        );

        let combined = MovieFilter {
            distributor: Some("Warner".to_string()),
            budget: Some(200_000_000),
            mpa_rating: Some("PG-13".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&repo.list(&combined, 10, None).unwrap()), vec!["Dune"]);

        let wildcard = MovieFilter {
            q: Some("%".to_string()),
            ..Default::default()
        };
        assert!(repo.list(&wildcard, 10, None).unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn test_update_overwrites_mutable_fields() {
        let (repo, _temp_dir) = create_test_repository().await;
        let created = repo
            .create(movie("Dune", "2021-10-22", "Sci-Fi"))
            .await
            .unwrap();

        let mut changed = created.clone();
        changed.distributor = Some("Warner Bros.".to_string());
        changed.budget = Some(165_000_000);
        changed.genre = "Ignored".to_string();

        let updated = repo.update(changed).await.unwrap();
        assert_eq!(updated.distributor.as_deref(), Some("Warner Bros."));
        assert_eq!(updated.budget, Some(165_000_000));
        assert_eq!(updated.genre, "Sci-Fi");
        assert_eq!(updated.id, created.id);
    }

    #[tokio::test]
    async fn test_update_missing_title_is_not_found() {
        let (repo, _temp_dir) = create_test_repository().await;
        let err = repo
            .update(movie("Ghost", "2000-01-01", "Drama"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    fn new_movie(title: &str) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            release_date: "1977-05-25".to_string(),
            genre: "Sci-Fi".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_of_titles_sharing_a_slug_all_succeed() {
        let (repo, _temp_dir) = create_test_repository().await;
        let service = Arc::new(MovieService::new(Arc::new(repo), None));

        let mut handles = Vec::new();
        for i in 0..200 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service
                    .create_movie(new_movie(&format!("Star Wars Episode {}", i)))
                    .await
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            let created = handle.await.unwrap().expect("distinct titles must not conflict");
            ids.push(created.id);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 200);

        let page = service
            .list_movies(MovieFilter {
                limit: Some(100),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(page.items.len(), 100);
        assert!(page.next_cursor.is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_of_one_title_keep_a_single_row() {
        let (repo, _temp_dir) = create_test_repository().await;
        let service = Arc::new(MovieService::new(Arc::new(repo), None));

        let mut handles = Vec::new();
        for _ in 0..10 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service.create_movie(new_movie("Dune")).await
            }));
        }

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(e) => assert!(matches!(e, Error::Conflict(_)), "unexpected error: {}", e),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(
            service.list_movies(MovieFilter::default()).unwrap().items.len(),
            1
        );
    }
}
