use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use super::movies_model::{Movie, MovieFilter, MoviePage, MovieUpdate, NewMovie};
use super::movies_traits::{MovieRepositoryTrait, MovieServiceTrait};
use crate::box_office::{BoxOfficeEnrichment, BoxOfficeServiceTrait};
use crate::errors::{Error, Result};

const ID_SLUG_LEN: usize = 10;

/// Attempts at inserting a movie whose generated id is already taken.
const MAX_ID_ATTEMPTS: usize = 3;

/// Builds an opaque movie id: `m_<slug>_<unix millis>`.
///
/// The slug is the first ten characters of the lowercased title with spaces
/// replaced by underscores.
pub fn generate_movie_id(title: &str, millis: i64) -> String {
    let slug: String = title
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .take(ID_SLUG_LEN)
        .collect();
    format!("m_{}_{}", slug, millis)
}

/// Merges enrichment into a movie. Values already set on the movie win.
fn merge_enrichment(movie: &mut Movie, enrichment: BoxOfficeEnrichment) {
    if movie.distributor.is_none() {
        movie.distributor = enrichment.distributor;
    }
    if movie.budget.is_none() {
        movie.budget = enrichment.budget;
    }
    if movie.mpa_rating.is_none() {
        movie.mpa_rating = enrichment.mpa_rating;
    }
    movie.box_office = Some(enrichment.box_office);
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn conflict(title: &str) -> Error {
    Error::Conflict(format!("Movie '{}' already exists", title))
}

/// Service for creating, reading and updating movies.
pub struct MovieService {
    repository: Arc<dyn MovieRepositoryTrait>,
    box_office_service: Option<Arc<dyn BoxOfficeServiceTrait>>,
    /// Millisecond stamp of the last id handed out.
    last_id_millis: AtomicI64,
}

impl MovieService {
    /// Creates a new MovieService. Pass `None` to disable enrichment.
    pub fn new(
        repository: Arc<dyn MovieRepositoryTrait>,
        box_office_service: Option<Arc<dyn BoxOfficeServiceTrait>>,
    ) -> Self {
        Self {
            repository,
            box_office_service,
            last_id_millis: AtomicI64::new(0),
        }
    }

    /// Generates an id whose stamp is strictly greater than any issued before
    /// by this service, so titles sharing a slug never collide in-process.
    fn next_movie_id(&self, title: &str) -> String {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last_id_millis
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        generate_movie_id(title, now.max(previous + 1))
    }

    /// Inserts `movie`, drawing a fresh id when the current one is taken.
    ///
    /// A unique violation is a title conflict only when the title is now
    /// present in the store.
    async fn insert_with_fresh_id(&self, mut movie: Movie) -> Result<Movie> {
        let mut attempt = 1;
        loop {
            match self.repository.create(movie.clone()).await {
                Ok(created) => return Ok(created),
                Err(e) if e.is_unique_violation() => {
                    if self.repository.get_by_title(&movie.title)?.is_some() {
                        return Err(conflict(&movie.title));
                    }
                    if attempt >= MAX_ID_ATTEMPTS {
                        return Err(e);
                    }
                    warn!("Movie id '{}' already taken, generating another", movie.id);
                    movie.id = self.next_movie_id(&movie.title);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn enrich(&self, title: &str) -> Option<BoxOfficeEnrichment> {
        match &self.box_office_service {
            Some(service) => service.get_box_office_data(title).await,
            None => None,
        }
    }
}

#[async_trait]
impl MovieServiceTrait for MovieService {
    async fn create_movie(&self, new_movie: NewMovie) -> Result<Movie> {
        new_movie.validate()?;
        let release_date = new_movie.parse_release_date()?;
        let title = new_movie.title;

        if self.repository.get_by_title(&title)?.is_some() {
            return Err(conflict(&title));
        }

        let mut movie = Movie {
            id: self.next_movie_id(&title),
            title,
            release_date,
            genre: new_movie.genre.trim().to_string(),
            distributor: blank_to_none(new_movie.distributor),
            budget: new_movie.budget,
            mpa_rating: blank_to_none(new_movie.mpa_rating),
            box_office: None,
        };

        match self.enrich(&movie.title).await {
            Some(enrichment) => merge_enrichment(&mut movie, enrichment),
            None => debug!("Creating '{}' without box-office data", movie.title),
        }

        let created = self.insert_with_fresh_id(movie).await?;
        info!("Created movie '{}' ({})", created.title, created.id);
        Ok(created)
    }

    fn get_movie(&self, title: &str) -> Result<Movie> {
        self.repository
            .get_by_title(title)?
            .ok_or_else(|| Error::NotFound(format!("Movie '{}' not found", title)))
    }

    fn list_movies(&self, filter: MovieFilter) -> Result<MoviePage> {
        let cursor = filter.decoded_cursor()?;
        let limit = filter.page_size();
        self.repository.list(&filter, limit, cursor.as_ref())
    }

    async fn update_movie(&self, title: &str, update: MovieUpdate) -> Result<Movie> {
        update.validate()?;
        let mut movie = self.get_movie(title)?;
        if update.is_empty() {
            return Ok(movie);
        }

        MovieUpdate {
            distributor: blank_to_none(update.distributor),
            budget: update.budget,
            mpa_rating: blank_to_none(update.mpa_rating),
        }
        .apply_to(&mut movie);
        self.repository.update(movie).await
    }

    async fn refresh_box_office(&self, title: &str) -> Result<Movie> {
        let mut movie = self.get_movie(title)?;
        match self.enrich(title).await {
            Some(enrichment) => {
                merge_enrichment(&mut movie, enrichment);
                self.repository.update(movie).await
            }
            None => Ok(movie),
        }
    }
}
