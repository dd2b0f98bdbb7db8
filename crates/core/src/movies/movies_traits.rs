//! Movie repository and service traits.
//!
//! These traits define the contract for movie operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::movies_cursor::MovieCursor;
use super::movies_model::{Movie, MovieFilter, MoviePage, MovieUpdate, NewMovie};
use crate::errors::Result;

/// Trait defining the contract for Movie repository operations.
#[async_trait]
pub trait MovieRepositoryTrait: Send + Sync {
    /// Inserts a complete movie record in one atomic write.
    ///
    /// A duplicate title must surface as `DatabaseError::UniqueViolation`.
    async fn create(&self, movie: Movie) -> Result<Movie>;

    /// Looks a movie up by its exact title. Absence is `Ok(None)`.
    fn get_by_title(&self, title: &str) -> Result<Option<Movie>>;

    /// Lists movies matching every predicate set on `filter`.
    ///
    /// Rows are ordered by release date descending, then title ascending.
    /// `limit` is the already-normalized page size and `cursor` the decoded
    /// position of the last row of the previous page.
    fn list(
        &self,
        filter: &MovieFilter,
        limit: i64,
        cursor: Option<&MovieCursor>,
    ) -> Result<MoviePage>;

    /// Overwrites the mutable fields (distributor, budget, MPA rating,
    /// box office) of the movie with the same title.
    async fn update(&self, movie: Movie) -> Result<Movie>;
}

/// Trait defining the contract for Movie service operations.
#[async_trait]
pub trait MovieServiceTrait: Send + Sync {
    /// Validates, enriches and persists a new movie.
    async fn create_movie(&self, new_movie: NewMovie) -> Result<Movie>;

    /// Retrieves a movie by title, failing with `NotFound` when absent.
    fn get_movie(&self, title: &str) -> Result<Movie>;

    /// Lists one page of movies.
    fn list_movies(&self, filter: MovieFilter) -> Result<MoviePage>;

    /// Applies user changes to the mutable fields of a movie.
    async fn update_movie(&self, title: &str, update: MovieUpdate) -> Result<Movie>;

    /// Re-fetches the box-office snapshot for a movie.
    async fn refresh_box_office(&self, title: &str) -> Result<Movie>;
}
