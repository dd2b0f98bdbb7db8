//! Movies module - domain models, services, and traits.

mod movies_cursor;
mod movies_model;
mod movies_service;
mod movies_traits;


pub use movies_cursor::MovieCursor;
pub use movies_model::{Movie, MovieFilter, MoviePage, MovieUpdate, NewMovie};
pub use movies_service::{generate_movie_id, MovieService};
pub use movies_traits::{MovieRepositoryTrait, MovieServiceTrait};
