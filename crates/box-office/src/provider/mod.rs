//! Box-office provider abstractions and implementations.

mod traits;

pub mod box_office_api;

pub use traits::BoxOfficeProvider;
