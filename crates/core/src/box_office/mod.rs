//! Box-office module - enrichment models, service, and traits.

mod box_office_model;
mod box_office_service;
mod box_office_traits;

pub use box_office_model::{BoxOffice, BoxOfficeEnrichment, Revenue};
pub use box_office_service::BoxOfficeService;
pub use box_office_traits::BoxOfficeServiceTrait;
