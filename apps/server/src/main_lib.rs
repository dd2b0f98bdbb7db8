use std::sync::Arc;

use crate::config::Config;
use reelrate_box_office::BoxOfficeApiProvider;
use reelrate_core::{
    box_office::{BoxOfficeService, BoxOfficeServiceTrait},
    movies::{MovieService, MovieServiceTrait},
    ratings::{RatingService, RatingServiceTrait},
};
use reelrate_storage_sqlite::{
    db::{self, write_actor},
    movies::MovieRepository,
    ratings::RatingRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub movie_service: Arc<dyn MovieServiceTrait + Send + Sync>,
    pub rating_service: Arc<dyn RatingServiceTrait + Send + Sync>,
    pub auth_token: Option<String>,
}

/// Installs the global subscriber. Records emitted through the `log` facade
/// by the library crates are forwarded as well.
pub fn init_tracing() {
    let log_format = std::env::var("RR_LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn build_box_office_service(config: &Config) -> Option<Arc<dyn BoxOfficeServiceTrait>> {
    let Some(box_office) = config.box_office.as_ref() else {
        tracing::info!("BOXOFFICE_URL or BOXOFFICE_API_KEY not set; enrichment disabled");
        return None;
    };
    tracing::info!("Box-office enrichment enabled via {}", box_office.url);
    let provider = BoxOfficeApiProvider::with_timeout(
        box_office.url.clone(),
        box_office.api_key.clone(),
        box_office.timeout,
    );
    Some(Arc::new(BoxOfficeService::new(
        Arc::new(provider),
        box_office.timeout,
    )))
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let movie_repository = Arc::new(MovieRepository::new(pool.clone(), writer.clone()));
    let rating_repository = Arc::new(RatingRepository::new(pool.clone(), writer.clone()));

    let movie_service = Arc::new(MovieService::new(
        movie_repository.clone(),
        build_box_office_service(config),
    ));
    let rating_service = Arc::new(RatingService::new(rating_repository, movie_repository));

    if config.auth_token.is_none() {
        tracing::warn!("AUTH_TOKEN not set; the API is not protected");
    }

    Ok(Arc::new(AppState {
        movie_service,
        rating_service,
        auth_token: config.auth_token.clone(),
    }))
}
