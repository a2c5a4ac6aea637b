use std::sync::Arc;

use sqlx::PgPool;

use crate::advisor::CareerAdvisor;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// AI backend for every generation feature. Default: `LlmAdvisor`.
    pub advisor: Arc<dyn CareerAdvisor>,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// State for router tests: canned advisor, lazily connected pool that is
    /// never dialled as long as the request fails validation first.
    pub fn for_tests() -> Self {
        let config = Config::for_tests();
        let db = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("lazy pool");
        AppState {
            db,
            advisor: Arc::new(crate::advisor::testing::CannedAdvisor),
            config,
        }
    }
}
