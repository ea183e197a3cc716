use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::Config,
    db::{create_pool, PgWishlistStore, WishlistStore},
    services::{
        enrichment::EnrichmentOrchestrator,
        reviews::{ReviewResolver, TmdbProvider},
        sentiment::SentimentClassifier,
        suggestions::SuggestionCatalog,
    },
};

/// Shared application state
///
/// All collaborators are constructed once at startup and injected here; the
/// handlers only read. Nothing in the state is mutated per request.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<EnrichmentOrchestrator>,
    pub catalog: Arc<SuggestionCatalog>,
}

impl AppState {
    pub fn new(orchestrator: Arc<EnrichmentOrchestrator>, catalog: Arc<SuggestionCatalog>) -> Self {
        Self {
            orchestrator,
            catalog,
        }
    }

    /// Wires the production collaborators from configuration: the TMDB
    /// review provider, the VADER classifier, the suggestion catalog, and
    /// (when a database URL is configured) the Postgres wishlist store.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = TmdbProvider::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            Duration::from_secs(config.provider_timeout_secs),
        )?;
        let classifier = Arc::new(SentimentClassifier::new());
        let catalog = Arc::new(SuggestionCatalog::load(&config.catalog_path));

        let wishlist: Option<Arc<dyn WishlistStore>> = match &config.database_url {
            Some(url) => {
                let pool = create_pool(url).await?;
                Some(Arc::new(PgWishlistStore::new(pool)))
            }
            None => {
                tracing::warn!("No database URL configured, wishlist flag will always be false");
                None
            }
        };

        let resolver = ReviewResolver::new(Arc::new(provider), classifier);
        let orchestrator = Arc::new(EnrichmentOrchestrator::new(
            resolver,
            wishlist,
            catalog.clone(),
        ));

        Ok(Self::new(orchestrator, catalog))
    }
}
