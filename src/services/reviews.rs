//! Review resolution against the external review provider (TMDB).
//!
//! Resolution is a linear, fire-once flow with no retries: translate the
//! caller's external reference id to the provider's native id, fetch recent
//! reviews for it, and fall back to a deterministic synthetic set when
//! anything along the way yields nothing usable. The caller never sees an
//! error, only a (possibly fallback) mapping.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::Sentiment,
    services::sentiment::SentimentClassifier,
};

#[cfg(test)]
use mockall::automock;

/// Provider-returned reviews considered per title.
const MAX_REVIEWS: usize = 5;
/// Minimum trimmed review length worth displaying.
const MIN_REVIEW_CHARS: usize = 50;
const REVIEW_LANGUAGE: &str = "en-US";

/// Read-only seam to the review provider's two endpoints.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReviewProvider: Send + Sync {
    /// Translates an external reference id (e.g. an IMDB id) to the
    /// provider's native title id. `None` means the provider had no match.
    async fn find_native_id(&self, external_ref_id: &str) -> AppResult<Option<u64>>;

    /// Fetches recent review texts for a native title id, in provider order.
    async fn recent_reviews(&self, native_id: u64) -> AppResult<Vec<String>>;
}

#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    movie_results: Vec<FindMovieResult>,
}

#[derive(Debug, Deserialize)]
struct FindMovieResult {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct ReviewsResponse {
    #[serde(default)]
    results: Vec<ProviderReview>,
}

#[derive(Debug, Deserialize)]
struct ProviderReview {
    #[serde(default)]
    content: String,
}

/// TMDB implementation of [`ReviewProvider`].
#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    /// Builds the provider with a bounded per-call timeout so an
    /// unresponsive provider cannot stall the request.
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }
}

#[async_trait::async_trait]
impl ReviewProvider for TmdbProvider {
    async fn find_native_id(&self, external_ref_id: &str) -> AppResult<Option<u64>> {
        let url = format!("{}/find/{}", self.api_url, external_ref_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("external_source", "imdb_id"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB find returned status {}: {}",
                status, body
            )));
        }

        let find_response: FindResponse = response.json().await?;
        Ok(find_response.movie_results.first().map(|r| r.id))
    }

    async fn recent_reviews(&self, native_id: u64) -> AppResult<Vec<String>> {
        let url = format!("{}/movie/{}/reviews", self.api_url, native_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", REVIEW_LANGUAGE),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB reviews returned status {}: {}",
                status, body
            )));
        }

        let reviews_response: ReviewsResponse = response.json().await?;
        Ok(reviews_response
            .results
            .into_iter()
            .map(|r| r.content)
            .collect())
    }
}

/// Outcome of the id-translation step. Fallback selection is driven by this
/// state rather than by swallowed errors, so it can be tested in isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Provider returned a native id.
    Resolved(u64),
    /// Provider answered but had no match for the reference id.
    Unresolved,
    /// The translation call itself failed (network, non-200).
    Failed,
}

/// Resolves sentiment-labelled reviews for one title.
pub struct ReviewResolver {
    provider: Arc<dyn ReviewProvider>,
    classifier: Arc<SentimentClassifier>,
}

impl ReviewResolver {
    pub fn new(provider: Arc<dyn ReviewProvider>, classifier: Arc<SentimentClassifier>) -> Self {
        Self {
            provider,
            classifier,
        }
    }

    /// Produces the review mapping for a title. Never fails: any provider
    /// problem degrades to the synthetic fallback set.
    pub async fn resolve_reviews(
        &self,
        external_ref_id: &str,
        movie_title: &str,
    ) -> HashMap<String, Sentiment> {
        if external_ref_id.trim().is_empty() {
            return fallback_reviews(movie_title);
        }

        let mut reviews = HashMap::new();
        if let Resolution::Resolved(native_id) = self.translate(external_ref_id).await {
            reviews = self.fetch_labelled(native_id).await;
        }

        if reviews.is_empty() {
            tracing::info!(
                external_ref_id = %external_ref_id,
                title = %movie_title,
                "No usable provider reviews, using fallback set"
            );
            reviews = fallback_reviews(movie_title);
        }
        reviews
    }

    async fn translate(&self, external_ref_id: &str) -> Resolution {
        match self.provider.find_native_id(external_ref_id).await {
            Ok(Some(native_id)) => Resolution::Resolved(native_id),
            Ok(None) => Resolution::Unresolved,
            Err(e) => {
                tracing::warn!(
                    external_ref_id = %external_ref_id,
                    error = %e,
                    "Native id translation failed"
                );
                Resolution::Failed
            }
        }
    }

    /// Fetches, filters, and labels reviews for a resolved native id.
    /// Returns an empty map on any fetch failure.
    async fn fetch_labelled(&self, native_id: u64) -> HashMap<String, Sentiment> {
        let contents = match self.provider.recent_reviews(native_id).await {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(native_id, error = %e, "Review fetch failed");
                return HashMap::new();
            }
        };

        let mut reviews = HashMap::new();
        for content in contents.iter().take(MAX_REVIEWS) {
            let trimmed = content.trim();
            if trimmed.chars().count() > MIN_REVIEW_CHARS {
                let sentiment = self.classifier.classify(trimmed);
                reviews.insert(trimmed.to_string(), sentiment);
            }
        }
        reviews
    }
}

/// Deterministic synthetic review set, parameterized by title and
/// pre-labelled with fixed sentiments.
pub fn fallback_reviews(movie_title: &str) -> HashMap<String, Sentiment> {
    HashMap::from([
        (
            format!(
                "This movie '{}' was absolutely fantastic! Great acting and storyline.",
                movie_title
            ),
            Sentiment::Positive,
        ),
        (
            format!(
                "I didn't enjoy '{}' very much. The plot was weak and characters were underdeveloped.",
                movie_title
            ),
            Sentiment::Negative,
        ),
        (
            format!(
                "'{}' is a decent film with good production values but nothing extraordinary.",
                movie_title
            ),
            Sentiment::Neutral,
        ),
        (
            format!(
                "Amazing cinematography in '{}'. The director did a wonderful job!",
                movie_title
            ),
            Sentiment::Positive,
        ),
        (
            format!(
                "While '{}' had potential, it failed to deliver a compelling narrative.",
                movie_title
            ),
            Sentiment::Negative,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver_with(provider: MockReviewProvider) -> ReviewResolver {
        ReviewResolver::new(Arc::new(provider), Arc::new(SentimentClassifier::new()))
    }

    const LONG_POSITIVE: &str = "I loved every single minute of this movie, truly wonderful acting and a great story throughout.";
    const LONG_NEGATIVE: &str = "A terrible and boring experience from start to finish, with awful pacing and horrible dialogue.";

    #[tokio::test]
    async fn test_empty_reference_id_skips_provider() {
        let mut provider = MockReviewProvider::new();
        provider.expect_find_native_id().times(0);
        provider.expect_recent_reviews().times(0);

        let reviews = resolver_with(provider).resolve_reviews("", "Dune").await;

        assert_eq!(reviews.len(), 5);
        assert!(reviews.keys().all(|content| content.contains("Dune")));
    }

    #[tokio::test]
    async fn test_failed_translation_yields_fallback() {
        let mut provider = MockReviewProvider::new();
        provider
            .expect_find_native_id()
            .returning(|_| Err(AppError::ExternalApi("boom".to_string())));
        provider.expect_recent_reviews().times(0);

        let reviews = resolver_with(provider).resolve_reviews("tt1160419", "Dune").await;

        assert_eq!(reviews.len(), 5);
        assert!(reviews.keys().all(|content| content.contains("Dune")));
        assert_eq!(
            reviews.values().filter(|s| **s == Sentiment::Positive).count(),
            2
        );
        assert_eq!(
            reviews.values().filter(|s| **s == Sentiment::Negative).count(),
            2
        );
        assert_eq!(
            reviews.values().filter(|s| **s == Sentiment::Neutral).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_unresolved_reference_yields_fallback() {
        let mut provider = MockReviewProvider::new();
        provider.expect_find_native_id().returning(|_| Ok(None));
        provider.expect_recent_reviews().times(0);

        let reviews = resolver_with(provider)
            .resolve_reviews("tt0000000", "Nothing Here")
            .await;

        assert_eq!(reviews.len(), 5);
    }

    #[tokio::test]
    async fn test_short_reviews_are_filtered() {
        let mut provider = MockReviewProvider::new();
        provider
            .expect_find_native_id()
            .returning(|_| Ok(Some(438631)));
        provider.expect_recent_reviews().returning(|_| {
            Ok(vec![
                LONG_POSITIVE.to_string(),
                "Too short.".to_string(),
                LONG_NEGATIVE.to_string(),
                "Meh.".to_string(),
                "Fine I guess.".to_string(),
            ])
        });

        let reviews = resolver_with(provider)
            .resolve_reviews("tt1160419", "Dune")
            .await;

        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[LONG_POSITIVE.trim()], Sentiment::Positive);
        assert_eq!(reviews[LONG_NEGATIVE.trim()], Sentiment::Negative);
    }

    #[tokio::test]
    async fn test_review_cap_applies_before_filtering() {
        let mut provider = MockReviewProvider::new();
        provider
            .expect_find_native_id()
            .returning(|_| Ok(Some(438631)));
        provider.expect_recent_reviews().returning(|_| {
            // Five short entries first, then a usable one past the cap.
            let mut contents: Vec<String> = (0..5).map(|i| format!("Short {}", i)).collect();
            contents.push(LONG_POSITIVE.to_string());
            Ok(contents)
        });

        let reviews = resolver_with(provider)
            .resolve_reviews("tt1160419", "Dune")
            .await;

        // Nothing usable within the first five, so the fallback set applies.
        assert_eq!(reviews.len(), 5);
        assert!(reviews.keys().all(|content| content.contains("Dune")));
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_fallback() {
        let mut provider = MockReviewProvider::new();
        provider
            .expect_find_native_id()
            .returning(|_| Ok(Some(438631)));
        provider
            .expect_recent_reviews()
            .returning(|_| Err(AppError::ExternalApi("timeout".to_string())));

        let reviews = resolver_with(provider)
            .resolve_reviews("tt1160419", "Dune")
            .await;

        assert_eq!(reviews.len(), 5);
    }

    #[test]
    fn test_fallback_reviews_are_deterministic() {
        let first = fallback_reviews("Arrival");
        let second = fallback_reviews("Arrival");
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }
}
