use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use cinewise_api::api::{create_router, AppState};
use cinewise_api::error::AppResult;
use cinewise_api::services::enrichment::EnrichmentOrchestrator;
use cinewise_api::services::reviews::{ReviewProvider, ReviewResolver};
use cinewise_api::services::sentiment::SentimentClassifier;
use cinewise_api::services::suggestions::SuggestionCatalog;

/// Review provider standing in for TMDB: resolves nothing, so every request
/// exercises the fallback review path.
struct OfflineProvider;

#[async_trait::async_trait]
impl ReviewProvider for OfflineProvider {
    async fn find_native_id(&self, _external_ref_id: &str) -> AppResult<Option<u64>> {
        Ok(None)
    }

    async fn recent_reviews(&self, _native_id: u64) -> AppResult<Vec<String>> {
        Ok(Vec::new())
    }
}

fn create_test_server() -> TestServer {
    let catalog = Arc::new(SuggestionCatalog::with_defaults());
    let resolver = ReviewResolver::new(
        Arc::new(OfflineProvider),
        Arc::new(SentimentClassifier::new()),
    );
    let orchestrator = Arc::new(EnrichmentOrchestrator::new(resolver, None, catalog.clone()));
    let state = AppState::new(orchestrator, catalog);
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_recommend_assembles_movie_cards() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommend")
        .form(&[
            ("title", "Arrival"),
            ("imdb_id", "tt2543164"),
            ("rec_movies", r#"["A","B"]"#),
            ("rec_posters", r#"["/p1.jpg","/p2.jpg"]"#),
            ("rec_vote", "[7,8]"),
            ("rec_year", "[2001,2002]"),
            ("rec_ids", "[1,2]"),
            ("movie_id", "329865"),
        ])
        .await;

    response.assert_status_ok();
    let view: serde_json::Value = response.json();

    assert_eq!(view["title"], "Arrival");
    let cards = view["movie_cards"].as_object().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards["/p1.jpg"]["title"], "A");
    assert_eq!(cards["/p1.jpg"]["vote_average"], 7);
    assert_eq!(cards["/p1.jpg"]["release_year"], 2001);
    assert_eq!(cards["/p1.jpg"]["external_id"], 1);
    assert_eq!(cards["/p2.jpg"]["title"], "B");
    assert_eq!(cards["/p2.jpg"]["external_id"], 2);
}

#[tokio::test]
async fn test_recommend_with_empty_form_returns_error_free_view() {
    let server = create_test_server();

    let response = server.post("/api/v1/recommend").form(&[("title", "")]).await;

    response.assert_status_ok();
    let view: serde_json::Value = response.json();

    assert_eq!(view["movie_cards"].as_object().unwrap().len(), 0);
    assert_eq!(view["casts"].as_object().unwrap().len(), 0);
    // No reference id means the fallback review set.
    assert_eq!(view["reviews"].as_object().unwrap().len(), 5);
    assert_eq!(view["in_wishlist"], false);
}

#[tokio::test]
async fn test_recommend_fallback_reviews_carry_title() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommend")
        .form(&[("title", "Dune"), ("imdb_id", "tt1160419")])
        .await;

    response.assert_status_ok();
    let view: serde_json::Value = response.json();

    let reviews = view["reviews"].as_object().unwrap();
    assert_eq!(reviews.len(), 5);
    assert!(reviews.keys().all(|content| content.contains("Dune")));
}

#[tokio::test]
async fn test_matches_builds_capped_card_map() {
    let server = create_test_server();

    let movies: Vec<serde_json::Value> = (0..12)
        .map(|i| {
            json!({
                "title": format!("Movie {}", i),
                "poster_path": format!("/p{}.jpg", i),
                "vote_average": 7.0,
                "release_date": "2016-11-11",
                "id": i
            })
        })
        .collect();

    let response = server
        .post("/api/v1/matches")
        .json(&json!({ "movies_list": movies }))
        .await;

    response.assert_status_ok();
    let cards: serde_json::Value = response.json();
    let cards = cards.as_object().unwrap();

    assert_eq!(cards.len(), 10);
    let first = &cards["https://image.tmdb.org/t/p/original/p0.jpg"];
    assert_eq!(first["title"], "Movie 0");
    assert_eq!(first["release_year"], 2016);
}

#[tokio::test]
async fn test_suggestions_returns_default_catalog() {
    let server = create_test_server();

    let response = server.get("/api/v1/suggestions").await;
    response.assert_status_ok();

    let suggestions: Vec<String> = response.json();
    assert_eq!(suggestions.len(), 5);
    assert!(suggestions.contains(&"Inception".to_string()));
}
