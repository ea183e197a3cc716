use std::collections::HashMap;

use axum::{
    extract::{Form, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    models::{DetailBundle, EnrichedMovieView, MatchMovie, MovieCard},
    services::align,
};

use super::AppState;

/// Header carrying the session user id, set by the site's session layer in
/// front of this service. Absent or unparseable means no session.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

fn session_user(headers: &HeaderMap) -> Option<i64> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())
}

/// Assembles the enriched detail view for the posted bundle.
///
/// Always responds 200 with a renderable view; assembly failures surface as
/// the error-state view, not as an error response.
pub async fn recommend(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(bundle): Form<DetailBundle>,
) -> Json<EnrichedMovieView> {
    let user_id = session_user(&headers);
    let view = state.orchestrator.assemble(bundle, user_id).await;
    Json(view)
}

#[derive(Debug, Deserialize)]
pub struct MatchesRequest {
    pub movies_list: Vec<MatchMovie>,
}

/// Builds the card map for the search-matches page from a structured movie
/// list.
pub async fn matches(
    Json(request): Json<MatchesRequest>,
) -> Json<HashMap<String, MovieCard>> {
    Json(align::build_match_cards(&request.movies_list))
}

/// Autocomplete titles for the search box.
pub async fn suggestions(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.titles())
}
