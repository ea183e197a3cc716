//! Assembly of the display-ready detail view from the raw upstream bundle.
//!
//! One invocation handles one request end to end: decode the encoded list
//! fields, align them into cards and cast records, resolve labelled reviews,
//! parse the release-date comparison, and ask the wishlist store for the
//! membership flag. Assembly never fails; anything unexpected degrades to a
//! minimal error-state view so the page always renders.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::{
    db::WishlistStore,
    error::AppResult,
    models::{DetailBundle, EnrichedMovieView},
    services::{align, codec, reviews::ReviewResolver, suggestions::SuggestionCatalog},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Per-request entry point for detail-page enrichment. Collaborators are
/// injected at startup and shared across requests; the orchestrator itself
/// holds no per-request state.
pub struct EnrichmentOrchestrator {
    resolver: ReviewResolver,
    wishlist: Option<Arc<dyn WishlistStore>>,
    catalog: Arc<SuggestionCatalog>,
}

impl EnrichmentOrchestrator {
    pub fn new(
        resolver: ReviewResolver,
        wishlist: Option<Arc<dyn WishlistStore>>,
        catalog: Arc<SuggestionCatalog>,
    ) -> Self {
        Self {
            resolver,
            wishlist,
            catalog,
        }
    }

    /// Assembles the enriched view for one bundle. `user_id` comes from the
    /// session layer; `None` means no session, so the wishlist flag stays
    /// false. This method never fails.
    pub async fn assemble(&self, bundle: DetailBundle, user_id: Option<i64>) -> EnrichedMovieView {
        match self.try_assemble(bundle, user_id).await {
            Ok(view) => view,
            Err(e) => {
                tracing::error!(error = %e, "Detail assembly failed, returning error-state view");
                EnrichedMovieView::error_state(self.catalog.titles())
            }
        }
    }

    async fn try_assemble(
        &self,
        bundle: DetailBundle,
        user_id: Option<i64>,
    ) -> AppResult<EnrichedMovieView> {
        let rec_titles = codec::decode_strings(&bundle.rec_movies);
        let rec_original_titles = codec::decode_strings(&bundle.rec_movies_org);
        let rec_posters = codec::decode_strings(&bundle.rec_posters);
        let rec_votes = codec::decode_numbers(&bundle.rec_vote);
        let rec_years = codec::decode_numbers(&bundle.rec_year);
        let rec_ids = codec::decode_numbers(&bundle.rec_ids);

        let cast_names = codec::decode_strings(&bundle.cast_names);
        let cast_characters = codec::decode_strings(&bundle.cast_chars);
        let cast_profiles = codec::decode_strings(&bundle.cast_profiles);
        let cast_birthdays = codec::decode_strings(&bundle.cast_bdays);
        let cast_biographies = codec::decode_strings(&bundle.cast_bios);
        let cast_birthplaces = codec::decode_strings(&bundle.cast_places);
        let cast_ids = codec::decode_numbers(&bundle.cast_ids);

        let movie_cards = align::build_movie_cards(
            &rec_posters,
            &rec_titles,
            &rec_original_titles,
            &rec_votes,
            &rec_years,
            &rec_ids,
        );
        let casts =
            align::build_cast_members(&cast_names, &cast_ids, &cast_characters, &cast_profiles);
        let cast_details = align::build_cast_details(
            &cast_names,
            &cast_ids,
            &cast_profiles,
            &cast_birthdays,
            &cast_birthplaces,
            &cast_biographies,
        );

        let reviews = self
            .resolver
            .resolve_reviews(&bundle.imdb_id, &bundle.title)
            .await;

        let (curr_date, movie_rel_date) = parse_release_comparison(&bundle.rel_date);

        let in_wishlist = self.check_wishlist(user_id, &bundle.movie_id).await;

        Ok(EnrichedMovieView {
            title: bundle.title,
            poster: bundle.poster,
            overview: bundle.overview,
            vote_average: bundle.rating,
            vote_count: bundle.vote_count,
            release_date: bundle.release_date,
            runtime: bundle.runtime,
            status: bundle.status,
            genres: bundle.genres,
            movie_rel_date,
            curr_date,
            movie_cards,
            casts,
            cast_details,
            reviews,
            suggestions: self.catalog.titles(),
            movie_id: bundle.movie_id,
            in_wishlist,
        })
    }

    /// Wishlist membership for the display flag. Absent session, absent
    /// store, unparseable movie id, and lookup failures all read as false.
    async fn check_wishlist(&self, user_id: Option<i64>, movie_id: &str) -> bool {
        let (Some(user_id), Some(store)) = (user_id, &self.wishlist) else {
            return false;
        };
        let Ok(movie_id) = movie_id.parse::<i64>() else {
            return false;
        };

        match store.exists(user_id, movie_id).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(user_id, movie_id, error = %e, "Wishlist lookup failed");
                false
            }
        }
    }
}

/// Parses the release date for the "released yet" presentation decision.
/// Both values are set together or not at all; a malformed date leaves the
/// comparison unset without touching the rest of the view.
fn parse_release_comparison(rel_date: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
    if rel_date.is_empty() {
        return (None, None);
    }
    match NaiveDate::parse_from_str(rel_date, DATE_FORMAT) {
        Ok(release) => (Some(Utc::now().date_naive()), Some(release)),
        Err(_) => (None, None),
    }
}
