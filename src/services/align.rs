//! Alignment of positionally-parallel decoded sequences into display records.
//!
//! The upstream producer ships one list per field (posters, titles, votes,
//! years, ids, ...) and alignment is by index. The primary sequence (posters
//! for cards, names for cast) bounds the loop; shorter secondary sequences
//! degrade to per-field defaults and longer ones are truncated. Records are
//! keyed by a display string (poster URL / cast name), so duplicate keys in
//! one batch silently collapse — an upstream quirk kept as-is.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{CastDetail, CastMember, MatchMovie, MovieCard, ReleaseYear, Scalar};

/// Maximum recommended-movie cards per detail page.
pub const MAX_MOVIE_CARDS: usize = 12;
/// Maximum cast entries per detail page.
pub const MAX_CAST_ENTRIES: usize = 10;
/// Maximum cards on the search-matches page.
pub const MAX_MATCH_CARDS: usize = 10;

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/original";
const PLACEHOLDER_POSTER: &str = "/static/images/movie_placeholder.jpeg";

const DEFAULT_TITLE: &str = "Unknown";
const DEFAULT_CHARACTER: &str = "Character information not available.";
const DEFAULT_BIOGRAPHY: &str = "Biography not available.";
const DEFAULT_PROFILE: &str = "/static/images/default_profile.jpg";
const DEFAULT_DATE: &str = "Not available";

/// Reads `seq[i]` or falls back to the configured default.
fn field_or<T: Clone>(seq: &[T], i: usize, default: T) -> T {
    seq.get(i).cloned().unwrap_or(default)
}

/// Rewrites escaped newline and quote sequences to their literal characters,
/// substituting a default for empty source text. Biographies and character
/// names arrive with the producer's escaping still applied.
pub fn unescape_text(raw: &str, default: &str) -> String {
    if raw.is_empty() {
        default.to_string()
    } else {
        raw.replace("\\n", "\n").replace("\\\"", "\"")
    }
}

/// Builds up to [`MAX_MOVIE_CARDS`] recommendation cards keyed by poster URL.
/// The poster list is the primary sequence.
pub fn build_movie_cards(
    posters: &[String],
    titles: &[String],
    original_titles: &[String],
    votes: &[Scalar],
    years: &[Scalar],
    ids: &[Scalar],
) -> HashMap<String, MovieCard> {
    let mut cards = HashMap::new();
    for (i, poster) in posters.iter().take(MAX_MOVIE_CARDS).enumerate() {
        let card = MovieCard {
            poster_url: poster.clone(),
            title: field_or(titles, i, DEFAULT_TITLE.to_string()),
            original_title: field_or(original_titles, i, DEFAULT_TITLE.to_string()),
            vote_average: field_or(votes, i, Scalar::Int(0)),
            release_year: years
                .get(i)
                .map(|y| ReleaseYear::Known(*y))
                .unwrap_or(ReleaseYear::Unavailable),
            external_id: field_or(ids, i, Scalar::Int(0)).as_i64(),
        };
        cards.insert(poster.clone(), card);
    }
    cards
}

/// Builds up to [`MAX_CAST_ENTRIES`] cast-strip entries keyed by name.
/// The name list is the primary sequence.
pub fn build_cast_members(
    names: &[String],
    ids: &[Scalar],
    characters: &[String],
    profiles: &[String],
) -> HashMap<String, CastMember> {
    let mut members = HashMap::new();
    for (i, name) in names.iter().take(MAX_CAST_ENTRIES).enumerate() {
        let character = characters
            .get(i)
            .map(|c| unescape_text(c, DEFAULT_CHARACTER))
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let member = CastMember {
            name: name.clone(),
            external_id: field_or(ids, i, Scalar::Int(0)).as_i64(),
            character,
            profile_image_url: field_or(profiles, i, DEFAULT_PROFILE.to_string()),
        };
        members.insert(name.clone(), member);
    }
    members
}

/// Builds the expanded cast records for the detail modal, keyed by name like
/// the strip entries.
pub fn build_cast_details(
    names: &[String],
    ids: &[Scalar],
    profiles: &[String],
    birthdays: &[String],
    birthplaces: &[String],
    biographies: &[String],
) -> HashMap<String, CastDetail> {
    let mut details = HashMap::new();
    for (i, name) in names.iter().take(MAX_CAST_ENTRIES).enumerate() {
        let biography = biographies
            .get(i)
            .map(|b| unescape_text(b, DEFAULT_BIOGRAPHY))
            .unwrap_or_else(|| DEFAULT_BIOGRAPHY.to_string());
        let detail = CastDetail {
            name: name.clone(),
            external_id: field_or(ids, i, Scalar::Int(0)).as_i64(),
            profile_image_url: field_or(profiles, i, DEFAULT_PROFILE.to_string()),
            birthday: field_or(birthdays, i, DEFAULT_DATE.to_string()),
            birthplace: field_or(birthplaces, i, DEFAULT_DATE.to_string()),
            biography,
        };
        details.insert(name.clone(), detail);
    }
    details
}

/// Builds up to [`MAX_MATCH_CARDS`] cards from the structured movie list on
/// the search-matches page. Poster paths are prefixed with the provider's
/// image base URL; a missing path gets the placeholder, which then collapses
/// all pathless entries onto one key, same quirk as above.
pub fn build_match_cards(movies: &[MatchMovie]) -> HashMap<String, MovieCard> {
    let mut cards = HashMap::new();
    for movie in movies.iter().take(MAX_MATCH_CARDS) {
        let poster_url = match movie.poster_path.as_deref() {
            Some(path) if !path.is_empty() => format!("{}{}", POSTER_BASE_URL, path),
            _ => PLACEHOLDER_POSTER.to_string(),
        };
        let release_year = movie
            .release_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(|d| ReleaseYear::Known(Scalar::Int(d.year() as i64)))
            .unwrap_or(ReleaseYear::Unavailable);
        let card = MovieCard {
            poster_url: poster_url.clone(),
            title: movie.title.clone().unwrap_or_else(|| "N/A".to_string()),
            original_title: movie
                .original_title
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            vote_average: movie
                .vote_average
                .map(Scalar::Float)
                .unwrap_or(Scalar::Int(0)),
            release_year,
            external_id: movie.id.unwrap_or(0),
        };
        cards.insert(poster_url, card);
    }
    cards
}
