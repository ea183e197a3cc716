use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A decoded numeric value from an encoded list field.
///
/// The upstream producer writes integers and floats into the same
/// bracket-delimited lists, so decoded numbers keep whichever shape the
/// token had. Serializes as a bare JSON number either way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
}

impl Scalar {
    pub fn as_i64(&self) -> i64 {
        match self {
            Scalar::Int(n) => *n,
            Scalar::Float(f) => *f as i64,
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Release year of a recommended title.
///
/// Serializes as a number when known and as the literal string "N/A" when the
/// year list was shorter than the poster list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseYear {
    Known(Scalar),
    Unavailable,
}

impl Serialize for ReleaseYear {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            ReleaseYear::Known(year) => year.serialize(serializer),
            ReleaseYear::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

/// Three-way sentiment label for a review.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// One recommended-movie card on the detail page.
///
/// Cards are keyed by poster URL in the rendered batch; two recommendations
/// sharing a poster collapse to one card. That mirrors the upstream renderer
/// and is kept as a documented quirk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieCard {
    pub poster_url: String,
    pub title: String,
    pub original_title: String,
    pub vote_average: Scalar,
    pub release_year: ReleaseYear,
    pub external_id: i64,
}

/// A cast entry shown in the cast strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastMember {
    pub name: String,
    pub external_id: i64,
    pub character: String,
    pub profile_image_url: String,
}

/// Expanded cast information for the cast detail modal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastDetail {
    pub name: String,
    pub external_id: i64,
    pub profile_image_url: String,
    pub birthday: String,
    pub birthplace: String,
    pub biography: String,
}

/// One entry of the structured movie list posted to the matches endpoint.
/// Unlike the detail bundle this arrives as real JSON, so fields are typed
/// and individually optional.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchMovie {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}

fn default_list() -> String {
    "[]".to_string()
}

pub(crate) fn default_poster() -> String {
    "/static/images/movie_placeholder.jpeg".to_string()
}

fn default_overview() -> String {
    "No overview available.".to_string()
}

fn default_zero() -> String {
    "0".to_string()
}

/// The raw form-encoded bundle posted by the upstream rendering step.
///
/// Twelve of these fields are encoded list fields (see `services::codec`),
/// plus the numeric `cast_ids` list; the rest are plain scalars passed
/// through to the view. Every field defaults so a partial bundle still
/// deserializes.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailBundle {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_list")]
    pub cast_ids: String,
    #[serde(default = "default_list")]
    pub cast_names: String,
    #[serde(default = "default_list")]
    pub cast_chars: String,
    #[serde(default = "default_list")]
    pub cast_bdays: String,
    #[serde(default = "default_list")]
    pub cast_bios: String,
    #[serde(default = "default_list")]
    pub cast_places: String,
    #[serde(default = "default_list")]
    pub cast_profiles: String,
    #[serde(default)]
    pub imdb_id: String,
    #[serde(default = "default_poster")]
    pub poster: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default = "default_overview")]
    pub overview: String,
    #[serde(default = "default_zero")]
    pub rating: String,
    #[serde(default = "default_zero")]
    pub vote_count: String,
    #[serde(default)]
    pub rel_date: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub status: String,
    #[serde(default = "default_list")]
    pub rec_movies: String,
    #[serde(default = "default_list")]
    pub rec_posters: String,
    #[serde(default = "default_list")]
    pub rec_movies_org: String,
    #[serde(default = "default_list")]
    pub rec_year: String,
    #[serde(default = "default_list")]
    pub rec_vote: String,
    #[serde(default = "default_list")]
    pub rec_ids: String,
    #[serde(default = "default_zero")]
    pub movie_id: String,
}

/// The assembled display payload for one detail-page request.
///
/// Constructed fresh per request and handed to the renderer; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedMovieView {
    pub title: String,
    pub poster: String,
    pub overview: String,
    pub vote_average: String,
    pub vote_count: String,
    pub release_date: String,
    pub runtime: String,
    pub status: String,
    pub genres: String,
    /// Release date parsed for the "released yet" comparison; unset when the
    /// `rel_date` field was absent or malformed.
    pub movie_rel_date: Option<NaiveDate>,
    /// Server-side "today", set together with `movie_rel_date`.
    pub curr_date: Option<NaiveDate>,
    pub movie_cards: HashMap<String, MovieCard>,
    pub casts: HashMap<String, CastMember>,
    pub cast_details: HashMap<String, CastDetail>,
    pub reviews: HashMap<String, Sentiment>,
    pub suggestions: Vec<String>,
    pub movie_id: String,
    pub in_wishlist: bool,
}

impl EnrichedMovieView {
    /// Minimal view returned when assembly fails entirely. The page still
    /// renders: an error title, an apology overview, and the default
    /// suggestion list.
    pub fn error_state(suggestions: Vec<String>) -> Self {
        Self {
            title: "Error".to_string(),
            poster: default_poster(),
            overview: "Sorry, an error occurred while processing your request.".to_string(),
            vote_average: default_zero(),
            vote_count: default_zero(),
            release_date: String::new(),
            runtime: String::new(),
            status: String::new(),
            genres: String::new(),
            movie_rel_date: None,
            curr_date: None,
            movie_cards: HashMap::new(),
            casts: HashMap::new(),
            cast_details: HashMap::new(),
            reviews: HashMap::new(),
            suggestions,
            movie_id: default_zero(),
            in_wishlist: false,
        }
    }
}
