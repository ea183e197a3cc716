//! Autocomplete suggestions sourced from the offline similarity model's
//! title catalog, with a fixed default list when the catalog is missing.

use std::path::Path;

const TITLE_COLUMN: &str = "movie_title";

/// Titles offered to the search box. Loaded once at startup.
#[derive(Debug, Clone)]
pub struct SuggestionCatalog {
    titles: Vec<String>,
}

impl SuggestionCatalog {
    /// Reads titles from the catalog CSV's `movie_title` column. Any read or
    /// parse problem falls back to the default list; suggestions are a
    /// nicety, not worth failing startup over.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let titles = match read_catalog_titles(path.as_ref()) {
            Ok(titles) if !titles.is_empty() => titles,
            Ok(_) => {
                tracing::warn!("Suggestion catalog is empty, using defaults");
                default_suggestions()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not load suggestion catalog, using defaults");
                default_suggestions()
            }
        };
        Self { titles }
    }

    pub fn with_defaults() -> Self {
        Self {
            titles: default_suggestions(),
        }
    }

    pub fn titles(&self) -> Vec<String> {
        self.titles.clone()
    }
}

fn read_catalog_titles(path: &Path) -> anyhow::Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let column = headers
        .iter()
        .position(|h| h == TITLE_COLUMN)
        .ok_or_else(|| anyhow::anyhow!("catalog has no '{}' column", TITLE_COLUMN))?;

    let mut titles = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(title) = record.get(column) {
            titles.push(capitalize(title));
        }
    }
    Ok(titles)
}

/// First character uppercased, the rest lowercased; catalog titles are
/// stored all-lowercase.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Fixed suggestions shown when no catalog is available.
pub fn default_suggestions() -> Vec<String> {
    [
        "The Avengers",
        "Inception",
        "The Dark Knight",
        "Pulp Fiction",
        "Forrest Gump",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
