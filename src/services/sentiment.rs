//! Three-way sentiment labelling for review text.
//!
//! Uses the VADER lexicon scorer, which produces a compound polarity in
//! [-1.0, 1.0]. The neutral band is deliberately wide so mixed or flat
//! reviews are not over-classified as positive or negative.

use vader_sentiment::SentimentIntensityAnalyzer;

use crate::models::Sentiment;

const POSITIVE_THRESHOLD: f64 = 0.1;
const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Lexicon-based review classifier. Construct once and share; the analyzer
/// carries the loaded lexicon.
pub struct SentimentClassifier {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentClassifier {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Labels free text by its compound polarity score.
    pub fn classify(&self, text: &str) -> Sentiment {
        let scores = self.analyzer.polarity_scores(text);
        let polarity = scores.get("compound").copied().unwrap_or(0.0);
        label_for_polarity(polarity)
    }
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a polarity score to a label. Both thresholds are exclusive: 0.1 and
/// -0.1 themselves are Neutral.
pub fn label_for_polarity(polarity: f64) -> Sentiment {
    if polarity > POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if polarity < NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
