use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    #[serde(rename = "sentiment")]
    pub label: SentimentLabel,
    pub confidence: f64,
}

// Checked in order; the first rule with a matching keyword wins.
const RULES: &[(&[&str], SentimentLabel, f64)] = &[
    (&["good", "sunny"], SentimentLabel::Positive, 0.8),
    (&["rain", "bad"], SentimentLabel::Negative, 0.7),
];

const NEUTRAL: Sentiment = Sentiment { label: SentimentLabel::Neutral, confidence: 0.6 };

/// Keyword-based sentiment of free text. Case-insensitive substring match.
pub fn classify(text: &str) -> Sentiment {
    let text = text.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|&(_, label, confidence)| Sentiment { label, confidence })
        .unwrap_or(NEUTRAL)
}
