//! Piece evaluation (Cross-Evaluate phase) and response parsing

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Include,
    Modify,
    Exclude,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Include => "include",
            Recommendation::Modify => "modify",
            Recommendation::Exclude => "exclude",
        }
    }

    /// Score implied by the verdict alone when the reply names no number
    pub fn implied_score(&self) -> f64 {
        match self {
            Recommendation::Include => 8.0,
            Recommendation::Modify => 5.0,
            Recommendation::Exclude => 2.0,
        }
    }
}

/// One advisor's verdict on one piece
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub recommendation: Recommendation,
    /// 0.0 - 1.0
    pub confidence: f64,
    /// 0.0 - 10.0
    pub score: f64,
}

impl Evaluation {
    pub const FALLBACK_SCORE: f64 = 5.0;
    pub const FALLBACK_CONFIDENCE: f64 = 0.5;

    /// Verdict assumed when an advisor could not evaluate a piece
    pub fn fallback() -> Self {
        Self {
            recommendation: Recommendation::Include,
            confidence: Self::FALLBACK_CONFIDENCE,
            score: Self::FALLBACK_SCORE,
        }
    }
}

/// Parse an evaluation reply.
///
/// # Supported Formats
///
/// 1. **JSON** (preferred): `{"recommendation": "include", "confidence": 0.8, "score": 7}`
/// 2. **Keywords**: INCLUDE / MODIFY / EXCLUDE plus an optional `N/10` or `score: N`
///
/// Missing confidence falls back to 0.5 and a missing score to the verdict's
/// implied score. Returns `None` when neither a verdict nor a score is found.
pub fn parse_evaluation(response: &str) -> Option<Evaluation> {
    if let Some(start) = response.find('{')
        && let Some(end) = response[start..].rfind('}')
        && let Ok(parsed) =
            serde_json::from_str::<serde_json::Value>(&response[start..start + end + 1])
    {
        let recommendation = parsed
            .get("recommendation")
            .and_then(|v| v.as_str())
            .and_then(recommendation_keyword);
        let score = parsed.get("score").and_then(|v| v.as_f64());
        if recommendation.is_some() || score.is_some() {
            let confidence = parsed.get("confidence").and_then(|v| v.as_f64());
            return Some(assemble(recommendation, confidence, score));
        }
    }

    let recommendation = recommendation_keyword(response);
    let score = text_score(response);
    if recommendation.is_none() && score.is_none() {
        return None;
    }
    Some(assemble(recommendation, None, score))
}

fn assemble(
    recommendation: Option<Recommendation>,
    confidence: Option<f64>,
    score: Option<f64>,
) -> Evaluation {
    let recommendation = recommendation.unwrap_or(match score {
        Some(s) if s < 4.0 => Recommendation::Exclude,
        Some(s) if s < 6.0 => Recommendation::Modify,
        _ => Recommendation::Include,
    });
    Evaluation {
        recommendation,
        confidence: confidence
            .unwrap_or(Evaluation::FALLBACK_CONFIDENCE)
            .clamp(0.0, 1.0),
        score: score
            .unwrap_or_else(|| recommendation.implied_score())
            .clamp(0.0, 10.0),
    }
}

fn recommendation_keyword(text: &str) -> Option<Recommendation> {
    let upper = text.to_uppercase();
    // Exclusion is checked first so "do not include" reads as a rejection
    if upper.contains("EXCLUDE") || upper.contains("NOT INCLUDE") || upper.contains("REJECT") {
        Some(Recommendation::Exclude)
    } else if upper.contains("MODIFY") {
        Some(Recommendation::Modify)
    } else if upper.contains("INCLUDE") {
        Some(Recommendation::Include)
    } else {
        None
    }
}

fn text_score(response: &str) -> Option<f64> {
    let words: Vec<&str> = response.split_whitespace().collect();
    for (i, word) in words.iter().enumerate() {
        if let Some(num_str) = word.strip_suffix("/10")
            && let Ok(num) = num_str.trim_start_matches(|c: char| !c.is_ascii_digit()).parse::<f64>()
        {
            return Some(num);
        }
        if word.to_lowercase().trim_end_matches(':') == "score"
            && let Some(next) = words.get(i + 1)
            && let Ok(num) = next
                .trim_matches(|c: char| !c.is_ascii_digit() && c != '.')
                .parse::<f64>()
        {
            return Some(num);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_values() {
        let e = Evaluation::fallback();
        assert_eq!(e.recommendation, Recommendation::Include);
        assert_eq!(e.confidence, 0.5);
        assert_eq!(e.score, 5.0);
    }

    #[test]
    fn test_parse_json() {
        let e = parse_evaluation(
            r#"Here you go: {"recommendation": "exclude", "confidence": 0.9, "score": 3}"#,
        )
        .unwrap();
        assert_eq!(e.recommendation, Recommendation::Exclude);
        assert_eq!(e.confidence, 0.9);
        assert_eq!(e.score, 3.0);
    }

    #[test]
    fn test_parse_json_clamps() {
        let e = parse_evaluation(r#"{"recommendation":"include","confidence":3,"score":42}"#)
            .unwrap();
        assert_eq!(e.confidence, 1.0);
        assert_eq!(e.score, 10.0);
    }

    #[test]
    fn test_parse_keywords_and_fraction() {
        let e = parse_evaluation("I would INCLUDE this piece. 7/10").unwrap();
        assert_eq!(e.recommendation, Recommendation::Include);
        assert_eq!(e.score, 7.0);
        assert_eq!(e.confidence, 0.5);

        let e = parse_evaluation("Modify the ending. Score: 6").unwrap();
        assert_eq!(e.recommendation, Recommendation::Modify);
        assert_eq!(e.score, 6.0);
    }

    #[test]
    fn test_verdict_without_score_uses_implied_score() {
        let e = parse_evaluation("Do not include, too hard").unwrap();
        assert_eq!(e.recommendation, Recommendation::Exclude);
        assert_eq!(e.score, 2.0);
    }

    #[test]
    fn test_unparseable_reply() {
        assert!(parse_evaluation("What a lovely tune").is_none());
        assert!(parse_evaluation("").is_none());
    }
}
