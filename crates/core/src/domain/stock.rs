use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Full stock verdict returned by the model. Only the four top-level keys
/// checked by the adapter are mandatory; nested sections are best-effort
/// and default to empty when the model omits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub recommendation: Recommendation,

    #[serde(default)]
    pub confidence: Option<f64>,

    #[serde(default)]
    pub analysis: StockSignals,

    #[serde(default)]
    pub portfolio_impact: PortfolioImpact,

    #[serde(default)]
    pub news: Vec<NewsItem>,

    #[serde(default)]
    pub reasoning: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockSignals {
    #[serde(default)]
    pub technical: Option<TechnicalSignal>,

    #[serde(default)]
    pub sentiment: Option<SentimentSignal>,

    #[serde(default)]
    pub risk: Option<RiskSignal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalSignal {
    pub trend: Trend,
    pub strength: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Upward,
    Downward,
    Sideways,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSignal {
    pub overall: Sentiment,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskSignal {
    pub level: RiskLevel,

    #[serde(default)]
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioImpact {
    #[serde(default)]
    pub stock_symbol: String,

    #[serde(default)]
    pub owned_shares: f64,

    #[serde(default)]
    pub current_value: f64,

    #[serde(default)]
    pub potential_change: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,

    #[serde(default)]
    pub summary: String,

    pub sentiment: Sentiment,
    pub impact: RiskLevel,
}

impl StockAnalysis {
    /// Range checks on the numeric fields the prompt constrains. Violations
    /// are treated like any other schema mismatch.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if let Some(confidence) = self.confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(AnalysisError::MalformedResponse(format!(
                    "confidence out of range [0, 1]: {confidence}"
                )));
            }
        }

        if let Some(technical) = &self.analysis.technical {
            if !(0.0..=1.0).contains(&technical.strength) {
                return Err(AnalysisError::MalformedResponse(format!(
                    "technical strength out of range [0, 1]: {}",
                    technical.strength
                )));
            }
        }

        if let Some(sentiment) = &self.analysis.sentiment {
            if !(-1.0..=1.0).contains(&sentiment.score) {
                return Err(AnalysisError::MalformedResponse(format!(
                    "sentiment score out of range [-1, 1]: {}",
                    sentiment.score
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_minimal_shape_with_defaults() {
        let v = json!({
            "recommendation": "BUY",
            "analysis": {},
            "portfolio_impact": {},
            "news": []
        });

        let parsed: StockAnalysis = serde_json::from_value(v).unwrap();
        assert_eq!(parsed.recommendation, Recommendation::Buy);
        assert!(parsed.analysis.technical.is_none());
        assert!(parsed.news.is_empty());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_recommendation_values() {
        let v = json!({
            "recommendation": "SHORT",
            "analysis": {},
            "portfolio_impact": {},
            "news": []
        });

        assert!(serde_json::from_value::<StockAnalysis>(v).is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_confidence() {
        let v = json!({
            "recommendation": "HOLD",
            "confidence": 1.4,
            "analysis": {},
            "portfolio_impact": {},
            "news": []
        });

        let parsed: StockAnalysis = serde_json::from_value(v).unwrap();
        assert!(parsed.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_sentiment_score() {
        let v = json!({
            "recommendation": "HOLD",
            "analysis": {
                "sentiment": {"overall": "NEGATIVE", "score": -2.0}
            },
            "portfolio_impact": {},
            "news": []
        });

        let parsed: StockAnalysis = serde_json::from_value(v).unwrap();
        assert!(parsed.validate().is_err());
    }

    #[test]
    fn parses_full_shape() {
        let v = json!({
            "recommendation": "SELL",
            "confidence": 0.82,
            "analysis": {
                "technical": {"trend": "DOWNWARD", "strength": 0.7},
                "sentiment": {"overall": "NEGATIVE", "score": -0.4},
                "risk": {"level": "HIGH", "factors": ["sector rotation"]}
            },
            "portfolio_impact": {
                "stock_symbol": "AAPL",
                "owned_shares": 10.0,
                "current_value": 1893.5,
                "potential_change": -120.0
            },
            "news": [
                {
                    "title": "Guidance cut",
                    "summary": "Weaker outlook for the quarter.",
                    "sentiment": "NEGATIVE",
                    "impact": "HIGH"
                }
            ],
            "reasoning": "Momentum has rolled over."
        });

        let parsed: StockAnalysis = serde_json::from_value(v).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.news.len(), 1);
        assert_eq!(parsed.portfolio_impact.stock_symbol, "AAPL");
    }
}
