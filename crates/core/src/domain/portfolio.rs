use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub shares: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub total_value: f64,

    /// Caller-assessed riskiness on a 0..=10 scale.
    pub risk_score: f64,

    pub stocks: Vec<Holding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskProfile {
    pub tolerance: RiskTolerance,
    pub investment_horizon_years: u32,
    pub monthly_investment: f64,
}

/// Advice produced by the model for a portfolio/risk-profile pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentAdvice {
    pub summary: String,

    #[serde(default)]
    pub recommendations: Vec<AdviceRecommendation>,

    pub risk_assessment: String,

    #[serde(default)]
    pub additional_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceRecommendation {
    pub action: String,

    #[serde(default)]
    pub symbol: Option<String>,

    #[serde(default)]
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_advice_shape() {
        let v = json!({
            "summary": "Concentrated in tech; diversification advised.",
            "recommendations": [
                {"action": "sell", "symbol": "TSLA", "details": "Trim to 5% of the book."},
                {"action": "hold", "details": "Keep index funds as ballast."}
            ],
            "risk_assessment": "Above stated tolerance.",
            "additional_notes": null
        });

        let parsed: InvestmentAdvice = serde_json::from_value(v).unwrap();
        assert_eq!(parsed.recommendations.len(), 2);
        assert_eq!(parsed.recommendations[0].symbol.as_deref(), Some("TSLA"));
        assert!(parsed.additional_notes.is_none());
    }

    #[test]
    fn tolerance_uses_lowercase_wire_values() {
        let t: RiskTolerance = serde_json::from_value(json!("medium")).unwrap();
        assert_eq!(t, RiskTolerance::Medium);
        assert!(serde_json::from_value::<RiskTolerance>(json!("MEDIUM")).is_err());
    }
}
