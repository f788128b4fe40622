use crate::analysis::AnalysisTask;
use crate::domain::portfolio::{InvestmentAdvice, Portfolio, RiskProfile, RiskTolerance};
use crate::error::AnalysisError;

pub const REQUIRED_KEYS: &[&str] = &["summary", "recommendations", "risk_assessment"];

#[derive(Debug, Clone)]
pub struct PortfolioAdviceTask {
    pub portfolio: Portfolio,
    pub risk_profile: RiskProfile,
}

impl PortfolioAdviceTask {
    pub fn new(portfolio: Portfolio, risk_profile: RiskProfile) -> Self {
        Self {
            portfolio,
            risk_profile,
        }
    }

    fn holdings_line(&self) -> String {
        self.portfolio
            .stocks
            .iter()
            .map(|h| format!("{} shares of {}", h.shares, h.symbol))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn tolerance_label(&self) -> &'static str {
        match self.risk_profile.tolerance {
            RiskTolerance::Low => "low",
            RiskTolerance::Medium => "medium",
            RiskTolerance::High => "high",
        }
    }
}

impl AnalysisTask for PortfolioAdviceTask {
    type Output = InvestmentAdvice;

    fn name(&self) -> &'static str {
        "portfolio_advice"
    }

    fn validate_input(&self) -> Result<(), AnalysisError> {
        if self.portfolio.stocks.is_empty() {
            return Err(AnalysisError::EmptyQuery);
        }
        Ok(())
    }

    fn render_prompt(&self) -> String {
        format!(
            r#"You are an expert AI investment advisor. Analyze the following portfolio and risk
profile, then provide concise, actionable advice for portfolio optimization. Your response
must be a valid JSON object (no markdown formatting, no backticks) with the following
structure:
{{
  "summary": "A brief summary of the portfolio and risk profile analysis",
  "recommendations": [
    {{
      "action": "buy/sell/hold",
      "symbol": "stock symbol (if applicable)",
      "details": "specific advice or reasoning"
    }}
  ],
  "risk_assessment": "Assessment of how the portfolio aligns with the risk profile",
  "additional_notes": "Any further suggestions or considerations"
}}

Portfolio:
- Total Value: ${total_value}
- Risk Score: {risk_score}/10
- Holdings: {holdings}

Risk Profile:
- Risk Tolerance: {tolerance}
- Investment Horizon: {horizon} years
- Monthly Investment: ${monthly}

Remember: Return ONLY the JSON object, with no markdown formatting or backticks."#,
            total_value = self.portfolio.total_value,
            risk_score = self.portfolio.risk_score,
            holdings = self.holdings_line(),
            tolerance = self.tolerance_label(),
            horizon = self.risk_profile.investment_horizon_years,
            monthly = self.risk_profile.monthly_investment,
        )
    }

    fn required_keys(&self) -> &'static [&'static str] {
        REQUIRED_KEYS
    }
}
