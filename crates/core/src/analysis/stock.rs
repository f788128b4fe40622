use crate::analysis::AnalysisTask;
use crate::domain::stock::StockAnalysis;
use crate::error::AnalysisError;
use std::time::Duration;

/// Fixed pause before each stock request. Watchlist loads fire these
/// back-to-back and the provider rate-limits bursts.
const PRE_REQUEST_DELAY: Duration = Duration::from_secs(1);

pub const REQUIRED_KEYS: &[&str] = &["recommendation", "analysis", "portfolio_impact", "news"];

#[derive(Debug, Clone)]
pub struct StockAnalysisTask {
    pub symbol: String,
    pub shares_owned: f64,
}

impl StockAnalysisTask {
    pub fn new(symbol: impl Into<String>, shares_owned: f64) -> Self {
        Self {
            symbol: symbol.into(),
            shares_owned,
        }
    }

    fn schema_text(&self) -> String {
        format!(
            r#"{{
  "recommendation": "BUY" | "HOLD" | "SELL",
  "confidence": <number between 0-1>,
  "analysis": {{
    "technical": {{
      "trend": "UPWARD" | "DOWNWARD" | "SIDEWAYS",
      "strength": <number between 0-1>
    }},
    "sentiment": {{
      "overall": "POSITIVE" | "NEUTRAL" | "NEGATIVE",
      "score": <number between -1 to 1>
    }},
    "risk": {{
      "level": "LOW" | "MEDIUM" | "HIGH",
      "factors": ["factor1", "factor2"]
    }}
  }},
  "portfolio_impact": {{
    "stock_symbol": "{symbol}",
    "owned_shares": {shares},
    "current_value": <number>,
    "potential_change": <number>
  }},
  "news": [
    {{
      "title": "<string>",
      "summary": "<string>",
      "sentiment": "POSITIVE" | "NEUTRAL" | "NEGATIVE",
      "impact": "HIGH" | "MEDIUM" | "LOW"
    }}
  ],
  "reasoning": "<string>"
}}"#,
            symbol = self.symbol,
            shares = self.shares_owned
        )
    }
}

impl AnalysisTask for StockAnalysisTask {
    type Output = StockAnalysis;

    fn name(&self) -> &'static str {
        "stock_analysis"
    }

    fn validate_input(&self) -> Result<(), AnalysisError> {
        if self.symbol.trim().is_empty() {
            return Err(AnalysisError::EmptyQuery);
        }
        Ok(())
    }

    fn render_prompt(&self) -> String {
        format!(
            "You are a financial analysis expert. Analyze the stock {} with {} stocks owned \
and return ONLY a JSON response in the exact format shown below. Do not include any \
additional text, explanations, formatting, or markdown code blocks - only pure JSON.\n\n\
{}\n\n\
Base your analysis on:\n\
- Technical Analysis (price trends, overbought/oversold status, momentum)\n\
- Sentiment Analysis (news headlines, market sentiment)\n\
- Risk Assessment (market volatility, sector risks, news impact)\n\
- Recent News (provide 3-5 relevant news items with their impact on the stock)\n\n\
CRITICAL: Return ONLY pure JSON. Do not wrap the response in markdown code blocks or add \
any other formatting.",
            self.symbol,
            self.shares_owned,
            self.schema_text()
        )
    }

    fn required_keys(&self) -> &'static [&'static str] {
        REQUIRED_KEYS
    }

    fn pre_request_delay(&self) -> Option<Duration> {
        Some(PRE_REQUEST_DELAY)
    }

    fn parse_response(&self, raw: &str) -> Result<StockAnalysis, AnalysisError> {
        let parsed: StockAnalysis = super::parse_json_response(raw, self.required_keys())?;
        parsed.validate()?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{Scripted, ScriptedGenerator};
    use crate::analysis::Analyst;
    use crate::domain::stock::Recommendation;
    use crate::error::ErrorKind;

    #[tokio::test(start_paused = true)]
    async fn fenced_reply_parses_into_buy_verdict() {
        let raw = "```json\n{\"recommendation\":\"BUY\",\"analysis\":{},\"portfolio_impact\":{},\"news\":[]}\n```";
        let analyst = Analyst::new(ScriptedGenerator::replying(raw));

        let task = StockAnalysisTask::new("AAPL", 10.0);
        let analysis = analyst.run(&task).await.unwrap();
        assert_eq!(analysis.recommendation, Recommendation::Buy);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_required_key_is_malformed() {
        // No "news" key: must fail whole, never return a partial object.
        let raw = "{\"recommendation\":\"BUY\",\"analysis\":{},\"portfolio_impact\":{}}";
        let analyst = Analyst::new(ScriptedGenerator::replying(raw));

        let task = StockAnalysisTask::new("AAPL", 10.0);
        let err = analyst.run(&task).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[tokio::test(start_paused = true)]
    async fn non_json_reply_is_malformed() {
        let analyst = Analyst::new(ScriptedGenerator::replying("not json at all"));

        let task = StockAnalysisTask::new("AAPL", 10.0);
        let err = analyst.run(&task).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[tokio::test(start_paused = true)]
    async fn quota_transport_error_maps_to_rate_limit() {
        let generator = ScriptedGenerator::new(vec![Scripted::Fail(AnalysisError::classify(
            "quota exceeded for this project",
        ))]);
        let analyst = Analyst::new(generator);

        let task = StockAnalysisTask::new("AAPL", 10.0);
        let err = analyst.run(&task).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimit);
    }

    #[tokio::test]
    async fn blank_symbol_fails_fast_without_a_request() {
        let generator = ScriptedGenerator::replying("{}");
        let analyst = Analyst::new(generator);

        let task = StockAnalysisTask::new("   ", 10.0);
        let err = analyst.run(&task).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyQuery);
        // Reach into the generator to confirm nothing went out.
        assert_eq!(analyst.generator.call_count(), 0);
    }

    #[test]
    fn prompt_embeds_subject_and_schema() {
        let task = StockAnalysisTask::new("MSFT", 8.0);
        let prompt = task.render_prompt();
        assert!(prompt.contains("MSFT"));
        assert!(prompt.contains("\"recommendation\": \"BUY\" | \"HOLD\" | \"SELL\""));
        assert!(prompt.contains("only pure JSON"));
    }
}
