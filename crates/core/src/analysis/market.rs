use crate::analysis::AnalysisTask;
use crate::domain::market::MarketAnalysis;

pub const REQUIRED_KEYS: &[&str] = &["indices", "sectors", "highlights", "risks"];

/// Broad market overview. Takes no payload, so there is nothing to
/// validate before the request.
#[derive(Debug, Clone, Default)]
pub struct MarketAnalysisTask;

impl AnalysisTask for MarketAnalysisTask {
    type Output = MarketAnalysis;

    fn name(&self) -> &'static str {
        "market_analysis"
    }

    fn render_prompt(&self) -> String {
        r#"Provide a current market analysis with the following information:

1. Major indices performance (S&P 500, NASDAQ, DOW) with percentage changes
2. Top performing sectors with percentage changes
3. Three key market highlights
4. Three major risk factors affecting the market

Return ONLY a JSON object in this format, with no markdown formatting or code fences:
{
  "indices": [
    {"name": "S&P 500", "change": "+X.X%"},
    {"name": "NASDAQ", "change": "+X.X%"},
    {"name": "DOW", "change": "+X.X%"}
  ],
  "sectors": [
    {"name": "Sector1", "change": "+X.X%"},
    {"name": "Sector2", "change": "+X.X%"},
    {"name": "Sector3", "change": "+X.X%"}
  ],
  "highlights": [
    "Highlight 1",
    "Highlight 2",
    "Highlight 3"
  ],
  "risks": [
    "Risk 1",
    "Risk 2",
    "Risk 3"
  ]
}"#
        .to_string()
    }

    fn required_keys(&self) -> &'static [&'static str] {
        REQUIRED_KEYS
    }
}
