use crate::analysis::stock::StockAnalysisTask;
use crate::analysis::Analyst;
use crate::domain::stock::Recommendation;
use crate::llm::TextGenerator;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct WatchlistEntry {
    pub symbol: String,
    pub shares_owned: f64,
}

impl WatchlistEntry {
    pub fn new(symbol: impl Into<String>, shares_owned: f64) -> Self {
        Self {
            symbol: symbol.into(),
            shares_owned,
        }
    }
}

/// A failed item keeps its slot with `Pending` so the caller can show a
/// placeholder and offer a manual retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PredictionState {
    Ready(Recommendation),
    Pending,
}

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub symbol: String,
    pub state: PredictionState,
}

/// Load predictions for a watchlist one request at a time. Strictly
/// sequential, no fan-out. One item failing never aborts the rest; this
/// function itself cannot fail.
pub async fn load_predictions<G: TextGenerator>(
    analyst: &Analyst<G>,
    entries: &[WatchlistEntry],
) -> Vec<Prediction> {
    let mut out = Vec::with_capacity(entries.len());

    for entry in entries {
        let task = StockAnalysisTask::new(entry.symbol.clone(), entry.shares_owned);
        let state = match analyst.run(&task).await {
            Ok(analysis) => PredictionState::Ready(analysis.recommendation),
            Err(err) => {
                tracing::warn!(
                    symbol = %entry.symbol,
                    kind = %err.kind(),
                    error = %err,
                    "prediction failed; recording placeholder"
                );
                PredictionState::Pending
            }
        };

        out.push(Prediction {
            symbol: entry.symbol.clone(),
            state,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{Scripted, ScriptedGenerator};
    use crate::error::AnalysisError;

    fn analysis_json(recommendation: &str) -> String {
        format!(
            "{{\"recommendation\":\"{recommendation}\",\"analysis\":{{}},\"portfolio_impact\":{{}},\"news\":[]}}"
        )
    }

    #[tokio::test(start_paused = true)]
    async fn one_failure_leaves_a_placeholder_and_the_rest_resolve() {
        let generator = ScriptedGenerator::new(vec![
            Scripted::Reply(analysis_json("BUY")),
            Scripted::Fail(AnalysisError::Network("connection reset".to_string())),
            Scripted::Reply(analysis_json("HOLD")),
        ]);
        let analyst = Analyst::new(generator);

        let entries = vec![
            WatchlistEntry::new("AAPL", 10.0),
            WatchlistEntry::new("GOOGL", 5.0),
            WatchlistEntry::new("MSFT", 8.0),
        ];

        let predictions = load_predictions(&analyst, &entries).await;
        assert_eq!(predictions.len(), 3);
        assert_eq!(
            predictions[0].state,
            PredictionState::Ready(Recommendation::Buy)
        );
        assert_eq!(predictions[1].state, PredictionState::Pending);
        assert_eq!(
            predictions[2].state,
            PredictionState::Ready(Recommendation::Hold)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn items_are_loaded_strictly_in_order() {
        let generator = ScriptedGenerator::new(vec![
            Scripted::Reply(analysis_json("SELL")),
            Scripted::Reply(analysis_json("BUY")),
        ]);
        let analyst = Analyst::new(generator);

        let entries = vec![
            WatchlistEntry::new("TSLA", 3.0),
            WatchlistEntry::new("NVDA", 2.0),
        ];

        let predictions = load_predictions(&analyst, &entries).await;
        assert_eq!(predictions[0].symbol, "TSLA");
        assert_eq!(
            predictions[0].state,
            PredictionState::Ready(Recommendation::Sell)
        );
        assert_eq!(predictions[1].symbol, "NVDA");
        assert_eq!(analyst.generator.call_count(), 2);
    }
}
