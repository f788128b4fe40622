use serde::{Deserialize, Serialize};

/// Broad market snapshot: index and sector moves plus narrative bullets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketAnalysis {
    #[serde(default)]
    pub indices: Vec<MarketMove>,

    #[serde(default)]
    pub sectors: Vec<MarketMove>,

    #[serde(default)]
    pub highlights: Vec<String>,

    #[serde(default)]
    pub risks: Vec<String>,
}

/// One index or sector with its formatted percentage change (e.g. "+1.2%").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketMove {
    pub name: String,
    pub change: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_market_snapshot() {
        let v = json!({
            "indices": [
                {"name": "S&P 500", "change": "+0.4%"},
                {"name": "NASDAQ", "change": "-0.2%"}
            ],
            "sectors": [{"name": "Energy", "change": "+1.1%"}],
            "highlights": ["Yields eased after the auction."],
            "risks": ["Earnings revisions", "Oil supply"]
        });

        let parsed: MarketAnalysis = serde_json::from_value(v).unwrap();
        assert_eq!(parsed.indices.len(), 2);
        assert_eq!(parsed.sectors[0].name, "Energy");
        assert_eq!(parsed.risks.len(), 2);
    }
}
