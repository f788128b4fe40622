pub mod contract;
pub mod market;
pub mod portfolio;
pub mod stock;
pub mod tax;
pub mod watchlist;

use crate::error::AnalysisError;
use crate::llm::{json, TextGenerator};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// One analysis kind: how to reject degenerate input, what to ask the
/// model, and how to turn its reply into a typed result. The default
/// `parse_response` covers the strict-JSON tasks; plain-text tasks
/// override it.
pub trait AnalysisTask {
    type Output: DeserializeOwned;

    fn name(&self) -> &'static str;

    /// Minimal non-empty contract on the payload. Failing here guarantees
    /// no prompt is rendered and no request is sent.
    fn validate_input(&self) -> Result<(), AnalysisError> {
        Ok(())
    }

    fn render_prompt(&self) -> String;

    /// Top-level JSON keys that must be present in the reply. A missing
    /// key is treated identically to a parse failure.
    fn required_keys(&self) -> &'static [&'static str] {
        &[]
    }

    /// Fixed pre-request pause. Not adaptive backoff; a single delay used
    /// where back-to-back calls tend to trip provider rate limits.
    fn pre_request_delay(&self) -> Option<Duration> {
        None
    }

    fn parse_response(&self, raw: &str) -> Result<Self::Output, AnalysisError> {
        parse_json_response(raw, self.required_keys())
    }
}

/// Sanitize free text into the task's typed output: strip fences and BOM,
/// isolate the first balanced object when prose surrounds it, check the
/// required keys, then deserialize. Raw model text goes to tracing only.
pub(crate) fn parse_json_response<T: DeserializeOwned>(
    raw: &str,
    required_keys: &[&str],
) -> Result<T, AnalysisError> {
    let cleaned = json::sanitize(raw);
    let candidate = json::extract_object(&cleaned).unwrap_or(cleaned.as_str());

    let value = serde_json::from_str::<serde_json::Value>(candidate).map_err(|err| {
        tracing::error!(error = %err, raw = %raw, "model response is not valid JSON");
        AnalysisError::MalformedResponse(format!("invalid JSON: {err}"))
    })?;

    for key in required_keys {
        if value.get(key).is_none() {
            tracing::error!(key = %key, raw = %raw, "model response is missing a required key");
            return Err(AnalysisError::MalformedResponse(format!(
                "missing required key `{key}`"
            )));
        }
    }

    serde_json::from_value(value).map_err(|err| {
        tracing::error!(error = %err, raw = %raw, "model response does not match the expected shape");
        AnalysisError::MalformedResponse(format!("schema mismatch: {err}"))
    })
}

/// Stateless request/response adapter. Each `run` is an independent
/// render → request → sanitize/parse sequence; nothing is cached or
/// retried across invocations.
#[derive(Debug, Clone)]
pub struct Analyst<G> {
    generator: G,
}

impl<G: TextGenerator> Analyst<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub async fn run<T: AnalysisTask>(&self, task: &T) -> Result<T::Output, AnalysisError> {
        task.validate_input()?;

        if let Some(delay) = task.pre_request_delay() {
            tokio::time::sleep(delay).await;
        }

        let prompt = task.render_prompt();
        let raw = self.generator.generate_text(&prompt).await?;
        tracing::debug!(task = task.name(), raw_len = raw.len(), "model response received");

        task.parse_response(&raw)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[derive(Debug, serde::Deserialize)]
    struct Verdict {
        verdict: String,
    }

    #[test]
    fn parses_fenced_json() {
        let raw = "```json\n{\"verdict\":\"ok\"}\n```";
        let parsed: Verdict = parse_json_response(raw, &["verdict"]).unwrap();
        assert_eq!(parsed.verdict, "ok");
    }

    #[test]
    fn parses_json_embedded_in_prose() {
        let raw = "Here is the result: {\"verdict\":\"ok\"} Hope this helps!";
        let parsed: Verdict = parse_json_response(raw, &["verdict"]).unwrap();
        assert_eq!(parsed.verdict, "ok");
    }

    #[test]
    fn rejects_non_json_text() {
        let err = parse_json_response::<Verdict>("not json at all", &["verdict"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn rejects_missing_required_key() {
        let raw = json!({"other": 1}).to_string();
        let err = parse_json_response::<Verdict>(&raw, &["verdict"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert!(err.to_string().contains("verdict"));
    }

    #[test]
    fn required_key_with_null_value_still_counts_as_present() {
        // `get` distinguishes absent from null; null is a schema problem,
        // not a missing key, and surfaces via typed deserialization.
        let raw = json!({"verdict": null}).to_string();
        let err = parse_json_response::<Verdict>(&raw, &["verdict"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert!(err.to_string().contains("schema mismatch"));
    }
}
