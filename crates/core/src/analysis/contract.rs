use crate::analysis::AnalysisTask;
use crate::domain::contract::ContractAnswer;
use crate::error::AnalysisError;

#[derive(Debug, Clone)]
pub struct ContractQueryTask {
    pub query: String,
}

impl ContractQueryTask {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

impl AnalysisTask for ContractQueryTask {
    type Output = ContractAnswer;

    fn name(&self) -> &'static str {
        "contract_qa"
    }

    fn validate_input(&self) -> Result<(), AnalysisError> {
        if self.query.trim().is_empty() {
            return Err(AnalysisError::EmptyQuery);
        }
        Ok(())
    }

    fn render_prompt(&self) -> String {
        format!(
            "As a smart contract and blockchain expert, please provide a clear and accurate \
response to this question about smart contracts: {query}\n\n\
Please format your response in a clear, structured way. If providing code examples, \
include explanations.\n\n\
Question: {query}",
            query = self.query
        )
    }

    // The one task that stays free text: no JSON schema, no key check.
    fn parse_response(&self, raw: &str) -> Result<ContractAnswer, AnalysisError> {
        let answer = raw.trim();
        if answer.is_empty() {
            return Err(AnalysisError::MalformedResponse(
                "model returned an empty answer".to_string(),
            ));
        }
        Ok(ContractAnswer {
            answer: answer.to_string(),
        })
    }
}
