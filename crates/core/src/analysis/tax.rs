use crate::analysis::AnalysisTask;
use crate::domain::tax::{TaxAssessment, TaxFilingData};
use crate::error::AnalysisError;

pub const REQUIRED_KEYS: &[&str] = &[
    "income_sources",
    "taxable_income",
    "deductions",
    "tax_liability",
];

#[derive(Debug, Clone)]
pub struct TaxAnalysisTask {
    pub data: TaxFilingData,
}

impl TaxAnalysisTask {
    pub fn new(data: TaxFilingData) -> Self {
        Self { data }
    }
}

impl AnalysisTask for TaxAnalysisTask {
    type Output = TaxAssessment;

    fn name(&self) -> &'static str {
        "tax_analysis"
    }

    fn validate_input(&self) -> Result<(), AnalysisError> {
        if self.data.is_empty() {
            return Err(AnalysisError::EmptyQuery);
        }
        Ok(())
    }

    fn render_prompt(&self) -> String {
        let data_json = serde_json::to_string_pretty(&self.data)
            .unwrap_or_else(|_| "{}".to_string());

        format!(
            r#"You are a highly skilled tax expert specializing in financial analysis and tax optimization.
Your task is to analyze the given financial data, calculate tax liability, and suggest legally
compliant strategies for tax savings.

Given the following financial data:
{data_json}

Perform a comprehensive tax assessment by following these steps:

Step 1: Identify Income Sources
- Analyze and list all income streams, including salary or business revenue, stock market
  gains, dividends, and any other forms of income.

Step 2: Calculate Total Taxable Income
- Compute the total taxable income and consider exemptions such as specific allowances.

Step 3: Identify Tax Deductions & Exemptions
- Identify legally permissible deductions and categorize them into investments, insurance,
  loan repayments, and business or professional deductions.

Step 4: Determine Tax Slab & Compute Tax Liability
- Identify the applicable income tax slab and compute total tax liability, including
  rebates, standard deductions, and surcharge where applicable.

Step 5: Tax Optimization & Savings Strategies
- Suggest legal ways to reduce tax liability: tax-efficient investments, housing and travel
  allowance optimization, capital gains planning, and business deductions.

Step 6: Final Tax Optimization Plan
- Provide a structured tax-saving strategy with an action plan for the financial year.

IMPORTANT: Return ONLY a valid JSON object with no markdown or other formatting. The
response must be a pure JSON string that can be parsed directly. Use this exact structure:

{{
  "income_sources": {{
    "salary": number,
    "business": number,
    "investments": number,
    "total": number
  }},
  "taxable_income": {{
    "gross_total": number,
    "exemptions": number,
    "net_taxable": number
  }},
  "deductions": {{
    "investments": {{"amount": number, "items": [{{"name": string, "amount": number}}]}},
    "insurance": {{"amount": number, "items": [{{"name": string, "amount": number}}]}},
    "loan_repayments": {{"amount": number, "items": [{{"name": string, "amount": number}}]}},
    "business": {{"amount": number, "items": [{{"name": string, "amount": number}}]}}
  }},
  "tax_liability": {{
    "tax_slab": string,
    "base_tax": number,
    "surcharge": number,
    "cess": number,
    "total_tax": number
  }},
  "optimization_strategies": [
    {{"category": string, "suggestions": [{{"action": string, "potential_savings": number}}]}}
  ],
  "action_plan": [
    {{"priority": number, "action": string, "deadline": string, "potential_benefit": number}}
  ]
}}"#
        )
    }

    fn required_keys(&self) -> &'static [&'static str] {
        REQUIRED_KEYS
    }
}
