use serde::{Deserialize, Serialize};

/// Declared income figures supplied by the caller. All amounts are in the
/// filer's currency; zero means "nothing to declare" for that stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxFilingData {
    #[serde(default)]
    pub salary: f64,

    #[serde(default)]
    pub business_income: f64,

    #[serde(default)]
    pub investment_income: f64,

    #[serde(default)]
    pub other_income: f64,
}

impl TaxFilingData {
    pub fn total_declared(&self) -> f64 {
        self.salary + self.business_income + self.investment_income + self.other_income
    }

    /// True when nothing at all was declared; such requests are rejected
    /// before any prompt is rendered.
    pub fn is_empty(&self) -> bool {
        self.total_declared() == 0.0
    }
}

/// Model-produced tax assessment. The adapter requires the four top-level
/// sections; anything nested the model leaves out defaults to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxAssessment {
    #[serde(default)]
    pub income_sources: IncomeSources,

    #[serde(default)]
    pub taxable_income: TaxableIncome,

    #[serde(default)]
    pub deductions: Deductions,

    #[serde(default)]
    pub tax_liability: TaxLiability,

    #[serde(default)]
    pub optimization_strategies: Vec<OptimizationStrategy>,

    #[serde(default)]
    pub action_plan: Vec<ActionItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeSources {
    #[serde(default)]
    pub salary: f64,

    #[serde(default)]
    pub business: f64,

    #[serde(default)]
    pub investments: f64,

    #[serde(default)]
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxableIncome {
    #[serde(default)]
    pub gross_total: f64,

    #[serde(default)]
    pub exemptions: f64,

    #[serde(default)]
    pub net_taxable: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deductions {
    #[serde(default)]
    pub investments: DeductionGroup,

    #[serde(default)]
    pub insurance: DeductionGroup,

    #[serde(default)]
    pub loan_repayments: DeductionGroup,

    #[serde(default)]
    pub business: DeductionGroup,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeductionGroup {
    #[serde(default)]
    pub amount: f64,

    #[serde(default)]
    pub items: Vec<DeductionItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionItem {
    pub name: String,

    #[serde(default)]
    pub amount: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxLiability {
    #[serde(default)]
    pub tax_slab: String,

    #[serde(default)]
    pub base_tax: f64,

    #[serde(default)]
    pub surcharge: f64,

    #[serde(default)]
    pub cess: f64,

    #[serde(default)]
    pub total_tax: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationStrategy {
    pub category: String,

    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub action: String,

    #[serde(default)]
    pub potential_savings: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    #[serde(default)]
    pub priority: u32,

    pub action: String,

    #[serde(default)]
    pub deadline: String,

    #[serde(default)]
    pub potential_benefit: f64,
}
