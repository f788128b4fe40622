use serde::{Deserialize, Serialize};

/// Free-form answer to a smart-contract question. The only task whose
/// response stays plain text instead of strict JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractAnswer {
    pub answer: String,
}
