use serde::{Deserialize, Serialize};

/// A recipe with its match level against the user's ingredients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecipe {
    pub name: String,
    /// Matched ingredients divided by the recipe's ingredient count
    pub score: f64,
    /// Number of user ingredients found in the recipe
    pub matched: usize,
}

impl ScoredRecipe {
    pub(crate) fn new(name: String, matched: usize, total: usize) -> Self {
        Self {
            name,
            score: matched as f64 / total as f64,
            matched,
        }
    }
}
