use serde::{Deserialize, Serialize};

/// A single catalog record: a recipe identifier and its ingredients.
///
/// Ingredients are expected to be normalized already (lowercase, trimmed,
/// without quantities). Their order is the order of the source data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRecipeEntry")]
pub struct RecipeEntry {
    /// Recipe identifier (usually the title)
    name: String,
    /// Normalized ingredient names
    ingredients: Vec<String>,
}

/// Deserialized form, normalized through [`RecipeEntry::new`]
#[derive(Deserialize)]
struct RawRecipeEntry {
    name: String,
    ingredients: Vec<String>,
}

impl From<RawRecipeEntry> for RecipeEntry {
    fn from(raw: RawRecipeEntry) -> Self {
        RecipeEntry::new(raw.name, raw.ingredients)
    }
}

impl RecipeEntry {
    /// Creates a record, trimming surrounding whitespace from the name.
    pub fn new<I, S>(name: impl AsRef<str>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RecipeEntry {
            name: name.as_ref().trim().to_string(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Returns true if `ingredient` is one of this recipe's ingredients.
    ///
    /// This is an exact comparison, "sugar" does not match "brown sugar".
    pub fn contains(&self, ingredient: &str) -> bool {
        self.ingredients.iter().any(|i| i == ingredient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed() {
        let entry = RecipeEntry::new("  Pumpkin Bread \n", ["pumpkin", "flour"]);
        assert_eq!(entry.name(), "Pumpkin Bread");
        assert_eq!(entry.ingredients(), ["pumpkin", "flour"]);
    }

    #[test]
    fn test_deserialize_trims_name() {
        let entry: RecipeEntry =
            serde_json::from_str(r#"{"name": " Soup ", "ingredients": ["water"]}"#).unwrap();

        assert_eq!(entry.name(), "Soup");
        assert_eq!(entry, RecipeEntry::new("Soup", ["water"]));
    }

    #[test]
    fn test_contains_is_exact() {
        let entry = RecipeEntry::new("Pumpkin Bread", ["brown sugar", "pumpkin"]);

        assert!(entry.contains("brown sugar"));
        assert!(entry.contains("pumpkin"));
        assert!(!entry.contains("sugar"));
        assert!(!entry.contains("Pumpkin"));
    }
}
