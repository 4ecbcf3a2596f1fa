use crate::model::RecipeEntry;
use crate::OrderedKeySet;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Recipes keyed by identifier, in load order.
///
/// Iteration order is the order in which identifiers were first inserted and
/// it decides ranking ties. Inserting an identifier that is already present
/// replaces its ingredients but keeps its original position.
///
/// Serializes as a JSON object; deserializing keeps the document order.
///
/// # Examples
///
/// ```
/// use pantry_find::Catalog;
///
/// let catalog: Catalog = serde_json::from_str(
///     r#"{"Recipe 2": ["rice"], "Recipe 1": ["pasta", "tomato"]}"#,
/// )?;
/// let names: Vec<&str> = catalog.iter().map(|r| r.name()).collect();
/// assert_eq!(names, ["Recipe 2", "Recipe 1"]);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<RecipeEntry>,
    /// Position of each identifier in `entries`
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a recipe. The name is trimmed before it is used as a key.
    ///
    /// Names that differ only in surrounding whitespace are the same record,
    /// so `" Soup"` with no ingredients followed by `"Soup"` with some leaves
    /// only the second one, and ranking never sees the empty record.
    pub fn insert<I, S>(&mut self, name: impl AsRef<str>, ingredients: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(RecipeEntry::new(name, ingredients));
    }

    /// Adds an already built record, replacing any record with the same name.
    pub fn push(&mut self, entry: RecipeEntry) {
        match self.index.get(entry.name()).copied() {
            Some(position) => self.entries[position] = entry,
            None => {
                self.index.insert(entry.name().to_string(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&RecipeEntry> {
        self.index.get(name).map(|&position| &self.entries[position])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the recipes in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, RecipeEntry> {
        self.entries.iter()
    }

    /// Builds the ingredient index for this catalog.
    ///
    /// Every ingredient of every recipe is inserted once, in sorted order.
    /// Ranking does not consult this index.
    pub fn ingredient_set(&self) -> OrderedKeySet {
        let mut ingredients: Vec<&str> = self
            .entries
            .iter()
            .flat_map(|entry| entry.ingredients().iter().map(String::as_str))
            .collect();
        ingredients.sort_unstable();
        ingredients.dedup();
        ingredients.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a RecipeEntry;
    type IntoIter = std::slice::Iter<'a, RecipeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<RecipeEntry> for Catalog {
    fn from_iter<T: IntoIterator<Item = RecipeEntry>>(iter: T) -> Self {
        let mut catalog = Catalog::new();
        for entry in iter {
            catalog.push(entry);
        }
        catalog
    }
}

impl<K, V, S> FromIterator<(K, V)> for Catalog
where
    K: AsRef<str>,
    V: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(name, ingredients)| RecipeEntry::new(name, ingredients))
            .collect()
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.name(), entry.ingredients())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of recipe names to ingredient lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Catalog, A::Error> {
                let mut catalog = Catalog::new();
                while let Some((name, ingredients)) =
                    access.next_entry::<String, Vec<String>>()?
                {
                    catalog.insert(name, ingredients);
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_keeps_insertion_order() {
        let mut catalog = Catalog::new();
        catalog.insert("Recipe 3", ["potato"]);
        catalog.insert("Recipe 1", ["pasta"]);
        catalog.insert("Recipe 2", ["rice"]);

        let names: Vec<&str> = catalog.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["Recipe 3", "Recipe 1", "Recipe 2"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_repeated_name_replaces_in_place() {
        let mut catalog = Catalog::new();
        catalog.insert("Soup", ["water"]);
        catalog.insert("Salad", ["lettuce"]);
        catalog.insert(" Soup ", ["leeks", "potato"]);

        assert_eq!(catalog.len(), 2);
        let first = catalog.iter().next().unwrap();
        assert_eq!(first.name(), "Soup");
        assert_eq!(first.ingredients(), ["leeks", "potato"]);
        assert_eq!(catalog.get("Soup").unwrap().ingredients().len(), 2);
    }

    #[test]
    fn test_deserialized_entry_collapses_with_trimmed_name() {
        let entry: RecipeEntry =
            serde_json::from_str(r#"{"name": " Soup ", "ingredients": ["water"]}"#).unwrap();

        let mut catalog = Catalog::new();
        catalog.insert("Soup", ["leeks"]);
        catalog.push(entry);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Soup").unwrap().ingredients(), ["water"]);
    }

    #[test]
    fn test_empty_record_replaced_by_trimmed_name() {
        let mut catalog = Catalog::new();
        catalog.insert(" Soup", Vec::<String>::new());
        catalog.insert("Soup", ["leeks", "potato"]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Soup").unwrap().ingredients(), ["leeks", "potato"]);
    }

    #[test]
    fn test_get_missing() {
        let catalog: Catalog = [("Soup", vec!["water"])].into_iter().collect();
        assert!(catalog.get("Stew").is_none());
        assert!(catalog.get("Soup").is_some());
    }

    #[test]
    fn test_deserialize_preserves_document_order() {
        let json = indoc! {r#"
            {
                "Zucchini Bread": ["zucchini", "flour"],
                "Apple Pie": ["apple", "flour", "butter"],
                "Miso Soup": ["miso", "tofu"]
            }"#};

        let catalog: Catalog = serde_json::from_str(json).unwrap();

        let names: Vec<&str> = catalog.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["Zucchini Bread", "Apple Pie", "Miso Soup"]);
        assert_eq!(
            catalog.get("Apple Pie").unwrap().ingredients(),
            ["apple", "flour", "butter"]
        );
    }

    #[test]
    fn test_serialize_as_object() {
        let catalog: Catalog = [("B", vec!["rice"]), ("A", vec!["peas", "carrot"])]
            .into_iter()
            .collect();

        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(json, r#"{"B":["rice"],"A":["peas","carrot"]}"#);
    }

    #[test]
    fn test_deserialize_rejects_non_map() {
        let result: Result<Catalog, _> = serde_json::from_str(r#"["rice"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_ingredient_set() {
        let catalog: Catalog = [
            ("Recipe 1", vec!["tomato", "onion", "garlic"]),
            ("Recipe 2", vec!["garlic", "ginger"]),
        ]
        .into_iter()
        .collect();

        let set = catalog.ingredient_set();

        assert_eq!(set.len(), 4);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            ["garlic", "ginger", "onion", "tomato"]
        );
        // Sorted insertion: garlic, ginger, onion -> ginger at the root.
        assert_eq!(set.root().unwrap().value(), "ginger");
        assert_eq!(set.substring_search("gar"), Some("garlic"));
    }
}
