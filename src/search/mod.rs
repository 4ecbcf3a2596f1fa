use crate::model::{Catalog, RecipeEntry};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

mod model;

pub use model::ScoredRecipe;

/// Number of recipes returned when no limit is given
pub const DEFAULT_LIMIT: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    #[error("Recipe has no ingredients: {0}")]
    EmptyRecipeIngredients(String),
}

/// Ranking settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankOptions {
    /// Maximum number of recipes to return
    pub limit: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        RankOptions {
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Returns up to `limit` recipe names, best match first.
///
/// A recipe's score is the number of `user_keys` found among its ingredients
/// divided by its ingredient count. Keys are compared for exact equality and
/// a key given twice counts twice. Recipes with equal scores keep catalog
/// order.
///
/// Fails with [`RankError::EmptyRecipeIngredients`] if any recipe has no
/// ingredients.
///
/// # Examples
///
/// ```
/// use pantry_find::{rank, Catalog};
///
/// let catalog: Catalog = [
///     ("Fried Rice", vec!["rice", "egg", "peas", "soy sauce"]),
///     ("Omelette", vec!["egg", "butter"]),
/// ]
/// .into_iter()
/// .collect();
///
/// let best = rank(&catalog, &["egg", "butter"], 5)?;
/// assert_eq!(best, ["Omelette", "Fried Rice"]);
/// # Ok::<(), pantry_find::RankError>(())
/// ```
pub fn rank<S: AsRef<str>>(
    catalog: &Catalog,
    user_keys: &[S],
    limit: usize,
) -> Result<Vec<String>, RankError> {
    let results = rank_scored(catalog, user_keys, limit)?;
    Ok(results.into_iter().map(|r| r.name).collect())
}

/// [`rank`] with the limit taken from `options`
pub fn rank_with<S: AsRef<str>>(
    catalog: &Catalog,
    user_keys: &[S],
    options: &RankOptions,
) -> Result<Vec<String>, RankError> {
    rank(catalog, user_keys, options.limit)
}

/// Same as [`rank`], keeping the score of each returned recipe.
pub fn rank_scored<S: AsRef<str>>(
    catalog: &Catalog,
    user_keys: &[S],
    limit: usize,
) -> Result<Vec<ScoredRecipe>, RankError> {
    debug!(
        recipes = catalog.len(),
        keys = user_keys.len(),
        limit,
        "ranking recipes"
    );

    let mut results = catalog
        .iter()
        .map(|entry| score_recipe(entry, user_keys))
        .collect::<Result<Vec<_>, _>>()?;

    sort_results(&mut results);
    results.truncate(limit);

    debug!(returned = results.len(), "ranked recipes");
    Ok(results)
}

fn score_recipe<S: AsRef<str>>(
    entry: &RecipeEntry,
    user_keys: &[S],
) -> Result<ScoredRecipe, RankError> {
    let total = entry.ingredients().len();
    if total == 0 {
        return Err(RankError::EmptyRecipeIngredients(entry.name().to_string()));
    }

    let matched = user_keys
        .iter()
        .filter(|key| entry.contains(key.as_ref()))
        .count();

    Ok(ScoredRecipe::new(entry.name().to_string(), matched, total))
}

/// Sort by score, highest first. The sort is stable so ties keep catalog order.
fn sort_results(results: &mut [ScoredRecipe]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}
