//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! The ingredient index is wrapped in a mutex so it can be shared as an
//! `Arc` object; catalogs cross the boundary as plain records.

use crate::model::{Catalog, RecipeEntry};
use crate::search::{rank as rank_internal, rank_scored, RankError, ScoredRecipe};
use crate::tree::OrderedKeySet;
use std::sync::{Arc, Mutex, MutexGuard};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum PantryError {
    #[error("Recipe has no ingredients: {name}")]
    EmptyRecipeIngredients { name: String },
}

impl From<RankError> for PantryError {
    fn from(e: RankError) -> Self {
        match e {
            RankError::EmptyRecipeIngredients(name) => PantryError::EmptyRecipeIngredients { name },
        }
    }
}

/// A recipe and its ingredients.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
}

/// A ranked recipe with its match level.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiScoredRecipe {
    pub name: String,
    pub score: f64,
    pub matched: u64,
}

impl From<ScoredRecipe> for FfiScoredRecipe {
    fn from(r: ScoredRecipe) -> Self {
        FfiScoredRecipe {
            name: r.name,
            score: r.score,
            matched: r.matched as u64,
        }
    }
}

/// FFI-safe handle to an ingredient index.
#[derive(uniffi::Object)]
pub struct FfiIngredientIndex {
    inner: Mutex<OrderedKeySet>,
}

#[uniffi::export]
impl FfiIngredientIndex {
    /// Creates an empty index.
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        Arc::new(FfiIngredientIndex::from_set(OrderedKeySet::new()))
    }

    /// Builds the index from every ingredient in the catalog.
    #[uniffi::constructor]
    pub fn from_catalog(catalog: Vec<FfiRecipe>) -> Arc<Self> {
        Arc::new(FfiIngredientIndex::from_set(
            to_catalog(catalog).ingredient_set(),
        ))
    }

    /// Inserts an ingredient. Returns false if it was already present.
    pub fn insert(&self, value: String) -> bool {
        self.lock().insert(value)
    }

    /// Returns true if the ingredient is in the index.
    pub fn exists(&self, value: String) -> bool {
        self.lock().exists(&value)
    }

    /// Returns the first ingredient, in tree preorder, containing `needle`.
    pub fn substring_search(&self, needle: String) -> Option<String> {
        self.lock().substring_search(&needle).map(str::to_string)
    }

    /// Returns the number of ingredients in the index.
    pub fn len(&self) -> u64 {
        self.lock().len() as u64
    }

    /// Returns all ingredients in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.lock().iter().map(str::to_string).collect()
    }
}

impl FfiIngredientIndex {
    fn from_set(set: OrderedKeySet) -> Self {
        FfiIngredientIndex {
            inner: Mutex::new(set),
        }
    }

    fn lock(&self) -> MutexGuard<'_, OrderedKeySet> {
        // Insertions never panic midway, a poisoned lock still holds a valid tree.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn to_catalog(recipes: Vec<FfiRecipe>) -> Catalog {
    recipes
        .into_iter()
        .map(|r| RecipeEntry::new(r.name, r.ingredients))
        .collect()
}

/// Returns up to `limit` recipe names, best match first.
#[uniffi::export]
pub fn rank(
    catalog: Vec<FfiRecipe>,
    user_keys: Vec<String>,
    limit: u32,
) -> Result<Vec<String>, PantryError> {
    let catalog = to_catalog(catalog);
    Ok(rank_internal(&catalog, &user_keys, limit as usize)?)
}

/// Returns up to `limit` recipes with their scores, best match first.
#[uniffi::export]
pub fn rank_with_scores(
    catalog: Vec<FfiRecipe>,
    user_keys: Vec<String>,
    limit: u32,
) -> Result<Vec<FfiScoredRecipe>, PantryError> {
    let catalog = to_catalog(catalog);
    let results = rank_scored(&catalog, &user_keys, limit as usize)?;
    Ok(results.into_iter().map(FfiScoredRecipe::from).collect())
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
