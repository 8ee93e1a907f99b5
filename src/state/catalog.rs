use std::cmp::Ordering;
use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::error::{NutriError, Result};
use crate::models::Ingredient;

/// Minimum Jaro–Winkler similarity for a fuzzy search hit.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Similarity assigned to names containing the query as a substring.
const SUBSTRING_SCORE: f64 = 0.9;

/// In-memory ingredient database.
pub struct IngredientCatalog {
    /// All ingredients keyed by lowercase name.
    ingredients: HashMap<String, Ingredient>,
    /// Code to lowercase name.
    codes: HashMap<String, String>,
}

impl IngredientCatalog {
    /// Build a catalog; later duplicates (case-insensitive name) win.
    ///
    /// A code claimed by several ingredients resolves to the last one loaded.
    pub fn new(ingredients: Vec<Ingredient>) -> Self {
        let mut map: HashMap<String, Ingredient> = HashMap::new();
        let mut codes: HashMap<String, String> = HashMap::new();
        for ingredient in ingredients {
            let key = ingredient.key();
            if let Some(old_code) = map.get(&key).and_then(|old| old.code.clone()) {
                if codes.get(&old_code) == Some(&key) {
                    codes.remove(&old_code);
                }
            }
            if let Some(code) = &ingredient.code {
                if let Some(previous) = codes.insert(code.clone(), key.clone()) {
                    if previous != key {
                        tracing::warn!(
                            "Code {} is shared by '{}' and '{}'; using '{}'",
                            code,
                            previous,
                            key,
                            key
                        );
                    }
                }
            }
            map.insert(key, ingredient);
        }
        Self {
            ingredients: map,
            codes,
        }
    }

    /// Get an ingredient by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.get(&name.trim().to_lowercase())
    }

    /// Get an ingredient by its exact code.
    pub fn get_by_code(&self, code: &str) -> Option<&Ingredient> {
        self.codes
            .get(code.trim())
            .and_then(|key| self.ingredients.get(key))
    }

    /// Resolve a code or a name, code first.
    pub fn resolve(&self, query: &str) -> Result<&Ingredient> {
        self.get_by_code(query)
            .or_else(|| self.get(query))
            .ok_or_else(|| NutriError::IngredientNotFound(query.to_string()))
    }

    /// Rank ingredients by similarity to `query`, best first.
    ///
    /// Exact names score 1.0, substring matches 0.9, otherwise Jaro–Winkler
    /// similarity above [`FUZZY_MATCH_THRESHOLD`].
    pub fn search(&self, query: &str, limit: usize) -> Vec<(&Ingredient, f64)> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(&Ingredient, f64)> = self
            .ingredients
            .iter()
            .filter_map(|(key, ing)| {
                let score = if *key == query {
                    1.0
                } else if key.contains(&query) {
                    SUBSTRING_SCORE
                } else {
                    jaro_winkler(key, &query)
                };
                (score > FUZZY_MATCH_THRESHOLD).then_some((ing, score))
            })
            .collect();

        hits.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.name.cmp(&b.0.name))
        });
        hits.truncate(limit);
        hits
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}
