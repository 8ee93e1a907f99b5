use serde::{Deserialize, Serialize};

use crate::aggregator;
use crate::aggregator::NutrientTotals;
use crate::models::Ingredient;

/// A named, ordered list of ingredients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ingredients: Vec::new(),
        }
    }

    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Totals recomputed from the current ingredients.
    pub fn totals(&self) -> NutrientTotals {
        aggregator::aggregate_recipe(self)
    }

    /// Position of the first ingredient matching a name or code.
    pub fn find_ingredient(&self, query: &str) -> Option<usize> {
        self.ingredients.iter().position(|i| i.matches(query))
    }
}

/// A named, ordered list of recipes.
///
/// Meal totals are never stored: [`Meal::totals`] derives them from the
/// ingredients every time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,

    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

impl Meal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            recipes: Vec::new(),
        }
    }

    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.recipes.push(recipe);
        self
    }

    pub fn totals(&self) -> NutrientTotals {
        aggregator::aggregate_meal(self)
    }

    /// Get a recipe by name (case-insensitive).
    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.recipes
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn recipe_mut(&mut self, name: &str) -> Option<&mut Recipe> {
        self.recipes
            .iter_mut()
            .find(|r| r.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Count of ingredients across all recipes.
    pub fn ingredient_count(&self) -> usize {
        self.recipes.iter().map(|r| r.ingredients.len()).sum()
    }
}

/// A diet plan: ordered meals and a daily calorie target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,

    /// Calorie target in kcal.
    #[serde(default)]
    pub target_kcal: f64,

    #[serde(default)]
    pub meals: Vec<Meal>,
}

impl Plan {
    pub fn new(name: impl Into<String>, target_kcal: f64) -> Self {
        Self {
            name: name.into(),
            target_kcal,
            meals: Vec::new(),
        }
    }

    pub fn with_meal(mut self, meal: Meal) -> Self {
        self.meals.push(meal);
        self
    }

    pub fn totals(&self) -> NutrientTotals {
        aggregator::aggregate_plan(self)
    }

    /// Get a meal by name (case-insensitive).
    pub fn meal(&self, name: &str) -> Option<&Meal> {
        self.meals
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn meal_mut(&mut self, name: &str) -> Option<&mut Meal> {
        self.meals
            .iter_mut()
            .find(|m| m.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn ingredient_count(&self) -> usize {
        self.meals.iter().map(Meal::ingredient_count).sum()
    }
}
