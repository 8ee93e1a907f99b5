use crate::aggregator::{build_report, NutrientTotals, PlanReport};
use crate::error::{NutriError, Result};
use crate::models::{Ingredient, Meal, Plan, Recipe};

/// Structural edits on a plan.
///
/// Every report is rebuilt from the current ingredients, so an edit can
/// never leave stale totals behind.
pub struct PlanEditor {
    plan: Plan,
}

fn check_amount(grams: f64) -> Result<f64> {
    if grams.is_finite() && grams >= 0.0 {
        Ok(grams)
    } else {
        Err(NutriError::InvalidInput(format!(
            "amount must be a non-negative number of grams, got {}",
            grams
        )))
    }
}

impl PlanEditor {
    pub fn new(plan: Plan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn into_plan(self) -> Plan {
        self.plan
    }

    fn meal_mut(&mut self, meal: &str) -> Result<&mut Meal> {
        self.plan
            .meal_mut(meal)
            .ok_or_else(|| NutriError::MealNotFound(meal.to_string()))
    }

    fn recipe_mut(&mut self, meal: &str, recipe: &str) -> Result<&mut Recipe> {
        self.meal_mut(meal)?
            .recipe_mut(recipe)
            .ok_or_else(|| NutriError::RecipeNotFound(recipe.to_string()))
    }

    fn ingredient_index(recipe: &Recipe, query: &str) -> Result<usize> {
        recipe
            .find_ingredient(query)
            .ok_or_else(|| NutriError::IngredientNotFound(query.to_string()))
    }

    /// Append a meal; names are unique (case-insensitive).
    pub fn add_meal(&mut self, name: &str) -> Result<()> {
        if self.plan.meal(name).is_some() {
            return Err(NutriError::InvalidInput(format!("meal '{}' already exists", name)));
        }
        self.plan.meals.push(Meal::new(name.trim()));
        tracing::debug!("Added meal '{}'", name);
        Ok(())
    }

    pub fn remove_meal(&mut self, name: &str) -> Result<Meal> {
        let idx = self
            .plan
            .meals
            .iter()
            .position(|m| m.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| NutriError::MealNotFound(name.to_string()))?;
        tracing::debug!("Removed meal '{}'", name);
        Ok(self.plan.meals.remove(idx))
    }

    /// Append a recipe to a meal; names are unique within the meal.
    pub fn add_recipe(&mut self, meal: &str, recipe: &str) -> Result<()> {
        let m = self.meal_mut(meal)?;
        if m.recipe(recipe).is_some() {
            return Err(NutriError::InvalidInput(format!(
                "recipe '{}' already exists in '{}'",
                recipe, meal
            )));
        }
        m.recipes.push(Recipe::new(recipe.trim()));
        tracing::debug!("Added recipe '{}' to '{}'", recipe, meal);
        Ok(())
    }

    pub fn remove_recipe(&mut self, meal: &str, recipe: &str) -> Result<Recipe> {
        let m = self.meal_mut(meal)?;
        let idx = m
            .recipes
            .iter()
            .position(|r| r.name.eq_ignore_ascii_case(recipe.trim()))
            .ok_or_else(|| NutriError::RecipeNotFound(recipe.to_string()))?;
        tracing::debug!("Removed recipe '{}' from '{}'", recipe, meal);
        Ok(m.recipes.remove(idx))
    }

    /// Create the meal and recipe if they do not exist yet.
    pub fn ensure_recipe(&mut self, meal: &str, recipe: &str) {
        if self.plan.meal(meal).is_none() {
            self.plan.meals.push(Meal::new(meal.trim()));
        }
        if let Some(m) = self.plan.meal_mut(meal) {
            if m.recipe(recipe).is_none() {
                m.recipes.push(Recipe::new(recipe.trim()));
            }
        }
    }

    /// Add an ingredient with the given amount in grams.
    pub fn add_ingredient(
        &mut self,
        meal: &str,
        recipe: &str,
        ingredient: Ingredient,
        grams: f64,
    ) -> Result<()> {
        let grams = check_amount(grams)?;
        let r = self.recipe_mut(meal, recipe)?;
        tracing::debug!("Adding {} g of '{}' to '{}'", grams, ingredient.name, recipe);
        r.ingredients.push(ingredient.with_amount(grams));
        Ok(())
    }

    /// Remove the first ingredient matching a name or code.
    pub fn remove_ingredient(&mut self, meal: &str, recipe: &str, query: &str) -> Result<Ingredient> {
        let r = self.recipe_mut(meal, recipe)?;
        let idx = Self::ingredient_index(r, query)?;
        tracing::debug!("Removing '{}' from '{}'", query, recipe);
        Ok(r.ingredients.remove(idx))
    }

    pub fn set_amount(&mut self, meal: &str, recipe: &str, query: &str, grams: f64) -> Result<()> {
        let grams = check_amount(grams)?;
        let r = self.recipe_mut(meal, recipe)?;
        let idx = Self::ingredient_index(r, query)?;
        r.ingredients[idx].amount = Some(grams);
        tracing::debug!("Set '{}' in '{}' to {} g", query, recipe, grams);
        Ok(())
    }

    /// Replace an ingredient by another one, keeping the amount and position.
    ///
    /// Returns the replaced ingredient.
    pub fn swap_ingredient(
        &mut self,
        meal: &str,
        recipe: &str,
        query: &str,
        replacement: Ingredient,
    ) -> Result<Ingredient> {
        let r = self.recipe_mut(meal, recipe)?;
        let idx = Self::ingredient_index(r, query)?;
        let grams = r.ingredients[idx].grams();
        let old = std::mem::replace(&mut r.ingredients[idx], replacement.with_amount(grams));
        tracing::debug!("Swapped '{}' for '{}' in '{}'", old.name, r.ingredients[idx].name, recipe);
        Ok(old)
    }

    pub fn meal_totals(&self, meal: &str) -> Result<NutrientTotals> {
        self.plan
            .meal(meal)
            .map(Meal::totals)
            .ok_or_else(|| NutriError::MealNotFound(meal.to_string()))
    }

    pub fn totals(&self) -> NutrientTotals {
        self.plan.totals()
    }

    /// Fresh report of the current plan.
    pub fn report(&self) -> PlanReport {
        build_report(&self.plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrient;

    fn rice() -> Ingredient {
        Ingredient::new("Rice")
            .with_code("R1")
            .with(Nutrient::Kcal, 130.0)
            .with(Nutrient::CarbohydratesTotal, 28.0)
            .with(Nutrient::GlycemicIndex, 73.0)
    }

    fn lentils() -> Ingredient {
        Ingredient::new("Lentils")
            .with(Nutrient::Kcal, 116.0)
            .with(Nutrient::CarbohydratesTotal, 20.0)
            .with(Nutrient::GlycemicIndex, 32.0)
    }

    fn editor() -> PlanEditor {
        let mut editor = PlanEditor::new(Plan::new("Day", 2000.0));
        editor.ensure_recipe("Lunch", "Bowl");
        editor
    }

    #[test]
    fn test_add_and_total() {
        let mut editor = editor();
        editor.add_ingredient("lunch", "bowl", rice(), 200.0).unwrap();
        let kcal = editor.meal_totals("Lunch").unwrap().get(Nutrient::Kcal);
        assert!((kcal - 260.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_amount_recomputes() {
        let mut editor = editor();
        editor.add_ingredient("Lunch", "Bowl", rice(), 200.0).unwrap();
        editor.set_amount("Lunch", "Bowl", "R1", 100.0).unwrap();
        assert!((editor.totals().get(Nutrient::Kcal) - 130.0).abs() < 1e-9);
    }

    #[test]
    fn test_swap_keeps_amount() {
        let mut editor = editor();
        editor.add_ingredient("Lunch", "Bowl", rice(), 150.0).unwrap();
        let old = editor.swap_ingredient("Lunch", "Bowl", "rice", lentils()).unwrap();
        assert_eq!(old.name, "Rice");

        let bowl = &editor.plan().meals[0].recipes[0];
        assert_eq!(bowl.ingredients[0].name, "Lentils");
        assert_eq!(bowl.ingredients[0].amount, Some(150.0));

        let gi = editor.totals().glycemic_index().unwrap();
        assert!((gi - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut editor = editor();
        assert!(matches!(
            editor.add_ingredient("Lunch", "Bowl", rice(), -5.0),
            Err(NutriError::InvalidInput(_))
        ));
        assert!(editor.plan().meals[0].recipes[0].ingredients.is_empty());
    }

    #[test]
    fn test_missing_targets() {
        let mut editor = editor();
        assert!(matches!(
            editor.add_ingredient("Dinner", "Bowl", rice(), 10.0),
            Err(NutriError::MealNotFound(_))
        ));
        assert!(matches!(
            editor.add_ingredient("Lunch", "Soup", rice(), 10.0),
            Err(NutriError::RecipeNotFound(_))
        ));
        assert!(matches!(
            editor.remove_ingredient("Lunch", "Bowl", "Rice"),
            Err(NutriError::IngredientNotFound(_))
        ));
    }

    #[test]
    fn test_meal_and_recipe_lifecycle() {
        let mut editor = editor();
        editor.add_meal("Dinner").unwrap();
        assert!(editor.add_meal("dinner").is_err());
        editor.add_recipe("Dinner", "Soup").unwrap();
        assert!(editor.add_recipe("Dinner", "SOUP").is_err());

        let removed = editor.remove_recipe("dinner", "soup").unwrap();
        assert_eq!(removed.name, "Soup");
        editor.remove_meal("Dinner").unwrap();
        assert_eq!(editor.plan().meals.len(), 1);
    }
}
