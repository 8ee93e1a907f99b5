use serde::Serialize;

use crate::aggregator::calculations::{aggregate_recipe, MacroShare, NutrientTotals};
use crate::aggregator::constants::{GLYCEMIC_INDEX_BANDS, GLYCEMIC_LOAD_BANDS};
use crate::bands::classify;
use crate::models::{Meal, Nutrient, Plan};

/// Totals of one recipe within a meal.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeReport {
    pub name: String,
    pub totals: NutrientTotals,
}

/// Totals of one meal with its recipe breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct MealReport {
    pub name: String,
    pub totals: NutrientTotals,
    pub recipes: Vec<RecipeReport>,
}

/// Plan energy compared with its calorie target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetComparison {
    pub target_kcal: f64,
    pub actual_kcal: f64,
    /// Positive when the plan exceeds the target.
    pub difference_kcal: f64,
    /// `None` when the target is not positive.
    pub percent_of_target: Option<f64>,
}

impl TargetComparison {
    pub fn new(target_kcal: f64, actual_kcal: f64) -> Self {
        Self {
            target_kcal,
            actual_kcal,
            difference_kcal: actual_kcal - target_kcal,
            percent_of_target: (target_kcal > 0.0).then(|| actual_kcal / target_kcal * 100.0),
        }
    }
}

/// Full nutrient report of a plan, recomputed from its ingredients.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub name: String,
    pub totals: NutrientTotals,
    pub meals: Vec<MealReport>,
    pub target: TargetComparison,
    pub macros: MacroShare,
    pub glycemic_index_category: Option<&'static str>,
    pub glycemic_load_category: Option<&'static str>,
}

impl PlanReport {
    pub fn meal(&self, name: &str) -> Option<&MealReport> {
        self.meals
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name.trim()))
    }
}

pub fn build_meal_report(meal: &Meal) -> MealReport {
    let recipes: Vec<RecipeReport> = meal
        .recipes
        .iter()
        .map(|r| RecipeReport {
            name: r.name.clone(),
            totals: aggregate_recipe(r),
        })
        .collect();

    let mut totals = NutrientTotals::zero();
    for r in &recipes {
        totals += &r.totals;
    }

    MealReport {
        name: meal.name.clone(),
        totals,
        recipes,
    }
}

pub fn build_report(plan: &Plan) -> PlanReport {
    let meals: Vec<MealReport> = plan.meals.iter().map(build_meal_report).collect();

    let mut totals = NutrientTotals::zero();
    for m in &meals {
        totals += &m.totals;
    }

    let target = TargetComparison::new(plan.target_kcal, totals.get(Nutrient::Kcal));
    let macros = totals.macro_share();
    let glycemic_index_category = totals
        .glycemic_index()
        .and_then(|gi| classify(GLYCEMIC_INDEX_BANDS, gi))
        .map(|b| b.label);
    let glycemic_load_category = totals
        .glycemic_load()
        .and_then(|gl| classify(GLYCEMIC_LOAD_BANDS, gl))
        .map(|b| b.label);

    tracing::debug!(
        "Built report for '{}': {} meals, {} ingredients",
        plan.name,
        meals.len(),
        plan.ingredient_count()
    );

    PlanReport {
        name: plan.name.clone(),
        totals,
        meals,
        target,
        macros,
        glycemic_index_category,
        glycemic_load_category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, Recipe};

    fn sample_plan() -> Plan {
        let bread = Ingredient::new("Bread")
            .with_amount(100.0)
            .with(Nutrient::Kcal, 250.0)
            .with(Nutrient::CarbohydratesTotal, 48.0)
            .with(Nutrient::GlycemicIndex, 75.0);
        let cheese = Ingredient::new("Cheese")
            .with_amount(30.0)
            .with(Nutrient::Kcal, 350.0)
            .with(Nutrient::ProteinTotal, 25.0)
            .with(Nutrient::FatTotal, 28.0);
        let apple = Ingredient::new("Apple")
            .with_amount(150.0)
            .with(Nutrient::Kcal, 52.0)
            .with(Nutrient::CarbohydratesTotal, 14.0)
            .with(Nutrient::GlycemicIndex, 36.0);

        Plan::new("Test day", 1000.0)
            .with_meal(
                Meal::new("Breakfast")
                    .with_recipe(Recipe::new("Sandwich").with_ingredient(bread).with_ingredient(cheese)),
            )
            .with_meal(Meal::new("Snack").with_recipe(Recipe::new("Fruit").with_ingredient(apple)))
    }

    #[test]
    fn test_report_structure() {
        let report = build_report(&sample_plan());
        assert_eq!(report.meals.len(), 2);
        assert_eq!(report.meals[0].recipes.len(), 1);

        // 250 + 105 + 78
        assert!((report.totals.get(Nutrient::Kcal) - 433.0).abs() < 1e-9);
        assert!((report.target.difference_kcal + 567.0).abs() < 1e-9);
        assert!((report.target.percent_of_target.unwrap() - 43.3).abs() < 1e-9);
    }

    #[test]
    fn test_meal_totals_match_plan_method() {
        let plan = sample_plan();
        let report = build_report(&plan);
        assert_eq!(report.totals, plan.totals());
        assert_eq!(report.meal("snack").unwrap().totals, plan.meals[1].totals());
    }

    #[test]
    fn test_glycemic_categories() {
        let report = build_report(&sample_plan());
        // (48*75 + 21*36) / 69 = 63.13 -> Medium; GL = 63.13 * 69 / 100 = 43.56 -> High
        assert_eq!(report.glycemic_index_category, Some("Medium GI"));
        assert_eq!(report.glycemic_load_category, Some("High GL"));
    }

    #[test]
    fn test_zero_target_has_no_percentage() {
        let mut plan = sample_plan();
        plan.target_kcal = 0.0;
        assert_eq!(build_report(&plan).target.percent_of_target, None);
    }
}
