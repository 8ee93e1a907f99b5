pub mod calculations;
pub mod constants;
pub mod report;

pub use calculations::{
    aggregate_meal, aggregate_plan, aggregate_recipe, effective_amount, ingredient_totals,
    MacroShare, NutrientTotals,
};
pub use constants::*;
pub use report::{build_meal_report, build_report, MealReport, PlanReport, RecipeReport, TargetComparison};
