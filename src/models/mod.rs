mod ingredient;
mod nutrient;
mod plan;

pub use ingredient::{lenient_number, Ingredient, NutrientProfile};
pub use nutrient::{Nutrient, Scaling};
pub use plan::{Meal, Plan, Recipe};
