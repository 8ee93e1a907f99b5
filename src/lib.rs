pub mod aggregator;
pub mod bands;
pub mod calculators;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod screening;
pub mod state;

pub use error::{NutriError, Result};
pub use models::{Ingredient, Meal, Nutrient, Plan, Recipe};
