mod catalog;
mod editor;
mod persistence;

pub use catalog::{IngredientCatalog, FUZZY_MATCH_THRESHOLD};
pub use editor::PlanEditor;
pub use persistence::{load_catalog, load_plan, save_catalog, save_plan};
