use thiserror::Error;

#[derive(Debug, Error)]
pub enum NutriError {
    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),

    #[error("Meal not found: {0}")]
    MealNotFound(String),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Unknown screening instrument: {0}")]
    UnknownInstrument(String),

    #[error("Unknown calculator: {0}")]
    UnknownCalculator(String),

    #[error("Unanswered questions: {}", .0.join(", "))]
    IncompleteAnswers(Vec<String>),

    #[error("Invalid answer for '{question}': {value}")]
    InvalidAnswer { question: String, value: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, NutriError>;
