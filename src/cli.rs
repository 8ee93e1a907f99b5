use clap::{Args, Parser, Subcommand};

/// NutriAssess: nutrition assessment calculators, malnutrition screening and meal-plan reports.
#[derive(Parser, Debug)]
#[command(name = "nutri_assess")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Location of an ingredient inside a plan file.
#[derive(Args, Debug)]
pub struct PlanTarget {
    /// Path to the plan JSON file.
    #[arg(short, long, default_value = "plan.json")]
    pub plan: String,

    /// Meal name (case-insensitive).
    #[arg(short, long)]
    pub meal: String,

    /// Recipe name (case-insensitive).
    #[arg(short, long)]
    pub recipe: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a single-value calculator (bmi, bmr, tdee, ibw).
    Calc {
        calculator: String,

        /// Field values as field=value; missing fields are prompted for.
        #[arg(short, long = "input", value_name = "FIELD=VALUE")]
        inputs: Vec<String>,
    },

    /// List the screening instruments.
    Instruments,

    /// Score a screening instrument.
    Screen {
        instrument: String,

        /// JSON object of question id to value; prompts when omitted.
        #[arg(short, long)]
        answers: Option<String>,
    },

    /// Show the nutrient report of a plan.
    Report {
        #[arg(short, long, default_value = "plan.json")]
        plan: String,

        /// Also write the report as CSV.
        #[arg(long)]
        csv: Option<String>,
    },

    /// Fuzzy-search the ingredient catalog.
    Search {
        #[arg(short, long, default_value = "catalog.json")]
        catalog: String,

        query: String,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Add an ingredient from the catalog to a recipe, creating the meal and recipe if needed.
    AddIngredient {
        #[command(flatten)]
        target: PlanTarget,

        #[arg(short, long, default_value = "catalog.json")]
        catalog: String,

        /// Ingredient code or name.
        ingredient: String,

        /// Amount in grams.
        grams: f64,
    },

    /// Remove an ingredient from a recipe.
    RemoveIngredient {
        #[command(flatten)]
        target: PlanTarget,

        /// Ingredient code or name.
        ingredient: String,
    },

    /// Change the amount of an ingredient.
    SetAmount {
        #[command(flatten)]
        target: PlanTarget,

        /// Ingredient code or name.
        ingredient: String,

        /// Amount in grams.
        grams: f64,
    },
}
