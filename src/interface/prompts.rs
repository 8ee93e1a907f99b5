use dialoguer::{Confirm, Input, Select};

use crate::calculators::{Calculator, CalculatorField, CalculatorInputs, FieldKind};
use crate::error::Result;
use crate::models::Ingredient;
use crate::screening::{Answers, ScreeningConfig, ScreeningQuestion};
use crate::state::IngredientCatalog;

/// Number of fuzzy candidates offered in a selection list.
const MAX_CANDIDATES: usize = 5;

fn option_line(question: &ScreeningQuestion, idx: usize) -> String {
    let option = &question.options[idx];
    match option.description {
        Some(desc) => format!("{} ({}) - {}", option.label, option.value, desc),
        None => format!("{} ({})", option.label, option.value),
    }
}

/// Ask one question and return the selected option value.
pub fn prompt_question(question: &ScreeningQuestion) -> Result<f64> {
    let items: Vec<String> = (0..question.options.len())
        .map(|i| option_line(question, i))
        .collect();

    let title = match question.section {
        Some(section) => format!("[{}] {}", section, question.title),
        None => question.title.to_string(),
    };

    let selection = Select::new()
        .with_prompt(title)
        .items(&items)
        .default(0)
        .interact()?;

    Ok(question.options[selection].value)
}

/// Walk through every question of an instrument.
pub fn prompt_screening_answers(config: &ScreeningConfig) -> Result<Answers> {
    println!();
    println!("=== {} ===", config.name);
    println!("{}", config.description);
    println!();

    let mut answers = Answers::new();
    for question in config.questions {
        let value = prompt_question(question)?;
        answers.set(question.id, value);
    }
    Ok(answers)
}

/// Ask for a single calculator field, re-asking until the value is valid.
pub fn prompt_field(field: &CalculatorField) -> Result<String> {
    match field.kind {
        FieldKind::Select(options) => {
            let labels: Vec<&str> = options.iter().map(|o| o.label).collect();
            let selection = Select::new()
                .with_prompt(field.label)
                .items(&labels)
                .default(0)
                .interact()?;
            Ok(options[selection].value.to_string())
        }
        FieldKind::Number => {
            let prompt = match field.unit {
                Some(unit) => format!("{} ({})", field.label, unit),
                None => field.label.to_string(),
            };
            loop {
                let input: String = Input::new().with_prompt(&prompt).interact_text()?;
                match field.parse_number(&input) {
                    Ok(_) => return Ok(input.trim().to_string()),
                    Err(e) => println!("{}", e),
                }
            }
        }
    }
}

/// Fill in every field the command line left out.
pub fn prompt_calculator_inputs(
    calculator: Calculator,
    mut inputs: CalculatorInputs,
) -> Result<CalculatorInputs> {
    for field in calculator.missing_fields(&inputs) {
        let value = prompt_field(field)?;
        inputs.set(field.id, value);
    }
    Ok(inputs)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Pick an ingredient from the catalog, offering fuzzy matches when the
/// query is not an exact code or name.
///
/// Returns `None` when nothing matches or the user declines every candidate.
pub fn prompt_ingredient(catalog: &IngredientCatalog, query: &str) -> Result<Option<Ingredient>> {
    if let Ok(ingredient) = catalog.resolve(query) {
        return Ok(Some(ingredient.clone()));
    }

    let candidates = catalog.search(query, MAX_CANDIDATES);
    if candidates.is_empty() {
        println!("No matching ingredient found for '{}'", query);
        return Ok(None);
    }

    if candidates.len() == 1 {
        let ingredient = candidates[0].0;
        let confirm = prompt_yes_no(&format!("Did you mean '{}'?", ingredient.name), true)?;
        return Ok(confirm.then(|| ingredient.clone()));
    }

    let mut options: Vec<String> = candidates.iter().map(|(i, _)| i.name.clone()).collect();
    options.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Which did you mean?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(candidates.get(selection).map(|(i, _)| (*i).clone()))
}
