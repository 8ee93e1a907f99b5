use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{Ingredient, Plan};

/// Load ingredients from a JSON array.
///
/// Deduplicates by lowercase name (last occurrence wins).
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Ingredient>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let ingredients: Vec<Ingredient> = serde_json::from_str(&content)?;
    let raw_len = ingredients.len();

    let mut order: Vec<String> = Vec::new();
    let mut seen: HashMap<String, Ingredient> = HashMap::new();
    for ingredient in ingredients {
        let key = ingredient.key();
        if !seen.contains_key(&key) {
            order.push(key.clone());
        }
        seen.insert(key, ingredient);
    }

    let deduped: Vec<Ingredient> = order.iter().filter_map(|k| seen.remove(k)).collect();
    tracing::info!(
        "Loaded {} ingredients from {} ({} duplicates dropped)",
        deduped.len(),
        path.display(),
        raw_len - deduped.len()
    );
    Ok(deduped)
}

/// Save ingredients as a pretty JSON array.
pub fn save_catalog<P: AsRef<Path>>(path: P, ingredients: &[Ingredient]) -> Result<()> {
    let json = serde_json::to_string_pretty(ingredients)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<Plan> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let plan: Plan = serde_json::from_str(&content)?;
    tracing::info!(
        "Loaded plan '{}' with {} meals from {}",
        plan.name,
        plan.meals.len(),
        path.display()
    );
    Ok(plan)
}

pub fn save_plan<P: AsRef<Path>>(path: P, plan: &Plan) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json)?;
    tracing::debug!("Saved plan '{}'", plan.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Meal, Nutrient, Recipe};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_and_save_roundtrip() {
        let json = r#"[
            {"Name": "Apple", "Code": 1001, "Kcal": "52", "Carbohydrates_total": "13,8", "Glycemic_index": 36}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let ingredients = load_catalog(file.path()).unwrap();
        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].name, "Apple");
        assert_eq!(ingredients[0].code.as_deref(), Some("1001"));
        assert_eq!(ingredients[0].per_100g(Nutrient::CarbohydratesTotal), 13.8);

        let out_file = NamedTempFile::new().unwrap();
        save_catalog(out_file.path(), &ingredients).unwrap();

        let reloaded = load_catalog(out_file.path()).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].per_100g(Nutrient::Kcal), 52.0);
    }

    #[test]
    fn test_deduplication() {
        let json = r#"[
            {"Name": "Apple", "Kcal": 50},
            {"Name": "Pear", "Kcal": 57},
            {"Name": "apple", "Kcal": 52}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let ingredients = load_catalog(file.path()).unwrap();
        assert_eq!(ingredients.len(), 2);
        // Last occurrence wins, first position kept
        assert_eq!(ingredients[0].name, "apple");
        assert_eq!(ingredients[0].per_100g(Nutrient::Kcal), 52.0);
    }

    #[test]
    fn test_plan_roundtrip() {
        let plan = Plan::new("Monday", 1800.0).with_meal(
            Meal::new("Breakfast").with_recipe(
                Recipe::new("Porridge").with_ingredient(
                    Ingredient::new("Oat flakes")
                        .with(Nutrient::Kcal, 366.0)
                        .with_amount(60.0),
                ),
            ),
        );

        let file = NamedTempFile::new().unwrap();
        save_plan(file.path(), &plan).unwrap();
        let reloaded = load_plan(file.path()).unwrap();

        assert_eq!(reloaded.name, "Monday");
        assert_eq!(reloaded.meals[0].recipes[0].ingredients[0].amount, Some(60.0));
        assert!((reloaded.totals().get(Nutrient::Kcal) - 219.6).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_json_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        assert!(load_plan(file.path()).is_err());
        assert!(load_catalog(file.path()).is_err());
    }
}
