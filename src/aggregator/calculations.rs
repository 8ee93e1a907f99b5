use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::aggregator::constants::*;
use crate::models::{Ingredient, Meal, Nutrient, Plan, Recipe, Scaling};

/// Aggregated nutrient values of a recipe, meal or plan.
///
/// The glycemic index is kept as its carbohydrate-weighted parts so that
/// totals can be combined without losing the weighting.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientTotals {
    amount: f64,
    values: [f64; Nutrient::COUNT],
    gi_weighted: f64,
    gi_carbs: f64,
}

impl Default for NutrientTotals {
    fn default() -> Self {
        Self {
            amount: 0.0,
            values: [0.0; Nutrient::COUNT],
            gi_weighted: 0.0,
            gi_carbs: 0.0,
        }
    }
}

impl NutrientTotals {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Total grams.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Total for a field. The glycemic index reads as 0 when undefined.
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient.scaling() {
            Scaling::CarbWeighted => self.glycemic_index().unwrap_or(0.0),
            _ => self.values[nutrient.index()],
        }
    }

    /// Carbohydrate-weighted glycemic index.
    ///
    /// `None` when no ingredient has both a glycemic index and a positive
    /// carbohydrate contribution.
    pub fn glycemic_index(&self) -> Option<f64> {
        (self.gi_carbs > 0.0).then(|| self.gi_weighted / self.gi_carbs)
    }

    /// Glycemic load: GI × carbohydrate grams / 100.
    pub fn glycemic_load(&self) -> Option<f64> {
        self.glycemic_index()
            .map(|gi| gi * self.get(Nutrient::CarbohydratesTotal) / REFERENCE_GRAMS)
    }

    /// Add another total into this one.
    pub fn absorb(&mut self, other: &NutrientTotals) {
        self.amount += other.amount;
        for (acc, v) in self.values.iter_mut().zip(other.values.iter()) {
            *acc += v;
        }
        self.gi_weighted += other.gi_weighted;
        self.gi_carbs += other.gi_carbs;
    }

    /// Energy share of protein, carbohydrate and fat.
    pub fn macro_share(&self) -> MacroShare {
        MacroShare::from_grams(
            self.get(Nutrient::ProteinTotal),
            self.get(Nutrient::CarbohydratesTotal),
            self.get(Nutrient::FatTotal),
        )
    }

    /// Every reported column with its value, in export order.
    ///
    /// `Amount` first, then each nutrient, then `Glycemic_load`. Undefined
    /// glycemic values are `None`.
    pub fn columns(&self) -> Vec<(&'static str, Option<f64>)> {
        let mut cols = Vec::with_capacity(Nutrient::COUNT + 2);
        cols.push(("Amount", Some(self.amount)));
        for &n in Nutrient::ALL {
            let value = match n.scaling() {
                Scaling::CarbWeighted => self.glycemic_index(),
                _ => Some(self.values[n.index()]),
            };
            cols.push((n.key(), value));
        }
        cols.push(("Glycemic_load", self.glycemic_load()));
        cols
    }
}

impl AddAssign<&NutrientTotals> for NutrientTotals {
    fn add_assign(&mut self, other: &NutrientTotals) {
        self.absorb(other);
    }
}

impl Add for NutrientTotals {
    type Output = NutrientTotals;

    fn add(mut self, other: NutrientTotals) -> NutrientTotals {
        self.absorb(&other);
        self
    }
}

impl Sum for NutrientTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutrientTotals::zero(), |acc, t| acc + t)
    }
}

impl Serialize for NutrientTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let cols = self.columns();
        let mut map = serializer.serialize_map(Some(cols.len()))?;
        for (key, value) in cols {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

/// Percentage of macronutrient energy from each macronutrient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MacroShare {
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fat_pct: f64,
}

impl MacroShare {
    pub fn from_grams(protein: f64, carbs: f64, fat: f64) -> Self {
        let p = protein * KCAL_PER_GRAM_PROTEIN;
        let c = carbs * KCAL_PER_GRAM_CARBOHYDRATE;
        let f = fat * KCAL_PER_GRAM_FAT;
        let total = p + c + f;
        if total <= 0.0 {
            return Self::default();
        }
        Self {
            protein_pct: p / total * 100.0,
            carbs_pct: c / total * 100.0,
            fat_pct: f / total * 100.0,
        }
    }
}

/// Amount used for scaling: negative or non-finite amounts count as 0 g.
pub fn effective_amount(ingredient: &Ingredient) -> f64 {
    let grams = ingredient.grams();
    if grams.is_finite() && grams >= 0.0 {
        grams
    } else {
        tracing::warn!(
            "Ingredient '{}' has invalid amount {}; counting it as 0 g",
            ingredient.name,
            grams
        );
        0.0
    }
}

/// Contribution of a single ingredient.
pub fn ingredient_totals(ingredient: &Ingredient) -> NutrientTotals {
    let grams = effective_amount(ingredient);
    let factor = grams / REFERENCE_GRAMS;

    let mut totals = NutrientTotals {
        amount: grams,
        ..NutrientTotals::default()
    };

    for &n in Nutrient::ALL {
        match n.scaling() {
            Scaling::PerHundredGrams => totals.values[n.index()] = ingredient.per_100g(n) * factor,
            Scaling::Raw => totals.values[n.index()] = ingredient.per_100g(n),
            Scaling::CarbWeighted => {}
        }
    }

    let carbs = ingredient.per_100g(Nutrient::CarbohydratesTotal) * factor;
    if let Some(gi) = ingredient.nutrients.get(Nutrient::GlycemicIndex) {
        if carbs > 0.0 {
            totals.gi_weighted = carbs * gi;
            totals.gi_carbs = carbs;
        }
    }

    totals
}

pub fn aggregate_recipe(recipe: &Recipe) -> NutrientTotals {
    recipe.ingredients.iter().map(ingredient_totals).sum()
}

pub fn aggregate_meal(meal: &Meal) -> NutrientTotals {
    let totals: NutrientTotals = meal.recipes.iter().map(aggregate_recipe).sum();
    tracing::debug!(
        "Aggregated meal '{}': {} recipes, {:.1} kcal",
        meal.name,
        meal.recipes.len(),
        totals.get(Nutrient::Kcal)
    );
    totals
}

pub fn aggregate_plan(plan: &Plan) -> NutrientTotals {
    plan.meals.iter().map(aggregate_meal).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oats(grams: f64) -> Ingredient {
        Ingredient::new("Oats")
            .with_amount(grams)
            .with(Nutrient::Kcal, 370.0)
            .with(Nutrient::ProteinTotal, 13.0)
            .with(Nutrient::CarbohydratesTotal, 60.0)
            .with(Nutrient::FatTotal, 7.0)
            .with(Nutrient::GlycemicIndex, 55.0)
    }

    fn milk(grams: f64) -> Ingredient {
        Ingredient::new("Milk")
            .with_amount(grams)
            .with(Nutrient::Kcal, 64.0)
            .with(Nutrient::CarbohydratesTotal, 5.0)
            .with(Nutrient::GlycemicIndex, 30.0)
            .with(Nutrient::VolumePerUnit, 250.0)
    }

    #[test]
    fn test_ingredient_scaling() {
        let t = ingredient_totals(&oats(50.0));
        assert!((t.get(Nutrient::Kcal) - 185.0).abs() < 1e-9);
        assert!((t.get(Nutrient::CarbohydratesTotal) - 30.0).abs() < 1e-9);
        assert!((t.amount() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_raw_field_not_scaled() {
        let t = ingredient_totals(&milk(200.0));
        assert!((t.get(Nutrient::VolumePerUnit) - 250.0).abs() < 1e-9);
        assert!((t.get(Nutrient::Kcal) - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_glycemic_index_is_carb_weighted() {
        // oats: 30 g carbs @ 55, milk: 10 g carbs @ 30
        let recipe = Recipe::new("Porridge")
            .with_ingredient(oats(50.0))
            .with_ingredient(milk(200.0));
        let t = aggregate_recipe(&recipe);
        let expected = (30.0 * 55.0 + 10.0 * 30.0) / 40.0;
        assert!((t.glycemic_index().unwrap() - expected).abs() < 1e-9);

        let gl = t.glycemic_load().unwrap();
        assert!((gl - expected * 40.0 / 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_glycemic_index_undefined_without_carbs() {
        let butter = Ingredient::new("Butter")
            .with_amount(10.0)
            .with(Nutrient::FatTotal, 82.0)
            .with(Nutrient::GlycemicIndex, 0.0);
        let sugar_no_gi = Ingredient::new("Sugar")
            .with_amount(10.0)
            .with(Nutrient::CarbohydratesTotal, 100.0);
        let recipe = Recipe::new("Mix")
            .with_ingredient(butter)
            .with_ingredient(sugar_no_gi);

        let t = aggregate_recipe(&recipe);
        assert_eq!(t.glycemic_index(), None);
        assert_eq!(t.glycemic_load(), None);
        assert_eq!(t.get(Nutrient::GlycemicIndex), 0.0);
    }

    #[test]
    fn test_negative_amount_contributes_nothing() {
        let t = ingredient_totals(&oats(-50.0));
        assert_eq!(t.get(Nutrient::Kcal), 0.0);
        assert_eq!(t.amount(), 0.0);
        assert_eq!(t.glycemic_index(), None);
    }

    #[test]
    fn test_missing_amount_contributes_nothing() {
        let mut ing = oats(0.0);
        ing.amount = None;
        assert_eq!(ingredient_totals(&ing).get(Nutrient::Kcal), 0.0);
    }

    #[test]
    fn test_macro_share() {
        let share = MacroShare::from_grams(25.0, 50.0, 0.0);
        assert!((share.protein_pct - 100.0 / 3.0).abs() < 1e-9);
        assert!((share.carbs_pct - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(share.fat_pct, 0.0);

        assert_eq!(MacroShare::from_grams(0.0, 0.0, 0.0), MacroShare::default());
    }

    #[test]
    fn test_columns_order_and_labels() {
        let t = ingredient_totals(&oats(100.0));
        let cols = t.columns();
        assert_eq!(cols.first().unwrap().0, "Amount");
        assert_eq!(cols.last().unwrap().0, "Glycemic_load");
        assert_eq!(cols.len(), Nutrient::COUNT + 2);
        assert!(cols.iter().any(|(k, v)| *k == "Kcal" && *v == Some(370.0)));
    }

    #[test]
    fn test_serialize_totals() {
        let t = ingredient_totals(&oats(100.0));
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(value["Kcal"], 370.0);
        assert_eq!(value["Glycemic_index"], 55.0);
        assert_eq!(value["Mineral_Na"], 0.0);

        let empty = serde_json::to_value(NutrientTotals::zero()).unwrap();
        assert!(empty["Glycemic_index"].is_null());
    }
}
