use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::calculators::formulas::{self, ActivityLevel, Sex};
use crate::error::{NutriError, Result};

/// One choice of a select field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl SelectOption {
    /// Label without the trailing parenthesised hint.
    pub fn short_label(&self) -> &'static str {
        self.label.split(" (").next().unwrap_or(self.label).trim()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "options", rename_all = "lowercase")]
pub enum FieldKind {
    Number,
    Select(&'static [SelectOption]),
}

/// An input of a calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculatorField {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub unit: Option<&'static str>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl CalculatorField {
    const fn number(id: &'static str, label: &'static str, unit: &'static str, min: f64, max: f64) -> Self {
        Self {
            id,
            label,
            kind: FieldKind::Number,
            unit: Some(unit),
            min: Some(min),
            max: Some(max),
        }
    }

    const fn select(id: &'static str, label: &'static str, options: &'static [SelectOption]) -> Self {
        Self {
            id,
            label,
            kind: FieldKind::Select(options),
            unit: None,
            min: None,
            max: None,
        }
    }

    /// Parse and range-check a number field.
    pub fn parse_number(&self, raw: &str) -> Result<f64> {
        let value: f64 = raw.trim().replace(',', ".").parse().map_err(|_| {
            NutriError::InvalidInput(format!("{}: '{}' is not a number", self.label, raw))
        })?;
        if !value.is_finite() {
            return Err(NutriError::InvalidInput(format!("{} must be finite", self.label)));
        }
        if let Some(min) = self.min {
            if value < min {
                return Err(NutriError::InvalidInput(format!(
                    "{} must be at least {}",
                    self.label, min
                )));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(NutriError::InvalidInput(format!(
                    "{} must be at most {}",
                    self.label, max
                )));
            }
        }
        Ok(value)
    }

    /// Check a select field and return the matching option value.
    ///
    /// Accepts the value, the label with or without its parenthesised hint,
    /// or a single letter that starts exactly one option value (`f` for female).
    pub fn parse_choice(&self, raw: &str) -> Result<&'static str> {
        let FieldKind::Select(options) = self.kind else {
            return Err(NutriError::InvalidInput(format!("{} is not a choice", self.label)));
        };
        let wanted = raw.trim().to_lowercase().replace(['-', ' '], "_");
        let by_initial = || {
            let mut hits = options.iter().filter(|o| o.value.starts_with(&wanted));
            match (hits.next(), hits.next()) {
                (Some(only), None) if wanted.len() == 1 => Some(only),
                _ => None,
            }
        };
        options
            .iter()
            .find(|o| o.value == wanted || o.short_label().eq_ignore_ascii_case(raw.trim()))
            .or_else(by_initial)
            .map(|o| o.value)
            .ok_or_else(|| {
                let allowed: Vec<&str> = options.iter().map(|o| o.value).collect();
                NutriError::InvalidInput(format!(
                    "{}: '{}' is not one of {}",
                    self.label,
                    raw,
                    allowed.join(", ")
                ))
            })
    }
}

const SEX_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "male", label: "Male" },
    SelectOption { value: "female", label: "Female" },
];

const ACTIVITY_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "sedentary", label: "Sedentary (little or no exercise)" },
    SelectOption { value: "light", label: "Lightly active (1–3 days/week)" },
    SelectOption { value: "moderate", label: "Moderately active (3–5 days/week)" },
    SelectOption { value: "active", label: "Active (6–7 days/week)" },
    SelectOption { value: "very_active", label: "Very active (physical job or training twice a day)" },
];

const WEIGHT: CalculatorField = CalculatorField::number("weight", "Weight", "kg", 1.0, 500.0);
const HEIGHT: CalculatorField = CalculatorField::number("height", "Height", "cm", 50.0, 272.0);
const AGE: CalculatorField = CalculatorField::number("age", "Age", "years", 1.0, 120.0);
const SEX: CalculatorField = CalculatorField::select("sex", "Sex", SEX_OPTIONS);
const ACTIVITY: CalculatorField = CalculatorField::select("activity", "Activity level", ACTIVITY_OPTIONS);

/// Form definition of a calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculatorConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [CalculatorField],
}

const BMI_CONFIG: CalculatorConfig = CalculatorConfig {
    id: "bmi",
    name: "Body Mass Index",
    description: "Weight relative to height squared, classified by WHO adult ranges.",
    fields: &[WEIGHT, HEIGHT],
};

const BMR_CONFIG: CalculatorConfig = CalculatorConfig {
    id: "bmr",
    name: "Basal Metabolic Rate",
    description: "Resting energy expenditure by the Mifflin–St Jeor equation.",
    fields: &[WEIGHT, HEIGHT, AGE, SEX],
};

const TDEE_CONFIG: CalculatorConfig = CalculatorConfig {
    id: "tdee",
    name: "Total Daily Energy Expenditure",
    description: "Mifflin–St Jeor BMR multiplied by a physical activity factor.",
    fields: &[WEIGHT, HEIGHT, AGE, SEX, ACTIVITY],
};

const IBW_CONFIG: CalculatorConfig = CalculatorConfig {
    id: "ibw",
    name: "Ideal Body Weight",
    description: "Ideal body weight by the Devine formula.",
    fields: &[HEIGHT, SEX],
};

/// Raw form inputs keyed by field id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculatorInputs(BTreeMap<String, String>);

impl CalculatorInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Parse `field=value` pairs as given on the command line.
    pub fn from_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self> {
        let mut inputs = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                NutriError::InvalidInput(format!("expected field=value, got '{}'", pair))
            })?;
            inputs.set(key.trim().to_lowercase(), value.trim());
        }
        Ok(inputs)
    }

    fn raw<'a>(&'a self, field: &CalculatorField) -> Result<&'a str> {
        self.get(field.id)
            .ok_or_else(|| NutriError::InvalidInput(format!("missing input: {}", field.id)))
    }

    fn number(&self, field: &CalculatorField) -> Result<f64> {
        field.parse_number(self.raw(field)?)
    }

    fn choice<T: FromStr<Err = NutriError>>(&self, field: &CalculatorField) -> Result<T> {
        field.parse_choice(self.raw(field)?)?.parse()
    }
}

/// Output of a calculator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorResult {
    pub calculator: &'static str,
    pub value: f64,
    pub unit: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub interpretation: String,
}

/// The single-value calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Calculator {
    Bmi,
    Bmr,
    Tdee,
    Ibw,
}

impl Calculator {
    pub const ALL: &'static [Calculator] = &[
        Calculator::Bmi,
        Calculator::Bmr,
        Calculator::Tdee,
        Calculator::Ibw,
    ];

    pub fn config(self) -> &'static CalculatorConfig {
        match self {
            Calculator::Bmi => &BMI_CONFIG,
            Calculator::Bmr => &BMR_CONFIG,
            Calculator::Tdee => &TDEE_CONFIG,
            Calculator::Ibw => &IBW_CONFIG,
        }
    }

    /// Fields not yet present in `inputs`.
    pub fn missing_fields(self, inputs: &CalculatorInputs) -> Vec<&'static CalculatorField> {
        self.config()
            .fields
            .iter()
            .filter(|f| !inputs.contains(f.id))
            .collect()
    }

    /// Validate the inputs against the form and compute the result.
    pub fn calculate(self, inputs: &CalculatorInputs) -> Result<CalculatorResult> {
        let result = match self {
            Calculator::Bmi => {
                let value = formulas::bmi(inputs.number(&WEIGHT)?, inputs.number(&HEIGHT)?);
                let band = formulas::bmi_category(value);
                CalculatorResult {
                    calculator: BMI_CONFIG.id,
                    value,
                    unit: "kg/m²",
                    category: band.map(|b| b.label.to_string()),
                    interpretation: band
                        .map(|b| b.text.to_string())
                        .unwrap_or_else(|| "BMI could not be classified.".to_string()),
                }
            }
            Calculator::Bmr => {
                let value = Self::bmr(inputs)?;
                CalculatorResult {
                    calculator: BMR_CONFIG.id,
                    value,
                    unit: "kcal/day",
                    category: None,
                    interpretation: format!(
                        "Estimated energy expenditure at complete rest: {:.0} kcal/day.",
                        value
                    ),
                }
            }
            Calculator::Tdee => {
                let activity: ActivityLevel = inputs.choice(&ACTIVITY)?;
                let value = formulas::tdee(Self::bmr(inputs)?, activity);
                CalculatorResult {
                    calculator: TDEE_CONFIG.id,
                    value,
                    unit: "kcal/day",
                    category: Some(activity.label().to_string()),
                    interpretation: format!(
                        "About {:.0} kcal/day maintains current weight at this activity level (x{}).",
                        value,
                        activity.multiplier()
                    ),
                }
            }
            Calculator::Ibw => {
                let sex: Sex = inputs.choice(&SEX)?;
                let value = formulas::ibw_devine(inputs.number(&HEIGHT)?, sex);
                CalculatorResult {
                    calculator: IBW_CONFIG.id,
                    value,
                    unit: "kg",
                    category: None,
                    interpretation: format!("Ideal body weight for a {} of this height: {:.1} kg.", sex, value),
                }
            }
        };

        tracing::debug!("{} = {:.2} {}", self, result.value, result.unit);
        Ok(result)
    }

    fn bmr(inputs: &CalculatorInputs) -> Result<f64> {
        Ok(formulas::bmr_mifflin_st_jeor(
            inputs.number(&WEIGHT)?,
            inputs.number(&HEIGHT)?,
            inputs.number(&AGE)?,
            inputs.choice(&SEX)?,
        ))
    }
}

impl fmt::Display for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config().id)
    }
}

impl FromStr for Calculator {
    type Err = NutriError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Calculator::ALL
            .iter()
            .copied()
            .find(|c| c.config().id == wanted)
            .ok_or_else(|| NutriError::UnknownCalculator(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adult() -> CalculatorInputs {
        CalculatorInputs::new()
            .with("weight", "70")
            .with("height", "175")
            .with("age", "30")
            .with("sex", "male")
    }

    #[test]
    fn test_bmi_result() {
        let result = Calculator::Bmi.calculate(&adult()).unwrap();
        assert!((result.value - 22.857).abs() < 0.01);
        assert_eq!(result.category.as_deref(), Some("Normal Weight"));
        assert_eq!(result.unit, "kg/m²");
    }

    #[test]
    fn test_tdee_result() {
        let inputs = adult().with("activity", "moderate");
        let result = Calculator::Tdee.calculate(&inputs).unwrap();
        assert!((result.value - 1648.75 * 1.55).abs() < 1e-9);
        assert_eq!(result.category.as_deref(), Some("Moderately active"));
    }

    #[test]
    fn test_ibw_result() {
        let inputs = CalculatorInputs::new().with("height", "152.4").with("sex", "Female");
        let result = Calculator::Ibw.calculate(&inputs).unwrap();
        assert!((result.value - 45.5).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let inputs = adult().with("weight", "0.5");
        assert!(matches!(
            Calculator::Bmi.calculate(&inputs),
            Err(NutriError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_and_bad_choice() {
        let inputs = CalculatorInputs::new().with("weight", "70");
        let missing: Vec<&str> = Calculator::Bmr
            .missing_fields(&inputs)
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(missing, vec!["height", "age", "sex"]);

        let bad = adult().with("sex", "robot");
        assert!(Calculator::Bmr.calculate(&bad).is_err());
    }

    #[test]
    fn test_choice_initial() {
        assert_eq!(SEX.parse_choice("f").unwrap(), "female");
        assert_eq!(ACTIVITY.parse_choice("Very active").unwrap(), "very_active");
        assert_eq!(ACTIVITY.parse_choice("s").unwrap(), "sedentary");
        assert!(ACTIVITY.parse_choice("x").is_err());
    }

    #[test]
    fn test_tdee_category_parses_back_to_same_level() {
        for level in ActivityLevel::ALL {
            let inputs = adult().with("activity", level.key());
            let first = Calculator::Tdee.calculate(&inputs).unwrap();
            let category = first.category.unwrap();

            let parsed: ActivityLevel = ACTIVITY.parse_choice(&category).unwrap().parse().unwrap();
            assert_eq!(parsed, *level, "category '{}'", category);

            let again = Calculator::Tdee
                .calculate(&adult().with("activity", category.as_str()))
                .unwrap();
            assert_eq!(again.value, first.value);
        }
    }

    #[test]
    fn test_from_pairs() {
        let inputs = CalculatorInputs::from_pairs(&["Weight=70", "height = 175"]).unwrap();
        assert_eq!(inputs.get("weight"), Some("70"));
        assert_eq!(inputs.get("height"), Some("175"));
        assert!(CalculatorInputs::from_pairs(&["weight"]).is_err());
    }

    #[test]
    fn test_parse_calculator() {
        assert_eq!("BMI".parse::<Calculator>().unwrap(), Calculator::Bmi);
        assert!(matches!(
            "whr".parse::<Calculator>(),
            Err(NutriError::UnknownCalculator(_))
        ));
    }
}
