use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bands::{classify, Band};
use crate::calculators::constants::*;
use crate::error::NutriError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn key(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl FromStr for Sex {
    type Err = NutriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(NutriError::InvalidInput(format!("unknown sex '{}'", other))),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Physical activity level for TDEE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise.
    Sedentary,
    /// Light exercise 1–3 days/week.
    Light,
    /// Moderate exercise 3–5 days/week.
    Moderate,
    /// Hard exercise 6–7 days/week.
    Active,
    /// Very hard exercise or a physical job.
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: &'static [ActivityLevel] = &[
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => ACTIVITY_SEDENTARY,
            ActivityLevel::Light => ACTIVITY_LIGHT,
            ActivityLevel::Moderate => ACTIVITY_MODERATE,
            ActivityLevel::Active => ACTIVITY_ACTIVE,
            ActivityLevel::VeryActive => ACTIVITY_VERY_ACTIVE,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Light => "Lightly active",
            ActivityLevel::Moderate => "Moderately active",
            ActivityLevel::Active => "Active",
            ActivityLevel::VeryActive => "Very active",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = NutriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        ActivityLevel::ALL
            .iter()
            .copied()
            .find(|a| a.key() == wanted)
            .ok_or_else(|| NutriError::InvalidInput(format!("unknown activity level '{}'", s)))
    }
}

/// Body mass index: kg / m².
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// WHO class for a BMI value.
pub fn bmi_category(bmi: f64) -> Option<&'static Band> {
    classify(BMI_BANDS, bmi)
}

/// Basal metabolic rate (kcal/day), Mifflin–St Jeor.
pub fn bmr_mifflin_st_jeor(weight_kg: f64, height_cm: f64, age_years: f64, sex: Sex) -> f64 {
    let offset = match sex {
        Sex::Male => MIFFLIN_MALE_OFFSET,
        Sex::Female => MIFFLIN_FEMALE_OFFSET,
    };
    MIFFLIN_WEIGHT_COEF * weight_kg + MIFFLIN_HEIGHT_COEF * height_cm
        - MIFFLIN_AGE_COEF * age_years
        + offset
}

/// Total daily energy expenditure (kcal/day).
pub fn tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.multiplier()
}

/// Ideal body weight (kg), Devine formula.
pub fn ibw_devine(height_cm: f64, sex: Sex) -> f64 {
    let base = match sex {
        Sex::Male => DEVINE_MALE_BASE_KG,
        Sex::Female => DEVINE_FEMALE_BASE_KG,
    };
    let inches = height_cm / CM_PER_INCH;
    base + DEVINE_KG_PER_INCH * (inches - DEVINE_BASE_INCHES)
}
