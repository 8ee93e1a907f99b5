use crate::bands::Band;

/// Mifflin–St Jeor coefficients.
pub const MIFFLIN_WEIGHT_COEF: f64 = 10.0;
pub const MIFFLIN_HEIGHT_COEF: f64 = 6.25;
pub const MIFFLIN_AGE_COEF: f64 = 5.0;
pub const MIFFLIN_MALE_OFFSET: f64 = 5.0;
pub const MIFFLIN_FEMALE_OFFSET: f64 = -161.0;

/// Devine formula: base weight (kg) at 60 inches, plus kg per inch above.
pub const DEVINE_MALE_BASE_KG: f64 = 50.0;
pub const DEVINE_FEMALE_BASE_KG: f64 = 45.5;
pub const DEVINE_KG_PER_INCH: f64 = 2.3;
pub const DEVINE_BASE_INCHES: f64 = 60.0;

pub const CM_PER_INCH: f64 = 2.54;

/// TDEE activity multipliers.
pub const ACTIVITY_SEDENTARY: f64 = 1.2;
pub const ACTIVITY_LIGHT: f64 = 1.375;
pub const ACTIVITY_MODERATE: f64 = 1.55;
pub const ACTIVITY_ACTIVE: f64 = 1.725;
pub const ACTIVITY_VERY_ACTIVE: f64 = 1.9;

/// WHO adult BMI classes.
pub const BMI_BANDS: &[Band] = &[
    Band::new(
        f64::NEG_INFINITY,
        16.0,
        "Severe Thinness",
        "Severely underweight. Medical and nutritional assessment is recommended.",
    ),
    Band::new(
        16.0,
        17.0,
        "Moderate Thinness",
        "Moderately underweight. Nutritional assessment is recommended.",
    ),
    Band::new(
        17.0,
        18.5,
        "Mild Thinness",
        "Mildly underweight. Monitor weight and dietary intake.",
    ),
    Band::new(
        18.5,
        25.0,
        "Normal Weight",
        "Body weight is in the healthy range for height.",
    ),
    Band::new(
        25.0,
        30.0,
        "Overweight",
        "Above the healthy range. Increased risk of weight-related conditions.",
    ),
    Band::new(
        30.0,
        35.0,
        "Obese Class I",
        "Obesity class I. Moderate risk of weight-related conditions.",
    ),
    Band::new(
        35.0,
        40.0,
        "Obese Class II",
        "Obesity class II. High risk of weight-related conditions.",
    ),
    Band::new(
        40.0,
        f64::INFINITY,
        "Obese Class III",
        "Obesity class III. Very high risk of weight-related conditions.",
    ),
];
