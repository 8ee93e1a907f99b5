use crate::bands::Band;

/// Atwater energy factors (kcal per gram).
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBOHYDRATE: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Nutrient values are stored per this many grams.
pub const REFERENCE_GRAMS: f64 = 100.0;

/// Glycemic index categories.
pub const GLYCEMIC_INDEX_BANDS: &[Band] = &[
    Band::new(f64::NEG_INFINITY, 56.0, "Low GI", "Slow, gradual rise in blood glucose."),
    Band::new(56.0, 70.0, "Medium GI", "Moderate rise in blood glucose."),
    Band::new(70.0, f64::INFINITY, "High GI", "Rapid rise in blood glucose."),
];

/// Glycemic load categories.
pub const GLYCEMIC_LOAD_BANDS: &[Band] = &[
    Band::new(f64::NEG_INFINITY, 11.0, "Low GL", "Small expected glycemic impact."),
    Band::new(11.0, 20.0, "Medium GL", "Moderate expected glycemic impact."),
    Band::new(20.0, f64::INFINITY, "High GL", "Large expected glycemic impact."),
];

/// Nutrients shown in the terminal summary table.
pub const SUMMARY_NUTRIENTS: &[crate::models::Nutrient] = {
    use crate::models::Nutrient::*;
    &[
        Kcal,
        ProteinTotal,
        FatTotal,
        CarbohydratesTotal,
        FiberTotal,
        SugarsTotal,
        MineralNa,
    ]
};
