pub mod config;
pub mod constants;
pub mod formulas;

pub use config::{
    Calculator, CalculatorConfig, CalculatorField, CalculatorInputs, CalculatorResult, FieldKind,
    SelectOption,
};
pub use formulas::{bmi, bmi_category, bmr_mifflin_st_jeor, ibw_devine, tdee, ActivityLevel, Sex};
