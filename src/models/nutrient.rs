use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::NutriError;

/// How a nutrient field combines when ingredients are summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaling {
    /// Stored per 100 g, scaled by `Amount / 100`.
    PerHundredGrams,
    /// Summed as-is, independent of the ingredient amount.
    Raw,
    /// Carbohydrate-weighted average (glycemic index).
    CarbWeighted,
}

macro_rules! nutrients {
    ($( $variant:ident => $key:literal, $unit:literal, $scaling:ident; )*) => {
        /// Every nutrient field an ingredient record may carry.
        ///
        /// The record keys are part of the data format: they are used verbatim
        /// as JSON keys, CSV column headers and table labels.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Nutrient {
            $($variant,)*
        }

        impl Nutrient {
            /// All nutrients in report column order.
            pub const ALL: &'static [Nutrient] = &[$(Nutrient::$variant,)*];

            pub const COUNT: usize = Self::ALL.len();

            /// Record key, e.g. `Mineral_Na`.
            pub fn key(self) -> &'static str {
                match self {
                    $(Nutrient::$variant => $key,)*
                }
            }

            /// Display unit of the stored value.
            pub fn unit(self) -> &'static str {
                match self {
                    $(Nutrient::$variant => $unit,)*
                }
            }

            pub fn scaling(self) -> Scaling {
                match self {
                    $(Nutrient::$variant => Scaling::$scaling,)*
                }
            }

            /// Look up a nutrient by its exact record key.
            pub fn from_key(key: &str) -> Option<Nutrient> {
                match key {
                    $($key => Some(Nutrient::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

nutrients! {
    Kcal => "Kcal", "kcal", PerHundredGrams;
    Kj => "Kj", "kJ", PerHundredGrams;
    Water => "Water", "g", PerHundredGrams;
    ProteinTotal => "Protein_total", "g", PerHundredGrams;
    ProteinAnimal => "Protein_animal", "g", PerHundredGrams;
    ProteinPlant => "Protein_plant", "g", PerHundredGrams;
    FatTotal => "Fat_total", "g", PerHundredGrams;
    FattyAcidsSaturated => "Fatty_acids_saturated", "g", PerHundredGrams;
    FattyAcidsMonounsaturated => "Fatty_acids_monounsaturated", "g", PerHundredGrams;
    FattyAcidsPolyunsaturated => "Fatty_acids_polyunsaturated", "g", PerHundredGrams;
    FattyAcidsOmega3 => "Fatty_acids_omega3", "g", PerHundredGrams;
    FattyAcidsOmega6 => "Fatty_acids_omega6", "g", PerHundredGrams;
    FattyAcidsTrans => "Fatty_acids_trans", "g", PerHundredGrams;
    Cholesterol => "Cholesterol", "mg", PerHundredGrams;
    CarbohydratesTotal => "Carbohydrates_total", "g", PerHundredGrams;
    CarbohydratesAvailable => "Carbohydrates_available", "g", PerHundredGrams;
    SugarsTotal => "Sugars_total", "g", PerHundredGrams;
    Sucrose => "Sucrose", "g", PerHundredGrams;
    Lactose => "Lactose", "g", PerHundredGrams;
    Glucose => "Glucose", "g", PerHundredGrams;
    Fructose => "Fructose", "g", PerHundredGrams;
    Starch => "Starch", "g", PerHundredGrams;
    FiberTotal => "Fiber_total", "g", PerHundredGrams;
    Alcohol => "Alcohol", "g", PerHundredGrams;
    Ash => "Ash", "g", PerHundredGrams;
    Salt => "Salt", "g", PerHundredGrams;
    MineralNa => "Mineral_Na", "mg", PerHundredGrams;
    MineralK => "Mineral_K", "mg", PerHundredGrams;
    MineralCa => "Mineral_Ca", "mg", PerHundredGrams;
    MineralP => "Mineral_P", "mg", PerHundredGrams;
    MineralMg => "Mineral_Mg", "mg", PerHundredGrams;
    MineralFe => "Mineral_Fe", "mg", PerHundredGrams;
    MineralZn => "Mineral_Zn", "mg", PerHundredGrams;
    MineralCu => "Mineral_Cu", "mg", PerHundredGrams;
    MineralMn => "Mineral_Mn", "mg", PerHundredGrams;
    MineralI => "Mineral_I", "µg", PerHundredGrams;
    MineralSe => "Mineral_Se", "µg", PerHundredGrams;
    VitaminA => "Vitamin_A", "µg", PerHundredGrams;
    Retinol => "Retinol", "µg", PerHundredGrams;
    BetaCarotene => "Beta_carotene", "µg", PerHundredGrams;
    VitaminD => "Vitamin_D", "µg", PerHundredGrams;
    VitaminE => "Vitamin_E", "mg", PerHundredGrams;
    VitaminK => "Vitamin_K", "µg", PerHundredGrams;
    VitaminB1 => "Vitamin_B1", "mg", PerHundredGrams;
    VitaminB2 => "Vitamin_B2", "mg", PerHundredGrams;
    VitaminB3 => "Vitamin_B3", "mg", PerHundredGrams;
    VitaminB5 => "Vitamin_B5", "mg", PerHundredGrams;
    VitaminB6 => "Vitamin_B6", "mg", PerHundredGrams;
    VitaminB7 => "Vitamin_B7", "µg", PerHundredGrams;
    VitaminB9 => "Vitamin_B9", "µg", PerHundredGrams;
    VitaminB12 => "Vitamin_B12", "µg", PerHundredGrams;
    VitaminC => "Vitamin_C", "mg", PerHundredGrams;
    AminoIsoleucine => "Amino_Isoleucine", "mg", PerHundredGrams;
    AminoLeucine => "Amino_Leucine", "mg", PerHundredGrams;
    AminoLysine => "Amino_Lysine", "mg", PerHundredGrams;
    AminoMethionine => "Amino_Methionine", "mg", PerHundredGrams;
    AminoCysteine => "Amino_Cysteine", "mg", PerHundredGrams;
    AminoPhenylalanine => "Amino_Phenylalanine", "mg", PerHundredGrams;
    AminoTyrosine => "Amino_Tyrosine", "mg", PerHundredGrams;
    AminoThreonine => "Amino_Threonine", "mg", PerHundredGrams;
    AminoTryptophan => "Amino_Tryptophan", "mg", PerHundredGrams;
    AminoValine => "Amino_Valine", "mg", PerHundredGrams;
    AminoArginine => "Amino_Arginine", "mg", PerHundredGrams;
    AminoHistidine => "Amino_Histidine", "mg", PerHundredGrams;
    AminoAlanine => "Amino_Alanine", "mg", PerHundredGrams;
    AminoAsparticAcid => "Amino_Aspartic_acid", "mg", PerHundredGrams;
    AminoGlutamicAcid => "Amino_Glutamic_acid", "mg", PerHundredGrams;
    AminoGlycine => "Amino_Glycine", "mg", PerHundredGrams;
    AminoProline => "Amino_Proline", "mg", PerHundredGrams;
    AminoSerine => "Amino_Serine", "mg", PerHundredGrams;
    VolumePerUnit => "Volume_per_Unit", "ml", Raw;
    GlycemicIndex => "Glycemic_index", "", CarbWeighted;
}

impl Nutrient {
    /// Position in [`Nutrient::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Nutrient {
    type Err = NutriError;

    /// Exact key first, then a case-insensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Nutrient::from_key(s)
            .or_else(|| {
                Nutrient::ALL
                    .iter()
                    .copied()
                    .find(|n| n.key().eq_ignore_ascii_case(s))
            })
            .ok_or_else(|| NutriError::InvalidInput(format!("unknown nutrient field '{}'", s)))
    }
}

impl Serialize for Nutrient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<&str> = Nutrient::ALL.iter().map(|n| n.key()).collect();
        assert_eq!(keys.len(), Nutrient::COUNT);
    }

    #[test]
    fn test_index_matches_position() {
        for (i, n) in Nutrient::ALL.iter().enumerate() {
            assert_eq!(n.index(), i);
        }
    }

    #[test]
    fn test_from_key_verbatim() {
        assert_eq!(Nutrient::from_key("Mineral_Na"), Some(Nutrient::MineralNa));
        assert_eq!(Nutrient::from_key("Vitamin_B12"), Some(Nutrient::VitaminB12));
        assert_eq!(Nutrient::from_key("mineral_na"), None);
        assert_eq!(Nutrient::from_key("Amount"), None);
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("protein_TOTAL".parse::<Nutrient>().unwrap(), Nutrient::ProteinTotal);
        assert!("Unobtainium".parse::<Nutrient>().is_err());
    }

    #[test]
    fn test_special_scaling() {
        assert_eq!(Nutrient::VolumePerUnit.scaling(), Scaling::Raw);
        assert_eq!(Nutrient::GlycemicIndex.scaling(), Scaling::CarbWeighted);
        assert_eq!(Nutrient::Kcal.scaling(), Scaling::PerHundredGrams);
    }
}
