//! GLIM (Global Leadership Initiative on Malnutrition) diagnosis.
//!
//! A diagnosis requires at least one phenotypic and at least one etiologic
//! criterion. Severity is graded only after that gate: severe criteria in
//! both groups win over moderate criteria in both groups, and anything else
//! is a mixed grade.

use serde::Serialize;

use crate::screening::model::Answers;

pub const WEIGHT_LOSS_MODERATE: &str = "weightLossModerate";
pub const WEIGHT_LOSS_SEVERE: &str = "weightLossSevere";
pub const LOW_BMI_MODERATE: &str = "lowBmiModerate";
pub const LOW_BMI_SEVERE: &str = "lowBmiSevere";
pub const MUSCLE_MASS_MODERATE: &str = "reducedMuscleMassModerate";
pub const MUSCLE_MASS_SEVERE: &str = "reducedMuscleMassSevere";
pub const REDUCED_INTAKE_MODERATE: &str = "reducedIntakeModerate";
pub const REDUCED_INTAKE_SEVERE: &str = "reducedIntakeSevere";
pub const DISEASE_BURDEN_MODERATE: &str = "diseaseBurdenModerate";
pub const DISEASE_BURDEN_SEVERE: &str = "diseaseBurdenSevere";

/// Terminal states of the GLIM assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GlimDiagnosis {
    NoMalnutrition,
    /// Stage 1.
    ModerateMalnutrition,
    /// Stage 2.
    SevereMalnutrition,
    /// Both gates met, but the severity grades of the two groups disagree.
    MixedMalnutrition,
}

impl GlimDiagnosis {
    pub fn score(self) -> f64 {
        match self {
            GlimDiagnosis::NoMalnutrition => 0.0,
            GlimDiagnosis::ModerateMalnutrition => 1.0,
            GlimDiagnosis::SevereMalnutrition => 2.0,
            GlimDiagnosis::MixedMalnutrition => 1.0,
        }
    }

    pub fn risk_level(self) -> &'static str {
        match self {
            GlimDiagnosis::NoMalnutrition => "No malnutrition diagnosed",
            GlimDiagnosis::ModerateMalnutrition => "Stage 1 (Moderate malnutrition)",
            GlimDiagnosis::SevereMalnutrition => "Stage 2 (Severe malnutrition)",
            GlimDiagnosis::MixedMalnutrition => "Malnutrition (mixed severity)",
        }
    }

    pub fn interpretation(self) -> &'static str {
        match self {
            GlimDiagnosis::NoMalnutrition => {
                "GLIM criteria not met: a diagnosis needs at least one phenotypic and one etiologic criterion. Rescreen if the clinical situation changes."
            }
            GlimDiagnosis::ModerateMalnutrition => {
                "Moderate malnutrition. Start a nutrition care plan and monitor weight and intake."
            }
            GlimDiagnosis::SevereMalnutrition => {
                "Severe malnutrition. Urgent dietitian referral and intensive nutritional intervention."
            }
            GlimDiagnosis::MixedMalnutrition => {
                "Malnutrition present, but phenotypic and etiologic severity grades differ. Grade the stage clinically and start a nutrition care plan."
            }
        }
    }
}

/// The ten GLIM criterion flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlimCriteria {
    pub weight_loss_moderate: bool,
    pub weight_loss_severe: bool,
    pub low_bmi_moderate: bool,
    pub low_bmi_severe: bool,
    pub muscle_mass_moderate: bool,
    pub muscle_mass_severe: bool,
    pub reduced_intake_moderate: bool,
    pub reduced_intake_severe: bool,
    pub disease_burden_moderate: bool,
    pub disease_burden_severe: bool,
}

impl GlimCriteria {
    /// Read flags from answers; a flag is set when its value is positive.
    pub fn from_answers(answers: &Answers) -> Self {
        Self {
            weight_loss_moderate: answers.is_set(WEIGHT_LOSS_MODERATE),
            weight_loss_severe: answers.is_set(WEIGHT_LOSS_SEVERE),
            low_bmi_moderate: answers.is_set(LOW_BMI_MODERATE),
            low_bmi_severe: answers.is_set(LOW_BMI_SEVERE),
            muscle_mass_moderate: answers.is_set(MUSCLE_MASS_MODERATE),
            muscle_mass_severe: answers.is_set(MUSCLE_MASS_SEVERE),
            reduced_intake_moderate: answers.is_set(REDUCED_INTAKE_MODERATE),
            reduced_intake_severe: answers.is_set(REDUCED_INTAKE_SEVERE),
            disease_burden_moderate: answers.is_set(DISEASE_BURDEN_MODERATE),
            disease_burden_severe: answers.is_set(DISEASE_BURDEN_SEVERE),
        }
    }

    pub fn phenotypic_moderate(&self) -> bool {
        self.weight_loss_moderate || self.low_bmi_moderate || self.muscle_mass_moderate
    }

    pub fn phenotypic_severe(&self) -> bool {
        self.weight_loss_severe || self.low_bmi_severe || self.muscle_mass_severe
    }

    pub fn etiologic_moderate(&self) -> bool {
        self.reduced_intake_moderate || self.disease_burden_moderate
    }

    pub fn etiologic_severe(&self) -> bool {
        self.reduced_intake_severe || self.disease_burden_severe
    }

    pub fn has_phenotypic(&self) -> bool {
        self.phenotypic_moderate() || self.phenotypic_severe()
    }

    pub fn has_etiologic(&self) -> bool {
        self.etiologic_moderate() || self.etiologic_severe()
    }

    pub fn diagnose(&self) -> GlimDiagnosis {
        if !(self.has_phenotypic() && self.has_etiologic()) {
            GlimDiagnosis::NoMalnutrition
        } else if self.phenotypic_severe() && self.etiologic_severe() {
            GlimDiagnosis::SevereMalnutrition
        } else if self.phenotypic_moderate() && self.etiologic_moderate() {
            GlimDiagnosis::ModerateMalnutrition
        } else {
            GlimDiagnosis::MixedMalnutrition
        }
    }
}
