//! Question and threshold tables of the supported screening instruments.
//!
//! Option values and score bands follow the published scoring sheets.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::bands::Band;
use crate::error::{NutriError, Result};
use crate::screening::glim;
use crate::screening::model::{AnswerOption as Opt, ScreeningConfig, ScreeningQuestion, Scoring};

const NEG: f64 = f64::NEG_INFINITY;
const INF: f64 = f64::INFINITY;

const NO_YES: &[Opt] = &[Opt::new("No", 0.0), Opt::new("Yes", 1.0)];

// ─────────────────────────────────────────────────────────────────────────────
// NRS-2002
// ─────────────────────────────────────────────────────────────────────────────

pub const NRS_2002: ScreeningConfig = ScreeningConfig {
    id: "nrs-2002",
    name: "NRS-2002",
    description: "Nutritional Risk Screening 2002 for hospitalised adults.",
    questions: &[
        ScreeningQuestion {
            id: "nutritional_status",
            title: "Impaired nutritional status",
            section: Some("Nutritional status"),
            options: &[
                Opt::described("Absent", 0.0, "Normal nutritional status"),
                Opt::described(
                    "Mild",
                    1.0,
                    "Weight loss >5% in 3 months, or food intake 50–75% of normal requirement in the preceding week",
                ),
                Opt::described(
                    "Moderate",
                    2.0,
                    "Weight loss >5% in 2 months, or BMI 18.5–20.5 with impaired general condition, or food intake 25–60% of normal requirement in the preceding week",
                ),
                Opt::described(
                    "Severe",
                    3.0,
                    "Weight loss >5% in 1 month (>15% in 3 months), or BMI <18.5 with impaired general condition, or food intake 0–25% of normal requirement in the preceding week",
                ),
            ],
        },
        ScreeningQuestion {
            id: "disease_severity",
            title: "Severity of disease (increase in requirements)",
            section: Some("Disease severity"),
            options: &[
                Opt::described("Absent", 0.0, "Normal nutritional requirements"),
                Opt::described(
                    "Mild",
                    1.0,
                    "Hip fracture, chronic patients with acute complications (cirrhosis, COPD), chronic haemodialysis, diabetes, oncology",
                ),
                Opt::described(
                    "Moderate",
                    2.0,
                    "Major abdominal surgery, stroke, severe pneumonia, haematologic malignancy",
                ),
                Opt::described(
                    "Severe",
                    3.0,
                    "Head injury, bone marrow transplantation, intensive care patients (APACHE >10)",
                ),
            ],
        },
        ScreeningQuestion {
            id: "age",
            title: "Age",
            section: Some("Age adjustment"),
            options: &[
                Opt::new("Under 70 years", 0.0),
                Opt::new("70 years or older", 1.0),
            ],
        },
    ],
    scoring: Scoring::Bands(&[
        Band::new(
            NEG,
            3.0,
            "Low Nutritional Risk",
            "Patient is not at nutritional risk. Rescreen weekly during the hospital stay.",
        ),
        Band::new(
            3.0,
            5.0,
            "Moderate Nutritional Risk",
            "Patient is at nutritional risk. Start a nutritional care plan.",
        ),
        Band::new(
            5.0,
            INF,
            "High Nutritional Risk",
            "Patient is at high nutritional risk. Start nutritional support promptly and involve a dietitian.",
        ),
    ]),
};

// ─────────────────────────────────────────────────────────────────────────────
// MUST
// ─────────────────────────────────────────────────────────────────────────────

pub const MUST: ScreeningConfig = ScreeningConfig {
    id: "must",
    name: "MUST",
    description: "Malnutrition Universal Screening Tool.",
    questions: &[
        ScreeningQuestion {
            id: "bmi_score",
            title: "BMI score (kg/m²)",
            section: Some("Step 1"),
            options: &[
                Opt::new(">20 (>30 obese)", 0.0),
                Opt::new("18.5–20", 1.0),
                Opt::new("<18.5", 2.0),
            ],
        },
        ScreeningQuestion {
            id: "weight_loss_score",
            title: "Unplanned weight loss in past 3–6 months",
            section: Some("Step 2"),
            options: &[
                Opt::new("<5%", 0.0),
                Opt::new("5–10%", 1.0),
                Opt::new(">10%", 2.0),
            ],
        },
        ScreeningQuestion {
            id: "acute_disease_score",
            title: "Acute disease effect",
            section: Some("Step 3"),
            options: &[
                Opt::new("No", 0.0),
                Opt::described(
                    "Yes",
                    2.0,
                    "Acutely ill and there has been or is likely to be no nutritional intake for more than 5 days",
                ),
            ],
        },
    ],
    scoring: Scoring::Bands(&[
        Band::new(
            NEG,
            1.0,
            "Low Risk",
            "Routine clinical care. Repeat screening weekly in hospital, monthly in care homes, annually in the community.",
        ),
        Band::new(
            1.0,
            2.0,
            "Medium Risk",
            "Observe: document dietary intake for 3 days and repeat screening.",
        ),
        Band::new(
            2.0,
            INF,
            "High Risk",
            "Treat: refer to a dietitian or nutritional support team and monitor the care plan.",
        ),
    ]),
};

// ─────────────────────────────────────────────────────────────────────────────
// MNA (screening part shared by the short and long forms)
// ─────────────────────────────────────────────────────────────────────────────

const MNA_FOOD_INTAKE: ScreeningQuestion = ScreeningQuestion {
    id: "food_intake",
    title: "Has food intake declined over the past 3 months due to loss of appetite, digestive problems, chewing or swallowing difficulties?",
    section: Some("Screening"),
    options: &[
        Opt::new("Severe decrease in food intake", 0.0),
        Opt::new("Moderate decrease in food intake", 1.0),
        Opt::new("No decrease in food intake", 2.0),
    ],
};

const MNA_WEIGHT_LOSS: ScreeningQuestion = ScreeningQuestion {
    id: "weight_loss",
    title: "Weight loss during the last 3 months",
    section: Some("Screening"),
    options: &[
        Opt::new("Weight loss greater than 3 kg", 0.0),
        Opt::new("Does not know", 1.0),
        Opt::new("Weight loss between 1 and 3 kg", 2.0),
        Opt::new("No weight loss", 3.0),
    ],
};

const MNA_MOBILITY: ScreeningQuestion = ScreeningQuestion {
    id: "mobility",
    title: "Mobility",
    section: Some("Screening"),
    options: &[
        Opt::new("Bed or chair bound", 0.0),
        Opt::new("Able to get out of bed/chair but does not go out", 1.0),
        Opt::new("Goes out", 2.0),
    ],
};

const MNA_STRESS: ScreeningQuestion = ScreeningQuestion {
    id: "stress",
    title: "Has suffered psychological stress or acute disease in the past 3 months?",
    section: Some("Screening"),
    options: &[Opt::new("Yes", 0.0), Opt::new("No", 2.0)],
};

const MNA_NEUROPSYCH: ScreeningQuestion = ScreeningQuestion {
    id: "neuropsych",
    title: "Neuropsychological problems",
    section: Some("Screening"),
    options: &[
        Opt::new("Severe dementia or depression", 0.0),
        Opt::new("Mild dementia", 1.0),
        Opt::new("No psychological problems", 2.0),
    ],
};

const MNA_BMI: ScreeningQuestion = ScreeningQuestion {
    id: "bmi",
    title: "Body Mass Index (kg/m²)",
    section: Some("Screening"),
    options: &[
        Opt {
            label: "BMI less than 19",
            value: 0.0,
            description: None,
            details: Some("If BMI is not available: calf circumference less than 31 cm"),
        },
        Opt::new("BMI 19 to less than 21", 1.0),
        Opt::new("BMI 21 to less than 23", 2.0),
        Opt {
            label: "BMI 23 or greater",
            value: 3.0,
            description: None,
            details: Some("If BMI is not available: calf circumference 31 cm or greater"),
        },
    ],
};

const MNA_STATUS_NORMAL: &str = "Normal nutritional status";
const MNA_STATUS_AT_RISK: &str = "At risk of malnutrition";
const MNA_STATUS_MALNOURISHED: &str = "Malnourished";

pub const MNA_SF: ScreeningConfig = ScreeningConfig {
    id: "mna-sf",
    name: "MNA-SF",
    description: "Mini Nutritional Assessment, short form (older adults).",
    questions: &[
        MNA_FOOD_INTAKE,
        MNA_WEIGHT_LOSS,
        MNA_MOBILITY,
        MNA_STRESS,
        MNA_NEUROPSYCH,
        MNA_BMI,
    ],
    scoring: Scoring::Bands(&[
        Band::new(
            NEG,
            8.0,
            MNA_STATUS_MALNOURISHED,
            "Malnourished. Complete the full assessment and start nutritional intervention.",
        ),
        Band::new(
            8.0,
            12.0,
            MNA_STATUS_AT_RISK,
            "At risk of malnutrition. Complete the full MNA and monitor weight.",
        ),
        Band::new(
            12.0,
            INF,
            MNA_STATUS_NORMAL,
            "Normal nutritional status. Rescreen after an acute event or annually.",
        ),
    ]),
};

pub const MNA_LF: ScreeningConfig = ScreeningConfig {
    id: "mna-lf",
    name: "MNA-LF",
    description: "Mini Nutritional Assessment, full form (screening plus assessment, max 30 points).",
    questions: &[
        MNA_FOOD_INTAKE,
        MNA_WEIGHT_LOSS,
        MNA_MOBILITY,
        MNA_STRESS,
        MNA_NEUROPSYCH,
        MNA_BMI,
        ScreeningQuestion {
            id: "independent_living",
            title: "Lives independently (not in a nursing home or hospital)",
            section: Some("Assessment"),
            options: &[Opt::new("No", 0.0), Opt::new("Yes", 1.0)],
        },
        ScreeningQuestion {
            id: "medications",
            title: "Takes more than 3 prescription drugs per day",
            section: Some("Assessment"),
            options: &[Opt::new("Yes", 0.0), Opt::new("No", 1.0)],
        },
        ScreeningQuestion {
            id: "pressure_sores",
            title: "Pressure sores or skin ulcers",
            section: Some("Assessment"),
            options: &[Opt::new("Yes", 0.0), Opt::new("No", 1.0)],
        },
        ScreeningQuestion {
            id: "full_meals",
            title: "How many full meals does the patient eat daily?",
            section: Some("Assessment"),
            options: &[
                Opt::new("1 meal", 0.0),
                Opt::new("2 meals", 1.0),
                Opt::new("3 meals", 2.0),
            ],
        },
        ScreeningQuestion {
            id: "protein_intake",
            title: "Selected consumption markers for protein intake",
            section: Some("Assessment"),
            options: &[
                Opt {
                    label: "0 or 1 yes",
                    value: 0.0,
                    description: None,
                    details: Some(
                        "Markers: dairy products daily; legumes or eggs 2+ times a week; meat, fish or poultry daily",
                    ),
                },
                Opt::new("2 yes", 0.5),
                Opt::new("3 yes", 1.0),
            ],
        },
        ScreeningQuestion {
            id: "fruit_vegetables",
            title: "Consumes two or more servings of fruit or vegetables per day",
            section: Some("Assessment"),
            options: &[Opt::new("No", 0.0), Opt::new("Yes", 1.0)],
        },
        ScreeningQuestion {
            id: "fluid_intake",
            title: "How much fluid (water, juice, coffee, tea, milk) is consumed per day?",
            section: Some("Assessment"),
            options: &[
                Opt::new("Less than 3 cups", 0.0),
                Opt::new("3 to 5 cups", 0.5),
                Opt::new("More than 5 cups", 1.0),
            ],
        },
        ScreeningQuestion {
            id: "mode_of_feeding",
            title: "Mode of feeding",
            section: Some("Assessment"),
            options: &[
                Opt::new("Unable to eat without assistance", 0.0),
                Opt::new("Self-fed with some difficulty", 1.0),
                Opt::new("Self-fed without any problem", 2.0),
            ],
        },
        ScreeningQuestion {
            id: "self_view",
            title: "Self view of nutritional status",
            section: Some("Assessment"),
            options: &[
                Opt::new("Views self as being malnourished", 0.0),
                Opt::new("Is uncertain of nutritional state", 1.0),
                Opt::new("Views self as having no nutritional problem", 2.0),
            ],
        },
        ScreeningQuestion {
            id: "health_comparison",
            title: "In comparison with other people of the same age, how does the patient consider their health status?",
            section: Some("Assessment"),
            options: &[
                Opt::new("Not as good", 0.0),
                Opt::new("Does not know", 0.5),
                Opt::new("As good", 1.0),
                Opt::new("Better", 2.0),
            ],
        },
        ScreeningQuestion {
            id: "mid_arm_circumference",
            title: "Mid-arm circumference (MAC) in cm",
            section: Some("Assessment"),
            options: &[
                Opt::new("MAC less than 21", 0.0),
                Opt::new("MAC 21 to 22", 0.5),
                Opt::new("MAC greater than 22", 1.0),
            ],
        },
        ScreeningQuestion {
            id: "calf_circumference",
            title: "Calf circumference (CC) in cm",
            section: Some("Assessment"),
            options: &[
                Opt::new("CC less than 31", 0.0),
                Opt::new("CC 31 or greater", 1.0),
            ],
        },
    ],
    scoring: Scoring::Bands(&[
        Band::new(
            NEG,
            17.0,
            MNA_STATUS_MALNOURISHED,
            "Malnourished. Start nutritional intervention and follow up closely.",
        ),
        Band::new(
            17.0,
            24.0,
            MNA_STATUS_AT_RISK,
            "At risk of malnutrition. Review diet, address causes and monitor weight.",
        ),
        Band::new(
            24.0,
            INF,
            MNA_STATUS_NORMAL,
            "Normal nutritional status. Rescreen periodically.",
        ),
    ]),
};

// ─────────────────────────────────────────────────────────────────────────────
// MST
// ─────────────────────────────────────────────────────────────────────────────

pub const MST: ScreeningConfig = ScreeningConfig {
    id: "mst",
    name: "MST",
    description: "Malnutrition Screening Tool.",
    questions: &[
        ScreeningQuestion {
            id: "weight_loss",
            title: "Have you recently lost weight without trying? If yes, how much?",
            section: None,
            options: &[
                Opt::new("No", 0.0),
                Opt::new("Unsure", 2.0),
                Opt::new("Yes, 1–5 kg", 1.0),
                Opt::new("Yes, 6–10 kg", 2.0),
                Opt::new("Yes, 11–15 kg", 3.0),
                Opt::new("Yes, more than 15 kg", 4.0),
                Opt::new("Yes, unsure how much", 2.0),
            ],
        },
        ScreeningQuestion {
            id: "appetite",
            title: "Have you been eating poorly because of a decreased appetite?",
            section: None,
            options: NO_YES,
        },
    ],
    scoring: Scoring::Bands(&[
        Band::new(
            NEG,
            2.0,
            "Not at risk",
            "Not at risk of malnutrition. Rescreen weekly or if the condition changes.",
        ),
        Band::new(
            2.0,
            INF,
            "At risk of malnutrition",
            "At risk of malnutrition. Refer to a dietitian for full nutritional assessment.",
        ),
    ]),
};

// ─────────────────────────────────────────────────────────────────────────────
// PG-SGA Short Form
// ─────────────────────────────────────────────────────────────────────────────

const fn symptom(id: &'static str, title: &'static str, options: &'static [Opt]) -> ScreeningQuestion {
    ScreeningQuestion {
        id,
        title,
        section: Some("Symptoms"),
        options,
    }
}

const SYMPTOM_1: &[Opt] = &[Opt::new("No", 0.0), Opt::new("Yes", 1.0)];
const SYMPTOM_2: &[Opt] = &[Opt::new("No", 0.0), Opt::new("Yes", 2.0)];
const SYMPTOM_3: &[Opt] = &[Opt::new("No", 0.0), Opt::new("Yes", 3.0)];

pub const PG_SGA: ScreeningConfig = ScreeningConfig {
    id: "pg-sga",
    name: "PG-SGA SF",
    description: "Patient-Generated Subjective Global Assessment, short form (patient boxes 1–4).",
    questions: &[
        ScreeningQuestion {
            id: "weight_loss_one_month",
            title: "Weight loss over the past month",
            section: Some("Weight"),
            options: &[
                Opt::new("0–1.9%", 0.0),
                Opt::new("2–2.9%", 1.0),
                Opt::new("3–4.9%", 2.0),
                Opt::new("5–9.9%", 3.0),
                Opt::new("10% or greater", 4.0),
            ],
        },
        ScreeningQuestion {
            id: "weight_change_two_weeks",
            title: "During the past two weeks my weight has",
            section: Some("Weight"),
            options: &[
                Opt::new("Not changed or increased", 0.0),
                Opt::new("Decreased", 1.0),
            ],
        },
        ScreeningQuestion {
            id: "food_intake",
            title: "Food intake compared with my normal intake",
            section: Some("Food intake"),
            options: &[
                Opt::new("Unchanged or more than usual", 0.0),
                Opt::new("Less than usual: normal food but less", 1.0),
                Opt::new("Little solid food", 2.0),
                Opt::new("Only liquids or only nutritional supplements", 3.0),
                Opt::new("Very little of anything", 4.0),
            ],
        },
        symptom("no_appetite", "No appetite, just did not feel like eating", SYMPTOM_3),
        symptom("vomiting", "Vomiting", SYMPTOM_3),
        symptom("diarrhea", "Diarrhoea", SYMPTOM_3),
        symptom("pain", "Pain", SYMPTOM_3),
        symptom("mouth_sores", "Mouth sores", SYMPTOM_2),
        symptom("swallowing_problems", "Problems swallowing", SYMPTOM_2),
        symptom("nausea", "Nausea", SYMPTOM_1),
        symptom("constipation", "Constipation", SYMPTOM_1),
        symptom("dry_mouth", "Dry mouth", SYMPTOM_1),
        symptom("taste_changes", "Things taste funny or have no taste", SYMPTOM_1),
        symptom("smells_bother", "Smells bother me", SYMPTOM_1),
        symptom("early_satiety", "Feel full quickly", SYMPTOM_1),
        symptom("fatigue", "Fatigue", SYMPTOM_1),
        ScreeningQuestion {
            id: "activities",
            title: "Over the past month, my activity level is",
            section: Some("Activities and function"),
            options: &[
                Opt::new("Normal with no limitations", 0.0),
                Opt::new("Not my normal self, but able to be up and about with fairly normal activities", 1.0),
                Opt::new("Not feeling up to most things, but in bed or chair less than half the day", 2.0),
                Opt::new("Able to do little activity and spend most of the day in bed or chair", 3.0),
            ],
        },
    ],
    scoring: Scoring::Bands(&[
        Band::new(
            NEG,
            2.0,
            "No intervention required",
            "No intervention required at this time. Re-assess routinely during treatment.",
        ),
        Band::new(
            2.0,
            4.0,
            "Patient and family education",
            "Patient and family education by a dietitian, nurse or other clinician, with pharmacologic intervention as indicated by symptoms.",
        ),
        Band::new(
            4.0,
            9.0,
            "Dietitian intervention required",
            "Requires intervention by a dietitian in conjunction with nurse or physician as indicated by symptoms.",
        ),
        Band::new(
            9.0,
            INF,
            "Critical need for intervention",
            "Critical need for improved symptom management and/or nutrient intervention options.",
        ),
    ]),
};

// ─────────────────────────────────────────────────────────────────────────────
// SARC-F
// ─────────────────────────────────────────────────────────────────────────────

const DIFFICULTY: &[Opt] = &[
    Opt::new("None", 0.0),
    Opt::new("Some", 1.0),
    Opt::new("A lot or unable", 2.0),
];

pub const SARC_F: ScreeningConfig = ScreeningConfig {
    id: "sarc-f",
    name: "SARC-F",
    description: "Rapid questionnaire for sarcopenia risk.",
    questions: &[
        ScreeningQuestion {
            id: "strength",
            title: "How much difficulty do you have in lifting and carrying 4.5 kg (10 pounds)?",
            section: Some("Strength"),
            options: DIFFICULTY,
        },
        ScreeningQuestion {
            id: "assistance_walking",
            title: "How much difficulty do you have walking across a room?",
            section: Some("Assistance in walking"),
            options: &[
                Opt::new("None", 0.0),
                Opt::new("Some", 1.0),
                Opt::new("A lot, uses aids, or unable", 2.0),
            ],
        },
        ScreeningQuestion {
            id: "rise_from_chair",
            title: "How much difficulty do you have transferring from a chair or bed?",
            section: Some("Rise from a chair"),
            options: &[
                Opt::new("None", 0.0),
                Opt::new("Some", 1.0),
                Opt::new("A lot or unable without help", 2.0),
            ],
        },
        ScreeningQuestion {
            id: "climb_stairs",
            title: "How much difficulty do you have climbing a flight of 10 stairs?",
            section: Some("Climb stairs"),
            options: DIFFICULTY,
        },
        ScreeningQuestion {
            id: "falls",
            title: "How many times have you fallen in the past year?",
            section: Some("Falls"),
            options: &[
                Opt::new("None", 0.0),
                Opt::new("1–3 falls", 1.0),
                Opt::new("4 or more falls", 2.0),
            ],
        },
    ],
    scoring: Scoring::Bands(&[
        Band::new(
            NEG,
            4.0,
            "Low risk of sarcopenia",
            "Low risk of sarcopenia. Rescreen periodically or when function declines.",
        ),
        Band::new(
            4.0,
            INF,
            "High risk of sarcopenia",
            "Predictive of sarcopenia and poor outcomes. Confirm with grip strength and muscle mass assessment.",
        ),
    ]),
};

// ─────────────────────────────────────────────────────────────────────────────
// SNAQ65+
// ─────────────────────────────────────────────────────────────────────────────

// Red criteria are worth 3 so that either one alone reaches the red band;
// orange requires both 1-point criteria together.
pub const SNAQ65: ScreeningConfig = ScreeningConfig {
    id: "snaq65+",
    name: "SNAQ65+",
    description: "Short Nutritional Assessment Questionnaire for community-dwelling adults aged 65 and over.",
    questions: &[
        ScreeningQuestion {
            id: "weight_loss",
            title: "Have you unintentionally lost more than 4 kg in the past 6 months?",
            section: Some("Weight"),
            options: &[Opt::new("No", 0.0), Opt::new("Yes", 3.0)],
        },
        ScreeningQuestion {
            id: "upper_arm_circumference",
            title: "Is the mid-upper arm circumference less than 25 cm?",
            section: Some("Weight"),
            options: &[Opt::new("No", 0.0), Opt::new("Yes", 3.0)],
        },
        ScreeningQuestion {
            id: "appetite",
            title: "Did you experience a decreased appetite last week?",
            section: Some("Appetite and function"),
            options: NO_YES,
        },
        ScreeningQuestion {
            id: "stair_climbing",
            title: "Are you unable to walk up and down a staircase of 15 steps without resting?",
            section: Some("Appetite and function"),
            options: NO_YES,
        },
    ],
    scoring: Scoring::Bands(&[
        Band::new(
            NEG,
            2.0,
            "Low risk (green)",
            "Not undernourished. No intervention needed.",
        ),
        Band::new(
            2.0,
            3.0,
            "Moderate risk (orange)",
            "Risk of undernutrition. Give dietary advice and monitor weight.",
        ),
        Band::new(
            3.0,
            INF,
            "High risk (red)",
            "Undernourished. Refer to a dietitian for treatment.",
        ),
    ]),
};

// ─────────────────────────────────────────────────────────────────────────────
// GLIM
// ─────────────────────────────────────────────────────────────────────────────

const fn flag(id: &'static str, title: &'static str, section: &'static str) -> ScreeningQuestion {
    ScreeningQuestion {
        id,
        title,
        section: Some(section),
        options: NO_YES,
    }
}

const PHENOTYPIC: &str = "Phenotypic criteria";
const ETIOLOGIC: &str = "Etiologic criteria";

pub const GLIM: ScreeningConfig = ScreeningConfig {
    id: "glim",
    name: "GLIM",
    description: "Global Leadership Initiative on Malnutrition diagnostic criteria.",
    questions: &[
        flag(
            glim::WEIGHT_LOSS_MODERATE,
            "Weight loss 5–10% within past 6 months, or 10–20% beyond 6 months",
            PHENOTYPIC,
        ),
        flag(
            glim::WEIGHT_LOSS_SEVERE,
            "Weight loss >10% within past 6 months, or >20% beyond 6 months",
            PHENOTYPIC,
        ),
        flag(
            glim::LOW_BMI_MODERATE,
            "BMI <20 kg/m² if under 70 years, or <22 kg/m² if 70 or older",
            PHENOTYPIC,
        ),
        flag(
            glim::LOW_BMI_SEVERE,
            "BMI <18.5 kg/m² if under 70 years, or <20 kg/m² if 70 or older",
            PHENOTYPIC,
        ),
        flag(
            glim::MUSCLE_MASS_MODERATE,
            "Reduced muscle mass: mild to moderate deficit",
            PHENOTYPIC,
        ),
        flag(
            glim::MUSCLE_MASS_SEVERE,
            "Reduced muscle mass: severe deficit",
            PHENOTYPIC,
        ),
        flag(
            glim::REDUCED_INTAKE_MODERATE,
            "Reduced intake: ≤50% of energy requirement for >1 week, any reduction for >2 weeks, or chronic malabsorption",
            ETIOLOGIC,
        ),
        flag(
            glim::REDUCED_INTAKE_SEVERE,
            "Reduced intake: little or no intake for more than 2 weeks",
            ETIOLOGIC,
        ),
        flag(
            glim::DISEASE_BURDEN_MODERATE,
            "Disease burden: chronic disease-related inflammation",
            ETIOLOGIC,
        ),
        flag(
            glim::DISEASE_BURDEN_SEVERE,
            "Disease burden: acute disease or injury with severe inflammation",
            ETIOLOGIC,
        ),
    ],
    scoring: Scoring::Glim,
};

/// Every supported instrument in display order.
pub static INSTRUMENTS: &[&ScreeningConfig] = &[
    &NRS_2002, &MUST, &MNA_SF, &MNA_LF, &MST, &GLIM, &PG_SGA, &SARC_F, &SNAQ65,
];

/// Normalise an instrument id: lowercase alphanumerics only.
fn normalize_id(id: &str) -> String {
    id.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Registry keyed by normalised id (`nrs2002`, `mnasf`, `snaq65`, ...).
static REGISTRY: LazyLock<HashMap<String, &'static ScreeningConfig>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    for config in INSTRUMENTS {
        m.insert(normalize_id(config.id), *config);
    }
    m.insert("pgsgasf".to_string(), &PG_SGA);
    m
});

/// Look up an instrument by id, ignoring case and punctuation.
pub fn find_instrument(id: &str) -> Result<&'static ScreeningConfig> {
    REGISTRY
        .get(&normalize_id(id))
        .copied()
        .ok_or_else(|| NutriError::UnknownInstrument(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bands::is_partition;
    use std::collections::HashSet;

    #[test]
    fn test_band_tables_partition() {
        for config in INSTRUMENTS {
            if let Scoring::Bands(table) = config.scoring {
                assert!(is_partition(table), "{} bands do not partition", config.name);
            }
        }
    }

    #[test]
    fn test_question_ids_unique() {
        for config in INSTRUMENTS {
            let ids: HashSet<&str> = config.questions.iter().map(|q| q.id).collect();
            assert_eq!(ids.len(), config.questions.len(), "{}", config.name);
            assert!(config.questions.iter().all(|q| !q.options.is_empty()));
        }
    }

    #[test]
    fn test_max_scores() {
        assert_eq!(NRS_2002.max_score(), 7.0);
        assert_eq!(MUST.max_score(), 6.0);
        assert_eq!(MNA_SF.max_score(), 14.0);
        assert_eq!(MNA_LF.max_score(), 30.0);
        assert_eq!(MST.max_score(), 5.0);
        assert_eq!(SARC_F.max_score(), 10.0);
        assert_eq!(SNAQ65.max_score(), 8.0);
    }

    #[test]
    fn test_find_instrument_aliases() {
        assert_eq!(find_instrument("NRS-2002").unwrap().id, "nrs-2002");
        assert_eq!(find_instrument("nrs2002").unwrap().id, "nrs-2002");
        assert_eq!(find_instrument("mna_sf").unwrap().id, "mna-sf");
        assert_eq!(find_instrument("SNAQ65+").unwrap().id, "snaq65+");
        assert_eq!(find_instrument("pg-sga-sf").unwrap().id, "pg-sga");
        assert!(matches!(
            find_instrument("bogus"),
            Err(NutriError::UnknownInstrument(_))
        ));
    }
}
