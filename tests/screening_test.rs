use nutri_assess_rs::screening::glim::{
    DISEASE_BURDEN_SEVERE, LOW_BMI_MODERATE, REDUCED_INTAKE_MODERATE, WEIGHT_LOSS_SEVERE,
};
use nutri_assess_rs::screening::{
    evaluate, evaluate_checked, find_instrument, Answers, GlimDiagnosis, ScreeningConfig,
    INSTRUMENTS,
};
use nutri_assess_rs::NutriError;

fn mna_sf(values: [f64; 6]) -> Answers {
    let ids = ["food_intake", "weight_loss", "mobility", "stress", "neuropsych", "bmi"];
    ids.iter().zip(values).map(|(id, v)| (id.to_string(), v)).collect()
}

/// Answers whose values sum to `score`, carried by the first question.
fn scored(config: &ScreeningConfig, score: f64) -> Answers {
    Answers::new().with(config.questions[0].id, score)
}

fn assert_bands(instrument: &str, cases: &[(f64, &str)]) {
    let config = find_instrument(instrument).unwrap();
    for &(score, expected) in cases {
        let result = evaluate(config, &scored(config, score));
        assert_eq!(result.score, score);
        assert_eq!(result.risk_level, expected, "{} score {}", instrument, score);
    }
}

#[test]
fn test_must_bands() {
    let must = find_instrument("MUST").unwrap();
    let cases = [
        ([0.0, 0.0, 0.0], "Low Risk"),
        ([1.0, 0.0, 0.0], "Medium Risk"),
        ([0.0, 2.0, 0.0], "High Risk"),
        ([2.0, 2.0, 2.0], "High Risk"),
    ];

    for (values, expected) in cases {
        let answers = Answers::new()
            .with("bmi_score", values[0])
            .with("weight_loss_score", values[1])
            .with("acute_disease_score", values[2]);
        let result = evaluate_checked(must, &answers).unwrap();
        assert_eq!(result.risk_level, expected, "MUST {:?}", values);
    }
}

#[test]
fn test_nrs_2002_moderate_risk() {
    let nrs = find_instrument("nrs-2002").unwrap();
    let answers = Answers::new()
        .with("nutritional_status", 2.0)
        .with("disease_severity", 1.0)
        .with("age", 1.0);

    let result = evaluate_checked(nrs, &answers).unwrap();
    assert_eq!(result.score, 4.0);
    assert_eq!(result.risk_level, "Moderate Nutritional Risk");
}

#[test]
fn test_mna_sf_categories() {
    let config = find_instrument("mna-sf").unwrap();

    let normal = evaluate_checked(config, &mna_sf([2.0, 3.0, 2.0, 2.0, 2.0, 2.0])).unwrap();
    assert_eq!(normal.score, 13.0);
    assert_eq!(normal.risk_level, "Normal nutritional status");

    let at_risk = evaluate_checked(config, &mna_sf([1.0, 2.0, 2.0, 2.0, 1.0, 1.0])).unwrap();
    assert_eq!(at_risk.score, 9.0);
    assert_eq!(at_risk.risk_level, "At risk of malnutrition");

    let low = evaluate_checked(config, &mna_sf([0.0, 1.0, 1.0, 0.0, 1.0, 2.0])).unwrap();
    assert_eq!(low.score, 5.0);
    assert_eq!(low.risk_level, "Malnourished");
}

#[test]
fn test_glim_without_phenotypic_criterion() {
    let glim = find_instrument("glim").unwrap();
    let answers = Answers::new()
        .with(REDUCED_INTAKE_MODERATE, 1.0)
        .with(DISEASE_BURDEN_SEVERE, 1.0);

    let result = evaluate(glim, &answers);
    assert_eq!(result.score, 0.0);
    assert_eq!(result.risk_level, "No malnutrition diagnosed");
    assert_eq!(result.diagnosis, Some(GlimDiagnosis::NoMalnutrition));
}

#[test]
fn test_glim_severe_stage() {
    let glim = find_instrument("GLIM").unwrap();
    let answers = Answers::new()
        .with(WEIGHT_LOSS_SEVERE, 1.0)
        .with(DISEASE_BURDEN_SEVERE, 1.0);

    let result = evaluate(glim, &answers);
    assert_eq!(result.score, 2.0);
    assert_eq!(result.risk_level, "Stage 2 (Severe malnutrition)");
}

#[test]
fn test_glim_moderate_stage() {
    let glim = find_instrument("glim").unwrap();
    let answers = Answers::new()
        .with(LOW_BMI_MODERATE, 1.0)
        .with(REDUCED_INTAKE_MODERATE, 1.0);

    let result = evaluate(glim, &answers);
    assert_eq!(result.score, 1.0);
    assert_eq!(result.diagnosis, Some(GlimDiagnosis::ModerateMalnutrition));
}

#[test]
fn test_answers_from_json_file_shape() {
    let must = find_instrument("must").unwrap();
    let answers: Answers = serde_json::from_str(
        r#"{"bmi_score": "1", "weight_loss_score": 1, "acute_disease_score": false}"#,
    )
    .unwrap();

    let result = evaluate_checked(must, &answers).unwrap();
    assert_eq!(result.score, 2.0);
    assert_eq!(result.risk_level, "High Risk");
}

#[test]
fn test_incomplete_and_invalid_answers() {
    let must = find_instrument("must").unwrap();

    let partial = Answers::new().with("bmi_score", 1.0);
    match evaluate_checked(must, &partial) {
        Err(NutriError::IncompleteAnswers(missing)) => {
            assert_eq!(missing, vec!["weight_loss_score", "acute_disease_score"]);
        }
        other => panic!("expected incomplete answers, got {:?}", other),
    }

    let invalid = Answers::new()
        .with("bmi_score", 7.0)
        .with("weight_loss_score", 0.0)
        .with("acute_disease_score", 0.0);
    assert!(matches!(
        evaluate_checked(must, &invalid),
        Err(NutriError::InvalidAnswer { .. })
    ));

    // Scoring itself never fails
    assert_eq!(evaluate(must, &partial).risk_level, "Medium Risk");
}

#[test]
fn test_every_instrument_scores_minimum_answers() {
    for config in INSTRUMENTS {
        let answers: Answers = config
            .questions
            .iter()
            .map(|q| {
                let min = q.options.iter().map(|o| o.value).fold(f64::INFINITY, f64::min);
                (q.id.to_string(), min)
            })
            .collect();

        let result = evaluate_checked(config, &answers).unwrap();
        assert_ne!(result.risk_level, "Unclassified", "{}", config.id);
    }
}

#[test]
fn test_unknown_instrument() {
    assert!(matches!(
        find_instrument("apache-ii"),
        Err(NutriError::UnknownInstrument(_))
    ));
}

#[test]
fn test_mna_lf_boundaries() {
    assert_bands(
        "mna-lf",
        &[
            (16.5, "Malnourished"),
            (17.0, "At risk of malnutrition"),
            (23.5, "At risk of malnutrition"),
            (24.0, "Normal nutritional status"),
        ],
    );
}

#[test]
fn test_mst_boundaries() {
    assert_bands("mst", &[(1.0, "Not at risk"), (2.0, "At risk of malnutrition")]);
}

#[test]
fn test_pg_sga_boundaries() {
    assert_bands(
        "pg-sga-sf",
        &[
            (1.0, "No intervention required"),
            (2.0, "Patient and family education"),
            (3.0, "Patient and family education"),
            (4.0, "Dietitian intervention required"),
            (8.0, "Dietitian intervention required"),
            (9.0, "Critical need for intervention"),
        ],
    );
}

#[test]
fn test_sarc_f_boundaries() {
    assert_bands(
        "sarc-f",
        &[(3.0, "Low risk of sarcopenia"), (4.0, "High risk of sarcopenia")],
    );
}

#[test]
fn test_snaq65_boundaries() {
    assert_bands(
        "snaq65+",
        &[
            (1.0, "Low risk (green)"),
            (2.0, "Moderate risk (orange)"),
            (3.0, "High risk (red)"),
        ],
    );
}

#[test]
fn test_snaq65_answer_paths() {
    let snaq = find_instrument("SNAQ65+").unwrap();
    let base = Answers::new()
        .with("weight_loss", 0.0)
        .with("upper_arm_circumference", 0.0)
        .with("stair_climbing", 0.0);

    let appetite_only = base.clone().with("appetite", 1.0);
    assert_eq!(
        evaluate_checked(snaq, &appetite_only).unwrap().risk_level,
        "Low risk (green)"
    );

    let appetite_and_stairs = base.clone().with("appetite", 1.0).with("stair_climbing", 1.0);
    assert_eq!(
        evaluate_checked(snaq, &appetite_and_stairs).unwrap().risk_level,
        "Moderate risk (orange)"
    );

    let weight_loss = base.with("appetite", 0.0).with("weight_loss", 3.0);
    assert_eq!(
        evaluate_checked(snaq, &weight_loss).unwrap().risk_level,
        "High risk (red)"
    );
}

#[test]
fn test_overflowing_score_lands_in_top_band() {
    let must = find_instrument("must").unwrap();
    let answers = Answers::new()
        .with("bmi_score", 1e308)
        .with("weight_loss_score", 1e308);

    let result = evaluate(must, &answers);
    assert!(result.score.is_infinite());
    assert_eq!(result.risk_level, "High Risk");
}
