use crate::bands::classify;
use crate::error::{NutriError, Result};
use crate::screening::glim::GlimCriteria;
use crate::screening::model::{Answers, ScreeningConfig, ScreeningResult, Scoring};

const UNCLASSIFIED: &str = "Unclassified";

/// Score an instrument.
///
/// Never fails: unanswered questions count as 0. Completeness is checked
/// separately with [`validate_answers`].
pub fn evaluate(config: &'static ScreeningConfig, answers: &Answers) -> ScreeningResult {
    let result = match config.scoring {
        Scoring::Bands(table) => {
            let score = answers.total();
            match classify(table, score) {
                Some(band) => ScreeningResult {
                    instrument: config.id,
                    score,
                    risk_level: band.label.to_string(),
                    interpretation: band.text.to_string(),
                    diagnosis: None,
                },
                None => ScreeningResult {
                    instrument: config.id,
                    score,
                    risk_level: UNCLASSIFIED.to_string(),
                    interpretation: format!("Score {} is outside every {} band.", score, config.name),
                    diagnosis: None,
                },
            }
        }
        Scoring::Glim => {
            let diagnosis = GlimCriteria::from_answers(answers).diagnose();
            ScreeningResult {
                instrument: config.id,
                score: diagnosis.score(),
                risk_level: diagnosis.risk_level().to_string(),
                interpretation: diagnosis.interpretation().to_string(),
                diagnosis: Some(diagnosis),
            }
        }
    };

    tracing::debug!(
        "Evaluated {}: score {} -> {}",
        config.name,
        result.score,
        result.risk_level
    );
    result
}

/// Ids of questions without an answer, in question order.
pub fn missing_answers(config: &ScreeningConfig, answers: &Answers) -> Vec<String> {
    config
        .questions
        .iter()
        .filter(|q| !answers.contains(q.id))
        .map(|q| q.id.to_string())
        .collect()
}

/// Check that every question is answered with one of its option values and
/// that no answer refers to an unknown question.
pub fn validate_answers(config: &ScreeningConfig, answers: &Answers) -> Result<()> {
    let missing = missing_answers(config, answers);
    if !missing.is_empty() {
        return Err(NutriError::IncompleteAnswers(missing));
    }

    for (id, value) in answers.iter() {
        let question = config.question(id).ok_or_else(|| {
            NutriError::InvalidInput(format!("'{}' is not a {} question", id, config.name))
        })?;
        if !question.accepts(value) {
            return Err(NutriError::InvalidAnswer {
                question: id.to_string(),
                value,
            });
        }
    }

    Ok(())
}

/// Validate, then evaluate.
pub fn evaluate_checked(config: &'static ScreeningConfig, answers: &Answers) -> Result<ScreeningResult> {
    validate_answers(config, answers)?;
    Ok(evaluate(config, answers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::instruments::{GLIM, MUST, NRS_2002};

    #[test]
    fn test_must_levels() {
        let low = Answers::new()
            .with("bmi_score", 0.0)
            .with("weight_loss_score", 0.0)
            .with("acute_disease_score", 0.0);
        assert_eq!(evaluate(&MUST, &low).risk_level, "Low Risk");

        let medium = low.clone().with("bmi_score", 1.0);
        assert_eq!(evaluate(&MUST, &medium).risk_level, "Medium Risk");

        let high = medium.with("weight_loss_score", 1.0);
        let result = evaluate(&MUST, &high);
        assert_eq!(result.score, 2.0);
        assert_eq!(result.risk_level, "High Risk");
    }

    #[test]
    fn test_unanswered_counts_as_zero() {
        let result = evaluate(&NRS_2002, &Answers::new());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.risk_level, "Low Nutritional Risk");
    }

    #[test]
    fn test_missing_answers_in_question_order() {
        let answers = Answers::new().with("age", 1.0);
        assert_eq!(
            missing_answers(&NRS_2002, &answers),
            vec!["nutritional_status".to_string(), "disease_severity".to_string()]
        );
        assert!(matches!(
            validate_answers(&NRS_2002, &answers),
            Err(NutriError::IncompleteAnswers(ids)) if ids.len() == 2
        ));
    }

    #[test]
    fn test_validate_rejects_value_not_in_options() {
        let answers = Answers::new()
            .with("bmi_score", 0.0)
            .with("weight_loss_score", 0.0)
            .with("acute_disease_score", 1.0);
        assert!(matches!(
            validate_answers(&MUST, &answers),
            Err(NutriError::InvalidAnswer { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_question() {
        let answers = Answers::new()
            .with("bmi_score", 0.0)
            .with("weight_loss_score", 0.0)
            .with("acute_disease_score", 0.0)
            .with("extra", 0.0);
        assert!(matches!(
            validate_answers(&MUST, &answers),
            Err(NutriError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_glim_result_carries_diagnosis() {
        let answers = Answers::new()
            .with("weightLossSevere", 1.0)
            .with("diseaseBurdenSevere", 1.0);
        let result = evaluate(&GLIM, &answers);
        assert_eq!(result.score, 2.0);
        assert!(result.diagnosis.is_some());
        assert!(result.risk_level.starts_with("Stage 2"));
    }
}
