use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bands::Band;
use crate::models::lenient_number;
use crate::screening::glim::GlimDiagnosis;

/// One selectable answer of a screening question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnswerOption {
    pub label: &'static str,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<&'static str>,
}

impl AnswerOption {
    pub const fn new(label: &'static str, value: f64) -> Self {
        Self {
            label,
            value,
            description: None,
            details: None,
        }
    }

    pub const fn described(label: &'static str, value: f64, description: &'static str) -> Self {
        Self {
            label,
            value,
            description: Some(description),
            details: None,
        }
    }
}

/// A single question; exactly one option is selected when answering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreeningQuestion {
    pub id: &'static str,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<&'static str>,
    pub options: &'static [AnswerOption],
}

impl ScreeningQuestion {
    /// True when `value` is one of the option values.
    pub fn accepts(&self, value: f64) -> bool {
        self.options.iter().any(|o| (o.value - value).abs() < 1e-9)
    }
}

/// How an instrument turns answers into a classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scoring {
    /// Sum all answers and look the sum up in a band table.
    Bands(&'static [Band]),
    /// GLIM phenotypic/etiologic criteria.
    Glim,
}

/// A screening instrument definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreeningConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub questions: &'static [ScreeningQuestion],
    #[serde(skip)]
    pub scoring: Scoring,
}

impl ScreeningConfig {
    pub fn question(&self, id: &str) -> Option<&ScreeningQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Highest total the questions allow.
    pub fn max_score(&self) -> f64 {
        self.questions
            .iter()
            .map(|q| q.options.iter().map(|o| o.value).fold(0.0, f64::max))
            .sum()
    }
}

/// Selected value per question id.
///
/// Deserializes leniently: numbers are kept, booleans become 1/0, numeric
/// strings are parsed and everything else counts as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Answers(BTreeMap<String, f64>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a selection; non-finite values are stored as 0.
    pub fn set(&mut self, question: impl Into<String>, value: f64) {
        let value = if value.is_finite() { value } else { 0.0 };
        self.0.insert(question.into(), value);
    }

    pub fn with(mut self, question: impl Into<String>, value: f64) -> Self {
        self.set(question, value);
        self
    }

    pub fn get(&self, question: &str) -> Option<f64> {
        self.0.get(question).copied()
    }

    /// Selected value, 0 when unanswered.
    pub fn value(&self, question: &str) -> f64 {
        self.get(question).unwrap_or(0.0)
    }

    /// True when the answer is a positive value (a set flag).
    pub fn is_set(&self, question: &str) -> bool {
        self.value(question) > 0.0
    }

    pub fn contains(&self, question: &str) -> bool {
        self.0.contains_key(question)
    }

    /// Sum of every recorded answer.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Answers {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut answers = Answers::new();
        for (k, v) in iter {
            answers.set(k, v);
        }
        answers
    }
}

/// Coerce a loosely typed answer to a number.
///
/// Numbers and numeric strings go through [`lenient_number`], so answers and
/// ingredient records share one number syntax.
pub fn coerce_answer(value: &Value) -> f64 {
    match value {
        Value::Bool(b) => f64::from(u8::from(*b)),
        other => lenient_number(other).unwrap_or(0.0),
    }
}

impl<'de> Deserialize<'de> for Answers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(k, v)| {
                let value = coerce_answer(&v);
                (k, value)
            })
            .collect())
    }
}

/// Outcome of evaluating an instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningResult {
    pub instrument: &'static str,
    pub score: f64,
    pub risk_level: String,
    pub interpretation: String,
    /// Set for GLIM only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<GlimDiagnosis>,
}
