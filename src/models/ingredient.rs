use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::nutrient::Nutrient;

/// Nutrient values of one ingredient, stored per 100 g.
///
/// Absent fields are `None` and contribute nothing when summed.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientProfile {
    values: [Option<f64>; Nutrient::COUNT],
}

impl Default for NutrientProfile {
    fn default() -> Self {
        Self {
            values: [None; Nutrient::COUNT],
        }
    }
}

impl NutrientProfile {
    pub fn get(&self, nutrient: Nutrient) -> Option<f64> {
        self.values[nutrient.index()]
    }

    /// Set a value; non-finite values clear the field.
    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        self.values[nutrient.index()] = value.is_finite().then_some(value);
    }

    /// Iterate over the fields that are present.
    pub fn present(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        Nutrient::ALL
            .iter()
            .filter_map(|n| self.get(*n).map(|v| (*n, v)))
    }

    /// Number of fields that are present.
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn from_raw(raw: BTreeMap<String, Value>) -> Self {
        let mut profile = Self::default();
        for (key, value) in raw {
            let Some(nutrient) = Nutrient::from_key(&key) else {
                continue;
            };
            match lenient_number(&value) {
                Some(v) => profile.set(nutrient, v),
                None if !value.is_null() => {
                    tracing::warn!("Ignoring non-numeric value for {}: {}", key, value);
                }
                None => {}
            }
        }
        profile
    }
}

impl Serialize for NutrientProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (nutrient, value) in self.present() {
            map.serialize_entry(nutrient.key(), &value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for NutrientProfile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_raw(raw))
    }
}

/// Parse a loosely typed record value as a number.
///
/// Accepts JSON numbers and numeric strings (with `.` or `,` as decimal
/// separator). Anything else, and non-finite results, are `None`.
pub fn lenient_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(lenient_number))
}

fn lenient_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// An ingredient record: identity, amount in grams and nutrient values per 100 g.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(
        rename = "Code",
        default,
        deserialize_with = "lenient_code",
        skip_serializing_if = "Option::is_none"
    )]
    pub code: Option<String>,

    /// Grams. Absent means zero.
    #[serde(
        rename = "Amount",
        default,
        deserialize_with = "lenient_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,

    #[serde(flatten)]
    pub nutrients: NutrientProfile,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style amount setter.
    pub fn with_amount(mut self, grams: f64) -> Self {
        self.amount = Some(grams);
        self
    }

    /// Builder-style nutrient setter.
    pub fn with(mut self, nutrient: Nutrient, value: f64) -> Self {
        self.nutrients.set(nutrient, value);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Nutrient value per 100 g, zero when absent.
    #[inline]
    pub fn per_100g(&self, nutrient: Nutrient) -> f64 {
        self.nutrients.get(nutrient).unwrap_or(0.0)
    }

    /// Amount in grams as recorded, zero when absent.
    #[inline]
    pub fn grams(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// True when `query` matches the code exactly or the name case-insensitively.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.code.as_deref() == Some(query) || self.name.eq_ignore_ascii_case(query)
    }

    /// Short summary for listings.
    pub fn debug_string(&self) -> String {
        format!(
            "{}{}: {} kcal, P:{} F:{} C:{} per 100 g",
            self.name,
            self.code
                .as_deref()
                .map(|c| format!(" [{}]", c))
                .unwrap_or_default(),
            self.per_100g(Nutrient::Kcal),
            self.per_100g(Nutrient::ProteinTotal),
            self.per_100g(Nutrient::FatTotal),
            self.per_100g(Nutrient::CarbohydratesTotal),
        )
    }
}
