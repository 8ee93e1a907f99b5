//! Threshold tables mapping a numeric value to a category.
//!
//! Screening instruments, BMI classes and glycemic categories are all
//! expressed as ordered band tables and resolved by [`classify`].

/// One band of a threshold table: `min <= value < max`.
///
/// A band whose `max` is +∞ also contains +∞, so a partition covers the
/// extended real line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
    pub label: &'static str,
    pub text: &'static str,
}

impl Band {
    pub const fn new(min: f64, max: f64, label: &'static str, text: &'static str) -> Self {
        Self {
            min,
            max,
            label,
            text,
        }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && (value < self.max || self.max == f64::INFINITY)
    }
}

/// Return the first band containing `value`.
///
/// NaN matches nothing.
pub fn classify(table: &[Band], value: f64) -> Option<&Band> {
    table.iter().find(|b| b.contains(value))
}

/// True when the bands are ordered, contiguous and cover the whole real line.
pub fn is_partition(table: &[Band]) -> bool {
    let (Some(first), Some(last)) = (table.first(), table.last()) else {
        return false;
    };
    if first.min != f64::NEG_INFINITY || last.max != f64::INFINITY {
        return false;
    }
    table
        .iter()
        .all(|b| b.min < b.max)
        && table.windows(2).all(|w| w[0].max == w[1].min)
}
