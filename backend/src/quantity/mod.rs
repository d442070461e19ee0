//! Quantity handling.
//!
//! Quantities move through the pipeline as display strings. This module
//! provides the [`QuantityValue`] classification of such a string plus the
//! three operations applied to them:
//!
//! - `normalize`: imperial/volume-ambiguous units to metric ([`standardize`])
//! - `scale`: multiply by a serving count ([`scale`])
//! - `combine`: unit-aware addition and duplicate merging ([`add`], [`combine`])
//!
//! None of these fail. Text that matches no rule is passed through verbatim
//! or wrapped in a lossy `"{n}x {text}"` / `"{a} + {b}"` form.

pub mod combine;
pub mod normalize;
pub mod scale;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use combine::{add, combine};
pub use normalize::standardize;
pub use scale::{scale, scale_ingredients};

/// Sentinel for an ingredient without a usable amount.
pub const AS_NEEDED: &str = "as needed";

/// Separator of an irreducible sum.
pub const COMPOSITE_SEPARATOR: &str = " + ";

/// `<number><rest>`, the shape scaling and same-unit addition work on.
/// The number may be a fraction; read it with [`parse_amount`].
pub(crate) static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?(?:/\d+)?)\s*(.*)$").expect("valid regex"));

/// `<int> piece(s)|large|medium|small`
pub(crate) static COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s+(pieces?|large|medium|small)$").expect("valid regex"));

/// `<int>x <base>`
pub(crate) static MULTIPLIED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)x\s+(.*)$").expect("valid regex"));

static METRIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*(g|grams?|kg|kilograms?|ml|milliliters?|l|liters?)$")
        .expect("valid regex")
});

/// Metric unit of a [`QuantityValue::Metric`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricUnit {
    G,
    Kg,
    Ml,
    L,
}

impl MetricUnit {
    /// Map a unit word to its metric unit, if it is one.
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "g" | "gram" | "grams" => Some(MetricUnit::G),
            "kg" | "kilogram" | "kilograms" => Some(MetricUnit::Kg),
            "ml" | "milliliter" | "milliliters" => Some(MetricUnit::Ml),
            "l" | "liter" | "liters" => Some(MetricUnit::L),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            MetricUnit::G => "g",
            MetricUnit::Kg => "kg",
            MetricUnit::Ml => "ml",
            MetricUnit::L => "l",
        }
    }

    pub fn is_weight(&self) -> bool {
        matches!(self, MetricUnit::G | MetricUnit::Kg)
    }
}

/// Classified shape of a quantity string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum QuantityValue {
    /// `"as needed"`
    Unitless,
    /// `"2 pieces"`, `"1 large"`
    Count { amount: u64, label: String },
    /// `"300 g"`, `"1.5 kg"`
    Metric { amount: f64, unit: MetricUnit },
    /// `"3x onion"`, produced when scaling cannot parse a quantity.
    Multiplied { factor: u64, base: String },
    /// `"2 cups + 300g"`, produced when addition cannot merge. Opaque.
    Composite(String),
    /// Anything else (`"2 cups"`, `"1 head"`), kept verbatim.
    Raw(String),
}

impl QuantityValue {
    /// Classify a quantity string. Never fails.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();

        if text == AS_NEEDED {
            return QuantityValue::Unitless;
        }
        if text.contains(COMPOSITE_SEPARATOR) {
            return QuantityValue::Composite(text.to_string());
        }
        if let Some(caps) = MULTIPLIED.captures(text) {
            if let Ok(factor) = caps[1].parse() {
                return QuantityValue::Multiplied { factor, base: caps[2].to_string() };
            }
        }
        if let Some(caps) = COUNT.captures(text) {
            if let Ok(amount) = caps[1].parse() {
                return QuantityValue::Count { amount, label: caps[2].to_string() };
            }
        }
        if let Some(caps) = METRIC.captures(text) {
            if let (Ok(amount), Some(unit)) = (caps[1].parse(), MetricUnit::from_word(&caps[2])) {
                return QuantityValue::Metric { amount, unit };
            }
        }
        QuantityValue::Raw(text.to_string())
    }

    /// `true` for forms that must never be re-parsed arithmetically.
    pub fn is_opaque(&self) -> bool {
        matches!(self, QuantityValue::Composite(_))
    }
}

impl fmt::Display for QuantityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityValue::Unitless => f.write_str(AS_NEEDED),
            QuantityValue::Count { amount, label } => write!(f, "{} {}", amount, label),
            QuantityValue::Metric { amount, unit } => {
                write!(f, "{} {}", format_amount(*amount), unit.symbol())
            }
            QuantityValue::Multiplied { factor, base } => write!(f, "{}x {}", factor, base),
            QuantityValue::Composite(s) | QuantityValue::Raw(s) => f.write_str(s),
        }
    }
}

/// Format a number without a trailing `.0` when it is whole.
pub fn format_amount(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Parse `"2"`, `"1.5"` or `"1/2"` into a number.
pub fn parse_amount(text: &str) -> Option<f64> {
    match text.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            (den != 0.0).then(|| num / den)
        }
        None => text.trim().parse().ok(),
    }
}

/// `"piece"` becomes `"pieces"` once the count exceeds one.
pub(crate) fn pluralize_label(label: &str, total: f64) -> String {
    if label == "piece" && total > 1.0 {
        "pieces".to_string()
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shapes() {
        assert_eq!(QuantityValue::parse("as needed"), QuantityValue::Unitless);
        assert_eq!(
            QuantityValue::parse("2 pieces"),
            QuantityValue::Count { amount: 2, label: "pieces".into() }
        );
        assert_eq!(
            QuantityValue::parse("1.5 kg"),
            QuantityValue::Metric { amount: 1.5, unit: MetricUnit::Kg }
        );
        assert_eq!(
            QuantityValue::parse("300g"),
            QuantityValue::Metric { amount: 300.0, unit: MetricUnit::G }
        );
        assert_eq!(
            QuantityValue::parse("3x onion"),
            QuantityValue::Multiplied { factor: 3, base: "onion".into() }
        );
        assert_eq!(
            QuantityValue::parse("2 cups + 300g"),
            QuantityValue::Composite("2 cups + 300g".into())
        );
        assert_eq!(QuantityValue::parse("1 head"), QuantityValue::Raw("1 head".into()));
    }

    #[test]
    fn test_composite_is_opaque() {
        assert!(QuantityValue::parse("1 cup + 2 large").is_opaque());
        assert!(!QuantityValue::parse("1 cup").is_opaque());
    }

    #[test]
    fn test_display_matches_pipeline_format() {
        let metric = QuantityValue::Metric { amount: 300.0, unit: MetricUnit::G };
        assert_eq!(metric.to_string(), "300 g");
        let multiplied = QuantityValue::Multiplied { factor: 2, base: "1 head".into() };
        assert_eq!(multiplied.to_string(), "2x 1 head");
        assert_eq!(QuantityValue::Unitless.to_string(), "as needed");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(6.0), "6");
        assert_eq!(format_amount(1.5), "1.5");
        assert_eq!(format_amount(0.25), "0.25");
    }

    #[test]
    fn test_parse_amount_fractions() {
        assert_eq!(parse_amount("1/2"), Some(0.5));
        assert_eq!(parse_amount("2.5"), Some(2.5));
        assert_eq!(parse_amount("1/0"), None);
        assert_eq!(parse_amount("a few"), None);
    }
}
