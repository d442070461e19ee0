//! Unit-aware addition of quantities and merging of duplicate ingredients.
//!
//! [`add`] tries a fixed table of merge rules in order and falls back to the
//! irreducible `"{q1} + {q2}"` form. That fallback makes addition neither
//! associative nor commutative: [`combine`] folds left to right, so three
//! unmergeable amounts of one ingredient come out as `"a + b + c"` in input
//! order.

use std::collections::HashMap;

use super::{
    format_amount, parse_amount, pluralize_label, MetricUnit, QuantityValue, AS_NEEDED,
    COMPOSITE_SEPARATOR, COUNT, LEADING_NUMBER, MULTIPLIED,
};
use crate::models::StructuredIngredient;

type MergeRule = fn(&str, &str) -> Option<String>;

/// Merge rules in priority order.
///
/// `same_unit` already merges two counts with the same label, so `count`
/// never fires through [`add`]. It stays in the table as the named rule for
/// `<int> piece|large|medium|small` sums.
const MERGE_RULES: &[(&str, MergeRule)] = &[
    ("same_unit", merge_same_unit),
    ("weight", merge_weight),
    ("volume", merge_volume),
    ("count", merge_count),
    ("multiplied", merge_multiplied),
];

/// Add two quantity strings.
///
/// `"as needed"` is the identity on either side. Composite quantities are
/// never re-parsed; they only grow by another `" + "` term.
pub fn add(q1: &str, q2: &str) -> String {
    if q1 == AS_NEEDED {
        return q2.to_string();
    }
    if q2 == AS_NEEDED {
        return q1.to_string();
    }

    let opaque = QuantityValue::parse(q1).is_opaque() || QuantityValue::parse(q2).is_opaque();
    if !opaque {
        if let Some(sum) = MERGE_RULES.iter().find_map(|(_, rule)| rule(q1, q2)) {
            return sum;
        }
    }

    format!("{}{}{}", q1, COMPOSITE_SEPARATOR, q2)
}

/// Name of the merge rule [`add`] would use, `None` for the fallback join.
pub fn merge_rule(q1: &str, q2: &str) -> Option<&'static str> {
    if q1 == AS_NEEDED || q2 == AS_NEEDED {
        return Some("identity");
    }
    if QuantityValue::parse(q1).is_opaque() || QuantityValue::parse(q2).is_opaque() {
        return None;
    }
    MERGE_RULES
        .iter()
        .find(|(_, rule)| rule(q1, q2).is_some())
        .map(|(name, _)| *name)
}

/// Merge duplicate ingredients (case-insensitive name) by adding quantities.
///
/// Output order is first-seen order; the first occurrence's casing is kept.
pub fn combine(ingredients: Vec<StructuredIngredient>) -> Vec<StructuredIngredient> {
    let mut combined: Vec<StructuredIngredient> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for ingredient in ingredients {
        let key = ingredient.name.to_lowercase();
        if key.is_empty() {
            continue;
        }

        match index.get(&key) {
            Some(&i) => {
                let merged = add(&combined[i].quantity, &ingredient.quantity);
                combined[i].quantity = merged;
            }
            None => {
                index.insert(key, combined.len());
                combined.push(ingredient);
            }
        }
    }

    combined
}

// =============================================================================
// Merge rules
// =============================================================================

/// `<number> <unit>` with the unit text trimmed.
fn leading_number(q: &str) -> Option<(f64, String)> {
    // "3x onion" belongs to the multiplied rule, not to a unit called "x onion".
    if MULTIPLIED.is_match(q) {
        return None;
    }
    let caps = LEADING_NUMBER.captures(q)?;
    let amount = parse_amount(&caps[1])?;
    Some((amount, caps[2].trim().to_string()))
}

fn merge_same_unit(q1: &str, q2: &str) -> Option<String> {
    let (n1, u1) = leading_number(q1)?;
    let (n2, u2) = leading_number(q2)?;
    if u1 != u2 {
        return None;
    }
    let total = n1 + n2;
    Some(
        format!("{} {}", format_amount(total), pluralize_label(&u1, total))
            .trim()
            .to_string(),
    )
}

fn metric_pair(q1: &str, q2: &str) -> Option<((f64, MetricUnit), (f64, MetricUnit))> {
    let (n1, u1) = leading_number(q1)?;
    let (n2, u2) = leading_number(q2)?;
    Some(((n1, MetricUnit::from_word(&u1)?), (n2, MetricUnit::from_word(&u2)?)))
}

/// Amount in the base unit (g or ml).
fn to_base(amount: f64, unit: MetricUnit) -> f64 {
    match unit {
        MetricUnit::Kg | MetricUnit::L => amount * 1000.0,
        MetricUnit::G | MetricUnit::Ml => amount,
    }
}

fn merge_weight(q1: &str, q2: &str) -> Option<String> {
    let ((n1, u1), (n2, u2)) = metric_pair(q1, q2)?;
    if !(u1.is_weight() && u2.is_weight()) {
        return None;
    }
    Some(format_scaled(to_base(n1, u1) + to_base(n2, u2), "g", "kg"))
}

fn merge_volume(q1: &str, q2: &str) -> Option<String> {
    let ((n1, u1), (n2, u2)) = metric_pair(q1, q2)?;
    if u1.is_weight() || u2.is_weight() {
        return None;
    }
    Some(format_scaled(to_base(n1, u1) + to_base(n2, u2), "ml", "l"))
}

/// Base amounts of 1000 or more switch to the large unit, one decimal if not whole.
fn format_scaled(base: f64, small: &str, large: &str) -> String {
    if base >= 1000.0 {
        let big = base / 1000.0;
        if big.fract() == 0.0 {
            format!("{} {}", big as i64, large)
        } else {
            format!("{:.1} {}", big, large)
        }
    } else {
        format!("{} {}", base.trunc() as i64, small)
    }
}

fn merge_count(q1: &str, q2: &str) -> Option<String> {
    let c1 = COUNT.captures(q1)?;
    let c2 = COUNT.captures(q2)?;
    if c1[2] != c2[2] {
        return None;
    }
    let total = c1[1].parse::<u64>().ok()?.checked_add(c2[1].parse::<u64>().ok()?)?;
    Some(format!("{} {}", total, pluralize_label(&c1[2], total as f64)))
}

fn merge_multiplied(q1: &str, q2: &str) -> Option<String> {
    let m1 = MULTIPLIED.captures(q1)?;
    let m2 = MULTIPLIED.captures(q2)?;
    if m1[2] != m2[2] {
        return None;
    }
    let total = m1[1].parse::<u64>().ok()?.checked_add(m2[1].parse::<u64>().ok()?)?;
    Some(format!("{}x {}", total, &m1[2]))
}
