//! Budget extraction from free-form chat text.

use regex_lite::Regex;
use std::sync::LazyLock;

/// A dollar sign followed or preceded by a three or four digit amount.
const BUDGET_PATTERN: &str = r"\$(\d{3,4})|(\d{3,4})\s*\$";

static BUDGET_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(BUDGET_PATTERN).ok());

/// The first dollar amount mentioned in `message`, if any.
///
/// Only three or four digit amounts count: `"$800"`, `"1500 $"`. Plain
/// numbers without a dollar sign are ignored so that "16GB" or "2 monitors"
/// are never taken for a budget.
pub fn extract_budget(message: &str) -> Option<f64> {
    let captures = BUDGET_RE.as_ref()?.captures(message)?;
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
