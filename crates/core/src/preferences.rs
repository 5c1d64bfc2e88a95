//! Optimization preferences: intended usage plus category priorities.

use crate::category::Category;
use crate::error::Error;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// What the machine is mainly for. Drives the budget allocation table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Usage {
    Gaming,
    /// Workstation / productivity work.
    Workstation,
    #[default]
    General,
}

impl Usage {
    /// Interpret a free-form usage hint. `"gaming"` anywhere in the hint wins,
    /// then `"workstation"` or `"productivity"`; everything else is general.
    pub fn from_hint(hint: &str) -> Self {
        let hint = hint.to_lowercase();
        if hint.contains("gaming") {
            Self::Gaming
        } else if hint.contains("workstation") || hint.contains("productivity") {
            Self::Workstation
        } else {
            Self::General
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gaming => "gaming",
            Self::Workstation => "workstation",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Usage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Usage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UsageVisitor;

        impl Visitor<'_> for UsageVisitor {
            type Value = Usage;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a usage hint string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Usage, E> {
                Ok(Usage::from_hint(value))
            }
        }

        deserializer.deserialize_str(UsageVisitor)
    }
}

/// Caller preferences for one optimization request.
///
/// `priority` is an explicit ordered list. Each entry is moved to the front
/// of the evaluation order in turn, so the LAST entry is evaluated first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub usage: Usage,

    #[serde(default, alias = "priorities", deserialize_with = "deserialize_priority")]
    pub priority: Vec<Category>,
}

impl Preferences {
    pub fn new(usage: Usage) -> Self {
        Self {
            usage,
            priority: Vec::new(),
        }
    }

    /// Append a category to the priority list.
    pub fn with_priority(mut self, category: Category) -> Self {
        self.priority.push(category);
        self
    }

    /// Parse caller-supplied preferences from a JSON object.
    ///
    /// A wrongly shaped value (a priority that is neither a list nor a rank
    /// map, a non-string usage) is a contract violation and is reported as
    /// [`Error::InvalidPreferences`], never as an empty build.
    pub fn from_value(value: serde_json::Value) -> crate::Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::InvalidPreferences(e.to_string()))
    }

    /// Build the ordered priority list from a `{category: rank}` map.
    ///
    /// Lower rank means more important. Entries are ordered by descending
    /// rank (ties by category name) so that, after front-insertion, the
    /// lowest rank is evaluated first. The result never depends on the
    /// map's iteration order.
    pub fn priority_from_ranks(ranks: HashMap<Category, i64>) -> Vec<Category> {
        let mut ranked: Vec<(Category, i64)> = ranks.into_iter().collect();
        ranked.sort_by(|(a_cat, a_rank), (b_cat, b_rank)| {
            b_rank
                .cmp(a_rank)
                .then_with(|| b_cat.as_str().cmp(a_cat.as_str()))
        });
        ranked.into_iter().map(|(category, _)| category).collect()
    }
}

/// Accepts either an ordered list of categories or a `{category: rank}` map.
/// Any other shape is a contract violation and fails deserialization.
fn deserialize_priority<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Category>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PriorityRepr {
        Ordered(Vec<Category>),
        Ranked(HashMap<Category, i64>),
    }

    match PriorityRepr::deserialize(deserializer) {
        Ok(PriorityRepr::Ordered(list)) => Ok(list),
        Ok(PriorityRepr::Ranked(ranks)) => Ok(Preferences::priority_from_ranks(ranks)),
        Err(_) => Err(de::Error::custom(
            "priority must be a list of categories or a map of category to integer rank",
        )),
    }
}
