//! Component categories.
//!
//! The eight well-known categories form a closed set with canonical wire
//! names. Anything else a catalog provider supplies is carried verbatim as
//! [`Category::Other`] so unfamiliar part tables still load.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A class of PC component.
///
/// Variant order is the default evaluation order of the optimizer, so a
/// `BTreeMap<Category, _>` iterates cpu first and cooler last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Cpu,
    Motherboard,
    Memory,
    VideoCard,
    PowerSupply,
    Case,
    Storage,
    Cooler,
    Other(String),
}

impl Category {
    /// The eight known categories, in default priority order.
    pub const KNOWN: [Category; 8] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Memory,
        Category::VideoCard,
        Category::PowerSupply,
        Category::Case,
        Category::Storage,
        Category::Cooler,
    ];

    /// Parse a category name, accepting the aliases used by common part
    /// data sets (`internal-hard-drive`, `cpu-cooler`, `gpu`, ...).
    pub fn parse(name: &str) -> Self {
        let normalized = name.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "cpu" | "processor" => Self::Cpu,
            "motherboard" | "mainboard" => Self::Motherboard,
            "memory" | "ram" => Self::Memory,
            "video-card" | "gpu" | "graphics-card" => Self::VideoCard,
            "power-supply" | "psu" => Self::PowerSupply,
            "case" => Self::Case,
            "storage" | "internal-hard-drive" => Self::Storage,
            "cooler" | "cpu-cooler" => Self::Cooler,
            _ => Self::Other(normalized),
        }
    }

    /// Canonical wire name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cpu => "cpu",
            Self::Motherboard => "motherboard",
            Self::Memory => "memory",
            Self::VideoCard => "video-card",
            Self::PowerSupply => "power-supply",
            Self::Case => "case",
            Self::Storage => "storage",
            Self::Cooler => "cooler",
            Self::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoryVisitor;

        impl Visitor<'_> for CategoryVisitor {
            type Value = Category;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a component category name")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Category, E> {
                if value.trim().is_empty() {
                    return Err(E::invalid_value(de::Unexpected::Str(value), &self));
                }
                Ok(Category::parse(value))
            }
        }

        deserializer.deserialize_str(CategoryVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_map_to_known_categories() {
        assert_eq!(Category::parse("internal-hard-drive"), Category::Storage);
        assert_eq!(Category::parse("cpu-cooler"), Category::Cooler);
        assert_eq!(Category::parse("Video_Card"), Category::VideoCard);
        assert_eq!(Category::parse(" PSU "), Category::PowerSupply);
    }

    #[test]
    fn unknown_names_are_preserved() {
        let category = Category::parse("Case-Fan");
        assert_eq!(category, Category::Other("case-fan".into()));
        assert_eq!(category.as_str(), "case-fan");
        assert!(!category.is_known());
    }

    #[test]
    fn ordering_follows_default_priority() {
        let mut shuffled = vec![Category::Cooler, Category::VideoCard, Category::Cpu];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Category::Cpu, Category::VideoCard, Category::Cooler]
        );
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&Category::VideoCard).unwrap();
        assert_eq!(json, "\"video-card\"");
        let parsed: Category = serde_json::from_str("\"gpu\"").unwrap();
        assert_eq!(parsed, Category::VideoCard);
        assert!(serde_json::from_str::<Category>("\"  \"").is_err());
        assert!(serde_json::from_str::<Category>("42").is_err());
    }
}
