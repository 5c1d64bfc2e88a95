//! Component records, one purchasable part in a catalog category.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A primitive attribute value supplied by the catalog provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AttributeValue {
    /// Infer the value type of a raw cell: booleans, then numbers, then text.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::Text(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A single purchasable component.
///
/// `name` is unique within its category, not globally. The two attributes
/// the compatibility rules look at are typed fields; everything else the
/// catalog provider supplied is kept in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,

    /// Non-negative price in the catalog's currency.
    pub price: f64,

    /// CPU / motherboard socket (e.g. "AM5", "LGA1700").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,

    /// Memory generation: the RAM module's type, or the type a
    /// motherboard accepts (e.g. "DDR5").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_type: Option<String>,

    /// Every other attribute, passed through opaquely.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Component {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            socket: None,
            memory_type: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_socket(mut self, socket: impl Into<String>) -> Self {
        self.socket = Some(socket.into());
        self
    }

    pub fn with_memory_type(mut self, memory_type: impl Into<String>) -> Self {
        self.memory_type = Some(memory_type.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up an attribute by column name, including the typed ones.
    pub fn attribute(&self, key: &str) -> Option<AttributeValue> {
        match key {
            "socket" => self.socket.clone().map(AttributeValue::Text),
            "memory_type" => self.memory_type.clone().map(AttributeValue::Text),
            _ => self.attributes.get(key).cloned(),
        }
    }

    /// Everything except name and price, as presented to API clients.
    pub fn specs(&self) -> BTreeMap<String, AttributeValue> {
        let mut specs = self.attributes.clone();
        if let Some(socket) = &self.socket {
            specs.insert("socket".into(), AttributeValue::Text(socket.clone()));
        }
        if let Some(memory_type) = &self.memory_type {
            specs.insert("memory_type".into(), AttributeValue::Text(memory_type.clone()));
        }
        specs
    }
}
