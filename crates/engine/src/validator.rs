//! Compatibility validator.
//!
//! A [`Validator`] runs an ordered list of [`CompatibilityRule`]s against a
//! build. Every rule is evaluated independently and each failing rule
//! contributes one issue, in registration order. There is no short-circuit.
//!
//! Missing data is not a mismatch: if either side of a pair lacks the
//! attribute a rule compares, the pair passes.

use rigsmith_core::{Build, Category, CompatibilityIssue, Component};
use tracing::debug;

/// A single, independently evaluable compatibility check.
pub trait CompatibilityRule: Send + Sync {
    /// Short identifier (for logs and listings).
    fn name(&self) -> &str;

    /// The categories this rule compares.
    fn categories(&self) -> &[Category];

    /// Return an issue if the build violates this rule.
    fn evaluate(&self, build: &Build) -> Option<CompatibilityIssue>;
}

type Extract = fn(&Component) -> Option<&str>;
type Describe = fn(&str, &str) -> String;

/// Compares one attribute across two selected categories.
pub struct PairRule {
    name: &'static str,
    categories: [Category; 2],
    first_value: Extract,
    second_value: Extract,
    describe: Describe,
}

impl PairRule {
    /// CPU socket must equal motherboard socket.
    pub fn cpu_socket() -> Self {
        Self {
            name: "cpu_motherboard_socket",
            categories: [Category::Cpu, Category::Motherboard],
            first_value: |c| c.socket.as_deref(),
            second_value: |c| c.socket.as_deref(),
            describe: |cpu, board| {
                format!(
                    "Socket mismatch: CPU socket {cpu} is not compatible with motherboard socket {board}"
                )
            },
        }
    }

    /// RAM type must equal the memory type the motherboard accepts.
    pub fn memory_type() -> Self {
        Self {
            name: "memory_motherboard_type",
            categories: [Category::Memory, Category::Motherboard],
            first_value: |c| c.memory_type.as_deref(),
            second_value: |c| c.memory_type.as_deref(),
            describe: |ram, board| {
                format!(
                    "Memory type mismatch: RAM type {ram} is not compatible with motherboard memory type {board}"
                )
            },
        }
    }
}

impl CompatibilityRule for PairRule {
    fn name(&self) -> &str {
        self.name
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn evaluate(&self, build: &Build) -> Option<CompatibilityIssue> {
        let [first, second] = &self.categories;
        let first_component = build.get(first)?;
        let second_component = build.get(second)?;

        let (Some(a), Some(b)) = (
            (self.first_value)(first_component),
            (self.second_value)(second_component),
        ) else {
            debug!(rule = self.name, "Attribute missing on one side, treating as compatible");
            return None;
        };

        (a != b).then(|| CompatibilityIssue::between(first.clone(), second.clone(), (self.describe)(a, b)))
    }
}

/// Runs compatibility rules over a build.
pub struct Validator {
    rules: Vec<Box<dyn CompatibilityRule>>,
}

impl Validator {
    /// The standard rule set: CPU/motherboard socket, then memory/motherboard type.
    pub fn new() -> Self {
        Self::empty()
            .with_rule(PairRule::cpu_socket())
            .with_rule(PairRule::memory_type())
    }

    /// A validator with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. It runs after every rule already registered.
    pub fn with_rule(mut self, rule: impl CompatibilityRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// All issues in the build, in rule order. Pure: the build is not touched.
    pub fn check(&self, build: &Build) -> Vec<CompatibilityIssue> {
        self.rules.iter().filter_map(|rule| rule.evaluate(build)).collect()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
