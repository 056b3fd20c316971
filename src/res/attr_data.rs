use serde::{Deserialize, Serialize};

/// One symbolic constant declared for an enum or flag attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrPair {
    pub name: String,
    pub value: String,
}

/// Declared format of a custom attribute: one or more format tokens
/// (`reference`, `color`, `dimension`, `enum`, ...) plus, for enum/flag
/// attributes, the name-to-constant table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrData {
    pub name: String,
    pub format: String,
    #[serde(default)]
    pub pairs: Vec<AttrPair>,
}

impl AttrData {
    pub fn new(name: impl Into<String>, format: impl Into<String>, pairs: Vec<AttrPair>) -> Self {
        Self {
            name: name.into(),
            format: format.into(),
            pairs,
        }
    }

    /// The format tokens in declaration order, e.g. `reference|dimension|enum`
    /// yields three trials for the conversion loop.
    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.format.split('|')
    }

    /// Declared constant for a symbolic enum/flag name.
    pub fn value_for(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|pair| pair.name == key)
            .map(|pair| pair.value.as_str())
    }

    /// True when `value` is one of the declared constants itself, letting
    /// callers pass the numeric constant instead of its name.
    pub fn is_value(&self, value: &str) -> bool {
        self.pairs.iter().any(|pair| pair.value == value)
    }
}
