use serde::{Deserialize, Serialize};

const DIMEN_SUFFIXES: [&str; 7] = ["px", "dp", "dip", "sp", "pt", "in", "mm"];

/// Closed set of value categories a raw resource entry can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResType {
    Boolean,
    Color,
    Drawable,
    Dimen,
    Float,
    Integer,
    Fraction,
    CharSequence,
    CharSequenceArray,
    IntegerArray,
    AttrData,
    Style,
    File,
    ColorStateList,
    Layout,
}

impl ResType {
    /// Map a resource directory/type token (`string`, `color`, ...) to its
    /// value category. Unknown tokens return `None`; callers decide whether
    /// that is an error or a file-backed type.
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        match type_name {
            "bool" => Some(Self::Boolean),
            "color" => Some(Self::Color),
            "drawable" => Some(Self::Drawable),
            "dimen" => Some(Self::Dimen),
            "float" => Some(Self::Float),
            "integer" => Some(Self::Integer),
            "fraction" => Some(Self::Fraction),
            "string" => Some(Self::CharSequence),
            "array" | "string-array" => Some(Self::CharSequenceArray),
            "integer-array" => Some(Self::IntegerArray),
            "attr" => Some(Self::AttrData),
            "style" => Some(Self::Style),
            "layout" => Some(Self::Layout),
            _ => None,
        }
    }

    /// Guess a value category from a literal's syntax.
    ///
    /// Used when an attribute is unknown to the loaded resource set, e.g. an
    /// attribute introduced in a newer platform revision than the one being
    /// simulated. References keep their textual form as a char sequence so the
    /// dereference loop can still see them.
    pub fn infer_from_value(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with('#') {
            return Self::Color;
        }
        if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
            return Self::Boolean;
        }
        if has_dimen_suffix(value) {
            return Self::Dimen;
        }
        if value.ends_with("%p") || value.ends_with('%') {
            return Self::Fraction;
        }
        if value.parse::<i64>().is_ok() {
            return Self::Integer;
        }
        if !value.starts_with('@') && value.parse::<f64>().is_ok() {
            return Self::Float;
        }
        Self::CharSequence
    }
}

fn has_dimen_suffix(value: &str) -> bool {
    DIMEN_SUFFIXES.iter().any(|suffix| {
        value
            .strip_suffix(suffix)
            .is_some_and(|head| {
                !head.is_empty()
                    && head.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-')
            })
    })
}
