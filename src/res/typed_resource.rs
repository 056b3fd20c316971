use crate::res::attr_data::AttrData;
use crate::res::res_type::ResType;
use crate::res::style::StyleData;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw payload of a resource entry, as delivered by the upstream parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResData {
    /// Inline textual data, possibly a reference (`@type/name`).
    String(String),
    /// Resource backed by a file path rather than inline text.
    File(PathBuf),
    /// Declared format of a custom attribute.
    Attr(AttrData),
    /// A style definition's entries plus optional parent.
    Style(StyleData),
    /// Array entries, each a full typed resource.
    Items(Vec<TypedResource>),
}

/// Immutable value object tying raw data to its declared type and the
/// qualifier context it was loaded under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedResource {
    data: ResData,
    res_type: ResType,
    qualifiers: String,
}

impl TypedResource {
    /// The empty qualifier context is stored as the reserved `--` token;
    /// anything else is wrapped as `-<qualifiers>-` so token matching never
    /// confuses substrings across axis boundaries.
    pub fn new(data: ResData, res_type: ResType, qualifiers: &str) -> Self {
        let qualifiers = if qualifiers.is_empty() {
            "--".to_string()
        } else {
            format!("-{}-", qualifiers.trim_matches('-'))
        };
        Self {
            data,
            res_type,
            qualifiers,
        }
    }

    /// Convenience constructor for inline textual entries.
    pub fn inline(value: impl Into<String>, res_type: ResType, qualifiers: &str) -> Self {
        Self::new(ResData::String(value.into()), res_type, qualifiers)
    }

    pub fn file(path: impl Into<PathBuf>, res_type: ResType, qualifiers: &str) -> Self {
        Self::new(ResData::File(path.into()), res_type, qualifiers)
    }

    pub fn data(&self) -> &ResData {
        &self.data
    }

    pub fn res_type(&self) -> ResType {
        self.res_type
    }

    pub fn qualifiers(&self) -> &str {
        &self.qualifiers
    }

    /// Textual form of the payload: inline text or the backing file path.
    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            ResData::String(s) => Some(s),
            ResData::File(path) => path.to_str(),
            _ => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(&self.data, ResData::String(s) if s.starts_with('@'))
    }

    pub fn is_file(&self) -> bool {
        matches!(&self.data, ResData::File(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifier_normalization() {
        let default = TypedResource::inline("x", ResType::CharSequence, "");
        assert_eq!(default.qualifiers(), "--");

        let qualified = TypedResource::inline("x", ResType::CharSequence, "en-land");
        assert_eq!(qualified.qualifiers(), "-en-land-");

        let prewrapped = TypedResource::inline("x", ResType::CharSequence, "-en-");
        assert_eq!(prewrapped.qualifiers(), "-en-");
    }

    #[test]
    fn test_is_reference() {
        let reference = TypedResource::inline("@color/foo", ResType::Color, "");
        assert!(reference.is_reference());

        let literal = TypedResource::inline("#ff0000", ResType::Color, "");
        assert!(!literal.is_reference());

        let empty = TypedResource::inline("", ResType::CharSequence, "");
        assert!(!empty.is_reference());
    }

    #[test]
    fn test_is_file() {
        let file = TypedResource::file("res/layout/main.xml", ResType::Layout, "");
        assert!(file.is_file());
        assert_eq!(file.as_str(), Some("res/layout/main.xml"));

        let inline = TypedResource::inline("hi", ResType::CharSequence, "");
        assert!(!inline.is_file());
    }
}
