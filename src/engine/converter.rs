//! Type-specific decoders turning raw textual resource data into binary-typed
//! values. One converter per [`ResType`], dispatched through a closed tagged
//! enum so the mapping stays exhaustive.
//!
//! `fill_typed_value` reports parse failures as `false` rather than an error,
//! letting the format-trial loop fall back to the next declared format.
//! Calling an operation a converter does not implement is a caller/type
//! mismatch and propagates as a hard error.

use crate::engine::float_parser::parse_float_attribute;
use crate::engine::typed_value::{
    TypedValue, TYPE_INT_BOOLEAN, TYPE_INT_COLOR_ARGB8, TYPE_INT_HEX, TYPE_STRING,
};
use crate::error::ConvertError;
use crate::res::attr_data::AttrData;
use crate::res::res_type::ResType;
use crate::res::typed_resource::{ResData, TypedResource};
use std::sync::atomic::{AtomicI32, Ordering};

// String payloads get a fresh cookie so callers never assume stable string
// positions across lookups.
static NEXT_STRING_COOKIE: AtomicI32 = AtomicI32::new(0xbaaa5);

pub fn next_string_cookie() -> i32 {
    NEXT_STRING_COOKIE.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone)]
pub enum Converter {
    FromAttrData,
    FromCharSequence,
    FromColor,
    FromFilePath,
    FromFile,
    FromInt,
    FromFraction,
    FromFloat,
    FromBoolean,
    FromDimen,
    FromArray,
    FromEnum(AttrData),
    FromFlag(AttrData),
}

impl Converter {
    /// Default converter for a declared resource type. `Drawable` shares the
    /// color converter; `ColorStateList` and `Layout` both resolve to a file
    /// path string.
    pub fn for_type(res_type: ResType) -> Self {
        match res_type {
            ResType::AttrData => Self::FromAttrData,
            ResType::Boolean => Self::FromBoolean,
            ResType::CharSequence => Self::FromCharSequence,
            ResType::Color | ResType::Drawable => Self::FromColor,
            // Styles only reach the converter as file-backed references.
            ResType::ColorStateList | ResType::Layout | ResType::Style => Self::FromFilePath,
            ResType::Dimen => Self::FromDimen,
            ResType::File => Self::FromFile,
            ResType::Float => Self::FromFloat,
            ResType::Integer => Self::FromInt,
            ResType::Fraction => Self::FromFraction,
            ResType::CharSequenceArray | ResType::IntegerArray => Self::FromArray,
        }
    }

    /// Converter for one declared attr format token (`enum`, `flag`,
    /// `dimension`, ...). `reference` is handled by the dereference loop and
    /// never reaches this dispatch.
    pub fn for_attr_format(attr_data: &AttrData, format: &str) -> Result<Self, ConvertError> {
        match format {
            "enum" => Ok(Self::FromEnum(attr_data.clone())),
            "flag" => Ok(Self::FromFlag(attr_data.clone())),
            "boolean" => Ok(Self::FromBoolean),
            "color" => Ok(Self::FromColor),
            "dimension" => Ok(Self::FromDimen),
            "float" => Ok(Self::FromFloat),
            "integer" => Ok(Self::FromInt),
            "string" => Ok(Self::FromCharSequence),
            "fraction" => Ok(Self::FromFraction),
            other => Err(ConvertError::unsupported_format(other)),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::FromAttrData => "FromAttrData",
            Self::FromCharSequence => "FromCharSequence",
            Self::FromColor => "FromColor",
            Self::FromFilePath => "FromFilePath",
            Self::FromFile => "FromFile",
            Self::FromInt => "FromInt",
            Self::FromFraction => "FromFraction",
            Self::FromFloat => "FromFloat",
            Self::FromBoolean => "FromBoolean",
            Self::FromDimen => "FromDimen",
            Self::FromArray => "FromArray",
            Self::FromEnum(_) => "EnumConverter",
            Self::FromFlag(_) => "FlagConverter",
        }
    }

    fn cant_do(&self, operation: &'static str) -> ConvertError {
        ConvertError::unsupported_operation(self.name(), operation)
    }

    pub fn as_char_sequence(&self, resource: &TypedResource) -> Result<String, ConvertError> {
        let text = resource
            .as_str()
            .ok_or_else(|| ConvertError::malformed(format!("{:?}", resource.data()), "string"))?;
        match self {
            Self::FromCharSequence => Ok(text.trim().to_string()),
            Self::FromAttrData => Ok(text.to_string()),
            _ => Err(self.cant_do("as_char_sequence")),
        }
    }

    pub fn as_int(&self, resource: &TypedResource) -> Result<i32, ConvertError> {
        let text = resource
            .as_str()
            .ok_or_else(|| ConvertError::malformed(format!("{:?}", resource.data()), "int"))?;
        match self {
            Self::FromCharSequence | Self::FromInt => convert_int(text.trim())
                .ok_or_else(|| ConvertError::malformed(text, "int")),
            Self::FromColor => parse_color(text.trim())
                .ok_or_else(|| ConvertError::malformed(text, "color")),
            _ => Err(self.cant_do("as_int")),
        }
    }

    pub fn items(&self, resource: &TypedResource) -> Result<Vec<TypedResource>, ConvertError> {
        match self {
            Self::FromArray => match resource.data() {
                ResData::Items(items) => Ok(items.clone()),
                other => Err(ConvertError::malformed(format!("{other:?}"), "array")),
            },
            _ => Err(self.cant_do("items")),
        }
    }

    /// Decode `data` into `out`. Returns `false` when the raw text does not
    /// parse as this converter's type.
    pub fn fill_typed_value(&self, data: &str, out: &mut TypedValue) -> bool {
        match self {
            Self::FromAttrData => {
                out.value_type = TYPE_STRING;
                false
            }
            Self::FromCharSequence => {
                out.value_type = TYPE_STRING;
                out.data = 0;
                out.asset_cookie = next_string_cookie();
                out.string = Some(data.to_string());
                true
            }
            Self::FromColor => match parse_color(data.trim()) {
                Some(color) => {
                    out.value_type = TYPE_INT_COLOR_ARGB8;
                    out.data = color;
                    out.asset_cookie = 0;
                    out.string = None;
                    true
                }
                None => false,
            },
            Self::FromFilePath | Self::FromFile => {
                out.value_type = TYPE_STRING;
                out.data = 0;
                out.string = Some(data.to_string());
                out.asset_cookie = next_string_cookie();
                true
            }
            Self::FromInt => match convert_int(data.trim()) {
                Some(int_value) => {
                    out.value_type = TYPE_INT_HEX;
                    out.data = int_value;
                    out.asset_cookie = 0;
                    out.string = None;
                    true
                }
                None => false,
            },
            Self::FromBoolean => {
                out.value_type = TYPE_INT_BOOLEAN;
                out.asset_cookie = 0;
                out.string = None;
                if data.eq_ignore_ascii_case("true") {
                    out.data = 1;
                    true
                } else if data.eq_ignore_ascii_case("false") {
                    out.data = 0;
                    true
                } else if let Ok(int_value) = data.trim().parse::<i32>() {
                    out.data = if int_value == 0 { 0 } else { 1 };
                    true
                } else {
                    false
                }
            }
            Self::FromDimen | Self::FromFloat | Self::FromFraction => {
                parse_float_attribute(data, out, false)
            }
            Self::FromArray => false,
            Self::FromEnum(attr_data) => match find_value_for(attr_data, data) {
                Some(int_value) => {
                    out.value_type = TYPE_INT_HEX;
                    out.data = int_value;
                    out.asset_cookie = 0;
                    out.string = None;
                    true
                }
                None => false,
            },
            Self::FromFlag(attr_data) => {
                let mut flags = 0;
                for key in data.split('|') {
                    match find_value_for(attr_data, key.trim()) {
                        Some(int_value) => flags |= int_value,
                        None => return false,
                    }
                }
                out.value_type = TYPE_INT_HEX;
                out.data = flags;
                out.asset_cookie = 0;
                out.string = None;
                true
            }
        }
    }
}

/// Decimal parse first, then hex. The hex path decodes as 64-bit and
/// truncates because platform resource tables carry hex literals beyond
/// `i32::MAX` (e.g. `0xFFFF0000`) that must keep their two's-complement
/// interpretation.
pub fn convert_int(raw_value: &str) -> Option<i32> {
    if let Ok(decimal) = raw_value.parse::<i64>() {
        return Some(decimal as i32);
    }
    decode_long(raw_value).map(|decoded| decoded as i32)
}

fn decode_long(raw_value: &str) -> Option<i64> {
    let (negative, rest) = match raw_value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw_value),
    };
    let digits = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .or_else(|| rest.strip_prefix('#'))?;
    let decoded = i64::from_str_radix(digits, 16).ok()?;
    Some(if negative { -decoded } else { decoded })
}

/// Textual `#RGB`, `#ARGB`, `#RRGGBB`, `#AARRGGBB` forms to a 32-bit ARGB
/// int. Missing alpha defaults to opaque.
pub fn parse_color(value: &str) -> Option<i32> {
    let digits = value.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded = match digits.len() {
        3 | 4 => {
            let mut wide = String::with_capacity(8);
            if digits.len() == 3 {
                wide.push_str("FF");
            }
            for c in digits.chars() {
                wide.push(c);
                wide.push(c);
            }
            wide
        }
        6 => format!("FF{digits}"),
        8 => digits.to_string(),
        _ => return None,
    };
    u32::from_str_radix(&expanded, 16).ok().map(|argb| argb as i32)
}

fn find_value_for(attr_data: &AttrData, key: &str) -> Option<i32> {
    let value = match attr_data.value_for(key) {
        Some(value) => value,
        // Maybe the caller passed the value directly rather than the name.
        None if attr_data.is_value(key) => key,
        None => return None,
    };
    convert_int(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::res::attr_data::AttrPair;
    use pretty_assertions::assert_eq;

    fn char_sequence(text: &str) -> TypedResource {
        TypedResource::inline(text, ResType::CharSequence, "")
    }

    #[test]
    fn test_char_sequence_as_int_handles_spaces() {
        let resource = char_sequence(" 100 ");
        let converter = Converter::for_type(ResType::CharSequence);
        assert_eq!(converter.as_int(&resource).unwrap(), 100);
    }

    #[test]
    fn test_char_sequence_as_char_sequence_trims() {
        let resource = char_sequence(" Rothko ");
        let converter = Converter::for_type(ResType::CharSequence);
        assert_eq!(converter.as_char_sequence(&resource).unwrap(), "Rothko");
    }

    #[test]
    fn test_color_as_int_handles_spaces() {
        let resource = TypedResource::inline(" #aaaaaa ", ResType::Color, "");
        let converter = Converter::for_type(ResType::Color);
        assert_eq!(converter.as_int(&resource).unwrap(), -5592406);
    }

    #[test]
    fn test_drawable_shares_color_converter() {
        let resource = TypedResource::inline(" #aaaaaa ", ResType::Drawable, "");
        let converter = Converter::for_type(ResType::Drawable);
        assert_eq!(converter.as_int(&resource).unwrap(), -5592406);
    }

    #[test]
    fn test_convert_int_decimal_and_hex() {
        assert_eq!(convert_int("100"), Some(100));
        assert_eq!(convert_int("-7"), Some(-7));
        assert_eq!(convert_int("0x10"), Some(16));
        // Hex beyond i32::MAX keeps its two's-complement interpretation.
        assert_eq!(convert_int("0xFFFF0000"), Some(-65536i32));
        assert_eq!(convert_int("#ff"), Some(255));
        assert_eq!(convert_int("zzz"), None);
    }

    #[test]
    fn test_parse_color_forms() {
        assert_eq!(parse_color("#aaaaaa"), Some(-5592406));
        assert_eq!(parse_color("#00FF00FF"), Some(0x00FF00FF));
        assert_eq!(parse_color("#fff"), Some(0xFFFFFFFFu32 as i32));
        assert_eq!(parse_color("#8fff"), Some(0x88FFFFFFu32 as i32));
        assert_eq!(parse_color("#zzzzzz"), None);
        assert_eq!(parse_color("red"), None);
        assert_eq!(parse_color("#aaaaa"), None);
    }

    #[test]
    fn test_boolean_fill() {
        let converter = Converter::for_type(ResType::Boolean);
        let mut out = TypedValue::default();

        assert!(converter.fill_typed_value("True", &mut out));
        assert_eq!((out.value_type, out.data), (TYPE_INT_BOOLEAN, 1));

        assert!(converter.fill_typed_value("false", &mut out));
        assert_eq!(out.data, 0);

        assert!(converter.fill_typed_value("5", &mut out));
        assert_eq!(out.data, 1);

        assert!(!converter.fill_typed_value("maybe", &mut out));
    }

    #[test]
    fn test_enum_fill() {
        let attr_data = AttrData::new(
            "orientation",
            "enum",
            vec![
                AttrPair { name: "horizontal".to_string(), value: "0".to_string() },
                AttrPair { name: "vertical".to_string(), value: "1".to_string() },
            ],
        );
        let converter = Converter::for_attr_format(&attr_data, "enum").unwrap();
        let mut out = TypedValue::default();

        assert!(converter.fill_typed_value("vertical", &mut out));
        assert_eq!((out.value_type, out.data), (TYPE_INT_HEX, 1));

        // Passing the constant value directly also works.
        assert!(converter.fill_typed_value("0", &mut out));
        assert_eq!(out.data, 0);

        assert!(!converter.fill_typed_value("diagonal", &mut out));
    }

    #[test]
    fn test_flag_fill_ors_components() {
        let attr_data = AttrData::new(
            "gravity",
            "flag",
            vec![
                AttrPair { name: "A".to_string(), value: "1".to_string() },
                AttrPair { name: "B".to_string(), value: "2".to_string() },
            ],
        );
        let converter = Converter::for_attr_format(&attr_data, "flag").unwrap();
        let mut out = TypedValue::default();

        assert!(converter.fill_typed_value("A|B", &mut out));
        assert_eq!(out.data, 3);

        assert!(!converter.fill_typed_value("A|C", &mut out));
    }

    #[test]
    fn test_unsupported_operation_is_hard_error() {
        let converter = Converter::for_type(ResType::Layout);
        let resource = TypedResource::file("res/layout/main.xml", ResType::Layout, "");
        let err = converter.as_int(&resource).unwrap_err();
        assert_eq!(err.to_string(), "FromFilePath doesn't support as_int");
    }

    #[test]
    fn test_unknown_attr_format_rejected() {
        let attr_data = AttrData::new("x", "reference", vec![]);
        assert!(Converter::for_attr_format(&attr_data, "reference").is_err());
    }

    #[test]
    fn test_string_cookie_monotonic() {
        let first = next_string_cookie();
        let second = next_string_cookie();
        assert!(second > first);
    }
}
