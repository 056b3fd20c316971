use resource_resolver_core::engine::converter::{convert_int, parse_color, Converter};
use resource_resolver_core::engine::typed_value::{
    complex_to_float, complex_unit, COMPLEX_UNIT_DIP, TYPE_DIMENSION, TYPE_FLOAT, TYPE_FRACTION,
    TYPE_INT_BOOLEAN, TYPE_INT_COLOR_ARGB8, TYPE_INT_HEX, TYPE_STRING,
};
use resource_resolver_core::engine::TypedValue;
use resource_resolver_core::res::attr_data::{AttrData, AttrPair};
use resource_resolver_core::res::res_type::ResType;
use resource_resolver_core::res::typed_resource::TypedResource;

fn fill(converter: &Converter, raw: &str) -> Option<TypedValue> {
    let mut out = TypedValue::default();
    converter.fill_typed_value(raw, &mut out).then_some(out)
}

#[test]
fn test_char_sequence_trims_on_read() {
    let resource = TypedResource::inline("  Robo  ", ResType::CharSequence, "");
    let text = Converter::for_type(ResType::CharSequence)
        .as_char_sequence(&resource)
        .unwrap();
    assert_eq!(text, "Robo");
}

#[test]
fn test_char_sequence_as_int() {
    let resource = TypedResource::inline(" -5592406", ResType::CharSequence, "");
    let int_value = Converter::for_type(ResType::CharSequence)
        .as_int(&resource)
        .unwrap();
    assert_eq!(int_value, -5592406);
}

#[test]
fn test_hex_int_preserves_twos_complement() {
    assert_eq!(convert_int("0xFFFF0000"), Some(-65536));
    assert_eq!(convert_int("#AAAAAA"), Some(0xAAAAAA));
    assert_eq!(convert_int("42"), Some(42));
    assert_eq!(convert_int("banana"), None);
}

#[test]
fn test_color_parsing_widths() {
    assert_eq!(parse_color("#f00"), Some(0xffff0000u32 as i32));
    assert_eq!(parse_color("#8f00"), Some(0x88ff0000u32 as i32));
    assert_eq!(parse_color("#ff0000"), Some(0xffff0000u32 as i32));
    assert_eq!(parse_color("#80ff0000"), Some(0x80ff0000u32 as i32));
    assert_eq!(parse_color("red"), None);
}

#[test]
fn test_color_fill() {
    let out = fill(&Converter::for_type(ResType::Color), "#00FF00FF").unwrap();
    assert_eq!(out.value_type, TYPE_INT_COLOR_ARGB8);
    assert_eq!(out.data, 0x00ff00ff);
}

#[test]
fn test_boolean_fill_accepts_words_and_numbers() {
    let converter = Converter::for_type(ResType::Boolean);

    let out = fill(&converter, "true").unwrap();
    assert_eq!((out.value_type, out.data), (TYPE_INT_BOOLEAN, 1));

    let out = fill(&converter, "False").unwrap();
    assert_eq!((out.value_type, out.data), (TYPE_INT_BOOLEAN, 0));

    let out = fill(&converter, "7").unwrap();
    assert_eq!((out.value_type, out.data), (TYPE_INT_BOOLEAN, 1));

    assert!(fill(&converter, "maybe").is_none());
}

#[test]
fn test_dimension_fill_encodes_complex() {
    let out = fill(&Converter::for_type(ResType::Dimen), "8dp").unwrap();
    assert_eq!(out.value_type, TYPE_DIMENSION);
    assert_eq!(complex_unit(out.data), COMPLEX_UNIT_DIP);
    assert!((complex_to_float(out.data) - 8.0).abs() < 1e-4);
}

#[test]
fn test_float_fill_uses_raw_bits() {
    let out = fill(&Converter::for_type(ResType::Float), "1.5").unwrap();
    assert_eq!(out.value_type, TYPE_FLOAT);
    assert_eq!(f32::from_bits(out.data as u32), 1.5);
}

#[test]
fn test_fraction_fill() {
    let out = fill(&Converter::for_type(ResType::Fraction), "25%").unwrap();
    assert_eq!(out.value_type, TYPE_FRACTION);
    assert!((complex_to_float(out.data) - 0.25).abs() < 1e-4);
}

#[test]
fn test_string_fill_sets_cookie() {
    let out = fill(&Converter::for_type(ResType::CharSequence), "hello").unwrap();
    assert_eq!(out.value_type, TYPE_STRING);
    assert_eq!(out.string.as_deref(), Some("hello"));
    assert_ne!(out.asset_cookie, 0);
}

fn gravity() -> AttrData {
    AttrData::new(
        "gravity",
        "flag",
        vec![
            AttrPair {
                name: "left".to_string(),
                value: "0x03".to_string(),
            },
            AttrPair {
                name: "top".to_string(),
                value: "0x30".to_string(),
            },
        ],
    )
}

#[test]
fn test_flag_fill_ors_symbols() {
    let attr = gravity();
    let converter = Converter::for_attr_format(&attr, "flag").unwrap();

    let out = fill(&converter, "left|top").unwrap();
    assert_eq!(out.value_type, TYPE_INT_HEX);
    assert_eq!(out.data, 0x33);

    assert!(fill(&converter, "left|bottom").is_none());
}

#[test]
fn test_enum_fill_accepts_name_or_declared_constant() {
    let attr = AttrData::new(
        "orientation",
        "enum",
        vec![
            AttrPair {
                name: "horizontal".to_string(),
                value: "0".to_string(),
            },
            AttrPair {
                name: "vertical".to_string(),
                value: "1".to_string(),
            },
        ],
    );
    let converter = Converter::for_attr_format(&attr, "enum").unwrap();

    assert_eq!(fill(&converter, "vertical").unwrap().data, 1);
    assert_eq!(fill(&converter, "1").unwrap().data, 1);
    assert!(fill(&converter, "diagonal").is_none());
}

#[test]
fn test_reference_format_is_not_a_converter() {
    let attr = AttrData::new("background", "reference|color", Vec::new());
    assert!(Converter::for_attr_format(&attr, "reference").is_err());
}

#[test]
fn test_unsupported_operation_reports_converter_and_operation() {
    let resource = TypedResource::inline("8dp", ResType::Dimen, "");
    let err = Converter::for_type(ResType::Dimen)
        .as_char_sequence(&resource)
        .unwrap_err();
    assert!(err.to_string().contains("FromDimen"));
    assert!(err.to_string().contains("as_char_sequence"));
}
