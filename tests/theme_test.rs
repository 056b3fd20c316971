use resource_resolver_core::engine::typed_value::{TYPE_INT_COLOR_ARGB8, TYPE_NULL};
use resource_resolver_core::engine::{AttributeSet, ResolutionEngine, ThemeRegistry};
use resource_resolver_core::res::attr_data::AttrData;
use resource_resolver_core::res::attribute::AttributeResource;
use resource_resolver_core::res::loader::ResourceLoader;
use resource_resolver_core::res::res_name::ResName;
use resource_resolver_core::res::res_type::ResType;
use resource_resolver_core::res::style::{EmptyStyle, StyleData};
use resource_resolver_core::res::typed_resource::{ResData, TypedResource};
use std::sync::Arc;

fn name(type_name: &str, entry: &str) -> ResName {
    ResName::new("com.example", type_name, entry)
}

fn attr_entry(attr: &str, format: &str) -> TypedResource {
    TypedResource::new(
        ResData::Attr(AttrData::new(attr, format, Vec::new())),
        ResType::AttrData,
        "",
    )
}

fn style_entry(style_name: &str, parent: Option<&str>, items: &[(&str, &str)]) -> TypedResource {
    let mut style = StyleData::new(style_name, parent.map(String::from));
    for (attr, value) in items {
        style.add(AttributeResource::new(
            name("attr", attr),
            *value,
            "com.example",
        ));
    }
    TypedResource::new(ResData::Style(style), ResType::Style, "")
}

struct Fixture {
    engine: ResolutionEngine,
    text_color: i32,
    button_style_attr: i32,
    theme_style: i32,
    widget_style: i32,
}

fn fixture() -> Fixture {
    let mut builder = ResourceLoader::builder();
    let text_color = builder.add(
        name("attr", "textColor"),
        attr_entry("textColor", "color|reference"),
    );
    let button_style_attr = builder.add(
        name("attr", "buttonStyle"),
        attr_entry("buttonStyle", "reference"),
    );
    builder.add(
        name("style", "Widget.Button"),
        style_entry("Widget.Button", None, &[("textColor", "#222222")]),
    );
    let widget_style = builder.add(
        name("style", "Widget"),
        style_entry("Widget", Some(""), &[("textColor", "#444444")]),
    );
    let theme_style = builder.add(
        name("style", "Theme"),
        style_entry(
            "Theme",
            None,
            &[
                ("textColor", "#333333"),
                ("buttonStyle", "@style/Widget.Button"),
            ],
        ),
    );
    Fixture {
        engine: ResolutionEngine::new(Arc::new(builder.build())),
        text_color,
        button_style_attr,
        theme_style,
        widget_style,
    }
}

fn themed(fixture: &Fixture, registry: &ThemeRegistry) -> i64 {
    let handle = registry.create();
    fixture
        .engine
        .apply_theme_style(registry, handle, fixture.theme_style, false, "")
        .unwrap();
    handle
}

fn color(argb: u32) -> i32 {
    argb as i32
}

#[test]
fn test_explicit_attribute_beats_everything() {
    let f = fixture();
    let registry = ThemeRegistry::new();
    let handle = themed(&f, &registry);
    let theme = registry.snapshot(handle).unwrap();

    let set = AttributeSet::new().with_attribute(name("attr", "textColor"), "#111111");
    let value = f
        .engine
        .build_typed_value(Some(&set), f.text_color, f.button_style_attr, &theme, 0, "")
        .unwrap()
        .unwrap();

    assert_eq!(value.value_type, TYPE_INT_COLOR_ARGB8);
    assert_eq!(value.data, color(0xff111111));
}

#[test]
fn test_def_style_attr_beats_theme() {
    let f = fixture();
    let registry = ThemeRegistry::new();
    let handle = themed(&f, &registry);
    let theme = registry.snapshot(handle).unwrap();

    // No explicit value; the theme's buttonStyle names Widget.Button, whose
    // textColor shadows the theme's own.
    let value = f
        .engine
        .build_typed_value(None, f.text_color, f.button_style_attr, &theme, 0, "")
        .unwrap()
        .unwrap();

    assert_eq!(value.data, color(0xff222222));
}

#[test]
fn test_def_style_res_beats_theme_but_not_def_style_attr() {
    let f = fixture();
    let registry = ThemeRegistry::new();
    let handle = themed(&f, &registry);
    let theme = registry.snapshot(handle).unwrap();

    let from_res = f
        .engine
        .build_typed_value(None, f.text_color, 0, &theme, f.widget_style, "")
        .unwrap()
        .unwrap();
    assert_eq!(from_res.data, color(0xff444444));

    let from_attr = f
        .engine
        .build_typed_value(
            None,
            f.text_color,
            f.button_style_attr,
            &theme,
            f.widget_style,
            "",
        )
        .unwrap()
        .unwrap();
    assert_eq!(from_attr.data, color(0xff222222));
}

#[test]
fn test_theme_is_the_last_resort() {
    let f = fixture();
    let registry = ThemeRegistry::new();
    let handle = themed(&f, &registry);
    let theme = registry.snapshot(handle).unwrap();

    let value = f
        .engine
        .build_typed_value(None, f.text_color, 0, &theme, 0, "")
        .unwrap()
        .unwrap();
    assert_eq!(value.data, color(0xff333333));
}

#[test]
fn test_unset_attribute_without_theme_is_absent() {
    let f = fixture();
    let value = f
        .engine
        .build_typed_value(None, f.text_color, 0, &EmptyStyle, 0, "")
        .unwrap();
    assert!(value.is_none());
}

#[test]
fn test_null_explicit_value_yields_type_null() {
    let f = fixture();
    let set = AttributeSet::new().with_attribute(name("attr", "textColor"), "@null");
    // find_attribute_value returns the @null entry; the cascade treats it as
    // unset rather than producing a value.
    let value = f
        .engine
        .build_typed_value(Some(&set), f.text_color, 0, &EmptyStyle, 0, "")
        .unwrap();
    assert!(value.is_none());

    // Going through conversion directly, @null encodes as TYPE_NULL.
    let attribute = AttributeResource::new(name("attr", "textColor"), "@null", "com.example");
    let typed = f.engine.convert_and_fill(&attribute, "", true).unwrap().unwrap();
    assert_eq!(typed.value_type, TYPE_NULL);
}

#[test]
fn test_self_referential_theme_attribute_terminates() {
    let mut builder = ResourceLoader::builder();
    let text_color = builder.add(
        name("attr", "textColor"),
        attr_entry("textColor", "color|reference"),
    );
    let theme_style = builder.add(
        name("style", "Theme"),
        style_entry("Theme", None, &[("textColor", "?attr/textColor")]),
    );
    let engine = ResolutionEngine::new(Arc::new(builder.build()));

    let registry = ThemeRegistry::new();
    let handle = registry.create();
    engine
        .apply_theme_style(&registry, handle, theme_style, false, "")
        .unwrap();

    let value = engine
        .theme_value(&registry, handle, text_color, "", true)
        .unwrap();
    assert!(value.is_none());
}

#[test]
fn test_first_applied_style_wins_unless_forced() {
    let mut builder = ResourceLoader::builder();
    let text_color = builder.add(
        name("attr", "textColor"),
        attr_entry("textColor", "color"),
    );
    let light = builder.add(
        name("style", "Theme.Light"),
        style_entry("Theme.Light", Some(""), &[("textColor", "#111111")]),
    );
    let dark = builder.add(
        name("style", "Theme.Dark"),
        style_entry("Theme.Dark", Some(""), &[("textColor", "#999999")]),
    );
    let engine = ResolutionEngine::new(Arc::new(builder.build()));
    let registry = ThemeRegistry::new();

    let handle = registry.create();
    engine
        .apply_theme_style(&registry, handle, light, false, "")
        .unwrap();
    engine
        .apply_theme_style(&registry, handle, dark, false, "")
        .unwrap();
    let value = engine
        .theme_value(&registry, handle, text_color, "", true)
        .unwrap()
        .unwrap();
    assert_eq!(value.data, 0xff111111u32 as i32);

    engine
        .apply_theme_style(&registry, handle, dark, true, "")
        .unwrap();
    let value = engine
        .theme_value(&registry, handle, text_color, "", true)
        .unwrap()
        .unwrap();
    assert_eq!(value.data, 0xff999999u32 as i32);
}

#[test]
fn test_theme_copy_is_a_snapshot() {
    let mut builder = ResourceLoader::builder();
    let text_color = builder.add(
        name("attr", "textColor"),
        attr_entry("textColor", "color"),
    );
    let light = builder.add(
        name("style", "Theme.Light"),
        style_entry("Theme.Light", Some(""), &[("textColor", "#111111")]),
    );
    let dark = builder.add(
        name("style", "Theme.Dark"),
        style_entry("Theme.Dark", Some(""), &[("textColor", "#999999")]),
    );
    let engine = ResolutionEngine::new(Arc::new(builder.build()));
    let registry = ThemeRegistry::new();

    let source = registry.create();
    engine
        .apply_theme_style(&registry, source, light, false, "")
        .unwrap();

    let dest = registry.create();
    registry.copy(dest, source).unwrap();
    engine
        .apply_theme_style(&registry, source, dark, true, "")
        .unwrap();

    // The copy keeps the state at copy time.
    let value = engine
        .theme_value(&registry, dest, text_color, "", true)
        .unwrap()
        .unwrap();
    assert_eq!(value.data, 0xff111111u32 as i32);
}

#[test]
fn test_attrs_to_typed_array_layout() {
    use resource_resolver_core::engine::{STYLE_DATA, STYLE_NUM_ENTRIES, STYLE_TYPE};
    use resource_resolver_core::engine::typed_value::TYPE_STRING;

    let mut builder = ResourceLoader::builder();
    let text_color = builder.add(
        name("attr", "textColor"),
        attr_entry("textColor", "color"),
    );
    let text = builder.add(name("attr", "text"), attr_entry("text", "string"));
    let missing = builder.add(name("attr", "hint"), attr_entry("hint", "string"));
    let engine = ResolutionEngine::new(Arc::new(builder.build()));

    let set = AttributeSet::new()
        .with_attribute(name("attr", "textColor"), "#111111")
        .with_attribute(name("attr", "text"), "hello");

    let attrs = [text_color, text, missing];
    let array = engine
        .attrs_to_typed_array(Some(&set), &attrs, 0, &EmptyStyle, 0, "")
        .unwrap();

    assert_eq!(array.data.len(), attrs.len() * STYLE_NUM_ENTRIES);
    assert_eq!(array.data[STYLE_TYPE], TYPE_INT_COLOR_ARGB8);
    assert_eq!(array.data[STYLE_DATA], 0xff111111u32 as i32);

    let second = STYLE_NUM_ENTRIES;
    assert_eq!(array.data[second + STYLE_TYPE], TYPE_STRING);
    // String slots carry the attribute index; the text lives in the side table.
    assert_eq!(array.data[second + STYLE_DATA], 1);
    assert_eq!(array.string_data[1].as_deref(), Some("hello"));

    // Two attributes resolved, the third is unset.
    assert_eq!(array.indices[0], 2);
    assert_eq!(&array.indices[1..3], &[0, 1]);
    assert!(array.string_data[2].is_none());
}
