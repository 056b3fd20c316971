//! The reference-chasing resolution engine.
//!
//! Given a starting resource id, attribute, or raw value, the engine
//! repeatedly dereferences `@type/name` and `?attr/name` references through
//! the loader and the active theme until it reaches a concrete value, an
//! absent result, or a circular-reference stop. All loops are bounded by
//! visited sets so cycles fail fast instead of recursing unboundedly.

pub mod converter;
pub mod float_parser;
pub mod theme;
pub mod typed_value;

pub use converter::Converter;
pub use theme::ThemeRegistry;
pub use typed_value::TypedValue;

use crate::error::{Error, ResolveError};
use crate::res::attribute::{self, AttributeResource};
use crate::res::index::is_framework_id;
use crate::res::loader::ResourceLoader;
use crate::res::res_name::ResName;
use crate::res::res_type::ResType;
use crate::res::style::{Style, StyleChain, StyleResolver};
use crate::res::typed_resource::{ResData, TypedResource};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

// Flat typed-array layout, six slots per attribute.
pub const STYLE_NUM_ENTRIES: usize = 6;
pub const STYLE_TYPE: usize = 0;
pub const STYLE_DATA: usize = 1;
pub const STYLE_ASSET_COOKIE: usize = 2;
pub const STYLE_RESOURCE_ID: usize = 3;
pub const STYLE_CHANGING_CONFIGURATIONS: usize = 4;
pub const STYLE_DENSITY: usize = 5;

// Reference types whose unresolvable targets still yield a usable
// TYPE_REFERENCE result, the id itself is all the caller needs.
const ID_LIKE_TYPES: [&str; 7] = [
    "id",
    "layout",
    "dimen",
    "transition",
    "interpolator",
    "menu",
    "raw",
];

/// One attribute assignment in a caller-supplied attribute set.
#[derive(Debug, Clone)]
pub struct AttributeSetEntry {
    pub name: ResName,
    pub value: String,
    /// Reference id pre-resolved by the caller, when the value is a
    /// resource reference.
    pub reference_res_id: Option<i32>,
}

/// Caller-supplied attribute assignments for one resolution run, plus the
/// optional `style="..."` reference.
#[derive(Debug, Clone, Default)]
pub struct AttributeSet {
    entries: Vec<AttributeSetEntry>,
    style_attribute: i32,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: ResName, value: impl Into<String>) -> Self {
        self.entries.push(AttributeSetEntry {
            name,
            value: value.into(),
            reference_res_id: None,
        });
        self
    }

    pub fn with_reference(mut self, name: ResName, value: impl Into<String>, res_id: i32) -> Self {
        self.entries.push(AttributeSetEntry {
            name,
            value: value.into(),
            reference_res_id: Some(res_id),
        });
        self
    }

    /// Resource id of the style named by the set's `style="..."` attribute.
    pub fn with_style_attribute(mut self, style_res_id: i32) -> Self {
        self.style_attribute = style_res_id;
        self
    }

    pub fn entries(&self) -> &[AttributeSetEntry] {
        &self.entries
    }

    pub fn style_attribute(&self) -> i32 {
        self.style_attribute
    }
}

/// Raw positional encoding of a resolved attribute array: six `i32` slots per
/// attribute plus a string table and an index table of the resolved slots.
#[derive(Debug, Clone, Default)]
pub struct TypedArrayData {
    pub data: Vec<i32>,
    pub string_data: Vec<Option<String>>,
    pub indices: Vec<i32>,
}

/// Orchestrates loader lookups, reference chasing, the style/theme cascade,
/// and typed conversion. Read-only over the loader tables; safe to share.
pub struct ResolutionEngine {
    loader: Arc<ResourceLoader>,
    strict_errors: bool,
}

impl ResolutionEngine {
    pub fn new(loader: Arc<ResourceLoader>) -> Self {
        Self {
            loader,
            strict_errors: false,
        }
    }

    /// Raise unresolved references as hard errors instead of logging them and
    /// treating the value as absent.
    pub fn with_strict_errors(mut self, strict_errors: bool) -> Self {
        self.strict_errors = strict_errors;
        self
    }

    pub fn loader(&self) -> &ResourceLoader {
        &self.loader
    }

    fn res_name(&self, res_id: i32) -> Result<ResName, ResolveError> {
        self.loader
            .resource_index()
            .res_name(res_id)
            .cloned()
            .ok_or_else(|| {
                ResolveError::id_not_found(res_id, self.loader.resource_index().packages())
            })
    }

    fn strict_error(&self, err: ResolveError) -> Result<(), ResolveError> {
        if self.strict_errors {
            Err(err)
        } else {
            warn!("{err}");
            Ok(())
        }
    }

    // ---- name services -------------------------------------------------

    pub fn resource_name(&self, res_id: i32) -> Result<String, ResolveError> {
        Ok(self.res_name(res_id)?.full_name())
    }

    pub fn resource_package_name(&self, res_id: i32) -> Result<String, ResolveError> {
        Ok(self.res_name(res_id)?.package_name)
    }

    pub fn resource_type_name(&self, res_id: i32) -> Result<String, ResolveError> {
        Ok(self.res_name(res_id)?.type_name)
    }

    pub fn resource_entry_name(&self, res_id: i32) -> Result<String, ResolveError> {
        Ok(self.res_name(res_id)?.name)
    }

    /// Id for a textual name, or 0 when the resource does not exist. `id`
    /// entries are exempt from the existence check since they need no value.
    pub fn resource_identifier(
        &self,
        name: &str,
        def_type: Option<&str>,
        def_package: &str,
        qualifiers: &str,
    ) -> i32 {
        let Some(res_name) = ResName::qualify(name, def_package, def_type) else {
            return 0;
        };
        if res_name.type_name != "id" && !self.loader.has_value(&res_name, qualifiers) {
            return 0;
        }
        self.loader
            .resource_index()
            .resource_id(&res_name)
            .unwrap_or(0)
    }

    // ---- reference chasing ---------------------------------------------

    /// Walk `@`-references starting from `value` until a terminal value is
    /// reached. Returns the terminal value (or absent) and the name it was
    /// found under. Idempotent on already-concrete values.
    fn chase(
        &self,
        mut value: Option<TypedResource>,
        qualifiers: &str,
        mut res_name: ResName,
    ) -> (Option<TypedResource>, ResName) {
        let mut visited = HashSet::new();
        visited.insert(res_name.clone());

        while let Some(current) = &value {
            if !current.is_reference() {
                break;
            }
            let raw = current.as_str().unwrap_or_default();
            if attribute::is_null_value(raw) || attribute::is_empty_value(raw) {
                value = None;
                break;
            }
            let reference = raw[1..].replace('+', "");
            let Some(next) = ResName::qualify_from(&reference, &res_name) else {
                value = None;
                break;
            };
            if !visited.insert(next.clone()) {
                warn!(name = %next.full_name(), "circular resource reference");
                value = None;
                break;
            }
            res_name = next;
            value = self.loader.get_value(&res_name, qualifiers);
        }

        (value, res_name)
    }

    /// Dereference a value to its terminal form under `res_name`'s package
    /// context.
    pub fn resolve_value(
        &self,
        value: Option<TypedResource>,
        qualifiers: &str,
        res_name: &ResName,
    ) -> Option<TypedResource> {
        self.chase(value, qualifiers, res_name.clone()).0
    }

    /// The name a reference chain ultimately lands on.
    pub fn resolve_res_name(&self, res_name: &ResName, qualifiers: &str) -> Option<ResName> {
        let value = self.loader.get_value(res_name, qualifiers);
        let (value, final_name) = self.chase(value, qualifiers, res_name.clone());
        value.map(|_| final_name)
    }

    /// Look up a resource by id and chase references to the terminal value.
    pub fn get_and_resolve(
        &self,
        res_id: i32,
        qualifiers: &str,
        resolve_refs: bool,
    ) -> Result<Option<TypedResource>, ResolveError> {
        let res_name = self.res_name(res_id)?;
        let value = self.loader.get_value(&res_name, qualifiers);
        if !resolve_refs {
            return Ok(value);
        }
        Ok(self.resolve_value(value, qualifiers, &res_name))
    }

    // ---- converter-backed accessors ------------------------------------

    fn converter_for(value: &TypedResource) -> Converter {
        // XML-backed resources resolve to their file path regardless of the
        // declared type.
        if value.is_file() && value.as_str().is_some_and(|path| path.ends_with(".xml")) {
            return Converter::FromFilePath;
        }
        Converter::for_type(value.res_type())
    }

    pub fn resource_text(&self, res_id: i32, qualifiers: &str) -> Result<Option<String>, Error> {
        let Some(value) = self.get_and_resolve(res_id, qualifiers, true)? else {
            return Ok(None);
        };
        Ok(value.as_str().map(String::from))
    }

    pub fn resource_text_array(
        &self,
        res_id: i32,
        qualifiers: &str,
    ) -> Result<Option<Vec<String>>, Error> {
        let Some(value) = self.get_and_resolve(res_id, qualifiers, true)? else {
            return Ok(None);
        };
        let res_name = self.res_name(res_id)?;
        let items = Self::converter_for(&value).items(&value)?;
        let mut strings = Vec::with_capacity(items.len());
        for item in items {
            let resolved = self
                .resolve_value(Some(item), qualifiers, &res_name)
                .ok_or_else(|| {
                    ResolveError::unresolved(res_name.full_name(), "array item", qualifiers)
                })?;
            strings.push(Self::converter_for(&resolved).as_char_sequence(&resolved)?);
        }
        Ok(Some(strings))
    }

    pub fn array_int_resource(
        &self,
        res_id: i32,
        qualifiers: &str,
    ) -> Result<Option<Vec<i32>>, Error> {
        let Some(value) = self.get_and_resolve(res_id, qualifiers, true)? else {
            return Ok(None);
        };
        let res_name = self.res_name(res_id)?;
        let items = Self::converter_for(&value).items(&value)?;
        let mut ints = Vec::with_capacity(items.len());
        for item in items {
            let resolved = self
                .resolve_value(Some(item), qualifiers, &res_name)
                .ok_or_else(|| {
                    ResolveError::unresolved(res_name.full_name(), "array item", qualifiers)
                })?;
            ints.push(Self::converter_for(&resolved).as_int(&resolved)?);
        }
        Ok(Some(ints))
    }

    // ---- styles ---------------------------------------------------------

    /// Resolve a style resource into its flattened parent chain.
    pub fn resolve_style(
        &self,
        style_name: &ResName,
        theme: &dyn Style,
        qualifiers: &str,
    ) -> Option<StyleChain> {
        StyleResolver::new(&self.loader, qualifiers).resolve(style_name, theme)
    }

    pub fn resolve_style_by_id(
        &self,
        style_res_id: i32,
        theme: &dyn Style,
        qualifiers: &str,
    ) -> Result<Option<StyleChain>, ResolveError> {
        let style_name = self.res_name(style_res_id)?;
        Ok(self.resolve_style(&style_name, theme, qualifiers))
    }

    // ---- typed conversion ----------------------------------------------

    /// Dereference `attribute` and decode it into a typed value.
    ///
    /// Resource references are chased through the loader; file-backed targets
    /// terminate as string-typed file paths; textual targets go through the
    /// attr's declared formats in order, or through syntax inference when the
    /// attr itself is unknown to the loaded table.
    pub fn convert_and_fill(
        &self,
        attribute: &AttributeResource,
        qualifiers: &str,
        resolve_refs: bool,
    ) -> Result<Option<TypedValue>, Error> {
        let mut out = TypedValue::default();

        if attribute.is_null() {
            out.value_type = typed_value::TYPE_NULL;
            out.data = typed_value::DATA_NULL_UNDEFINED;
            return Ok(Some(out));
        }
        if attribute.is_empty() {
            out.value_type = typed_value::TYPE_NULL;
            out.data = typed_value::DATA_NULL_EMPTY;
            return Ok(Some(out));
        }

        // String positions aren't stable across lookups, so every result
        // carries a fresh cookie.
        out.asset_cookie = converter::next_string_cookie();

        if attribute.is_style_reference() {
            return Ok(Some(out));
        }

        let mut attribute = attribute.clone();
        let mut visited = HashSet::new();

        while attribute.is_resource_reference() {
            let res_name = attribute
                .resource_reference()
                .ok_or_else(|| ResolveError::not_found(attribute.value.clone()))?;
            let resource_id = attribute
                .reference_res_id
                .or_else(|| self.loader.resource_index().resource_id(&res_name))
                .ok_or_else(|| ResolveError::not_found(res_name.full_name()))?;

            out.value_type = typed_value::TYPE_REFERENCE;
            if !resolve_refs {
                out.data = resource_id;
                return Ok(Some(out));
            }
            out.resource_id = resource_id;

            if !visited.insert(res_name.clone()) {
                warn!(name = %res_name.full_name(), "circular resource reference");
                return Ok(None);
            }

            match self.loader.get_value(&res_name, qualifiers) {
                None => {
                    self.strict_error(ResolveError::unresolved(
                        res_name.full_name(),
                        attribute.to_string(),
                        qualifiers,
                    ))?;
                    if ID_LIKE_TYPES.contains(&res_name.type_name.as_str()) {
                        // The reference id is good enough for these types.
                        return Ok(Some(out));
                    }
                    return Ok(None);
                }
                Some(dereferenced) => {
                    if dereferenced.is_file() {
                        out.value_type = typed_value::TYPE_STRING;
                        out.data = 0;
                        out.asset_cookie = converter::next_string_cookie();
                        out.string = dereferenced.as_str().map(String::from);
                        return Ok(Some(out));
                    }
                    if let ResData::String(text) = dereferenced.data() {
                        attribute = AttributeResource::new(
                            attribute.res_name.clone(),
                            text.clone(),
                            res_name.package_name.clone(),
                        );
                        if attribute.is_resource_reference() {
                            continue;
                        }
                        Converter::for_type(dereferenced.res_type())
                            .fill_typed_value(&attribute.value, &mut out);
                        return Ok(Some(out));
                    }
                    // Non-textual payloads fall through to format handling.
                    break;
                }
            }
        }

        if attribute.is_null() {
            out.value_type = typed_value::TYPE_NULL;
            return Ok(Some(out));
        }

        let attr_type_data = self.loader.get_value(&attribute.res_name, qualifiers);
        if let Some(ResData::Attr(attr_data)) = attr_type_data.as_ref().map(|v| v.data()) {
            for format in attr_data.formats() {
                if format == "reference" {
                    // Handled by the dereference loop above.
                    continue;
                }
                let converter = Converter::for_attr_format(attr_data, format)?;
                if converter.fill_typed_value(&attribute.value, &mut out) {
                    return Ok(Some(out));
                }
            }
            // Every declared format failed to parse the value.
            Ok(None)
        } else {
            // The attr isn't in the loaded table (e.g. added in a newer
            // platform revision); infer the type from the value's syntax.
            let res_type = ResType::infer_from_value(&attribute.value);
            Converter::for_type(res_type).fill_typed_value(&attribute.value, &mut out);
            Ok(Some(out))
        }
    }

    // ---- style/theme cascade -------------------------------------------

    /// Find the value for `res_id` through the cascade, in fixed precedence
    /// order: explicit set, style= chain, defStyleAttr style, defStyleRes
    /// style, theme.
    fn find_attribute_value(
        &self,
        res_id: i32,
        set: Option<&AttributeSet>,
        style_attr_style: Option<&StyleChain>,
        def_style_from_attr: Option<&StyleChain>,
        def_style_from_res: Option<&StyleChain>,
        theme: &dyn Style,
    ) -> Option<AttributeResource> {
        if let Some(set) = set {
            for entry in set.entries() {
                if self.loader.resource_index().resource_id(&entry.name) == Some(res_id) {
                    let context_package = if is_framework_id(res_id) {
                        "android"
                    } else {
                        entry.name.package_name.as_str()
                    };
                    let mut found = AttributeResource::new(
                        entry.name.clone(),
                        entry.value.clone(),
                        context_package,
                    );
                    if let Some(reference_res_id) = entry.reference_res_id {
                        if found.is_resource_reference() {
                            found = found.with_reference_res_id(reference_res_id);
                        }
                    }
                    return Some(found);
                }
            }
        }

        let attr_name = self.loader.resource_index().res_name(res_id)?;

        for style in [style_attr_style, def_style_from_attr, def_style_from_res]
            .into_iter()
            .flatten()
        {
            if let Some(found) = style.attr_value(attr_name) {
                return Some(found);
            }
        }

        theme.attr_value(attr_name)
    }

    /// Resolve one attribute through the full cascade into a typed value.
    ///
    /// Precedence steps run strictly in order; a later source is never
    /// consulted once an earlier one yields a value. `None` means the
    /// attribute is unset, which is not an error.
    pub fn build_typed_value(
        &self,
        set: Option<&AttributeSet>,
        res_id: i32,
        def_style_attr: i32,
        theme: &dyn Style,
        def_style_res: i32,
        qualifiers: &str,
    ) -> Result<Option<TypedValue>, Error> {
        let mut style_attr_style: Option<StyleChain> = None;
        let mut def_style_from_attr: Option<StyleChain> = None;
        let mut def_style_from_res: Option<StyleChain> = None;

        if def_style_attr != 0 {
            // The theme names the default style, e.g. attr/buttonStyle points
            // at @style/Widget.Button.
            let def_style_name = self.res_name(def_style_attr)?;
            if let Some(mut def_style_attribute) = theme.attr_value(&def_style_name) {
                let mut visited = HashSet::new();
                let mut dangling = false;
                while def_style_attribute.is_style_reference() {
                    let Some(target) = def_style_attribute.style_reference() else {
                        dangling = true;
                        break;
                    };
                    if !visited.insert(target.clone()) {
                        warn!(name = %target.full_name(), "circular default-style reference");
                        dangling = true;
                        break;
                    }
                    match theme.attr_value(&target) {
                        Some(other) => def_style_attribute = other,
                        None => {
                            self.strict_error(ResolveError::unresolved(
                                target.full_name(),
                                "theme",
                                qualifiers,
                            ))?;
                            dangling = true;
                            break;
                        }
                    }
                }
                if !dangling && def_style_attribute.is_resource_reference() {
                    if let Some(def_style_res_name) = def_style_attribute.resource_reference() {
                        def_style_from_attr =
                            self.resolve_style(&def_style_res_name, theme, qualifiers);
                    }
                }
            }
        }

        if let Some(set) = set {
            if set.style_attribute() != 0 {
                let mut style_name = self.res_name(set.style_attribute())?;
                let mut visited = HashSet::new();
                let mut dangling = false;
                while style_name.type_name == "attr" {
                    if !visited.insert(style_name.clone()) {
                        warn!(name = %style_name.full_name(), "circular style attribute");
                        dangling = true;
                        break;
                    }
                    let Some(attr_value) = theme.attr_value(&style_name) else {
                        self.strict_error(ResolveError::unresolved(
                            style_name.full_name(),
                            "theme",
                            qualifiers,
                        ))?;
                        dangling = true;
                        break;
                    };
                    if let Some(reference) = attr_value.resource_reference() {
                        style_name = reference;
                    } else if let Some(reference) = attr_value.style_reference() {
                        style_name = reference;
                    } else {
                        break;
                    }
                }
                if !dangling {
                    style_attr_style = self.resolve_style(&style_name, theme, qualifiers);
                }
            }
        }

        if def_style_res != 0 {
            let mut style_name = self.res_name(def_style_res)?;
            if style_name.type_name == "attr" {
                // Indirect default style: the res id names an attr whose
                // resolved value names the style.
                let attribute_value = self.find_attribute_value(
                    def_style_res,
                    set,
                    style_attr_style.as_ref(),
                    def_style_from_attr.as_ref(),
                    def_style_from_attr.as_ref(),
                    theme,
                );
                if let Some(attribute_value) = attribute_value {
                    if let Some(target) = attribute_value.style_reference() {
                        if let Some(through_theme) = theme
                            .attr_value(&target)
                            .and_then(|a| a.resource_reference())
                        {
                            style_name = through_theme;
                        }
                    } else if let Some(reference) = attribute_value.resource_reference() {
                        style_name = reference;
                    }
                }
            }
            def_style_from_res = self.resolve_style(&style_name, theme, qualifiers);
        }

        let mut found = self.find_attribute_value(
            res_id,
            set,
            style_attr_style.as_ref(),
            def_style_from_attr.as_ref(),
            def_style_from_res.as_ref(),
            theme,
        );

        let mut visited = HashSet::new();
        while let Some(attribute) = &found {
            if !attribute.is_style_reference() {
                break;
            }
            let Some(other_attr_name) = attribute.style_reference() else {
                found = None;
                break;
            };
            if attribute.res_name == other_attr_name || !visited.insert(other_attr_name.clone()) {
                info!(
                    name = %other_attr_name.full_name(),
                    "circular style reference, treating attribute as unset"
                );
                return Ok(None);
            }
            let res_name = self.res_name(res_id)?;
            match theme.attr_value(&other_attr_name) {
                Some(other) => {
                    found = Some(AttributeResource::new(
                        res_name,
                        other.value.clone(),
                        other.context_package.clone(),
                    ));
                }
                None => {
                    self.strict_error(ResolveError::unresolved(
                        other_attr_name.full_name(),
                        format!("theme, while resolving {}", res_name.full_name()),
                        qualifiers,
                    ))?;
                    found = None;
                }
            }
        }

        match found {
            Some(attribute) if !attribute.is_null() => {
                self.convert_and_fill(&attribute, qualifiers, true)
            }
            _ => Ok(None),
        }
    }

    /// Resolve an attribute array into the flat positional encoding used by
    /// downstream callers.
    pub fn attrs_to_typed_array(
        &self,
        set: Option<&AttributeSet>,
        attrs: &[i32],
        def_style_attr: i32,
        theme: &dyn Style,
        def_style_res: i32,
        qualifiers: &str,
    ) -> Result<TypedArrayData, Error> {
        let mut data = vec![0i32; attrs.len() * STYLE_NUM_ENTRIES];
        let mut string_data: Vec<Option<String>> = vec![None; attrs.len()];
        let mut indices = vec![0i32; attrs.len() + 1];
        let mut next_index = 0;

        for (i, &attr_id) in attrs.iter().enumerate() {
            let offset = i * STYLE_NUM_ENTRIES;
            let typed_value = self.build_typed_value(
                set,
                attr_id,
                def_style_attr,
                theme,
                def_style_res,
                qualifiers,
            )?;
            if let Some(typed_value) = typed_value {
                data[offset + STYLE_TYPE] = typed_value.value_type;
                data[offset + STYLE_DATA] = if typed_value.value_type == typed_value::TYPE_STRING {
                    // Strings live in the side table, indexed by slot.
                    i as i32
                } else {
                    typed_value.data
                };
                data[offset + STYLE_ASSET_COOKIE] = typed_value.asset_cookie;
                data[offset + STYLE_RESOURCE_ID] = typed_value.resource_id;
                data[offset + STYLE_CHANGING_CONFIGURATIONS] = 0;
                data[offset + STYLE_DENSITY] = 0;
                string_data[i] = typed_value.string;

                indices[next_index + 1] = i as i32;
                next_index += 1;
            }
        }

        indices[0] = next_index as i32;

        Ok(TypedArrayData {
            data,
            string_data,
            indices,
        })
    }

    // ---- theme operations ----------------------------------------------

    /// Resolve `style_res_id` and push it onto the theme's style stack.
    pub fn apply_theme_style(
        &self,
        registry: &ThemeRegistry,
        handle: i64,
        style_res_id: i32,
        force: bool,
        qualifiers: &str,
    ) -> Result<(), Error> {
        let theme = registry.snapshot(handle)?;
        let Some(chain) = self.resolve_style_by_id(style_res_id, &theme, qualifiers)? else {
            self.strict_error(ResolveError::unresolved(
                self.res_name(style_res_id)?.full_name(),
                "style table",
                qualifiers,
            ))?;
            return Ok(());
        };
        registry.apply(handle, chain, force)?;
        Ok(())
    }

    /// Value of a theme attribute, chasing style references with a circular
    /// guard, then converting to a typed value.
    pub fn theme_value(
        &self,
        registry: &ThemeRegistry,
        handle: i64,
        attr_id: i32,
        qualifiers: &str,
        resolve_refs: bool,
    ) -> Result<Option<TypedValue>, Error> {
        let res_name = self.res_name(attr_id)?;
        let theme = registry.snapshot(handle)?;

        let mut attr_value = theme.attr_value(&res_name);
        let mut visited = HashSet::new();
        while let Some(current) = &attr_value {
            if !current.is_style_reference() {
                break;
            }
            let Some(target) = current.style_reference() else {
                return Ok(None);
            };
            if current.res_name == target || !visited.insert(target.clone()) {
                info!(name = %target.full_name(), "circular theme attribute reference");
                return Ok(None);
            }
            attr_value = theme.attr_value(&target);
        }

        match attr_value {
            Some(attribute) => self.convert_and_fill(&attribute, qualifiers, resolve_refs),
            None => Ok(None),
        }
    }
}
