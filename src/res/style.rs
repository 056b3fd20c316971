use crate::res::attribute::AttributeResource;
use crate::res::loader::ResourceLoader;
use crate::res::res_name::ResName;
use crate::res::typed_resource::ResData;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A source of attribute values. Implemented by concrete style chains, the
/// empty style, and theme style sets.
pub trait Style {
    fn attr_value(&self, attr_name: &ResName) -> Option<AttributeResource>;
}

/// Declared entries of one style definition, in declaration order, plus an
/// optional parent reference (`@style/...`, `Parent.Name`, or `?attr/...`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleData {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub items: Vec<AttributeResource>,
}

impl StyleData {
    pub fn new(name: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            name: name.into(),
            parent,
            items: Vec::new(),
        }
    }

    pub fn add(&mut self, attribute: AttributeResource) {
        self.items.push(attribute);
    }

    pub fn attr_value(&self, attr_name: &ResName) -> Option<&AttributeResource> {
        self.items.iter().find(|item| &item.res_name == attr_name)
    }

    /// Implicit parent encoded in a dotted style name: `Widget.Button`'s
    /// parent is `Widget`. Only consulted when no explicit parent is set.
    fn implicit_parent(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(head, _)| head)
    }

    fn parent_reference(&self) -> Option<&str> {
        match &self.parent {
            Some(parent) if !parent.is_empty() => Some(parent),
            Some(_) => None,
            None => self.implicit_parent(),
        }
    }
}

/// Style that answers every lookup with "not found"; stands in for the theme
/// when no theme handle was supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyStyle;

impl Style for EmptyStyle {
    fn attr_value(&self, _attr_name: &ResName) -> Option<AttributeResource> {
        None
    }
}

/// A style definition flattened with its ancestors, nearest first.
#[derive(Debug, Clone)]
pub struct StyleChain {
    styles: Vec<StyleData>,
}

impl StyleChain {
    pub fn style_names(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(|s| s.name.as_str())
    }
}

impl Style for StyleChain {
    fn attr_value(&self, attr_name: &ResName) -> Option<AttributeResource> {
        self.styles
            .iter()
            .find_map(|style| style.attr_value(attr_name).cloned())
    }
}

#[derive(Debug, Clone)]
struct OverlayedStyle {
    chain: StyleChain,
    force: bool,
}

/// Stack of styles applied to a theme. The first applied style provides an
/// attribute unless a later style was applied with `force`.
#[derive(Debug, Clone, Default)]
pub struct ThemeStyleSet {
    styles: Vec<OverlayedStyle>,
}

impl ThemeStyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, chain: StyleChain, force: bool) {
        self.styles.push(OverlayedStyle { chain, force });
    }

    pub fn copy(&self) -> Self {
        self.clone()
    }
}

impl Style for ThemeStyleSet {
    fn attr_value(&self, attr_name: &ResName) -> Option<AttributeResource> {
        let mut found: Option<AttributeResource> = None;
        for overlayed in &self.styles {
            if let Some(attribute) = overlayed.chain.attr_value(attr_name) {
                if found.is_none() || overlayed.force {
                    found = Some(attribute);
                }
            }
        }
        found
    }
}

/// Resolves a style name into a flattened chain by walking parent references
/// through the loader, dereferencing `?attr/` parents against the theme.
pub struct StyleResolver<'a> {
    loader: &'a ResourceLoader,
    qualifiers: &'a str,
}

impl<'a> StyleResolver<'a> {
    pub fn new(loader: &'a ResourceLoader, qualifiers: &'a str) -> Self {
        Self { loader, qualifiers }
    }

    /// Look up `style_name` and follow its parent chain. Cycles stop the walk
    /// with a warning; a dangling parent stops it silently (the chain built so
    /// far still answers lookups).
    pub fn resolve(&self, style_name: &ResName, theme: &dyn Style) -> Option<StyleChain> {
        let first = self.style_data(style_name)?;
        let mut styles = vec![first];
        let mut visited = vec![style_name.clone()];

        while let Some(parent_ref) = styles
            .last()
            .and_then(|s| s.parent_reference().map(String::from))
        {
            let Some(parent_name) = self.parent_res_name(&parent_ref, style_name, theme) else {
                break;
            };
            if visited.contains(&parent_name) {
                warn!(
                    style = %style_name.full_name(),
                    parent = %parent_name.full_name(),
                    "circular parent chain in style"
                );
                break;
            }
            let Some(parent_data) = self.style_data(&parent_name) else {
                break;
            };
            visited.push(parent_name);
            styles.push(parent_data);
        }

        Some(StyleChain { styles })
    }

    fn style_data(&self, style_name: &ResName) -> Option<StyleData> {
        let value = self.loader.get_value(style_name, self.qualifiers)?;
        match value.data() {
            ResData::Style(style_data) => Some(style_data.clone()),
            _ => None,
        }
    }

    fn parent_res_name(
        &self,
        parent_ref: &str,
        base: &ResName,
        theme: &dyn Style,
    ) -> Option<ResName> {
        if parent_ref.starts_with('?') {
            // Theme-dependent parent: resolve the attr through the theme first.
            let attr_name = ResName::qualify(&parent_ref[1..], &base.package_name, Some("attr"))?;
            let attribute = theme.attr_value(&attr_name)?;
            return attribute.resource_reference();
        }
        ResName::qualify(
            parent_ref.trim_start_matches('@'),
            &base.package_name,
            Some("style"),
        )
    }
}
