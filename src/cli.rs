use crate::res::attr_data::AttrData;
use crate::res::attribute::AttributeResource;
use crate::res::loader::{ResourceLoader, ResourceTableBuilder};
use crate::res::res_name::ResName;
use crate::res::res_type::ResType;
use crate::res::style::StyleData;
use crate::res::typed_resource::{ResData, TypedResource};
use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Parser, Debug)]
#[command(name = "resource-resolver")]
#[command(about = "Resolve resource references against a resource table", long_about = None)]
pub struct Args {
    /// Resource table file (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub table: PathBuf,

    /// Resource to resolve, e.g. "color/primary" or "@com.example:string/app_name"
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Qualifier context, e.g. "en-port" or "fr-land-hdpi"
    #[arg(short, long, default_value = "")]
    pub qualifiers: String,

    /// Package assumed for unqualified names (overrides the table's package)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Theme style to apply, e.g. "style/Theme.Light". Can be repeated;
    /// earlier styles win unless a later one is forced with a "!" prefix.
    #[arg(short, long, value_name = "STYLE")]
    pub theme: Vec<String>,

    /// Fail on unresolvable references instead of reporting absent values
    #[arg(long)]
    pub strict: bool,

    /// Output file path (prints to stdout if not specified)
    #[arg(short = 'O', long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Output format (json, text)
    #[arg(short = 'f', long, default_value = "json")]
    pub format: OutputFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short = 'Q', long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if !self.table.exists() {
            anyhow::bail!("Table file does not exist: {}", self.table.display());
        }
        table_format(&self.table)?;
        Ok(())
    }
}

fn table_format(path: &Path) -> Result<&'static str> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok("json"),
        Some("yaml") | Some("yml") => Ok("yaml"),
        other => anyhow::bail!(
            "Unsupported table format {:?} (expected .json, .yaml or .yml)",
            other.unwrap_or("")
        ),
    }
}

/// On-disk resource table. One document per package; resource names may still
/// reference other packages explicitly.
#[derive(Debug, Deserialize)]
pub struct TableDocument {
    pub package: String,
    pub resources: Vec<ResourceEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ResourceEntry {
    /// "type/name" or "package:type/name"
    pub name: String,
    /// Fixed resource id; auto-assigned when absent.
    #[serde(default)]
    pub id: Option<i32>,
    pub values: Vec<ResourceValue>,
}

/// One qualifier variant of an entry. Exactly one of the payload fields
/// should be set; `value` wins when several are.
#[derive(Debug, Deserialize)]
pub struct ResourceValue {
    #[serde(default)]
    pub qualifiers: String,
    /// Declared type; inferred from the value's syntax when absent.
    #[serde(rename = "type", default)]
    pub res_type: Option<ResType>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub attr: Option<AttrData>,
    #[serde(default)]
    pub style: Option<StyleValue>,
    #[serde(default)]
    pub items: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct StyleValue {
    #[serde(default)]
    pub parent: Option<String>,
    /// Attribute name (bare or "package:name") to raw value.
    #[serde(default)]
    pub items: BTreeMap<String, String>,
}

pub fn load_table(path: &Path) -> Result<TableDocument> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read table file: {}", path.display()))?;
    let document = match table_format(path)? {
        "json" => serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON table: {}", path.display()))?,
        _ => serde_yaml::from_str(&raw)
            .with_context(|| format!("Invalid YAML table: {}", path.display()))?,
    };
    Ok(document)
}

/// Turn a parsed table document into the immutable loader tables.
pub fn build_loader(document: &TableDocument) -> Result<ResourceLoader> {
    let mut builder = ResourceTableBuilder::new();

    for entry in &document.resources {
        let res_name = ResName::qualify(&entry.name, &document.package, None)
            .with_context(|| format!("Malformed resource name: {}", entry.name))?;

        for variant in &entry.values {
            let typed = to_typed_resource(&res_name, variant)
                .with_context(|| format!("Malformed entry for {}", res_name.full_name()))?;
            match entry.id {
                Some(id) => builder.add_with_id(res_name.clone(), id, typed),
                None => {
                    builder.add(res_name.clone(), typed);
                }
            }
        }
    }

    Ok(builder.build())
}

fn to_typed_resource(res_name: &ResName, variant: &ResourceValue) -> Result<TypedResource> {
    let qualifiers = &variant.qualifiers;

    if let Some(value) = &variant.value {
        let res_type = variant
            .res_type
            .or_else(|| ResType::from_type_name(&res_name.type_name))
            .unwrap_or_else(|| ResType::infer_from_value(value));
        return Ok(TypedResource::inline(value.clone(), res_type, qualifiers));
    }
    if let Some(path) = &variant.file {
        let res_type = variant.res_type.unwrap_or(ResType::File);
        return Ok(TypedResource::file(path.clone(), res_type, qualifiers));
    }
    if let Some(attr) = &variant.attr {
        return Ok(TypedResource::new(
            ResData::Attr(attr.clone()),
            ResType::AttrData,
            qualifiers,
        ));
    }
    if let Some(style) = &variant.style {
        let mut data = StyleData::new(&res_name.name, style.parent.clone());
        for (attr_name, value) in &style.items {
            let attr_res_name = ResName::qualify(attr_name, &res_name.package_name, Some("attr"))
                .with_context(|| format!("Malformed style item name: {attr_name}"))?;
            data.add(AttributeResource::new(
                attr_res_name,
                value.clone(),
                res_name.package_name.clone(),
            ));
        }
        return Ok(TypedResource::new(
            ResData::Style(data),
            ResType::Style,
            qualifiers,
        ));
    }
    if let Some(items) = &variant.items {
        let children = items
            .iter()
            .map(|value| {
                TypedResource::inline(value.clone(), ResType::infer_from_value(value), qualifiers)
            })
            .collect();
        let res_type = variant.res_type.unwrap_or(ResType::CharSequenceArray);
        return Ok(TypedResource::new(
            ResData::Items(children),
            res_type,
            qualifiers,
        ));
    }

    anyhow::bail!("Entry has no value, file, attr, style or items payload")
}
