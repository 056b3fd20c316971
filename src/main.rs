use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use resource_resolver_core::cli::{self, OutputFormat};
use resource_resolver_core::engine::{ResolutionEngine, ThemeRegistry, TypedValue};
use resource_resolver_core::logging::{self, Verbosity};
use resource_resolver_core::res::attribute::AttributeResource;
use resource_resolver_core::res::res_name::ResName;
use std::sync::Arc;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    args.validate().context("Invalid arguments")?;
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));

    let document = cli::load_table(&args.table)?;
    let package = args
        .package
        .clone()
        .unwrap_or_else(|| document.package.clone());
    let loader = Arc::new(cli::build_loader(&document)?);
    let engine = ResolutionEngine::new(loader).with_strict_errors(args.strict);

    let res_name = ResName::qualify(&args.name, &package, None)
        .with_context(|| format!("Malformed resource name: {}", args.name))?;

    let typed_value = if args.theme.is_empty() {
        resolve_plain(&engine, &res_name, &args.qualifiers)?
    } else {
        resolve_with_theme(&engine, &res_name, &package, &args)?
    };

    let rendered = render(typed_value.as_ref(), args.format)?;
    match &args.output_file {
        Some(path) => std::fs::write(path, rendered.as_bytes())
            .with_context(|| format!("Cannot write output file: {}", path.display()))?,
        None => println!("{rendered}"),
    }

    Ok(())
}

fn resolve_plain(
    engine: &ResolutionEngine,
    res_name: &ResName,
    qualifiers: &str,
) -> Result<Option<TypedValue>> {
    let attribute = AttributeResource::new(
        res_name.clone(),
        format!("@{}", res_name.full_name()),
        res_name.package_name.clone(),
    );
    let typed_value = engine
        .convert_and_fill(&attribute, qualifiers, true)
        .with_context(|| format!("Failed to resolve {}", res_name.full_name()))?;
    Ok(typed_value)
}

fn resolve_with_theme(
    engine: &ResolutionEngine,
    res_name: &ResName,
    package: &str,
    args: &cli::Args,
) -> Result<Option<TypedValue>> {
    let registry = ThemeRegistry::new();
    let handle = registry.create();

    for theme_arg in &args.theme {
        let (style_name, force) = match theme_arg.strip_prefix('!') {
            Some(rest) => (rest, true),
            None => (theme_arg.as_str(), false),
        };
        let style_id =
            engine.resource_identifier(style_name, Some("style"), package, &args.qualifiers);
        if style_id == 0 {
            anyhow::bail!("Unknown theme style: {style_name}");
        }
        engine
            .apply_theme_style(&registry, handle, style_id, force, &args.qualifiers)
            .with_context(|| format!("Failed to apply theme style {style_name}"))?;
    }

    let result = if res_name.type_name == "attr" {
        let attr_id =
            engine.resource_identifier(&res_name.full_name(), None, package, &args.qualifiers);
        if attr_id == 0 {
            anyhow::bail!("Unknown attribute: {}", res_name.full_name());
        }
        engine
            .theme_value(&registry, handle, attr_id, &args.qualifiers, true)
            .with_context(|| format!("Failed to resolve {} through theme", res_name.full_name()))?
    } else {
        resolve_plain(engine, res_name, &args.qualifiers)?
    };

    registry.release(handle);
    Ok(result)
}

fn render(typed_value: Option<&TypedValue>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&typed_value).context("Failed to serialize result")
        }
        OutputFormat::Text => Ok(match typed_value {
            None => "<no value>".to_string(),
            Some(value) => {
                let mut line = format!(
                    "type=0x{:02x} data=0x{:08x} resource_id=0x{:08x}",
                    value.value_type, value.data, value.resource_id
                );
                if let Some(string) = &value.string {
                    line.push_str(&format!(" string={string:?}"));
                }
                line
            }
        }),
    }
}
