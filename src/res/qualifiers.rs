//! Configuration-qualifier tokenizing and matching.
//!
//! A qualifier string is a hyphen-delimited sequence of tokens
//! (`-en-land-hdpi-`); the empty context is the reserved `--` token. Matching
//! follows the platform's config rules: a variant is eligible when every one
//! of its tokens is present in the requested context, and ties between
//! eligible variants are broken by a fixed priority order between axes.

use std::cmp::Ordering;

/// Axis priority order, most significant first. This mirrors the platform's
/// configuration-matching order; an unrecognized token sorts last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Axis {
    Mcc,
    Mnc,
    Language,
    Region,
    LayoutDirection,
    SmallestWidth,
    ScreenWidth,
    ScreenHeight,
    ScreenSize,
    Orientation,
    UiMode,
    NightMode,
    Density,
    Touchscreen,
    Keyboard,
    Navigation,
    Version,
    Unknown,
}

pub fn tokenize(qualifiers: &str) -> Vec<&str> {
    qualifiers.split('-').filter(|t| !t.is_empty()).collect()
}

pub fn axis_of(token: &str) -> Axis {
    if token.starts_with("mcc") && token[3..].parse::<u32>().is_ok() {
        return Axis::Mcc;
    }
    if token.starts_with("mnc") && token[3..].parse::<u32>().is_ok() {
        return Axis::Mnc;
    }
    if token.len() == 3
        && token.starts_with('r')
        && token[1..].chars().all(|c| c.is_ascii_uppercase())
    {
        return Axis::Region;
    }
    if token.len() == 2 && token.chars().all(|c| c.is_ascii_lowercase()) {
        return Axis::Language;
    }
    match token {
        "ldltr" | "ldrtl" => return Axis::LayoutDirection,
        "small" | "normal" | "large" | "xlarge" => return Axis::ScreenSize,
        "port" | "land" | "square" => return Axis::Orientation,
        "car" | "desk" | "television" | "appliance" | "watch" => return Axis::UiMode,
        "night" | "notnight" => return Axis::NightMode,
        "ldpi" | "mdpi" | "hdpi" | "xhdpi" | "xxhdpi" | "xxxhdpi" | "nodpi" | "anydpi"
        | "tvdpi" => return Axis::Density,
        "notouch" | "finger" | "stylus" => return Axis::Touchscreen,
        "keysexposed" | "keyshidden" | "keyssoft" => return Axis::Keyboard,
        "nonav" | "dpad" | "trackball" | "wheel" => return Axis::Navigation,
        _ => {}
    }
    if let Some(rest) = token.strip_prefix("sw") {
        if rest.strip_suffix("dp").is_some_and(|n| n.parse::<u32>().is_ok()) {
            return Axis::SmallestWidth;
        }
    }
    if let Some(rest) = token.strip_prefix('w') {
        if rest.strip_suffix("dp").is_some_and(|n| n.parse::<u32>().is_ok()) {
            return Axis::ScreenWidth;
        }
    }
    if let Some(rest) = token.strip_prefix('h') {
        if rest.strip_suffix("dp").is_some_and(|n| n.parse::<u32>().is_ok()) {
            return Axis::ScreenHeight;
        }
    }
    if token
        .strip_suffix("dpi")
        .is_some_and(|n| n.parse::<u32>().is_ok())
    {
        return Axis::Density;
    }
    if let Some(rest) = token.strip_prefix('v') {
        if rest.parse::<u32>().is_ok() {
            return Axis::Version;
        }
    }
    Axis::Unknown
}

/// True when every token of `variant` appears in the requested `context`.
/// The default variant (no tokens) matches everything.
pub fn is_compatible(variant: &str, context: &str) -> bool {
    let context_tokens = tokenize(context);
    tokenize(variant)
        .iter()
        .all(|token| context_tokens.contains(token))
}

/// Total order between two eligible variants: more matched tokens first, then
/// the variant whose most significant matched axis ranks earlier, then the
/// qualifier string itself so selection never depends on insertion order.
pub fn specificity_cmp(a: &str, b: &str) -> Ordering {
    let a_tokens = tokenize(a);
    let b_tokens = tokenize(b);

    b_tokens
        .len()
        .cmp(&a_tokens.len())
        .then_with(|| {
            let mut a_axes: Vec<Axis> = a_tokens.iter().map(|t| axis_of(t)).collect();
            let mut b_axes: Vec<Axis> = b_tokens.iter().map(|t| axis_of(t)).collect();
            a_axes.sort();
            b_axes.sort();
            a_axes.cmp(&b_axes)
        })
        .then_with(|| a.cmp(b))
}
