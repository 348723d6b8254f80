//! Property → class prefix mapping and responsive class synthesis.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{Result, SpacingError};
use crate::normalize::normalize;
use crate::value::{Scalar, SpacingValue};

// -----------------------------------------------------------------------------
// Breakpoints
// -----------------------------------------------------------------------------

/// Responsive tiers, mobile first. The first tier has no class prefix.
pub const BREAKPOINTS: [&str; 6] = ["base", "sm", "md", "lg", "xl", "2xl"];

const BASE_BREAKPOINT: &str = "base";

fn ladder_prefix(index: usize) -> Option<String> {
    match index {
        0 => Some(String::new()),
        i => BREAKPOINTS.get(i).map(|name| format!("{name}:")),
    }
}

fn key_prefix(key: &str) -> String {
    if key == BASE_BREAKPOINT {
        String::new()
    } else {
        format!("{key}:")
    }
}

// -----------------------------------------------------------------------------
// Property descriptors
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub property: &'static str,
    pub prefix: &'static str,
}

const fn prop(property: &'static str, prefix: &'static str) -> PropertyDescriptor {
    PropertyDescriptor { property, prefix }
}

/// Logical properties assume a left-to-right writing mode: inline-start is
/// the start edge, block-start is the top edge.
pub const PROPERTIES: &[PropertyDescriptor] = &[
    // margin
    prop("margin", "m"),
    prop("m", "m"),
    prop("marginTop", "mt"),
    prop("mt", "mt"),
    prop("marginBlockStart", "mt"),
    prop("marginRight", "mr"),
    prop("mr", "mr"),
    prop("marginBottom", "mb"),
    prop("mb", "mb"),
    prop("marginBlockEnd", "mb"),
    prop("marginLeft", "ml"),
    prop("ml", "ml"),
    prop("marginX", "mx"),
    prop("mx", "mx"),
    prop("marginInline", "mx"),
    prop("marginY", "my"),
    prop("my", "my"),
    prop("marginBlock", "my"),
    prop("marginInlineStart", "ms"),
    prop("marginStart", "ms"),
    prop("ms", "ms"),
    prop("marginInlineEnd", "me"),
    prop("marginEnd", "me"),
    prop("me", "me"),
    // padding
    prop("padding", "p"),
    prop("p", "p"),
    prop("paddingTop", "pt"),
    prop("pt", "pt"),
    prop("paddingBlockStart", "pt"),
    prop("paddingRight", "pr"),
    prop("pr", "pr"),
    prop("paddingBottom", "pb"),
    prop("pb", "pb"),
    prop("paddingBlockEnd", "pb"),
    prop("paddingLeft", "pl"),
    prop("pl", "pl"),
    prop("paddingX", "px"),
    prop("px", "px"),
    prop("paddingInline", "px"),
    prop("paddingY", "py"),
    prop("py", "py"),
    prop("paddingBlock", "py"),
    prop("paddingInlineStart", "ps"),
    prop("paddingStart", "ps"),
    prop("ps", "ps"),
    prop("paddingInlineEnd", "pe"),
    prop("paddingEnd", "pe"),
    prop("pe", "pe"),
    // gap
    prop("gap", "gap"),
    prop("gridGap", "gap"),
    prop("rowGap", "gap-y"),
    prop("gridRowGap", "gap-y"),
    prop("columnGap", "gap-x"),
    prop("gridColumnGap", "gap-x"),
    prop("spaceX", "space-x"),
    prop("spaceY", "space-y"),
    // inset
    prop("inset", "inset"),
    prop("insetX", "inset-x"),
    prop("insetInline", "inset-x"),
    prop("insetY", "inset-y"),
    prop("insetBlock", "inset-y"),
    prop("insetInlineStart", "start"),
    prop("insetStart", "start"),
    prop("insetInlineEnd", "end"),
    prop("insetEnd", "end"),
    prop("top", "top"),
    prop("insetBlockStart", "top"),
    prop("right", "right"),
    prop("bottom", "bottom"),
    prop("insetBlockEnd", "bottom"),
    prop("left", "left"),
];

static PREFIXES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| PROPERTIES.iter().map(|p| (p.property, p.prefix)).collect());

pub fn is_spacing_property(property: &str) -> bool {
    PREFIXES.contains_key(property)
}

pub fn class_prefix(property: &str) -> Result<&'static str> {
    PREFIXES
        .get(property)
        .copied()
        .ok_or_else(|| SpacingError::UnknownProperty(property.to_string()))
}

// -----------------------------------------------------------------------------
// Synthesis
// -----------------------------------------------------------------------------

/// Build the space-separated class list for `property` set to `value`.
pub fn synthesize(property: &str, value: &SpacingValue) -> Result<String> {
    let prefix = class_prefix(property)?;
    let classes = match value {
        SpacingValue::Scalar(scalar) => token(prefix, "", Some(scalar)).unwrap_or_default(),
        SpacingValue::Sequence(items) => join(items.iter().enumerate().filter_map(|(i, item)| {
            // A hole keeps its tier: the breakpoint follows the array slot.
            item.as_ref()?;
            let Some(breakpoint) = ladder_prefix(i) else {
                tracing::warn!(
                    property,
                    index = i,
                    "responsive entry beyond the last breakpoint dropped"
                );
                return None;
            };
            token(prefix, &breakpoint, item.as_ref())
        })),
        SpacingValue::Collection(entries) => join(
            entries
                .iter()
                .filter_map(|(key, item)| token(prefix, &key_prefix(key), item.as_ref())),
        ),
    };
    Ok(classes)
}

fn token(prefix: &str, breakpoint: &str, value: Option<&Scalar>) -> Option<String> {
    let normalized = normalize(value);
    if normalized.is_empty() {
        None
    } else {
        Some(format!("{breakpoint}{prefix}-{normalized}"))
    }
}

fn join(tokens: impl Iterator<Item = String>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}
