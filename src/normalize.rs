//! Value normalization: one authored spacing value in, one class-token
//! payload out (`"2"`, `"auto"`, `"0"` or a bracketed literal like `"[7px]"`).

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::scale::{scale, REM_PX};
use crate::value::Scalar;

/// Unit-less step size in pixels, used for negative numeric steps.
const STEP_PX: f64 = 4.0;

static PX_LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?(?:\d+(?:\.\d*)?|\.\d+))px$").expect("valid px pattern"));
static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:\d+(?:\.\d*)?|\.\d+)$").expect("valid number pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Normalize a possibly-absent value. Absent values yield `""`, which callers
/// drop instead of emitting a bare prefix.
pub fn normalize(value: Option<&Scalar>) -> String {
    match value {
        None => String::new(),
        Some(Scalar::Number(n)) => normalize_number(*n),
        Some(Scalar::Text(s)) => normalize_text(s),
    }
}

pub fn normalize_number(n: f64) -> String {
    if !n.is_finite() {
        return format!("[{n}]");
    }
    if n == 0.0 {
        "0".to_string()
    } else if n < 0.0 {
        format!("[-{}px]", format_number(-n * STEP_PX))
    } else {
        // Positive numbers are taken to be step identifiers already.
        format_number(n)
    }
}

pub fn normalize_text(raw: &str) -> String {
    let text = raw.trim();
    if text.is_empty() {
        return String::new();
    }
    if text == "auto" {
        return "auto".to_string();
    }
    if let Some(n) = parse_number(text) {
        return normalize_number(n);
    }
    if matches!(text, "0px" | "0rem") {
        return "0".to_string();
    }
    if scale().contains_step(text) {
        return text.to_string();
    }

    let value: Cow<'_, str> = if text.contains("calc") || text.contains("clamp") {
        WHITESPACE.replace_all(text, "")
    } else {
        Cow::Borrowed(text)
    };

    if let Some(caps) = PX_LENGTH.captures(&value) {
        let Ok(px) = caps[1].parse::<f64>() else {
            return format!("[{value}]");
        };
        return normalize_px(px);
    }
    if value.ends_with("rem") {
        if let Some(step) = scale().step_for_rem(&value) {
            return step.to_string();
        }
    }
    format!("[{value}]")
}

fn normalize_px(px: f64) -> String {
    let rem = format!("{}rem", format_number(px / REM_PX));
    if let Some(step) = scale().step_for_rem(&rem) {
        return step.to_string();
    }
    let magnitude = px.abs();
    if magnitude.fract() == 0.0 && magnitude <= u32::MAX as f64 {
        if let Some(step) = scale().step_for_px(magnitude as u32) {
            return if px < 0.0 {
                format!("[-{}px]", format_number(magnitude))
            } else {
                step.to_string()
            };
        }
    }
    format!("[{}px]", format_number(px))
}

/// Whole-string plain decimal parse; `"-1"` and `"0.5"` qualify, `"1px"`,
/// `"+4"` and `"1e3"` do not.
fn parse_number(text: &str) -> Option<f64> {
    if !DECIMAL.is_match(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Shortest decimal rendering: `4.0` → `"4"`, `0.5` → `"0.5"`.
fn format_number(n: f64) -> String {
    n.to_string()
}
