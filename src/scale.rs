//! The spacing scale: an explicit, irregular step → length table plus the two
//! reverse indices used by the normalizer.
//!
//! The series is hand-enumerated on purpose. Above step 10 it skips values
//! (11, 13, 15, 17–19, ...) and those gaps must stay gaps.

use std::collections::HashMap;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleEntry {
    pub step: &'static str,
    pub length: &'static str,
}

const fn entry(step: &'static str, length: &'static str) -> ScaleEntry {
    ScaleEntry { step, length }
}

pub const SCALE: &[ScaleEntry] = &[
    entry("0", "0"),
    entry("px", "1px"),
    entry("0.5", "0.125rem"),
    entry("1", "0.25rem"),
    entry("1.5", "0.375rem"),
    entry("2", "0.5rem"),
    entry("2.5", "0.625rem"),
    entry("3", "0.75rem"),
    entry("3.5", "0.875rem"),
    entry("4", "1rem"),
    entry("5", "1.25rem"),
    entry("6", "1.5rem"),
    entry("7", "1.75rem"),
    entry("8", "2rem"),
    entry("9", "2.25rem"),
    entry("10", "2.5rem"),
    entry("12", "3rem"),
    entry("14", "3.5rem"),
    entry("16", "4rem"),
    entry("20", "5rem"),
    entry("24", "6rem"),
    entry("28", "7rem"),
    entry("32", "8rem"),
    entry("36", "9rem"),
    entry("40", "10rem"),
    entry("44", "11rem"),
    entry("48", "12rem"),
    entry("52", "13rem"),
    entry("56", "14rem"),
    entry("60", "15rem"),
    entry("64", "16rem"),
    entry("72", "18rem"),
    entry("80", "20rem"),
    entry("96", "24rem"),
];

/// Pixels per rem used when translating between the two units.
pub const REM_PX: f64 = 16.0;

static TABLE: LazyLock<ScaleTable> = LazyLock::new(|| ScaleTable::new(SCALE));

/// Shared, immutable scale table. Built on first use.
pub fn scale() -> &'static ScaleTable {
    &TABLE
}

#[derive(Debug)]
pub struct ScaleTable {
    entries: &'static [ScaleEntry],
    rem_index: HashMap<&'static str, &'static str>,
    px_index: HashMap<u32, &'static str>,
}

impl ScaleTable {
    pub fn new(entries: &'static [ScaleEntry]) -> Self {
        let rem_index = entries
            .iter()
            .filter(|e| e.length.ends_with("rem"))
            .map(|e| (e.length, e.step))
            .collect();
        let px_index = entries
            .iter()
            .filter_map(|e| length_to_px(e.length).map(|px| (px, e.step)))
            .collect();
        Self {
            entries,
            rem_index,
            px_index,
        }
    }

    pub fn entries(&self) -> &'static [ScaleEntry] {
        self.entries
    }

    pub fn length_of(&self, step: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|e| e.step == step)
            .map(|e| e.length)
    }

    pub fn contains_step(&self, step: &str) -> bool {
        self.length_of(step).is_some()
    }

    /// Exact string match against the rendered rem lengths (`"0.5rem"`).
    pub fn step_for_rem(&self, rem: &str) -> Option<&'static str> {
        self.rem_index.get(rem).copied()
    }

    pub fn step_for_px(&self, px: u32) -> Option<&'static str> {
        self.px_index.get(&px).copied()
    }
}

/// Whole-pixel size of a table length, or `None` when the unit can't be
/// resolved to an integral pixel count.
pub fn length_to_px(length: &str) -> Option<u32> {
    if length == "0" {
        return Some(0);
    }
    let px = if let Some(rem) = length.strip_suffix("rem") {
        rem.parse::<f64>().ok()? * REM_PX
    } else if let Some(px) = length.strip_suffix("px") {
        px.parse::<f64>().ok()?
    } else {
        return None;
    };
    if px.is_finite() && px >= 0.0 && px.fract() == 0.0 && px <= u32::MAX as f64 {
        Some(px as u32)
    } else {
        None
    }
}
