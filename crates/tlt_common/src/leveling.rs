//! Level System
//!
//! XP requirements per level and progress bar rendering.
//!
//! ## XP Curve
//!
//! XP required to advance past level L: 100 + floor(L / 5)^3
//! - Level 1-4: 100 XP
//! - Level 5-9: 101 XP
//! - Level 10-14: 108 XP
//! - Level 50-54: 1,100 XP
//!
//! The curve is a step function: flat inside each band of five levels.

/// XP every level costs before the band bonus
pub const BASE_XP: u64 = 100;

/// Levels per band of the step curve
pub const LEVEL_BAND: u64 = 5;

/// Glyph for the filled part of a progress bar
pub const FILLED_GLYPH: char = '■';

/// Glyph for the empty part of a progress bar
pub const EMPTY_GLYPH: char = '□';

/// Calculate XP needed to advance past `level`
pub fn required_xp_for_level(level: u64) -> u64 {
    let band = level / LEVEL_BAND;
    BASE_XP.saturating_add(band.saturating_pow(3))
}

/// Percentage of the way through `level` (may exceed 100 for unnormalized input)
pub fn level_percentage(current_xp: u64, level: u64) -> f64 {
    current_xp as f64 / required_xp_for_level(level) as f64 * 100.0
}

/// Percentage clamped to 0-100 for compact displays
pub fn clamped_percentage(current_xp: u64, level: u64) -> f64 {
    level_percentage(current_xp, level).clamp(0.0, 100.0)
}

/// Generate a progress bar string
/// width: total glyphs for the bar (excluding brackets)
/// percentage: 0-100; values outside the range fill an empty or full bar
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = if percentage.is_nan() {
        0
    } else {
        let raw = (percentage / 100.0 * width as f64).round();
        raw.clamp(0.0, width as f64) as usize
    };
    let empty = width - filled;

    let mut bar = String::with_capacity((width + 2) * 3);
    bar.push('[');
    bar.extend(std::iter::repeat(FILLED_GLYPH).take(filled));
    bar.extend(std::iter::repeat(EMPTY_GLYPH).take(empty));
    bar.push(']');
    bar
}
