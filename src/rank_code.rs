//! Decoding of legacy Minecraft formatting codes in rank strings.
//!
//! A code is a marker (`&` or `§`) followed by one character: a hex digit
//! selects a color, `k`-`o` and `r` select a style. Decoding never fails;
//! anything unrecognized is left in the label and the color falls back to
//! white.

use crate::model::{ChatColor, RankInfo, Rgb};

const MARKERS: [char; 2] = ['&', '§'];
const STYLE_CODES: [char; 6] = ['k', 'l', 'm', 'n', 'o', 'r'];

/// Decode a rank string such as `&6VIP+` into its label and color.
///
/// The color comes from a color code at the very start of the string only.
/// Every code anywhere in the string is removed from the label.
pub fn decode(raw: &str) -> RankInfo {
    let color = leading_color(raw).map_or(Rgb::WHITE, ChatColor::rgb);
    RankInfo {
        label: strip_codes(raw).trim().to_string(),
        color,
    }
}

/// The color selected by a code at the start of `raw`, if any.
pub fn leading_color(raw: &str) -> Option<ChatColor> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(marker), Some(code)) if is_marker(marker) => ChatColor::from_code(code),
        _ => None,
    }
}

/// Remove every marker+code pair from `raw`.
pub fn strip_codes(raw: &str) -> String {
    let mut label = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if is_marker(c) && chars.next_if(|&next| is_code(next)).is_some() {
            continue;
        }
        label.push(c);
    }
    label
}

fn is_marker(c: char) -> bool {
    MARKERS.contains(&c)
}

fn is_code(c: char) -> bool {
    c.is_ascii_hexdigit() || STYLE_CODES.contains(&c.to_ascii_lowercase())
}
