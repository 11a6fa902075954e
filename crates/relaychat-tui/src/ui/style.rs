//! Shared styling helpers.

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};
use ratatui::style::Color;

const AVATAR_SATURATION: f64 = 0.70;
const AVATAR_LIGHTNESS: f64 = 0.45;

/// Make untrusted text safe to draw.
///
/// Layout whitespace becomes a space and every other control character
/// becomes U+FFFD, so peer-supplied text cannot move the cursor or inject
/// terminal escape sequences.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => ' ',
            c if c.is_control() => char::REPLACEMENT_CHARACTER,
            c => c,
        })
        .collect()
}

/// Hue in degrees derived from a username.
///
/// Every user sees the same color for the same peer, across sessions and
/// clients. The fold runs over UTF-16 code units with 32-bit shift
/// semantics.
#[allow(clippy::cast_possible_truncation)]
pub fn avatar_hue(username: &str) -> u16 {
    let mut hash: i64 = 0;
    for unit in username.encode_utf16() {
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        hash = i64::from(unit).wrapping_add(shifted.wrapping_sub(hash));
    }
    // rem_euclid keeps the hue in 0..360 for negative hashes.
    hash.rem_euclid(360) as u16
}

/// Foreground color for a username.
pub fn avatar_color(username: &str) -> Color {
    let (r, g, b) = hsl_to_rgb(f64::from(avatar_hue(username)), AVATAR_SATURATION, AVATAR_LIGHTNESS);
    Color::Rgb(r, g, b)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let m = lightness - chroma / 2.0;

    let (r, g, b) = match sector {
        s if s < 1.0 => (chroma, x, 0.0),
        s if s < 2.0 => (x, chroma, 0.0),
        s if s < 3.0 => (0.0, chroma, x),
        s if s < 4.0 => (0.0, x, chroma),
        s if s < 5.0 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}

/// Wall-clock `HH:MM` of a message in `zone`.
pub fn message_time<Tz>(timestamp: DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.with_timezone(zone).format("%H:%M").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn sanitize_neutralizes_control_characters() {
        assert_eq!(sanitize("a\tb\nc"), "a b c");
        assert_eq!(sanitize("\u{1b}[2Jboom"), "\u{fffd}[2Jboom");
        assert_eq!(sanitize("<b>hi</b> & ünï"), "<b>hi</b> & ünï");
    }

    #[test]
    fn hue_is_stable_and_in_range() {
        // "a" folds to 97; "ab" to 97 * 31 + 98.
        assert_eq!(avatar_hue("a"), 97);
        assert_eq!(avatar_hue("ab"), 225);
        assert_eq!(avatar_hue(""), 0);

        let long = "z".repeat(64);
        assert!(avatar_hue(&long) < 360);
        assert_eq!(avatar_hue(&long), avatar_hue(&long));
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), (0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), (0, 0, 255));
    }

    #[test]
    fn avatar_color_is_rgb() {
        assert!(matches!(avatar_color("bob"), Color::Rgb(..)));
        assert_eq!(avatar_color("bob"), avatar_color("bob"));
    }

    #[test]
    fn time_uses_zone() {
        let ts = DateTime::from_timestamp(1_704_110_400, 0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(message_time(ts, &Utc), "12:00");
        assert_eq!(message_time(ts, &plus_two), "14:00");
    }
}
