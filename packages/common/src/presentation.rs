//! Rendering rules shared by the static export and the live preview, so
//! both turn the same content into the same structure.

use serde_json::Value;
use std::borrow::Cow;

/// A content value as display text. Strings and numbers render; any other
/// shape has no text.
pub fn display_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

/// Whether a present value has a shape that cannot be shown as text
pub fn is_unexpected_shape(value: &Value) -> bool {
    !value.is_null() && display_text(value).is_none()
}

/// Text of a field that has a placeholder. A missing, null or empty field
/// shows the placeholder; a field of unexpected shape shows nothing.
pub fn text_or<'a>(value: Option<&'a Value>, fallback: &'a str) -> Cow<'a, str> {
    match value {
        Some(value) if is_unexpected_shape(value) => Cow::Borrowed(""),
        Some(value) => match display_text(value) {
            Some(text) if !text.is_empty() => text,
            _ => Cow::Borrowed(fallback),
        },
        None => Cow::Borrowed(fallback),
    }
}

/// Heading level from "h3", "3" or 3. Anything outside h2-h4 is 2.
pub fn heading_level(value: Option<&Value>) -> u8 {
    let level = match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.strip_prefix('h')
                .or_else(|| s.strip_prefix('H'))
                .unwrap_or(s)
                .parse()
                .ok()
        }
        _ => None,
    };
    match level {
        Some(level @ 2..=4) => level as u8,
        _ => 2,
    }
}

/// Divider styles other than the plain line
pub fn divider_variant(style: Option<&str>) -> Option<&'static str> {
    match style? {
        "dashed" => Some("dashed"),
        "dotted" => Some("dotted"),
        "thick" => Some("thick"),
        _ => None,
    }
}

pub fn callout_color(color: Option<&str>) -> &'static str {
    match color {
        Some("green") => "green",
        Some("yellow") => "yellow",
        Some("red") => "red",
        Some("gray") => "gray",
        _ => "blue",
    }
}

pub fn callout_icon(icon: Option<&str>) -> &'static str {
    match icon {
        Some("warning") => "⚠️",
        Some("success") => "✅",
        Some("error") => "❌",
        Some("note") => "📝",
        _ => "ℹ️",
    }
}

pub fn column_gap(gap: Option<&str>) -> Option<&'static str> {
    match gap? {
        "sm" => Some("sm"),
        "md" => Some("md"),
        "lg" => Some("lg"),
        _ => None,
    }
}

/// A color that is safe to place in a `style` attribute
pub fn css_color(value: &str) -> Option<&str> {
    let value = value.trim();
    let safe = !value.is_empty()
        && value.len() <= 64
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' ' | '-'));
    safe.then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level(Some(&json!("h3"))), 3);
        assert_eq!(heading_level(Some(&json!("4"))), 4);
        assert_eq!(heading_level(Some(&json!(3))), 3);
        assert_eq!(heading_level(Some(&json!("h1"))), 2);
        assert_eq!(heading_level(Some(&json!(true))), 2);
        assert_eq!(heading_level(None), 2);
    }

    #[test]
    fn test_display_text() {
        assert_eq!(display_text(&json!("hi")).as_deref(), Some("hi"));
        assert_eq!(display_text(&json!(2025)).as_deref(), Some("2025"));
        assert_eq!(display_text(&json!(1.5)).as_deref(), Some("1.5"));
        assert_eq!(display_text(&json!([1])), None);
        assert_eq!(display_text(&json!(null)), None);
    }

    #[test]
    fn test_text_or() {
        assert_eq!(text_or(None, "Untitled"), "Untitled");
        assert_eq!(text_or(Some(&json!("")), "Untitled"), "Untitled");
        assert_eq!(text_or(Some(&json!(null)), "Untitled"), "Untitled");
        assert_eq!(text_or(Some(&json!(7)), "Untitled"), "7");
        assert_eq!(text_or(Some(&json!({ "a": 1 })), "Untitled"), "");
        assert_eq!(text_or(Some(&json!(false)), "Untitled"), "");
    }

    #[test]
    fn test_known_values() {
        assert_eq!(divider_variant(Some("dotted")), Some("dotted"));
        assert_eq!(divider_variant(Some("line")), None);
        assert_eq!(callout_color(Some("purple")), "blue");
        assert_eq!(callout_icon(Some("note")), "📝");
        assert_eq!(column_gap(Some("xl")), None);
    }

    #[test]
    fn test_css_color() {
        assert_eq!(css_color(" rgb(1, 2, 3) "), Some("rgb(1, 2, 3)"));
        assert_eq!(css_color("white"), Some("white"));
        assert_eq!(css_color("red;background:url(x)"), None);
        assert_eq!(css_color(""), None);
    }
}
