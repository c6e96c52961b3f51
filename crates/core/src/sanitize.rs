//! Text-field sanitization for admin-entered messages.
//!
//! The cart message is shown as plain text, so every tag is removed. Output is
//! escaped by the template layer at render time; nothing here produces HTML
//! entities.

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>").expect("Invalid regex")
});

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t ]+").expect("Invalid regex"));

static OCTET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)%[a-f0-9]{2}").expect("Invalid regex"));

/// Sanitize a single-line text value.
///
/// 1. `<script>` and `<style>` elements are removed with their content.
/// 2. Every other tag is removed, keeping its inner text. A `<` that is not
///    closed by `>` before the next `<` is literal text and is kept.
/// 3. Line breaks, tabs and runs of spaces collapse to one space.
/// 4. Percent-encoded octets (`%3C`, `%20`, ...) are removed.
/// 5. The result is trimmed.
///
/// ## Examples
///
/// ```
/// use order_value_bouncer_core::sanitize::sanitize_text_field;
///
/// assert_eq!(sanitize_text_field("  <b>Hello</b>\n world "), "Hello world");
/// assert_eq!(sanitize_text_field("Orders < 50 wait"), "Orders < 50 wait");
/// assert_eq!(sanitize_text_field("<p></p>"), "");
/// ```
#[must_use]
pub fn sanitize_text_field(input: &str) -> String {
    let mut text = if input.contains('<') {
        strip_tags(&SCRIPT_STYLE_RE.replace_all(input, ""))
    } else {
        input.to_owned()
    };

    text = WHITESPACE_RE.replace_all(&text, " ").trim().to_owned();

    let mut found_octets = false;
    while OCTET_RE.is_match(&text) {
        text = OCTET_RE.replace_all(&text, "").into_owned();
        found_octets = true;
    }

    if found_octets {
        text = WHITESPACE_RE.replace_all(&text, " ").trim().to_owned();
    }

    text
}

/// Remove `<...>` tags, keeping unmatched `<` as text.
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('<') {
        let (before, from_lt) = rest.split_at(pos);
        out.push_str(before);

        let after = from_lt.strip_prefix('<').unwrap_or(from_lt);
        let closes = matches!(after.chars().find(|c| matches!(c, '<' | '>')), Some('>'));

        if closes {
            // Skip past the closing '>'
            rest = after.split_once('>').map_or("", |(_, tail)| tail);
        } else {
            out.push('<');
            rest = after;
        }
    }

    out.push_str(rest);
    out
}
