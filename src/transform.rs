//! Write-time text transforms for songs and text blocks.
//!
//! These are pure functions; the entity save hooks apply them so every
//! write goes through the same rewrite regardless of the caller.

use std::sync::LazyLock;

use regex::Regex;

/// Matches an embed height attribute like `height="200"` or `height='200'`.
static HEIGHT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"height=['"]\d+['"]"#).unwrap());

/// Rewrite the first `height="<digits>"` token in an embed snippet to the
/// given target height. Snippets without a height token pass through
/// unchanged; that is a silent no-op, not an error.
pub fn rewrite_embed_height(markup: &str, target_height: u32) -> String {
    HEIGHT_TOKEN
        .replace(markup, format!(r#"height="{target_height}""#))
        .into_owned()
}

/// Canonical embed height for a song reference: albums get the tall player.
pub fn embed_height_for(is_album: bool) -> u32 {
    if is_album { 500 } else { 150 }
}

/// Translate editorial pseudo-tags to presentation markup.
///
/// The replacements are literal and unconditional; once translated, the
/// pseudo-tags no longer occur, so re-saving stored text is a no-op.
pub fn translate_markup(text: &str) -> String {
    text.replace("<ж>", "<b>")
        .replace("</ж>", "</b>")
        .replace("<к>", "<i>")
        .replace("</к>", "</i>")
        .replace("<ц>", "<blockquote class='decoration'>")
        .replace("</ц>", "</blockquote>")
}

/// Shorten a display string to its first 30 characters plus `..`.
/// Counted in characters, not bytes; most content here is Cyrillic.
pub fn truncate_display(s: &str) -> String {
    if s.chars().count() > 30 {
        let head: String = s.chars().take(30).collect();
        format!("{head}..")
    } else {
        s.to_string()
    }
}

/// Case-insensitive substring match. Done in Rust rather than with SQL
/// `LIKE` because SQLite only case-folds ASCII and queries are mostly
/// Cyrillic.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
