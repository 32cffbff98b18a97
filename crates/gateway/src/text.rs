//! Pure text helpers for rendered CMS markup.
//!
//! Title, excerpt, and body fields always arrive as rendered HTML. These
//! helpers turn that markup into plain text, sanitized HTML, or display
//! strings. None of them can fail: malformed input degrades to an empty
//! or unchanged value, because one bad record must never block a whole
//! collection.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;

/// Publish timestamps arrive in the CMS's local format, without an offset.
const CMS_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// # Panics
///
/// Panics if the hard-coded regex literal is invalid (impossible in
/// practice).
#[allow(clippy::expect_used)]
static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid regex literal")
});

#[allow(clippy::expect_used)]
static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid regex literal"));

#[allow(clippy::expect_used)]
static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex literal"));

#[allow(clippy::expect_used)]
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex literal"));

/// Named and numeric entities the CMS emits in rendered titles.
///
/// `&amp;` is decoded last so that `&amp;lt;` becomes `&lt;` (one level
/// of decoding), not `<`.
const ENTITIES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#039;", "'"),
    ("&#8211;", "\u{2013}"),
    ("&#8212;", "\u{2014}"),
    ("&#8216;", "\u{2018}"),
    ("&#8217;", "\u{2019}"),
    ("&#8220;", "\u{201C}"),
    ("&#8221;", "\u{201D}"),
    ("&#8230;", "\u{2026}"),
    ("&hellip;", "\u{2026}"),
    ("&nbsp;", " "),
    ("&amp;", "&"),
];

/// Strip markup from rendered HTML, returning the remaining text.
///
/// Removes `<script>`/`<style>` blocks with their content, HTML comments,
/// and every remaining tag. Entities are left untouched (see
/// [`decode_entities`]); decoding `&lt;b&gt;` here would fabricate markup
/// and break idempotency. A string already free of markup passes through
/// unchanged.
pub fn strip_markup(html: &str) -> String {
    let text = SCRIPT_BLOCK.replace_all(html, "");
    let text = STYLE_BLOCK.replace_all(&text, "");
    let text = HTML_COMMENT.replace_all(&text, "");
    TAG.replace_all(&text, "").into_owned()
}

/// Decode the entities of [`ENTITIES`] into their character forms.
pub fn decode_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, replacement)| {
            acc.replace(entity, replacement)
        })
}

/// Sanitize rendered HTML for direct display.
///
/// Dangerous tags and attributes are removed; safe markup is preserved.
pub fn sanitize_markup(html: &str) -> String {
    ammonia::clean(html)
}

/// Truncate to at most `max_len` characters.
///
/// Text within the limit is returned unchanged. Longer text is cut so
/// that the trailing `...` fits inside `max_len`, with partial trailing
/// whitespace trimmed before the ellipsis. The operation is idempotent
/// for `max_len >= 4`.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let keep = max_len.saturating_sub(3);
    let cut: String = text.chars().take(keep).collect();
    format!("{}...", cut.trim_end())
}

/// Plain-text excerpt of rendered HTML: markup stripped, then truncated.
pub fn excerpt(html: &str, max_len: usize) -> String {
    truncate(strip_markup(html).trim(), max_len)
}

/// Format a CMS publish timestamp as a long human date
/// (`January 8, 2025`).
///
/// Accepts the CMS's local format and RFC 3339; returns `None` on
/// anything else.
pub fn format_date(raw: &str) -> Option<String> {
    let parsed = NaiveDateTime::parse_from_str(raw, CMS_DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_local())
        })?;
    Some(parsed.format("%B %-d, %Y").to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn strips_simple_tags() {
        assert_eq!(strip_markup("<p>Hello <b>world</b></p>"), "Hello world");
    }

    #[test]
    fn strips_script_blocks_with_content() {
        let html = "before<script type=\"text/javascript\">alert('x')</script>after";
        assert_eq!(strip_markup(html), "beforeafter");
    }

    #[test]
    fn strips_style_blocks_and_comments() {
        let html = "a<style>p { color: red; }</style>b<!-- hidden -->c";
        assert_eq!(strip_markup(html), "abc");
    }

    #[test]
    fn strip_is_noop_on_plain_text() {
        let plain = "Digital transformation, done right.";
        assert_eq!(strip_markup(plain), plain);
    }

    #[test]
    fn strip_is_idempotent() {
        for html in [
            "<p>Hello <b>world</b></p>",
            "a <x> < b",
            "<scr<script>ipt>alert(1)</script>",
            "text &lt;b&gt;escaped&lt;/b&gt; stays text",
        ] {
            let once = strip_markup(html);
            assert_eq!(strip_markup(&once), once, "not idempotent for {html:?}");
        }
    }

    #[test]
    fn strip_leaves_entities_alone() {
        assert_eq!(strip_markup("Tools &amp; methods"), "Tools &amp; methods");
    }

    #[test]
    fn decode_common_entities() {
        assert_eq!(decode_entities("Tools &amp; methods"), "Tools & methods");
        assert_eq!(
            decode_entities("Wandel &#8211; gestalten&#8230;"),
            "Wandel \u{2013} gestalten\u{2026}"
        );
    }

    #[test]
    fn decode_is_single_level() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn sanitize_drops_scripts_keeps_safe_markup() {
        let html = "<p>ok</p><script>alert('x')</script>";
        let clean = sanitize_markup(html);
        assert!(clean.contains("<p>ok</p>"));
        assert!(!clean.contains("script"));
    }

    #[test]
    fn truncate_short_text_unchanged() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exact", 5), "exact");
    }

    #[test]
    fn truncate_cuts_and_marks() {
        let out = truncate("a very long description of a project", 12);
        assert_eq!(out, "a very lo...");
        assert!(out.chars().count() <= 12);
    }

    #[test]
    fn truncate_trims_trailing_whitespace_before_ellipsis() {
        // 9 kept chars end in a space, which must not survive
        assert_eq!(truncate("12345678 word", 12), "12345678...");
    }

    #[test]
    fn truncate_is_idempotent() {
        for (text, max) in [
            ("a very long description of a project", 12),
            ("short", 10),
            ("exactly ten", 4),
            ("spaces   everywhere in this text", 20),
        ] {
            let once = truncate(text, max);
            assert_eq!(truncate(&once, max), once, "not idempotent for {text:?}");
        }
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        let text = "über die Zusammenarbeit mit Kunden";
        let out = truncate(text, 10);
        assert!(out.chars().count() <= 10);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn excerpt_strips_then_truncates() {
        let html = "<p>Experienced business consultant specializing in strategy.</p>";
        let out = excerpt(html, 30);
        assert!(!out.contains('<'));
        assert!(out.chars().count() <= 30);
    }

    #[test]
    fn format_cms_local_date() {
        assert_eq!(
            format_date("2025-01-08T10:30:00").as_deref(),
            Some("January 8, 2025")
        );
    }

    #[test]
    fn format_rfc3339_date() {
        assert_eq!(
            format_date("2024-12-24T08:00:00+01:00").as_deref(),
            Some("December 24, 2024")
        );
    }

    #[test]
    fn format_date_rejects_garbage() {
        assert!(format_date("not a date").is_none());
        assert!(format_date("").is_none());
    }
}
