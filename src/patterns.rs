//! Compiled regex patterns and CSS selectors shared across the engine.
//!
//! All patterns are compiled once at startup using `LazyLock` for efficiency.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Text Segmentation Patterns
// =============================================================================

/// Splits prose into sentences on terminal punctuation runs.
pub static SENTENCE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("SENTENCE_SPLIT regex"));

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex")
});

// =============================================================================
// Raw Markup Detection
// =============================================================================
// The parser synthesizes <html>, <head> and <body> for any input, so explicit
// skeleton declarations are detected on the raw source instead of the tree.

/// Matches an explicit `<html>` opening tag in raw markup.
pub static HTML_TAG_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<html[\s/>]").expect("HTML_TAG_DECL regex")
});

/// Matches an explicit `<head>` opening tag, but not `<header>`.
pub static HEAD_TAG_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<head[\s/>]").expect("HEAD_TAG_DECL regex")
});

/// Matches an explicit `<body>` opening tag in raw markup.
pub static BODY_TAG_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<body[\s/>]").expect("BODY_TAG_DECL regex")
});

// =============================================================================
// Draft Cleaning Patterns
// =============================================================================

/// Matches conversational lead-ins some generators prepend to a draft.
pub static DRAFT_LEAD_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(article|voici|voilà)\s*:\s*").expect("DRAFT_LEAD_IN regex")
});

/// Matches an opening markdown code fence, with optional language tag.
pub static CODE_FENCE_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^```[a-zA-Z]*\s*").expect("CODE_FENCE_OPEN regex")
});

/// Matches a closing markdown code fence at end of input.
pub static CODE_FENCE_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```\s*$").expect("CODE_FENCE_CLOSE regex")
});

// =============================================================================
// Filename Patterns
// =============================================================================

/// Matches characters excluded from article slugs.
/// Word characters (unicode letters and digits), whitespace and hyphens stay.
pub static SLUG_STRIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\w\s-]").expect("SLUG_STRIP regex")
});

// =============================================================================
// CSS Selectors (as strings for use with dom_query)
// =============================================================================

/// Selector for all heading levels.
pub const HEADINGS_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Selector for the designated article content container.
pub const ARTICLE_CONTENT_SELECTOR: &str = "div.article-content";

/// Selector for page chrome excluded from the content text projection.
pub const PAGE_CHROME_SELECTOR: &str = "header, footer, nav";

/// Selector for anchors carrying a destination.
pub const HYPERLINK_SELECTOR: &str = "a[href]";

/// Selector for structured-data script blocks.
pub const JSON_LD_SELECTOR: &str = "script[type='application/ld+json']";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_split_handles_terminal_runs() {
        let parts: Vec<&str> = SENTENCE_SPLIT.split("Un. Deux !? Trois").collect();
        assert_eq!(parts, vec!["Un", " Deux ", " Trois"]);
    }

    #[test]
    fn whitespace_normalize_collapses_spaces() {
        let result = WHITESPACE_NORMALIZE.replace_all("hello \t\n  world", " ");
        assert_eq!(result, "hello world");
    }

    #[test]
    fn draft_lead_in_strips_prefixes_case_insensitively() {
        assert!(DRAFT_LEAD_IN.is_match("Voici : mon article"));
        assert!(DRAFT_LEAD_IN.is_match("ARTICLE: contenu"));
        assert!(!DRAFT_LEAD_IN.is_match("Un article : bien"));
    }

    #[test]
    fn slug_strip_keeps_accented_letters() {
        let cleaned = SLUG_STRIP.replace_all("séminaire d'été !", "");
        assert_eq!(cleaned, "séminaire dété ");
    }

    #[test]
    fn head_tag_decl_ignores_header_elements() {
        assert!(HEAD_TAG_DECL.is_match("<html><head><title>t</title></head></html>"));
        assert!(HEAD_TAG_DECL.is_match("<HEAD >"));
        assert!(!HEAD_TAG_DECL.is_match("<header>Seminary</header>"));
    }

    #[test]
    fn skeleton_decls_accept_attributes() {
        assert!(HTML_TAG_DECL.is_match(r#"<html lang="fr">"#));
        assert!(BODY_TAG_DECL.is_match(r#"<body class="article">"#));
        assert!(!BODY_TAG_DECL.is_match("<p>texte</p>"));
    }
}
