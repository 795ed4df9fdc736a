//! DOM Operations Adapter
//!
//! Thin named wrappers around the `dom_query` crate. Every tree read and
//! every mutation in this crate goes through these functions, never through
//! string patching of HTML, so structural invariants hold by construction.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

// Re-export StrTendril for zero-copy text projections
pub use tendril::StrTendril;

use crate::patterns::{ARTICLE_CONTENT_SELECTOR, PAGE_CHROME_SELECTOR, WHITESPACE_NORMALIZE};

// === Parsing ===

/// Parse an HTML string into a document.
///
/// Parsing is best-effort and never fails: malformed input (unclosed tags,
/// stray closers, duplicate heads) produces a repaired tree.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Clone a document by re-parsing its serialized form.
#[must_use]
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

// === Text Content ===

/// Get all text content of a selection and its descendants.
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Get outer HTML content.
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

// === Attribute and Tag Information ===

/// Get any attribute value.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get tag name (lowercase).
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

/// Get the heading level of an `h1`–`h6` element, if the selection is one.
#[must_use]
pub fn heading_level(sel: &Selection) -> Option<u8> {
    let tag = tag_name(sel)?;
    let mut chars = tag.chars();
    if chars.next() != Some('h') {
        return None;
    }
    let digit = chars.next().and_then(|c| c.to_digit(10))?;
    if chars.next().is_some() || !(1..=6).contains(&digit) {
        return None;
    }
    u8::try_from(digit).ok()
}

// === Tree Manipulation ===

/// Remove elements from the tree, descendants included.
#[inline]
pub fn remove(sel: &Selection) {
    sel.remove();
}

/// Replace the inner HTML of a selection.
#[inline]
pub fn set_inner_html(sel: &Selection, html: &str) {
    sel.set_html(html);
}

/// Insert an HTML fragment directly after an element, as its sibling.
///
/// `dom_query` has no insert-after primitive, so the element is replaced by
/// itself followed by the fragment.
pub fn insert_fragment_after(sel: &Selection, fragment: &str) {
    let own = outer_html(sel);
    sel.replace_with_html(format!("{own}{fragment}"));
}

// === Content Scoping ===

/// Select the container holding the article prose.
///
/// The designated `div.article-content` wins when present; otherwise the
/// whole `body` is the scope.
#[must_use]
pub fn content_scope(doc: &Document) -> Selection<'_> {
    let designated = doc.select(ARTICLE_CONTENT_SELECTOR);
    if designated.exists() {
        designated
    } else {
        doc.select("body")
    }
}

/// Plain-text projection of the article prose, whitespace-collapsed.
///
/// Uses the designated content container when present. Otherwise the page
/// chrome (`header`, `footer`, `nav`) is removed from a cloned tree first so
/// navigation labels never count as article words.
#[must_use]
pub fn content_text(doc: &Document) -> String {
    let designated = doc.select(ARTICLE_CONTENT_SELECTOR);
    let raw = if designated.exists() {
        designated.text()
    } else {
        let stripped = clone_document(doc);
        remove(&stripped.select(PAGE_CHROME_SELECTOR));
        let body = stripped.select("body");
        if body.exists() {
            body.text()
        } else {
            stripped.select("html").text()
        }
    };
    WHITESPACE_NORMALIZE.replace_all(raw.trim(), " ").to_string()
}

// === Escaping ===

/// Escape text for safe embedding in an HTML fragment or attribute value.
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
