//! Page fact extraction.
//!
//! One pass over the parsed document collects everything the rule
//! categories read, so each rule stays a pure function over `PageFacts`
//! and the document is never re-queried per category.

use dom_query::{Document, Selection};

use crate::dom;
use crate::patterns::{
    BODY_TAG_DECL, HEADINGS_SELECTOR, HEAD_TAG_DECL, HTML_TAG_DECL, HYPERLINK_SELECTOR,
    JSON_LD_SELECTOR,
};

/// One heading element in document order.
#[derive(Debug, Clone)]
pub struct Heading {
    pub level: u8,
    /// Trimmed text content.
    pub text: String,
}

/// One `<a href>` element in document order.
#[derive(Debug, Clone)]
pub struct Anchor {
    pub href: String,
    /// Raw text content, trimmed by the rules that need it.
    pub text: String,
    pub rel: Option<String>,
}

/// One `<img>` element in document order. Absent attributes are empty.
#[derive(Debug, Clone)]
pub struct Image {
    pub src: String,
    pub alt: String,
    pub title: String,
}

/// Everything the rule categories need to know about a page.
#[derive(Debug, Clone)]
pub struct PageFacts {
    /// Explicit `<html>` tag in the raw source. The parser synthesizes the
    /// skeleton, so fragments are detected on the source text.
    pub declares_html: bool,
    pub declares_head: bool,
    pub declares_body: bool,
    /// Non-empty `lang` attribute on `<html>`.
    pub html_lang: Option<String>,
    pub has_charset: bool,
    pub has_viewport: bool,
    /// Trimmed `<title>` text; `None` when the tag is absent.
    pub title: Option<String>,
    /// Trimmed meta description content; `None` when the tag is absent.
    pub meta_description: Option<String>,
    pub headings: Vec<Heading>,
    pub anchors: Vec<Anchor>,
    pub images: Vec<Image>,
    pub canonical_href: Option<String>,
    pub robots_content: Option<String>,
    pub has_og_title: bool,
    pub has_og_description: bool,
    pub has_og_type: bool,
    pub has_twitter_card: bool,
    pub has_json_ld: bool,
    /// Whitespace-collapsed article prose (chrome excluded).
    pub content_text: String,
}

impl PageFacts {
    /// Collect all facts from a parsed document and its raw source.
    #[must_use]
    pub fn extract(doc: &Document, raw: &str) -> Self {
        let html_el = doc.select("html");

        Self {
            declares_html: HTML_TAG_DECL.is_match(raw),
            declares_head: HEAD_TAG_DECL.is_match(raw),
            declares_body: BODY_TAG_DECL.is_match(raw),
            html_lang: dom::get_attribute(&html_el, "lang").filter(|l| !l.is_empty()),
            has_charset: doc.select("meta[charset]").exists(),
            has_viewport: doc.select("meta[name='viewport']").exists(),
            title: extract_first_text(doc, "title"),
            meta_description: extract_first_attribute(doc, "meta[name='description']", "content"),
            headings: extract_headings(doc),
            anchors: extract_anchors(doc),
            images: extract_images(doc),
            canonical_href: extract_first_attribute(doc, "link[rel='canonical']", "href"),
            robots_content: extract_first_attribute(doc, "meta[name='robots']", "content"),
            has_og_title: doc.select("meta[property='og:title']").exists(),
            has_og_description: doc.select("meta[property='og:description']").exists(),
            has_og_type: doc.select("meta[property='og:type']").exists(),
            has_twitter_card: doc.select("meta[name='twitter:card']").exists(),
            has_json_ld: doc.select(JSON_LD_SELECTOR).exists(),
            content_text: dom::content_text(doc),
        }
    }
}

/// Trimmed text of the first matching element, `None` when absent.
fn extract_first_text(doc: &Document, selector: &str) -> Option<String> {
    doc.select(selector).nodes().first().map(|node| {
        dom::text_content(&Selection::from(*node))
            .trim()
            .to_string()
    })
}

/// Trimmed attribute of the first matching element. A present element with
/// a missing attribute reads as an empty string, not as absence.
fn extract_first_attribute(doc: &Document, selector: &str, attribute: &str) -> Option<String> {
    doc.select(selector).nodes().first().map(|node| {
        dom::get_attribute(&Selection::from(*node), attribute)
            .unwrap_or_default()
            .trim()
            .to_string()
    })
}

fn extract_headings(doc: &Document) -> Vec<Heading> {
    let mut headings = Vec::new();
    for node in doc.select(HEADINGS_SELECTOR).nodes() {
        let heading = Selection::from(*node);
        if let Some(level) = dom::heading_level(&heading) {
            headings.push(Heading {
                level,
                text: dom::text_content(&heading).trim().to_string(),
            });
        }
    }
    headings
}

fn extract_anchors(doc: &Document) -> Vec<Anchor> {
    let mut anchors = Vec::new();
    for node in doc.select(HYPERLINK_SELECTOR).nodes() {
        let anchor = Selection::from(*node);
        anchors.push(Anchor {
            href: dom::get_attribute(&anchor, "href").unwrap_or_default(),
            text: dom::text_content(&anchor).to_string(),
            rel: dom::get_attribute(&anchor, "rel"),
        });
    }
    anchors
}

fn extract_images(doc: &Document) -> Vec<Image> {
    let mut images = Vec::new();
    for node in doc.select("img").nodes() {
        let img = Selection::from(*node);
        images.push(Image {
            src: dom::get_attribute(&img, "src").unwrap_or_default(),
            alt: dom::get_attribute(&img, "alt").unwrap_or_default(),
            title: dom::get_attribute(&img, "title").unwrap_or_default(),
        });
    }
    images
}
