//! Document mutation: splicing planned links and illustration fragments
//! into an article's tree.
//!
//! The document is parsed once, every mutation runs through the tree API,
//! and the result is serialized once. A post-mutation integrity check
//! guards against structural corruption: a document that lost its root or
//! shrank below 80% of its input length is discarded wholesale and the
//! caller gets the original bytes back.

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analyze::{self, ContentAnalysis, PageCatalog};
use crate::dom::{self, Document, Selection};
use crate::options::WeaveOptions;
use crate::plan::{self, IntegrationPlan, PlannedLink};
use crate::text;

/// Result of one weaving run over an article.
#[derive(Debug, Clone, Serialize)]
pub struct WeaveOutcome {
    /// Serialized document; the original input when nothing was committed.
    pub html: String,
    /// Links actually spliced into paragraphs, not merely planned.
    pub links_added: usize,
    /// Confidence of the underlying plan.
    pub confidence: f64,
    pub analysis: ContentAnalysis,
    pub plan: IntegrationPlan,
}

/// Weave promotional links into an article with default settings.
#[must_use]
pub fn weave(html: &str) -> WeaveOutcome {
    weave_with_options(html, &WeaveOptions::default())
}

/// Weave promotional links with custom constraints.
#[must_use]
pub fn weave_with_options(html: &str, options: &WeaveOptions) -> WeaveOutcome {
    weave_article(html, None, &PageCatalog::default(), options)
}

/// Full-control weaving entry point with explicit title and catalog.
///
/// When `title` is `None` the first `h1`'s text stands in, then the
/// document `<title>`. The pipeline passes the known headline instead.
#[must_use]
pub fn weave_article(
    html: &str,
    title: Option<&str>,
    catalog: &PageCatalog,
    options: &WeaveOptions,
) -> WeaveOutcome {
    let doc = dom::parse(html);

    let content = dom::content_text(&doc);
    let detected;
    let title = match title {
        Some(t) => t,
        None => {
            detected = detect_title(&doc);
            detected.as_str()
        }
    };

    let analysis = analyze::analyze_content(&content, title, catalog);
    let plan = plan::plan_links(&analysis, catalog, options);

    if plan.is_empty() || plan.confidence <= options.commit_threshold {
        info!("integration plan rejected (confidence {:.2})", plan.confidence);
        return WeaveOutcome {
            html: html.to_string(),
            links_added: 0,
            confidence: plan.confidence,
            analysis,
            plan,
        };
    }

    let links_added = apply_links(&doc, &plan.links);
    if links_added == 0 {
        info!("no planned link found an insertion point");
        return WeaveOutcome {
            html: html.to_string(),
            links_added: 0,
            confidence: plan.confidence,
            analysis,
            plan,
        };
    }

    let output = doc.html().to_string();
    if !passes_integrity(&doc, html, &output) {
        warn!("mutation discarded: integrity check failed");
        return WeaveOutcome {
            html: html.to_string(),
            links_added: 0,
            confidence: plan.confidence,
            analysis,
            plan,
        };
    }

    info!("links woven: {links_added}/{}", plan.links.len());
    WeaveOutcome {
        html: output,
        links_added,
        confidence: plan.confidence,
        analysis,
        plan,
    }
}

/// Headline for analysis when the caller did not supply one.
fn detect_title(doc: &Document) -> String {
    if let Some(node) = doc.select("h1").nodes().first() {
        return Selection::from(*node).text().to_string();
    }
    doc.select("title")
        .nodes()
        .first()
        .map(|node| Selection::from(*node).text().to_string())
        .unwrap_or_default()
}

fn apply_links(doc: &Document, links: &[PlannedLink]) -> usize {
    let scope = dom::content_scope(doc);
    let mut added = 0;

    for link in links {
        if insert_link(&scope, link) {
            debug!("link woven for page '{}'", link.page_key);
            added += 1;
        } else {
            warn!("no insertion point for page '{}', link dropped", link.page_key);
        }
    }

    added
}

/// Insert one planned link into the first paragraph carrying its sentence.
///
/// Only that paragraph is tried; a paragraph whose markup lost the keyword
/// drops the link rather than falling through to another sentence.
fn insert_link(scope: &Selection, link: &PlannedLink) -> bool {
    for node in scope.select("p").nodes() {
        let p = Selection::from(*node);
        let p_text = p.text().to_string();
        if text::normalize_whitespace(&p_text).contains(link.sentence_prefix.as_str()) {
            return splice_anchor(&p, &p_text, link);
        }
    }
    false
}

/// Replace the first whole-word keyword occurrence with the anchor element,
/// re-splicing the surrounding text so nothing else is lost.
fn splice_anchor(p: &Selection, p_text: &str, link: &PlannedLink) -> bool {
    let Ok(pattern) = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&link.keyword))) else {
        return false;
    };
    let Some(found) = pattern.find(p_text) else {
        return false;
    };

    let anchor = format!(
        r#"<a href="{}" title="{}" target="_blank" rel="noopener" class="seminary-link">{}</a>"#,
        dom::escape_html(&link.url),
        dom::escape_html(&link.title),
        dom::escape_html(&link.anchor_text),
    );
    let rebuilt = format!(
        "{}{anchor}{}",
        dom::escape_html(&p_text[..found.start()]),
        dom::escape_html(&p_text[found.end()..]),
    );
    dom::set_inner_html(p, &rebuilt);
    true
}

/// Structural integrity of a mutated document: the root element survived
/// and serialization did not shrink below 80% of the input.
fn passes_integrity(doc: &Document, input: &str, output: &str) -> bool {
    if doc.select("html").nodes().first().is_none() {
        return false;
    }
    output.len() as f64 >= input.len() as f64 * 0.8
}

/// Embed illustration fragments after evenly spaced paragraphs.
///
/// The i-th fragment lands after the paragraph at the (i+1)-th of
/// `count + 1` even divisions of the content scope, wrapped in a
/// `visual-illustration` container. At most `max_fragments` are embedded.
/// The weaving integrity rule applies: a broken result returns the input.
#[must_use]
pub fn insert_illustrations(html: &str, fragments: &[String], max_fragments: usize) -> String {
    let count = fragments.len().min(max_fragments);
    if count == 0 {
        return html.to_string();
    }

    let doc = dom::parse(html);
    let scope = dom::content_scope(&doc);
    let paragraphs = scope.select("p");
    let nodes = paragraphs.nodes();
    if nodes.is_empty() {
        debug!("no paragraphs to illustrate");
        return html.to_string();
    }

    let mut used_targets: Vec<usize> = Vec::new();
    let mut inserted = 0;
    for (i, fragment) in fragments.iter().take(count).enumerate() {
        let target = (nodes.len() * (i + 1) / (count + 1)).min(nodes.len() - 1);
        if used_targets.contains(&target) {
            continue;
        }
        used_targets.push(target);

        let p = Selection::from(nodes[target]);
        let wrapped = format!(r#"<div class="visual-illustration">{fragment}</div>"#);
        dom::insert_fragment_after(&p, &wrapped);
        inserted += 1;
    }

    if inserted == 0 {
        return html.to_string();
    }

    let output = doc.html().to_string();
    if passes_integrity(&doc, html, &output) {
        info!("illustrations embedded: {inserted}");
        output
    } else {
        warn!("illustration embedding discarded: integrity check failed");
        html.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::LinkStyle;

    fn article_page(paragraphs: &[&str]) -> String {
        let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
        format!(
            "<html><head><title>Guide Seminary</title></head><body>\
             <header><h1>Guide complet</h1></header>\
             <div class=\"article-content\">{body}</div></body></html>"
        )
    }

    fn sample_link(prefix: &str, keyword: &str) -> PlannedLink {
        PlannedLink {
            page_key: "statistiques".to_string(),
            url: "https://goseminary.com/statistics".to_string(),
            anchor_text: "nos statistiques détaillées".to_string(),
            title: "Statistiques des séminaires Seminary".to_string(),
            keyword: keyword.to_string(),
            sentence_prefix: prefix.to_string(),
            char_position: 0,
            style: LinkStyle::Natural,
            confidence: 0.2,
        }
    }

    #[test]
    fn test_weave_splices_anchor_into_paragraph() {
        let html = article_page(&[
            "Les statistiques parlent beaucoup ici, tout le monde les consulte.",
        ]);
        let outcome = weave(&html);

        assert_eq!(outcome.links_added, 1);
        assert!(outcome.html.contains("seminary-link"));
        assert!(outcome.html.contains("https://goseminary.com/statistics"));
        assert!(outcome.html.contains(r#"target="_blank""#));
        assert!(outcome.html.contains(r#"rel="noopener""#));
        assert!(outcome.html.contains("statistiques détaillées"));
        // surrounding sentence text survives the splice
        assert!(outcome.html.contains("parlent beaucoup ici, tout le monde les consulte."));
    }

    #[test]
    fn test_weave_leaves_neutral_content_unchanged() {
        let html = article_page(&["Le chat dort profondément sur le canapé moelleux."]);
        let outcome = weave(&html);

        assert_eq!(outcome.links_added, 0);
        assert_eq!(outcome.html, html);
        assert!((outcome.confidence - 0.0).abs() < f64::EPSILON);
        assert!(outcome.plan.is_empty());
    }

    #[test]
    fn test_weave_falls_back_to_body_scope() {
        let html = "<html><body><h1>Guide complet</h1>\
                    <p>Bienvenue sur ce guide pratique.</p>\
                    <p>Les statistiques parlent beaucoup ici, chacun les consulte.</p>\
                    </body></html>";
        let outcome = weave(html);

        assert_eq!(outcome.links_added, 1);
        assert!(outcome.html.contains("seminary-link"));
    }

    #[test]
    fn test_link_without_matching_paragraph_is_dropped() {
        let doc = dom::parse(&article_page(&["Texte sans rapport aucun."]));
        let scope = dom::content_scope(&doc);
        let link = sample_link("Une phrase absente du document", "statistiques");

        assert!(!insert_link(&scope, &link));
    }

    #[test]
    fn test_keyword_match_requires_word_boundary() {
        let doc = dom::parse(&article_page(&["Les statistiquesweb parlent fort."]));
        let scope = dom::content_scope(&doc);
        let link = sample_link("Les statistiquesweb parlent fort", "statistiques");

        assert!(!insert_link(&scope, &link));
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let doc = dom::parse(&article_page(&["Statistiques fiables pour tous les lecteurs."]));
        let scope = dom::content_scope(&doc);
        let link = sample_link("Statistiques fiables pour tous les lecteurs", "statistiques");

        assert!(insert_link(&scope, &link));
        assert!(doc.select("a.seminary-link").exists());
    }

    #[test]
    fn test_splice_escapes_surrounding_text() {
        let doc = dom::parse(&article_page(&["Vous & moi aimons les statistiques vraiment."]));
        let scope = dom::content_scope(&doc);
        let link = sample_link("Vous & moi aimons les statistiques vraiment", "statistiques");

        assert!(insert_link(&scope, &link));
        let p_html = doc.select("div.article-content p").html().to_string();
        assert!(p_html.contains("Vous &amp; moi aimons les "));
        assert!(p_html.contains(" vraiment."));
    }

    #[test]
    fn test_integrity_rejects_shrunken_output() {
        let doc = dom::parse("<html><body><p>court</p></body></html>");
        let long_input = "x".repeat(1000);
        let output = doc.html().to_string();

        assert!(!passes_integrity(&doc, &long_input, &output));
    }

    #[test]
    fn test_integrity_accepts_grown_output() {
        let input = "<html><body><p>texte</p></body></html>";
        let doc = dom::parse(input);
        let output = doc.html().to_string();

        assert!(passes_integrity(&doc, input, &output));
    }

    #[test]
    fn test_illustration_lands_between_paragraphs() {
        let html = article_page(&["Un.", "Deux.", "Trois.", "Quatre."]);
        let fragments = vec![r#"<div class="seminary-icon-grid">icônes</div>"#.to_string()];

        let output = insert_illustrations(&html, &fragments, 2);

        assert_eq!(output.matches("visual-illustration").count(), 1);
        let trois = output.find("Trois").expect("third paragraph");
        let quatre = output.find("Quatre").expect("fourth paragraph");
        let illustration = output.find("visual-illustration").expect("fragment");
        assert!(trois < illustration && illustration < quatre);
    }

    #[test]
    fn test_illustrations_spread_and_respect_cap() {
        let html = article_page(&["Un.", "Deux.", "Trois.", "Quatre."]);
        let fragments = vec![
            r#"<div class="seminary-icon-grid">a</div>"#.to_string(),
            r#"<div class="seminary-chart-container">b</div>"#.to_string(),
            r#"<div class="seminary-infographic">c</div>"#.to_string(),
        ];

        let output = insert_illustrations(&html, &fragments, 2);

        assert_eq!(output.matches("visual-illustration").count(), 2);
        assert!(output.contains("seminary-icon-grid"));
        assert!(output.contains("seminary-chart-container"));
        assert!(!output.contains("seminary-infographic"));
    }

    #[test]
    fn test_single_paragraph_takes_one_illustration() {
        let html = article_page(&["Seul paragraphe."]);
        let fragments = vec![
            "<div>a</div>".to_string(),
            "<div>b</div>".to_string(),
        ];

        let output = insert_illustrations(&html, &fragments, 2);

        assert_eq!(output.matches("visual-illustration").count(), 1);
    }

    #[test]
    fn test_no_fragments_returns_input_verbatim() {
        let html = article_page(&["Un paragraphe."]);

        assert_eq!(insert_illustrations(&html, &[], 2), html);
        let fragments = vec!["<div>x</div>".to_string()];
        assert_eq!(insert_illustrations(&html, &fragments, 0), html);
    }

    #[test]
    fn test_document_without_paragraphs_unchanged() {
        let html = "<html><body>prose libre sans paragraphe</body></html>";
        let fragments = vec!["<div>x</div>".to_string()];

        assert_eq!(insert_illustrations(html, &fragments, 2), html);
    }
}
