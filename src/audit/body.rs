//! Rule categories for the document body: heading hierarchy, content
//! quality, link profile and images.

use url::Url;

use crate::options::AuditOptions;
use crate::text;

use super::facts::PageFacts;
use super::{CategoryReport, KeywordDensity, PageMetrics};

/// Anchor texts too generic to describe their target.
const POOR_ANCHOR_TEXTS: [&str; 5] = ["cliquez ici", "ici", "lire plus", "voir plus", "click here"];

pub(super) fn check_headings(facts: &PageFacts, metrics: &mut PageMetrics) -> CategoryReport {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    let levels: Vec<u8> = facts.headings.iter().map(|h| h.level).collect();
    let h1_count = levels.iter().filter(|&&l| l == 1).count();

    if h1_count == 0 {
        issues.push("Aucun H1 trouvé".to_string());
    } else if h1_count > 1 {
        issues.push(format!("Plusieurs H1 trouvés ({h1_count}), un seul recommandé"));
    }

    // Walk the hierarchy; a heading more than one level deeper than the
    // previous one is a skipped level
    let mut current_level = if h1_count > 0 { 1 } else { 2 };
    for (i, &level) in levels.iter().enumerate() {
        if level > current_level + 1 {
            let previous = if i > 0 {
                levels[i - 1].to_string()
            } else {
                "début".to_string()
            };
            warnings.push(format!("Saut de niveau détecté: {previous} → H{level}"));
        }
        current_level = level;
    }

    let empty_count = facts.headings.iter().filter(|h| h.text.is_empty()).count();
    if empty_count > 0 {
        issues.push(format!("{empty_count} titre(s) vide(s)"));
    }

    metrics.h1_count = h1_count;
    metrics.total_headings = facts.headings.len();
    metrics.heading_levels = levels;

    CategoryReport::from_penalties(issues, warnings, 25.0, 5.0)
}

pub(super) fn check_content(
    facts: &PageFacts,
    options: &AuditOptions,
    metrics: &mut PageMetrics,
) -> CategoryReport {
    let content = &facts.content_text;
    let word_count = text::word_count(content);

    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    if word_count < options.content_min_words {
        issues.push(format!(
            "Contenu trop court ({word_count} mots, minimum {})",
            options.content_min_words
        ));
    } else if word_count > options.content_max_words {
        warnings.push(format!(
            "Contenu très long ({word_count} mots, optimal < {})",
            options.content_max_words
        ));
    }

    let content_lower = content.to_lowercase();
    let keyword_counts: Vec<KeywordDensity> = options
        .target_keywords
        .iter()
        .map(|keyword| {
            let count = text::count_occurrences(&content_lower, &keyword.to_lowercase());
            let density = if word_count > 0 {
                count as f64 / word_count as f64 * 100.0
            } else {
                0.0
            };
            KeywordDensity {
                keyword: keyword.clone(),
                count,
                density,
            }
        })
        .collect();

    let total_density: f64 = options
        .density_keywords
        .iter()
        .map(|core| {
            keyword_counts
                .iter()
                .find(|kd| &kd.keyword == core)
                .map_or(0.0, |kd| kd.density)
        })
        .sum();

    if total_density < options.keyword_density_min {
        warnings.push(format!("Densité de mots-clés faible ({total_density:.1}%)"));
    } else if total_density > options.keyword_density_max {
        warnings.push(format!("Densité de mots-clés élevée ({total_density:.1}%)"));
    }

    let sentence_count = text::split_sentences(content)
        .iter()
        .filter(|s| !s.trim().is_empty())
        .count();
    let avg_sentence_length = if sentence_count > 0 {
        word_count as f64 / sentence_count as f64
    } else {
        0.0
    };
    if avg_sentence_length > options.long_sentence_words {
        warnings.push(format!(
            "Phrases longues en moyenne ({avg_sentence_length:.1} mots/phrase)"
        ));
    }

    metrics.word_count = word_count;
    metrics.keyword_density = total_density;
    metrics.keyword_counts = keyword_counts;
    metrics.avg_sentence_length = avg_sentence_length;

    CategoryReport::from_penalties(issues, warnings, 20.0, 5.0)
}

pub(super) fn check_links(
    facts: &PageFacts,
    options: &AuditOptions,
    metrics: &mut PageMetrics,
) -> CategoryReport {
    let mut seminary = Vec::new();
    let mut internal = Vec::new();
    let mut external = Vec::new();

    for anchor in &facts.anchors {
        let href = anchor.href.as_str();
        if href.starts_with("http") {
            if is_own_domain(href, &options.internal_domains) {
                seminary.push(anchor);
            } else {
                external.push(anchor);
            }
        } else if href.starts_with('/') || href.starts_with("./") || href.starts_with("../") {
            internal.push(anchor);
        }
        // Bare fragments, mailto: and other schemes are out of scope
    }

    let mut warnings = Vec::new();

    if seminary.len() < options.promo_links_min {
        warnings.push(format!(
            "Peu de liens vers Seminary ({}, recommandé ≥ {})",
            seminary.len(),
            options.promo_links_min
        ));
    } else if seminary.len() > options.promo_links_max {
        warnings.push(format!(
            "Beaucoup de liens Seminary ({}, optimal ≤ {})",
            seminary.len(),
            options.promo_links_max
        ));
    }

    let mut poor_anchors: Vec<String> = Vec::new();
    for anchor in seminary.iter().chain(internal.iter()) {
        let anchor_text = anchor.text.trim().to_lowercase();
        if POOR_ANCHOR_TEXTS.contains(&anchor_text.as_str())
            && !poor_anchors.contains(&anchor_text)
        {
            poor_anchors.push(anchor_text);
        }
    }
    if !poor_anchors.is_empty() {
        warnings.push(format!(
            "Textes d'ancre peu descriptifs: {}",
            poor_anchors.join(", ")
        ));
    }

    let without_nofollow = external
        .iter()
        .filter(|a| {
            !a.rel
                .as_deref()
                .unwrap_or("")
                .split_whitespace()
                .any(|token| token == "nofollow")
        })
        .count();
    if without_nofollow > options.external_nofollow_threshold {
        warnings.push(format!("{without_nofollow} liens externes sans nofollow"));
    }

    metrics.seminary_links = seminary.len();
    metrics.internal_links = internal.len();
    metrics.external_links = external.len();
    metrics.poor_anchor_texts = poor_anchors;

    CategoryReport::from_penalties(Vec::new(), warnings, 20.0, 5.0)
}

/// True when an absolute URL points at one of the site's own hosts.
fn is_own_domain(href: &str, own_domains: &[String]) -> bool {
    let Ok(url) = Url::parse(href) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };
    own_domains.iter().any(|domain| host.contains(domain.as_str()))
}

pub(super) fn check_images(
    facts: &PageFacts,
    options: &AuditOptions,
    metrics: &mut PageMetrics,
) -> CategoryReport {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    let mut without_alt = 0usize;
    let mut without_title = 0usize;

    for image in &facts.images {
        if image.alt.is_empty() {
            without_alt += 1;
        } else if image.alt.chars().count() > options.max_alt_chars {
            warnings.push(format!("Attribut alt très long pour {}", image.src));
        }
        if image.title.is_empty() {
            without_title += 1;
        }
    }

    // Aggregate issue, never one per image
    if without_alt > 0 {
        issues.push(format!("{without_alt} image(s) sans attribut alt"));
    }
    if without_title > 0 {
        warnings.push(format!("{without_title} image(s) sans attribut title"));
    }

    metrics.total_images = facts.images.len();
    metrics.images_without_alt = without_alt;
    metrics.images_without_title = without_title;

    CategoryReport::from_penalties(issues, warnings, 25.0, 5.0)
}
