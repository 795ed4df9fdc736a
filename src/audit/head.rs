//! Rule categories for the document head: skeleton structure, `<title>`,
//! meta description and technical tags.

use crate::options::AuditOptions;

use super::facts::PageFacts;
use super::{CategoryReport, PageMetrics};

/// Basic skeleton checks: explicit html/head/body declarations, `lang`,
/// charset and viewport.
pub(super) fn check_structure(facts: &PageFacts) -> CategoryReport {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    if !facts.declares_html {
        issues.push("Balise <html> manquante".to_string());
    }
    if !facts.declares_head {
        issues.push("Balise <head> manquante".to_string());
    }
    if !facts.declares_body {
        issues.push("Balise <body> manquante".to_string());
    }

    // The lang check only applies when the document declares <html> itself
    if facts.declares_html && facts.html_lang.is_none() {
        warnings.push("Attribut lang manquant sur la balise <html>".to_string());
    }

    if !facts.has_charset {
        issues.push("Déclaration charset manquante".to_string());
    }
    if !facts.has_viewport {
        warnings.push("Meta viewport manquante (responsive design)".to_string());
    }

    CategoryReport::from_penalties(issues, warnings, 20.0, 5.0)
}

pub(super) fn check_title(
    facts: &PageFacts,
    options: &AuditOptions,
    metrics: &mut PageMetrics,
) -> CategoryReport {
    let Some(title) = &facts.title else {
        return CategoryReport::missing("Balise <title> manquante");
    };

    let length = title.chars().count();
    metrics.title.clone_from(title);
    metrics.title_length = length;

    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    if length < options.title_min_chars {
        issues.push(format!(
            "Titre trop court ({length} chars, minimum {})",
            options.title_min_chars
        ));
    } else if length > options.title_max_chars {
        warnings.push(format!(
            "Titre long ({length} chars, optimal < {})",
            options.title_max_chars
        ));
    }

    let title_lower = title.to_lowercase();
    let keywords_found: Vec<String> = options
        .target_keywords
        .iter()
        .filter(|kw| title_lower.contains(kw.as_str()))
        .cloned()
        .collect();
    if keywords_found.is_empty() {
        warnings.push("Aucun mot-clé cible trouvé dans le titre".to_string());
    }
    metrics.title_keywords = keywords_found;

    if title.contains('|') || title.contains(" - ") {
        warnings.push("Éviter les séparateurs '|' ou ' - ' dans le titre".to_string());
    }

    CategoryReport::from_penalties(issues, warnings, 30.0, 10.0)
}

pub(super) fn check_meta_description(
    facts: &PageFacts,
    options: &AuditOptions,
    metrics: &mut PageMetrics,
) -> CategoryReport {
    let Some(description) = &facts.meta_description else {
        return CategoryReport::missing("Meta description manquante");
    };

    let length = description.chars().count();
    metrics.description.clone_from(description);
    metrics.description_length = length;

    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    if length < options.meta_desc_min_chars {
        issues.push(format!(
            "Meta description trop courte ({length} chars, minimum {})",
            options.meta_desc_min_chars
        ));
    } else if length > options.meta_desc_max_chars {
        warnings.push(format!(
            "Meta description longue ({length} chars, optimal < {})",
            options.meta_desc_max_chars
        ));
    }

    let description_lower = description.to_lowercase();
    if !options
        .target_keywords
        .iter()
        .any(|kw| description_lower.contains(kw.as_str()))
    {
        warnings.push("Aucun mot-clé cible trouvé dans la meta description".to_string());
    }

    CategoryReport::from_penalties(issues, warnings, 30.0, 10.0)
}

/// Canonical, robots, Open Graph, Twitter Card and JSON-LD presence.
pub(super) fn check_technical(facts: &PageFacts, metrics: &mut PageMetrics) -> CategoryReport {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    match &facts.canonical_href {
        None => warnings.push("Balise canonical manquante".to_string()),
        Some(href) if !href.starts_with("https://") => {
            warnings.push("URL canonical non HTTPS".to_string());
        }
        Some(_) => {}
    }

    match &facts.robots_content {
        None => warnings.push("Meta robots manquante".to_string()),
        Some(content) => {
            let content = content.to_lowercase();
            if content.contains("noindex") {
                issues.push("Page configurée en noindex".to_string());
            }
            if content.contains("nofollow") {
                warnings.push("Page configurée en nofollow".to_string());
            }
        }
    }

    if !facts.has_og_title {
        warnings.push("Open Graph title manquant".to_string());
    }
    if !facts.has_og_description {
        warnings.push("Open Graph description manquante".to_string());
    }
    if !facts.has_og_type {
        warnings.push("Open Graph type manquant".to_string());
    }
    if !facts.has_twitter_card {
        warnings.push("Twitter Card manquante".to_string());
    }
    if !facts.has_json_ld {
        warnings.push("Données structurées JSON-LD manquantes".to_string());
    }

    metrics.has_canonical = facts.canonical_href.is_some();
    metrics.has_og_tags = facts.has_og_title && facts.has_og_description && facts.has_og_type;
    metrics.has_twitter_card = facts.has_twitter_card;
    metrics.has_json_ld = facts.has_json_ld;

    CategoryReport::from_penalties(issues, warnings, 20.0, 3.0)
}
