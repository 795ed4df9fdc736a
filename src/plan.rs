//! Greedy promotional link planning.
//!
//! Converts a [`ContentAnalysis`](crate::analyze::ContentAnalysis) into a
//! concrete list of links to insert: which page, which sentence, which
//! anchor phrasing. Pages are served in relevance order and each one takes
//! the best-scoring sentence still far enough from every committed link.
//! Anchor phrasing is drawn from a seeded RNG, so a fixed seed yields a
//! byte-identical plan.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

use crate::analyze::{ContentAnalysis, PageCatalog, SentencePosition, SentenceSite};
use crate::options::WeaveOptions;
use crate::text;

const CALL_TO_ACTION_TEMPLATES: [&str; 4] = [
    "Découvrez nos {service} sur Seminary",
    "En savoir plus sur {service}",
    "Consultez {service} Seminary",
    "Accédez à {service}",
];

const CONTEXTUAL_TEMPLATES: [&str; 4] = [
    "comme le montrent nos {service}",
    "selon nos {service}",
    "grâce à nos {service}",
    "via notre système de {service}",
];

const NATURAL_TEMPLATES: [&str; 4] = [
    "nos {service}",
    "le système {service} de Seminary",
    "notre plateforme {service}",
    "les {service} Seminary",
];

/// Anchor phrasing family, chosen from where the sentence sits in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStyle {
    CallToAction,
    Contextual,
    Natural,
}

impl LinkStyle {
    /// Opening sentences get discreet contextual phrasing, closing ones a
    /// call to action, everything in between reads as plain prose.
    fn for_position(position: SentencePosition) -> Self {
        match position {
            SentencePosition::Beginning => Self::Contextual,
            SentencePosition::Middle => Self::Natural,
            SentencePosition::End => Self::CallToAction,
        }
    }

    fn templates(self) -> &'static [&'static str] {
        match self {
            Self::CallToAction => &CALL_TO_ACTION_TEMPLATES,
            Self::Contextual => &CONTEXTUAL_TEMPLATES,
            Self::Natural => &NATURAL_TEMPLATES,
        }
    }
}

/// One link the mutator should insert.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedLink {
    pub page_key: String,
    pub url: String,
    /// Rendered anchor text, service name already substituted.
    pub anchor_text: String,
    /// Anchor `title` attribute.
    pub title: String,
    /// Catalog keyword present in the chosen sentence. The mutator wraps
    /// its first occurrence in that sentence's paragraph.
    pub keyword: String,
    /// First 50 characters of the chosen sentence, used to locate the
    /// paragraph in the document.
    pub sentence_prefix: String,
    /// Character offset of the chosen sentence in the prose.
    pub char_position: usize,
    pub style: LinkStyle,
    /// Page relevance divided by 5.0.
    pub confidence: f64,
}

/// The full set of planned links plus a whole-plan confidence score.
#[derive(Debug, Clone, Serialize)]
pub struct IntegrationPlan {
    /// Links in planning order (most relevant page first).
    pub links: Vec<PlannedLink>,
    /// Confidence in [0, 1]; below the commit threshold the plan is dropped.
    pub confidence: f64,
}

impl IntegrationPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Plan promotional links for analyzed content.
///
/// Pages are ranked by relevance (catalog order breaks ties) and capped at
/// `options.max_links`. Each page greedily claims its best sentence among
/// those farther than `options.min_spacing` characters from every link
/// already planned; a page with no eligible sentence left is skipped.
#[must_use]
pub fn plan_links(
    analysis: &ContentAnalysis,
    catalog: &PageCatalog,
    options: &WeaveOptions,
) -> IntegrationPlan {
    let mut rng = StdRng::seed_from_u64(options.seed);

    let mut ranked: Vec<_> = analysis.page_relevance.iter().collect();
    ranked.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));

    let mut links: Vec<PlannedLink> = Vec::new();
    let mut used_positions: Vec<usize> = Vec::new();

    for relevance in ranked.into_iter().take(options.max_links) {
        let Some(target) = catalog.get(&relevance.page_key) else {
            continue;
        };
        let Some(site) =
            best_site_for_page(&target.key, &analysis.sites, &used_positions, options.min_spacing)
        else {
            continue;
        };

        let sentence_lower = site.text.to_lowercase();
        let Some(keyword) = target
            .keywords
            .iter()
            .find(|kw| sentence_lower.contains(kw.as_str()))
        else {
            continue;
        };

        let style = LinkStyle::for_position(site.position);
        let anchor_text = render_anchor(style, &target.service_name, &mut rng);

        links.push(PlannedLink {
            page_key: target.key.clone(),
            url: target.url.clone(),
            anchor_text,
            title: target.title.clone(),
            keyword: keyword.clone(),
            sentence_prefix: text::truncate_chars(&site.text, 50).to_string(),
            char_position: site.char_position,
            style,
            confidence: relevance.relevance / 5.0,
        });
        used_positions.push(site.char_position);
    }

    let confidence = plan_confidence(&links, analysis.word_count, options.words_per_link);
    debug!("planned {} link(s), confidence {confidence:.2}", links.len());

    IntegrationPlan { links, confidence }
}

/// Best sentence for one page under the spacing constraint.
///
/// Candidates score `keyword_hits * 2 + min_distance / 100`. With no link
/// committed yet every distance is infinite, all scores tie, and the
/// earliest sentence in document order wins.
fn best_site_for_page<'a>(
    page_key: &str,
    sites: &'a [SentenceSite],
    used_positions: &[usize],
    min_spacing: usize,
) -> Option<&'a SentenceSite> {
    let mut candidates: Vec<(&SentenceSite, f64)> = Vec::new();

    for site in sites {
        let Some(opportunity) = site.opportunities.iter().find(|o| o.page_key == page_key) else {
            continue;
        };

        let min_distance = used_positions
            .iter()
            .map(|&used| site.char_position.abs_diff(used))
            .min()
            .map_or(f64::INFINITY, |d| d as f64);

        if min_distance > min_spacing as f64 {
            let score = opportunity.keyword_hits as f64 * 2.0 + min_distance / 100.0;
            candidates.push((site, score));
        }
    }

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates.first().map(|(site, _)| *site)
}

fn render_anchor(style: LinkStyle, service_name: &str, rng: &mut StdRng) -> String {
    let family = style.templates();
    let template = family.choose(rng).copied().unwrap_or(family[0]);
    template.replace("{service}", service_name)
}

/// Whole-plan confidence: average link confidence weighted with page
/// diversity and how close the link count sits to one link per
/// `words_per_link` words (capped at three).
fn plan_confidence(links: &[PlannedLink], word_count: usize, words_per_link: usize) -> f64 {
    if links.is_empty() {
        return 0.0;
    }

    let avg_confidence =
        links.iter().map(|l| l.confidence).sum::<f64>() / links.len() as f64;

    let mut unique_pages: Vec<&str> = Vec::new();
    for link in links {
        if !unique_pages.contains(&link.page_key.as_str()) {
            unique_pages.push(&link.page_key);
        }
    }
    let diversity = unique_pages.len() as f64 / links.len() as f64;

    let optimal = (word_count / words_per_link.max(1)).clamp(1, 3);
    let count_score = 1.0 - links.len().abs_diff(optimal) as f64 * 0.2;

    let confidence = avg_confidence * 0.6 + diversity * 0.2 + count_score * 0.2;
    confidence.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze_content;

    fn plan_for(content: &str, title: &str, options: &WeaveOptions) -> IntegrationPlan {
        let catalog = PageCatalog::default();
        let analysis = analyze_content(content, title, &catalog);
        plan_links(&analysis, &catalog, options)
    }

    #[test]
    fn test_empty_analysis_empty_plan() {
        let plan = plan_for("Le chat dort sur le canapé.", "", &WeaveOptions::default());

        assert!(plan.is_empty());
        assert!((plan.confidence - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_first_link_takes_earliest_sentence() {
        // the later sentence has more keyword hits, but with no committed
        // link yet all candidates tie and document order decides
        let content = "Nos données parlent. Un point neutre au milieu du texte. \
                       Les statistiques, les métriques et les chiffres abondent.";
        let plan = plan_for(content, "", &WeaveOptions::default());

        assert_eq!(plan.links.len(), 1);
        assert_eq!(plan.links[0].page_key, "statistiques");
        assert_eq!(plan.links[0].char_position, 0);
        assert_eq!(plan.links[0].keyword, "données");
    }

    #[test]
    fn test_spacing_suppresses_close_second_link() {
        // both candidate sentences sit well under 150 characters apart
        let content = "Les statistiques comptent. Pensez à réserver vite.";
        let plan = plan_for(content, "Performance", &WeaveOptions::default());

        assert_eq!(plan.links.len(), 1);
        assert_eq!(plan.links[0].page_key, "statistiques");
    }

    #[test]
    fn test_relaxed_spacing_allows_second_link() {
        let content = "Les statistiques comptent. Pensez à réserver vite.";
        let options = WeaveOptions {
            min_spacing: 10,
            ..WeaveOptions::default()
        };
        let plan = plan_for(content, "Performance", &options);

        assert_eq!(plan.links.len(), 2);
        assert_eq!(plan.links[1].page_key, "reservations");
    }

    #[test]
    fn test_max_links_cap() {
        let filler = "toujours plus loin vraiment bien ".repeat(6);
        let content = format!(
            "Les statistiques {filler}étonnent. Pensez à réserver {filler}rapidement. \
             Nos prestataires {filler}répondent. Les actualités {filler}circulent. \
             Seminary {filler}rayonne."
        );
        let plan = plan_for(&content, "", &WeaveOptions::default());

        assert_eq!(plan.links.len(), 4);
        // equal relevance falls back to catalog priority, dropping the
        // home page
        assert_eq!(plan.links[0].page_key, "statistiques");
        assert!(plan.links.iter().all(|l| l.page_key != "accueil"));
    }

    #[test]
    fn test_anchor_drawn_from_contextual_family() {
        // a single opening sentence lands in the beginning tercile
        let plan = plan_for(
            "Les statistiques racontent une histoire.",
            "",
            &WeaveOptions::default(),
        );

        let link = &plan.links[0];
        assert_eq!(link.style, LinkStyle::Contextual);
        let rendered: Vec<String> = CONTEXTUAL_TEMPLATES
            .iter()
            .map(|t| t.replace("{service}", "statistiques détaillées"))
            .collect();
        assert!(
            rendered.contains(&link.anchor_text),
            "unexpected anchor: {}",
            link.anchor_text
        );
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let content = "Les statistiques racontent une histoire.";
        let a = plan_for(content, "", &WeaveOptions::default());
        let b = plan_for(content, "", &WeaveOptions::default());

        assert_eq!(a.links[0].anchor_text, b.links[0].anchor_text);
        assert!((a.confidence - b.confidence).abs() < f64::EPSILON);
    }

    #[test]
    fn test_seed_varies_phrasing() {
        let content = "Les statistiques racontent une histoire.";
        let mut anchors: Vec<String> = Vec::new();
        for seed in 0..20 {
            let options = WeaveOptions {
                seed,
                ..WeaveOptions::default()
            };
            let anchor = plan_for(content, "", &options).links[0].anchor_text.clone();
            if !anchors.contains(&anchor) {
                anchors.push(anchor);
            }
        }

        assert!(anchors.len() > 1, "20 seeds produced a single phrasing");
    }

    #[test]
    fn test_sentence_prefix_is_bounded() {
        let long_sentence = format!("Les statistiques {} confirment.", "encore et encore ".repeat(10));
        let plan = plan_for(&long_sentence, "", &WeaveOptions::default());

        assert_eq!(plan.links[0].sentence_prefix.chars().count(), 50);
        assert!(plan.links[0].sentence_prefix.starts_with("Les statistiques"));
    }

    #[test]
    fn test_plan_confidence_formula() {
        // single link, relevance 1.0: link confidence 0.2, diversity 1.0,
        // optimal count 1 so the count score is 1.0
        let plan = plan_for("Les statistiques parlent beaucoup ici.", "", &WeaveOptions::default());

        assert_eq!(plan.links.len(), 1);
        assert!((plan.links[0].confidence - 0.2).abs() < 1e-9);
        assert!((plan.confidence - 0.52).abs() < 1e-9);
    }
}
