//! Keyword and context analysis for promotional link placement.
//!
//! Scans an article's title and prose for mentions of the promoted target
//! pages, profiles the vocabulary into context clusters and segments the
//! prose into candidate insertion sentences. The output feeds the planner;
//! nothing here touches the document tree.

use serde::Serialize;
use tracing::debug;

use crate::text;

/// One promoted page with the vocabulary that triggers links to it.
#[derive(Debug, Clone)]
pub struct TargetPage {
    /// Stable identifier, also used in reports.
    pub key: String,
    pub url: String,
    /// Anchor `title` attribute text.
    pub title: String,
    pub description: String,
    /// Substrings whose presence marks a sentence as linkable to this page.
    pub keywords: Vec<String>,
    /// Wider vocabulary that raises the page's relevance score.
    pub contexts: Vec<String>,
    /// Display name substituted into anchor templates.
    pub service_name: String,
}

/// The set of pages links may point to, in priority order.
///
/// `Default::default()` is the production catalog of five Seminary pages.
/// Catalog order breaks relevance ties, so it doubles as a priority list.
#[derive(Debug, Clone)]
pub struct PageCatalog {
    pub pages: Vec<TargetPage>,
}

impl PageCatalog {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TargetPage> {
        self.pages.iter().find(|p| p.key == key)
    }
}

fn page(
    key: &str,
    url: &str,
    title: &str,
    description: &str,
    keywords: &[&str],
    contexts: &[&str],
    service_name: &str,
) -> TargetPage {
    TargetPage {
        key: key.to_string(),
        url: url.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        keywords: keywords.iter().map(|s| (*s).to_string()).collect(),
        contexts: contexts.iter().map(|s| (*s).to_string()).collect(),
        service_name: service_name.to_string(),
    }
}

impl Default for PageCatalog {
    fn default() -> Self {
        Self {
            pages: vec![
                page(
                    "statistiques",
                    "https://goseminary.com/statistics",
                    "Statistiques des séminaires Seminary",
                    "Données et métriques sur les séminaires organisés",
                    &["statistiques", "données", "métriques", "résultats", "chiffres", "analyse"],
                    &["performance", "efficacité", "résultats", "évaluation", "impact"],
                    "statistiques détaillées",
                ),
                page(
                    "reservations",
                    "https://goseminary.com/reservations",
                    "Réserver votre séminaire Seminary",
                    "Système de réservation en ligne pour vos événements",
                    &["réservation", "réserver", "booking", "planifier", "organiser", "dates"],
                    &["planification", "organisation", "réservation", "agenda", "disponibilités"],
                    "système de réservation",
                ),
                page(
                    "prestataires",
                    "https://goseminary.com/providers",
                    "Prestataires partenaires Seminary",
                    "Réseau de prestataires qualifiés pour vos séminaires",
                    &["prestataires", "partenaires", "fournisseurs", "services", "équipe", "experts"],
                    &["partenariat", "collaboration", "expertise", "services", "qualité"],
                    "réseau de prestataires",
                ),
                page(
                    "actualites",
                    "https://goseminary.com/news",
                    "Actualités Seminary",
                    "Dernières nouvelles et mises à jour Seminary",
                    &["actualités", "nouvelles", "news", "informations", "mise à jour"],
                    &["nouveautés", "évolutions", "annonces", "développements"],
                    "dernières actualités",
                ),
                page(
                    "accueil",
                    "https://goseminary.com/",
                    "Seminary - Organisateur de séminaires dans les Vosges",
                    "Plateforme complète pour organiser vos séminaires d'entreprise",
                    &["seminary", "séminaires", "vosges", "entreprise", "organisation"],
                    &["présentation", "découverte", "services", "offre globale"],
                    "plateforme Seminary",
                ),
            ],
        }
    }
}

/// One keyword occurrence in the lowercased title+prose projection.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordMatch {
    pub keyword: String,
    /// Character offset in the analyzed text.
    pub position: usize,
}

/// How strongly the analyzed text calls for a link to one page.
#[derive(Debug, Clone, Serialize)]
pub struct PageRelevance {
    pub page_key: String,
    pub matches: Vec<KeywordMatch>,
    /// Total keyword occurrences (`matches.len()`).
    pub occurrences: usize,
    /// Occurrences + 0.5 per context word present + 1.0 diversity bonus
    /// when at least two distinct keywords matched.
    pub relevance: f64,
}

/// Occurrence tally per context cluster, for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContextProfile {
    pub organizational: usize,
    pub performance: usize,
    pub planning: usize,
    pub collaboration: usize,
    pub innovation: usize,
}

impl ContextProfile {
    fn tally(text: &str) -> Self {
        let sum = |words: &[&str]| -> usize {
            words.iter().map(|w| text::count_occurrences(text, w)).sum()
        };
        Self {
            organizational: sum(&["organisation", "organiser", "structure", "gestion", "management"]),
            performance: sum(&["performance", "résultats", "efficacité", "productivité", "amélioration"]),
            planning: sum(&["planification", "planning", "agenda", "programmation", "calendrier"]),
            collaboration: sum(&["collaboration", "équipe", "teamwork", "partenariat", "ensemble"]),
            innovation: sum(&["innovation", "nouveauté", "créativité", "développement", "évolution"]),
        }
    }
}

/// Thirds of the sentence sequence, deciding the anchor phrasing style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentencePosition {
    Beginning,
    Middle,
    End,
}

impl SentencePosition {
    /// Bucket for raw sentence `index` out of `total` segments.
    fn for_index(index: usize, total: usize) -> Self {
        let i = index as f64;
        let n = total as f64;
        if i < n * 0.3 {
            Self::Beginning
        } else if i < n * 0.7 {
            Self::Middle
        } else {
            Self::End
        }
    }
}

/// A page's claim on one sentence.
#[derive(Debug, Clone, Serialize)]
pub struct PageOpportunity {
    pub page_key: String,
    /// Distinct page keywords present in the sentence.
    pub keyword_hits: usize,
}

/// A sentence where at least one page could be linked.
#[derive(Debug, Clone, Serialize)]
pub struct SentenceSite {
    /// Index in the raw segmentation, empty segments included.
    pub index: usize,
    pub position: SentencePosition,
    /// Running character offset over the trimmed sentences before this one.
    pub char_position: usize,
    pub word_count: usize,
    /// Trimmed sentence text.
    pub text: String,
    /// Claims in catalog order.
    pub opportunities: Vec<PageOpportunity>,
}

/// Complete analysis of one article's text.
#[derive(Debug, Clone, Serialize)]
pub struct ContentAnalysis {
    /// Pages with at least one keyword occurrence, in catalog order.
    pub page_relevance: Vec<PageRelevance>,
    pub contexts: ContextProfile,
    /// Candidate insertion sentences, in document order.
    pub sites: Vec<SentenceSite>,
    pub word_count: usize,
    /// Prose complexity in [0, 1], from word and sentence lengths.
    pub complexity: f64,
}

impl ContentAnalysis {
    /// Relevance entry for one page, when any of its keywords occurred.
    #[must_use]
    pub fn relevance_for(&self, page_key: &str) -> Option<&PageRelevance> {
        self.page_relevance.iter().find(|r| r.page_key == page_key)
    }
}

/// Analyze article prose against a page catalog.
///
/// `content` is the plain-text projection of the article, `title` its
/// headline. Keyword and context matching happens on the lowercased
/// concatenation of both; sentence segmentation runs on the prose alone.
#[must_use]
pub fn analyze_content(content: &str, title: &str, catalog: &PageCatalog) -> ContentAnalysis {
    let full_text = format!("{title} {content}").to_lowercase();

    let mut page_relevance = Vec::new();
    for target in &catalog.pages {
        let matches = keyword_matches(&full_text, &target.keywords);
        if matches.is_empty() {
            continue;
        }
        let relevance = relevance_score(&matches, target, &full_text);
        page_relevance.push(PageRelevance {
            page_key: target.key.clone(),
            occurrences: matches.len(),
            matches,
            relevance,
        });
    }

    let contexts = ContextProfile::tally(&full_text);
    let sites = find_sentence_sites(content, catalog);
    let word_count = text::word_count(content);
    let complexity = content_complexity(content);

    debug!(
        "analysis: {} relevant page(s), {} candidate sentence(s), {word_count} words",
        page_relevance.len(),
        sites.len()
    );

    ContentAnalysis {
        page_relevance,
        contexts,
        sites,
        word_count,
        complexity,
    }
}

/// All occurrences of each keyword, positions as character offsets.
fn keyword_matches(full_text: &str, keywords: &[String]) -> Vec<KeywordMatch> {
    let mut matches = Vec::new();
    for keyword in keywords {
        if keyword.is_empty() || !full_text.contains(keyword.as_str()) {
            continue;
        }
        // match_indices yields ascending byte offsets; convert to character
        // offsets with a single forward scan
        let mut last_byte = 0usize;
        let mut last_char = 0usize;
        for (byte_pos, _) in full_text.match_indices(keyword.as_str()) {
            last_char += full_text[last_byte..byte_pos].chars().count();
            last_byte = byte_pos;
            matches.push(KeywordMatch {
                keyword: keyword.clone(),
                position: last_char,
            });
        }
    }
    matches
}

fn relevance_score(matches: &[KeywordMatch], target: &TargetPage, full_text: &str) -> f64 {
    let mut score = matches.len() as f64;

    for context in &target.contexts {
        if full_text.contains(context.as_str()) {
            score += 0.5;
        }
    }

    let mut distinct: Vec<&str> = Vec::new();
    for m in matches {
        if !distinct.contains(&m.keyword.as_str()) {
            distinct.push(&m.keyword);
        }
    }
    if distinct.len() > 1 {
        score += 1.0;
    }

    score
}

/// Segment prose into sentences and keep those claiming at least one page.
fn find_sentence_sites(content: &str, catalog: &PageCatalog) -> Vec<SentenceSite> {
    let segments = text::split_sentences(content);
    let total = segments.len();

    let mut sites = Vec::new();
    let mut char_position = 0usize;

    for (index, segment) in segments.iter().enumerate() {
        let sentence = segment.trim();
        if sentence.is_empty() {
            continue;
        }

        let position = SentencePosition::for_index(index, total);
        let sentence_lower = sentence.to_lowercase();

        let mut opportunities = Vec::new();
        for target in &catalog.pages {
            let keyword_hits = target
                .keywords
                .iter()
                .filter(|kw| sentence_lower.contains(kw.as_str()))
                .count();
            if keyword_hits > 0 {
                opportunities.push(PageOpportunity {
                    page_key: target.key.clone(),
                    keyword_hits,
                });
            }
        }

        if !opportunities.is_empty() {
            sites.push(SentenceSite {
                index,
                position,
                char_position,
                word_count: text::word_count(sentence),
                text: sentence.to_string(),
                opportunities,
            });
        }

        char_position += sentence.chars().count() + 1;
    }

    sites
}

/// Prose complexity in [0, 1] from average word and sentence lengths.
fn content_complexity(content: &str) -> f64 {
    let words: Vec<&str> = content.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let total_word_chars: usize = words.iter().map(|w| w.chars().count()).sum();
    let avg_word_length = total_word_chars as f64 / words.len() as f64;

    let sentence_count = text::split_sentences(content)
        .iter()
        .filter(|s| !s.trim().is_empty())
        .count();
    let avg_sentence_length = if sentence_count > 0 {
        words.len() as f64 / sentence_count as f64
    } else {
        0.0
    };

    let complexity = avg_word_length * 0.3 + avg_sentence_length * 0.7;
    (complexity / 20.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_has_five_pages() {
        let catalog = PageCatalog::default();

        assert_eq!(catalog.pages.len(), 5);
        assert_eq!(catalog.pages[0].key, "statistiques");
        assert_eq!(catalog.pages[4].key, "accueil");

        let reservations = catalog.get("reservations").expect("catalog page");
        assert_eq!(reservations.url, "https://goseminary.com/reservations");
        assert_eq!(reservations.service_name, "système de réservation");
        assert!(reservations.description.contains("réservation en ligne"));
    }

    #[test]
    fn test_no_keywords_no_relevance() {
        let catalog = PageCatalog::default();
        let analysis = analyze_content(
            "Le chat dort sur le canapé. Il pleut dehors.",
            "Histoire sans rapport",
            &catalog,
        );

        assert!(analysis.page_relevance.is_empty());
        assert!(analysis.sites.is_empty());
    }

    #[test]
    fn test_relevance_formula() {
        let catalog = PageCatalog::default();
        // 2 occurrences of "statistiques", 1 of "données" (diversity bonus),
        // plus the "performance" context word
        let analysis = analyze_content(
            "Les statistiques montrent la performance. Nos données confirment les statistiques.",
            "",
            &catalog,
        );

        let stats = analysis.relevance_for("statistiques").expect("stats page");
        assert_eq!(stats.occurrences, 3);
        // 3.0 base + 0.5 context + 1.0 diversity
        assert!((stats.relevance - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_title_counts_toward_matches() {
        let catalog = PageCatalog::default();
        let analysis = analyze_content(
            "Un texte neutre sans vocabulaire particulier.",
            "Réserver vos dates",
            &catalog,
        );

        let reservations = analysis.relevance_for("reservations").expect("page");
        // "réserver" and "dates" both appear in the title
        assert_eq!(reservations.occurrences, 2);
    }

    #[test]
    fn test_sentence_sites_positions_and_terciles() {
        let catalog = PageCatalog::default();
        // 10 segments after the trailing split; sentence 0 hits "statistiques",
        // sentence 5 hits "réserver", sentence 9 is empty
        let content = "Les statistiques parlent. Un. Deux. Trois. Quatre. \
                       Pensez à réserver. Six. Sept. Huit.";
        let analysis = analyze_content(content, "", &catalog);

        assert_eq!(analysis.sites.len(), 2);

        let first = &analysis.sites[0];
        assert_eq!(first.index, 0);
        assert_eq!(first.position, SentencePosition::Beginning);
        assert_eq!(first.char_position, 0);
        assert_eq!(first.text, "Les statistiques parlent");

        let second = &analysis.sites[1];
        assert_eq!(second.index, 5);
        assert_eq!(second.position, SentencePosition::Middle);
        assert_eq!(second.text, "Pensez à réserver");
    }

    #[test]
    fn test_char_positions_accumulate_trimmed_lengths() {
        let catalog = PageCatalog::default();
        let content = "Première phrase sur les statistiques. Seconde phrase avec réservation.";
        let analysis = analyze_content(content, "", &catalog);

        assert_eq!(analysis.sites.len(), 2);
        assert_eq!(analysis.sites[0].char_position, 0);
        // "Première phrase sur les statistiques" is 36 chars, plus one
        assert_eq!(
            analysis.sites[1].char_position,
            "Première phrase sur les statistiques".chars().count() + 1
        );
    }

    #[test]
    fn test_opportunity_counts_distinct_keywords() {
        let catalog = PageCatalog::default();
        let content = "Les statistiques et les données donnent des chiffres fiables.";
        let analysis = analyze_content(content, "", &catalog);

        let site = &analysis.sites[0];
        let stats = site
            .opportunities
            .iter()
            .find(|o| o.page_key == "statistiques")
            .expect("stats opportunity");
        // statistiques + données + chiffres
        assert_eq!(stats.keyword_hits, 3);
    }

    #[test]
    fn test_context_profile_counts_occurrences() {
        let profile = ContextProfile::tally("la gestion et l'organisation de l'équipe, encore la gestion");

        assert_eq!(profile.organizational, 3);
        assert_eq!(profile.collaboration, 1);
        assert_eq!(profile.innovation, 0);
    }

    #[test]
    fn test_complexity_bounds() {
        assert!((content_complexity("") - 0.0).abs() < f64::EPSILON);

        let simple = content_complexity("Un chat dort. Il mange.");
        assert!(simple > 0.0 && simple < 1.0);

        let convoluted = "particulièrement extraordinairement incompréhensiblement ".repeat(30);
        assert!((content_complexity(&convoluted) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let catalog = PageCatalog::default();
        let content = "Organiser un séminaire demande des statistiques. Pensez à réserver vos dates.";

        let a = analyze_content(content, "Titre", &catalog);
        let b = analyze_content(content, "Titre", &catalog);

        assert_eq!(a.word_count, b.word_count);
        assert_eq!(a.sites.len(), b.sites.len());
        assert_eq!(a.page_relevance.len(), b.page_relevance.len());
    }
}
