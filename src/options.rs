//! Configuration for the audit engine, the link weaver and the pipeline.
//!
//! All thresholds live in plain structs passed in by the caller, never in
//! global state, so tests can audit the same document under different rule
//! sets. Use `Default::default()` for the production settings.

use std::path::PathBuf;
use std::time::Duration;

/// Rule thresholds and keyword sets for the SEO audit.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use blogwright::AuditOptions;
///
/// // Use defaults
/// let options = AuditOptions::default();
///
/// // Customize specific fields
/// let options = AuditOptions {
///     content_min_words: 150,
///     ..AuditOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Minimum `<title>` length in characters. Shorter is an issue.
    ///
    /// Default: `30`
    pub title_min_chars: usize,

    /// Maximum `<title>` length in characters. Longer is a warning.
    ///
    /// Default: `60`
    pub title_max_chars: usize,

    /// Minimum meta description length in characters. Shorter is an issue.
    ///
    /// Default: `120`
    pub meta_desc_min_chars: usize,

    /// Maximum meta description length in characters. Longer is a warning.
    ///
    /// Default: `160`
    pub meta_desc_max_chars: usize,

    /// Minimum body word count. Below is an issue.
    ///
    /// Default: `300`
    pub content_min_words: usize,

    /// Maximum body word count. Above is a warning.
    ///
    /// Default: `2000`
    pub content_max_words: usize,

    /// Lower bound for the summed density of `density_keywords`, in percent.
    ///
    /// Default: `0.5`
    pub keyword_density_min: f64,

    /// Upper bound for the summed density of `density_keywords`, in percent.
    ///
    /// Default: `3.0`
    pub keyword_density_max: f64,

    /// Minimum number of links to the site's own pages. Fewer is a warning.
    ///
    /// Default: `1`
    pub promo_links_min: usize,

    /// Maximum number of links to the site's own pages. More is a warning.
    ///
    /// Default: `8`
    pub promo_links_max: usize,

    /// External links without `rel="nofollow"` tolerated before warning.
    ///
    /// Default: `3`
    pub external_nofollow_threshold: usize,

    /// Maximum `alt` attribute length before a verbosity warning.
    ///
    /// Default: `125`
    pub max_alt_chars: usize,

    /// Average words per sentence above which readability is flagged.
    ///
    /// Default: `25.0`
    pub long_sentence_words: f64,

    /// Domain keywords expected in titles, descriptions and body text.
    ///
    /// Default: the Seminary keyword set (séminaire, vosges, entreprise, …)
    pub target_keywords: Vec<String>,

    /// Core subset of `target_keywords` whose summed density is bounded.
    ///
    /// Default: `["séminaire", "vosges", "entreprise"]`
    pub density_keywords: Vec<String>,

    /// Hostnames counted as the site's own (promotional) link targets.
    ///
    /// Default: `["blog.goseminary.com", "goseminary.com"]`
    pub internal_domains: Vec<String>,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            title_min_chars: 30,
            title_max_chars: 60,
            meta_desc_min_chars: 120,
            meta_desc_max_chars: 160,
            content_min_words: 300,
            content_max_words: 2000,
            keyword_density_min: 0.5,
            keyword_density_max: 3.0,
            promo_links_min: 1,
            promo_links_max: 8,
            external_nofollow_threshold: 3,
            max_alt_chars: 125,
            long_sentence_words: 25.0,
            target_keywords: [
                "séminaire",
                "séminaires",
                "vosges",
                "entreprise",
                "équipe",
                "team building",
                "formation",
                "événement",
                "professionnel",
                "montagne",
                "nature",
                "retreat",
                "offsite",
            ]
            .map(String::from)
            .to_vec(),
            density_keywords: ["séminaire", "vosges", "entreprise"]
                .map(String::from)
                .to_vec(),
            internal_domains: ["blog.goseminary.com", "goseminary.com"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Constraints and knobs for link planning and insertion.
#[derive(Debug, Clone)]
pub struct WeaveOptions {
    /// Maximum number of promotional links planned per article.
    ///
    /// Default: `4`
    pub max_links: usize,

    /// Minimum character distance between any two committed link positions.
    ///
    /// Default: `150`
    pub min_spacing: usize,

    /// Plan confidence a plan must exceed before mutation is applied.
    ///
    /// Default: `0.3`
    pub commit_threshold: f64,

    /// Word count backing one "optimal" link in the confidence heuristic.
    ///
    /// Default: `300`
    pub words_per_link: usize,

    /// Seed for the anchor-template RNG. Planning is fully deterministic
    /// for a fixed seed; vary it to vary the phrasing between articles.
    ///
    /// Default: `0`
    pub seed: u64,
}

impl Default for WeaveOptions {
    fn default() -> Self {
        Self {
            max_links: 4,
            min_spacing: 150,
            commit_threshold: 0.3,
            words_per_link: 300,
            seed: 0,
        }
    }
}

/// Settings for the 4-pass composition pipeline.
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    /// Word count requested from the draft generator.
    ///
    /// Default: `1200`
    pub target_words: usize,

    /// Global audit score below which the improvement pass runs.
    ///
    /// Default: `75.0`
    pub min_score: f64,

    /// Maximum improvement round-trips before keeping the best draft.
    ///
    /// Default: `3`
    pub max_improvement_attempts: usize,

    /// Attempts per collaborator call before giving up.
    ///
    /// Default: `5`
    pub max_retries: usize,

    /// Pause between collaborator retries.
    ///
    /// Default: `30s`
    pub retry_delay: Duration,

    /// Byline written into the rendered page.
    ///
    /// Default: `"Seminary Blog Bot"`
    pub author: String,

    /// Directory `save_article` writes into (created on demand).
    ///
    /// Default: `articles`
    pub articles_dir: PathBuf,

    /// Maximum illustration fragments embedded per article.
    ///
    /// Default: `2`
    pub max_illustrations: usize,

    /// Seed forwarded to the link planner.
    ///
    /// Default: `0`
    pub seed: u64,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            target_words: 1200,
            min_score: 75.0,
            max_improvement_attempts: 3,
            max_retries: 5,
            retry_delay: Duration::from_secs(30),
            author: "Seminary Blog Bot".to_string(),
            articles_dir: PathBuf::from("articles"),
            max_illustrations: 2,
            seed: 0,
        }
    }
}
