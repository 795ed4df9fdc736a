//! SEO rule engine.
//!
//! Eight rule categories score a document independently, each as a pure
//! function over [`PageFacts`]; a weighted average produces the global
//! score, a status tier and a short list of recommendations.
//!
//! Data-quality problems never surface as errors here. A malformed or
//! empty document degrades to a worst-case report so callers can always
//! rely on getting a score back.

pub mod facts;

mod body;
mod head;

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::dom;
use crate::options::AuditOptions;

pub use facts::PageFacts;

/// Score and findings for one rule category.
///
/// Issues are blocking problems, warnings are soft deviations. The score
/// starts at 100 and loses a per-category penalty for each finding,
/// floored at 0.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryReport {
    pub score: f64,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

impl CategoryReport {
    /// A category passes when it has no issue-level findings.
    #[must_use]
    pub fn valid(&self) -> bool {
        self.issues.is_empty()
    }

    fn from_penalties(
        issues: Vec<String>,
        warnings: Vec<String>,
        issue_penalty: f64,
        warning_penalty: f64,
    ) -> Self {
        let deduction =
            issue_penalty * issues.len() as f64 + warning_penalty * warnings.len() as f64;
        Self {
            score: (100.0 - deduction).max(0.0),
            issues,
            warnings,
        }
    }

    /// Category whose subject is absent entirely: zero score, one issue.
    fn missing(issue: &str) -> Self {
        Self {
            score: 0.0,
            issues: vec![issue.to_string()],
            warnings: Vec::new(),
        }
    }
}

/// The eight category reports, in aggregation order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryReports {
    pub structure: CategoryReport,
    pub title: CategoryReport,
    pub meta_description: CategoryReport,
    pub headings: CategoryReport,
    pub content: CategoryReport,
    pub links: CategoryReport,
    pub images: CategoryReport,
    pub technical: CategoryReport,
}

impl CategoryReports {
    /// Categories paired with their aggregation weights. Content and title
    /// dominate; images barely move the needle.
    fn weighted(&self) -> [(&CategoryReport, f64); 8] {
        [
            (&self.structure, 1.0),
            (&self.title, 2.0),
            (&self.meta_description, 1.5),
            (&self.headings, 1.5),
            (&self.content, 2.5),
            (&self.links, 1.0),
            (&self.images, 0.5),
            (&self.technical, 1.0),
        ]
    }
}

/// Density bookkeeping for one tracked keyword.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordDensity {
    pub keyword: String,
    pub count: usize,
    /// Occurrences per 100 words.
    pub density: f64,
}

/// Typed page measurements backing the category reports.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageMetrics {
    pub title: String,
    pub title_length: usize,
    pub title_keywords: Vec<String>,
    pub description: String,
    pub description_length: usize,
    pub h1_count: usize,
    pub total_headings: usize,
    pub heading_levels: Vec<u8>,
    pub word_count: usize,
    /// Summed density of the core keyword subset, in percent.
    pub keyword_density: f64,
    pub keyword_counts: Vec<KeywordDensity>,
    pub avg_sentence_length: f64,
    pub seminary_links: usize,
    pub internal_links: usize,
    pub external_links: usize,
    pub poor_anchor_texts: Vec<String>,
    pub total_images: usize,
    pub images_without_alt: usize,
    pub images_without_title: usize,
    pub has_canonical: bool,
    pub has_og_tags: bool,
    pub has_twitter_card: bool,
    pub has_json_ld: bool,
}

/// Overall audit verdict derived from the global score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    Excellent,
    Good,
    NeedsImprovement,
    Poor,
    /// Degraded result for unusable input, never produced by scoring.
    Error,
}

impl AuditStatus {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::Excellent
        } else if score >= 75.0 {
            Self::Good
        } else if score >= 60.0 {
            Self::NeedsImprovement
        } else {
            Self::Poor
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::NeedsImprovement => "needs_improvement",
            Self::Poor => "poor",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// Complete audit result for one document.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// Weighted category average in [0, 100], rounded to one decimal.
    pub global_score: f64,
    pub status: AuditStatus,
    pub has_major_issues: bool,
    /// Issues from every failing category, in category order.
    pub major_issues: Vec<String>,
    /// Warnings from every category, in category order.
    pub warnings: Vec<String>,
    /// At most five actionable suggestions.
    pub recommendations: Vec<String>,
    pub categories: CategoryReports,
    pub metrics: PageMetrics,
}

impl AuditReport {
    /// Worst-case report for input the engine cannot evaluate.
    fn degraded(message: &str) -> Self {
        Self {
            global_score: 0.0,
            status: AuditStatus::Error,
            has_major_issues: true,
            major_issues: vec![message.to_string()],
            warnings: Vec::new(),
            recommendations: Vec::new(),
            categories: CategoryReports::default(),
            metrics: PageMetrics::default(),
        }
    }
}

/// Audit a document with the default rule set.
#[must_use]
pub fn audit(html: &str) -> AuditReport {
    audit_with_options(html, &AuditOptions::default())
}

/// Audit a document against a custom rule set.
///
/// The input is parsed once; every category scores the same extracted
/// facts. Auditing never fails: empty or whitespace-only input produces a
/// degraded zero-score report with `AuditStatus::Error`.
#[must_use]
pub fn audit_with_options(html: &str, options: &AuditOptions) -> AuditReport {
    if html.trim().is_empty() {
        debug!("empty document, returning degraded report");
        return AuditReport::degraded("Erreur d'audit: document vide");
    }

    let doc = dom::parse(html);
    let facts = PageFacts::extract(&doc, html);

    let mut metrics = PageMetrics::default();
    let categories = CategoryReports {
        structure: head::check_structure(&facts),
        title: head::check_title(&facts, options, &mut metrics),
        meta_description: head::check_meta_description(&facts, options, &mut metrics),
        headings: body::check_headings(&facts, &mut metrics),
        content: body::check_content(&facts, options, &mut metrics),
        links: body::check_links(&facts, options, &mut metrics),
        images: body::check_images(&facts, options, &mut metrics),
        technical: head::check_technical(&facts, &mut metrics),
    };

    let global_score = weighted_global(&categories);
    let status = AuditStatus::from_score(global_score);

    let mut major_issues = Vec::new();
    let mut warnings = Vec::new();
    for (report, _) in categories.weighted() {
        if !report.valid() {
            major_issues.extend(report.issues.iter().cloned());
        }
        warnings.extend(report.warnings.iter().cloned());
    }

    let recommendations = build_recommendations(&metrics);

    debug!(
        "audit complete: score {global_score}, status {status}, {} issue(s)",
        major_issues.len()
    );

    AuditReport {
        global_score,
        status,
        has_major_issues: !major_issues.is_empty(),
        major_issues,
        warnings,
        recommendations,
        categories,
        metrics,
    }
}

/// Weighted category average rounded to one decimal.
fn weighted_global(categories: &CategoryReports) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for (report, weight) in categories.weighted() {
        weighted_sum += report.score * weight;
        weight_total += weight;
    }
    (weighted_sum / weight_total * 10.0).round() / 10.0
}

fn build_recommendations(metrics: &PageMetrics) -> Vec<String> {
    let mut recommendations = Vec::new();

    if metrics.title_length < 30 {
        recommendations.push("Allonger le titre (30-60 caractères optimal)".to_string());
    }
    if metrics.word_count < 500 {
        recommendations.push("Enrichir le contenu (minimum 500 mots recommandé)".to_string());
    }
    if metrics.seminary_links < 2 {
        recommendations.push("Ajouter plus de liens vers les pages Seminary".to_string());
    }
    if !metrics.has_og_tags {
        recommendations.push("Ajouter les balises Open Graph complètes".to_string());
    }

    recommendations.truncate(5);
    recommendations
}
