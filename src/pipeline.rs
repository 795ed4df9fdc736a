//! Four-pass article composition pipeline.
//!
//! Pass 1 drafts the article through an external text generator, pass 2
//! renders and audits it, pass 3 asks the generator to fix the reported
//! problems while the score sits below the acceptance threshold, and pass 4
//! renders the final page, weaves promotional links, embeds illustrations
//! and audits the published result. The generator sits behind a trait so
//! tests drive the pipeline with scripted responses.

use std::fs;
use std::path::PathBuf;
use std::thread;

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analyze::PageCatalog;
use crate::audit::{audit, AuditReport};
use crate::dom;
use crate::error::{Error, Result};
use crate::options::{ComposeOptions, WeaveOptions};
use crate::patterns::{CODE_FENCE_CLOSE, CODE_FENCE_OPEN, DRAFT_LEAD_IN};
use crate::template::{self, PageVars};
use crate::{illustrate, mutate, text};

const DRAFT_MAX_TOKENS: u32 = 3000;
const DRAFT_TEMPERATURE: f32 = 0.8;
const IMPROVE_MAX_TOKENS: u32 = 3500;
const IMPROVE_TEMPERATURE: f32 = 0.5;

/// External text-generation collaborator.
///
/// Implementations wrap whatever backend produces article prose. The
/// pipeline retries transient failures itself; implementations should
/// return `Err` rather than retry internally.
pub trait TextGenerator {
    fn generate(&mut self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String>;
}

/// What to write about.
#[derive(Debug, Clone)]
pub struct ComposeRequest {
    pub topic: String,
    /// Extra context lines appended to the draft prompt.
    pub context: Vec<String>,
}

impl ComposeRequest {
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            context: Vec::new(),
        }
    }
}

/// Everything the pipeline produced for one article.
#[derive(Debug, Serialize)]
pub struct ComposeOutcome {
    /// Final page, links woven and illustrations embedded.
    pub html: String,
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD-<slug>.html`, ready for `save_article`.
    pub filename: String,
    /// Token count of the article fragment, markup included.
    pub word_count: usize,
    /// Audit of the final page.
    pub audit: AuditReport,
    pub links_added: usize,
    pub weave_confidence: f64,
    /// The canned article stood in after generation failed every retry.
    pub used_fallback: bool,
    pub improvement_rounds: usize,
}

/// Compose one article through the full 4-pass flow.
///
/// Generation failures fall back to a canned article rather than aborting;
/// `Err` is reserved for template rendering and I/O problems.
pub fn compose(
    generator: &mut dyn TextGenerator,
    request: &ComposeRequest,
    options: &ComposeOptions,
) -> Result<ComposeOutcome> {
    let date = Local::now().format("%Y-%m-%d").to_string();

    // pass 1: draft
    debug!("pass 1: drafting '{}'", request.topic);
    let mut used_fallback = false;
    let mut content = match generate_with_retry(
        generator,
        &draft_prompt(request, options),
        DRAFT_MAX_TOKENS,
        DRAFT_TEMPERATURE,
        options,
    ) {
        Ok(raw) => clean_draft(&raw),
        Err(e) => {
            warn!("draft generation failed, using fallback article: {e}");
            used_fallback = true;
            fallback_article(&request.topic)
        }
    };
    let meta = extract_metadata(&content);
    let mut title = meta.title.unwrap_or_else(|| request.topic.clone());
    let mut description = meta.description.unwrap_or_default();

    // pass 2: audit the rendered draft
    let page = template::render_default(&PageVars {
        title: &title,
        meta_description: &description,
        content: &content,
        date: &date,
        author: &options.author,
    })?;
    let mut report = audit(&page);
    info!("draft audited at {:.1}", report.global_score);

    // pass 3: targeted improvement, first strict gain wins
    let mut improvement_rounds = 0;
    for attempt in 1..=options.max_improvement_attempts {
        if report.global_score >= options.min_score {
            break;
        }
        let raw = match generate_with_retry(
            generator,
            &improvement_prompt(&content, &report),
            IMPROVE_MAX_TOKENS,
            IMPROVE_TEMPERATURE,
            options,
        ) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("improvement pass abandoned: {e}");
                break;
            }
        };
        let candidate = clean_draft(&raw);
        let candidate_meta = extract_metadata(&candidate);
        let candidate_title = candidate_meta.title.unwrap_or_else(|| title.clone());
        let candidate_description = candidate_meta
            .description
            .unwrap_or_else(|| description.clone());
        let candidate_page = template::render_default(&PageVars {
            title: &candidate_title,
            meta_description: &candidate_description,
            content: &candidate,
            date: &date,
            author: &options.author,
        })?;
        let candidate_report = audit(&candidate_page);

        if candidate_report.global_score > report.global_score {
            info!(
                "improvement attempt {attempt} adopted ({:.1} to {:.1})",
                report.global_score, candidate_report.global_score
            );
            content = candidate;
            title = candidate_title;
            description = candidate_description;
            report = candidate_report;
            improvement_rounds += 1;
            break;
        }
        warn!(
            "improvement attempt {attempt} rejected ({:.1} does not beat {:.1})",
            candidate_report.global_score, report.global_score
        );
    }

    // pass 4: finalize, weave, illustrate
    debug!(
        "pre-weave score {:.1} after {improvement_rounds} improvement round(s)",
        report.global_score
    );
    let page = template::render_default(&PageVars {
        title: &title,
        meta_description: &description,
        content: &content,
        date: &date,
        author: &options.author,
    })?;
    let weave_options = WeaveOptions {
        seed: options.seed,
        ..WeaveOptions::default()
    };
    let woven = mutate::weave_article(&page, Some(&title), &PageCatalog::default(), &weave_options);

    let fragments: Vec<String> = illustrate::suggest(&content, &title)
        .into_iter()
        .map(illustrate::render)
        .collect();
    let html = mutate::insert_illustrations(&woven.html, &fragments, options.max_illustrations);

    let final_report = audit(&html);
    let filename = generate_filename(&title);
    let word_count = text::word_count(&content);
    info!(
        "composed '{title}': score {:.1}, {} link(s), file {filename}",
        final_report.global_score, woven.links_added
    );

    Ok(ComposeOutcome {
        html,
        title,
        description,
        filename,
        word_count,
        audit: final_report,
        links_added: woven.links_added,
        weave_confidence: woven.confidence,
        used_fallback,
        improvement_rounds,
    })
}

/// Call the generator with a fixed number of attempts and a fixed pause.
fn generate_with_retry(
    generator: &mut dyn TextGenerator,
    prompt: &str,
    max_tokens: u32,
    temperature: f32,
    options: &ComposeOptions,
) -> Result<String> {
    let mut last_error = None;
    for attempt in 1..=options.max_retries {
        match generator.generate(prompt, max_tokens, temperature) {
            Ok(raw) if !raw.trim().is_empty() => return Ok(raw),
            Ok(_) => {
                warn!("empty response on attempt {attempt}");
                last_error = Some(Error::DraftError("empty response".to_string()));
            }
            Err(e) => {
                warn!("generation attempt {attempt} failed: {e}");
                last_error = Some(e);
            }
        }
        if attempt < options.max_retries {
            thread::sleep(options.retry_delay);
        }
    }
    Err(last_error
        .unwrap_or_else(|| Error::GenerationError("no generation attempts made".to_string())))
}

fn draft_prompt(request: &ComposeRequest, options: &ComposeOptions) -> String {
    let mut prompt = format!(
        "Rédige un article de blog en français d'environ {} mots sur le sujet suivant : {}. \
         Réponds uniquement avec le HTML de l'article, structuré avec une balise <h1>, \
         des sections <h2> et des paragraphes <p>. \
         Mets en avant les séminaires d'entreprise dans les Vosges et la plateforme Seminary.",
        options.target_words, request.topic
    );
    for line in &request.context {
        prompt.push_str("\nContexte : ");
        prompt.push_str(line);
    }
    prompt
}

fn improvement_prompt(content: &str, report: &AuditReport) -> String {
    let mut prompt = String::from(
        "Améliore cet article HTML pour le référencement. Corrige les points suivants :\n",
    );
    for issue in &report.major_issues {
        prompt.push_str("- ");
        prompt.push_str(issue);
        prompt.push('\n');
    }
    for warning in report.warnings.iter().take(5) {
        prompt.push_str("- ");
        prompt.push_str(warning);
        prompt.push('\n');
    }
    prompt.push_str("\nRéponds uniquement avec le HTML corrigé de l'article.\n\n");
    prompt.push_str(content);
    prompt
}

/// Strip generator chatter around the article fragment.
///
/// Markdown code fences and conversational lead-ins go; structural repair
/// of the markup itself is the parser's job, not a regex's.
fn clean_draft(raw: &str) -> String {
    let mut content = raw.trim().to_string();
    content = CODE_FENCE_OPEN.replace(&content, "").to_string();
    content = CODE_FENCE_CLOSE.replace(&content, "").to_string();
    content = content.trim().to_string();
    content = DRAFT_LEAD_IN.replace(&content, "").to_string();
    content.trim().to_string()
}

#[derive(Debug, Default)]
struct DraftMetadata {
    title: Option<String>,
    description: Option<String>,
}

/// Pull title and meta description out of a draft fragment.
///
/// The first `h1`'s text becomes the title; the first paragraph becomes the
/// description, truncated at 157 characters when it runs past 160.
fn extract_metadata(fragment: &str) -> DraftMetadata {
    let doc = dom::parse(fragment);
    let mut metadata = DraftMetadata::default();

    if let Some(node) = doc.select("h1").nodes().first() {
        let heading = dom::Selection::from(*node).text().trim().to_string();
        if !heading.is_empty() {
            metadata.title = Some(heading);
        }
    }

    if let Some(node) = doc.select("p").nodes().first() {
        let first_p = dom::Selection::from(*node).text().trim().to_string();
        if !first_p.is_empty() {
            metadata.description = Some(if first_p.chars().count() > 160 {
                format!("{}...", text::truncate_chars(&first_p, 157))
            } else {
                first_p
            });
        }
    }

    metadata
}

/// Canned article used when the generator fails every retry.
fn fallback_article(topic: &str) -> String {
    format!(
        "<h1>{topic} : réussir votre séminaire d'entreprise dans les Vosges</h1>\n\
         <p>Organiser un séminaire d'entreprise demande une préparation soignée. Entre le choix \
         du lieu, le programme des ateliers et la logistique, chaque détail compte pour offrir à \
         votre équipe une parenthèse utile et motivante au cœur des Vosges.</p>\n\
         <h2>Un cadre naturel propice à la cohésion</h2>\n\
         <p>La montagne vosgienne offre un environnement calme, loin de l'agitation du bureau. \
         Les activités de team building en pleine nature renforcent la communication entre \
         collègues, et chaque équipe repart avec des souvenirs partagés.</p>\n\
         <h2>Planifier chaque étape sans stress</h2>\n\
         <p>Pensez à réserver votre lieu plusieurs mois à l'avance et à préparer un programme \
         équilibré entre sessions de formation, temps d'échange et moments de détente. Un \
         séminaire réussi alterne travail structuré et convivialité.</p>\n\
         <h2>Mesurer les résultats</h2>\n\
         <p>Après l'événement, prenez le temps d'évaluer les retombées pour vos collaborateurs. \
         Ces statistiques guident l'organisation de votre prochain séminaire et démontrent la \
         valeur de l'investissement pour l'entreprise.</p>"
    )
}

/// Build the article filename: date prefix plus a slug capped at 50 chars.
#[must_use]
pub fn generate_filename(title: &str) -> String {
    let date = Local::now().format("%Y-%m-%d");
    let slug = text::slugify(title);
    format!("{date}-{}.html", text::truncate_chars(&slug, 50))
}

/// Write a composed article into the configured articles directory.
pub fn save_article(outcome: &ComposeOutcome, options: &ComposeOptions) -> Result<PathBuf> {
    fs::create_dir_all(&options.articles_dir)?;
    let path = options.articles_dir.join(&outcome.filename);
    fs::write(&path, &outcome.html)?;
    info!("article saved: {}", path.display());
    Ok(path)
}
