//! # blogwright
//!
//! SEO engine for the Seminary blog: audits rendered articles against a
//! French-language rule set, analyzes prose for promotional opportunities,
//! weaves links to Seminary pages into the DOM and composes complete
//! articles through a 4-pass pipeline.
//!
//! ## Quick Start
//!
//! ```rust
//! use blogwright::audit;
//!
//! let html = r#"<html lang="fr"><head>
//! <title>Organiser un séminaire d'entreprise dans les Vosges</title>
//! </head><body><h1>Guide</h1><p>Préparer un séminaire réussi.</p></body></html>"#;
//!
//! let report = audit(html);
//! assert!(report.global_score > 0.0);
//! println!("score: {} ({})", report.global_score, report.status);
//! ```
//!
//! Weaving mutates a parsed copy of the document and keeps the original
//! whenever the plan is weak or the mutated tree fails its integrity check:
//!
//! ```rust
//! use blogwright::weave;
//!
//! let html = r#"<html><body><div class="article-content">
//! <p>Les statistiques montrent que les équipes progressent en montagne.</p>
//! </div></body></html>"#;
//!
//! let outcome = weave(html);
//! println!("{} lien(s), confiance {:.2}", outcome.links_added, outcome.confidence);
//! ```
//!
//! ## Features
//!
//! - **SEO Audit**: eight weighted rule categories with French findings
//! - **Keyword Analysis**: page relevance, context profile and sentence sites
//! - **Link Weaving**: greedy placement planning plus in-tree mutation
//! - **Composition**: draft, audit, improve and finalize passes around a
//!   pluggable text generator

mod error;
mod options;
mod patterns;

/// DOM operations adapter over `dom_query` with tree-only mutation helpers.
pub mod dom;

/// Plain-text measurement helpers (word counts, sentences, slugs).
pub mod text;

/// SEO rule engine producing weighted category scores.
pub mod audit;

/// Keyword and context analysis against the Seminary page catalog.
pub mod analyze;

/// Greedy planning of promotional link placements.
pub mod plan;

/// DOM mutation: link splicing, illustration embedding, integrity rollback.
pub mod mutate;

/// Trigger-based CSS illustration fragments.
pub mod illustrate;

/// Liquid page rendering around article fragments.
pub mod template;

/// 4-pass article composition around a pluggable text generator.
pub mod pipeline;

// Public API - re-exports
pub use analyze::{analyze_content, ContentAnalysis, PageCatalog};
pub use audit::{audit, audit_with_options, AuditReport, AuditStatus};
pub use error::{Error, Result};
pub use mutate::{insert_illustrations, weave, weave_article, weave_with_options, WeaveOutcome};
pub use options::{AuditOptions, ComposeOptions, WeaveOptions};
pub use pipeline::{compose, generate_filename, save_article, ComposeOutcome, ComposeRequest, TextGenerator};
pub use plan::{plan_links, IntegrationPlan};
pub use template::{render_default, render_page, PageVars};
