//! Audit an HTML article against the Seminary SEO rule set.
//!
//! Prints a human-readable summary by default; `--json` emits the full
//! report on stdout for scripting. The exit code is non-zero when the
//! global score sits below the pass threshold.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use blogwright::{audit, AuditReport};

#[derive(Parser)]
#[command(name = "audit_page")]
#[command(about = "SEO audit for Seminary blog articles", long_about = None)]
#[command(version)]
struct Args {
    /// HTML file to audit
    file: PathBuf,

    /// Emit the full report as JSON on stdout
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Show per-category scores and page metrics
    #[arg(long, default_value_t = false)]
    detailed: bool,

    /// Global score below which the exit code is non-zero
    #[arg(long, value_name = "SCORE", default_value_t = 75.0)]
    threshold: f64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let html = match fs::read_to_string(&args.file) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Failed to read {}: {e}", args.file.display());
            return ExitCode::FAILURE;
        }
    };

    let report = audit(&html);

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_summary(&report, args.detailed);
    }

    if report.global_score < args.threshold {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn print_summary(report: &AuditReport, detailed: bool) {
    println!(
        "Score global : {}/100 ({})",
        report.global_score, report.status
    );

    if !report.major_issues.is_empty() {
        println!("\nProblèmes majeurs :");
        for issue in &report.major_issues {
            println!("  ✗ {issue}");
        }
    }

    if !report.warnings.is_empty() {
        println!("\nAvertissements :");
        for warning in &report.warnings {
            println!("  ! {warning}");
        }
    }

    if !report.recommendations.is_empty() {
        println!("\nRecommandations :");
        for recommendation in &report.recommendations {
            println!("  > {recommendation}");
        }
    }

    if detailed {
        println!("\nDétail par catégorie :");
        let categories = [
            ("structure", &report.categories.structure),
            ("titre", &report.categories.title),
            ("meta description", &report.categories.meta_description),
            ("titres de section", &report.categories.headings),
            ("contenu", &report.categories.content),
            ("liens", &report.categories.links),
            ("images", &report.categories.images),
            ("technique", &report.categories.technical),
        ];
        for (name, category) in categories {
            println!("  {name:<18} {:>5.1}", category.score);
        }
        println!(
            "\nMots : {} | Densité : {:.1}% | Liens Seminary : {}",
            report.metrics.word_count,
            report.metrics.keyword_density,
            report.metrics.seminary_links
        );
    }
}
