//! Weave promotional Seminary links into an HTML article.
//!
//! Analyzes the article, plans link placements and rewrites the file in
//! place (or to `--output`). `--analyze-only` prints the plan without
//! touching any file.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use blogwright::{weave_with_options, WeaveOptions, WeaveOutcome};

#[derive(Parser)]
#[command(name = "weave_links")]
#[command(about = "Promotional link weaving for Seminary blog articles", long_about = None)]
#[command(version)]
struct Args {
    /// HTML file to rewrite
    file: PathBuf,

    /// Write the result here instead of rewriting the input file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Seed for anchor phrasing selection
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Plan and report without writing any file
    #[arg(long, default_value_t = false)]
    analyze_only: bool,

    /// Emit the analysis, plan and result as JSON on stdout
    #[arg(long, default_value_t = false)]
    json: bool,
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

    let options = WeaveOptions {
        seed: args.seed,
        ..WeaveOptions::default()
    };
    let outcome = weave_with_options(&html, &options);

    if args.json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize outcome: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_plan(&outcome);
    }

    if !args.analyze_only {
        let target = args.output.as_ref().unwrap_or(&args.file);
        if let Err(e) = fs::write(target, &outcome.html) {
            eprintln!("Failed to write {}: {e}", target.display());
            return ExitCode::FAILURE;
        }
        eprintln!("Écrit : {}", target.display());
    }

    ExitCode::SUCCESS
}

fn print_plan(outcome: &WeaveOutcome) {
    println!(
        "{} lien(s) inséré(s), confiance du plan {:.2}",
        outcome.links_added, outcome.confidence
    );

    if outcome.plan.is_empty() {
        println!("Aucun lien recommandé pour cet article.");
        return;
    }

    println!("\nLiens planifiés :");
    for link in &outcome.plan.links {
        println!(
            "  [{}] \"{}\" sur « {} » (position {}, confiance {:.2})",
            link.page_key, link.anchor_text, link.keyword, link.char_position, link.confidence
        );
    }

    println!("\nPertinence par page :");
    for relevance in &outcome.analysis.page_relevance {
        println!(
            "  {:<14} {:.1} ({} occurrence(s))",
            relevance.page_key, relevance.relevance, relevance.occurrences
        );
    }
}
