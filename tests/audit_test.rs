use blogwright::template::PageVars;
use blogwright::{audit, render_default, AuditStatus};

/// Minimal raw page with a configurable title and body.
fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"fr\"><head><meta charset=\"UTF-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\
         <title>{title}</title>\
         <meta name=\"description\" content=\"Préparez votre séminaire d'entreprise dans les \
         Vosges avec Seminary, du choix du lieu aux activités de team building en montagne.\">\
         </head><body>{body}</body></html>"
    )
}

/// Article fragment long enough to clear every content rule.
fn rich_content() -> String {
    let mut content =
        String::from("<h1>Organiser un séminaire d'entreprise dans les Vosges</h1>");
    for i in 0..8 {
        if i == 3 {
            content.push_str("<h2>Préparer le programme</h2>");
        }
        if i == 6 {
            content.push_str("<h2>Prolonger les effets</h2>");
        }
        let lead = if i % 2 == 0 { "Le séminaire" } else { "Le programme" };
        content.push_str(&format!(
            "<p>{lead} se prépare avec soin pour chaque salarié du groupe. \
             Les ateliers du matin alternent avec des temps de repos, et chaque \
             participant retrouve ensuite son poste avec une vraie source de \
             motivation pour les semaines qui suivent la rencontre.</p>"
        ));
    }
    content
}

#[test]
fn short_title_raises_a_length_issue() {
    let html = page(
        "Les Vosges : guide complet",
        "<h1>Guide</h1><p>Un séminaire d'entreprise réussi.</p>",
    );
    let report = audit(&html);

    assert!(report
        .major_issues
        .contains(&"Titre trop court (26 chars, minimum 30)".to_string()));
    assert!(!report.categories.title.valid());
    assert_eq!(report.metrics.title_length, 26);
}

#[test]
fn title_within_bounds_has_no_length_findings() {
    let html = page(
        "Les Vosges : votre guide complet pour un séminaire réussi",
        "<h1>Guide</h1><p>Un séminaire d'entreprise réussi.</p>",
    );
    let report = audit(&html);

    assert!(report.categories.title.valid());
    assert!(!report
        .categories
        .title
        .warnings
        .iter()
        .any(|w| w.contains("long")));
}

#[test]
fn longer_title_outscores_short_title_globally() {
    let body = "<h1>Guide</h1><p>Un séminaire d'entreprise réussi.</p>";
    let short = audit(&page("Les Vosges : guide complet", body));
    let good = audit(&page(
        "Les Vosges : votre guide complet pour un séminaire réussi",
        body,
    ));

    assert!(
        good.global_score > short.global_score,
        "expected {} > {}",
        good.global_score,
        short.global_score
    );
}

#[test]
fn clean_heading_hierarchy_is_unpenalized() {
    let html = page(
        "Séminaire d'entreprise dans les Vosges : le guide",
        "<h1>Titre</h1><h2>Un</h2><h3>Sous</h3><h2>Deux</h2><h3>Autre</h3>\
         <p>Le séminaire se déroule en montagne.</p>",
    );
    let report = audit(&html);

    assert!(report.categories.headings.valid());
    assert!(report.categories.headings.warnings.is_empty());
    assert!((report.categories.headings.score - 100.0).abs() < f64::EPSILON);
}

#[test]
fn images_without_alt_collapse_into_one_issue() {
    let html = page(
        "Séminaire d'entreprise dans les Vosges : le guide",
        "<h1>Titre</h1><p>Texte du séminaire.</p>\
         <img src=\"a.jpg\"><img src=\"b.jpg\"><img src=\"c.jpg\"><img src=\"d.jpg\">\
         <img src=\"e.jpg\" alt=\"vallée des Vosges\" title=\"vallée\">",
    );
    let report = audit(&html);

    assert_eq!(report.categories.images.issues.len(), 1);
    assert!(report
        .categories
        .images
        .issues
        .contains(&"4 image(s) sans attribut alt".to_string()));
    assert_eq!(report.metrics.images_without_alt, 4);
    assert_eq!(report.metrics.total_images, 5);
}

#[test]
fn three_of_five_images_missing_alt_caps_category_score() {
    let html = page(
        "Séminaire d'entreprise dans les Vosges : le guide",
        "<h1>Titre</h1><p>Texte du séminaire.</p>\
         <img src=\"a.jpg\"><img src=\"b.jpg\"><img src=\"c.jpg\">\
         <img src=\"d.jpg\" alt=\"sommet\" title=\"sommet\">\
         <img src=\"e.jpg\" alt=\"forêt\" title=\"forêt\">",
    );
    let report = audit(&html);

    assert_eq!(report.categories.images.issues.len(), 1);
    assert_eq!(report.metrics.images_without_alt, 3);
    assert!(report.categories.images.score <= 75.0);
}

#[test]
fn audit_is_idempotent_on_a_full_page() {
    let content = rich_content();
    let html = render_default(&PageVars {
        title: "Organiser un séminaire d'entreprise dans les Vosges",
        meta_description:
            "Préparez votre séminaire d'entreprise dans les Vosges avec Seminary, du choix \
             du lieu aux activités de team building et au suivi des résultats.",
        content: &content,
        date: "2025-08-22",
        author: "Seminary Blog",
    })
    .expect("render");

    let first = audit(&html);
    let second = audit(&html);

    assert!((first.global_score - second.global_score).abs() < f64::EPSILON);
    assert_eq!(first.major_issues, second.major_issues);
    assert_eq!(first.warnings, second.warnings);
    assert_eq!(first.recommendations, second.recommendations);
}

#[test]
fn fully_optimized_page_scores_one_hundred() {
    let content = rich_content();
    let html = render_default(&PageVars {
        title: "Organiser un séminaire d'entreprise dans les Vosges",
        meta_description:
            "Préparez votre séminaire d'entreprise dans les Vosges avec Seminary, du choix \
             du lieu aux activités de team building et au suivi des résultats.",
        content: &content,
        date: "2025-08-22",
        author: "Seminary Blog",
    })
    .expect("render");
    let report = audit(&html);

    assert!(
        (report.global_score - 100.0).abs() < f64::EPSILON,
        "expected 100.0, got {} (issues: {:?}, warnings: {:?})",
        report.global_score,
        report.major_issues,
        report.warnings
    );
    assert_eq!(report.status, AuditStatus::Excellent);
    assert!(!report.has_major_issues);
}

#[test]
fn empty_input_produces_degraded_report() {
    for input in ["", "   ", "\n\t\n"] {
        let report = audit(input);

        assert_eq!(report.status, AuditStatus::Error);
        assert!((report.global_score - 0.0).abs() < f64::EPSILON);
        assert_eq!(
            report.major_issues,
            vec!["Erreur d'audit: document vide".to_string()]
        );
    }
}

#[test]
fn keyword_free_page_collects_keyword_warnings() {
    let html = page(
        "Notes de service pour la direction générale",
        "<h1>Notes</h1><p>Texte interne sans rapport avec le sujet attendu.</p>",
    );
    let report = audit(&html);

    assert!(report
        .warnings
        .iter()
        .any(|w| w.contains("Aucun mot-clé cible trouvé dans le titre")));
    assert!(report
        .categories
        .meta_description
        .valid());
}
