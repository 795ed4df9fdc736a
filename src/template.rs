//! Liquid page rendering for composed articles.
//!
//! The embedded default template produces a complete French article page
//! whose head satisfies every technical audit rule (charset, viewport,
//! canonical, robots, Open Graph, Twitter card, JSON-LD). The article
//! fragment itself supplies the `h1`; the template only frames it.

use liquid::model::Value;
use liquid::ParserBuilder;

use crate::error::{Error, Result};

/// Variables consumed by the page templates.
#[derive(Debug, Clone)]
pub struct PageVars<'a> {
    pub title: &'a str,
    pub meta_description: &'a str,
    /// Article body fragment, inserted unescaped.
    pub content: &'a str,
    /// Publication date, `YYYY-MM-DD`.
    pub date: &'a str,
    pub author: &'a str,
}

/// Default article page template.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <meta name="description" content="{{ meta_description }}">
    <link rel="canonical" href="https://blog.goseminary.com/">
    <meta name="robots" content="index, follow">
    <meta property="og:title" content="{{ title }}">
    <meta property="og:description" content="{{ meta_description }}">
    <meta property="og:type" content="article">
    <meta name="twitter:card" content="summary_large_image">
    <script type="application/ld+json">
    {
        "@context": "https://schema.org",
        "@type": "NewsArticle",
        "headline": "{{ title }}",
        "description": "{{ meta_description }}",
        "datePublished": "{{ date }}",
        "author": {
            "@type": "Person",
            "name": "{{ author }}"
        }
    }
    </script>
    <style>
        body { font-family: 'Segoe UI', system-ui, sans-serif; margin: 0; color: #1f2430; }
        header.site-header { background: linear-gradient(135deg, #7E22CE, #A94BE0); padding: 1rem 2rem; }
        header.site-header a { color: white; font-weight: 700; text-decoration: none; font-size: 1.2rem; }
        main { max-width: 800px; margin: 0 auto; padding: 2rem 1rem; }
        .article-meta { color: #666; font-size: 0.9rem; margin-bottom: 2rem; }
        .article-content { line-height: 1.7; }
        .article-content h2 { color: #7E22CE; margin-top: 2.5rem; }
        .article-content a.seminary-link { color: #7E22CE; font-weight: 600; }
        footer.site-footer { border-top: 1px solid #e5e7eb; padding: 1.5rem 2rem; color: #666; font-size: 0.9rem; }
    </style>
</head>
<body>
    <header class="site-header">
        <a href="https://goseminary.com">Seminary</a>
    </header>
    <main>
        <article>
            <div class="article-meta">
                <time datetime="{{ date }}">{{ date }}</time> · <span class="author">{{ author }}</span>
            </div>
            <div class="article-content">
{{ content }}
            </div>
        </article>
    </main>
    <footer class="site-footer">
        <a href="/">Seminary Blog</a> · Séminaires d'entreprise dans les Vosges
    </footer>
</body>
</html>
"#;

/// Render an article page from a liquid template source.
pub fn render_page(template_source: &str, vars: &PageVars<'_>) -> Result<String> {
    let parser = ParserBuilder::with_stdlib()
        .build()
        .map_err(|e| Error::TemplateError(e.to_string()))?;
    let template = parser
        .parse(template_source)
        .map_err(|e| Error::TemplateError(e.to_string()))?;

    let mut globals = liquid::Object::new();
    globals.insert("title".into(), Value::scalar(vars.title.to_string()));
    globals.insert(
        "meta_description".into(),
        Value::scalar(vars.meta_description.to_string()),
    );
    globals.insert("content".into(), Value::scalar(vars.content.to_string()));
    globals.insert("date".into(), Value::scalar(vars.date.to_string()));
    globals.insert("author".into(), Value::scalar(vars.author.to_string()));

    template
        .render(&globals)
        .map_err(|e| Error::TemplateError(e.to_string()))
}

/// Render an article page with the embedded default template.
pub fn render_default(vars: &PageVars<'_>) -> Result<String> {
    render_page(DEFAULT_TEMPLATE, vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    fn sample_vars() -> PageVars<'static> {
        PageVars {
            title: "Organiser un séminaire réussi dans les Vosges",
            meta_description: "Guide pratique pour planifier un séminaire d'entreprise.",
            content: "<h1>Organiser un séminaire réussi dans les Vosges</h1><p>Texte.</p>",
            date: "2025-08-22",
            author: "Seminary Blog Bot",
        }
    }

    #[test]
    fn test_default_template_substitutes_all_variables() {
        let page = render_default(&sample_vars()).expect("render");

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Organiser un séminaire réussi dans les Vosges</title>"));
        assert!(page.contains(r#"content="Guide pratique pour planifier un séminaire d'entreprise.""#));
        assert!(page.contains("<h1>Organiser un séminaire réussi dans les Vosges</h1>"));
        assert!(page.contains(r#"<time datetime="2025-08-22">"#));
        assert!(page.contains("Seminary Blog Bot"));
        assert!(page.contains(r#"<div class="article-content">"#));
    }

    #[test]
    fn test_default_template_head_passes_technical_rules() {
        let page = render_default(&sample_vars()).expect("render");
        let report = crate::audit(&page);

        assert!((report.categories.structure.score - 100.0).abs() < f64::EPSILON);
        assert!(report.categories.structure.issues.is_empty());
        assert!((report.categories.technical.score - 100.0).abs() < f64::EPSILON);
        assert!(report.categories.technical.warnings.is_empty());
    }

    #[test]
    fn test_json_ld_block_is_valid_json() {
        let page = render_default(&sample_vars()).expect("render");
        let doc = dom::parse(&page);
        let script = doc.select("script[type='application/ld+json']");
        assert!(script.exists());

        let payload: serde_json::Value =
            serde_json::from_str(script.text().trim()).expect("JSON-LD parses");
        assert_eq!(payload["@type"], "NewsArticle");
        assert_eq!(payload["author"]["name"], "Seminary Blog Bot");
    }

    #[test]
    fn test_custom_template() {
        let page = render_page("<title>{{ title }} | Seminary</title>", &sample_vars())
            .expect("render");
        assert_eq!(
            page,
            "<title>Organiser un séminaire réussi dans les Vosges | Seminary</title>"
        );
    }

    #[test]
    fn test_broken_template_reports_error() {
        let result = render_page("{% broken", &sample_vars());
        assert!(matches!(result, Err(Error::TemplateError(_))));
    }
}
