//! Landing page rendering.
//!
//! Each page is a self-contained HTML document:
//!
//! - **Metadata**: `<title>`, meta description, canonical link and Open Graph
//!   title/description/url/type/site_name tags
//! - **Structured data**: one `application/ld+json` block describing the tool
//!   as a schema.org `WebApplication` named after the page title
//! - **Body**: heading and lede built from the same title/description
//! - **Call to action**: a single link to the tool with `utm_*` tracking
//!   parameters, the campaign being the page slug
//!
//! ## Escaping
//!
//! Dimension display strings are data. Markup is produced with
//! [maud](https://maud.lambda.xyz/), which escapes every interpolated string in
//! text and attribute positions. The JSON-LD block is serialized with
//! `serde_json` and then has `<`, `>` and `&` replaced by their `\u` escapes
//! (see [`escape_json_for_script`]), so no display string can close the
//! `<script>` element early.
//!
//! Rendering is a pure function of its inputs; styles are embedded at compile
//! time from `static/landing.css`.

use crate::config::SiteSettings;
use crate::types::PageMeta;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde_json::json;

const CSS: &str = include_str!("../static/landing.css");

/// Render a complete landing page.
pub fn render_page(site: &SiteSettings, page: &PageMeta) -> Markup {
    let document_title = format!("{} | {}", page.title, site.name);
    let structured = structured_data(site, page);
    let cta = cta_url(site, &page.slug);

    html! {
        (DOCTYPE)
        html lang=(site.language) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (document_title) }
                meta name="description" content=(page.description);
                link rel="canonical" href=(page.url);
                meta property="og:title" content=(page.title);
                meta property="og:description" content=(page.description);
                meta property="og:url" content=(page.url);
                meta property="og:type" content="website";
                meta property="og:site_name" content=(site.name);
                script type="application/ld+json" { (PreEscaped(structured)) }
                style { (PreEscaped(CSS)) }
            }
            body {
                header.site-header {
                    a href=(page.url) { (site.name) }
                }
                main.landing {
                    h1 { (page.title) }
                    p.lede { (page.description) }
                    a.cta href=(cta) { (site.cta_text) }
                }
                footer.site-footer {
                    p { (site.name) }
                }
            }
        }
    }
}

/// Call-to-action URL with tracking parameters.
pub fn cta_url(site: &SiteSettings, slug: &str) -> String {
    let tool_url = site.tool_url();
    let separator = if tool_url.contains('?') { '&' } else { '?' };
    format!(
        "{tool_url}{separator}utm_source={}&utm_medium={}&utm_campaign={}",
        urlencoding::encode(&site.utm_source),
        urlencoding::encode(&site.utm_medium),
        urlencoding::encode(slug),
    )
}

/// schema.org `WebApplication` block, safe to embed in a `<script>` element.
pub fn structured_data(site: &SiteSettings, page: &PageMeta) -> String {
    let ld = json!({
        "@context": "https://schema.org",
        "@type": "WebApplication",
        "name": page.title,
        "url": page.url,
        "description": page.description,
        "applicationCategory": site.category,
        "operatingSystem": "Web",
        "inLanguage": site.language,
    });
    escape_json_for_script(&ld.to_string())
}

/// Escape characters that are significant to the HTML parser inside `<script>`.
///
/// The result is still valid JSON with the same decoded value.
pub fn escape_json_for_script(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}
