//! `sitemap.xml` generation.

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::escape::escape;
use std::fmt::Write as _;

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset
      xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
      xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
      xsi:schemaLocation="http://www.sitemaps.org/schemas/sitemap/0.9
            http://www.sitemaps.org/schemas/sitemap/0.9/sitemap.xsd">
"#;

/// Site URLs: the home page, the article list, then one per slug.
pub fn site_urls<'a>(base_url: &str, slugs: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let base = base_url.trim_end_matches('/');
    let mut urls = vec![format!("{base}/"), format!("{base}/articles")];
    urls.extend(slugs.into_iter().map(|slug| format!("{base}/{slug}")));
    urls
}

/// Render a sitemap where every URL shares `lastmod` and `priority`.
pub fn render_sitemap<'a>(
    base_url: &str,
    slugs: impl IntoIterator<Item = &'a str>,
    lastmod: DateTime<Utc>,
    priority: &str,
) -> String {
    let lastmod = lastmod.to_rfc3339_opts(SecondsFormat::Millis, true);
    let priority = escape(priority);

    let mut xml = String::from(HEADER);
    for url in site_urls(base_url, slugs) {
        // Writing to a String cannot fail.
        let _ = write!(
            xml,
            "\n<url>\n  <loc>{}</loc>\n  <lastmod>{lastmod}</lastmod>\n  <priority>{priority}</priority>\n</url>",
            escape(url.as_str())
        );
    }
    xml.push_str("\n\n</urlset>\n");
    xml
}
