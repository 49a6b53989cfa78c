// Server-rendered HTML for the single-page UI.

use std::fmt::Write;

use crate::session::Session;

/// Render the main page for `session`.
pub fn render_index(session: &Session, source_url: &str) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Tidings: Headline Topics with Quantum NLP</title>\n\
         <link rel=\"stylesheet\" href=\"/assets/style.css\">\n\
         </head>\n<body>\n<main>\n",
    );
    html.push_str("<h1>Headline Topics with Quantum NLP</h1>\n");
    let _ = writeln!(
        html,
        "<p class=\"lead\">Scrape headlines from <a href=\"{0}\">{0}</a> and sort them into topics \
         with a simulated quantum NLP pipeline.</p>",
        escape_html(source_url)
    );

    if let Some(error) = &session.last_error {
        let _ = writeln!(
            html,
            "<div class=\"banner error\" role=\"alert\">{}</div>",
            escape_html(error)
        );
    }

    // Step 1: scrape
    html.push_str(
        "<section id=\"scrape\">\n<h2>1. Scrape</h2>\n\
         <form method=\"post\" action=\"/scrape\"><button type=\"submit\">Scrape Titles</button></form>\n",
    );
    if let Some(titles) = &session.titles {
        if !titles.is_empty() {
            let _ = writeln!(
                html,
                "<div class=\"banner success\">Scraped {} titles!</div>\n<ol class=\"titles\">",
                titles.len()
            );
            for title in titles {
                let _ = writeln!(html, "<li>{}</li>", escape_html(title));
            }
            html.push_str("</ol>\n");
        }
    }
    html.push_str("</section>\n");

    // Step 2: categorize
    if session.can_categorize() {
        html.push_str(
            "<section id=\"categorize\">\n<h2>2. Categorize</h2>\n\
             <form method=\"post\" action=\"/categorize\"><button type=\"submit\">Categorize Titles</button></form>\n",
        );
        if let Some(results) = &session.results {
            html.push_str(
                "<table class=\"results\">\n<thead><tr><th>Title</th><th>Category</th></tr></thead>\n<tbody>\n",
            );
            for row in results.rows() {
                let _ = writeln!(
                    html,
                    "<tr><td>{}</td><td>{}</td></tr>",
                    escape_html(&row.title),
                    escape_html(row.category.as_str())
                );
            }
            html.push_str("</tbody>\n</table>\n");
        }
        html.push_str("</section>\n");
    }

    // Step 3: download
    if session.can_download() {
        html.push_str(
            "<section id=\"download\">\n<h2>3. Download</h2>\n\
             <a class=\"button\" href=\"/download\" download>Download Categorized Titles as CSV</a>\n\
             </section>\n",
        );
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
