//! HTML import: parse, extract, sanitize.

pub mod builder;
pub mod sanitizer;

use scraper::{Html, Selector};

use crate::error::{EditorError, EditorResult};

pub use builder::append_markup;
pub use sanitizer::sanitize_markup;

/// Raw pieces pulled out of a parsed document before sanitizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSource {
    /// Inner markup of `<body>`, or the raw input when the body came out empty.
    pub body: String,
    /// Text of every `<style>` in `<head>`, joined with newlines.
    pub style_text: String,
    pub body_fell_back: bool,
}

/// Result of an import, ready to be mounted on the stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedMarkup {
    pub markup: String,
    pub style_text: String,
    pub body_fell_back: bool,
}

/// Parse `raw` with an HTML5 parser and split it into body markup and head
/// stylesheet text. Malformed input is never an error; the parser recovers.
pub fn extract_source(raw: &str) -> EditorResult<ExtractedSource> {
    let document = Html::parse_document(raw);

    let body = document
        .select(&selector("body")?)
        .next()
        .map(|body| body.inner_html())
        .unwrap_or_default();

    let style_text = document
        .select(&selector("head style")?)
        .map(|style| style.text().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n");

    let body_fell_back = body.is_empty();
    Ok(ExtractedSource {
        body: if body_fell_back { raw.to_string() } else { body },
        style_text,
        body_fell_back,
    })
}

/// Import pipeline: extract, sanitize the body, prepend the head styles.
pub fn import_html(raw: &str) -> EditorResult<ImportedMarkup> {
    let source = extract_source(raw)?;
    let mut markup = sanitize_markup(&source.body);

    if !source.style_text.is_empty() {
        markup = format!("<style>{}</style>{}", source.style_text, markup);
    }

    log::info!(
        "Imported {} bytes of HTML: {} bytes of sanitized markup, {} bytes of head styles{}",
        raw.len(),
        markup.len(),
        source.style_text.len(),
        if source.body_fell_back { " (no body, raw input used)" } else { "" }
    );

    Ok(ImportedMarkup {
        markup,
        style_text: source.style_text,
        body_fell_back: source.body_fell_back,
    })
}

fn selector(source: &str) -> EditorResult<Selector> {
    Selector::parse(source).map_err(|err| EditorError::Selector {
        selector: source.to_string(),
        reason: format!("{err:?}"),
    })
}
