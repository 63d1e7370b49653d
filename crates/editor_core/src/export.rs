//! Standalone HTML export.

use crate::config::ExportConfig;

pub const EXPORT_MIME_TYPE: &str = "text/html";

/// A stylesheet known to the host, tagged at registration time with whether
/// it belongs in exported posters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredStyle {
    pub name: String,
    pub css: String,
    pub include_in_export: bool,
}

/// Stylesheets the host wants carried into exports (a poster theme, for
/// instance). Imported `<style>` blocks are not registered here; they are
/// part of the poster tree and export with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRegistry {
    entries: Vec<RegisteredStyle>,
}

impl StyleRegistry {
    /// Register or replace a stylesheet by name.
    pub fn register(&mut self, name: &str, css: &str, include_in_export: bool) {
        let entry = RegisteredStyle {
            name: name.to_string(),
            css: css.to_string(),
            include_in_export,
        };
        match self.entries.iter_mut().find(|existing| existing.name == name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.name != name);
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[RegisteredStyle] {
        &self.entries
    }

    /// Concatenated CSS of the export-included sheets, each followed by a
    /// newline, in registration order.
    pub fn export_css(&self) -> String {
        self.entries
            .iter()
            .filter(|entry| entry.include_in_export)
            .map(|entry| format!("{}\n", entry.css))
            .collect()
    }
}

/// A finished export, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedPoster {
    pub file_name: String,
    pub mime_type: &'static str,
    pub html: String,
}

/// Wrap body markup and collected styles in a standalone document.
pub fn render_document(body_markup: &str, collected_styles: &str, config: &ExportConfig) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <meta name="generator" content="{generator}" />
  <title>{title}</title>
  <style>
    {base_style}
    {collected_styles}
  </style>
</head>
<body>
  {body_markup}
</body>
</html>"#,
        lang = escape(&config.lang),
        generator = escape(&config.generator),
        title = escape(&config.title),
        base_style = config.base_style,
    )
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
