//! Inline `style` attribute model.

use std::fmt;

/// Ordered list of inline declarations, as found in a `style` attribute.
///
/// Values are stored verbatim; nothing here validates CSS syntax.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the text of a `style` attribute.
    ///
    /// Declarations without a colon or without a name are skipped. Semicolons
    /// inside quotes or parentheses (`url(data:image/png;base64,...)`) do not
    /// split declarations.
    pub fn parse(source: &str) -> Self {
        let mut style = Self::new();
        for chunk in split_declarations(source) {
            let Some((name, value)) = chunk.split_once(':') else {
                continue;
            };
            if name.trim().is_empty() {
                continue;
            }
            style.set(name, value);
        }
        style
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        let name = normalize_property(property);
        self.declarations
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set a declaration in place, keeping its position if it already exists.
    /// An empty value removes the declaration.
    pub fn set(&mut self, property: &str, value: &str) {
        let name = normalize_property(property);
        let value = value.trim();
        if value.is_empty() {
            self.remove(&name);
            return;
        }

        match self
            .declarations
            .iter_mut()
            .find(|(candidate, _)| *candidate == name)
        {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.declarations.push((name, value.to_string())),
        }
    }

    pub fn remove(&mut self, property: &str) -> bool {
        let name = normalize_property(property);
        let before = self.declarations.len();
        self.declarations.retain(|(candidate, _)| *candidate != name);
        self.declarations.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Serialized form suitable for a `style` attribute.
    pub fn to_css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css_text())
    }
}

/// Map a scripting-style name (`fontSize`) or a CSS name (`Font-Size`) onto
/// the canonical CSS property name (`font-size`). Custom properties keep
/// their case.
pub fn normalize_property(property: &str) -> String {
    let property = property.trim();
    if property.starts_with("--") {
        return property.to_string();
    }

    let mut name = String::with_capacity(property.len() + 4);
    for (idx, ch) in property.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx > 0 && !name.ends_with('-') {
                name.push('-');
            }
            name.push(ch.to_ascii_lowercase());
        } else {
            name.push(ch);
        }
    }
    name
}

fn split_declarations(source: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut quote: Option<char> = None;
    let mut start = 0_usize;

    for (idx, ch) in source.char_indices() {
        match (quote, ch) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(&source[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&source[start..]);

    parts
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .collect()
}
