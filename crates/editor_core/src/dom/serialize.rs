//! HTML serialization of the arena.

use super::{Document, ElementData, InlineStyle, NodeData, NodeId};
use crate::config::StageConfig;

/// Attribute carrying the arena id of each element on the stage.
pub const NODE_ID_ATTR: &str = "data-node-id";

/// Properties painted by the stage that must never leak into an export.
pub const PRESENTATION_PROPERTIES: [&str; 3] = ["outline", "outline-offset", "cursor"];

const VOID_ELEMENTS: [&str; 15] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr",
];

const RAW_TEXT_ELEMENTS: [&str; 7] = [
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

#[derive(Debug, Clone, Copy)]
pub enum RenderMode<'a> {
    /// Markup for the live canvas: every element is tagged with its id and
    /// carries the hover cursor, the selected one also gets the outline.
    Stage {
        selected: Option<NodeId>,
        affordances: &'a StageConfig,
    },
    /// Standalone markup with presentation affordances stripped.
    Export,
}

/// Serialize the children of `id` (the equivalent of `innerHTML`).
pub fn inner_html(doc: &Document, id: NodeId, mode: RenderMode<'_>) -> String {
    let mut out = String::new();
    let raw = doc
        .element(id)
        .is_some_and(|element| RAW_TEXT_ELEMENTS.contains(&element.tag.as_str()));
    for child in doc.children(id) {
        write_node(doc, *child, mode, raw, &mut out);
    }
    out
}

fn write_node(
    doc: &Document,
    id: NodeId,
    mode: RenderMode<'_>,
    raw_parent: bool,
    out: &mut String,
) {
    match doc.data(id) {
        Some(NodeData::Text(text)) => {
            if raw_parent {
                out.push_str(text);
            } else {
                escape_text(text, out);
            }
        }
        Some(NodeData::Element(element)) => write_element(doc, id, element, mode, out),
        None => {}
    }
}

fn write_element(
    doc: &Document,
    id: NodeId,
    element: &ElementData,
    mode: RenderMode<'_>,
    out: &mut String,
) {
    out.push('<');
    out.push_str(&element.tag);

    if let RenderMode::Stage { .. } = mode {
        write_attr(NODE_ID_ATTR, &id.to_string(), out);
    }
    for (name, value) in &element.attrs {
        write_attr(name, value, out);
    }

    let style = presented_style(id, &element.style, mode);
    if !style.is_empty() {
        write_attr("style", &style.to_css_text(), out);
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag.as_str()) {
        return;
    }

    let raw = RAW_TEXT_ELEMENTS.contains(&element.tag.as_str());
    for child in doc.children(id) {
        write_node(doc, *child, mode, raw, out);
    }

    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn presented_style(id: NodeId, style: &InlineStyle, mode: RenderMode<'_>) -> InlineStyle {
    let mut style = style.clone();
    match mode {
        RenderMode::Stage {
            selected,
            affordances,
        } => {
            style.set("cursor", &affordances.cursor);
            if selected == Some(id) {
                style.set("outline", &affordances.outline);
                style.set("outline-offset", &affordances.outline_offset);
            }
        }
        RenderMode::Export => {
            for property in PRESENTATION_PROPERTIES {
                style.remove(property);
            }
        }
    }
    style
}

fn write_attr(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();

        let mut p = ElementData::new("p");
        p.set_attr("class", "title");
        p.set_attr("style", "left: 5px; outline: 1px dashed red; cursor: move");
        let p = doc.append_element(root, p).unwrap();
        doc.append_text(p, "Fish & <chips>").unwrap();

        let mut img = ElementData::new("img");
        img.set_attr("src", "a.png");
        img.set_attr("alt", "say \"hi\"");
        let img = doc.append_element(root, img).unwrap();

        let style = doc.append_element(root, ElementData::new("style")).unwrap();
        doc.append_text(style, ".poster > p { color: red }").unwrap();

        (doc, p, img)
    }

    #[test]
    fn test_export_escapes_and_strips_presentation() {
        let (doc, _, _) = sample();
        let html = inner_html(&doc, doc.root(), RenderMode::Export);
        assert_eq!(
            html,
            "<p class=\"title\" style=\"left: 5px;\">Fish &amp; &lt;chips&gt;</p>\
             <img src=\"a.png\" alt=\"say &quot;hi&quot;\">\
             <style>.poster > p { color: red }</style>"
        );
    }

    #[test]
    fn test_stage_tags_nodes_and_outlines_selection_only() {
        let (doc, p, img) = sample();
        let affordances = StageConfig::default();
        let html = inner_html(
            &doc,
            doc.root(),
            RenderMode::Stage {
                selected: Some(img),
                affordances: &affordances,
            },
        );

        assert!(html.contains(&format!("<p data-node-id=\"{p}\" class=\"title\"")));
        assert!(html.contains(&format!(
            "<img data-node-id=\"{img}\" src=\"a.png\" alt=\"say &quot;hi&quot;\" \
             style=\"cursor: pointer; outline: 2px solid #3b82f6; outline-offset: 2px;\">"
        )));
        assert_eq!(html.matches("outline-offset").count(), 1);
    }
}
