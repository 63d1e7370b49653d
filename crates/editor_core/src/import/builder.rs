//! Turns markup into arena nodes.

use scraper::{ElementRef, Html, Node};

use crate::dom::serialize::NODE_ID_ATTR;
use crate::dom::{Document, ElementData, NodeId};
use crate::error::EditorResult;

/// Parse `markup` as a body fragment and append its top-level nodes under
/// `parent`. Returns the ids of the appended top-level nodes in order.
///
/// Stage bookkeeping attributes present in the input are dropped so pasted
/// markup cannot impersonate existing nodes.
pub fn append_markup(
    doc: &mut Document,
    parent: NodeId,
    markup: &str,
) -> EditorResult<Vec<NodeId>> {
    let fragment = Html::parse_fragment(markup);
    append_children(doc, parent, fragment.root_element())
}

fn append_children(
    doc: &mut Document,
    parent: NodeId,
    source: ElementRef<'_>,
) -> EditorResult<Vec<NodeId>> {
    let mut created = Vec::new();

    for child in source.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let value = child_element.value();
            let mut element = ElementData::new(value.name());
            for (name, attr_value) in value.attrs() {
                if name.eq_ignore_ascii_case(NODE_ID_ATTR) {
                    continue;
                }
                element.set_attr(name, attr_value);
            }

            let id = doc.append_element(parent, element)?;
            append_children(doc, id, child_element)?;
            created.push(id);
        } else if let Node::Text(text) = child.value() {
            created.push(doc.append_text(parent, &**text)?);
        }
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::serialize::{inner_html, RenderMode};

    #[test]
    fn test_builds_nested_tree() {
        let mut doc = Document::new();
        let root = doc.root();
        let created = append_markup(
            &mut doc,
            root,
            r#"<div class="poster"><h1 style="color: red">Title</h1>text</div><img src="a.png">"#,
        )
        .unwrap();

        assert_eq!(created.len(), 2);
        let div = created[0];
        assert_eq!(doc.element(div).unwrap().attr("class"), Some("poster"));
        assert_eq!(doc.text_content(div), "Titletext");

        let h1 = doc.children(div)[0];
        assert_eq!(doc.element(h1).unwrap().style.get("color"), Some("red"));
        assert!(doc.is_image(created[1]));
    }

    #[test]
    fn test_node_id_attributes_are_dropped() {
        let mut doc = Document::new();
        let root = doc.root();
        append_markup(&mut doc, root, r#"<p data-node-id="0">x</p>"#).unwrap();
        let html = inner_html(&doc, root, RenderMode::Export);
        assert_eq!(html, "<p>x</p>");
    }

    #[test]
    fn test_style_text_is_kept_raw() {
        let mut doc = Document::new();
        let root = doc.root();
        append_markup(&mut doc, root, "<style>p > b { color: red }</style>").unwrap();
        let html = inner_html(&doc, root, RenderMode::Export);
        assert_eq!(html, "<style>p > b { color: red }</style>");
    }
}
