//! Geometry and computed style read from the rendered stage.
use editor_core::dom::serialize::NODE_ID_ATTR;
use editor_core::{Document, LayoutProbe, NodeId, Point, Rect};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MouseEvent};

/// Answers layout questions from the live stage container. Coordinates are
/// relative to the container's top-left corner.
pub struct DomLayoutProbe {
    container: HtmlElement,
}

impl DomLayoutProbe {
    pub fn new(container: HtmlElement) -> Self {
        Self { container }
    }

    fn rendered(&self, node: NodeId) -> Option<Element> {
        let selector = format!("[{}=\"{}\"]", NODE_ID_ATTR, node);
        self.container.query_selector(&selector).ok().flatten()
    }

    pub fn pointer(&self, event: &MouseEvent) -> Point {
        let origin = self.container.get_bounding_client_rect();
        Point::new(
            event.client_x() as f64 - origin.left(),
            event.client_y() as f64 - origin.top(),
        )
    }

    /// Poster node under the event target; `None` for the bare canvas.
    pub fn target_node(&self, event: &MouseEvent) -> Option<NodeId> {
        let target = event.target()?.dyn_into::<Element>().ok()?;
        let hit = target
            .closest(&format!("[{}]", NODE_ID_ATTR))
            .ok()
            .flatten()?;
        if !self.container.contains(Some(hit.as_ref())) {
            return None;
        }
        NodeId::parse(&hit.get_attribute(NODE_ID_ATTR)?)
    }
}

impl LayoutProbe for DomLayoutProbe {
    fn bounding_box(&self, _doc: &Document, node: NodeId) -> Option<Rect> {
        let element = self.rendered(node)?;
        let rect = element.get_bounding_client_rect();
        let origin = self.container.get_bounding_client_rect();
        Some(Rect {
            left: rect.left() - origin.left(),
            top: rect.top() - origin.top(),
            width: rect.width(),
            height: rect.height(),
        })
    }

    fn computed_style(&self, _doc: &Document, node: NodeId, property: &str) -> Option<String> {
        let element = self.rendered(node)?;
        let style = web_sys::window()?.get_computed_style(&element).ok().flatten()?;
        style
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }
}
