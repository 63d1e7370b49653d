//! Properties form model: a snapshot of the selected element.

use crate::dom::style::normalize_property;
use crate::dom::{Document, NodeId};
use crate::stage::{parse_int, LayoutProbe};

const DEFAULT_FONT_SIZE: &str = "16px";
const DEFAULT_COLOR: &str = "rgb(0, 0, 0)";
const DEFAULT_FONT_WEIGHT: &str = "400";

/// Read-through view of the selected element as shown in the side panel.
///
/// Recomputed from scratch whenever the selection changes; individual
/// fields are updated together with the live node on every edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySnapshot {
    pub node: Option<NodeId>,
    pub tag_name: String,
    /// Empty for images.
    pub text_content: String,
    pub src: String,
    pub alt: String,
    pub width: String,
    pub height: String,
    pub font_size: String,
    pub color: String,
    pub font_weight: String,
    /// Inline `left`, empty when unset.
    pub left: String,
    /// Inline `top`, empty when unset.
    pub top: String,
}

impl PropertySnapshot {
    pub fn capture(doc: &Document, node: NodeId, probe: &dyn LayoutProbe) -> Option<Self> {
        let element = doc.element(node)?;
        let is_image = element.is_image();
        let inline = |name: &str| element.style.get(name).unwrap_or_default().to_string();

        let mut snapshot = Self {
            node: Some(node),
            tag_name: element.tag.clone(),
            left: inline("left"),
            top: inline("top"),
            ..Self::default()
        };

        if is_image {
            let rendered = probe.bounding_box(doc, node);
            let dimension = |attr: &str, rendered: Option<f64>| {
                rendered
                    .map(|value| value.round() as i64)
                    .or_else(|| element.attr(attr).and_then(parse_int))
                    .unwrap_or(0)
                    .to_string()
            };
            snapshot.src = element.attr("src").unwrap_or_default().to_string();
            snapshot.alt = element.attr("alt").unwrap_or_default().to_string();
            snapshot.width = dimension("width", rendered.map(|rect| rect.width));
            snapshot.height = dimension("height", rendered.map(|rect| rect.height));
        } else {
            let computed = |property: &str, fallback: &str| {
                probe
                    .computed_style(doc, node, property)
                    .filter(|value| !value.is_empty())
                    .unwrap_or_else(|| fallback.to_string())
            };
            snapshot.text_content = doc.text_content(node);
            snapshot.font_size = computed("font-size", DEFAULT_FONT_SIZE);
            snapshot.color = computed("color", DEFAULT_COLOR);
            snapshot.font_weight = computed("font-weight", DEFAULT_FONT_WEIGHT);
        }

        Some(snapshot)
    }

    pub fn is_image(&self) -> bool {
        self.tag_name == "img"
    }

    /// Mirror a style write into the matching form field, if there is one.
    pub fn record_style(&mut self, property: &str, value: &str) {
        let field = match normalize_property(property).as_str() {
            "font-size" => &mut self.font_size,
            "color" => &mut self.color,
            "font-weight" => &mut self.font_weight,
            "left" => &mut self.left,
            "top" => &mut self.top,
            _ => return,
        };
        *field = value.to_string();
    }
}

/// Result of a write-through edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// Nothing is selected (or the selected node is gone).
    NoSelection,
    /// Image-only edit on a non-image element, or similar.
    WrongElementKind,
}

impl EditOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageDimension {
    Width,
    Height,
}

impl ImageDimension {
    pub fn attr_name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

/// Parse a dimension field: `parseInt` semantics, `0` when unparseable,
/// negative values clamp to `0`.
pub fn parse_dimension(input: &str) -> u32 {
    parse_int(input)
        .map(|value| value.clamp(0, i64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}
