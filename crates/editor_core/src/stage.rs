//! Canvas geometry, layout probing and the drag state machine types.

use crate::config::CanvasConfig;
use crate::dom::{Document, NodeId};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Box in canvas coordinates (origin at the container's top-left corner).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl PointerButton {
    /// Map a `MouseEvent.button` value.
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// Source of rendered geometry and computed style for stage nodes.
///
/// The browser shell answers from the live DOM; [`InlineLayoutProbe`]
/// answers from inline styles alone.
pub trait LayoutProbe {
    /// Border box of `node` relative to the canvas container.
    fn bounding_box(&self, doc: &Document, node: NodeId) -> Option<Rect>;

    /// Computed value of a CSS property, `None` when unknown.
    fn computed_style(&self, doc: &Document, node: NodeId, property: &str) -> Option<String>;
}

/// Geometry derived from inline `left`/`top`/`width`/`height` (and image
/// `width`/`height` attributes); computed style resolved through inline
/// declarations of the node and its ancestors.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineLayoutProbe;

impl LayoutProbe for InlineLayoutProbe {
    fn bounding_box(&self, doc: &Document, node: NodeId) -> Option<Rect> {
        let element = doc.element(node)?;
        let style_px = |name: &str| element.style.get(name).and_then(parse_int);
        let size = |name: &str| {
            style_px(name)
                .or_else(|| element.attr(name).and_then(parse_int))
                .unwrap_or(0)
        };

        Some(Rect {
            left: style_px("left").unwrap_or(0) as f64,
            top: style_px("top").unwrap_or(0) as f64,
            width: size("width") as f64,
            height: size("height") as f64,
        })
    }

    fn computed_style(&self, doc: &Document, node: NodeId, property: &str) -> Option<String> {
        let mut current = Some(node);
        while let Some(id) = current {
            if let Some(value) = doc.element(id).and_then(|element| element.style.get(property)) {
                return Some(value.to_string());
            }
            current = doc.parent(id);
        }
        None
    }
}

/// Ephemeral state between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub node: NodeId,
    pub pointer_start: Point,
    pub origin: Point,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    /// Nothing happened (no selection, wrong button, target outside the
    /// selection, or no drag in progress).
    Ignored,
    DragStarted { origin: Point },
    /// The element was moved to this clamped position.
    Moved { position: Point },
    DragEnded,
}

/// Clamp a desired top-left position so a `size`-sized box stays on the
/// canvas. A box larger than the canvas pins to the origin.
pub fn clamp_to_canvas(desired: Point, width: f64, height: f64, canvas: &CanvasConfig) -> Point {
    let clamp = |value: f64, max: f64| {
        let clamped = value.min(max).max(0.0);
        if clamped == 0.0 {
            0.0
        } else {
            clamped
        }
    };

    Point {
        x: clamp(desired.x, canvas.width - width),
        y: clamp(desired.y, canvas.height - height),
    }
}

/// `parseInt`-style integer parse: optional leading whitespace and sign,
/// then as many digits as present; trailing garbage (`px`, `.5`) is ignored.
pub fn parse_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .bytes()
        .position(|byte| !byte.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Format a pixel length the way script-assigned styles read back:
/// `570px`, `12.5px`.
pub fn format_px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementData;

    #[test]
    fn test_clamp_to_canvas() {
        let canvas = CanvasConfig::default();
        assert_eq!(
            clamp_to_canvas(Point::new(1000.0, 1000.0), 150.0, 150.0, &canvas),
            Point::new(570.0, 570.0)
        );
        assert_eq!(
            clamp_to_canvas(Point::new(-1000.0, -1000.0), 150.0, 150.0, &canvas),
            Point::new(0.0, 0.0)
        );
        assert_eq!(
            clamp_to_canvas(Point::new(300.0, 20.0), 150.0, 150.0, &canvas),
            Point::new(300.0, 20.0)
        );
    }

    #[test]
    fn test_oversized_box_pins_to_origin() {
        let canvas = CanvasConfig::default();
        assert_eq!(
            clamp_to_canvas(Point::new(40.0, 40.0), 900.0, 800.0, &canvas),
            Point::new(0.0, 0.0)
        );
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("50px"), Some(50));
        assert_eq!(parse_int("  12.7px"), Some(12));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("+8"), Some(8));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
    }

    #[test]
    fn test_format_px() {
        assert_eq!(format_px(570.0), "570px");
        assert_eq!(format_px(12.5), "12.5px");
        assert_eq!(format_px(0.0), "0px");
    }

    #[test]
    fn test_inline_probe_geometry() {
        let mut doc = Document::new();
        let root = doc.root();
        let mut img = ElementData::new("img");
        img.set_attr("width", "80");
        img.set_attr("style", "left: 10px; top: 20px; height: 40px");
        let img = doc.append_element(root, img).unwrap();

        let rect = InlineLayoutProbe.bounding_box(&doc, img).unwrap();
        assert_eq!(
            rect,
            Rect {
                left: 10.0,
                top: 20.0,
                width: 80.0,
                height: 40.0
            }
        );
    }

    #[test]
    fn test_inline_probe_inherits_from_ancestors() {
        let mut doc = Document::new();
        let root = doc.root();
        let mut div = ElementData::new("div");
        div.set_attr("style", "color: navy");
        let div = doc.append_element(root, div).unwrap();
        let span = doc.append_element(div, ElementData::new("span")).unwrap();

        assert_eq!(
            InlineLayoutProbe.computed_style(&doc, span, "color").as_deref(),
            Some("navy")
        );
        assert_eq!(InlineLayoutProbe.computed_style(&doc, span, "font-size"), None);
    }
}
