//! The document session: single owner of the poster tree and of every
//! piece of editing state around it.
//!
//! Hosts never touch nodes directly. They call the session with node ids
//! resolved from their own events and re-render from [`DocumentSession::stage_markup`]
//! whenever the update listener fires.

use std::fmt;

use crate::config::EditorConfig;
use crate::dom::serialize::{inner_html, RenderMode};
use crate::dom::{Document, NodeId};
use crate::error::EditorResult;
use crate::export::{render_document, ExportedPoster, StyleRegistry, EXPORT_MIME_TYPE};
use crate::import::{self, ImportedMarkup};
use crate::properties::{parse_dimension, EditOutcome, ImageDimension, PropertySnapshot};
use crate::stage::{
    clamp_to_canvas, format_px, parse_int, DragSession, DragState, LayoutProbe, Point,
    PointerButton, PointerOutcome,
};
use crate::upload::{to_data_url, PendingUpload};

/// Called with the new revision after every mutation.
pub type UpdateListener = Box<dyn Fn(u64) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed(NodeId),
    NothingSelected,
    /// The selected node had no parent; nothing was removed.
    Detached,
}

pub struct DocumentSession {
    config: EditorConfig,
    doc: Document,
    /// Sanitized markup of the last import. Kept for inspection only; the
    /// tree is the source of truth once mounted.
    markup: String,
    selected: Option<NodeId>,
    drag: DragState,
    properties: Option<PropertySnapshot>,
    styles: StyleRegistry,
    revision: u64,
    listener: Option<UpdateListener>,
}

impl fmt::Debug for DocumentSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentSession")
            .field("nodes", &self.doc.len())
            .field("selected", &self.selected)
            .field("drag", &self.drag)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl Default for DocumentSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl DocumentSession {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            doc: Document::new(),
            markup: String::new(),
            selected: None,
            drag: DragState::Idle,
            properties: None,
            styles: StyleRegistry::default(),
            revision: 0,
            listener: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn imported_markup(&self) -> &str {
        &self.markup
    }

    /// The selected node, if it still exists.
    pub fn selected(&self) -> Option<NodeId> {
        self.selected.filter(|id| self.doc.contains(*id))
    }

    pub fn has_selection(&self) -> bool {
        self.selected().is_some()
    }

    pub fn properties(&self) -> Option<&PropertySnapshot> {
        self.properties.as_ref()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }

    pub fn set_update_listener(&mut self, listener: impl Fn(u64) + Send + Sync + 'static) {
        self.listener = Some(Box::new(listener));
    }

    fn notify(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        if let Some(listener) = &self.listener {
            listener(self.revision);
        }
    }

    fn reset_selection(&mut self) {
        self.selected = None;
        self.properties = None;
        self.drag = DragState::Idle;
    }

    // ── Import and fragments ────────────────────────────────────────────────

    /// Replace the whole poster with sanitized imported content.
    pub fn import_html(&mut self, raw: &str) -> EditorResult<ImportedMarkup> {
        let imported = import::import_html(raw)?;

        self.doc.clear();
        let root = self.doc.root();
        import::append_markup(&mut self.doc, root, &imported.markup)?;
        self.markup = imported.markup.clone();
        self.reset_selection();
        self.notify();

        Ok(imported)
    }

    /// Append trusted markup at the end of the poster and clear the selection.
    pub fn append_fragment(&mut self, markup: &str) -> EditorResult<Vec<NodeId>> {
        let root = self.doc.root();
        let created = import::append_markup(&mut self.doc, root, markup)?;
        self.reset_selection();
        self.notify();
        log::debug!("Appended {} node(s)", created.len());
        Ok(created)
    }

    /// Append the placeholder text block. It always lands at the configured
    /// coordinates, whatever is already there.
    pub fn add_text_block(&mut self) -> EditorResult<Vec<NodeId>> {
        let markup = self.config.blocks.text.clone();
        self.append_fragment(&markup)
    }

    pub fn add_image_block(&mut self) -> EditorResult<Vec<NodeId>> {
        let markup = self.config.blocks.image.clone();
        self.append_fragment(&markup)
    }

    // ── Selection ───────────────────────────────────────────────────────────

    /// Select an element and rebuild the properties snapshot from scratch.
    /// Returns `false` when `node` is not a live element. The canvas root is
    /// never selectable: hitting it clears the selection like a background
    /// click.
    pub fn select(&mut self, node: NodeId, probe: &dyn LayoutProbe) -> bool {
        if node == self.doc.root() {
            self.clear_selection();
            return false;
        }
        let Some(snapshot) = PropertySnapshot::capture(&self.doc, node, probe) else {
            log::debug!("Ignoring selection of non-element node {node}");
            return false;
        };

        self.selected = Some(node);
        self.properties = Some(snapshot);
        self.notify();
        log::debug!(
            "Selected <{}> {node}",
            self.properties
                .as_ref()
                .map(|p| p.tag_name.as_str())
                .unwrap_or_default()
        );
        true
    }

    pub fn clear_selection(&mut self) {
        if self.selected.is_none() && self.properties.is_none() {
            return;
        }
        self.reset_selection();
        self.notify();
    }

    /// Resolve a click on the stage: a node selects it, the bare background
    /// (`None` or the root) clears the selection.
    pub fn click(&mut self, target: Option<NodeId>, probe: &dyn LayoutProbe) {
        match target {
            Some(node) => {
                self.select(node, probe);
            }
            None => self.clear_selection(),
        }
    }

    /// Markup for the stage container: ids on every element, hover cursor
    /// everywhere, outline on the selection only.
    pub fn stage_markup(&self) -> String {
        inner_html(
            &self.doc,
            self.doc.root(),
            RenderMode::Stage {
                selected: self.selected(),
                affordances: &self.config.stage,
            },
        )
    }

    // ── Drag ────────────────────────────────────────────────────────────────

    /// Idle → Dragging. Requires a primary-button press on the selected node
    /// or one of its descendants.
    pub fn pointer_down(
        &mut self,
        target: Option<NodeId>,
        button: PointerButton,
        pointer: Point,
        probe: &dyn LayoutProbe,
    ) -> PointerOutcome {
        let Some(selected) = self.selected() else {
            return PointerOutcome::Ignored;
        };
        if button != PointerButton::Primary {
            return PointerOutcome::Ignored;
        }
        let Some(target) = target else {
            return PointerOutcome::Ignored;
        };
        if !self.doc.is_inclusive_ancestor(selected, target) {
            return PointerOutcome::Ignored;
        }

        let bounding_box = probe.bounding_box(&self.doc, selected).unwrap_or_default();
        let Some(element) = self.doc.element_mut(selected) else {
            return PointerOutcome::Ignored;
        };

        let inline = |name: &str| element.style.get(name).and_then(parse_int).map(|v| v as f64);
        let origin = Point::new(
            inline("left").unwrap_or(bounding_box.left),
            inline("top").unwrap_or(bounding_box.top),
        );

        if element.style.get("position") != Some("absolute") {
            element.style.set("position", "absolute");
        }

        self.drag = DragState::Dragging(DragSession {
            node: selected,
            pointer_start: pointer,
            origin,
        });
        self.notify();
        log::debug!("Drag started on {selected} at ({}, {})", origin.x, origin.y);

        PointerOutcome::DragStarted { origin }
    }

    /// Dragging → Dragging: move the element by the pointer delta, clamped
    /// to the canvas.
    pub fn pointer_move(&mut self, pointer: Point, probe: &dyn LayoutProbe) -> PointerOutcome {
        let DragState::Dragging(session) = self.drag else {
            return PointerOutcome::Ignored;
        };
        if !self.doc.contains(session.node) {
            self.drag = DragState::Idle;
            return PointerOutcome::Ignored;
        }

        let size = probe.bounding_box(&self.doc, session.node).unwrap_or_default();
        let desired = Point::new(
            session.origin.x + (pointer.x - session.pointer_start.x),
            session.origin.y + (pointer.y - session.pointer_start.y),
        );
        let position = clamp_to_canvas(desired, size.width, size.height, &self.config.canvas);

        let (left, top) = (format_px(position.x), format_px(position.y));
        if let Some(element) = self.doc.element_mut(session.node) {
            element.style.set("left", &left);
            element.style.set("top", &top);
        }
        if let Some(snapshot) = self
            .properties
            .as_mut()
            .filter(|snapshot| snapshot.node == Some(session.node))
        {
            snapshot.record_style("left", &left);
            snapshot.record_style("top", &top);
        }
        self.notify();

        PointerOutcome::Moved { position }
    }

    /// Dragging → Idle. Releasing always commits the current position.
    pub fn pointer_up(&mut self) -> PointerOutcome {
        match self.drag {
            DragState::Dragging(session) => {
                self.drag = DragState::Idle;
                log::debug!("Drag ended on {}", session.node);
                PointerOutcome::DragEnded
            }
            DragState::Idle => PointerOutcome::Ignored,
        }
    }

    /// The pointer left the canvas; same as releasing it.
    pub fn pointer_leave(&mut self) -> PointerOutcome {
        self.pointer_up()
    }

    // ── Property write-through ──────────────────────────────────────────────

    fn selected_for_edit(&self, image_only: bool) -> Result<NodeId, EditOutcome> {
        let node = self.selected().ok_or(EditOutcome::NoSelection)?;
        let element = self.doc.element(node).ok_or(EditOutcome::NoSelection)?;
        if image_only && !element.is_image() {
            return Err(EditOutcome::WrongElementKind);
        }
        Ok(node)
    }

    fn with_snapshot(&mut self, update: impl FnOnce(&mut PropertySnapshot)) {
        if let Some(snapshot) = self.properties.as_mut() {
            update(snapshot);
        }
    }

    /// Replace the selected element's children with `value` as plain text.
    pub fn set_text_content(&mut self, value: &str) -> EditOutcome {
        let node = match self.selected_for_edit(false) {
            Ok(node) => node,
            Err(outcome) => return outcome,
        };
        if self.doc.is_image(node) {
            return EditOutcome::WrongElementKind;
        }
        if self.doc.set_text_content(node, value).is_err() {
            return EditOutcome::NoSelection;
        }

        self.with_snapshot(|snapshot| snapshot.text_content = value.to_string());
        self.notify();
        EditOutcome::Applied
    }

    pub fn set_image_src(&mut self, value: &str) -> EditOutcome {
        self.set_image_attr("src", value, |snapshot, value| snapshot.src = value.to_string())
    }

    pub fn set_image_alt(&mut self, value: &str) -> EditOutcome {
        self.set_image_attr("alt", value, |snapshot, value| snapshot.alt = value.to_string())
    }

    /// Set the image width or height from raw form input. Unparseable input
    /// becomes `0`; the form keeps showing what was typed.
    pub fn set_image_dimension(&mut self, dimension: ImageDimension, input: &str) -> EditOutcome {
        let node = match self.selected_for_edit(true) {
            Ok(node) => node,
            Err(outcome) => return outcome,
        };
        let value = parse_dimension(input);
        if let Some(element) = self.doc.element_mut(node) {
            element.set_attr(dimension.attr_name(), value.to_string());
        }

        self.with_snapshot(|snapshot| match dimension {
            ImageDimension::Width => snapshot.width = input.to_string(),
            ImageDimension::Height => snapshot.height = input.to_string(),
        });
        self.notify();
        EditOutcome::Applied
    }

    fn set_image_attr(
        &mut self,
        attr: &str,
        value: &str,
        mirror: impl FnOnce(&mut PropertySnapshot, &str),
    ) -> EditOutcome {
        let node = match self.selected_for_edit(true) {
            Ok(node) => node,
            Err(outcome) => return outcome,
        };
        if let Some(element) = self.doc.element_mut(node) {
            element.set_attr(attr, value);
        }

        self.with_snapshot(|snapshot| mirror(snapshot, value));
        self.notify();
        EditOutcome::Applied
    }

    /// Write an inline style declaration on the selected element. The value
    /// is not validated; an empty value removes the declaration.
    pub fn set_style(&mut self, property: &str, value: &str) -> EditOutcome {
        let node = match self.selected_for_edit(false) {
            Ok(node) => node,
            Err(outcome) => return outcome,
        };
        if let Some(element) = self.doc.element_mut(node) {
            element.style.set(property, value);
        }

        self.with_snapshot(|snapshot| snapshot.record_style(property, value));
        self.notify();
        EditOutcome::Applied
    }

    // ── Image upload ────────────────────────────────────────────────────────

    /// Start an upload for the selected image. `None` when no image is
    /// selected.
    pub fn begin_upload(&self) -> Option<PendingUpload> {
        let target = self.selected_for_edit(true).ok()?;
        Some(PendingUpload { target })
    }

    /// Complete an upload: write the file as a `data:` URL onto the image
    /// captured by [`Self::begin_upload`], if it still exists.
    pub fn complete_upload(
        &mut self,
        pending: PendingUpload,
        mime: &str,
        bytes: &[u8],
    ) -> EditOutcome {
        if !self.doc.contains(pending.target) {
            return EditOutcome::NoSelection;
        }
        if !self.doc.is_image(pending.target) {
            return EditOutcome::WrongElementKind;
        }

        let url = to_data_url(mime, bytes);
        if let Some(element) = self.doc.element_mut(pending.target) {
            element.set_attr("src", url.as_str());
        }
        if let Some(snapshot) = self
            .properties
            .as_mut()
            .filter(|snapshot| snapshot.node == Some(pending.target))
        {
            snapshot.src = url;
        }
        self.notify();
        log::info!("Uploaded {} byte(s) into image {}", bytes.len(), pending.target);
        EditOutcome::Applied
    }

    // ── Delete and export ───────────────────────────────────────────────────

    pub fn delete_selection(&mut self) -> DeleteOutcome {
        let Some(node) = self.selected() else {
            return DeleteOutcome::NothingSelected;
        };
        if !self.doc.remove(node) {
            return DeleteOutcome::Detached;
        }

        self.reset_selection();
        self.notify();
        log::info!("Deleted node {node}");
        DeleteOutcome::Removed(node)
    }

    /// Serialize the live tree into a standalone document. Stage
    /// affordances are stripped from every element.
    pub fn export(&self) -> ExportedPoster {
        let body = inner_html(&self.doc, self.doc.root(), RenderMode::Export);
        let html = render_document(&body, &self.styles.export_css(), &self.config.export);
        log::info!("Exported poster: {} bytes", html.len());

        ExportedPoster {
            file_name: self.config.export.file_name.clone(),
            mime_type: EXPORT_MIME_TYPE,
            html,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::InlineLayoutProbe;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    const PROBE: InlineLayoutProbe = InlineLayoutProbe;

    fn session_with(markup: &str) -> (DocumentSession, Vec<NodeId>) {
        let mut session = DocumentSession::default();
        session.import_html(markup).unwrap();
        let nodes = session.document().element_descendants(session.document().root());
        (session, nodes)
    }

    #[test]
    fn test_import_replaces_tree_and_clears_selection() {
        let (mut session, nodes) = session_with("<p>one</p>");
        assert!(session.select(nodes[0], &PROBE));

        session.import_html("<h1>two</h1>").unwrap();
        assert_eq!(session.selected(), None);
        assert!(session.properties().is_none());
        assert_eq!(session.stage_markup().matches("data-node-id").count(), 1);
        assert!(session.export().html.contains("<h1>two</h1>"));
        assert!(!session.export().html.contains("one"));
    }

    #[test]
    fn test_import_mounts_head_styles() {
        let (session, _) = session_with(
            "<html><head><style>.poster { color: red; }</style></head><body><div class=\"poster\">x</div></body></html>",
        );
        assert!(session
            .imported_markup()
            .starts_with("<style>.poster { color: red; }</style>"));
        assert!(session
            .export()
            .html
            .contains("<style>.poster { color: red; }</style><div class=\"poster\">x</div>"));
    }

    #[test]
    fn test_drag_clamps_to_canvas() {
        let (mut session, nodes) = session_with(
            r#"<div style="position: absolute; left: 0px; top: 0px; width: 150px; height: 150px;">box</div>"#,
        );
        let node = nodes[0];
        session.select(node, &PROBE);

        let start = Point::new(10.0, 10.0);
        assert_eq!(
            session.pointer_down(Some(node), PointerButton::Primary, start, &PROBE),
            PointerOutcome::DragStarted {
                origin: Point::new(0.0, 0.0)
            }
        );

        assert_eq!(
            session.pointer_move(Point::new(1010.0, 1010.0), &PROBE),
            PointerOutcome::Moved {
                position: Point::new(570.0, 570.0)
            }
        );
        let style = &session.document().element(node).unwrap().style;
        assert_eq!(style.get("left"), Some("570px"));
        assert_eq!(style.get("top"), Some("570px"));

        session.pointer_move(Point::new(-990.0, -990.0), &PROBE);
        let style = &session.document().element(node).unwrap().style;
        assert_eq!(style.get("left"), Some("0px"));
        assert_eq!(style.get("top"), Some("0px"));

        assert_eq!(session.pointer_up(), PointerOutcome::DragEnded);
        assert_eq!(session.pointer_up(), PointerOutcome::Ignored);
        assert_eq!(
            session.pointer_move(Point::new(50.0, 50.0), &PROBE),
            PointerOutcome::Ignored
        );
    }

    #[test]
    fn test_drag_moves_by_delta_from_inline_origin() {
        let (mut session, nodes) = session_with(
            r#"<p style="position: absolute; left: 50px; top: 40px; width: 100px; height: 20px;">x</p>"#,
        );
        let node = nodes[0];
        session.select(node, &PROBE);
        session.pointer_down(Some(node), PointerButton::Primary, Point::new(200.0, 200.0), &PROBE);
        session.pointer_move(Point::new(230.0, 195.0), &PROBE);

        let style = &session.document().element(node).unwrap().style;
        assert_eq!(style.get("left"), Some("80px"));
        assert_eq!(style.get("top"), Some("35px"));
        assert_eq!(session.properties().unwrap().left, "80px");
        assert_eq!(session.properties().unwrap().top, "35px");

        assert_eq!(session.pointer_leave(), PointerOutcome::DragEnded);
        assert!(!session.drag_state().is_dragging());
    }

    #[test]
    fn test_drag_promotes_flow_element_to_absolute() {
        let (mut session, nodes) =
            session_with(r#"<div style="width: 100px; height: 100px;">x</div>"#);
        let node = nodes[0];
        session.select(node, &PROBE);
        session.pointer_down(Some(node), PointerButton::Primary, Point::default(), &PROBE);

        let style = &session.document().element(node).unwrap().style;
        assert_eq!(style.get("position"), Some("absolute"));
    }

    #[test]
    fn test_drag_from_descendant_of_selection() {
        let (mut session, nodes) = session_with("<div><span>inner</span></div>");
        let (div, span) = (nodes[0], nodes[1]);
        session.select(div, &PROBE);
        assert!(matches!(
            session.pointer_down(Some(span), PointerButton::Primary, Point::default(), &PROBE),
            PointerOutcome::DragStarted { .. }
        ));
    }

    #[test]
    fn test_pointer_down_is_ignored_without_matching_selection() {
        let (mut session, nodes) = session_with("<p>a</p><p>b</p>");
        let (a, b) = (nodes[0], nodes[1]);

        assert_eq!(
            session.pointer_down(Some(a), PointerButton::Primary, Point::default(), &PROBE),
            PointerOutcome::Ignored
        );
        assert_eq!(session.selected(), None);

        session.select(a, &PROBE);
        assert_eq!(
            session.pointer_down(Some(b), PointerButton::Primary, Point::default(), &PROBE),
            PointerOutcome::Ignored
        );
        assert_eq!(
            session.pointer_down(Some(a), PointerButton::Secondary, Point::default(), &PROBE),
            PointerOutcome::Ignored
        );
        assert_eq!(
            session.pointer_down(None, PointerButton::Primary, Point::default(), &PROBE),
            PointerOutcome::Ignored
        );
        assert!(!session.drag_state().is_dragging());
    }

    #[test]
    fn test_selection_is_exclusive() {
        let (mut session, nodes) = session_with("<p>a</p><p>b</p>");
        let (a, b) = (nodes[0], nodes[1]);

        session.select(a, &PROBE);
        session.select(b, &PROBE);

        let markup = session.stage_markup();
        assert_eq!(markup.matches("outline:").count(), 1);
        assert!(markup.contains(&format!(
            "<p data-node-id=\"{b}\" style=\"cursor: pointer; outline: 2px solid #3b82f6; outline-offset: 2px;\">b</p>"
        )));
        assert!(markup.contains(&format!("<p data-node-id=\"{a}\" style=\"cursor: pointer;\">a</p>")));
        assert_eq!(session.selected(), Some(b));
        assert_eq!(session.properties().unwrap().text_content, "b");
    }

    #[test]
    fn test_background_click_clears_selection() {
        let (mut session, nodes) = session_with("<p>a</p>");
        session.click(Some(nodes[0]), &PROBE);
        assert_eq!(session.selected(), Some(nodes[0]));

        session.click(None, &PROBE);
        assert_eq!(session.selected(), None);
        assert!(!session.stage_markup().contains("outline"));
    }

    #[test]
    fn test_canvas_root_is_not_selectable() {
        let (mut session, nodes) = session_with("<p>a</p><p>b</p>");
        let root = session.document().root();
        session.select(nodes[0], &PROBE);

        assert!(!session.select(root, &PROBE));
        assert_eq!(session.selected(), None);
        assert!(session.properties().is_none());
        assert_eq!(session.set_text_content("wiped"), EditOutcome::NoSelection);
        assert_eq!(session.delete_selection(), DeleteOutcome::NothingSelected);

        session.select(nodes[1], &PROBE);
        session.click(Some(root), &PROBE);
        assert_eq!(session.selected(), None);

        let html = session.export().html;
        assert!(html.contains("<p>a</p><p>b</p>"));
        assert!(!html.contains("wiped"));
    }

    #[test]
    fn test_selecting_text_node_is_rejected() {
        let (mut session, nodes) = session_with("<p>a</p>");
        let text = session.document().children(nodes[0])[0];
        assert!(!session.select(text, &PROBE));
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_delete_removes_node_and_disables_edits() {
        let (mut session, nodes) = session_with("<p>keep</p><p>drop</p>");
        let drop = nodes[1];
        session.select(drop, &PROBE);

        assert_eq!(session.delete_selection(), DeleteOutcome::Removed(drop));
        assert!(!session.document().contains(drop));
        assert_eq!(session.selected(), None);
        assert!(session.properties().is_none());

        assert_eq!(session.set_style("color", "red"), EditOutcome::NoSelection);
        assert_eq!(session.set_text_content("x"), EditOutcome::NoSelection);
        assert_eq!(session.delete_selection(), DeleteOutcome::NothingSelected);

        let html = session.export().html;
        assert!(html.contains("<p>keep</p>"));
        assert!(!html.contains("drop"));
    }

    #[test]
    fn test_export_strips_presentation_from_selected_element() {
        let (mut session, nodes) = session_with(r#"<p style="color: red;">x</p>"#);
        session.select(nodes[0], &PROBE);
        assert!(session.stage_markup().contains("outline"));

        let exported = session.export();
        assert!(!exported.html.contains("outline"));
        assert!(!exported.html.contains("cursor"));
        assert!(!exported.html.contains("data-node-id"));
        assert!(exported.html.contains(r#"<p style="color: red;">x</p>"#));
        assert_eq!(exported.file_name, "poster.html");
        assert_eq!(exported.mime_type, "text/html");
    }

    #[test]
    fn test_export_includes_registered_styles_only() {
        let mut session = DocumentSession::default();
        session.styles_mut().register("theme", ".poster { color: red; }", true);
        session.styles_mut().register("chrome", ".toolbar { gap: 4px; }", false);

        let html = session.export().html;
        assert!(html.contains(".poster { color: red; }"));
        assert!(!html.contains(".toolbar"));
    }

    #[test]
    fn test_image_dimension_edits() {
        let mut session = DocumentSession::default();
        let image = session.add_image_block().unwrap()[0];
        session.select(image, &PROBE);

        assert_eq!(
            session.set_image_dimension(ImageDimension::Width, "abc"),
            EditOutcome::Applied
        );
        assert_eq!(session.document().element(image).unwrap().attr("width"), Some("0"));
        assert_eq!(session.properties().unwrap().width, "abc");

        session.set_image_dimension(ImageDimension::Width, "200");
        assert_eq!(session.document().element(image).unwrap().attr("width"), Some("200"));

        session.set_image_dimension(ImageDimension::Height, "75");
        assert_eq!(session.document().element(image).unwrap().attr("height"), Some("75"));
    }

    #[test]
    fn test_image_only_edits_reject_text_elements() {
        let mut session = DocumentSession::default();
        let text = session.add_text_block().unwrap()[0];
        session.select(text, &PROBE);

        assert_eq!(session.set_image_src("a.png"), EditOutcome::WrongElementKind);
        assert_eq!(
            session.set_image_dimension(ImageDimension::Width, "10"),
            EditOutcome::WrongElementKind
        );
        assert!(session.begin_upload().is_none());
    }

    #[test]
    fn test_text_and_style_write_through() {
        let mut session = DocumentSession::default();
        let text = session.add_text_block().unwrap()[0];
        session.select(text, &PROBE);

        let snapshot = session.properties().unwrap();
        assert_eq!(snapshot.text_content, "New Text Block");
        assert_eq!(snapshot.font_size, "16px");
        assert_eq!(snapshot.color, "#000000");
        assert_eq!(snapshot.left, "50px");
        assert_eq!(snapshot.top, "50px");

        assert!(session.set_text_content("Grand Opening").is_applied());
        assert!(session.set_style("fontSize", "32px").is_applied());
        assert!(session.set_style("fontWeight", "bold").is_applied());
        assert!(session.set_style("color", "definitely not a colour").is_applied());

        let snapshot = session.properties().unwrap();
        assert_eq!(snapshot.text_content, "Grand Opening");
        assert_eq!(snapshot.font_size, "32px");
        assert_eq!(snapshot.font_weight, "bold");

        let element = session.document().element(text).unwrap();
        assert_eq!(element.style.get("font-size"), Some("32px"));
        assert_eq!(element.style.get("color"), Some("definitely not a colour"));
        assert_eq!(session.document().text_content(text), "Grand Opening");
    }

    #[test]
    fn test_image_src_and_alt_write_through() {
        let mut session = DocumentSession::default();
        let image = session.add_image_block().unwrap()[0];
        session.select(image, &PROBE);

        session.set_image_src("https://example.com/cat.png");
        session.set_image_alt("A cat");

        let element = session.document().element(image).unwrap();
        assert_eq!(element.attr("src"), Some("https://example.com/cat.png"));
        assert_eq!(element.attr("alt"), Some("A cat"));
        assert_eq!(session.properties().unwrap().src, "https://example.com/cat.png");
        assert_eq!(session.properties().unwrap().alt, "A cat");
    }

    #[test]
    fn test_upload_targets_image_selected_at_start() {
        let mut session = DocumentSession::default();
        let first = session.add_image_block().unwrap()[0];
        let second = session.add_image_block().unwrap()[0];

        session.select(first, &PROBE);
        let first_upload = session.begin_upload().unwrap();
        session.select(second, &PROBE);
        let second_upload = session.begin_upload().unwrap();

        assert!(session.complete_upload(second_upload, "image/png", b"two").is_applied());
        assert!(session.complete_upload(first_upload, "image/png", b"one").is_applied());

        let src = |id| session.document().element(id).unwrap().attr("src").unwrap().to_string();
        assert_eq!(src(first), "data:image/png;base64,b25l");
        assert_eq!(src(second), "data:image/png;base64,dHdv");
        assert_eq!(session.properties().unwrap().src, "data:image/png;base64,dHdv");
    }

    #[test]
    fn test_upload_into_deleted_image_is_dropped() {
        let mut session = DocumentSession::default();
        let image = session.add_image_block().unwrap()[0];
        session.select(image, &PROBE);
        let pending = session.begin_upload().unwrap();
        session.delete_selection();

        assert_eq!(
            session.complete_upload(pending, "image/png", b"x"),
            EditOutcome::NoSelection
        );
    }

    #[test]
    fn test_add_blocks_then_export() {
        let mut session = DocumentSession::default();
        session.add_text_block().unwrap();
        session.add_image_block().unwrap();

        let html = session.export().html;
        let text = html
            .find(r#"<p style="position: absolute; top: 50px; left: 50px; font-size: 16px; color: #000000;">New Text Block</p>"#)
            .unwrap();
        let image = html
            .find(r#"<img src="https://via.placeholder.com/150" alt="New Image" style="position: absolute; top: 100px; left: 100px; width: 150px; height: 150px;">"#)
            .unwrap();
        assert!(text < image);
    }

    #[test]
    fn test_add_block_clears_selection_and_keeps_edits() {
        let mut session = DocumentSession::default();
        let text = session.add_text_block().unwrap()[0];
        session.select(text, &PROBE);
        session.set_text_content("Edited");

        session.add_image_block().unwrap();
        assert_eq!(session.selected(), None);
        assert!(session.export().html.contains(">Edited</p>"));
    }

    #[test]
    fn test_listener_sees_every_mutation() {
        let seen = Arc::new(AtomicU64::new(0));
        let mut session = DocumentSession::default();
        let sink = Arc::clone(&seen);
        session.set_update_listener(move |revision| sink.store(revision, Ordering::SeqCst));

        let text = session.add_text_block().unwrap()[0];
        session.select(text, &PROBE);
        session.set_style("color", "red");

        assert_eq!(seen.load(Ordering::SeqCst), 3);
        assert_eq!(session.revision(), 3);

        session.set_image_src("ignored.png");
        assert_eq!(session.revision(), 3);
    }
}
