//! Arena-backed node tree for the poster canvas.
//!
//! Nodes are addressed by [`NodeId`]s that stay valid for the lifetime of the
//! node and are never reused, so a stale id held by the host simply stops
//! resolving once its node is removed.

pub mod serialize;
pub mod style;

use std::fmt;

use crate::error::{EditorError, EditorResult};

pub use serialize::RenderMode;
pub use style::InlineStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Parse the value of a `data-node-id` attribute.
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse().ok().map(Self)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Lower-case tag name.
    pub tag: String,
    /// Attributes in source order, `style` excluded.
    pub attrs: Vec<(String, String)>,
    pub style: InlineStyle,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            style: InlineStyle::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if name.eq_ignore_ascii_case("style") {
            self.style = InlineStyle::parse(&value);
            return;
        }
        match self
            .attrs
            .iter_mut()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name.to_ascii_lowercase(), value)),
        }
    }

    pub fn is_image(&self) -> bool {
        self.tag == "img"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeRecord {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// The live poster tree. The root is the canvas container itself and is
/// never serialized; its children are the poster content.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<NodeRecord>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(NodeRecord {
                parent: None,
                children: Vec::new(),
                data: NodeData::Element(ElementData::new("div")),
            })],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.record(id).is_some()
    }

    /// Number of live nodes, the root excluded.
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.children(self.root()).is_empty()
    }

    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.record(id).map(|record| &record.data)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.data(id)? {
            NodeData::Element(element) => Some(element),
            NodeData::Text(_) => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.record_mut(id)?.data {
            NodeData::Element(element) => Some(element),
            NodeData::Text(_) => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.record(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.record(id)
            .map(|record| record.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn append_element(&mut self, parent: NodeId, element: ElementData) -> EditorResult<NodeId> {
        self.append(parent, NodeData::Element(element))
    }

    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> EditorResult<NodeId> {
        self.append(parent, NodeData::Text(text.into()))
    }

    fn append(&mut self, parent: NodeId, data: NodeData) -> EditorResult<NodeId> {
        match self.data(parent) {
            None => return Err(EditorError::UnknownNode(parent)),
            Some(NodeData::Text(_)) => return Err(EditorError::NotAnElement(parent)),
            Some(NodeData::Element(_)) => {}
        }

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(NodeRecord {
            parent: Some(parent),
            children: Vec::new(),
            data,
        }));
        if let Some(record) = self.record_mut(parent) {
            record.children.push(id);
        }
        Ok(id)
    }

    /// Detach a node from its parent and drop its whole subtree.
    ///
    /// Returns `false` when the node has no parent (the root, or an id that
    /// no longer resolves); nothing changes in that case.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        if let Some(record) = self.record_mut(parent) {
            record.children.retain(|child| *child != id);
        }
        self.drop_subtree(id);
        true
    }

    /// Remove every node below the root.
    pub fn clear(&mut self) {
        let root = self.root();
        for child in self.children(root).to_vec() {
            self.remove(child);
        }
    }

    fn drop_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(record) = self.nodes.get_mut(current.0 as usize).and_then(Option::take) {
                stack.extend(record.children);
            }
        }
    }

    /// Concatenated text of all descendant text nodes, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        match self.data(id) {
            Some(NodeData::Text(text)) => text.clone(),
            Some(NodeData::Element(_)) => self
                .children(id)
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
            None => String::new(),
        }
    }

    /// Replace every child of an element with a single text node (or with
    /// nothing when `text` is empty).
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> EditorResult<()> {
        let record = self.record_mut(id).ok_or(EditorError::UnknownNode(id))?;
        if let NodeData::Text(existing) = &mut record.data {
            *existing = text.to_string();
            return Ok(());
        }

        // Retyping into a lone text child rewrites it in place.
        let only_child = match self.children(id) {
            [only] if !text.is_empty() => Some(*only),
            _ => None,
        };
        if let Some(NodeData::Text(existing)) = only_child
            .and_then(|only| self.record_mut(only))
            .map(|record| &mut record.data)
        {
            *existing = text.to_string();
            return Ok(());
        }

        for child in self.children(id).to_vec() {
            self.remove(child);
        }
        if !text.is_empty() {
            self.append_text(id, text)?;
        }
        Ok(())
    }

    /// `true` when `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.contains(ancestor) {
            return false;
        }
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Element descendants of `id` in document order, `id` itself excluded.
    pub fn element_descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.element(current).is_some() {
                out.push(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    pub fn is_image(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(ElementData::is_image)
    }

    fn record(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(id.0 as usize)?.as_ref()
    }

    fn record_mut(&mut self, id: NodeId) -> Option<&mut NodeRecord> {
        self.nodes.get_mut(id.0 as usize)?.as_mut()
    }
}
