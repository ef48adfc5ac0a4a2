use crate::element::Element;
use crate::shadow_root::ShadowRootMode;
use crate::NodeId;

/// A node stored in the [`crate::Dom`] arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) document: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub data: NodeData,
}

#[derive(Debug, Clone)]
pub enum NodeData {
    Document {
        /// Documents without a browsing context never look up custom element definitions.
        browsing_context: bool,
    },
    DocumentFragment,
    ShadowRoot {
        host: NodeId,
        mode: ShadowRootMode,
    },
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    pub(crate) fn new(document: Option<NodeId>, data: NodeData) -> Self {
        Self {
            document,
            parent: None,
            children: Vec::new(),
            data,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_document(&self) -> bool {
        matches!(self.data, NodeData::Document { .. })
    }

    pub fn is_document_fragment(&self) -> bool {
        matches!(self.data, NodeData::DocumentFragment | NodeData::ShadowRoot { .. })
    }

    pub fn is_shadow_root(&self) -> bool {
        matches!(self.data, NodeData::ShadowRoot { .. })
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.data, NodeData::Comment(_))
    }

    pub fn is_character_data(&self) -> bool {
        self.is_text() || self.is_comment()
    }

    pub fn as_element(&self) -> Option<&Element> {
        match &self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match &mut self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_element_with_tag(&self, tag: &str) -> bool {
        self.as_element()
            .is_some_and(|element| element.local_name == tag)
    }

    pub fn is_element_with_one_of_tags(&self, tags: &[&str]) -> bool {
        self.as_element()
            .is_some_and(|element| tags.contains(&element.local_name.as_str()))
    }

    pub fn text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(data) | NodeData::Comment(data) => Some(data),
            _ => None,
        }
    }
}
