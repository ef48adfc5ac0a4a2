use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::custom_element_definition::{CustomElementCallbacks, CustomElementDefinition};
use crate::custom_element_reactions::{CustomElementReaction, ReactionQueue};
use crate::custom_element_registry::{is_valid_custom_element_name, CustomElementRegistry};
use crate::element::{is_valid_element_local_name, CustomElementState, Element};
use crate::node::{Node, NodeData};
use crate::{Attribute, DomException, NodeId};

/// Arena owning every node of every document, together with the custom element
/// registry and the instances constructed for custom elements.
#[derive(Default)]
pub struct Dom {
    nodes: Vec<Node>,
    pub(crate) custom_elements: CustomElementRegistry,
    pub(crate) instances: HashMap<NodeId, Box<dyn CustomElementCallbacks>>,
    pub(crate) reactions: ReactionQueue,
}

impl fmt::Debug for Dom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dom")
            .field("nodes", &self.nodes.len())
            .field("custom_elements", &self.custom_elements)
            .field("instances", &self.instances.len())
            .field("reactions", &self.reactions)
            .finish()
    }
}

impl Dom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn all_nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Nodes are never freed; a removed subtree stays in the arena.
    pub(crate) fn alloc(&mut self, document: Option<NodeId>, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(document, data));
        id
    }

    /// Creates a document that belongs to a browsing context, so custom element
    /// definitions apply to its elements.
    pub fn create_document(&mut self) -> NodeId {
        self.alloc(
            None,
            NodeData::Document {
                browsing_context: true,
            },
        )
    }

    /// Creates a document without a browsing context, like the ones used for
    /// parsing templates. Its elements are never upgraded.
    pub fn create_inert_document(&mut self) -> NodeId {
        self.alloc(
            None,
            NodeData::Document {
                browsing_context: false,
            },
        )
    }

    // SPECLINK: https://dom.spec.whatwg.org/#dom-document-createdocumentfragment
    pub fn create_document_fragment(&mut self, document: NodeId) -> NodeId {
        self.alloc(Some(document), NodeData::DocumentFragment)
    }

    // SPECLINK: https://dom.spec.whatwg.org/#dom-document-createtextnode
    pub fn create_text_node(&mut self, document: NodeId, data: &str) -> NodeId {
        self.alloc(Some(document), NodeData::Text(data.to_string()))
    }

    // SPECLINK: https://dom.spec.whatwg.org/#dom-document-createcomment
    pub fn create_comment(&mut self, document: NodeId, data: &str) -> NodeId {
        self.alloc(Some(document), NodeData::Comment(data.to_string()))
    }

    // SPECLINK: https://dom.spec.whatwg.org/#dom-document-createelement
    pub fn create_element(
        &mut self,
        document: NodeId,
        local_name: &str,
    ) -> Result<NodeId, DomException> {
        // 1. If localName is not a valid element local name, then throw an "InvalidCharacterError" DOMException.
        if !is_valid_element_local_name(local_name) {
            return Err(DomException::InvalidCharacterError);
        }

        // 2. If this is an HTML document, then set localName to localName in ASCII lowercase.
        let local_name = local_name.to_ascii_lowercase();

        // 6. Return the result of creating an element given this, localName, namespace, null, is,
        //    and with the synchronous custom elements flag set.
        let element = self.create_element_internal(document, &local_name, true);
        self.process_reactions();
        Ok(element)
    }

    /// Creates an element the way the HTML parser does: attributes are present
    /// before any custom element code runs and construction is deferred to the
    /// reaction queue.
    pub fn create_element_for_parser(
        &mut self,
        document: NodeId,
        local_name: &str,
        attributes: Vec<Attribute>,
    ) -> NodeId {
        let local_name = local_name.to_ascii_lowercase();
        let element = self.create_element_internal(document, &local_name, false);
        self.append_attributes_unobserved(element, attributes);
        element
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-create-element
    fn create_element_internal(
        &mut self,
        document: NodeId,
        local_name: &str,
        synchronous_custom_elements: bool,
    ) -> NodeId {
        let mut data = Element::new(local_name);

        // 3. Let definition be the result of looking up a custom element definition given document, namespace, localName, and is.
        let definition = self.look_up_custom_element_definition(document, local_name);

        // 7. Otherwise, set result to a new element that implements the HTMLElement interface,
        //    with no attributes, custom element state set to "undefined" if namespace is the HTML namespace
        //    and either localName is a valid custom element name or is is non-null, and "uncustomized" otherwise.
        if definition.is_some() || is_valid_custom_element_name(local_name) {
            data.custom_element_state = CustomElementState::Undefined;
        }

        let element = self.alloc(Some(document), NodeData::Element(data));

        match definition {
            // 6.1. If synchronous custom elements flag is set, then run these steps while catching any exceptions:
            //      construct C and mark the result custom.
            Some(definition) if synchronous_custom_elements => self.upgrade(element, definition),
            // 6.2. Otherwise, enqueue a custom element upgrade reaction given result and definition.
            Some(definition) => self.enqueue_upgrade(element, definition),
            None => {}
        }

        element
    }

    fn enqueue_upgrade(&mut self, element: NodeId, definition: Rc<CustomElementDefinition>) {
        self.reactions
            .enqueue(element, CustomElementReaction::Upgrade(definition));
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).first().copied()
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-tree-next-sibling
    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let index = self.index(node);
        self.children(parent).get(index + 1).copied()
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-tree-previous-sibling
    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let index = self.index(node);
        index
            .checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-tree-index
    pub fn index(&self, node: NodeId) -> usize {
        self.parent(node)
            .and_then(|parent| self.children(parent).iter().position(|&c| c == node))
            .unwrap_or(0)
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-node-document
    pub fn node_document(&self, node: NodeId) -> NodeId {
        self.node(node).document.unwrap_or(node)
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-tree-root
    pub fn root(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-shadow-including-root
    pub fn shadow_including_root(&self, node: NodeId) -> NodeId {
        let root = self.root(node);
        match self.node(root).data {
            NodeData::ShadowRoot { host, .. } => self.shadow_including_root(host),
            _ => root,
        }
    }

    // SPECLINK: https://dom.spec.whatwg.org/#connected
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.node(self.shadow_including_root(node)).is_document()
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-tree-inclusive-ancestor
    pub fn inclusive_ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut nodes = vec![node];
        let mut current = self.parent(node);
        while let Some(ancestor) = current {
            nodes.push(ancestor);
            current = self.parent(ancestor);
        }
        nodes
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-tree-inclusive-descendant
    pub fn inclusive_descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            nodes.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        nodes
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-shadow-including-inclusive-descendant
    pub fn shadow_including_inclusive_descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            nodes.push(current);
            stack.extend(self.children(current).iter().rev());
            if let Some(shadow_root) = self.node(current).as_element().and_then(|e| e.shadow_root) {
                stack.push(shadow_root);
            }
        }
        nodes
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-tree-host-including-inclusive-ancestor
    pub fn is_host_including_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = match self.node(candidate).data {
                NodeData::ShadowRoot { host, .. } => Some(host),
                _ => self.parent(candidate),
            };
        }
        false
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.node(node).as_element()
    }

    pub fn local_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.local_name.as_str())
    }

    pub fn custom_element_state(&self, node: NodeId) -> Option<CustomElementState> {
        self.element(node).map(|e| e.custom_element_state)
    }

    pub fn custom_element_definition(
        &self,
        node: NodeId,
    ) -> Option<&Rc<CustomElementDefinition>> {
        self.element(node)?.custom_element_definition.as_ref()
    }

    pub fn is_custom(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(Element::is_custom)
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.node(node).text()
    }

    /// Returns the first inclusive descendant element with the given local name, in tree order.
    pub fn find_element(&self, root: NodeId, local_name: &str) -> Option<NodeId> {
        self.inclusive_descendants(root)
            .into_iter()
            .find(|&node| self.node(node).is_element_with_tag(local_name))
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-child-text-content
    pub fn child_text_content(&self, node: NodeId) -> String {
        self.children(node)
            .iter()
            .filter_map(|&child| match &self.node(child).data {
                NodeData::Text(data) => Some(data.as_str()),
                _ => None,
            })
            .collect()
    }
}
