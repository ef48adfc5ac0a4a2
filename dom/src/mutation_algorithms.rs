use crate::custom_element_reactions::CustomElementCallback;
use crate::node::NodeData;
use crate::{Dom, DomException, NodeId};

impl Dom {
    // SPECLINK: https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity
    pub fn ensure_pre_insertion_validity(
        &self,
        node: NodeId,
        parent: NodeId,
        child: Option<NodeId>,
    ) -> Result<(), DomException> {
        let parent_node = self.node(parent);
        let node_data = self.node(node);

        // 1. If parent is not a Document, DocumentFragment, or Element node, then throw a "HierarchyRequestError" DOMException.
        if !parent_node.is_document()
            && !parent_node.is_document_fragment()
            && !parent_node.is_element()
        {
            return Err(DomException::HierarchyRequestError);
        }

        // 2. If node is a host-including inclusive ancestor of parent, then throw a "HierarchyRequestError" DOMException.
        if self.is_host_including_inclusive_ancestor(node, parent) {
            return Err(DomException::HierarchyRequestError);
        }

        // 3. If child is non-null and its parent is not parent, then throw a "NotFoundError" DOMException.
        if let Some(child) = child {
            if self.parent(child) != Some(parent) {
                return Err(DomException::NotFoundError);
            }
        }

        // 4. If node is not a DocumentFragment, DocumentType, Element, or CharacterData node, then throw a "HierarchyRequestError" DOMException.
        if !node_data.is_document_fragment()
            && !node_data.is_element()
            && !node_data.is_character_data()
        {
            return Err(DomException::HierarchyRequestError);
        }

        // 5. If either node is a Text node and parent is a document, or node is a doctype and parent is not a document,
        //    then throw a "HierarchyRequestError" DOMException.
        if node_data.is_text() && parent_node.is_document() {
            return Err(DomException::HierarchyRequestError);
        }

        // 6. If parent is a document, and any of the statements below, switched on the interface node implements, are true,
        //    then throw a "HierarchyRequestError" DOMException.
        if parent_node.is_document() {
            let parent_has_element_child = self
                .children(parent)
                .iter()
                .any(|&c| self.node(c).is_element());

            let invalid = match node_data.data {
                // If node has more than one element child or has a Text node child.
                // Otherwise, if node has one element child and parent has an element child.
                NodeData::DocumentFragment | NodeData::ShadowRoot { .. } => {
                    let children = self.children(node);
                    let element_children = children
                        .iter()
                        .filter(|&&c| self.node(c).is_element())
                        .count();
                    let has_text_child = children.iter().any(|&c| self.node(c).is_text());
                    element_children > 1
                        || has_text_child
                        || (element_children == 1 && parent_has_element_child)
                }
                // parent has an element child.
                NodeData::Element(_) => parent_has_element_child,
                _ => false,
            };
            if invalid {
                return Err(DomException::HierarchyRequestError);
            }
        }

        Ok(())
    }

    // SPECLINK: https://dom.spec.whatwg.org/#dom-node-insertbefore
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        node: NodeId,
        child: Option<NodeId>,
    ) -> Result<NodeId, DomException> {
        let node = self.pre_insert(node, parent, child)?;
        self.process_reactions();
        Ok(node)
    }

    // SPECLINK: https://dom.spec.whatwg.org/#dom-node-appendchild
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) -> Result<NodeId, DomException> {
        self.insert_before(parent, node, None)
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-node-pre-insert
    fn pre_insert(
        &mut self,
        node: NodeId,
        parent: NodeId,
        child: Option<NodeId>,
    ) -> Result<NodeId, DomException> {
        // 1. Ensure pre-insertion validity of node into parent before child.
        self.ensure_pre_insertion_validity(node, parent, child)?;

        // 2. Let referenceChild be child.
        // 3. If referenceChild is node, then set referenceChild to node's next sibling.
        let reference_child = match child {
            Some(child) if child == node => self.next_sibling(node),
            child => child,
        };

        // 4. Insert node into parent before referenceChild.
        self.insert(node, parent, reference_child);

        // 5. Return node.
        Ok(node)
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-node-insert
    fn insert(&mut self, node: NodeId, parent: NodeId, child: Option<NodeId>) {
        // 1. Let nodes be node's children, if node is a DocumentFragment node; otherwise « node ».
        let is_fragment = self.node(node).is_document_fragment();
        let nodes = match is_fragment {
            true => self.children(node).to_vec(),
            false => vec![node],
        };

        // 3. If count is 0, then return.
        if nodes.is_empty() {
            return;
        }

        // 4. If node is a DocumentFragment node, then remove its children with the suppress observers flag set.
        if is_fragment {
            for &fragment_child in &nodes {
                self.remove(fragment_child);
            }
        }

        let document = self.node_document(parent);

        // 7. For each node in nodes, in tree order:
        for &node in &nodes {
            // 7.1. Adopt node into parent's node document.
            self.adopt(document, node);

            // 7.2. If child is null, then append node to parent's children.
            // 7.3. Otherwise, insert node into parent's children before child's index.
            let index = match child {
                Some(child) => self.index(child),
                None => self.children(parent).len(),
            };
            self.node_mut(parent).children.insert(index, node);
            self.node_mut(node).parent = Some(parent);
            tracing::trace!(%node, %parent, index, "inserted node");

            // 7.7. For each shadow-including inclusive descendant inclusiveDescendant of node, in shadow-including tree order:
            for descendant in self.shadow_including_inclusive_descendants(node) {
                // 7.7.2. If inclusiveDescendant is not connected, then continue.
                if !self.is_connected(descendant) || !self.node(descendant).is_element() {
                    continue;
                }

                // 7.7.3.1. If inclusiveDescendant is custom, then enqueue a custom element callback reaction with
                //          inclusiveDescendant, callback name "connectedCallback", and « ».
                if self.is_custom(descendant) {
                    self.enqueue_custom_element_callback_reaction(
                        descendant,
                        CustomElementCallback::Connected,
                    );
                } else {
                    // 7.7.3.2. Otherwise, try to upgrade inclusiveDescendant.
                    self.try_upgrade(descendant);
                }
            }
        }

        // FIXME: 8. Queue a tree mutation record once mutation observers exist.
    }

    // SPECLINK: https://dom.spec.whatwg.org/#dom-node-removechild
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, DomException> {
        // SPECLINK: https://dom.spec.whatwg.org/#concept-node-pre-remove
        // 1. If child's parent is not parent, then throw a "NotFoundError" DOMException.
        if self.parent(child) != Some(parent) {
            return Err(DomException::NotFoundError);
        }

        // 4. Remove child.
        self.remove(child);
        self.process_reactions();

        // 5. Return child.
        Ok(child)
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-node-remove
    pub(crate) fn remove(&mut self, node: NodeId) {
        // 1. Let parent be node's parent.
        // 2. Assert: parent is non-null.
        let Some(parent) = self.parent(node) else {
            return;
        };

        let was_connected = self.is_connected(node);

        // 11. Remove node from its parent's children.
        self.node_mut(parent).children.retain(|&c| c != node);
        self.node_mut(node).parent = None;

        if !was_connected {
            return;
        }

        // 15. If node is custom and isParentConnected is true, then enqueue a custom element callback reaction with node,
        //     callback name "disconnectedCallback", and « ».
        // 16. For each shadow-including descendant descendant of node, in shadow-including tree order:
        //     if descendant is custom and isParentConnected is true, then enqueue a custom element callback reaction
        //     with descendant, callback name "disconnectedCallback", and « ».
        for descendant in self.shadow_including_inclusive_descendants(node) {
            self.enqueue_custom_element_callback_reaction(
                descendant,
                CustomElementCallback::Disconnected,
            );
        }
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-node-replace-all
    pub fn replace_all(&mut self, parent: NodeId, node: Option<NodeId>) -> Result<(), DomException> {
        if let Some(node) = node {
            self.ensure_pre_insertion_validity(node, parent, None)?;
        }

        // 2. Let removedNodes be parent's children.
        let removed_nodes = self.children(parent).to_vec();

        // 5. Remove all parent's children, in tree order, with the suppress observers flag set.
        for child in removed_nodes {
            self.remove(child);
        }

        // 6. If node is non-null, then insert node into parent before null with the suppress observers flag set.
        if let Some(node) = node {
            self.insert(node, parent, None);
        }

        self.process_reactions();
        Ok(())
    }

    // SPECLINK: https://dom.spec.whatwg.org/#dom-document-adoptnode
    pub fn adopt_node(&mut self, document: NodeId, node: NodeId) -> Result<NodeId, DomException> {
        // 1. If node is a document, then throw a "NotSupportedError" DOMException.
        if self.node(node).is_document() {
            return Err(DomException::NotSupportedError);
        }

        // 2. If node is a shadow root, then throw a "HierarchyRequestError" DOMException.
        if self.node(node).is_shadow_root() {
            return Err(DomException::HierarchyRequestError);
        }

        // 4. Adopt node into this.
        self.adopt(document, node);
        self.process_reactions();

        // 5. Return node.
        Ok(node)
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-node-adopt
    pub(crate) fn adopt(&mut self, document: NodeId, node: NodeId) {
        // 1. Let oldDocument be node's node document.
        let old_document = self.node_document(node);

        // 2. If node's parent is non-null, then remove node.
        if self.parent(node).is_some() {
            self.remove(node);
        }

        // 3. If document is not oldDocument, then:
        if document == old_document {
            return;
        }

        let descendants = self.shadow_including_inclusive_descendants(node);

        // 3.1. For each inclusiveDescendant in node's shadow-including inclusive descendants:
        //      set inclusiveDescendant's node document to document.
        for &descendant in &descendants {
            self.node_mut(descendant).document = Some(document);
        }

        // 3.2. For each inclusiveDescendant in node's shadow-including inclusive descendants that is custom,
        //      enqueue a custom element callback reaction with inclusiveDescendant, callback name "adoptedCallback",
        //      and an argument list containing oldDocument and document.
        for descendant in descendants {
            self.enqueue_custom_element_callback_reaction(
                descendant,
                CustomElementCallback::Adopted {
                    old_document,
                    new_document: document,
                },
            );
        }
    }

    /// Clones `node` out of another arena into `document`.
    // SPECLINK: https://dom.spec.whatwg.org/#dom-document-importnode
    pub fn import_node(
        &mut self,
        document: NodeId,
        source: &Dom,
        node: NodeId,
        deep: bool,
    ) -> Result<NodeId, DomException> {
        // 1. If node is a document or shadow root, then throw a "NotSupportedError" DOMException.
        if source.node(node).is_document() || source.node(node).is_shadow_root() {
            return Err(DomException::NotSupportedError);
        }

        // 2. Return a clone of node, with this and the clone children flag set if deep is true.
        let copy = self.clone_from(document, source, node, deep);
        self.process_reactions();
        Ok(copy)
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-node-clone
    fn clone_from(&mut self, document: NodeId, source: &Dom, node: NodeId, deep: bool) -> NodeId {
        let copy = match &source.node(node).data {
            // 2. If node is an element, then:
            //   1. Let copy be the result of creating an element, given document, node's local name, node's namespace,
            //      node's namespace prefix, and node's is value, with the synchronous custom elements flag unset.
            //   2. For each attribute in node's attribute list: append a clone of it to copy.
            NodeData::Element(element) => self.create_element_for_parser(
                document,
                &element.local_name,
                element.attributes.clone(),
            ),
            NodeData::Text(data) => self.create_text_node(document, data),
            NodeData::Comment(data) => self.create_comment(document, data),
            NodeData::DocumentFragment | NodeData::ShadowRoot { .. } => {
                self.create_document_fragment(document)
            }
            NodeData::Document { browsing_context } => self.alloc(
                None,
                NodeData::Document {
                    browsing_context: *browsing_context,
                },
            ),
        };

        // 6. If the clone children flag is set, then for each child child of node, in tree order:
        //    append the result of cloning child with document and the clone children flag set, to copy.
        if deep {
            for &child in source.children(node) {
                let child_copy = self.clone_from(document, source, child, true);
                self.node_mut(copy).children.push(child_copy);
                self.node_mut(child_copy).parent = Some(copy);
            }
        }

        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_insert_before() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let div = dom.create_element(document, "div").unwrap();
        let a = dom.create_element(document, "a").unwrap();
        let b = dom.create_element(document, "b").unwrap();

        dom.append_child(document, div).unwrap();
        dom.append_child(div, b).unwrap();
        dom.insert_before(div, a, Some(b)).unwrap();

        assert_eq!(dom.children(div), &[a, b]);
        assert_eq!(dom.parent(a), Some(div));
    }

    #[test]
    fn hierarchy_errors() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let outer = dom.create_element(document, "div").unwrap();
        let inner = dom.create_element(document, "div").unwrap();
        dom.append_child(outer, inner).unwrap();

        assert_eq!(
            dom.append_child(inner, outer),
            Err(DomException::HierarchyRequestError)
        );

        let text = dom.create_text_node(document, "text");
        assert_eq!(
            dom.append_child(document, text),
            Err(DomException::HierarchyRequestError)
        );
        assert_eq!(
            dom.append_child(text, inner),
            Err(DomException::HierarchyRequestError)
        );

        dom.append_child(document, outer).unwrap();
        let second = dom.create_element(document, "div").unwrap();
        assert_eq!(
            dom.append_child(document, second),
            Err(DomException::HierarchyRequestError)
        );

        let stranger = dom.create_element(document, "span").unwrap();
        assert_eq!(
            dom.insert_before(outer, second, Some(stranger)),
            Err(DomException::NotFoundError)
        );
    }

    #[test]
    fn fragments_insert_their_children() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let fragment = dom.create_document_fragment(document);
        let a = dom.create_element(document, "a").unwrap();
        let b = dom.create_text_node(document, "b");
        dom.append_child(fragment, a).unwrap();
        dom.append_child(fragment, b).unwrap();

        let div = dom.create_element(document, "div").unwrap();
        dom.append_child(div, fragment).unwrap();

        assert_eq!(dom.children(div), &[a, b]);
        assert!(dom.children(fragment).is_empty());
    }

    #[test]
    fn remove_child_requires_parent() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let div = dom.create_element(document, "div").unwrap();
        let span = dom.create_element(document, "span").unwrap();
        assert_eq!(dom.remove_child(div, span), Err(DomException::NotFoundError));

        dom.append_child(div, span).unwrap();
        assert_eq!(dom.remove_child(div, span), Ok(span));
        assert_eq!(dom.parent(span), None);
    }

    #[test]
    fn replace_all_children() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let div = dom.create_element(document, "div").unwrap();
        let old = dom.create_text_node(document, "old");
        let new = dom.create_text_node(document, "new");
        dom.append_child(div, old).unwrap();

        dom.replace_all(div, Some(new)).unwrap();
        assert_eq!(dom.children(div), &[new]);
        dom.replace_all(div, None).unwrap();
        assert!(dom.children(div).is_empty());
    }

    #[test]
    fn adopt_node_moves_between_documents() {
        let mut dom = Dom::new();
        let first = dom.create_document();
        let second = dom.create_document();
        let div = dom.create_element(first, "div").unwrap();
        let span = dom.create_element(first, "span").unwrap();
        dom.append_child(div, span).unwrap();

        dom.adopt_node(second, div).unwrap();
        assert_eq!(dom.node_document(div), second);
        assert_eq!(dom.node_document(span), second);

        assert_eq!(dom.adopt_node(second, first), Err(DomException::NotSupportedError));
    }

    #[test]
    fn import_node_clones_across_arenas() {
        let mut source = Dom::new();
        let source_document = source.create_inert_document();
        let div = source.create_element(source_document, "div").unwrap();
        source.set_attribute(div, "class", "box").unwrap();
        let text = source.create_text_node(source_document, "hello");
        source.append_child(div, text).unwrap();

        let mut dom = Dom::new();
        let document = dom.create_document();
        let shallow = dom.import_node(document, &source, div, false).unwrap();
        assert!(dom.children(shallow).is_empty());

        let copy = dom.import_node(document, &source, div, true).unwrap();
        assert_eq!(dom.get_attribute(copy, "class"), Some("box"));
        assert_eq!(dom.child_text_content(copy), "hello");
        assert_eq!(dom.node_document(copy), document);

        assert_eq!(
            dom.import_node(document, &source, source_document, true),
            Err(DomException::NotSupportedError)
        );
    }
}
