use dom::{Dom, NodeId};

// https://html.spec.whatwg.org/multipage/parsing.html#stack-of-open-elements
#[derive(Debug, Default)]
pub struct StackOfOpenElements {
    elements: Vec<NodeId>,
}

impl StackOfOpenElements {
    pub fn new() -> Self {
        Self::default()
    }

    // https://html.spec.whatwg.org/#current-node
    pub fn current_node(&self) -> Option<NodeId> {
        self.elements.last().copied()
    }

    pub fn push(&mut self, element: NodeId) {
        self.elements.push(element);
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        self.elements.pop()
    }

    pub fn pop_elements_until_element_has_been_popped(&mut self, node: NodeId) {
        while let Some(current) = self.pop() {
            if current == node {
                break;
            }
        }
    }

    /// Returns the element nearest to the current node with the given local name.
    pub fn find_element_with_tag_name(&self, dom: &Dom, tag_name: &str) -> Option<NodeId> {
        self.elements
            .iter()
            .rev()
            .copied()
            .find(|&element| dom.node(element).is_element_with_tag(tag_name))
    }

    pub fn contains_one_of_tags(&self, dom: &Dom, tags: &[&str]) -> bool {
        self.elements
            .iter()
            .any(|&node| dom.node(node).is_element_with_one_of_tags(tags))
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_until_element() {
        let mut dom = Dom::new();
        let document = dom.create_inert_document();
        let div = dom.create_element(document, "div").unwrap();
        let p = dom.create_element(document, "p").unwrap();
        let span = dom.create_element(document, "span").unwrap();

        let mut stack = StackOfOpenElements::new();
        stack.push(div);
        stack.push(p);
        stack.push(span);

        assert_eq!(stack.find_element_with_tag_name(&dom, "p"), Some(p));
        assert!(stack.contains_one_of_tags(&dom, &["section", "span"]));

        stack.pop_elements_until_element_has_been_popped(p);
        assert_eq!(stack.current_node(), Some(div));
        assert_eq!(stack.len(), 1);
    }
}
