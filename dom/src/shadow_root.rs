use crate::custom_element_registry::is_valid_custom_element_name;
use crate::node::NodeData;
use crate::{Dom, DomException, NodeId};

// SPECLINK: https://dom.spec.whatwg.org/#shadowroot-mode
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum ShadowRootMode {
    Open,
    Closed,
}

const VALID_SHADOW_HOST_NAMES: &[&str] = &[
    "article",
    "aside",
    "blockquote",
    "body",
    "div",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "main",
    "nav",
    "p",
    "section",
    "span",
];

// SPECLINK: https://dom.spec.whatwg.org/#valid-shadow-host-name
pub fn is_valid_shadow_host_name(name: &str) -> bool {
    is_valid_custom_element_name(name) || VALID_SHADOW_HOST_NAMES.contains(&name)
}

impl Dom {
    // SPECLINK: https://dom.spec.whatwg.org/#dom-element-attachshadow
    pub fn attach_shadow(
        &mut self,
        host: NodeId,
        mode: ShadowRootMode,
    ) -> Result<NodeId, DomException> {
        let Some(element) = self.element(host) else {
            return Err(DomException::NotSupportedError);
        };

        // 2. If element's local name is not a valid shadow host name, then throw a "NotSupportedError" DOMException.
        if !is_valid_shadow_host_name(&element.local_name) {
            return Err(DomException::NotSupportedError);
        }

        // 3. If element's local name is a valid custom element name, or element's is value is non-null, then:
        if is_valid_custom_element_name(&element.local_name) {
            // 3.2. If definition is not null and definition's disable shadow is true, then throw a "NotSupportedError" DOMException.
            if element
                .custom_element_definition
                .as_ref()
                .is_some_and(|definition| definition.disable_shadow)
            {
                return Err(DomException::NotSupportedError);
            }
        }

        // 4. If element is a shadow host, then throw a "NotSupportedError" DOMException.
        if element.shadow_root.is_some() {
            return Err(DomException::NotSupportedError);
        }

        // 5. Let shadow be a new shadow root whose node document is element's node document, host is element, and mode is mode.
        let document = self.node_document(host);
        let shadow = self.alloc(Some(document), NodeData::ShadowRoot { host, mode });

        // 12. Set element's shadow root to shadow.
        if let Some(element) = self.node_mut(host).as_element_mut() {
            element.shadow_root = Some(shadow);
        }

        Ok(shadow)
    }

    /// Returns the shadow root of `host` if it is open.
    // SPECLINK: https://dom.spec.whatwg.org/#dom-element-shadowroot
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        let shadow = self.element(host)?.shadow_root?;
        match self.shadow_root_mode(shadow) {
            Some(ShadowRootMode::Open) => Some(shadow),
            _ => None,
        }
    }

    /// Returns the shadow root of `host` regardless of its mode.
    pub fn shadow_root_unchecked(&self, host: NodeId) -> Option<NodeId> {
        self.element(host)?.shadow_root
    }

    // SPECLINK: https://dom.spec.whatwg.org/#dom-shadowroot-host
    pub fn host(&self, shadow: NodeId) -> Option<NodeId> {
        match self.node(shadow).data {
            NodeData::ShadowRoot { host, .. } => Some(host),
            _ => None,
        }
    }

    pub fn shadow_root_mode(&self, shadow: NodeId) -> Option<ShadowRootMode> {
        match self.node(shadow).data {
            NodeData::ShadowRoot { mode, .. } => Some(mode),
            _ => None,
        }
    }

    pub fn is_shadow_host(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| e.shadow_root.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_shadow_to_valid_hosts() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let div = dom.create_element(document, "div").unwrap();
        let shadow = dom.attach_shadow(div, ShadowRootMode::Open).unwrap();

        assert_eq!(dom.shadow_root(div), Some(shadow));
        assert_eq!(dom.host(shadow), Some(div));
        assert!(dom.is_shadow_host(div));
        assert_eq!(
            dom.attach_shadow(div, ShadowRootMode::Open),
            Err(DomException::NotSupportedError)
        );
    }

    #[test]
    fn attach_shadow_rejects_invalid_hosts() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let img = dom.create_element(document, "img").unwrap();
        assert_eq!(
            dom.attach_shadow(img, ShadowRootMode::Open),
            Err(DomException::NotSupportedError)
        );
    }

    #[test]
    fn closed_shadow_roots_are_hidden() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let host = dom.create_element(document, "x-host").unwrap();
        let shadow = dom.attach_shadow(host, ShadowRootMode::Closed).unwrap();
        assert_eq!(dom.shadow_root(host), None);
        assert_eq!(dom.shadow_root_unchecked(host), Some(shadow));
    }

    #[test]
    fn shadow_tree_is_connected_through_host() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let host = dom.create_element(document, "div").unwrap();
        let shadow = dom.attach_shadow(host, ShadowRootMode::Open).unwrap();
        let span = dom.create_element(document, "span").unwrap();
        dom.append_child(shadow, span).unwrap();
        assert!(!dom.is_connected(span));

        dom.append_child(document, host).unwrap();
        assert!(dom.is_connected(span));
        assert_eq!(dom.shadow_including_root(span), document);
        assert_eq!(
            dom.shadow_including_inclusive_descendants(document),
            vec![document, host, shadow, span]
        );
    }
}
