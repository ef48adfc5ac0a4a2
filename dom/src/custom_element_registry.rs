use std::any::TypeId;
use std::rc::Rc;

use crate::custom_element_definition::CustomElementDefinition;
use crate::custom_element_reactions::CustomElementReaction;
use crate::element::CustomElementState;
use crate::node::NodeData;
use crate::{Dom, DomException, NodeId};

// SPECLINK: https://html.spec.whatwg.org/multipage/custom-elements.html#customelementregistry
#[derive(Debug, Default)]
pub struct CustomElementRegistry {
    definitions: Vec<Rc<CustomElementDefinition>>,
}

impl CustomElementRegistry {
    // SPECLINK: https://html.spec.whatwg.org/multipage/custom-elements.html#dom-customelementregistry-get
    pub fn get(&self, name: &str) -> Option<&Rc<CustomElementDefinition>> {
        self.definitions.iter().find(|d| d.name == name)
    }

    pub fn get_by_constructor(
        &self,
        constructor_id: TypeId,
    ) -> Option<&Rc<CustomElementDefinition>> {
        self.definitions
            .iter()
            .find(|d| d.constructor_id == constructor_id)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

const RESERVED_CUSTOM_ELEMENT_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

// SPECLINK: https://html.spec.whatwg.org/multipage/custom-elements.html#valid-custom-element-name
pub fn is_valid_custom_element_name(name: &str) -> bool {
    // name must match the PotentialCustomElementName production:
    //   [a-z] (PCENChar)* '-' (PCENChar)*
    let mut chars = name.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_lowercase()) {
        return false;
    }

    let is_pcen_char = |c: char| {
        matches!(c, '-' | '.' | '_' | '0'..='9' | 'a'..='z' | '\u{B7}')
            || matches!(c, '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{37D}')
            || matches!(c, '\u{37F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}' | '\u{203F}'..='\u{2040}')
            || matches!(c, '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}')
            || matches!(c, '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}')
    };

    name.contains('-')
        && chars.all(is_pcen_char)
        && !RESERVED_CUSTOM_ELEMENT_NAMES.contains(&name)
}

impl Dom {
    pub fn custom_element_registry(&self) -> &CustomElementRegistry {
        &self.custom_elements
    }

    // SPECLINK: https://html.spec.whatwg.org/multipage/custom-elements.html#dom-customelementregistry-define
    pub fn define(
        &mut self,
        definition: CustomElementDefinition,
    ) -> Result<Rc<CustomElementDefinition>, DomException> {
        // 2. If name is not a valid custom element name, then throw a "SyntaxError" DOMException.
        if !is_valid_custom_element_name(&definition.name) {
            return Err(DomException::SyntaxError);
        }

        // 3. If this's custom element definition set contains an item with name name, then throw a "NotSupportedError" DOMException.
        if self.custom_elements.get(&definition.name).is_some() {
            return Err(DomException::NotSupportedError);
        }

        // 4. If this's custom element definition set contains an item with constructor constructor, then throw a "NotSupportedError" DOMException.
        if self
            .custom_elements
            .get_by_constructor(definition.constructor_id)
            .is_some()
        {
            return Err(DomException::NotSupportedError);
        }

        // 16. Append definition to this's custom element definition set.
        let definition = Rc::new(definition);
        self.custom_elements.definitions.push(definition.clone());
        tracing::debug!(name = %definition.name, "defined custom element");

        // 17. Let document be this's relevant global object's associated Document.
        // 18. Let upgradeCandidates be all elements that are shadow-including descendants of document,
        //     whose namespace is the HTML namespace and whose local name is localName, in shadow-including tree order.
        let upgrade_candidates: Vec<NodeId> = self
            .browsing_context_documents()
            .into_iter()
            .flat_map(|document| self.shadow_including_inclusive_descendants(document))
            .filter(|&node| self.is_upgrade_candidate(node, &definition.local_name))
            .collect();

        // 19. For each element element of upgradeCandidates, enqueue a custom element upgrade reaction given element and definition.
        for element in upgrade_candidates {
            self.reactions
                .enqueue(element, CustomElementReaction::Upgrade(definition.clone()));
        }

        self.process_reactions();
        Ok(definition)
    }

    // SPECLINK: https://html.spec.whatwg.org/multipage/custom-elements.html#look-up-a-custom-element-definition
    pub fn look_up_custom_element_definition(
        &self,
        document: NodeId,
        local_name: &str,
    ) -> Option<Rc<CustomElementDefinition>> {
        // 2. If document's browsing context is null, return null.
        match self.node(document).data {
            NodeData::Document {
                browsing_context: true,
            } => {}
            _ => return None,
        }

        // 4. If registry's custom element definition set contains an item with name and local name both equal to localName, return that item.
        self.custom_elements
            .definitions
            .iter()
            .find(|d| d.name == local_name && d.local_name == local_name)
            .cloned()
    }

    fn is_upgrade_candidate(&self, node: NodeId, local_name: &str) -> bool {
        self.element(node).is_some_and(|e| {
            e.local_name == local_name && e.custom_element_state == CustomElementState::Undefined
        })
    }

    fn browsing_context_documents(&self) -> Vec<NodeId> {
        self.all_nodes()
            .filter(|&id| {
                matches!(
                    self.node(id).data,
                    NodeData::Document {
                        browsing_context: true
                    }
                )
            })
            .collect()
    }
}
