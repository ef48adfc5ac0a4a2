use std::rc::Rc;

use crate::custom_element_definition::CustomElementDefinition;
use crate::custom_element_reactions::CustomElementCallback;
use crate::{Attribute, Dom, DomException, NodeId};

// SPECLINK: https://dom.spec.whatwg.org/#concept-element-custom-element-state
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, Default)]
pub enum CustomElementState {
    #[default]
    Undefined,
    Failed,
    Uncustomized,
    Custom,
}

// SPECLINK: https://dom.spec.whatwg.org/#interface-element
#[derive(Debug, Clone)]
pub struct Element {
    pub local_name: String,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) shadow_root: Option<NodeId>,
    pub(crate) custom_element_state: CustomElementState,
    pub(crate) custom_element_definition: Option<Rc<CustomElementDefinition>>,
}

impl Element {
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            attributes: Vec::new(),
            shadow_root: None,
            custom_element_state: CustomElementState::Uncustomized,
            custom_element_definition: None,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    pub fn custom_element_state(&self) -> CustomElementState {
        self.custom_element_state
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-element-defined
    pub fn is_defined(&self) -> bool {
        matches!(
            self.custom_element_state,
            CustomElementState::Uncustomized | CustomElementState::Custom
        )
    }

    // SPECLINK: https://dom.spec.whatwg.org/#concept-element-custom
    pub fn is_custom(&self) -> bool {
        self.custom_element_state == CustomElementState::Custom
    }
}

fn is_name_char_forbidden(c: char) -> bool {
    c.is_ascii_whitespace() || matches!(c, '\0' | '/' | '>' | '=')
}

// SPECLINK: https://dom.spec.whatwg.org/#valid-element-local-name
pub fn is_valid_element_local_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| !is_name_char_forbidden(c) && c != '<')
        }
        _ => false,
    }
}

// SPECLINK: https://dom.spec.whatwg.org/#valid-attribute-local-name
pub fn is_valid_attribute_local_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(is_name_char_forbidden)
}

// SPECLINK: https://html.spec.whatwg.org/multipage/syntax.html#void-elements
pub fn is_void_element(local_name: &str) -> bool {
    matches!(
        local_name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

impl Dom {
    pub fn attributes(&self, element: NodeId) -> &[Attribute] {
        self.node(element)
            .as_element()
            .map(Element::attributes)
            .unwrap_or(&[])
    }

    // SPECLINK: https://dom.spec.whatwg.org/#dom-element-getattribute
    pub fn get_attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.node(element).as_element()?.attribute(&name)
    }

    // SPECLINK: https://dom.spec.whatwg.org/#dom-element-hasattribute
    pub fn has_attribute(&self, element: NodeId, name: &str) -> bool {
        self.get_attribute(element, name).is_some()
    }

    // SPECLINK: https://dom.spec.whatwg.org/#dom-element-setattribute
    pub fn set_attribute(
        &mut self,
        element: NodeId,
        name: &str,
        value: &str,
    ) -> Result<(), DomException> {
        // 1. If qualifiedName is not a valid attribute local name, then throw an "InvalidCharacterError" DOMException.
        if !is_valid_attribute_local_name(name) {
            return Err(DomException::InvalidCharacterError);
        }

        // 2. If this is in the HTML namespace and its node document is an HTML document, then set qualifiedName to qualifiedName in ASCII lowercase.
        let name = name.to_ascii_lowercase();

        let Some(data) = self.node_mut(element).as_element_mut() else {
            return Err(DomException::InvalidNodeTypeError);
        };

        // 3. Let attribute be the first attribute in this's attribute list whose qualified name is qualifiedName, and null otherwise.
        let old_value = match data.attributes.iter_mut().find(|a| a.name == name) {
            // 5. Change attribute to value.
            Some(attribute) => Some(std::mem::replace(&mut attribute.value, value.to_string())),
            // 4. If attribute is null, create an attribute and append it to this.
            None => {
                data.attributes.push(Attribute::new(name.clone(), value));
                None
            }
        };

        self.handle_attribute_changes(element, &name, old_value, Some(value.to_string()));
        self.process_reactions();
        Ok(())
    }

    // SPECLINK: https://dom.spec.whatwg.org/#dom-element-removeattribute
    pub fn remove_attribute(&mut self, element: NodeId, name: &str) -> Result<(), DomException> {
        let name = name.to_ascii_lowercase();
        let Some(data) = self.node_mut(element).as_element_mut() else {
            return Err(DomException::InvalidNodeTypeError);
        };

        let Some(index) = data.attributes.iter().position(|a| a.name == name) else {
            return Ok(());
        };
        let removed = data.attributes.remove(index);

        self.handle_attribute_changes(element, &name, Some(removed.value), None);
        self.process_reactions();
        Ok(())
    }

    // SPECLINK: https://dom.spec.whatwg.org/#dom-element-toggleattribute
    pub fn toggle_attribute(
        &mut self,
        element: NodeId,
        name: &str,
        force: Option<bool>,
    ) -> Result<bool, DomException> {
        if !is_valid_attribute_local_name(name) {
            return Err(DomException::InvalidCharacterError);
        }

        let present = self.has_attribute(element, name);
        match (present, force) {
            (false, None | Some(true)) => {
                self.set_attribute(element, name, "")?;
                Ok(true)
            }
            (true, None | Some(false)) => {
                self.remove_attribute(element, name)?;
                Ok(false)
            }
            (present, _) => Ok(present),
        }
    }

    /// Appends attributes without running any attribute change steps.
    ///
    /// Used while creating elements, before anything could observe them.
    pub(crate) fn append_attributes_unobserved(
        &mut self,
        element: NodeId,
        attributes: Vec<Attribute>,
    ) {
        if let Some(data) = self.node_mut(element).as_element_mut() {
            for attribute in attributes {
                let name = attribute.name.to_ascii_lowercase();
                if data.attributes.iter().any(|a| a.name == name) {
                    continue;
                }
                data.attributes.push(Attribute::new(name, attribute.value));
            }
        }
    }

    // SPECLINK: https://dom.spec.whatwg.org/#handle-attribute-changes
    fn handle_attribute_changes(
        &mut self,
        element: NodeId,
        name: &str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) {
        // FIXME: Queue a mutation record once mutation observers exist.
        self.enqueue_custom_element_callback_reaction(
            element,
            CustomElementCallback::AttributeChanged {
                name: name.to_string(),
                old_value,
                new_value,
            },
        );
    }
}
