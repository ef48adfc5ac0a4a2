use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

use crate::{Dom, DomException, NodeId};

/// Lifecycle callbacks of a constructed custom element.
///
/// The element's node is passed back in on every call; instances never hold on to the [`Dom`].
pub trait CustomElementCallbacks {
    fn connected_callback(&mut self, _dom: &mut Dom, _element: NodeId) {}

    fn disconnected_callback(&mut self, _dom: &mut Dom, _element: NodeId) {}

    fn adopted_callback(
        &mut self,
        _dom: &mut Dom,
        _element: NodeId,
        _old_document: NodeId,
        _new_document: NodeId,
    ) {
    }

    fn attribute_changed_callback(
        &mut self,
        _dom: &mut Dom,
        _element: NodeId,
        _name: &str,
        _old_value: Option<&str>,
        _new_value: Option<&str>,
    ) {
    }
}

pub type CustomElementConstructor =
    Rc<dyn Fn(&mut Dom, NodeId) -> Result<Box<dyn CustomElementCallbacks>, DomException>>;

// SPECLINK: https://html.spec.whatwg.org/multipage/custom-elements.html#custom-element-definition
#[derive(Clone)]
pub struct CustomElementDefinition {
    pub name: String,
    pub local_name: String,
    pub constructor_id: TypeId,
    pub constructor: CustomElementConstructor,
    pub observed_attributes: Vec<String>,
    pub disable_shadow: bool,
    data: Option<Rc<dyn Any>>,
    // FIXME: Implement A form-associated boolean
    // FIXME: Implement A disable internals boolean
}

impl CustomElementDefinition {
    pub fn new<F>(name: impl Into<String>, constructor_id: TypeId, constructor: F) -> Self
    where
        F: Fn(&mut Dom, NodeId) -> Result<Box<dyn CustomElementCallbacks>, DomException> + 'static,
    {
        let name = name.into();
        Self {
            local_name: name.clone(),
            name,
            constructor_id,
            constructor: Rc::new(constructor),
            observed_attributes: Vec::new(),
            disable_shadow: false,
            data: None,
        }
    }

    pub fn with_observed_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.observed_attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_disable_shadow(mut self, disable_shadow: bool) -> Self {
        self.disable_shadow = disable_shadow;
        self
    }

    /// Attaches arbitrary embedder data, retrievable through [`Self::data`].
    pub fn with_data<T: Any>(mut self, data: Rc<T>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn observes(&self, attribute: &str) -> bool {
        self.observed_attributes.iter().any(|a| a == attribute)
    }

    pub fn data<T: Any>(&self) -> Option<Rc<T>> {
        self.data.clone()?.downcast::<T>().ok()
    }
}

impl fmt::Debug for CustomElementDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomElementDefinition")
            .field("name", &self.name)
            .field("local_name", &self.local_name)
            .field("constructor_id", &self.constructor_id)
            .field("observed_attributes", &self.observed_attributes)
            .field("disable_shadow", &self.disable_shadow)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;
    impl CustomElementCallbacks for Plain {}

    fn definition() -> CustomElementDefinition {
        CustomElementDefinition::new(
            "x-plain",
            TypeId::of::<Plain>(),
            |_, _| Ok(Box::new(Plain)),
        )
    }

    #[test]
    fn observes_only_listed_attributes() {
        let definition = definition().with_observed_attributes(["direction", "open"]);
        assert!(definition.observes("direction"));
        assert!(!definition.observes("title"));
        assert_eq!(definition.local_name, "x-plain");
    }

    #[test]
    fn data_downcasts_to_attached_type() {
        assert!(definition().data::<u32>().is_none());

        let definition = definition().with_data(Rc::new(42_u32));
        assert_eq!(definition.data::<u32>().as_deref(), Some(&42));
        assert!(definition.data::<String>().is_none());
    }
}
