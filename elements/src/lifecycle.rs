use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use dom::{CustomElementCallbacks, Dom, DomException, NodeId, ShadowRootMode};

use crate::accessor;
use crate::error::Error;
use crate::metadata::ElementMetadata;
use crate::template::Template;
use crate::value::Value;

/// A Rust type that can be registered as a custom element.
///
/// One value is created with [`Default`] per element instance. All hooks are
/// optional; an error returned from a hook is logged and does not stop
/// delivery of later notifications.
pub trait CustomElement: Default + 'static {
    /// The declared default of a bound property, restored the first time the
    /// element is connected unless the property was written before that.
    fn initial_value(&self, _property: &str) -> Value {
        Value::Null
    }

    fn on_adopted(&mut self, _host: &mut HostElement<'_>) -> Result<(), Error> {
        Ok(())
    }

    fn on_connected(&mut self, _host: &mut HostElement<'_>) -> Result<(), Error> {
        Ok(())
    }

    fn on_disconnected(&mut self, _host: &mut HostElement<'_>) -> Result<(), Error> {
        Ok(())
    }

    fn on_attribute_changed(
        &mut self,
        _host: &mut HostElement<'_>,
        _name: &str,
        _old_value: Option<&str>,
        _new_value: Option<&str>,
    ) -> Result<(), Error> {
        Ok(())
    }
}

/// Bound properties written through a property setter, per element.
///
/// Cloning shares the underlying set.
#[derive(Debug, Clone, Default)]
pub struct PropertyWrites(Rc<RefCell<HashMap<NodeId, HashSet<String>>>>);

impl PropertyWrites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self, node: NodeId, property: &str) {
        self.0
            .borrow_mut()
            .entry(node)
            .or_default()
            .insert(property.to_string());
    }

    pub fn is_written(&self, node: NodeId, property: &str) -> bool {
        self.0
            .borrow()
            .get(&node)
            .is_some_and(|written| written.contains(property))
    }

    pub fn forget(&self, node: NodeId) {
        self.0.borrow_mut().remove(&node);
    }
}

/// The element a hook is running for.
pub struct HostElement<'a> {
    dom: &'a mut Dom,
    node: NodeId,
    metadata: &'a Rc<ElementMetadata>,
    writes: &'a PropertyWrites,
}

impl<'a> HostElement<'a> {
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn dom(&self) -> &Dom {
        &*self.dom
    }

    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut *self.dom
    }

    pub fn metadata(&self) -> &Rc<ElementMetadata> {
        self.metadata
    }

    pub fn property(&self, property: &str) -> Result<Value, Error> {
        let binding = self.metadata.attribute_map.get(property).ok_or_else(|| {
            Error::UnboundProperty {
                property: property.to_string(),
            }
        })?;
        Ok(accessor::get(&*self.dom, self.node, binding))
    }

    pub fn set_property(&mut self, property: &str, value: impl Into<Value>) -> Result<(), Error> {
        let binding = self.metadata.attribute_map.get(property).ok_or_else(|| {
            Error::UnboundProperty {
                property: property.to_string(),
            }
        })?;
        accessor::set(self.dom, self.node, binding, value.into())?;
        self.writes.mark(self.node, property);
        Ok(())
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.dom.get_attribute(self.node, name)
    }

    pub fn shadow_root(&self) -> Option<NodeId> {
        self.dom.shadow_root(self.node)
    }

    pub fn template(&self) -> Option<&Template> {
        self.metadata.template.as_ref()
    }

    pub fn inner_html(&self) -> String {
        self.dom.inner_html(self.node)
    }

    /// Replaces the contents of the shadow root (or of the element itself, when
    /// it has none) with a copy of the element's template.
    ///
    /// Returns `Ok(false)` when there is no template, it has not loaded yet, or
    /// the shadow root already has content. Nodes are never freed from the
    /// arena, so a shadow root is stamped once.
    pub fn stamp_template(&mut self) -> Result<bool, Error> {
        let Some(template) = self.metadata.template.as_ref() else {
            return Ok(false);
        };
        let template = match template.get() {
            Some(result) => result?,
            None => return Ok(false),
        };

        let target = self
            .dom
            .shadow_root_unchecked(self.node)
            .unwrap_or(self.node);
        if target != self.node && !self.dom.children(target).is_empty() {
            return Ok(false);
        }
        let document = self.dom.node_document(self.node);
        let fragment = template.instantiate(self.dom, document)?;
        self.dom.replace_all(target, Some(fragment))?;
        Ok(true)
    }
}

/// Glue between a [`CustomElement`] and the DOM's reaction callbacks.
pub struct Lifecycle<T> {
    element: T,
    metadata: Rc<ElementMetadata>,
    defaults: Vec<(String, Value)>,
    writes: PropertyWrites,
    restored: bool,
}

impl<T: CustomElement> Lifecycle<T> {
    pub fn construct(
        dom: &mut Dom,
        node: NodeId,
        metadata: Rc<ElementMetadata>,
        writes: PropertyWrites,
    ) -> Result<Self, DomException> {
        if metadata.shadow_dom() {
            dom.attach_shadow(node, ShadowRootMode::Open)?;
        }

        let element = T::default();
        let defaults = metadata
            .attribute_map
            .iter()
            .map(|(property, _)| (property.to_string(), element.initial_value(property)))
            .collect();

        Ok(Self {
            element,
            metadata,
            defaults,
            writes,
            restored: false,
        })
    }

    pub fn element(&self) -> &T {
        &self.element
    }

    pub fn metadata(&self) -> &Rc<ElementMetadata> {
        &self.metadata
    }

    /// Defaults captured at construction, in binding order.
    pub fn defaults(&self) -> &[(String, Value)] {
        &self.defaults
    }

    /// Writes back every captured default whose property was neither set
    /// through a setter nor given an attribute. Runs on the first connection only.
    fn restore_defaults(&mut self, dom: &mut Dom, node: NodeId) {
        if std::mem::replace(&mut self.restored, true) {
            return;
        }
        for (property, default) in &self.defaults {
            let Some(binding) = self.metadata.attribute_map.get(property) else {
                continue;
            };
            if self.writes.is_written(node, property)
                || dom.has_attribute(node, &binding.attribute)
            {
                continue;
            }
            if let Err(error) = accessor::set(dom, node, binding, default.clone()) {
                tracing::error!(element = %node, property = property.as_str(), %error, "failed to restore default");
            }
        }
        self.writes.forget(node);
    }
}

fn report(node: NodeId, hook: &str, result: Result<(), Error>) {
    if let Err(error) = result {
        tracing::error!(element = %node, hook, %error, "custom element hook failed");
    }
}

impl<T: CustomElement> CustomElementCallbacks for Lifecycle<T> {
    fn connected_callback(&mut self, dom: &mut Dom, element: NodeId) {
        self.restore_defaults(dom, element);

        let mut host = HostElement {
            dom,
            node: element,
            metadata: &self.metadata,
            writes: &self.writes,
        };
        report(element, "on_connected", self.element.on_connected(&mut host));
    }

    fn disconnected_callback(&mut self, dom: &mut Dom, element: NodeId) {
        let mut host = HostElement {
            dom,
            node: element,
            metadata: &self.metadata,
            writes: &self.writes,
        };
        report(element, "on_disconnected", self.element.on_disconnected(&mut host));
    }

    fn adopted_callback(
        &mut self,
        dom: &mut Dom,
        element: NodeId,
        _old_document: NodeId,
        _new_document: NodeId,
    ) {
        let mut host = HostElement {
            dom,
            node: element,
            metadata: &self.metadata,
            writes: &self.writes,
        };
        report(element, "on_adopted", self.element.on_adopted(&mut host));
    }

    fn attribute_changed_callback(
        &mut self,
        dom: &mut Dom,
        element: NodeId,
        name: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) {
        let mut host = HostElement {
            dom,
            node: element,
            metadata: &self.metadata,
            writes: &self.writes,
        };
        report(
            element,
            "on_attribute_changed",
            self.element
                .on_attribute_changed(&mut host, name, old_value, new_value),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{AttributeBinding, AttributeMap, ElementOptions, PropertyType};

    #[derive(Default)]
    struct Panel;

    impl CustomElement for Panel {
        fn initial_value(&self, property: &str) -> Value {
            match property {
                "direction" => "right".into(),
                "open" => true.into(),
                _ => Value::Null,
            }
        }
    }

    fn metadata(shadow_dom: bool) -> Rc<ElementMetadata> {
        let mut attribute_map = AttributeMap::default();
        for (property, ty) in [
            ("direction", PropertyType::String),
            ("open", PropertyType::Boolean),
            ("label", PropertyType::String),
        ] {
            attribute_map.insert(
                property,
                AttributeBinding {
                    attribute: property.to_string(),
                    ty,
                },
            );
        }
        Rc::new(ElementMetadata {
            options: Some(ElementOptions::new("x-panel").shadow_dom(shadow_dom)),
            template: None,
            attribute_map,
        })
    }

    #[test]
    fn construct_captures_defaults_in_binding_order() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let node = dom.create_element(document, "x-panel").unwrap();

        let lifecycle =
            Lifecycle::<Panel>::construct(&mut dom, node, metadata(false), PropertyWrites::new())
                .unwrap();
        assert_eq!(
            lifecycle.defaults(),
            &[
                ("direction".to_string(), Value::from("right")),
                ("open".to_string(), Value::Bool(true)),
                ("label".to_string(), Value::Null),
            ]
        );
        assert!(dom.shadow_root(node).is_none());
    }

    #[test]
    fn construct_attaches_open_shadow_root() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let node = dom.create_element(document, "x-panel").unwrap();

        Lifecycle::<Panel>::construct(&mut dom, node, metadata(true), PropertyWrites::new())
            .unwrap();
        let shadow = dom.shadow_root(node).unwrap();
        assert_eq!(dom.shadow_root_mode(shadow), Some(ShadowRootMode::Open));
    }

    #[test]
    fn connecting_restores_only_absent_attributes() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let node = dom.create_element(document, "x-panel").unwrap();
        dom.set_attribute(node, "direction", "left").unwrap();

        let mut lifecycle =
            Lifecycle::<Panel>::construct(&mut dom, node, metadata(false), PropertyWrites::new())
                .unwrap();
        lifecycle.connected_callback(&mut dom, node);

        assert_eq!(dom.get_attribute(node, "direction"), Some("left"));
        assert_eq!(dom.get_attribute(node, "open"), Some(""));
        assert!(!dom.has_attribute(node, "label"));
    }

    #[test]
    fn written_properties_keep_their_value() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let node = dom.create_element(document, "x-panel").unwrap();
        let writes = PropertyWrites::new();

        let mut lifecycle =
            Lifecycle::<Panel>::construct(&mut dom, node, metadata(false), writes.clone())
                .unwrap();
        writes.mark(node, "open");
        lifecycle.connected_callback(&mut dom, node);

        assert!(!dom.has_attribute(node, "open"));
        assert_eq!(dom.get_attribute(node, "direction"), Some("right"));
    }

    #[test]
    fn defaults_are_restored_once() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let node = dom.create_element(document, "x-panel").unwrap();

        let mut lifecycle =
            Lifecycle::<Panel>::construct(&mut dom, node, metadata(false), PropertyWrites::new())
                .unwrap();
        lifecycle.connected_callback(&mut dom, node);
        dom.remove_attribute(node, "open").unwrap();
        dom.remove_attribute(node, "direction").unwrap();
        lifecycle.connected_callback(&mut dom, node);

        assert!(!dom.has_attribute(node, "open"));
        assert!(!dom.has_attribute(node, "direction"));
    }
}
