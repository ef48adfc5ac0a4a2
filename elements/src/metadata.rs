use std::any::TypeId;
use std::collections::HashMap;
use std::rc::Rc;

use crate::template::Template;

/// Registration options of an element type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementOptions {
    pub selector: String,
    pub shadow_dom: bool,
    pub template_url: Option<String>,
}

impl ElementOptions {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            shadow_dom: false,
            template_url: None,
        }
    }

    pub fn shadow_dom(mut self, shadow_dom: bool) -> Self {
        self.shadow_dom = shadow_dom;
        self
    }

    pub fn template_url(mut self, template_url: impl Into<String>) -> Self {
        self.template_url = Some(template_url.into());
        self
    }
}

/// How a bound property converts between its value and the attribute string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    /// Reflected as the presence of the attribute.
    Boolean,
    String,
    Number,
    Object,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeBinding {
    pub attribute: String,
    pub ty: PropertyType,
}

/// Property key to attribute binding, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, AttributeBinding)>,
}

impl AttributeMap {
    /// Binds `property`, replacing an existing binding of the same property in place.
    pub fn insert(
        &mut self,
        property: impl Into<String>,
        binding: AttributeBinding,
    ) -> Option<AttributeBinding> {
        let property = property.into();
        match self.entries.iter_mut().find(|(key, _)| *key == property) {
            Some((_, existing)) => Some(std::mem::replace(existing, binding)),
            None => {
                self.entries.push((property, binding));
                None
            }
        }
    }

    pub fn get(&self, property: &str) -> Option<&AttributeBinding> {
        self.entries
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, binding)| binding)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeBinding)> {
        self.entries
            .iter()
            .map(|(property, binding)| (property.as_str(), binding))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything known about one registered element type. Shared by every instance.
#[derive(Debug, Clone, Default)]
pub struct ElementMetadata {
    pub options: Option<ElementOptions>,
    pub template: Option<Template>,
    pub attribute_map: AttributeMap,
}

impl ElementMetadata {
    pub fn selector(&self) -> Option<&str> {
        self.options.as_ref().map(|options| options.selector.as_str())
    }

    pub fn shadow_dom(&self) -> bool {
        self.options.as_ref().is_some_and(|options| options.shadow_dom)
    }

    /// Attribute names of the attribute map, in binding order.
    pub fn observed_attributes(&self) -> Vec<String> {
        self.attribute_map
            .iter()
            .map(|(_, binding)| binding.attribute.clone())
            .collect()
    }
}

/// Metadata records keyed by element type.
///
/// Records handed out as `Rc` never change: writing through [`MetadataStore::get_or_create`]
/// after a record was shared detaches the store's copy.
#[derive(Debug, Default)]
pub struct MetadataStore {
    records: HashMap<TypeId, Rc<ElementMetadata>>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&mut self, class: TypeId) -> &mut ElementMetadata {
        Rc::make_mut(self.records.entry(class).or_default())
    }

    pub fn get(&self, class: TypeId) -> Option<&Rc<ElementMetadata>> {
        self.records.get(&class)
    }

    /// Replaces the record of `class` with `metadata`, returning the previous one.
    pub fn insert(
        &mut self,
        class: TypeId,
        metadata: Rc<ElementMetadata>,
    ) -> Option<Rc<ElementMetadata>> {
        self.records.insert(class, metadata)
    }

    pub fn has_metadata(&self, class: TypeId) -> bool {
        self.records.contains_key(&class)
    }

    /// Binds `property` of `class` to `attribute`. The last binding of a property wins.
    pub fn bind_attribute(
        &mut self,
        class: TypeId,
        property: &str,
        attribute: &str,
        ty: PropertyType,
    ) -> Option<AttributeBinding> {
        let binding = AttributeBinding {
            attribute: attribute.to_string(),
            ty,
        };
        let previous = self
            .get_or_create(class)
            .attribute_map
            .insert(property, binding);
        if let Some(previous) = &previous {
            tracing::debug!(property, previous = %previous.attribute, attribute, "attribute binding replaced");
        }
        previous
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
