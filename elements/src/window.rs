use std::any::TypeId;
use std::future::Future;
use std::rc::Rc;

use dom::{CustomElementCallbacks, CustomElementDefinition, Dom, NodeId};
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;

use crate::accessor;
use crate::descriptor::ElementDescriptor;
use crate::error::Error;
use crate::fetch::ResourceFetcher;
use crate::lifecycle::{CustomElement, Lifecycle, PropertyWrites};
use crate::metadata::{AttributeBinding, ElementMetadata, ElementOptions, MetadataStore, PropertyType};
use crate::template::Template;
use crate::value::Value;

/// A document together with the custom element registry, the metadata of
/// every registered type and the event loop templates are loaded on.
pub struct Window {
    dom: Dom,
    document: NodeId,
    metadata: MetadataStore,
    writes: PropertyWrites,
    event_loop: LocalPool,
    fetcher: Rc<dyn ResourceFetcher>,
}

impl Window {
    pub fn new(fetcher: impl ResourceFetcher + 'static) -> Self {
        let mut dom = Dom::new();
        let document = dom.create_document();
        Self {
            dom,
            document,
            metadata: MetadataStore::new(),
            writes: PropertyWrites::new(),
            event_loop: LocalPool::new(),
            fetcher: Rc::new(fetcher),
        }
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    pub fn document(&self) -> NodeId {
        self.document
    }

    pub fn metadata_store(&self) -> &MetadataStore {
        &self.metadata
    }

    pub fn body(&self) -> Option<NodeId> {
        self.dom.find_element(self.document, "body")
    }

    pub fn create_element(&mut self, local_name: &str) -> Result<NodeId, Error> {
        Ok(self.dom.create_element(self.document, local_name)?)
    }

    /// Replaces the contents of the document with the parsed `html`.
    pub fn load_document(&mut self, html: &str) -> Result<(), Error> {
        self.dom.replace_all(self.document, None)?;
        parser::parse_document(&mut self.dom, self.document, html)?;
        Ok(())
    }

    pub fn load_url(&mut self, url: &str) -> Result<(), Error> {
        let html = self.event_loop.run_until(self.fetcher.fetch(url))?;
        self.load_document(&html)
    }

    pub fn define<T: CustomElement>(&mut self) -> ElementDescriptor<'_, T> {
        ElementDescriptor::new(self)
    }

    pub fn bind_attribute<T: CustomElement>(
        &mut self,
        property: &str,
        attribute: &str,
        ty: PropertyType,
    ) -> Option<AttributeBinding> {
        self.metadata
            .bind_attribute(TypeId::of::<T>(), property, attribute, ty)
    }

    /// Registers `T` under `options.selector`.
    ///
    /// The template, if any, starts loading on the event loop; registration
    /// does not wait for it. A rejected registration leaves the store untouched.
    pub fn register_element<T: CustomElement>(
        &mut self,
        options: ElementOptions,
    ) -> Result<Rc<ElementMetadata>, Error> {
        let class = TypeId::of::<T>();
        let selector = options.selector.clone();

        let mut record = self
            .metadata
            .get(class)
            .map(|record| ElementMetadata::clone(record))
            .unwrap_or_default();
        let template = options
            .template_url
            .as_deref()
            .map(|url| Template::fetch(url, self.fetcher.as_ref()));
        record.options = Some(options);
        if let Some(template) = &template {
            record.template = Some(template.clone());
        }
        let observed_attributes = record.observed_attributes();
        let metadata = Rc::new(record);

        let definition = {
            let metadata = metadata.clone();
            let writes = self.writes.clone();
            CustomElementDefinition::new(&selector, class, move |dom, node| {
                Lifecycle::<T>::construct(dom, node, metadata.clone(), writes.clone())
                    .map(|lifecycle| Box::new(lifecycle) as Box<dyn CustomElementCallbacks>)
            })
        }
        .with_observed_attributes(observed_attributes)
        .with_data(metadata.clone());

        self.dom.define(definition)?;
        self.metadata.insert(class, metadata.clone());
        if let Some(template) = template {
            self.spawn_template(template)?;
        }
        tracing::debug!(selector = selector.as_str(), "registered element");
        Ok(metadata)
    }

    fn spawn_template(&mut self, template: Template) -> Result<(), Error> {
        self.event_loop
            .spawner()
            .spawn_local(async move {
                if let Err(error) = template.await {
                    tracing::warn!(%error, "template failed to load");
                }
            })
            .map_err(|error| Error::msg(error.to_string()))
    }

    /// The metadata record `node` was constructed with.
    pub fn metadata_of(&self, node: NodeId) -> Option<Rc<ElementMetadata>> {
        self.dom
            .custom_element_definition(node)?
            .data::<ElementMetadata>()
    }

    pub fn property(&self, node: NodeId, property: &str) -> Result<Value, Error> {
        let metadata = self
            .metadata_of(node)
            .ok_or(Error::NotCustomElement(node))?;
        let binding = metadata
            .attribute_map
            .get(property)
            .ok_or_else(|| Error::UnboundProperty {
                property: property.to_string(),
            })?;
        Ok(accessor::get(&self.dom, node, binding))
    }

    pub fn set_property(
        &mut self,
        node: NodeId,
        property: &str,
        value: impl Into<Value>,
    ) -> Result<(), Error> {
        let metadata = self
            .metadata_of(node)
            .ok_or(Error::NotCustomElement(node))?;
        let binding = metadata
            .attribute_map
            .get(property)
            .ok_or_else(|| Error::UnboundProperty {
                property: property.to_string(),
            })?;
        accessor::set(&mut self.dom, node, binding, value.into())?;
        self.writes.mark(node, property);
        Ok(())
    }

    /// Runs the event loop until every spawned task has finished.
    pub fn run(&mut self) {
        self.event_loop.run();
    }

    pub fn run_until_stalled(&mut self) {
        self.event_loop.run_until_stalled();
    }

    pub fn block_on<F: Future>(&mut self, future: F) -> F::Output {
        self.event_loop.run_until(future)
    }
}
