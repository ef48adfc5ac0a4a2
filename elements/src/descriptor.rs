use std::any::TypeId;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::error::Error;
use crate::lifecycle::CustomElement;
use crate::metadata::{ElementMetadata, ElementOptions, PropertyType};
use crate::window::Window;

/// Builder that binds the properties of `T` and then registers it.
///
/// ```ignore
/// window
///     .define::<ResizeableContainer>()
///     .bind_attribute("direction", "direction")
///     .register(ElementOptions::new("cicara-resizeable-container").shadow_dom(true))?;
/// ```
pub struct ElementDescriptor<'w, T> {
    window: &'w mut Window,
    class: PhantomData<fn() -> T>,
}

impl<'w, T: CustomElement> ElementDescriptor<'w, T> {
    pub(crate) fn new(window: &'w mut Window) -> Self {
        Self {
            window,
            class: PhantomData,
        }
    }

    pub fn class(&self) -> TypeId {
        TypeId::of::<T>()
    }

    pub fn bind_attribute(self, property: &str, attribute: &str) -> Self {
        self.bind(property, attribute, PropertyType::String)
    }

    pub fn bind_boolean_attribute(self, property: &str, attribute: &str) -> Self {
        self.bind(property, attribute, PropertyType::Boolean)
    }

    pub fn bind(self, property: &str, attribute: &str, ty: PropertyType) -> Self {
        self.window.bind_attribute::<T>(property, attribute, ty);
        self
    }

    pub fn register(self, options: ElementOptions) -> Result<Rc<ElementMetadata>, Error> {
        self.window.register_element::<T>(options)
    }
}
