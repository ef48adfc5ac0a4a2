//! Declarative custom elements.
//!
//! A Rust type implementing [`CustomElement`] is registered under a tag name
//! with [`Window::register_element`]. Bound properties are reflected to and from
//! DOM attributes, and lifecycle notifications from the DOM are forwarded to the
//! type's hooks.

pub mod accessor;
pub mod descriptor;
pub mod error;
pub mod fetch;
pub mod lifecycle;
pub mod metadata;
pub mod template;
pub mod value;
pub mod window;

pub use descriptor::ElementDescriptor;
pub use error::Error;
pub use fetch::{FetchError, FileFetcher, ResourceFetcher, ResourceMap};
pub use lifecycle::{CustomElement, HostElement, Lifecycle, PropertyWrites};
pub use metadata::{
    AttributeBinding, AttributeMap, ElementMetadata, ElementOptions, MetadataStore, PropertyType,
};
pub use template::{HtmlTemplate, Template, TemplateError, TemplateState};
pub use value::Value;
pub use window::Window;
