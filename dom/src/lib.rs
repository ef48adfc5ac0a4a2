use std::fmt;

pub mod custom_element_definition;
pub mod custom_element_reactions;
pub mod custom_element_registry;
pub mod element;
pub mod idl;
pub mod mutation_algorithms;
pub mod node;
pub mod serialize;
pub mod shadow_root;
mod tree;

pub use custom_element_definition::{
    CustomElementCallbacks, CustomElementConstructor, CustomElementDefinition,
};
pub use custom_element_reactions::CustomElementCallback;
pub use custom_element_registry::{is_valid_custom_element_name, CustomElementRegistry};
pub use element::{CustomElementState, Element};
pub use idl::DomException;
pub use node::{Node, NodeData};
pub use shadow_root::ShadowRootMode;
pub use tree::Dom;

/// Handle to a node allocated in a [`Dom`].
///
/// Handles are only meaningful for the arena that produced them.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
