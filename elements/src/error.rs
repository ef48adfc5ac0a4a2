use dom::{DomException, NodeId};
use thiserror::Error;

use crate::fetch::FetchError;
use crate::template::TemplateError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Dom(#[from] DomException),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("{0} is not a registered custom element")]
    NotCustomElement(NodeId),
    #[error("property {property:?} is not bound to an attribute")]
    UnboundProperty { property: String },
    #[error("{0}")]
    Message(String),
}

impl Error {
    pub fn msg(message: impl Into<String>) -> Self {
        Error::Message(message.into())
    }
}
