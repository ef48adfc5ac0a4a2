pub mod dom_exception;

pub use dom_exception::DomException;
