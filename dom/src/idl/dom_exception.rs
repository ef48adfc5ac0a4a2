// https://webidl.spec.whatwg.org/#idl-DOMException
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, thiserror::Error)]
pub enum DomException {
    #[error("HierarchyRequestError: The operation would yield an incorrect node tree.")]
    HierarchyRequestError,
    #[error("InvalidCharacterError: The string contains invalid characters.")]
    InvalidCharacterError,
    #[error("NotFoundError: The object can not be found here.")]
    NotFoundError,
    #[error("NotSupportedError: The operation is not supported.")]
    NotSupportedError,
    #[error("SyntaxError: The string did not match the expected pattern.")]
    SyntaxError,
    #[error("InvalidNodeTypeError: The supplied node is incorrect or has an incorrect ancestor for this operation.")]
    InvalidNodeTypeError,
}

impl DomException {
    pub const HIERARCHY_REQUEST_ERR: u16 = 3;
    pub const INVALID_CHARACTER_ERR: u16 = 5;
    pub const NOT_FOUND_ERR: u16 = 8;
    pub const NOT_SUPPORTED_ERR: u16 = 9;
    pub const SYNTAX_ERR: u16 = 12;
    pub const INVALID_NODE_TYPE_ERR: u16 = 24;

    // https://webidl.spec.whatwg.org/#dfn-error-names-table
    pub fn name(&self) -> &'static str {
        match self {
            DomException::HierarchyRequestError => "HierarchyRequestError",
            DomException::InvalidCharacterError => "InvalidCharacterError",
            DomException::NotFoundError => "NotFoundError",
            DomException::NotSupportedError => "NotSupportedError",
            DomException::SyntaxError => "SyntaxError",
            DomException::InvalidNodeTypeError => "InvalidNodeTypeError",
        }
    }

    /// The legacy code of the exception.
    pub fn code(&self) -> u16 {
        match self {
            DomException::HierarchyRequestError => DomException::HIERARCHY_REQUEST_ERR,
            DomException::InvalidCharacterError => DomException::INVALID_CHARACTER_ERR,
            DomException::NotFoundError => DomException::NOT_FOUND_ERR,
            DomException::NotSupportedError => DomException::NOT_SUPPORTED_ERR,
            DomException::SyntaxError => DomException::SYNTAX_ERR,
            DomException::InvalidNodeTypeError => DomException::INVALID_NODE_TYPE_ERR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DomException;

    #[test]
    fn names_and_codes() {
        assert_eq!(DomException::NotSupportedError.name(), "NotSupportedError");
        assert_eq!(DomException::NotSupportedError.code(), 9);
        assert_eq!(DomException::SyntaxError.code(), 12);
        assert_eq!(
            DomException::HierarchyRequestError.to_string(),
            "HierarchyRequestError: The operation would yield an incorrect node tree."
        );
    }
}
