pub mod builder;
pub mod parser;
pub mod selector;

pub use builder::{
    Attribute, Declaration, Document, Element, Namespace, NamespaceDeclaration, Node,
};
pub use selector::{QName, Selector};

/// Namespace bound to the reserved `xml` prefix. Never declared explicitly.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XmlError {
    #[error("Invalid XML: {0}")]
    ParserError(#[from] crate::parser::Error),

    #[error("Invalid XML declaration: {0}")]
    InvalidDeclaration(String),

    #[error("Invalid node type: expected '{expected:?}', found {found:?}")]
    InvalidNodeType {
        expected: roxmltree::NodeType,
        found: roxmltree::NodeType,
    },
}
