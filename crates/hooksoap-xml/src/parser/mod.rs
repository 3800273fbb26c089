//! Parsing into the owned tree, on top of `roxmltree`.
pub use roxmltree::{Error, TextPos};

use roxmltree::NodeType;
use tracing::trace;

use crate::XmlError;
use crate::builder::{Attribute, Declaration, Document, Element, NamespaceDeclaration, Node};

pub(crate) fn parse_document(xml: &str) -> Result<Document, XmlError> {
    let declaration = Declaration::sniff(xml)?;
    let parsed = roxmltree::Document::parse(xml)?;
    let root = convert_element(parsed.root_element(), Some(xml));

    trace!(root = root.name(), "parsed XML document");

    let document = Document::new(root);
    Ok(match declaration {
        Some(declaration) => document.with_declaration(declaration),
        None => document,
    })
}

impl TryFrom<roxmltree::Node<'_, '_>> for Element {
    type Error = XmlError;

    fn try_from(value: roxmltree::Node<'_, '_>) -> Result<Self, Self::Error> {
        if !value.is_element() {
            return Err(XmlError::InvalidNodeType {
                expected: NodeType::Element,
                found: value.node_type(),
            });
        }
        Ok(convert_element(value, None))
    }
}

/// Prefix written in the source start tag, e.g. `s` for `<s:Envelope ...>`.
fn written_prefix<'s>(node: roxmltree::Node<'_, '_>, source: &'s str) -> Option<&'s str> {
    let start = node.range().start;
    let tag = source.get(start + 1..)?;
    let end = tag.find(|c: char| c.is_whitespace() || c == '/' || c == '>')?;
    tag[..end].split_once(':').map(|(prefix, _)| prefix)
}

fn bound_prefix<'a>(node: roxmltree::Node<'a, '_>, uri: &str) -> Option<&'a str> {
    node.namespaces()
        .find(|ns| ns.uri() == uri && ns.name().is_some())
        .and_then(|ns| ns.name())
}

fn declared_here(node: roxmltree::Node<'_, '_>) -> Vec<NamespaceDeclaration> {
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|parent| parent.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();

    node.namespaces()
        .filter(|ns| ns.name() != Some("xml"))
        .filter(|ns| !inherited.contains(&(ns.name(), ns.uri())))
        .map(|ns| NamespaceDeclaration::new(ns.uri(), ns.name()))
        .collect()
}

fn convert_element(node: roxmltree::Node<'_, '_>, source: Option<&str>) -> Element {
    let tag_name = node.tag_name();
    let mut element = Element::new(tag_name.name()).set_namespace_optional(tag_name.namespace());

    if let Some(uri) = tag_name.namespace() {
        let prefix = match source {
            Some(source) => written_prefix(node, source),
            None => node.lookup_prefix(uri),
        };
        if let Some(prefix) = prefix {
            element = element.with_prefix(prefix);
        }
    }

    for declaration in declared_here(node) {
        element.push_namespace_declaration(declaration);
    }

    for attr in node.attributes() {
        let mut attribute = Attribute::new_with_namespace(attr.name(), attr.value(), attr.namespace());
        if let Some(prefix) = attr.namespace().and_then(|uri| bound_prefix(node, uri)) {
            attribute = attribute.with_prefix(prefix);
        }
        element.push_attribute(attribute);
    }

    for child in node.children() {
        match child.node_type() {
            NodeType::Element => element.push_node(Node::Element(convert_element(child, source))),
            NodeType::Text => {
                if let Some(text) = child.text() {
                    element.push_node(Node::Text(text.to_owned()));
                }
            }
            NodeType::Comment => {
                if let Some(text) = child.text() {
                    element.push_node(Node::Comment(text.to_owned()));
                }
            }
            NodeType::PI => {
                if let Some(pi) = child.pi() {
                    element.push_node(Node::ProcessingInstruction {
                        target: pi.target.to_owned(),
                        value: pi.value.map(str::to_owned),
                    });
                }
            }
            NodeType::Root => {}
        }
    }

    element
}
