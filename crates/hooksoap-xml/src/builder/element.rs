use crate::builder::{Attribute, Namespace, NamespaceDeclaration};

/// A node in an element's content, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A child element.
    Element(Element),
    /// Character data, unescaped. CDATA sections are folded into text.
    Text(String),
    Comment(String),
    ProcessingInstruction {
        target: String,
        value: Option<String>,
    },
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

/// Represents an XML element.
///
/// Elements own their content, so a whole envelope can be edited in place and
/// written back out with [`crate::Document::to_xml_string`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// The local name of the element.
    name: String,
    /// The namespace the element belongs to.
    namespace: Option<Namespace>,
    /// Prefix seen when parsed; a hint for serialization, never authoritative.
    prefix: Option<String>,
    /// `xmlns` declarations made on this element.
    namespace_declarations: Vec<NamespaceDeclaration>,
    /// The attributes of the element.
    attributes: Vec<Attribute>,
    /// The content of the element.
    children: Vec<Node>,
}

impl Element {
    /// Creates a new instance of `Element` with the given name.
    ///
    /// # Example
    ///
    /// ```
    /// use hooksoap_xml::builder::Element;
    /// let element = Element::new("root");
    /// assert_eq!(element.name(), "root");
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            namespace: None,
            prefix: None,
            namespace_declarations: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the namespace of the element and returns a modified `Element`.
    ///
    /// # Example
    ///
    /// ```
    /// use hooksoap_xml::builder::{Element, Namespace};
    /// let element = Element::new("root").set_namespace(Namespace::new("http://example.com"));
    /// assert!(element.is(Some("http://example.com"), "root"));
    /// ```
    pub fn set_namespace(mut self, namespace: impl Into<Namespace>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn set_namespace_optional(mut self, namespace: Option<impl Into<Namespace>>) -> Self {
        self.namespace = namespace.map(Into::into);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn add_namespace_declaration(mut self, uri: impl Into<String>, prefix: Option<&str>) -> Self {
        self.namespace_declarations
            .push(NamespaceDeclaration::new(uri, prefix));
        self
    }

    /// Adds an attribute to the element and returns a modified `Element`.
    pub fn add_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Adds a child element to the element and returns a modified `Element`.
    ///
    /// Unlike text, children accumulate; existing text nodes are kept.
    pub fn add_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn add_children(mut self, children: Vec<Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    /// Replaces the content of the element with a single text node.
    pub fn set_text(mut self, text: impl Into<String>) -> Self {
        self.with_text(text);
        self
    }

    pub fn with_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.children = vec![Node::Text(text.into())];
        self
    }

    pub(crate) fn push_node(&mut self, node: Node) {
        self.children.push(node);
    }

    pub(crate) fn push_namespace_declaration(&mut self, declaration: NamespaceDeclaration) {
        self.namespace_declarations.push(declaration);
    }

    pub(crate) fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn namespace(&self) -> Option<&Namespace> {
        self.namespace.as_ref()
    }

    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace.as_ref().map(|ns| ns.url.as_str())
    }

    pub fn replace_namespace(&mut self, namespace: Option<Namespace>) {
        self.namespace = namespace;
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn namespace_declarations(&self) -> &[NamespaceDeclaration] {
        &self.namespace_declarations
    }

    /// Whether this element is `name` in `namespace` (`None` meaning no namespace).
    pub fn is(&self, namespace: Option<&str>, name: &str) -> bool {
        self.name == name && self.namespace_uri() == namespace
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of the un-namespaced attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attribute_ns(None, name)
    }

    pub fn attribute_ns(&self, namespace: Option<&str>, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.is(namespace, name))
            .map(Attribute::value)
    }

    /// Sets an un-namespaced attribute, replacing the value if it already exists.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.put_attribute(Attribute::new(name, value));
    }

    /// Inserts `attribute`, replacing any attribute with the same expanded name.
    pub fn put_attribute(&mut self, attribute: Attribute) {
        let namespace = attribute.namespace().map(|ns| ns.url.clone());
        match self
            .attributes
            .iter_mut()
            .find(|existing| existing.is(namespace.as_deref(), attribute.name()))
        {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
    }

    pub fn remove_attribute(&mut self, namespace: Option<&str>, name: &str) -> Option<Attribute> {
        let index = self
            .attributes
            .iter()
            .position(|attr| attr.is(namespace, name))?;
        Some(self.attributes.remove(index))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    /// First child element named `name` in `namespace`.
    pub fn child(&self, namespace: Option<&str>, name: &str) -> Option<&Element> {
        self.elements().find(|el| el.is(namespace, name))
    }

    pub fn child_mut(&mut self, namespace: Option<&str>, name: &str) -> Option<&mut Element> {
        self.elements_mut().find(|el| el.is(namespace, name))
    }

    /// This element and every element below it, depth first in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children.iter().filter_map(Node::as_text).collect()
    }

    pub fn has_element_children(&self) -> bool {
        self.children.iter().any(|node| matches!(node, Node::Element(_)))
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.elements().collect::<Vec<_>>().into_iter().rev());
        Some(next)
    }
}
