use crate::XmlError;
use crate::builder::{Declaration, Element, Node, writer};
use crate::selector::Selector;

/// A complete XML document: optional declaration plus the root element.
///
/// Comments and processing instructions outside the root element are not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    declaration: Option<Declaration>,
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            declaration: None,
            root,
        }
    }

    pub fn with_declaration(mut self, declaration: Declaration) -> Self {
        self.declaration = Some(declaration);
        self
    }

    /// Parses `xml` into an owned, editable document.
    ///
    /// # Example
    ///
    /// ```
    /// use hooksoap_xml::Document;
    /// let document = Document::parse("<a><b>text</b></a>").unwrap();
    /// assert_eq!(document.root().name(), "a");
    /// assert!(Document::parse("<not valid xml").is_err());
    /// ```
    pub fn parse(xml: &str) -> Result<Self, XmlError> {
        crate::parser::parse_document(xml)
    }

    pub fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_ref()
    }

    pub fn set_declaration(&mut self, declaration: Option<Declaration>) {
        self.declaration = declaration;
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn set_root(&mut self, root: Element) -> Element {
        std::mem::replace(&mut self.root, root)
    }

    pub fn into_root(self) -> Element {
        self.root
    }

    /// Every element matched by `selector`, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<&Element> {
        selector.select(&self.root)
    }

    /// Calls `f` on every element matched by `selector`; returns the match count.
    pub fn select_mut(&mut self, selector: &Selector, f: impl FnMut(&mut Element)) -> usize {
        selector.select_mut(&mut self.root, f)
    }

    /// Compact serialization; whitespace in the tree is written as-is.
    pub fn to_xml_string(&self) -> String {
        self.write(None)
    }

    /// Serialization with four-space indentation of element-only content.
    pub fn to_pretty_string(&self) -> String {
        self.write(Some(4))
    }

    fn write(&self, indent: Option<usize>) -> String {
        let mut out = String::new();
        if let Some(declaration) = &self.declaration {
            out.push_str(&declaration.to_string());
            out.push('\n');
        }
        writer::write_element(&mut out, &self.root, indent);
        out
    }

    /// Drops whitespace-only text nodes from element-only content, so that a
    /// pretty-printed document reads back as the compact one.
    pub fn strip_whitespace(&mut self) {
        fn strip(element: &mut Element) {
            if element.has_element_children() {
                element
                    .children_mut()
                    .retain(|node| !matches!(node, Node::Text(t) if t.trim().is_empty()));
            }
            for child in element.elements_mut() {
                strip(child);
            }
        }
        strip(&mut self.root);
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_xml_string())
    }
}

impl From<Element> for Document {
    fn from(value: Element) -> Self {
        Document::new(value)
    }
}
