use core::fmt;

/// Represents a namespace in XML, identified by its URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    pub url: String,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.url.fmt(f)
    }
}

impl Namespace {
    /// Creates a new instance of `Namespace` with the given URI.
    ///
    /// # Example
    ///
    /// ```
    /// use hooksoap_xml::builder::Namespace;
    /// let namespace = Namespace::new("http://example.com");
    /// assert_eq!(namespace.url, "http://example.com");
    /// ```
    pub fn new(uri: impl Into<String>) -> Self {
        Self { url: uri.into() }
    }
}

impl From<&str> for Namespace {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Namespace {
    fn from(value: String) -> Self {
        Self { url: value }
    }
}

/// An `xmlns` / `xmlns:prefix` declaration carried by an element.
///
/// A `None` prefix is the default namespace declaration. An empty `uri` with no
/// prefix undeclares the default namespace (`xmlns=""`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceDeclaration {
    pub prefix: Option<String>,
    pub uri: String,
}

impl NamespaceDeclaration {
    pub fn new(uri: impl Into<String>, prefix: Option<&str>) -> Self {
        Self {
            prefix: prefix.map(str::to_owned),
            uri: uri.into(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.prefix.is_none()
    }
}

impl fmt::Display for NamespaceDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "xmlns:{prefix}=\"{}\"", super::escape_attribute(&self.uri)),
            None => write!(f, "xmlns=\"{}\"", super::escape_attribute(&self.uri)),
        }
    }
}
