use crate::builder::Namespace;

/// Represents an XML attribute with a name and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The local name of the attribute.
    name: String,
    /// The value of the attribute, unescaped.
    value: String,

    namespace: Option<Namespace>,
    /// Prefix seen when parsed, reused on output while it is still bound.
    prefix: Option<String>,
}

impl Attribute {
    /// Creates a new instance of `Attribute`.
    ///
    /// # Example
    ///
    /// ```
    /// use hooksoap_xml::builder::Attribute;
    /// let attribute = Attribute::new("name", "value");
    /// assert_eq!(attribute.value(), "value");
    /// ```
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
            namespace: None,
            prefix: None,
        }
    }

    pub fn new_with_namespace(
        name: impl Into<String>,
        value: impl Into<String>,
        namespace: Option<impl Into<Namespace>>,
    ) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
            namespace: namespace.map(Into::into),
            prefix: None,
        }
    }

    pub fn set_namespace(mut self, namespace: impl Into<Namespace>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn namespace(&self) -> Option<&Namespace> {
        self.namespace.as_ref()
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Whether this attribute is `name` in `namespace` (`None` meaning no namespace).
    pub fn is(&self, namespace: Option<&str>, name: &str) -> bool {
        self.name == name && self.namespace.as_ref().map(|ns| ns.url.as_str()) == namespace
    }
}
