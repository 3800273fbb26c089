use hooksoap_xml::Element;

use crate::SoapError;

/// Content of a SOAP header block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HeaderPayload {
    #[default]
    Empty,
    Text(String),
    Xml(Element),
}

/// One SOAP header block, as the engine writes it into the envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapHeader {
    pub namespace: String,
    pub name: String,
    pub payload: HeaderPayload,
    pub must_understand: bool,
    pub actor: Option<String>,
}

impl SoapHeader {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, payload: HeaderPayload) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            payload,
            must_understand: false,
            actor: None,
        }
    }

    pub fn text(namespace: impl Into<String>, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(namespace, name, HeaderPayload::Text(text.into()))
    }

    pub fn with_must_understand(mut self, must_understand: bool) -> Self {
        self.must_understand = must_understand;
        self
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Why this header cannot be written into an envelope, if it cannot.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.namespace.is_empty() {
            return Err("header namespace must not be empty");
        }
        if !is_ncname(&self.name) {
            return Err("header name must be a valid XML NCName");
        }
        if self.actor.as_deref().is_some_and(str::is_empty) {
            return Err("header actor must not be empty when present");
        }
        Ok(())
    }
}

fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Ordered SOAP headers; order is wire order.
///
/// Every header is validated before it enters the collection. A rejected
/// mutation leaves the collection exactly as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderCollection {
    headers: Vec<SoapHeader>,
}

impl HeaderCollection {
    pub fn new(headers: Vec<SoapHeader>) -> Result<Self, SoapError> {
        for (index, header) in headers.iter().enumerate() {
            check(index, header)?;
        }
        Ok(Self { headers })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push(&mut self, header: SoapHeader) -> Result<(), SoapError> {
        check(self.headers.len(), &header)?;
        self.headers.push(header);
        Ok(())
    }

    /// Inserts at `index`, shifting later headers back. `index == len()` appends.
    pub fn insert(&mut self, index: usize, header: SoapHeader) -> Result<(), SoapError> {
        if index > self.headers.len() {
            return Err(SoapError::InvalidHeader {
                index,
                reason: "index out of bounds",
            });
        }
        check(index, &header)?;
        self.headers.insert(index, header);
        Ok(())
    }

    /// Replaces the header at `index` and returns the old one.
    pub fn replace(&mut self, index: usize, header: SoapHeader) -> Result<SoapHeader, SoapError> {
        check(index, &header)?;
        let slot = self.headers.get_mut(index).ok_or(SoapError::InvalidHeader {
            index,
            reason: "index out of bounds",
        })?;
        Ok(std::mem::replace(slot, header))
    }

    pub fn remove(&mut self, index: usize) -> Option<SoapHeader> {
        (index < self.headers.len()).then(|| self.headers.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&SoapHeader> {
        self.headers.get(index)
    }

    /// First header named `name` in `namespace`.
    pub fn find(&self, namespace: &str, name: &str) -> Option<&SoapHeader> {
        self.headers
            .iter()
            .find(|header| header.namespace == namespace && header.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SoapHeader> {
        self.headers.iter()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn as_slice(&self) -> &[SoapHeader] {
        &self.headers
    }

    pub fn into_vec(self) -> Vec<SoapHeader> {
        self.headers
    }
}

fn check(index: usize, header: &SoapHeader) -> Result<(), SoapError> {
    header
        .validate()
        .map_err(|reason| SoapError::InvalidHeader { index, reason })
}

impl<'a> IntoIterator for &'a HeaderCollection {
    type Item = &'a SoapHeader;
    type IntoIter = std::slice::Iter<'a, SoapHeader>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.iter()
    }
}

impl IntoIterator for HeaderCollection {
    type Item = SoapHeader;
    type IntoIter = std::vec::IntoIter<SoapHeader>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.into_iter()
    }
}

impl TryFrom<Vec<SoapHeader>> for HeaderCollection {
    type Error = SoapError;

    fn try_from(value: Vec<SoapHeader>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
