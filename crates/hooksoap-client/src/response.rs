use hooksoap_xml::Document;

use crate::RequestContext;

/// A response body as a transport hands it back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawResponse {
    /// No body at all, e.g. a one-way exchange.
    #[default]
    Empty,
    Text(String),
    /// Already parsed by the transport; used without another parse.
    Document(Document),
}

impl RawResponse {
    /// Trims text bodies; whitespace-only text counts as no body.
    pub fn is_empty(&self) -> bool {
        match self {
            RawResponse::Empty => true,
            RawResponse::Text(text) => text.trim().is_empty(),
            RawResponse::Document(_) => false,
        }
    }

    /// The body as the engine will receive it when nothing inspects it.
    pub fn into_wire_string(self) -> String {
        match self {
            RawResponse::Empty => String::new(),
            RawResponse::Text(text) => text,
            RawResponse::Document(document) => document.to_xml_string(),
        }
    }
}

impl From<String> for RawResponse {
    fn from(value: String) -> Self {
        if value.is_empty() {
            RawResponse::Empty
        } else {
            RawResponse::Text(value)
        }
    }
}

impl From<&str> for RawResponse {
    fn from(value: &str) -> Self {
        RawResponse::from(value.to_owned())
    }
}

impl From<Document> for RawResponse {
    fn from(value: Document) -> Self {
        RawResponse::Document(value)
    }
}

/// The parsed response, handed to [`crate::SoapHooks::on_response`].
///
/// Only the document is mutable. After the hook returns, the document is
/// serialized and becomes the string the engine unmarshals; no document means
/// an empty string.
#[derive(Debug)]
pub struct ResponseContext<'c, V> {
    document: Option<Document>,
    request: RequestContext<'c, V>,
}

impl<'c, V> ResponseContext<'c, V> {
    pub fn new(document: Option<Document>, request: RequestContext<'c, V>) -> Self {
        Self { document, request }
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.document.as_mut()
    }

    pub fn set_document(&mut self, document: Option<Document>) {
        self.document = document;
    }

    pub fn take_document(&mut self) -> Option<Document> {
        self.document.take()
    }

    /// The request that produced this response, as it was sent.
    pub fn request(&self) -> &RequestContext<'c, V> {
        &self.request
    }

    pub fn to_wire_string(&self) -> String {
        self.document
            .as_ref()
            .map(Document::to_xml_string)
            .unwrap_or_default()
    }
}
