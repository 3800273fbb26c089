use hooksoap_xml::Document;
use typed_builder::TypedBuilder;

use crate::{CallContext, SoapError};

/// SOAP protocol version, carried as its integer code on the engine side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SoapVersion {
    #[default]
    Soap11,
    Soap12,
}

impl SoapVersion {
    pub const fn as_i32(self) -> i32 {
        match self {
            SoapVersion::Soap11 => 1,
            SoapVersion::Soap12 => 2,
        }
    }

    pub const fn envelope_namespace(self) -> &'static str {
        match self {
            SoapVersion::Soap11 => "http://schemas.xmlsoap.org/soap/envelope/",
            SoapVersion::Soap12 => "http://www.w3.org/2003/05/soap-envelope",
        }
    }
}

impl TryFrom<i32> for SoapVersion {
    type Error = SoapError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SoapVersion::Soap11),
            2 => Ok(SoapVersion::Soap12),
            other => Err(SoapError::UnknownVersion(other)),
        }
    }
}

impl From<SoapVersion> for i32 {
    fn from(value: SoapVersion) -> Self {
        value.as_i32()
    }
}

impl std::fmt::Display for SoapVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoapVersion::Soap11 => write!(f, "SOAP 1.1"),
            SoapVersion::Soap12 => write!(f, "SOAP 1.2"),
        }
    }
}

/// One physical request as the engine produces it and the transport sends it.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct WireRequest {
    #[builder(setter(into))]
    pub xml: String,

    #[builder(default, setter(into, strip_option))]
    pub uri: Option<String>,

    #[builder(default, setter(into, strip_option))]
    pub action: Option<String>,

    #[builder(default)]
    pub version: SoapVersion,

    #[builder(default)]
    pub one_way: bool,
}

/// The outbound request while it is still mutable.
///
/// Built from the engine's XML right before [`crate::SoapHooks::on_before_request`]
/// and discarded when the round-trip ends. Whatever state it holds when the
/// hook returns is what goes on the wire.
#[derive(Debug)]
pub struct RequestContext<'c, V> {
    document: Document,
    uri: Option<String>,
    action: Option<String>,
    version: SoapVersion,
    response_expected: bool,
    call: &'c CallContext<V>,
}

impl<'c, V> RequestContext<'c, V> {
    /// Parses the engine's XML. A failure here is an engine fault, so it is
    /// reported as [`SoapError::MalformedRequest`].
    pub fn from_wire(request: WireRequest, call: &'c CallContext<V>) -> Result<Self, SoapError> {
        let document = Document::parse(&request.xml)
            .map_err(|source| SoapError::MalformedRequest { source })?;

        Ok(Self {
            document,
            uri: request.uri,
            action: request.action,
            version: request.version,
            response_expected: !request.one_way,
            call,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn set_document(&mut self, document: Document) -> Document {
        std::mem::replace(&mut self.document, document)
    }

    pub fn has_uri(&self) -> bool {
        self.uri.is_some()
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn set_uri(&mut self, uri: Option<String>) {
        self.uri = uri;
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn set_action(&mut self, action: Option<String>) {
        self.action = action;
    }

    pub fn version(&self) -> SoapVersion {
        self.version
    }

    pub fn set_version(&mut self, version: SoapVersion) {
        self.version = version;
    }

    pub fn is_response_expected(&self) -> bool {
        self.response_expected
    }

    /// The call that issued this request. Read-only at this stage.
    pub fn call(&self) -> &'c CallContext<V> {
        self.call
    }

    /// The request in its current state, re-serialized for the transport.
    pub fn to_wire(&self) -> WireRequest {
        WireRequest {
            xml: self.document.to_xml_string(),
            uri: self.uri.clone(),
            action: self.action.clone(),
            version: self.version,
            one_way: !self.response_expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CallArguments, CallOptions, HeaderCollection};

    fn call() -> CallContext<()> {
        CallContext::new(
            "Ping",
            CallArguments::default(),
            CallOptions::default(),
            HeaderCollection::empty(),
        )
    }

    #[test]
    fn test_version_codes() {
        assert_eq!(SoapVersion::try_from(1).unwrap(), SoapVersion::Soap11);
        assert_eq!(SoapVersion::try_from(2).unwrap(), SoapVersion::Soap12);
        assert!(matches!(
            SoapVersion::try_from(3),
            Err(SoapError::UnknownVersion(3))
        ));
        assert_eq!(i32::from(SoapVersion::Soap12), 2);
    }

    #[test]
    fn test_from_wire_keeps_fields() {
        let call = call();
        let wire = WireRequest::builder()
            .xml("<Ping/>")
            .uri("http://example.com/svc")
            .version(SoapVersion::Soap12)
            .one_way(true)
            .build();

        let request = RequestContext::from_wire(wire, &call).unwrap();

        assert_eq!(request.uri(), Some("http://example.com/svc"));
        assert!(!request.has_action());
        assert_eq!(request.version(), SoapVersion::Soap12);
        assert!(!request.is_response_expected());
        assert_eq!(request.call().function_name(), "Ping");
        assert_eq!(request.document().root().name(), "Ping");
    }

    #[test]
    fn test_malformed_request_is_fatal() {
        let call = call();
        let wire = WireRequest::builder().xml("<Ping>").build();

        let err = RequestContext::from_wire(wire, &call).unwrap_err();
        assert!(matches!(err, SoapError::MalformedRequest { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_to_wire_reflects_mutations() {
        let call = call();
        let wire = WireRequest::builder()
            .xml("<Ping/>")
            .action("urn:Ping")
            .build();
        let mut request = RequestContext::from_wire(wire, &call).unwrap();

        request.set_uri(Some("http://other".to_owned()));
        request.set_action(None);
        request.document_mut().root_mut().set_attribute("id", "7");

        let wire = request.to_wire();
        assert_eq!(wire.xml, r#"<Ping id="7"/>"#);
        assert_eq!(wire.uri.as_deref(), Some("http://other"));
        assert_eq!(wire.action, None);
        assert!(!wire.one_way);
    }
}
