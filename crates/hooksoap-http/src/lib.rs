//! [`Transport`] over HTTP, for use with [`hooksoap_client::HookableClient`].
//!
//! Requests are POSTed with the headers their SOAP version expects. SOAP
//! faults arrive with status 500 and are handed back as ordinary bodies so
//! the engine can report them.
use std::sync::Arc;
use std::time::Duration;

use hooksoap_client::{RawResponse, SoapError, SoapVersion, Transport, WireRequest};
use tracing::{debug, error, info, info_span};

pub const DEFAULT_USER_AGENT: &str = concat!("hooksoap/", env!("CARGO_PKG_VERSION"));

const SOAP11_CONTENT_TYPE: &str = "text/xml; charset=utf-8";
const SOAP12_CONTENT_TYPE: &str = "application/soap+xml; charset=utf-8";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request has no target location and no default location is configured")]
    MissingLocation,

    #[error("Unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[source] Box<ureq::Error>),

    #[error("Failed to read response body: {0}")]
    Body(#[from] std::io::Error),

    #[error("Failed to set up TLS: {0}")]
    Tls(#[from] native_tls::Error),
}

impl From<TransportError> for SoapError {
    fn from(value: TransportError) -> Self {
        SoapError::transport(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, typed_builder::TypedBuilder)]
pub struct HttpTransportConfig {
    #[builder(default = Duration::from_secs(30))]
    pub connect_timeout: Duration,

    #[builder(default = Duration::from_secs(60))]
    pub read_timeout: Duration,

    #[builder(default = DEFAULT_USER_AGENT.to_owned(), setter(into))]
    pub user_agent: String,

    /// Used for requests that carry no target URI.
    #[builder(default, setter(into, strip_option))]
    pub default_location: Option<String>,

    /// Sent with every request, in order, after the SOAP headers.
    #[builder(default)]
    pub extra_headers: Vec<(String, String)>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// HTTP headers for `request` as its SOAP version defines them.
///
/// SOAP 1.1 carries the action in a quoted `SOAPAction` header (always sent,
/// empty when there is no action); SOAP 1.2 moves it into the content type.
pub fn soap_headers(request: &WireRequest) -> Vec<(&'static str, String)> {
    let action = request.action.as_deref();
    match request.version {
        SoapVersion::Soap11 => vec![
            ("Content-Type", SOAP11_CONTENT_TYPE.to_owned()),
            ("SOAPAction", quoted(action.unwrap_or_default())),
        ],
        SoapVersion::Soap12 => {
            let content_type = match action {
                Some(action) => format!("{SOAP12_CONTENT_TYPE}; action={}", quoted(action)),
                None => SOAP12_CONTENT_TYPE.to_owned(),
            };
            vec![("Content-Type", content_type)]
        }
    }
}

/// HTTP quoted-string: backslash-escapes `"` and `\`.
fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[derive(Debug)]
pub struct HttpTransport {
    agent: ureq::Agent,
    config: HttpTransportConfig,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let tls = native_tls::TlsConnector::new()?;
        let agent = ureq::AgentBuilder::new()
            .tls_connector(Arc::new(tls))
            .timeout_connect(config.connect_timeout)
            .timeout_read(config.read_timeout)
            .user_agent(&config.user_agent)
            .build();
        Ok(Self { agent, config })
    }

    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    /// The URL `request` goes to: its own URI, or the configured default.
    pub fn target<'a>(&'a self, request: &'a WireRequest) -> Result<&'a str, TransportError> {
        request
            .uri
            .as_deref()
            .or(self.config.default_location.as_deref())
            .ok_or(TransportError::MissingLocation)
    }

    pub fn post(&self, request: &WireRequest) -> Result<RawResponse, TransportError> {
        let url = self.target(request)?;
        let span = info_span!(
            "http.request",
            url = %url,
            version = %request.version,
            one_way = request.one_way
        );
        let _enter = span.enter();

        let mut http_request = self.agent.post(url);
        for (name, value) in soap_headers(request) {
            http_request = http_request.set(name, &value);
        }
        for (name, value) in &self.config.extra_headers {
            http_request = http_request.set(name, value);
        }

        info!(body_length = request.xml.len(), "sending request");
        let response = match http_request.send_string(&request.xml) {
            Ok(response) => response,
            // SOAP faults are delivered with 500 and still carry an envelope.
            Err(ureq::Error::Status(500, response)) => {
                debug!("received SOAP fault status");
                response
            }
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                error!(status, "unexpected status");
                return Err(TransportError::UnexpectedStatus { status, body });
            }
            Err(e) => {
                error!(error = %e, "request failed");
                return Err(TransportError::Http(Box::new(e)));
            }
        };

        let status = response.status();
        let body = response.into_string().inspect_err(|e| {
            error!(error = %e, "failed to read response body");
        })?;
        info!(status, response_body_length = body.len(), "response received");

        if request.one_way {
            debug!("one-way request, response body ignored");
            return Ok(RawResponse::Empty);
        }
        Ok(RawResponse::from(body))
    }
}

impl Transport for HttpTransport {
    fn send(&mut self, request: &WireRequest) -> Result<RawResponse, SoapError> {
        Ok(self.post(request)?)
    }
}
