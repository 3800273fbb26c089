use crate::{CallContext, RawResponse, SoapError, SoapHeader, WireRequest};

/// What the engine produced for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallOutcome<V> {
    pub result: V,
    pub output_headers: Vec<SoapHeader>,
}

impl<V> CallOutcome<V> {
    pub fn new(result: V) -> Self {
        Self {
            result,
            output_headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_output_headers(mut self, output_headers: Vec<SoapHeader>) -> Self {
        self.output_headers = output_headers;
        self
    }
}

/// Sends one physical request and returns the response string for the
/// engine to unmarshal. The client's pipeline implements this.
pub trait RequestHandler {
    fn do_request(&mut self, request: WireRequest) -> Result<String, SoapError>;
}

/// Marshalling and unmarshalling of SOAP operations.
///
/// `perform_call` turns the call context into request XML, hands every
/// physical request to `requests`, and unmarshals what comes back.
pub trait SoapEngine {
    type Value;

    fn perform_call(
        &mut self,
        call: &CallContext<Self::Value>,
        requests: &mut dyn RequestHandler,
    ) -> Result<CallOutcome<Self::Value>, SoapError>;
}

/// The wire. Replaceable, so that tests and custom channels can stand in for HTTP.
pub trait Transport {
    fn send(&mut self, request: &WireRequest) -> Result<RawResponse, SoapError>;
}

impl<F> Transport for F
where
    F: FnMut(&WireRequest) -> Result<RawResponse, SoapError>,
{
    fn send(&mut self, request: &WireRequest) -> Result<RawResponse, SoapError> {
        self(request)
    }
}

