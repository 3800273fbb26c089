use hooksoap_xml::{Document, XmlError};
use tracing::{debug, debug_span, warn};

use crate::{
    CallContext, EnabledHooks, RawResponse, RequestContext, RequestHandler, ResponseContext,
    SoapError, SoapHooks, Transport, WireRequest,
};

/// Runs the request phase for every physical request the engine issues
/// during one call.
///
/// Per request: parse the outbound XML, `on_before_request`, transport, then
/// either the raw body (no response hook enabled) or parse plus
/// `on_response` / `on_response_parse_failed`. Any hook or transport error
/// stops the request where it is.
pub struct RequestPipeline<'c, 'p, V, H, T> {
    call: &'c CallContext<V>,
    hooks: &'p mut H,
    transport: &'p mut T,
    enabled: EnabledHooks,
    last_response: Option<ResponseContext<'c, V>>,
    requests_sent: usize,
}

impl<'c, 'p, V, H, T> RequestPipeline<'c, 'p, V, H, T>
where
    H: SoapHooks<V>,
    T: Transport,
{
    pub fn new(
        call: &'c CallContext<V>,
        hooks: &'p mut H,
        transport: &'p mut T,
        enabled: EnabledHooks,
    ) -> Self {
        Self {
            call,
            hooks,
            transport,
            enabled,
            last_response: None,
            requests_sent: 0,
        }
    }

    pub fn requests_sent(&self) -> usize {
        self.requests_sent
    }

    /// The response context of the most recent request that built one.
    pub fn into_last_response(self) -> Option<ResponseContext<'c, V>> {
        self.last_response
    }

    fn handle_response(
        &mut self,
        raw: RawResponse,
        request: RequestContext<'c, V>,
    ) -> Result<String, SoapError> {
        let document = match raw {
            RawResponse::Empty => None,
            RawResponse::Document(document) => Some(document),
            RawResponse::Text(text) => {
                let body = text.trim();
                if body.is_empty() {
                    None
                } else {
                    match Document::parse(body) {
                        Ok(document) => Some(document),
                        Err(error) => return self.recover(&text, &request, &error),
                    }
                }
            }
        };

        debug!(has_document = document.is_some(), "response parsed");
        let mut response = ResponseContext::new(document, request);
        if self.enabled.response {
            debug!("calling on_response");
            self.hooks.on_response(&mut response)?;
        }

        let body = response.to_wire_string();
        self.last_response = Some(response);
        Ok(body)
    }

    /// Unparseable responses always end up as a string for the engine.
    fn recover(
        &mut self,
        raw: &str,
        request: &RequestContext<'c, V>,
        error: &XmlError,
    ) -> Result<String, SoapError> {
        if self.enabled.response_parse_failed {
            debug!(%error, "calling on_response_parse_failed");
            return self.hooks.on_response_parse_failed(raw, request, error);
        }

        warn!(
            %error,
            "response is not valid XML and no parse-failure hook is enabled; passing the raw body through"
        );
        Ok(raw.to_owned())
    }
}

impl<V, H, T> RequestHandler for RequestPipeline<'_, '_, V, H, T>
where
    H: SoapHooks<V>,
    T: Transport,
{
    fn do_request(&mut self, request: WireRequest) -> Result<String, SoapError> {
        self.requests_sent += 1;
        let span = debug_span!(
            "soap.request",
            index = self.requests_sent,
            uri = ?request.uri,
            action = ?request.action,
            version = %request.version,
            one_way = request.one_way,
        );
        let _enter = span.enter();

        let mut context = RequestContext::from_wire(request, self.call)?;

        if self.enabled.before_request {
            debug!("calling on_before_request");
            self.hooks.on_before_request(&mut context)?;
        } else {
            debug!("on_before_request not enabled, skipped");
        }

        let raw = self.transport.send(&context.to_wire())?;

        if !self.enabled.parses_response() {
            debug!("no response hook enabled, fast path");
            return Ok(raw.into_wire_string());
        }

        self.handle_response(raw, context)
    }
}
