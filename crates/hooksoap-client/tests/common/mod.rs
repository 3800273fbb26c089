//! A scripted SOAP engine and an in-memory transport for driving
//! `HookableClient` without a network.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use hooksoap_client::{
    CallArguments, CallContext, CallOutcome, RawResponse, RequestHandler, SoapEngine, SoapError,
    SoapHeader, SoapVersion, Transport, WireRequest,
};

pub const ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const SERVICE_NS: &str = "urn:example:service";
pub const DEFAULT_LOCATION: &str = "http://localhost/service";

/// Builds a SOAP 1.1 envelope for the operation and returns whatever string
/// the request handler gives back as the result.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    /// Function names in the order the engine saw them.
    pub operations: Vec<String>,
    pub output_headers: Vec<SoapHeader>,
    /// Physical requests per call.
    pub requests_per_call: usize,
    pub malformed_request: bool,
    pub one_way: bool,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            requests_per_call: 1,
            ..Self::default()
        }
    }

    fn envelope(&self, call: &CallContext<String>) -> String {
        if self.malformed_request {
            return format!("<SOAP-ENV:Envelope><{}>", call.function_name());
        }

        let namespace = call
            .options()
            .target_namespace_uri()
            .unwrap_or(SERVICE_NS);
        let arguments: String = match call.arguments() {
            CallArguments::Positional(values) => values
                .iter()
                .map(|value| format!("<arg>{value}</arg>"))
                .collect(),
            CallArguments::Named(values) => values
                .iter()
                .map(|(name, value)| format!("<{name}>{value}</{name}>"))
                .collect(),
        };

        format!(
            r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="{ENVELOPE_NS}" xmlns:ns1="{namespace}"><SOAP-ENV:Body><ns1:{name}>{arguments}</ns1:{name}></SOAP-ENV:Body></SOAP-ENV:Envelope>"#,
            name = call.function_name(),
        )
    }
}

impl SoapEngine for ScriptedEngine {
    type Value = String;

    fn perform_call(
        &mut self,
        call: &CallContext<String>,
        requests: &mut dyn RequestHandler,
    ) -> Result<CallOutcome<String>, SoapError> {
        self.operations.push(call.function_name().to_owned());

        let mut result = String::new();
        for _ in 0..self.requests_per_call {
            let request = WireRequest {
                xml: self.envelope(call),
                uri: Some(
                    call.options()
                        .location()
                        .unwrap_or(DEFAULT_LOCATION)
                        .to_owned(),
                ),
                action: call.options().action().map(str::to_owned),
                version: SoapVersion::Soap11,
                one_way: self.one_way,
            };
            result = requests.do_request(request)?;
        }

        Ok(CallOutcome::new(result).with_output_headers(self.output_headers.clone()))
    }
}

/// Either echoes the request XML back or replays scripted replies in order.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    pub sent: Vec<WireRequest>,
    replies: VecDeque<RawResponse>,
}

impl MemoryTransport {
    pub fn echo() -> Self {
        Self::default()
    }

    pub fn replying(replies: impl IntoIterator<Item = RawResponse>) -> Self {
        Self {
            sent: Vec::new(),
            replies: replies.into_iter().collect(),
        }
    }
}

impl Transport for MemoryTransport {
    fn send(&mut self, request: &WireRequest) -> Result<RawResponse, SoapError> {
        self.sent.push(request.clone());
        Ok(self
            .replies
            .pop_front()
            .unwrap_or_else(|| RawResponse::Text(request.xml.clone())))
    }
}

/// Shared event log for closures handed to `FnHooks`.
#[derive(Debug, Clone, Default)]
pub struct Events(Rc<RefCell<Vec<String>>>);

impl Events {
    pub fn push(&self, event: impl Into<String>) {
        self.0.borrow_mut().push(event.into());
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}
