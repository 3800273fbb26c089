//! A SOAP client wrapper with four interception points around every call.
//!
//! [`HookableClient`] sits between calling code and a [`SoapEngine`] (argument
//! marshalling, envelope generation) and a [`Transport`] (the wire). Each call
//! runs through:
//!
//! 1. [`SoapHooks::on_before_call`] with the mutable [`CallContext`],
//! 2. the engine, which hands every physical request to the pipeline:
//!    [`SoapHooks::on_before_request`], the transport, then
//!    [`SoapHooks::on_response`] or [`SoapHooks::on_response_parse_failed`],
//! 3. [`SoapHooks::on_after_call`] with the unmarshalled result.
pub mod call;
pub mod client;
pub mod engine;
pub mod header;
pub mod hooks;
pub mod options;
pub mod pipeline;
pub mod request;
pub mod response;

pub use call::{CallArguments, CallContext};
pub use client::{CallReply, HookableClient};
pub use engine::{CallOutcome, RequestHandler, SoapEngine, Transport};
pub use header::{HeaderCollection, HeaderPayload, SoapHeader};
pub use hooks::{EnabledHooks, FnHooks, NoHooks, SoapHooks};
pub use options::CallOptions;
pub use request::{RequestContext, SoapVersion, WireRequest};
pub use response::{RawResponse, ResponseContext};

pub use hooksoap_xml as xml;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum SoapError {
    /// The engine generated outbound XML that does not parse. Never user-correctable.
    #[error("Failed to parse request XML: {source}")]
    MalformedRequest {
        #[source]
        source: hooksoap_xml::XmlError,
    },

    #[error("Invalid SOAP header at index {index}: {reason}")]
    InvalidHeader { index: usize, reason: &'static str },

    #[error("Unknown SOAP version: {0}")]
    UnknownVersion(i32),

    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("SOAP engine error: {0}")]
    Engine(String),

    #[error("Hook failed: {0}")]
    Hook(#[source] BoxError),
}

impl SoapError {
    pub fn transport(error: impl Into<BoxError>) -> Self {
        SoapError::Transport(error.into())
    }

    pub fn hook(error: impl Into<BoxError>) -> Self {
        SoapError::Hook(error.into())
    }

    /// Programming or engine faults that no caller or hook can recover from.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SoapError::MalformedRequest { .. })
    }
}

pub type SoapResult<T> = Result<T, SoapError>;
