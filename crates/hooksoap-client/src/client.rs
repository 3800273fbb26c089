use tracing::{debug, instrument};

use crate::pipeline::RequestPipeline;
use crate::{
    CallArguments, CallContext, CallOptions, EnabledHooks, HeaderCollection, SoapEngine,
    SoapError, SoapHooks, Transport,
};

/// Result of [`HookableClient::invoke_with_headers`].
#[derive(Debug, Clone, PartialEq)]
pub struct CallReply<V> {
    pub result: V,
    pub output_headers: HeaderCollection,
}

/// A SOAP client whose calls pass through a set of [`SoapHooks`].
///
/// Which request-phase hooks run is read from [`SoapHooks::enabled`] once,
/// in [`HookableClient::new`]. Calls take `&mut self`, so a client drives
/// one call at a time; use one client per thread.
#[derive(Debug)]
pub struct HookableClient<E, T, H> {
    engine: E,
    transport: T,
    hooks: H,
    enabled: EnabledHooks,
}

impl<E, T, H> HookableClient<E, T, H>
where
    E: SoapEngine,
    T: Transport,
    H: SoapHooks<E::Value>,
{
    pub fn new(engine: E, transport: T, hooks: H) -> Self {
        let enabled = hooks.enabled();
        debug!(?enabled, "hookable client created");
        Self {
            engine,
            transport,
            hooks,
            enabled,
        }
    }

    /// Calls the operation `name` and returns the result as `on_after_call`
    /// left it.
    pub fn invoke_operation(
        &mut self,
        name: impl Into<String>,
        arguments: CallArguments<E::Value>,
        options: CallOptions,
        input_headers: HeaderCollection,
    ) -> Result<E::Value, SoapError> {
        self.invoke_with_headers(name, arguments, options, input_headers)
            .map(|reply| reply.result)
    }

    /// Like [`Self::invoke_operation`], also returning the output headers.
    pub fn invoke_with_headers(
        &mut self,
        name: impl Into<String>,
        arguments: CallArguments<E::Value>,
        options: CallOptions,
        input_headers: HeaderCollection,
    ) -> Result<CallReply<E::Value>, SoapError> {
        let call = CallContext::new(name, arguments, options, input_headers);
        self.run(call)
    }

    /// Shortcut for an operation with positional arguments and no options or headers.
    pub fn call(
        &mut self,
        name: impl Into<String>,
        arguments: Vec<E::Value>,
    ) -> Result<E::Value, SoapError> {
        self.invoke_operation(
            name,
            CallArguments::Positional(arguments),
            CallOptions::default(),
            HeaderCollection::empty(),
        )
    }

    #[instrument(
        name = "soap.call",
        level = "debug",
        skip_all,
        fields(operation = %call.function_name()),
        err
    )]
    fn run(&mut self, mut call: CallContext<E::Value>) -> Result<CallReply<E::Value>, SoapError> {
        self.hooks.on_before_call(&mut call)?;
        debug!(operation = %call.function_name(), "calling engine");

        let mut pipeline =
            RequestPipeline::new(&call, &mut self.hooks, &mut self.transport, self.enabled);
        let outcome = self.engine.perform_call(&call, &mut pipeline)?;
        let requests_sent = pipeline.requests_sent();
        let last_response = pipeline.into_last_response();
        debug!(requests_sent, has_response = last_response.is_some(), "engine returned");

        let mut output_headers = HeaderCollection::new(outcome.output_headers)?;
        let result =
            self.hooks
                .on_after_call(outcome.result, last_response.as_ref(), &mut output_headers)?;

        Ok(CallReply {
            result,
            output_headers,
        })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Changing which hooks are enabled here has no effect; that was decided
    /// when the client was built.
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn enabled_hooks(&self) -> EnabledHooks {
        self.enabled
    }

    pub fn into_parts(self) -> (E, T, H) {
        (self.engine, self.transport, self.hooks)
    }
}
