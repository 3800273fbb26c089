use hooksoap_xml::XmlError;

use crate::{CallContext, HeaderCollection, RequestContext, ResponseContext, SoapError};

/// Which of the optional request-phase hooks a [`SoapHooks`] implementation
/// actually provides.
///
/// Read once when the client is built. A hook flagged off is never called,
/// and when neither response hook is on, responses are passed to the engine
/// without being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnabledHooks {
    pub before_request: bool,
    pub response: bool,
    pub response_parse_failed: bool,
}

impl EnabledHooks {
    pub const fn none() -> Self {
        Self {
            before_request: false,
            response: false,
            response_parse_failed: false,
        }
    }

    pub const fn all() -> Self {
        Self {
            before_request: true,
            response: true,
            response_parse_failed: true,
        }
    }

    /// Whether response bodies need to be parsed at all.
    pub const fn parses_response(self) -> bool {
        self.response || self.response_parse_failed
    }
}

/// Interception points around a SOAP call.
///
/// Every hook defaults to a no-op. An error returned from any hook aborts the
/// call and reaches the caller unchanged.
pub trait SoapHooks<V> {
    /// The request-phase hooks this implementation overrides. Hooks not
    /// flagged here are skipped even if they are implemented.
    fn enabled(&self) -> EnabledHooks;

    /// Before marshalling. Whatever the call context holds afterwards is what
    /// the engine receives.
    fn on_before_call(&mut self, call: &mut CallContext<V>) -> Result<(), SoapError> {
        let _ = call;
        Ok(())
    }

    /// After the request XML is built, before it is sent.
    fn on_before_request(&mut self, request: &mut RequestContext<'_, V>) -> Result<(), SoapError> {
        let _ = request;
        Ok(())
    }

    /// After the response is parsed, or found to be empty.
    fn on_response(&mut self, response: &mut ResponseContext<'_, V>) -> Result<(), SoapError> {
        let _ = response;
        Ok(())
    }

    /// The response did not parse as XML. The returned string replaces the
    /// raw body.
    fn on_response_parse_failed(
        &mut self,
        raw: &str,
        request: &RequestContext<'_, V>,
        error: &XmlError,
    ) -> Result<String, SoapError> {
        let _ = (request, error);
        Ok(raw.to_owned())
    }

    /// After the engine has unmarshalled the result. `response` is the last
    /// response context of the call, if one was built. Output headers changed
    /// here are the ones the caller sees.
    fn on_after_call(
        &mut self,
        result: V,
        response: Option<&ResponseContext<'_, V>>,
        output_headers: &mut HeaderCollection,
    ) -> Result<V, SoapError> {
        let _ = (response, output_headers);
        Ok(result)
    }
}

impl<V, H: SoapHooks<V> + ?Sized> SoapHooks<V> for Box<H> {
    fn enabled(&self) -> EnabledHooks {
        (**self).enabled()
    }

    fn on_before_call(&mut self, call: &mut CallContext<V>) -> Result<(), SoapError> {
        (**self).on_before_call(call)
    }

    fn on_before_request(&mut self, request: &mut RequestContext<'_, V>) -> Result<(), SoapError> {
        (**self).on_before_request(request)
    }

    fn on_response(&mut self, response: &mut ResponseContext<'_, V>) -> Result<(), SoapError> {
        (**self).on_response(response)
    }

    fn on_response_parse_failed(
        &mut self,
        raw: &str,
        request: &RequestContext<'_, V>,
        error: &XmlError,
    ) -> Result<String, SoapError> {
        (**self).on_response_parse_failed(raw, request, error)
    }

    fn on_after_call(
        &mut self,
        result: V,
        response: Option<&ResponseContext<'_, V>>,
        output_headers: &mut HeaderCollection,
    ) -> Result<V, SoapError> {
        (**self).on_after_call(result, response, output_headers)
    }
}

/// No interception at all; every response takes the fast path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<V> SoapHooks<V> for NoHooks {
    fn enabled(&self) -> EnabledHooks {
        EnabledHooks::none()
    }
}

type BeforeCallFn<V> = Box<dyn FnMut(&mut CallContext<V>) -> Result<(), SoapError>>;
type BeforeRequestFn<V> = Box<dyn FnMut(&mut RequestContext<'_, V>) -> Result<(), SoapError>>;
type ResponseFn<V> = Box<dyn FnMut(&mut ResponseContext<'_, V>) -> Result<(), SoapError>>;
type ParseFailedFn<V> =
    Box<dyn FnMut(&str, &RequestContext<'_, V>, &XmlError) -> Result<String, SoapError>>;
type AfterCallFn<V> = Box<
    dyn FnMut(V, Option<&ResponseContext<'_, V>>, &mut HeaderCollection) -> Result<V, SoapError>,
>;

/// Hooks assembled from closures. A request-phase hook is enabled exactly
/// when its closure is set.
///
/// ```
/// use hooksoap_client::{EnabledHooks, FnHooks, SoapHooks};
///
/// let hooks = FnHooks::<String>::new().response(|response| {
///     response.set_document(None);
///     Ok(())
/// });
/// let enabled = SoapHooks::<String>::enabled(&hooks);
/// assert!(enabled.response);
/// assert!(!enabled.before_request);
/// ```
pub struct FnHooks<V> {
    before_call: Option<BeforeCallFn<V>>,
    before_request: Option<BeforeRequestFn<V>>,
    response: Option<ResponseFn<V>>,
    response_parse_failed: Option<ParseFailedFn<V>>,
    after_call: Option<AfterCallFn<V>>,
}

impl<V> Default for FnHooks<V> {
    fn default() -> Self {
        Self {
            before_call: None,
            before_request: None,
            response: None,
            response_parse_failed: None,
            after_call: None,
        }
    }
}

impl<V> FnHooks<V> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn before_call<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut CallContext<V>) -> Result<(), SoapError> + 'static,
    {
        self.before_call = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn before_request<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut RequestContext<'_, V>) -> Result<(), SoapError> + 'static,
    {
        self.before_request = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn response<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut ResponseContext<'_, V>) -> Result<(), SoapError> + 'static,
    {
        self.response = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn response_parse_failed<F>(mut self, f: F) -> Self
    where
        F: FnMut(&str, &RequestContext<'_, V>, &XmlError) -> Result<String, SoapError> + 'static,
    {
        self.response_parse_failed = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn after_call<F>(mut self, f: F) -> Self
    where
        F: FnMut(V, Option<&ResponseContext<'_, V>>, &mut HeaderCollection) -> Result<V, SoapError>
            + 'static,
    {
        self.after_call = Some(Box::new(f));
        self
    }
}

impl<V> std::fmt::Debug for FnHooks<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHooks")
            .field("before_call", &self.before_call.is_some())
            .field("before_request", &self.before_request.is_some())
            .field("response", &self.response.is_some())
            .field("response_parse_failed", &self.response_parse_failed.is_some())
            .field("after_call", &self.after_call.is_some())
            .finish()
    }
}

impl<V> SoapHooks<V> for FnHooks<V> {
    fn enabled(&self) -> EnabledHooks {
        EnabledHooks {
            before_request: self.before_request.is_some(),
            response: self.response.is_some(),
            response_parse_failed: self.response_parse_failed.is_some(),
        }
    }

    fn on_before_call(&mut self, call: &mut CallContext<V>) -> Result<(), SoapError> {
        match &mut self.before_call {
            Some(f) => f(call),
            None => Ok(()),
        }
    }

    fn on_before_request(&mut self, request: &mut RequestContext<'_, V>) -> Result<(), SoapError> {
        match &mut self.before_request {
            Some(f) => f(request),
            None => Ok(()),
        }
    }

    fn on_response(&mut self, response: &mut ResponseContext<'_, V>) -> Result<(), SoapError> {
        match &mut self.response {
            Some(f) => f(response),
            None => Ok(()),
        }
    }

    fn on_response_parse_failed(
        &mut self,
        raw: &str,
        request: &RequestContext<'_, V>,
        error: &XmlError,
    ) -> Result<String, SoapError> {
        match &mut self.response_parse_failed {
            Some(f) => f(raw, request, error),
            None => Ok(raw.to_owned()),
        }
    }

    fn on_after_call(
        &mut self,
        result: V,
        response: Option<&ResponseContext<'_, V>>,
        output_headers: &mut HeaderCollection,
    ) -> Result<V, SoapError> {
        match &mut self.after_call {
            Some(f) => f(result, response, output_headers),
            None => Ok(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ResponseOnly;

    impl SoapHooks<u32> for ResponseOnly {
        fn enabled(&self) -> EnabledHooks {
            EnabledHooks {
                response: true,
                ..EnabledHooks::none()
            }
        }
    }

    #[test]
    fn test_parses_response_flag() {
        assert!(!EnabledHooks::none().parses_response());
        assert!(EnabledHooks::all().parses_response());
        assert!(
            EnabledHooks {
                response_parse_failed: true,
                ..EnabledHooks::default()
            }
            .parses_response()
        );
    }

    #[test]
    fn test_fn_hooks_enable_what_is_set() {
        let hooks = FnHooks::<u32>::new();
        assert_eq!(hooks.enabled(), EnabledHooks::none());

        let hooks = FnHooks::<u32>::new()
            .before_call(|_| Ok(()))
            .before_request(|_| Ok(()))
            .after_call(|result, _, _| Ok(result + 1));
        assert_eq!(
            hooks.enabled(),
            EnabledHooks {
                before_request: true,
                ..EnabledHooks::none()
            }
        );
    }

    #[test]
    fn test_defaults_pass_values_through() {
        let mut hooks = ResponseOnly;
        let mut headers = HeaderCollection::empty();
        assert_eq!(hooks.on_after_call(7, None, &mut headers).unwrap(), 7);
        assert!(hooks.enabled().parses_response());

        let mut boxed: Box<dyn SoapHooks<u32>> = Box::new(NoHooks);
        assert_eq!(boxed.enabled(), EnabledHooks::none());
        assert_eq!(boxed.on_after_call(3, None, &mut headers).unwrap(), 3);
    }
}
