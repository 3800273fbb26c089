use crate::{CallOptions, HeaderCollection};

/// Arguments of a SOAP call, positional or named depending on how the engine
/// marshals the operation.
#[derive(Debug, Clone, PartialEq)]
pub enum CallArguments<V> {
    Positional(Vec<V>),
    Named(Vec<(String, V)>),
}

impl<V> Default for CallArguments<V> {
    fn default() -> Self {
        CallArguments::Positional(Vec::new())
    }
}

impl<V> CallArguments<V> {
    pub fn len(&self) -> usize {
        match self {
            CallArguments::Positional(values) => values.len(),
            CallArguments::Named(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Argument at `index`, in either form.
    pub fn get(&self, index: usize) -> Option<&V> {
        match self {
            CallArguments::Positional(values) => values.get(index),
            CallArguments::Named(values) => values.get(index).map(|(_, value)| value),
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut V> {
        match self {
            CallArguments::Positional(values) => values.get_mut(index),
            CallArguments::Named(values) => values.get_mut(index).map(|(_, value)| value),
        }
    }

    /// Named argument lookup; positional arguments have no names.
    pub fn get_named(&self, name: &str) -> Option<&V> {
        match self {
            CallArguments::Positional(_) => None,
            CallArguments::Named(values) => values
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value),
        }
    }

    /// Replaces the named argument in place, or appends it.
    ///
    /// Positional arguments are converted to named ones first, keyed by index.
    pub fn set_named(&mut self, name: impl Into<String>, value: V) {
        if let CallArguments::Positional(values) = self {
            let named = std::mem::take(values)
                .into_iter()
                .enumerate()
                .map(|(index, value)| (index.to_string(), value))
                .collect();
            *self = CallArguments::Named(named);
        }

        let name = name.into();
        if let CallArguments::Named(values) = self {
            match values.iter_mut().find(|(key, _)| *key == name) {
                Some((_, slot)) => *slot = value,
                None => values.push((name, value)),
            }
        }
    }

    /// Appends a value; named arguments get the next index as their name.
    pub fn push(&mut self, value: V) {
        match self {
            CallArguments::Positional(values) => values.push(value),
            CallArguments::Named(values) => {
                let name = values.len().to_string();
                values.push((name, value));
            }
        }
    }

    pub fn values(&self) -> Box<dyn Iterator<Item = &V> + '_> {
        match self {
            CallArguments::Positional(values) => Box::new(values.iter()),
            CallArguments::Named(values) => Box::new(values.iter().map(|(_, value)| value)),
        }
    }
}

impl<V> From<Vec<V>> for CallArguments<V> {
    fn from(value: Vec<V>) -> Self {
        CallArguments::Positional(value)
    }
}

/// Everything that describes one outer call, before marshalling.
///
/// A fresh context is built for each call and dropped when the call returns;
/// edits made in [`crate::SoapHooks::on_before_call`] are what the engine sees.
#[derive(Debug, Clone)]
pub struct CallContext<V> {
    function_name: String,
    arguments: CallArguments<V>,
    options: CallOptions,
    input_headers: HeaderCollection,
}

impl<V> CallContext<V> {
    pub fn new(
        function_name: impl Into<String>,
        arguments: CallArguments<V>,
        options: CallOptions,
        input_headers: HeaderCollection,
    ) -> Self {
        Self {
            function_name: function_name.into(),
            arguments,
            options,
            input_headers,
        }
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn set_function_name(&mut self, function_name: impl Into<String>) -> &mut Self {
        self.function_name = function_name.into();
        self
    }

    pub fn arguments(&self) -> &CallArguments<V> {
        &self.arguments
    }

    pub fn arguments_mut(&mut self) -> &mut CallArguments<V> {
        &mut self.arguments
    }

    pub fn options(&self) -> &CallOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut CallOptions {
        &mut self.options
    }

    pub fn input_headers(&self) -> &HeaderCollection {
        &self.input_headers
    }

    pub fn input_headers_mut(&mut self) -> &mut HeaderCollection {
        &mut self.input_headers
    }
}
