use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const LOCATION_KEY: &str = "location";
pub const URI_KEY: &str = "uri";
pub const SOAP_ACTION_KEY: &str = "soapaction";

/// Per-call overrides handed to the engine alongside the arguments.
///
/// Only fields the caller actually supplied are set; nothing here has a
/// default, so the engine's own configuration applies to every `None`.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, typed_builder::TypedBuilder,
)]
pub struct CallOptions {
    /// Target URI for the request.
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,

    /// Target namespace URI for the generated request document.
    #[builder(default, setter(into, strip_option))]
    #[serde(rename = "uri", default, skip_serializing_if = "Option::is_none")]
    target_namespace_uri: Option<String>,

    /// SOAP action for the request.
    #[builder(default, setter(into, strip_option))]
    #[serde(rename = "soapaction", default, skip_serializing_if = "Option::is_none")]
    action: Option<String>,
}

impl CallOptions {
    pub fn new(
        location: Option<String>,
        target_namespace_uri: Option<String>,
        action: Option<String>,
    ) -> Self {
        Self {
            location,
            target_namespace_uri,
            action,
        }
    }

    /// Reads the sparse `location` / `uri` / `soapaction` mapping. Other keys
    /// belong to the engine and are ignored here.
    pub fn from_map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut options = Self::default();
        for (key, value) in entries {
            match key.as_ref() {
                LOCATION_KEY => options.location = Some(value.into()),
                URI_KEY => options.target_namespace_uri = Some(value.into()),
                SOAP_ACTION_KEY => options.action = Some(value.into()),
                _ => {}
            }
        }
        options
    }

    /// The sparse mapping form: only fields that are set appear.
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        [
            (LOCATION_KEY, &self.location),
            (URI_KEY, &self.target_namespace_uri),
            (SOAP_ACTION_KEY, &self.action),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|value| (key, value)))
        .collect()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn set_location(&mut self, location: Option<String>) -> &mut Self {
        self.location = location;
        self
    }

    pub fn target_namespace_uri(&self) -> Option<&str> {
        self.target_namespace_uri.as_deref()
    }

    pub fn set_target_namespace_uri(&mut self, uri: Option<String>) -> &mut Self {
        self.target_namespace_uri = uri;
        self
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn set_action(&mut self, action: Option<String>) -> &mut Self {
        self.action = action;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.target_namespace_uri.is_none() && self.action.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_map_only_sets_provided_keys() {
        let options = CallOptions::from_map([("soapaction", "urn:Ping"), ("trace", "1")]);

        assert_eq!(options.action(), Some("urn:Ping"));
        assert_eq!(options.location(), None);
        assert_eq!(options.target_namespace_uri(), None);
    }

    #[test]
    fn test_to_map_is_sparse() {
        let options = CallOptions::builder()
            .location("http://example.com/service")
            .build();

        let map = options.to_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("location").map(String::as_str), Some("http://example.com/service"));
    }

    #[test]
    fn test_map_round_trip() {
        let options = CallOptions::new(
            Some("http://example.com".to_owned()),
            Some("urn:example".to_owned()),
            Some("urn:example#Add".to_owned()),
        );
        assert_eq!(CallOptions::from_map(options.to_map()), options);
    }

    #[test]
    fn test_empty_map_gives_empty_options() {
        let options = CallOptions::from_map(Vec::<(String, String)>::new());
        assert!(options.is_empty());
        assert!(options.to_map().is_empty());
    }

    #[test]
    fn test_serde_uses_sparse_mapping_keys() {
        let options = CallOptions::builder().target_namespace_uri("urn:x").build();
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json, serde_json::json!({ "uri": "urn:x" }));

        let back: CallOptions =
            serde_json::from_value(serde_json::json!({ "soapaction": "urn:x#Go" })).unwrap();
        assert_eq!(back.action(), Some("urn:x#Go"));
        assert_eq!(back.location(), None);
    }

    #[test]
    fn test_setters_chain() {
        let mut options = CallOptions::default();
        options
            .set_location(Some("http://a".to_owned()))
            .set_action(Some("urn:b".to_owned()));
        assert_eq!(options.location(), Some("http://a"));
        assert_eq!(options.action(), Some("urn:b"));

        options.set_location(None);
        assert_eq!(options.location(), None);
    }
}
