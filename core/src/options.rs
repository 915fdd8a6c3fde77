//! Per-call and per-client options, and their translation to wire headers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Header map sent with a request. Names are case-sensitive.
pub type Headers = BTreeMap<String, String>;

/// Request-modifying hints supplied by the caller.
///
/// Locale and auth fields become headers (see [`options_to_headers`]);
/// `query` and `meta` are read directly by the request builder. Field names
/// deserialize from the camelCase keys the SDK has always used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Client token, sent as a bearer `Authorization` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    /// Customer token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(rename = "reCAPTCHA", skip_serializing_if = "Option::is_none")]
    pub recaptcha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_language: Option<String>,
    /// Raw headers; these win over any derived header of the same name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    pub fn client(mut self, token: impl Into<String>) -> Self {
        self.client = Some(token.into());
        self
    }

    pub fn customer(mut self, token: impl Into<String>) -> Self {
        self.customer = Some(token.into());
        self
    }

    pub fn recaptcha(mut self, response: impl Into<String>) -> Self {
        self.recaptcha = Some(response.into());
        self
    }

    pub fn debug_language(mut self, language: impl Into<String>) -> Self {
        self.debug_language = Some(language.into());
        self
    }

    /// Add one raw header override.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.get_or_insert_with(Headers::new).insert(name.into(), value.into());
        self
    }

    /// Add one query parameter. Insertion order is kept.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.get_or_insert_with(Map::new).insert(key.into(), value.into());
        self
    }

    /// Attach caller metadata that travels with the descriptor but is never sent.
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.get_or_insert_with(Map::new).insert(key.into(), value.into());
        self
    }
}

/// Translate options into request headers.
///
/// Absent fields produce no header. Raw `headers` are merged last and
/// override derived headers on collision.
pub fn options_to_headers(options: &Options) -> Headers {
    let mut headers = Headers::new();

    let derived = [
        ("Accept-Language", options.language.clone()),
        ("Accept-Currency", options.currency.clone()),
        ("Accept-Time-Zone", options.time_zone.clone()),
        ("Authorization", options.client.as_ref().map(|token| format!("Bearer {token}"))),
        ("Authorization-Customer", options.customer.clone()),
        ("reCAPTCHA-Response", options.recaptcha.clone()),
        ("Accept-Debug-Language", options.debug_language.clone()),
    ];
    for (name, value) in derived {
        if let Some(value) = value {
            headers.insert(name.to_string(), value);
        }
    }

    if let Some(raw) = &options.headers {
        headers.extend(raw.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_option_maps_to_its_header() {
        let options = Options::new()
            .language("ko")
            .currency("KRW")
            .time_zone("Asia/Seoul")
            .client("client-token")
            .customer("customer-token")
            .recaptcha("captcha")
            .debug_language("en");

        let headers = options_to_headers(&options);
        assert_eq!(headers.len(), 7);
        assert_eq!(headers["Accept-Language"], "ko");
        assert_eq!(headers["Accept-Currency"], "KRW");
        assert_eq!(headers["Accept-Time-Zone"], "Asia/Seoul");
        assert_eq!(headers["Authorization"], "Bearer client-token");
        assert_eq!(headers["Authorization-Customer"], "customer-token");
        assert_eq!(headers["reCAPTCHA-Response"], "captcha");
        assert_eq!(headers["Accept-Debug-Language"], "en");
    }

    #[test]
    fn empty_options_produce_no_headers() {
        assert!(options_to_headers(&Options::default()).is_empty());
    }

    #[test]
    fn query_and_meta_do_not_become_headers() {
        let options = Options::new().query("limit", 10).meta("trace", "abc");
        assert!(options_to_headers(&options).is_empty());
    }

    #[test]
    fn raw_headers_override_derived_ones() {
        let options = Options::new()
            .language("ko")
            .client("token")
            .header("Accept-Language", "en")
            .header("X-Extra", "1");

        let headers = options_to_headers(&options);
        assert_eq!(headers["Accept-Language"], "en");
        assert_eq!(headers["Authorization"], "Bearer token");
        assert_eq!(headers["X-Extra"], "1");
    }

    #[test]
    fn deserializes_sdk_option_names() {
        let options: Options = serde_json::from_str(
            r#"{"timeZone":"UTC","reCAPTCHA":"r","debugLanguage":"en","query":{"fields":"name"},"unknown":1}"#,
        )
        .unwrap();
        assert_eq!(options.time_zone.as_deref(), Some("UTC"));
        assert_eq!(options.recaptcha.as_deref(), Some("r"));
        assert_eq!(options.debug_language.as_deref(), Some("en"));
        assert_eq!(options.query.unwrap()["fields"], "name");
    }
}
