//! Parsed API responses.
//!
//! A [`Response`] keeps the raw text of the body alongside a [`Body`] parsed
//! once at construction. JSON parsing is attempted only when the
//! `content-type` header mentions `json`; a body that fails to parse is kept
//! as [`Body::Unparsed`] instead of failing the call.

use std::ops::Index;

use reqwest::{header::HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::Error;

static NULL: Value = Value::Null;

/// Response body, parsed according to its declared content type.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// The body was declared as JSON and parsed successfully.
    Json(Value),
    /// The raw body text, either because it was not declared as JSON or
    /// because it failed to parse.
    Unparsed(String),
}

impl Body {
    fn parse(content_type: &str, text: &str) -> Body {
        if !content_type.to_ascii_lowercase().contains("json") {
            return Body::Unparsed(text.to_string());
        }
        match serde_json::from_str(text) {
            Ok(value) => Body::Json(value),
            Err(e) => {
                tracing::warn!("Response declared as JSON failed to parse, keeping raw text: {}", e);
                Body::Unparsed(text.to_string())
            }
        }
    }

    /// Borrowed view of this body.
    pub fn view(&self) -> BodyRef<'_> {
        match self {
            Body::Json(value) => BodyRef::Json(value),
            Body::Unparsed(text) => BodyRef::Unparsed(text),
        }
    }
}

/// Borrowed view of a [`Body`] or of a value inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyRef<'a> {
    Json(&'a Value),
    Unparsed(&'a str),
}

impl<'a> BodyRef<'a> {
    pub fn as_json(&self) -> Option<&'a Value> {
        match *self {
            BodyRef::Json(value) => Some(value),
            BodyRef::Unparsed(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            BodyRef::Json(_) => None,
            BodyRef::Unparsed(text) => Some(text),
        }
    }
}

/// A successful API response.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
    text: String,
    body: Body,
}

impl Response {
    /// Builds a response from its already-read parts.
    pub fn from_parts(status: StatusCode, headers: HeaderMap, url: Url, text: String) -> Self {
        let content_type = headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        let body = Body::parse(content_type, &text);
        Self {
            status,
            headers,
            url,
            text,
            body,
        }
    }

    /// Reads the body of a `reqwest` response and parses it.
    pub(crate) async fn from_reqwest(resp: reqwest::Response) -> Result<Self, Error> {
        let status = resp.status();
        let headers = resp.headers().clone();
        let url = resp.url().clone();
        let text = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Request(e)
        })?;
        Ok(Self::from_parts(status, headers, url, text))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// URL of the request that produced this response, after redirects.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Raw body text as received.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parsed body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// The conventional `data` field of the body.
    ///
    /// Returns `body["data"]` when the body is a JSON object with a `data`
    /// key, otherwise the whole body.
    pub fn data(&self) -> BodyRef<'_> {
        match &self.body {
            Body::Json(Value::Object(map)) => match map.get("data") {
                Some(data) => BodyRef::Json(data),
                None => self.body.view(),
            },
            body => body.view(),
        }
    }

    /// Looks up `key` in a JSON object body.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match &self.body {
            Body::Json(value) => value.get(key),
            Body::Unparsed(_) => None,
        }
    }

    /// Deserializes the whole body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        match &self.body {
            Body::Json(value) => Ok(serde::Deserialize::deserialize(value)?),
            Body::Unparsed(text) => Ok(serde_json::from_str(text)?),
        }
    }

    /// Deserializes [`Response::data`].
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, Error> {
        match self.data() {
            BodyRef::Json(value) => Ok(serde::Deserialize::deserialize(value)?),
            BodyRef::Unparsed(text) => Ok(serde_json::from_str(text)?),
        }
    }
}

impl Index<&str> for Response {
    type Output = Value;

    /// Missing keys and non-JSON bodies index to `Value::Null`.
    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderValue, CONTENT_TYPE};
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    fn response(content_type: Option<&str>, text: &str) -> Response {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_str(ct).unwrap());
        }
        Response::from_parts(
            StatusCode::OK,
            headers,
            Url::parse("https://www.fetchserp.com/api/v1/serp").unwrap(),
            text.to_string(),
        )
    }

    #[test]
    fn data_field_is_unwrapped() {
        let resp = response(Some("application/json"), r#"{"data":{"foo":1}}"#);
        assert_eq!(resp.body(), &Body::Json(json!({"data": {"foo": 1}})));
        assert_eq!(resp.data(), BodyRef::Json(&json!({"foo": 1})));
    }

    #[test]
    fn data_without_data_key_is_whole_body() {
        let resp = response(Some("application/json; charset=utf-8"), r#"{"foo":1}"#);
        assert_eq!(resp.data(), resp.body().view());
        assert_eq!(resp.data(), BodyRef::Json(&json!({"foo": 1})));
    }

    #[test]
    fn data_of_non_object_json_is_whole_body() {
        let resp = response(Some("application/json"), "[1,2]");
        assert_eq!(resp.data(), BodyRef::Json(&json!([1, 2])));
        assert_eq!(resp["data"], Value::Null);
    }

    #[test]
    fn null_data_value_is_returned_as_is() {
        let resp = response(Some("application/json"), r#"{"data":null}"#);
        assert_eq!(resp.data(), BodyRef::Json(&Value::Null));
    }

    #[test]
    fn text_plain_is_not_parsed() {
        let resp = response(Some("text/plain"), "hello");
        assert_eq!(resp.body(), &Body::Unparsed("hello".to_string()));
        assert_eq!(resp.data(), BodyRef::Unparsed("hello"));
        assert_eq!(resp.data().as_text(), Some("hello"));
    }

    #[test]
    fn json_looking_text_is_not_parsed_without_json_content_type() {
        let resp = response(Some("text/html"), r#"{"data":1}"#);
        assert_eq!(resp.body(), &Body::Unparsed(r#"{"data":1}"#.to_string()));
        assert!(resp.get("data").is_none());
    }

    #[test]
    fn missing_content_type_is_not_parsed() {
        let resp = response(None, r#"{"a":1}"#);
        assert!(matches!(resp.body(), Body::Unparsed(_)));
    }

    #[test]
    fn invalid_json_falls_back_to_raw_text() {
        let resp = response(Some("application/json"), "{not valid json}");
        assert_eq!(resp.body(), &Body::Unparsed("{not valid json}".to_string()));
        assert_eq!(resp.text(), "{not valid json}");
    }

    #[test]
    fn vendor_json_content_type_is_parsed() {
        let resp = response(Some("application/vnd.api+JSON"), r#"{"ok":true}"#);
        assert_eq!(resp["ok"], json!(true));
    }

    #[test]
    fn index_reads_body_keys() {
        let resp = response(Some("application/json"), r#"{"data":{"uuid":"abc"},"meta":2}"#);
        assert_eq!(resp["meta"], json!(2));
        assert_eq!(resp["data"]["uuid"], json!("abc"));
        assert_eq!(resp["missing"], Value::Null);
    }

    #[test]
    fn typed_helpers() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Job {
            uuid: String,
        }

        let resp = response(Some("application/json"), r#"{"data":{"uuid":"abc"}}"#);
        assert_eq!(
            resp.data_as::<Job>().unwrap(),
            Job {
                uuid: "abc".to_string()
            }
        );
        assert!(resp.json::<Job>().is_err());
        assert!(matches!(resp.json::<Job>().unwrap_err(), Error::Decode(_)));
    }
}
