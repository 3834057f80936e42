//! HTTP client for the FetchSERP API.

use std::fmt;
use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, LOCATION, USER_AGENT},
    redirect::Policy,
    Method,
};
use serde_json::Value;
use url::Url;

use crate::{
    config::ClientConfig,
    query::{Params, Query},
    response::Response,
    user_agent::get_user_agent,
    Error,
};

/// Requests sent for one call, counting the first request and every redirect hop.
const MAX_REDIRECTS: u8 = 5;

/// HTTP client for the FetchSERP API.
///
/// Authenticates with a static bearer token. Redirects are followed by the
/// client itself, up to five requests per call, re-sending the same method
/// and headers to each new location.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: Url,
    timeout: Duration,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client pointing at the production FetchSERP API.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        Self::from_config(ClientConfig::new(api_key))
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, Error> {
        Self::from_config(ClientConfig::new(api_key).with_base_url(base_url))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, Error> {
        let base_url = config.validate()?;
        let http = reqwest::Client::builder()
            .redirect(Policy::none())
            .connect_timeout(config.timeout)
            .read_timeout(config.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Request(e)
            })?;
        let client = Self {
            http,
            api_key: config.api_key,
            base_url,
            timeout: config.timeout,
        };
        // Reject keys that cannot be sent as a header value up front.
        client.headers()?;
        Ok(client)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = self.base_url.join(path).map_err(|e| {
            tracing::error!("Invalid URL constructed from path {:?}: {}", path, e);
            Error::Validation(format!("invalid path {:?}: {}", path, e))
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    /// URL of `prefix` with `segment` appended as a single percent-encoded path segment.
    pub(crate) fn segment_url(&self, prefix: &str, segment: &str) -> Result<Url, Error> {
        // Url::path_segments_mut silently skips these.
        if matches!(segment, "." | "..") {
            return Err(Error::Validation(format!("invalid path segment {:?}", segment)));
        }
        let mut url = self.get_url(prefix, None::<&Params>)?;
        url.path_segments_mut()
            .map_err(|_| Error::Validation(format!("invalid path {:?}", prefix)))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    fn headers(&self) -> Result<HeaderMap, Error> {
        let auth = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| Error::Validation("api_key contains invalid characters".to_string()))?;
        let user_agent = HeaderValue::from_str(&get_user_agent())
            .map_err(|_| Error::Validation("invalid user agent".to_string()))?;

        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, user_agent);
        Ok(headers)
    }

    /// Sends one API request and returns the parsed response.
    ///
    /// `query` is appended to any query string already in `path`, with null
    /// values dropped and list values repeated per element. `body` is sent
    /// as JSON text on POST; GET never sends a body. Only GET and POST are
    /// accepted, other methods fail before anything is sent.
    ///
    /// Any final status >= 400 fails with [`Error::HttpStatus`] carrying the
    /// raw response text.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Option<&Params>,
        body: Option<&Value>,
    ) -> Result<Response, Error> {
        if method != Method::GET && method != Method::POST {
            return Err(Error::UnsupportedMethod(method));
        }
        let url = self.get_url(path, query)?;
        self.dispatch(method, url, body).await
    }

    /// Sends a GET or POST to an already built URL and classifies the result.
    pub(crate) async fn dispatch(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Response, Error> {
        let body = body.filter(|value| method == Method::POST && !value.is_null());

        let resp = self.send_following_redirects(method, url, body).await?;

        let status = resp.status();
        if status.as_u16() >= 400 {
            let body = resp.text().await.map_err(|e| {
                tracing::error!("Failed to read response body: {}", e);
                Error::Request(e)
            })?;
            tracing::error!(
                "Request failed with status {}: {}",
                status,
                truncate_body(&body)
            );
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Response::from_reqwest(resp).await
    }

    /// Dispatches the request and follows 3xx responses until a
    /// non-redirect response arrives or the budget runs out.
    ///
    /// Follow-up requests are fresh: same method and headers, no body.
    /// Redirect response bodies are discarded.
    async fn send_following_redirects(
        &self,
        method: Method,
        mut url: Url,
        mut body: Option<&Value>,
    ) -> Result<reqwest::Response, Error> {
        let mut remaining = MAX_REDIRECTS;
        loop {
            if remaining == 0 {
                tracing::error!("Too many redirects, last location {}", url);
                return Err(Error::TooManyRedirects);
            }

            tracing::debug!("{} {}", method, url);
            let mut request = self
                .http
                .request(method.clone(), url.clone())
                .headers(self.headers()?);
            if let Some(body) = body.take() {
                request = request.json(body);
            }
            let resp = request.send().await.map_err(|e| {
                tracing::error!("Failed to send request to {}: {}", url, e);
                Error::Request(e)
            })?;

            if !resp.status().is_redirection() {
                return Ok(resp);
            }
            url = redirect_target(&url, &resp)?;
            tracing::debug!("Following {} redirect to {}", resp.status(), url);
            remaining -= 1;
        }
    }

    pub(crate) async fn get(&self, path: &str, params: Option<&Params>) -> Result<Response, Error> {
        self.execute(Method::GET, path, params, None).await
    }

    pub(crate) async fn post(&self, path: &str, params: &Params) -> Result<Response, Error> {
        self.execute(Method::POST, path, None, Some(&params.to_json())).await
    }
}

/// Resolves the `Location` of a redirect response against the URL that produced it.
fn redirect_target(current: &Url, resp: &reqwest::Response) -> Result<Url, Error> {
    let location = resp
        .headers()
        .get(LOCATION)
        .ok_or_else(|| {
            Error::InvalidRedirect(format!("{} response without Location header", resp.status()))
        })?
        .to_str()
        .map_err(|e| Error::InvalidRedirect(format!("unreadable Location header: {}", e)))?;
    current.join(location).map_err(|e| {
        tracing::error!("Malformed redirect location {:?}: {}", location, e);
        Error::InvalidRedirect(format!("{:?}: {}", location, e))
    })
}

/// Shortens a body for logging.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    match body.char_indices().nth(MAX) {
        None => body.to_string(),
        Some((end, _)) => format!("{}...[truncated]", &body[..end]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::with_base_url("test-key", "https://example.com").unwrap()
    }

    #[test]
    fn headers_are_exactly_the_three_required() {
        let headers = client().headers().unwrap();
        assert_eq!(headers.len(), 3);
        assert_eq!(headers[AUTHORIZATION], "Bearer test-key");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(
            headers[USER_AGENT].to_str().unwrap(),
            format!("fetchserp-rust-sdk/{}", crate::VERSION)
        );
    }

    #[test]
    fn path_replaces_base_path() {
        let client = Client::with_base_url("k", "https://example.com/ignored/").unwrap();
        let url = client.get_url("/api/v1/serp", None::<&Params>).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/v1/serp");
    }

    #[test]
    fn query_is_merged_after_existing_entries() {
        let params = Params::new()
            .with("query", "seo")
            .with_opt("country", None::<&str>)
            .with_list("tags", ["a", "b"]);
        let url = client()
            .get_url("/api/v1/serp?search_engine=google", Some(&params))
            .unwrap();
        insta::assert_snapshot!(url.as_str(), @"https://example.com/api/v1/serp?search_engine=google&query=seo&tags=a&tags=b");
    }

    #[test]
    fn segment_url_encodes_one_segment() {
        let client = client();
        let url = client.segment_url("/api/v1/serp_js", "../user").unwrap();
        assert_eq!(url.path(), "/api/v1/serp_js/..%2Fuser");

        let url = client.segment_url("/api/v1/serp_js", "abc?x=1#frag").unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/v1/serp_js/abc%3Fx=1%23frag");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn segment_url_rejects_dot_segments() {
        for segment in [".", ".."] {
            let err = client().segment_url("/api/v1/serp_js", segment).unwrap_err();
            assert!(err.is_validation());
        }
    }

    #[test]
    fn blank_api_key_fails_construction() {
        assert!(Client::new("").unwrap_err().is_validation());
        assert!(Client::new("  ").unwrap_err().is_validation());
    }

    #[test]
    fn api_key_with_newline_fails_construction() {
        let err = Client::new("abc\ndef").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn timeout_is_kept_from_config() {
        let client =
            Client::from_config(ClientConfig::new("k").with_timeout(Duration::from_secs(3)))
                .unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(3));
        assert_eq!(client.base_url().as_str(), "https://www.fetchserp.com/");
    }

    #[test]
    fn debug_hides_api_key() {
        assert!(!format!("{:?}", client()).contains("test-key"));
    }

    #[test]
    fn truncate_body_limits_length() {
        assert_eq!(truncate_body("short"), "short");
        let long = "é".repeat(2500);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("...[truncated]"));
        assert_eq!(truncated.chars().count(), 2000 + "...[truncated]".len());
    }

    #[tokio::test]
    async fn unsupported_method_fails_before_sending() {
        // Unroutable base URL: any network attempt would surface as Error::Request.
        let client = Client::with_base_url("k", "http://127.0.0.1:9").unwrap();
        for method in [Method::PUT, Method::DELETE, Method::PATCH, Method::HEAD] {
            let err = client
                .execute(method.clone(), "/api/v1/serp", None, None)
                .await
                .unwrap_err();
            assert!(matches!(err, Error::UnsupportedMethod(m) if m == method));
        }
    }
}
