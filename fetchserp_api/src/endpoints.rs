//! One method per FetchSERP endpoint.
//!
//! GET endpoints forward their [`Params`] as query parameters, the two
//! JavaScript-rendering scrapers send them as a JSON object body. The keys
//! listed for each endpoint are the ones the API recognizes; anything else in
//! the bag is forwarded unchanged.

use reqwest::Method;

use crate::{query::Params, response::Response, Client, Error};

impl Client {
    /// Backlinks pointing at a domain.
    ///
    /// Keys: `domain`, `search_engine`, `country`, `pages_number`.
    pub async fn backlinks(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/backlinks", Some(params)).await
    }

    /// Email addresses found for a domain.
    ///
    /// Keys: `domain`, `search_engine`, `country`, `pages_number`.
    pub async fn domain_emails(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/domain_emails", Some(params)).await
    }

    /// DNS, WHOIS, SSL and technology stack of a domain. Keys: `domain`.
    pub async fn domain_infos(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/domain_infos", Some(params)).await
    }

    /// Keys: `keywords` (list), `country`.
    pub async fn keywords_search_volume(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/keywords_search_volume", Some(params)).await
    }

    /// Keys: `url` or `keywords` (list), `country`.
    pub async fn keywords_suggestions(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/keywords_suggestions", Some(params)).await
    }

    /// Keys: `keyword`, `search_intent`, `count`.
    pub async fn long_tail_keywords_generator(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/long_tail_keywords_generator", Some(params)).await
    }

    /// Whether a domain is indexed for a keyword. Keys: `domain`, `keyword`.
    pub async fn page_indexation(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/page_indexation", Some(params)).await
    }

    /// Ranking of a domain for a keyword.
    ///
    /// Keys: `keyword`, `domain`, `search_engine`, `country`, `pages_number`.
    pub async fn ranking(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/ranking", Some(params)).await
    }

    /// Raw HTML of a page, without JavaScript. Keys: `url`.
    pub async fn scrape(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/scrape", Some(params)).await
    }

    /// Keys: `domain`, `max_pages`.
    pub async fn scrape_domain(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/scrape_domain", Some(params)).await
    }

    /// Scrapes a page after running JavaScript. Sent as a JSON body.
    ///
    /// Keys: `url`, `js_script`.
    pub async fn scrape_js(&self, params: &Params) -> Result<Response, Error> {
        self.post("/api/v1/scrape_js", params).await
    }

    /// Same as [`Client::scrape_js`], routed through a proxy in `country`.
    ///
    /// Keys: `url`, `country`, `js_script`.
    pub async fn scrape_js_with_proxy(&self, params: &Params) -> Result<Response, Error> {
        self.post("/api/v1/scrape_js_with_proxy", params).await
    }

    /// Structured search engine results.
    ///
    /// Keys: `query`, `search_engine`, `country`, `pages_number`.
    pub async fn serp(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/serp", Some(params)).await
    }

    /// Search results with the full HTML of each page.
    ///
    /// Keys: `query`, `search_engine`, `country`, `pages_number`.
    pub async fn serp_html(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/serp_html", Some(params)).await
    }

    /// AI overview and AI mode answers for a query in a single call.
    ///
    /// Faster but less reliable than the two-step
    /// [`Client::serp_js`] / [`Client::serp_js_content`] flow.
    ///
    /// Keys: `query`, `country`.
    pub async fn serp_ai_mode(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/serp_ai_mode", Some(params)).await
    }

    /// Starts a JavaScript-rendered search. The response data holds the
    /// `uuid` to pass to [`Client::serp_js_content`].
    ///
    /// Keys: `query`, `country`, `pages_number`.
    pub async fn serp_js(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/serp_js", Some(params)).await
    }

    /// Fetches the result of a search started with [`Client::serp_js`].
    ///
    /// The job may still be running; polling is up to the caller. Fails with
    /// [`Error::Validation`] without sending anything when `uuid` is blank.
    /// The id is percent-encoded as a single path segment.
    pub async fn serp_js_content(&self, uuid: &str) -> Result<Response, Error> {
        // Whitespace-only ids are rejected too, not just empty ones.
        if uuid.trim().is_empty() {
            return Err(Error::Validation("uuid is required".to_string()));
        }
        let url = self.segment_url("/api/v1/serp_js", uuid)?;
        self.dispatch(Method::GET, url, None).await
    }

    /// Keys: `query`, `search_engine`, `country`, `pages_number`.
    pub async fn serp_text(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/serp_text", Some(params)).await
    }

    /// Account of the API key in use, including remaining credits.
    pub async fn user(&self) -> Result<Response, Error> {
        self.get("/api/v1/user", None).await
    }

    /// Keys: `url`, `prompt`.
    pub async fn web_page_ai_analysis(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/web_page_ai_analysis", Some(params)).await
    }

    /// Keys: `url`.
    pub async fn web_page_seo_analysis(&self, params: &Params) -> Result<Response, Error> {
        self.get("/api/v1/web_page_seo_analysis", Some(params)).await
    }
}
