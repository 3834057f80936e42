//! Async client for the FetchSERP SEO data API.
//!
//! ```no_run
//! # async fn run() -> Result<(), fetchserp_api::Error> {
//! use fetchserp_api::Params;
//!
//! let client = fetchserp_api::new("my-api-key")?;
//! let resp = client
//!     .serp(&Params::new().with("query", "rust").with("country", "us"))
//!     .await?;
//! println!("{:?}", resp.data());
//! # Ok(())
//! # }
//! ```
mod client;
mod config;
mod endpoints;
mod errors;
mod query;
mod response;
mod user_agent;
pub use self::client::Client;
pub use self::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use self::errors::Error;
pub use self::query::{Params, Query};
pub use self::response::{Body, BodyRef, Response};
pub use reqwest::Method;

/// Version of this library, sent in the User-Agent header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates a client for the production API. Shorthand for [`Client::new`].
pub fn new(api_key: &str) -> Result<Client, Error> {
    Client::new(api_key)
}
