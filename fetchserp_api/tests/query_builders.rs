use fetchserp_api::{Params, Query};
use serde_json::json;
use url::Url;

fn base_url() -> Url {
    Url::parse("https://www.fetchserp.com/api/v1/serp").unwrap()
}

#[test]
fn serp_params() {
    let url = Params::new()
        .with("query", "best coffee")
        .with("search_engine", "bing")
        .with("country", "fr")
        .with("pages_number", 3)
        .add_to_url(&base_url());
    assert_eq!(
        url.query(),
        Some("query=best+coffee&search_engine=bing&country=fr&pages_number=3")
    );
}

#[test]
fn nil_values_never_reach_the_query() {
    let url = Params::new()
        .with_opt("country", None::<&str>)
        .with("query", "x")
        .with("pages_number", json!(null))
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(!query.contains("country"));
    assert!(!query.contains("pages_number"));
    assert_eq!(query, "query=x");
}

#[test]
fn list_values_repeat_the_key_in_order() {
    let keywords = ["zeta", "alpha", "mid"];
    let url = Params::new()
        .with_list("keywords", keywords)
        .add_to_url(&base_url());
    let values: Vec<String> = url
        .query_pairs()
        .filter(|(k, _)| k == "keywords")
        .map(|(_, v)| v.into_owned())
        .collect();
    assert_eq!(values, keywords);
}

#[test]
fn special_characters_are_encoded() {
    let url = Params::new()
        .with("query", "a&b=c d/é")
        .add_to_url(&base_url());
    assert_eq!(url.query(), Some("query=a%26b%3Dc+d%2F%C3%A9"));
    let (_, value) = url.query_pairs().next().unwrap();
    assert_eq!(value, "a&b=c d/é");
}

#[test]
fn params_from_pairs() {
    let params = Params::from([("domain", json!("example.com")), ("max_pages", json!(10))]);
    assert_eq!(params.get("max_pages"), Some(&json!(10)));
    assert_eq!(
        params.to_json(),
        json!({"domain": "example.com", "max_pages": 10})
    );
}
