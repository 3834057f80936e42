/// User-Agent sent with every request, identifying this library and its version.
pub(crate) fn get_user_agent() -> String {
    format!("fetchserp-rust-sdk/{}", crate::VERSION)
}
