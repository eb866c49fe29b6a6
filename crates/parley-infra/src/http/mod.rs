//! HTTP adapters for the reply and feedback services.
//!
//! Both talk JSON over reqwest to the same base URL: replies at
//! `/api/chat`, ratings at `/api/feedback`.

pub mod feedback;
pub mod reply;

/// Join `base_url` and an absolute `path` without doubling the slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        assert_eq!(endpoint("http://host:8000/", "/api/chat"), "http://host:8000/api/chat");
        assert_eq!(endpoint("http://host:8000", "/api/chat"), "http://host:8000/api/chat");
    }
}
