// src/utils/url.rs

//! Path and URL helpers for routing and purge targets.

use url::Url;

/// Check whether a request path or URL contains the notification route.
///
/// Only the path component is inspected when a full URL is given, so a
/// query string that happens to mention the route does not match.
pub fn path_matches_route(path_or_url: &str, route: &str) -> bool {
    if route.is_empty() {
        return false;
    }
    let path = match Url::parse(path_or_url) {
        Ok(url) => url.path().to_string(),
        Err(_) => strip_query(path_or_url).to_string(),
    };
    path.contains(route)
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

/// Join a site-relative path onto a listing path: `/blog` + `42` → `/blog/42`.
pub fn join_path(base: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        segment.trim_start_matches('/')
    )
}

/// Build an absolute `https` URL for a site-relative path.
pub fn absolute_url(domain: &str, path: &str) -> String {
    let domain = domain
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    if path.starts_with('/') {
        format!("https://{domain}{path}")
    } else {
        format!("https://{domain}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_matches_route() {
        assert!(path_matches_route("/api/webhook", "/api/webhook"));
        assert!(path_matches_route("/functions/api/webhook/cms", "/api/webhook"));
        assert!(path_matches_route(
            "https://novelty.pages.dev/api/webhook?x=1",
            "/api/webhook"
        ));
        assert!(!path_matches_route("/blog/42", "/api/webhook"));
        assert!(!path_matches_route("/search?q=/api/webhook", "/api/webhook"));
        assert!(!path_matches_route(
            "https://novelty.pages.dev/?next=/api/webhook",
            "/api/webhook"
        ));
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/blog", "42"), "/blog/42");
        assert_eq!(join_path("/blog/", "/42"), "/blog/42");
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(absolute_url("example.com", "/"), "https://example.com/");
        assert_eq!(absolute_url("example.com", "/blog"), "https://example.com/blog");
        assert_eq!(
            absolute_url("https://example.com/", "/blog/42"),
            "https://example.com/blog/42"
        );
    }
}
