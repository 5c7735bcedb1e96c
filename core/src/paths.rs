#![deny(missing_docs)]

//! # Path Analysis
//!
//! Helpers that turn server URLs and request URLs into API paths:
//! - base-path extraction from an OpenAPI server URL,
//! - path extraction from a Postman raw URL,
//! - `{{var}}` / `:var` template normalisation and variable substitution,
//! - common leading-segment detection used to infer a base URL.

use crate::models::DEFAULT_BASE_URL;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Origin substituted for hosts that are missing or templated, so that
/// `url` can still parse the remainder.
const PLACEHOLDER_ORIGIN: &str = "http://placeholder.invalid";

fn template_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{([^}]+)\}\}").expect("Invalid regex"))
}

fn path_parameter_regexes() -> &'static [Regex; 3] {
    static RE: OnceLock<[Regex; 3]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            Regex::new(r"^\d+$").expect("Invalid regex"),
            Regex::new(r"^[a-f0-9-]+$").expect("Invalid regex"),
            Regex::new(r"^\{\w+\}$").expect("Invalid regex"),
        ]
    })
}

/// Extracts the base path from the first OpenAPI server URL.
///
/// - `https://api.example.com/v2` -> `/v2`
/// - `https://api.example.com` -> the default `/api/v1`
/// - `v2` -> `/v2`
pub fn base_path_from_server_url(server_url: &str) -> String {
    if server_url.starts_with("http://") || server_url.starts_with("https://") {
        let parts: Vec<&str> = server_url.splitn(4, '/').collect();
        return match parts.get(3) {
            Some(path) => format!("/{}", path),
            None => DEFAULT_BASE_URL.to_string(),
        };
    }

    if server_url.starts_with('/') {
        server_url.to_string()
    } else {
        format!("/{}", server_url)
    }
}

/// Returns the decoded path component of a request URL, if it can be parsed.
///
/// Accepts absolute URLs, bare paths, host-less `example.com/users` forms and
/// URLs whose host is a `{{variable}}`.
pub fn url_path(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let candidate = if raw.starts_with('/') {
        format!("{}{}", PLACEHOLDER_ORIGIN, raw)
    } else if raw.contains("://") {
        raw.to_string()
    } else if let Some((_, rest)) = raw.strip_prefix("{{").and_then(|r| r.split_once("}}")) {
        format!("{}{}", PLACEHOLDER_ORIGIN, rest)
    } else {
        format!("http://{}", raw)
    };

    let parsed = Url::parse(&candidate).ok()?;
    Some(percent_decode_str(parsed.path()).decode_utf8_lossy().into_owned())
}

/// Joins Postman `url.path[]` segments into an absolute path.
pub fn join_segments(segments: &[String]) -> Option<String> {
    if segments.is_empty() {
        return None;
    }
    Some(format!("/{}", segments.join("/")))
}

/// Rewrites Postman templates into `{name}` placeholders.
///
/// `{{id}}` becomes `{id}` and a `:id` segment becomes `{id}`.
pub fn normalize_templates(path: &str) -> String {
    let braced = template_regex().replace_all(path, "{$1}");
    braced
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) if !name.is_empty() => format!("{{{}}}", name),
            _ => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether a sample variable value looks like an identifier that should stay
/// a path parameter rather than be substituted inline.
pub fn looks_like_path_parameter(value: &str) -> bool {
    path_parameter_regexes().iter().any(|re| re.is_match(value))
}

/// Normalises templates, then inlines variables whose sample values are
/// literals (e.g. `{version}` with value `v2`). Identifier-like values keep
/// the placeholder.
pub fn substitute_variables<'a, I>(path: &str, variables: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut path = normalize_templates(path);
    for (key, value) in variables {
        if value.is_empty() {
            continue;
        }
        let placeholder = format!("{{{}}}", key);
        if path.contains(&placeholder) && !looks_like_path_parameter(value) {
            path = path.replace(&placeholder, value);
        }
    }
    path
}

/// Longest common sequence of leading path segments.
///
/// Templated segments inside the shared prefix are skipped rather than
/// ending the match. Returns `None` when nothing is shared.
pub fn common_path_prefix<S: AsRef<str>>(paths: &[S]) -> Option<String> {
    let segmented: Vec<Vec<&str>> = paths
        .iter()
        .map(|p| p.as_ref().trim_matches('/').split('/').collect::<Vec<_>>())
        .filter(|segments| segments.first().is_some_and(|s| !s.is_empty()))
        .collect();

    let (first, rest) = segmented.split_first()?;
    let min_len = segmented.iter().map(Vec::len).min().unwrap_or(0);

    let mut common = Vec::new();
    for idx in 0..min_len {
        let segment = first[idx];
        if rest.iter().any(|segments| segments[idx] != segment) {
            break;
        }
        if !segment.contains('{') {
            common.push(segment);
        }
    }

    if common.is_empty() {
        None
    } else {
        Some(format!("/{}", common.join("/")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_path_from_server_url() {
        assert_eq!(base_path_from_server_url("https://api.example.com/v2"), "/v2");
        assert_eq!(
            base_path_from_server_url("http://localhost:8080/api/v3/"),
            "/api/v3/"
        );
        assert_eq!(base_path_from_server_url("https://api.example.com"), "/api/v1");
        assert_eq!(base_path_from_server_url("/v1"), "/v1");
        assert_eq!(base_path_from_server_url("v1"), "/v1");
    }

    #[test]
    fn test_url_path_variants() {
        assert_eq!(
            url_path("https://api.example.com/api/v1/users?page=1").as_deref(),
            Some("/api/v1/users")
        );
        assert_eq!(
            url_path("{{baseUrl}}/users/{{userId}}").as_deref(),
            Some("/users/{{userId}}")
        );
        assert_eq!(
            url_path("localhost:3000/orders").as_deref(),
            Some("/orders")
        );
        assert_eq!(url_path("/health").as_deref(), Some("/health"));
        assert_eq!(url_path(""), None);
        assert_eq!(url_path("http://exa mple.com/users"), None);
    }

    #[test]
    fn test_normalize_templates() {
        assert_eq!(normalize_templates("/users/{{id}}"), "/users/{id}");
        assert_eq!(normalize_templates("/users/:id/posts"), "/users/{id}/posts");
        assert_eq!(normalize_templates("/plain"), "/plain");
    }

    #[test]
    fn test_variable_substitution() {
        let vars = [("version", "v2"), ("userId", "42"), ("empty", "")];
        assert_eq!(
            substitute_variables("/{{version}}/users/{{userId}}/{{empty}}", vars),
            "/v2/users/{userId}/{empty}"
        );
    }

    #[test]
    fn test_path_parameter_heuristic() {
        assert!(looks_like_path_parameter("12345"));
        assert!(looks_like_path_parameter("123e4567-e89b-12d3-a456-426614174000"));
        assert!(looks_like_path_parameter("{id}"));
        assert!(!looks_like_path_parameter("v2"));
        assert!(!looks_like_path_parameter("https://api.example.com"));
    }

    #[test]
    fn test_common_prefix() {
        let paths = ["/api/v1/users", "/api/v1/users/{id}", "/api/v1/orders"];
        assert_eq!(common_path_prefix(&paths).as_deref(), Some("/api/v1"));
    }

    #[test]
    fn test_common_prefix_skips_templated_segments() {
        let paths = ["/{tenant}/api/users", "/{tenant}/api/orders"];
        assert_eq!(common_path_prefix(&paths).as_deref(), Some("/api"));
    }

    #[test]
    fn test_common_prefix_none() {
        assert_eq!(common_path_prefix(&["/users", "/orders"]), None);
        assert_eq!(common_path_prefix::<&str>(&[]), None);
        assert_eq!(common_path_prefix(&["/"]), None);
    }
}
