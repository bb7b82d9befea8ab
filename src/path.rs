//! Conversion from router path syntax to OpenAPI path templates.

/// Prefix the router uses for positional path parameters
pub const PARAM_PREFIX: char = ':';

/// Convert a router path (`/cat/:id`) into an OpenAPI path template (`/cat/{id}`).
///
/// Only `:name` segments are rewritten. Wildcards, optional segments and regex
/// segments pass through untouched, and already converted paths are returned
/// unchanged.
pub fn to_openapi_path(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix(PARAM_PREFIX) {
            Some(name) => format!("{{{}}}", name),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_router_params() {
        assert_eq!(to_openapi_path("/cat/:id"), "/cat/{id}");
        assert_eq!(
            to_openapi_path("/users/:id/posts/:post_id"),
            "/users/{id}/posts/{post_id}"
        );
    }

    #[test]
    fn test_idempotent_on_converted_paths() {
        let once = to_openapi_path("/cat/:id");
        assert_eq!(to_openapi_path(&once), "/cat/{id}");
        assert_eq!(to_openapi_path("/cat/{id}"), "/cat/{id}");
    }

    #[test]
    fn test_no_params() {
        assert_eq!(to_openapi_path("/"), "/");
        assert_eq!(to_openapi_path("/users/list"), "/users/list");
        assert_eq!(to_openapi_path(""), "");
    }

    #[test]
    fn test_unsupported_syntax_passes_through() {
        assert_eq!(to_openapi_path("/files/*"), "/files/*");
        assert_eq!(to_openapi_path("/a/:id?"), "/a/{id?}");
    }
}
