//! Route facts supplied by the routing layer.
//!
//! The registry never computes routes itself. Whatever wires controllers into
//! the HTTP router records the resolved path template and verb for each handler
//! method through [`crate::registry::Registry::register_route`], and the
//! annotation processors read them back from there.

use serde::{Deserialize, Serialize};

/// HTTP methods a route fact can carry.
///
/// These correspond to the operation keys of an OpenAPI path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method
    #[serde(alias = "get")]
    Get,
    /// HTTP POST method
    #[serde(alias = "post")]
    Post,
    /// HTTP PUT method
    #[serde(alias = "put")]
    Put,
    /// HTTP DELETE method
    #[serde(alias = "delete")]
    Delete,
    /// HTTP PATCH method
    #[serde(alias = "patch")]
    Patch,
    /// HTTP OPTIONS method
    #[serde(alias = "options")]
    Options,
    /// HTTP HEAD method
    #[serde(alias = "head")]
    Head,
}

impl HttpMethod {
    /// Get the HTTP method as an upper-case string
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }

    /// The lower-cased key used for this method inside a path item
    pub fn path_key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path template and verb of one handler method, in router syntax (`/cat/:id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteFact {
    /// The raw router path, e.g. "/cat/:id"
    pub path: String,
    /// The HTTP method the handler answers
    pub method: HttpMethod,
}

impl RouteFact {
    /// Create a new RouteFact
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
        }
    }
}
