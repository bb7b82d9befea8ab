use crate::document::{
    Components, Contact, ExternalDocs, Info, License, OpenApiDocument, SecurityRequirement,
    SecurityScheme, Server, OPENAPI_VERSION,
};
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

/// Fluent builder for the document-level half of an OpenAPI document.
///
/// Collects info, servers, security schemes and external docs. Paths, tags and
/// component schemas are left empty for [`crate::assembler::assemble`] to fill.
/// Nothing is validated; setters can be called in any order and later calls
/// overwrite earlier ones.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    openapi: String,
    info: Info,
    servers: Vec<Server>,
    security: Vec<SecurityRequirement>,
    security_schemes: IndexMap<String, SecurityScheme>,
    external_docs: Option<ExternalDocs>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        debug!("Initializing DocumentBuilder");
        Self {
            openapi: OPENAPI_VERSION.to_string(),
            info: Info {
                title: String::new(),
                version: "1.0.0".to_string(),
                ..Info::default()
            },
            servers: Vec::new(),
            security: Vec::new(),
            security_schemes: IndexMap::new(),
            external_docs: None,
        }
    }

    /// Replace the whole info object
    pub fn set_info(mut self, info: Info) -> Self {
        self.info = info;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.info.title = title.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.info.version = version.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.info.description = Some(description.into());
        self
    }

    pub fn terms_of_service(mut self, url: impl Into<String>) -> Self {
        self.info.terms_of_service = Some(url.into());
        self
    }

    pub fn contact(mut self, name: &str, url: &str, email: &str) -> Self {
        self.info.contact = Some(Contact {
            name: Some(name.to_string()),
            url: Some(url.to_string()),
            email: Some(email.to_string()),
        });
        self
    }

    pub fn license(mut self, name: &str, url: &str) -> Self {
        self.info.license = Some(License {
            name: name.to_string(),
            url: Some(url.to_string()),
        });
        self
    }

    pub fn openapi_version(mut self, version: impl Into<String>) -> Self {
        self.openapi = version.into();
        self
    }

    pub fn add_server(self, url: impl Into<String>) -> Self {
        self.push_server(url.into(), None)
    }

    pub fn add_server_with_description(
        self,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.push_server(url.into(), Some(description.into()))
    }

    fn push_server(mut self, url: String, description: Option<String>) -> Self {
        self.servers.push(Server { url, description });
        self
    }

    pub fn external_docs(mut self, url: &str, description: Option<&str>) -> Self {
        self.external_docs = Some(ExternalDocs {
            url: url.to_string(),
            description: description.map(str::to_string),
        });
        self
    }

    /// Declare a security scheme under `name`
    pub fn add_security(mut self, name: impl Into<String>, scheme: SecurityScheme) -> Self {
        self.security_schemes.insert(name.into(), scheme);
        self
    }

    /// Require a security scheme for the whole document
    pub fn add_security_requirements<I, S>(mut self, name: impl Into<String>, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut requirement = SecurityRequirement::new();
        requirement.insert(name.into(), scopes.into_iter().map(Into::into).collect());
        self.security.push(requirement);
        self
    }

    /// HTTP bearer scheme named `bearerAuth` with JWT format
    pub fn add_bearer_auth(self) -> Self {
        self.add_security(
            "bearerAuth",
            SecurityScheme {
                scheme_type: "http".to_string(),
                scheme: Some("bearer".to_string()),
                bearer_format: Some("JWT".to_string()),
                ..SecurityScheme::default()
            },
        )
    }

    /// HTTP basic scheme named `basicAuth`
    pub fn add_basic_auth(self) -> Self {
        self.add_security(
            "basicAuth",
            SecurityScheme {
                scheme_type: "http".to_string(),
                scheme: Some("basic".to_string()),
                ..SecurityScheme::default()
            },
        )
    }

    /// API key read from a cookie, named `cookieAuth`
    pub fn add_cookie_auth(self, cookie_name: &str) -> Self {
        self.add_security(
            "cookieAuth",
            SecurityScheme {
                scheme_type: "apiKey".to_string(),
                name: Some(cookie_name.to_string()),
                location: Some("cookie".to_string()),
                ..SecurityScheme::default()
            },
        )
    }

    /// API key read from a header, named `api_key`
    pub fn add_api_key(self, header_name: &str) -> Self {
        self.add_security(
            "api_key",
            SecurityScheme {
                scheme_type: "apiKey".to_string(),
                name: Some(header_name.to_string()),
                location: Some("header".to_string()),
                ..SecurityScheme::default()
            },
        )
    }

    /// OAuth2 scheme named `oauth2`; `flows` is passed through as-is
    pub fn add_oauth2(self, flows: Value) -> Self {
        self.add_security(
            "oauth2",
            SecurityScheme {
                scheme_type: "oauth2".to_string(),
                flows: Some(flows),
                ..SecurityScheme::default()
            },
        )
    }

    /// Build the document shell with empty paths, tags and schemas
    pub fn build(self) -> OpenApiDocument {
        debug!("Building document shell for {:?}", self.info.title);
        OpenApiDocument {
            openapi: self.openapi,
            info: self.info,
            servers: self.servers,
            security: self.security,
            tags: Vec::new(),
            paths: IndexMap::new(),
            components: Components {
                schemas: IndexMap::new(),
                security_schemes: self.security_schemes,
            },
            external_docs: self.external_docs,
        }
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_builder_defaults() {
        let document = DocumentBuilder::new().build();

        assert_eq!(document.openapi, "3.0.0");
        assert_eq!(document.info.title, "");
        assert_eq!(document.info.version, "1.0.0");
        assert!(document.paths.is_empty());
        assert!(document.tags.is_empty());
        assert!(document.components.schemas.is_empty());
    }

    #[test]
    fn test_order_independent_setters() {
        let a = DocumentBuilder::new()
            .title("Cats")
            .version("2.0.0")
            .add_server("http://localhost:8000")
            .build();
        let b = DocumentBuilder::new()
            .add_server("http://localhost:8000")
            .version("2.0.0")
            .title("Cats")
            .build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_info_fields() {
        let document = DocumentBuilder::new()
            .title("This amazing cat examples")
            .description("Sample cat server")
            .terms_of_service("http://example.com/terms")
            .contact("Cat team", "http://example.com", "cats@example.com")
            .license("MIT", "https://opensource.org/licenses/MIT")
            .build();
        let value = serde_json::to_value(&document.info).unwrap();
        assert_eq!(value["termsOfService"], "http://example.com/terms");
        assert_eq!(value["contact"]["email"], "cats@example.com");
        assert_eq!(value["license"]["name"], "MIT");
    }

    #[test]
    fn test_security_schemes() {
        let document = DocumentBuilder::new()
            .add_bearer_auth()
            .add_basic_auth()
            .add_cookie_auth("session")
            .add_api_key("X-API-KEY")
            .add_oauth2(json!({"implicit": {"authorizationUrl": "http://auth", "scopes": {}}}))
            .add_security_requirements("bearerAuth", Vec::<String>::new())
            .build();

        let schemes = &document.components.security_schemes;
        assert_eq!(
            schemes.keys().collect::<Vec<_>>(),
            vec!["bearerAuth", "basicAuth", "cookieAuth", "api_key", "oauth2"]
        );
        assert_eq!(
            serde_json::to_value(&schemes["bearerAuth"]).unwrap(),
            json!({"type": "http", "scheme": "bearer", "bearerFormat": "JWT"})
        );
        assert_eq!(schemes["cookieAuth"].location.as_deref(), Some("cookie"));
        assert_eq!(
            serde_json::to_value(&document.security).unwrap(),
            json!([{"bearerAuth": []}])
        );
    }

    #[test]
    fn test_servers_and_external_docs() {
        let document = DocumentBuilder::new()
            .add_server("http://localhost:8000")
            .add_server_with_description("https://api.example.com", "production")
            .external_docs("https://docs.example.com", Some("guides"))
            .build();
        assert_eq!(document.servers.len(), 2);
        assert_eq!(document.servers[1].description.as_deref(), Some("production"));
        assert_eq!(document.external_docs.unwrap().url, "https://docs.example.com");
    }
}
