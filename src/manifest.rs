//! Declarative controller manifests.
//!
//! A manifest describes controllers, their routes and their annotations in a
//! YAML or JSON file. [`Manifest::apply`] replays it against a [`Registry`] in
//! the documented annotation order, so the file itself never has to care about
//! ordering.

use crate::annotations::{
    ApiDocument, ApiOperation, ApiParameter, ApiRequestBody, ApiResponse, ApiSchema, ApiSecurity,
};
use crate::builder::DocumentBuilder;
use crate::document::{Info, SecurityRequirement, SecurityScheme, Server, Tag};
use crate::registry::Registry;
use crate::route::RouteFact;
use crate::schema::Schema;
use crate::viewer::ViewerOptions;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub info: Info,
    #[serde(default)]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub security_schemes: IndexMap<String, SecurityScheme>,
    /// Document-wide security requirements
    #[serde(default)]
    pub security: Vec<SecurityRequirement>,
    /// Component schemas registered before any controller
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
    #[serde(default)]
    pub controllers: Vec<ControllerManifest>,
    #[serde(default)]
    pub viewer: ViewerOptions,
}

/// One controller and its handler methods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerManifest {
    pub name: String,
    /// Tags applied by the finalizing `ApiDocument`; defaults to the controller name
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Class-level security, applied after every method
    #[serde(default)]
    pub security: Vec<ApiSecurity>,
    #[serde(default)]
    pub methods: Vec<MethodManifest>,
}

/// One handler method with its route fact and annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodManifest {
    pub name: String,
    pub route: RouteFact,
    #[serde(default)]
    pub operation: ApiOperation,
    #[serde(default)]
    pub responses: Vec<ApiResponse>,
    #[serde(default)]
    pub parameters: Vec<ApiParameter>,
    #[serde(default)]
    pub request_body: Option<ApiRequestBody>,
}

impl Manifest {
    /// Load a manifest, picking JSON for `.json` files and YAML otherwise
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading manifest: {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let manifest = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        };
        manifest.with_context(|| format!("Invalid manifest: {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse YAML manifest")
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse JSON manifest")
    }

    /// Document builder carrying the manifest's document-level fields
    pub fn document_builder(&self) -> DocumentBuilder {
        let mut builder = DocumentBuilder::new().set_info(self.info.clone());
        for server in &self.servers {
            builder = match &server.description {
                Some(description) => {
                    builder.add_server_with_description(server.url.clone(), description.clone())
                }
                None => builder.add_server(server.url.clone()),
            };
        }
        for (name, scheme) in &self.security_schemes {
            builder = builder.add_security(name.clone(), scheme.clone());
        }
        for requirement in &self.security {
            for (name, scopes) in requirement {
                builder = builder.add_security_requirements(name.clone(), scopes.clone());
            }
        }
        builder
    }

    /// Replay every controller into `registry`.
    ///
    /// Per controller: route facts, operations, method declarations, class
    /// security, then `ApiDocument`.
    pub fn apply(&self, registry: &mut Registry) -> crate::error::Result<()> {
        for (name, schema) in &self.schemas {
            ApiSchema::new(name.clone(), schema.clone()).register(registry);
        }

        for controller in &self.controllers {
            let name = controller.name.as_str();
            info!(
                "Registering controller {} ({} methods)",
                name,
                controller.methods.len()
            );
            registry.get_or_create(name);

            for method in &controller.methods {
                registry.register_route(name, &method.name, &method.route.path, method.route.method);
            }
            for method in &controller.methods {
                registry.annotate_method(name, &method.name, method.operation.clone())?;
                for parameter in &method.parameters {
                    registry.annotate_method(name, &method.name, parameter.clone())?;
                }
                if let Some(body) = &method.request_body {
                    registry.annotate_method(name, &method.name, body.clone())?;
                }
                for response in &method.responses {
                    registry.annotate_method(name, &method.name, response.clone())?;
                }
            }
            for security in &controller.security {
                registry.annotate_class(name, security.clone())?;
            }

            let tags = if controller.tags.is_empty() {
                vec![Tag::new(name)]
            } else {
                controller.tags.clone()
            };
            registry.annotate_class(name, ApiDocument::tags(tags))?;
        }
        Ok(())
    }
}
