//! Document assembly and the served documentation surface.

use crate::document::{OpenApiDocument, PathItem};
use crate::error::Result;
use crate::registry::Registry;
use crate::schema::{Schema, SCHEMA_REF_PREFIX};
use crate::viewer::{render_html, render_init_script, ViewerOptions, INIT_SCRIPT};
use indexmap::IndexMap;
use log::{debug, info, warn};
use serde_json::Value;

/// Function supplying extra component schemas at assembly time
pub type SchemaDeriver = dyn Fn() -> IndexMap<String, Schema>;

/// Reduce the registry into a complete document.
///
/// `paths`, `tags` and `components.schemas` of `base` are replaced; everything
/// else is kept. A later `{path, verb}` entry overwrites an earlier one. Schemas
/// from `deriver` win over registry schemas with the same name. The registry is
/// not modified, so assembling again picks up anything registered since.
pub fn assemble(
    mut base: OpenApiDocument,
    registry: &Registry,
    deriver: Option<&SchemaDeriver>,
) -> OpenApiDocument {
    debug!(
        "Assembling document from {} finalized operations",
        registry.assembled_paths().len()
    );

    let mut paths: IndexMap<String, PathItem> = IndexMap::new();
    for entry in registry.assembled_paths() {
        let item = paths.entry(entry.path.clone()).or_default();
        if item.set(entry.method, entry.operation.clone()).is_some() {
            debug!(
                "Duplicate operation {} {}; keeping the last one",
                entry.method, entry.path
            );
        }
    }

    let mut schemas = registry.schemas().clone();
    if let Some(deriver) = deriver {
        let derived = deriver();
        debug!("Schema deriver supplied {} schemas", derived.len());
        schemas.extend(derived);
    }

    base.paths = paths;
    base.tags = registry.tags().to_vec();
    base.components.schemas = schemas;

    for name in dangling_refs(&base) {
        warn!("Schema {} is referenced but never defined", name);
    }
    base
}

/// Names referenced through `#/components/schemas/...` that have no definition
pub fn dangling_refs(document: &OpenApiDocument) -> Vec<String> {
    let mut names = Vec::new();
    if let Ok(value) = serde_json::to_value(document) {
        collect_refs(&value, &mut names);
    }
    names.retain(|name| !document.components.schemas.contains_key(name));
    names
}

fn collect_refs(value: &Value, names: &mut Vec<String>) {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(reference)) = obj.get("$ref") {
                if let Some(name) = reference.strip_prefix(SCHEMA_REF_PREFIX) {
                    if !names.iter().any(|n| n == name) {
                        names.push(name.to_string());
                    }
                }
            }
            for v in obj.values() {
                collect_refs(v, names);
            }
        }
        Value::Array(arr) => {
            for v in arr {
                collect_refs(v, names);
            }
        }
        _ => {}
    }
}

/// Options recognized by [`swagger`]
#[derive(Default)]
pub struct ServeOptions {
    /// Bridges external validation-rule libraries into component schemas
    pub schema_deriver: Option<Box<SchemaDeriver>>,
    pub viewer: ViewerOptions,
}

impl ServeOptions {
    pub fn with_schema_deriver<F>(mut self, deriver: F) -> Self
    where
        F: Fn() -> IndexMap<String, Schema> + 'static,
    {
        self.schema_deriver = Some(Box::new(deriver));
        self
    }

    pub fn with_viewer(mut self, viewer: ViewerOptions) -> Self {
        self.viewer = viewer;
        self
    }
}

/// A response body for one of the served endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub content_type: &'static str,
    pub body: String,
}

/// The assembled document plus its three read-only endpoints.
///
/// All bodies are rendered once when the value is created.
#[derive(Debug, Clone)]
pub struct SwaggerDocs {
    mount: String,
    document: OpenApiDocument,
    json: String,
    html: String,
    init_script: String,
}

/// Assemble the document and prepare the viewer endpoints under `mount`.
///
/// The HTTP layer is expected to route `GET <mount>`, `GET <mount>/json` and
/// `GET <mount>/swagger-ui-init.js` to [`SwaggerDocs::respond`].
pub fn swagger(
    mount: &str,
    base: OpenApiDocument,
    registry: &Registry,
    options: &ServeOptions,
) -> Result<SwaggerDocs> {
    let mount = mount.trim_end_matches('/').to_string();
    let document = assemble(base, registry, options.schema_deriver.as_deref());

    let value = serde_json::to_value(&document)?;
    let json = serde_json::to_string(&value)?;
    let init_script = render_init_script(&value, &options.viewer);
    let html = render_html(&mount, &options.viewer);

    info!(
        "Serving API docs at {} ({} paths, {} schemas)",
        if mount.is_empty() { "/" } else { mount.as_str() },
        document.paths.len(),
        document.components.schemas.len()
    );
    Ok(SwaggerDocs {
        mount,
        document,
        json,
        html,
        init_script,
    })
}

impl SwaggerDocs {
    pub fn document(&self) -> &OpenApiDocument {
        &self.document
    }

    /// Mount point without trailing slash ("" for the root)
    pub fn mount(&self) -> &str {
        &self.mount
    }

    /// The three request paths served, viewer first
    pub fn endpoints(&self) -> [String; 3] {
        let viewer = if self.mount.is_empty() {
            "/".to_string()
        } else {
            self.mount.clone()
        };
        [
            viewer,
            format!("{}/json", self.mount),
            format!("{}/{}", self.mount, INIT_SCRIPT),
        ]
    }

    pub fn index_html(&self) -> &str {
        &self.html
    }

    pub fn json(&self) -> &str {
        &self.json
    }

    pub fn init_script(&self) -> &str {
        &self.init_script
    }

    /// Answer a GET for `path`, or `None` when it is not one of ours
    pub fn respond(&self, path: &str) -> Option<Asset> {
        let rest = path.strip_prefix(self.mount.as_str())?;
        match rest {
            "" | "/" => Some(Asset {
                content_type: "text/html; charset=utf-8",
                body: self.html.clone(),
            }),
            "/json" => Some(Asset {
                content_type: "application/json",
                body: self.json.clone(),
            }),
            _ if rest.strip_prefix('/') == Some(INIT_SCRIPT) => Some(Asset {
                content_type: "application/javascript",
                body: self.init_script.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{ApiDocument, ApiOperation, ApiResponse};
    use crate::builder::DocumentBuilder;
    use crate::document::Tag;
    use crate::route::HttpMethod;
    use crate::schema::SchemaRef;
    use pretty_assertions::assert_eq;

    fn registry_with_cat() -> Registry {
        let mut registry = Registry::new();
        registry.register_route("Cat", "findAll", "/cat", HttpMethod::Get);
        registry.register_route("Cat", "findById", "/cat/:id", HttpMethod::Get);
        registry
            .annotate_method("Cat", "findAll", ApiOperation::summary("all"))
            .unwrap();
        registry
            .annotate_method("Cat", "findById", ApiOperation::summary("one"))
            .unwrap();
        registry
            .annotate_class("Cat", ApiDocument::new(Tag::new("Cat")))
            .unwrap();
        registry
    }

    #[test]
    fn test_assemble_paths_and_tags() {
        let registry = registry_with_cat();
        let document = assemble(DocumentBuilder::new().build(), &registry, None);

        assert_eq!(document.paths.keys().collect::<Vec<_>>(), vec!["/cat", "/cat/{id}"]);
        assert_eq!(
            document.operation("/cat/{id}", HttpMethod::Get).unwrap().summary.as_deref(),
            Some("one")
        );
        assert_eq!(document.tags, vec![Tag::new("Cat")]);
    }

    #[test]
    fn test_duplicate_path_and_verb_last_wins() {
        let mut registry = registry_with_cat();
        registry.register_route("Kitten", "list", "/cat", HttpMethod::Get);
        registry
            .annotate_method("Kitten", "list", ApiOperation::summary("kittens"))
            .unwrap();
        registry
            .annotate_class("Kitten", ApiDocument::new(Tag::new("Cat")))
            .unwrap();

        let document = assemble(DocumentBuilder::new().build(), &registry, None);
        assert_eq!(
            document.operation("/cat", HttpMethod::Get).unwrap().summary.as_deref(),
            Some("kittens")
        );
        // tags are not merged across controllers
        assert_eq!(document.tags.len(), 2);
    }

    #[test]
    fn test_deriver_wins_on_schema_collision() {
        let mut registry = registry_with_cat();
        registry.define_schema("Cat", Schema::string());
        registry.define_schema("Owner", Schema::object());
        let deriver = || {
            let mut schemas = IndexMap::new();
            schemas.insert("Cat".to_string(), Schema::object());
            schemas
        };

        let document = assemble(DocumentBuilder::new().build(), &registry, Some(&deriver));
        assert_eq!(document.components.schemas.len(), 2);
        assert_eq!(document.components.schemas["Cat"], Schema::object());
        assert_eq!(document.components.schemas["Owner"], Schema::object());
    }

    #[test]
    fn test_assemble_rereads_registry() {
        let mut registry = registry_with_cat();
        let first = assemble(DocumentBuilder::new().build(), &registry, None);
        registry.define_schema("Late", Schema::object());
        let second = assemble(DocumentBuilder::new().build(), &registry, None);

        assert!(first.components.schemas.is_empty());
        assert!(second.components.schemas.contains_key("Late"));
    }

    #[test]
    fn test_dangling_refs_are_reported_not_rejected() {
        let mut registry = Registry::new();
        registry.register_route("Cat", "findAll", "/", HttpMethod::Get);
        registry
            .annotate_method("Cat", "findAll", ApiOperation::summary("all"))
            .unwrap();
        registry
            .annotate_method(
                "Cat",
                "findAll",
                ApiResponse::new(200, "OK").with_schema(SchemaRef::named("Missing")),
            )
            .unwrap();
        registry
            .annotate_class("Cat", ApiDocument::new(Tag::new("Cat")))
            .unwrap();

        let document = assemble(DocumentBuilder::new().build(), &registry, None);
        assert_eq!(dangling_refs(&document), vec!["Missing".to_string()]);
        assert!(document.operation("/", HttpMethod::Get).is_some());
    }

    #[test]
    fn test_respond_dispatches_three_endpoints() {
        let registry = registry_with_cat();
        let docs = swagger(
            "/api-docs/",
            DocumentBuilder::new().title("Cats").build(),
            &registry,
            &ServeOptions::default(),
        )
        .unwrap();

        assert_eq!(
            docs.endpoints(),
            [
                "/api-docs".to_string(),
                "/api-docs/json".to_string(),
                "/api-docs/swagger-ui-init.js".to_string()
            ]
        );
        let html = docs.respond("/api-docs").unwrap();
        assert_eq!(html.content_type, "text/html; charset=utf-8");
        assert_eq!(docs.respond("/api-docs/").unwrap(), html);

        let json = docs.respond("/api-docs/json").unwrap();
        let value: Value = serde_json::from_str(&json.body).unwrap();
        assert_eq!(value["info"]["title"], "Cats");
        assert!(value["paths"]["/cat/{id}"]["get"].is_object());

        let script = docs.respond("/api-docs/swagger-ui-init.js").unwrap();
        assert_eq!(script.content_type, "application/javascript");
        assert!(script.body.contains("\"/cat/{id}\""));

        assert!(docs.respond("/api-docs/other").is_none());
        assert!(docs.respond("/elsewhere").is_none());
    }

    #[test]
    fn test_swagger_uses_schema_deriver() {
        let registry = registry_with_cat();
        let options = ServeOptions::default().with_schema_deriver(|| {
            let mut schemas = IndexMap::new();
            schemas.insert("Derived".to_string(), Schema::object());
            schemas
        });
        let docs = swagger("/docs", DocumentBuilder::new().build(), &registry, &options).unwrap();
        assert!(docs.document().components.schemas.contains_key("Derived"));
        assert_eq!(docs.mount(), "/docs");
    }
}
