//! Annotation processors.
//!
//! Each annotation is a plain value applied to one handler method
//! ([`MethodAnnotation`]) or to a whole controller ([`ClassAnnotation`]). They
//! only ever write through the [`Registry`], and they must be applied in this
//! order for a controller:
//!
//! 1. route facts ([`Registry::register_route`])
//! 2. [`ApiOperation`] on each method
//! 3. [`ApiResponse`], [`ApiParameter`], [`ApiRequestBody`] on each method
//! 4. [`ApiSecurity`] on the controller
//! 5. [`ApiDocument`] on the controller, exactly once
//!
//! Step 5 freezes the controller's fragments into the registry's assembled
//! paths; nothing applied to the controller afterwards reaches the document.

use crate::document::{
    ExternalDocs, MediaType, Parameter, ParameterLocation, RequestBody, Response,
    SecurityRequirement, Tag,
};
use crate::error::{Error, Result};
use crate::path::to_openapi_path;
use crate::registry::{AssembledPath, ControllerEntry, OperationFragment, Registry};
use crate::schema::{Schema, SchemaRef};
use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An annotation attached to a single handler method
pub trait MethodAnnotation {
    fn apply(self, registry: &mut Registry, controller: &str, method: &str) -> Result<()>;
}

/// An annotation attached to a controller
pub trait ClassAnnotation {
    fn apply(self, registry: &mut Registry, controller: &str) -> Result<()>;
}

/// Marks a method as a documented operation.
///
/// Copies the route fact into the fragment and creates the empty responses
/// map, so it has to run before any [`ApiResponse`] on the same method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOperation {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub deprecated: Option<bool>,
    #[serde(default)]
    pub external_docs: Option<ExternalDocs>,
    /// `x-*` keys copied onto the operation as-is
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl ApiOperation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = Some(true);
        self
    }

    pub fn with_external_docs(mut self, url: impl Into<String>, description: Option<&str>) -> Self {
        self.external_docs = Some(ExternalDocs {
            url: url.into(),
            description: description.map(str::to_string),
        });
        self
    }

    /// Attach a specification extension; `name` should start with `x-`
    pub fn with_extension(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extensions.insert(name.into(), value);
        self
    }
}

impl MethodAnnotation for ApiOperation {
    fn apply(self, registry: &mut Registry, controller: &str, method: &str) -> Result<()> {
        let route = registry
            .route(controller, method)
            .cloned()
            .ok_or_else(|| Error::MissingRoute {
                controller: controller.to_string(),
                method: method.to_string(),
            })?;
        debug!("ApiOperation {}::{} at {} {}", controller, method, route.method, route.path);

        let fragment = registry.fragment_mut(controller, method);
        fragment.path = Some(route.path);
        fragment.method = Some(route.method);
        fragment.property.merge(OperationFragment {
            summary: self.summary,
            description: self.description,
            operation_id: self.operation_id,
            deprecated: self.deprecated,
            external_docs: self.external_docs,
            extensions: self.extensions,
            ..OperationFragment::default()
        });
        fragment.property.responses.get_or_insert_with(IndexMap::new);
        Ok(())
    }
}

/// Declares the response for one status code.
///
/// A `schema` shorthand takes precedence over pre-built `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub description: String,
    #[serde(default)]
    pub schema: Option<SchemaRef>,
    #[serde(default)]
    pub content: Option<IndexMap<String, MediaType>>,
}

impl ApiResponse {
    pub fn new(status: u16, description: impl Into<String>) -> Self {
        Self {
            status,
            description: description.into(),
            schema: None,
            content: None,
        }
    }

    pub fn with_schema(mut self, schema: SchemaRef) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_content(mut self, content: IndexMap<String, MediaType>) -> Self {
        self.content = Some(content);
        self
    }

    fn into_response(self) -> Response {
        let content = match self.schema {
            Some(schema) => Some(schema.to_content()),
            None => self.content,
        };
        Response {
            description: self.description,
            content,
        }
    }
}

impl MethodAnnotation for ApiResponse {
    fn apply(self, registry: &mut Registry, controller: &str, method: &str) -> Result<()> {
        let status = self.status.to_string();
        let responses = registry
            .controller_mut(controller)
            .and_then(|entry| entry.fragments.get_mut(method))
            .and_then(|fragment| fragment.property.responses.as_mut())
            .ok_or_else(|| Error::MissingResponses {
                controller: controller.to_string(),
                method: method.to_string(),
            })?;
        debug!("ApiResponse {}::{} status {}", controller, method, status);
        responses.insert(status, self.into_response());
        Ok(())
    }
}

/// Appends one parameter to the operation.
///
/// Parameters keep their application order and are not deduplicated by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiParameter(pub Parameter);

impl ApiParameter {
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self(Parameter {
            name: name.into(),
            location,
            required: false,
            description: None,
            schema: None,
        })
    }

    /// A path parameter, always required
    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Path).required(true)
    }

    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Query)
    }

    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Header)
    }

    pub fn cookie(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Cookie)
    }

    pub fn required(mut self, required: bool) -> Self {
        self.0.required = required;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.0.schema = Some(schema);
        self
    }
}

impl MethodAnnotation for ApiParameter {
    fn apply(self, registry: &mut Registry, controller: &str, method: &str) -> Result<()> {
        debug!("ApiParameter {}::{} {}", controller, method, self.0.name);
        registry.merge_property(
            controller,
            method,
            OperationFragment {
                parameters: Some(vec![self.0]),
                ..OperationFragment::default()
            },
        );
        Ok(())
    }
}

/// Declares the request body.
///
/// Pre-built `content` wins and the schema shorthand is dropped; otherwise the
/// shorthand is expanded the same way as for [`ApiResponse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiRequestBody {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub schema: Option<SchemaRef>,
    #[serde(default)]
    pub content: Option<IndexMap<String, MediaType>>,
}

impl ApiRequestBody {
    pub fn schema(schema: SchemaRef) -> Self {
        Self {
            schema: Some(schema),
            ..Self::default()
        }
    }

    pub fn content(content: IndexMap<String, MediaType>) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }
}

impl MethodAnnotation for ApiRequestBody {
    fn apply(self, registry: &mut Registry, controller: &str, method: &str) -> Result<()> {
        let content = match (self.content, self.schema) {
            (Some(content), _) => content,
            (None, Some(schema)) => schema.to_content(),
            (None, None) => IndexMap::new(),
        };
        debug!("ApiRequestBody {}::{} ({} content types)", controller, method, content.len());
        registry.merge_property(
            controller,
            method,
            OperationFragment {
                request_body: Some(RequestBody {
                    description: self.description,
                    required: self.required,
                    content,
                }),
                ..OperationFragment::default()
            },
        );
        Ok(())
    }
}

/// Registers a named component schema. Independent of any controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSchema {
    pub name: String,
    pub schema: Schema,
}

impl ApiSchema {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    pub fn register(self, registry: &mut Registry) {
        debug!("ApiSchema {}", self.name);
        registry.define_schema(&self.name, self.schema);
    }
}

impl MethodAnnotation for ApiSchema {
    fn apply(self, registry: &mut Registry, _controller: &str, _method: &str) -> Result<()> {
        self.register(registry);
        Ok(())
    }
}

impl ClassAnnotation for ApiSchema {
    fn apply(self, registry: &mut Registry, _controller: &str) -> Result<()> {
        self.register(registry);
        Ok(())
    }
}

/// Class-level security requirement.
///
/// Appends `{name: scopes}` to the security list of every method fragment the
/// controller already has. Methods annotated afterwards do not receive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSecurity {
    pub name: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl ApiSecurity {
    fn scheme(name: &str) -> Self {
        Self {
            name: name.to_string(),
            scopes: Vec::new(),
        }
    }

    pub fn bearer() -> Self {
        Self::scheme("bearerAuth")
    }

    pub fn basic() -> Self {
        Self::scheme("basicAuth")
    }

    pub fn cookie() -> Self {
        Self::scheme("cookieAuth")
    }

    pub fn api_key() -> Self {
        Self::scheme("api_key")
    }

    pub fn oauth2() -> Self {
        Self::scheme("oauth2")
    }

    /// Use a custom security scheme name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }
}

impl ClassAnnotation for ApiSecurity {
    fn apply(self, registry: &mut Registry, controller: &str) -> Result<()> {
        let entry = registry
            .controller_mut(controller)
            .ok_or_else(|| Error::UnknownController(controller.to_string()))?;

        let mut requirement = SecurityRequirement::new();
        requirement.insert(self.name, self.scopes);

        for (method, fragment) in entry.fragments.iter_mut() {
            debug!("ApiSecurity {}::{} {:?}", controller, method, requirement);
            fragment
                .property
                .security
                .get_or_insert_with(Vec::new)
                .push(requirement.clone());
        }
        Ok(())
    }
}

/// Controller-wide finalization: tags every fragment and freezes it into the
/// registry's assembled paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDocument {
    pub tags: Vec<Tag>,
}

impl ApiDocument {
    pub fn new(tag: Tag) -> Self {
        Self { tags: vec![tag] }
    }

    pub fn tags(tags: Vec<Tag>) -> Self {
        Self { tags }
    }
}

impl ClassAnnotation for ApiDocument {
    fn apply(self, registry: &mut Registry, controller: &str) -> Result<()> {
        let entry = registry
            .controller_mut(controller)
            .ok_or_else(|| Error::UnknownController(controller.to_string()))?;
        if entry.finalized {
            warn!(
                "ApiDocument applied to {} more than once; its operations will be appended again",
                controller
            );
        }
        let tag_names: Vec<String> = self.tags.iter().map(|tag| tag.name.clone()).collect();
        let frozen = freeze_fragments(entry, controller, &tag_names)?;
        entry.finalized = true;

        debug!(
            "ApiDocument {} finalized {} operations with tags {:?}",
            controller,
            frozen.len(),
            tag_names
        );
        registry.push_finalized(self.tags, frozen);
        Ok(())
    }
}

fn freeze_fragments(
    entry: &mut ControllerEntry,
    controller: &str,
    tag_names: &[String],
) -> Result<Vec<AssembledPath>> {
    let ControllerEntry {
        routes, fragments, ..
    } = entry;

    if let Some(method) = fragments.keys().find(|method| !routes.contains_key(*method)) {
        return Err(Error::MissingRoute {
            controller: controller.to_string(),
            method: method.clone(),
        });
    }

    let mut frozen = Vec::with_capacity(fragments.len());
    for (method, fragment) in fragments.iter_mut() {
        let route = &routes[method];
        fragment.property.tags = Some(tag_names.to_vec());
        fragment.path = Some(route.path.clone());
        fragment.method = Some(route.method);
        frozen.push(AssembledPath {
            path: to_openapi_path(&route.path),
            method: route.method,
            operation: fragment.property.to_operation(),
        });
    }
    Ok(frozen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::HttpMethod;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn registry_with_routes() -> Registry {
        let mut registry = Registry::new();
        registry.register_route("Cat", "findAll", "/", HttpMethod::Get);
        registry.register_route("Cat", "findById", "/:id", HttpMethod::Get);
        registry.register_route("Cat", "save", "/", HttpMethod::Post);
        registry
    }

    #[test]
    fn test_operation_copies_route_and_creates_responses() {
        let mut registry = registry_with_routes();
        registry
            .annotate_method("Cat", "findById", ApiOperation::summary("find by id cat"))
            .unwrap();

        let fragment = registry.fragment("Cat", "findById").unwrap();
        assert_eq!(fragment.path.as_deref(), Some("/:id"));
        assert_eq!(fragment.method, Some(HttpMethod::Get));
        assert_eq!(fragment.property.summary.as_deref(), Some("find by id cat"));
        assert_eq!(fragment.property.responses, Some(IndexMap::new()));
    }

    #[test]
    fn test_operation_without_route_fails() {
        let mut registry = Registry::new();
        let err = registry
            .annotate_method("Cat", "findAll", ApiOperation::summary("findAll"))
            .unwrap_err();
        assert_eq!(
            err,
            Error::MissingRoute {
                controller: "Cat".to_string(),
                method: "findAll".to_string(),
            }
        );
    }

    #[test]
    fn test_response_before_operation_fails() {
        let mut registry = registry_with_routes();
        let err = registry
            .annotate_method("Cat", "findAll", ApiResponse::new(200, "OK"))
            .unwrap_err();
        assert!(matches!(err, Error::MissingResponses { .. }));

        // a parameter creates the fragment but still no responses container
        registry
            .annotate_method("Cat", "findAll", ApiParameter::query("page"))
            .unwrap();
        let err = registry
            .annotate_method("Cat", "findAll", ApiResponse::new(200, "OK"))
            .unwrap_err();
        assert!(matches!(err, Error::MissingResponses { .. }));
    }

    #[test]
    fn test_responses_for_different_status_codes() {
        let mut registry = registry_with_routes();
        registry
            .annotate_method("Cat", "findAll", ApiOperation::summary("findAll cat"))
            .unwrap();
        registry
            .annotate_method(
                "Cat",
                "findAll",
                ApiResponse::new(200, "OK").with_schema(SchemaRef::named("CatSchema")),
            )
            .unwrap();
        registry
            .annotate_method("Cat", "findAll", ApiResponse::new(401, "Unauthorized"))
            .unwrap();

        let responses = registry
            .fragment("Cat", "findAll")
            .unwrap()
            .property
            .responses
            .clone()
            .unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(
            serde_json::to_value(&responses["200"]).unwrap(),
            json!({
                "description": "OK",
                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/CatSchema"}}}
            })
        );
        assert_eq!(
            serde_json::to_value(&responses["401"]).unwrap(),
            json!({"description": "Unauthorized"})
        );
    }

    #[test]
    fn test_response_schema_overrides_content() {
        let mut content = IndexMap::new();
        content.insert("text/plain".to_string(), MediaType::new(Schema::string()));
        let response = ApiResponse::new(200, "OK")
            .with_content(content)
            .with_schema(SchemaRef::per_content_type([("application/xml", "Cat")]))
            .into_response();
        let content = response.content.unwrap();
        assert_eq!(content.len(), 1);
        assert!(content.contains_key("application/xml"));
    }

    #[test]
    fn test_duplicate_parameters_are_kept() {
        let mut registry = registry_with_routes();
        registry
            .annotate_method("Cat", "findById", ApiParameter::path("id"))
            .unwrap();
        registry
            .annotate_method(
                "Cat",
                "findById",
                ApiParameter::path("id").with_description("second"),
            )
            .unwrap();

        let parameters = registry
            .fragment("Cat", "findById")
            .unwrap()
            .property
            .parameters
            .clone()
            .unwrap();
        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters[0].description, None);
        assert_eq!(parameters[1].description.as_deref(), Some("second"));
    }

    #[test]
    fn test_request_body_from_schema_shorthand() {
        let mut registry = registry_with_routes();
        registry
            .annotate_method(
                "Cat",
                "save",
                ApiRequestBody::schema(SchemaRef::named("CatSchema"))
                    .with_description("cat to save")
                    .required(true),
            )
            .unwrap();

        let body = registry
            .fragment("Cat", "save")
            .unwrap()
            .property
            .request_body
            .clone()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "description": "cat to save",
                "required": true,
                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/CatSchema"}}}
            })
        );
    }

    #[test]
    fn test_request_body_prebuilt_content_drops_schema() {
        let mut content = IndexMap::new();
        content.insert("text/plain".to_string(), MediaType::new(Schema::string()));
        let mut annotation = ApiRequestBody::content(content);
        annotation.schema = Some(SchemaRef::named("Ignored"));

        let mut registry = registry_with_routes();
        registry.annotate_method("Cat", "save", annotation).unwrap();

        let body = registry
            .fragment("Cat", "save")
            .unwrap()
            .property
            .request_body
            .clone()
            .unwrap();
        assert_eq!(body.content.len(), 1);
        assert_eq!(body.content["text/plain"].schema, Schema::string());
    }

    #[test]
    fn test_security_retrofit_skips_later_methods() {
        let mut registry = registry_with_routes();
        registry
            .annotate_method("Cat", "findAll", ApiOperation::summary("a"))
            .unwrap();
        registry
            .annotate_method("Cat", "findById", ApiOperation::summary("b"))
            .unwrap();
        registry.annotate_class("Cat", ApiSecurity::bearer()).unwrap();
        registry
            .annotate_method("Cat", "save", ApiOperation::summary("c"))
            .unwrap();

        let expected = vec![[("bearerAuth".to_string(), Vec::<String>::new())]
            .into_iter()
            .collect::<SecurityRequirement>()];
        for method in ["findAll", "findById"] {
            let security = registry.fragment("Cat", method).unwrap().property.security.clone();
            assert_eq!(security, Some(expected.clone()));
        }
        assert_eq!(registry.fragment("Cat", "save").unwrap().property.security, None);
    }

    #[test]
    fn test_security_scopes_and_names() {
        let mut registry = registry_with_routes();
        registry
            .annotate_method("Cat", "findAll", ApiOperation::summary("a"))
            .unwrap();
        registry
            .annotate_class("Cat", ApiSecurity::oauth2().with_scopes(["read:cats"]))
            .unwrap();
        registry
            .annotate_class("Cat", ApiSecurity::api_key().named("X-API-KEY"))
            .unwrap();

        let security = registry
            .fragment("Cat", "findAll")
            .unwrap()
            .property
            .security
            .clone()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&security).unwrap(),
            json!([{"oauth2": ["read:cats"]}, {"X-API-KEY": []}])
        );
    }

    #[test]
    fn test_class_annotations_need_a_known_controller() {
        let mut registry = Registry::new();
        let err = registry.annotate_class("Dog", ApiSecurity::basic()).unwrap_err();
        assert_eq!(err, Error::UnknownController("Dog".to_string()));
        let err = registry
            .annotate_class("Dog", ApiDocument::new(Tag::new("Dog")))
            .unwrap_err();
        assert_eq!(err, Error::UnknownController("Dog".to_string()));
    }

    #[test]
    fn test_document_freezes_converted_paths() {
        let mut registry = registry_with_routes();
        registry
            .annotate_method("Cat", "findById", ApiOperation::summary("find"))
            .unwrap();
        registry
            .annotate_class("Cat", ApiDocument::new(Tag::new("Cat").with_description("cats")))
            .unwrap();

        let assembled = registry.assembled_paths();
        assert_eq!(assembled.len(), 1);
        assert_eq!(assembled[0].path, "/{id}");
        assert_eq!(assembled[0].method, HttpMethod::Get);
        assert_eq!(assembled[0].operation.tags, Some(vec!["Cat".to_string()]));
        assert_eq!(registry.tags().len(), 1);

        // later mutation is not observed by the frozen copy
        registry.annotate_class("Cat", ApiSecurity::bearer()).unwrap();
        assert_eq!(registry.assembled_paths()[0].operation.security, None);
    }

    #[test]
    fn test_document_applied_twice_appends_again() {
        let mut registry = registry_with_routes();
        registry
            .annotate_method("Cat", "findById", ApiOperation::summary("find"))
            .unwrap();
        registry
            .annotate_class("Cat", ApiDocument::new(Tag::new("Cat")))
            .unwrap();
        registry
            .annotate_class("Cat", ApiDocument::new(Tag::new("Cat")))
            .unwrap();

        let assembled = registry.assembled_paths();
        assert_eq!(assembled.len(), 2);
        assert_eq!(assembled[0], assembled[1]);
        let names: Vec<&str> = registry.tags().iter().map(|tag| tag.name.as_str()).collect();
        assert_eq!(names, vec!["Cat", "Cat"]);
    }

    #[test]
    fn test_document_on_routes_without_fragments_only_adds_tags() {
        let mut registry = registry_with_routes();
        registry
            .annotate_class("Cat", ApiDocument::tags(vec![Tag::new("Cat"), Tag::new("Pets")]))
            .unwrap();

        assert!(registry.assembled_paths().is_empty());
        assert_eq!(registry.tags().len(), 2);
        assert!(registry.controller("Cat").unwrap().finalized);
    }

    #[test]
    fn test_operation_external_docs_and_extensions_reach_assembled_path() {
        let mut registry = registry_with_routes();
        registry
            .annotate_method(
                "Cat",
                "findAll",
                ApiOperation::summary("list")
                    .with_external_docs("https://docs.example.com/cats", None)
                    .with_extension("x-codeSamples", json!([{"lang": "sh", "source": "curl /"}])),
            )
            .unwrap();
        registry
            .annotate_method(
                "Cat",
                "findAll",
                ApiOperation::new().with_extension("x-internal", json!(true)),
            )
            .unwrap();
        registry
            .annotate_class("Cat", ApiDocument::new(Tag::new("Cat")))
            .unwrap();

        let operation = &registry.assembled_paths()[0].operation;
        assert_eq!(operation.summary.as_deref(), Some("list"));
        assert_eq!(
            operation.external_docs.as_ref().map(|docs| docs.url.as_str()),
            Some("https://docs.example.com/cats")
        );
        let value = serde_json::to_value(operation).unwrap();
        assert_eq!(value["externalDocs"]["url"], "https://docs.example.com/cats");
        assert_eq!(value["x-codeSamples"][0]["lang"], "sh");
        assert_eq!(value["x-internal"], true);
    }

    #[test]
    fn test_document_requires_routes_for_every_fragment() {
        let mut registry = registry_with_routes();
        registry
            .annotate_method("Cat", "unrouted", ApiParameter::query("q"))
            .unwrap();
        let err = registry
            .annotate_class("Cat", ApiDocument::new(Tag::new("Cat")))
            .unwrap_err();
        assert_eq!(
            err,
            Error::MissingRoute {
                controller: "Cat".to_string(),
                method: "unrouted".to_string(),
            }
        );
        assert!(registry.assembled_paths().is_empty());
    }

    #[test]
    fn test_schema_annotation_registers_globally() {
        let mut registry = Registry::new();
        registry
            .annotate_method("Cat", "save", ApiSchema::new("CatSchema", Schema::object()))
            .unwrap();
        assert_eq!(registry.schemas()["CatSchema"], Schema::object());
        assert!(registry.fragment("Cat", "save").is_none());
    }
}
