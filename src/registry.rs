//! Metadata registry accumulating per-route documentation facts.
//!
//! A [`Registry`] is an explicit aggregation context: the routing layer records
//! route facts into it, annotation processors merge operation fragments into it,
//! and [`crate::assembler`] reads it once to build the document. Entries are
//! created lazily on first touch and never evicted.

use crate::annotations::{ClassAnnotation, MethodAnnotation};
use crate::document::{
    ExternalDocs, Operation, Parameter, RequestBody, Response, SecurityRequirement, Tag,
};
use crate::error::Result;
use crate::route::{HttpMethod, RouteFact};
use crate::schema::{NamedSchema, Schema};
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

/// Partial operation accumulated while annotations run.
///
/// `responses` stays `None` until `ApiOperation` creates it; declaring a
/// response before that is an ordering violation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationFragment {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub operation_id: Option<String>,
    pub deprecated: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub security: Option<Vec<SecurityRequirement>>,
    pub parameters: Option<Vec<Parameter>>,
    pub request_body: Option<RequestBody>,
    pub responses: Option<IndexMap<String, Response>>,
    pub external_docs: Option<ExternalDocs>,
    pub extensions: IndexMap<String, Value>,
}

impl OperationFragment {
    /// Merge `other` into `self`.
    ///
    /// Scalars present in `other` overwrite, `responses` and `extensions` merge
    /// per key, `parameters` and `security` are appended in order.
    pub fn merge(&mut self, other: OperationFragment) {
        let OperationFragment {
            summary,
            description,
            operation_id,
            deprecated,
            tags,
            security,
            parameters,
            request_body,
            responses,
            external_docs,
            extensions,
        } = other;

        if summary.is_some() {
            self.summary = summary;
        }
        if description.is_some() {
            self.description = description;
        }
        if operation_id.is_some() {
            self.operation_id = operation_id;
        }
        if deprecated.is_some() {
            self.deprecated = deprecated;
        }
        if tags.is_some() {
            self.tags = tags;
        }
        if request_body.is_some() {
            self.request_body = request_body;
        }
        if external_docs.is_some() {
            self.external_docs = external_docs;
        }
        self.extensions.extend(extensions);
        if let Some(security) = security {
            self.security.get_or_insert_with(Vec::new).extend(security);
        }
        if let Some(parameters) = parameters {
            self.parameters.get_or_insert_with(Vec::new).extend(parameters);
        }
        if let Some(responses) = responses {
            self.responses.get_or_insert_with(IndexMap::new).extend(responses);
        }
    }

    /// Snapshot the fragment as a finished operation
    pub fn to_operation(&self) -> Operation {
        Operation {
            tags: self.tags.clone(),
            summary: self.summary.clone(),
            description: self.description.clone(),
            operation_id: self.operation_id.clone(),
            parameters: self.parameters.clone(),
            request_body: self.request_body.clone(),
            responses: self.responses.clone().unwrap_or_default(),
            deprecated: self.deprecated,
            security: self.security.clone(),
            external_docs: self.external_docs.clone(),
            extensions: self.extensions.clone(),
        }
    }
}

/// The in-progress documentation of one handler method
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    /// Path copied from the route fact (router syntax)
    pub path: Option<String>,
    pub method: Option<HttpMethod>,
    pub property: OperationFragment,
}

/// Everything recorded for one controller
#[derive(Debug, Clone, Default)]
pub struct ControllerEntry {
    /// Route facts keyed by handler method name
    pub routes: IndexMap<String, RouteFact>,
    /// Operation fragments keyed by handler method name
    pub fragments: IndexMap<String, Fragment>,
    /// Set once `ApiDocument` has frozen the fragments
    pub finalized: bool,
}

/// A finalized `{path, method, operation}` triple, frozen by value
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledPath {
    /// OpenAPI path template (`/cat/{id}`)
    pub path: String,
    pub method: HttpMethod,
    pub operation: Operation,
}

/// Aggregation context shared by route registration, annotations and assembly
#[derive(Debug, Default)]
pub struct Registry {
    controllers: IndexMap<String, ControllerEntry>,
    schemas: IndexMap<String, Schema>,
    tags: Vec<Tag>,
    assembled_paths: Vec<AssembledPath>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entry for `controller`, creating an empty one if absent
    pub fn get_or_create(&mut self, controller: &str) -> &mut ControllerEntry {
        self.controllers
            .entry(controller.to_string())
            .or_insert_with(|| {
                debug!("Creating registry entry for controller {}", controller);
                ControllerEntry::default()
            })
    }

    pub fn controller(&self, controller: &str) -> Option<&ControllerEntry> {
        self.controllers.get(controller)
    }

    pub(crate) fn controller_mut(&mut self, controller: &str) -> Option<&mut ControllerEntry> {
        self.controllers.get_mut(controller)
    }

    /// Record the router-resolved path and verb for a handler method.
    ///
    /// This must happen before `ApiOperation` runs for that method.
    pub fn register_route(
        &mut self,
        controller: &str,
        method_name: &str,
        path: &str,
        method: HttpMethod,
    ) {
        debug!("Registering route {}::{} -> {} {}", controller, method_name, method, path);
        self.get_or_create(controller)
            .routes
            .insert(method_name.to_string(), RouteFact::new(path, method));
    }

    pub fn route(&self, controller: &str, method_name: &str) -> Option<&RouteFact> {
        self.controllers
            .get(controller)
            .and_then(|entry| entry.routes.get(method_name))
    }

    pub fn fragment(&self, controller: &str, method_name: &str) -> Option<&Fragment> {
        self.controllers
            .get(controller)
            .and_then(|entry| entry.fragments.get(method_name))
    }

    /// Get the fragment of a method, creating the controller and fragment if absent
    pub fn fragment_mut(&mut self, controller: &str, method_name: &str) -> &mut Fragment {
        self.get_or_create(controller)
            .fragments
            .entry(method_name.to_string())
            .or_default()
    }

    /// Merge a partial operation into the fragment of a method
    pub fn merge_property(
        &mut self,
        controller: &str,
        method_name: &str,
        partial: OperationFragment,
    ) {
        self.fragment_mut(controller, method_name).property.merge(partial);
    }

    /// Register a named schema; a later definition with the same name replaces it
    pub fn define_schema(&mut self, name: &str, schema: Schema) {
        if self.schemas.insert(name.to_string(), schema).is_some() {
            debug!("Schema {} redefined, keeping the latest definition", name);
        }
    }

    /// Register the schema of a type implementing [`NamedSchema`]
    pub fn register_schema<T: NamedSchema>(&mut self) {
        self.define_schema(T::schema_name(), T::schema());
    }

    pub fn schemas(&self) -> &IndexMap<String, Schema> {
        &self.schemas
    }

    /// Tag objects in the order controllers were finalized
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn assembled_paths(&self) -> &[AssembledPath] {
        &self.assembled_paths
    }

    pub(crate) fn push_finalized(&mut self, tags: Vec<Tag>, paths: Vec<AssembledPath>) {
        self.tags.extend(tags);
        self.assembled_paths.extend(paths);
    }

    /// Apply a method-level annotation
    pub fn annotate_method<A: MethodAnnotation>(
        &mut self,
        controller: &str,
        method_name: &str,
        annotation: A,
    ) -> Result<()> {
        annotation.apply(self, controller, method_name)
    }

    /// Apply a class-level annotation
    pub fn annotate_class<A: ClassAnnotation>(
        &mut self,
        controller: &str,
        annotation: A,
    ) -> Result<()> {
        annotation.apply(self, controller)
    }
}
