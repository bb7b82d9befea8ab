//! OpenAPI from annotations - assemble an OpenAPI document from declarative
//! route annotations and serve it with Swagger UI.
//!
//! Handler methods are described by small annotation values that merge their
//! slice of OpenAPI semantics into a [`registry::Registry`]. At serve time the
//! registry is reduced into a single document and exposed through three
//! read-only endpoints.
//!
//! # Architecture
//!
//! 1. [`route`] - Route facts (path template and verb) supplied by the router
//! 2. [`registry`] - Aggregation context holding routes, fragments, schemas and tags
//! 3. [`annotations`] - Operation, response, parameter, request body, security,
//!    schema and grouping annotations
//! 4. [`path`] - Router path syntax to OpenAPI path templates
//! 5. [`builder`] - Document-level metadata (info, servers, security schemes)
//! 6. [`assembler`] - Reduces the registry into the document and serves it
//! 7. [`viewer`] - Swagger UI page and init script
//! 8. [`manifest`] - Declarative YAML/JSON description of controllers
//! 9. [`serializer`] - Serializes the document to YAML or JSON
//!
//! # Example Usage
//!
//! ```
//! use openapi_from_annotations::{
//!     annotations::{ApiDocument, ApiOperation, ApiResponse, ApiSecurity},
//!     assembler::{swagger, ServeOptions},
//!     builder::DocumentBuilder,
//!     document::Tag,
//!     registry::Registry,
//!     route::HttpMethod,
//!     schema::{Schema, SchemaRef},
//! };
//!
//! let mut registry = Registry::new();
//! registry.define_schema("CatSchema", Schema::object());
//!
//! // the router records where each handler lives
//! registry.register_route("Cat", "findById", "/cat/:id", HttpMethod::Get);
//!
//! // method annotations, operation first
//! registry.annotate_method("Cat", "findById", ApiOperation::summary("find by id cat"))?;
//! registry.annotate_method(
//!     "Cat",
//!     "findById",
//!     ApiResponse::new(200, "OK").with_schema(SchemaRef::named("CatSchema")),
//! )?;
//!
//! // class annotations, grouping last
//! registry.annotate_class("Cat", ApiSecurity::bearer())?;
//! registry.annotate_class("Cat", ApiDocument::new(Tag::new("Cat")))?;
//!
//! let base = DocumentBuilder::new()
//!     .title("Cats")
//!     .add_bearer_auth()
//!     .build();
//! let docs = swagger("/api-docs", base, &registry, &ServeOptions::default())?;
//!
//! assert!(docs.document().paths.contains_key("/cat/{id}"));
//! assert!(docs.respond("/api-docs/json").is_some());
//! # Ok::<(), openapi_from_annotations::error::Error>(())
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which renders a
//! [`manifest::Manifest`] into a document and a static viewer site.

pub mod cli;
pub mod route;
pub mod path;
pub mod schema;
pub mod document;
pub mod registry;
pub mod annotations;
pub mod builder;
pub mod assembler;
pub mod viewer;
pub mod manifest;
pub mod serializer;
pub mod error;
