use crate::document::MediaType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix of every `$ref` pointing into `components.schemas`
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Content type used when a schema shorthand names a single type
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// OpenAPI Schema definition
///
/// The common keywords are typed fields; anything else (`minimum`, `oneOf`,
/// vendor extensions, ...) is kept verbatim in `extra` so that schemas coming
/// from outside the crate round-trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The type of the schema (string, integer, object, array, etc.)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Format for primitive types (e.g., "int32", "int64", "float", "double")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Human readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Properties for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
    /// Required field names for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Items schema for array types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Enum values for enum types
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Reference to another schema
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Example value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Any other schema keyword
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Schema {
    fn typed(schema_type: &str) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            ..Self::default()
        }
    }

    pub fn object() -> Self {
        Self::typed("object")
    }

    pub fn string() -> Self {
        Self::typed("string")
    }

    pub fn integer() -> Self {
        Self::typed("integer")
    }

    pub fn number() -> Self {
        Self::typed("number")
    }

    pub fn boolean() -> Self {
        Self::typed("boolean")
    }

    /// Array schema with the given item schema
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::typed("array")
        }
    }

    /// A `$ref` to a named component schema
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(schema_ref(name)),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    /// Add a property to an object schema, optionally marking it required
    pub fn property(mut self, name: &str, schema: Schema, required: bool) -> Self {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(name.to_string(), schema);
        if required {
            self.required
                .get_or_insert_with(Vec::new)
                .push(name.to_string());
        }
        self
    }
}

/// Build the `$ref` string for a component schema name
pub fn schema_ref(name: &str) -> String {
    format!("{}{}", SCHEMA_REF_PREFIX, name)
}

/// A Rust type that is documented as a named component schema.
///
/// This is the typed counterpart of passing a class to a response or request
/// body declaration: the name becomes the `$ref`, the definition can be
/// registered with [`crate::registry::Registry::register_schema`].
pub trait NamedSchema {
    /// Component name, e.g. "CatSchema"
    fn schema_name() -> &'static str;

    /// The schema definition registered under that name
    fn schema() -> Schema;
}

/// Schema shorthand accepted by response and request body declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaRef {
    /// A single named schema, served as `application/json`
    Named(String),
    /// One named schema per content type
    PerContentType(IndexMap<String, String>),
}

impl SchemaRef {
    pub fn named(name: impl Into<String>) -> Self {
        SchemaRef::Named(name.into())
    }

    /// Shorthand for a type implementing [`NamedSchema`]
    pub fn of<T: NamedSchema>() -> Self {
        SchemaRef::Named(T::schema_name().to_string())
    }

    /// Build a per-content-type shorthand from `(content type, schema name)` pairs
    pub fn per_content_type<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        SchemaRef::PerContentType(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Expand the shorthand into a `content` map of `$ref` schemas.
    ///
    /// Names are not checked against registered schemas; an unknown name
    /// yields a dangling `$ref`.
    pub fn to_content(&self) -> IndexMap<String, MediaType> {
        match self {
            SchemaRef::Named(name) => {
                let mut content = IndexMap::new();
                content.insert(
                    DEFAULT_CONTENT_TYPE.to_string(),
                    MediaType::new(Schema::reference(name)),
                );
                content
            }
            SchemaRef::PerContentType(entries) => entries
                .iter()
                .map(|(content_type, name)| {
                    (content_type.clone(), MediaType::new(Schema::reference(name)))
                })
                .collect(),
        }
    }
}
