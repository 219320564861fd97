//! Core types: catalog records, schema fragments and build options.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// OpenAPI version written into the document envelope.
pub const OPENAPI_VERSION: &str = "3.0.3";

/// One record type of the catalog (a GTFS file such as `stops.txt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "fileName")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "properties")]
    pub fields: Vec<Field>,
}

/// One named, typed attribute of an [`Asset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "fieldName")]
    pub name: String,
    /// Free-form type tag, e.g. `"Non-negative integer"` or `"Stop ID"`.
    #[serde(rename = "type")]
    pub type_tag: String,
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

/// Base type of a primitive fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Number,
    Integer,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Number => "number",
            PrimitiveType::Integer => "integer",
        }
    }
}

/// A numeric bound, kept integral or floating so `1` and `-90.0` render as written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Int(i64),
    Float(f64),
}

impl Bound {
    fn to_value(self) -> Value {
        match self {
            Bound::Int(i) => json!(i),
            Bound::Float(f) => json!(f),
        }
    }
}

/// Inline schema shape: a base type plus optional constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub ty: PrimitiveType,
    pub format: Option<String>,
    pub minimum: Option<Bound>,
    pub maximum: Option<Bound>,
    pub pattern: Option<String>,
    pub enumeration: Option<Vec<String>>,
    /// `x-faker` hint for mock servers.
    pub faker: Option<String>,
    pub example: Option<Value>,
}

impl Primitive {
    pub fn new(ty: PrimitiveType) -> Self {
        Self {
            ty,
            format: None,
            minimum: None,
            maximum: None,
            pattern: None,
            enumeration: None,
            faker: None,
            example: None,
        }
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn minimum(mut self, bound: Bound) -> Self {
        self.minimum = Some(bound);
        self
    }

    pub fn maximum(mut self, bound: Bound) -> Self {
        self.maximum = Some(bound);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn enumeration(mut self, values: Vec<String>) -> Self {
        self.enumeration = Some(values);
        self
    }

    pub fn faker(mut self, faker: impl Into<String>) -> Self {
        self.faker = Some(faker.into());
        self
    }

    pub fn example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }
}

/// Exactly one of reference, primitive or union.
#[derive(Debug, Clone, PartialEq)]
pub enum FragmentKind {
    /// Points at a registry entry by name.
    Reference { target: String },
    Primitive(Primitive),
    /// `oneOf` over the alternatives, order preserved.
    Union { alternatives: Vec<SchemaFragment> },
}

/// One OpenAPI schema value with an optional markdown description.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaFragment {
    pub kind: FragmentKind,
    pub description: Option<String>,
    /// Render `description` before the other keys instead of after them.
    pub leading_description: bool,
}

impl SchemaFragment {
    pub fn reference(target: impl Into<String>) -> Self {
        Self {
            kind: FragmentKind::Reference {
                target: target.into(),
            },
            description: None,
            leading_description: false,
        }
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Self {
            kind: FragmentKind::Primitive(primitive),
            description: None,
            leading_description: false,
        }
    }

    pub fn union(alternatives: Vec<SchemaFragment>) -> Self {
        Self {
            kind: FragmentKind::Union { alternatives },
            description: None,
            leading_description: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Place the description first when rendered. The flag survives
    /// `with_description`, so a replaced description keeps its slot.
    pub fn with_leading_description(mut self) -> Self {
        self.leading_description = true;
        self
    }

    /// Rewrite every description in this fragment, union branches included.
    pub fn map_descriptions(&mut self, f: &dyn Fn(&str) -> String) {
        if let Some(description) = &self.description {
            self.description = Some(f(description));
        }
        if let FragmentKind::Union { alternatives } = &mut self.kind {
            for alternative in alternatives {
                alternative.map_descriptions(f);
            }
        }
    }

    /// Convert to OpenAPI-shaped JSON, writing `$ref` pointers with `layout`.
    pub fn to_value(&self, layout: RefLayout) -> Value {
        let mut map = Map::new();
        if self.leading_description {
            if let Some(description) = &self.description {
                map.insert("description".into(), Value::String(description.clone()));
            }
        }
        match &self.kind {
            FragmentKind::Reference { target } => {
                map.insert("$ref".into(), Value::String(layout.pointer(target)));
            }
            FragmentKind::Primitive(p) => {
                map.insert("type".into(), Value::String(p.ty.as_str().into()));
                if let Some(format) = &p.format {
                    map.insert("format".into(), Value::String(format.clone()));
                }
                if let Some(minimum) = p.minimum {
                    map.insert("minimum".into(), minimum.to_value());
                }
                if let Some(maximum) = p.maximum {
                    map.insert("maximum".into(), maximum.to_value());
                }
                if let Some(pattern) = &p.pattern {
                    map.insert("pattern".into(), Value::String(pattern.clone()));
                }
                if let Some(values) = &p.enumeration {
                    map.insert("enum".into(), json!(values));
                }
                if let Some(faker) = &p.faker {
                    map.insert("x-faker".into(), Value::String(faker.clone()));
                }
                if let Some(example) = &p.example {
                    map.insert("example".into(), example.clone());
                }
            }
            FragmentKind::Union { alternatives } => {
                let branches = alternatives.iter().map(|a| a.to_value(layout)).collect();
                map.insert("oneOf".into(), Value::Array(branches));
            }
        }
        if !self.leading_description {
            if let Some(description) = &self.description {
                map.insert("description".into(), Value::String(description.clone()));
            }
        }
        Value::Object(map)
    }
}

/// Object schema produced for one asset.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSchema {
    pub key: String,
    /// Required field names, in declaration order.
    pub required: Vec<String>,
    /// Field name to fragment, in declaration order.
    pub properties: Vec<(String, SchemaFragment)>,
}

impl NamedSchema {
    pub fn property(&self, name: &str) -> Option<&SchemaFragment> {
        self.properties
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, fragment)| fragment)
    }

    pub fn to_value(&self, layout: RefLayout) -> Value {
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|(name, fragment)| (name.clone(), fragment.to_value(layout)))
            .collect();
        json!({
            "type": "object",
            "required": self.required,
            "properties": properties,
        })
    }
}

/// Where `$ref` pointers point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefLayout {
    /// Bare schema map: `#/Name`.
    #[default]
    Root,
    /// OpenAPI document: `#/components/schemas/Name`.
    Components,
}

impl RefLayout {
    pub fn pointer(&self, target: &str) -> String {
        match self {
            RefLayout::Root => format!("#/{}", target),
            RefLayout::Components => format!("#/components/schemas/{}", target),
        }
    }
}

/// Whether registry types are referenced or copied into each field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegistryMode {
    /// Registry entries are emitted once and fields use `$ref`.
    #[default]
    Referenced,
    /// No registry entries; every field carries its full shape.
    Inlined,
}

/// How an asset name becomes a schema key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NamingPolicy {
    /// Use the catalog name unchanged.
    Raw,
    /// `stop_times` becomes `StopTimes`.
    #[default]
    Camel,
    /// `stop_times` becomes `StopTime`.
    CamelSingular,
}

/// `info` block of the OpenAPI envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    pub version: String,
    pub license_name: String,
    pub license_url: String,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: "GTFS Schedule".into(),
            version: "1.0.0".into(),
            license_name: "Apache 2.0".into(),
            license_url: "https://www.apache.org/licenses/LICENSE-2.0.html".into(),
        }
    }
}

/// Options for building the schema document.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub registry_mode: RegistryMode,
    pub naming: NamingPolicy,
    /// When set, the schema map is wrapped in an OpenAPI document.
    pub envelope: Option<DocumentInfo>,
}

impl BuildOptions {
    /// Referenced registry, camel-cased keys, bare schema map.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry_mode(mut self, mode: RegistryMode) -> Self {
        self.registry_mode = mode;
        self
    }

    pub fn naming(mut self, naming: NamingPolicy) -> Self {
        self.naming = naming;
        self
    }

    pub fn envelope(mut self, info: DocumentInfo) -> Self {
        self.envelope = Some(info);
        self
    }

    /// Pointer layout implied by the output shape.
    pub fn ref_layout(&self) -> RefLayout {
        if self.envelope.is_some() {
            RefLayout::Components
        } else {
            RefLayout::Root
        }
    }
}
