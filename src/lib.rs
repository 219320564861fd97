//! GTFS OpenAPI Schema Generator
//!
//! Converts the GTFS field catalog (a JSON list of assets, each with named,
//! typed, described fields) into OpenAPI 3.0 component schemas.
//!
//! # Example
//!
//! ```
//! use gtfs_openapi::{build_schemas, load_catalog_str, BuildOptions};
//!
//! let catalog = load_catalog_str(r#"[{
//!     "fileName": "stop_times",
//!     "properties": [
//!         { "fieldName": "stop_id", "type": "Stop ID", "required": true, "description": "The stop." },
//!         { "fieldName": "arrival_time", "type": "Time", "required": false, "description": "When." }
//!     ]
//! }]"#).unwrap();
//!
//! let schemas = build_schemas(&catalog, &BuildOptions::new()).unwrap();
//!
//! let stop_times = &schemas["StopTimes"];
//! assert_eq!(stop_times["required"][0], "stop_id");
//! assert_eq!(stop_times["properties"]["stop_id"]["type"], "string");
//! assert_eq!(stop_times["properties"]["arrival_time"]["$ref"], "#/MultiDayTime");
//! ```
//!
//! # Options
//!
//! | Option | Values | Default |
//! |--------|--------|---------|
//! | `registry_mode` | `Referenced` (registry emitted, fields use `$ref`), `Inlined` | `Referenced` |
//! | `naming` | `Raw`, `Camel` (`StopTimes`), `CamelSingular` (`StopTime`) | `Camel` |
//! | `envelope` | `None` (bare schema map), `Some(DocumentInfo)` (OpenAPI document) | `None` |

mod assembler;
mod document;
mod error;
mod loader;
mod mapper;
mod markdown;
mod naming;
mod output;
mod registry;
mod types;

pub use assembler::AssetAssembler;
pub use document::{build_document, build_schemas, envelope, DocumentBuilder};
pub use error::{BuildError, LoadError, UnrecognizedTypeError, WriteError};
pub use loader::{is_url, load_catalog, load_catalog_auto, load_catalog_str};
pub use mapper::{canonical_tag, lookup_tag, InlineType, PropertyMapper, TagTarget, VOCABULARY};
pub use markdown::{DescriptionTranscoder, HtmlToMarkdown, Verbatim};
pub use naming::{capitalize, schema_key, singularize, to_camel_case};
pub use output::{render, write_document, OutputFormat};
pub use registry::{RegistryEntry, TypeRegistry};
pub use types::{
    Asset, BuildOptions, Bound, DocumentInfo, Field, FragmentKind, NamedSchema, NamingPolicy,
    Primitive, PrimitiveType, RefLayout, RegistryMode, SchemaFragment, OPENAPI_VERSION,
};

#[cfg(feature = "remote")]
pub use loader::load_catalog_url;
