//! Document assembly: registry entries plus one object schema per asset.

use serde_json::{json, Map, Value};
use tracing::info;

use crate::assembler::AssetAssembler;
use crate::error::BuildError;
use crate::mapper::PropertyMapper;
use crate::markdown::{DescriptionTranscoder, HtmlToMarkdown};
use crate::registry::TypeRegistry;
use crate::types::{Asset, BuildOptions, DocumentInfo, RegistryMode, OPENAPI_VERSION};

/// Folds the registry and all asset schemas into one schema map.
pub struct DocumentBuilder<'a> {
    registry: TypeRegistry,
    transcoder: &'a dyn DescriptionTranscoder,
}

impl<'a> DocumentBuilder<'a> {
    /// Builder over the standard registry.
    pub fn new(transcoder: &'a dyn DescriptionTranscoder) -> Self {
        Self::with_registry(TypeRegistry::standard(), transcoder)
    }

    pub fn with_registry(registry: TypeRegistry, transcoder: &'a dyn DescriptionTranscoder) -> Self {
        let registry = registry.map_descriptions(&|d| transcoder.transcode(d));
        Self {
            registry,
            transcoder,
        }
    }

    /// Build the schema map.
    ///
    /// In `Referenced` mode the registry entries come first, in registry
    /// order, followed by the assets in catalog order. In `Inlined` mode only
    /// the assets are emitted. Nothing is returned unless every asset
    /// assembles.
    ///
    /// # Errors
    ///
    /// Returns the first assembly error, or `BuildError::DuplicateSchema` if
    /// two schemas end up under the same key.
    pub fn build(
        &self,
        assets: &[Asset],
        options: &BuildOptions,
    ) -> Result<Map<String, Value>, BuildError> {
        let layout = options.ref_layout();
        let mut schemas = Map::new();

        if options.registry_mode == RegistryMode::Referenced {
            for entry in self.registry.entries() {
                schemas.insert(entry.name.to_string(), entry.fragment.to_value(layout));
            }
        }

        let mapper = PropertyMapper::new(&self.registry, self.transcoder, options.registry_mode);
        let assembler = AssetAssembler::new(mapper, options.naming);

        for asset in assets {
            let schema = assembler.assemble(asset)?;
            if schemas.contains_key(&schema.key) {
                return Err(BuildError::DuplicateSchema { key: schema.key });
            }
            schemas.insert(schema.key.clone(), schema.to_value(layout));
        }

        info!(
            assets = assets.len(),
            schemas = schemas.len(),
            mode = ?options.registry_mode,
            "built schema map"
        );
        Ok(schemas)
    }

    /// Build the schema map and wrap it in an OpenAPI document when
    /// `options.envelope` is set.
    pub fn build_document(
        &self,
        assets: &[Asset],
        options: &BuildOptions,
    ) -> Result<Value, BuildError> {
        let schemas = self.build(assets, options)?;
        Ok(match &options.envelope {
            Some(info) => envelope(info, schemas),
            None => Value::Object(schemas),
        })
    }
}

/// Wrap a schema map in a minimal OpenAPI document.
pub fn envelope(info: &DocumentInfo, schemas: Map<String, Value>) -> Value {
    json!({
        "openapi": OPENAPI_VERSION,
        "info": {
            "title": info.title,
            "version": info.version,
            "license": {
                "name": info.license_name,
                "url": info.license_url,
            },
        },
        "paths": {},
        "components": {
            "schemas": schemas,
        },
    })
}

/// Build the schema map with HTML descriptions converted to markdown.
pub fn build_schemas(
    assets: &[Asset],
    options: &BuildOptions,
) -> Result<Map<String, Value>, BuildError> {
    DocumentBuilder::new(&HtmlToMarkdown).build(assets, options)
}

/// Build the output document with HTML descriptions converted to markdown.
pub fn build_document(assets: &[Asset], options: &BuildOptions) -> Result<Value, BuildError> {
    DocumentBuilder::new(&HtmlToMarkdown).build_document(assets, options)
}
