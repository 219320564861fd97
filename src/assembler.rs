//! Per-asset object schema assembly.

use tracing::debug;

use crate::error::BuildError;
use crate::mapper::PropertyMapper;
use crate::naming::schema_key;
use crate::types::{Asset, NamedSchema, NamingPolicy, SchemaFragment};

/// Builds one object schema per catalog asset.
pub struct AssetAssembler<'a> {
    mapper: PropertyMapper<'a>,
    naming: NamingPolicy,
}

impl<'a> AssetAssembler<'a> {
    pub fn new(mapper: PropertyMapper<'a>, naming: NamingPolicy) -> Self {
        Self { mapper, naming }
    }

    /// Assemble the object schema for `asset`.
    ///
    /// Fields are mapped in declaration order and the first unrecognized type
    /// aborts the asset. A field name declared twice keeps its first
    /// position and its last fragment, and is required if any declaration is.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::UnrecognizedType` naming the asset and field.
    pub fn assemble(&self, asset: &Asset) -> Result<NamedSchema, BuildError> {
        let key = schema_key(&asset.name, self.naming);
        debug!(asset = %asset.name, key = %key, fields = asset.fields.len(), "assembling asset");

        let mut required: Vec<String> = Vec::new();
        let mut properties: Vec<(String, SchemaFragment)> = Vec::with_capacity(asset.fields.len());

        for field in &asset.fields {
            let fragment = self
                .mapper
                .map(&field.type_tag, &field.description)
                .map_err(|source| BuildError::UnrecognizedType {
                    asset: asset.name.clone(),
                    field: field.name.clone(),
                    source,
                })?;

            match properties.iter_mut().find(|entry| entry.0 == field.name) {
                Some((_, existing)) => *existing = fragment,
                None => properties.push((field.name.clone(), fragment)),
            }

            if field.required && !required.contains(&field.name) {
                required.push(field.name.clone());
            }
        }

        Ok(NamedSchema {
            key,
            required,
            properties,
        })
    }
}
