//! Type-tag mapping: one catalog type tag becomes one schema fragment.
//!
//! # Vocabulary
//!
//! Tags are matched after normalization. Any tag containing `ID` collapses to
//! `id`, since foreign keys are not expressed in the schema. Otherwise the tag
//! is trimmed, inner whitespace is collapsed and the result is lower-cased.
//!
//! | Canonical tag | Referenced | Inlined |
//! |---------------|------------|---------|
//! | `color`, `date`, `email`, ... | `$ref` to the registry entry | the entry's shape |
//! | `id` | `{type: string}` | same |
//! | `enum` | `{type: string, enum: []}` | same |
//! | `float` | `{type: number, format: float}` | same |
//! | `integer` | `{type: integer}` | same |
//! | `text, url, email, or phone number` | `oneOf` of four refs | `oneOf` of four shapes |

use tracing::trace;

use crate::error::UnrecognizedTypeError;
use crate::markdown::DescriptionTranscoder;
use crate::registry::TypeRegistry;
use crate::types::{Primitive, PrimitiveType, RegistryMode, SchemaFragment};

/// What a canonical tag produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagTarget {
    /// A registry entry, referenced or inlined depending on the mode.
    Registry(&'static str),
    /// A fixed inline primitive that never goes through the registry.
    Inline(InlineType),
    /// `oneOf` over registry entries, in this order.
    Union(&'static [&'static str]),
}

/// Inline shapes that have no registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineType {
    Id,
    Enum,
    Float,
    Integer,
}

impl InlineType {
    fn primitive(self) -> Primitive {
        match self {
            InlineType::Id => Primitive::new(PrimitiveType::String),
            // Values are filled in downstream.
            InlineType::Enum => Primitive::new(PrimitiveType::String).enumeration(Vec::new()),
            InlineType::Float => Primitive::new(PrimitiveType::Number).format("float"),
            InlineType::Integer => Primitive::new(PrimitiveType::Integer),
        }
    }
}

/// The closed vocabulary, one self-contained entry per canonical tag.
pub const VOCABULARY: &[(&str, TagTarget)] = &[
    ("color", TagTarget::Registry("Color")),
    ("currency code", TagTarget::Registry("CurrencyCode")),
    ("date", TagTarget::Registry("Date")),
    ("email", TagTarget::Registry("Email")),
    ("enum", TagTarget::Inline(InlineType::Enum)),
    ("id", TagTarget::Inline(InlineType::Id)),
    ("language code", TagTarget::Registry("LanguageCode")),
    ("latitude", TagTarget::Registry("Latitude")),
    ("longitude", TagTarget::Registry("Longitude")),
    ("positive float", TagTarget::Registry("PositiveFloat")),
    ("non-negative float", TagTarget::Registry("NonNegativeFloat")),
    ("float", TagTarget::Inline(InlineType::Float)),
    ("positive integer", TagTarget::Registry("PositiveInteger")),
    ("non-negative integer", TagTarget::Registry("NonNegativeInteger")),
    ("non-null integer", TagTarget::Registry("NonNullInteger")),
    ("integer", TagTarget::Inline(InlineType::Integer)),
    ("phone number", TagTarget::Registry("PhoneNumber")),
    ("time", TagTarget::Registry("MultiDayTime")),
    ("text", TagTarget::Registry("Text")),
    ("timezone", TagTarget::Registry("Timezone")),
    ("url", TagTarget::Registry("URL")),
    (
        "text, url, email, or phone number",
        TagTarget::Union(&["Text", "URL", "Email", "PhoneNumber"]),
    ),
];

/// Normalize a raw catalog tag to its lookup key.
pub fn canonical_tag(raw: &str) -> String {
    if raw.contains("ID") {
        return "id".to_string();
    }
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Find the vocabulary entry for a raw tag.
pub fn lookup_tag(raw: &str) -> Option<TagTarget> {
    let canonical = canonical_tag(raw);
    VOCABULARY
        .iter()
        .find(|(tag, _)| *tag == canonical)
        .map(|(_, target)| *target)
}

/// Maps `(type tag, description)` pairs to schema fragments.
pub struct PropertyMapper<'a> {
    registry: &'a TypeRegistry,
    transcoder: &'a dyn DescriptionTranscoder,
    mode: RegistryMode,
}

impl<'a> PropertyMapper<'a> {
    /// `registry` is used for inlined shapes, so its descriptions should
    /// already be transcoded.
    pub fn new(
        registry: &'a TypeRegistry,
        transcoder: &'a dyn DescriptionTranscoder,
        mode: RegistryMode,
    ) -> Self {
        Self {
            registry,
            transcoder,
            mode,
        }
    }

    pub fn mode(&self) -> RegistryMode {
        self.mode
    }

    /// Map one field.
    ///
    /// The field description is transcoded and always replaces whatever
    /// description the chosen fragment carried.
    ///
    /// # Errors
    ///
    /// Returns `UnrecognizedTypeError` if the tag is not in the vocabulary.
    pub fn map(
        &self,
        type_tag: &str,
        description: &str,
    ) -> Result<SchemaFragment, UnrecognizedTypeError> {
        let target = lookup_tag(type_tag).ok_or_else(|| UnrecognizedTypeError {
            tag: type_tag.to_string(),
        })?;
        trace!(tag = type_tag, ?target, "mapping type tag");

        let fragment = match target {
            TagTarget::Registry(name) => self.registry_fragment(name, type_tag)?,
            TagTarget::Inline(inline) => SchemaFragment::primitive(inline.primitive()),
            TagTarget::Union(names) => {
                let alternatives = names
                    .iter()
                    .map(|name| self.registry_fragment(name, type_tag))
                    .collect::<Result<Vec<_>, _>>()?;
                SchemaFragment::union(alternatives)
            }
        };

        Ok(fragment.with_description(self.transcoder.transcode(description)))
    }

    fn registry_fragment(
        &self,
        name: &str,
        type_tag: &str,
    ) -> Result<SchemaFragment, UnrecognizedTypeError> {
        match self.mode {
            RegistryMode::Referenced => Ok(SchemaFragment::reference(name)),
            RegistryMode::Inlined => self
                .registry
                .lookup(name)
                .map(|entry| entry.fragment.clone())
                .ok_or_else(|| UnrecognizedTypeError {
                    tag: type_tag.to_string(),
                }),
        }
    }
}
