//! Reusable named schemas shared by all assets.
//!
//! Names, formats, patterns and examples are part of the output contract and
//! are reproduced exactly, including the slash-delimited `Color` pattern.

use serde_json::json;

use crate::types::{Bound, Primitive, PrimitiveType, SchemaFragment};

/// A named, reusable fragment that reference fragments point at.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    pub name: &'static str,
    pub fragment: SchemaFragment,
}

/// Fixed catalog of reusable schema fragments.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRegistry {
    entries: Vec<RegistryEntry>,
}

impl TypeRegistry {
    /// The standard GTFS registry, in output order.
    pub fn standard() -> Self {
        use PrimitiveType::{Integer, Number, String as Str};

        let entry = |name: &'static str, fragment: SchemaFragment| RegistryEntry { name, fragment };
        let primitive = SchemaFragment::primitive;

        let entries = vec![
            entry(
                "Color",
                primitive(
                    Primitive::new(Str)
                        .format("hex")
                        .pattern("/^[A-F0-9]{6}$/")
                        .example(json!("FFFFFF")),
                ),
            ),
            entry(
                "CurrencyCode",
                primitive(
                    Primitive::new(Str)
                        .format("ISO 4217")
                        .faker("finance.currencyCode")
                        .example(json!("CAD")),
                ),
            ),
            entry(
                "Date",
                primitive(Primitive::new(Str).format("date").example(json!("20180913"))),
            ),
            entry(
                "Email",
                primitive(
                    Primitive::new(Str)
                        .format("email")
                        .faker("internet.exampleEmail")
                        .example(json!("example@example.com")),
                ),
            ),
            entry(
                "LanguageCode",
                primitive(
                    Primitive::new(Str)
                        .format("IETF BCP 47")
                        .faker("random.locale")
                        .example(json!("en-US")),
                ),
            ),
            entry(
                "Latitude",
                primitive(
                    Primitive::new(Number)
                        .format("double")
                        .minimum(Bound::Float(-90.0))
                        .maximum(Bound::Float(90.0))
                        .faker("address.latitude")
                        .example(json!(41.890169)),
                ),
            ),
            entry(
                "Longitude",
                primitive(
                    Primitive::new(Number)
                        .format("double")
                        .minimum(Bound::Float(-180.0))
                        .maximum(Bound::Float(180.0))
                        .faker("address.longitude")
                        .example(json!(12.492269)),
                ),
            ),
            entry(
                "MultiDayTime",
                primitive(
                    Primitive::new(Str)
                        .format("Time from \"noon minus 12h\", 24h+ format")
                        .pattern(r"^\d{2}:[0-5][0-9]$")
                        .example(json!("25:35:00")),
                ),
            ),
            entry(
                "NonNegativeFloat",
                primitive(
                    Primitive::new(Number)
                        .format("float")
                        .minimum(Bound::Int(0)),
                ),
            ),
            entry(
                "NonNegativeInteger",
                primitive(Primitive::new(Integer).minimum(Bound::Int(0))),
            ),
            // Zero is excluded by splitting into two disjoint branches.
            entry(
                "NonNullInteger",
                SchemaFragment::union(vec![
                    primitive(Primitive::new(Integer).minimum(Bound::Int(1))),
                    primitive(Primitive::new(Integer).maximum(Bound::Int(-1))),
                ]),
            ),
            entry(
                "PhoneNumber",
                primitive(
                    Primitive::new(Str)
                        .format("phone")
                        .faker("phone.phoneNumber"),
                ),
            ),
            entry(
                "PositiveFloat",
                primitive(
                    Primitive::new(Number)
                        .format("float")
                        .minimum(Bound::Int(1)),
                ),
            ),
            entry(
                "PositiveInteger",
                primitive(Primitive::new(Integer).minimum(Bound::Int(1))),
            ),
            entry(
                "Text",
                primitive(Primitive::new(Str).faker("lorem.paragraph"))
                    .with_description("Human-readable text")
                    .with_leading_description(),
            ),
            entry(
                "Timezone",
                primitive(
                    Primitive::new(Str)
                        .format("tz")
                        .pattern("^[w/]*$")
                        .example(json!("America/Los_Angeles")),
                ),
            ),
            entry(
                "URL",
                primitive(Primitive::new(Str).format("url").faker("internet.url")),
            ),
        ];

        Self { entries }
    }

    /// Look up an entry by its canonical name.
    pub fn lookup(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// All entries, in output order.
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Copy of this registry with every description passed through `f`.
    pub fn map_descriptions(&self, f: &dyn Fn(&str) -> String) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|entry| {
                let mut fragment = entry.fragment.clone();
                fragment.map_descriptions(f);
                RegistryEntry {
                    name: entry.name,
                    fragment,
                }
            })
            .collect();
        Self { entries }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
