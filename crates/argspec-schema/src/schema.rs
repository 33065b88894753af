//! # Input Schemas
//!
//! The JSON-Schema-like object a tool advertises for its arguments:
//!
//! ```json
//! {"type": "object",
//!  "properties": {"query": {"type": "string", "description": "..."}},
//!  "required": ["query"]}
//! ```
//!
//! `properties` is omitted when there are no arguments and `required` is
//! omitted when nothing is required. Some clients treat an empty object or
//! an empty list differently from an absent key, so absent is what goes on
//! the wire.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use argspec_core::{ArgSpec, SchemaType};

/// Schema of array elements. Arrays only ever hold strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ItemsSchema {
    #[serde(rename = "type")]
    pub item_type: SchemaType,
}

/// Schema of one property.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemsSchema>,
    pub description: String,
}

impl PropertySchema {
    pub fn new(schema_type: SchemaType, description: impl Into<String>) -> Self {
        let items = match schema_type {
            SchemaType::StringArray => Some(ItemsSchema {
                item_type: SchemaType::String,
            }),
            _ => None,
        };
        Self {
            schema_type,
            items,
            description: description.into(),
        }
    }
}

/// Properties in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, PropertySchema)>,
}

impl Properties {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&PropertySchema> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, schema)| schema)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertySchema)> {
        self.entries.iter().map(|(key, schema)| (key.as_str(), schema))
    }

    fn upsert(&mut self, name: String, schema: PropertySchema) {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = schema,
            None => self.entries.push((name, schema)),
        }
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, schema) in &self.entries {
            map.serialize_entry(name, schema)?;
        }
        map.end()
    }
}

/// Input schema of one tool.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    schema_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<Properties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<Vec<String>>,
}

impl InputSchema {
    /// Always `"object"`.
    pub fn schema_type(&self) -> &'static str {
        self.schema_type
    }

    /// `None` when the tool takes no arguments.
    pub fn properties(&self) -> Option<&Properties> {
        self.properties.as_ref()
    }

    /// `None` when no argument is required.
    pub fn required(&self) -> Option<&[String]> {
        self.required.as_deref()
    }

    pub fn to_value(&self) -> Value {
        // Serializing plain strings and maps into a Value cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Assembles an [`InputSchema`] one property at a time.
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    properties: Properties,
    required: Vec<String>,
}

impl SchemaBuilder {
    pub fn object() -> Self {
        Self::default()
    }

    /// Add a property. Re-adding a name replaces the earlier property in
    /// place and updates its required flag.
    pub fn property(
        mut self,
        name: impl Into<String>,
        schema_type: SchemaType,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let name = name.into();
        self.required.retain(|key| *key != name);
        if required {
            self.required.push(name.clone());
        }
        self.properties
            .upsert(name, PropertySchema::new(schema_type, description));
        self
    }

    pub fn required_string(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.property(name, SchemaType::String, description, true)
    }

    pub fn optional_string(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.property(name, SchemaType::String, description, false)
    }

    pub fn required_integer(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.property(name, SchemaType::Integer, description, true)
    }

    pub fn optional_integer(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.property(name, SchemaType::Integer, description, false)
    }

    pub fn required_boolean(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.property(name, SchemaType::Boolean, description, true)
    }

    pub fn optional_boolean(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.property(name, SchemaType::Boolean, description, false)
    }

    pub fn optional_string_array(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.property(name, SchemaType::StringArray, description, false)
    }

    /// Add the property described by an argument declaration.
    pub fn arg(self, spec: &dyn ArgSpec) -> Self {
        self.property(
            spec.key(),
            spec.schema_type(),
            spec.description(),
            spec.is_required(),
        )
    }

    pub fn build(self) -> InputSchema {
        InputSchema {
            schema_type: "object",
            properties: (!self.properties.is_empty()).then_some(self.properties),
            required: (!self.required.is_empty()).then_some(self.required),
        }
    }
}

/// Derive the input schema for an ordered list of argument declarations.
pub fn schema_for(specs: &[&dyn ArgSpec]) -> InputSchema {
    specs
        .iter()
        .fold(SchemaBuilder::object(), |builder, spec| builder.arg(*spec))
        .build()
}
