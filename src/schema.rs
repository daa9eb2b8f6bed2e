//! Record schema: the fields a where-clause may reference.
//!
//! The schema is owned by whatever builds the filter input types upstream;
//! this crate only reads it. It deserializes from a JSON file so the CLI can
//! be pointed at a collection description:
//!
//! ```json
//! {
//!   "collection": "foos",
//!   "fields": [
//!     { "name": "objectId", "type": "objectId", "nullable": true }
//!   ]
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Domain type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    ObjectId,
    String,
    Int,
    Decimal,
    Boolean,
}

impl FieldType {
    /// Whether ordering comparisons are defined for values of this type.
    pub fn is_ordered(self) -> bool {
        !matches!(self, FieldType::Boolean)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::ObjectId => "objectId",
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Decimal => "decimal",
            FieldType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A single record field. `name` may be a dotted path into an embedded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub nullable: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        FieldDescriptor {
            name: name.into(),
            field_type,
            nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub collection: String,
    pub fields: Vec<FieldDescriptor>,
}

impl Schema {
    pub fn new(collection: impl Into<String>) -> Self {
        Schema {
            collection: collection.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
