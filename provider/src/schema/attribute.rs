//! Declarative attribute metadata

use serde::Serialize;
use serde_json::Value;

/// Value type of an attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    /// Ordered list of primitive values
    List(Box<AttributeType>),
    /// Ordered list of nested blocks
    BlockList(Block),
}

impl AttributeType {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Bool => "bool",
            AttributeType::List(_) => "list",
            AttributeType::BlockList(_) => "list of blocks",
        }
    }
}

/// A single schema attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: &'static str,

    #[serde(rename = "type")]
    pub kind: AttributeType,

    pub required: bool,

    pub optional: bool,

    pub computed: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Accepted values, compared case-insensitively
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<&'static [&'static str]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl Attribute {
    fn new(name: &'static str, kind: AttributeType) -> Self {
        Self {
            name,
            kind,
            required: false,
            optional: false,
            computed: false,
            default: None,
            allowed_values: None,
            description: None,
        }
    }

    pub fn required_string(name: &'static str) -> Self {
        Self {
            required: true,
            ..Self::new(name, AttributeType::String)
        }
    }

    pub fn optional_string(name: &'static str) -> Self {
        Self {
            optional: true,
            ..Self::new(name, AttributeType::String)
        }
    }

    pub fn computed_string(name: &'static str) -> Self {
        Self {
            computed: true,
            ..Self::new(name, AttributeType::String)
        }
    }

    pub fn optional_bool(name: &'static str) -> Self {
        Self {
            optional: true,
            ..Self::new(name, AttributeType::Bool)
        }
    }

    pub fn required_string_list(name: &'static str) -> Self {
        Self {
            required: true,
            ..Self::new(name, AttributeType::List(Box::new(AttributeType::String)))
        }
    }

    pub fn optional_block_list(name: &'static str, block: Block) -> Self {
        Self {
            optional: true,
            ..Self::new(name, AttributeType::BlockList(block))
        }
    }

    /// Value used when the attribute is omitted
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Restrict a string attribute to a fixed set of values
    pub fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.allowed_values = Some(values);
        self
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Whether a user may set this attribute in configuration
    pub fn is_settable(&self) -> bool {
        self.required || self.optional
    }
}

/// An ordered set of attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Block {
    pub attributes: Vec<Attribute>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Append every attribute of another block
    pub fn extend(mut self, other: Block) -> Self {
        self.attributes.extend(other.attributes);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}
