use crate::res::res_name::ResName;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NULL_VALUE: &str = "@null";
pub const EMPTY_VALUE: &str = "@empty";

/// One attribute assignment: the attribute's name, its raw string value, and
/// the package to qualify unqualified references against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeResource {
    pub res_name: ResName,
    pub value: String,
    pub context_package: String,
    /// Reference id pre-resolved by the caller's attribute set, when known.
    #[serde(default)]
    pub reference_res_id: Option<i32>,
}

impl AttributeResource {
    pub fn new(
        res_name: ResName,
        value: impl Into<String>,
        context_package: impl Into<String>,
    ) -> Self {
        Self {
            res_name,
            value: value.into(),
            context_package: context_package.into(),
            reference_res_id: None,
        }
    }

    pub fn with_reference_res_id(mut self, reference_res_id: i32) -> Self {
        self.reference_res_id = Some(reference_res_id);
        self
    }

    pub fn is_null(&self) -> bool {
        is_null_value(&self.value)
    }

    pub fn is_empty(&self) -> bool {
        is_empty_value(&self.value)
    }

    pub fn is_resource_reference(&self) -> bool {
        is_resource_reference_value(&self.value)
    }

    pub fn is_style_reference(&self) -> bool {
        is_style_reference_value(&self.value)
    }

    /// The `@[+][package:]type/name` target, qualified against the context
    /// package. Only meaningful when `is_resource_reference()`.
    pub fn resource_reference(&self) -> Option<ResName> {
        if !self.is_resource_reference() {
            return None;
        }
        let reference = self.value[1..].replace('+', "");
        ResName::qualify(&reference, &self.context_package, None)
    }

    /// The `?[package:][attr/]name` target, defaulting to the `attr` type.
    /// Only meaningful when `is_style_reference()`.
    pub fn style_reference(&self) -> Option<ResName> {
        if !self.is_style_reference() {
            return None;
        }
        ResName::qualify(&self.value[1..], &self.context_package, Some("attr"))
    }
}

impl fmt::Display for AttributeResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = \"{}\"", self.res_name, self.value)
    }
}

pub fn is_null_value(value: &str) -> bool {
    value == NULL_VALUE
}

pub fn is_empty_value(value: &str) -> bool {
    value == EMPTY_VALUE
}

pub fn is_resource_reference_value(value: &str) -> bool {
    value.starts_with('@') && !is_null_value(value) && !is_empty_value(value)
}

pub fn is_style_reference_value(value: &str) -> bool {
    value.starts_with('?')
}
