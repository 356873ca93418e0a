//! Type-casters: raw structured values to normalized components

use super::component::{decompose, Component, EI_SCHEMA};
use super::FieldCategory;
use crate::domain::TypeCastError;
use serde_json::Value;

/// Decomposes a raw structured value into a normalized [`Component`]
///
/// Implementations must be pure: the same raw value always yields the same
/// component or the same error.
pub trait TypeCaster: Send + Sync {
    fn typecast(&self, raw: &Value) -> Result<Component, TypeCastError>;
}

/// Schema-driven caster used for every built-in category
#[derive(Debug, Clone, Copy)]
pub struct SchemaCaster {
    category: FieldCategory,
}

impl SchemaCaster {
    pub fn new(category: FieldCategory) -> Self {
        Self { category }
    }
}

impl TypeCaster for SchemaCaster {
    fn typecast(&self, raw: &Value) -> Result<Component, TypeCastError> {
        decompose(self.category.as_str(), self.category.schema(), raw)
    }
}

/// Casts a raw value as a coded value (CWE)
pub fn cast_coded_value(raw: &Value) -> Result<Component, TypeCastError> {
    SchemaCaster::new(FieldCategory::Cwe).typecast(raw)
}

/// Casts a raw value as an entity identifier (EI)
pub fn cast_entity_identifier(raw: &Value) -> Result<Component, TypeCastError> {
    decompose("EI", EI_SCHEMA, raw)
}
