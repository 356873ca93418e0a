//! Field-category declarations
//!
//! Which segment properties are extracted under which structured-datatype
//! category. Declarations only ever accumulate: declaring more fields for a
//! category appends to what is already there.

use crate::datatypes::FieldCategory;
use serde::Serialize;
use std::collections::BTreeMap;

/// Field names declared per [`FieldCategory`]
///
/// # Examples
///
/// ```
/// use hl7_store::core::mapping::FieldDeclarations;
/// use hl7_store::datatypes::FieldCategory;
///
/// let declarations = FieldDeclarations::new()
///     .cwe(["PatientClass"])
///     .cwe(["AdmissionType"])
///     .pl(["PriorPatientLocation"]);
///
/// assert_eq!(declarations.fields(FieldCategory::Cwe), ["PatientClass", "AdmissionType"]);
/// assert!(declarations.fields(FieldCategory::Cx).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldDeclarations {
    fields: BTreeMap<FieldCategory, Vec<String>>,
}

impl FieldDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends fields to a category
    pub fn declare<I, S>(&mut self, category: FieldCategory, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let declared = self.fields.entry(category).or_default();
        declared.extend(fields.into_iter().map(Into::into));
    }

    /// Builder form of [`declare`](Self::declare)
    pub fn with<I, S>(mut self, category: FieldCategory, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(category, fields);
        self
    }

    pub fn cwe<I: IntoIterator<Item = S>, S: Into<String>>(self, fields: I) -> Self {
        self.with(FieldCategory::Cwe, fields)
    }

    pub fn cx<I: IntoIterator<Item = S>, S: Into<String>>(self, fields: I) -> Self {
        self.with(FieldCategory::Cx, fields)
    }

    pub fn xcn<I: IntoIterator<Item = S>, S: Into<String>>(self, fields: I) -> Self {
        self.with(FieldCategory::Xcn, fields)
    }

    pub fn xad<I: IntoIterator<Item = S>, S: Into<String>>(self, fields: I) -> Self {
        self.with(FieldCategory::Xad, fields)
    }

    pub fn xtn<I: IntoIterator<Item = S>, S: Into<String>>(self, fields: I) -> Self {
        self.with(FieldCategory::Xtn, fields)
    }

    pub fn pl<I: IntoIterator<Item = S>, S: Into<String>>(self, fields: I) -> Self {
        self.with(FieldCategory::Pl, fields)
    }

    /// Fields declared for a category, in declaration order
    pub fn fields(&self, category: FieldCategory) -> &[String] {
        self.fields
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Categories with at least one declared field, in extraction order
    pub fn iter(&self) -> impl Iterator<Item = (FieldCategory, &[String])> {
        self.fields
            .iter()
            .filter(|(_, fields)| !fields.is_empty())
            .map(|(category, fields)| (*category, fields.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// A new declaration set holding `self` followed by `other`
    pub fn merged(&self, other: &FieldDeclarations) -> FieldDeclarations {
        let mut merged = self.clone();
        for (category, fields) in other.iter() {
            merged.declare(category, fields.iter().cloned());
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declarations_accumulate() {
        let mut declarations = FieldDeclarations::new();
        declarations.declare(FieldCategory::Cwe, ["A"]);
        declarations.declare(FieldCategory::Cwe, ["B"]);
        assert_eq!(declarations.fields(FieldCategory::Cwe), ["A", "B"]);
    }

    #[test]
    fn test_iter_skips_empty_categories_and_keeps_order() {
        let declarations = FieldDeclarations::new()
            .pl(["Location"])
            .with(FieldCategory::Cx, Vec::<String>::new())
            .cwe(["Code"]);

        let categories: Vec<_> = declarations.iter().map(|(c, _)| c).collect();
        assert_eq!(categories, vec![FieldCategory::Cwe, FieldCategory::Pl]);
    }

    #[test]
    fn test_merged_appends_without_mutating() {
        let base = FieldDeclarations::new().cwe(["A"]);
        let extra = FieldDeclarations::new().cwe(["B"]).xtn(["Phone"]);
        let merged = base.merged(&extra);

        assert_eq!(merged.fields(FieldCategory::Cwe), ["A", "B"]);
        assert_eq!(merged.fields(FieldCategory::Xtn), ["Phone"]);
        assert_eq!(base.fields(FieldCategory::Cwe), ["A"]);
    }

    #[test]
    fn test_empty() {
        assert!(FieldDeclarations::new().is_empty());
        assert!(FieldDeclarations::new().with(FieldCategory::Xad, Vec::<&str>::new()).is_empty());
        assert!(!FieldDeclarations::new().xad(["PatientAddress"]).is_empty());
    }
}
