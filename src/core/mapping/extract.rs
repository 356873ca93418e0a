//! Field-extraction algorithm
//!
//! For every declared field of a category: read the property, walk its
//! repetitions with 1-based entry indices, type-cast and prepare each value.
//! A failing value is skipped and reported; its siblings are still processed.

use super::outcome::{Diagnostic, Severity, Stage};
use crate::datatypes::{DatatypeRegistry, FieldCategory, FieldPreparer, TypeCaster};
use crate::domain::segment::is_absent_value;
use crate::domain::{IdentityContext, Property, Record, Segment};
use serde_json::Value;

/// Everything the extraction of one segment needs, borrowed for its duration
pub(crate) struct Extraction<'a> {
    pub segment: &'a Segment,
    pub label: &'a str,
    pub identity: &'a IdentityContext,
    pub registry: &'a DatatypeRegistry,
}

impl Extraction<'_> {
    /// Extracts all declared fields of one category, in declaration order
    pub fn category(
        &self,
        category: FieldCategory,
        fields: &[String],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<Record> {
        let mut records = Vec::new();

        let (Some(caster), Some(preparer)) = (
            self.registry.caster(category),
            self.registry.preparer(category),
        ) else {
            let diagnostic = Diagnostic::new(
                Severity::Error,
                Stage::TypeCast,
                self.label,
                format!("no caster or preparer registered for {category}"),
            );
            crate::log_contained_failure!(&diagnostic);
            diagnostics.push(diagnostic);
            return records;
        };

        for field in fields {
            match self.segment.property(field) {
                Property::Absent => {}
                Property::Single(value) => self.value(
                    category,
                    caster,
                    preparer,
                    field,
                    value,
                    1,
                    &mut records,
                    diagnostics,
                ),
                Property::Repeated(values) => {
                    for (index, value) in values.iter().enumerate() {
                        self.value(
                            category,
                            caster,
                            preparer,
                            field,
                            value,
                            index + 1,
                            &mut records,
                            diagnostics,
                        );
                    }
                }
            }
        }

        records
    }

    #[allow(clippy::too_many_arguments)]
    fn value(
        &self,
        category: FieldCategory,
        caster: &dyn TypeCaster,
        preparer: &dyn FieldPreparer,
        field: &str,
        value: &Value,
        entry: usize,
        records: &mut Vec<Record>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if is_absent_value(value) {
            return;
        }

        let component = match caster.typecast(value) {
            Ok(component) => component,
            Err(e) => {
                let diagnostic =
                    Diagnostic::new(Severity::Error, Stage::TypeCast, self.label, e.to_string())
                        .at(category, field, entry);
                crate::log_contained_failure!(&diagnostic);
                diagnostics.push(diagnostic);
                return;
            }
        };

        match preparer.prepare(field, &component, self.identity, self.label, entry) {
            Ok(prepared) => records.extend(prepared),
            Err(e) => {
                let diagnostic =
                    Diagnostic::new(Severity::Error, Stage::Prepare, self.label, e.to_string())
                        .at(category, field, entry);
                crate::log_contained_failure!(&diagnostic);
                diagnostics.push(diagnostic);
            }
        }
    }
}
