//! Caster/preparer pairs per field category

use super::prepare::{CodedValuePreparer, ColumnPreparer, FieldPreparer};
use super::typecast::{SchemaCaster, TypeCaster};
use super::FieldCategory;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Holds the [`TypeCaster`] and [`FieldPreparer`] used for each category
///
/// The default registry uses schema-driven casters for every category, the
/// coded-value preparer for CWE and column preparers for the rest. Individual
/// entries can be swapped out, e.g. to target a different table layout.
///
/// # Examples
///
/// ```
/// use hl7_store::datatypes::{DatatypeRegistry, FieldCategory};
/// use hl7_store::datatypes::prepare::ColumnPreparer;
///
/// let registry = DatatypeRegistry::default()
///     .with_preparer(FieldCategory::Cwe, ColumnPreparer::new(FieldCategory::Cwe));
/// assert!(registry.caster(FieldCategory::Cwe).is_some());
/// ```
pub struct DatatypeRegistry {
    casters: HashMap<FieldCategory, Arc<dyn TypeCaster>>,
    preparers: HashMap<FieldCategory, Arc<dyn FieldPreparer>>,
}

impl DatatypeRegistry {
    /// Shared instance of the default registry
    pub fn standard() -> Arc<DatatypeRegistry> {
        static STANDARD: OnceLock<Arc<DatatypeRegistry>> = OnceLock::new();
        Arc::clone(STANDARD.get_or_init(|| Arc::new(DatatypeRegistry::default())))
    }

    /// Replaces the caster of a category
    pub fn with_caster(
        mut self,
        category: FieldCategory,
        caster: impl TypeCaster + 'static,
    ) -> Self {
        self.casters.insert(category, Arc::new(caster));
        self
    }

    /// Replaces the preparer of a category
    pub fn with_preparer(
        mut self,
        category: FieldCategory,
        preparer: impl FieldPreparer + 'static,
    ) -> Self {
        self.preparers.insert(category, Arc::new(preparer));
        self
    }

    pub fn caster(&self, category: FieldCategory) -> Option<&dyn TypeCaster> {
        self.casters.get(&category).map(AsRef::as_ref)
    }

    pub fn preparer(&self, category: FieldCategory) -> Option<&dyn FieldPreparer> {
        self.preparers.get(&category).map(AsRef::as_ref)
    }
}

impl Default for DatatypeRegistry {
    fn default() -> Self {
        let mut casters: HashMap<FieldCategory, Arc<dyn TypeCaster>> = HashMap::new();
        let mut preparers: HashMap<FieldCategory, Arc<dyn FieldPreparer>> = HashMap::new();

        for category in FieldCategory::ALL {
            casters.insert(category, Arc::new(SchemaCaster::new(category)));
            let preparer: Arc<dyn FieldPreparer> = match category {
                FieldCategory::Cwe => Arc::new(CodedValuePreparer),
                other => Arc::new(ColumnPreparer::new(other)),
            };
            preparers.insert(category, preparer);
        }

        Self { casters, preparers }
    }
}

impl fmt::Debug for DatatypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut categories: Vec<_> = self.preparers.keys().collect();
        categories.sort();
        f.debug_struct("DatatypeRegistry")
            .field("categories", &categories)
            .finish()
    }
}
