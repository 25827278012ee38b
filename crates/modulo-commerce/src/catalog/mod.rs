//! Catalog reference data.
//!
//! Module shapes and finish colours are read-only and loaded once per
//! process. Unknown finish ids are tolerated everywhere: they price as
//! [`Multiplier::ONE`] (no surcharge). Unknown module ids are a caller bug
//! and fail with [`CommerceError::ModuleNotFound`].

mod finish;
mod module;

pub use finish::{FinishSpec, Multiplier};
pub use module::ModuleSpec;

use crate::error::CommerceError;
use crate::ids::{FinishId, ModuleId};
use std::sync::{Arc, OnceLock};

/// Lookup tables for modules and finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    modules: Vec<ModuleSpec>,
    finishes: Vec<FinishSpec>,
}

impl Catalog {
    /// Build a catalog from explicit records.
    pub fn new(modules: Vec<ModuleSpec>, finishes: Vec<FinishSpec>) -> Self {
        Self { modules, finishes }
    }

    /// The storefront catalog: modules A–E and five finishes.
    pub fn standard() -> Arc<Catalog> {
        static STANDARD: OnceLock<Arc<Catalog>> = OnceLock::new();
        STANDARD
            .get_or_init(|| {
                Arc::new(Catalog::new(
                    module::standard_modules(),
                    finish::standard_finishes(),
                ))
            })
            .clone()
    }

    /// All modules in catalog order.
    pub fn modules(&self) -> &[ModuleSpec] {
        &self.modules
    }

    /// All finishes in catalog order.
    pub fn finishes(&self) -> &[FinishSpec] {
        &self.finishes
    }

    /// Look up a module.
    pub fn module(&self, id: &ModuleId) -> Result<&ModuleSpec, CommerceError> {
        self.modules
            .iter()
            .find(|m| &m.id == id)
            .ok_or_else(|| CommerceError::ModuleNotFound(id.to_string()))
    }

    /// Check whether a module id is in the catalog.
    pub fn has_module(&self, id: &ModuleId) -> bool {
        self.modules.iter().any(|m| &m.id == id)
    }

    /// Look up a finish.
    pub fn finish(&self, id: &FinishId) -> Option<&FinishSpec> {
        self.finishes.iter().find(|f| &f.id == id)
    }

    /// Price multiplier for a finish; unknown finishes carry no surcharge.
    pub fn multiplier(&self, id: &FinishId) -> Multiplier {
        self.finish(id).map(|f| f.multiplier).unwrap_or(Multiplier::ONE)
    }

    /// Label for a finish, falling back to the raw id.
    pub fn finish_label<'a>(&'a self, id: &'a FinishId) -> &'a str {
        self.finish(id).map(|f| f.label.as_str()).unwrap_or(id.as_str())
    }

    /// Display name for a module/finish combination,
    /// e.g. "Module A – Front Matte white / Sides Light wood".
    pub fn describe(
        &self,
        module_id: &ModuleId,
        front: &FinishId,
        sides: &FinishId,
    ) -> Result<String, CommerceError> {
        let module = self.module(module_id)?;
        Ok(format!(
            "{} – Front {} / Sides {}",
            module.name,
            self.finish_label(front),
            self.finish_label(sides)
        ))
    }
}
