//! Form abstraction - where the submitter reads its inputs from

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::types::{FormField, FormInput};

/// Source of form field values
///
/// Implementations are read every time a handler runs, never cached, so a
/// value changed between two submissions shows up in the second one.
pub trait FormSource: Send + Sync {
    /// Current text of a single field. An empty field reads as `""`.
    fn value(&self, field: FormField) -> String;

    /// Snapshot all four fields
    fn read(&self) -> FormInput {
        let mut input = FormInput::default();
        for field in FormField::ALL {
            input.set(field, self.value(field));
        }
        input
    }
}

impl FormSource for FormInput {
    fn value(&self, field: FormField) -> String {
        self.get(field).to_string()
    }
}

/// Shared, editable set of form fields
///
/// Clones share the same storage, the way every script on a page sees the
/// same input elements.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    fields: Arc<RwLock<HashMap<FormField, String>>>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a field before sharing the map
    pub fn with(self, field: FormField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Replace the text of a field
    pub fn set(&self, field: FormField, value: impl Into<String>) {
        let mut fields = match self.fields.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        fields.insert(field, value.into());
    }

    /// Clear a field back to empty
    pub fn clear(&self, field: FormField) {
        let mut fields = match self.fields.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        fields.remove(&field);
    }
}

impl From<FormInput> for FieldMap {
    fn from(input: FormInput) -> Self {
        let map = FieldMap::new();
        for field in FormField::ALL {
            map.set(field, input.get(field));
        }
        map
    }
}

impl FormSource for FieldMap {
    fn value(&self, field: FormField) -> String {
        let fields = match self.fields.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        fields.get(&field).cloned().unwrap_or_default()
    }
}
