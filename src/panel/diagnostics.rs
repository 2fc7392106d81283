//! Diagnostic channel for failed requests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use log::error;

use super::errors::PanelError;

const MAX_ENTRIES: usize = 100;

/// Where handlers report failures instead of surfacing them
///
/// Every entry goes to the `log` facade at error level and is also kept in a
/// bounded in-memory list so callers can inspect what went wrong.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Arc<Mutex<VecDeque<String>>>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed request
    pub fn report(&self, err: &PanelError) {
        let line = format!("Error: {}", err);
        error!("{}", line);

        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if entries.len() == MAX_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(line);
    }

    /// Recorded entries, oldest first
    pub fn entries(&self) -> Vec<String> {
        match self.entries.lock() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self.entries.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
