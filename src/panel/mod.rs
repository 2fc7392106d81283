//! Control Panel Module for the grid bot backend
//!
//! This module is the client half of the grid bot's control panel: it reads the
//! grid configuration form, posts it to the backend, fetches order history and
//! renders each reply into a single shared output element.
//!
//! # Architecture
//!
//! - [`types`] - Form fields and request/response bodies
//! - [`errors`] - Panel error type
//! - [`form`] - Where form values come from (read at call time)
//! - [`output`] - The shared output element
//! - [`diagnostics`] - Where failed requests are reported
//! - [`backend`] - HTTP backend abstraction (mockable for testing)
//! - [`handlers`] - The submit and history handlers
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use grid_panel::config::BackendConfig;
//! use grid_panel::panel::{ControlPanel, FieldMap, FormField, HttpBackend};
//!
//! let form = FieldMap::new()
//!     .with(FormField::PriceRangeLow, "100")
//!     .with(FormField::PriceRangeHigh, "200")
//!     .with(FormField::NumberOfGrids, "10")
//!     .with(FormField::Margin, "0.5");
//!
//! let panel = ControlPanel::new(HttpBackend::new(&BackendConfig::default()), form);
//! panel.submit_form().await;
//! println!("{}", panel.output().text().await);
//! ```

pub mod backend;
pub mod diagnostics;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod output;
pub mod types;

pub use backend::{HttpBackend, PanelBackend};
pub use diagnostics::DiagnosticLog;
pub use errors::{PanelError, PanelResult};
pub use form::{FieldMap, FormSource};
pub use handlers::ControlPanel;
pub use output::{OutputElement, RESPONSE_ELEMENT_ID};
pub use types::{FormField, FormInput, HistoryResponse, SubmitResponse};
