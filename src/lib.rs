#![deny(unreachable_pub)]
pub mod config;
pub mod logging;
pub mod panel;

pub use panel::{
    ControlPanel, DiagnosticLog, FieldMap, FormField, FormInput, FormSource, HistoryResponse,
    HttpBackend, OutputElement, PanelBackend, PanelError, PanelResult, SubmitResponse,
};
