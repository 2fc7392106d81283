//! Request handlers wired to the panel's buttons

use std::sync::Arc;

use log::{debug, info};
use tokio::task::JoinHandle;

use super::backend::PanelBackend;
use super::diagnostics::DiagnosticLog;
use super::form::FormSource;
use super::output::OutputElement;

/// The two handlers plus everything they touch
///
/// Cloning is cheap; clones share backend, form, output and diagnostics.
pub struct ControlPanel<B, F> {
    backend: Arc<B>,
    form: Arc<F>,
    output: OutputElement,
    diagnostics: DiagnosticLog,
}

impl<B, F> Clone for ControlPanel<B, F> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            form: Arc::clone(&self.form),
            output: self.output.clone(),
            diagnostics: self.diagnostics.clone(),
        }
    }
}

impl<B, F> ControlPanel<B, F>
where
    B: PanelBackend + 'static,
    F: FormSource + 'static,
{
    pub fn new(backend: B, form: F) -> Self {
        Self::from_parts(Arc::new(backend), Arc::new(form), OutputElement::default())
    }

    /// Build around shared pieces, e.g. a backend the caller keeps inspecting
    pub fn from_parts(backend: Arc<B>, form: Arc<F>, output: OutputElement) -> Self {
        Self {
            backend,
            form,
            output,
            diagnostics: DiagnosticLog::new(),
        }
    }

    pub fn output(&self) -> &OutputElement {
        &self.output
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    /// Submit the grid configuration form and show the server's message
    ///
    /// Fields are read now, not when the panel was built. On failure the
    /// output is left as it was and the error goes to the diagnostic log.
    pub async fn submit_form(&self) {
        let input = self.form.read();
        info!(
            "Submitting grid config: range {} - {}, grids {}, margin {}",
            input.price_range_low, input.price_range_high, input.number_of_grids, input.margin
        );

        match self.backend.submit_config(&input).await {
            Ok(reply) => self.output.set_text(reply.message).await,
            Err(e) => self.diagnostics.report(&e),
        }
    }

    /// Fetch the order history and show it verbatim
    pub async fn get_order_history(&self) {
        debug!("Order history requested");

        match self.backend.order_history().await {
            Ok(history) => self.output.set_text(history.render()).await,
            Err(e) => self.diagnostics.report(&e),
        }
    }

    /// Fire the submit handler without waiting for the reply
    pub fn spawn_submit_form(&self) -> JoinHandle<()> {
        let panel = self.clone();
        tokio::spawn(async move { panel.submit_form().await })
    }

    /// Fire the history handler without waiting for the reply
    pub fn spawn_order_history(&self) -> JoinHandle<()> {
        let panel = self.clone();
        tokio::spawn(async move { panel.get_order_history().await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::json;

    use crate::panel::backend::mock::MockBackend;
    use crate::panel::errors::PanelError;
    use crate::panel::form::FieldMap;
    use crate::panel::types::{FormField, FormInput, HistoryResponse, SubmitResponse};

    fn filled_form() -> FieldMap {
        FieldMap::new()
            .with(FormField::PriceRangeLow, "100")
            .with(FormField::PriceRangeHigh, "200")
            .with(FormField::NumberOfGrids, "10")
            .with(FormField::Margin, "0.5")
    }

    type TestPanel = ControlPanel<MockBackend, FieldMap>;

    fn panel_with(backend: MockBackend, form: FieldMap) -> (TestPanel, Arc<MockBackend>) {
        let backend = Arc::new(backend);
        let panel = ControlPanel::from_parts(
            Arc::clone(&backend),
            Arc::new(form),
            OutputElement::default(),
        );
        (panel, backend)
    }

    #[tokio::test]
    async fn test_submit_sends_one_request_with_form_values() {
        let (panel, backend) = panel_with(MockBackend::new(), filled_form());

        panel.submit_form().await;

        let submissions = backend.submissions.lock().await.clone();
        assert_eq!(submissions, vec![FormInput::new("100", "200", "10", "0.5")]);
        assert_eq!(backend.history_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_renders_message() {
        let (panel, backend) = panel_with(MockBackend::new(), filled_form());
        backend.set_submit_reply(Ok(SubmitResponse::new("ok"))).await;

        panel.submit_form().await;

        assert_eq!(panel.output().text().await, "ok");
        assert!(panel.diagnostics().is_empty());
    }

    #[tokio::test]
    async fn test_submit_reads_fields_at_call_time() {
        let form = filled_form();
        let (panel, backend) = panel_with(MockBackend::new(), form.clone());

        panel.submit_form().await;
        form.set(FormField::NumberOfGrids, "20");
        panel.submit_form().await;

        let submissions = backend.submissions.lock().await.clone();
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].number_of_grids, "10");
        assert_eq!(submissions[1].number_of_grids, "20");
    }

    #[tokio::test]
    async fn test_network_failure_leaves_output_unchanged() {
        let (panel, backend) = panel_with(MockBackend::new(), filled_form());
        panel.output().set_text("previous").await;
        backend.set_unreachable().await;

        panel.submit_form().await;
        panel.get_order_history().await;

        assert_eq!(panel.output().text().await, "previous");
        let entries = panel.diagnostics().entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.starts_with("Error: Request failed")));
    }

    #[tokio::test]
    async fn test_history_sends_one_request() {
        let (panel, backend) = panel_with(MockBackend::new(), filled_form());

        panel.get_order_history().await;

        assert_eq!(backend.history_count(), 1);
        assert_eq!(backend.submit_count().await, 0);
    }

    #[tokio::test]
    async fn test_history_renders_full_payload() {
        let (panel, backend) = panel_with(MockBackend::new(), filled_form());
        backend
            .set_history_reply(Ok(HistoryResponse(json!([{"id": 1}]))))
            .await;

        panel.get_order_history().await;

        assert_eq!(panel.output().text().await, r#"[{"id":1}]"#);
    }

    #[tokio::test]
    async fn test_parse_failure_is_logged_only() {
        let (panel, backend) = panel_with(MockBackend::new(), filled_form());
        backend
            .set_history_reply(Err(PanelError::RequestFailed("expected value".into())))
            .await;

        panel.get_order_history().await;

        assert_eq!(panel.output().text().await, "");
        assert_eq!(panel.diagnostics().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_racing_handlers_last_response_wins() {
        let (panel, backend) = panel_with(MockBackend::new(), filled_form());
        backend.set_submit_reply(Ok(SubmitResponse::new("submitted"))).await;
        backend
            .set_history_reply(Ok(HistoryResponse(json!({"orders": []}))))
            .await;
        backend.set_history_delay(Duration::from_secs(1)).await;
        backend.set_submit_delay(Duration::from_secs(2)).await;

        let submit = panel.spawn_submit_form();
        let history = panel.spawn_order_history();

        // Paused clock jumps to the history deadline; submit is still in flight
        history.await.unwrap();
        assert!(!submit.is_finished());
        assert_eq!(panel.output().text().await, r#"{"orders":[]}"#);

        submit.await.unwrap();
        assert_eq!(panel.output().text().await, "submitted");
        assert_eq!(backend.total_calls().await, 2);
    }
}
