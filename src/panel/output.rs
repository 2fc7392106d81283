//! The shared output element both handlers render into

use std::sync::Arc;

use tokio::sync::RwLock;

/// Id of the element on the original page
pub const RESPONSE_ELEMENT_ID: &str = "response";

/// Text node shared by every handler
///
/// Each write replaces the whole text. Concurrent handlers race and the last
/// write wins.
#[derive(Debug, Clone)]
pub struct OutputElement {
    id: String,
    text: Arc<RwLock<String>>,
}

impl OutputElement {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: Arc::new(RwLock::new(String::new())),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Replace the element's text
    pub async fn set_text(&self, text: impl Into<String>) {
        *self.text.write().await = text.into();
    }

    /// Current text
    pub async fn text(&self) -> String {
        self.text.read().await.clone()
    }
}

impl Default for OutputElement {
    fn default() -> Self {
        Self::new(RESPONSE_ELEMENT_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_text() {
        let output = OutputElement::default();
        let other = output.clone();
        assert_eq!(output.id(), "response");
        assert_eq!(output.text().await, "");

        other.set_text("first").await;
        output.set_text("second").await;
        assert_eq!(other.text().await, "second");
    }
}
