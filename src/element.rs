use chromiumoxide::element::Element as CrElement;

use crate::error::Result;

/// Wrapper around a chromiumoxide Element, providing a simplified API.
pub struct Element {
    inner: CrElement,
}

impl Element {
    pub(crate) fn new(inner: CrElement) -> Self {
        Self { inner }
    }

    /// Click this element (scrolls into view first).
    pub async fn click(&self) -> Result<()> {
        self.inner.click().await?;
        Ok(())
    }

    /// Type text into this element as key events.
    pub async fn type_text(&self, text: &str) -> Result<()> {
        self.inner.type_str(text).await?;
        Ok(())
    }
}
